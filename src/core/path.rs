//! Slash-delimited state paths.
//!
//! A [`StatePath`] is the chain of node names from a root down to some node.
//! Its string form (`InsideGame/OutsideWorld/Climbing`) is the addressing
//! scheme other systems use to ask "where is the game right now".

use serde::{Deserialize, Serialize};
use std::fmt;

/// Separator used by [`fmt::Display`] and by default configuration.
pub const DEFAULT_SEPARATOR: char = '/';

/// Ordered list of node names from a root to a node.
///
/// Paths are plain values. They do not borrow from the forest and stay valid
/// after the nodes they name have been exited.
///
/// # Example
///
/// ```rust
/// use statetree::core::StatePath;
///
/// let path = StatePath::parse("InsideGame/OutsideWorld/Climbing", '/').unwrap();
/// assert_eq!(path.root(), Some("InsideGame"));
/// assert_eq!(path.leaf(), Some("Climbing"));
/// assert_eq!(path.depth(), 3);
/// assert!(path.contains("OutsideWorld"));
/// assert_eq!(path.to_string(), "InsideGame/OutsideWorld/Climbing");
/// ```
#[derive(Clone, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
pub struct StatePath {
    segments: Vec<String>,
}

impl StatePath {
    /// Build a path from already-split segments.
    pub fn from_segments<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            segments: segments.into_iter().map(Into::into).collect(),
        }
    }

    /// Parse `raw` using `separator`.
    ///
    /// Returns `None` for an empty string or when any segment is empty
    /// (`"A//B"`, `"/A"`, `"A/"`).
    pub fn parse(raw: &str, separator: char) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }

        let segments: Vec<String> = trimmed.split(separator).map(str::to_string).collect();
        if segments.iter().any(|s| s.is_empty()) {
            return None;
        }

        Some(Self { segments })
    }

    /// All segments, root first.
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Name of the root segment.
    pub fn root(&self) -> Option<&str> {
        self.segments.first().map(String::as_str)
    }

    /// Name of the deepest segment.
    pub fn leaf(&self) -> Option<&str> {
        self.segments.last().map(String::as_str)
    }

    pub fn depth(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// True if any segment equals `name` exactly.
    ///
    /// This is segment equality, not substring search: `"Sailing"` does not
    /// match a segment called `"SailingLessons"`.
    pub fn contains(&self, name: &str) -> bool {
        self.segments.iter().any(|s| s == name)
    }

    /// True if `prefix` names this path or one of its ancestors.
    pub fn starts_with(&self, prefix: &StatePath) -> bool {
        self.segments.starts_with(&prefix.segments)
    }

    /// Path of a child named `name` under this path.
    pub fn child(&self, name: impl Into<String>) -> Self {
        let mut segments = self.segments.clone();
        segments.push(name.into());
        Self { segments }
    }

    /// Path of the parent node, or `None` for a root or empty path.
    pub fn parent(&self) -> Option<Self> {
        if self.segments.len() < 2 {
            return None;
        }
        Some(Self {
            segments: self.segments[..self.segments.len() - 1].to_vec(),
        })
    }

    /// Join segments with an explicit separator.
    pub fn join(&self, separator: char) -> String {
        let mut buf = [0u8; 4];
        self.segments.join(separator.encode_utf8(&mut buf))
    }
}

impl fmt::Display for StatePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.join(DEFAULT_SEPARATOR))
    }
}
