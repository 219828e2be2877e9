//! Declarative description of a state and its subtree.

use crate::core::{CameraMode, InputMap, NodeTags, TransitionPolicy};
use crate::tree::{StateHooks, StateNode};
use std::fmt;

/// One state to be created by [`crate::builder::ForestBuilder`], with its
/// children.
///
/// # Example
///
/// ```
/// use statetree::builder::StateSpec;
/// use statetree::core::InputMap;
///
/// let cabin = StateSpec::new("ThoughtBoatCabin")
///     .input_map(InputMap::ThoughtVessel)
///     .children([StateSpec::new("ExploringMind"), StateSpec::new("Resting")]);
///
/// assert_eq!(cabin.name(), "ThoughtBoatCabin");
/// assert_eq!(cabin.child_specs().len(), 2);
/// ```
pub struct StateSpec {
    pub(crate) name: String,
    pub(crate) policy: TransitionPolicy,
    pub(crate) tags: NodeTags,
    pub(crate) hooks: Option<Box<dyn StateHooks>>,
    pub(crate) children: Vec<StateSpec>,
}

impl StateSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            policy: TransitionPolicy::AnyChild,
            tags: NodeTags::default(),
            hooks: None,
            children: Vec::new(),
        }
    }

    pub fn policy(mut self, policy: TransitionPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Shorthand for an allow-list policy.
    pub fn allow<I, S>(self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.policy(TransitionPolicy::allow(names))
    }

    pub fn input_map(mut self, map: InputMap) -> Self {
        self.tags.input_map = Some(map);
        self
    }

    pub fn camera(mut self, mode: CameraMode) -> Self {
        self.tags.camera = Some(mode);
        self
    }

    pub fn hooks(mut self, hooks: impl StateHooks + 'static) -> Self {
        self.hooks = Some(Box::new(hooks));
        self
    }

    pub fn child(mut self, child: StateSpec) -> Self {
        self.children.push(child);
        self
    }

    pub fn children(mut self, children: impl IntoIterator<Item = StateSpec>) -> Self {
        self.children.extend(children);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn child_specs(&self) -> &[StateSpec] {
        &self.children
    }

    /// Detached node for this spec alone, without children.
    pub(crate) fn take_node(&mut self) -> StateNode {
        StateNode::new(self.name.clone())
            .with_policy(std::mem::take(&mut self.policy))
            .with_tags(self.tags)
            .with_boxed_hooks(self.hooks.take())
    }
}

impl fmt::Debug for StateSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateSpec")
            .field("name", &self.name)
            .field("policy", &self.policy)
            .field("tags", &self.tags)
            .field("hooks", &self.hooks.is_some())
            .field("children", &self.children)
            .finish()
    }
}
