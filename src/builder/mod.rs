//! Declarative construction of state forests.
//!
//! Describe each tree with [`StateSpec`] and hand the roots to
//! [`ForestBuilder`]. The builder validates the whole declaration with
//! stillwater's `Validation`, so every violation is reported together.

mod error;
mod forest;
mod spec;

pub use error::{BuildError, TreeViolation};
pub use forest::ForestBuilder;
pub use spec::StateSpec;
