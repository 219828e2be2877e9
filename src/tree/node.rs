//! A single node of the state hierarchy.

use crate::core::{NodeTags, StatePath, TransitionPolicy};
use std::collections::HashMap;
use std::fmt;

/// Index of a node inside its [`crate::tree::StateForest`].
///
/// Ids are only meaningful for the forest that issued them.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// What a hook is told about the node it runs for.
#[derive(Clone, Copy, Debug)]
pub struct HookContext<'a> {
    pub node: NodeId,
    /// Full path of the node
    pub path: &'a StatePath,
    /// For `on_enter` the node that was active before, for `on_exit` the
    /// node about to become active. `None` when there is no such sibling.
    pub peer: Option<&'a str>,
}

/// Domain side effects attached to a node.
///
/// All methods default to doing nothing. Hooks run synchronously inside the
/// transition that triggers them and must not block.
pub trait StateHooks: Send {
    fn on_enter(&mut self, _cx: &HookContext<'_>) {}

    fn on_exit(&mut self, _cx: &HookContext<'_>) {}

    /// Called once per tick while the node is the active leaf.
    fn on_update(&mut self, _cx: &HookContext<'_>) {}

    fn on_pause(&mut self, _cx: &HookContext<'_>) {}

    fn on_resume(&mut self, _cx: &HookContext<'_>) {}
}

/// One named node.
///
/// Nodes are created detached and handed to the forest, which takes
/// ownership and wires the parent link. Lifecycle flags are driven by the
/// forest only.
///
/// ```rust
/// use statetree::core::{CameraMode, TransitionPolicy};
/// use statetree::tree::StateNode;
///
/// let node = StateNode::new("OutsideWorld")
///     .with_policy(TransitionPolicy::allow(["MountainFoot", "Climbing"]))
///     .with_camera(CameraMode::OutsideWorld);
///
/// assert_eq!(node.name(), "OutsideWorld");
/// assert!(!node.is_active());
/// ```
pub struct StateNode {
    pub(crate) name: String,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: HashMap<String, NodeId>,
    pub(crate) current_child: Option<NodeId>,
    pub(crate) active: bool,
    pub(crate) paused: bool,
    pub(crate) policy: TransitionPolicy,
    pub(crate) tags: NodeTags,
    pub(crate) hooks: Option<Box<dyn StateHooks>>,
    /// Set once the node has been replaced; its slot is never reused.
    pub(crate) retired: bool,
}

impl StateNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parent: None,
            children: HashMap::new(),
            current_child: None,
            active: false,
            paused: false,
            policy: TransitionPolicy::AnyChild,
            tags: NodeTags::default(),
            hooks: None,
            retired: false,
        }
    }

    pub fn with_policy(mut self, policy: TransitionPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_tags(mut self, tags: NodeTags) -> Self {
        self.tags = tags;
        self
    }

    pub fn with_input_map(mut self, map: crate::core::InputMap) -> Self {
        self.tags.input_map = Some(map);
        self
    }

    pub fn with_camera(mut self, mode: crate::core::CameraMode) -> Self {
        self.tags.camera = Some(mode);
        self
    }

    pub fn with_hooks(mut self, hooks: impl StateHooks + 'static) -> Self {
        self.hooks = Some(Box::new(hooks));
        self
    }

    pub(crate) fn with_boxed_hooks(mut self, hooks: Option<Box<dyn StateHooks>>) -> Self {
        self.hooks = hooks;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn child(&self, name: &str) -> Option<NodeId> {
        self.children.get(name).copied()
    }

    pub fn has_child(&self, name: &str) -> bool {
        self.children.contains_key(name)
    }

    /// Names of all registered children, in no particular order.
    pub fn child_names(&self) -> impl Iterator<Item = &str> {
        self.children.keys().map(String::as_str)
    }

    pub fn current_child(&self) -> Option<NodeId> {
        self.current_child
    }

    /// True between enter and exit.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// True while a descendant holds leaf status.
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn policy(&self) -> &TransitionPolicy {
        &self.policy
    }

    /// Tags after inheritance from ancestors.
    pub fn tags(&self) -> NodeTags {
        self.tags
    }
}

impl fmt::Debug for StateNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateNode")
            .field("name", &self.name)
            .field("parent", &self.parent)
            .field("children", &self.children)
            .field("current_child", &self.current_child)
            .field("active", &self.active)
            .field("paused", &self.paused)
            .field("policy", &self.policy)
            .field("tags", &self.tags)
            .field("hooks", &self.hooks.is_some())
            .field("retired", &self.retired)
            .finish()
    }
}
