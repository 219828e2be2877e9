//! The state forest: every root tree, the active root, and navigation.

use super::error::{NavigationError, TransitionOutcome};
use super::node::{HookContext, NodeId, StateHooks, StateNode};
use crate::config::ForestConfig;
use crate::core::{StateHistory, StatePath, StateTransition, TransitionRequest};
use crate::events::{ObserverId, StateEvent, StateObserver};
use chrono::Utc;
use std::collections::{HashMap, VecDeque};

/// Returned by [`StateForest::current_state_path`] before the first transition.
pub const NO_STATE: &str = "None";

/// Owner of all state trees.
///
/// Nodes live in an arena and refer to each other by [`NodeId`]. Exactly one
/// root is active at a time; within it the chain of current children leads
/// to the single active leaf.
///
/// Every navigation call checks its preconditions before touching the tree,
/// so a refused request never leaves a half-applied transition behind.
pub struct StateForest {
    nodes: Vec<StateNode>,
    roots: HashMap<String, NodeId>,
    current_root: Option<NodeId>,
    observers: Vec<(ObserverId, Box<dyn StateObserver>)>,
    next_observer: u64,
    pending: VecDeque<StateEvent>,
    history: StateHistory,
    config: ForestConfig,
}

impl Default for StateForest {
    fn default() -> Self {
        Self::new(ForestConfig::default())
    }
}

impl StateForest {
    pub fn new(config: ForestConfig) -> Self {
        Self {
            nodes: Vec::new(),
            roots: HashMap::new(),
            current_root: None,
            observers: Vec::new(),
            next_observer: 0,
            pending: VecDeque::new(),
            history: StateHistory::new(),
            config,
        }
    }

    pub fn config(&self) -> &ForestConfig {
        &self.config
    }

    pub fn history(&self) -> &StateHistory {
        &self.history
    }

    pub(crate) fn replace_history(&mut self, history: StateHistory) {
        self.history = history.retain_last(self.config.history_limit);
    }

    // ------------------------------------------------------------------
    // Construction
    // ------------------------------------------------------------------

    /// Register `node` as a root.
    ///
    /// A root with the same name is replaced (with a warning) unless it is
    /// the active root. The replaced tree is retired: its ids no longer
    /// resolve.
    pub fn add_root(&mut self, mut node: StateNode) -> Result<NodeId, NavigationError> {
        if let Some(&existing) = self.roots.get(&node.name) {
            if self.current_root == Some(existing) {
                tracing::error!("Refusing to replace active root state '{}'", node.name);
                return Err(NavigationError::ChildActive { name: node.name });
            }
            tracing::warn!("Replacing root state '{}'", node.name);
            self.retire(existing);
        }

        node.parent = None;
        let id = NodeId(self.nodes.len());
        self.roots.insert(node.name.clone(), id);
        self.nodes.push(node);
        Ok(id)
    }

    /// Attach `child` under `parent`.
    ///
    /// The child's tags are resolved against the parent's at this point. A
    /// sibling with the same name is replaced (with a warning) unless it is
    /// the parent's current child. The replaced subtree is retired.
    pub fn add_child(&mut self, parent: NodeId, mut child: StateNode) -> Result<NodeId, NavigationError> {
        let parent_node = self.live(parent).ok_or(NavigationError::UnknownNode(parent))?;

        if let Some(&existing) = parent_node.children.get(&child.name) {
            if parent_node.current_child == Some(existing) {
                tracing::error!(
                    "Refusing to replace active state '{}' under '{}'",
                    child.name,
                    parent_node.name
                );
                return Err(NavigationError::ChildActive { name: child.name });
            }
            tracing::warn!("Replacing state '{}' under '{}'", child.name, parent_node.name);
            self.retire(existing);
        }

        let parent_node = &self.nodes[parent.0];
        child.tags = child.tags.inherit(&parent_node.tags);
        child.parent = Some(parent);

        let id = NodeId(self.nodes.len());
        let name = child.name.clone();
        self.nodes.push(child);
        self.nodes[parent.0].children.insert(name, id);
        Ok(id)
    }

    // ------------------------------------------------------------------
    // Observers
    // ------------------------------------------------------------------

    pub fn subscribe(&mut self, observer: impl StateObserver + 'static) -> ObserverId {
        self.subscribe_boxed(Box::new(observer))
    }

    pub fn subscribe_boxed(&mut self, observer: Box<dyn StateObserver>) -> ObserverId {
        let id = ObserverId(self.next_observer);
        self.next_observer += 1;
        self.observers.push((id, observer));
        id
    }

    /// Remove an observer. Returns `false` if it was not subscribed.
    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(oid, _)| *oid != id);
        self.observers.len() != before
    }

    // ------------------------------------------------------------------
    // Introspection
    // ------------------------------------------------------------------

    /// The node behind `id`, or `None` if it was never attached or has
    /// since been replaced.
    pub fn node(&self, id: NodeId) -> Option<&StateNode> {
        self.live(id)
    }

    /// Every attached node, including roots, in attachment order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &StateNode)> {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, node)| !node.retired)
            .map(|(i, node)| (NodeId(i), node))
    }

    pub fn root(&self, name: &str) -> Option<NodeId> {
        self.roots.get(name).copied()
    }

    pub fn root_names(&self) -> impl Iterator<Item = &str> {
        self.roots.keys().map(String::as_str)
    }

    pub fn current_root(&self) -> Option<NodeId> {
        self.current_root
    }

    /// Resolve a path string to a node, active or not.
    pub fn find(&self, raw: &str) -> Option<NodeId> {
        let path = StatePath::parse(raw, self.config.separator)?;
        self.find_path(&path)
    }

    pub fn find_path(&self, path: &StatePath) -> Option<NodeId> {
        let (root, rest) = path.segments().split_first()?;
        let mut cursor = self.root(root)?;
        for segment in rest {
            cursor = self.nodes[cursor.0].child(segment)?;
        }
        Some(cursor)
    }

    /// Names from the root down to `id`.
    pub fn full_path(&self, id: NodeId) -> Option<StatePath> {
        self.live(id).map(|_| self.path_of(id))
    }

    /// Deepest node reached by following current children from `id`.
    pub fn active_leaf_of(&self, id: NodeId) -> Option<NodeId> {
        let mut cursor = self.live(id).map(|_| id)?;
        while let Some(child) = self.nodes[cursor.0].current_child {
            cursor = child;
        }
        Some(cursor)
    }

    /// True if `id` is named `name` or its active child chain contains it.
    pub fn node_is_in_state(&self, id: NodeId, name: &str) -> bool {
        let mut cursor = Some(id);
        while let Some(current) = cursor {
            let Some(node) = self.live(current) else {
                return false;
            };
            if node.name == name {
                return true;
            }
            cursor = node.current_child;
        }
        false
    }

    /// Whether `parent` may switch to `name`: registered child and admitted
    /// by the parent's policy.
    pub fn can_transition_to(&self, parent: NodeId, name: &str) -> bool {
        let Some(node) = self.live(parent) else {
            return false;
        };
        if !node.children.contains_key(name) {
            return false;
        }
        node.policy.admits(&self.request(node, name))
    }

    /// The active leaf, if any root is active.
    pub fn current_active_state(&self) -> Option<NodeId> {
        self.current_root.and_then(|root| self.active_leaf_of(root))
    }

    pub fn current_path(&self) -> Option<StatePath> {
        self.current_active_state().map(|leaf| self.path_of(leaf))
    }

    /// Path of the active leaf joined with the configured separator, or
    /// [`NO_STATE`].
    pub fn current_state_path(&self) -> String {
        self.current_path()
            .map(|path| path.join(self.config.separator))
            .unwrap_or_else(|| NO_STATE.to_string())
    }

    /// True if any node on the active path is named `name`.
    pub fn is_in_state(&self, name: &str) -> bool {
        self.current_root
            .is_some_and(|root| self.node_is_in_state(root, name))
    }

    // ------------------------------------------------------------------
    // Navigation
    // ------------------------------------------------------------------

    /// Make `name` the active root.
    pub fn switch_to_root_state(&mut self, name: &str) -> Result<TransitionOutcome, NavigationError> {
        let before = self.current_path();
        let result = self.switch_root(name);
        self.finish(before, result)
    }

    /// Navigate to a separator-delimited path, switching root first if the
    /// first segment differs from the active root.
    ///
    /// Segments already active are left alone, so re-issuing the current
    /// path runs no hooks. Stops at the first refused segment; segments
    /// before it stay switched.
    pub fn switch_to_state(&mut self, raw: &str) -> Result<TransitionOutcome, NavigationError> {
        let before = self.current_path();
        let result = match StatePath::parse(raw, self.config.separator) {
            Some(path) => self.navigate(&path),
            None => {
                tracing::error!("Cannot switch to invalid state path '{}'", raw);
                Err(NavigationError::InvalidPath {
                    path: raw.to_string(),
                })
            }
        };
        self.finish(before, result)
    }

    /// Same as [`Self::switch_to_state`] with an already-parsed path.
    pub fn switch_to_path(&mut self, path: &StatePath) -> Result<TransitionOutcome, NavigationError> {
        let before = self.current_path();
        let result = if path.is_empty() {
            tracing::error!("Cannot switch to an empty state path");
            Err(NavigationError::InvalidPath {
                path: String::new(),
            })
        } else {
            self.navigate(path)
        };
        self.finish(before, result)
    }

    /// Switch `parent`'s active child to `name`.
    pub fn switch_sub_state(&mut self, parent: NodeId, name: &str) -> Result<TransitionOutcome, NavigationError> {
        let before = self.current_path();
        let result = self.switch_child(parent, name);
        self.finish(before, result)
    }

    /// Switch the active leaf's child to `name`, descending one level.
    pub fn switch_to_sub_state(&mut self, name: &str) -> Result<TransitionOutcome, NavigationError> {
        let leaf = self
            .current_active_state()
            .ok_or(NavigationError::NoActiveState)?;
        self.switch_sub_state(leaf, name)
    }

    /// Exit `id`'s active child and make `id` the leaf again.
    pub fn exit_current_sub_state(&mut self, id: NodeId) -> Result<TransitionOutcome, NavigationError> {
        let before = self.current_path();
        let result = self.pop_child(id);
        self.finish(before, result)
    }

    /// Run one tick. Only the active leaf's `on_update` hook runs.
    pub fn update(&mut self) {
        self.flush_events();
        if let Some(root) = self.current_root {
            self.update_node(root);
        }
        self.flush_events();
    }

    /// Exit the active root and drop every tree.
    pub fn shutdown(&mut self) {
        if let Some(root) = self.current_root.take() {
            self.exit(root, None);
        }
        self.roots.clear();
        self.nodes.clear();
        self.flush_events();
        tracing::info!("State forest shut down");
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    fn finish(
        &mut self,
        before: Option<StatePath>,
        result: Result<TransitionOutcome, NavigationError>,
    ) -> Result<TransitionOutcome, NavigationError> {
        let after = self.current_path();
        if let Some(to) = after {
            if before.as_ref() != Some(&to) {
                let transition = StateTransition {
                    from: before,
                    to,
                    timestamp: Utc::now(),
                };
                self.history = self
                    .history
                    .record(transition)
                    .retain_last(self.config.history_limit);
            }
        }
        self.flush_events();
        result
    }

    fn flush_events(&mut self) {
        while let Some(event) = self.pending.pop_front() {
            for (_, observer) in self.observers.iter_mut() {
                observer.on_event(&event);
            }
        }
    }

    fn request<'a>(&'a self, node: &'a StateNode, to: &'a str) -> TransitionRequest<'a> {
        TransitionRequest {
            parent: &node.name,
            from: node.current_child.map(|id| self.nodes[id.0].name.as_str()),
            to,
        }
    }

    fn path_of(&self, id: NodeId) -> StatePath {
        let mut names = Vec::new();
        let mut cursor = Some(id);
        while let Some(current) = cursor {
            let node = &self.nodes[current.0];
            names.push(node.name.clone());
            cursor = node.parent;
        }
        names.reverse();
        StatePath::from_segments(names)
    }

    fn navigate(&mut self, path: &StatePath) -> Result<TransitionOutcome, NavigationError> {
        self.admit_path(path)?;
        let Some((root_name, rest)) = path.segments().split_first() else {
            return Err(NavigationError::InvalidPath {
                path: path.to_string(),
            });
        };

        let mut changed = false;
        let same_root = self
            .current_root
            .is_some_and(|id| self.nodes[id.0].name == *root_name);
        if !same_root {
            changed |= self.switch_root(root_name)?.is_switched();
        }

        let mut cursor = self.current_root.ok_or(NavigationError::NoActiveState)?;
        for segment in rest {
            changed |= self.switch_child(cursor, segment)?.is_switched();
            cursor = self.nodes[cursor.0]
                .current_child
                .ok_or_else(|| NavigationError::NotActive {
                    name: segment.clone(),
                })?;
        }

        Ok(if changed {
            TransitionOutcome::Switched
        } else {
            TransitionOutcome::Unchanged
        })
    }

    /// Check every segment of `path` against the tree as it will be once
    /// the earlier segments are switched, without touching anything.
    fn admit_path(&self, path: &StatePath) -> Result<(), NavigationError> {
        let Some((root_name, rest)) = path.segments().split_first() else {
            tracing::error!("Cannot switch to an empty state path");
            return Err(NavigationError::InvalidPath {
                path: path.to_string(),
            });
        };

        let Some(&root) = self.roots.get(root_name) else {
            tracing::error!("Root state '{}' not found", root_name);
            return Err(NavigationError::RootNotFound {
                name: root_name.clone(),
            });
        };

        // Nodes entered by this navigation start with no current child.
        let mut entering = self.current_root != Some(root);
        let mut cursor = root;
        for segment in rest {
            let node = &self.nodes[cursor.0];
            let Some(&target) = node.children.get(segment) else {
                tracing::error!("State '{}' not found under '{}'", segment, node.name);
                return Err(NavigationError::StateNotFound {
                    parent: node.name.clone(),
                    name: segment.clone(),
                });
            };

            let from = if entering {
                None
            } else {
                node.current_child.map(|id| self.nodes[id.0].name.as_str())
            };
            let request = TransitionRequest {
                parent: &node.name,
                from,
                to: segment,
            };
            if !node.policy.admits(&request) {
                tracing::warn!(
                    "Transition {:?} -> '{}' not allowed under '{}'",
                    from,
                    segment,
                    node.name
                );
                return Err(NavigationError::TransitionDisallowed {
                    parent: node.name.clone(),
                    from: from.map(str::to_string),
                    to: segment.clone(),
                });
            }

            entering |= node.current_child != Some(target);
            cursor = target;
        }
        Ok(())
    }

    /// Mark `id` and its subtree as replaced.
    fn retire(&mut self, id: NodeId) {
        let children: Vec<NodeId> = self.nodes[id.0].children.values().copied().collect();
        for child in children {
            self.retire(child);
        }
        let node = &mut self.nodes[id.0];
        node.retired = true;
        node.parent = None;
        node.children.clear();
    }

    fn live(&self, id: NodeId) -> Option<&StateNode> {
        self.nodes.get(id.0).filter(|node| !node.retired)
    }

    fn switch_root(&mut self, name: &str) -> Result<TransitionOutcome, NavigationError> {
        let Some(&target) = self.roots.get(name) else {
            tracing::error!("Root state '{}' not found", name);
            return Err(NavigationError::RootNotFound {
                name: name.to_string(),
            });
        };

        if self.current_root == Some(target) {
            tracing::warn!("Root state '{}' is already active", name);
            return Ok(TransitionOutcome::Unchanged);
        }

        let previous = self.current_root;
        let previous_path = previous.map(|id| self.path_of(id));
        if let Some(prev) = previous {
            self.exit(prev, Some(target));
        }

        self.current_root = Some(target);
        self.enter(target, previous);

        let current = self.path_of(target);
        match &previous_path {
            Some(prev) => tracing::info!("Root state '{}' -> '{}'", prev, current),
            None => tracing::info!("Root state -> '{}'", current),
        }
        self.pending.push_back(StateEvent::Transition {
            previous: previous_path,
            current,
        });
        Ok(TransitionOutcome::Switched)
    }

    fn switch_child(&mut self, parent: NodeId, name: &str) -> Result<TransitionOutcome, NavigationError> {
        let node = self.live(parent).ok_or(NavigationError::UnknownNode(parent))?;

        if !node.active {
            tracing::error!(
                "Cannot switch '{}' to '{}': parent is not active",
                node.name,
                name
            );
            return Err(NavigationError::NotActive {
                name: node.name.clone(),
            });
        }

        let Some(&target) = node.children.get(name) else {
            tracing::error!("State '{}' not found under '{}'", name, node.name);
            return Err(NavigationError::StateNotFound {
                parent: node.name.clone(),
                name: name.to_string(),
            });
        };

        let request = self.request(node, name);
        if !node.policy.admits(&request) {
            tracing::warn!(
                "Transition {:?} -> '{}' not allowed under '{}'",
                request.from,
                name,
                node.name
            );
            return Err(NavigationError::TransitionDisallowed {
                parent: node.name.clone(),
                from: request.from.map(str::to_string),
                to: name.to_string(),
            });
        }

        let previous = node.current_child;
        if previous == Some(target) {
            tracing::debug!("State '{}' is already active under '{}'", name, node.name);
            return Ok(TransitionOutcome::Unchanged);
        }

        match previous {
            Some(prev) => self.exit(prev, Some(target)),
            None => self.pause(parent),
        }

        self.nodes[parent.0].current_child = Some(target);
        self.enter(target, previous);
        Ok(TransitionOutcome::Switched)
    }

    fn pop_child(&mut self, id: NodeId) -> Result<TransitionOutcome, NavigationError> {
        let node = self.live(id).ok_or(NavigationError::UnknownNode(id))?;
        if !node.active {
            return Err(NavigationError::NotActive {
                name: node.name.clone(),
            });
        }

        let Some(child) = node.current_child else {
            return Ok(TransitionOutcome::Unchanged);
        };

        self.exit(child, None);
        self.nodes[id.0].current_child = None;
        self.resume(id);
        Ok(TransitionOutcome::Switched)
    }

    fn enter(&mut self, id: NodeId, previous: Option<NodeId>) {
        {
            let node = &mut self.nodes[id.0];
            node.active = true;
            node.paused = false;
        }

        let path = self.path_of(id);
        let peer = previous.map(|p| self.nodes[p.0].name.clone());
        tracing::debug!("Enter '{}'", path);
        self.run_hooks(id, &path, peer.as_deref(), |hooks, cx| hooks.on_enter(cx));

        let tags = self.nodes[id.0].tags;
        self.pending.push_back(StateEvent::Entered {
            path,
            input_map: tags.input_map,
            camera: tags.camera,
        });
    }

    fn exit(&mut self, id: NodeId, next: Option<NodeId>) {
        if let Some(child) = self.nodes[id.0].current_child {
            self.exit(child, None);
        }

        {
            let node = &mut self.nodes[id.0];
            node.current_child = None;
            node.active = false;
            node.paused = false;
        }

        let path = self.path_of(id);
        let peer = next.map(|n| self.nodes[n.0].name.clone());
        tracing::debug!("Exit '{}'", path);
        self.run_hooks(id, &path, peer.as_deref(), |hooks, cx| hooks.on_exit(cx));
        self.pending.push_back(StateEvent::Exited { path });
    }

    fn pause(&mut self, id: NodeId) {
        self.nodes[id.0].paused = true;
        let path = self.path_of(id);
        tracing::debug!("Pause '{}'", path);
        self.run_hooks(id, &path, None, |hooks, cx| hooks.on_pause(cx));
    }

    fn resume(&mut self, id: NodeId) {
        self.nodes[id.0].paused = false;
        let path = self.path_of(id);
        tracing::debug!("Resume '{}'", path);
        self.run_hooks(id, &path, None, |hooks, cx| hooks.on_resume(cx));
    }

    fn update_node(&mut self, id: NodeId) {
        let (active, child, idle) = {
            let node = &self.nodes[id.0];
            (node.active, node.current_child, node.paused || node.hooks.is_none())
        };
        if !active {
            return;
        }
        if let Some(child) = child {
            self.update_node(child);
            return;
        }
        if idle {
            return;
        }

        let path = self.path_of(id);
        self.run_hooks(id, &path, None, |hooks, cx| hooks.on_update(cx));
    }

    fn run_hooks<F>(&mut self, id: NodeId, path: &StatePath, peer: Option<&str>, f: F)
    where
        F: FnOnce(&mut Box<dyn StateHooks>, &HookContext<'_>),
    {
        if let Some(hooks) = self.nodes[id.0].hooks.as_mut() {
            let cx = HookContext {
                node: id,
                path,
                peer,
            };
            f(hooks, &cx);
        }
    }
}

impl std::fmt::Debug for StateForest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StateForest")
            .field("nodes", &self.nodes)
            .field("roots", &self.roots)
            .field("current_root", &self.current_root)
            .field("observers", &self.observers.len())
            .field("history", &self.history.len())
            .field("config", &self.config)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::TransitionPolicy;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Log(Arc<Mutex<Vec<String>>>);

    impl Log {
        fn hooks(&self) -> Recorder {
            Recorder(self.clone())
        }

        fn push(&self, kind: &str, cx: &HookContext<'_>) {
            let name = cx.path.leaf().unwrap_or_default();
            self.0.lock().unwrap().push(format!("{kind}:{name}"));
        }

        fn take(&self) -> Vec<String> {
            std::mem::take(&mut *self.0.lock().unwrap())
        }

        fn take_matching(&self, prefixes: &[&str]) -> Vec<String> {
            self.take()
                .into_iter()
                .filter(|line| prefixes.iter().any(|p| line.starts_with(p)))
                .collect()
        }
    }

    struct Recorder(Log);

    impl StateHooks for Recorder {
        fn on_enter(&mut self, cx: &HookContext<'_>) {
            self.0.push("enter", cx);
        }

        fn on_exit(&mut self, cx: &HookContext<'_>) {
            self.0.push("exit", cx);
        }

        fn on_update(&mut self, cx: &HookContext<'_>) {
            self.0.push("update", cx);
        }

        fn on_pause(&mut self, cx: &HookContext<'_>) {
            self.0.push("pause", cx);
        }

        fn on_resume(&mut self, cx: &HookContext<'_>) {
            self.0.push("resume", cx);
        }
    }

    fn node(log: &Log, name: &str) -> StateNode {
        StateNode::new(name).with_hooks(log.hooks())
    }

    fn fixture() -> (StateForest, Log) {
        let log = Log::default();
        let mut forest = StateForest::default();

        forest.add_root(node(&log, "MainMenu")).unwrap();
        let game = forest
            .add_root(
                node(&log, "InsideGame")
                    .with_policy(TransitionPolicy::allow(["OutsideWorld", "InsideWorld"])),
            )
            .unwrap();

        let outside = forest
            .add_child(
                game,
                node(&log, "OutsideWorld").with_policy(TransitionPolicy::allow([
                    "MountainFoot",
                    "Climbing",
                    "Perception",
                    "MountainTop",
                ])),
            )
            .unwrap();
        for name in ["MountainFoot", "Climbing", "Perception", "MountainTop"] {
            forest.add_child(outside, node(&log, name)).unwrap();
        }

        let inside = forest
            .add_child(
                game,
                node(&log, "InsideWorld").with_policy(TransitionPolicy::allow([
                    "Sailing",
                    "Interaction",
                    "ThoughtBoatCabin",
                    "Telescope",
                ])),
            )
            .unwrap();
        // "Climbing" is registered here on purpose: the allow-list must still reject it.
        for name in ["Sailing", "Telescope", "Climbing"] {
            forest.add_child(inside, node(&log, name)).unwrap();
        }

        (forest, log)
    }

    fn id(forest: &StateForest, path: &str) -> NodeId {
        forest.find(path).unwrap()
    }

    /// Active flags cover exactly the active path, and only its leaf is unpaused.
    fn assert_single_active_leaf(forest: &StateForest) {
        let leaf = forest.current_active_state();
        let mut on_path = Vec::new();
        let mut cursor = forest.current_root();
        while let Some(current) = cursor {
            on_path.push(current);
            cursor = forest.node(current).unwrap().current_child();
        }

        for (id, node) in forest.iter() {
            let expected_active = on_path.contains(&id);
            assert_eq!(node.is_active(), expected_active, "active flag of {}", node.name());
            if expected_active {
                assert_eq!(node.is_paused(), Some(id) != leaf, "paused flag of {}", node.name());
            } else {
                assert!(!node.is_paused());
                assert!(node.current_child().is_none());
            }
        }
    }

    #[test]
    fn path_is_sentinel_before_first_transition() {
        let (forest, _) = fixture();
        assert_eq!(forest.current_state_path(), NO_STATE);
        assert!(forest.current_active_state().is_none());
        assert!(!forest.is_in_state("MainMenu"));
    }

    #[test]
    fn first_root_switch_sets_path() {
        let (mut forest, log) = fixture();

        let outcome = forest.switch_to_root_state("MainMenu").unwrap();

        assert_eq!(outcome, TransitionOutcome::Switched);
        assert_eq!(forest.current_state_path(), "MainMenu");
        assert_eq!(log.take(), vec!["enter:MainMenu"]);
        assert_single_active_leaf(&forest);
    }

    #[test]
    fn unknown_root_leaves_state_unchanged() {
        let (mut forest, log) = fixture();
        forest.switch_to_root_state("MainMenu").unwrap();
        log.take();

        let err = forest.switch_to_root_state("Credits").unwrap_err();

        assert_eq!(
            err,
            NavigationError::RootNotFound {
                name: "Credits".to_string()
            }
        );
        assert_eq!(forest.current_state_path(), "MainMenu");
        assert!(log.take().is_empty());
    }

    #[test]
    fn redundant_root_switch_runs_no_hooks() {
        let (mut forest, log) = fixture();
        forest.switch_to_root_state("MainMenu").unwrap();
        log.take();

        let outcome = forest.switch_to_root_state("MainMenu").unwrap();

        assert_eq!(outcome, TransitionOutcome::Unchanged);
        assert!(log.take().is_empty());
        assert_eq!(forest.history().len(), 1);
    }

    #[test]
    fn full_path_switch_exits_old_root_then_enters_in_order() {
        let (mut forest, log) = fixture();
        forest.switch_to_root_state("MainMenu").unwrap();
        log.take();

        forest
            .switch_to_state("InsideGame/OutsideWorld/Climbing")
            .unwrap();

        assert_eq!(
            forest.current_state_path(),
            "InsideGame/OutsideWorld/Climbing"
        );
        assert_eq!(
            log.take(),
            vec![
                "exit:MainMenu",
                "enter:InsideGame",
                "pause:InsideGame",
                "enter:OutsideWorld",
                "pause:OutsideWorld",
                "enter:Climbing",
            ]
        );
        assert_single_active_leaf(&forest);
    }

    #[test]
    fn sibling_switch_leaves_ancestors_alone() {
        let (mut forest, log) = fixture();
        forest
            .switch_to_state("InsideGame/OutsideWorld/Climbing")
            .unwrap();
        log.take();

        let outside = id(&forest, "InsideGame/OutsideWorld");
        forest.switch_sub_state(outside, "Perception").unwrap();

        assert_eq!(log.take(), vec!["exit:Climbing", "enter:Perception"]);
        assert_eq!(
            forest.node(outside).unwrap().current_child(),
            forest.find("InsideGame/OutsideWorld/Perception")
        );
        assert_single_active_leaf(&forest);
    }

    #[test]
    fn unknown_child_is_not_found() {
        let (mut forest, log) = fixture();
        forest.switch_to_state("InsideGame/OutsideWorld").unwrap();
        log.take();

        let outside = id(&forest, "InsideGame/OutsideWorld");
        let err = forest.switch_sub_state(outside, "Bogus").unwrap_err();

        assert!(matches!(err, NavigationError::StateNotFound { .. }));
        assert_eq!(forest.current_state_path(), "InsideGame/OutsideWorld");
        assert!(log.take().is_empty());
    }

    #[test]
    fn allow_list_rejects_registered_child() {
        let (mut forest, log) = fixture();
        forest.switch_to_state("InsideGame/InsideWorld/Sailing").unwrap();
        log.take();

        let inside = id(&forest, "InsideGame/InsideWorld");
        assert!(!forest.can_transition_to(inside, "Climbing"));
        let err = forest.switch_sub_state(inside, "Climbing").unwrap_err();

        assert_eq!(
            err,
            NavigationError::TransitionDisallowed {
                parent: "InsideWorld".to_string(),
                from: Some("Sailing".to_string()),
                to: "Climbing".to_string(),
            }
        );
        assert_eq!(forest.current_state_path(), "InsideGame/InsideWorld/Sailing");
        assert!(log.take().is_empty());
    }

    #[test]
    fn root_switch_unwinds_leaf_first() {
        let (mut forest, log) = fixture();
        forest
            .switch_to_state("InsideGame/OutsideWorld/Climbing")
            .unwrap();
        log.take();

        forest.switch_to_root_state("MainMenu").unwrap();

        assert_eq!(
            log.take_matching(&["enter", "exit"]),
            vec![
                "exit:Climbing",
                "exit:OutsideWorld",
                "exit:InsideGame",
                "enter:MainMenu"
            ]
        );
        assert_single_active_leaf(&forest);
    }

    #[test]
    fn reissuing_current_path_is_a_no_op() {
        let (mut forest, log) = fixture();
        forest.switch_to_state("InsideGame/InsideWorld/Telescope").unwrap();
        log.take();

        let current = forest.current_state_path();
        let outcome = forest.switch_to_state(&current).unwrap();

        assert_eq!(outcome, TransitionOutcome::Unchanged);
        assert!(log.take().is_empty());
    }

    #[test]
    fn shorter_path_keeps_deeper_children() {
        let (mut forest, _) = fixture();
        forest.switch_to_state("InsideGame/InsideWorld/Telescope").unwrap();

        let outcome = forest.switch_to_state("InsideGame/InsideWorld").unwrap();

        assert_eq!(outcome, TransitionOutcome::Unchanged);
        assert_eq!(forest.current_state_path(), "InsideGame/InsideWorld/Telescope");
    }

    #[test]
    fn invalid_paths_are_rejected() {
        let (mut forest, _) = fixture();

        assert!(matches!(
            forest.switch_to_state(""),
            Err(NavigationError::InvalidPath { .. })
        ));
        assert!(matches!(
            forest.switch_to_state("InsideGame//Sailing"),
            Err(NavigationError::InvalidPath { .. })
        ));
        assert_eq!(forest.current_state_path(), NO_STATE);
    }

    #[test]
    fn missing_deep_segment_changes_nothing() {
        let (mut forest, log) = fixture();
        forest.switch_to_root_state("MainMenu").unwrap();
        log.take();
        let seen = Arc::new(Mutex::new(0usize));
        let sink = Arc::clone(&seen);
        forest.subscribe(move |_: &StateEvent| *sink.lock().unwrap() += 1);

        let err = forest
            .switch_to_state("InsideGame/OutsideWorld/Bogus")
            .unwrap_err();

        assert_eq!(
            err,
            NavigationError::StateNotFound {
                parent: "OutsideWorld".to_string(),
                name: "Bogus".to_string(),
            }
        );
        assert_eq!(forest.current_state_path(), "MainMenu");
        assert!(log.take().is_empty());
        assert_eq!(*seen.lock().unwrap(), 0);
        assert_eq!(forest.history().len(), 1);
        assert_single_active_leaf(&forest);
    }

    #[test]
    fn disallowed_deep_segment_changes_nothing() {
        let (mut forest, log) = fixture();
        forest.switch_to_root_state("MainMenu").unwrap();
        log.take();

        let err = forest
            .switch_to_state("InsideGame/InsideWorld/Climbing")
            .unwrap_err();

        assert_eq!(
            err,
            NavigationError::TransitionDisallowed {
                parent: "InsideWorld".to_string(),
                from: None,
                to: "Climbing".to_string(),
            }
        );
        assert_eq!(forest.current_state_path(), "MainMenu");
        assert!(log.take().is_empty());
        let game = forest.root("InsideGame").unwrap();
        assert!(!forest.node(game).unwrap().is_active());
    }

    #[test]
    fn path_admission_sees_current_child_only_on_kept_nodes() {
        let mut forest = StateForest::default();
        let outside = forest
            .add_root(
                StateNode::new("OutsideWorld")
                    .with_policy(TransitionPolicy::table([("MountainFoot", ["Climbing"])])),
            )
            .unwrap();
        for name in ["MountainFoot", "Climbing", "MountainTop"] {
            forest.add_child(outside, StateNode::new(name)).unwrap();
        }
        forest.add_root(StateNode::new("MainMenu")).unwrap();

        forest.switch_to_state("OutsideWorld/MountainFoot").unwrap();
        let err = forest
            .switch_to_state("OutsideWorld/MountainTop")
            .unwrap_err();
        assert!(matches!(err, NavigationError::TransitionDisallowed { .. }));
        assert_eq!(forest.current_state_path(), "OutsideWorld/MountainFoot");

        forest.switch_to_root_state("MainMenu").unwrap();
        forest.switch_to_state("OutsideWorld/MountainTop").unwrap();
        assert_eq!(forest.current_state_path(), "OutsideWorld/MountainTop");
    }

    #[test]
    fn dormant_subtree_cannot_switch() {
        let (mut forest, log) = fixture();
        forest.switch_to_state("InsideGame/InsideWorld/Sailing").unwrap();
        log.take();

        let outside = id(&forest, "InsideGame/OutsideWorld");
        let err = forest.switch_sub_state(outside, "Climbing").unwrap_err();

        assert_eq!(
            err,
            NavigationError::NotActive {
                name: "OutsideWorld".to_string()
            }
        );
        assert!(log.take().is_empty());
    }

    #[test]
    fn pop_resumes_parent() {
        let (mut forest, log) = fixture();
        forest.switch_to_state("InsideGame/OutsideWorld").unwrap();
        let outside = id(&forest, "InsideGame/OutsideWorld");
        assert!(!forest.node(outside).unwrap().is_paused());

        forest.switch_to_sub_state("Climbing").unwrap();
        assert!(forest.node(outside).unwrap().is_paused());
        log.take();

        let outcome = forest.exit_current_sub_state(outside).unwrap();

        assert_eq!(outcome, TransitionOutcome::Switched);
        assert_eq!(log.take(), vec!["exit:Climbing", "resume:OutsideWorld"]);
        assert_eq!(forest.current_state_path(), "InsideGame/OutsideWorld");
        assert_single_active_leaf(&forest);

        assert_eq!(
            forest.exit_current_sub_state(outside).unwrap(),
            TransitionOutcome::Unchanged
        );
    }

    #[test]
    fn update_reaches_only_the_leaf() {
        let (mut forest, log) = fixture();
        forest
            .switch_to_state("InsideGame/OutsideWorld/Climbing")
            .unwrap();
        log.take();

        forest.update();
        forest.update();

        assert_eq!(log.take(), vec!["update:Climbing", "update:Climbing"]);
    }

    #[test]
    fn update_without_active_root_does_nothing() {
        let (mut forest, log) = fixture();
        forest.update();
        assert!(log.take().is_empty());
    }

    #[test]
    fn leaving_a_root_clears_its_subtree() {
        let (mut forest, _) = fixture();
        forest
            .switch_to_state("InsideGame/OutsideWorld/Climbing")
            .unwrap();
        forest.switch_to_root_state("MainMenu").unwrap();

        let game = forest.root("InsideGame").unwrap();
        let outside = id(&forest, "InsideGame/OutsideWorld");
        assert!(forest.node(game).unwrap().current_child().is_none());
        assert!(forest.node(outside).unwrap().current_child().is_none());
        assert_single_active_leaf(&forest);
    }

    #[test]
    fn is_in_state_searches_the_active_chain() {
        let (mut forest, _) = fixture();
        forest.switch_to_state("InsideGame/InsideWorld/Sailing").unwrap();

        assert!(forest.is_in_state("InsideGame"));
        assert!(forest.is_in_state("InsideWorld"));
        assert!(forest.is_in_state("Sailing"));
        assert!(!forest.is_in_state("Telescope"));
        assert!(!forest.is_in_state("OutsideWorld"));

        let inside = id(&forest, "InsideGame/InsideWorld");
        assert!(forest.node_is_in_state(inside, "Sailing"));
        assert!(!forest.node_is_in_state(inside, "InsideGame"));
    }

    #[test]
    fn events_are_delivered_after_the_transition_in_order() {
        let (mut forest, _) = fixture();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        forest.subscribe(move |event: &StateEvent| {
            let line = match event {
                StateEvent::Entered { path, .. } => format!("entered {path}"),
                StateEvent::Exited { path } => format!("exited {path}"),
                StateEvent::Transition { previous, current } => format!(
                    "transition {} -> {current}",
                    previous.as_ref().map(ToString::to_string).unwrap_or_default()
                ),
            };
            sink.lock().unwrap().push(line);
        });

        forest.switch_to_root_state("MainMenu").unwrap();
        forest
            .switch_to_state("InsideGame/OutsideWorld/Climbing")
            .unwrap();

        assert_eq!(
            *seen.lock().unwrap(),
            vec![
                "entered MainMenu",
                "transition  -> MainMenu",
                "exited MainMenu",
                "entered InsideGame",
                "transition MainMenu -> InsideGame",
                "entered InsideGame/OutsideWorld",
                "entered InsideGame/OutsideWorld/Climbing",
            ]
        );
    }

    #[test]
    fn unsubscribed_observer_stops_receiving() {
        let (mut forest, _) = fixture();
        let count = Arc::new(Mutex::new(0usize));
        let sink = Arc::clone(&count);
        let observer = forest.subscribe(move |_: &StateEvent| *sink.lock().unwrap() += 1);

        forest.switch_to_root_state("MainMenu").unwrap();
        let after_first = *count.lock().unwrap();
        assert!(forest.unsubscribe(observer));
        assert!(!forest.unsubscribe(observer));
        forest.switch_to_root_state("InsideGame").unwrap();

        assert_eq!(*count.lock().unwrap(), after_first);
    }

    #[test]
    fn tags_are_inherited_when_attached() {
        use crate::core::{CameraMode, InputMap};

        let mut forest = StateForest::default();
        let game = forest.add_root(StateNode::new("InsideGame")).unwrap();
        let inside = forest
            .add_child(
                game,
                StateNode::new("InsideWorld")
                    .with_input_map(InputMap::InsideWorld)
                    .with_camera(CameraMode::InsideWorld),
            )
            .unwrap();
        let scope = forest
            .add_child(inside, StateNode::new("Telescope").with_input_map(InputMap::Telescope))
            .unwrap();

        let tags = forest.node(scope).unwrap().tags();
        assert_eq!(tags.input_map, Some(InputMap::Telescope));
        assert_eq!(tags.camera, Some(CameraMode::InsideWorld));
        assert!(forest.node(game).unwrap().tags().is_empty());
    }

    #[test]
    fn replacing_children() {
        let (mut forest, _) = fixture();
        forest.switch_to_state("InsideGame/InsideWorld/Sailing").unwrap();
        let inside = id(&forest, "InsideGame/InsideWorld");

        let err = forest
            .add_child(inside, StateNode::new("Sailing"))
            .unwrap_err();
        assert_eq!(
            err,
            NavigationError::ChildActive {
                name: "Sailing".to_string()
            }
        );

        let replacement = forest.add_child(inside, StateNode::new("Telescope")).unwrap();
        assert_eq!(forest.find("InsideGame/InsideWorld/Telescope"), Some(replacement));
        assert_eq!(forest.node(replacement).unwrap().parent(), Some(inside));

        let err = forest
            .add_root(StateNode::new("InsideGame"))
            .unwrap_err();
        assert!(matches!(err, NavigationError::ChildActive { .. }));
    }

    #[test]
    fn replaced_child_is_retired() {
        let (mut forest, _) = fixture();
        forest.switch_to_state("InsideGame/InsideWorld/Sailing").unwrap();
        let inside = id(&forest, "InsideGame/InsideWorld");
        let old = id(&forest, "InsideGame/InsideWorld/Telescope");

        let replacement = forest.add_child(inside, StateNode::new("Telescope")).unwrap();

        let telescopes: Vec<NodeId> = forest
            .iter()
            .filter(|(_, node)| node.name() == "Telescope")
            .map(|(id, _)| id)
            .collect();
        assert_eq!(telescopes, vec![replacement]);
        assert!(forest.node(old).is_none());
        assert!(forest.full_path(old).is_none());
        assert_eq!(
            forest.switch_sub_state(old, "Anything"),
            Err(NavigationError::UnknownNode(old))
        );
        assert_single_active_leaf(&forest);
    }

    #[test]
    fn replaced_root_retires_its_subtree() {
        let (mut forest, _) = fixture();
        forest.switch_to_root_state("MainMenu").unwrap();
        let climbing = id(&forest, "InsideGame/OutsideWorld/Climbing");
        let before = forest.iter().count();

        let replacement = forest.add_root(StateNode::new("InsideGame")).unwrap();

        assert!(forest.node(climbing).is_none());
        assert!(forest.find("InsideGame/OutsideWorld").is_none());
        assert_eq!(forest.root("InsideGame"), Some(replacement));
        // The old root and its nine descendants give way to a single node.
        assert_eq!(forest.iter().count(), before - 10 + 1);
        assert!(matches!(
            forest.add_child(climbing, StateNode::new("Ledge")),
            Err(NavigationError::UnknownNode(_))
        ));
    }

    #[test]
    fn add_child_to_unknown_parent_fails() {
        let mut forest = StateForest::default();
        let err = forest
            .add_child(NodeId(42), StateNode::new("Orphan"))
            .unwrap_err();
        assert_eq!(err, NavigationError::UnknownNode(NodeId(42)));
    }

    #[test]
    fn history_records_each_completed_transition() {
        let (mut forest, _) = fixture();
        forest.switch_to_root_state("MainMenu").unwrap();
        forest
            .switch_to_state("InsideGame/OutsideWorld/Climbing")
            .unwrap();
        let _ = forest.switch_to_state("InsideGame/OutsideWorld/Bogus");

        let visited: Vec<String> = forest
            .history()
            .get_path()
            .iter()
            .map(|p| p.to_string())
            .collect();
        assert_eq!(visited, vec!["MainMenu", "InsideGame/OutsideWorld/Climbing"]);
    }

    #[test]
    fn history_respects_configured_limit() {
        let log = Log::default();
        let mut forest = StateForest::new(ForestConfig::default().with_history_limit(2));
        forest.add_root(node(&log, "A")).unwrap();
        forest.add_root(node(&log, "B")).unwrap();

        for name in ["A", "B", "A", "B"] {
            forest.switch_to_root_state(name).unwrap();
        }

        assert_eq!(forest.history().len(), 2);
    }

    #[test]
    fn custom_separator_is_used_for_parsing_and_printing() {
        let mut forest = StateForest::new(ForestConfig::default().with_separator('.'));
        let game = forest.add_root(StateNode::new("InsideGame")).unwrap();
        forest.add_child(game, StateNode::new("InsideWorld")).unwrap();

        forest.switch_to_state("InsideGame.InsideWorld").unwrap();

        assert_eq!(forest.current_state_path(), "InsideGame.InsideWorld");
        assert!(forest.find("InsideGame/InsideWorld").is_none());
    }

    #[test]
    fn shutdown_exits_everything() {
        let (mut forest, log) = fixture();
        forest.switch_to_state("InsideGame/InsideWorld/Sailing").unwrap();
        log.take();

        forest.shutdown();

        assert_eq!(
            log.take(),
            vec!["exit:Sailing", "exit:InsideWorld", "exit:InsideGame"]
        );
        assert_eq!(forest.current_state_path(), NO_STATE);
        assert!(forest.root("InsideGame").is_none());
    }
}
