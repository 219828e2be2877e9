//! Builder assembling a validated [`StateForest`].

use crate::builder::error::{BuildError, TreeViolation};
use crate::builder::spec::StateSpec;
use crate::config::ForestConfig;
use crate::core::StatePath;
use crate::events::StateObserver;
use crate::tree::{NodeId, StateForest, StateHooks};
use std::collections::{BTreeSet, HashMap};
use std::fmt;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

type Check = Validation<(), NonEmptyVec<TreeViolation>>;

/// Fluent builder for a forest of state trees.
///
/// Declarations are validated as a whole before any node is created. Every
/// violation is reported, not just the first.
///
/// # Example
///
/// ```
/// use statetree::builder::{ForestBuilder, StateSpec};
///
/// let mut forest = ForestBuilder::new()
///     .root(StateSpec::new("MainMenu"))
///     .root(
///         StateSpec::new("InsideGame")
///             .allow(["InsideWorld"])
///             .child(StateSpec::new("InsideWorld")),
///     )
///     .build()
///     .unwrap();
///
/// forest.switch_to_state("InsideGame/InsideWorld").unwrap();
/// assert_eq!(forest.current_state_path(), "InsideGame/InsideWorld");
/// ```
pub struct ForestBuilder {
    config: ForestConfig,
    roots: Vec<StateSpec>,
    observers: Vec<Box<dyn StateObserver>>,
    hooks: Vec<(String, Box<dyn StateHooks>)>,
}

impl ForestBuilder {
    pub fn new() -> Self {
        Self {
            config: ForestConfig::default(),
            roots: Vec::new(),
            observers: Vec::new(),
            hooks: Vec::new(),
        }
    }

    pub fn config(mut self, config: ForestConfig) -> Self {
        self.config = config;
        self
    }

    /// Add a root tree.
    pub fn root(mut self, spec: StateSpec) -> Self {
        self.roots.push(spec);
        self
    }

    pub fn roots(mut self, specs: impl IntoIterator<Item = StateSpec>) -> Self {
        self.roots.extend(specs);
        self
    }

    /// Subscribe an observer before the first transition.
    pub fn observer(mut self, observer: impl StateObserver + 'static) -> Self {
        self.observers.push(Box::new(observer));
        self
    }

    /// Attach hooks to the state at `path`, replacing any declared on its
    /// spec. The path uses the configured separator.
    pub fn hooks_at(mut self, path: impl Into<String>, hooks: impl StateHooks + 'static) -> Self {
        self.hooks.push((path.into(), Box::new(hooks)));
        self
    }

    pub fn configuration(&self) -> &ForestConfig {
        &self.config
    }

    /// Validate the declarations and create the forest.
    pub fn build(self) -> Result<StateForest, BuildError> {
        if self.roots.is_empty() {
            return Err(BuildError::NoRoots);
        }

        let separator = self.config.separator;
        let mut checks = vec![check_siblings("<roots>", &self.roots)];
        for root in &self.roots {
            validate_spec(root, separator, &mut checks);
        }
        for (path, _) in &self.hooks {
            checks.push(check_hook_target(&self.roots, path, separator));
        }

        if let Validation::Failure(errors) = Validation::all_vec(checks) {
            let violations: Vec<TreeViolation> = errors.iter().cloned().collect();
            tracing::error!("Rejected state tree with {} violation(s)", violations.len());
            return Err(BuildError::InvalidTree { violations });
        }

        let mut hooks: HashMap<StatePath, Box<dyn StateHooks>> = HashMap::new();
        for (raw, h) in self.hooks {
            if let Some(path) = StatePath::parse(&raw, separator) {
                hooks.insert(path, h);
            }
        }

        let mut forest = StateForest::new(self.config);
        for mut spec in self.roots {
            let mut node = spec.take_node();
            let path = StatePath::from_segments([spec.name.clone()]);
            if let Some(h) = hooks.remove(&path) {
                node = node.with_boxed_hooks(Some(h));
            }
            let id = forest.add_root(node)?;
            attach_children(&mut forest, id, &path, spec.children, &mut hooks)?;
        }

        for observer in self.observers {
            forest.subscribe_boxed(observer);
        }

        tracing::debug!("Built state forest with {} node(s)", forest.iter().count());
        Ok(forest)
    }
}

impl Default for ForestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ForestBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ForestBuilder")
            .field("config", &self.config)
            .field("roots", &self.roots)
            .field("observers", &self.observers.len())
            .field("hooks", &self.hooks.iter().map(|(p, _)| p).collect::<Vec<_>>())
            .finish()
    }
}

fn attach_children(
    forest: &mut StateForest,
    parent: NodeId,
    parent_path: &StatePath,
    children: Vec<StateSpec>,
    hooks: &mut HashMap<StatePath, Box<dyn StateHooks>>,
) -> Result<(), BuildError> {
    for mut spec in children {
        let path = parent_path.child(spec.name.clone());
        let mut node = spec.take_node();
        if let Some(h) = hooks.remove(&path) {
            node = node.with_boxed_hooks(Some(h));
        }
        let id = forest.add_child(parent, node)?;
        attach_children(forest, id, &path, spec.children, hooks)?;
    }
    Ok(())
}

fn validate_spec(spec: &StateSpec, separator: char, checks: &mut Vec<Check>) {
    checks.push(check_name(spec, separator));
    checks.push(check_siblings(&spec.name, &spec.children));
    checks.push(check_policy(spec));
    for child in &spec.children {
        validate_spec(child, separator, checks);
    }
}

fn check_name(spec: &StateSpec, separator: char) -> Check {
    if spec.name.contains(separator) {
        Validation::fail(TreeViolation::SeparatorInName {
            name: spec.name.clone(),
            separator,
        })
    } else {
        Validation::success(())
    }
}

/// Empty and duplicate names among one set of siblings.
fn check_siblings(parent: &str, siblings: &[StateSpec]) -> Check {
    let mut seen = BTreeSet::new();
    let mut checks: Vec<Check> = Vec::new();
    for spec in siblings {
        if spec.name.is_empty() {
            checks.push(Validation::fail(TreeViolation::EmptyName {
                parent: parent.to_string(),
            }));
        } else if !seen.insert(spec.name.as_str()) {
            checks.push(Validation::fail(TreeViolation::DuplicateName {
                parent: parent.to_string(),
                name: spec.name.clone(),
            }));
        }
    }
    Validation::all_vec(checks).map(|_| ())
}

fn check_policy(spec: &StateSpec) -> Check {
    let known: BTreeSet<&str> = spec.children.iter().map(|c| c.name.as_str()).collect();
    let checks: Vec<Check> = spec
        .policy
        .referenced_names()
        .into_iter()
        .filter(|name| !known.contains(name))
        .map(|target| {
            Validation::fail(TreeViolation::UnknownPolicyTarget {
                state: spec.name.clone(),
                target: target.to_string(),
            })
        })
        .collect();
    Validation::all_vec(checks).map(|_| ())
}

fn check_hook_target(roots: &[StateSpec], raw: &str, separator: char) -> Check {
    let found = StatePath::parse(raw, separator).is_some_and(|path| {
        let mut level = roots;
        for segment in path.segments() {
            match level.iter().find(|spec| spec.name == *segment) {
                Some(spec) => level = spec.children.as_slice(),
                None => return false,
            }
        }
        true
    });

    if found {
        Validation::success(())
    } else {
        Validation::fail(TreeViolation::UnknownHookTarget {
            path: raw.to_string(),
        })
    }
}
