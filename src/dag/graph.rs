// src/dag/graph.rs

use std::collections::BTreeMap;

use petgraph::algo::toposort;
use petgraph::graphmap::DiGraphMap;

use crate::dag::task::TaskSpec;
use crate::errors::{PipelineError, Result};
use crate::engine::TaskName;

/// Internal node structure: the task spec plus its direct dependents.
#[derive(Debug, Clone)]
struct TaskNode {
    spec: TaskSpec,
    /// Tasks that list this one in their `requires`.
    dependents: Vec<TaskName>,
}

/// The validated task graph, keyed by task name.
///
/// Construction checks that every referenced name exists, that no task
/// depends on itself, and that the combined `requires` + `after` relation is
/// acyclic. After that the graph is immutable; all per-run state lives in
/// the [`Scheduler`](crate::dag::Scheduler).
#[derive(Debug, Clone)]
pub struct TaskGraph {
    nodes: BTreeMap<TaskName, TaskNode>,
}

impl TaskGraph {
    pub fn new(specs: Vec<TaskSpec>) -> Result<Self> {
        validate_references(&specs)?;
        validate_acyclic(&specs)?;

        let mut nodes: BTreeMap<TaskName, TaskNode> = specs
            .into_iter()
            .map(|spec| {
                (
                    spec.name.clone(),
                    TaskNode {
                        spec,
                        dependents: Vec::new(),
                    },
                )
            })
            .collect();

        // Populate dependents from the requires edges.
        let names: Vec<TaskName> = nodes.keys().cloned().collect();
        for name in names {
            let requires = nodes
                .get(&name)
                .map(|n| n.spec.requires.clone())
                .unwrap_or_default();
            for dep in requires {
                if let Some(dep_node) = nodes.get_mut(&dep) {
                    dep_node.dependents.push(name.clone());
                }
            }
        }

        Ok(Self { nodes })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.nodes.contains_key(name)
    }

    pub fn spec(&self, name: &str) -> Option<&TaskSpec> {
        self.nodes.get(name).map(|n| &n.spec)
    }

    /// All task names, in deterministic (sorted) order.
    pub fn tasks(&self) -> impl Iterator<Item = &str> {
        self.nodes.keys().map(|s| s.as_str())
    }

    /// Hard dependencies of a task (its `requires` list).
    pub fn requires_of(&self, name: &str) -> &[TaskName] {
        self.nodes
            .get(name)
            .map(|n| n.spec.requires.as_slice())
            .unwrap_or(&[])
    }

    /// Ordering-only predecessors of a task (its `after` list).
    pub fn after_of(&self, name: &str) -> &[TaskName] {
        self.nodes
            .get(name)
            .map(|n| n.spec.after.as_slice())
            .unwrap_or(&[])
    }

    /// Tasks that list this one in their `requires`.
    pub fn dependents_of(&self, name: &str) -> &[TaskName] {
        self.nodes
            .get(name)
            .map(|n| n.dependents.as_slice())
            .unwrap_or(&[])
    }
}

fn validate_references(specs: &[TaskSpec]) -> Result<()> {
    let mut seen: BTreeMap<&str, ()> = BTreeMap::new();
    for spec in specs {
        if seen.insert(spec.name.as_str(), ()).is_some() {
            return Err(PipelineError::Config(format!(
                "task '{}' is registered twice",
                spec.name
            )));
        }
    }

    for spec in specs {
        for (kind, list) in [("requires", &spec.requires), ("after", &spec.after)] {
            for dep in list {
                if !seen.contains_key(dep.as_str()) {
                    return Err(PipelineError::Config(format!(
                        "task '{}' has unknown dependency '{}' in `{}`",
                        spec.name, dep, kind
                    )));
                }
                if dep == &spec.name {
                    return Err(PipelineError::Config(format!(
                        "task '{}' cannot depend on itself in `{}`",
                        spec.name, kind
                    )));
                }
            }
        }
    }
    Ok(())
}

fn validate_acyclic(specs: &[TaskSpec]) -> Result<()> {
    // Edge direction: dep -> task, for both hard and ordering edges; a
    // topological sort fails exactly when there is a cycle.
    let mut graph: DiGraphMap<&str, ()> = DiGraphMap::new();

    for spec in specs {
        graph.add_node(spec.name.as_str());
    }

    for spec in specs {
        for dep in spec.requires.iter().chain(spec.after.iter()) {
            graph.add_edge(dep.as_str(), spec.name.as_str(), ());
        }
    }

    match toposort(&graph, None) {
        Ok(_order) => Ok(()),
        Err(cycle) => {
            let node = cycle.node_id();
            Err(PipelineError::GraphCycle(format!(
                "cycle detected in task graph involving task '{}'",
                node
            )))
        }
    }
}
