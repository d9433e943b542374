// SPDX-License-Identifier: MIT

//! Graph workflow executor

use super::{Edge, Node, END};
use crate::adk::error::{ButlerError, Result, WorkflowError};
use crate::butler::tools::ToolRegistry;
use crate::butler::workflow::state::HikeState;
use std::collections::HashMap;
use std::sync::Arc;

/// A validated, immutable graph ready to invoke
pub struct CompiledGraph {
    name: String,
    nodes: HashMap<String, Arc<dyn Node>>,
    node_order: Vec<String>,
    entry: String,
    edges: HashMap<String, Edge>,
    tools: ToolRegistry,
    max_steps: u32,
}

impl CompiledGraph {
    pub(crate) fn new(
        name: String,
        nodes: HashMap<String, Arc<dyn Node>>,
        node_order: Vec<String>,
        entry: String,
        edges: HashMap<String, Edge>,
        tools: ToolRegistry,
        max_steps: u32,
    ) -> Self {
        Self {
            name,
            nodes,
            node_order,
            entry,
            edges,
            tools,
            max_steps,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Node names in the order they were added, not the order they run
    pub fn node_names(&self) -> &[String] {
        &self.node_order
    }

    pub fn entry_point(&self) -> &str {
        &self.entry
    }

    pub fn tools(&self) -> &ToolRegistry {
        &self.tools
    }

    pub fn max_steps(&self) -> u32 {
        self.max_steps
    }

    /// Run from the entry point until a step routes to [`END`].
    ///
    /// Steps run one at a time; the first failing step aborts the run.
    pub async fn invoke(&self, state: HikeState) -> Result<HikeState> {
        self.invoke_traced(state).await.map(|(state, _)| state)
    }

    /// Like [`invoke`](Self::invoke), also returning the nodes in the order
    /// they ran.
    pub async fn invoke_traced(&self, mut state: HikeState) -> Result<(HikeState, Vec<String>)> {
        let mut current = self.entry.clone();
        let mut path = Vec::new();
        let mut step = 0;

        while current != END {
            step += 1;
            if step > self.max_steps {
                log::error!("Graph '{}' exceeded {} steps", self.name, self.max_steps);
                return Err(ButlerError::MaxIterations {
                    kind: "graph steps".to_string(),
                    limit: self.max_steps,
                });
            }

            let node = self
                .nodes
                .get(&current)
                .ok_or_else(|| WorkflowError::UnknownNode(current.clone()))?;

            log::info!("[{}] step {}: {}", self.name, step, current);
            if let Err(e) = node.run(&mut state).await {
                log::error!("[{}] node {} failed: {}", self.name, current, e);
                return Err(e);
            }
            path.push(current.clone());

            current = self.next_node(&current, &state)?;
        }

        log::info!("[{}] finished after {} steps", self.name, step);
        Ok((state, path))
    }

    fn next_node(&self, from: &str, state: &HikeState) -> Result<String> {
        match self.edges.get(from) {
            Some(Edge::Direct(to)) => Ok(to.clone()),
            Some(Edge::Conditional { router, mapping }) => {
                let label = (**router)(state);
                mapping.get(&label).cloned().ok_or_else(|| {
                    WorkflowError::UnmappedRoute {
                        node: from.to_string(),
                        label,
                    }
                    .into()
                })
            }
            None => Err(WorkflowError::DanglingNode(from.to_string()).into()),
        }
    }
}
