// SPDX-License-Identifier: MIT

//! Graph builder

use super::{CompiledGraph, Edge, Node, Router, DEFAULT_MAX_STEPS, END};
use crate::adk::error::{Result, WorkflowError};
use crate::butler::tools::ToolRegistry;
use crate::butler::workflow::state::HikeState;
use std::collections::HashMap;
use std::sync::Arc;

/// Collects nodes and edges; nothing is checked until `compile()`
pub struct StateGraph {
    name: String,
    nodes: Vec<Arc<dyn Node>>,
    entry: Option<String>,
    edges: HashMap<String, Edge>,
    duplicate_edges: Vec<String>,
    tools: ToolRegistry,
    max_steps: u32,
}

impl StateGraph {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            nodes: Vec::new(),
            entry: None,
            edges: HashMap::new(),
            duplicate_edges: Vec::new(),
            tools: ToolRegistry::new(),
            max_steps: DEFAULT_MAX_STEPS,
        }
    }

    pub fn add_node(&mut self, node: Arc<dyn Node>) -> &mut Self {
        self.nodes.push(node);
        self
    }

    pub fn set_entry_point(&mut self, name: &str) -> &mut Self {
        self.entry = Some(name.to_string());
        self
    }

    /// Unconditional edge; `to` may be [`END`]
    pub fn add_edge(&mut self, from: &str, to: &str) -> &mut Self {
        self.insert_edge(from, Edge::Direct(to.to_string()));
        self
    }

    /// Route by label: `router` names a label, `mapping` resolves it to a
    /// node or [`END`]
    pub fn add_conditional_edges<F, I>(&mut self, from: &str, router: F, mapping: I) -> &mut Self
    where
        F: Fn(&HikeState) -> String + Send + Sync + 'static,
        I: IntoIterator<Item = (&'static str, &'static str)>,
    {
        let router: Router = Arc::new(router);
        let mapping = mapping
            .into_iter()
            .map(|(label, to)| (label.to_string(), to.to_string()))
            .collect();
        self.insert_edge(from, Edge::Conditional { router, mapping });
        self
    }

    /// Tools the graph's steps may call
    pub fn with_tools(&mut self, tools: ToolRegistry) -> &mut Self {
        self.tools = tools;
        self
    }

    pub fn with_max_steps(&mut self, max_steps: u32) -> &mut Self {
        self.max_steps = max_steps;
        self
    }

    fn insert_edge(&mut self, from: &str, edge: Edge) {
        if self.edges.insert(from.to_string(), edge).is_some() {
            self.duplicate_edges.push(from.to_string());
        }
    }

    /// Validate the wiring and freeze the graph
    pub fn compile(self) -> Result<CompiledGraph> {
        let mut nodes: HashMap<String, Arc<dyn Node>> = HashMap::new();
        let mut order = Vec::with_capacity(self.nodes.len());
        for node in self.nodes {
            let name = node.name().to_string();
            if nodes.contains_key(&name) {
                return Err(WorkflowError::DuplicateNode(name).into());
            }
            order.push(name.clone());
            nodes.insert(name, node);
        }

        if let Some(from) = self.duplicate_edges.into_iter().next() {
            return Err(WorkflowError::DuplicateEdge(from).into());
        }

        let entry = self.entry.ok_or(WorkflowError::MissingEntryPoint)?;
        if !nodes.contains_key(&entry) {
            return Err(WorkflowError::UnknownNode(entry).into());
        }

        for (from, edge) in &self.edges {
            if !nodes.contains_key(from) {
                return Err(WorkflowError::UnknownNode(from.clone()).into());
            }
            for to in edge.targets() {
                if to != END && !nodes.contains_key(to) {
                    return Err(WorkflowError::UnknownNode(to.to_string()).into());
                }
            }
        }

        if let Some(dangling) = order.iter().find(|name| !self.edges.contains_key(*name)) {
            return Err(WorkflowError::DanglingNode(dangling.clone()).into());
        }

        log::debug!("Compiled graph '{}' with nodes {:?}", self.name, order);

        Ok(CompiledGraph::new(
            self.name,
            nodes,
            order,
            entry,
            self.edges,
            self.tools,
            self.max_steps,
        ))
    }
}
