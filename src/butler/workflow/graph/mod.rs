// SPDX-License-Identifier: MIT

//! Graph-based workflow execution
//!
//! A `StateGraph` collects named nodes and the edges between them;
//! `compile()` validates the wiring and yields a `CompiledGraph` that walks
//! the nodes one at a time over a shared `HikeState`.

mod builder;
mod executor;

pub use builder::StateGraph;
pub use executor::CompiledGraph;

use crate::adk::error::Result;
use crate::butler::workflow::state::HikeState;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;

/// Pseudo-node that terminates an invocation
pub const END: &str = "__end__";

/// Step limit per invocation
pub const DEFAULT_MAX_STEPS: u32 = 100;

/// One unit of work in a phase
#[async_trait]
pub trait Node: Send + Sync {
    /// Returns the node name (unique within a graph)
    fn name(&self) -> &str;

    /// Read and update the shared state
    async fn run(&self, state: &mut HikeState) -> Result<()>;
}

/// Picks an outgoing label from the current state
pub type Router = Arc<dyn Fn(&HikeState) -> String + Send + Sync>;

#[derive(Clone)]
pub(crate) enum Edge {
    Direct(String),
    Conditional {
        router: Router,
        mapping: HashMap<String, String>,
    },
}

impl Edge {
    pub(crate) fn targets(&self) -> Vec<&str> {
        match self {
            Edge::Direct(to) => vec![to.as_str()],
            Edge::Conditional { mapping, .. } => mapping.values().map(String::as_str).collect(),
        }
    }
}

/// Outcome of the conditional-routing check between steps
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Continue,
    End,
}

impl Route {
    pub fn as_str(self) -> &'static str {
        match self {
            Route::Continue => "continue",
            Route::End => "end",
        }
    }
}
