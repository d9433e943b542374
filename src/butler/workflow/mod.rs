// SPDX-License-Identifier: MIT

pub mod graph;
pub mod nodes;
pub mod phases;
pub mod state;

pub use graph::{CompiledGraph, Node, Route, StateGraph, END};
pub use phases::{
    build_preparation_workflow, build_review_workflow, create_preparation_workflow,
    create_review_workflow, should_continue,
};
pub use state::{HikeState, Phase};
