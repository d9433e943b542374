// SPDX-License-Identifier: MIT

//! The two hiking phases as compiled graphs

use super::graph::{CompiledGraph, Route, StateGraph, END};
use super::nodes::{
    FusionNode, GearNode, PhotoPlanNode, PostGenNode, RouteNode, WeatherNode, XhsNode,
};
use super::state::HikeState;
use crate::adk::error::Result;
use crate::butler::config::WorkflowSettings;
use crate::butler::tools::{ToolRegistry, WindyFetchTool, XhsPostTool};
use std::sync::Arc;

/// route → weather → gear → photo_plan → fusion
pub async fn create_preparation_workflow() -> Result<CompiledGraph> {
    build_preparation_workflow(&WorkflowSettings::default()).await
}

/// post_gen → xhs
pub async fn create_review_workflow() -> Result<CompiledGraph> {
    build_review_workflow(&WorkflowSettings::default()).await
}

pub async fn build_preparation_workflow(settings: &WorkflowSettings) -> Result<CompiledGraph> {
    let tools = ToolRegistry::new();
    tools.register(Arc::new(WindyFetchTool)).await;

    let mut graph = StateGraph::new("preparation");
    graph
        .add_node(Arc::new(RouteNode))
        .add_node(Arc::new(WeatherNode))
        .add_node(Arc::new(GearNode))
        .add_node(Arc::new(PhotoPlanNode))
        .add_node(Arc::new(FusionNode))
        .set_entry_point("route")
        .add_edge("route", "weather")
        .add_edge("weather", "gear")
        .add_edge("gear", "photo_plan")
        .add_edge("photo_plan", "fusion")
        .add_edge("fusion", END)
        .with_tools(tools)
        .with_max_steps(settings.max_steps);

    graph.compile()
}

pub async fn build_review_workflow(settings: &WorkflowSettings) -> Result<CompiledGraph> {
    let tools = ToolRegistry::new();
    tools.register(Arc::new(XhsPostTool)).await;

    let mut graph = StateGraph::new("review");
    graph
        .add_node(Arc::new(PostGenNode))
        .add_node(Arc::new(XhsNode))
        .set_entry_point("post_gen")
        .add_edge("post_gen", "xhs")
        .add_edge("xhs", END)
        .with_tools(tools)
        .with_max_steps(settings.max_steps);

    graph.compile()
}

/// Hook for conditional routing between steps; both phases are linear today.
pub fn should_continue(_state: &HikeState) -> Route {
    Route::End
}
