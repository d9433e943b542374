// SPDX-License-Identifier: MIT

use super::{markdown, pending};
use crate::adk::error::Result;
use crate::butler::workflow::graph::Node;
use crate::butler::workflow::state::HikeState;
use async_trait::async_trait;

/// Route suggestion from location, duration and difficulty
pub struct RouteNode;

#[async_trait]
impl Node for RouteNode {
    fn name(&self) -> &str {
        "route"
    }

    async fn run(&self, state: &mut HikeState) -> Result<()> {
        log::debug!("Planning route for {:?}", state.input("location"));
        state.set_intermediate("route", pending("Route planning not implemented yet"));
        Ok(())
    }
}

/// Forecast along the route
pub struct WeatherNode;

#[async_trait]
impl Node for WeatherNode {
    fn name(&self) -> &str {
        "weather"
    }

    async fn run(&self, state: &mut HikeState) -> Result<()> {
        state.set_intermediate("weather", pending("Weather lookup not implemented yet"));
        Ok(())
    }
}

/// Gear checklist
pub struct GearNode;

#[async_trait]
impl Node for GearNode {
    fn name(&self) -> &str {
        "gear"
    }

    async fn run(&self, state: &mut HikeState) -> Result<()> {
        state.set_intermediate("gear", pending("Gear suggestions not implemented yet"));
        Ok(())
    }
}

/// Photo spots and timing
pub struct PhotoPlanNode;

#[async_trait]
impl Node for PhotoPlanNode {
    fn name(&self) -> &str {
        "photo_plan"
    }

    async fn run(&self, state: &mut HikeState) -> Result<()> {
        state.set_intermediate("photo_plan", pending("Photo planning not implemented yet"));
        Ok(())
    }
}

/// Merges the intermediate results into the final plan
pub struct FusionNode;

#[async_trait]
impl Node for FusionNode {
    fn name(&self) -> &str {
        "fusion"
    }

    async fn run(&self, state: &mut HikeState) -> Result<()> {
        log::debug!(
            "Fusing {} intermediate results",
            state.intermediate_results.len()
        );
        state.output_data = Some(markdown("plan", "Hiking plan fusion not implemented yet"));
        Ok(())
    }
}
