// SPDX-License-Identifier: MIT

//! Phase steps
//!
//! Every step is still a stand-in: it stamps a `pending` result under its
//! own key and returns.

mod preparation;
mod review;

pub use preparation::{FusionNode, GearNode, PhotoPlanNode, RouteNode, WeatherNode};
pub use review::{PostGenNode, XhsNode};

pub(crate) use crate::butler::tools::pending;

use serde_json::{json, Value};

/// Markdown payload written by the generating steps
pub(crate) fn markdown(key: &str, body: &str) -> serde_json::Map<String, Value> {
    let mut output = serde_json::Map::new();
    output.insert(key.to_string(), json!(body));
    output.insert("format".to_string(), json!("markdown"));
    output
}
