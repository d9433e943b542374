// SPDX-License-Identifier: MIT

//! External collaborators available to the phase graphs
//!
//! - `windy_fetch` - weather forecast (preparation)
//! - `xhs_post` - social post publishing (review)
//!
//! Neither talks to a real service yet; both answer with a `pending` status.

mod registry;
mod windy;
mod xhs;

pub use registry::ToolRegistry;
pub use windy::WindyFetchTool;
pub use xhs::XhsPostTool;

use serde_json::{json, Value};

/// Placeholder payload shared by the unimplemented tools
pub(crate) fn pending(message: &str) -> Value {
    json!({
        "status": "pending",
        "message": message,
    })
}
