// SPDX-License-Identifier: MIT

use super::pending;
use crate::adk::error::Result;
use crate::adk::tool::Tool;
use async_trait::async_trait;
use once_cell::sync::Lazy;
use serde::Deserialize;
use serde_json::{json, Value};

static XHS_POST_SCHEMA: Lazy<Value> = Lazy::new(|| {
    json!({
        "type": "object",
        "properties": {
            "text": { "type": "string", "description": "Post body" },
            "images": {
                "type": "array",
                "items": { "type": "string" },
                "description": "Image paths to attach"
            }
        },
        "required": ["text"]
    })
});

#[derive(Debug, Deserialize)]
pub struct XhsPostArgs {
    pub text: String,
    #[serde(default)]
    pub images: Option<Vec<String>>,
}

/// Publishes a post to Xiaohongshu
pub struct XhsPostTool;

#[async_trait]
impl Tool for XhsPostTool {
    fn name(&self) -> &str {
        "xhs_post"
    }

    fn description(&self) -> &str {
        "Publishes a text post with optional images to Xiaohongshu."
    }

    fn schema(&self) -> &Value {
        &XHS_POST_SCHEMA
    }

    async fn execute(&self, input: Value) -> Result<Value> {
        let args: XhsPostArgs = serde_json::from_value(input)?;
        log::warn!("Xiaohongshu publishing not implemented");

        let mut result = pending("Xiaohongshu publishing not implemented yet");
        result["text"] = json!(args.text);
        result["images_count"] = json!(args.images.map_or(0, |i| i.len()));
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_counts_images() {
        let out = XhsPostTool
            .execute(json!({"text": "Summit at dawn", "images": ["a.jpg", "b.jpg"]}))
            .await
            .unwrap();
        assert_eq!(out["status"], "pending");
        assert_eq!(out["images_count"], 2);
        assert_eq!(out["text"], "Summit at dawn");
    }

    #[tokio::test]
    async fn test_images_optional() {
        let out = XhsPostTool.execute(json!({"text": "t"})).await.unwrap();
        assert_eq!(out["images_count"], 0);
    }
}
