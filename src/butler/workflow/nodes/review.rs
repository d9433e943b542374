// SPDX-License-Identifier: MIT

use super::{markdown, pending};
use crate::adk::error::Result;
use crate::butler::workflow::graph::Node;
use crate::butler::workflow::state::HikeState;
use async_trait::async_trait;

/// Drafts the social post from track, photos and thoughts
pub struct PostGenNode;

#[async_trait]
impl Node for PostGenNode {
    fn name(&self) -> &str {
        "post_gen"
    }

    async fn run(&self, state: &mut HikeState) -> Result<()> {
        state.output_data = Some(markdown("post", "Post generation not implemented yet"));
        Ok(())
    }
}

/// Publishes the drafted post
pub struct XhsNode;

#[async_trait]
impl Node for XhsNode {
    fn name(&self) -> &str {
        "xhs"
    }

    async fn run(&self, state: &mut HikeState) -> Result<()> {
        state.output_mut().insert(
            "xhs_status".to_string(),
            pending("Xiaohongshu publishing not implemented yet"),
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Map};

    #[tokio::test]
    async fn test_post_gen_replaces_output() {
        let mut state = HikeState::review("test_user", Map::new());
        state.output_mut().insert("stale".into(), json!(true));

        PostGenNode.run(&mut state).await.unwrap();
        assert!(state.output("stale").is_none());
        assert_eq!(state.output("format"), Some(&json!("markdown")));
        assert!(state.output("post").is_some());
    }

    #[tokio::test]
    async fn test_xhs_keeps_post() {
        let mut state = HikeState::review("test_user", Map::new());
        PostGenNode.run(&mut state).await.unwrap();
        XhsNode.run(&mut state).await.unwrap();

        assert!(state.output("post").is_some());
        assert_eq!(state.output("xhs_status").unwrap()["status"], "pending");
    }

    #[tokio::test]
    async fn test_xhs_creates_output_when_absent() {
        let mut state = HikeState::review("test_user", Map::new());
        XhsNode.run(&mut state).await.unwrap();
        assert!(state.output("xhs_status").is_some());
    }
}
