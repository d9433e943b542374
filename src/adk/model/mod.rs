// SPDX-License-Identifier: MIT

//! Model module - language-model trait and the OpenAI-compatible client
//!
//! Every configured LLM provider currently resolves to [openai::OpenAIModel];
//! see `butler::providers` for the selection rules.

pub mod openai;

use crate::adk::error::Result;
use crate::adk::tool::Tool;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Configuration for model generation
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct GenerationConfig {
    pub temperature: Option<f32>,
    pub max_output_tokens: Option<u32>,
    pub top_p: Option<f32>,
}

/// A message in the conversation log
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Content {
    pub role: String,
    pub parts: Vec<Part>,
}

impl Content {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            parts: vec![Part::Text(text.into())],
        }
    }

    pub fn system(text: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            parts: vec![Part::Text(text.into())],
        }
    }

    /// Concatenated text parts, ignoring tool traffic
    pub fn text(&self) -> String {
        self.parts
            .iter()
            .filter_map(|p| match p {
                Part::Text(t) => Some(t.as_str()),
                _ => None,
            })
            .collect()
    }
}

/// Parts of a message
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Part {
    Text(String),
    /// Function/tool call requested by the model
    FunctionCall {
        name: String,
        args: serde_json::Value,
    },
    /// Response from executing a function/tool
    FunctionResponse {
        name: String,
        response: serde_json::Value,
    },
}

/// Core trait for LLM clients
#[async_trait]
pub trait Model: Send + Sync {
    /// Model identifier sent to the backing API
    fn model_name(&self) -> &str;

    async fn generate_content(
        &self,
        history: &[Content],
        config: Option<&GenerationConfig>,
        tools: Option<&[Arc<dyn Tool>]>,
    ) -> Result<Content>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_text_skips_tool_parts() {
        let content = Content {
            role: "model".to_string(),
            parts: vec![
                Part::Text("Pack ".to_string()),
                Part::FunctionCall {
                    name: "windy_fetch".to_string(),
                    args: serde_json::json!({}),
                },
                Part::Text("layers".to_string()),
            ],
        };
        assert_eq!(content.text(), "Pack layers");
    }

    #[test]
    fn test_content_constructors() {
        assert_eq!(Content::user("hi").role, "user");
        assert_eq!(Content::system("be brief").text(), "be brief");
    }
}
