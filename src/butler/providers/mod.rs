// SPDX-License-Identifier: MIT

//! Provider factories
//!
//! Process-wide singletons that pick a backing client from the model config.
//! Only the OpenAI integration exists; `deepseek` and `qwen` degrade to it.

mod embedding;
mod llm;

pub use embedding::{create_embedding, get_embedding, EmbeddingFactory};
pub use llm::{create_llm, get_llm, LlmFactory};

use crate::adk::error::{ButlerError, ModelError};
use std::fmt;
use std::str::FromStr;

/// Declared provider names accepted in `models.yaml`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    OpenAI,
    DeepSeek,
    Qwen,
}

impl ProviderKind {
    /// Whether this provider has its own client rather than the OpenAI fallback
    pub fn is_native(self) -> bool {
        matches!(self, ProviderKind::OpenAI)
    }
}

impl FromStr for ProviderKind {
    type Err = ButlerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "openai" => Ok(Self::OpenAI),
            "deepseek" => Ok(Self::DeepSeek),
            "qwen" => Ok(Self::Qwen),
            _ => Err(ModelError::UnsupportedProvider(s.to_string()).into()),
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ProviderKind::OpenAI => "openai",
            ProviderKind::DeepSeek => "deepseek",
            ProviderKind::Qwen => "qwen",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_provider_kind() {
        assert_eq!("openai".parse::<ProviderKind>().unwrap(), ProviderKind::OpenAI);
        assert_eq!("deepseek".parse::<ProviderKind>().unwrap(), ProviderKind::DeepSeek);
        assert_eq!("qwen".parse::<ProviderKind>().unwrap(), ProviderKind::Qwen);
        assert!("anthropic".parse::<ProviderKind>().is_err());
    }

    #[test]
    fn test_provider_names_are_case_sensitive() {
        for name in ["OpenAI", "DeepSeek", "QWEN"] {
            let err = name.parse::<ProviderKind>().err().unwrap();
            assert!(matches!(
                err,
                ButlerError::Model(ModelError::UnsupportedProvider(ref p)) if p == name
            ));
        }
    }

    #[test]
    fn test_only_openai_is_native() {
        assert!(ProviderKind::OpenAI.is_native());
        assert!(!ProviderKind::DeepSeek.is_native());
        assert!(!ProviderKind::Qwen.is_native());
    }
}
