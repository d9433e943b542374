// SPDX-License-Identifier: MIT

//! Typed views over the substituted config documents

use serde::{Deserialize, Serialize};

/// General app config (`config/config.yaml`)
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppSettings {
    #[serde(default)]
    pub app: AppInfo,
    #[serde(default)]
    pub database: DatabaseSettings,
    #[serde(default)]
    pub mem0: Mem0Settings,
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub workflow: WorkflowSettings,
}

/// Phase graph knobs
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WorkflowSettings {
    /// Steps one invocation may take before it is aborted
    #[serde(default = "default_max_steps")]
    pub max_steps: u32,
}

impl Default for WorkflowSettings {
    fn default() -> Self {
        Self {
            max_steps: default_max_steps(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppInfo {
    #[serde(default = "default_app_name")]
    pub name: String,
    #[serde(default = "default_app_version")]
    pub version: String,
}

impl Default for AppInfo {
    fn default() -> Self {
        Self {
            name: default_app_name(),
            version: default_app_version(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct DatabaseSettings {
    #[serde(default)]
    pub sqlite: SqliteSettings,
    #[serde(default)]
    pub vector: VectorSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SqliteSettings {
    #[serde(default = "default_sqlite_url")]
    pub url: String,
    #[serde(default = "default_pool_size")]
    pub pool_size: u32,
}

impl Default for SqliteSettings {
    fn default() -> Self {
        Self {
            url: default_sqlite_url(),
            pool_size: default_pool_size(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct VectorSettings {
    #[serde(default = "default_vector_path")]
    pub path: String,
    #[serde(default = "default_collection_name")]
    pub collection_name: String,
}

impl Default for VectorSettings {
    fn default() -> Self {
        Self {
            path: default_vector_path(),
            collection_name: default_collection_name(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Mem0Settings {
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_user_id_field")]
    pub user_id_field: String,
}

impl Default for Mem0Settings {
    fn default() -> Self {
        Self {
            api_key: None,
            user_id_field: default_user_id_field(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Model config (`config/models.yaml`)
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ModelSettings {
    #[serde(default)]
    pub llm: LlmSettings,
    #[serde(default)]
    pub embedding: EmbeddingSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct LlmSettings {
    #[serde(default = "default_llm_provider")]
    pub provider: String,
    #[serde(default = "default_llm_model")]
    pub model_name: String,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            provider: default_llm_provider(),
            model_name: default_llm_model(),
            api_key: None,
            base_url: None,
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct EmbeddingSettings {
    #[serde(default = "default_embedding_provider")]
    pub provider: String,
    #[serde(default = "default_embedding_model")]
    pub model_name: String,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default = "default_dimension")]
    pub dimension: usize,
}

impl Default for EmbeddingSettings {
    fn default() -> Self {
        Self {
            provider: default_embedding_provider(),
            model_name: default_embedding_model(),
            api_key: None,
            base_url: None,
            dimension: default_dimension(),
        }
    }
}

fn default_app_name() -> String {
    "HikeButler".to_string()
}

fn default_app_version() -> String {
    "0.1.0".to_string()
}

fn default_max_steps() -> u32 {
    100
}

fn default_sqlite_url() -> String {
    "sqlite://hikebutler.db".to_string()
}

fn default_pool_size() -> u32 {
    5
}

fn default_vector_path() -> String {
    "./vector_store.db".to_string()
}

fn default_collection_name() -> String {
    "hiking_knowledge".to_string()
}

fn default_user_id_field() -> String {
    "user_id".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    7860
}

fn default_llm_provider() -> String {
    "deepseek".to_string()
}

fn default_llm_model() -> String {
    "deepseek-chat".to_string()
}

fn default_temperature() -> f32 {
    0.7
}

fn default_max_tokens() -> u32 {
    2000
}

fn default_embedding_provider() -> String {
    "qwen".to_string()
}

fn default_embedding_model() -> String {
    "text-embedding-v2".to_string()
}

fn default_dimension() -> usize {
    1024
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_documents_use_defaults() {
        let app: AppSettings = serde_yaml::from_str("{}").unwrap();
        assert_eq!(app.app.name, "HikeButler");
        assert_eq!(app.server.port, 7860);
        assert_eq!(app.database.vector.collection_name, "hiking_knowledge");
        assert!(app.mem0.api_key.is_none());
        assert_eq!(app.workflow.max_steps, 100);

        let models: ModelSettings = serde_yaml::from_str("{}").unwrap();
        assert_eq!(models.llm.provider, "deepseek");
        assert_eq!(models.llm.max_tokens, 2000);
        assert_eq!(models.embedding.provider, "qwen");
        assert_eq!(models.embedding.dimension, 1024);
    }

    #[test]
    fn test_partial_sections_fill_remaining_defaults() {
        let yaml = r#"
llm:
  provider: openai
  api_key: sk-abc
embedding:
  model_name: text-embedding-3-small
"#;
        let models: ModelSettings = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(models.llm.provider, "openai");
        assert_eq!(models.llm.api_key.as_deref(), Some("sk-abc"));
        assert_eq!(models.llm.model_name, "deepseek-chat");
        assert_eq!(models.embedding.model_name, "text-embedding-3-small");
        assert_eq!(models.embedding.provider, "qwen");
    }
}
