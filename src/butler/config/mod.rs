// SPDX-License-Identifier: MIT

//! Configuration loading
//!
//! Two YAML documents drive the application: the general app config and the
//! model config. String values of the exact form `${NAME}` are replaced by
//! the environment variable `NAME` when it is set.

mod settings;

pub use settings::{
    AppInfo, AppSettings, DatabaseSettings, EmbeddingSettings, LlmSettings, Mem0Settings,
    ModelSettings, ServerSettings, SqliteSettings, VectorSettings, WorkflowSettings,
};

use crate::adk::error::{ConfigError, Result};
use serde::de::DeserializeOwned;
use serde_yaml::Value;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_PATH: &str = "config/config.yaml";
pub const DEFAULT_MODELS_CONFIG_PATH: &str = "config/models.yaml";

/// Path of the app config, honouring `HIKE_BUTLER_CONFIG`
pub fn config_path() -> PathBuf {
    env::var("HIKE_BUTLER_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH))
}

/// Path of the model config, honouring `HIKE_BUTLER_MODELS_CONFIG`
pub fn models_config_path() -> PathBuf {
    env::var("HIKE_BUTLER_MODELS_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_MODELS_CONFIG_PATH))
}

/// Load the general app config with environment substitution
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Value> {
    load_yaml(path.as_ref())
}

/// Load the model config with environment substitution
pub fn load_model_config<P: AsRef<Path>>(path: P) -> Result<Value> {
    load_yaml(path.as_ref())
}

/// Load and deserialize the app config from the default location
pub fn app_settings() -> Result<AppSettings> {
    load_settings(&config_path())
}

/// Load and deserialize the model config from the default location
pub fn model_settings() -> Result<ModelSettings> {
    load_settings(&models_config_path())
}

/// Load `path` and deserialize it into a typed view.
///
/// A document that parses as YAML but does not fit the view is
/// `ConfigError::Invalid`, keyed by the file.
pub fn load_settings<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let raw = load_yaml(path)?;
    serde_yaml::from_value(raw).map_err(|e| {
        ConfigError::Invalid {
            key: path.display().to_string(),
            message: e.to_string(),
        }
        .into()
    })
}

fn load_yaml(path: &Path) -> Result<Value> {
    dotenv::dotenv().ok();

    if !path.exists() {
        return Err(ConfigError::NotFound(path.display().to_string()).into());
    }

    let content = fs::read_to_string(path)?;
    let value: Value = serde_yaml::from_str(&content)?;
    log::debug!("Loaded config from {}", path.display());
    Ok(substitute_env_vars(value))
}

/// Replace every `${NAME}` string leaf with the value of `NAME`.
///
/// Only whole-string tokens are replaced; keys are never touched and unset
/// variables leave the token as is.
pub fn substitute_env_vars(value: Value) -> Value {
    match value {
        Value::Mapping(map) => Value::Mapping(
            map.into_iter()
                .map(|(k, v)| (k, substitute_env_vars(v)))
                .collect(),
        ),
        Value::Sequence(items) => {
            Value::Sequence(items.into_iter().map(substitute_env_vars).collect())
        }
        Value::String(s) => {
            let resolved = env_token(&s).and_then(|name| env::var(name).ok());
            Value::String(resolved.unwrap_or(s))
        }
        Value::Tagged(mut tagged) => {
            tagged.value = substitute_env_vars(tagged.value);
            Value::Tagged(tagged)
        }
        other => other,
    }
}

/// Variable name inside an exact `${NAME}` token
pub(crate) fn env_token(s: &str) -> Option<&str> {
    s.strip_prefix("${").and_then(|rest| rest.strip_suffix('}'))
}

/// A configured secret, treating blanks and unresolved `${NAME}` tokens as unset
pub fn resolved_secret(value: Option<&str>) -> Option<&str> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty() && env_token(v).is_none())
}
