// SPDX-License-Identifier: MIT

//! Long-term per-user memory ("slipped on wet rock last time, pack
//! microspikes")
//!
//! No backend is wired up yet: reads come back empty and writes are logged.

use crate::butler::config::{resolved_secret, Mem0Settings};
use serde_json::{Map, Value};

#[derive(Debug, Clone)]
pub struct MemoryClient {
    api_key: Option<String>,
    user_id_field: String,
}

impl MemoryClient {
    pub fn from_settings(settings: &Mem0Settings) -> Self {
        let api_key = resolved_secret(settings.api_key.as_deref()).map(str::to_string);
        if api_key.is_none() {
            log::warn!("Mem0 API key not configured; long-term memory disabled");
        } else {
            log::warn!("Mem0 backend not implemented; long-term memory disabled");
        }

        Self {
            api_key,
            user_id_field: settings.user_id_field.clone(),
        }
    }

    /// Whether a backend is attached
    pub fn enabled(&self) -> bool {
        false
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Field the backend keys memories by
    pub fn user_id_field(&self) -> &str {
        &self.user_id_field
    }

    pub async fn get_memories(&self, user_id: &str, query: Option<&str>) -> Vec<Value> {
        if !self.enabled() {
            log::warn!("Memory client not initialized");
            return Vec::new();
        }
        log::debug!("Memory lookup for {} ({:?})", user_id, query);
        Vec::new()
    }

    pub async fn add_memory(&self, user_id: &str, memory: &str, metadata: Option<Map<String, Value>>) {
        if !self.enabled() {
            log::warn!("Memory client not initialized");
            return;
        }
        log::info!(
            "Memory add not implemented for {}: {} ({} metadata keys)",
            user_id,
            memory,
            metadata.map_or(0, |m| m.len())
        );
    }
}
