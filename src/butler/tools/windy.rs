// SPDX-License-Identifier: MIT

use super::pending;
use crate::adk::error::Result;
use crate::adk::tool::Tool;
use async_trait::async_trait;
use once_cell::sync::Lazy;
use serde::Deserialize;
use serde_json::{json, Value};

static WINDY_FETCH_SCHEMA: Lazy<Value> = Lazy::new(|| {
    json!({
        "type": "object",
        "properties": {
            "lat": { "type": "number", "description": "Latitude of the trailhead" },
            "lon": { "type": "number", "description": "Longitude of the trailhead" },
            "days": { "type": "integer", "description": "Forecast days (default 7)" }
        },
        "required": ["lat", "lon"]
    })
});

#[derive(Debug, Deserialize)]
pub struct WindyFetchArgs {
    pub lat: f64,
    pub lon: f64,
    #[serde(default = "default_days")]
    pub days: u32,
}

fn default_days() -> u32 {
    7
}

/// Weather forecast lookup through the Windy API
pub struct WindyFetchTool;

#[async_trait]
impl Tool for WindyFetchTool {
    fn name(&self) -> &str {
        "windy_fetch"
    }

    fn description(&self) -> &str {
        "Fetches the weather forecast for a coordinate from the Windy API."
    }

    fn schema(&self) -> &Value {
        &WINDY_FETCH_SCHEMA
    }

    async fn execute(&self, input: Value) -> Result<Value> {
        let args: WindyFetchArgs = serde_json::from_value(input)?;
        log::warn!("Windy API call not implemented");

        let mut result = pending("Windy API call not implemented yet");
        result["lat"] = json!(args.lat);
        result["lon"] = json!(args.lon);
        result["days"] = json!(args.days);
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_pending_forecast_echoes_args() {
        let out = WindyFetchTool
            .execute(json!({"lat": 39.99, "lon": 116.19}))
            .await
            .unwrap();
        assert_eq!(out["status"], "pending");
        assert_eq!(out["lat"], 39.99);
        assert_eq!(out["days"], 7);
    }

    #[tokio::test]
    async fn test_missing_coordinates_rejected() {
        assert!(WindyFetchTool.execute(json!({"lat": 1.0})).await.is_err());
    }
}
