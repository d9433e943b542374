// SPDX-License-Identifier: MIT

use super::page::INDEX_HTML;
use super::AppState;
use crate::adk::error::Result;
use crate::butler::workflow::{CompiledGraph, HikeState};
use axum::{extract::State, response::Html, Json};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

/// Gear table header, with the object key each column is read from
pub const GEAR_COLUMNS: [&str; 3] = ["Gear", "Qty", "Note"];
const GEAR_KEYS: [&str; 3] = ["name", "quantity", "note"];

const PLAN_PENDING: &str = "Generating hiking plan...";
const POST_PENDING: &str = "Generating post...";
const NOT_PUBLISHED: &str = "Not published";

fn default_user() -> String {
    "default_user".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct PrepareRequest {
    pub location: String,
    pub duration: String,
    pub difficulty: String,
    #[serde(default = "default_user")]
    pub user_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrepareResponse {
    pub gear_list: Vec<Vec<Value>>,
    pub columns: Vec<String>,
    pub plan: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReviewRequest {
    /// GPX track contents
    #[serde(default)]
    pub gpx: Option<String>,
    #[serde(default)]
    pub photos: Option<Vec<String>>,
    pub thoughts: String,
    #[serde(default = "default_user")]
    pub user_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewResponse {
    pub post: String,
    pub xhs_status: String,
}

fn columns() -> Vec<String> {
    GEAR_COLUMNS.iter().map(|c| c.to_string()).collect()
}

/// Normalize `output_data.gear_list` into table rows.
///
/// Objects are read by column (`Gear`/`name`, `Qty`/`quantity`,
/// `Note`/`note`), arrays pass through, anything else is an empty table.
pub fn gear_rows(gear_list: Option<&Value>) -> Vec<Vec<Value>> {
    let Some(Value::Array(items)) = gear_list else {
        return Vec::new();
    };

    match items.first() {
        Some(Value::Object(_)) => items
            .iter()
            .filter_map(Value::as_object)
            .map(|item| {
                GEAR_COLUMNS
                    .iter()
                    .zip(GEAR_KEYS)
                    .map(|(column, key)| {
                        item.get(*column)
                            .or_else(|| item.get(key))
                            .cloned()
                            .unwrap_or_else(|| json!(""))
                    })
                    .collect()
            })
            .collect(),
        Some(Value::Array(_)) => items
            .iter()
            .filter_map(Value::as_array)
            .cloned()
            .collect(),
        _ => Vec::new(),
    }
}

fn text_or(value: Option<&Value>, default: &str) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => default.to_string(),
        Some(other) => other.to_string(),
    }
}

/// Run the preparation phase for one request
pub async fn prepare_hiking(graph: &CompiledGraph, req: PrepareRequest) -> Result<PrepareResponse> {
    let mut input = Map::new();
    input.insert("location".into(), json!(req.location));
    input.insert("duration".into(), json!(req.duration));
    input.insert("difficulty".into(), json!(req.difficulty));

    let state = graph
        .invoke(HikeState::preparation(req.user_id, input))
        .await?;

    Ok(PrepareResponse {
        gear_list: gear_rows(state.output("gear_list")),
        columns: columns(),
        plan: text_or(state.output("plan"), PLAN_PENDING),
    })
}

/// Run the review phase for one request
pub async fn review_hiking(graph: &CompiledGraph, req: ReviewRequest) -> Result<ReviewResponse> {
    let mut input = Map::new();
    input.insert("gpx".into(), json!(req.gpx));
    input.insert("photos".into(), json!(req.photos));
    input.insert("thoughts".into(), json!(req.thoughts));

    let state = graph.invoke(HikeState::review(req.user_id, input)).await?;

    let xhs_status = state
        .output("xhs_status")
        .and_then(|status| status.get("message"));

    Ok(ReviewResponse {
        post: text_or(state.output("post"), POST_PENDING),
        xhs_status: text_or(xhs_status, NOT_PUBLISHED),
    })
}

pub(super) async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

pub(super) async fn health_check() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

pub(super) async fn list_phases(State(state): State<AppState>) -> Json<Value> {
    let mut phases = Vec::new();
    for graph in [&state.preparation, &state.review] {
        phases.push(json!({
            "name": graph.name(),
            "entry": graph.entry_point(),
            "steps": graph.node_names(),
            "tools": graph.tools().names().await,
        }));
    }
    Json(json!(phases))
}

pub(super) async fn prepare(
    State(state): State<AppState>,
    Json(req): Json<PrepareRequest>,
) -> Json<PrepareResponse> {
    match prepare_hiking(&state.preparation, req).await {
        Ok(response) => Json(response),
        Err(e) => {
            log::error!("Hike preparation failed: {}", e);
            Json(PrepareResponse {
                gear_list: Vec::new(),
                columns: columns(),
                plan: format!("Error: {}", e),
            })
        }
    }
}

pub(super) async fn review(
    State(state): State<AppState>,
    Json(req): Json<ReviewRequest>,
) -> Json<ReviewResponse> {
    match review_hiking(&state.review, req).await {
        Ok(response) => Json(response),
        Err(e) => {
            log::error!("Hike review failed: {}", e);
            Json(ReviewResponse {
                post: format!("Error: {}", e),
                xhs_status: String::new(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adk::error::ButlerError;
    use crate::butler::server::router;
    use crate::butler::workflow::{Node, StateGraph, END};
    use async_trait::async_trait;
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use std::sync::Arc;
    use tower::ServiceExt;

    struct GearListNode;

    #[async_trait]
    impl Node for GearListNode {
        fn name(&self) -> &str {
            "gear"
        }

        async fn run(&self, state: &mut HikeState) -> Result<()> {
            state.output_mut().insert(
                "gear_list".into(),
                json!([{ "name": "Rain shell", "quantity": 1 }]),
            );
            Ok(())
        }
    }

    struct OfflineNode;

    #[async_trait]
    impl Node for OfflineNode {
        fn name(&self) -> &str {
            "offline"
        }

        async fn run(&self, _state: &mut HikeState) -> Result<()> {
            Err(ButlerError::other("model offline"))
        }
    }

    fn single(node: Arc<dyn Node>) -> CompiledGraph {
        let name = node.name().to_string();
        let mut graph = StateGraph::new(name.clone());
        graph.add_node(node).set_entry_point(&name).add_edge(&name, END);
        graph.compile().unwrap_or_else(|_| panic!("graph {} compiles", name))
    }

    async fn default_app() -> axum::Router {
        router(AppState::new().await.unwrap())
    }

    fn failing_app() -> axum::Router {
        router(AppState::from_graphs(
            single(Arc::new(OfflineNode)),
            single(Arc::new(OfflineNode)),
        ))
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_prepare_returns_plan_and_empty_table() {
        let response = default_app()
            .await
            .oneshot(post_json(
                "/api/prepare",
                json!({"location": "Fragrant Hills", "duration": "one day", "difficulty": "moderate"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["columns"], json!(["Gear", "Qty", "Note"]));
        assert_eq!(body["gear_list"], json!([]));
        assert!(body["plan"].as_str().unwrap().contains("not implemented"));
    }

    #[tokio::test]
    async fn test_review_returns_post_and_status() {
        let response = default_app()
            .await
            .oneshot(post_json(
                "/api/review",
                json!({"thoughts": "Windy ridge, great views", "photos": ["ridge.jpg"]}),
            ))
            .await
            .unwrap();

        let body = body_json(response).await;
        assert!(body["post"].is_string());
        assert_eq!(
            body["xhs_status"],
            "Xiaohongshu publishing not implemented yet"
        );
    }

    #[tokio::test]
    async fn test_errors_come_back_as_text() {
        let app = failing_app();
        let body = body_json(
            app.clone()
                .oneshot(post_json(
                    "/api/prepare",
                    json!({"location": "x", "duration": "y", "difficulty": "z"}),
                ))
                .await
                .unwrap(),
        )
        .await;
        assert_eq!(body["plan"], "Error: model offline");
        assert_eq!(body["gear_list"], json!([]));

        let body = body_json(
            app.oneshot(post_json("/api/review", json!({"thoughts": "t"})))
                .await
                .unwrap(),
        )
        .await;
        assert_eq!(body["post"], "Error: model offline");
        assert_eq!(body["xhs_status"], "");
    }

    #[tokio::test]
    async fn test_app_state_honours_step_limit() {
        let settings = crate::butler::config::WorkflowSettings { max_steps: 2 };
        let app = router(AppState::from_settings(&settings).await.unwrap());

        let body = body_json(
            app.clone()
                .oneshot(post_json(
                    "/api/prepare",
                    json!({"location": "x", "duration": "y", "difficulty": "z"}),
                ))
                .await
                .unwrap(),
        )
        .await;
        assert!(body["plan"].as_str().unwrap().starts_with("Error: Max "));

        let body = body_json(
            app.oneshot(post_json("/api/review", json!({"thoughts": "t"})))
                .await
                .unwrap(),
        )
        .await;
        assert_eq!(
            body["xhs_status"],
            "Xiaohongshu publishing not implemented yet"
        );
    }

    #[tokio::test]
    async fn test_gear_objects_become_rows() {
        let graph = single(Arc::new(GearListNode));
        let response = prepare_hiking(
            &graph,
            PrepareRequest {
                location: "a".into(),
                duration: "b".into(),
                difficulty: "c".into(),
                user_id: default_user(),
            },
        )
        .await
        .unwrap();

        assert_eq!(response.gear_list, vec![vec![json!("Rain shell"), json!(1), json!("")]]);
        assert_eq!(response.plan, PLAN_PENDING);
    }

    #[test]
    fn test_gear_rows_shapes() {
        let rows = json!([["Headlamp", 1, "spare batteries"]]);
        assert_eq!(gear_rows(Some(&rows)), vec![vec![json!("Headlamp"), json!(1), json!("spare batteries")]]);

        let rows = json!([{ "Gear": "Poles", "Qty": 2, "Note": "" }]);
        assert_eq!(gear_rows(Some(&rows))[0][0], json!("Poles"));

        assert!(gear_rows(Some(&json!("pending"))).is_empty());
        assert!(gear_rows(Some(&json!([]))).is_empty());
        assert!(gear_rows(None).is_empty());
    }

    #[tokio::test]
    async fn test_phases_lists_steps_and_tools() {
        let response = default_app()
            .await
            .oneshot(Request::builder().uri("/api/phases").body(Body::empty()).unwrap())
            .await
            .unwrap();

        let body = body_json(response).await;
        assert_eq!(body[0]["name"], "preparation");
        assert_eq!(body[0]["tools"], json!(["windy_fetch"]));
        assert_eq!(body[1]["steps"], json!(["post_gen", "xhs"]));
    }

    #[tokio::test]
    async fn test_index_and_health() {
        let app = default_app().await;
        let response = app
            .clone()
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert!(String::from_utf8_lossy(&bytes).contains("HikeButler"));

        let response = app
            .oneshot(Request::builder().uri("/api/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(body_json(response).await, json!({"status": "ok"}));
    }
}
