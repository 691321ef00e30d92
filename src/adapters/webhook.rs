//! Action-server webhook: the wire contract the dialogue host speaks.
//!
//! `POST /webhook` runs the action named in `next_action` against the posted
//! tracker. `GET /actions` lists registered actions, `GET /health` is a probe.

use crate::core::engine::ActionEngine;
use crate::core::form::REQUESTED_SLOT;
use crate::domain::model::{ActionContext, BotMessage, Entity, Event, Slots, Turn};
use crate::utils::error::{ActionError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::net::SocketAddr;
use std::sync::Arc;
use warp::http::StatusCode;
use warp::Filter;

const MAX_BODY_BYTES: u64 = 1024 * 1024;

#[derive(Debug, Clone, Deserialize)]
pub struct ActionRequest {
    pub next_action: String,
    #[serde(default)]
    pub sender_id: Option<String>,
    #[serde(default)]
    pub tracker: TrackerState,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TrackerState {
    #[serde(default)]
    pub sender_id: Option<String>,
    #[serde(default)]
    pub slots: Slots,
    #[serde(default)]
    pub latest_message: LatestMessage,
    #[serde(default)]
    pub events: Vec<Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LatestMessage {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub intent: Option<IntentRef>,
    #[serde(default)]
    pub entities: Vec<Entity>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct IntentRef {
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ActionResponse {
    pub events: Vec<Event>,
    pub responses: Vec<BotMessage>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub action_name: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
struct ActionInfo {
    name: &'static str,
}

impl TrackerState {
    /// Slots set in the unbroken run of slot events that ends the tracker,
    /// later sets overriding earlier ones. Slots another action set before
    /// that run (even in the same turn) are not candidates.
    pub fn slot_candidates(&self) -> Vec<(String, Value)> {
        let is_slot = |e: &Value| e.get("event").and_then(Value::as_str) == Some("slot");
        let start = self
            .events
            .iter()
            .rposition(|e| !is_slot(e))
            .map_or(0, |index| index + 1);

        let mut candidates: Vec<(String, Value)> = Vec::new();
        for event in &self.events[start..] {
            let Some(name) = event.get("name").and_then(Value::as_str) else {
                continue;
            };
            if name == REQUESTED_SLOT {
                continue;
            }
            let value = event.get("value").cloned().unwrap_or(Value::Null);
            match candidates.iter_mut().find(|(existing, _)| existing == name) {
                Some(entry) => entry.1 = value,
                None => candidates.push((name.to_string(), value)),
            }
        }
        candidates
    }
}

impl ActionRequest {
    pub fn from_slice(body: &[u8]) -> Result<Self> {
        serde_json::from_slice(body).map_err(|e| ActionError::InvalidRequest {
            message: format!("malformed action request: {}", e),
        })
    }

    pub fn context(&self) -> ActionContext {
        let tracker = &self.tracker;
        let message = &tracker.latest_message;

        ActionContext {
            sender_id: self
                .sender_id
                .clone()
                .or_else(|| tracker.sender_id.clone())
                .unwrap_or_default(),
            slots: tracker.slots.clone(),
            turn: Turn {
                text: message.text.clone().unwrap_or_default(),
                intent: message.intent.as_ref().and_then(|i| i.name.clone()),
                entities: message.entities.clone(),
            },
            candidates: tracker.slot_candidates(),
            requested_slot: tracker.slots.text(REQUESTED_SLOT),
        }
    }
}

pub fn handle_request(engine: &ActionEngine, request: &ActionRequest) -> Result<ActionResponse> {
    let outcome = engine.run(&request.next_action, &request.context())?;
    Ok(ActionResponse {
        events: outcome.events,
        responses: outcome.messages,
    })
}

fn webhook_reply(engine: &ActionEngine, body: &[u8]) -> warp::reply::WithStatus<warp::reply::Json> {
    let request = match ActionRequest::from_slice(body) {
        Ok(request) => request,
        Err(e) => {
            tracing::warn!("❌ {}", e);
            let error = ErrorResponse {
                error: e.to_string(),
                action_name: None,
            };
            return warp::reply::with_status(warp::reply::json(&error), StatusCode::BAD_REQUEST);
        }
    };

    match handle_request(engine, &request) {
        Ok(response) => warp::reply::with_status(warp::reply::json(&response), StatusCode::OK),
        Err(e) => {
            let status = match e {
                ActionError::UnknownAction { .. } => StatusCode::NOT_FOUND,
                ActionError::InvalidRequest { .. } => StatusCode::BAD_REQUEST,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            };
            tracing::error!("❌ {} failed: {} (Category: {:?})", request.next_action, e, e.category());
            let error = ErrorResponse {
                error: e.to_string(),
                action_name: Some(request.next_action.clone()),
            };
            warp::reply::with_status(warp::reply::json(&error), status)
        }
    }
}

pub fn routes(
    engine: Arc<ActionEngine>,
) -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    let webhook_engine = engine.clone();
    let webhook_route = warp::path("webhook")
        .and(warp::path::end())
        .and(warp::post())
        .and(warp::body::content_length_limit(MAX_BODY_BYTES))
        .and(warp::body::bytes())
        .map(move |body: warp::hyper::body::Bytes| webhook_reply(&webhook_engine, &body));

    let actions_engine = engine;
    let actions_route = warp::path("actions")
        .and(warp::path::end())
        .and(warp::get())
        .map(move || {
            let actions: Vec<ActionInfo> = actions_engine
                .action_names()
                .into_iter()
                .map(|name| ActionInfo { name })
                .collect();
            warp::reply::json(&actions)
        });

    let health_route = warp::path("health")
        .and(warp::path::end())
        .and(warp::get())
        .map(|| warp::reply::json(&serde_json::json!({ "status": "ok" })));

    webhook_route.or(actions_route).or(health_route)
}

/// Serve the webhook until the process is stopped.
pub async fn serve(engine: Arc<ActionEngine>, addr: SocketAddr) {
    tracing::info!("🚀 Action server listening on {}", addr);
    warp::serve(routes(engine)).run(addr).await;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_candidates_from_trailing_slot_events() {
        let tracker: TrackerState = serde_json::from_value(json!({
            "events": [
                {"event": "slot", "name": "menu_name", "value": "프렌치 디너"},
                {"event": "user", "text": "두 개요"},
                {"event": "slot", "name": "menu_quantity", "value": "두"},
                {"event": "slot", "name": "requested_slot", "value": "menu_quantity"},
                {"event": "slot", "name": "menu_quantity", "value": "두 개"}
            ]
        }))
        .unwrap();

        assert_eq!(
            tracker.slot_candidates(),
            vec![("menu_quantity".to_string(), json!("두 개"))]
        );
    }

    #[test]
    fn test_candidates_stop_at_last_non_slot_event() {
        let tracker: TrackerState = serde_json::from_value(json!({
            "events": [
                {"event": "user", "text": "생일이에요"},
                {"event": "slot", "name": "occasion", "value": "생일"},
                {"event": "action", "name": "action_menu_recommendation"},
                {"event": "slot", "name": "menu_name", "value": "프렌치 디너"}
            ]
        }))
        .unwrap();

        assert_eq!(
            tracker.slot_candidates(),
            vec![("menu_name".to_string(), json!("프렌치 디너"))]
        );
    }

    #[test]
    fn test_candidates_empty_when_tracker_ends_with_user() {
        let tracker: TrackerState = serde_json::from_value(json!({
            "events": [
                {"event": "slot", "name": "menu_name", "value": "프렌치 디너"},
                {"event": "user", "text": "두 개요"}
            ]
        }))
        .unwrap();

        assert!(tracker.slot_candidates().is_empty());
    }

    #[test]
    fn test_context_from_request() {
        let request: ActionRequest = serde_json::from_value(json!({
            "next_action": "validate_order_form",
            "domain": {"slots": {}},
            "version": "3.6.0",
            "tracker": {
                "sender_id": "abc",
                "active_loop": {"name": "order_form"},
                "slots": {"requested_slot": "delivery_date", "menu_name": "프렌치 디너"},
                "latest_message": {
                    "text": "내일 7시",
                    "intent": {"name": "inform", "confidence": 0.98},
                    "entities": [
                        {"entity": "date", "value": "내일", "start": 0, "end": 2},
                        {"entity": "time", "value": "7시"}
                    ]
                },
                "events": []
            }
        }))
        .unwrap();

        let ctx = request.context();
        assert_eq!(ctx.sender_id, "abc");
        assert_eq!(ctx.requested_slot.as_deref(), Some("delivery_date"));
        assert_eq!(ctx.turn.intent.as_deref(), Some("inform"));
        assert_eq!(ctx.turn.first_entity("time").as_deref(), Some("7시"));
        assert!(ctx.candidates.is_empty());
    }

    #[test]
    fn test_malformed_request() {
        let err = ActionRequest::from_slice(b"{not json").unwrap_err();
        assert!(matches!(err, ActionError::InvalidRequest { .. }));
    }
}
