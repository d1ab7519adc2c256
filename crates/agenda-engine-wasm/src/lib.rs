//! WASM bindings for agenda-engine.
//!
//! Exposes agenda aggregation and the plain-text summary to JavaScript via
//! `wasm-bindgen`. Requests and results cross the boundary as JSON strings in
//! the shape of [`agenda_engine::AggregateRequest`] and
//! [`agenda_engine::ScheduleAggregationResult`].
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p agenda-engine-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target nodejs --out-dir packages/agenda-engine-js/wasm/ \
//!   target/wasm32-unknown-unknown/release/agenda_engine_wasm.wasm
//! ```

use agenda_engine::{AggregateRequest, ScheduleAggregationResult};
use chrono_tz::Tz;
use wasm_bindgen::prelude::*;

fn to_js_error(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// Parse and run a request, returning the result with its time zone.
fn run_request(request_json: &str) -> Result<(ScheduleAggregationResult, Tz), JsValue> {
    let request = AggregateRequest::from_json(request_json).map_err(to_js_error)?;
    let tz = request.time_zone().map_err(to_js_error)?;
    let result = request.run().map_err(to_js_error)?;
    Ok((result, tz))
}

/// Aggregate events and tasks into an agenda, conflicts and slot suggestions.
///
/// `request_json` is a JSON object with `events`, `tasks`, `filter`, `now`
/// (RFC 3339), `timeZone` (IANA name) and optional `dailyLoadCap` / `config`.
/// Returns a JSON string with `items`, `conflicts` and `suggestions`.
#[wasm_bindgen(js_name = "aggregate")]
pub fn aggregate(request_json: &str) -> Result<String, JsValue> {
    let (result, _) = run_request(request_json)?;

    serde_json::to_string(&result)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

/// Aggregate a request and render the plain-text summary in its time zone.
#[wasm_bindgen(js_name = "summarize")]
pub fn summarize(request_json: &str) -> Result<String, JsValue> {
    let (result, tz) = run_request(request_json)?;
    Ok(agenda_engine::render_summary(&result, tz))
}
