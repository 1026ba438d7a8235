//! RPC method handler for the mapsearch JSON-RPC protocol.
//!
//! Kept apart from `rpc_server.rs` so it can be unit-tested independently.
//! `handle_method` dispatches a method call to the coordinators on [`App`].

use serde_json::{json, Value};

use crate::app::App;
use crate::types::location::Location;

fn str_param<'a>(params: &'a Value, key: &str) -> Result<&'a str, String> {
    params
        .get(key)
        .and_then(|v| v.as_str())
        .ok_or_else(|| format!("missing {}", key))
}

fn coordinate_params(params: &Value) -> Result<(f64, f64), String> {
    let latitude = params
        .get("latitude")
        .and_then(|v| v.as_f64())
        .ok_or("missing latitude")?;
    let longitude = params
        .get("longitude")
        .and_then(|v| v.as_f64())
        .ok_or("missing longitude")?;
    if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
        return Err("invalid coordinate: latitude must be within ±90, longitude within ±180".to_string());
    }
    Ok((latitude, longitude))
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<Value, String> {
    serde_json::to_value(value).map_err(|e| e.to_string())
}

/// Dispatch a JSON-RPC method call to the appropriate coordinator.
///
/// Returns `Ok(Value)` on success or `Err(String)` with an error message.
/// Store and provider failures are absorbed by the coordinators, so errors
/// here are limited to bad requests.
pub async fn handle_method(app: &App, method: &str, params: &Value) -> Result<Value, String> {
    match method {
        "ping" => Ok(json!({"pong": true})),

        // ─── Search ───
        "search.query" => {
            let query = str_param(params, "query")?;
            let results = app.search.set_query(query).await;
            to_json(&results)
        }
        "search.results" => Ok(json!({
            "query": app.search.current_query(),
            "results": to_json(&app.search.current_results())?,
        })),
        "search.select" => {
            let raw = params.get("location").cloned().ok_or("missing location")?;
            let location: Location =
                serde_json::from_value(raw).map_err(|e| format!("invalid location: {}", e))?;
            app.search.select_result(location).await;
            Ok(json!({"ok": true}))
        }
        "search.selectHistory" => {
            let name = str_param(params, "name")?;
            let results = app.search.select_from_history(name).await;
            to_json(&results)
        }

        // ─── History ───
        "history.list" => to_json(&app.search.current_history()),
        "history.remove" => {
            let name = str_param(params, "name")?;
            app.search.remove_history(name).await;
            Ok(json!({"ok": true}))
        }
        "history.clear" => {
            app.search.clear_history().await;
            Ok(json!({"ok": true}))
        }

        // ─── Marker ───
        "marker.next" => match app.search.try_next_marker_selection() {
            Some(location) => to_json(&location),
            None => Ok(Value::Null),
        },

        // ─── Position ───
        "position.save" => {
            let (latitude, longitude) = coordinate_params(params)?;
            let saved = app.position.save_last_position(latitude, longitude).await;
            Ok(json!({"ok": saved}))
        }
        "position.load" => {
            let (position, is_default) = app.position.resolve_last_position().await;
            Ok(json!({
                "latitude": position.latitude,
                "longitude": position.longitude,
                "is_default": is_default,
            }))
        }
        "position.camera" => {
            if params.get("latitude").is_some() || params.get("longitude").is_some() {
                let (latitude, longitude) = coordinate_params(params)?;
                app.position.update_camera(latitude, longitude);
            }
            to_json(&app.position.camera_position())
        }
        "position.persist" => {
            let saved = app.position.persist_camera().await;
            Ok(json!({"ok": saved}))
        }

        _ => Err(format!("unknown method: {}", method)),
    }
}
