//! mapsearch RPC Server — JSON-RPC over stdin/stdout for a map front-end.
//!
//! Protocol: one JSON object per line (newline-delimited JSON).
//! Request:  {"id":1, "method":"search.query", "params":{"query":"cafe"}}
//! Response: {"id":1, "result":[...]} or {"id":1, "error":"..."}

use mapsearch::app::App;
use mapsearch::logging::init_tracing;
use mapsearch::rpc_handler::handle_method;
use mapsearch::services::settings_engine::{SettingsEngine, SettingsEngineTrait};

use serde_json::{json, Value};
use tokio::io::{self, AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{error, info, warn};

async fn write_line(stdout: &mut io::Stdout, value: &Value) -> io::Result<()> {
    stdout.write_all(value.to_string().as_bytes()).await?;
    stdout.write_all(b"\n").await?;
    stdout.flush().await
}

#[tokio::main]
async fn main() {
    let mut engine = SettingsEngine::new(std::env::var("MAPSEARCH_CONFIG").ok());
    let mut settings = match engine.load() {
        Ok(s) => s,
        Err(e) => {
            eprintln!("failed to load settings, using defaults: {}", e);
            Default::default()
        }
    };
    settings.apply_env();
    init_tracing(&settings.log_filter);

    let app = match App::new(settings).await {
        Ok(app) => app,
        Err(e) => {
            error!(error = %e, "failed to initialize");
            std::process::exit(1);
        }
    };
    info!(config = engine.get_config_path(), "mapsearch rpc ready");

    let mut stdout = io::stdout();
    let ready = json!({"event": "ready", "version": env!("CARGO_PKG_VERSION")});
    if write_line(&mut stdout, &ready).await.is_err() {
        return;
    }

    let mut lines = BufReader::new(io::stdin()).lines();
    loop {
        let line = match lines.next_line().await {
            Ok(Some(l)) => l,
            Ok(None) => break,
            Err(e) => {
                warn!(error = %e, "stdin read failed");
                break;
            }
        };
        if line.trim().is_empty() {
            continue;
        }

        let response = match serde_json::from_str::<Value>(&line) {
            Ok(req) => {
                let id = req.get("id").cloned().unwrap_or(Value::Null);
                let method = req.get("method").and_then(|v| v.as_str()).unwrap_or("");
                let params = req.get("params").cloned().unwrap_or(json!({}));

                match handle_method(&app, method, &params).await {
                    Ok(val) => json!({"id": id, "result": val}),
                    Err(err) => json!({"id": id, "error": err}),
                }
            }
            Err(e) => json!({"id": null, "error": format!("parse error: {}", e)}),
        };

        if write_line(&mut stdout, &response).await.is_err() {
            break;
        }
    }

    if app.position.persist_camera().await {
        info!("camera position persisted on shutdown");
    }
}
