//! Bookmarks RPC server: JSON-RPC over stdin/stdout for a host UI.
//!
//! Protocol: one JSON object per line (newline-delimited JSON).
//! Request:  {"id":1, "method":"bookmarks.dispatch", "params":{"action":"back_clicked"}}
//! Response: {"id":1, "result":{...}} or {"id":1, "error":"..."}
//!
//! Logs go to stderr; stdout carries only protocol lines.

use std::error::Error;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::time::Instant;

use bookmarks_screen::app::App;
use bookmarks_screen::logging;
use bookmarks_screen::platform;
use bookmarks_screen::rpc_handler::handle_method;
use bookmarks_screen::services::settings_engine::{SettingsEngine, SettingsEngineTrait};

use serde_json::{json, Value};

/// Fixed one-second window rate limiter.
struct RateLimiter {
    window_start: Instant,
    request_count: u32,
    max_per_second: u32,
}

impl RateLimiter {
    fn new(max_per_second: u32) -> Self {
        Self { window_start: Instant::now(), request_count: 0, max_per_second }
    }

    /// Returns true if the request is allowed, false if rate-limited.
    fn check(&mut self) -> bool {
        if self.window_start.elapsed().as_secs() >= 1 {
            self.window_start = Instant::now();
            self.request_count = 0;
        }
        self.request_count += 1;
        self.request_count <= self.max_per_second
    }
}

fn respond(out: &mut impl Write, response: &Value) -> io::Result<()> {
    writeln!(out, "{}", response)?;
    out.flush()
}

fn main() -> Result<(), Box<dyn Error>> {
    let config_path = std::env::var_os("BOOKMARKS_CONFIG").map(PathBuf::from);
    let mut settings_engine = SettingsEngine::new(config_path);
    let settings = settings_engine.load()?;

    logging::init(&settings.logging.filter);

    let data_dir = std::env::var_os("BOOKMARKS_DATA_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(platform::get_data_dir);
    std::fs::create_dir_all(&data_dir)?;
    let db_path = settings_engine.database_path(&data_dir);
    tracing::info!(db = %db_path.display(), "opening bookmarks database");

    let mut app = App::new(&db_path, settings_engine)?;
    app.startup();

    let stdout = io::stdout();
    let mut out = stdout.lock();
    respond(&mut out, &json!({"event":"ready","version":env!("CARGO_PKG_VERSION")}))?;

    let mut rate_limiter = RateLimiter::new(settings.rpc.max_requests_per_second);

    for line in io::stdin().lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(e) => {
                tracing::warn!(error = %e, "stdin closed");
                break;
            }
        };
        if line.trim().is_empty() { continue; }

        let req: Value = match serde_json::from_str(&line) {
            Ok(v) => v,
            Err(e) => {
                respond(&mut out, &json!({"id":null,"error":format!("parse error: {}",e)}))?;
                continue;
            }
        };

        let id = req.get("id").cloned().unwrap_or(Value::Null);

        if !rate_limiter.check() {
            tracing::warn!("rate limit exceeded");
            respond(&mut out, &json!({"id": id, "error": "rate limit exceeded"}))?;
            continue;
        }

        let method = req.get("method").and_then(|v| v.as_str()).unwrap_or("");
        let params = req.get("params").cloned().unwrap_or(json!({}));

        let response = match handle_method(&mut app, method, &params) {
            Ok(val) => json!({"id": id, "result": val}),
            Err(err) => {
                tracing::debug!(method, error = %err, "request failed");
                json!({"id": id, "error": err})
            }
        };
        respond(&mut out, &response)?;
    }

    Ok(())
}
