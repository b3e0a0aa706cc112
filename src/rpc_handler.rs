//! RPC method handler for the bookmarks JSON-RPC protocol.
//!
//! Kept apart from `rpc_server.rs` so it can be unit-tested without stdin/stdout.

use serde_json::{json, Value};

use crate::app::App;
use crate::managers::bookmark_manager::BookmarksStorage;
use crate::services::settings_engine::SettingsEngineTrait;
use crate::types::action::Action;
use crate::types::bookmark::BookmarkRoot;

/// Screen snapshot returned by the state and dispatch methods.
///
/// `events` holds the navigation requests produced since the previous snapshot.
fn snapshot(app: &App) -> Result<Value, String> {
    let state = app.state();
    Ok(json!({
        "state": serde_json::to_value(state).map_err(|e| e.to_string())?,
        "screen": serde_json::to_value(state.current_screen()).map_err(|e| e.to_string())?,
        "selection_mode": state.is_in_selection_mode(),
        "visible_items": serde_json::to_value(state.visible_items()).map_err(|e| e.to_string())?,
        "events": serde_json::to_value(app.drain_navigation()).map_err(|e| e.to_string())?,
    }))
}

fn str_param<'a>(params: &'a Value, name: &str) -> Result<&'a str, String> {
    params
        .get(name)
        .and_then(|v| v.as_str())
        .ok_or_else(|| format!("missing {}", name))
}

/// Dispatch a JSON-RPC method call.
///
/// Returns `Ok(Value)` on success or `Err(String)` with an error message.
pub fn handle_method(app: &mut App, method: &str, params: &Value) -> Result<Value, String> {
    match method {
        "ping" => Ok(json!({"pong": true})),

        // ─── Screen ───
        "bookmarks.state" => snapshot(app),
        "bookmarks.dispatch" => {
            let raw = params.get("action").cloned().ok_or("missing action")?;
            let action: Action =
                serde_json::from_value(raw).map_err(|e| format!("invalid action: {}", e))?;
            app.store.dispatch(action);
            snapshot(app)
        }

        // ─── Storage ───
        "bookmarks.add" => {
            let url = str_param(params, "url")?;
            let title = str_param(params, "title")?;
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err("invalid url: must start with http:// or https://".to_string());
            }
            let parent = match params.get("parent_guid").and_then(|v| v.as_str()) {
                Some(guid) => guid.to_string(),
                None if app.state().current_folder.guid.is_empty() => {
                    BookmarkRoot::Mobile.guid().to_string()
                }
                None => app.state().current_folder.guid.clone(),
            };
            let guid = app
                .storage
                .borrow_mut()
                .add_bookmark(&parent, url, title)
                .map_err(|e| e.to_string())?;
            app.refresh();
            Ok(json!({"guid": guid, "url": url, "title": title, "parent_guid": parent}))
        }
        "bookmarks.move" => {
            let parent = str_param(params, "parent_guid")?;
            let guids: Vec<String> = params
                .get("guids")
                .and_then(|v| v.as_array())
                .ok_or("missing guids")?
                .iter()
                .map(|v| v.as_str().map(str::to_string).ok_or("guids must be strings"))
                .collect::<Result<_, _>>()?;
            app.storage
                .borrow_mut()
                .move_items(&guids, parent)
                .map_err(|e| e.to_string())?;
            app.refresh();
            Ok(json!({"ok": true}))
        }

        // ─── Settings ───
        "settings.get" => {
            let settings = app.settings_engine.get_settings();
            serde_json::to_value(settings).map_err(|e| e.to_string())
        }
        "settings.set" => {
            let key = str_param(params, "key")?;
            let value = params.get("value").cloned().ok_or("missing value")?;
            app.settings_engine
                .set_value(key, value)
                .map_err(|e| e.to_string())?;
            Ok(json!({"ok": true}))
        }

        _ => Err(format!("unknown method: {}", method)),
    }
}
