//! Browser transport for the repository protocol.
//!
//! Writes are single form-encoded POSTs and the model is a single GET; neither
//! is retried and neither carries a timeout.

use gloo_net::http::Request;
use todo_core::hydrate::model_json_path;
use todo_core::{ItemStore, Notifier, RemoteError, TodoItem, TodoListModel, encode_item_form, item_path};

/// [`ItemStore`] over `fetch`, sending same-origin credentials.
#[derive(Debug, Clone, Copy, Default)]
pub struct HttpItemStore;

impl ItemStore for HttpItemStore {
    async fn write_item(&self, resource_path: &str, item: &TodoItem) -> Result<(), RemoteError> {
        let path = item_path(resource_path, &item.item_key);
        let body = encode_item_form(item)?;

        let response = Request::post(&path)
            .credentials(web_sys::RequestCredentials::SameOrigin)
            .header("Content-Type", "application/x-www-form-urlencoded")
            .body(body)
            .map_err(|e| RemoteError::Serialization(e.to_string()))?
            .send()
            .await
            .map_err(|e| RemoteError::Request(e.to_string()))?;

        if !response.ok() {
            return Err(RemoteError::Status(response.status()));
        }
        tracing::debug!(%path, "item written");
        Ok(())
    }

    async fn fetch_model(&self, resource_path: &str) -> Result<TodoListModel, RemoteError> {
        let path = model_json_path(resource_path);

        let response = Request::get(&path)
            .credentials(web_sys::RequestCredentials::SameOrigin)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| RemoteError::Request(e.to_string()))?;

        if !response.ok() {
            return Err(RemoteError::Status(response.status()));
        }

        response
            .json()
            .await
            .map_err(|e| RemoteError::Deserialization(e.to_string()))
    }
}

/// [`Notifier`] using the blocking `window.alert()`.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlertNotifier;

impl Notifier for AlertNotifier {
    fn alert(&self, message: &str) {
        let shown = web_sys::window().map(|window| window.alert_with_message(message));
        if !matches!(shown, Some(Ok(()))) {
            tracing::warn!(%message, "could not show alert");
        }
    }
}
