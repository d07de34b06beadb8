//! Remote-write protocol and the seams to the transport.
//!
//! Every mutation is a single form-encoded POST to
//! `{resource}/items/{itemKey}`. Any 2xx status means the write was accepted;
//! anything else, or a transport failure, means it was rejected. There is no
//! retry and no timeout.

use serde::{Deserialize, Serialize};

use crate::model::{TodoItem, TodoListModel};

/// Error type for calls against the content repository.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RemoteError {
    /// Failed to encode the request body.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// The request never produced a response.
    #[error("Request error: {0}")]
    Request(String),

    /// The repository answered with a non-success status.
    #[error("HTTP {0}")]
    Status(u16),

    /// The response body could not be decoded.
    #[error("Deserialization error: {0}")]
    Deserialization(String),
}

/// Form fields written for an item node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemForm {
    #[serde(rename = "jcr:primaryType")]
    pub primary_type: String,
    pub name: String,
    pub done: bool,
    #[serde(rename = "done@TypeHint")]
    pub done_type_hint: String,
}

impl From<&TodoItem> for ItemForm {
    fn from(item: &TodoItem) -> Self {
        Self {
            primary_type: "nt:unstructured".to_owned(),
            name: item.name.clone(),
            done: item.done,
            done_type_hint: "boolean".to_owned(),
        }
    }
}

/// Encode the full field set of `item` as an urlencoded body.
pub fn encode_item_form(item: &TodoItem) -> Result<String, RemoteError> {
    serde_urlencoded::to_string(ItemForm::from(item))
        .map_err(|e| RemoteError::Serialization(e.to_string()))
}

/// Path of the node backing `item_key` below the list resource.
pub fn item_path(resource_path: &str, item_key: &str) -> String {
    format!("{}/items/{}", resource_path.trim_end_matches('/'), item_key)
}

/// Transport used by the command executor.
///
/// Implemented over `gloo-net` in the browser and by stubs in tests.
#[allow(async_fn_in_trait)]
pub trait ItemStore {
    /// POST the full field set of `item` below `resource_path`.
    async fn write_item(&self, resource_path: &str, item: &TodoItem) -> Result<(), RemoteError>;

    /// GET the `.model.json` export of `resource_path`.
    async fn fetch_model(&self, resource_path: &str) -> Result<TodoListModel, RemoteError>;
}

/// Blocking, user-facing error surface (an `alert()` in the browser).
pub trait Notifier {
    fn alert(&self, message: &str);
}
