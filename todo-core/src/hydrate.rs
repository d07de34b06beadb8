//! Client-side hydration state machine.
//!
//! One pass per page load:
//!
//! ```text
//! Unhydrated --begin--> Loading --resolve(Ok)--> Hydrated(model)
//!                               --resolve(Err)--> Unhydrated
//! ```
//!
//! A failed fetch is logged and the page keeps its server-rendered markup.
//! There is no retry and no timeout.

use crate::list::TodoList;
use crate::model::TodoListModel;
use crate::remote::{ItemStore, RemoteError};

/// Suffix selecting the JSON export of a resource.
pub const MODEL_JSON_SUFFIX: &str = ".model.json";

/// `{resource_path}.model.json`
pub fn model_json_path(resource_path: &str) -> String {
    format!("{}{MODEL_JSON_SUFFIX}", resource_path.trim_end_matches('/'))
}

/// Parse the state embedded in the page.
pub fn read_embedded_state(json: &str) -> Result<TodoListModel, RemoteError> {
    serde_json::from_str(json).map_err(|e| RemoteError::Deserialization(e.to_string()))
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Hydration {
    #[default]
    Unhydrated,
    Loading,
    Hydrated(TodoListModel),
}

impl Hydration {
    /// Start the fetch. Only valid from `Unhydrated`; other states are kept.
    pub fn begin(self) -> Self {
        match self {
            Hydration::Unhydrated => Hydration::Loading,
            other => {
                tracing::debug!(state = ?other, "hydration already started");
                other
            }
        }
    }

    /// Settle the fetch started by [`Hydration::begin`].
    pub fn resolve(self, result: Result<TodoListModel, RemoteError>) -> Self {
        match (self, result) {
            (Hydration::Loading, Ok(model)) => Hydration::Hydrated(model),
            (Hydration::Loading, Err(e)) => {
                tracing::warn!(error = %e, "hydration fetch failed");
                Hydration::Unhydrated
            }
            (state, _) => {
                tracing::debug!(state = ?state, "unexpected hydration result ignored");
                state
            }
        }
    }

    /// Hydrate directly from embedded state, skipping the fetch.
    pub fn from_embedded(model: TodoListModel) -> Self {
        Hydration::Hydrated(model)
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Hydration::Loading)
    }

    pub fn model(&self) -> Option<&TodoListModel> {
        match self {
            Hydration::Hydrated(model) => Some(model),
            _ => None,
        }
    }

    /// The list to bind the component to, once hydrated.
    pub fn list(&self) -> Option<TodoList> {
        self.model().map(|model| TodoList::new(model.items.clone()))
    }
}

/// Run the fetch variant of hydration to completion.
pub async fn hydrate_from<S: ItemStore>(store: &S, resource_path: &str) -> Hydration {
    let state = Hydration::Unhydrated.begin();
    let result = store.fetch_model(resource_path).await;
    state.resolve(result)
}
