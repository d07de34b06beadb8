//! Data model shared between the repository export and the list component.

use serde::{Deserialize, Serialize};

/// Title used when the list node carries no `jcr:title`.
pub const DEFAULT_TITLE: &str = "Todo List";

/// A single todo entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoItem {
    pub name: String,
    #[serde(default)]
    pub done: bool,
    pub item_key: String,
    /// Repository path of the item node, present in `.model.json` exports.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl TodoItem {
    /// Create a new, not yet done item.
    pub fn new(name: impl Into<String>, item_key: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            done: false,
            item_key: item_key.into(),
            path: None,
        }
    }

    /// Builder-style setter for the `done` flag.
    pub fn with_done(mut self, done: bool) -> Self {
        self.done = done;
        self
    }
}

/// The `.model.json` representation of a todo list page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TodoListModel {
    pub title: String,
    pub items: Vec<TodoItem>,
}

impl Default for TodoListModel {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_owned(),
            items: Vec::new(),
        }
    }
}

impl TodoListModel {
    pub fn new(title: impl Into<String>, items: Vec<TodoItem>) -> Self {
        Self {
            title: title.into(),
            items,
        }
    }
}

/// The hard-coded list shown before any state is available.
pub fn placeholder_items() -> Vec<TodoItem> {
    vec![
        TodoItem::new("Item 1", "1"),
        TodoItem::new("Item 2", "2").with_done(true),
        TodoItem::new("Item 3", "3"),
    ]
}
