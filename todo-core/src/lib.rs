//! Shared todo-list logic for the server and the browser.
//!
//! This crate is target-independent. It holds:
//! - the data model exchanged as `.model.json`
//! - the list state and its pure transition function
//! - the command executor that performs remote writes
//! - the view model and its HTML markup
//! - the hydration state machine
//!
//! # Example
//!
//! ```ignore
//! use todo_core::{Action, TodoList};
//!
//! let list = TodoList::placeholder();
//! let (list, command) = list.update(Action::Add("Buy milk".into()));
//! // `command` is a pending write; the list is unchanged until it is acknowledged.
//! ```

pub mod executor;
pub mod hydrate;
pub mod keys;
pub mod list;
pub mod markup;
pub mod model;
pub mod remote;
pub mod view;

pub use executor::{Context, TodoListComponent, execute};
pub use hydrate::{Hydration, model_json_path};
pub use keys::KeySequence;
pub use list::{Action, Command, PendingWrite, TodoList};
pub use model::{DEFAULT_TITLE, TodoItem, TodoListModel};
pub use remote::{ItemForm, ItemStore, Notifier, RemoteError, encode_item_form, item_path};
pub use view::{InputView, ListView, RowView, render};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::{
        Action, Command, Context, Hydration, ItemStore, Notifier, RemoteError, TodoItem,
        TodoList, TodoListComponent, TodoListModel, execute, render,
    };
}
