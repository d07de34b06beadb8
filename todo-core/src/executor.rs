//! Command execution against an explicit context.

use crate::list::{Action, Command, TodoList};
use crate::remote::{ItemStore, Notifier};
use crate::view::{ListView, render};

/// Everything a command needs from the host environment.
#[derive(Debug, Clone)]
pub struct Context<S, N> {
    /// Path of the list resource the component is bound to.
    pub resource_path: String,
    pub store: S,
    pub notifier: N,
}

impl<S, N> Context<S, N> {
    pub fn new(resource_path: impl Into<String>, store: S, notifier: N) -> Self {
        Self {
            resource_path: resource_path.into(),
            store,
            notifier,
        }
    }
}

/// Run `command`, returning the action that reports its outcome.
pub async fn execute<S: ItemStore, N: Notifier>(
    command: Command,
    ctx: &Context<S, N>,
) -> Option<Action> {
    match command {
        Command::Write(write) => {
            let item = write.item();
            match ctx.store.write_item(&ctx.resource_path, item).await {
                Ok(()) => {
                    tracing::debug!(key = %item.item_key, "write acknowledged");
                    Some(Action::Acknowledged(write))
                }
                Err(e) => {
                    tracing::error!(key = %item.item_key, error = %e, "write rejected");
                    Some(Action::Rejected(write, e.to_string()))
                }
            }
        }
        Command::Alert(message) => {
            tracing::error!("{message}");
            ctx.notifier.alert(&message);
            None
        }
    }
}

/// A list bound to a context, processing one user action at a time.
pub struct TodoListComponent<S, N> {
    list: TodoList,
    ctx: Context<S, N>,
}

impl<S: ItemStore, N: Notifier> TodoListComponent<S, N> {
    pub fn new(list: TodoList, ctx: Context<S, N>) -> Self {
        Self { list, ctx }
    }

    pub fn list(&self) -> &TodoList {
        &self.list
    }

    pub fn context(&self) -> &Context<S, N> {
        &self.ctx
    }

    pub fn view(&self) -> ListView {
        render(&self.list)
    }

    /// Submit `raw` as a new item. Returns `true` if the list changed.
    pub async fn add(&mut self, raw: &str) -> bool {
        self.dispatch(Action::Add(raw.to_owned())).await
    }

    /// Toggle the item with `item_key`. Returns `true` if the list changed.
    pub async fn toggle(&mut self, item_key: &str) -> bool {
        self.dispatch(Action::Toggle(item_key.to_owned())).await
    }

    /// Feed `action` and every follow-up action through the transition function.
    pub async fn dispatch(&mut self, action: Action) -> bool {
        let mut changed = false;
        let mut next = Some(action);
        while let Some(action) = next.take() {
            let before = self.list.clone();
            let (list, command) = std::mem::take(&mut self.list).update(action);
            changed |= list.items() != before.items();
            self.list = list;
            if let Some(command) = command {
                next = execute(command, &self.ctx).await;
            }
        }
        changed
    }
}
