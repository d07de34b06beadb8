//! Frontend state, independent of egui.

use todo_core::{
    Action, Command, Hydration, ListView, RemoteError, TodoList, TodoListModel, render,
};

/// Messages delivered back to the UI thread by spawned tasks.
#[derive(Debug)]
pub enum Response {
    Model(Result<TodoListModel, RemoteError>),
    Action(Action),
}

/// Everything the todo page shows.
#[derive(Debug)]
pub struct TodoAppState {
    pub title: String,
    pub resource_path: String,
    pub new_item_text: String,
    hydration: Hydration,
    list: TodoList,
}

impl TodoAppState {
    /// State before hydration: the demo list under the page title.
    pub fn new(title: impl Into<String>, resource_path: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            resource_path: resource_path.into(),
            new_item_text: String::new(),
            hydration: Hydration::Unhydrated,
            list: TodoList::placeholder(),
        }
    }

    /// State hydrated from the model embedded in the page.
    pub fn from_embedded(resource_path: impl Into<String>, model: TodoListModel) -> Self {
        let list = TodoList::new(model.items.clone());
        Self {
            title: model.title.clone(),
            resource_path: resource_path.into(),
            new_item_text: String::new(),
            hydration: Hydration::from_embedded(model),
            list,
        }
    }

    pub fn hydration(&self) -> &Hydration {
        &self.hydration
    }

    pub fn list(&self) -> &TodoList {
        &self.list
    }

    pub fn view(&self) -> ListView {
        render(&self.list)
    }

    /// Mark the `.model.json` fetch as started. Returns `false` if it should not run.
    pub fn begin_fetch(&mut self) -> bool {
        let state = std::mem::take(&mut self.hydration).begin();
        let started = state.is_loading();
        self.hydration = state;
        started
    }

    fn finish_fetch(&mut self, result: Result<TodoListModel, RemoteError>) {
        self.hydration = std::mem::take(&mut self.hydration).resolve(result);
        if let Some(model) = self.hydration.model() {
            self.title = model.title.clone();
            self.list.replace_items(model.items.clone());
        }
    }

    /// Feed an action through the list transition.
    pub fn dispatch(&mut self, action: Action) -> Option<Command> {
        let (list, command) = std::mem::take(&mut self.list).update(action);
        self.list = list;
        command
    }

    /// Submit the input field, clearing it.
    pub fn submit_input(&mut self) -> Option<Command> {
        let raw = std::mem::take(&mut self.new_item_text);
        self.dispatch(Action::Add(raw))
    }

    /// Apply a message from a finished task.
    pub fn handle(&mut self, response: Response) -> Option<Command> {
        match response {
            Response::Model(result) => {
                self.finish_fetch(result);
                None
            }
            Response::Action(action) => self.dispatch(action),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use todo_core::{PendingWrite, TodoItem};

    fn write_of(command: Option<Command>) -> PendingWrite {
        match command {
            Some(Command::Write(write)) => write,
            other => panic!("expected a write, got {other:?}"),
        }
    }

    #[test]
    fn starts_with_placeholder_list() {
        let state = TodoAppState::new("Todo List", "/content/todo");
        assert_eq!(state.view().rows.len(), 3);
        assert_eq!(state.hydration(), &Hydration::Unhydrated);
    }

    #[test]
    fn embedded_model_hydrates_immediately() {
        let model = TodoListModel::new("Mine", vec![TodoItem::new("a", "1")]);
        let state = TodoAppState::from_embedded("/content/todo", model);
        assert_eq!(state.title, "Mine");
        assert_eq!(state.list().len(), 1);
        assert!(state.hydration().model().is_some());
    }

    #[test]
    fn fetched_empty_model_renders_only_input() {
        let mut state = TodoAppState::new("Todo List", "/content/todo");
        assert!(state.begin_fetch());
        assert!(!state.begin_fetch());

        state.handle(Response::Model(Ok(TodoListModel::new("My List", Vec::new()))));
        assert_eq!(state.title, "My List");
        let view = state.view();
        assert!(view.rows.is_empty());
        assert_eq!(view.input.submit_label, "Add");
    }

    #[test]
    fn failed_fetch_keeps_rendered_list() {
        let mut state = TodoAppState::new("Todo List", "/content/todo");
        state.begin_fetch();
        state.handle(Response::Model(Err(RemoteError::Status(500))));
        assert_eq!(state.hydration(), &Hydration::Unhydrated);
        assert_eq!(state.list().len(), 3);
    }

    #[test]
    fn submit_clears_input_and_waits_for_ack() {
        let model = TodoListModel::new("T", vec![TodoItem::new("Item 1", "1")]);
        let mut state = TodoAppState::from_embedded("/content/todo", model);
        state.new_item_text = "Buy milk".into();

        let write = write_of(state.submit_input());
        assert!(state.new_item_text.is_empty());
        assert_eq!(state.list().len(), 1);

        let follow_up = state.handle(Response::Action(Action::Acknowledged(write)));
        assert!(follow_up.is_none());
        assert_eq!(state.list().items()[1], TodoItem::new("Buy milk", "item2"));
    }

    #[test]
    fn adds_pending_across_fetch_keep_distinct_keys() {
        let mut state = TodoAppState::new("Todo List", "/content/todo");
        assert!(state.begin_fetch());

        state.new_item_text = "first".into();
        let first = write_of(state.submit_input());

        let fetched = vec![
            TodoItem::new("a", "1"),
            TodoItem::new("b", "2"),
            TodoItem::new("c", "3"),
        ];
        state.handle(Response::Model(Ok(TodoListModel::new("Fetched", fetched))));

        state.new_item_text = "second".into();
        let second = write_of(state.submit_input());
        assert_ne!(first.item().item_key, second.item().item_key);

        state.handle(Response::Action(Action::Acknowledged(first)));
        state.handle(Response::Action(Action::Acknowledged(second)));
        let names: Vec<_> = state.list().items().iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, ["a", "b", "c", "first", "second"]);
    }

    #[test]
    fn rejection_produces_alert() {
        let mut state = TodoAppState::new("Todo List", "/content/todo");
        let write = write_of(state.dispatch(Action::Toggle("1".into())));
        let command = state.handle(Response::Action(Action::Rejected(write, "HTTP 403".into())));
        assert!(matches!(command, Some(Command::Alert(_))));
        assert!(!state.list().get("1").unwrap().done);
    }
}
