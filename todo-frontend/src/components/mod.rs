mod input;
mod list;

pub use input::todo_input;
pub use list::todo_list;
