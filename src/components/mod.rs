//! UI Components
//!
//! Reusable Leptos components.

mod error_banner;
mod navbar;
mod new_todo_form;
mod sign_in_form;
mod todo_list;
mod todo_row;

pub use error_banner::ErrorBanner;
pub use navbar::Navbar;
pub use new_todo_form::NewTodoForm;
pub use sign_in_form::SignInForm;
pub use todo_list::TodoList;
pub use todo_row::TodoRow;
