//! UI Components
//!
//! Leptos pages and the pieces they are built from.

mod login_page;
mod dashboard;
mod project_form;
mod status_selector;
mod project_list;
mod delete_confirm_button;

pub use login_page::LoginPage;
pub use dashboard::DashboardPage;
pub use project_form::ProjectForm;
pub use status_selector::StatusSelector;
pub use project_list::ProjectList;
pub use delete_confirm_button::DeleteConfirmButton;
