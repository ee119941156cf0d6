//! UI Components
//!
//! Reusable Leptos components and the routed views.

mod auth_view;
mod calendar_view;
mod charts_view;
mod confirm_delete;
mod field;
mod home_view;
mod map_view;
mod nav_bar;
mod users_view;

pub use auth_view::{LoginView, RegisterView};
pub use calendar_view::CalendarView;
pub use charts_view::ChartsView;
pub use confirm_delete::ConfirmDelete;
pub use field::TextField;
pub use home_view::HomeView;
pub use map_view::MapView;
pub use nav_bar::NavBar;
pub use users_view::UsersView;
