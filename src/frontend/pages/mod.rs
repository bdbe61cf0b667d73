//! Page modules for the frontend
//!
//! Each page implements the Page trait, receiving shared state
//! via context and returning actions instead of mutating directly.
//!
//! This design enables:
//! - Clear dependency injection through `SharedState`
//! - Pages that only read the query cache and never talk to the backend
//! - Centralized action handling in the main app

mod dashboards;
mod gitops;
mod pipelines;
mod settings;

pub use dashboards::{DashboardsPage, DashboardsPageState};
pub use gitops::{GitopsPage, GitopsPageState};
pub use pipelines::{PipelinesPage, PipelinesPageState};
pub use settings::{SettingsPage, SettingsPageState};

use crate::frontend::state::{AppAction, SharedState};
use egui::Context;

/// Trait for page components
///
/// Pages receive shared state via `SharedState` and return actions
/// instead of mutating the main app directly. This pattern is similar
/// to the Dialog trait but for full-page components.
///
/// # Example
///
/// ```ignore
/// #[derive(Default)]
/// pub struct MyPageState {
///     filter: String,
/// }
///
/// pub struct MyPage;
///
/// impl Page for MyPage {
///     type State = MyPageState;
///
///     fn render(
///         state: &mut Self::State,
///         shared: &mut SharedState<'_>,
///         ctx: &Context,
///     ) -> Vec<AppAction> {
///         let mut actions = Vec::new();
///
///         egui::CentralPanel::default().show(ctx, |ui| {
///             if ui.button("Refresh").clicked() {
///                 actions.push(AppAction::Fetch(QueryKey::Gitops));
///             }
///         });
///
///         actions
///     }
/// }
/// ```
pub trait Page {
    /// Page-specific state (tables, dialogs, canvas view)
    ///
    /// This state is owned by the main app and passed to the page
    /// during rendering. It persists across frames.
    type State: Default;

    /// Render the page and return any actions to perform
    ///
    /// Returns a vector of actions that the main app should handle.
    /// Actions are processed after the page finishes rendering.
    fn render(
        state: &mut Self::State,
        shared: &mut SharedState<'_>,
        ctx: &Context,
    ) -> Vec<AppAction>;
}
