//! Shared state types for the frontend
//!
//! Pages receive `SharedState` via borrowing and return `AppAction`s instead
//! of mutating application state directly.

use crate::backend::{Mutation, MutationKind, QueryKey};
use crate::config::ConsoleConfig;
use crate::frontend::query_cache::QueryCache;
use crate::types::MqttProfile;

/// Top-level navigation targets shown in the sidebar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PageId {
    #[default]
    Dashboards,
    Gitops,
    Pipelines,
    Settings,
}

impl PageId {
    pub const ALL: [PageId; 4] = [
        PageId::Dashboards,
        PageId::Gitops,
        PageId::Pipelines,
        PageId::Settings,
    ];

    pub fn title(self) -> &'static str {
        match self {
            PageId::Dashboards => "Dashboard Hub",
            PageId::Gitops => "Gitops",
            PageId::Pipelines => "Pipelines",
            PageId::Settings => "Settings",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PageId::Dashboards => "Dashboards",
            PageId::Gitops => "Gitops",
            PageId::Pipelines => "Pipelines",
            PageId::Settings => "Settings",
        }
    }
}

/// How a mutation sent earlier turned out. Delivered to pages for one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MutationOutcome {
    pub kind: MutationKind,
    pub error: Option<String>,
}

impl MutationOutcome {
    pub fn succeeded(&self) -> bool {
        self.error.is_none()
    }
}

/// Shared state accessible by all pages (borrowed, not owned).
pub struct SharedState<'a> {
    /// Collections fetched from the backend
    pub cache: &'a QueryCache,

    /// Console settings (read-write by the settings page)
    pub config: &'a mut ConsoleConfig,

    /// Profile currently in effect, if any
    pub active_profile: Option<&'a MqttProfile>,

    /// Mutation results received this frame
    pub mutation_outcomes: &'a [MutationOutcome],
}

/// Actions that any page can emit
///
/// Pages return `Vec<AppAction>` instead of mutating state directly; the app
/// handles them centrally after rendering.
#[derive(Debug, Clone, PartialEq)]
pub enum AppAction {
    // Backend commands
    /// Fetch (or refetch) a collection
    Fetch(QueryKey),
    /// Send a create/update/delete to the backend
    Mutate(Mutation),

    // Profile
    /// Make the profile with this id active
    SelectProfile(String),
    /// Forget the stored active profile
    ClearProfile,

    // Navigation
    /// Switch to another page
    Navigate(PageId),

    // Settings
    /// Persist the current config to disk
    SaveConfig,

    // Notifications
    /// Remove a toast by queue index
    DismissNotification(usize),
}
