//! Frontend module for egui UI
//!
//! This module provides the main UI components using eframe/egui.
//! It receives query results from the backend worker through crossbeam
//! channels and renders them as pages.
//!
//! # Architecture
//!
//! The app owns a [`QueryCache`] filled from `BackendMessage`s. Pages read
//! the cache and return [`AppAction`]s; the app turns those into backend
//! commands after rendering. Mutation results come back as toasts and as
//! per-frame [`MutationOutcome`]s that close or annotate the open dialog.
//!
//! # Submodules
//!
//! - `pages` - Dashboard hub, gitops, pipelines and settings pages
//! - `dialogs` - Modal forms and confirmations
//! - `data_table` - egui rendering of a table controller
//! - `query_cache` - Loaded collections with generation counters

pub mod data_table;
pub mod dialogs;
pub mod notifications;
pub mod pages;
pub mod query_cache;
pub mod state;
pub mod status_bar;
pub mod title_bar;

pub use notifications::{Notification, NotificationLevel, Notifications};
pub use query_cache::{Cached, QueryCache};
pub use state::{AppAction, MutationOutcome, PageId, SharedState};

use std::time::{Duration, Instant};

use egui::RichText;

use crate::backend::{ApiBridge, BackendMessage, QueryKey};
use crate::config::ConsoleConfig;
use crate::profile::{ActiveProfile, ProfileStore};
use pages::{
    DashboardsPage, DashboardsPageState, GitopsPage, GitopsPageState, Page, PipelinesPage,
    PipelinesPageState, SettingsPage, SettingsPageState,
};
use status_bar::{render_status_bar, StatusBarContext};

/// Main application state for the console
pub struct ConsoleApp {
    // === Communication ===
    bridge: ApiBridge,

    // === Shared State ===
    config: ConsoleConfig,
    cache: QueryCache,
    active_profile: ActiveProfile<Box<dyn ProfileStore>>,
    notifications: Notifications,
    /// Outcomes received since the last frame
    mutation_outcomes: Vec<MutationOutcome>,

    // === Pages ===
    current_page: PageId,
    dashboards: DashboardsPageState,
    gitops: GitopsPageState,
    pipelines: PipelinesPageState,
    settings: SettingsPageState,
}

impl ConsoleApp {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        bridge: ApiBridge,
        config: ConsoleConfig,
        active_profile: ActiveProfile<Box<dyn ProfileStore>>,
    ) -> Self {
        let visuals = if config.dark_mode {
            egui::Visuals::dark()
        } else {
            egui::Visuals::light()
        };
        cc.egui_ctx.set_visuals(visuals);

        Self::with_bridge(bridge, config, active_profile)
    }

    /// Build the app state without an egui context.
    pub fn with_bridge(
        bridge: ApiBridge,
        config: ConsoleConfig,
        active_profile: ActiveProfile<Box<dyn ProfileStore>>,
    ) -> Self {
        let notifications = Notifications::new(config.notification_ttl());
        let mut app = Self {
            bridge,
            config,
            cache: QueryCache::new(),
            active_profile,
            notifications,
            mutation_outcomes: Vec::new(),
            current_page: PageId::default(),
            dashboards: DashboardsPageState::default(),
            gitops: GitopsPageState::default(),
            pipelines: PipelinesPageState::default(),
            settings: SettingsPageState::default(),
        };

        app.fetch(QueryKey::MqttProfiles);
        app.fetch(QueryKey::DashboardEntries);
        app
    }

    pub fn cache(&self) -> &QueryCache {
        &self.cache
    }

    pub fn notifications(&self) -> &Notifications {
        &self.notifications
    }

    pub fn current_page(&self) -> PageId {
        self.current_page
    }

    pub fn config(&self) -> &ConsoleConfig {
        &self.config
    }

    fn fetch(&mut self, key: QueryKey) {
        if self.cache.is_loading(&key) {
            return;
        }
        tracing::debug!("Fetching {}", key);
        if self.bridge.fetch(key.clone()) {
            self.cache.mark_loading(key);
        } else {
            tracing::error!("Backend unavailable, cannot fetch {}", key);
            self.cache.fail(key, "Backend unavailable".into());
        }
    }

    /// Apply every pending backend message. Returns true if any arrived.
    pub fn process_backend_messages(&mut self) -> bool {
        let messages = self.bridge.drain();
        let had_messages = !messages.is_empty();

        for msg in messages {
            match msg {
                BackendMessage::Loaded(data) => {
                    tracing::debug!("Loaded {}", data.key());
                    self.cache.store(data);
                }
                BackendMessage::FetchFailed { key, error } => {
                    tracing::warn!("Fetching {} failed: {}", key, error);
                    self.notifications
                        .push_error(format!("Failed to load {}: {}", key, error));
                    self.cache.fail(key, error);
                }
                BackendMessage::MutationSucceeded(kind) => {
                    self.notifications.push_success(kind.success_message());
                    self.mutation_outcomes.push(MutationOutcome { kind, error: None });
                }
                BackendMessage::MutationFailed { kind, error } => {
                    tracing::warn!("{}: {}", kind.failure_message(), error);
                    self.notifications.push_error(kind.failure_message());
                    self.mutation_outcomes.push(MutationOutcome {
                        kind,
                        error: Some(error),
                    });
                }
                BackendMessage::Invalidated(key) => {
                    self.cache.invalidate(key);
                }
                BackendMessage::Shutdown => {
                    tracing::info!("Backend shutdown received");
                }
            }
        }

        for key in self.cache.stale_keys() {
            self.fetch(key);
        }

        had_messages
    }

    pub fn handle_action(&mut self, action: AppAction) {
        match action {
            AppAction::Fetch(key) => self.fetch(key),
            AppAction::Mutate(mutation) => {
                tracing::info!("Sending {:?}", mutation.kind());
                if !self.bridge.mutate(mutation.clone()) {
                    let kind = mutation.kind();
                    self.notifications.push_error(kind.failure_message());
                    self.mutation_outcomes.push(MutationOutcome {
                        kind,
                        error: Some("Backend unavailable".into()),
                    });
                }
            }
            AppAction::SelectProfile(id) => {
                let profiles = self.cache.mqtt_profile_list().to_vec();
                if let Err(e) = self.active_profile.select(&id, &profiles) {
                    tracing::error!("Failed to store active profile: {}", e);
                    self.notifications
                        .push_error(format!("Failed to store active profile: {}", e));
                }
            }
            AppAction::ClearProfile => {
                if let Err(e) = self.active_profile.clear() {
                    tracing::error!("Failed to clear active profile: {}", e);
                    self.notifications
                        .push_error(format!("Failed to clear active profile: {}", e));
                }
            }
            AppAction::Navigate(page) => {
                tracing::debug!("Navigate to {:?}", page);
                self.current_page = page;
            }
            AppAction::SaveConfig => {
                self.notifications.set_ttl(self.config.notification_ttl());
                match self.config.save() {
                    Ok(()) => self.notifications.push_info("Settings saved"),
                    Err(e) => {
                        tracing::error!("Failed to save config: {}", e);
                        self.notifications
                            .push_error(format!("Failed to save settings: {}", e));
                    }
                }
            }
            AppAction::DismissNotification(index) => self.notifications.dismiss(index),
        }
    }

    fn render_sidebar(&mut self, ctx: &egui::Context) -> Vec<AppAction> {
        let mut actions = Vec::new();
        egui::SidePanel::left("navigation")
            .resizable(false)
            .exact_width(150.0)
            .show(ctx, |ui| {
                ui.add_space(8.0);
                ui.label(RichText::new("Gitops Console").strong());
                ui.separator();
                for page in PageId::ALL {
                    if ui
                        .selectable_label(self.current_page == page, page.label())
                        .clicked()
                    {
                        actions.push(AppAction::Navigate(page));
                    }
                }
            });
        actions
    }

    fn render_page(&mut self, ctx: &egui::Context) -> Vec<AppAction> {
        let profiles = self.cache.mqtt_profile_list();
        let mut shared = SharedState {
            cache: &self.cache,
            config: &mut self.config,
            active_profile: self.active_profile.effective(profiles),
            mutation_outcomes: &self.mutation_outcomes,
        };

        match self.current_page {
            PageId::Dashboards => DashboardsPage::render(&mut self.dashboards, &mut shared, ctx),
            PageId::Gitops => GitopsPage::render(&mut self.gitops, &mut shared, ctx),
            PageId::Pipelines => PipelinesPage::render(&mut self.pipelines, &mut shared, ctx),
            PageId::Settings => SettingsPage::render(&mut self.settings, &mut shared, ctx),
        }
    }
}

impl eframe::App for ConsoleApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let had_messages = self.process_backend_messages();
        self.notifications.prune(Instant::now());

        if had_messages || self.cache.any_loading() {
            ctx.request_repaint();
        }
        if !self.notifications.is_empty() {
            ctx.request_repaint_after(Duration::from_millis(250));
        }

        let mut actions = Vec::new();

        egui::TopBottomPanel::top("title_bar").show(ctx, |ui| {
            let active = self
                .active_profile
                .effective(self.cache.mqtt_profile_list());
            title_bar::render_title_bar(ui, self.current_page, &self.cache, active, &mut actions);
        });

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            let status_ctx = StatusBarContext {
                cache: &self.cache,
                notifications: &self.notifications,
                profile_name: self
                    .active_profile
                    .effective(self.cache.mqtt_profile_list())
                    .map(|p| p.name.as_str()),
            };
            render_status_bar(ui, &status_ctx);
        });

        actions.extend(self.render_sidebar(ctx));
        actions.extend(self.render_page(ctx));

        if let Some(index) = notifications::show_toasts(ctx, &self.notifications) {
            actions.push(AppAction::DismissNotification(index));
        }

        // Outcomes are delivered to pages for exactly one frame
        self.mutation_outcomes.clear();

        for action in actions {
            self.handle_action(action);
        }
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        tracing::info!("Shutting down backend worker");
        self.bridge.shutdown();
    }
}
