//! Transient toast notifications.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use egui::Color32;

/// Upper bound on queued notifications; the oldest is dropped first.
const MAX_NOTIFICATIONS: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Success,
    Error,
    Info,
}

impl NotificationLevel {
    pub fn color(self) -> Color32 {
        match self {
            NotificationLevel::Success => Color32::from_rgb(100, 200, 120),
            NotificationLevel::Error => Color32::LIGHT_RED,
            NotificationLevel::Info => Color32::LIGHT_BLUE,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
    /// Wall-clock time for display
    pub timestamp: chrono::DateTime<chrono::Local>,
    created_at: Instant,
}

impl Notification {
    pub fn age(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.created_at)
    }
}

/// Queue of notifications that expire after a fixed time-to-live.
#[derive(Debug)]
pub struct Notifications {
    queue: VecDeque<Notification>,
    ttl: Duration,
}

impl Notifications {
    pub fn new(ttl: Duration) -> Self {
        Self {
            queue: VecDeque::new(),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn set_ttl(&mut self, ttl: Duration) {
        self.ttl = ttl;
    }

    pub fn push(&mut self, level: NotificationLevel, message: impl Into<String>) {
        self.push_at(level, message, Instant::now());
    }

    pub fn push_at(&mut self, level: NotificationLevel, message: impl Into<String>, now: Instant) {
        if self.queue.len() == MAX_NOTIFICATIONS {
            self.queue.pop_front();
        }
        self.queue.push_back(Notification {
            level,
            message: message.into(),
            timestamp: chrono::Local::now(),
            created_at: now,
        });
    }

    pub fn push_success(&mut self, message: impl Into<String>) {
        self.push(NotificationLevel::Success, message);
    }

    pub fn push_error(&mut self, message: impl Into<String>) {
        self.push(NotificationLevel::Error, message);
    }

    pub fn push_info(&mut self, message: impl Into<String>) {
        self.push(NotificationLevel::Info, message);
    }

    /// Drop everything older than the time-to-live.
    pub fn prune(&mut self, now: Instant) {
        let ttl = self.ttl;
        self.queue.retain(|n| n.age(now) < ttl);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Notification> {
        self.queue.iter()
    }

    pub fn latest(&self) -> Option<&Notification> {
        self.queue.back()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn dismiss(&mut self, index: usize) {
        self.queue.remove(index);
    }
}

/// Stack the queued toasts in the bottom-right corner.
///
/// Returns the index of a toast the user dismissed this frame.
pub fn show_toasts(ctx: &egui::Context, notifications: &Notifications) -> Option<usize> {
    if notifications.is_empty() {
        return None;
    }
    let mut dismissed = None;
    egui::Area::new(egui::Id::new("toasts"))
        .anchor(egui::Align2::RIGHT_BOTTOM, [-12.0, -36.0])
        .order(egui::Order::Foreground)
        .show(ctx, |ui| {
            for (index, note) in notifications.iter().enumerate() {
                egui::Frame::popup(ui.style()).show(ui, |ui| {
                    ui.horizontal(|ui| {
                        ui.colored_label(note.level.color(), "●");
                        ui.label(note.message.as_str());
                        if ui.small_button("✕").clicked() {
                            dismissed = Some(index);
                        }
                    });
                });
            }
        });
    dismissed
}
