// SPDX-License-Identifier: MPL-2.0
//! Which toasts are on screen and which are waiting.
//!
//! At most [`MAX_VISIBLE`] toasts show at once, newest on top. Anything
//! pushed beyond that waits in arrival order. A toast's lifetime is counted
//! from the moment it becomes visible, so a queued toast still gets its full
//! time on screen.

use super::notification::{Notification, NotificationId, Severity};
use std::collections::VecDeque;
use std::time::Instant;
use tracing::{error, warn};

const MAX_VISIBLE: usize = 3;

/// i18n keys of export failures share this prefix.
const EXPORT_ERROR_PREFIX: &str = "error-export-";

#[derive(Debug, Clone)]
pub enum Message {
    Dismiss(NotificationId),
    Tick,
}

#[derive(Debug)]
struct Shown {
    notification: Notification,
    since: Instant,
}

impl Shown {
    fn now(notification: Notification) -> Self {
        Self {
            notification,
            since: Instant::now(),
        }
    }

    fn expired(&self, now: Instant) -> bool {
        self.notification
            .lifetime()
            .is_some_and(|lifetime| now.duration_since(self.since) >= lifetime)
    }
}

#[derive(Debug, Default)]
pub struct Manager {
    /// Newest first.
    shown: VecDeque<Shown>,
    waiting: VecDeque<Notification>,
}

impl Manager {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Shows `notification`, or queues it when the screen is full. Problems
    /// also go to the log.
    pub fn push(&mut self, notification: Notification) {
        let key = notification.message_key();
        let args = notification.message_args();
        match notification.severity() {
            Severity::Warning => warn!(key, ?args, "operator warning"),
            Severity::Error => error!(key, ?args, "operator error"),
            Severity::Success | Severity::Info => {}
        }

        if self.shown.len() < MAX_VISIBLE {
            self.shown.push_front(Shown::now(notification));
        } else {
            self.waiting.push_back(notification);
        }
    }

    /// Removes the toast with `id`, wherever it is. Returns whether it existed.
    pub fn dismiss(&mut self, id: NotificationId) -> bool {
        let shown_before = self.shown.len();
        let waiting_before = self.waiting.len();
        self.shown.retain(|s| s.notification.id() != id);
        self.waiting.retain(|n| n.id() != id);

        let removed = self.shown.len() < shown_before || self.waiting.len() < waiting_before;
        self.refill();
        removed
    }

    pub fn tick(&mut self) {
        self.expire(Instant::now());
    }

    fn expire(&mut self, now: Instant) {
        self.shown.retain(|s| !s.expired(now));
        self.refill();
    }

    pub fn handle_message(&mut self, message: &Message) {
        match message {
            Message::Dismiss(id) => {
                self.dismiss(*id);
            }
            Message::Tick => self.tick(),
        }
    }

    pub fn visible(&self) -> impl Iterator<Item = &Notification> {
        self.shown.iter().map(|s| &s.notification)
    }

    #[must_use]
    pub fn visible_count(&self) -> usize {
        self.shown.len()
    }

    #[must_use]
    pub fn queued_count(&self) -> usize {
        self.waiting.len()
    }

    /// Whether anything is showing or waiting; drives the tick subscription.
    #[must_use]
    pub fn has_notifications(&self) -> bool {
        !(self.shown.is_empty() && self.waiting.is_empty())
    }

    /// Drops stale export failures once an export has gone through.
    pub fn clear_export_errors(&mut self) {
        let is_export_error = |n: &Notification| n.message_key().starts_with(EXPORT_ERROR_PREFIX);
        self.shown.retain(|s| !is_export_error(&s.notification));
        self.waiting.retain(|n| !is_export_error(n));
        self.refill();
    }

    fn refill(&mut self) {
        while self.shown.len() < MAX_VISIBLE {
            match self.waiting.pop_front() {
                Some(next) => self.shown.push_back(Shown::now(next)),
                None => break,
            }
        }
    }
}
