// SPDX-License-Identifier: MPL-2.0
//! What a toast says and how loud it is.

use crate::error::{ExportError, LotError};
use crate::ui::design_tokens::palette;
use iced::Color;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NotificationId(u64);

impl NotificationId {
    fn fresh() -> Self {
        Self(NEXT_ID.fetch_add(1, Ordering::Relaxed))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// An assignment or export went through.
    Success,
    /// Boundary hits such as "no more lots".
    Info,
    Warning,
    /// Stays on screen until the operator closes it.
    Error,
}

impl Severity {
    #[must_use]
    pub fn color(self) -> Color {
        match self {
            Severity::Success => palette::SUCCESS_500,
            Severity::Info => palette::INFO_500,
            Severity::Warning => palette::WARNING_500,
            Severity::Error => palette::ERROR_500,
        }
    }

    /// How long a toast stays up once shown. `None` means until dismissed.
    #[must_use]
    pub fn lifetime(self) -> Option<Duration> {
        match self {
            Severity::Success | Severity::Info => Some(Duration::from_secs(3)),
            Severity::Warning => Some(Duration::from_secs(5)),
            Severity::Error => None,
        }
    }
}

/// A localizable message: an i18n key plus the arguments it interpolates.
#[derive(Debug, Clone)]
pub struct Notification {
    id: NotificationId,
    severity: Severity,
    message_key: String,
    message_args: Vec<(String, String)>,
}

impl Notification {
    pub fn new(severity: Severity, message_key: impl Into<String>) -> Self {
        Self {
            id: NotificationId::fresh(),
            severity,
            message_key: message_key.into(),
            message_args: Vec::new(),
        }
    }

    pub fn success(message_key: impl Into<String>) -> Self {
        Self::new(Severity::Success, message_key)
    }

    pub fn info(message_key: impl Into<String>) -> Self {
        Self::new(Severity::Info, message_key)
    }

    pub fn warning(message_key: impl Into<String>) -> Self {
        Self::new(Severity::Warning, message_key)
    }

    pub fn error(message_key: impl Into<String>) -> Self {
        Self::new(Severity::Error, message_key)
    }

    #[must_use]
    pub fn with_arg(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.message_args.push((name.into(), value.into()));
        self
    }

    pub fn id(&self) -> NotificationId {
        self.id
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn message_key(&self) -> &str {
        &self.message_key
    }

    pub fn message_args(&self) -> &[(String, String)] {
        &self.message_args
    }

    pub fn arg(&self, name: &str) -> Option<&str> {
        self.message_args
            .iter()
            .find_map(|(n, v)| (n == name).then_some(v.as_str()))
    }

    pub fn lifetime(&self) -> Option<Duration> {
        self.severity.lifetime()
    }
}

impl From<&LotError> for Notification {
    fn from(err: &LotError) -> Self {
        let notification = Notification::new(err.severity(), err.i18n_key());
        match err {
            LotError::InvalidLotNumber(input) => notification.with_arg("input", input.clone()),
            LotError::LotNotFound(lot) => notification.with_arg("lot", lot.to_string()),
            _ => notification,
        }
    }
}

impl From<&ExportError> for Notification {
    fn from(err: &ExportError) -> Self {
        Notification::new(err.severity(), err.i18n_key()).with_arg("detail", err.detail())
    }
}
