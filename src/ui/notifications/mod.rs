// SPDX-License-Identifier: MPL-2.0
//! Toast notifications.
//!
//! Every operator-facing outcome (assignment confirmations, lot navigation
//! limits, export results and all error kinds) is reported as a toast in the
//! bottom-right corner instead of a blocking dialog.
//!
//! - [`notification`]: a message key, its arguments and a [`Severity`]
//! - [`manager`]: the queue, with at most three toasts visible at once
//! - [`toast`]: rendering
//!
//! Success and info toasts disappear after 3s, warnings after 5s; errors stay
//! until dismissed.

mod manager;
mod notification;
mod toast;

pub use manager::{Manager, Message as NotificationMessage};
pub use notification::{Notification, NotificationId, Severity};
pub use toast::Toast;
