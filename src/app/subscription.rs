// SPDX-License-Identifier: MPL-2.0
//! Event subscriptions for the application.
//!
//! Only key presses that no widget captured are forwarded, so typing a lot
//! number in a text field never triggers a shortcut.

use super::{Message, Screen};
use iced::{event, keyboard, time, Subscription};
use std::time::Duration;

/// Keyboard shortcuts exist on the sorting and lot screens only.
pub fn create_event_subscription(screen: Screen) -> Subscription<Message> {
    match screen {
        Screen::Opening => Subscription::none(),
        Screen::Sorting | Screen::Lots => event::listen_with(|event, status, _window_id| {
            match (event, status) {
                (
                    event::Event::Keyboard(keyboard::Event::KeyPressed { key, modifiers, .. }),
                    event::Status::Ignored,
                ) if !modifiers.command() && !modifiers.alt() => Some(Message::KeyPressed(key)),
                _ => None,
            }
        }),
    }
}

/// Ticks only while there is a notification to expire.
pub fn create_tick_subscription(has_notifications: bool) -> Subscription<Message> {
    if has_notifications {
        time::every(Duration::from_millis(250)).map(Message::Tick)
    } else {
        Subscription::none()
    }
}
