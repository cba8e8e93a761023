// SPDX-License-Identifier: MPL-2.0
//! Sorting screen: walk the folder one image at a time and stamp lots.
//!
//! The screen owns only its cursor and the manual-lot text field. The image
//! list and the [`LotModel`] belong to the application and are lent to
//! [`update`] for the duration of one message.

mod state;
mod view;

pub use state::State;
pub use view::{view, ViewContext};

use crate::directory_scanner::ImageList;
use crate::lots::LotModel;
use crate::ui::notifications::Notification;
use iced::keyboard::{key::Named, Key};

#[derive(Debug, Clone)]
pub enum Message {
    Next,
    Previous,
    Hide,
    AssignNext,
    AssignPrevious,
    ManualInputChanged(String),
    AssignManual,
    ReviewLots,
}

/// Events propagated to the parent application.
#[derive(Debug, Clone)]
pub enum Event {
    None,
    Notify(Notification),
    OpenLotView,
}

impl From<Option<Notification>> for Event {
    fn from(notification: Option<Notification>) -> Self {
        notification.map_or(Event::None, Event::Notify)
    }
}

pub fn update(
    state: &mut State,
    message: Message,
    images: &ImageList,
    model: &mut LotModel,
) -> Event {
    match message {
        Message::Next => {
            state.next(images);
            Event::None
        }
        Message::Previous => {
            state.previous(images);
            Event::None
        }
        Message::Hide => state.hide(images, model).into(),
        Message::AssignNext => state.assign_next(images, model).into(),
        Message::AssignPrevious => state.assign_previous(images, model).into(),
        Message::ManualInputChanged(input) => {
            state.set_manual_input(input);
            Event::None
        }
        Message::AssignManual => state.assign_manual(images, model).into(),
        Message::ReviewLots => match State::can_switch_to_lot_view(model) {
            Ok(()) => Event::OpenLotView,
            Err(err) => Event::Notify(Notification::from(&err)),
        },
    }
}

/// Keyboard shortcuts, only consulted when no widget captured the key.
#[must_use]
pub fn shortcut(key: &Key) -> Option<Message> {
    match key.as_ref() {
        Key::Named(Named::ArrowRight) => Some(Message::Next),
        Key::Named(Named::ArrowLeft) => Some(Message::Previous),
        Key::Character(c) if c.eq_ignore_ascii_case("n") => Some(Message::AssignNext),
        Key::Character(c) if c.eq_ignore_ascii_case("p") => Some(Message::AssignPrevious),
        Key::Character(c) if c.eq_ignore_ascii_case("h") => Some(Message::Hide),
        _ => None,
    }
}
