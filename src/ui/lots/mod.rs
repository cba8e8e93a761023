// SPDX-License-Identifier: MPL-2.0
//! Lot review screen: step through lots, then export the catalogue.
//!
//! The screen never touches the [`crate::lots::LotModel`]; it works on the
//! projection taken when it was opened. Export requests are forwarded to
//! the application, which owns the exporter.

mod state;
mod view;

pub use state::State;
pub use view::{view, ViewContext};

use crate::error::LotError;
use crate::ui::notifications::Notification;
use iced::keyboard::{key::Named, Key};

#[derive(Debug, Clone)]
pub enum Message {
    NextLot,
    PreviousLot,
    GoToInputChanged(String),
    GoToLot,
    BackToSorting,
    GenerateDocument,
    ExportAs,
    CancelExport,
}

/// Events propagated to the parent application.
#[derive(Debug, Clone)]
pub enum Event {
    None,
    /// The lot under review changed; its thumbnails may need loading.
    LotChanged,
    Notify(Notification),
    BackToSorting,
    /// Export to the default destination.
    GenerateDocument,
    /// Ask for a destination first.
    ExportAs,
    CancelExport,
}

pub fn update(state: &mut State, message: Message) -> Event {
    match message {
        Message::NextLot => state.next_lot().map_or(Event::LotChanged, Event::Notify),
        Message::PreviousLot => state.previous_lot().map_or(Event::LotChanged, Event::Notify),
        Message::GoToInputChanged(input) => {
            state.set_go_to_input(input);
            Event::None
        }
        Message::GoToLot => match state.go_to_lot() {
            Ok(_) => Event::LotChanged,
            Err(err) => Event::Notify(go_to_failure(&err)),
        },
        Message::BackToSorting => Event::BackToSorting,
        Message::GenerateDocument => Event::GenerateDocument,
        Message::ExportAs => Event::ExportAs,
        Message::CancelExport => Event::CancelExport,
    }
}

/// A mistyped lot number while reviewing is informational, not an error.
fn go_to_failure(err: &LotError) -> Notification {
    match err {
        LotError::InvalidLotNumber(input) => {
            Notification::info(err.i18n_key()).with_arg("input", input.clone())
        }
        other => Notification::from(other),
    }
}

#[must_use]
pub fn shortcut(key: &Key) -> Option<Message> {
    match key.as_ref() {
        Key::Named(Named::ArrowRight) => Some(Message::NextLot),
        Key::Named(Named::ArrowLeft) => Some(Message::PreviousLot),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lots::LotModel;
    use crate::media::ImageHandle;
    use crate::ui::notifications::Severity;

    fn two_lots() -> State {
        let mut model = LotModel::new();
        model.assign_to_next_lot(&ImageHandle::new("/p/a.jpg"));
        model.assign_to_next_lot(&ImageHandle::new("/p/b.jpg"));
        State::new(model.snapshot_lots())
    }

    #[test]
    fn invalid_go_to_input_is_informational() {
        let mut state = two_lots();
        update(&mut state, Message::GoToInputChanged("x1".into()));
        let event = update(&mut state, Message::GoToLot);
        assert!(matches!(
            event,
            Event::Notify(ref n)
                if n.severity() == Severity::Info && n.message_key() == "error-invalid-lot-number"
        ));
    }

    #[test]
    fn unknown_lot_reports_not_found() {
        let mut state = two_lots();
        update(&mut state, Message::GoToInputChanged("3".into()));
        let event = update(&mut state, Message::GoToLot);
        assert!(matches!(event, Event::Notify(ref n) if n.message_key() == "error-lot-not-found"));
    }

    #[test]
    fn moving_reports_lot_changes() {
        let mut state = two_lots();
        assert!(matches!(update(&mut state, Message::NextLot), Event::LotChanged));
        assert!(matches!(update(&mut state, Message::NextLot), Event::Notify(_)));
    }

    #[test]
    fn export_buttons_are_forwarded() {
        let mut state = two_lots();
        assert!(matches!(update(&mut state, Message::GenerateDocument), Event::GenerateDocument));
        assert!(matches!(update(&mut state, Message::ExportAs), Event::ExportAs));
        assert!(matches!(update(&mut state, Message::CancelExport), Event::CancelExport));
        assert!(matches!(update(&mut state, Message::BackToSorting), Event::BackToSorting));
    }

    #[test]
    fn arrows_step_through_lots() {
        assert!(matches!(shortcut(&Key::Named(Named::ArrowRight)), Some(Message::NextLot)));
        assert!(matches!(shortcut(&Key::Named(Named::ArrowLeft)), Some(Message::PreviousLot)));
        assert!(shortcut(&Key::Character("n".into())).is_none());
    }
}
