// SPDX-License-Identifier: MPL-2.0
//! Position in the image sequence and the pending manual lot input.
//!
//! Every operation is a no-op on an empty sequence. The index always lies in
//! `0..images.len()` otherwise.

use crate::directory_scanner::ImageList;
use crate::error::LotError;
use crate::i18n::I18n;
use crate::lots::{LotModel, LotNumber};
use crate::media::ImageHandle;
use crate::ui::notifications::Notification;

#[derive(Debug, Clone, Default)]
pub struct State {
    index: usize,
    manual_input: String,
}

impl State {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    #[must_use]
    pub fn manual_input(&self) -> &str {
        &self.manual_input
    }

    pub fn set_manual_input(&mut self, input: String) {
        self.manual_input = input;
    }

    /// Handle under the cursor, `None` for an empty folder.
    #[must_use]
    pub fn current<'a>(&self, images: &'a ImageList) -> Option<&'a ImageHandle> {
        images.get(self.index)
    }

    /// Moves forward, wrapping from the last image to the first.
    pub fn next(&mut self, images: &ImageList) {
        if !images.is_empty() {
            self.index = (self.index + 1) % images.len();
        }
    }

    /// Moves back, wrapping from the first image to the last.
    pub fn previous(&mut self, images: &ImageList) {
        if !images.is_empty() {
            self.index = (self.index + images.len() - 1) % images.len();
        }
    }

    pub fn hide(&mut self, images: &ImageList, model: &mut LotModel) -> Option<Notification> {
        let handle = self.current(images)?;
        model.hide(handle);
        Some(Notification::info("confirmation-hidden").with_arg("file", handle.name()))
    }

    /// Stamps the current image with a new lot, then moves on.
    pub fn assign_next(&mut self, images: &ImageList, model: &mut LotModel) -> Option<Notification> {
        let handle = self.current(images)?.clone();
        let lot = model.assign_to_next_lot(&handle);
        self.next(images);
        Some(assigned("confirmation-assigned", &handle, lot))
    }

    /// Adds the current image to the last started lot, then moves on.
    ///
    /// Stays put when no lot has been started yet.
    pub fn assign_previous(&mut self, images: &ImageList, model: &mut LotModel) -> Option<Notification> {
        let handle = self.current(images)?.clone();
        Some(match model.assign_to_previous_lot(&handle) {
            Ok(lot) => {
                self.next(images);
                assigned("confirmation-assigned", &handle, lot)
            }
            Err(err) => Notification::from(&err),
        })
    }

    /// Assigns the current image to the lot typed in the manual input.
    ///
    /// On success the input is cleared and the cursor moves on; on failure
    /// the input is kept so the operator can correct it.
    pub fn assign_manual(&mut self, images: &ImageList, model: &mut LotModel) -> Option<Notification> {
        let handle = self.current(images)?.clone();
        Some(match LotNumber::parse(&self.manual_input) {
            Ok(lot) => {
                let lot = model.assign_to_lot(&handle, lot);
                self.manual_input.clear();
                self.next(images);
                assigned("confirmation-manually-assigned", &handle, lot)
            }
            Err(err) => Notification::from(&err),
        })
    }

    /// Checks that there is something to review.
    ///
    /// # Errors
    ///
    /// [`LotError::NoAssignments`] while the model is empty.
    pub fn can_switch_to_lot_view(model: &LotModel) -> Result<(), LotError> {
        if model.is_empty() {
            Err(LotError::NoAssignments)
        } else {
            Ok(())
        }
    }

    /// Status line for the current position.
    #[must_use]
    pub fn status_line(&self, images: &ImageList, model: &LotModel, i18n: &I18n) -> String {
        let Some(handle) = self.current(images) else {
            return i18n.tr("sorting-status-empty");
        };

        let assignment = match model.assignment(handle) {
            Some(lot) => i18n.tr_with_args("sorting-status-lot", &[("lot", lot.to_string().as_str())]),
            None => i18n.tr("sorting-status-unassigned"),
        };
        let position = (self.index + 1).to_string();
        let total = images.len().to_string();
        let status = i18n.tr_with_args(
            "sorting-status",
            &[
                ("position", position.as_str()),
                ("total", total.as_str()),
                ("file", handle.name()),
                ("assignment", assignment.as_str()),
            ],
        );

        if model.is_hidden(handle) {
            i18n.tr_with_args("sorting-status-hidden", &[("status", status.as_str())])
        } else {
            status
        }
    }
}

fn assigned(key: &str, handle: &ImageHandle, lot: LotNumber) -> Notification {
    Notification::info(key)
        .with_arg("file", handle.name())
        .with_arg("lot", lot.to_string())
}
