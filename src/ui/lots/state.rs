// SPDX-License-Identifier: MPL-2.0
//! Cursor over a frozen [`LotProjection`].
//!
//! The projection is taken when the screen opens and is not refreshed while
//! it is shown; the sorting screen is the only place that mutates the model.

use crate::config::LOT_THUMBNAIL_LIMIT;
use crate::error::LotError;
use crate::i18n::I18n;
use crate::lots::{LotNumber, LotProjection};
use crate::media::ImageHandle;
use crate::ui::notifications::Notification;
use tracing::debug;

#[derive(Debug, Clone, Default)]
pub struct State {
    projection: LotProjection,
    current: Option<LotNumber>,
    go_to_input: String,
}

impl State {
    /// Opens on the smallest lot number.
    #[must_use]
    pub fn new(projection: LotProjection) -> Self {
        let current = projection.first_lot();
        Self {
            projection,
            current,
            go_to_input: String::new(),
        }
    }

    #[must_use]
    pub fn projection(&self) -> &LotProjection {
        &self.projection
    }

    #[must_use]
    pub fn current(&self) -> Option<LotNumber> {
        self.current
    }

    #[must_use]
    pub fn go_to_input(&self) -> &str {
        &self.go_to_input
    }

    pub fn set_go_to_input(&mut self, input: String) {
        self.go_to_input = input;
    }

    /// Every image of the current lot, in export order.
    #[must_use]
    pub fn current_images(&self) -> &[ImageHandle] {
        self.current
            .and_then(|lot| self.projection.images(lot))
            .unwrap_or_default()
    }

    /// The images that get a thumbnail; any beyond the limit are only counted.
    #[must_use]
    pub fn thumbnail_images(&self) -> &[ImageHandle] {
        let images = self.current_images();
        &images[..images.len().min(LOT_THUMBNAIL_LIMIT)]
    }

    /// Moves to the next lot. Stops at the last one.
    pub fn next_lot(&mut self) -> Option<Notification> {
        let current = self.current?;
        match self.projection.next_after(current) {
            Some(lot) => {
                self.current = Some(lot);
                debug!(%lot, "reviewing lot");
                None
            }
            None => Some(Notification::info("lots-no-more")),
        }
    }

    /// Moves to the previous lot. Stops at the first one.
    pub fn previous_lot(&mut self) -> Option<Notification> {
        let current = self.current?;
        match self.projection.previous_before(current) {
            Some(lot) => {
                self.current = Some(lot);
                debug!(%lot, "reviewing lot");
                None
            }
            None => Some(Notification::info("lots-no-previous")),
        }
    }

    /// Jumps to the lot typed in the input.
    ///
    /// # Errors
    ///
    /// [`LotError::InvalidLotNumber`] for unparsable input and
    /// [`LotError::LotNotFound`] for a lot without images. The current lot is
    /// unchanged in both cases.
    pub fn go_to_lot(&mut self) -> Result<LotNumber, LotError> {
        let lot = LotNumber::parse(&self.go_to_input)?;
        if !self.projection.contains(lot) {
            return Err(LotError::LotNotFound(lot));
        }
        self.current = Some(lot);
        self.go_to_input.clear();
        debug!(%lot, "jumped to lot");
        Ok(lot)
    }

    #[must_use]
    pub fn status_line(&self, i18n: &I18n) -> String {
        match self.current {
            Some(lot) => {
                let lot = lot.to_string();
                let count = self.current_images().len().to_string();
                i18n.tr_with_args(
                    "lots-status",
                    &[("lot", lot.as_str()), ("count", count.as_str())],
                )
            }
            None => i18n.tr("lots-status-empty"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::lots::LotModel;

    fn lot(n: u64) -> LotNumber {
        LotNumber::new(n).expect("positive")
    }

    /// Lots 1, 4 and 9; lot 4 holds five images.
    fn sparse_projection() -> LotProjection {
        let mut model = LotModel::new();
        model.assign_to_lot(&ImageHandle::new("/p/a.jpg"), lot(1));
        for name in ["b", "c", "d", "e", "f"] {
            model.assign_to_lot(&ImageHandle::new(format!("/p/{name}.jpg")), lot(4));
        }
        model.assign_to_lot(&ImageHandle::new("/p/g.jpg"), lot(9));
        model.snapshot_lots()
    }

    #[test]
    fn starts_on_the_smallest_lot() {
        assert_eq!(State::new(sparse_projection()).current(), Some(lot(1)));
        assert_eq!(State::new(LotProjection::default()).current(), None);
    }

    #[test]
    fn navigation_stops_at_both_ends() {
        let mut state = State::new(sparse_projection());

        let note = state.previous_lot().expect("at the first lot");
        assert_eq!(note.message_key(), "lots-no-previous");
        assert_eq!(state.current(), Some(lot(1)));

        assert!(state.next_lot().is_none());
        assert!(state.next_lot().is_none());
        assert_eq!(state.current(), Some(lot(9)));

        let note = state.next_lot().expect("at the last lot");
        assert_eq!(note.message_key(), "lots-no-more");
        assert_eq!(state.current(), Some(lot(9)));
    }

    #[test]
    fn go_to_lot_validates_input() {
        let mut state = State::new(sparse_projection());

        state.set_go_to_input("abc".into());
        assert_eq!(state.go_to_lot(), Err(LotError::InvalidLotNumber("abc".into())));
        assert_eq!(state.go_to_input(), "abc");

        state.set_go_to_input("5".into());
        assert_eq!(state.go_to_lot(), Err(LotError::LotNotFound(lot(5))));
        assert_eq!(state.current(), Some(lot(1)));

        state.set_go_to_input("9".into());
        assert_eq!(state.go_to_lot(), Ok(lot(9)));
        assert_eq!(state.go_to_input(), "");
    }

    #[test]
    fn only_three_thumbnails_but_true_count_in_status() {
        let mut state = State::new(sparse_projection());
        state.next_lot();

        assert_eq!(state.current_images().len(), 5);
        let names: Vec<_> = state.thumbnail_images().iter().map(ImageHandle::name).collect();
        assert_eq!(names, vec!["b.jpg", "c.jpg", "d.jpg"]);

        let i18n = I18n::new(Some("en-US".into()), &Config::default());
        assert_eq!(state.status_line(&i18n), "Viewing Lot 4 (5 image(s))");
    }

    #[test]
    fn empty_projection_has_its_own_status() {
        let mut state = State::new(LotProjection::default());
        assert!(state.next_lot().is_none());
        let i18n = I18n::new(Some("en-US".into()), &Config::default());
        assert_eq!(state.status_line(&i18n), "No lots to display.");
    }
}
