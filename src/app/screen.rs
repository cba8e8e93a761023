// SPDX-License-Identifier: MPL-2.0
//! Which screen is showing.

use crate::ui::lots;

/// Screens the operator moves between, without their state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Opening,
    Sorting,
    Lots,
}

/// The active screen. Sorting state lives on the [`super::App`] so it
/// survives a trip through the lot view; the lot view is rebuilt from a
/// fresh projection each time it is entered.
#[derive(Debug, Clone, Default)]
pub enum ActiveView {
    #[default]
    Opening,
    Sorting,
    Lots(lots::State),
}

impl ActiveView {
    #[must_use]
    pub fn screen(&self) -> Screen {
        match self {
            ActiveView::Opening => Screen::Opening,
            ActiveView::Sorting => Screen::Sorting,
            ActiveView::Lots(_) => Screen::Lots,
        }
    }
}
