// SPDX-License-Identifier: MPL-2.0
//! The lot assignment model.
//!
//! `LotModel` is the single source of truth for which image belongs to which
//! lot. It owns the assignment map, the hidden set and the current lot
//! counter. Views never hold model state of their own; they call into the
//! model and re-read it after every mutation.
//!
//! Every operation either succeeds completely or fails without changing
//! anything.

use super::{LotNumber, LotProjection};
use crate::error::LotError;
use crate::media::ImageHandle;
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// How manual assignments interact with the current lot counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CounterPolicy {
    /// Manual assignments leave the counter alone. A later next-lot action
    /// may therefore reuse a number that was typed in by hand.
    #[default]
    Independent,
    /// A manual assignment to `n` raises the counter to `max(counter, n + 1)`.
    AdvancePastManual,
}

#[derive(Debug, Clone, Default)]
pub struct LotModel {
    assignments: HashMap<ImageHandle, LotNumber>,
    hidden: HashSet<ImageHandle>,
    counter: LotNumber,
    policy: CounterPolicy,
}

impl LotModel {
    /// Creates an empty model with the counter at 1.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_policy(policy: CounterPolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    /// Stamps `handle` with the current counter, then advances the counter.
    ///
    /// Calling this twice on the same handle overwrites the first lot with a
    /// new one; the counter advances both times.
    pub fn assign_to_next_lot(&mut self, handle: &ImageHandle) -> LotNumber {
        let lot = self.counter;
        self.assignments.insert(handle.clone(), lot);
        self.counter = lot.next();
        debug!(file = handle.name(), %lot, counter = %self.counter, "assigned to next lot");
        lot
    }

    /// Appends `handle` to the most recently started lot (`counter - 1`).
    ///
    /// # Errors
    ///
    /// Returns [`LotError::NoPreviousLot`] while the counter is still 1.
    pub fn assign_to_previous_lot(&mut self, handle: &ImageHandle) -> Result<LotNumber, LotError> {
        let lot = self.counter.previous().ok_or(LotError::NoPreviousLot)?;
        self.assignments.insert(handle.clone(), lot);
        debug!(file = handle.name(), %lot, "assigned to previous lot");
        Ok(lot)
    }

    /// Assigns `handle` to the lot number `n` chosen by the operator.
    ///
    /// # Errors
    ///
    /// Returns [`LotError::InvalidLotNumber`] when `n` is not positive.
    pub fn assign_to_manual_lot(&mut self, handle: &ImageHandle, n: i64) -> Result<LotNumber, LotError> {
        let lot = LotNumber::try_from(n)?;
        Ok(self.assign_to_lot(handle, lot))
    }

    /// Manual assignment for an already validated lot number.
    pub fn assign_to_lot(&mut self, handle: &ImageHandle, lot: LotNumber) -> LotNumber {
        self.assignments.insert(handle.clone(), lot);
        if self.policy == CounterPolicy::AdvancePastManual && lot >= self.counter {
            self.counter = lot.next();
        }
        debug!(file = handle.name(), %lot, counter = %self.counter, "assigned to manual lot");
        lot
    }

    /// Marks `handle` as hidden. Hiding twice is the same as hiding once.
    pub fn hide(&mut self, handle: &ImageHandle) {
        if self.hidden.insert(handle.clone()) {
            debug!(file = handle.name(), "image hidden");
        }
    }

    /// Groups the current assignments into lots.
    #[must_use]
    pub fn snapshot_lots(&self) -> LotProjection {
        LotProjection::from_assignments(self.assignments())
    }

    /// Like [`LotModel::snapshot_lots`], leaving hidden images out.
    #[must_use]
    pub fn snapshot_visible_lots(&self) -> LotProjection {
        LotProjection::from_assignments(
            self.assignments()
                .filter(|(handle, _)| !self.hidden.contains(*handle)),
        )
    }

    /// True when nothing has been assigned yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    #[must_use]
    pub fn assignment(&self, handle: &ImageHandle) -> Option<LotNumber> {
        self.assignments.get(handle).copied()
    }

    /// All assignments, in no particular order.
    pub fn assignments(&self) -> impl Iterator<Item = (&ImageHandle, LotNumber)> {
        self.assignments.iter().map(|(h, lot)| (h, *lot))
    }

    #[must_use]
    pub fn is_hidden(&self, handle: &ImageHandle) -> bool {
        self.hidden.contains(handle)
    }

    /// The number the next next-lot action will stamp.
    #[must_use]
    pub fn current_lot_counter(&self) -> LotNumber {
        self.counter
    }

    #[must_use]
    pub fn assignment_count(&self) -> usize {
        self.assignments.len()
    }

    #[must_use]
    pub fn hidden_count(&self) -> usize {
        self.hidden.len()
    }

    #[must_use]
    pub fn policy(&self) -> CounterPolicy {
        self.policy
    }
}
