// SPDX-License-Identifier: MPL-2.0
//! Lot-ordered view of the assignment map.
//!
//! A projection is derived, never stored by the model: it groups assignments
//! by lot number (ascending) and orders each group by the image ordering key.
//! Rebuilding it from the same assignments always yields an equal value.

use super::LotNumber;
use crate::media::ImageHandle;
use std::collections::BTreeMap;
use std::ops::Bound;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LotProjection {
    lots: BTreeMap<LotNumber, Vec<ImageHandle>>,
}

impl LotProjection {
    /// Groups `(handle, lot)` pairs into a projection.
    pub fn from_assignments<'a, I>(assignments: I) -> Self
    where
        I: IntoIterator<Item = (&'a ImageHandle, LotNumber)>,
    {
        let mut lots: BTreeMap<LotNumber, Vec<ImageHandle>> = BTreeMap::new();
        for (handle, lot) in assignments {
            lots.entry(lot).or_default().push(handle.clone());
        }
        for images in lots.values_mut() {
            images.sort();
        }
        Self { lots }
    }

    #[must_use]
    pub fn first_lot(&self) -> Option<LotNumber> {
        self.lots.keys().next().copied()
    }

    /// Smallest lot strictly greater than `lot`.
    #[must_use]
    pub fn next_after(&self, lot: LotNumber) -> Option<LotNumber> {
        self.lots
            .range((Bound::Excluded(lot), Bound::Unbounded))
            .next()
            .map(|(n, _)| *n)
    }

    /// Largest lot strictly smaller than `lot`.
    #[must_use]
    pub fn previous_before(&self, lot: LotNumber) -> Option<LotNumber> {
        self.lots.range(..lot).next_back().map(|(n, _)| *n)
    }

    /// Images of `lot` in display order.
    #[must_use]
    pub fn images(&self, lot: LotNumber) -> Option<&[ImageHandle]> {
        self.lots.get(&lot).map(Vec::as_slice)
    }

    #[must_use]
    pub fn contains(&self, lot: LotNumber) -> bool {
        self.lots.contains_key(&lot)
    }

    /// Number of lots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lots.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lots.is_empty()
    }

    /// Number of images across all lots.
    #[must_use]
    pub fn image_count(&self) -> usize {
        self.lots.values().map(Vec::len).sum()
    }

    /// Lots in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = (LotNumber, &[ImageHandle])> {
        self.lots.iter().map(|(n, images)| (*n, images.as_slice()))
    }
}
