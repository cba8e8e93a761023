// SPDX-License-Identifier: MPL-2.0
//! Lot assignment domain: lot numbers, the assignment model and its
//! lot-ordered projection.
//!
//! Nothing in here depends on the UI toolkit.

pub mod model;
pub mod number;
pub mod projection;

pub use model::{CounterPolicy, LotModel};
pub use number::LotNumber;
pub use projection::LotProjection;
