// SPDX-License-Identifier: MPL-2.0
//! Editing domain types.
//!
//! This module provides pure domain types for photo editing:
//! - [`FilterValue`], [`ZoomScale`], [`RotationDegrees`]: bounded values
//! - [`FilterSettings`]: brightness/contrast/saturation/warmth
//! - [`Transform`]: display-time placement inside the frame
//! - [`History`]: linear undo/redo over [`Snapshot`]s

pub mod filters;
pub mod history;
pub mod newtypes;
pub mod snapshot;
pub mod transform;

pub use filters::{FilterKind, FilterSettings};
pub use history::History;
pub use newtypes::{
    filter_bounds, rotation_bounds, scale_bounds, FilterValue, RotationDegrees, TurnDirection,
    ZoomScale,
};
pub use snapshot::Snapshot;
pub use transform::Transform;
