// SPDX-License-Identifier: MPL-2.0
//! Editing newtypes.
//!
//! This module provides type-safe wrappers for editing values,
//! ensuring they are always within valid ranges.

// =============================================================================
// Filter Value Bounds
// =============================================================================

/// Filter adjustment bounds (-50 to +50).
pub mod filter_bounds {
    /// Minimum filter adjustment value.
    pub const MIN: i32 = -50;
    /// Maximum filter adjustment value.
    pub const MAX: i32 = 50;
    /// Default (neutral) filter adjustment value.
    pub const DEFAULT: i32 = 0;
}

// =============================================================================
// FilterValue
// =============================================================================

/// Color filter adjustment, guaranteed to be within valid range (-50 to +50).
///
/// The value is a percentage offset from neutral: `+20` brightness means
/// 120% brightness, `-30` saturation means 70% saturation.
///
/// # Example
///
/// ```
/// use passpix::domain::editing::FilterValue;
///
/// let value = FilterValue::new(80);
/// assert_eq!(value.value(), 50); // Clamped to max
/// assert!((value.as_factor() - 1.5).abs() < f32::EPSILON);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct FilterValue(i32);

impl FilterValue {
    /// Creates a new filter value, clamping to the valid range.
    #[must_use]
    pub fn new(value: i32) -> Self {
        Self(value.clamp(filter_bounds::MIN, filter_bounds::MAX))
    }

    /// Returns the raw value.
    #[must_use]
    pub fn value(self) -> i32 {
        self.0
    }

    /// Returns the value as a multiplier (0 → 1.0, +50 → 1.5, -50 → 0.5).
    #[must_use]
    pub fn as_factor(self) -> f32 {
        #[allow(clippy::cast_precision_loss)]
        let value = self.0 as f32;
        1.0 + value / 100.0
    }

    /// Returns true if this value leaves the image unchanged.
    #[must_use]
    pub fn is_neutral(self) -> bool {
        self.0 == filter_bounds::DEFAULT
    }

    /// Returns true if this value is at the minimum.
    #[must_use]
    pub fn is_min(self) -> bool {
        self.0 == filter_bounds::MIN
    }

    /// Returns true if this value is at the maximum.
    #[must_use]
    pub fn is_max(self) -> bool {
        self.0 == filter_bounds::MAX
    }
}

// =============================================================================
// Zoom Scale Bounds
// =============================================================================

/// Zoom scale bounds (0.5x to 3.0x).
pub mod scale_bounds {
    /// Minimum scale factor.
    pub const MIN: f32 = 0.5;
    /// Maximum scale factor.
    pub const MAX: f32 = 3.0;
    /// Default scale factor.
    pub const DEFAULT: f32 = 1.0;
    /// Scale change per unit of wheel delta.
    pub const WHEEL_SENSITIVITY: f32 = 0.001;
}

// =============================================================================
// ZoomScale
// =============================================================================

/// Display scale of the photo inside its frame (0.5x–3.0x).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomScale(f32);

impl ZoomScale {
    /// Creates a new scale, clamping to the valid range. Non-finite input
    /// falls back to the default.
    #[must_use]
    pub fn new(value: f32) -> Self {
        if value.is_finite() {
            Self(value.clamp(scale_bounds::MIN, scale_bounds::MAX))
        } else {
            Self::default()
        }
    }

    /// Returns the raw scale factor.
    #[must_use]
    pub fn value(self) -> f32 {
        self.0
    }

    /// Applies a mouse-wheel delta. Scrolling down (positive delta) zooms out.
    #[must_use]
    pub fn apply_wheel(self, delta_y: f32) -> Self {
        Self::new(self.0 - delta_y * scale_bounds::WHEEL_SENSITIVITY)
    }

    /// Returns true if this scale is the identity.
    #[must_use]
    pub fn is_identity(self) -> bool {
        (self.0 - scale_bounds::DEFAULT).abs() < f32::EPSILON
    }
}

impl Default for ZoomScale {
    fn default() -> Self {
        Self(scale_bounds::DEFAULT)
    }
}

// =============================================================================
// Rotation Bounds
// =============================================================================

/// Rotation range in degrees.
///
/// Any angle is accepted and normalized into `(MIN, MAX]`. The straightening
/// slider covers `SLIDER_MIN..=SLIDER_MAX`; quarter turns reach the rest.
pub mod rotation_bounds {
    /// Exclusive lower end of the normalized range.
    pub const MIN: i32 = -180;
    /// Inclusive upper end of the normalized range.
    pub const MAX: i32 = 180;
    pub const SLIDER_MIN: i32 = -45;
    pub const SLIDER_MAX: i32 = 45;
    /// Step of one quarter-turn button press.
    pub const QUARTER_TURN: i32 = 90;
    /// Default rotation in degrees.
    pub const DEFAULT: i32 = 0;
}

// =============================================================================
// RotationDegrees
// =============================================================================

/// Direction of a quarter turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnDirection {
    Clockwise,
    CounterClockwise,
}

/// Rotation in whole degrees, clockwise positive, normalized into (-180, 180].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct RotationDegrees(i32);

impl RotationDegrees {
    /// Creates a rotation, wrapping the angle into (-180, 180].
    #[must_use]
    pub fn new(degrees: i32) -> Self {
        let full = rotation_bounds::MAX - rotation_bounds::MIN;
        let mut wrapped = degrees.rem_euclid(full);
        if wrapped > rotation_bounds::MAX {
            wrapped -= full;
        }
        Self(wrapped)
    }

    /// Returns this rotation turned by 90 degrees.
    #[must_use]
    pub fn quarter_turn(self, direction: TurnDirection) -> Self {
        let step = match direction {
            TurnDirection::Clockwise => rotation_bounds::QUARTER_TURN,
            TurnDirection::CounterClockwise => -rotation_bounds::QUARTER_TURN,
        };
        Self::new(self.0 + step)
    }

    /// Returns the rotation in degrees.
    #[must_use]
    pub fn value(self) -> i32 {
        self.0
    }

    /// Returns the rotation as `f32` degrees.
    #[must_use]
    pub fn as_f32(self) -> f32 {
        #[allow(clippy::cast_precision_loss)]
        let degrees = self.0 as f32;
        degrees
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::assert_abs_diff_eq;

    // -------------------------------------------------------------------------
    // FilterValue tests
    // -------------------------------------------------------------------------

    #[test]
    fn filter_value_clamps_to_valid_range() {
        assert_eq!(FilterValue::new(-200).value(), filter_bounds::MIN);
        assert_eq!(FilterValue::new(200).value(), filter_bounds::MAX);
        assert_eq!(FilterValue::new(12).value(), 12);
    }

    #[test]
    fn filter_value_default_is_neutral() {
        assert!(FilterValue::default().is_neutral());
        assert!(!FilterValue::new(1).is_neutral());
    }

    #[test]
    fn filter_value_factor_matches_percentage() {
        assert_abs_diff_eq!(FilterValue::new(0).as_factor(), 1.0);
        assert_abs_diff_eq!(FilterValue::new(50).as_factor(), 1.5);
        assert_abs_diff_eq!(FilterValue::new(-50).as_factor(), 0.5);
        assert_abs_diff_eq!(FilterValue::new(20).as_factor(), 1.2, epsilon = 1e-6);
    }

    #[test]
    fn filter_value_reports_bounds() {
        assert!(FilterValue::new(-50).is_min());
        assert!(FilterValue::new(50).is_max());
        assert!(!FilterValue::new(0).is_min());
    }

    // -------------------------------------------------------------------------
    // ZoomScale tests
    // -------------------------------------------------------------------------

    #[test]
    fn zoom_scale_clamps_to_valid_range() {
        assert_abs_diff_eq!(ZoomScale::new(0.1).value(), scale_bounds::MIN);
        assert_abs_diff_eq!(ZoomScale::new(10.0).value(), scale_bounds::MAX);
        assert_abs_diff_eq!(ZoomScale::new(1.7).value(), 1.7);
    }

    #[test]
    fn zoom_scale_rejects_non_finite() {
        assert!(ZoomScale::new(f32::NAN).is_identity());
        assert!(ZoomScale::new(f32::INFINITY).is_identity());
    }

    #[test]
    fn wheel_up_zooms_in_and_wheel_down_zooms_out() {
        let scale = ZoomScale::default();
        assert_abs_diff_eq!(scale.apply_wheel(-100.0).value(), 1.1, epsilon = 1e-6);
        assert_abs_diff_eq!(scale.apply_wheel(100.0).value(), 0.9, epsilon = 1e-6);
    }

    #[test]
    fn wheel_never_escapes_bounds() {
        let mut scale = ZoomScale::default();
        for _ in 0..100 {
            scale = scale.apply_wheel(-500.0);
        }
        assert_abs_diff_eq!(scale.value(), scale_bounds::MAX);
    }

    // -------------------------------------------------------------------------
    // RotationDegrees tests
    // -------------------------------------------------------------------------

    #[test]
    fn rotation_keeps_quarter_turns() {
        assert_eq!(RotationDegrees::new(90).value(), 90);
        assert_eq!(RotationDegrees::new(-90).value(), -90);
        assert_eq!(RotationDegrees::new(-3).value(), -3);
    }

    #[test]
    fn rotation_wraps_into_half_open_range() {
        assert_eq!(RotationDegrees::new(180).value(), 180);
        assert_eq!(RotationDegrees::new(-180).value(), 180);
        assert_eq!(RotationDegrees::new(270).value(), -90);
        assert_eq!(RotationDegrees::new(-450).value(), -90);
        assert_eq!(RotationDegrees::new(360).value(), 0);
    }

    #[test]
    fn quarter_turns_cycle_back_to_start() {
        let start = RotationDegrees::new(10);
        let mut rotation = start;
        for _ in 0..4 {
            rotation = rotation.quarter_turn(TurnDirection::Clockwise);
        }
        assert_eq!(rotation, start);
        assert_eq!(
            start.quarter_turn(TurnDirection::CounterClockwise).value(),
            -80
        );
    }
}
