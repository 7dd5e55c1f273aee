// SPDX-License-Identifier: MPL-2.0
//! Display-time geometric placement of the photo inside its frame.

use super::newtypes::{RotationDegrees, ZoomScale};

/// Scale, rotation and translation applied about the frame center.
///
/// Translation is expressed in preview-frame pixels. The transform is never
/// baked into pixels while editing; only the final export composes it.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Transform {
    pub scale: ZoomScale,
    pub rotation: RotationDegrees,
    pub translate_x: f32,
    pub translate_y: f32,
}

impl Transform {
    /// The identity transform: scale 1, no rotation, no offset.
    #[must_use]
    pub fn identity() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_identity(&self) -> bool {
        self.scale.is_identity()
            && self.rotation.value() == 0
            && self.translate_x == 0.0
            && self.translate_y == 0.0
    }

    /// Returns a copy moved by the given offset.
    #[must_use]
    pub fn translated_by(mut self, dx: f32, dy: f32) -> Self {
        if dx.is_finite() && dy.is_finite() {
            self.translate_x += dx;
            self.translate_y += dy;
        }
        self
    }

    #[must_use]
    pub fn with_scale(mut self, scale: ZoomScale) -> Self {
        self.scale = scale;
        self
    }

    #[must_use]
    pub fn with_rotation(mut self, rotation: RotationDegrees) -> Self {
        self.rotation = rotation;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_is_default() {
        assert!(Transform::identity().is_identity());
        assert_eq!(Transform::identity(), Transform::default());
    }

    #[test]
    fn translated_by_accumulates() {
        let transform = Transform::identity()
            .translated_by(10.0, -4.0)
            .translated_by(2.5, 1.0);
        assert!((transform.translate_x - 12.5).abs() < f32::EPSILON);
        assert!((transform.translate_y + 3.0).abs() < f32::EPSILON);
        assert!(!transform.is_identity());
    }

    #[test]
    fn translated_by_ignores_non_finite_offsets() {
        let transform = Transform::identity().translated_by(f32::NAN, 3.0);
        assert!(transform.is_identity());
    }

    #[test]
    fn builders_replace_components() {
        let transform = Transform::identity()
            .with_scale(ZoomScale::new(2.0))
            .with_rotation(RotationDegrees::new(-10));
        assert!((transform.scale.value() - 2.0).abs() < f32::EPSILON);
        assert_eq!(transform.rotation.value(), -10);
    }
}
