// SPDX-License-Identifier: MPL-2.0
//! History snapshot of the editable document.

use super::filters::FilterSettings;
use super::transform::Transform;
use crate::domain::media::EncodedImage;

/// Full editing state at one point in history. Never a diff.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub base_image: EncodedImage,
    pub transform: Transform,
    pub filters: FilterSettings,
}

impl Snapshot {
    /// Snapshot of a freshly loaded image: identity transform, neutral filters.
    #[must_use]
    pub fn initial(base_image: EncodedImage) -> Self {
        Self {
            base_image,
            transform: Transform::identity(),
            filters: FilterSettings::neutral(),
        }
    }

    /// Returns true if transform and filters match `other` and the base image
    /// is the same buffer.
    #[must_use]
    pub fn same_state_as(&self, other: &Snapshot) -> bool {
        self.transform == other.transform
            && self.filters == other.filters
            && (self.base_image.shares_buffer_with(&other.base_image)
                || self.base_image == other.base_image)
    }
}
