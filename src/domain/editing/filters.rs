// SPDX-License-Identifier: MPL-2.0
//! Color filter settings applied on top of the base image.

use super::newtypes::FilterValue;

/// One adjustable color filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterKind {
    Brightness,
    Contrast,
    Saturation,
    Warmth,
}

impl FilterKind {
    /// All filters, in slider order.
    #[must_use]
    pub fn all() -> &'static [FilterKind] {
        &[
            FilterKind::Brightness,
            FilterKind::Contrast,
            FilterKind::Saturation,
            FilterKind::Warmth,
        ]
    }

    /// Stable identifier used in diagnostics and CLI flags.
    #[must_use]
    pub fn id(self) -> &'static str {
        match self {
            FilterKind::Brightness => "brightness",
            FilterKind::Contrast => "contrast",
            FilterKind::Saturation => "saturation",
            FilterKind::Warmth => "warmth",
        }
    }
}

/// Brightness, contrast, saturation and warmth, each in `[-50, 50]`.
///
/// The default value is neutral: rendering with it reproduces the base image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct FilterSettings {
    pub brightness: FilterValue,
    pub contrast: FilterValue,
    pub saturation: FilterValue,
    pub warmth: FilterValue,
}

impl FilterSettings {
    /// Neutral settings.
    #[must_use]
    pub fn neutral() -> Self {
        Self::default()
    }

    /// Returns true if every filter is neutral.
    #[must_use]
    pub fn is_neutral(&self) -> bool {
        self.brightness.is_neutral()
            && self.contrast.is_neutral()
            && self.saturation.is_neutral()
            && self.warmth.is_neutral()
    }

    /// Returns the value of one filter.
    #[must_use]
    pub fn get(&self, kind: FilterKind) -> FilterValue {
        match kind {
            FilterKind::Brightness => self.brightness,
            FilterKind::Contrast => self.contrast,
            FilterKind::Saturation => self.saturation,
            FilterKind::Warmth => self.warmth,
        }
    }

    /// Returns a copy with one filter replaced.
    #[must_use]
    pub fn with(mut self, kind: FilterKind, value: FilterValue) -> Self {
        match kind {
            FilterKind::Brightness => self.brightness = value,
            FilterKind::Contrast => self.contrast = value,
            FilterKind::Saturation => self.saturation = value,
            FilterKind::Warmth => self.warmth = value,
        }
        self
    }
}
