// SPDX-License-Identifier: MPL-2.0
//! Passport photo size standards by country.

/// Physical photo size required by a country's passport office.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PassportStandard {
    /// Short country code, e.g. `"US"`.
    pub country_code: &'static str,
    /// Human-readable label, e.g. `"USA (2x2 inch)"`.
    pub label: &'static str,
    pub width_mm: f32,
    pub height_mm: f32,
}

impl PassportStandard {
    /// Height divided by width.
    #[must_use]
    pub fn aspect_ratio(&self) -> f32 {
        self.height_mm / self.width_mm
    }
}

/// Supported standards. The first entry is the default.
pub const PASSPORT_STANDARDS: &[PassportStandard] = &[
    PassportStandard {
        country_code: "US",
        label: "USA (2x2 inch)",
        width_mm: 51.0,
        height_mm: 51.0,
    },
    PassportStandard {
        country_code: "IN",
        label: "India (35x45 mm)",
        width_mm: 35.0,
        height_mm: 45.0,
    },
    PassportStandard {
        country_code: "UK",
        label: "UK (35x45 mm)",
        width_mm: 35.0,
        height_mm: 45.0,
    },
    PassportStandard {
        country_code: "EU",
        label: "Schengen (35x45 mm)",
        width_mm: 35.0,
        height_mm: 45.0,
    },
    PassportStandard {
        country_code: "JP",
        label: "Japan (35x45 mm)",
        width_mm: 35.0,
        height_mm: 45.0,
    },
    PassportStandard {
        country_code: "CA",
        label: "Canada (50x70 mm)",
        width_mm: 50.0,
        height_mm: 70.0,
    },
    PassportStandard {
        country_code: "AU",
        label: "Australia (35x45 mm)",
        width_mm: 35.0,
        height_mm: 45.0,
    },
];

/// The default standard (US).
#[must_use]
pub fn default_standard() -> &'static PassportStandard {
    &PASSPORT_STANDARDS[0]
}

/// Finds a standard by country code, ignoring case.
#[must_use]
pub fn find_standard(country_code: &str) -> Option<&'static PassportStandard> {
    let code = country_code.trim();
    PASSPORT_STANDARDS
        .iter()
        .find(|standard| standard.country_code.eq_ignore_ascii_case(code))
}

/// Finds a standard by country code, falling back to the default.
#[must_use]
pub fn standard_or_default(country_code: &str) -> &'static PassportStandard {
    find_standard(country_code).unwrap_or_else(default_standard)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_us_two_by_two() {
        let standard = default_standard();
        assert_eq!(standard.country_code, "US");
        assert!((standard.width_mm - 51.0).abs() < f32::EPSILON);
        assert!((standard.height_mm - 51.0).abs() < f32::EPSILON);
    }

    #[test]
    fn lookup_ignores_case_and_whitespace() {
        let standard = find_standard(" ca ").expect("Canada should exist");
        assert_eq!(standard.label, "Canada (50x70 mm)");
    }

    #[test]
    fn unknown_code_falls_back_to_default() {
        assert!(find_standard("ZZ").is_none());
        assert_eq!(standard_or_default("ZZ").country_code, "US");
    }

    #[test]
    fn country_codes_are_unique() {
        for (index, standard) in PASSPORT_STANDARDS.iter().enumerate() {
            assert!(PASSPORT_STANDARDS[index + 1..]
                .iter()
                .all(|other| other.country_code != standard.country_code));
        }
    }

    #[test]
    fn aspect_ratio_is_height_over_width() {
        let uk = find_standard("UK").expect("UK should exist");
        assert!((uk.aspect_ratio() - 45.0 / 35.0).abs() < 1e-6);
    }
}
