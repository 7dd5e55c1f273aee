// SPDX-License-Identifier: MPL-2.0
//! Print domain types: size standards and sheet layout choice.

mod standards;

pub use standards::{
    default_standard, find_standard, standard_or_default, PassportStandard, PASSPORT_STANDARDS,
};

use std::fmt;
use std::str::FromStr;

/// How copies are arranged for printing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PrintLayout {
    /// As many copies as fit on an A4 sheet.
    #[default]
    A4Sheet,
    /// One photo at its exact size.
    Single,
}

impl PrintLayout {
    /// Identifier used in filenames and configuration.
    #[must_use]
    pub fn id(self) -> &'static str {
        match self {
            PrintLayout::A4Sheet => "a4",
            PrintLayout::Single => "single",
        }
    }
}

impl fmt::Display for PrintLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for PrintLayout {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "a4" | "sheet" => Ok(PrintLayout::A4Sheet),
            "single" => Ok(PrintLayout::Single),
            other => Err(format!("unknown layout '{other}' (expected a4 or single)")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_parses_ids() {
        assert_eq!("a4".parse::<PrintLayout>(), Ok(PrintLayout::A4Sheet));
        assert_eq!("Single".parse::<PrintLayout>(), Ok(PrintLayout::Single));
        assert!("poster".parse::<PrintLayout>().is_err());
    }

    #[test]
    fn layout_id_round_trips() {
        for layout in [PrintLayout::A4Sheet, PrintLayout::Single] {
            assert_eq!(layout.id().parse::<PrintLayout>(), Ok(layout));
        }
    }
}
