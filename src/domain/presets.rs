// SPDX-License-Identifier: MPL-2.0
//! Background color and outfit presets offered for AI edits.

use std::fmt;
use std::str::FromStr;

// =============================================================================
// HexColor
// =============================================================================

/// A `#RRGGBB` color, stored with its original spelling.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HexColor {
    text: String,
    rgb: [u8; 3],
}

impl HexColor {
    /// The color as written, including the leading `#`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn rgb(&self) -> [u8; 3] {
        self.rgb
    }
}

impl FromStr for HexColor {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        let digits = trimmed
            .strip_prefix('#')
            .ok_or_else(|| format!("color '{trimmed}' must start with '#'"))?;
        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(format!("color '{trimmed}' must be #RRGGBB"));
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16).map_err(|err| err.to_string())
        };
        Ok(Self {
            text: trimmed.to_string(),
            rgb: [channel(0..2)?, channel(2..4)?, channel(4..6)?],
        })
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

// =============================================================================
// Backgrounds
// =============================================================================

/// A named background color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackgroundPreset {
    pub name: &'static str,
    pub hex: &'static str,
    pub prompt: &'static str,
}

pub const BACKGROUND_PRESETS: &[BackgroundPreset] = &[
    BackgroundPreset {
        name: "White",
        hex: "#FFFFFF",
        prompt: "pure white background",
    },
    BackgroundPreset {
        name: "Light Blue",
        hex: "#E0F2FE",
        prompt: "light blue studio background",
    },
    BackgroundPreset {
        name: "Off White",
        hex: "#F8FAFC",
        prompt: "off-white cream background",
    },
    BackgroundPreset {
        name: "Light Gray",
        hex: "#E2E8F0",
        prompt: "light gray professional background",
    },
    BackgroundPreset {
        name: "Dark Gray",
        hex: "#475569",
        prompt: "dark gray professional background",
    },
    BackgroundPreset {
        name: "Beige",
        hex: "#f5f5dc",
        prompt: "warm beige studio background",
    },
];

/// Finds a background preset by name, ignoring case, spaces and dashes.
#[must_use]
pub fn find_background(name: &str) -> Option<&'static BackgroundPreset> {
    let wanted = normalize_name(name);
    BACKGROUND_PRESETS
        .iter()
        .find(|preset| normalize_name(preset.name) == wanted)
}

fn normalize_name(name: &str) -> String {
    name.chars()
        .filter(|c| !matches!(c, ' ' | '-' | '_'))
        .flat_map(char::to_lowercase)
        .collect()
}

/// The background requested for an AI edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackgroundChoice {
    Preset(&'static BackgroundPreset),
    Custom(HexColor),
}

impl BackgroundChoice {
    /// Hex code sent to the image-editing service.
    #[must_use]
    pub fn hex(&self) -> &str {
        match self {
            BackgroundChoice::Preset(preset) => preset.hex,
            BackgroundChoice::Custom(color) => color.as_str(),
        }
    }

    /// Name shown while the edit runs. Raw hex codes are never shown.
    #[must_use]
    pub fn display_name(&self) -> &str {
        match self {
            BackgroundChoice::Preset(preset) if !preset.name.starts_with('#') => preset.name,
            _ => "Custom Color",
        }
    }
}

impl FromStr for BackgroundChoice {
    type Err = String;

    /// Accepts a preset name (`"light blue"`) or a `#RRGGBB` color.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        if value.trim_start().starts_with('#') {
            return value.parse().map(BackgroundChoice::Custom);
        }
        find_background(value)
            .map(BackgroundChoice::Preset)
            .ok_or_else(|| format!("unknown background '{}'", value.trim()))
    }
}

// =============================================================================
// Outfits
// =============================================================================

/// Outfit catalog section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutfitCategory {
    Men,
    Women,
}

impl OutfitCategory {
    #[must_use]
    pub fn all() -> &'static [OutfitCategory] {
        &[OutfitCategory::Men, OutfitCategory::Women]
    }

    #[must_use]
    pub fn id(self) -> &'static str {
        match self {
            OutfitCategory::Men => "men",
            OutfitCategory::Women => "women",
        }
    }
}

/// A clothing option that can be applied with an AI edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutfitPreset {
    pub id: &'static str,
    pub label: &'static str,
    /// Swatch color shown next to the label.
    pub color: &'static str,
    pub prompt: &'static str,
    pub category: OutfitCategory,
}

macro_rules! outfit {
    ($category:ident, $id:literal, $label:literal, $color:literal, $prompt:literal) => {
        OutfitPreset {
            id: $id,
            label: $label,
            color: $color,
            prompt: $prompt,
            category: OutfitCategory::$category,
        }
    };
}

pub const OUTFIT_PRESETS: &[OutfitPreset] = &[
    outfit!(Men, "m_shirt_white", "White Shirt", "#f8fafc", "Wear a crisp white formal collared shirt, no jacket."),
    outfit!(Men, "m_shirt_blue", "Blue Shirt", "#bfdbfe", "Wear a light blue formal office shirt."),
    outfit!(Men, "m_shirt_grey", "Grey Shirt", "#94a3b8", "Wear a smart grey formal shirt."),
    outfit!(Men, "m_polo_navy", "Navy Polo", "#1e293b", "Wear a smart casual navy blue polo shirt."),
    outfit!(Men, "m_suit_black", "Black Suit", "#1a1a1a", "Wear a professional black business suit, white shirt, and dark tie."),
    outfit!(Men, "m_suit_navy", "Navy Suit", "#172554", "Wear a professional navy blue business suit, white shirt, and blue tie."),
    outfit!(Men, "m_suit_grey", "Grey Suit", "#4b5563", "Wear a professional grey business suit, light shirt, and tie."),
    outfit!(Men, "m_blazer_casual", "Casual Blazer", "#57534e", "Wear a smart casual textured blazer with a t-shirt underneath."),
    outfit!(Men, "m_office_wear", "Office Wear", "#334155", "Wear smart professional corporate office attire."),
    outfit!(Women, "w_saree_formal", "Formal Saree", "#b91c1c", "Wear a professional, elegant Indian saree with a modest blouse, suitable for passport photos."),
    outfit!(Women, "w_blouse_white", "White Blouse", "#f8fafc", "Wear a professional white formal blouse."),
    outfit!(Women, "w_top_black", "Black Top", "#1a1a1a", "Wear a modest, professional black top."),
    outfit!(Women, "w_shirt_blue", "Blue Shirt", "#bfdbfe", "Wear a light blue button-down formal shirt."),
    outfit!(Women, "w_casual_top", "Casual Top", "#e2e8f0", "Wear a smart casual modest top."),
    outfit!(Women, "w_blazer_black", "Black Blazer", "#000000", "Wear a professional black blazer over a white blouse."),
    outfit!(Women, "w_blazer_navy", "Navy Blazer", "#1e293b", "Wear a professional navy blue blazer over a light top."),
    outfit!(Women, "w_blazer_beige", "Beige Blazer", "#d6d3d1", "Wear a professional beige blazer."),
    outfit!(Women, "w_office_dress", "Office Dress", "#78716c", "Wear a formal, high-neck professional office dress."),
];

/// Outfits of one catalog section, in display order.
pub fn outfits(category: OutfitCategory) -> impl Iterator<Item = &'static OutfitPreset> {
    OUTFIT_PRESETS
        .iter()
        .filter(move |outfit| outfit.category == category)
}

/// Finds an outfit by id.
#[must_use]
pub fn find_outfit(id: &str) -> Option<&'static OutfitPreset> {
    let id = id.trim();
    OUTFIT_PRESETS.iter().find(|outfit| outfit.id == id)
}
