//! # Style Values
//!
//! Colors and the alignment vocabulary shared by items, titles, and the
//! placer. Nothing here knows about the grid.

use serde::{Deserialize, Serialize};

/// An RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f64, // 0.0 - 1.0
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Color {
    pub const BLACK: Color = Color {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 1.0,
    };
    pub const WHITE: Color = Color {
        r: 1.0,
        g: 1.0,
        b: 1.0,
        a: 1.0,
    };
    pub const TRANSPARENT: Color = Color {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 0.0,
    };

    /// Colors closer than this per channel are considered the same color.
    const MATCH_TOLERANCE: f64 = 0.5 / 255.0;

    pub fn rgb(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub fn hex(hex: &str) -> Self {
        let hex = hex.trim_start_matches('#');
        let (r, g, b) = match hex.len() {
            3 => {
                let r = u8::from_str_radix(&hex[0..1].repeat(2), 16).unwrap_or(0);
                let g = u8::from_str_radix(&hex[1..2].repeat(2), 16).unwrap_or(0);
                let b = u8::from_str_radix(&hex[2..3].repeat(2), 16).unwrap_or(0);
                (r, g, b)
            }
            6 => {
                let r = u8::from_str_radix(&hex[0..2], 16).unwrap_or(0);
                let g = u8::from_str_radix(&hex[2..4], 16).unwrap_or(0);
                let b = u8::from_str_radix(&hex[4..6], 16).unwrap_or(0);
                (r, g, b)
            }
            _ => (0, 0, 0),
        };
        Self {
            r: r as f64 / 255.0,
            g: g as f64 / 255.0,
            b: b as f64 / 255.0,
            a: 1.0,
        }
    }

    /// Perceived brightness (ITU-R BT.601 weights), 0.0 - 1.0.
    pub fn luminance(&self) -> f64 {
        0.299 * self.r + 0.587 * self.g + 0.114 * self.b
    }

    /// Dark means luminance under 50% and not mostly transparent.
    ///
    /// A black at 1/8 opacity reads as a light gray, so it is not dark.
    pub fn is_dark(&self) -> bool {
        self.a > 32.0 / 255.0 && self.luminance() < 0.5
    }

    /// Black or white, whichever reads better on top of this color.
    pub fn black_or_white_contrast(&self) -> Color {
        if self.is_dark() {
            Color::WHITE
        } else {
            Color::BLACK
        }
    }

    /// Same color within 8-bit channel precision.
    pub fn matches(&self, other: &Color) -> bool {
        (self.r - other.r).abs() <= Self::MATCH_TOLERANCE
            && (self.g - other.g).abs() <= Self::MATCH_TOLERANCE
            && (self.b - other.b).abs() <= Self::MATCH_TOLERANCE
            && (self.a - other.a).abs() <= Self::MATCH_TOLERANCE
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::BLACK
    }
}

/// Where an item sits horizontally inside the space the canvas gives it.
///
/// For fixed-width items this also decides who gets the width it gives back.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum HorizontalAlignment {
    #[default]
    Left,
    Centered,
    Right,
}

/// Vertical counterpart of [`HorizontalAlignment`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum VerticalAlignment {
    #[default]
    Top,
    Centered,
    Bottom,
}

/// Alignment relative to the reading direction of a title.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RelativeAlignment {
    FlushLeft,
    #[default]
    Centered,
    FlushRight,
}

impl RelativeAlignment {
    /// Mapping used for titles running left-to-right (top and bottom bands).
    pub fn horizontal(self) -> HorizontalAlignment {
        match self {
            RelativeAlignment::FlushLeft => HorizontalAlignment::Left,
            RelativeAlignment::Centered => HorizontalAlignment::Centered,
            RelativeAlignment::FlushRight => HorizontalAlignment::Right,
        }
    }

    /// Mapping used for titles rotated to run bottom-to-top (side bands):
    /// the end of the text is at the top.
    pub fn vertical(self) -> VerticalAlignment {
        match self {
            RelativeAlignment::FlushLeft => VerticalAlignment::Bottom,
            RelativeAlignment::Centered => VerticalAlignment::Centered,
            RelativeAlignment::FlushRight => VerticalAlignment::Top,
        }
    }
}

/// Text orientation of a label.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Orientation {
    #[default]
    Horizontal,
    Vertical,
}

/// Offset of an extent of `size` inside `available` for a start/center/end choice.
pub(crate) fn align_offset(available: f64, size: f64, alignment: HorizontalAlignment) -> f64 {
    let slack = (available - size).max(0.0);
    match alignment {
        HorizontalAlignment::Left => 0.0,
        HorizontalAlignment::Centered => slack / 2.0,
        HorizontalAlignment::Right => slack,
    }
}

/// Vertical version of [`align_offset`].
pub(crate) fn align_offset_vertical(available: f64, size: f64, alignment: VerticalAlignment) -> f64 {
    let slack = (available - size).max(0.0);
    match alignment {
        VerticalAlignment::Top => 0.0,
        VerticalAlignment::Centered => slack / 2.0,
        VerticalAlignment::Bottom => slack,
    }
}
