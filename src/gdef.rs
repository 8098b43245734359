//! `GDEF`-derived glyph classification and ligature caret values.
//!
//! <https://docs.microsoft.com/en-us/typography/opentype/spec/gdef>

use std::fmt;

pub const GLYPH_CLASS_NONE: u16 = 0;
pub const GLYPH_CLASS_BASE: u16 = 1;
pub const GLYPH_CLASS_LIGATURE: u16 = 2;
pub const GLYPH_CLASS_MARK: u16 = 3;
pub const GLYPH_CLASS_COMPONENT: u16 = 4;

/// Display name for the glyph classes reports call out. Base glyphs and
/// unclassified glyphs have none.
pub fn class_name(glyph_class: u16) -> Option<&'static str> {
    match glyph_class {
        GLYPH_CLASS_LIGATURE => Some("ligature"),
        GLYPH_CLASS_MARK => Some("mark"),
        GLYPH_CLASS_COMPONENT => Some("component"),
        _ => None,
    }
}

/// A decoded ligature caret value.
///
/// Kept as decoded; no geometric computation is performed on these.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CaretValue {
    /// Format 1 and 3: a coordinate along the advance, in design units.
    Coordinate(i16),
    /// Format 2: an index into the glyph's outline points.
    ContourPoint(u16),
}

impl fmt::Display for CaretValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CaretValue::Coordinate(coordinate) => coordinate.fmt(f),
            CaretValue::ContourPoint(point) => write!(f, "point {}", point),
        }
    }
}
