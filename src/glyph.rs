//! Glyph registry construction and lookup.

use std::collections::BTreeMap;

use rustc_hash::FxHashMap;
use tinyvec::TinyVec;

use crate::error::{Diagnostic, Diagnostics};
use crate::gdef;
use crate::tables::FontTables;
use crate::GlyphIndex;

/// A single glyph with the properties collected from the various tables.
///
/// Built once during registry construction and immutable afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Glyph {
    pub name: String,
    /// Position in the font's glyph order. Fixed for the model's lifetime.
    pub index: GlyphIndex,
    /// `None` when the font carries no metrics table.
    pub advance_width: Option<u16>,
    pub lsb: Option<i16>,
    /// Raw `GDEF` class code; `gdef::GLYPH_CLASS_NONE` when unclassified.
    pub glyph_class: u16,
    /// Code points mapped to this glyph, ascending. A glyph may be unmapped
    /// or mapped more than once.
    pub unicodes: TinyVec<[u32; 1]>,
}

impl Glyph {
    /// The first code point mapped to this glyph, if any.
    pub fn code_point(&self) -> Option<u32> {
        self.unicodes.first().copied()
    }

    pub fn class_name(&self) -> Option<&'static str> {
        gdef::class_name(self.glyph_class)
    }
}

/// Ordered collection of all glyphs in a font.
///
/// Glyphs are stored in glyph order and can be looked up by name or index.
/// The registry also retains the merged code point coverage.
#[derive(Clone, Debug, Default)]
pub struct GlyphRegistry {
    glyphs: Vec<Glyph>,
    by_name: FxHashMap<String, GlyphIndex>,
    chars: BTreeMap<u32, GlyphIndex>,
}

impl GlyphRegistry {
    /// Build the registry from the glyph order, merging in metrics, glyph
    /// classes, and cmap coverage where those tables are present.
    ///
    /// Cmap subtables are merged in order with later subtables winning per
    /// code point. A code point mapped to a name absent from the glyph
    /// order is dropped with a diagnostic; construction never fails.
    pub fn build(tables: &FontTables, diagnostics: &mut Diagnostics) -> GlyphRegistry {
        let metrics = tables.opt_hmtx.as_ref().map(|hmtx| &hmtx.metrics);
        let class_defs = tables
            .opt_gdef
            .as_ref()
            .and_then(|gdef| gdef.opt_glyph_classdef.as_ref());

        let mut glyphs = Vec::with_capacity(tables.glyph_order.len());
        let mut by_name =
            FxHashMap::with_capacity_and_hasher(tables.glyph_order.len(), Default::default());
        for (index, name) in tables.glyph_order.iter().enumerate() {
            let index = index as GlyphIndex;
            let metric = metrics.and_then(|metrics| metrics.get(name));
            glyphs.push(Glyph {
                name: name.clone(),
                index,
                advance_width: metric.map(|metric| metric.advance_width),
                lsb: metric.map(|metric| metric.lsb),
                glyph_class: class_defs
                    .and_then(|defs| defs.get(name))
                    .copied()
                    .unwrap_or(gdef::GLYPH_CLASS_NONE),
                unicodes: TinyVec::new(),
            });
            by_name.insert(name.clone(), index);
        }

        let mut merged = BTreeMap::new();
        for subtable in &tables.cmap_subtables {
            for (&code_point, glyph_name) in &subtable.mappings {
                merged.insert(code_point, glyph_name);
            }
        }

        let mut chars = BTreeMap::new();
        for (code_point, glyph_name) in merged {
            match by_name.get(glyph_name.as_str()) {
                Some(&index) => {
                    glyphs[usize::from(index)].unicodes.push(code_point);
                    chars.insert(code_point, index);
                }
                None => diagnostics.report(Diagnostic::UnmappedCodePoint {
                    code_point,
                    glyph_name: glyph_name.clone(),
                }),
            }
        }

        GlyphRegistry {
            glyphs,
            by_name,
            chars,
        }
    }

    pub fn get(&self, name: &str) -> Option<&Glyph> {
        self.by_name
            .get(name)
            .map(|&index| &self.glyphs[usize::from(index)])
    }

    pub fn by_index(&self, index: GlyphIndex) -> Option<&Glyph> {
        self.glyphs.get(usize::from(index))
    }

    /// All glyphs in glyph order.
    pub fn glyphs(&self) -> &[Glyph] {
        &self.glyphs
    }

    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    /// Mapped code points in ascending order with their glyphs.
    pub fn character_map(&self) -> impl Iterator<Item = (u32, &Glyph)> + '_ {
        self.chars
            .iter()
            .map(move |(&code_point, &index)| (code_point, &self.glyphs[usize::from(index)]))
    }

    /// Number of mapped code points.
    pub fn character_count(&self) -> usize {
        self.chars.len()
    }
}
