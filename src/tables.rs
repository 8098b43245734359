//! Decoded font table records.
//!
//! These are the plain, already-parsed records handed over by a font table
//! reader. Glyphs are identified by name throughout; list positions carry
//! the indices the records refer to (feature indices into the feature list,
//! lookup indices into the lookup list).

use rustc_hash::FxHashMap;

use crate::gdef::CaretValue;

/// All decoded tables of one font, as far as this crate consumes them.
///
/// Every table is optional except the glyph order. A missing table yields an
/// empty facet in the built model, never an error.
#[derive(Clone, Debug, Default)]
pub struct FontTables {
    /// Canonical glyph name ordering. Defines glyph indices.
    pub glyph_order: Vec<String>,
    pub opt_hmtx: Option<HmtxTable>,
    /// Unicode cmap subtables. A font may expose several; all are merged.
    pub cmap_subtables: Vec<CmapSubtable>,
    pub opt_gsub: Option<GsubTable>,
    pub opt_gdef: Option<GdefTable>,
}

/// Horizontal metrics keyed by glyph name.
#[derive(Clone, Debug, Default)]
pub struct HmtxTable {
    pub metrics: FxHashMap<String, LongHorMetric>,
}

/// A `longHorMetric` record from the `hmtx` table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LongHorMetric {
    pub advance_width: u16,
    pub lsb: i16,
}

/// One Unicode cmap subtable: code point to glyph name.
#[derive(Clone, Debug, Default)]
pub struct CmapSubtable {
    pub mappings: FxHashMap<u32, String>,
}

/// The `GSUB` table: script list, feature list, and lookup list.
#[derive(Clone, Debug, Default)]
pub struct GsubTable {
    pub opt_script_list: Option<ScriptList>,
    pub opt_feature_list: Option<FeatureList>,
    pub opt_lookup_list: Option<LookupList>,
}

#[derive(Clone, Debug, Default)]
pub struct ScriptList {
    pub script_records: Vec<ScriptRecord>,
}

#[derive(Clone, Debug)]
pub struct ScriptRecord {
    pub script_tag: u32,
    pub script_table: ScriptTable,
}

#[derive(Clone, Debug, Default)]
pub struct ScriptTable {
    pub opt_default_langsys: Option<LangSys>,
    pub langsys_records: Vec<LangSysRecord>,
}

#[derive(Clone, Debug)]
pub struct LangSysRecord {
    pub langsys_tag: u32,
    pub langsys_table: LangSys,
}

/// The feature indices one language system activates.
#[derive(Clone, Debug, Default)]
pub struct LangSys {
    pub feature_indices: Vec<u16>,
}

#[derive(Clone, Debug, Default)]
pub struct FeatureList {
    pub feature_records: Vec<FeatureRecord>,
}

#[derive(Clone, Debug)]
pub struct FeatureRecord {
    pub feature_tag: u32,
    pub feature_table: FeatureTable,
}

/// The lookup indices one feature drives.
#[derive(Clone, Debug, Default)]
pub struct FeatureTable {
    pub lookup_indices: Vec<u16>,
}

#[derive(Clone, Debug, Default)]
pub struct LookupList {
    pub lookups: Vec<Lookup>,
}

/// A lookup: one or more subtables of a single substitution type.
#[derive(Clone, Debug, Default)]
pub struct Lookup {
    pub subtables: Vec<SubstSubtable>,
}

/// A decoded lookup subtable, tagged by substitution type.
///
/// Types 1-4 carry their content; type 7 wraps the inner subtable it points
/// at; everything else (contextual 5, chaining 6, reverse chaining 8, or
/// unrecognized codes) is carried as `Unsupported` with the raw type code.
#[derive(Clone, Debug)]
pub enum SubstSubtable {
    /// Type 1: one input glyph to one output glyph.
    Single { mapping: Vec<(String, String)> },
    /// Type 2: one input glyph to a sequence of output glyphs.
    Multiple { mapping: Vec<(String, Vec<String>)> },
    /// Type 3: one input glyph to a list of alternative glyphs.
    Alternate { alternates: Vec<(String, Vec<String>)> },
    /// Type 4: glyph sequences to ligature glyphs, grouped by first glyph.
    Ligature { ligature_sets: Vec<LigatureSet> },
    /// Type 7: extension wrapper around the actual subtable.
    Extension(Box<SubstSubtable>),
    Unsupported(u16),
}

impl SubstSubtable {
    /// Strip one level of extension indirection. Real fonts nest at most
    /// once, so a single unwrap normalizes the subtable for dispatch.
    pub fn unwrap_extension(&self) -> &SubstSubtable {
        match self {
            SubstSubtable::Extension(inner) => inner,
            other => other,
        }
    }
}

/// The ligatures beginning with one first glyph.
#[derive(Clone, Debug)]
pub struct LigatureSet {
    pub first_glyph: String,
    pub ligatures: Vec<Ligature>,
}

#[derive(Clone, Debug)]
pub struct Ligature {
    pub ligature_glyph: String,
    /// Component glyphs after the first.
    pub component_glyphs: Vec<String>,
}

/// The `GDEF` table: glyph classes and ligature caret positions.
#[derive(Clone, Debug, Default)]
pub struct GdefTable {
    pub opt_glyph_classdef: Option<FxHashMap<String, u16>>,
    pub opt_lig_caret_list: Option<Vec<LigGlyph>>,
}

/// Caret values for one ligature glyph, in logical component order.
#[derive(Clone, Debug)]
pub struct LigGlyph {
    pub glyph: String,
    pub caret_values: Vec<CaretValue>,
}
