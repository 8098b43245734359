//! The assembled font model.

use std::collections::{BTreeMap, BTreeSet};

use itertools::Itertools;
use rustc_hash::FxHashSet;

use crate::error::{DecodeError, Diagnostic, Diagnostics};
use crate::gdef::{self, CaretValue};
use crate::glyph::GlyphRegistry;
use crate::gsub::{self, FeatureMap, ScriptLabel, Substitution};
use crate::tables::FontTables;

/// The queryable model built from one font's decoded tables.
///
/// Built once by [`FontModel::build`] and immutable afterwards, so shared
/// read access from several reporting consumers is safe.
#[derive(Debug)]
pub struct FontModel {
    registry: GlyphRegistry,
    features: FeatureMap,
    substitutions: FxHashSet<Substitution>,
    caret_list: BTreeMap<String, Vec<CaretValue>>,
    diagnostics: Vec<Diagnostic>,
}

/// One substitution rule joined with the features and scripts that can
/// activate its lookup. Both lists are empty when no feature references
/// the lookup.
#[derive(Clone, Debug)]
pub struct SubstitutionEntry<'a> {
    pub substitution: &'a Substitution,
    /// Referencing feature tags, ascending, deduplicated.
    pub features: Vec<u32>,
    /// Script labels of those features, ascending, deduplicated.
    pub scripts: Vec<ScriptLabel>,
}

/// Aggregate counts over the model.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Summary {
    pub characters: usize,
    pub glyphs: usize,
    pub ligatures: usize,
    pub marks: usize,
    pub components: usize,
}

impl FontModel {
    /// Build the model from decoded font tables.
    ///
    /// Missing tables yield empty facets. Recoverable inconsistencies are
    /// collected as diagnostics; a structurally inconsistent `GSUB` table
    /// aborts with an error and no model is published.
    pub fn build(tables: &FontTables) -> Result<FontModel, DecodeError> {
        let mut diagnostics = Diagnostics::new();

        let (features, substitutions) = match &tables.opt_gsub {
            Some(gsub_table) => {
                let features = gsub::resolve_features(
                    gsub_table.opt_script_list.as_ref(),
                    gsub_table.opt_feature_list.as_ref(),
                )?;
                let substitutions = match &gsub_table.opt_lookup_list {
                    Some(lookup_list) => gsub::decode_lookups(lookup_list, &mut diagnostics),
                    None => FxHashSet::default(),
                };
                (features, substitutions)
            }
            None => (FeatureMap::new(), FxHashSet::default()),
        };

        let registry = GlyphRegistry::build(tables, &mut diagnostics);

        let caret_list = tables
            .opt_gdef
            .as_ref()
            .and_then(|gdef_table| gdef_table.opt_lig_caret_list.as_ref())
            .map(|lig_glyphs| {
                lig_glyphs
                    .iter()
                    .map(|lig_glyph| (lig_glyph.glyph.clone(), lig_glyph.caret_values.clone()))
                    .collect()
            })
            .unwrap_or_default();

        Ok(FontModel {
            registry,
            features,
            substitutions,
            caret_list,
            diagnostics: diagnostics.into_vec(),
        })
    }

    /// The glyph registry, ordered by glyph index.
    pub fn glyphs(&self) -> &GlyphRegistry {
        &self.registry
    }

    /// Feature identities and the script labels activating them.
    pub fn features(&self) -> &FeatureMap {
        &self.features
    }

    /// The deduplicated substitution rule set.
    pub fn substitutions(&self) -> &FxHashSet<Substitution> {
        &self.substitutions
    }

    /// Rules sorted by `(lookup_index, input)`.
    pub fn sorted_substitutions(&self) -> Vec<&Substitution> {
        gsub::sorted_substitutions(&self.substitutions)
    }

    /// Lookup index to the `(feature tag, scripts)` pairs referencing it.
    ///
    /// Recomputed from the feature map on each call.
    pub fn features_by_table(&self) -> BTreeMap<u16, BTreeSet<(u32, Vec<ScriptLabel>)>> {
        gsub::features_by_table(&self.features)
    }

    /// Ligature caret values by glyph name.
    ///
    /// Absence of an entry does not mean the glyph is not a ligature; the
    /// glyph class is the authoritative indicator.
    pub fn caret_list(&self) -> &BTreeMap<String, Vec<CaretValue>> {
        &self.caret_list
    }

    /// Non-fatal conditions recovered from while building.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// The sorted substitution rules joined with the features and scripts
    /// referencing each rule's lookup.
    pub fn substitution_entries(&self) -> Vec<SubstitutionEntry<'_>> {
        let mapping = self.features_by_table();
        self.sorted_substitutions()
            .into_iter()
            .map(|substitution| match mapping.get(&substitution.lookup_index) {
                Some(entries) => {
                    let features = entries
                        .iter()
                        .map(|&(feature_tag, _)| feature_tag)
                        .dedup()
                        .collect();
                    let scripts = entries
                        .iter()
                        .flat_map(|(_, scripts)| scripts.iter().copied())
                        .sorted()
                        .dedup()
                        .collect();
                    SubstitutionEntry {
                        substitution,
                        features,
                        scripts,
                    }
                }
                None => SubstitutionEntry {
                    substitution,
                    features: Vec::new(),
                    scripts: Vec::new(),
                },
            })
            .collect()
    }

    pub fn summary(&self) -> Summary {
        let mut summary = Summary {
            characters: self.registry.character_count(),
            glyphs: self.registry.len(),
            ligatures: 0,
            marks: 0,
            components: 0,
        };
        for glyph in self.registry.glyphs() {
            match glyph.glyph_class {
                gdef::GLYPH_CLASS_LIGATURE => summary.ligatures += 1,
                gdef::GLYPH_CLASS_MARK => summary.marks += 1,
                gdef::GLYPH_CLASS_COMPONENT => summary.components += 1,
                _ => {}
            }
        }
        summary
    }
}
