//! Decoding of `GSUB` records into features, scripts, and substitution rules.
//!
//! > The Glyph Substitution (GSUB) table provides data for substitution of glyphs for appropriate
//! > rendering of scripts, such as cursively-connecting forms in Arabic script, or for advanced
//! > typographic effects, such as ligatures.
//!
//! — <https://docs.microsoft.com/en-us/typography/opentype/spec/gsub>
//!
//! Three passes are provided: [`resolve_features`] walks the script list and
//! feature list into a [`FeatureMap`], [`decode_lookups`] normalizes the
//! lookup list into canonical [`Substitution`] rules, and
//! [`features_by_table`] inverts the feature map per lookup index. The first
//! two read disjoint inputs and are independent of each other.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use itertools::Itertools;
use lazy_static::lazy_static;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::error::{DecodeError, Diagnostic, Diagnostics};
use crate::tables::{FeatureList, LangSys, LookupList, ScriptList, SubstSubtable};
use crate::tag::{self, DisplayTag};

/// A script label like `latn`, or a script-language label like `latn-TRK`.
///
/// A plain script label stands for the script's default language system.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ScriptLabel {
    pub script_tag: u32,
    pub langsys_tag: Option<u32>,
}

impl ScriptLabel {
    pub fn script(script_tag: u32) -> Self {
        ScriptLabel {
            script_tag,
            langsys_tag: None,
        }
    }

    pub fn langsys(script_tag: u32, langsys_tag: u32) -> Self {
        ScriptLabel {
            script_tag,
            langsys_tag: Some(langsys_tag),
        }
    }
}

impl fmt::Display for ScriptLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.langsys_tag {
            Some(langsys_tag) => write!(
                f,
                "{}-{}",
                DisplayTag(self.script_tag),
                DisplayTag(langsys_tag)
            ),
            None => DisplayTag(self.script_tag).fmt(f),
        }
    }
}

/// Identity of a feature: its tag plus the exact lookups it drives.
///
/// The lookup indices are part of the identity because the same tag can
/// occur more than once driving disjoint lookups; those are distinct
/// features and are never merged.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FeatureKey {
    pub feature_tag: u32,
    pub lookup_indices: Vec<u16>,
}

/// Feature identity to the script labels that activate it.
pub type FeatureMap = BTreeMap<FeatureKey, BTreeSet<ScriptLabel>>;

/// Build the feature map from the script list and feature list.
///
/// A missing feature list yields an empty map. A script record referencing
/// a feature index beyond the feature list aborts with an error since the
/// reader produced an internally inconsistent table.
pub fn resolve_features(
    opt_script_list: Option<&ScriptList>,
    opt_feature_list: Option<&FeatureList>,
) -> Result<FeatureMap, DecodeError> {
    let feature_list = match opt_feature_list {
        Some(feature_list) => feature_list,
        None => return Ok(FeatureMap::new()),
    };

    let mut scripts: Vec<BTreeSet<ScriptLabel>> =
        vec![BTreeSet::new(); feature_list.feature_records.len()];
    if let Some(script_list) = opt_script_list {
        for script_record in &script_list.script_records {
            let script_table = &script_record.script_table;
            if let Some(default_langsys) = &script_table.opt_default_langsys {
                let label = ScriptLabel::script(script_record.script_tag);
                add_script_label(&mut scripts, default_langsys, label)?;
            }
            for langsys_record in &script_table.langsys_records {
                let label =
                    ScriptLabel::langsys(script_record.script_tag, langsys_record.langsys_tag);
                add_script_label(&mut scripts, &langsys_record.langsys_table, label)?;
            }
        }
    }

    let mut features = FeatureMap::new();
    for (index, feature_record) in feature_list.feature_records.iter().enumerate() {
        let key = FeatureKey {
            feature_tag: feature_record.feature_tag,
            lookup_indices: feature_record.feature_table.lookup_indices.clone(),
        };
        features
            .entry(key)
            .or_insert_with(BTreeSet::new)
            .extend(scripts[index].iter().copied());
    }
    Ok(features)
}

fn add_script_label(
    scripts: &mut [BTreeSet<ScriptLabel>],
    langsys: &LangSys,
    label: ScriptLabel,
) -> Result<(), DecodeError> {
    for &feature_index in &langsys.feature_indices {
        match scripts.get_mut(usize::from(feature_index)) {
            Some(labels) => {
                labels.insert(label);
            }
            None => {
                return Err(DecodeError::FeatureIndexOutOfBounds {
                    script_tag: label.script_tag,
                    feature_index,
                    feature_count: scripts.len(),
                })
            }
        }
    }
    Ok(())
}

/// The substitution kinds this crate decodes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SubstKind {
    Single,
    Multiple,
    Alternate,
    Ligature,
}

/// A canonical substitution rule.
///
/// `input` is the matched glyph name sequence; `output` holds one or more
/// alternatives, each itself a glyph sequence. Single and Multiple rules
/// have exactly one alternative; Alternate rules may have many single-glyph
/// alternatives; Ligature rules have an input of length two or more and one
/// single-glyph output.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Substitution {
    pub input: Vec<String>,
    pub output: Vec<Vec<String>>,
    /// Index of the lookup this rule was decoded from.
    pub lookup_index: u16,
    pub kind: SubstKind,
}

/// Decode every lookup subtable into canonical rules.
///
/// Rules are collected into a set keyed by structural equality, so the same
/// rule discovered through redundant subtables collapses to one entry.
/// Subtables of unsupported types are skipped with a diagnostic and do not
/// affect their siblings.
pub fn decode_lookups(
    lookup_list: &LookupList,
    diagnostics: &mut Diagnostics,
) -> FxHashSet<Substitution> {
    let mut rules = FxHashSet::default();
    for (index, lookup) in lookup_list.lookups.iter().enumerate() {
        let lookup_index = index as u16;
        for subtable in &lookup.subtables {
            decode_subtable(
                lookup_index,
                subtable.unwrap_extension(),
                &mut rules,
                diagnostics,
            );
        }
    }
    rules
}

fn decode_subtable(
    lookup_index: u16,
    subtable: &SubstSubtable,
    rules: &mut FxHashSet<Substitution>,
    diagnostics: &mut Diagnostics,
) {
    match subtable {
        SubstSubtable::Single { mapping } => {
            for (glyph, substitute) in mapping {
                rules.insert(Substitution {
                    input: vec![glyph.clone()],
                    output: vec![vec![substitute.clone()]],
                    lookup_index,
                    kind: SubstKind::Single,
                });
            }
        }
        SubstSubtable::Multiple { mapping } => {
            for (glyph, sequence) in mapping {
                rules.insert(Substitution {
                    input: vec![glyph.clone()],
                    output: vec![sequence.clone()],
                    lookup_index,
                    kind: SubstKind::Multiple,
                });
            }
        }
        SubstSubtable::Alternate { alternates } => {
            for (glyph, alternatives) in alternates {
                rules.insert(Substitution {
                    input: vec![glyph.clone()],
                    output: alternatives
                        .iter()
                        .map(|alternative| vec![alternative.clone()])
                        .collect(),
                    lookup_index,
                    kind: SubstKind::Alternate,
                });
            }
        }
        SubstSubtable::Ligature { ligature_sets } => {
            for ligature_set in ligature_sets {
                for ligature in &ligature_set.ligatures {
                    let mut input = Vec::with_capacity(1 + ligature.component_glyphs.len());
                    input.push(ligature_set.first_glyph.clone());
                    input.extend(ligature.component_glyphs.iter().cloned());
                    rules.insert(Substitution {
                        input,
                        output: vec![vec![ligature.ligature_glyph.clone()]],
                        lookup_index,
                        kind: SubstKind::Ligature,
                    });
                }
            }
        }
        // Already unwrapped once; deeper nesting is invalid.
        SubstSubtable::Extension(_) => diagnostics.report(Diagnostic::UnsupportedLookup {
            lookup_index,
            lookup_type: 7,
        }),
        SubstSubtable::Unsupported(lookup_type) => {
            diagnostics.report(Diagnostic::UnsupportedLookup {
                lookup_index,
                lookup_type: *lookup_type,
            })
        }
    }
}

/// Rules ordered by `(lookup_index, input)` for reproducible output.
///
/// Remaining fields break any ties, making the order total and stable
/// across repeated calls on the same set.
pub fn sorted_substitutions(substitutions: &FxHashSet<Substitution>) -> Vec<&Substitution> {
    substitutions
        .iter()
        .sorted_by(|a, b| {
            a.lookup_index
                .cmp(&b.lookup_index)
                .then_with(|| a.input.cmp(&b.input))
                .then_with(|| a.kind.cmp(&b.kind))
                .then_with(|| a.output.cmp(&b.output))
        })
        .collect()
}

/// Invert the feature map: lookup index to the `(feature tag, sorted script
/// labels)` pairs referencing it.
///
/// A pure fan-out over the feature keys' lookup indices; deterministic for
/// a given feature map and cheap to recompute on demand.
pub fn features_by_table(
    features: &FeatureMap,
) -> BTreeMap<u16, BTreeSet<(u32, Vec<ScriptLabel>)>> {
    let mut mapping: BTreeMap<u16, BTreeSet<(u32, Vec<ScriptLabel>)>> = BTreeMap::new();
    for (key, scripts) in features {
        let scripts: Vec<ScriptLabel> = scripts.iter().copied().collect();
        for &lookup_index in &key.lookup_indices {
            mapping
                .entry(lookup_index)
                .or_default()
                .insert((key.feature_tag, scripts.clone()));
        }
    }
    mapping
}

/// Descriptions of registered features, for display.
///
/// <https://learn.microsoft.com/en-us/typography/opentype/spec/featurelist>
pub const REGISTERED_FEATURES: &[(u32, &str)] = &[
    (tag::AALT, "All Alternates"),
    (tag::C2SC, "Small Capitals From Capitals"),
    (tag::CALT, "Contextual Alternates"),
    (tag::CASE, "Case-Sensitive Forms"),
    (tag::CCMP, "Glyph Composition/Decomposition"),
    (tag::CLIG, "Contextual Ligatures"),
    (tag::DLIG, "Discretionary Ligatures"),
    (tag::FINA, "Terminal Forms"),
    (tag::FRAC, "Fractions"),
    (tag::FWID, "Full Width"),
    (tag::HLIG, "Historical Ligatures"),
    (tag::HWID, "Half Width"),
    (tag::INIT, "Initial Forms"),
    (tag::ISOL, "Isolated Forms"),
    (tag::LIGA, "Standard Ligatures"),
    (tag::LNUM, "Lining Figures"),
    (tag::LOCL, "Localized Forms"),
    (tag::MEDI, "Medial Forms"),
    (tag::ONUM, "Oldstyle Figures"),
    (tag::PNUM, "Proportional Figures"),
    (tag::PWID, "Proportional Width"),
    (tag::RLIG, "Required Ligatures"),
    (tag::RTLM, "Right-to-left Mirrored Forms"),
    (tag::SALT, "Stylistic Alternates"),
    (tag::SINF, "Scientific Inferiors"),
    (tag::SMCP, "Small Capitals"),
    (tag::SS01, "Stylistic Set 1"),
    (tag::SS02, "Stylistic Set 2"),
    (tag::SS03, "Stylistic Set 3"),
    (tag::SUBS, "Subscript"),
    (tag::SUPS, "Superscript"),
    (tag::TNUM, "Tabular Figures"),
    (tag::VERT, "Vertical Writing"),
    (tag::VRT2, "Vertical Alternates and Rotation"),
    (tag::ZERO, "Slashed Zero"),
];

lazy_static! {
    static ref FEATURE_NAMES: FxHashMap<u32, &'static str> =
        REGISTERED_FEATURES.iter().copied().collect();
}

/// Description of a registered feature tag, if known.
pub fn feature_name(feature_tag: u32) -> Option<&'static str> {
    FEATURE_NAMES.get(&feature_tag).copied()
}
