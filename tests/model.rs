use std::collections::BTreeSet;

use fontmodel::error::{DecodeError, Diagnostic};
use fontmodel::gdef::CaretValue;
use fontmodel::gsub::{FeatureKey, ScriptLabel, SubstKind, Substitution};
use fontmodel::tables::{
    CmapSubtable, FeatureList, FeatureRecord, FeatureTable, FontTables, GdefTable, GsubTable,
    HmtxTable, LangSys, LangSysRecord, Ligature, LigGlyph, LigatureSet, LongHorMetric, Lookup,
    LookupList, ScriptList, ScriptRecord, ScriptTable, SubstSubtable,
};
use fontmodel::{tag, FontModel};

fn names(names: &[&str]) -> Vec<String> {
    names.iter().map(|name| name.to_string()).collect()
}

fn feature(feature_tag: u32, lookup_indices: &[u16]) -> FeatureRecord {
    FeatureRecord {
        feature_tag,
        feature_table: FeatureTable {
            lookup_indices: lookup_indices.to_vec(),
        },
    }
}

fn langsys(feature_indices: &[u16]) -> LangSys {
    LangSys {
        feature_indices: feature_indices.to_vec(),
    }
}

/// A small synthetic font exercising every facet of the model: a ligature
/// behind an extension lookup, alternates, a localized single substitution,
/// an unreferenced lookup, an unsupported chaining subtable, glyph classes,
/// and ligature carets.
fn test_font() -> FontTables {
    let script_list = ScriptList {
        script_records: vec![ScriptRecord {
            script_tag: tag::LATN,
            script_table: ScriptTable {
                opt_default_langsys: Some(langsys(&[0, 1])),
                langsys_records: vec![LangSysRecord {
                    langsys_tag: tag::TRK,
                    langsys_table: langsys(&[2]),
                }],
            },
        }],
    };

    let feature_list = FeatureList {
        feature_records: vec![
            feature(tag::LIGA, &[1]),
            feature(tag::SALT, &[0]),
            feature(tag::LOCL, &[2]),
        ],
    };

    let lookup_list = LookupList {
        lookups: vec![
            // 0: alternates for 'a'
            Lookup {
                subtables: vec![SubstSubtable::Alternate {
                    alternates: vec![("a".to_string(), names(&["a.alt1", "a.alt2"]))],
                }],
            },
            // 1: f + i ligature, wrapped in an extension subtable
            Lookup {
                subtables: vec![SubstSubtable::Extension(Box::new(SubstSubtable::Ligature {
                    ligature_sets: vec![LigatureSet {
                        first_glyph: "f".to_string(),
                        ligatures: vec![Ligature {
                            ligature_glyph: "f_i".to_string(),
                            component_glyphs: names(&["i"]),
                        }],
                    }],
                }))],
            },
            // 2: localized form, with an undecodable chaining sibling
            Lookup {
                subtables: vec![
                    SubstSubtable::Unsupported(6),
                    SubstSubtable::Single {
                        mapping: vec![("A".to_string(), "B".to_string())],
                    },
                ],
            },
            // 3: referenced by no feature
            Lookup {
                subtables: vec![SubstSubtable::Single {
                    mapping: vec![("B".to_string(), "A".to_string())],
                }],
            },
        ],
    };

    let mut metrics = rustc_hash::FxHashMap::default();
    metrics.insert(
        "A".to_string(),
        LongHorMetric {
            advance_width: 556,
            lsb: 8,
        },
    );
    metrics.insert(
        "f_i".to_string(),
        LongHorMetric {
            advance_width: 612,
            lsb: 12,
        },
    );

    let mut mappings = rustc_hash::FxHashMap::default();
    for (code_point, name) in [
        (0x41, "A"),
        (0x42, "B"),
        (0x61, "a"),
        (0x66, "f"),
        (0x69, "i"),
    ] {
        mappings.insert(code_point, name.to_string());
    }

    let mut class_defs = rustc_hash::FxHashMap::default();
    class_defs.insert("f_i".to_string(), 2);
    class_defs.insert("acute".to_string(), 3);
    class_defs.insert("f.part".to_string(), 4);

    FontTables {
        glyph_order: names(&[
            ".notdef", "A", "B", "a", "a.alt1", "a.alt2", "f", "i", "f_i", "acute", "f.part",
        ]),
        opt_hmtx: Some(HmtxTable { metrics }),
        cmap_subtables: vec![CmapSubtable { mappings }],
        opt_gsub: Some(GsubTable {
            opt_script_list: Some(script_list),
            opt_feature_list: Some(feature_list),
            opt_lookup_list: Some(lookup_list),
        }),
        opt_gdef: Some(GdefTable {
            opt_glyph_classdef: Some(class_defs),
            opt_lig_caret_list: Some(vec![LigGlyph {
                glyph: "f_i".to_string(),
                caret_values: vec![CaretValue::Coordinate(306)],
            }]),
        }),
    }
}

#[test]
fn test_build_full_model() {
    let model = FontModel::build(&test_font()).unwrap();

    assert_eq!(model.glyphs().len(), 11);
    assert_eq!(model.substitutions().len(), 4);
    assert_eq!(
        model.diagnostics(),
        &[Diagnostic::UnsupportedLookup {
            lookup_index: 2,
            lookup_type: 6,
        }]
    );

    let lig = model.glyphs().get("f_i").unwrap();
    assert_eq!(lig.index, 8);
    assert_eq!(lig.advance_width, Some(612));
    assert_eq!(lig.class_name(), Some("ligature"));
    assert!(lig.unicodes.is_empty());

    let a = model.glyphs().get("A").unwrap();
    assert_eq!(a.code_point(), Some(0x41));
}

#[test]
fn test_summary_counts() {
    let model = FontModel::build(&test_font()).unwrap();
    let summary = model.summary();

    assert_eq!(summary.characters, 5);
    assert_eq!(summary.glyphs, 11);
    assert_eq!(summary.ligatures, 1);
    assert_eq!(summary.marks, 1);
    assert_eq!(summary.components, 1);
}

#[test]
fn test_feature_map_keys() {
    let model = FontModel::build(&test_font()).unwrap();

    let keys: Vec<&FeatureKey> = model.features().keys().collect();
    assert_eq!(keys.len(), 3);
    assert!(model.features().contains_key(&FeatureKey {
        feature_tag: tag::LIGA,
        lookup_indices: vec![1],
    }));

    let locl = &model.features()[&FeatureKey {
        feature_tag: tag::LOCL,
        lookup_indices: vec![2],
    }];
    assert_eq!(
        locl.iter().copied().collect::<Vec<_>>(),
        vec![ScriptLabel::langsys(tag::LATN, tag::TRK)]
    );
}

#[test]
fn test_lookup_indices_round_trip() {
    let model = FontModel::build(&test_font()).unwrap();
    let mapping = model.features_by_table();

    let referenced: BTreeSet<u16> = model
        .features()
        .keys()
        .flat_map(|key| key.lookup_indices.iter().copied())
        .collect();

    // A rule's lookup appears in the table index exactly when some feature
    // references that lookup.
    for rule in model.sorted_substitutions() {
        assert_eq!(
            mapping.contains_key(&rule.lookup_index),
            referenced.contains(&rule.lookup_index),
            "lookup {}",
            rule.lookup_index
        );
    }
    assert!(mapping.contains_key(&1));
    assert!(!mapping.contains_key(&3));
}

#[test]
fn test_substitution_entries_join() {
    let model = FontModel::build(&test_font()).unwrap();
    let entries = model.substitution_entries();

    assert_eq!(entries.len(), 4);
    // Sorted by lookup index; within one lookup by input sequence.
    let order: Vec<u16> = entries
        .iter()
        .map(|entry| entry.substitution.lookup_index)
        .collect();
    assert_eq!(order, vec![0, 1, 2, 3]);

    let ligature = &entries[1];
    assert_eq!(ligature.substitution.input, names(&["f", "i"]));
    assert_eq!(ligature.substitution.kind, SubstKind::Ligature);
    assert_eq!(ligature.features, vec![tag::LIGA]);
    assert_eq!(ligature.scripts, vec![ScriptLabel::script(tag::LATN)]);

    let localized = &entries[2];
    assert_eq!(localized.features, vec![tag::LOCL]);
    assert_eq!(
        localized.scripts,
        vec![ScriptLabel::langsys(tag::LATN, tag::TRK)]
    );

    let orphan = &entries[3];
    assert_eq!(orphan.substitution.input, names(&["B"]));
    assert!(orphan.features.is_empty());
    assert!(orphan.scripts.is_empty());
}

#[test]
fn test_extension_lookup_decodes_as_inner_type() {
    let model = FontModel::build(&test_font()).unwrap();

    let expected = Substitution {
        input: names(&["f", "i"]),
        output: vec![names(&["f_i"])],
        lookup_index: 1,
        kind: SubstKind::Ligature,
    };
    assert!(model.substitutions().contains(&expected));
}

#[test]
fn test_caret_list() {
    let model = FontModel::build(&test_font()).unwrap();

    assert_eq!(
        model.caret_list().get("f_i"),
        Some(&vec![CaretValue::Coordinate(306)])
    );
    // The mark glyph is classified but owns no carets; missing caret entry
    // says nothing about ligature-ness.
    assert_eq!(model.caret_list().get("acute"), None);
    assert_eq!(
        model.glyphs().get("acute").unwrap().class_name(),
        Some("mark")
    );
}

#[test]
fn test_empty_feature_list_still_decodes_rules() {
    let mut tables = test_font();
    let gsub = tables.opt_gsub.as_mut().unwrap();
    gsub.opt_script_list = None;
    gsub.opt_feature_list = None;

    let model = FontModel::build(&tables).unwrap();

    assert!(model.features().is_empty());
    assert!(model.features_by_table().is_empty());
    assert_eq!(model.substitutions().len(), 4);
    for entry in model.substitution_entries() {
        assert!(entry.features.is_empty());
        assert!(entry.scripts.is_empty());
    }
}

#[test]
fn test_missing_tables_yield_empty_model() {
    let model = FontModel::build(&FontTables::default()).unwrap();

    assert!(model.glyphs().is_empty());
    assert!(model.features().is_empty());
    assert!(model.substitutions().is_empty());
    assert!(model.caret_list().is_empty());
    assert!(model.diagnostics().is_empty());
}

#[test]
fn test_inconsistent_script_reference_aborts() {
    let mut tables = test_font();
    let gsub = tables.opt_gsub.as_mut().unwrap();
    let script_list = gsub.opt_script_list.as_mut().unwrap();
    script_list.script_records[0]
        .script_table
        .opt_default_langsys = Some(langsys(&[7]));

    let err = FontModel::build(&tables).unwrap_err();
    assert_eq!(
        err,
        DecodeError::FeatureIndexOutOfBounds {
            script_tag: tag::LATN,
            feature_index: 7,
            feature_count: 3,
        }
    );
    assert_eq!(
        err.to_string(),
        "script 'latn' references feature index 7 but the feature list has 3 entries"
    );
}

#[test]
fn test_unmapped_code_point_diagnostic() {
    let mut tables = test_font();
    tables.cmap_subtables[0]
        .mappings
        .insert(0x1E9E, "Germandbls".to_string());

    let model = FontModel::build(&tables).unwrap();

    assert!(model.diagnostics().contains(&Diagnostic::UnmappedCodePoint {
        code_point: 0x1E9E,
        glyph_name: "Germandbls".to_string(),
    }));
    assert!(model
        .glyphs()
        .character_map()
        .all(|(code_point, _)| code_point != 0x1E9E));
}

#[test]
fn test_sorted_substitutions_are_stable() {
    let model = FontModel::build(&test_font()).unwrap();
    let first: Vec<Substitution> = model
        .sorted_substitutions()
        .into_iter()
        .cloned()
        .collect();
    let again = FontModel::build(&test_font()).unwrap();
    let second: Vec<Substitution> = again
        .sorted_substitutions()
        .into_iter()
        .cloned()
        .collect();

    assert_eq!(first, second);
}
