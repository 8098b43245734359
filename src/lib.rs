#![warn(rust_2018_idioms)]

//! A queryable model of the OpenType `GSUB` and `GDEF` tables.
//!
//! This crate takes already-decoded font table records (glyph order, script
//! list, feature list, lookup list, glyph class definitions, ligature
//! carets, cmap mappings, horizontal metrics) and builds a normalized model
//! for font introspection and reporting:
//!
//! - a glyph registry, ordered by glyph index and indexed by name,
//! - a map from feature identity to the script/language systems that
//!   activate it,
//! - a deduplicated set of canonical substitution rules (single, multiple,
//!   alternate, ligature),
//! - a reverse index from lookup index to the features referencing it,
//! - glyph classification and ligature caret data.
//!
//! Reading the binary font file is out of scope; the record types in
//! [`tables`] are the handoff from a font table reader. Contextual and
//! chaining substitutions (lookup types 5, 6 and 8) are recognized but not
//! decoded and are reported as unsupported.
//!
//! # Example
//!
//! ```
//! use fontmodel::tables::{FontTables, GsubTable, Lookup, LookupList, SubstSubtable};
//! use fontmodel::FontModel;
//!
//! let tables = FontTables {
//!     glyph_order: vec!["f".to_string(), "i".to_string(), "f_i".to_string()],
//!     opt_gsub: Some(GsubTable {
//!         opt_lookup_list: Some(LookupList {
//!             lookups: vec![Lookup {
//!                 subtables: vec![SubstSubtable::Single {
//!                     mapping: vec![("f".to_string(), "f_i".to_string())],
//!                 }],
//!             }],
//!         }),
//!         ..GsubTable::default()
//!     }),
//!     ..FontTables::default()
//! };
//!
//! let model = FontModel::build(&tables)?;
//! assert_eq!(model.substitutions().len(), 1);
//! # Ok::<(), fontmodel::error::DecodeError>(())
//! ```

pub mod error;
pub mod gdef;
pub mod glyph;
pub mod gsub;
pub mod model;
pub mod tables;
pub mod tag;

pub use crate::model::FontModel;

/// Position of a glyph in the font's glyph order.
pub type GlyphIndex = u16;
