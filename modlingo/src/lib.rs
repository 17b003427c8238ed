#![forbid(unsafe_code)]
//! Placeholder-safe auto-translation for xTranslator SST XML exports of game mods.
//!
//! modlingo reads the source/destination string pairs extracted from a mod, fills in a
//! best-effort dictionary translation for visible strings that are still untranslated, and
//! writes two files xTranslator can import back.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use modlingo::{Lexicon, TransformOptions, transform, transform_with};
//!
//! // Built-in English to Russian table, outputs next to the input
//! let report = transform("Dawnguard_english_russian.xml")?;
//! println!("{} of {} visible strings translated", report.changed, report.visible);
//!
//! // Or with a custom table and options
//! let lexicon = Lexicon::builtin().with_word("dragon", "дракон");
//! let options = TransformOptions { dry_run: true, ..Default::default() };
//! transform_with("Dawnguard_english_russian.xml", &lexicon, &options)?;
//! # Ok::<(), modlingo::Error>(())
//! ```
//!
//! # Pipeline
//!
//! - **Visibility**: settings, keywords, worldspaces, cells, navmeshes, asset references and
//!   short codes are skipped ([`visibility`]).
//! - **Placeholders**: markup and format tokens are split out and never translated
//!   ([`placeholder`]).
//! - **Opener rules**: fixed sentence openers ("I have found ") are rewritten whole.
//! - **Dictionary**: remaining words are substituted one by one, keeping title case
//!   ([`translate`]).
//! - **Outputs**: the full document (`*_translated_formid.xml`) and a strings-only document
//!   (`*_translated_strings_only.xml`) ([`formats`]).

pub mod error;
pub mod formats;
pub mod lexicon;
pub mod placeholder;
pub mod traits;
pub mod transform;
pub mod translate;
pub mod types;
pub mod visibility;

// Re-export most used types for easy consumption
pub use crate::{
    error::Error,
    formats::FormatType,
    lexicon::{Lexicon, OpenerRule},
    transform::{
        EntryOutcome, ResourceStats, TransformOptions, TransformReport, TranslationCounts, survey,
        transform, transform_with, translate_entry, translate_resource,
    },
    translate::{Translator, has_target_script},
    types::{Entry, Metadata, Resource},
    visibility::is_visible,
};
