//! The transform run: read an SST export, translate its untranslated visible entries, and
//! write the two output variants.
//!
//! ```rust,no_run
//! let report = modlingo::transform("Dawnguard_english_russian.xml")?;
//! println!(
//!     "{} of {} visible strings translated; wrote {} and {}",
//!     report.changed,
//!     report.visible,
//!     report.full_output.display(),
//!     report.strings_only_output.display(),
//! );
//! # Ok::<(), modlingo::Error>(())
//! ```

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info};

use crate::{
    error::Error,
    formats::{FormatType, SstFormat, StringsOnlyFormat},
    lexicon::Lexicon,
    placeholder,
    traits::Parser,
    translate::{Translator, has_target_script},
    types::{Entry, Resource},
    visibility::is_entry_visible,
};

/// Per-run options for [`transform_with`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransformOptions {
    /// Directory for the outputs; `None` writes them next to the input.
    pub output_dir: Option<PathBuf>,
    /// Translate and count, but write nothing.
    pub dry_run: bool,
}

/// What a transform run produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransformReport {
    pub input: PathBuf,
    pub full_output: PathBuf,
    pub strings_only_output: PathBuf,
    /// Entries whose destination was filled in by this run.
    pub changed: usize,
    /// Entries that passed the visibility filter.
    pub visible: usize,
    /// All entries in the document.
    pub total: usize,
    /// False for dry runs.
    pub written: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TranslationCounts {
    pub changed: usize,
    pub visible: usize,
}

/// How a single entry fared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryOutcome {
    /// Rejected by the visibility filter.
    Hidden,
    /// Destination already holds target-script text.
    AlreadyTranslated,
    /// Destination was replaced with a translation.
    Translated,
    /// Nothing in the lexicon applied; destination left as found.
    Missed,
}

/// Translation coverage of a resource, without changing it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ResourceStats {
    pub total: usize,
    pub visible: usize,
    /// Visible entries whose destination already holds target-script text.
    pub translated: usize,
    /// Visible entries still waiting for a translation.
    pub pending: usize,
}

/// Runs the whole transform with the built-in lexicon, writing next to the input.
pub fn transform<P: AsRef<Path>>(input: P) -> Result<TransformReport, Error> {
    transform_with(input, &Lexicon::builtin(), &TransformOptions::default())
}

/// Runs the whole transform with a custom lexicon and options.
///
/// Parse failures abort before anything is written. The full variant is written before
/// the strings-only one; if the second write fails the first file stays in place.
pub fn transform_with<P: AsRef<Path>>(
    input: P,
    lexicon: &Lexicon,
    options: &TransformOptions,
) -> Result<TransformReport, Error> {
    let input = input.as_ref();
    let mut document = SstFormat::read_from(input)?;
    let mut resource = Resource::from(&document);
    debug!(
        input = %input.display(),
        entries = resource.entries.len(),
        "parsed resource"
    );

    let counts = translate_resource(&mut resource, lexicon);
    document.apply_destinations(&resource.entries)?;

    let output_dir = options.output_dir.as_deref();
    let full_output = FormatType::Full.output_path(input, output_dir);
    let strings_only_output = FormatType::StringsOnly.output_path(input, output_dir);

    if !options.dry_run {
        document.write_to(&full_output)?;
        info!(variant = %FormatType::Full, path = %full_output.display(), "wrote resource");
        StringsOnlyFormat::from(&resource).write_to(&strings_only_output)?;
        info!(
            variant = %FormatType::StringsOnly,
            path = %strings_only_output.display(),
            "wrote resource"
        );
    }

    info!(
        changed = counts.changed,
        visible = counts.visible,
        total = resource.entries.len(),
        dry_run = options.dry_run,
        "transform finished"
    );

    Ok(TransformReport {
        input: input.to_path_buf(),
        full_output,
        strings_only_output,
        changed: counts.changed,
        visible: counts.visible,
        total: resource.entries.len(),
        written: !options.dry_run,
    })
}

/// Translates every eligible entry of `resource` in place.
pub fn translate_resource(resource: &mut Resource, lexicon: &Lexicon) -> TranslationCounts {
    let translator = Translator::new(lexicon);
    let mut counts = TranslationCounts::default();
    for entry in &mut resource.entries {
        match translate_entry(entry, &translator) {
            EntryOutcome::Hidden => {}
            EntryOutcome::Translated => {
                counts.visible += 1;
                counts.changed += 1;
            }
            EntryOutcome::AlreadyTranslated | EntryOutcome::Missed => counts.visible += 1,
        }
    }
    counts
}

/// Translates one entry in place. `source` is never modified; `dest` only changes when
/// the outcome is [`EntryOutcome::Translated`].
pub fn translate_entry(entry: &mut Entry, translator: &Translator<'_>) -> EntryOutcome {
    if !is_entry_visible(entry) {
        debug!(
            editor_id = %entry.editor_id,
            record_type = %entry.record_type,
            "skipped hidden entry"
        );
        return EntryOutcome::Hidden;
    }
    if has_target_script(&entry.dest) {
        return EntryOutcome::AlreadyTranslated;
    }

    let translated = translator.translate(&entry.source);
    if !has_target_script(&translated) {
        debug!(
            editor_id = %entry.editor_id,
            record_type = %entry.record_type,
            "no lexicon match, entry left as found"
        );
        return EntryOutcome::Missed;
    }
    debug_assert!(placeholder::placeholders_preserved(&entry.source, &translated));

    debug!(
        editor_id = %entry.editor_id,
        record_type = %entry.record_type,
        "translated entry"
    );
    entry.dest = translated;
    EntryOutcome::Translated
}

/// Counts visible, already translated and pending entries.
pub fn survey(resource: &Resource) -> ResourceStats {
    let mut stats = ResourceStats {
        total: resource.entries.len(),
        ..Default::default()
    };
    for entry in resource.entries.iter().filter(|e| is_entry_visible(e)) {
        stats.visible += 1;
        if has_target_script(&entry.dest) {
            stats.translated += 1;
        } else {
            stats.pending += 1;
        }
    }
    stats
}
