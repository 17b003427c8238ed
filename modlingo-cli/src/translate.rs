use std::path::PathBuf;

use modlingo::{TransformOptions, TransformReport, Translator, transform_with};
use tracing::{error, info};

use crate::config::resolve_lexicon;
use crate::path_glob::expand_input_globs;
use crate::validation::{validate_file_path, validate_output_dir, validate_output_path};

pub const IMPORT_HINT: &str = "Import into xTranslator with \"FormID references\"; \
use the strings-only file with \"Strings only\" if needed.";

#[derive(Debug, Clone, Default)]
pub struct TranslateOptions {
    pub inputs: Vec<String>,
    pub lexicon: Option<String>,
    pub extend: bool,
    pub out_dir: Option<String>,
    pub dry_run: bool,
    pub report_json: Option<String>,
}

fn write_report(path: &str, reports: &[TransformReport]) -> Result<(), String> {
    validate_output_path(path)?;
    let text = serde_json::to_string_pretty(reports)
        .map_err(|e| format!("Failed to serialize report JSON: {}", e))?;
    std::fs::write(path, text).map_err(|e| format!("Failed to write report JSON '{}': {}", path, e))
}

fn print_report(report: &TransformReport) {
    if report.written {
        println!(
            "Created: {}, {}",
            report.full_output.display(),
            report.strings_only_output.display()
        );
        println!(
            "Auto-translation applied to {} of {} visible strings.",
            report.changed, report.visible
        );
    } else {
        println!(
            "Dry run: {} would get auto-translation for {} of {} visible strings.",
            report.input.display(),
            report.changed,
            report.visible
        );
    }
}

pub fn run_translate_command(opts: TranslateOptions) -> Result<(), String> {
    let inputs = expand_input_globs(&opts.inputs)?;
    for input in &inputs {
        validate_file_path(input)?;
    }
    if let Some(dir) = &opts.out_dir {
        validate_output_dir(dir)?;
    }

    let lexicon = resolve_lexicon(opts.lexicon.as_deref(), opts.extend)?;
    let options = TransformOptions {
        output_dir: opts.out_dir.as_ref().map(PathBuf::from),
        dry_run: opts.dry_run,
    };

    let mut reports = Vec::with_capacity(inputs.len());
    let mut failures = 0usize;
    for input in &inputs {
        info!(input = %input, "translating");
        match transform_with(input, &lexicon, &options) {
            Ok(report) => {
                print_report(&report);
                reports.push(report);
            }
            Err(e) => {
                error!(input = %input, "transform failed: {}", e);
                eprintln!("Error processing '{}': {}", input, e);
                failures += 1;
            }
        }
    }

    if let Some(path) = &opts.report_json {
        write_report(path, &reports)?;
    }

    if !reports.is_empty() && !opts.dry_run {
        println!("{}", IMPORT_HINT);
    }

    if failures > 0 {
        return Err(format!("{} of {} files failed", failures, inputs.len()));
    }
    Ok(())
}

/// Translates one string with the run's lexicon.
pub fn run_text_command(text: &str, lexicon: Option<&str>, extend: bool) -> Result<String, String> {
    let lexicon = resolve_lexicon(lexicon, extend)?;
    Ok(Translator::new(&lexicon).translate(text))
}
