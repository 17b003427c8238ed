//! CLI library for testing purposes

pub mod config;
pub mod path_glob;
pub mod stats;
pub mod translate;
pub mod validation;

pub use config::{read_lexicon_file, resolve_lexicon, write_lexicon_file};
pub use path_glob::expand_input_globs;
pub use translate::{TranslateOptions, run_text_command, run_translate_command};
