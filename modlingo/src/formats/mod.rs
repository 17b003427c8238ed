//! Resource document formats handled by modlingo.
//!
//! Both layouts are xTranslator SST XML. [`FormatType`] names the two output variants
//! and knows the file name each is written under.

pub mod element;
pub mod sst;
pub mod strings_only;

use std::{
    fmt::{Display, Formatter},
    path::{Path, PathBuf},
};

// Reexporting the formats for easier access
pub use sst::Format as SstFormat;
pub use strings_only::Format as StringsOnlyFormat;

/// The two document variants produced by a transform run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormatType {
    /// Original layout with every field kept ("FormID references" import).
    Full,
    /// Fixed header plus bare source/destination pairs ("Strings only" import).
    StringsOnly,
}

/// Implements [`std::fmt::Display`] for [`FormatType`].
///
/// # Example
/// ```rust
/// use modlingo::formats::FormatType;
/// assert_eq!(FormatType::Full.to_string(), "formid");
/// assert_eq!(FormatType::StringsOnly.to_string(), "strings-only");
/// ```
impl Display for FormatType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            FormatType::Full => write!(f, "formid"),
            FormatType::StringsOnly => write!(f, "strings-only"),
        }
    }
}

impl FormatType {
    /// Suffix appended to the input's file stem to name this variant's output.
    pub fn suffix(&self) -> &'static str {
        match self {
            FormatType::Full => "_translated_formid.xml",
            FormatType::StringsOnly => "_translated_strings_only.xml",
        }
    }

    /// Output path for `input`: a sibling of the input, or a file in `output_dir` when given.
    pub fn output_path(&self, input: &Path, output_dir: Option<&Path>) -> PathBuf {
        let stem = input
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let file_name = format!("{}{}", stem, self.suffix());
        match output_dir {
            Some(dir) => dir.join(file_name),
            None => input.with_file_name(file_name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_path_next_to_input() {
        let input = Path::new("/mods/Dawnguard_english_russian.xml");
        assert_eq!(
            FormatType::Full.output_path(input, None),
            PathBuf::from("/mods/Dawnguard_english_russian_translated_formid.xml")
        );
        assert_eq!(
            FormatType::StringsOnly.output_path(input, None),
            PathBuf::from("/mods/Dawnguard_english_russian_translated_strings_only.xml")
        );
    }

    #[test]
    fn test_output_path_in_output_dir() {
        let input = Path::new("mods/Patch.SST");
        assert_eq!(
            FormatType::Full.output_path(input, Some(Path::new("out"))),
            PathBuf::from("out/Patch_translated_formid.xml")
        );
    }
}
