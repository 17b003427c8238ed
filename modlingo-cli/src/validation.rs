use std::path::Path;

/// Extensions accepted for lexicon table files.
pub const LEXICON_EXTENSIONS: &[&str] = &["json", "toml", "yaml", "yml"];

/// Validate file path exists and is readable
pub fn validate_file_path(path: &str) -> Result<(), String> {
    let path_obj = Path::new(path);

    if !path_obj.exists() {
        return Err(format!("File not found: {}", path));
    }

    if !path_obj.is_file() {
        return Err(format!("Path is not a file: {}", path));
    }

    Ok(())
}

/// Validate an output directory exists or can be created
pub fn validate_output_dir(path: &str) -> Result<(), String> {
    let path_obj = Path::new(path);

    if path_obj.exists() {
        if !path_obj.is_dir() {
            return Err(format!("Output path is not a directory: {}", path));
        }
        return Ok(());
    }

    std::fs::create_dir_all(path_obj)
        .map_err(|e| format!("Cannot create output directory: {}", e))
}

/// Validate the parent directory of an output file exists or can be created
pub fn validate_output_path(path: &str) -> Result<(), String> {
    let path_obj = Path::new(path);

    if let Some(parent) = path_obj.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            if let Err(e) = std::fs::create_dir_all(parent) {
                return Err(format!("Cannot create output directory: {}", e));
            }
        }
    }

    Ok(())
}

/// Validate a lexicon path has a supported extension
pub fn validate_lexicon_path(path: &str) -> Result<(), String> {
    let extension = Path::new(path)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    match extension {
        Some(ext) if LEXICON_EXTENSIONS.contains(&ext.as_str()) => Ok(()),
        _ => Err(format!(
            "Unsupported lexicon file: {}. Supported extensions: {}",
            path,
            LEXICON_EXTENSIONS.join(", ")
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_validate_file_path() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("mod.xml");
        std::fs::write(&file, "<a/>").unwrap();

        assert!(validate_file_path(file.to_str().unwrap()).is_ok());
        let err = validate_file_path(dir.path().join("missing.xml").to_str().unwrap()).unwrap_err();
        assert!(err.contains("File not found"));
        let err = validate_file_path(dir.path().to_str().unwrap()).unwrap_err();
        assert!(err.contains("not a file"));
    }

    #[test]
    fn test_validate_output_dir_creates_missing() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("a").join("b");
        assert!(validate_output_dir(nested.to_str().unwrap()).is_ok());
        assert!(nested.is_dir());

        let file = dir.path().join("file.txt");
        std::fs::write(&file, "x").unwrap();
        assert!(validate_output_dir(file.to_str().unwrap()).is_err());
    }

    #[test]
    fn test_validate_lexicon_path() {
        assert!(validate_lexicon_path("words.json").is_ok());
        assert!(validate_lexicon_path("words.TOML").is_ok());
        assert!(validate_lexicon_path("words.yml").is_ok());
        assert!(validate_lexicon_path("words.csv").is_err());
        assert!(validate_lexicon_path("words").is_err());
    }
}
