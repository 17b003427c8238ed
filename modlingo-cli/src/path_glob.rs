use std::collections::HashSet;

fn has_glob_meta(s: &str) -> bool {
    s.bytes().any(|b| matches!(b, b'*' | b'?' | b'['))
}

/// Expand possible glob patterns in a list of input strings into concrete file paths.
///
/// Plain paths are kept as given. A pattern that matches nothing is kept as given too,
/// so the missing file is reported by validation later.
pub fn expand_input_globs(inputs: &[String]) -> Result<Vec<String>, String> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut results: Vec<String> = Vec::with_capacity(inputs.len());

    for input in inputs {
        if !has_glob_meta(input) {
            if seen.insert(input.clone()) {
                results.push(input.clone());
            }
            continue;
        }

        let paths = glob::glob(input)
            .map_err(|e| format!("Invalid glob pattern '{}': {}", input, e))?;
        let mut matched: Vec<String> = paths
            .filter_map(Result::ok)
            .filter(|p| p.is_file())
            .map(|p| p.to_string_lossy().to_string())
            .collect();
        matched.sort();

        if matched.is_empty() {
            matched.push(input.clone());
        }
        for path in matched {
            if seen.insert(path.clone()) {
                results.push(path);
            }
        }
    }

    Ok(results)
}
