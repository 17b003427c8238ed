use modlingo::{Resource, ResourceStats, formats::SstFormat, survey, traits::Parser};
use serde_json::json;

/// Reads an SST export and surveys its translation coverage.
pub fn collect_stats(input: &str) -> Result<(Resource, ResourceStats), String> {
    let format =
        SstFormat::read_from(input).map_err(|e| format!("Failed to read '{}': {}", input, e))?;
    let resource = Resource::from(format);
    let stats = survey(&resource);
    Ok((resource, stats))
}

fn completion_percent(stats: &ResourceStats) -> f64 {
    if stats.visible == 0 {
        100.0
    } else {
        (stats.translated as f64) * 100.0 / (stats.visible as f64)
    }
}

pub fn print_stats(input: &str, json_output: bool) -> Result<(), String> {
    let (resource, stats) = collect_stats(input)?;
    let percent = completion_percent(&stats);

    if json_output {
        let body = json!({
            "input": input,
            "addon": resource.metadata.addon,
            "source_language": resource.metadata.source_language,
            "dest_language": resource.metadata.dest_language,
            "total": stats.total,
            "visible": stats.visible,
            "translated": stats.translated,
            "pending": stats.pending,
            "completion_percent": (percent * 100.0).round() / 100.0,
        });
        let text = serde_json::to_string_pretty(&body)
            .map_err(|e| format!("Failed to serialize stats JSON: {}", e))?;
        println!("{}", text);
        return Ok(());
    }

    println!("=== Stats ===");
    println!("File: {}", input);
    if !resource.metadata.addon.is_empty() {
        println!("Addon: {}", resource.metadata.addon);
    }
    println!("  Total strings: {}", stats.total);
    println!("  Visible: {}", stats.visible);
    println!("  Translated: {}", stats.translated);
    println!("  Pending: {}", stats.pending);
    println!("  Completion: {:.2}%", percent);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_completion_percent() {
        let stats = ResourceStats {
            total: 10,
            visible: 4,
            translated: 1,
            pending: 3,
        };
        assert_eq!(completion_percent(&stats), 25.0);
        assert_eq!(completion_percent(&ResourceStats::default()), 100.0);
    }
}
