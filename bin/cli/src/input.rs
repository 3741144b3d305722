use std::fs;
use std::io::Write;
use std::path::Path;

use anyhow::Context;
use dcat_quality_core::DatasetRecord;
use serde::Serialize;

/// Read a catalog as a JSON array, or one record per line for `.jsonl`
pub fn load_catalog(path: &Path) -> anyhow::Result<Vec<DatasetRecord>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read catalog {}", path.display()))?;

    let is_lines = path
        .extension()
        .map_or(false, |ext| ext == "jsonl" || ext == "ndjson");

    if !is_lines {
        return serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse catalog {}", path.display()));
    }

    raw.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| {
            serde_json::from_str(line)
                .with_context(|| format!("Failed to parse {} line {}", path.display(), i + 1))
        })
        .collect()
}

/// Pretty JSON to `output`, or stdout when no path is given
pub fn write_json<T: Serialize>(value: &T, output: Option<&Path>) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    match output {
        Some(path) => fs::write(path, json + "\n")
            .with_context(|| format!("Failed to write {}", path.display())),
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{}", json)?;
            Ok(())
        }
    }
}
