//! Agent Table Export
//!
//! Appends one row per agent to a CSV table and a JSONL table. Existing files
//! are extended, never truncated; the CSV header is only written to an empty
//! file.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

use house_events::AgentRecord;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("IO error writing {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Writes `records` to both tables.
pub fn export_records(records: &[AgentRecord], csv_path: &Path, jsonl_path: &Path) -> Result<(), ExportError> {
    write_csv(records, csv_path)?;
    write_jsonl(records, jsonl_path)?;
    tracing::info!(
        rows = records.len(),
        csv = %csv_path.display(),
        jsonl = %jsonl_path.display(),
        "exported agent table"
    );
    Ok(())
}

pub fn write_csv(records: &[AgentRecord], path: &Path) -> Result<(), ExportError> {
    let io_err = |source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    };
    let file = open_append(path).map_err(io_err)?;
    let needs_header = file.metadata().map_err(io_err)?.len() == 0;
    let mut writer = BufWriter::new(file);

    if needs_header {
        writeln!(writer, "{}", AgentRecord::COLUMNS.join(",")).map_err(io_err)?;
    }
    for record in records {
        writeln!(writer, "{}", csv_row(record)).map_err(io_err)?;
    }
    writer.flush().map_err(io_err)
}

pub fn write_jsonl(records: &[AgentRecord], path: &Path) -> Result<(), ExportError> {
    let io_err = |source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    };
    let mut writer = BufWriter::new(open_append(path).map_err(io_err)?);

    for record in records {
        let line = serde_json::to_string(record)?;
        writeln!(writer, "{}", line).map_err(io_err)?;
    }
    writer.flush().map_err(io_err)
}

fn open_append(path: &Path) -> std::io::Result<File> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}

fn csv_row(record: &AgentRecord) -> String {
    [
        csv_field(&record.name),
        record.priority_houses.to_string(),
        csv_field(&record.build_order),
        record.buyprice.to_string(),
        record.sellprice.to_string(),
        record.fitness.to_string(),
        record.houses_built.to_string(),
        record.money.to_string(),
        record.total_excess.to_string(),
    ]
    .join(",")
}

/// Quotes a field containing a separator, quote or line break.
fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use house_events::fixtures::sample_record;
    use std::fs;

    #[test]
    fn test_csv_field_quoting() {
        assert_eq!(csv_field("Thrall"), "Thrall");
        assert_eq!(csv_field("hall, floor, garret"), "\"hall, floor, garret\"");
        assert_eq!(csv_field("a \"b\""), "\"a \"\"b\"\"\"");
    }

    #[test]
    fn test_csv_row_layout() {
        let row = csv_row(&sample_record());
        assert_eq!(row, "Heisenberg,2,\"garret, hall, floor\",6,7,3.2,2,1200000,4");
    }

    #[test]
    fn test_csv_header_written_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("agent_stats.csv");

        write_csv(&[sample_record()], &path).unwrap();
        write_csv(&[sample_record()], &path).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = content.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("name,priority_houses,build_order"));
        assert_eq!(lines[1], lines[2]);
    }

    #[test]
    fn test_jsonl_appends_to_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("agent_stats.jsonl");
        fs::write(&path, "{\"earlier\":true}\n").unwrap();

        write_jsonl(&[sample_record()], &path).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        let parsed: AgentRecord = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(parsed, sample_record());
    }
}
