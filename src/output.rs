//! CSV output generation for converted feeds.

use std::collections::HashSet;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::config::PLACEHOLDER_HEADER;
use crate::error::{ConvertError, Result};
use crate::flatten::FlatRow;

/// Build the header set: the ordered, deduplicated union of all row keys.
///
/// Order is first-seen across rows (first row's keys in row order, then any
/// new keys from later rows), which fixes the column order of the output.
pub fn header_set(rows: &[FlatRow]) -> Vec<String> {
    let mut headers: Vec<String> = Vec::new();
    let mut seen: HashSet<&str> = HashSet::new();

    for row in rows {
        for key in row.keys() {
            if seen.insert(key) {
                headers.push(key.clone());
            }
        }
    }

    headers
}

/// Write rows as CSV: one header row, then one record per row.
///
/// Rows missing a column are padded with the empty string; row order is
/// preserved. Zero rows still produce a well-formed file with a single
/// placeholder column rather than an empty artifact.
///
/// # Arguments
/// * `rows` - Flat rows, in output order
/// * `writer` - Destination for the CSV bytes
pub fn write_csv<W: Write>(rows: &[FlatRow], writer: W) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    if rows.is_empty() {
        csv_writer.write_record([PLACEHOLDER_HEADER])?;
        csv_writer.flush()?;
        return Ok(());
    }

    let headers = header_set(rows);
    csv_writer.write_record(&headers)?;

    for row in rows {
        csv_writer.write_record(
            headers
                .iter()
                .map(|key| row.get(key).map(String::as_str).unwrap_or_default()),
        )?;
    }

    csv_writer.flush()?;
    Ok(())
}

/// Render rows to a CSV string.
pub fn render_csv(rows: &[FlatRow]) -> Result<String> {
    let mut buffer = Vec::new();
    write_csv(rows, &mut buffer)?;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

/// Save rows as a CSV file.
///
/// Creates missing parent directories, then uses the atomic write pattern:
/// write to a temp file, sync to disk, rename over the destination. Partial
/// writes never corrupt an existing file on crash.
///
/// # Arguments
/// * `rows` - Flat rows, in output order
/// * `path` - Destination file path
///
/// # Returns
/// Path to the saved file
pub fn save_csv(rows: &[FlatRow], path: &Path) -> Result<PathBuf> {
    let file_name = path.file_name().ok_or_else(|| {
        ConvertError::Io(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("Output path has no file name: {}", path.display()),
        ))
    })?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let temp_path = path.with_file_name(format!(".{}.tmp", file_name.to_string_lossy()));

    {
        let file = File::create(&temp_path)?;
        write_csv(rows, &file)?;
        file.sync_all()?; // Ensure data is flushed to disk
    }

    // On Windows, rename fails if the destination already exists
    #[cfg(target_os = "windows")]
    if path.exists() {
        fs::remove_file(path)?;
    }

    // Atomic rename (on most filesystems)
    fs::rename(&temp_path, path)?;

    Ok(path.to_path_buf())
}
