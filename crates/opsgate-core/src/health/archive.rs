//! Report extraction from artifact zip archives.

use std::io::{Cursor, Read};

use zip::ZipArchive;

use opsgate_types::error::DataHealthError;

/// Largest decompressed report accepted from an archive.
pub const MAX_REPORT_BYTES: u64 = 8 * 1024 * 1024;

/// Return the contents of the first archive entry whose name ends with `report_file`.
///
/// The report may sit at any depth inside the archive.
pub fn extract_report(archive: &[u8], report_file: &str) -> Result<Vec<u8>, DataHealthError> {
    extract_report_capped(archive, report_file, MAX_REPORT_BYTES)
}

fn extract_report_capped(
    archive: &[u8],
    report_file: &str,
    limit: u64,
) -> Result<Vec<u8>, DataHealthError> {
    let mut zip = ZipArchive::new(Cursor::new(archive))
        .map_err(|e| DataHealthError::ArtifactMalformed(format!("invalid zip archive: {e}")))?;

    for index in 0..zip.len() {
        let mut entry = zip
            .by_index(index)
            .map_err(|e| DataHealthError::ArtifactMalformed(format!("unreadable zip entry: {e}")))?;
        if entry.is_dir() || !entry.name().ends_with(report_file) {
            continue;
        }

        let name = entry.name().to_string();
        if entry.size() > limit {
            return Err(too_large(&name, limit));
        }

        // Declared sizes are untrusted: read one byte past the limit.
        let mut contents = Vec::new();
        (&mut entry)
            .take(limit + 1)
            .read_to_end(&mut contents)
            .map_err(|e| DataHealthError::ArtifactMalformed(format!("failed to read {name}: {e}")))?;
        if contents.len() as u64 > limit {
            return Err(too_large(&name, limit));
        }
        return Ok(contents);
    }

    Err(DataHealthError::ArtifactMalformed(format!(
        "{report_file} not found in artifact archive"
    )))
}

fn too_large(name: &str, limit: u64) -> DataHealthError {
    DataHealthError::ArtifactMalformed(format!("{name} exceeds {limit} bytes"))
}
