//! Seed audit artifact selection.

use chrono::{DateTime, Utc};

use opsgate_types::remote::ArtifactMetadata;

/// Whether `name` identifies a seed audit upload: the prefix itself, or the
/// prefix followed by a `-` or `_` separator.
pub fn matches_prefix(name: &str, prefix: &str) -> bool {
    match name.strip_prefix(prefix) {
        Some("") => true,
        Some(rest) => rest.starts_with('-') || rest.starts_with('_'),
        None => false,
    }
}

/// Creation time used for ordering. Missing or unparsable timestamps sort
/// as the oldest possible value.
pub fn created_at(artifact: &ArtifactMetadata) -> DateTime<Utc> {
    artifact
        .created_at
        .as_deref()
        .and_then(|raw| DateTime::parse_from_rfc3339(raw).ok())
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
}

/// Pick the newest non-expired artifact whose name matches `prefix`.
///
/// Ties on creation time go to the higher artifact id.
pub fn select_latest(artifacts: Vec<ArtifactMetadata>, prefix: &str) -> Option<ArtifactMetadata> {
    artifacts
        .into_iter()
        .filter(|a| !a.expired && matches_prefix(&a.name, prefix))
        .max_by_key(|a| (created_at(a), a.id))
}
