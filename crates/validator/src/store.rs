// Path: crates/validator/src/store.rs
//! JSON persistence for percentile references, so smoothing survives restarts.

use crate::error::CycleError;
use bitads_scoring::PercentileTracker;
use bitads_types::app::PercentileSnapshot;
use std::path::Path;

/// Loads a snapshot. A missing file is a cold start and yields an empty one.
pub fn load_snapshot(path: impl AsRef<Path>) -> Result<PercentileSnapshot, CycleError> {
    let path = path.as_ref();
    if !path.exists() {
        tracing::info!(target: "store", event = "cold_start", path = %path.display());
        return Ok(PercentileSnapshot::default());
    }
    let bytes = std::fs::read(path)?;
    Ok(serde_json::from_slice(&bytes)?)
}

/// Writes `snapshot` to `path`, replacing any previous file.
///
/// The JSON goes to a sibling temp file which is then renamed over `path`.
pub fn save_snapshot(path: impl AsRef<Path>, snapshot: &PercentileSnapshot) -> Result<(), CycleError> {
    let path = path.as_ref();
    let tmp = path.with_extension("json.tmp");
    std::fs::write(&tmp, serde_json::to_vec_pretty(snapshot)?)?;
    std::fs::rename(&tmp, path)?;
    tracing::debug!(target: "store", event = "saved", scopes = snapshot.scopes.len());
    Ok(())
}

/// Restores a tracker from `path`.
pub fn load_tracker(path: impl AsRef<Path>) -> Result<PercentileTracker, CycleError> {
    load_snapshot(path).map(PercentileTracker::from_snapshot)
}
