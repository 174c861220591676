use crate::types::{RelayError, Result, Timestamp};
use chrono::{DateTime, Duration, Utc};
use std::fs;
use std::path::PathBuf;
use tracing::{debug, info};

/// Persists the publication date of the most recently delivered entry as the
/// sole content of one text file.
pub struct WatermarkStore {
    path: PathBuf,
    lookback: Duration,
}

impl WatermarkStore {
    pub fn new(path: impl Into<PathBuf>, lookback: Duration) -> Self {
        Self {
            path: path.into(),
            lookback,
        }
    }

    /// Read the persisted watermark. A missing file seeds the watermark at
    /// `now - lookback`. Unparseable contents fail loudly instead of falling
    /// back to the lookback default, which would widen the next run into a
    /// re-delivery window.
    pub fn read(&self) -> Result<Timestamp> {
        if !self.path.exists() {
            let seeded = (Utc::now() - self.lookback).fixed_offset();
            debug!(
                "No watermark at {}, seeding {}",
                self.path.display(),
                seeded.to_rfc3339()
            );
            return Ok(seeded);
        }

        let raw = fs::read_to_string(&self.path)?;
        DateTime::parse_from_rfc3339(raw.trim()).map_err(|e| RelayError::CorruptWatermark {
            path: self.path.display().to_string(),
            source: e,
        })
    }

    /// Overwrite the watermark, serialized as RFC 3339 with its offset. The
    /// value goes through a sibling temp file and a rename so a concurrent
    /// reader never observes a partial write.
    pub fn write(&self, ts: Timestamp) -> Result<()> {
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, ts.to_rfc3339())?;
        fs::rename(&tmp, &self.path)?;
        info!("Watermark advanced to {}", ts.to_rfc3339());
        Ok(())
    }
}
