use std::path::Path;

use anyhow::Context;
use tracing::warn;

use crate::ingest::{self, Ingested};

pub mod extract;
pub mod inspect;

/// Ingest an archive and log its per-entry warnings. Commands share this so
/// warnings always end up in the log, never mixed into command output.
fn ingest_logged(input: &Path) -> anyhow::Result<Ingested> {
    let result = ingest::ingest(input)
        .with_context(|| format!("Failed to ingest {}", input.display()))?;

    for warning in &result.warnings {
        warn!("{}: {}", warning.entry, warning.reason);
    }

    Ok(result)
}
