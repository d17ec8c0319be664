//! The fetch, compare and persist sequence of one check run

use tracing::{info, warn};

use crate::check::error::{CheckError, StoreError};
use crate::check::revision::{RevisionId, RevisionMarkers, extract_revision};
use crate::check::source::Source;
use crate::check::status::{CheckOutcome, NagiosStatus};
use crate::check::store::VersionStore;

/// One revision check over a page source and a save file
pub struct VersionCheck<S, V> {
    source: S,
    store: V,
    markers: RevisionMarkers,
    list_name: String,
}

impl<S: Source, V: VersionStore> VersionCheck<S, V> {
    pub fn new(source: S, store: V, markers: RevisionMarkers, list_name: &str) -> Self {
        Self {
            source,
            store,
            markers,
            list_name: list_name.to_string(),
        }
    }

    /// Runs the check. Every failure is converted into a status; nothing
    /// propagates to the caller.
    pub async fn run(&self) -> CheckOutcome {
        match self.try_run().await {
            Ok(outcome) => outcome,
            Err(err) => {
                warn!("Check failed: {}", err);
                err.into()
            }
        }
    }

    async fn try_run(&self) -> Result<CheckOutcome, CheckError> {
        let body = self.source.fetch_page().await?;

        let revision = extract_revision(&body, &self.markers).ok_or_else(|| {
            CheckError::Extraction {
                prefix: self.markers.prefix.clone(),
                suffix: self.markers.suffix.clone(),
            }
        })?;
        info!("Current revision of {}: {}", self.source.location(), revision);

        let previous = self.store.load().map_err(CheckError::StoreUnreadable)?;

        match previous {
            Some(previous) => self.compare(&previous, &revision),
            None => self.initialize(&revision),
        }
    }

    fn compare(&self, previous: &str, revision: &RevisionId) -> Result<CheckOutcome, CheckError> {
        let previous = strip_line_ending(previous);

        if previous == revision.as_str() {
            info!("Revision unchanged");
            return Ok(CheckOutcome::new(
                NagiosStatus::Ok,
                format!(
                    "Gist containing {} has not been updated (revision {}).",
                    self.list_name, revision
                ),
            ));
        }

        info!("Revision changed from {} to {}", previous, revision);
        self.store.save(revision).map_err(CheckError::StoreWrite)?;

        Ok(CheckOutcome::new(
            NagiosStatus::Warning,
            format!(
                "The {} version appears to have changed from {} to {}. Save file has been updated to newest version.",
                self.list_name, previous, revision
            ),
        ))
    }

    fn initialize(&self, revision: &RevisionId) -> Result<CheckOutcome, CheckError> {
        match self.store.create(revision) {
            Ok(()) => {}
            Err(err @ StoreError::Permissions { .. }) => {
                warn!("{}", err);
            }
            Err(err) => return Err(CheckError::StoreWrite(err)),
        }

        Ok(CheckOutcome::new(
            NagiosStatus::Unknown,
            format!(
                "No save file was found. The current version ({}) has been saved for future use.",
                revision
            ),
        ))
    }
}

fn strip_line_ending(value: &str) -> &str {
    let value = value.strip_suffix('\n').unwrap_or(value);
    value.strip_suffix('\r').unwrap_or(value)
}
