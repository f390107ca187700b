//! Detail-fetch controller (pure state machine).
//!
//! Tracks which character's full record is shown. Selecting a target returns a
//! [`DetailRequest`]; clearing it drops the record and makes any outstanding
//! response stale.

use super::list_controller::Applied;
use crate::model::{CharacterDetails, FetchError, Locator};
use tokio::task::AbortHandle;
use tracing::{debug, warn};

/// A detail fetch the shell must perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailRequest {
    /// Generation this request was issued under.
    pub generation: u64,
    /// Where to fetch from.
    pub locator: Locator,
}

/// Completion of a [`DetailRequest`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailResponse {
    /// Generation copied from the request.
    pub generation: u64,
    /// Fetched record or the failure.
    pub outcome: Result<CharacterDetails, FetchError>,
}

impl DetailResponse {
    /// Pair an outcome with the request it answers.
    pub fn for_request(
        request: &DetailRequest,
        outcome: Result<CharacterDetails, FetchError>,
    ) -> Self {
        Self {
            generation: request.generation,
            outcome,
        }
    }
}

/// State of the detail view.
#[derive(Debug, Default)]
pub struct DetailController {
    target: Option<Locator>,
    details: Option<CharacterDetails>,
    loading: bool,
    error: Option<FetchError>,
    generation: u64,
    in_flight: Option<AbortHandle>,
}

impl DetailController {
    /// Create a controller with no target.
    pub fn new() -> Self {
        Self::default()
    }

    /// Point the controller at a character, or clear it with `None`.
    ///
    /// Returns the fetch to perform for a new target. Re-selecting the current
    /// target is a no-op.
    pub fn set_target(&mut self, target: Option<Locator>) -> Option<DetailRequest> {
        if target == self.target {
            return None;
        }
        self.abort_in_flight();
        self.generation += 1;
        self.details = None;
        self.error = None;
        self.target = target;

        match &self.target {
            Some(locator) => {
                debug!(%locator, "Detail target set");
                self.loading = true;
                Some(DetailRequest {
                    generation: self.generation,
                    locator: locator.clone(),
                })
            }
            None => {
                debug!("Detail target cleared");
                self.loading = false;
                None
            }
        }
    }

    /// Refetch the current target after a failure.
    pub fn retry(&mut self) -> Option<DetailRequest> {
        if self.loading || self.error.is_none() {
            return None;
        }
        let locator = self.target.clone()?;
        self.generation += 1;
        self.loading = true;
        self.error = None;
        debug!(%locator, "Retrying detail fetch");
        Some(DetailRequest {
            generation: self.generation,
            locator,
        })
    }

    /// Apply the outcome of a previously issued request.
    pub fn apply(&mut self, response: DetailResponse) -> Applied {
        if response.generation != self.generation || !self.loading {
            debug!(
                response_generation = response.generation,
                current_generation = self.generation,
                "Discarding stale detail response"
            );
            return Applied::Stale;
        }
        self.loading = false;
        self.in_flight = None;
        match response.outcome {
            Ok(details) => self.details = Some(details),
            Err(err) => {
                warn!(error = %err, "Detail fetch failed");
                self.error = Some(err);
            }
        }
        Applied::Current
    }

    /// Record the task running the current request so it can be aborted.
    pub fn track(&mut self, handle: AbortHandle) {
        if self.loading {
            self.in_flight = Some(handle);
        } else {
            handle.abort();
        }
    }

    /// Abort the in-flight fetch, if any. Its response will be stale.
    pub fn cancel(&mut self) {
        self.abort_in_flight();
        if self.loading {
            self.loading = false;
            self.generation += 1;
        }
    }

    fn abort_in_flight(&mut self) {
        if let Some(handle) = self.in_flight.take() {
            handle.abort();
        }
    }

    /// Character currently targeted.
    pub fn target(&self) -> Option<&Locator> {
        self.target.as_ref()
    }

    /// Loaded record for the current target.
    pub fn details(&self) -> Option<&CharacterDetails> {
        self.details.as_ref()
    }

    /// Whether a fetch is in flight.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Failure of the latest fetch, if it failed.
    pub fn error(&self) -> Option<&FetchError> {
        self.error.as_ref()
    }

    /// Current generation.
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

impl Drop for DetailController {
    fn drop(&mut self) {
        self.abort_in_flight();
    }
}
