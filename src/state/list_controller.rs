//! List-fetch controller (pure state machine).
//!
//! Owns the query, the page cursor and the accumulated summaries. Operations
//! that need the network return a [`ListRequest`]; the shell runs it and hands
//! the outcome back through [`ListController::apply`].
//!
//! # Invariants
//!
//! - Every issued request carries a fresh generation. Only a response with the
//!   current generation may mutate state; anything else is reported as
//!   [`Applied::Stale`] and dropped.
//! - Issuing a request aborts the task of the request it supersedes.
//! - Page 1 replaces the accumulator, later pages append to it.
//! - A failed fetch never touches the accumulator.

use crate::model::{CharacterPage, CharacterSummary, FetchError, PageQuery};
use tokio::task::AbortHandle;
use tracing::{debug, warn};

/// A list fetch the shell must perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListRequest {
    /// Generation this request was issued under.
    pub generation: u64,
    /// What to fetch.
    pub query: PageQuery,
}

/// Completion of a [`ListRequest`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListResponse {
    /// Generation copied from the request.
    pub generation: u64,
    /// Fetched page or the failure.
    pub outcome: Result<CharacterPage, FetchError>,
}

impl ListResponse {
    /// Pair an outcome with the request it answers.
    pub fn for_request(request: &ListRequest, outcome: Result<CharacterPage, FetchError>) -> Self {
        Self {
            generation: request.generation,
            outcome,
        }
    }
}

/// Whether a response was applied or discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    /// The response matched the current request and updated state.
    Current,
    /// The response belonged to a superseded request and was ignored.
    Stale,
}

/// Searchable, paginated character list state.
#[derive(Debug)]
pub struct ListController {
    query: String,
    page: u32,
    loaded_page: u32,
    page_size: u32,
    characters: Vec<CharacterSummary>,
    loading: bool,
    error: Option<FetchError>,
    has_more: bool,
    total_records: Option<u64>,
    generation: u64,
    last_request: Option<PageQuery>,
    in_flight: Option<AbortHandle>,
}

impl ListController {
    /// Create an idle controller. Nothing is fetched until [`set_query`](Self::set_query).
    pub fn new(page_size: u32) -> Self {
        Self {
            query: String::new(),
            page: 1,
            loaded_page: 0,
            page_size: page_size.max(1),
            characters: Vec::new(),
            loading: false,
            error: None,
            has_more: false,
            total_records: None,
            generation: 0,
            last_request: None,
            in_flight: None,
        }
    }

    /// Switch to a new query: reset the cursor, clear results, fetch page 1.
    pub fn set_query(&mut self, query: impl Into<String>) -> ListRequest {
        self.query = query.into();
        self.loaded_page = 0;
        self.characters.clear();
        self.has_more = false;
        self.total_records = None;
        debug!(query = %self.query, "List query changed");
        self.issue(PageQuery::new(&self.query, 1, self.page_size))
    }

    /// Fetch the next page, appending its results.
    ///
    /// No-op while a fetch is in flight or when the server signalled no
    /// further pages.
    pub fn load_more(&mut self) -> Option<ListRequest> {
        if self.loading || !self.has_more {
            debug!(
                loading = self.loading,
                has_more = self.has_more,
                "load_more ignored"
            );
            return None;
        }
        let next = self.loaded_page + 1;
        Some(self.issue(PageQuery::new(&self.query, next, self.page_size)))
    }

    /// Repeat the last request after a failure.
    ///
    /// No-op unless the last fetch failed and nothing is in flight.
    pub fn retry(&mut self) -> Option<ListRequest> {
        if self.loading || self.error.is_none() {
            return None;
        }
        let query = self.last_request.clone()?;
        debug!(page = query.page, "Retrying list fetch");
        Some(self.issue(query))
    }

    /// Apply the outcome of a previously issued request.
    pub fn apply(&mut self, response: ListResponse) -> Applied {
        if response.generation != self.generation || !self.loading {
            debug!(
                response_generation = response.generation,
                current_generation = self.generation,
                "Discarding stale list response"
            );
            return Applied::Stale;
        }

        self.loading = false;
        self.in_flight = None;

        match response.outcome {
            Ok(page) => {
                self.has_more = page.has_next();
                if page.total_records.is_some() {
                    self.total_records = page.total_records;
                }
                if self.page <= 1 {
                    self.characters = page.characters;
                } else {
                    self.characters.extend(page.characters);
                }
                self.loaded_page = self.page;
                debug!(
                    page = self.page,
                    count = self.characters.len(),
                    has_more = self.has_more,
                    "List page applied"
                );
            }
            Err(err) => {
                warn!(page = self.page, error = %err, "List fetch failed");
                self.error = Some(err);
                self.page = self.loaded_page.max(1);
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
        if let Some(handle) = self.in_flight.take() {
            handle.abort();
        }
        if self.loading {
            self.loading = false;
            self.generation += 1;
            self.page = self.loaded_page.max(1);
        }
    }

    fn issue(&mut self, query: PageQuery) -> ListRequest {
        if let Some(handle) = self.in_flight.take() {
            handle.abort();
        }
        self.generation += 1;
        self.loading = true;
        self.error = None;
        self.page = query.page;
        self.last_request = Some(query.clone());
        ListRequest {
            generation: self.generation,
            query,
        }
    }

    /// Active query as typed (untrimmed).
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Page cursor of the latest request (≥ 1).
    pub fn page(&self) -> u32 {
        self.page
    }

    /// Accumulated summaries in server order.
    pub fn characters(&self) -> &[CharacterSummary] {
        &self.characters
    }

    /// Whether a fetch is in flight.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Failure of the latest fetch, if it failed.
    pub fn error(&self) -> Option<&FetchError> {
        self.error.as_ref()
    }

    /// Whether the server advertised another page.
    pub fn has_more(&self) -> bool {
        self.has_more
    }

    /// Total matching records, when the server reported it.
    pub fn total_records(&self) -> Option<u64> {
        self.total_records
    }

    /// Current generation.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Page size used for requests.
    pub fn page_size(&self) -> u32 {
        self.page_size
    }
}

impl Drop for ListController {
    fn drop(&mut self) {
        if let Some(handle) = self.in_flight.take() {
            handle.abort();
        }
    }
}

#[cfg(test)]
#[path = "list_controller_tests.rs"]
mod tests;
