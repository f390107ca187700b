//! Runs fetch commands on the tokio runtime.
//!
//! The UI loop is synchronous. It hands each [`Command`] to the
//! [`Dispatcher`], which spawns the request and sends the completion back
//! over an unbounded channel. The loop drains that channel between key
//! events and feeds each [`FetchEvent`] into the state machine, which
//! discards anything stale.

use super::CatalogApi;
use crate::state::{Command, DetailRequest, DetailResponse, ListRequest, ListResponse};
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::AbortHandle;
use tracing::{debug, trace};

pub use crate::state::FetchEvent;

/// Spawns catalog requests and reports their outcomes.
#[derive(Clone)]
pub struct Dispatcher {
    api: Arc<dyn CatalogApi>,
    runtime: Handle,
    events: UnboundedSender<FetchEvent>,
}

impl Dispatcher {
    /// Create a dispatcher and the receiver its completions arrive on.
    pub fn new(api: Arc<dyn CatalogApi>, runtime: Handle) -> (Self, UnboundedReceiver<FetchEvent>) {
        let (events, rx) = mpsc::unbounded_channel();
        (
            Self {
                api,
                runtime,
                events,
            },
            rx,
        )
    }

    /// Start executing `command`. The returned handle aborts the request.
    pub fn dispatch(&self, command: &Command) -> AbortHandle {
        match command {
            Command::FetchList(request) => self.list(request.clone()),
            Command::FetchDetail(request) => self.detail(request.clone()),
        }
    }

    /// Spawn a list fetch.
    pub fn list(&self, request: ListRequest) -> AbortHandle {
        let api = Arc::clone(&self.api);
        let events = self.events.clone();
        debug!(
            generation = request.generation,
            page = request.query.page,
            name = %request.query.name,
            "Dispatching list fetch"
        );
        self.runtime
            .spawn(async move {
                let outcome = api.fetch_page(&request.query).await;
                let response = ListResponse::for_request(&request, outcome);
                if events.send(FetchEvent::List(response)).is_err() {
                    trace!("UI loop gone, dropping list response");
                }
            })
            .abort_handle()
    }

    /// Spawn a detail fetch.
    pub fn detail(&self, request: DetailRequest) -> AbortHandle {
        let api = Arc::clone(&self.api);
        let events = self.events.clone();
        debug!(
            generation = request.generation,
            locator = %request.locator,
            "Dispatching detail fetch"
        );
        self.runtime
            .spawn(async move {
                let outcome = api.fetch_details(&request.locator).await;
                let response = DetailResponse::for_request(&request, outcome);
                if events.send(FetchEvent::Detail(response)).is_err() {
                    trace!("UI loop gone, dropping detail response");
                }
            })
            .abort_handle()
    }
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher").finish_non_exhaustive()
    }
}
