//! Dashboard controller
//!
//! Drives a [`DashboardState`] against a [`ResourceFetcher`]. Fetches for a
//! login are pushed into one `FuturesUnordered` set and polled from the
//! caller's task: they run concurrently, complete in any order, and are
//! never cancelled by a logout. Whether a late completion still lands is
//! decided by the state's [`StalePolicy`].

use futures::future::BoxFuture;
use futures::stream::{FuturesUnordered, StreamExt};
use futures::FutureExt;
use std::sync::Arc;
use tracing::warn;

use super::state::{DashboardState, Event, FetchTicket, Phase, StalePolicy};
use crate::client::ResourceFetcher;
use crate::error::Result;
use crate::resource::{Document, ResourceKind};

type InFlight = BoxFuture<'static, (FetchTicket, Result<Vec<Document>>)>;

/// A fetch completion as observed by the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Completion {
    /// Ticket the fetch was dispatched with
    pub ticket: FetchTicket,
    /// Whether the result was written into the state
    pub committed: bool,
}

/// Owns the dashboard state and its in-flight fetches
pub struct DashboardController {
    state: DashboardState,
    fetcher: Arc<dyn ResourceFetcher>,
    in_flight: FuturesUnordered<InFlight>,
}

impl DashboardController {
    /// Create a logged-out controller
    pub fn new(fetcher: Arc<dyn ResourceFetcher>, stale_policy: StalePolicy) -> Self {
        Self {
            state: DashboardState::new(fetcher.base_address(), stale_policy),
            fetcher,
            in_flight: FuturesUnordered::new(),
        }
    }

    /// Current state
    pub fn state(&self) -> &DashboardState {
        &self.state
    }

    /// Number of fetches not yet completed, stale ones included
    pub fn in_flight(&self) -> usize {
        self.in_flight.len()
    }

    /// Submit the login form; returns whether the gate opened
    pub fn submit_login(&mut self, identity: &str) -> bool {
        let tickets = self.state.apply(Event::SubmitLogin(identity.to_string()));
        let opened = !tickets.is_empty();
        for ticket in tickets {
            self.dispatch(ticket);
        }
        opened
    }

    /// Log out; in-flight fetches keep running
    pub fn logout(&mut self) {
        self.state.apply(Event::Logout);
    }

    fn dispatch(&mut self, ticket: FetchTicket) {
        let fetcher = Arc::clone(&self.fetcher);
        self.in_flight.push(
            async move {
                let result = fetcher.fetch(ticket.kind).await;
                (ticket, result)
            }
            .boxed(),
        );
    }

    /// Wait for the next fetch to finish and record it.
    ///
    /// Returns `None` when nothing is in flight.
    pub async fn next_completion(&mut self) -> Option<Completion> {
        let (ticket, result) = self.in_flight.next().await?;

        let outcome = result.map_err(|e| {
            warn!("Error fetching data from {}: {}", ticket.kind.endpoint(), e);
            e.to_string()
        });
        let committed = self.state.complete(ticket, outcome);

        Some(Completion { ticket, committed })
    }

    /// Drive every in-flight fetch to completion
    pub async fn settle(&mut self) {
        while self.next_completion().await.is_some() {}
    }

    /// Resource kinds whose last fetch failed
    pub fn failed(&self) -> Vec<ResourceKind> {
        self.state
            .resources()
            .filter(|(_, resource)| resource.phase() == Phase::Failed)
            .map(|(kind, _)| kind)
            .collect()
    }
}
