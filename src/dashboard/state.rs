//! Dashboard state and transitions
//!
//! The whole client-side state lives in one [`DashboardState`]: the mock
//! session plus one [`ResourceState`] per resource kind. Transitions are
//! driven by [`Event`]s and never perform I/O; a login hands back the
//! [`FetchTicket`]s the caller must dispatch.
//!
//! Every login and logout bumps a session generation. Each ticket carries
//! the generation it was issued under, so a completion arriving after its
//! session ended can be recognized as stale.

use clap::ValueEnum;
use tracing::{debug, info};

use crate::resource::{Document, ResourceKind};

/// Mock login state; never leaves the client
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    /// Whether the login gate is open
    pub authenticated: bool,
    /// Display name as typed at login
    pub identity: String,
}

/// Per-resource sub-machine state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Phase {
    #[default]
    Idle,
    Loading,
    Loaded,
    Failed,
}

/// Fetch status and last known items of one resource kind
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResourceState {
    items: Vec<Document>,
    error: Option<String>,
    phase: Phase,
}

impl ResourceState {
    /// Items from the last successful fetch, in received order
    pub fn items(&self) -> &[Document] {
        &self.items
    }

    /// Whether a fetch is outstanding
    pub fn loading(&self) -> bool {
        self.phase == Phase::Loading
    }

    /// Failure message of the last fetch, if it failed
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Current sub-machine state
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Whether the "no data" placeholder applies
    pub fn is_empty_result(&self) -> bool {
        !self.loading() && self.error.is_none() && self.items.is_empty()
    }

    fn begin(&mut self) {
        self.phase = Phase::Loading;
        self.error = None;
    }

    fn succeed(&mut self, items: Vec<Document>) {
        self.items = items;
        self.error = None;
        self.phase = Phase::Loaded;
    }

    fn fail(&mut self, message: String) {
        self.error = Some(message);
        self.phase = Phase::Failed;
    }
}

/// What to do with a completion whose session has already ended
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum StalePolicy {
    /// Drop it; the current session never sees stale data
    #[default]
    Discard,
    /// Commit it anyway, letting a late response overwrite the reset state
    Apply,
}

/// One fetch the caller must perform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FetchTicket {
    /// Resource to fetch
    pub kind: ResourceKind,
    /// Session generation the fetch belongs to
    pub generation: u64,
}

/// Result of a fetch as seen by the state: items or a failure reason
pub type FetchOutcome = std::result::Result<Vec<Document>, String>;

/// Input to [`DashboardState::apply`]
#[derive(Debug, Clone)]
pub enum Event {
    /// Login form submitted with the given identity
    SubmitLogin(String),
    /// Logout pressed
    Logout,
    /// A dispatched fetch finished
    FetchCompleted {
        ticket: FetchTicket,
        outcome: FetchOutcome,
    },
}

/// Complete client-side dashboard state
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardState {
    session: Session,
    resources: [ResourceState; 4],
    generation: u64,
    base_address: String,
    stale_policy: StalePolicy,
}

impl DashboardState {
    /// Logged-out state; `base_address` is quoted in failure messages
    pub fn new(base_address: impl Into<String>, stale_policy: StalePolicy) -> Self {
        Self {
            session: Session::default(),
            resources: Default::default(),
            generation: 0,
            base_address: base_address.into(),
            stale_policy,
        }
    }

    /// Current session
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Whether the dashboard is past the login gate
    pub fn is_logged_in(&self) -> bool {
        self.session.authenticated
    }

    /// State of one resource kind
    pub fn resource(&self, kind: ResourceKind) -> &ResourceState {
        &self.resources[kind.index()]
    }

    /// All resources in render order
    pub fn resources(&self) -> impl Iterator<Item = (ResourceKind, &ResourceState)> {
        ResourceKind::ALL
            .into_iter()
            .map(move |kind| (kind, self.resource(kind)))
    }

    /// Current session generation
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Address quoted in failure messages
    pub fn base_address(&self) -> &str {
        &self.base_address
    }

    /// Stale completion handling in effect
    pub fn stale_policy(&self) -> StalePolicy {
        self.stale_policy
    }

    /// Apply one event, returning the fetches to dispatch
    pub fn apply(&mut self, event: Event) -> Vec<FetchTicket> {
        match event {
            Event::SubmitLogin(identity) => self.submit_login(identity),
            Event::Logout => {
                self.logout();
                Vec::new()
            }
            Event::FetchCompleted { ticket, outcome } => {
                self.complete(ticket, outcome);
                Vec::new()
            }
        }
    }

    /// Open the login gate and start all four fetches.
    ///
    /// Blank identities and logins while already logged in change nothing.
    pub fn submit_login(&mut self, identity: impl Into<String>) -> Vec<FetchTicket> {
        let identity = identity.into();

        if self.session.authenticated {
            debug!("Login ignored: already logged in as '{}'", self.session.identity);
            return Vec::new();
        }

        if identity.trim().is_empty() {
            info!("Login failed: Please enter a username.");
            return Vec::new();
        }

        self.generation += 1;
        info!("User '{}' logged in (mock).", identity);
        self.session = Session {
            authenticated: true,
            identity,
        };

        let generation = self.generation;
        ResourceKind::ALL
            .into_iter()
            .map(|kind| {
                self.resources[kind.index()].begin();
                FetchTicket { kind, generation }
            })
            .collect()
    }

    /// Close the gate and wipe every resource, in flight or not
    pub fn logout(&mut self) {
        if !self.session.authenticated {
            return;
        }

        self.generation += 1;
        self.session = Session::default();
        self.resources = Default::default();
        info!("User logged out (mock).");
    }

    /// Record a finished fetch.
    ///
    /// Returns false when the completion was stale and discarded.
    pub fn complete(&mut self, ticket: FetchTicket, outcome: FetchOutcome) -> bool {
        if ticket.generation != self.generation {
            match self.stale_policy {
                StalePolicy::Discard => {
                    debug!(
                        "Discarding stale {} result from generation {} (current {})",
                        ticket.kind, ticket.generation, self.generation
                    );
                    return false;
                }
                StalePolicy::Apply => {
                    debug!(
                        "Applying stale {} result from generation {} (current {})",
                        ticket.kind, ticket.generation, self.generation
                    );
                }
            }
        }

        let resource = &mut self.resources[ticket.kind.index()];
        match outcome {
            Ok(items) => resource.succeed(items),
            Err(reason) => resource.fail(format!(
                "Failed to load data from {}: {}. Ensure your backend is running and accessible at {}.",
                ticket.kind.endpoint(),
                reason,
                self.base_address
            )),
        }
        true
    }
}

/// Pure form of [`DashboardState::apply`]
pub fn reduce(mut state: DashboardState, event: Event) -> (DashboardState, Vec<FetchTicket>) {
    let effects = state.apply(event);
    (state, effects)
}
