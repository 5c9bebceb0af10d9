//! Dashboard Controller
//!
//! Client side of JobDash: a mock login gate in front of four independently
//! loading resource sections.
//!
//! - [`state`]: the session and per-resource sub-machines, with no I/O
//! - [`controller`]: dispatches and collects the concurrent fetches
//! - [`view`]: renders a text frame
//! - [`repl`]: line-oriented interactive front end

pub mod controller;
pub mod repl;
pub mod state;
pub mod view;

pub use controller::{Completion, DashboardController};
pub use repl::{parse_command, run_session, Command};
pub use state::{
    reduce, DashboardState, Event, FetchOutcome, FetchTicket, Phase, ResourceState, Session,
    StalePolicy,
};
pub use view::render;
