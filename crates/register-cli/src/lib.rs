//! Terminal front end for the registration workflow.
//!
//! Wires the identity HTTP adapters into a `SubmissionController` and runs
//! one registration form over stdin/stdout.

pub mod config;
pub mod error;
pub mod session;
pub mod terminal;

pub use config::Config;
pub use error::{AppError, AppResult};
pub use session::{Session, SessionEnd};
pub use terminal::{RouteNavigator, Terminal, TerminalNotifier};
