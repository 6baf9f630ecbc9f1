//! Registration form workflow.
//!
//! Field validation, form state and the submission state machine that
//! creates an account through an injected identity service. Rendering is
//! left to the caller: the crate only exposes state and ports.

mod controller;
mod error;
mod form;
mod handle;
mod messages;
mod ports;
mod redirect;
mod types;
pub mod validator;

pub use controller::{ControllerSettings, SubmissionController, SubmitReport};
pub use error::{AuthError, StoreError, ValidationError};
pub use form::RegistrationForm;
pub use handle::FormHandle;
pub use messages::Locale;
pub use ports::{AuthService, Navigator, Notifier, ProfileStore};
pub use redirect::ScheduledRedirect;
pub use types::*;
