//! # Interaction Logger
//!
//! Client side of the "log interaction" form. A submission reads the form's
//! fields from the host document, coerces them into an [`InteractionPayload`],
//! posts it to `/api/log_interaction` and reflects the [`Outcome`] in the
//! status element. A successful submission schedules a page reload.
//!
//! - [`payload`]: form snapshot and integer coercion.
//! - [`outcome`]: pure mapping from an HTTP response to what the user sees.
//! - [`transport`]: the [`Transport`] seam and its reqwest implementation.
//! - [`dom`]: in-memory host document, element handles and the reload hook.
//! - [`handler`]: the submit handler wiring all of the above together.

pub mod dom;
pub mod error;
pub mod handler;
pub mod outcome;
pub mod payload;
pub mod transport;

pub use dom::{HostDocument, Reload, SubmitEvent, Window};
pub use error::{DomError, TransportError};
pub use handler::{FormHandler, RELOAD_DELAY, Submission, attach};
pub use outcome::{Outcome, StatusMessage, Tone};
pub use payload::{FormSnapshot, InteractionPayload};
pub use transport::{HttpTransport, LOG_INTERACTION_PATH, RawResponse, Transport};
