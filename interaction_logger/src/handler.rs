//! Submit handler for the log-interaction form.
//!
//! One submission: suppress the native submit, snapshot the fields, post the
//! payload, render the outcome into the status element and, when the
//! interaction was logged, reload the page after [`RELOAD_DELAY`].
//!
//! Submissions are not serialized. Two overlapping submissions each render
//! when they resolve, so the later response decides what is on screen, and a
//! reload once scheduled always fires.

use crate::dom::{FORM_ID, FormBindings, HostDocument, Reload, STATUS_ID, StatusElement, SubmitEvent};
use crate::error::DomError;
use crate::outcome::{Outcome, resolve_response};
use crate::payload::InteractionPayload;
use crate::transport::{LOG_INTERACTION_PATH, Transport};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

/// Delay between a logged interaction and the page reload.
pub const RELOAD_DELAY: Duration = Duration::from_secs(1);

/// Result of one call to [`FormHandler::submit`].
#[derive(Debug)]
pub struct Submission {
    pub payload: InteractionPayload,
    pub outcome: Outcome,
    /// Pending reload task, present only for [`Outcome::Logged`].
    pub reload: Option<JoinHandle<()>>,
}

#[derive(Clone)]
pub struct FormHandler {
    fields: FormBindings,
    status: StatusElement,
    transport: Arc<dyn Transport>,
    reload: Arc<dyn Reload>,
}

/// Binds a handler to the log form of `document`.
///
/// Returns `Ok(None)` when the page has no log form, since not every page
/// renders one. A page that has the form but lacks one of its fields or the
/// status element is an error.
pub fn attach(
    document: &HostDocument,
    transport: Arc<dyn Transport>,
    reload: Arc<dyn Reload>,
) -> Result<Option<FormHandler>, DomError> {
    if !document.has_form(FORM_ID) {
        debug!(form = FORM_ID, "No interaction form on page; handler not attached");
        return Ok(None);
    }

    let fields = FormBindings::bind(document)?;
    let status = document.status(STATUS_ID)?;
    Ok(Some(FormHandler::new(fields, status, transport, reload)))
}

impl FormHandler {
    pub fn new(
        fields: FormBindings,
        status: StatusElement,
        transport: Arc<dyn Transport>,
        reload: Arc<dyn Reload>,
    ) -> Self {
        Self {
            fields,
            status,
            transport,
            reload,
        }
    }

    /// Handles one submit event end to end. Never fails: every error is
    /// rendered into the status element.
    pub async fn submit(&self, event: &mut SubmitEvent) -> Submission {
        event.prevent_default();

        let payload = InteractionPayload::from_form(&self.fields.snapshot());
        let outcome = self.log_interaction(&payload).await;

        self.status.render(&outcome.status_message());

        let reload = outcome.triggers_reload().then(|| self.schedule_reload());

        Submission {
            payload,
            outcome,
            reload,
        }
    }

    /// Posts `payload` and classifies the response. Touches no element.
    pub async fn log_interaction(&self, payload: &InteractionPayload) -> Outcome {
        info!(
            student_id = ?payload.student_id,
            content_id = ?payload.content_id,
            completed = payload.completed,
            "Logging interaction"
        );

        let resolved = match self.transport.post_json(LOG_INTERACTION_PATH, payload).await {
            Ok(raw) => {
                debug!(status = raw.status, bytes = raw.body.len(), "Endpoint responded");
                resolve_response(raw.status, &raw.body)
            }
            Err(e) => Err(e),
        };

        match resolved {
            Ok(outcome) => {
                if let Outcome::Rejected { status, reason } = &outcome {
                    warn!(status, reason = ?reason, "Interaction rejected");
                }
                outcome
            }
            Err(e) => {
                error!(error = %e, "Error logging interaction");
                Outcome::Unreachable
            }
        }
    }

    fn schedule_reload(&self) -> JoinHandle<()> {
        let reload = Arc::clone(&self.reload);
        tokio::spawn(async move {
            tokio::time::sleep(RELOAD_DELAY).await;
            info!("Reloading page");
            reload.reload();
        })
    }
}
