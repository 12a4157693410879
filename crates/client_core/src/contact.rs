//! Contact form controller: field state, honeypot check, submission
//! lifecycle, and copy-to-clipboard feedback.

use std::{
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    time::Duration,
};

use shared::{
    domain::FieldKey,
    error::FormErrorBody,
    protocol::{prefilled_message, subject_line, ContactSubmission},
};
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

use crate::{
    clipboard::{ClipboardService, CopyPath},
    error::{ClipboardError, ContactError, GENERIC_NETWORK_MESSAGE},
    events::{ContactEvent, Notification},
    page::PageContext,
    timer::OneShotTimer,
    transport::FormBackend,
};

pub const DEFAULT_COPY_FEEDBACK: Duration = Duration::from_millis(3000);

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    pub name: String,
    pub email: String,
    pub message: String,
    pub honeypot: String,
}

impl FormState {
    /// Empty form, with the message pre-filled when the page carries a subject.
    pub fn for_page(page: &PageContext) -> Self {
        Self {
            message: page.subject().map(prefilled_message).unwrap_or_default(),
            ..Self::default()
        }
    }

    pub fn field(&self, key: FieldKey) -> &str {
        match key {
            FieldKey::Name => &self.name,
            FieldKey::Email => &self.email,
            FieldKey::Message => &self.message,
            FieldKey::Honeypot => &self.honeypot,
        }
    }

    fn field_mut(&mut self, key: FieldKey) -> &mut String {
        match key {
            FieldKey::Name => &mut self.name,
            FieldKey::Email => &mut self.email,
            FieldKey::Message => &mut self.message,
            FieldKey::Honeypot => &mut self.honeypot,
        }
    }

    pub fn missing_required(&self) -> Vec<FieldKey> {
        FieldKey::REQUIRED
            .into_iter()
            .filter(|key| self.field(*key).trim().is_empty())
            .collect()
    }

    pub fn is_spam(&self) -> bool {
        !self.honeypot.is_empty()
    }

    fn to_submission(&self, page: &PageContext) -> ContactSubmission {
        ContactSubmission {
            name: self.name.clone(),
            email: self.email.clone(),
            message: self.message.clone(),
            page_url: page.page_url.clone(),
            subject: subject_line(page.subject()),
            gotcha: self.honeypot.clone(),
        }
    }
}

/// `local@domain` with no whitespace; the same bar a browser email input sets.
fn looks_like_email(raw: &str) -> bool {
    let raw = raw.trim();
    match raw.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.is_empty()
                && !domain.contains('@')
                && !raw.chars().any(char::is_whitespace)
        }
        None => false,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmissionPhase {
    #[default]
    Idle,
    Submitting,
    Succeeded,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitReceipt {
    pub status: u16,
    pub notification: Notification,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CopyResult {
    Copied { path: CopyPath },
    /// Both clipboard paths failed; `manual_text` is what the visitor should copy by hand.
    Failed { manual_text: String, reason: String },
}

impl CopyResult {
    pub fn is_copied(&self) -> bool {
        matches!(self, CopyResult::Copied { .. })
    }
}

/// `copied` flag that clears itself after the feedback window.
struct CopyFeedback {
    copied: Arc<AtomicBool>,
    window: Duration,
    clear_timer: Option<OneShotTimer>,
}

impl CopyFeedback {
    fn new(window: Duration) -> Self {
        Self {
            copied: Arc::new(AtomicBool::new(false)),
            window,
            clear_timer: None,
        }
    }

    fn mark(&mut self, events: broadcast::Sender<ContactEvent>) {
        if let Some(previous) = self.clear_timer.take() {
            previous.cancel();
        }
        self.copied.store(true, Ordering::SeqCst);
        let _ = events.send(ContactEvent::CopiedChanged(true));
        let copied = self.copied.clone();
        self.clear_timer = Some(OneShotTimer::schedule(self.window, move || {
            copied.store(false, Ordering::SeqCst);
            let _ = events.send(ContactEvent::CopiedChanged(false));
        }));
    }

    fn is_copied(&self) -> bool {
        self.copied.load(Ordering::SeqCst)
    }
}

pub struct ContactFormController {
    form: FormState,
    phase: SubmissionPhase,
    page: PageContext,
    contact_email: String,
    backend: Arc<dyn FormBackend>,
    clipboard: ClipboardService,
    feedback: CopyFeedback,
    events: broadcast::Sender<ContactEvent>,
}

impl ContactFormController {
    pub fn new(
        page: PageContext,
        contact_email: impl Into<String>,
        backend: Arc<dyn FormBackend>,
        clipboard: ClipboardService,
    ) -> Self {
        let (events, _) = broadcast::channel(64);
        Self {
            form: FormState::for_page(&page),
            phase: SubmissionPhase::Idle,
            page,
            contact_email: contact_email.into(),
            backend,
            clipboard,
            feedback: CopyFeedback::new(DEFAULT_COPY_FEEDBACK),
            events,
        }
    }

    pub fn with_copy_feedback(mut self, window: Duration) -> Self {
        self.feedback = CopyFeedback::new(window);
        self
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<ContactEvent> {
        self.events.subscribe()
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn page(&self) -> &PageContext {
        &self.page
    }

    pub fn phase(&self) -> SubmissionPhase {
        self.phase
    }

    pub fn can_submit(&self) -> bool {
        self.phase != SubmissionPhase::Submitting
    }

    pub fn is_copied(&self) -> bool {
        self.feedback.is_copied()
    }

    pub fn contact_email(&self) -> &str {
        &self.contact_email
    }

    pub fn update_field(&mut self, key: FieldKey, value: impl Into<String>) {
        *self.form.field_mut(key) = value.into();
    }

    /// Returns a settled phase to `Idle` once the UI has shown it.
    pub fn dismiss(&mut self) {
        if matches!(
            self.phase,
            SubmissionPhase::Succeeded | SubmissionPhase::Failed
        ) {
            self.set_phase(SubmissionPhase::Idle);
        }
    }

    pub async fn submit(&mut self) -> Result<SubmitReceipt, ContactError> {
        let missing = self.form.missing_required();
        if !missing.is_empty() {
            return Err(ContactError::MissingRequired { fields: missing });
        }
        if !looks_like_email(&self.form.email) {
            return Err(ContactError::InvalidEmail(self.form.email.clone()));
        }
        if self.form.is_spam() {
            debug!("contact: honeypot filled, dropping submission");
            return Err(ContactError::SpamSuppressed);
        }

        self.set_phase(SubmissionPhase::Submitting);
        let submission = self.form.to_submission(&self.page);
        info!(subject = %submission.subject, "contact: submitting form");

        let result = match self.backend.post_submission(&submission).await {
            Ok(response) if response.is_success() => Ok(response.status),
            Ok(response) => Err(ContactError::SubmissionRejected {
                status: response.status,
                message: FormErrorBody::failure_message(response.body.as_deref()),
            }),
            Err(err) => {
                let message = if err.message.trim().is_empty() {
                    GENERIC_NETWORK_MESSAGE.to_string()
                } else {
                    err.message
                };
                Err(ContactError::SubmissionNetworkError(message))
            }
        };

        match result {
            Ok(status) => {
                self.form = FormState::default();
                self.set_phase(SubmissionPhase::Succeeded);
                let notification = Notification::info(
                    "Message sent!",
                    "Thanks for your submission. I'll get back to you soon.",
                );
                self.notify(notification.clone());
                info!(status, "contact: submission accepted");
                Ok(SubmitReceipt {
                    status,
                    notification,
                })
            }
            Err(err) => {
                warn!(error = %err, "contact: submission failed");
                self.set_phase(SubmissionPhase::Failed);
                self.notify(Notification::destructive("Error", err.to_string()));
                Err(err)
            }
        }
    }

    pub async fn copy_contact_email(&mut self) -> CopyResult {
        let email = self.contact_email.clone();
        self.copy_to_clipboard(&email).await
    }

    pub async fn copy_to_clipboard(&mut self, text: &str) -> CopyResult {
        match self.clipboard.copy_text(text).await {
            Ok(path) => {
                self.feedback.mark(self.events.clone());
                self.notify(Notification::info(
                    "Email copied!",
                    format!("{text} has been copied to your clipboard."),
                ));
                CopyResult::Copied { path }
            }
            Err(err) => {
                let reason = match err {
                    ClipboardError::FallbackFailed { reason, .. } => reason,
                    ClipboardError::Unavailable(reason) => reason,
                };
                warn!(%reason, "contact: copy failed");
                self.notify(Notification::destructive(
                    "Copy failed",
                    format!("Please copy manually: {text}"),
                ));
                CopyResult::Failed {
                    manual_text: text.to_string(),
                    reason,
                }
            }
        }
    }

    fn set_phase(&mut self, phase: SubmissionPhase) {
        self.phase = phase;
        let _ = self.events.send(ContactEvent::PhaseChanged(phase));
    }

    fn notify(&self, notification: Notification) {
        let _ = self.events.send(ContactEvent::Notify(notification));
    }
}

#[cfg(test)]
#[path = "tests/contact_tests.rs"]
mod tests;
