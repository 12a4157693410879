use std::sync::Arc;

use shared::catalog::portfolio_skills;

pub mod clipboard;
pub mod config;
pub mod contact;
pub mod error;
pub mod events;
pub mod page;
pub mod skills;
pub mod timer;
pub mod transport;

pub use clipboard::{ClipboardService, CopyPath};
pub use config::{load_settings, Settings};
pub use contact::{ContactFormController, CopyResult, FormState, SubmissionPhase, SubmitReceipt};
pub use error::{ClipboardError, ContactError, TransportError};
pub use events::{ContactEvent, Notification, NotificationVariant, SkillsEvent};
pub use page::{mailto_href, PageContext};
pub use skills::{compute_visible_skills, SkillCard, SkillsController};
pub use transport::{FormBackend, HttpFormBackend};

/// Contact controller wired to the configured form endpoint and the system clipboard.
pub fn contact_controller(settings: &Settings, page: PageContext) -> ContactFormController {
    ContactFormController::new(
        page,
        settings.contact_email.clone(),
        Arc::new(HttpFormBackend::new(settings.form_endpoint.clone())),
        ClipboardService::system(),
    )
    .with_copy_feedback(settings.copy_feedback())
}

/// Skills controller over the bundled catalog.
pub fn skills_controller(settings: &Settings) -> SkillsController {
    SkillsController::new(portfolio_skills()).with_stagger(settings.reveal_stagger())
}
