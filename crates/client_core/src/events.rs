//! Events published by the controllers for whatever UI is bound to them.

use shared::domain::CategoryFilter;

use crate::contact::SubmissionPhase;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationVariant {
    Default,
    Destructive,
}

/// Transient toast shown to the visitor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub description: String,
    pub variant: NotificationVariant,
}

impl Notification {
    pub fn info(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            variant: NotificationVariant::Default,
        }
    }

    pub fn destructive(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            variant: NotificationVariant::Destructive,
        }
    }

    pub fn is_destructive(&self) -> bool {
        self.variant == NotificationVariant::Destructive
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContactEvent {
    PhaseChanged(SubmissionPhase),
    Notify(Notification),
    CopiedChanged(bool),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkillsEvent {
    CategoryChanged(CategoryFilter),
    CardRevealed { name: String, index: usize },
}
