//! Discrete user notifications produced by view-state operations.

use crate::model::entity::EntityKind;
use crate::view::operation::MutationAction;

/// Visual weight of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    /// Completed destructive action (deletes).
    Destructive,
    Error,
}

/// One dismissable message for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub title: String,
    pub description: String,
}

impl Notification {
    pub fn new(kind: NotificationKind, title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            kind,
            title: title.into(),
            description: description.into(),
        }
    }

    /// "Customer Created" / "Vendor Updated" / "Customer Deleted".
    pub fn mutation_succeeded(kind: EntityKind, action: MutationAction, name: &str) -> Self {
        let title = format!("{} {}", kind.label(), action.past_tense());
        match action {
            MutationAction::Delete => Self::new(
                NotificationKind::Destructive,
                title,
                format!("{name} has been deleted."),
            ),
            MutationAction::Create | MutationAction::Update => Self::new(
                NotificationKind::Success,
                title,
                format!("{name} has been successfully saved."),
            ),
        }
    }

    /// Names the attempted operation and entity together with the cause.
    pub fn mutation_failed(kind: EntityKind, action: MutationAction, name: &str, cause: &str) -> Self {
        Self::new(
            NotificationKind::Error,
            format!("{} {} Failed", kind.label(), action.label()),
            format!(
                "Could not {} {} \"{name}\": {cause}",
                action.as_str(),
                kind.as_str()
            ),
        )
    }

    pub fn suggestion_input_needed() -> Self {
        Self::new(
            NotificationKind::Error,
            "Input Needed for AI",
            "Please enter a name or some notes to get AI suggestions.",
        )
    }

    pub fn suggestion_failed() -> Self {
        Self::new(
            NotificationKind::Error,
            "AI Suggestion Failed",
            "Could not retrieve AI suggestions. Please try again.",
        )
    }
}
