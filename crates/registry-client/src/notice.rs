//! User-facing notices shown after submissions and before deletions.

use crate::dto::Record;
use crate::error::GENERIC_ERROR_MESSAGE;
use crate::form::FormMode;
use crate::session::SubmitError;

/// Navigation offered alongside a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoticeLink {
    pub to: &'static str,
    pub text: &'static str,
}

/// Link back to the record list.
pub const LIST_LINK: NoticeLink = NoticeLink {
    to: "/list",
    text: "Go to List",
};

/// A modal-style message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Notice {
    pub title: &'static str,
    pub message: &'static str,
    pub link: Option<NoticeLink>,
    /// Record the notice refers to; the list highlights it.
    pub record_id: Option<u64>,
}

impl Notice {
    #[must_use]
    pub const fn created(id: u64) -> Self {
        Self {
            title: "Success",
            message: "Record created successfully!",
            link: Some(LIST_LINK),
            record_id: Some(id),
        }
    }

    #[must_use]
    pub const fn updated(id: u64) -> Self {
        Self {
            title: "Success",
            message: "Record updated successfully!",
            link: Some(LIST_LINK),
            record_id: Some(id),
        }
    }

    /// Shown for any failed request or rejected submission.
    #[must_use]
    pub const fn failure() -> Self {
        Self {
            title: "Error",
            message: GENERIC_ERROR_MESSAGE,
            link: None,
            record_id: None,
        }
    }

    /// Prompt shown before deleting `id`.
    #[must_use]
    pub const fn confirm_deletion(id: u64) -> Self {
        Self {
            title: "Confirm Deletion",
            message: "Are you sure you want to delete this record?",
            link: None,
            record_id: Some(id),
        }
    }

    /// Notice for the outcome of a form submission in `mode`.
    #[must_use]
    pub const fn for_submission(mode: FormMode, outcome: Result<&Record, &SubmitError>) -> Self {
        match (mode, outcome) {
            (FormMode::Create, Ok(record)) => Self::created(record.id),
            (FormMode::Edit { .. }, Ok(record)) => Self::updated(record.id),
            (_, Err(_)) => Self::failure(),
        }
    }
}
