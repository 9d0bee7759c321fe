//! Sortable, filterable view over cached records.
//!
//! Sorting and filtering are pure functions of the record slice and the view
//! state; the view never talks to the server except through
//! [`ListView::confirm_delete`].

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

use crate::dto::Record;
use crate::error::ClientError;
use crate::notice::Notice;
use crate::session::RecordsClient;

/// Text rendered when no record survives filtering.
pub const EMPTY_MESSAGE: &str = "No records found";

/// Display columns; each can be sorted and filtered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SortColumn {
    Name,
    Phone,
    Email,
    Country,
    State,
    CreatedDate,
    UpdatedDate,
}

impl SortColumn {
    /// Every column in display order.
    pub const ALL: [Self; 7] = [
        Self::Name,
        Self::Phone,
        Self::Email,
        Self::Country,
        Self::State,
        Self::CreatedDate,
        Self::UpdatedDate,
    ];

    /// Column heading.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Phone => "Phone",
            Self::Email => "Email",
            Self::Country => "Country",
            Self::State => "State",
            Self::CreatedDate => "Created Date",
            Self::UpdatedDate => "Updated Date",
        }
    }

    /// Record field name backing the column.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Phone => "phone",
            Self::Email => "email",
            Self::Country => "country",
            Self::State => "state",
            Self::CreatedDate => "createdDate",
            Self::UpdatedDate => "updatedDate",
        }
    }

    /// Column whose [`key`](Self::key) matches `raw`, ignoring ASCII case.
    #[must_use]
    pub fn from_key(raw: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|column| column.key().eq_ignore_ascii_case(raw))
    }

    /// Cell value of `record` in this column.
    #[must_use]
    pub fn value(self, record: &Record) -> &str {
        match self {
            Self::Name => &record.name,
            Self::Phone => &record.phone,
            Self::Email => &record.email,
            Self::Country => &record.country,
            Self::State => &record.state,
            Self::CreatedDate => &record.created_date,
            Self::UpdatedDate => &record.updated_date,
        }
    }
}

impl fmt::Display for SortColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// Active ordering of the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortConfig {
    /// Country, then state, both ascending.
    #[default]
    Geo,
    /// One column in one direction.
    Column {
        column: SortColumn,
        direction: SortDirection,
    },
}

impl SortConfig {
    /// Ordering after the user selects `column`.
    ///
    /// Selecting the column currently sorted ascending flips it to
    /// descending; anything else starts ascending.
    #[must_use]
    pub fn select(self, column: SortColumn) -> Self {
        let direction = match self {
            Self::Column {
                column: current,
                direction: SortDirection::Ascending,
            } if current == column => SortDirection::Descending,
            _ => SortDirection::Ascending,
        };
        Self::Column { column, direction }
    }

    /// Compare two records under this ordering.
    #[must_use]
    pub fn compare(self, a: &Record, b: &Record) -> Ordering {
        match self {
            Self::Geo => a
                .country
                .cmp(&b.country)
                .then_with(|| a.state.cmp(&b.state)),
            Self::Column { column, direction } => {
                let ordering = column.value(a).cmp(column.value(b));
                match direction {
                    SortDirection::Ascending => ordering,
                    SortDirection::Descending => ordering.reverse(),
                }
            }
        }
    }
}

/// Per-column substring filters, combined with logical AND.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterConfig(BTreeMap<SortColumn, String>);

impl FilterConfig {
    /// Set the filter text for `column`; empty text removes it.
    pub fn set(&mut self, column: SortColumn, text: &str) {
        if text.is_empty() {
            self.0.remove(&column);
        } else {
            self.0.insert(column, text.to_lowercase());
        }
    }

    /// Current (lower-cased) filter text for `column`.
    #[must_use]
    pub fn get(&self, column: SortColumn) -> &str {
        self.0.get(&column).map_or("", String::as_str)
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// Whether `record` matches every active filter, case-insensitively.
    #[must_use]
    pub fn matches(&self, record: &Record) -> bool {
        self.0
            .iter()
            .all(|(column, needle)| column.value(record).to_lowercase().contains(needle.as_str()))
    }
}

/// State of the record list page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListView {
    sort: SortConfig,
    filter: FilterConfig,
    pending_delete: Option<u64>,
    highlighted: Option<u64>,
}

impl ListView {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn sort(&self) -> SortConfig {
        self.sort
    }

    #[must_use]
    pub const fn filter(&self) -> &FilterConfig {
        &self.filter
    }

    /// Handle a click on a column heading.
    pub fn select_sort(&mut self, column: SortColumn) {
        self.sort = self.sort.select(column);
    }

    pub fn set_filter(&mut self, column: SortColumn, text: &str) {
        self.filter.set(column, text);
    }

    /// Records to display: sorted (stable), then filtered, so the result
    /// keeps the sort order.
    #[must_use]
    pub fn visible<'a>(&self, records: &'a [Record]) -> Vec<&'a Record> {
        let mut rows: Vec<&Record> = records.iter().collect();
        rows.sort_by(|a, b| self.sort.compare(a, b));
        rows.retain(|record| self.filter.matches(record));
        rows
    }

    /// [`EMPTY_MESSAGE`] when `rows` is empty.
    #[must_use]
    pub const fn empty_message(rows: &[&Record]) -> Option<&'static str> {
        if rows.is_empty() {
            Some(EMPTY_MESSAGE)
        } else {
            None
        }
    }

    /// Mark the record touched by the latest create or update.
    pub const fn highlight(&mut self, id: Option<u64>) {
        self.highlighted = id;
    }

    #[must_use]
    pub const fn highlighted(&self) -> Option<u64> {
        self.highlighted
    }

    /// Ask for confirmation before deleting `id`.
    pub const fn request_delete(&mut self, id: u64) -> Notice {
        self.pending_delete = Some(id);
        Notice::confirm_deletion(id)
    }

    #[must_use]
    pub const fn pending_delete(&self) -> Option<u64> {
        self.pending_delete
    }

    /// Dismiss the confirmation; nothing is deleted.
    pub const fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    /// Delete the record awaiting confirmation.
    ///
    /// Returns the deleted id, or `None` when no deletion was pending. The
    /// prompt closes whatever the outcome.
    ///
    /// # Errors
    ///
    /// Propagates the client failure; the record stays cached.
    pub async fn confirm_delete(
        &mut self,
        client: &mut RecordsClient,
    ) -> Result<Option<u64>, ClientError> {
        let Some(id) = self.pending_delete.take() else {
            return Ok(None);
        };
        client.delete(id).await?;
        if self.highlighted == Some(id) {
            self.highlighted = None;
        }
        Ok(Some(id))
    }
}

#[cfg(test)]
#[path = "listing_tests.rs"]
mod tests;
