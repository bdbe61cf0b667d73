//! Column definitions and the row accessor trait.

use std::borrow::Cow;

use crate::types::{DashboardEntry, GitopsTarget};

/// A row that can be shown in a table.
///
/// `row_id` keys selection and expansion; `cell_value` feeds filtering and
/// sorting. Display-only columns return `None`.
pub trait TableRow {
    fn row_id(&self) -> &str;
    fn cell_value(&self, column: &str) -> Option<Cow<'_, str>>;
}

/// Static description of one table column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnDef {
    pub key: &'static str,
    pub header: &'static str,
    pub sortable: bool,
    pub filterable: bool,
    pub hideable: bool,
}

impl ColumnDef {
    /// A data column backed by [`TableRow::cell_value`].
    pub const fn accessor(key: &'static str, header: &'static str) -> Self {
        Self {
            key,
            header,
            sortable: true,
            filterable: true,
            hideable: true,
        }
    }

    /// A display-only column (checkbox, action buttons).
    pub const fn display(key: &'static str, header: &'static str) -> Self {
        Self {
            key,
            header,
            sortable: false,
            filterable: false,
            hideable: false,
        }
    }
}

pub const SELECT_COLUMN: &str = "select";
pub const ACTIONS_COLUMN: &str = "actions";

/// Columns of the dashboard hub table.
pub const DASHBOARD_COLUMNS: &[ColumnDef] = &[
    ColumnDef::display(SELECT_COLUMN, ""),
    ColumnDef::accessor("name", "Name"),
    ColumnDef::accessor("description", "Description"),
    ColumnDef::display(ACTIONS_COLUMN, ""),
];

/// Columns of the gitops target list.
pub const GITOPS_COLUMNS: &[ColumnDef] = &[
    ColumnDef::accessor("name", "Name"),
    ColumnDef::display(ACTIONS_COLUMN, ""),
];

/// Look up a column by key.
pub fn find_column<'a>(columns: &'a [ColumnDef], key: &str) -> Option<&'a ColumnDef> {
    columns.iter().find(|c| c.key == key)
}

impl TableRow for DashboardEntry {
    fn row_id(&self) -> &str {
        &self.id
    }

    fn cell_value(&self, column: &str) -> Option<Cow<'_, str>> {
        match column {
            "id" => Some(Cow::Borrowed(self.id.as_str())),
            "name" => Some(Cow::Borrowed(self.name.as_str())),
            "description" => self.description.as_deref().map(Cow::Borrowed),
            "url" => self.url.as_deref().map(Cow::Borrowed),
            _ => None,
        }
    }
}

impl TableRow for GitopsTarget {
    fn row_id(&self) -> &str {
        &self.id
    }

    fn cell_value(&self, column: &str) -> Option<Cow<'_, str>> {
        match column {
            "id" => Some(Cow::Borrowed(self.id.as_str())),
            "name" => Some(Cow::Borrowed(self.name.as_str())),
            _ => None,
        }
    }
}
