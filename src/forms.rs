//! Dashboard entry create/edit form.
//!
//! Holds the raw text the user typed, validates it, and turns it into the
//! [`Mutation`] the backend worker applies.

use url::Url;

use crate::backend::Mutation;
use crate::error::{ConsoleError, Result};
use crate::types::{DashboardEntry, NewDashboardEntry};

pub const MAX_NAME_LEN: usize = 100;
pub const MAX_DESCRIPTION_LEN: usize = 500;

/// Field a validation error belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    DashboardName,
    Description,
    Url,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: FormField,
    pub message: String,
}

impl FieldError {
    fn new(field: FormField, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Editable values of the dashboard entry form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DashboardEntryForm {
    pub dashboard_name: String,
    pub description: String,
    pub url: String,
}

impl DashboardEntryForm {
    /// Prefill from an existing entry for editing.
    pub fn from_entry(entry: &DashboardEntry) -> Self {
        Self {
            dashboard_name: entry.name.clone(),
            description: entry.description.clone().unwrap_or_default(),
            url: entry.url.clone().unwrap_or_default(),
        }
    }

    /// All field errors; empty when the form can be submitted.
    pub fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();

        let name = self.dashboard_name.trim();
        if name.is_empty() {
            errors.push(FieldError::new(FormField::DashboardName, "Name is required"));
        } else if name.chars().count() > MAX_NAME_LEN {
            errors.push(FieldError::new(
                FormField::DashboardName,
                format!("Name must be at most {} characters", MAX_NAME_LEN),
            ));
        }

        if self.description.trim().chars().count() > MAX_DESCRIPTION_LEN {
            errors.push(FieldError::new(
                FormField::Description,
                format!(
                    "Description must be at most {} characters",
                    MAX_DESCRIPTION_LEN
                ),
            ));
        }

        let url = self.url.trim();
        if !url.is_empty() && !is_http_url(url) {
            errors.push(FieldError::new(
                FormField::Url,
                "URL must start with http:// or https:// and include a host",
            ));
        }

        errors
    }

    /// First error for a field, for inline display.
    pub fn error_for(errors: &[FieldError], field: FormField) -> Option<&str> {
        errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    /// Validate and build a create mutation, or an update of `existing`.
    pub fn into_mutation(self, existing: Option<&DashboardEntry>) -> Result<Mutation> {
        if let Some(first) = self.validate().into_iter().next() {
            return Err(ConsoleError::Validation(first.message));
        }

        let name = self.dashboard_name.trim().to_string();
        let description = non_empty(&self.description);
        let url = non_empty(&self.url);

        Ok(match existing {
            Some(entry) => Mutation::UpdateDashboardEntry(DashboardEntry {
                id: entry.id.clone(),
                name,
                description,
                url,
            }),
            None => Mutation::CreateDashboardEntry(NewDashboardEntry {
                name,
                description,
                url,
            }),
        })
    }
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn is_http_url(url: &str) -> bool {
    Url::parse(url).is_ok_and(|parsed| {
        matches!(parsed.scheme(), "http" | "https")
            && parsed.host_str().is_some_and(|host| !host.is_empty())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(name: &str, description: &str, url: &str) -> DashboardEntryForm {
        DashboardEntryForm {
            dashboard_name: name.into(),
            description: description.into(),
            url: url.into(),
        }
    }

    #[test]
    fn test_name_required() {
        let errors = form("   ", "", "").validate();
        assert_eq!(
            DashboardEntryForm::error_for(&errors, FormField::DashboardName),
            Some("Name is required")
        );
    }

    #[test]
    fn test_length_limits() {
        let long_name = "n".repeat(MAX_NAME_LEN + 1);
        let long_desc = "d".repeat(MAX_DESCRIPTION_LEN + 1);
        let errors = form(&long_name, &long_desc, "").validate();
        assert_eq!(errors.len(), 2);
        assert!(form(&"n".repeat(MAX_NAME_LEN), "", "").validate().is_empty());
    }

    #[test]
    fn test_url_rules() {
        assert!(form("a", "", "https://grafana.local/d/1").validate().is_empty());
        assert!(form("a", "", "http://10.0.0.1:3000").validate().is_empty());
        assert!(!form("a", "", "ftp://host").validate().is_empty());
        assert!(!form("a", "", "https://").validate().is_empty());
        assert!(!form("a", "", "grafana.local").validate().is_empty());
    }

    #[test]
    fn test_url_without_host_rejected() {
        for url in ["http://:8080", "https://@/", "https://:", "http:// /d/1"] {
            let errors = form("a", "", url).validate();
            assert_eq!(
                DashboardEntryForm::error_for(&errors, FormField::Url),
                Some("URL must start with http:// or https:// and include a host"),
                "{} should be rejected",
                url
            );
        }
    }

    #[test]
    fn test_create_mutation_drops_empty_optionals() {
        let mutation = form(" Grafana ", "  ", "").into_mutation(None).unwrap();
        assert_eq!(
            mutation,
            Mutation::CreateDashboardEntry(NewDashboardEntry {
                name: "Grafana".into(),
                description: None,
                url: None,
            })
        );
    }

    #[test]
    fn test_update_keeps_id() {
        let existing = DashboardEntry {
            id: "4".into(),
            name: "Old".into(),
            description: Some("desc".into()),
            url: None,
        };
        let mut edit = DashboardEntryForm::from_entry(&existing);
        assert_eq!(edit.description, "desc");
        edit.dashboard_name = "New".into();
        match edit.into_mutation(Some(&existing)).unwrap() {
            Mutation::UpdateDashboardEntry(entry) => {
                assert_eq!(entry.id, "4");
                assert_eq!(entry.name, "New");
                assert_eq!(entry.description.as_deref(), Some("desc"));
            }
            other => panic!("unexpected mutation: {:?}", other),
        }
    }

    #[test]
    fn test_invalid_form_is_validation_error() {
        assert!(matches!(
            form("", "", "").into_mutation(None),
            Err(ConsoleError::Validation(_))
        ));
    }
}
