//! Company records and the filters/patches that operate on them.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::job::JobSummary;

/// A company row as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    /// URL-safe unique handle, e.g. "anderson-arias-morrow".
    pub handle: String,
    pub name: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_employees: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
}

/// A company together with its job listings, used by the list endpoints.
#[derive(Debug, Clone, Serialize)]
pub struct CompanyWithJobs {
    #[serde(flatten)]
    pub company: Company,
    pub jobs: Vec<JobSummary>,
}

/// Payload for creating a company.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewCompany {
    #[validate(length(min = 1, max = 25))]
    pub handle: String,
    #[validate(length(min = 1))]
    pub name: String,
    pub description: String,
    #[validate(range(min = 0))]
    pub num_employees: Option<i32>,
    #[validate(url)]
    pub logo_url: Option<String>,
}

/// Sparse field-update map for PATCH /companies/{handle}.
///
/// Absent fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CompanyPatch {
    #[validate(length(min = 1))]
    pub name: Option<String>,
    pub description: Option<String>,
    #[validate(range(min = 0))]
    pub num_employees: Option<i32>,
    #[validate(url)]
    pub logo_url: Option<String>,
}

impl CompanyPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.num_employees.is_none()
            && self.logo_url.is_none()
    }
}

/// Search filters for GET /companies.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyFilter {
    pub name: Option<String>,
    pub min_employees: Option<i32>,
    pub max_employees: Option<i32>,
}

impl CompanyFilter {
    /// Whether any filter was supplied at all.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.min_employees.is_none() && self.max_employees.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn company_serializes_camel_case() {
        let company = Company {
            handle: "acme".to_string(),
            name: "Acme Corp".to_string(),
            description: "Anvils".to_string(),
            num_employees: Some(40),
            logo_url: None,
        };
        let json = serde_json::to_value(&company).unwrap();
        assert_eq!(json["numEmployees"], 40);
        assert!(json.get("logoUrl").is_none());
    }

    #[test]
    fn patch_deserializes_sparse() {
        let patch: CompanyPatch =
            serde_json::from_str(r#"{"numEmployees": 12}"#).unwrap();
        assert_eq!(patch.num_employees, Some(12));
        assert!(patch.name.is_none());
        assert!(!patch.is_empty());
        assert!(CompanyPatch::default().is_empty());
    }

    #[test]
    fn new_company_rejects_long_handle() {
        let new = NewCompany {
            handle: "x".repeat(26),
            name: "Too Long Inc".to_string(),
            description: String::new(),
            num_employees: None,
            logo_url: None,
        };
        assert!(new.validate().is_err());
    }
}
