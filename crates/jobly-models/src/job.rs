//! Job listings.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// A job row as returned by the API.
///
/// `equity` is a NUMERIC share in [0, 1]; it serializes as a decimal string
/// to avoid float drift on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: i32,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salary: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub equity: Option<Decimal>,
    pub company_handle: String,
}

/// Job fields nested inside a company listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobSummary {
    pub id: i32,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salary: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub equity: Option<Decimal>,
}

/// Payload for creating a job.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewJob {
    #[validate(length(min = 1))]
    pub title: String,
    #[validate(range(min = 0))]
    pub salary: Option<i32>,
    pub equity: Option<Decimal>,
    #[validate(length(min = 1))]
    pub company_handle: String,
}

/// Sparse field-update map for PATCH /jobs/{id}.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct JobPatch {
    #[validate(length(min = 1))]
    pub title: Option<String>,
    #[validate(range(min = 0))]
    pub salary: Option<i32>,
    pub equity: Option<Decimal>,
    #[validate(length(min = 1))]
    pub company_handle: Option<String>,
}

impl JobPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.salary.is_none()
            && self.equity.is_none()
            && self.company_handle.is_none()
    }
}

/// Search filters for GET /jobs.
///
/// `has_equity=true` restricts results to jobs with non-zero equity; any
/// other value leaves equity out of the query.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobFilter {
    pub title: Option<String>,
    pub min_salary: Option<i32>,
    pub has_equity: Option<bool>,
}

impl JobFilter {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.min_salary.is_none() && self.has_equity.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn job_serializes_equity_as_string() {
        let job = Job {
            id: 7,
            title: "Conservator".to_string(),
            salary: Some(110_000),
            equity: Some(Decimal::from_str("0.08").unwrap()),
            company_handle: "watson-davis".to_string(),
        };
        let json = serde_json::to_value(&job).unwrap();
        assert_eq!(json["equity"], "0.08");
        assert_eq!(json["companyHandle"], "watson-davis");
    }

    #[test]
    fn filter_deserializes_from_query_shape() {
        let filter: JobFilter =
            serde_json::from_str(r#"{"title":"eng","minSalary":50000,"hasEquity":true}"#).unwrap();
        assert_eq!(filter.min_salary, Some(50_000));
        assert_eq!(filter.has_equity, Some(true));
    }

    #[test]
    fn new_job_rejects_negative_salary() {
        let new = NewJob {
            title: "Intern".to_string(),
            salary: Some(-1),
            equity: None,
            company_handle: "acme".to_string(),
        };
        assert!(new.validate().is_err());
    }
}
