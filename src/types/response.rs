//! Wire-level response shapes shared across handlers.

use serde::Serialize;
use utoipa::ToSchema;

/// One rejected spreadsheet row.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct FailedImport {
    #[schema(example = "dup@example.com")]
    pub email: String,
    #[schema(example = "DuplicateEmail: Email 'dup@example.com' is already taken.")]
    pub reason: String,
}

/// Outcome of a bulk user import, partitioned by row result.
///
/// Field names keep the PascalCase the frontend already consumes.
#[derive(Debug, Clone, Default, Serialize, ToSchema)]
pub struct ImportReport {
    #[serde(rename = "SuccessfullyRegistered")]
    pub successfully_registered: Vec<String>,
    #[serde(rename = "FailedToRegister")]
    pub failed_to_register: Vec<FailedImport>,
}

impl ImportReport {
    pub fn record_success(&mut self, email: impl Into<String>) {
        self.successfully_registered.push(email.into());
    }

    pub fn record_failure(&mut self, email: impl Into<String>, reason: impl Into<String>) {
        self.failed_to_register.push(FailedImport {
            email: email.into(),
            reason: reason.into(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_serializes_with_pascal_case_keys() {
        let mut report = ImportReport::default();
        report.record_success("ok@example.com");
        report.record_failure("dup@example.com", "DuplicateEmail: taken");

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["SuccessfullyRegistered"][0], "ok@example.com");
        assert_eq!(json["FailedToRegister"][0]["email"], "dup@example.com");
        assert_eq!(json["FailedToRegister"][0]["reason"], "DuplicateEmail: taken");
    }
}
