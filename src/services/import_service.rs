//! Bulk user import: spreadsheet parsing and row-by-row registration.

use std::io::Cursor;
use std::sync::Arc;

use calamine::{Data, Reader, Xlsx};

use super::{IdentityService, Mail, Mailer};
use crate::config::MAX_IMPORT_ROWS;
use crate::domain::RegisterRequest;
use crate::errors::{AppError, AppResult};
use crate::types::ImportReport;

/// Expected column layout after the header row.
const COL_EMAIL: usize = 0;
const COL_FIRST_NAME: usize = 1;
const COL_LAST_NAME: usize = 2;
const COL_CNP: usize = 3;
const COL_ADDRESS: usize = 4;
const COL_PHONE_NUMBER: usize = 5;
const COL_PHOTO_URL: usize = 6;
const COL_ROLE: usize = 7;

/// Parses an uploaded spreadsheet into registration rows.
pub trait SpreadsheetImporter: Send + Sync {
    fn parse(&self, bytes: &[u8]) -> AppResult<Vec<RegisterRequest>>;
}

/// `.xlsx` implementation of [`SpreadsheetImporter`].
///
/// Reads the first worksheet, skips the header row, and drops rows
/// without an email. Workbooks over the row cap are rejected outright.
pub struct ExcelImporter;

impl SpreadsheetImporter for ExcelImporter {
    fn parse(&self, bytes: &[u8]) -> AppResult<Vec<RegisterRequest>> {
        let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(bytes))
            .map_err(|e| AppError::bad_request(format!("Unreadable spreadsheet: {}", e)))?;

        let range = workbook
            .worksheet_range_at(0)
            .ok_or_else(|| AppError::bad_request("Spreadsheet has no worksheets"))?
            .map_err(|e| AppError::bad_request(format!("Unreadable worksheet: {}", e)))?;

        let row_count = range.rows().count().saturating_sub(1);
        if row_count > MAX_IMPORT_ROWS {
            return Err(AppError::validation(format!(
                "Spreadsheet has {} rows; at most {} are accepted per upload",
                row_count, MAX_IMPORT_ROWS
            )));
        }

        Ok(range
            .rows()
            .skip(1)
            .filter_map(row_to_registration)
            .collect())
    }
}

/// Map one spreadsheet row to a registration; rows without an email are
/// skipped.
fn row_to_registration(row: &[Data]) -> Option<RegisterRequest> {
    let email = cell_text(row, COL_EMAIL)?;

    Some(RegisterRequest {
        email,
        first_name: cell_text(row, COL_FIRST_NAME),
        last_name: cell_text(row, COL_LAST_NAME),
        cnp: cell_text(row, COL_CNP),
        address: cell_text(row, COL_ADDRESS),
        phone_number: cell_text(row, COL_PHONE_NUMBER),
        photo_url: cell_text(row, COL_PHOTO_URL),
        role: cell_text(row, COL_ROLE).unwrap_or_default(),
    })
}

/// Cell display text, with blank cells folded to None.
fn cell_text(row: &[Data], index: usize) -> Option<String> {
    let cell = row.get(index)?;
    if matches!(cell, Data::Empty) {
        return None;
    }
    let text = cell.to_string().trim().to_string();
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

/// Registers parsed rows one at a time, partitioning the outcome.
pub struct ImportService {
    identity: Arc<dyn IdentityService>,
    mailer: Arc<dyn Mailer>,
}

impl ImportService {
    pub fn new(identity: Arc<dyn IdentityService>, mailer: Arc<dyn Mailer>) -> Self {
        Self { identity, mailer }
    }

    /// Attempt every row in order. A failed row is recorded with its
    /// reason and never blocks the rows after it.
    pub async fn register_all(&self, rows: Vec<RegisterRequest>) -> ImportReport {
        let mut report = ImportReport::default();

        for row in rows {
            match self.register_row(&row).await {
                Ok(()) => report.record_success(row.email),
                Err(e) => {
                    tracing::info!(email = %row.email, "Import row rejected: {}", e);
                    report.record_failure(row.email, failure_reason(&e));
                }
            }
        }

        tracing::info!(
            registered = report.successfully_registered.len(),
            failed = report.failed_to_register.len(),
            "Bulk user import finished"
        );

        report
    }

    async fn register_row(&self, row: &RegisterRequest) -> AppResult<()> {
        let created = self.identity.create_user(row).await?;
        self.identity
            .assign_role(created.user.id, created.role)
            .await?;

        // Delivery failure is logged, not held against the row.
        let mail = Mail::credentials(&created.user.email, &created.one_time_password);
        if let Err(e) = self.mailer.send(mail).await {
            tracing::warn!(email = %created.user.email, "Credential email failed: {}", e);
        }

        Ok(())
    }
}

/// Human-readable reason attached to a failed row.
fn failure_reason(error: &AppError) -> String {
    match error {
        AppError::Registration(issues) => issues
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; "),
        other => other.to_string(),
    }
}
