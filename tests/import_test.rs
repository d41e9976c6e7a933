//! Bulk import tests: row partitioning, failure isolation, and
//! credential delivery.

mod common;

use std::sync::Arc;

use employee_manager::domain::RegisterRequest;
use employee_manager::services::{IdentityManager, ImportService};

use common::{CountingMailer, InMemoryUow};

fn row(email: &str, role: &str) -> RegisterRequest {
    RegisterRequest {
        email: email.to_string(),
        first_name: Some("Test".to_string()),
        last_name: Some("User".to_string()),
        cnp: Some("1850505123456".to_string()),
        address: None,
        phone_number: None,
        photo_url: None,
        role: role.to_string(),
    }
}

fn import_service() -> (ImportService, Arc<CountingMailer>) {
    let (uow, _) = InMemoryUow::new();
    let identity = Arc::new(IdentityManager::new(uow));
    let mailer = Arc::new(CountingMailer::default());
    (ImportService::new(identity, mailer.clone()), mailer)
}

#[tokio::test]
async fn import_partitions_rows_by_outcome() {
    let (service, _mailer) = import_service();

    let rows = vec![
        row("ana@example.com", "Employee"),
        row("dan@example.com", "Admin"),
        row("ana@example.com", "Employee"), // duplicate of row 1
        row("eva@example.com", "Manager"),  // unknown role
    ];

    let report = service.register_all(rows).await;

    assert_eq!(
        report.successfully_registered,
        vec!["ana@example.com", "dan@example.com"]
    );
    let failed: Vec<&str> = report
        .failed_to_register
        .iter()
        .map(|f| f.email.as_str())
        .collect();
    assert_eq!(failed, vec!["ana@example.com", "eva@example.com"]);

    // Every failed row carries its reason.
    assert!(report.failed_to_register[0].reason.contains("DuplicateEmail"));
    assert!(report.failed_to_register[1].reason.contains("InvalidRole"));
}

#[tokio::test]
async fn import_covers_exactly_the_input_emails() {
    let (service, _mailer) = import_service();

    let rows: Vec<RegisterRequest> = (0..10)
        .map(|i| {
            let role = if i % 2 == 0 { "Employee" } else { "nobody" };
            row(&format!("user{}@example.com", i), role)
        })
        .collect();
    let input_emails: Vec<String> = rows.iter().map(|r| r.email.clone()).collect();

    let report = service.register_all(rows).await;

    assert_eq!(report.successfully_registered.len(), 5);
    assert_eq!(report.failed_to_register.len(), 5);

    let mut covered: Vec<String> = report
        .successfully_registered
        .iter()
        .cloned()
        .chain(report.failed_to_register.iter().map(|f| f.email.clone()))
        .collect();
    covered.sort();
    let mut expected = input_emails;
    expected.sort();
    assert_eq!(covered, expected);
}

#[tokio::test]
async fn failed_row_does_not_block_later_rows() {
    let (service, _mailer) = import_service();

    let rows = vec![
        row("broken-email", "Employee"),
        row("fine@example.com", "Employee"),
    ];

    let report = service.register_all(rows).await;

    assert_eq!(report.successfully_registered, vec!["fine@example.com"]);
    assert_eq!(report.failed_to_register.len(), 1);
    assert_eq!(report.failed_to_register[0].email, "broken-email");
    assert!(report.failed_to_register[0].reason.contains("InvalidEmail"));
}

#[tokio::test]
async fn credentials_are_mailed_once_per_registered_row() {
    let (service, mailer) = import_service();

    let rows = vec![
        row("ana@example.com", "Employee"),
        row("dan@example.com", "Employee"),
        row("bad-row", "Employee"),
    ];

    let report = service.register_all(rows).await;

    assert_eq!(report.successfully_registered.len(), 2);
    assert_eq!(mailer.sent(), 2);
}

#[tokio::test]
async fn empty_row_set_produces_empty_report() {
    let (service, mailer) = import_service();

    let report = service.register_all(Vec::new()).await;

    assert!(report.successfully_registered.is_empty());
    assert!(report.failed_to_register.is_empty());
    assert_eq!(mailer.sent(), 0);
}
