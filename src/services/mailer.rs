//! Credential delivery.
//!
//! Generated one-time passwords are useless if nobody tells the new
//! account holder; every successful registration hands its credentials
//! to the mailer. Without SMTP settings the message is logged instead
//! of sent, so the password is never silently dropped.

use async_trait::async_trait;
use std::env;

use crate::errors::AppResult;

/// An outgoing message.
#[derive(Debug, Clone)]
pub struct Mail {
    pub to: String,
    pub subject: String,
    pub body: String,
}

impl Mail {
    /// Build the welcome message carrying a generated password.
    pub fn credentials(email: &str, one_time_password: &str) -> Self {
        Self {
            to: email.to_string(),
            subject: "Your employee account".to_string(),
            body: format!(
                "An account was created for {email}.\n\
                 Temporary password: {one_time_password}\n\
                 Please change it after your first login.",
            ),
        }
    }
}

/// Delivers messages to account holders.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, mail: Mail) -> AppResult<()>;
}

/// SMTP-configured mailer; logs the message when SMTP is not set up.
pub struct SmtpMailer {
    smtp_host: Option<String>,
    smtp_from: String,
}

impl SmtpMailer {
    pub fn from_env() -> Self {
        Self {
            smtp_host: env::var("SMTP_HOST").ok(),
            smtp_from: env::var("SMTP_FROM").unwrap_or_else(|_| "noreply@example.com".to_string()),
        }
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, mail: Mail) -> AppResult<()> {
        if self.smtp_host.is_none() {
            tracing::warn!("SMTP not configured - logging email instead of sending");
            tracing::info!(
                "=== EMAIL (not sent) ===\n\
                 From: {}\n\
                 To: {}\n\
                 Subject: {}\n\
                 Body:\n{}\n\
                 ========================",
                self.smtp_from,
                mail.to,
                mail.subject,
                mail.body
            );
            return Ok(());
        }

        // TODO: wire an SMTP transport (lettre) once relay credentials
        // are provisioned for this deployment.
        tracing::warn!(
            to = %mail.to,
            "SMTP host configured but no transport is wired; email logged only"
        );
        tracing::info!(to = %mail.to, subject = %mail.subject, "Email processed");
        Ok(())
    }
}
