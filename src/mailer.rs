//! Outbound transactional email.
//!
//! `ResendMailer` delivers through the Resend HTTP API. `LogMailer` is used
//! when no API key is configured: emails are logged and dropped.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use tracing::{debug, info};

use crate::config::MailConfig;

/// A fully rendered email
#[derive(Debug, Clone, Serialize)]
pub struct OutgoingEmail {
    pub from: String,
    pub to: Vec<String>,
    pub subject: String,
    pub html: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_to: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum MailError {
    #[error("Mail transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Mail provider rejected message ({status}): {body}")]
    Rejected { status: u16, body: String },
}

#[async_trait]
pub trait Mailer: Send + Sync {
    /// Make a single delivery attempt.
    async fn send(&self, email: OutgoingEmail) -> Result<(), MailError>;

    /// Whether sent emails actually leave the process
    fn is_live(&self) -> bool {
        true
    }
}

/// Resend HTTP API client
pub struct ResendMailer {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
}

impl ResendMailer {
    pub fn new(client: reqwest::Client, api_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client,
            api_url: api_url.into(),
            api_key: api_key.into(),
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/emails", self.api_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl Mailer for ResendMailer {
    async fn send(&self, email: OutgoingEmail) -> Result<(), MailError> {
        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(&email)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(MailError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        debug!("Email '{}' accepted for {:?}", email.subject, email.to);
        Ok(())
    }
}

/// Demo-mode mailer
#[derive(Debug, Default)]
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, email: OutgoingEmail) -> Result<(), MailError> {
        info!(
            to = ?email.to,
            subject = %email.subject,
            "Demo mode: email not sent"
        );
        Ok(())
    }

    fn is_live(&self) -> bool {
        false
    }
}

/// Pick the mailer for the configured environment.
pub fn from_config(config: &MailConfig) -> Result<Arc<dyn Mailer>, MailError> {
    match &config.resend_api_key {
        Some(api_key) => {
            let client = reqwest::Client::builder().timeout(config.timeout).build()?;
            Ok(Arc::new(ResendMailer::new(
                client,
                config.resend_api_url.clone(),
                api_key.clone(),
            )))
        }
        None => Ok(Arc::new(LogMailer)),
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::Mutex;

    use super::*;

    /// Records every email; optionally fails for chosen recipients.
    #[derive(Default)]
    pub struct RecordingMailer {
        pub sent: Mutex<Vec<OutgoingEmail>>,
        pub fail_for: Option<String>,
    }

    impl RecordingMailer {
        pub fn failing_for(recipient: &str) -> Self {
            Self {
                sent: Mutex::new(Vec::new()),
                fail_for: Some(recipient.to_string()),
            }
        }

        pub fn sent(&self) -> Vec<OutgoingEmail> {
            self.sent.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Mailer for RecordingMailer {
        async fn send(&self, email: OutgoingEmail) -> Result<(), MailError> {
            if let Some(recipient) = &self.fail_for {
                if email.to.contains(recipient) {
                    return Err(MailError::Rejected {
                        status: 422,
                        body: "invalid recipient".to_string(),
                    });
                }
            }
            self.sent.lock().unwrap().push(email);
            Ok(())
        }
    }
}
