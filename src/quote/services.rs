//! Quote submission handling.
//!
//! Validates the form, prices it and sends the notification emails.

use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::config::MailConfig;
use crate::error::AppError;
use crate::mailer::Mailer;

use super::calculators::{calculate, residence_label, service_label, QuoteResult};
use super::notifications::QuoteNotification;
use super::requests::{QuoteForm, ValidationError};

pub const SENT_MESSAGE: &str = "Quote calculated and sent successfully";
pub const DEMO_MESSAGE: &str = "Quote calculated successfully! (Demo mode - no emails sent)";

/// Result of a processed submission
#[derive(Debug, Clone)]
pub struct QuoteOutcome {
    pub reference: Uuid,
    pub quote: QuoteResult,
    pub message: &'static str,
}

/// Process a submitted quote form.
///
/// A failed business notification fails the request. A failed customer
/// confirmation is logged and ignored: the business already has the lead.
pub async fn process_quote(
    mailer: &dyn Mailer,
    mail: &MailConfig,
    form: QuoteForm,
) -> Result<QuoteOutcome, AppError> {
    let submission = form.into_submission().map_err(|e| {
        if let ValidationError::MissingFields(fields) = &e {
            warn!("Quote rejected, missing fields: {:?}", fields);
        }
        e
    })?;

    let quote = calculate(&submission.request);
    let reference = Uuid::new_v4();
    let request = &submission.request;

    info!(
        %reference,
        service = service_label(&request.service_category),
        residence = residence_label(&request.residence_category),
        distance_km = ?request.distance_km,
        services = ?request.extra_services,
        complex_items = ?request.complex_items,
        floor = request.floor_level.as_deref().unwrap_or("0"),
        min_price = quote.price.min,
        max_price = quote.price.max,
        total_additional = quote.breakdown.total_additional,
        "Quote calculated"
    );

    let notification = QuoteNotification {
        reference,
        submitted_at: Utc::now(),
        submission: &submission,
        quote: &quote,
    };

    let business_email = notification.business_email(&mail.from_address, &mail.business_address)?;
    mailer.send(business_email).await?;

    match notification.customer_email(&mail.from_address) {
        Ok(email) => {
            if let Err(e) = mailer.send(email).await {
                warn!(%reference, "Customer confirmation not sent: {}", e);
            }
        }
        Err(e) => warn!(%reference, "Customer confirmation not rendered: {}", e),
    }

    let message = if mailer.is_live() {
        SENT_MESSAGE
    } else {
        DEMO_MESSAGE
    };

    Ok(QuoteOutcome {
        reference,
        quote,
        message,
    })
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::mailer::testing::RecordingMailer;
    use crate::mailer::LogMailer;
    use crate::quote::models::PriceRange;
    use crate::quote::requests::TokenSelection;

    fn mail_config() -> MailConfig {
        MailConfig {
            resend_api_key: Some("re_test".to_string()),
            resend_api_url: "http://localhost".to_string(),
            from_address: "Devis <devis@example.com>".to_string(),
            business_address: "contact@example.com".to_string(),
            timeout: Duration::from_secs(1),
        }
    }

    fn form() -> QuoteForm {
        QuoteForm {
            name: Some("Marie".to_string()),
            email: Some("marie@example.com".to_string()),
            service_type: Some("Multi-form 11 Type Option 2".to_string()),
            residence_type: Some("Multi-form 11 People Option 3".to_string()),
            distance: Some("30".to_string()),
            services: TokenSelection::One("emballage".to_string()),
            floors: Some("2".to_string()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_process_quote_notifies_business_then_customer() {
        let mailer = RecordingMailer::default();

        let outcome = process_quote(&mailer, &mail_config(), form()).await.unwrap();

        assert_eq!(outcome.quote.price, PriceRange { min: 1910, max: 2690 });
        assert_eq!(outcome.message, SENT_MESSAGE);

        let sent = mailer.sent();
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0].to, vec!["contact@example.com"]);
        assert_eq!(sent[1].to, vec!["marie@example.com"]);
    }

    #[tokio::test]
    async fn test_process_quote_business_failure_is_an_error() {
        let mailer = RecordingMailer::failing_for("contact@example.com");

        let err = process_quote(&mailer, &mail_config(), form()).await.unwrap_err();

        assert!(matches!(err, AppError::Mail(_)));
        assert!(mailer.sent().is_empty());
    }

    #[tokio::test]
    async fn test_process_quote_customer_failure_is_swallowed() {
        let mailer = RecordingMailer::failing_for("marie@example.com");

        let outcome = process_quote(&mailer, &mail_config(), form()).await.unwrap();

        assert_eq!(outcome.quote.price.min, 1910);
        assert_eq!(mailer.sent().len(), 1);
    }

    #[tokio::test]
    async fn test_process_quote_missing_fields_sends_nothing() {
        let mailer = RecordingMailer::default();
        let form = QuoteForm {
            email: None,
            ..form()
        };

        let err = process_quote(&mailer, &mail_config(), form).await.unwrap_err();

        assert!(matches!(
            err,
            AppError::Validation(ValidationError::MissingFields(_))
        ));
        assert!(mailer.sent().is_empty());
    }

    #[tokio::test]
    async fn test_process_quote_demo_mode_message() {
        let outcome = process_quote(&LogMailer, &mail_config(), form()).await.unwrap();
        assert_eq!(outcome.message, DEMO_MESSAGE);
    }
}
