//! Quote notification emails.
//!
//! Two emails go out per quote: a full notification to the business and a
//! confirmation to the customer. Both are rendered from askama templates;
//! customer input is HTML-escaped by the template engine.

use askama::Template;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::mailer::OutgoingEmail;

use super::calculators::{residence_label, service_label, QuoteResult};
use super::models::{ComplexItem, ExtraService, FloorLevel};
use super::requests::QuoteSubmission;

const UNSPECIFIED: &str = "Non spécifié";

#[derive(Template)]
#[template(path = "email/business_notification.html")]
struct BusinessNotificationTemplate<'a> {
    reference: String,
    submitted_at: String,
    name: &'a str,
    email: &'a str,
    company: &'a str,
    current_address: &'a str,
    region: &'a str,
    move_date: &'a str,
    budget: &'a str,
    project_details: &'a str,
    service_label: &'a str,
    residence_label: &'a str,
    distance: String,
    services: Vec<&'a str>,
    complex_items: Vec<&'a str>,
    floor: &'a str,
    multiplier: String,
    quote: &'a QuoteResult,
}

#[derive(Template)]
#[template(path = "email/customer_confirmation.html")]
struct CustomerConfirmationTemplate<'a> {
    reference: String,
    name: &'a str,
    service_label: &'a str,
    residence_label: &'a str,
    quote: &'a QuoteResult,
}

/// Everything needed to notify about one quote
pub struct QuoteNotification<'a> {
    pub reference: Uuid,
    pub submitted_at: DateTime<Utc>,
    pub submission: &'a QuoteSubmission,
    pub quote: &'a QuoteResult,
}

impl<'a> QuoteNotification<'a> {
    /// Short reference shown to humans
    pub fn short_reference(&self) -> String {
        self.reference.simple().to_string()[..8].to_uppercase()
    }

    pub fn business_email(&self, from: &str, to: &str) -> Result<OutgoingEmail, askama::Error> {
        let submission = self.submission;
        let request = &submission.request;

        let html = BusinessNotificationTemplate {
            reference: self.short_reference(),
            submitted_at: self.submitted_at.format("%Y-%m-%d %H:%M UTC").to_string(),
            name: &submission.name,
            email: &submission.email,
            company: text_or_unspecified(&submission.company),
            current_address: text_or_unspecified(&submission.current_address),
            region: text_or_unspecified(&request.region),
            move_date: text_or_unspecified(&submission.move_date),
            budget: text_or_unspecified(&submission.budget),
            project_details: text_or_unspecified(&submission.project_details),
            service_label: service_label(&request.service_category),
            residence_label: residence_label(&request.residence_category),
            distance: request
                .distance_km
                .map(|km| format!("{} km", km.normalize()))
                .unwrap_or_else(|| "Non spécifiée".to_string()),
            services: request
                .extra_services
                .iter()
                .map(|t| ExtraService::parse(t).map(ExtraService::label).unwrap_or(t.as_str()))
                .collect(),
            complex_items: request
                .complex_items
                .iter()
                .map(|t| ComplexItem::parse(t).map(ComplexItem::label).unwrap_or(t.as_str()))
                .collect(),
            floor: match request.floor_level.as_deref() {
                Some(token) => FloorLevel::parse(token).map(FloorLevel::label).unwrap_or(token),
                None => FloorLevel::Ground.label(),
            },
            multiplier: format!("×{}", self.quote.service_multiplier.normalize()),
            quote: self.quote,
        }
        .render()?;

        Ok(OutgoingEmail {
            from: from.to_string(),
            to: vec![to.to_string()],
            subject: format!(
                "Nouvelle demande de soumission - {} ({})",
                submission.name,
                self.short_reference()
            ),
            html,
            reply_to: Some(submission.email.clone()),
        })
    }

    pub fn customer_email(&self, from: &str) -> Result<OutgoingEmail, askama::Error> {
        let submission = self.submission;
        let request = &submission.request;

        let html = CustomerConfirmationTemplate {
            reference: self.short_reference(),
            name: &submission.name,
            service_label: service_label(&request.service_category),
            residence_label: residence_label(&request.residence_category),
            quote: self.quote,
        }
        .render()?;

        Ok(OutgoingEmail {
            from: from.to_string(),
            to: vec![submission.email.clone()],
            subject: "Votre estimation de déménagement".to_string(),
            html,
            reply_to: None,
        })
    }
}

fn text_or_unspecified(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or(UNSPECIFIED)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quote::calculators::{calculate, QuoteRequest};
    use rust_decimal_macros::dec;

    fn submission() -> QuoteSubmission {
        QuoteSubmission {
            name: "Marie <Tremblay>".to_string(),
            email: "marie@example.com".to_string(),
            budget: None,
            project_details: Some("Deux chambres, beaucoup de livres".to_string()),
            company: None,
            current_address: Some("123 rue Principale".to_string()),
            move_date: Some("2026-07-01".to_string()),
            request: QuoteRequest {
                residence_category: "Multi-form 11 People Option 3".to_string(),
                service_category: "Multi-form 11 Type Option 2".to_string(),
                region: Some("Québec".to_string()),
                distance_km: Some(dec!(30)),
                extra_services: vec!["emballage".to_string(), "inconnu".to_string()],
                complex_items: vec!["piano".to_string()],
                floor_level: Some("2".to_string()),
            },
        }
    }

    #[test]
    fn test_business_email_contents() {
        let submission = submission();
        let quote = calculate(&submission.request);
        let notification = QuoteNotification {
            reference: Uuid::new_v4(),
            submitted_at: Utc::now(),
            submission: &submission,
            quote: &quote,
        };

        let email = notification
            .business_email("Devis <devis@example.com>", "contact@example.com")
            .unwrap();

        assert_eq!(email.to, vec!["contact@example.com"]);
        assert_eq!(email.reply_to.as_deref(), Some("marie@example.com"));
        assert!(email.subject.contains(&notification.short_reference()));
        assert!(email.html.contains("Maison moyenne"));
        assert!(email.html.contains("Déménagement commercial"));
        assert!(email.html.contains("Emballage"));
        assert!(email.html.contains("inconnu"));
        assert!(email.html.contains("Piano"));
        assert!(email.html.contains("2e étage"));
        assert!(email.html.contains("30 km"));
        assert!(email.html.contains(&quote.price.min.to_string()));
        assert!(email.html.contains(&quote.price.max.to_string()));
        // customer input is escaped
        assert!(!email.html.contains("<Tremblay>"));
    }

    #[test]
    fn test_customer_email_contents() {
        let submission = submission();
        let quote = calculate(&submission.request);
        let notification = QuoteNotification {
            reference: Uuid::new_v4(),
            submitted_at: Utc::now(),
            submission: &submission,
            quote: &quote,
        };

        let email = notification.customer_email("Devis <devis@example.com>").unwrap();

        assert_eq!(email.to, vec!["marie@example.com"]);
        assert!(email.reply_to.is_none());
        assert!(email.html.contains(&quote.price.min.to_string()));
        assert!(email.html.contains(&notification.short_reference()));
    }

    #[test]
    fn test_short_reference_is_eight_uppercase_chars() {
        let submission = submission();
        let quote = calculate(&submission.request);
        let notification = QuoteNotification {
            reference: Uuid::nil(),
            submitted_at: Utc::now(),
            submission: &submission,
            quote: &quote,
        };
        assert_eq!(notification.short_reference(), "00000000");
    }
}
