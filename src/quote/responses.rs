//! Response DTOs for the quote endpoint.

use rust_decimal::Decimal;
use serde::Serialize;

use super::calculators::QuoteResult;
use super::models::PriceRange;

/// Quote as returned to the form
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteResponse {
    pub min_price: i64,
    pub max_price: i64,
    pub base_price: PriceRange,
    #[serde(with = "rust_decimal::serde::float")]
    pub service_multiplier: Decimal,
    pub breakdown: BreakdownResponse,
}

/// Itemised costs behind the quoted range
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BreakdownResponse {
    pub base_price: PriceRange,
    #[serde(with = "rust_decimal::serde::float")]
    pub service_multiplier: Decimal,
    pub distance_cost: i64,
    pub services_cost: i64,
    pub complex_items_cost: i64,
    pub floor_cost: i64,
    pub total_additional_costs: i64,
}

impl From<&QuoteResult> for QuoteResponse {
    fn from(result: &QuoteResult) -> Self {
        QuoteResponse {
            min_price: result.price.min,
            max_price: result.price.max,
            base_price: result.base_price,
            service_multiplier: result.service_multiplier,
            breakdown: BreakdownResponse {
                base_price: result.base_price,
                service_multiplier: result.service_multiplier,
                distance_cost: result.breakdown.distance_cost,
                services_cost: result.breakdown.services_cost,
                complex_items_cost: result.breakdown.complex_items_cost,
                floor_cost: result.breakdown.floor_cost,
                total_additional_costs: result.breakdown.total_additional,
            },
        }
    }
}

/// Successful submission
#[derive(Debug, Serialize)]
pub struct QuoteSubmissionResponse {
    pub success: bool,
    pub message: String,
    pub quote: QuoteResponse,
}

/// Body of every failed request
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        ErrorResponse {
            success: false,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quote::calculators::{calculate, QuoteRequest};
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[test]
    fn test_quote_response_wire_shape() {
        let result = calculate(&QuoteRequest {
            residence_category: "Option 3".to_string(),
            service_category: "Option 2".to_string(),
            distance_km: Some(dec!(30)),
            extra_services: vec!["emballage".to_string()],
            floor_level: Some("2".to_string()),
            ..Default::default()
        });

        let value = serde_json::to_value(QuoteResponse::from(&result)).unwrap();

        assert_eq!(
            value,
            json!({
                "minPrice": 1910,
                "maxPrice": 2690,
                "basePrice": { "min": 1200, "max": 1800 },
                "serviceMultiplier": 1.3,
                "breakdown": {
                    "basePrice": { "min": 1200, "max": 1800 },
                    "serviceMultiplier": 1.3,
                    "distanceCost": 50,
                    "servicesCost": 200,
                    "complexItemsCost": 0,
                    "floorCost": 100,
                    "totalAdditionalCosts": 350
                }
            })
        );
    }

    #[test]
    fn test_error_response() {
        let value = serde_json::to_value(ErrorResponse::new("Method not allowed")).unwrap();
        assert_eq!(value, json!({ "success": false, "message": "Method not allowed" }));
    }
}
