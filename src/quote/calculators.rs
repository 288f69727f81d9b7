//! Core quote calculation functions.
//!
//! Pure functions for pricing math - no I/O, no errors. Unknown tokens and
//! missing inputs degrade to the defaults of the pricing tables.

use rust_decimal::prelude::*;
use rust_decimal_macros::dec;

use super::models::{
    ComplexItem, ExtraService, FloorLevel, PriceRange, ResidenceCategory, ServiceCategory,
};

/// Kilometres included in every quote before distance is charged
pub const FREE_DISTANCE_KM: Decimal = dec!(10);

/// Charge per kilometre beyond the free distance
pub const DISTANCE_RATE: Decimal = dec!(2.5);

/// Round to the nearest whole currency unit, halves rounding up.
///
/// Amounts here are never negative, so rounding half away from zero is the
/// same as rounding half up. Amounts beyond the `i64` range saturate.
///
/// # Examples
/// ```
/// use rust_decimal_macros::dec;
/// use moving_quote::quote::round_money;
///
/// assert_eq!(round_money(dec!(2.5)), 3);
/// assert_eq!(round_money(dec!(1909.4)), 1909);
/// ```
pub fn round_money(amount: Decimal) -> i64 {
    amount
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .unwrap_or(if amount.is_sign_negative() { i64::MIN } else { i64::MAX })
}

/// Inputs to a quote, already decoded from the form
#[derive(Debug, Clone, Default)]
pub struct QuoteRequest {
    pub residence_category: String,
    pub service_category: String,
    /// Carried for the notifications; does not affect the price
    pub region: Option<String>,
    pub distance_km: Option<Decimal>,
    pub extra_services: Vec<String>,
    pub complex_items: Vec<String>,
    pub floor_level: Option<String>,
}

/// Itemised additive costs, rounded to whole units
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CostBreakdown {
    pub distance_cost: i64,
    pub services_cost: i64,
    pub complex_items_cost: i64,
    pub floor_cost: i64,
    pub total_additional: i64,
}

/// Result of a quote calculation
#[derive(Debug, Clone, PartialEq)]
pub struct QuoteResult {
    pub price: PriceRange,
    pub base_price: PriceRange,
    pub service_multiplier: Decimal,
    pub breakdown: CostBreakdown,
}

/// Base range for a residence token, or the default range if unknown.
pub fn base_price(residence_category: &str) -> PriceRange {
    ResidenceCategory::parse(residence_category)
        .map(ResidenceCategory::base_price)
        .unwrap_or(PriceRange::DEFAULT)
}

/// Multiplier for a service token, or 1.0 if unknown.
pub fn service_multiplier(service_category: &str) -> Decimal {
    ServiceCategory::parse(service_category)
        .map(ServiceCategory::multiplier)
        .unwrap_or(ServiceCategory::DEFAULT_MULTIPLIER)
}

/// Distance surcharge: the first 10 km are free, then 2.50 per km.
///
/// Saturates at `Decimal::MAX` for distances too large to price.
pub fn distance_cost(distance_km: Option<Decimal>) -> Decimal {
    match distance_km {
        Some(km) if km > FREE_DISTANCE_KM => (km - FREE_DISTANCE_KM)
            .checked_mul(DISTANCE_RATE)
            .unwrap_or(Decimal::MAX),
        _ => Decimal::ZERO,
    }
}

/// Sum of extra-service prices. Unknown tokens add nothing.
pub fn services_cost<S: AsRef<str>>(tokens: &[S]) -> i64 {
    tokens
        .iter()
        .filter_map(|t| ExtraService::parse(t.as_ref()))
        .map(ExtraService::price)
        .sum()
}

/// Sum of complex-item prices. Unknown tokens add nothing.
pub fn complex_items_cost<S: AsRef<str>>(tokens: &[S]) -> i64 {
    tokens
        .iter()
        .filter_map(|t| ComplexItem::parse(t.as_ref()))
        .map(ComplexItem::price)
        .sum()
}

pub fn floor_cost(floor_level: Option<&str>) -> i64 {
    floor_level
        .and_then(FloorLevel::parse)
        .map(FloorLevel::price)
        .unwrap_or(0)
}

/// Calculate a moving quote.
///
/// The base range is scaled by the service multiplier, then every additive
/// cost (distance, extra services, complex items, floor) is added to both
/// ends of the range before rounding.
pub fn calculate(request: &QuoteRequest) -> QuoteResult {
    let base = base_price(&request.residence_category);
    let multiplier = service_multiplier(&request.service_category);

    let distance = distance_cost(request.distance_km);
    let services = services_cost(request.extra_services.as_slice());
    let complex_items = complex_items_cost(request.complex_items.as_slice());
    let floor = floor_cost(request.floor_level.as_deref());

    let total_additional = distance
        .saturating_add(Decimal::from(services))
        .saturating_add(Decimal::from(complex_items))
        .saturating_add(Decimal::from(floor));

    let final_min = round_money(
        Decimal::from(base.min)
            .saturating_mul(multiplier)
            .saturating_add(total_additional),
    );
    let final_max = round_money(
        Decimal::from(base.max)
            .saturating_mul(multiplier)
            .saturating_add(total_additional),
    );

    QuoteResult {
        price: PriceRange {
            min: final_min,
            max: final_max,
        },
        base_price: base,
        service_multiplier: multiplier,
        breakdown: CostBreakdown {
            distance_cost: round_money(distance),
            services_cost: services,
            complex_items_cost: complex_items,
            floor_cost: floor,
            total_additional: round_money(total_additional),
        },
    }
}

/// French label for a residence token, or the token itself if unknown.
pub fn residence_label(token: &str) -> &str {
    ResidenceCategory::parse(token)
        .map(ResidenceCategory::label)
        .unwrap_or(token)
}

/// French label for a service token, or the token itself if unknown.
pub fn service_label(token: &str) -> &str {
    ServiceCategory::parse(token)
        .map(ServiceCategory::label)
        .unwrap_or(token)
}
