//! Static pricing tables for moving quotes.
//!
//! Every table is a compile-time mapping from a form token to a price.
//! Tokens that don't match anything parse to `None`; the calculators then
//! fall back to their defaults instead of rejecting the request.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;

/// Prefix the form builder puts in front of residence options
const RESIDENCE_PREFIX: &str = "Multi-form 11 People ";

/// Prefix the form builder puts in front of service options
const SERVICE_PREFIX: &str = "Multi-form 11 Type ";

/// A minimum/maximum amount in whole currency units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PriceRange {
    pub min: i64,
    pub max: i64,
}

impl PriceRange {
    /// Range used when the residence category is unknown
    pub const DEFAULT: PriceRange = PriceRange {
        min: 1000,
        max: 1500,
    };
}

/// Dwelling-size classification driving the base price range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResidenceCategory {
    SmallResidence,
    Apartment,
    MediumHouse,
    LargeHouse,
    FamilyHome,
    ComplexProperty,
}

impl ResidenceCategory {
    pub const ALL: [ResidenceCategory; 6] = [
        ResidenceCategory::SmallResidence,
        ResidenceCategory::Apartment,
        ResidenceCategory::MediumHouse,
        ResidenceCategory::LargeHouse,
        ResidenceCategory::FamilyHome,
        ResidenceCategory::ComplexProperty,
    ];

    /// Parse a form token, accepting both `Multi-form 11 People Option N`
    /// and the bare `Option N`.
    pub fn parse(token: &str) -> Option<Self> {
        let option = token.strip_prefix(RESIDENCE_PREFIX).unwrap_or(token);
        match option {
            "Option 1" => Some(Self::SmallResidence),
            "Option 2" => Some(Self::Apartment),
            "Option 3" => Some(Self::MediumHouse),
            "Option 4" => Some(Self::LargeHouse),
            "Option 5" => Some(Self::FamilyHome),
            "Option 6" => Some(Self::ComplexProperty),
            _ => None,
        }
    }

    /// Canonical form token
    pub fn token(self) -> &'static str {
        match self {
            Self::SmallResidence => "Multi-form 11 People Option 1",
            Self::Apartment => "Multi-form 11 People Option 2",
            Self::MediumHouse => "Multi-form 11 People Option 3",
            Self::LargeHouse => "Multi-form 11 People Option 4",
            Self::FamilyHome => "Multi-form 11 People Option 5",
            Self::ComplexProperty => "Multi-form 11 People Option 6",
        }
    }

    pub fn base_price(self) -> PriceRange {
        let (min, max) = match self {
            Self::SmallResidence => (800, 1200),
            Self::Apartment => (600, 900),
            Self::MediumHouse => (1200, 1800),
            Self::LargeHouse => (1800, 2500),
            Self::FamilyHome => (2200, 3200),
            Self::ComplexProperty => (3000, 4500),
        };
        PriceRange { min, max }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::SmallResidence => "Petite résidence",
            Self::Apartment => "Appartement",
            Self::MediumHouse => "Maison moyenne",
            Self::LargeHouse => "Grande maison",
            Self::FamilyHome => "Maison familiale",
            Self::ComplexProperty => "Propriété complexe",
        }
    }
}

/// Move-type classification driving the price multiplier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceCategory {
    Residential,
    Commercial,
    LongDistance,
    Other,
}

impl ServiceCategory {
    pub const ALL: [ServiceCategory; 4] = [
        ServiceCategory::Residential,
        ServiceCategory::Commercial,
        ServiceCategory::LongDistance,
        ServiceCategory::Other,
    ];

    /// Multiplier used when the service category is unknown
    pub const DEFAULT_MULTIPLIER: Decimal = dec!(1.0);

    /// Parse a form token, accepting both `Multi-form 11 Type Option N`
    /// and the bare `Option N`.
    pub fn parse(token: &str) -> Option<Self> {
        let option = token.strip_prefix(SERVICE_PREFIX).unwrap_or(token);
        match option {
            "Option 1" => Some(Self::Residential),
            "Option 2" => Some(Self::Commercial),
            "Option 3" => Some(Self::LongDistance),
            "Option 4" => Some(Self::Other),
            _ => None,
        }
    }

    pub fn token(self) -> &'static str {
        match self {
            Self::Residential => "Multi-form 11 Type Option 1",
            Self::Commercial => "Multi-form 11 Type Option 2",
            Self::LongDistance => "Multi-form 11 Type Option 3",
            Self::Other => "Multi-form 11 Type Option 4",
        }
    }

    pub fn multiplier(self) -> Decimal {
        match self {
            Self::Residential => dec!(1.0),
            Self::Commercial => dec!(1.3),
            Self::LongDistance => dec!(1.5),
            Self::Other => dec!(1.2),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Residential => "Déménagement résidentiel",
            Self::Commercial => "Déménagement commercial",
            Self::LongDistance => "Déménagement longue distance",
            Self::Other => "Autre",
        }
    }
}

/// Optional extra service selected on the form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtraService {
    Packing,
    Assembly,
    Cleaning,
    Storage,
}

impl ExtraService {
    pub fn parse(token: &str) -> Option<Self> {
        match token {
            "emballage" => Some(Self::Packing),
            "montage" => Some(Self::Assembly),
            "nettoyage" => Some(Self::Cleaning),
            "entreposage" => Some(Self::Storage),
            _ => None,
        }
    }

    pub fn price(self) -> i64 {
        match self {
            Self::Packing => 200,
            Self::Assembly => 150,
            Self::Cleaning => 100,
            Self::Storage => 300,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Packing => "Emballage",
            Self::Assembly => "Montage / démontage",
            Self::Cleaning => "Nettoyage",
            Self::Storage => "Entreposage",
        }
    }
}

/// Bulky or fragile item needing special handling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComplexItem {
    Piano,
    PoolTable,
    Antiques,
    Appliances,
    GardenEquipment,
    Nothing,
}

impl ComplexItem {
    pub fn parse(token: &str) -> Option<Self> {
        match token {
            "piano" => Some(Self::Piano),
            "billard" => Some(Self::PoolTable),
            "antiquites" => Some(Self::Antiques),
            "electromenager" => Some(Self::Appliances),
            "jardin" => Some(Self::GardenEquipment),
            "aucun" => Some(Self::Nothing),
            _ => None,
        }
    }

    pub fn price(self) -> i64 {
        match self {
            Self::Piano => 300,
            Self::PoolTable => 250,
            Self::Antiques => 200,
            Self::Appliances => 150,
            Self::GardenEquipment => 100,
            Self::Nothing => 0,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Piano => "Piano",
            Self::PoolTable => "Table de billard",
            Self::Antiques => "Antiquités",
            Self::Appliances => "Électroménager",
            Self::GardenEquipment => "Équipement de jardin",
            Self::Nothing => "Aucun",
        }
    }
}

/// Floor the customer is moving from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FloorLevel {
    Ground,
    First,
    Second,
    ThirdOrAbove,
}

impl FloorLevel {
    pub fn parse(token: &str) -> Option<Self> {
        match token {
            "0" => Some(Self::Ground),
            "1" => Some(Self::First),
            "2" => Some(Self::Second),
            "3" => Some(Self::ThirdOrAbove),
            _ => None,
        }
    }

    pub fn price(self) -> i64 {
        match self {
            Self::Ground => 0,
            Self::First => 50,
            Self::Second => 100,
            Self::ThirdOrAbove => 150,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Ground => "Rez-de-chaussée",
            Self::First => "1er étage",
            Self::Second => "2e étage",
            Self::ThirdOrAbove => "3e étage et plus",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_residence_parse_accepts_full_and_short_tokens() {
        for category in ResidenceCategory::ALL {
            assert_eq!(ResidenceCategory::parse(category.token()), Some(category));
        }
        assert_eq!(
            ResidenceCategory::parse("Option 3"),
            Some(ResidenceCategory::MediumHouse)
        );
        assert_eq!(ResidenceCategory::parse("Option 7"), None);
        assert_eq!(ResidenceCategory::parse("multi-form 11 people option 1"), None);
    }

    #[test]
    fn test_service_parse_accepts_full_and_short_tokens() {
        for category in ServiceCategory::ALL {
            assert_eq!(ServiceCategory::parse(category.token()), Some(category));
        }
        assert_eq!(
            ServiceCategory::parse("Option 2"),
            Some(ServiceCategory::Commercial)
        );
        assert_eq!(ServiceCategory::parse(""), None);
    }

    #[test]
    fn test_base_ranges_are_ordered() {
        for category in ResidenceCategory::ALL {
            let range = category.base_price();
            assert!(range.min <= range.max, "{:?}", category);
        }
        assert!(PriceRange::DEFAULT.min <= PriceRange::DEFAULT.max);
    }

    #[test]
    fn test_token_tables_are_case_sensitive() {
        assert_eq!(ExtraService::parse("Emballage"), None);
        assert_eq!(ComplexItem::parse("PIANO"), None);
        assert_eq!(FloorLevel::parse("02"), None);
    }
}
