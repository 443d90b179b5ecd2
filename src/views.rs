// Wire views - response and request shapes
// Field names are part of the public JSON contract; keep them verbatim.

use crate::models::{Country, SwiftEntry};
use serde::{Deserialize, Deserializer, Serialize};

/// Flat entry view used inside lists (no country name)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwiftCodeView {
    pub address: String,
    #[serde(rename = "bankName")]
    pub bank_name: String,
    #[serde(rename = "countryISO2")]
    pub country_iso2: String,
    #[serde(rename = "isHeadquarter")]
    pub is_headquarter: bool,
    #[serde(rename = "swiftCode")]
    pub swift_code: String,
}

/// Standalone branch returned by a code lookup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BranchView {
    pub address: String,
    #[serde(rename = "bankName")]
    pub bank_name: String,
    #[serde(rename = "countryISO2")]
    pub country_iso2: String,
    #[serde(rename = "countryName")]
    pub country_name: String,
    #[serde(rename = "isHeadquarter")]
    pub is_headquarter: bool,
    #[serde(rename = "swiftCode")]
    pub swift_code: String,
}

/// Headquarters plus its branch family
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadquarterView {
    pub address: String,
    #[serde(rename = "bankName")]
    pub bank_name: String,
    #[serde(rename = "countryISO2")]
    pub country_iso2: String,
    #[serde(rename = "countryName")]
    pub country_name: String,
    #[serde(rename = "isHeadquarter")]
    pub is_headquarter: bool,
    #[serde(rename = "swiftCode")]
    pub swift_code: String,
    pub branches: Vec<SwiftCodeView>,
}

/// Result of a code lookup; serializes as whichever shape it holds
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum CodeDetails {
    Headquarter(HeadquarterView),
    Branch(BranchView),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryView {
    #[serde(rename = "countryISO2")]
    pub country_iso2: String,
    #[serde(rename = "countryName")]
    pub country_name: String,
    #[serde(rename = "swiftCodes")]
    pub swift_codes: Vec<SwiftCodeView>,
}

/// Body of an insert request. Absent or `null` fields deserialize as blank
/// so the validator reports them as missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwiftCodeRequest {
    #[serde(default, deserialize_with = "null_as_default")]
    pub address: String,
    #[serde(rename = "bankName", default, deserialize_with = "null_as_default")]
    pub bank_name: String,
    #[serde(rename = "countryISO2", default, deserialize_with = "null_as_default")]
    pub country_iso2: String,
    /// Accepted for wire compatibility; the stored country name wins.
    #[serde(rename = "countryName", default, skip_serializing_if = "Option::is_none")]
    pub country_name: Option<String>,
    #[serde(rename = "isHeadquarter", default, deserialize_with = "null_as_default")]
    pub is_headquarter: bool,
    #[serde(rename = "swiftCode", default, deserialize_with = "null_as_default")]
    pub swift_code: String,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// ============================================================================
// CONVERSIONS
// ============================================================================

impl From<&SwiftEntry> for SwiftCodeView {
    fn from(entry: &SwiftEntry) -> Self {
        SwiftCodeView {
            address: entry.address.clone(),
            bank_name: entry.bank_name.clone(),
            country_iso2: entry.country.iso2.clone(),
            is_headquarter: entry.is_headquarter,
            swift_code: entry.swift_code.clone(),
        }
    }
}

impl From<SwiftEntry> for BranchView {
    fn from(entry: SwiftEntry) -> Self {
        BranchView {
            address: entry.address,
            bank_name: entry.bank_name,
            country_iso2: entry.country.iso2,
            country_name: entry.country.name,
            is_headquarter: entry.is_headquarter,
            swift_code: entry.swift_code,
        }
    }
}

impl HeadquarterView {
    pub fn new(headquarter: SwiftEntry, branches: &[SwiftEntry]) -> Self {
        HeadquarterView {
            address: headquarter.address,
            bank_name: headquarter.bank_name,
            country_iso2: headquarter.country.iso2,
            country_name: headquarter.country.name,
            is_headquarter: headquarter.is_headquarter,
            swift_code: headquarter.swift_code,
            branches: branches.iter().map(SwiftCodeView::from).collect(),
        }
    }
}

impl CountryView {
    pub fn new(country: Country, entries: &[SwiftEntry]) -> Self {
        CountryView {
            country_iso2: country.iso2,
            country_name: country.name,
            swift_codes: entries.iter().map(SwiftCodeView::from).collect(),
        }
    }
}
