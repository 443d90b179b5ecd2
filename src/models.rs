// Record types held by the store
//
// Country: identity = ISO2 code, owns its entries (cascade on delete)
// SwiftEntry: identity = 11-char swift code; family_key is derived once at creation

use crate::hierarchy::{family_key_of, is_headquarter_code};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Country {
    pub iso2: String,
    pub name: String,
}

impl Country {
    pub fn new(iso2: impl Into<String>, name: impl Into<String>) -> Self {
        Country {
            iso2: iso2.into(),
            name: name.into(),
        }
    }
}

/// Stored SWIFT entry, read back joined with its owning country
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwiftEntry {
    /// Store primary key (insertion order)
    pub id: i64,
    pub swift_code: String,
    pub family_key: String,
    pub address: String,
    pub bank_name: String,
    pub is_headquarter: bool,
    pub country: Country,
}

/// Entry about to be written. `country_iso2` must reference an existing country.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSwiftEntry {
    pub swift_code: String,
    pub family_key: String,
    pub address: String,
    pub bank_name: String,
    pub is_headquarter: bool,
    pub country_iso2: String,
}

impl NewSwiftEntry {
    /// Manual-insert path: headquarters flag comes from the caller as-is.
    pub fn new(
        swift_code: String,
        address: String,
        bank_name: String,
        is_headquarter: bool,
        country_iso2: String,
    ) -> Self {
        let family_key = family_key_of(&swift_code).to_string();

        NewSwiftEntry {
            swift_code,
            family_key,
            address,
            bank_name,
            is_headquarter,
            country_iso2,
        }
    }

    /// Import path: headquarters flag derived from the `XXX` suffix.
    pub fn classified(
        swift_code: String,
        address: String,
        bank_name: String,
        country_iso2: String,
    ) -> Self {
        let is_headquarter = is_headquarter_code(&swift_code);
        Self::new(swift_code, address, bank_name, is_headquarter, country_iso2)
    }
}
