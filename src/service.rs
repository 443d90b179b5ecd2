// Directory Service - lookup, insert and delete over SWIFT entries
//
// Every operation validates its input before touching the store; a
// validation failure never reaches the store.

use crate::error::{DirectoryError, DirectoryResult};
use crate::hierarchy::find_branches;
use crate::models::NewSwiftEntry;
use crate::store::SwiftStore;
use crate::validator::{validate_country_code, validate_swift_code};
use crate::views::{BranchView, CodeDetails, CountryView, HeadquarterView, SwiftCodeRequest};
use tracing::{debug, info};

pub struct DirectoryService<S: SwiftStore> {
    store: S,
}

impl<S: SwiftStore> DirectoryService<S> {
    pub fn new(store: S) -> Self {
        DirectoryService { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Headquarters come back with their branch family, branches flat.
    pub fn get_by_code(&self, code: &str) -> DirectoryResult<CodeDetails> {
        validate_swift_code(code)?;

        let entry = self
            .store
            .find_entry_by_code(code)?
            .ok_or_else(DirectoryError::code_not_found)?;

        if !entry.is_headquarter {
            return Ok(CodeDetails::Branch(BranchView::from(entry)));
        }

        let branches = find_branches(&self.store, &entry.family_key)?;
        debug!(
            swift_code = code,
            family_key = %entry.family_key,
            branches = branches.len(),
            "resolved headquarters family"
        );

        Ok(CodeDetails::Headquarter(HeadquarterView::new(entry, &branches)))
    }

    /// All entries of a country. A known country with no entries yields an
    /// empty list.
    pub fn get_by_country(&self, iso2: &str) -> DirectoryResult<CountryView> {
        validate_country_code(iso2)?;

        // Not-found message echoes the caller's input, not the normalized code
        let country = self
            .store
            .find_country_by_code(&iso2.to_uppercase())?
            .ok_or_else(|| DirectoryError::country_not_found(iso2))?;

        let entries = self.store.find_entries_by_country_code(iso2)?;

        Ok(CountryView::new(country, &entries))
    }

    /// Store a new entry with the caller's headquarters flag.
    ///
    /// The existence pre-check only orders the messages; the store's unique
    /// constraint decides races and surfaces them as the same `Conflict`.
    pub fn insert(&self, request: &SwiftCodeRequest) -> DirectoryResult<()> {
        validate_swift_code(&request.swift_code)?;
        validate_country_code(&request.country_iso2)?;

        if self.store.find_entry_by_code(&request.swift_code)?.is_some() {
            return Err(DirectoryError::already_exists(&request.swift_code));
        }

        let country = self
            .store
            .find_country_by_code(&request.country_iso2.to_uppercase())?
            .ok_or_else(|| DirectoryError::country_not_found(&request.country_iso2))?;

        let entry = NewSwiftEntry::new(
            request.swift_code.clone(),
            request.address.clone(),
            request.bank_name.clone(),
            request.is_headquarter,
            country.iso2,
        );

        let id = self.store.save_entry(&entry)?;
        info!(
            swift_code = %entry.swift_code,
            family_key = %entry.family_key,
            is_headquarter = entry.is_headquarter,
            id,
            "inserted swift code"
        );

        Ok(())
    }

    /// Remove one entry. Its country is left in place.
    pub fn delete(&self, code: &str) -> DirectoryResult<()> {
        validate_swift_code(code)?;

        if self.store.find_entry_by_code(code)?.is_none() {
            return Err(DirectoryError::delete_target_not_found(code));
        }

        // Lost a race with another delete: same answer as absent
        if !self.store.delete_entry(code)? {
            return Err(DirectoryError::delete_target_not_found(code));
        }

        info!(swift_code = code, "deleted swift code");
        Ok(())
    }
}
