// Bulk Importer - CSV → SQLite, idempotent
//
// Columns follow the published SWIFT code sheet:
// COUNTRY ISO2 CODE, SWIFT CODE, CODE TYPE, NAME, ADDRESS, TOWN NAME,
// COUNTRY NAME, TIME ZONE. Only the ones the directory stores are read.

use crate::error::DirectoryError;
use crate::models::{Country, NewSwiftEntry};
use crate::store::SwiftStore;
use crate::validator::{validate_country_code, validate_swift_code};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::io::Read;
use std::path::Path;
use tracing::{info, warn};

#[derive(Debug, Clone, Deserialize)]
pub struct ImportRow {
    #[serde(rename = "COUNTRY ISO2 CODE")]
    pub country_iso2: String,

    #[serde(rename = "SWIFT CODE")]
    pub swift_code: String,

    #[serde(rename = "NAME")]
    pub bank_name: String,

    #[serde(rename = "ADDRESS", default)]
    pub address: String,

    #[serde(rename = "COUNTRY NAME")]
    pub country_name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImportReport {
    /// Store already held data; nothing was read
    pub already_initialized: bool,
    pub inserted: usize,
    pub duplicates: usize,
    pub invalid: usize,
    pub countries_created: usize,
}

pub fn read_rows<R: Read>(reader: R) -> Result<Vec<ImportRow>> {
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);

    let mut rows = Vec::new();
    for (line, result) in rdr.deserialize().enumerate() {
        // +2: header line plus 1-based numbering
        let row: ImportRow =
            result.with_context(|| format!("Failed to deserialize row at line {}", line + 2))?;
        rows.push(row);
    }

    Ok(rows)
}

pub fn load_csv(csv_path: &Path) -> Result<Vec<ImportRow>> {
    let file = std::fs::File::open(csv_path)
        .with_context(|| format!("Failed to open CSV file {}", csv_path.display()))?;
    read_rows(file)
}

/// Write rows into the store in one transaction. Countries are created on
/// first reference, headquarters status comes from the code suffix.
///
/// A store failure rolls back every row, so the next startup sees an empty
/// store and retries instead of skipping a half-written import.
pub fn import_rows<S: SwiftStore>(store: &S, rows: &[ImportRow]) -> Result<ImportReport> {
    let report = store.atomically(|store| write_rows(store, rows))?;

    info!(
        inserted = report.inserted,
        duplicates = report.duplicates,
        invalid = report.invalid,
        countries_created = report.countries_created,
        "import finished"
    );

    Ok(report)
}

fn write_rows<S: SwiftStore>(store: &S, rows: &[ImportRow]) -> Result<ImportReport> {
    let mut report = ImportReport::default();
    let mut known_countries: HashSet<String> = HashSet::new();

    for row in rows {
        let iso2 = row.country_iso2.to_uppercase();

        if let Err(e) = validate_swift_code(&row.swift_code).and(validate_country_code(&iso2)) {
            warn!(swift_code = %row.swift_code, country = %row.country_iso2, "skipping row: {}", e);
            report.invalid += 1;
            continue;
        }

        if !known_countries.contains(&iso2) {
            if store.find_country_by_code(&iso2)?.is_none() {
                store
                    .save_country(&Country::new(iso2.clone(), row.country_name.clone()))
                    .with_context(|| format!("Failed to save country {}", iso2))?;
                report.countries_created += 1;
            }
            known_countries.insert(iso2.clone());
        }

        let entry = NewSwiftEntry::classified(
            row.swift_code.clone(),
            row.address.clone(),
            row.bank_name.clone(),
            iso2,
        );

        match store.save_entry(&entry) {
            Ok(_) => report.inserted += 1,
            Err(DirectoryError::Conflict(_)) => report.duplicates += 1,
            Err(e) => {
                return Err(e).with_context(|| format!("Failed to save {}", entry.swift_code))
            }
        }
    }

    Ok(report)
}

/// One-shot startup import. Skipped entirely once the store holds data.
pub fn import_csv<S: SwiftStore>(store: &S, csv_path: &Path) -> Result<ImportReport> {
    if store.count_entries()? > 0 && store.count_countries()? > 0 {
        info!("data already initialized, skipping import");
        return Ok(ImportReport {
            already_initialized: true,
            ..ImportReport::default()
        });
    }

    let rows = load_csv(csv_path)?;
    info!(rows = rows.len(), path = %csv_path.display(), "loaded import file");

    import_rows(store, &rows)
}
