// Record Store - query contracts + SQLite backend
//
// The directory core only talks to `SwiftStore`. `SqliteStore` keeps
// countries and entries in two tables; swift_code carries the UNIQUE
// constraint that is the final word on duplicates.

use crate::error::{DirectoryError, DirectoryResult};
use crate::models::{Country, NewSwiftEntry, SwiftEntry};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::Path;

// ============================================================================
// STORE CONTRACT
// ============================================================================

/// Queries the directory needs from its persistence engine.
///
/// Sequences come back in primary-key (insertion) order. A single call is
/// atomic; nothing here spans more than one statement.
pub trait SwiftStore {
    fn find_entry_by_code(&self, code: &str) -> DirectoryResult<Option<SwiftEntry>>;

    /// Entries of a family with `is_headquarter = false`
    fn find_branches_by_family_key(&self, family_key: &str) -> DirectoryResult<Vec<SwiftEntry>>;

    /// Entries whose country code matches ignoring case
    fn find_entries_by_country_code(&self, iso2: &str) -> DirectoryResult<Vec<SwiftEntry>>;

    fn find_country_by_code(&self, iso2: &str) -> DirectoryResult<Option<Country>>;

    fn save_country(&self, country: &Country) -> DirectoryResult<()>;

    /// Persist an entry and return its primary key.
    ///
    /// A unique-constraint hit on the code is reported as `Conflict`, a
    /// dangling country reference as `NotFound`.
    fn save_entry(&self, entry: &NewSwiftEntry) -> DirectoryResult<i64>;

    /// Returns `true` when a row was removed
    fn delete_entry(&self, code: &str) -> DirectoryResult<bool>;

    fn count_entries(&self) -> DirectoryResult<i64>;

    fn count_countries(&self) -> DirectoryResult<i64>;

    /// Run `work` as one unit: either every write it made lands or none do.
    ///
    /// Backends without transactions just run it.
    fn atomically<T, E, F>(&self, work: F) -> Result<T, E>
    where
        Self: Sized,
        F: FnOnce(&Self) -> Result<T, E>,
        E: From<DirectoryError>,
    {
        work(self)
    }
}

// ============================================================================
// SQLITE BACKEND
// ============================================================================

pub struct SqliteStore {
    conn: Connection,
}

const ENTRY_SELECT: &str = "e.id, e.swift_code, e.family_key, e.address, e.bank_name,
     e.is_headquarter, c.iso2, c.name
     FROM swift_entries e
     JOIN countries c ON c.iso2 = e.country_iso2";

impl SqliteStore {
    pub fn open(path: &Path) -> DirectoryResult<Self> {
        let conn = Connection::open(path)?;
        Self::from_connection(conn)
    }

    pub fn open_in_memory() -> DirectoryResult<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    /// Wrap an existing connection, creating the schema if needed
    pub fn from_connection(conn: Connection) -> DirectoryResult<Self> {
        setup_database(&conn)?;
        Ok(SqliteStore { conn })
    }

    /// Remove a country and, through the foreign key, all of its entries
    pub fn delete_country(&self, iso2: &str) -> DirectoryResult<bool> {
        let removed = self
            .conn
            .execute("DELETE FROM countries WHERE iso2 = ?1", params![iso2])?;
        Ok(removed > 0)
    }

    fn query_entries(&self, filter: &str, arg: &str) -> DirectoryResult<Vec<SwiftEntry>> {
        let sql = format!("SELECT {} WHERE {} ORDER BY e.id", ENTRY_SELECT, filter);
        let mut stmt = self.conn.prepare(&sql)?;

        let entries = stmt
            .query_map(params![arg], entry_from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(entries)
    }
}

pub fn setup_database(conn: &Connection) -> rusqlite::Result<()> {
    // WAL for crash recovery (in-memory databases report "memory")
    conn.pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get::<_, String>(0))?;
    conn.pragma_update(None, "foreign_keys", "ON")?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS countries (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            iso2 TEXT UNIQUE NOT NULL,
            name TEXT NOT NULL
        )",
        [],
    )?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS swift_entries (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            swift_code TEXT UNIQUE NOT NULL,
            family_key TEXT NOT NULL,
            address TEXT NOT NULL,
            bank_name TEXT NOT NULL,
            is_headquarter INTEGER NOT NULL,
            country_iso2 TEXT NOT NULL
                REFERENCES countries(iso2) ON DELETE CASCADE
        )",
        [],
    )?;

    // Family lookups are a join over this index
    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_family_key ON swift_entries(family_key, is_headquarter)",
        [],
    )?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_country_iso2 ON swift_entries(country_iso2)",
        [],
    )?;

    Ok(())
}

fn entry_from_row(row: &Row<'_>) -> rusqlite::Result<SwiftEntry> {
    Ok(SwiftEntry {
        id: row.get(0)?,
        swift_code: row.get(1)?,
        family_key: row.get(2)?,
        address: row.get(3)?,
        bank_name: row.get(4)?,
        is_headquarter: row.get(5)?,
        country: Country {
            iso2: row.get(6)?,
            name: row.get(7)?,
        },
    })
}

impl SwiftStore for SqliteStore {
    fn find_entry_by_code(&self, code: &str) -> DirectoryResult<Option<SwiftEntry>> {
        let sql = format!("SELECT {} WHERE e.swift_code = ?1", ENTRY_SELECT);
        let entry = self
            .conn
            .query_row(&sql, params![code], entry_from_row)
            .optional()?;
        Ok(entry)
    }

    fn find_branches_by_family_key(&self, family_key: &str) -> DirectoryResult<Vec<SwiftEntry>> {
        self.query_entries("e.family_key = ?1 AND e.is_headquarter = 0", family_key)
    }

    fn find_entries_by_country_code(&self, iso2: &str) -> DirectoryResult<Vec<SwiftEntry>> {
        self.query_entries("UPPER(e.country_iso2) = UPPER(?1)", iso2)
    }

    fn find_country_by_code(&self, iso2: &str) -> DirectoryResult<Option<Country>> {
        let country = self
            .conn
            .query_row(
                "SELECT iso2, name FROM countries WHERE iso2 = ?1",
                params![iso2],
                |row| {
                    Ok(Country {
                        iso2: row.get(0)?,
                        name: row.get(1)?,
                    })
                },
            )
            .optional()?;
        Ok(country)
    }

    fn save_country(&self, country: &Country) -> DirectoryResult<()> {
        self.conn.execute(
            "INSERT INTO countries (iso2, name) VALUES (?1, ?2)",
            params![country.iso2, country.name],
        )?;
        Ok(())
    }

    fn save_entry(&self, entry: &NewSwiftEntry) -> DirectoryResult<i64> {
        let result = self.conn.execute(
            "INSERT INTO swift_entries (
                swift_code, family_key, address, bank_name, is_headquarter, country_iso2
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                entry.swift_code,
                entry.family_key,
                entry.address,
                entry.bank_name,
                entry.is_headquarter,
                entry.country_iso2,
            ],
        );

        match result {
            Ok(_) => Ok(self.conn.last_insert_rowid()),
            Err(rusqlite::Error::SqliteFailure(err, _))
                if err.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE =>
            {
                Err(DirectoryError::already_exists(&entry.swift_code))
            }
            Err(rusqlite::Error::SqliteFailure(err, _))
                if err.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_FOREIGNKEY =>
            {
                Err(DirectoryError::country_not_found(&entry.country_iso2))
            }
            Err(e) => Err(e.into()),
        }
    }

    fn delete_entry(&self, code: &str) -> DirectoryResult<bool> {
        let removed = self
            .conn
            .execute("DELETE FROM swift_entries WHERE swift_code = ?1", params![code])?;
        Ok(removed > 0)
    }

    fn count_entries(&self) -> DirectoryResult<i64> {
        let count = self
            .conn
            .query_row("SELECT COUNT(*) FROM swift_entries", [], |row| row.get(0))?;
        Ok(count)
    }

    fn count_countries(&self) -> DirectoryResult<i64> {
        let count = self
            .conn
            .query_row("SELECT COUNT(*) FROM countries", [], |row| row.get(0))?;
        Ok(count)
    }

    fn atomically<T, E, F>(&self, work: F) -> Result<T, E>
    where
        F: FnOnce(&Self) -> Result<T, E>,
        E: From<DirectoryError>,
    {
        // Rolls back on drop unless committed
        let tx = self
            .conn
            .unchecked_transaction()
            .map_err(DirectoryError::from)?;
        let value = work(self)?;
        tx.commit().map_err(DirectoryError::from)?;
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded_store() -> SqliteStore {
        let store = SqliteStore::open_in_memory().unwrap();
        store.save_country(&Country::new("DE", "GERMANY")).unwrap();
        store.save_country(&Country::new("US", "UNITED STATES")).unwrap();
        store
    }

    fn entry(code: &str, iso2: &str) -> NewSwiftEntry {
        NewSwiftEntry::classified(
            code.to_string(),
            "Taunusanlage 12".to_string(),
            "Bank name".to_string(),
            iso2.to_string(),
        )
    }

    #[test]
    fn test_setup_is_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        setup_database(&conn).unwrap();
        setup_database(&conn).unwrap();
    }

    #[test]
    fn test_save_and_find_entry() {
        let store = seeded_store();
        let id = store.save_entry(&entry("DEUTDEFFXXX", "DE")).unwrap();

        let found = store.find_entry_by_code("DEUTDEFFXXX").unwrap().unwrap();
        assert_eq!(found.id, id);
        assert_eq!(found.family_key, "DEUTDEFF");
        assert!(found.is_headquarter);
        assert_eq!(found.country, Country::new("DE", "GERMANY"));

        assert!(store.find_entry_by_code("DEUTDEFF500").unwrap().is_none());
    }

    #[test]
    fn test_unique_violation_is_conflict() {
        let store = seeded_store();
        store.save_entry(&entry("DEUTDEFF500", "DE")).unwrap();

        let err = store.save_entry(&entry("DEUTDEFF500", "DE")).unwrap_err();
        assert!(matches!(err, DirectoryError::Conflict(_)));
        assert_eq!(err.to_string(), "SWIFT code already exists: DEUTDEFF500");
        assert_eq!(store.count_entries().unwrap(), 1);
    }

    #[test]
    fn test_unknown_country_reference_is_not_found() {
        let store = seeded_store();
        let err = store.save_entry(&entry("BPKOPLPWXXX", "PL")).unwrap_err();
        assert!(matches!(err, DirectoryError::NotFound(_)));
        assert_eq!(store.count_entries().unwrap(), 0);
    }

    #[test]
    fn test_country_lookup_ignores_case() {
        let store = seeded_store();
        store.save_entry(&entry("DEUTDEFFXXX", "DE")).unwrap();
        store.save_entry(&entry("DEUTDEFF500", "DE")).unwrap();
        store.save_entry(&entry("EXISTUS1XXX", "US")).unwrap();

        let lower = store.find_entries_by_country_code("de").unwrap();
        let upper = store.find_entries_by_country_code("DE").unwrap();
        assert_eq!(lower, upper);

        let codes: Vec<&str> = upper.iter().map(|e| e.swift_code.as_str()).collect();
        assert_eq!(codes, vec!["DEUTDEFFXXX", "DEUTDEFF500"]);
    }

    #[test]
    fn test_delete_entry() {
        let store = seeded_store();
        store.save_entry(&entry("DEUTDEFF500", "DE")).unwrap();

        assert!(store.delete_entry("DEUTDEFF500").unwrap());
        assert!(!store.delete_entry("DEUTDEFF500").unwrap());
        assert_eq!(store.count_entries().unwrap(), 0);
        // Country survives entry deletion
        assert!(store.find_country_by_code("DE").unwrap().is_some());
    }

    #[test]
    fn test_delete_country_cascades() {
        let store = seeded_store();
        store.save_entry(&entry("DEUTDEFFXXX", "DE")).unwrap();
        store.save_entry(&entry("DEUTDEFF500", "DE")).unwrap();
        store.save_entry(&entry("EXISTUS1XXX", "US")).unwrap();

        assert!(store.delete_country("DE").unwrap());

        assert_eq!(store.count_countries().unwrap(), 1);
        assert_eq!(store.count_entries().unwrap(), 1);
        assert!(store.find_entry_by_code("DEUTDEFFXXX").unwrap().is_none());
    }

    #[test]
    fn test_atomically_commits_on_success() {
        let store = seeded_store();

        let id = store
            .atomically(|s| s.save_entry(&entry("DEUTDEFFXXX", "DE")))
            .unwrap();

        assert_eq!(store.find_entry_by_code("DEUTDEFFXXX").unwrap().unwrap().id, id);
    }

    #[test]
    fn test_atomically_rolls_back_on_error() {
        let store = seeded_store();

        let result: DirectoryResult<()> = store.atomically(|s| {
            s.save_entry(&entry("DEUTDEFFXXX", "DE"))?;
            s.save_country(&Country::new("PL", "POLAND"))?;
            Err(DirectoryError::code_not_found())
        });

        assert!(result.is_err());
        assert_eq!(store.count_entries().unwrap(), 0);
        assert_eq!(store.count_countries().unwrap(), 2);
    }

    #[test]
    fn test_open_file_backed_store() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("swift_codes.db");

        {
            let store = SqliteStore::open(&path).unwrap();
            store.save_country(&Country::new("DE", "GERMANY")).unwrap();
            store.save_entry(&entry("DEUTDEFFXXX", "DE")).unwrap();
        }

        let reopened = SqliteStore::open(&path).unwrap();
        assert_eq!(reopened.count_entries().unwrap(), 1);
        assert_eq!(reopened.count_countries().unwrap(), 1);
    }
}
