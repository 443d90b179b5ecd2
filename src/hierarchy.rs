// Hierarchy Resolver - headquarters/branch families
//
// A family is every entry sharing the first 8 characters of the code.
// The link is computed at read time over the indexed family_key column,
// never stored as an edge between records.

use crate::error::DirectoryResult;
use crate::models::SwiftEntry;
use crate::store::SwiftStore;

pub const FAMILY_KEY_LEN: usize = 8;
pub const HEADQUARTER_SUFFIX: &str = "XXX";

/// First 8 characters of a code (bank + country + location).
///
/// Callers validate to 11 characters first; shorter input is returned whole.
pub fn family_key_of(code: &str) -> &str {
    code.get(..FAMILY_KEY_LEN).unwrap_or(code)
}

pub fn is_headquarter_code(code: &str) -> bool {
    code.ends_with(HEADQUARTER_SUFFIX)
}

/// Non-headquarters entries of a family, in store order.
pub fn find_branches<S: SwiftStore + ?Sized>(
    store: &S,
    family_key: &str,
) -> DirectoryResult<Vec<SwiftEntry>> {
    store.find_branches_by_family_key(family_key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Country, NewSwiftEntry};
    use crate::store::SqliteStore;

    #[test]
    fn test_family_key_is_prefix() {
        for code in ["DEUTDEFFXXX", "DEUTDEFF500", "BPKOPLPWXXX", "TESTUS12345"] {
            assert_eq!(family_key_of(code), &code[0..8]);
        }
    }

    #[test]
    fn test_headquarter_suffix() {
        assert!(is_headquarter_code("DEUTDEFFXXX"));
        assert!(!is_headquarter_code("DEUTDEFF500"));
        assert!(!is_headquarter_code("DEUTDEFFXX1"));
        assert!(!is_headquarter_code("XXXTDEFF500"));
    }

    #[test]
    fn test_find_branches_excludes_headquarters_and_other_families() {
        let store = SqliteStore::open_in_memory().unwrap();
        store.save_country(&Country::new("DE", "GERMANY")).unwrap();

        for code in ["DEUTDEFFXXX", "DEUTDEFF500", "COBADEFFXXX", "DEUTDEFF501", "COBADEFF100"] {
            store
                .save_entry(&NewSwiftEntry::classified(
                    code.to_string(),
                    "Addr".to_string(),
                    "Bank".to_string(),
                    "DE".to_string(),
                ))
                .unwrap();
        }

        let branches = find_branches(&store, "DEUTDEFF").unwrap();
        let codes: Vec<&str> = branches.iter().map(|b| b.swift_code.as_str()).collect();

        // Insertion order, headquarters left out
        assert_eq!(codes, vec!["DEUTDEFF500", "DEUTDEFF501"]);
        assert!(branches.iter().all(|b| !b.is_headquarter));
    }

    #[test]
    fn test_orphan_family_has_no_headquarters() {
        let store = SqliteStore::open_in_memory().unwrap();
        store.save_country(&Country::new("DE", "GERMANY")).unwrap();
        store
            .save_entry(&NewSwiftEntry::classified(
                "ORPHDEFF001".to_string(),
                String::new(),
                String::new(),
                "DE".to_string(),
            ))
            .unwrap();

        let branches = find_branches(&store, "ORPHDEFF").unwrap();
        assert_eq!(branches.len(), 1);
        assert!(find_branches(&store, "NOBODY00").unwrap().is_empty());
    }
}
