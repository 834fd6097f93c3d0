//! Book code keys, shaped like `3-14-271828-1`.

use crate::TableError;

/// Lengths of the hyphen separated digit groups
pub const KEY_GROUPS: [usize; 4] = [1, 2, 6, 1];

/// Number of payload digits skipped before the hashed suffix
const SUFFIX_START: usize = 7;

/// Returns `true` if `key` is four hyphen separated groups of
/// ascii digits with lengths 1-2-6-1
pub fn is_valid(key: &str) -> bool {
    let mut groups = key.split('-');
    for len in KEY_GROUPS {
        match groups.next() {
            Some(g) if g.len() == len && g.bytes().all(|b| b.is_ascii_digit()) => {}
            _ => return false,
        }
    }
    groups.next().is_none()
}

/// Same as [`is_valid`], but returns the offending key as an error
pub fn validate(key: &str) -> Result<(), TableError> {
    if is_valid(key) {
        Ok(())
    } else {
        Err(TableError::InvalidKey { key: key.into() })
    }
}

/// The last three digits of the 10 digit payload as a number.
///
/// # Note
///
/// Only meaningful for keys that passed [`validate`],
/// other input yields whatever digits happen to be there.
pub fn hash_suffix(key: &str) -> usize {
    key.bytes()
        .filter(u8::is_ascii_digit)
        .skip(SUFFIX_START)
        .fold(0, |acc, b| acc * 10 + (b - b'0') as usize)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn valid_keys() {
        assert!(is_valid("0-00-000000-0"));
        assert!(is_valid("3-14-271828-1"));
        assert!(validate("9-99-999999-9").is_ok());
    }

    #[test]
    fn invalid_keys() {
        let bad = [
            "",
            "0000000000",
            "0-00-000000",
            "0-00-000000-0-",
            "-0-00-000000-0",
            "00-0-000000-0",
            "0-00-00000-00",
            "a-00-000000-0",
            "0-00-000000-0 ",
            "0_00_000000_0",
            "0-00-00000٣-0",
        ];
        for key in bad {
            assert!(!is_valid(key), "{key:?} should be rejected");
            assert_eq!(
                validate(key),
                Err(TableError::InvalidKey { key: key.into() })
            );
        }
    }

    #[test]
    fn suffix() {
        assert_eq!(hash_suffix("1-23-456789-3"), 893);
        assert_eq!(hash_suffix("1-23-456780-3"), 803);
        assert_eq!(hash_suffix("0-00-000000-0"), 0);
        assert_eq!(hash_suffix("9-99-999900-7"), 7);
    }
}
