//! Composite keys emulate secondary indexes on a single-key store.
//!
//! Layout: `U+0000 object_type U+0000 (attribute U+0000)*`. Every composite key
//! starts with `U+0000`, so it can never collide with a plain record key.

use super::error::{LedgerError, LedgerResult};

pub const NAMESPACE: char = '\u{0000}';
pub const MAX_UNICODE_RUNE: char = '\u{10FFFF}';

fn validate_part(part: &str) -> LedgerResult<()> {
    if part.contains(NAMESPACE) || part.contains(MAX_UNICODE_RUNE) {
        return Err(LedgerError::InvalidKey(format!(
            "{:?} contains a reserved delimiter character",
            part
        )));
    }
    Ok(())
}

/// Build a composite key from an object type and any number of attributes.
///
/// With a partial attribute list the result is a scan prefix covering every
/// key that extends it.
pub fn create(object_type: &str, attributes: &[&str]) -> LedgerResult<String> {
    validate_part(object_type)?;
    let mut key = String::with_capacity(
        2 + object_type.len() + attributes.iter().map(|a| a.len() + 1).sum::<usize>(),
    );
    key.push(NAMESPACE);
    key.push_str(object_type);
    key.push(NAMESPACE);
    for attribute in attributes {
        validate_part(attribute)?;
        key.push_str(attribute);
        key.push(NAMESPACE);
    }
    Ok(key)
}

/// Split a composite key into its object type and attributes.
pub fn split(key: &str) -> LedgerResult<(String, Vec<String>)> {
    let body = key
        .strip_prefix(NAMESPACE)
        .ok_or_else(|| LedgerError::InvalidKey(format!("{:?} is not a composite key", key)))?;
    let mut parts = body.split(NAMESPACE);
    let object_type = parts
        .next()
        .filter(|t| !t.is_empty())
        .ok_or_else(|| LedgerError::InvalidKey(format!("{:?} has no object type", key)))?
        .to_string();
    let mut attributes: Vec<String> = parts.map(str::to_string).collect();
    // trailing delimiter yields one empty tail element
    if attributes.pop().map_or(true, |tail| !tail.is_empty()) {
        return Err(LedgerError::InvalidKey(format!(
            "{:?} is not terminated by a delimiter",
            key
        )));
    }
    Ok((object_type, attributes))
}

/// Exclusive upper bound for a prefix scan starting at `prefix`.
pub fn range_end(prefix: &str) -> String {
    let mut end = String::with_capacity(prefix.len() + MAX_UNICODE_RUNE.len_utf8());
    end.push_str(prefix);
    end.push(MAX_UNICODE_RUNE);
    end
}

/// True if `part` may appear inside a composite key.
pub fn is_valid_part(part: &str) -> bool {
    validate_part(part).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_and_split() {
        let key = create("allpaths~robot", &["allpaths", "r1"]).unwrap();
        assert_eq!(key, "\u{0}allpaths~robot\u{0}allpaths\u{0}r1\u{0}");

        let (object_type, attributes) = split(&key).unwrap();
        assert_eq!(object_type, "allpaths~robot");
        assert_eq!(attributes, vec!["allpaths".to_string(), "r1".to_string()]);
    }

    #[test]
    fn test_partial_key_is_prefix_of_full_key() {
        let prefix = create("allpaths~robot", &["allpaths"]).unwrap();
        let full = create("allpaths~robot", &["allpaths", "robot07"]).unwrap();
        assert!(full.starts_with(&prefix));
        assert!(full.as_str() < range_end(&prefix).as_str());
    }

    #[test]
    fn test_rejects_reserved_characters() {
        assert!(create("allpaths~robot", &["bad\u{0}id"]).is_err());
        assert!(create("type\u{10FFFF}", &[]).is_err());
        assert!(!is_valid_part("a\u{0}b"));
        assert!(is_valid_part("robot-01"));
    }

    #[test]
    fn test_split_rejects_plain_keys() {
        assert!(split("workspace").is_err());
        assert!(split("\u{0}allpaths~robot\u{0}allpaths").is_err());
        assert!(split("\u{0}\u{0}").is_err());
    }
}
