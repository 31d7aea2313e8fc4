//! Identifier sanitation for names that reach SQL.
//!
//! Table names come from file base names and column names from record keys;
//! both are caller-controlled and must be reduced to plain identifiers
//! before they are spliced into statements.

use crate::error::{StorageError, StorageResult};

/// Reduce a raw name to a valid SQL identifier.
///
/// Non-alphanumeric characters become underscores; a leading digit gets a
/// `t_` prefix. An input with no usable characters is rejected.
pub fn sanitize_identifier(raw: &str) -> StorageResult<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(StorageError::InvalidIdentifier(raw.to_string()));
    }

    let mut out = String::with_capacity(trimmed.len());
    for ch in trimmed.chars() {
        if ch.is_ascii_alphanumeric() || ch == '_' {
            out.push(ch);
        } else {
            out.push('_');
        }
    }

    if out.chars().all(|c| c == '_') {
        return Err(StorageError::InvalidIdentifier(raw.to_string()));
    }
    if out.starts_with(|c: char| c.is_ascii_digit()) {
        out = format!("t_{}", out);
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_names_pass_through() {
        assert_eq!(sanitize_identifier("ventas").unwrap(), "ventas");
        assert_eq!(sanitize_identifier("sample_2").unwrap(), "sample_2");
    }

    #[test]
    fn test_punctuation_becomes_underscores() {
        assert_eq!(sanitize_identifier("ventas 2024").unwrap(), "ventas_2024");
        assert_eq!(sanitize_identifier("a-b.c").unwrap(), "a_b_c");
    }

    #[test]
    fn test_leading_digit_is_prefixed() {
        assert_eq!(sanitize_identifier("2024_report").unwrap(), "t_2024_report");
    }

    #[test]
    fn test_unusable_names_are_rejected() {
        assert!(matches!(
            sanitize_identifier("   "),
            Err(StorageError::InvalidIdentifier(_))
        ));
        assert!(matches!(
            sanitize_identifier("..."),
            Err(StorageError::InvalidIdentifier(_))
        ));
    }
}
