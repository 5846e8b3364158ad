//! Identifier helpers for generated class and table names

use crate::error::{BootError, Result};

/// Upper-case the first character, leaving the rest untouched
pub fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Convert PascalCase to snake_case.
pub fn to_snake_case(name: &str) -> String {
    let mut result = String::new();
    for (i, c) in name.chars().enumerate() {
        if c.is_uppercase() {
            if i > 0 {
                result.push('_');
            }
            result.extend(c.to_lowercase());
        } else {
            result.push(c);
        }
    }
    result
}

/// A validated, user-supplied unit name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitName(String);

impl UnitName {
    /// Trim and validate `raw`; `usage` is attached to the error for the caller to print
    pub fn parse(raw: Option<&str>, kind: &str, usage: Vec<String>) -> Result<Self> {
        let name = raw.map(str::trim).unwrap_or_default();
        if name.is_empty() {
            return Err(BootError::validation(format!("{} name is required", kind), usage));
        }
        if !is_java_identifier(name) {
            return Err(BootError::validation(
                format!("'{}' is not a valid {} name (letters, digits and '_' only)", name, kind.to_lowercase()),
                usage,
            ));
        }
        Ok(Self(name.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn class_name(&self) -> String {
        capitalize(&self.0)
    }

    pub fn lower(&self) -> String {
        self.0.to_lowercase()
    }
}

impl std::fmt::Display for UnitName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

fn is_java_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("dashboard"), "Dashboard");
        assert_eq!(capitalize("userAuth"), "UserAuth");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn test_capitalize_is_idempotent() {
        for name in ["dashboard", "UserAuth", "x", "_private", "éclair", "a1b2"] {
            let once = capitalize(name);
            assert_eq!(capitalize(&once), once, "not idempotent for {}", name);
        }
    }

    #[test]
    fn test_to_snake_case() {
        assert_eq!(to_snake_case("OrderLine"), "order_line");
        assert_eq!(to_snake_case("User"), "user");
        assert_eq!(to_snake_case("already_snake"), "already_snake");
    }

    #[test]
    fn test_unit_name_rejects_blank() {
        let err = UnitName::parse(Some("   "), "Activity", vec!["Usage: x".into()]).unwrap_err();
        match err {
            BootError::Validation { message, usage } => {
                assert_eq!(message, "Activity name is required");
                assert_eq!(usage, vec!["Usage: x".to_string()]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(UnitName::parse(None, "Model", vec![]).is_err());
    }

    #[test]
    fn test_unit_name_rejects_non_identifiers() {
        assert!(UnitName::parse(Some("my-activity"), "Activity", vec![]).is_err());
        assert!(UnitName::parse(Some("1st"), "Model", vec![]).is_err());
    }

    #[test]
    fn test_unit_name_accessors() {
        let name = UnitName::parse(Some(" userAuth "), "Service", vec![]).unwrap();
        assert_eq!(name.as_str(), "userAuth");
        assert_eq!(name.class_name(), "UserAuth");
        assert_eq!(name.lower(), "userauth");
    }
}
