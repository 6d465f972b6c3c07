/// Identifier Module
///
/// Database and table names end up in DDL text, where parameter binding is
/// not available. Every name goes through `Identifier::parse` first and is
/// double-quoted when rendered into SQL.
use crate::core::{CrudError, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

static IDENTIFIER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_]{0,127}$").expect("identifier pattern is valid")
});

/// What an identifier names, used in error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentifierKind {
    Database,
    Table,
}

impl IdentifierKind {
    fn as_str(self) -> &'static str {
        match self {
            IdentifierKind::Database => "database",
            IdentifierKind::Table => "table",
        }
    }
}

/// A validated database or table name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Identifier(String);

impl Identifier {
    /// Validates `name` against the allow-list pattern.
    ///
    /// Surrounding whitespace is not trimmed; `" x"` is rejected.
    pub fn parse(kind: IdentifierKind, name: &str) -> Result<Self> {
        if IDENTIFIER_RE.is_match(name) {
            Ok(Identifier(name.to_string()))
        } else {
            Err(CrudError::InvalidIdentifier {
                kind: kind.as_str(),
                name: name.to_string(),
            })
        }
    }

    pub fn database(name: &str) -> Result<Self> {
        Self::parse(IdentifierKind::Database, name)
    }

    pub fn table(name: &str) -> Result<Self> {
        Self::parse(IdentifierKind::Table, name)
    }

    /// Returns true when `name` would be accepted by `parse`.
    pub fn is_valid(name: &str) -> bool {
        IDENTIFIER_RE.is_match(name)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Renders the identifier for SQL text, e.g. `"Employees"`.
    pub fn quoted(&self) -> String {
        // The pattern excludes '"', so no escaping is needed.
        format!("\"{}\"", self.0)
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Identifier {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_plain_names() {
        for name in ["testdb", "Employees", "_scratch", "db_2024", "A"] {
            assert!(Identifier::database(name).is_ok(), "{name} should be valid");
        }
    }

    #[test]
    fn test_rejects_injection_attempts() {
        for name in [
            "",
            "1db",
            "test db",
            "x; DROP TABLE Employees",
            "a\"b",
            "emp-loyees",
            " testdb",
            "t\u{e9}st",
        ] {
            let result = Identifier::table(name);
            match result {
                Err(CrudError::InvalidIdentifier { kind, name: rejected }) => {
                    assert_eq!(kind, "table");
                    assert_eq!(rejected, name);
                }
                other => panic!("Expected InvalidIdentifier for {name:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_length_limit() {
        let longest = "a".repeat(128);
        assert!(Identifier::is_valid(&longest));
        assert!(!Identifier::is_valid(&"a".repeat(129)));
    }

    #[test]
    fn test_quoted() {
        let ident = Identifier::table("Employees").unwrap();
        assert_eq!(ident.quoted(), "\"Employees\"");
        assert_eq!(ident.to_string(), "Employees");
    }
}
