//! Property-based tests for identifier validation and quoting.

use proptest::prelude::*;
use sqlcrud::core::db::{Identifier, IdentifierKind};
use sqlcrud::CrudError;

proptest! {
    #[test]
    fn valid_names_round_trip(name in "[A-Za-z_][A-Za-z0-9_]{0,127}") {
        let ident = Identifier::parse(IdentifierKind::Table, &name).unwrap();
        prop_assert_eq!(ident.as_str(), name.as_str());
        prop_assert_eq!(ident.quoted(), format!("\"{}\"", name));
    }

    #[test]
    fn names_with_sql_metacharacters_are_rejected(
        prefix in "[A-Za-z_][A-Za-z0-9_]{0,10}",
        meta in prop::sample::select(vec![";", "\"", "'", " ", "-", "(", ")", "*", "/", "\n"]),
        suffix in "[A-Za-z0-9_]{0,10}",
    ) {
        let name = format!("{}{}{}", prefix, meta, suffix);
        let is_invalid_identifier = matches!(
            Identifier::database(&name),
            Err(CrudError::InvalidIdentifier { kind: "database", .. })
        );
        prop_assert!(is_invalid_identifier);
    }

    #[test]
    fn leading_digit_is_rejected(name in "[0-9][A-Za-z0-9_]{0,20}") {
        prop_assert!(!Identifier::is_valid(&name));
    }
}
