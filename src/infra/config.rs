//! Centralized configuration (environment variables + defaults).

/// Database connection string (required).
pub fn database_url() -> String {
    std::env::var("DATABASE_URL").expect("DATABASE_URL must be set")
}

/// Postgres schema holding the record tables.
///
/// Defaults to the analytics schema name the website deployment uses.
pub fn database_schema() -> String {
    let schema =
        std::env::var("DATABASE_SCHEMA").unwrap_or_else(|_| "website_analytics".to_string());
    assert!(
        is_valid_ident(&schema),
        "DATABASE_SCHEMA must be a plain SQL identifier, got '{}'",
        schema
    );
    schema
}

/// Identifier check for names spliced into SQL (schema names are not
/// bindable parameters).
pub fn is_valid_ident(ident: &str) -> bool {
    let mut chars = ident.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::is_valid_ident;

    #[test]
    fn idents_accept_letters_digits_underscores() {
        assert!(is_valid_ident("website_analytics"));
        assert!(is_valid_ident("_private"));
        assert!(is_valid_ident("s1"));
    }

    #[test]
    fn idents_reject_injection_shapes() {
        assert!(!is_valid_ident(""));
        assert!(!is_valid_ident("1schema"));
        assert!(!is_valid_ident("public; DROP TABLE records"));
        assert!(!is_valid_ident("a-b"));
    }
}
