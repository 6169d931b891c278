//! Error types for TCSS parsing and rule loading.

use thiserror::Error;

/// Errors that can occur while parsing a stylesheet or loading rules.
///
/// # Examples
///
/// ```rust
/// use tcss::parser::parse_stylesheet;
/// use tcss::TcssError;
///
/// // Syntax error example - missing value after colon
/// let result = parse_stylesheet("Label { width: }");
/// assert!(matches!(result, Err(TcssError::InvalidSyntax(_))));
/// ```
#[derive(Error, Debug)]
pub enum TcssError {
    /// Invalid CSS syntax was encountered during parsing.
    ///
    /// The string contains details about what was unexpected and where.
    #[error("CSS syntax error: {0}")]
    InvalidSyntax(String),

    /// A selector is malformed. Rule sets containing one are rejected
    /// wholesale at load time.
    #[error("Invalid selector: {0}")]
    InvalidSelector(String),

    /// An I/O error occurred while reading a stylesheet file.
    #[error("I/O error reading stylesheet")]
    Io(#[from] std::io::Error),
}
