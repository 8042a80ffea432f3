//! Error types for the washroom quotation engine.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while compiling or evaluating a custom cost formula.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormulaError {
    /// The formula text is empty or only whitespace.
    #[error("formula is empty")]
    Empty,

    /// A character outside the formula grammar.
    #[error("unexpected character '{ch}' at position {position}")]
    UnexpectedChar { ch: char, position: usize },

    /// A number literal that does not parse.
    #[error("invalid number '{text}'")]
    InvalidNumber { text: String },

    /// A variable name other than the six supported bindings.
    #[error("unknown variable '{name}'")]
    UnknownVariable { name: String },

    /// A token that does not fit the grammar at this point.
    #[error("unexpected '{token}' at position {position}")]
    UnexpectedToken { token: String, position: usize },

    /// The formula ended where an operand or ')' was expected.
    #[error("unexpected end of formula")]
    UnexpectedEnd,

    /// More tokens than a formula may hold.
    #[error("formula has more than {limit} tokens")]
    TooLong { limit: usize },

    /// Parentheses or unary signs nested deeper than allowed.
    #[error("formula nests deeper than {limit} levels")]
    TooDeep { limit: usize },

    /// Evaluation produced infinity or NaN (e.g. division by zero).
    #[error("formula evaluated to a non-finite value")]
    NonFinite,
}

/// Errors that can occur when loading project input or settings documents.
#[derive(Debug, Error)]
pub enum ParseError {
    /// Failed to read the document from disk.
    #[error("failed to read file '{path}': {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The document is not valid JSON for the expected shape.
    #[error("invalid document '{path}': {source}")]
    InvalidDocument {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Errors that can occur when exporting data.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Failed to create the output file.
    #[error("failed to create file '{path}': {source}")]
    FileCreate {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to write data to the file.
    #[error("failed to write data: {message}")]
    WriteError { message: String },

    /// Failed to serialize data to JSON.
    #[error("JSON serialization failed: {source}")]
    JsonSerialize {
        #[from]
        source: serde_json::Error,
    },

    /// Failed to write CSV data.
    #[error("CSV write failed: {source}")]
    CsvWrite {
        #[from]
        source: csv::Error,
    },
}
