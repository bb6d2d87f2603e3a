//! Compiler error kinds, their numeric codes and diagnostics.

use std::fmt;

use thiserror::Error;

use crate::processor::lexer::LexError;

/// Every way compiling a script can fail.
///
/// The `#[error]` strings are the user-facing messages: capitalised, with
/// no trailing punctuation so the caller can decorate them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ErrorKind {
    // ── header ──────────────────────────────────────────────────────
    #[error("Failed to read script signature")]
    NoSignature,
    #[error("Invalid header metacommand")]
    InvalidHeaderCommand,
    #[error("Repetition of header metacommand")]
    HeaderRepeated,
    #[error("Header metacommand syntax error")]
    HeaderSyntax,
    #[error("Image output dimension out of range")]
    DimensionOutOfRange,
    #[error("Unrecognized shading mode")]
    UnrecognizedShadingMode,
    #[error("You must declare output dimensions in header")]
    DimensionsNotDeclared,
    #[error("You must declare shading mode in header")]
    ShadingModeNotDeclared,

    // ── body ────────────────────────────────────────────────────────
    #[error("Stray metacommand after metacommand header")]
    StrayMetacommand,
    #[error("Too many declared vertices")]
    TooManyVertices,
    #[error("Too many declared triangles")]
    TooManyTriangles,

    // ── interpreter ─────────────────────────────────────────────────
    #[error("Unsupported entity type")]
    UnsupportedEntityType,
    #[error("Unsupported operation")]
    UnsupportedOperation,
    #[error("Stack overflow")]
    StackOverflow,
    #[error("Stack underflow")]
    StackUnderflow,
    #[error("Data remaining on interpreter stack")]
    StackDataRemaining,
    #[error("Operation syntax error")]
    OperationSyntaxError,
    #[error("Negative Z coordinate")]
    NegativeZCoordinate,
    #[error("Invalid vertex index")]
    InvalidVertexIndex,
    #[error("Invalid integer literal")]
    InvalidIntegerLiteral,
    #[error("Invalid RGB literal")]
    InvalidRgbLiteral,

    // ── cross-pass ──────────────────────────────────────────────────
    #[error("Pass synchronization mismatch")]
    SyncMismatch,

    /// Failure reported by the entity stream itself.
    #[error(transparent)]
    Stream(#[from] LexError),
}

impl ErrorKind {
    /// Every kind that has a positive code, in code order.
    const CODED: [ErrorKind; 22] = [
        ErrorKind::NoSignature,
        ErrorKind::InvalidHeaderCommand,
        ErrorKind::HeaderRepeated,
        ErrorKind::HeaderSyntax,
        ErrorKind::DimensionOutOfRange,
        ErrorKind::UnrecognizedShadingMode,
        ErrorKind::DimensionsNotDeclared,
        ErrorKind::ShadingModeNotDeclared,
        ErrorKind::StrayMetacommand,
        ErrorKind::TooManyVertices,
        ErrorKind::TooManyTriangles,
        ErrorKind::UnsupportedEntityType,
        ErrorKind::UnsupportedOperation,
        ErrorKind::StackOverflow,
        ErrorKind::StackUnderflow,
        ErrorKind::StackDataRemaining,
        ErrorKind::OperationSyntaxError,
        ErrorKind::NegativeZCoordinate,
        ErrorKind::InvalidVertexIndex,
        ErrorKind::InvalidIntegerLiteral,
        ErrorKind::InvalidRgbLiteral,
        ErrorKind::SyncMismatch,
    ];

    /// Stable numeric code. Positive for compiler errors, negative for
    /// entity-stream errors.
    pub fn code(self) -> i32 {
        match self {
            ErrorKind::Stream(e) => e.code(),
            kind => ErrorKind::CODED
                .iter()
                .position(|k| *k == kind)
                .map_or(0, |i| i as i32 + 1),
        }
    }

    /// Inverse of [`ErrorKind::code`].
    pub fn from_code(code: i32) -> Option<ErrorKind> {
        if code < 0 {
            return LexError::from_code(code).map(ErrorKind::Stream);
        }
        let idx = usize::try_from(code).ok()?.checked_sub(1)?;
        ErrorKind::CODED.get(idx).copied()
    }

    /// Attach a line number (0 when no line applies).
    pub fn at(self, line: u32) -> ScriptError {
        ScriptError { kind: self, line }
    }
}

/// Message for a numeric error code, the same text the error displays.
///
/// Zero is "No error"; codes that name nothing map to "Unknown error".
pub fn error_message(code: i32) -> String {
    if code == 0 {
        return "No error".to_string();
    }
    ErrorKind::from_code(code).map_or_else(|| "Unknown error".to_string(), |kind| kind.to_string())
}

/// An error kind plus the script line it was detected on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScriptError {
    pub kind: ErrorKind,
    /// 1-based line, or 0 when the error is not tied to a line.
    pub line: u32,
}

impl fmt::Display for ScriptError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.line > 0 {
            write!(f, "[Line {}] {}", self.line, self.kind)
        } else {
            write!(f, "{}", self.kind)
        }
    }
}

impl std::error::Error for ScriptError {}

pub type ScriptResult<T> = Result<T, ScriptError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_round_trip() {
        for code in 1..=22 {
            let kind = ErrorKind::from_code(code).expect("known code");
            assert_eq!(kind.code(), code);
            assert_eq!(error_message(code), kind.to_string());
        }
    }

    #[test]
    fn test_special_codes() {
        assert_eq!(error_message(0), "No error");
        assert_eq!(error_message(23), "Unknown error");
        assert_eq!(error_message(-1000), "Unknown error");
        assert_eq!(error_message(-1), "Unexpected end of input");
        assert_eq!(ErrorKind::Stream(LexError::TrailingData).code(), -8);
    }

    #[test]
    fn test_display_with_and_without_line() {
        let err = ErrorKind::HeaderRepeated.at(3);
        assert_eq!(err.to_string(), "[Line 3] Repetition of header metacommand");
        let err = ErrorKind::DimensionsNotDeclared.at(0);
        assert_eq!(err.to_string(), "You must declare output dimensions in header");
    }
}
