use crate::JumpId;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Maximum number of errors reported before fail-fast.
pub const MAX_ERRORS: usize = 20;

/// Errors raised while encoding a cutscene.
#[derive(Debug, Error)]
pub enum CutsceneError {
    /// The container was closed while jumps were still waiting for a bind.
    #[error("missing jump bind on instructions {}", join_ids(.0))]
    UnresolvedJumps(Vec<JumpId>),

    /// The ascii string writer was handed non-ascii text.
    #[error("string is not ascii: {0:?}")]
    NonAsciiString(String),

    /// The string length cannot be expressed by the configured length prefix.
    #[error("string of {len} bytes exceeds the {max}-byte length prefix")]
    StringTooLong { len: usize, max: usize },

    /// The underlying sink failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type used throughout the encoder.
pub type CutsceneResult<T> = Result<T, CutsceneError>;

fn join_ids(ids: &[JumpId]) -> String {
    ids.iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Error category, determined by error code range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorCategory {
    Syntax,
    Schema,
    Encoding,
    Structure,
    Io,
}

/// Numeric error code for script compilation (E100–E999).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ErrorCode(pub u16);

impl ErrorCode {
    // ── Syntax errors (E100–E199) ──
    pub const INVALID_JSON: Self = Self(100);
    pub const UNEXPECTED_EOF: Self = Self(101);

    // ── Schema errors (E200–E299) ──
    pub const INVALID_COMMAND: Self = Self(200);

    // ── Encoding errors (E300–E399) ──
    pub const NON_ASCII_STRING: Self = Self(300);
    pub const STRING_TOO_LONG: Self = Self(301);

    // ── Structure errors (E600–E699) ──
    pub const UNRESOLVED_JUMP: Self = Self(600);

    // ── IO errors (E900–E999) ──
    pub const IO_FAILURE: Self = Self(900);

    /// Get the category for this error code.
    pub fn category(self) -> ErrorCategory {
        match self.0 {
            100..=199 => ErrorCategory::Syntax,
            200..=299 => ErrorCategory::Schema,
            300..=399 => ErrorCategory::Encoding,
            600..=699 => ErrorCategory::Structure,
            _ => ErrorCategory::Io,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E{}", self.0)
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Syntax => write!(f, "syntax"),
            Self::Schema => write!(f, "schema"),
            Self::Encoding => write!(f, "encoding"),
            Self::Structure => write!(f, "structure"),
            Self::Io => write!(f, "io"),
        }
    }
}

/// A structured script compilation error.
///
/// Tooling renders these from their fields; it must not parse the message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScriptError {
    /// Script file name.
    pub file: String,
    pub code: ErrorCode,
    /// Derived from `code`.
    pub category: ErrorCategory,
    pub message: String,
    /// 1-based line in the script document, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
    /// 1-based column in the script document, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column: Option<usize>,
    /// Jump ids left unbound, for [`ErrorCode::UNRESOLVED_JUMP`].
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub jumps: Vec<JumpId>,
}

impl ScriptError {
    /// Create a new error.
    pub fn new(file: impl Into<String>, code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            code,
            category: code.category(),
            message: message.into(),
            line: None,
            column: None,
            jumps: Vec::new(),
        }
    }

    /// Attach a source position.
    pub fn at(mut self, line: usize, column: usize) -> Self {
        self.line = Some(line);
        self.column = Some(column);
        self
    }

    /// Convert an encoder failure into a structured error.
    pub fn from_cutscene(file: impl Into<String>, err: &CutsceneError) -> Self {
        let code = match err {
            CutsceneError::UnresolvedJumps(_) => ErrorCode::UNRESOLVED_JUMP,
            CutsceneError::NonAsciiString(_) => ErrorCode::NON_ASCII_STRING,
            CutsceneError::StringTooLong { .. } => ErrorCode::STRING_TOO_LONG,
            CutsceneError::Io(_) => ErrorCode::IO_FAILURE,
        };
        let mut script_err = Self::new(file, code, err.to_string());
        if let CutsceneError::UnresolvedJumps(ids) = err {
            script_err.jumps = ids.clone();
        }
        script_err
    }
}

impl fmt::Display for ScriptError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.line, self.column) {
            (Some(line), Some(col)) => write!(
                f,
                "{}:{}:{}: {} [{}] {}",
                self.file, line, col, self.code, self.category, self.message
            ),
            _ => write!(
                f,
                "{}: {} [{}] {}",
                self.file, self.code, self.category, self.message
            ),
        }
    }
}

impl std::error::Error for ScriptError {}

/// The structured JSON output for compilation errors.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompileErrors {
    pub errors: Vec<ScriptError>,
    pub total_errors: usize,
}

impl CompileErrors {
    /// Create an empty result (no errors).
    pub fn empty() -> Self {
        Self::default()
    }

    /// Check if there are any errors.
    pub fn has_errors(&self) -> bool {
        self.total_errors > 0
    }

    /// Add an error, respecting the MAX_ERRORS limit.
    pub fn push_error(&mut self, error: ScriptError) {
        if self.errors.len() < MAX_ERRORS {
            self.errors.push(error);
        }
        self.total_errors += 1;
    }
}
