use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Native error codes reported by `Z3_get_error_code`.
///
/// Mirrors the `Z3_error_code` enumeration. Values the binding does not know
/// about are preserved in [`ErrorCode::Unknown`] so the raw number always
/// survives the trip into Rust.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// No error (`Z3_OK`).
    Ok,
    /// Ill-sorted AST (`Z3_SORT_ERROR`).
    SortError,
    /// Index out of bounds (`Z3_IOB`).
    IndexOutOfBounds,
    /// Invalid argument (`Z3_INVALID_ARG`).
    InvalidArgument,
    /// Parse failure (`Z3_PARSER_ERROR`).
    ParserError,
    /// Parser output unavailable (`Z3_NO_PARSER`).
    NoParser,
    /// Invalid quantifier pattern (`Z3_INVALID_PATTERN`).
    InvalidPattern,
    /// Allocation failure (`Z3_MEMOUT_FAIL`).
    MemoryFailure,
    /// File could not be accessed (`Z3_FILE_ACCESS_ERROR`).
    FileAccessError,
    /// Internal error in Z3 itself (`Z3_INTERNAL_FATAL`).
    InternalFatal,
    /// Call invalid in the current state (`Z3_INVALID_USAGE`).
    InvalidUsage,
    /// Reference count dropped on a deleted AST (`Z3_DEC_REF_ERROR`).
    DecRefError,
    /// Generic Z3 exception (`Z3_EXCEPTION`).
    Exception,
    /// A code this binding does not recognise.
    Unknown(i32),
}

impl ErrorCode {
    /// Map a raw native code onto the enumeration.
    pub fn from_raw(raw: i32) -> Self {
        match raw {
            0 => ErrorCode::Ok,
            1 => ErrorCode::SortError,
            2 => ErrorCode::IndexOutOfBounds,
            3 => ErrorCode::InvalidArgument,
            4 => ErrorCode::ParserError,
            5 => ErrorCode::NoParser,
            6 => ErrorCode::InvalidPattern,
            7 => ErrorCode::MemoryFailure,
            8 => ErrorCode::FileAccessError,
            9 => ErrorCode::InternalFatal,
            10 => ErrorCode::InvalidUsage,
            11 => ErrorCode::DecRefError,
            12 => ErrorCode::Exception,
            other => ErrorCode::Unknown(other),
        }
    }

    /// The exact number the native library uses for this code.
    pub fn as_raw(self) -> i32 {
        match self {
            ErrorCode::Ok => 0,
            ErrorCode::SortError => 1,
            ErrorCode::IndexOutOfBounds => 2,
            ErrorCode::InvalidArgument => 3,
            ErrorCode::ParserError => 4,
            ErrorCode::NoParser => 5,
            ErrorCode::InvalidPattern => 6,
            ErrorCode::MemoryFailure => 7,
            ErrorCode::FileAccessError => 8,
            ErrorCode::InternalFatal => 9,
            ErrorCode::InvalidUsage => 10,
            ErrorCode::DecRefError => 11,
            ErrorCode::Exception => 12,
            ErrorCode::Unknown(raw) => raw,
        }
    }

    /// Returns `true` for `Z3_OK`.
    pub fn is_ok(self) -> bool {
        self == ErrorCode::Ok
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorCode::Unknown(raw) => write!(f, "Unknown({raw})"),
            other => write!(f, "{other:?}"),
        }
    }
}

/// Errors surfaced by the interop layer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Z3Error {
    /// Library path was empty or whitespace.
    #[error("Library path cannot be empty or whitespace")]
    InvalidPath,
    /// No file exists at the explicit library path.
    #[error("Z3 library not found at path: {}", .0.display())]
    NotFound(PathBuf),
    /// Automatic discovery found nothing loadable.
    #[error("{}", describe_auto_detect(.searched, .attempts))]
    AutoDetectFailed {
        /// Every candidate that was considered, in search order.
        searched: Vec<PathBuf>,
        /// Candidates that existed but failed to load, with the reason.
        attempts: Vec<(PathBuf, String)>,
    },
    /// The OS loader rejected the file.
    #[error("Failed to load Z3 library '{}': {reason}", .path.display())]
    LoadFailed { path: PathBuf, reason: String },
    /// A required entry point is missing; the library was not kept loaded.
    #[error(
        "Incompatible Z3 library at '{}': missing required function '{symbol}'",
        .path.display()
    )]
    IncompatibleLibrary { path: PathBuf, symbol: String },
    /// An optional entry point is absent from this native build.
    #[error(
        "Function '{function}' is not available in this Z3 build ({}); it may require a newer version of Z3",
        .path.display()
    )]
    FunctionUnavailable { function: String, path: PathBuf },
    /// The library was disposed before the call.
    #[error("Z3 library has been disposed")]
    Disposed,
    /// A native constructor returned a null handle without setting an error code.
    #[error("{0} returned null handle")]
    NullHandle(&'static str),
    /// Outbound text cannot be represented as a C string.
    #[error("String passed to Z3 contains an interior NUL byte")]
    InvalidString,
    /// An argument array is longer than the native `unsigned` count allows.
    #[error("Too many arguments for a single Z3 call: {0}")]
    TooManyArguments(usize),
    /// A term, sort or parameter set from one context was handed to another.
    #[error("{0} belongs to a different Z3 context")]
    ContextMismatch(&'static str),
    /// The native library reported an error on a context.
    #[error("Z3 Error ({code}): {message}")]
    Native { code: ErrorCode, message: String },
    /// No process-wide default library has been registered.
    #[error("No default Z3 library is registered")]
    NoDefaultLibrary,
    /// A model was requested although the last check was not satisfiable.
    #[error("Model is only available after a satisfiable check")]
    ModelUnavailable,
}

impl Z3Error {
    /// Native error code, if this error came from the native library.
    pub fn native_code(&self) -> Option<ErrorCode> {
        match self {
            Z3Error::Native { code, .. } => Some(*code),
            _ => None,
        }
    }
}

fn describe_auto_detect(searched: &[PathBuf], attempts: &[(PathBuf, String)]) -> String {
    let searched = searched
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ");
    let mut message = format!("Could not automatically locate Z3 library. Searched paths: {searched}");
    if !attempts.is_empty() {
        message.push_str("\n\nLoad attempts:");
        for (path, reason) in attempts {
            message.push_str(&format!("\n  {}: {reason}", path.display()));
        }
    }
    message.push_str(
        "\n\nPlease ensure Z3 is installed or use Z3Library::load(path) to specify the library path explicitly.",
    );
    message
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_not_found() {
        let err = Z3Error::NotFound(PathBuf::from("/no/libz3.so"));
        assert_eq!(err.to_string(), "Z3 library not found at path: /no/libz3.so");
    }

    #[test]
    fn display_native_error() {
        let err = Z3Error::Native {
            code: ErrorCode::InvalidArgument,
            message: "Test error message".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Z3 Error (InvalidArgument): Test error message"
        );
        assert_eq!(err.native_code(), Some(ErrorCode::InvalidArgument));
    }

    #[test]
    fn display_null_handle() {
        assert_eq!(
            Z3Error::NullHandle("mk_solver").to_string(),
            "mk_solver returned null handle"
        );
    }

    #[test]
    fn display_auto_detect_lists_paths_and_attempts() {
        let err = Z3Error::AutoDetectFailed {
            searched: vec![PathBuf::from("libz3.so"), PathBuf::from("/usr/lib/libz3.so")],
            attempts: vec![(PathBuf::from("/usr/lib/libz3.so"), "bad ELF".to_string())],
        };
        let text = err.to_string();
        assert!(text.contains("Searched paths: libz3.so, /usr/lib/libz3.so"));
        assert!(text.contains("/usr/lib/libz3.so: bad ELF"));
        assert!(text.contains("Z3Library::load(path)"));
    }

    #[test]
    fn unavailable_is_distinct_from_native() {
        let err = Z3Error::FunctionUnavailable {
            function: "Z3_solver_push".to_string(),
            path: PathBuf::from("libz3.so"),
        };
        assert_eq!(err.native_code(), None);
        assert!(err.to_string().contains("Z3_solver_push"));
    }

    #[test]
    fn error_code_raw_values() {
        assert_eq!(ErrorCode::Ok.as_raw(), 0);
        assert_eq!(ErrorCode::InvalidArgument.as_raw(), 3);
        assert_eq!(ErrorCode::Exception.as_raw(), 12);
        for raw in -2..20 {
            assert_eq!(ErrorCode::from_raw(raw).as_raw(), raw);
        }
        assert_eq!(ErrorCode::from_raw(42), ErrorCode::Unknown(42));
        assert_eq!(ErrorCode::Unknown(42).to_string(), "Unknown(42)");
    }

    #[test]
    fn display_context_mismatch() {
        let err = Z3Error::ContextMismatch("sort");
        assert_eq!(err.to_string(), "sort belongs to a different Z3 context");
        assert_eq!(err.native_code(), None);
    }

    #[test]
    fn error_equality() {
        assert_eq!(Z3Error::Disposed, Z3Error::Disposed);
        assert_ne!(Z3Error::Disposed, Z3Error::InvalidPath);
    }
}
