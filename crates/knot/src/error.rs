//! Error taxonomy and control signals.
//!
//! Mirrors `examples/original_source/include/err.h`: a flat list of error
//! kinds plus two control signals (`Break`, `Quit`) that are not errors but
//! travel through the same `Result` channel so every evaluator and operator
//! function has a single, uniform return type.

use std::fmt;

/// A reported failure. Never constructed for `Break`/`Quit` — those are
/// [`ControlStatus`], kept out of this enum so a `match` on `ErrorKind`
/// never needs a "this isn't really an error" arm.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Invalid or missing input file name/format.
    InvalidInputFile,
    /// Error in Lisp source code (parse failure, bad operand kind, wrong
    /// argument count, `QUOTE`d value passed where a variable was required).
    SyntaxError,
    /// Cannot read/write the requested file.
    FileAccessFailure,
    /// Allocation failed.
    OutOfMemory,
    /// Invalid program CLI arguments.
    InvalidArgs,
    /// Unexpected internal error (should not happen): malformed node shape
    /// reaching an operator, or the recursion-depth guard tripping.
    Internal,
    /// Access to an undefined variable.
    UnknownVariable,
    /// Assignment or increment/decrement target is not a variable node.
    NotAVariable,
    /// Division by a non-first zero divisor.
    ZeroDivision,
    /// Unsupported or unknown operator name at the head of a list.
    UnknownOperator,
}

impl ErrorKind {
    /// Aggregates internal error kinds to the exit codes spec.md §6 defines.
    ///
    /// `UnknownVariable`, `NotAVariable`, and `UnknownOperator` are folded
    /// into `SyntaxError`; every other kind passes through unchanged.
    #[must_use]
    pub fn aggregate_exit_status(self) -> Self {
        match self {
            Self::UnknownVariable | Self::NotAVariable | Self::UnknownOperator => Self::SyntaxError,
            other => other,
        }
    }

    /// The process exit code for this error kind.
    #[must_use]
    pub fn exit_code(self) -> i32 {
        match self.aggregate_exit_status() {
            Self::InvalidInputFile => 1,
            Self::SyntaxError => 2,
            Self::FileAccessFailure => 3,
            Self::OutOfMemory => 4,
            Self::InvalidArgs => 5,
            Self::Internal => 6,
            Self::ZeroDivision => 9,
            Self::UnknownVariable | Self::NotAVariable | Self::UnknownOperator => unreachable!(
                "aggregate_exit_status folds these into SyntaxError before exit_code is consulted"
            ),
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            Self::InvalidInputFile => "invalid or missing input file",
            Self::SyntaxError => "syntax error",
            Self::FileAccessFailure => "cannot read/write file",
            Self::OutOfMemory => "out of memory",
            Self::InvalidArgs => "invalid program arguments",
            Self::Internal => "internal error",
            Self::UnknownVariable => "unknown variable",
            Self::NotAVariable => "not a variable",
            Self::ZeroDivision => "division by zero",
            Self::UnknownOperator => "unknown operator",
        };
        f.write_str(msg)
    }
}

impl std::error::Error for ErrorKind {}

/// Internal, non-error control signal routed through the same `Result`
/// channel as [`ErrorKind`] and recovered exactly once at the layer that
/// owns its semantics: `WHILE` recovers `Break`, the driver/REPL recovers
/// `Quit`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlStatus {
    /// Produced by `(BRK)`; terminates the innermost enclosing `WHILE`.
    Break,
    /// Produced by `(QUIT)`; terminates the session.
    Quit,
}

/// The return channel for every evaluator and operator function.
///
/// Carrying [`ControlStatus`] here (rather than as a side channel) is what
/// lets `BRK` and `QUIT` propagate through ordinary `?`-based control flow
/// all the way up to the layer that recovers them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvalError {
    Error(ErrorKind),
    Control(ControlStatus),
}

impl EvalError {
    /// `Break` reaching the driver (rather than being recovered by an
    /// enclosing `WHILE`) is a syntax error: "break outside a loop".
    #[must_use]
    pub fn leaked_break_is_syntax_error(self) -> ErrorKind {
        match self {
            Self::Control(ControlStatus::Break) => ErrorKind::SyntaxError,
            Self::Error(kind) => kind,
            Self::Control(ControlStatus::Quit) => unreachable!("Quit is recovered before this is called"),
        }
    }
}

impl From<ErrorKind> for EvalError {
    fn from(kind: ErrorKind) -> Self {
        Self::Error(kind)
    }
}

impl From<ControlStatus> for EvalError {
    fn from(status: ControlStatus) -> Self {
        Self::Control(status)
    }
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Error(kind) => write!(f, "{kind}"),
            Self::Control(ControlStatus::Break) => f.write_str("break outside a loop"),
            Self::Control(ControlStatus::Quit) => f.write_str("quit"),
        }
    }
}

impl std::error::Error for EvalError {}

pub type EvalResult<T> = Result<T, EvalError>;
