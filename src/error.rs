//! Unified error types for the sygaldry core.
//!
//! A single `Error` enum that every subsystem can convert into, keeping
//! top-level error handling uniform. Lifecycle subroutines never return
//! errors across the runtime boundary — a component that fails writes an
//! explanation to its `error message` endpoint and drops its `running`
//! toggle instead; these types cover the construction-time and wire-level
//! surfaces where an error value is the right tool.

use core::fmt;

use crate::endpoints::ValueClass;

// ---------------------------------------------------------------------------
// Top-level error
// ---------------------------------------------------------------------------

/// Every fallible construction-time or codec operation funnels into this type.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// A value could not be written into an endpoint.
    Value(ValueError),
    /// The component tree failed validation while being assembled.
    Assembly(AssemblyError),
    /// A type-keyed tree lookup failed.
    Find(FindError),
    /// An OSC packet could not be decoded.
    Codec(CodecError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(e) => write!(f, "value: {e}"),
            Self::Assembly(e) => write!(f, "assembly: {e}"),
            Self::Find(e) => write!(f, "find: {e}"),
            Self::Codec(e) => write!(f, "codec: {e}"),
        }
    }
}

impl std::error::Error for Error {}

// ---------------------------------------------------------------------------
// Endpoint value errors
// ---------------------------------------------------------------------------

/// Rejected writes through the uniform [`Endpoint`](crate::endpoints::Endpoint)
/// surface. The stored value is left untouched when a write is rejected.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ValueError {
    /// The supplied value's class does not coerce to the endpoint's class.
    TypeMismatch { expected: ValueClass },
    /// An array write supplied the wrong number of elements.
    ArityMismatch { expected: usize, got: usize },
}

impl fmt::Display for ValueError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TypeMismatch { expected } => {
                write!(f, "type mismatch (expected {expected})")
            }
            Self::ArityMismatch { expected, got } => {
                write!(f, "arity mismatch (expected {expected} elements, got {got})")
            }
        }
    }
}

impl std::error::Error for ValueError {}

impl From<ValueError> for Error {
    fn from(e: ValueError) -> Self {
        Self::Value(e)
    }
}

// ---------------------------------------------------------------------------
// Assembly errors
// ---------------------------------------------------------------------------

/// Component-tree validation failures, reported by
/// [`AssemblyBuilder::build`](crate::assembly::AssemblyBuilder::build).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssemblyError {
    /// Two nodes render to the same OSC path. Carries the offending path.
    DuplicatePath(String),
    /// A component or endpoint has an empty name.
    EmptyName,
}

impl fmt::Display for AssemblyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicatePath(path) => write!(f, "duplicate path {path}"),
            Self::EmptyName => write!(f, "empty name"),
        }
    }
}

impl std::error::Error for AssemblyError {}

impl From<AssemblyError> for Error {
    fn from(e: AssemblyError) -> Self {
        Self::Assembly(e)
    }
}

// ---------------------------------------------------------------------------
// Type-keyed lookup errors
// ---------------------------------------------------------------------------

/// Failures of the unique-by-type lookup over the component tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FindError {
    /// No node of the requested type exists in the tree.
    NotFound(&'static str),
    /// More than one node of the requested type exists in the tree.
    Ambiguous(&'static str),
}

impl fmt::Display for FindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound(ty) => write!(f, "no component of type {ty}"),
            Self::Ambiguous(ty) => write!(f, "more than one component of type {ty}"),
        }
    }
}

impl std::error::Error for FindError {}

impl From<FindError> for Error {
    fn from(e: FindError) -> Self {
        Self::Find(e)
    }
}

// ---------------------------------------------------------------------------
// OSC codec errors
// ---------------------------------------------------------------------------

/// Malformed inbound OSC packets. Affected packets are discarded with a
/// diagnostic; the receive loop continues.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodecError {
    /// The packet ended before a complete element could be read.
    Truncated,
    /// A string was not NUL-terminated within the packet.
    UnterminatedString,
    /// A string held bytes that are not valid UTF-8.
    BadString,
    /// The type tag string did not start with `,`.
    MissingTypeTag,
    /// The type tag string named an argument type this codec does not carry.
    UnsupportedType(char),
    /// A `#bundle` container was malformed.
    BadBundle,
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Truncated => write!(f, "truncated packet"),
            Self::UnterminatedString => write!(f, "unterminated string"),
            Self::BadString => write!(f, "string is not valid UTF-8"),
            Self::MissingTypeTag => write!(f, "missing type tag string"),
            Self::UnsupportedType(c) => write!(f, "unsupported argument type '{c}'"),
            Self::BadBundle => write!(f, "malformed bundle"),
        }
    }
}

impl std::error::Error for CodecError {}

impl From<CodecError> for Error {
    fn from(e: CodecError) -> Self {
        Self::Codec(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Crate-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
