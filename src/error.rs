use std::fmt;

use thiserror::Error;

/// Binding-layer code: the primitive failed its one-time initialization.
pub const BINDING_INIT_FAILED: i32 = 1;
/// Binding-layer code: the primitive reported an error with no known mapping.
pub const BINDING_UNRECOGNIZED: i32 = 2;
/// Binding-layer code: the OS random generator could not supply salt bytes.
pub const BINDING_RNG_UNAVAILABLE: i32 = 3;

/// Errors surfaced by the façade.
///
/// `InvalidConfiguration` and `InvalidArgument` are programming errors at the
/// call site. `PrimitiveFailure` is environmental (usually a resource limit)
/// and retrying with the same parameters will most likely fail again.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Argon2Error {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("({code}) {message}")]
    PrimitiveFailure { code: i32, message: String },
}

pub type Result<T> = std::result::Result<T, Argon2Error>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidConfiguration,
    InvalidArgument,
    PrimitiveFailure,
}

/// Which layer assigned a failure code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Origin {
    /// Negative codes, reported by the hashing primitive itself.
    Primitive,
    /// Positive codes, assigned by this crate for faults it detects around the primitive.
    Binding,
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Origin::Primitive => write!(f, "primitive"),
            Origin::Binding => write!(f, "binding"),
        }
    }
}

impl Argon2Error {
    pub(crate) fn invalid_argument(msg: impl Into<String>) -> Self {
        Argon2Error::InvalidArgument(msg.into())
    }

    pub(crate) fn invalid_configuration(msg: impl Into<String>) -> Self {
        Argon2Error::InvalidConfiguration(msg.into())
    }

    /// Failure reported by the primitive. `code` must be negative.
    pub fn primitive(code: i32, message: impl Into<String>) -> Self {
        debug_assert!(code < 0, "primitive failure codes are negative, got {code}");
        Argon2Error::PrimitiveFailure {
            code,
            message: message.into(),
        }
    }

    /// Failure detected by the binding around the primitive. `code` must be
    /// positive.
    pub fn binding(code: i32, message: impl Into<String>) -> Self {
        debug_assert!(code > 0, "binding failure codes are positive, got {code}");
        Argon2Error::PrimitiveFailure {
            code,
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Argon2Error::InvalidConfiguration(_) => ErrorKind::InvalidConfiguration,
            Argon2Error::InvalidArgument(_) => ErrorKind::InvalidArgument,
            Argon2Error::PrimitiveFailure { .. } => ErrorKind::PrimitiveFailure,
        }
    }

    /// The signed failure code, present only for `PrimitiveFailure`.
    pub fn code(&self) -> Option<i32> {
        match self {
            Argon2Error::PrimitiveFailure { code, .. } => Some(*code),
            _ => None,
        }
    }

    /// Attributes a coded failure to the primitive (negative) or the binding (positive).
    pub fn origin(&self) -> Option<Origin> {
        match self.code()? {
            c if c < 0 => Some(Origin::Primitive),
            c if c > 0 => Some(Origin::Binding),
            _ => None,
        }
    }
}
