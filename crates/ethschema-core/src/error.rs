use std::fmt;

/// Boxed upstream cause retained by translated errors.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Revert reason emitted by the registry when the (owner, schema id) pair is taken.
pub const SCHEMA_EXISTS: &str = "SCHEMA_EXISTS";

/// Revert reason emitted when the signer lacks administrative ownership.
pub const NOT_OWNER: &str = "NOT_OWNER";

/// Revert reason emitted when ownership would be transferred to the zero address.
pub const INVALID_OWNER: &str = "INVALID_OWNER";

/// Machine-readable error code carried by every [`RegistryError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    Validation,
    Contract,
    Network,
}

impl ErrorCode {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::Validation => "VALIDATION_ERROR",
            ErrorCode::Contract => "CONTRACT_ERROR",
            ErrorCode::Network => "NETWORK_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors surfaced by every public registry operation.
///
/// The set is closed: any failure, wherever it originates, reaches the caller
/// as exactly one of these variants.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// Input was rejected before any network interaction took place.
    #[error("validation failed: {message}")]
    Validation {
        message: String,
        #[source]
        source: Option<BoxError>,
    },

    /// The registry executed the call and rejected it, or the mined
    /// transaction reported a failure status.
    #[error("contract call failed: {message}")]
    Contract {
        message: String,
        reason: Option<String>,
        #[source]
        source: Option<BoxError>,
    },

    /// The call could not be completed because of a connectivity or provider failure.
    #[error("network error: {message}")]
    Network {
        message: String,
        #[source]
        source: Option<BoxError>,
    },
}

pub type Result<T> = std::result::Result<T, RegistryError>;

impl RegistryError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            source: None,
        }
    }

    /// Validation failure that keeps the parser or compiler error as its cause.
    pub fn validation_with_source(message: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self::Validation {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    pub fn contract(message: impl Into<String>, reason: Option<String>) -> Self {
        Self::Contract {
            message: message.into(),
            reason,
            source: None,
        }
    }

    /// Translate a collaborator failure into the typed taxonomy.
    ///
    /// A revert reason wins over the network flag; anything else becomes a
    /// generic contract error carrying the raw message. The raw failure is kept
    /// as the source in every case.
    pub fn from_raw(raw: RawFailure) -> Self {
        if let Some(reason) = raw.revert_reason.clone() {
            return Self::Contract {
                message: raw.message.clone(),
                reason: Some(reason),
                source: Some(Box::new(raw)),
            };
        }

        if raw.network {
            return Self::Network {
                message: raw.message.clone(),
                source: Some(Box::new(raw)),
            };
        }

        Self::Contract {
            message: raw.message.clone(),
            reason: None,
            source: Some(Box::new(raw)),
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            RegistryError::Validation { .. } => ErrorCode::Validation,
            RegistryError::Contract { .. } => ErrorCode::Contract,
            RegistryError::Network { .. } => ErrorCode::Network,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            RegistryError::Validation { message, .. }
            | RegistryError::Contract { message, .. }
            | RegistryError::Network { message, .. } => message,
        }
    }

    /// Revert reason reported by the registry, if any.
    pub fn revert_reason(&self) -> Option<&str> {
        match self {
            RegistryError::Contract { reason, .. } => reason.as_deref(),
            _ => None,
        }
    }

    /// Only transport failures may succeed when repeated unchanged.
    pub fn is_retryable(&self) -> bool {
        matches!(self, RegistryError::Network { .. })
    }
}

/// Failure shape reported by a registry backend before translation.
#[derive(Debug)]
pub struct RawFailure {
    pub message: String,
    pub revert_reason: Option<String>,
    pub network: bool,
    pub source: Option<BoxError>,
}

impl RawFailure {
    pub fn reverted(reason: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            revert_reason: Some(reason.into()),
            network: false,
            source: None,
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            revert_reason: None,
            network: true,
            source: None,
        }
    }

    pub fn other(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            revert_reason: None,
            network: false,
            source: None,
        }
    }

    pub fn with_source(mut self, source: impl Into<BoxError>) -> Self {
        self.source = Some(source.into());
        self
    }
}

impl fmt::Display for RawFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for RawFailure {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_deref()
            .map(|err| err as &(dyn std::error::Error + 'static))
    }
}
