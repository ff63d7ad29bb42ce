use serde::{Deserialize, Serialize};

/// Backend identifiers are database integer keys.
macro_rules! define_id {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            pub fn new(value: i64) -> Self {
                Self(value)
            }

            pub fn value(&self) -> i64 {
                self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl std::str::FromStr for $name {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim().parse::<i64>().map(Self).map_err(|_| {
                    DomainError::Validation(format!(
                        "Invalid {}: {}",
                        stringify!($name),
                        s
                    ))
                })
            }
        }
    };
}

define_id!(ProjectId);
define_id!(CommentId);
define_id!(DonationId);
define_id!(UserId);

/// Error codes for structured error handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCode {
    // Authentication (1xxx)
    SessionExpired = 1002,

    // Resource Not Found (2xxx)
    NotFound = 2001,

    // Payments (3xxx)
    GatewayUnavailable = 3001,
    OrderCreationFailed = 3002,
    PaymentVerificationFailed = 3003,
    InvalidFlowState = 3004,

    // Data & Persistence (4xxx)
    RepositoryError = 4001,
    SerializationError = 4004,

    // Infrastructure (5xxx)
    InfrastructureError = 5001,
    RequestFailed = 5002,

    // Validation (6xxx)
    ValidationError = 6001,
}

impl ErrorCode {
    /// Get error code as integer
    pub fn code(&self) -> u16 {
        *self as u16
    }

    /// Get error severity
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            ErrorCode::SessionExpired
            | ErrorCode::GatewayUnavailable
            | ErrorCode::OrderCreationFailed
            | ErrorCode::RequestFailed => ErrorSeverity::Warning,

            ErrorCode::NotFound | ErrorCode::ValidationError => ErrorSeverity::Info,

            ErrorCode::PaymentVerificationFailed
            | ErrorCode::RepositoryError
            | ErrorCode::SerializationError
            | ErrorCode::InfrastructureError => ErrorSeverity::Error,

            ErrorCode::InvalidFlowState => ErrorSeverity::Critical,
        }
    }

    /// Check if the user can recover by simply trying again
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            ErrorCode::GatewayUnavailable
                | ErrorCode::OrderCreationFailed
                | ErrorCode::RequestFailed
                | ErrorCode::ValidationError
        )
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Session expired: {0}")]
    SessionExpired(String),

    #[error("Payment gateway unavailable: {0}")]
    GatewayUnavailable(String),

    #[error("Order creation failed: {0}")]
    OrderCreationFailed(String),

    #[error("Payment verification failed: {0}")]
    PaymentVerificationFailed(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Repository error: {0}")]
    Repository(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Infrastructure error: {0}")]
    Infrastructure(String),
}

impl DomainError {
    /// Get error code
    pub fn code(&self) -> ErrorCode {
        match self {
            DomainError::Validation(_) => ErrorCode::ValidationError,
            DomainError::SessionExpired(_) => ErrorCode::SessionExpired,
            DomainError::GatewayUnavailable(_) => ErrorCode::GatewayUnavailable,
            DomainError::OrderCreationFailed(_) => ErrorCode::OrderCreationFailed,
            DomainError::PaymentVerificationFailed(_) => ErrorCode::PaymentVerificationFailed,
            DomainError::RequestFailed(_) => ErrorCode::RequestFailed,
            DomainError::NotFound(_) => ErrorCode::NotFound,
            DomainError::InvalidState(_) => ErrorCode::InvalidFlowState,
            DomainError::Repository(_) => ErrorCode::RepositoryError,
            DomainError::Serialization(_) => ErrorCode::SerializationError,
            DomainError::Infrastructure(_) => ErrorCode::InfrastructureError,
        }
    }

    /// The human-readable message, without the category prefix
    pub fn message(&self) -> &str {
        match self {
            DomainError::Validation(msg)
            | DomainError::SessionExpired(msg)
            | DomainError::GatewayUnavailable(msg)
            | DomainError::OrderCreationFailed(msg)
            | DomainError::PaymentVerificationFailed(msg)
            | DomainError::RequestFailed(msg)
            | DomainError::NotFound(msg)
            | DomainError::InvalidState(msg)
            | DomainError::Repository(msg)
            | DomainError::Serialization(msg)
            | DomainError::Infrastructure(msg) => msg,
        }
    }

    /// Get error severity
    pub fn severity(&self) -> ErrorSeverity {
        self.code().severity()
    }

    /// Check if error is recoverable
    pub fn is_recoverable(&self) -> bool {
        self.code().is_recoverable()
    }

    pub fn is_session_expired(&self) -> bool {
        matches!(self, DomainError::SessionExpired(_))
    }

    /// Format error with code
    pub fn format_with_code(&self) -> String {
        format!("[{}] {}", self.code().code(), self)
    }
}

impl From<serde_json::Error> for DomainError {
    fn from(err: serde_json::Error) -> Self {
        DomainError::Serialization(err.to_string())
    }
}
