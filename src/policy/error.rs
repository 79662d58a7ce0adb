use std::fmt;

/// CORS policy violation.
///
/// Raised while configuring response headers for a classified request. Only
/// the allowed-methods step raises eagerly; origin and header mismatches
/// are absorbed as header-omission no-ops, and the resolver's deny policy
/// funnels unrecognized origins into the same method gate so they surface
/// here too. The surrounding HTTP layer is responsible for turning a
/// violation into an error response; nothing is retried or recovered
/// internally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorsError {
    /// The request `Origin` is not covered by the policy's allowed origins.
    OriginNotAllowed {
        /// The rejected origin value
        origin: String,
    },
    /// The `Access-Control-Request-Method` is not covered by the policy's
    /// allowed methods.
    MethodNotAllowed {
        /// The rejected method value
        method: String,
    },
    /// A requested header is not covered by the policy's allowed headers.
    HeaderNotAllowed {
        /// The rejected header list value
        header: String,
    },
}

impl fmt::Display for CorsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CorsError::OriginNotAllowed { origin } => {
                write!(f, "[{origin}] origin not allowed")
            }
            CorsError::MethodNotAllowed { method } => {
                write!(f, "[{method}] method not allowed")
            }
            CorsError::HeaderNotAllowed { header } => {
                write!(f, "[{header}] header not allowed")
            }
        }
    }
}

impl std::error::Error for CorsError {}
