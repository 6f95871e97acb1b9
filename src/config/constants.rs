//! Application-wide constants
//!
//! Centralized location for magic values to improve maintainability.

// =============================================================================
// Authentication & Security
// =============================================================================

/// Default token signing algorithm identifier
pub const DEFAULT_ALGORITHM: &str = "HS256";

/// Default access token lifetime in minutes
pub const DEFAULT_ACCESS_TOKEN_EXPIRE_MINUTES: i64 = 60;

/// Longest accepted access token lifetime in minutes (ten years)
pub const MAX_ACCESS_TOKEN_EXPIRE_MINUTES: i64 = 60 * 24 * 365 * 10;

/// Minimum signing key length (security requirement)
pub const MIN_SECRET_KEY_LENGTH: usize = 32;

/// Seconds per minute (for token expiration calculation)
pub const SECONDS_PER_MINUTE: i64 = 60;

/// Authorization scheme accepted for bearer tokens (matched case-insensitively)
pub const BEARER_SCHEME: &str = "Bearer";

/// Token type reported to clients after login
pub const TOKEN_TYPE_BEARER: &str = "bearer";

// =============================================================================
// Server Configuration
// =============================================================================

/// Default project name shown in logs and API docs
pub const DEFAULT_PROJECT_NAME: &str = "Todo API";

/// Default server host address
pub const DEFAULT_SERVER_HOST: &str = "0.0.0.0";

/// Default server port
pub const DEFAULT_SERVER_PORT: u16 = 8000;

/// Prefix for all versioned API routes
pub const API_V1_PREFIX: &str = "/api/v1";

// =============================================================================
// Database
// =============================================================================

/// Default database connection URL (local SQLite file, created on demand)
pub const DEFAULT_DATABASE_URL: &str = "sqlite://todo.db?mode=rwc";
