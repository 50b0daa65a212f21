//! Structured logging field name constants for jotter.
//!
//! All crates use these constants for consistent structured logging fields
//! so log queries can filter on the same names across the api and db layers.
//!
//! ## Log Level Contract
//!
//! | Level | Usage |
//! |-------|-------|
//! | ERROR | Storage failure, request answered with 500 |
//! | WARN  | Recoverable issue (expired session, malformed cookie) |
//! | INFO  | Lifecycle events, completed mutations |
//! | DEBUG | Decision points (intent routing, validation failures) |
//! | TRACE | Per-row iteration |

// ─── Identity fields ───────────────────────────────────────────────────────

/// Correlation ID propagated from the `x-request-id` header.
pub const REQUEST_ID: &str = "request_id";

/// Subsystem originating the log event ("api", "db").
pub const SUBSYSTEM: &str = "subsystem";

/// Logical operation name ("create", "update", "delete", "resolve_session").
pub const OPERATION: &str = "op";

// ─── Entity fields ─────────────────────────────────────────────────────────

/// Resolved caller identity.
pub const USER_ID: &str = "user_id";

/// Note UUID being operated on.
pub const NOTE_ID: &str = "note_id";

/// Discriminant value read from a mutating request.
pub const INTENT: &str = "intent";

/// Field that failed validation.
pub const FIELD: &str = "field";

// ─── Measurement fields ────────────────────────────────────────────────────

/// Wall-clock duration in milliseconds.
pub const DURATION_MS: &str = "duration_ms";

/// Number of rows returned by a list query.
pub const RESULT_COUNT: &str = "result_count";

// ─── Outcome fields ────────────────────────────────────────────────────────

/// Error message when an operation fails.
pub const ERROR_MSG: &str = "error";
