/// Column headers for the exported sheet, in storage order
pub const SHEET_HEADER: [&str; 7] = [
    "Timestamp",
    "Email",
    "Source",
    "User Agent",
    "Referrer",
    "Screen Resolution",
    "Timezone",
];

/// Fallback when a submission carries no source
pub const DEFAULT_SOURCE: &str = "dvand-waitlist";

/// Fallback when a submission carries no user agent
pub const DEFAULT_USER_AGENT: &str = "Unknown";

/// Fallback when a submission carries no referrer
pub const DEFAULT_REFERRER: &str = "direct";

/// Fallback when a submission carries no screen resolution
pub const DEFAULT_SCREEN_RESOLUTION: &str = "unknown";

/// Fallback when a submission carries no timezone
pub const DEFAULT_TIMEZONE: &str = "unknown";

/// Maximum signup attempts per email within one rate-limit window
pub const MAX_ATTEMPTS_PER_WINDOW: u32 = 3;

/// Rate-limit window in seconds (1 hour); also the attempt-counter TTL
pub const RATE_LIMIT_TTL_SECS: u64 = 3600;

/// Cache key prefix for per-email attempt counters
pub const RATE_LIMIT_KEY_PREFIX: &str = "rate_limit_";

// =============================================================================
// Response Messages
// =============================================================================

/// Success message for an accepted signup
pub const MSG_SIGNUP_OK: &str = "Successfully added to waitlist";

/// Rejection message when the attempt counter is exhausted
pub const MSG_RATE_LIMITED: &str = "Too many requests. Please try again later.";

/// Rejection message for a malformed email address
pub const MSG_INVALID_EMAIL: &str = "Invalid email format";

/// Rejection message when the spam heuristic fires. Deliberately vague so
/// the heuristic is not advertised.
pub const MSG_SPAM_SUSPECTED: &str = "Please use a valid email address";

/// Prefix of the duplicate-signup rejection; the original signup date is
/// appended.
pub const MSG_DUPLICATE_PREFIX: &str = "Email already registered on";

/// Generic message for anything unexpected; details stay in the log
pub const MSG_SERVER_ERROR: &str = "Server error occurred";

/// Health action response
pub const MSG_HEALTHY: &str = "API is healthy";

/// Default banner for the read-side endpoint
pub const MSG_API_RUNNING: &str = "Dvand Waitlist API is running";

/// Stats action success message
pub const MSG_STATS_RETRIEVED: &str = "Stats retrieved";

/// Export action success message
pub const MSG_DATA_EXPORTED: &str = "Data exported";
