//! The game's error hierarchy.
//!
//! Every layer (repositories, services, commands) returns [`RpgResult`]. Errors are
//! caught at the command boundary and turned into an error embed using
//! [`RpgError::user_message`]; transient database failures are retried before they
//! ever get that far (see `database::retry`).

use chrono::Duration;
use thiserror::Error;

pub type RpgResult<T> = Result<T, RpgError>;

#[derive(Error, Debug)]
pub enum RpgError {
    /// Input failed a business rule (bad tier, wrong element, name too long...).
    #[error("{0}")]
    Validation(String),

    /// The player cannot afford an action.
    #[error("insufficient {resource}: need {required}, have {available}")]
    InsufficientResources {
        resource: &'static str,
        required: i64,
        available: i64,
    },

    /// A referenced row does not exist (or is not owned by the caller).
    #[error("{0} not found")]
    NotFound(String),

    /// The action is gated by a cooldown that has not elapsed yet.
    #[error("{action} is on cooldown")]
    Cooldown {
        action: &'static str,
        remaining: Duration,
    },

    /// The caller lacks the rank or role needed for an action.
    #[error("{0}")]
    Forbidden(String),

    /// Another request for the same action is still being processed.
    #[error("action already in progress")]
    Busy,

    #[error("configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Database(#[from] sqlx::Error),

    #[error(transparent)]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error(transparent)]
    Redis(#[from] redis::RedisError),

    /// Boxed because `serenity::Error` is large.
    #[error(transparent)]
    Discord(Box<serenity::Error>),

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    #[error("{0}")]
    Internal(String),
}

impl From<serenity::Error> for RpgError {
    fn from(err: serenity::Error) -> Self {
        RpgError::Discord(Box::new(err))
    }
}

/// SQLSTATE classes/codes that are worth another attempt.
const TRANSIENT_SQLSTATES: &[&str] = &["40001", "40P01", "57P01", "57P02", "57P03", "53300"];

impl RpgError {
    pub fn validation(msg: impl Into<String>) -> Self {
        RpgError::Validation(msg.into())
    }

    pub fn not_found(what: impl Into<String>) -> Self {
        RpgError::NotFound(what.into())
    }

    pub fn forbidden(msg: impl Into<String>) -> Self {
        RpgError::Forbidden(msg.into())
    }

    pub fn insufficient(resource: &'static str, required: i64, available: i64) -> Self {
        RpgError::InsufficientResources {
            resource,
            required,
            available,
        }
    }

    /// True when retrying the same operation might succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            RpgError::Database(err) => is_transient_sqlx(err),
            RpgError::Redis(err) => err.is_io_error() || err.is_timeout(),
            _ => false,
        }
    }

    /// True for errors caused by the player rather than the system.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            RpgError::Validation(_)
                | RpgError::InsufficientResources { .. }
                | RpgError::NotFound(_)
                | RpgError::Cooldown { .. }
                | RpgError::Forbidden(_)
                | RpgError::Busy
        )
    }

    /// Text shown to the player. Internal failures never leak details.
    pub fn user_message(&self) -> String {
        match self {
            RpgError::Validation(msg) | RpgError::Forbidden(msg) => msg.clone(),
            RpgError::InsufficientResources {
                resource,
                required,
                available,
            } => format!(
                "You need **{}** {} but only have **{}**.",
                required, resource, available
            ),
            RpgError::NotFound(what) => format!("Could not find {}.", what),
            RpgError::Cooldown { action, remaining } => format!(
                "{} is on cooldown. Try again in **{}**.",
                capitalize(action),
                format_duration(*remaining)
            ),
            RpgError::Busy => "Still processing your last action, hang on a moment.".to_string(),
            _ => "Something went wrong on our side. Please try again.".to_string(),
        }
    }

    /// Short embed title matching the error category.
    pub fn title(&self) -> &'static str {
        match self {
            RpgError::Validation(_) => "Invalid Action",
            RpgError::InsufficientResources { .. } => "Insufficient Resources",
            RpgError::NotFound(_) => "Not Found",
            RpgError::Cooldown { .. } => "On Cooldown",
            RpgError::Forbidden(_) => "Not Allowed",
            RpgError::Busy => "Please Wait",
            _ => "Error",
        }
    }
}

fn is_transient_sqlx(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => true,
        sqlx::Error::Database(db) => db
            .code()
            .map(|code| {
                let code: &str = &code;
                code.starts_with("08") || TRANSIENT_SQLSTATES.contains(&code)
            })
            .unwrap_or(false),
        _ => false,
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Formats a `chrono::Duration` into a compact, user-friendly string.
pub fn format_duration(dur: Duration) -> String {
    let hours = dur.num_hours();
    let minutes = dur.num_minutes() % 60;
    let seconds = dur.num_seconds() % 60;

    let mut parts = Vec::new();
    if hours > 0 {
        parts.push(format!("{}h", hours));
    }
    if minutes > 0 {
        parts.push(format!("{}m", minutes));
    }
    if seconds > 0 && hours == 0 {
        parts.push(format!("{}s", seconds));
    }

    if parts.is_empty() {
        "less than a second".to_string()
    } else {
        parts.join(" ")
    }
}
