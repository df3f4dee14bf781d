use thiserror::Error;

// ─── Top-level error hierarchy ───────────────────────────────────────────────

/// Structured error hierarchy for `bookwise`.
///
/// Each subsystem defines its own error variant. Library callers can match on
/// these to decide recovery strategy; application glue continues to use
/// `anyhow::Result` for ad-hoc context chains.
///
/// Form validation failures are deliberately absent: they are values
/// ([`crate::validation::ValidationOutcome`]), not errors.
#[derive(Debug, Error)]
pub enum BookwiseError {
    // ── Config ───────────────────────────────────────────────────────────
    #[error("config: {0}")]
    Config(#[from] ConfigError),

    // ── Remote API ──────────────────────────────────────────────────────
    #[error("api: {0}")]
    Api(#[from] ApiError),

    // ── Avatar asset ────────────────────────────────────────────────────
    #[error("asset: {0}")]
    Asset(#[from] AssetError),

    // ── Session store ───────────────────────────────────────────────────
    #[error("session: {0}")]
    Session(#[from] SessionError),

    // ── Form schema construction ────────────────────────────────────────
    #[error("schema: {0}")]
    Schema(#[from] SchemaError),

    // ── Generic fallthrough (wraps anyhow for interop) ──────────────────
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// ─── Config errors ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load config: {0}")]
    Load(String),

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

// ─── Remote API errors ──────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request to {path} failed: {message}")]
    Transport { path: String, message: String },

    #[error("server rejected {path} ({status}): {body}")]
    Server {
        path: String,
        status: u16,
        body: String,
    },

    #[error("unexpected response from {path}: {message}")]
    Decode { path: String, message: String },
}

impl ApiError {
    /// HTTP status of a server-side rejection, if this is one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Server { status, .. } => Some(*status),
            Self::Transport { .. } | Self::Decode { .. } => None,
        }
    }
}

// ─── Avatar asset errors ────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("could not read asset: {0}")]
    Pick(String),

    #[error("unsupported asset type {mime_type}; expected an image")]
    Unsupported { mime_type: String },

    #[error("asset is {size} bytes, limit is {limit}")]
    TooLarge { size: usize, limit: usize },
}

// ─── Session errors ─────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("no signed-in user")]
    NotSignedIn,

    #[error("store: {0}")]
    Store(String),
}

// ─── Schema errors ──────────────────────────────────────────────────────────

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SchemaError {
    #[error("field {0} declared twice")]
    DuplicateField(String),
}

// ─── Convenience re-exports ─────────────────────────────────────────────────

/// Shorthand result type for the crate.
pub type Result<T> = std::result::Result<T, BookwiseError>;
