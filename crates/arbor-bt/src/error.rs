use thiserror::Error;

/// Misuse of the tree.
///
/// These are contract violations, not runtime outcomes: missing data and unmet goals are
/// reported through [`Status`](crate::Status) instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BtError {
    #[error("node `{node}` was ticked before setup")]
    NotSetUp { node: String },

    #[error("node `{node}` was set up twice")]
    AlreadySetUp { node: String },

    #[error("invalid configuration for `{node}`: {reason}")]
    InvalidConfig { node: String, reason: String },
}

pub type Result<T> = std::result::Result<T, BtError>;
