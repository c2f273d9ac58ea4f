use thiserror::Error;

/// Errors raised while building a Petri net or playing the token game on it.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NetError {
    #[error("duplicate node name in net: {0}")]
    DuplicateNode(String),

    #[error("arc references unknown node: {0}")]
    UnknownNode(String),

    #[error("arc {from} -> {to} must connect a place and a transition")]
    InvalidArc { from: String, to: String },

    #[error("arc {from} -> {to} has zero weight")]
    ZeroWeight { from: String, to: String },

    #[error("marking references unknown place: {0}")]
    UnknownPlace(String),

    #[error("transition {0} does not belong to this net")]
    UnknownTransition(String),

    #[error("transition {0} is not enabled in the current marking")]
    NotEnabled(String),
}
