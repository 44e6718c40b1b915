//! Error types for session operations.

use thiserror::Error;

/// Errors from the external card source.
#[derive(Debug, Error)]
pub enum AdapterError {
    /// The card source was unreachable or returned a transport-level error.
    #[error("card source request failed: {0}")]
    Transport(#[from] reqwest::Error),
    /// The card source answered but reported failure.
    #[error("card source reported failure")]
    Failed,
    /// The card source returned a different number of cards than requested.
    #[error("short draw: requested {requested} cards, received {received}")]
    ShortDraw {
        /// Number of cards requested.
        requested: usize,
        /// Number of cards actually received.
        received: usize,
    },
}

/// Errors from the session store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A session snapshot could not be encoded or decoded.
    #[error("session codec failure: {0}")]
    Codec(#[from] serde_json::Error),
    /// The store backend failed.
    #[error("store backend failure: {0}")]
    Backend(String),
}

/// Errors surfaced by game operations.
///
/// Every error is returned synchronously as the outcome of the attempted
/// operation; the engine never retries and never commits partial state.
#[derive(Debug, Error)]
pub enum GameError {
    /// No session exists with the given id.
    #[error("game not found")]
    GameNotFound,
    /// No player in the session matches the given name.
    #[error("player not found")]
    PlayerNotFound,
    /// The round was already dealt.
    #[error("game already dealt")]
    AlreadyDealt,
    /// The round has not been dealt yet.
    #[error("game not dealt")]
    NotDealt,
    /// The player list does not match the session roster.
    #[error("player list does not match the session roster")]
    RosterMismatch,
    /// The player is already standing or busted.
    #[error("player is standing or busted")]
    PlayerNotActive,
    /// A session or player name was empty.
    #[error("name must not be empty")]
    EmptyName,
    /// Two players in the session share a name.
    #[error("duplicate player name")]
    DuplicatePlayer,
    /// A non-dealer player is still active.
    #[error("all players must stand or bust before revealing the dealer hand")]
    RoundNotComplete,
    /// The external card source failed.
    #[error(transparent)]
    Adapter(#[from] AdapterError),
    /// The session store failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}
