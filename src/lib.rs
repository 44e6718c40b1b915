//! A server-side blackjack session engine.
//!
//! The crate provides a [`GameEngine`] that tracks concurrent game
//! sessions, advances each through a fixed sequence of round phases
//! (created, dealt, revealed), enforces the table rules, and persists
//! state between player actions. Cards come from a pluggable
//! [`CardSource`] and sessions live in a pluggable [`SessionStore`];
//! mutations against one session are serialized so racing actions cannot
//! drop each other's writes.
//!
//! Callers only ever see [`ProjectedSession`] views, with the dealer's
//! hole card masked until [`GameEngine::reveal_dealer`].
//!
//! # Example
//!
//! ```no_run
//! use holecard::{GameEngine, InMemoryStore, SeededShoe};
//!
//! # async fn run() -> Result<(), holecard::GameError> {
//! let engine = GameEngine::new(SeededShoe::new(42), InMemoryStore::new());
//! let players = vec!["Alice".to_string(), "Bob".to_string()];
//!
//! let id = engine.create("Friday night", &players).await?;
//! let view = engine.deal_round(id, &players).await?;
//! assert!(view.dealt);
//! # Ok(())
//! # }
//! ```

pub mod card;
pub mod engine;
pub mod error;
pub mod hand;
pub mod session;
pub mod shoe;
pub mod store;
pub mod view;

// Re-export main types
pub use card::{Card, CardImages, DECK_SIZE, card_value};
pub use engine::GameEngine;
pub use error::{AdapterError, GameError, StoreError};
pub use hand::Hand;
pub use session::{DEALER_NAME, Player, Session, SessionId};
pub use shoe::{
    CardSource, DECK_API_BASE_URL, DeckOfCardsClient, SHOE_DECKS, SeededShoe, ShoeId,
};
pub use store::{InMemoryStore, SessionStore};
pub use view::{FACE_DOWN, FACE_DOWN_IMAGE, ProjectedPlayer, ProjectedSession, mask, project};
