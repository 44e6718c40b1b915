//! The game state machine.
//!
//! Every operation is a read-modify-write cycle against the session store:
//! load the full session, validate the transition, draw cards if needed,
//! mutate an in-memory copy, persist, and return the projected view.
//! Mutations are serialized per session id so concurrent actions against
//! the same session cannot drop each other's writes.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::error::{AdapterError, GameError};
use crate::session::{DEALER_NAME, Session, SessionId};
use crate::shoe::{CardSource, SHOE_DECKS};
use crate::store::SessionStore;
use crate::view::{ProjectedSession, project};

/// The rules engine for blackjack sessions.
///
/// Generic over its two collaborators: a [`CardSource`] providing shuffled
/// shoes and a [`SessionStore`] persisting session snapshots.
#[derive(Debug)]
pub struct GameEngine<C, S> {
    cards: C,
    store: S,
    locks: Mutex<HashMap<SessionId, Arc<Mutex<()>>>>,
}

impl<C: CardSource, S: SessionStore> GameEngine<C, S> {
    /// Creates an engine over the given collaborators.
    #[must_use]
    pub fn new(cards: C, store: S) -> Self {
        Self {
            cards,
            store,
            locks: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the serialization lock for one session id, creating it on
    /// first use. Locks for distinct sessions are independent.
    async fn session_lock(&self, id: SessionId) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock().await;
        locks.entry(id).or_default().clone()
    }

    async fn load_required(&self, id: SessionId) -> Result<Session, GameError> {
        self.store
            .load(id)
            .await?
            .ok_or(GameError::GameNotFound)
    }

    /// Creates a session: allocates a six-deck shoe, assigns the next id,
    /// and builds the roster with the synthetic dealer prepended.
    ///
    /// # Errors
    ///
    /// Returns an error if the session name or a player name is empty, a
    /// player name repeats (the name is the player identifier), or a
    /// collaborator fails.
    pub async fn create(&self, name: &str, players: &[String]) -> Result<SessionId, GameError> {
        if name.is_empty() || players.iter().any(|player| player.is_empty()) {
            return Err(GameError::EmptyName);
        }

        let mut seen = HashSet::from([DEALER_NAME]);
        for player in players {
            if !seen.insert(player.as_str()) {
                return Err(GameError::DuplicatePlayer);
            }
        }

        let shoe_id = self.cards.new_shoe(SHOE_DECKS).await?;
        let id = self.store.next_id().await?;
        let session = Session::new(id, name, shoe_id, players);
        self.store.save(&session).await?;

        info!(id, name, players = players.len(), "created session");
        Ok(id)
    }

    /// Returns the projected view of a session.
    ///
    /// Reads run unsynchronized against the latest committed snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if the session does not exist or the store fails.
    pub async fn get_by_id(&self, id: SessionId) -> Result<ProjectedSession, GameError> {
        Ok(project(&self.load_required(id).await?))
    }

    /// Deals the opening round: two cards to every player, dealer first.
    ///
    /// Draws `2 * players` cards (dealer included) in one batch so the draw
    /// order is well defined: player *i* receives draw offsets `2i` and
    /// `2i + 1` in arrival order. The dealer's first card stays hidden
    /// until [`Self::reveal_dealer`]; every other card is dealt face up.
    ///
    /// # Errors
    ///
    /// Returns an error if the session does not exist, the round was
    /// already dealt, `players` disagrees with the stored non-dealer
    /// roster, or a collaborator fails.
    pub async fn deal_round(
        &self,
        id: SessionId,
        players: &[String],
    ) -> Result<ProjectedSession, GameError> {
        let lock = self.session_lock(id).await;
        let _guard = lock.lock().await;

        let mut session = self.load_required(id).await?;
        if session.dealt {
            return Err(GameError::AlreadyDealt);
        }

        let roster: Vec<&str> = session.non_dealers().map(|p| p.name.as_str()).collect();
        if roster.len() != players.len()
            || roster
                .iter()
                .zip(players)
                .any(|(have, want)| *have != want.as_str())
        {
            return Err(GameError::RosterMismatch);
        }

        let count = session.players.len() * 2;
        let cards = self.cards.draw(&session.shoe_id, count).await?;

        for (player, pair) in session.players.iter_mut().zip(cards.chunks_exact(2)) {
            for (slot, card) in pair.iter().enumerate() {
                let mut card = card.clone();
                card.visible = !(player.is_dealer && slot == 0);
                player.hand.push(card);
            }
            player.refresh_total();
        }
        session.dealt = true;

        self.store.save(&session).await?;
        info!(id, cards = count, "dealt opening round");
        Ok(project(&session))
    }

    /// Draws one card face up for the named player and recomputes the total.
    ///
    /// # Errors
    ///
    /// Returns an error if the session does not exist, the round has not
    /// been dealt, the player is unknown, the player is already standing
    /// or busted, or a collaborator fails.
    pub async fn hit(&self, id: SessionId, player_name: &str) -> Result<ProjectedSession, GameError> {
        let lock = self.session_lock(id).await;
        let _guard = lock.lock().await;

        let mut session = self.load_required(id).await?;
        if !session.dealt {
            return Err(GameError::NotDealt);
        }

        // Validate the player before consuming from the shoe.
        {
            let player = session
                .player_mut(player_name)
                .ok_or(GameError::PlayerNotFound)?;
            if !player.is_active() {
                return Err(GameError::PlayerNotActive);
            }
        }

        let mut card = self
            .cards
            .draw(&session.shoe_id, 1)
            .await?
            .pop()
            .ok_or(AdapterError::ShortDraw {
                requested: 1,
                received: 0,
            })?;
        card.visible = true;

        let player = session
            .player_mut(player_name)
            .ok_or(GameError::PlayerNotFound)?;
        player.hand.push(card);
        player.refresh_total();
        let total = player.total;

        self.store.save(&session).await?;
        debug!(id, player = player_name, total, "hit");
        Ok(project(&session))
    }

    /// Marks the named player standing.
    ///
    /// Standing is monotonic: re-standing is an idempotent no-op.
    ///
    /// # Errors
    ///
    /// Returns an error if the session does not exist, the round has not
    /// been dealt, the player is unknown, or the store fails.
    pub async fn stand(
        &self,
        id: SessionId,
        player_name: &str,
    ) -> Result<ProjectedSession, GameError> {
        let lock = self.session_lock(id).await;
        let _guard = lock.lock().await;

        let mut session = self.load_required(id).await?;
        if !session.dealt {
            return Err(GameError::NotDealt);
        }

        let player = session
            .player_mut(player_name)
            .ok_or(GameError::PlayerNotFound)?;
        player.standing = true;

        self.store.save(&session).await?;
        debug!(id, player = player_name, "stand");
        Ok(project(&session))
    }

    /// Flips the dealer's hole card face up. Terminal transition.
    ///
    /// Legal only once every non-dealer player is standing or busted.
    /// Repeat calls succeed idempotently. Dealer play is not automated.
    ///
    /// # Errors
    ///
    /// Returns an error if the session does not exist, the round has not
    /// been dealt, a non-dealer player is still active, or the store fails.
    pub async fn reveal_dealer(&self, id: SessionId) -> Result<ProjectedSession, GameError> {
        let lock = self.session_lock(id).await;
        let _guard = lock.lock().await;

        let mut session = self.load_required(id).await?;
        if !session.dealt {
            return Err(GameError::NotDealt);
        }
        if !session.round_complete() {
            return Err(GameError::RoundNotComplete);
        }

        let dealer = session.dealer_mut().ok_or(GameError::PlayerNotFound)?;
        if !dealer.hand.reveal(0) {
            return Err(GameError::NotDealt);
        }

        self.store.save(&session).await?;
        info!(id, "revealed dealer hand");
        Ok(project(&session))
    }
}
