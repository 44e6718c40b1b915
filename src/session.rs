//! Session and player data model.

use serde::{Deserialize, Serialize};

use crate::hand::Hand;
use crate::shoe::ShoeId;

/// Unique, monotonically assigned session identifier.
pub type SessionId = u64;

/// Reserved name of the synthetic dealer player.
pub const DEALER_NAME: &str = "Dealer";

/// One participant in a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    /// Player name; unique within a session and used as the identifier.
    pub name: String,
    /// Whether this player is the dealer. Exactly one player per session
    /// has this set, always at index 0.
    #[serde(rename = "isDealer")]
    pub is_dealer: bool,
    /// The player's hand.
    pub hand: Hand,
    /// Persisted hand total, recomputed after every hand mutation.
    pub total: u32,
    /// Whether the player is standing. Monotonic: never cleared once set.
    #[serde(rename = "isStanding")]
    pub standing: bool,
}

impl Player {
    /// Creates a player with an empty hand.
    #[must_use]
    pub fn new(name: impl Into<String>, is_dealer: bool) -> Self {
        Self {
            name: name.into(),
            is_dealer,
            hand: Hand::new(),
            total: 0,
            standing: false,
        }
    }

    /// Recomputes the persisted total from the current hand.
    pub fn refresh_total(&mut self) {
        self.total = self.hand.total();
    }

    /// Returns whether the player has busted.
    #[must_use]
    pub const fn is_busted(&self) -> bool {
        self.total > 21
    }

    /// Returns whether the player can still act this round.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        !self.standing && !self.is_busted()
    }
}

/// One in-progress blackjack round and its participants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Unique session id.
    pub id: SessionId,
    /// Display name for the session.
    pub name: String,
    /// Handle to the external shoe this session draws from.
    #[serde(rename = "shoeId")]
    pub shoe_id: ShoeId,
    /// Whether the opening deal has happened. Set once, never reset.
    pub dealt: bool,
    /// Participants, dealer first.
    pub players: Vec<Player>,
}

impl Session {
    /// Creates a fresh session with the dealer prepended to the given
    /// player names, all hands empty and nothing dealt yet.
    #[must_use]
    pub fn new(id: SessionId, name: impl Into<String>, shoe_id: ShoeId, players: &[String]) -> Self {
        let mut roster = Vec::with_capacity(players.len() + 1);
        roster.push(Player::new(DEALER_NAME, true));
        roster.extend(players.iter().map(|name| Player::new(name.clone(), false)));

        Self {
            id,
            name: name.into(),
            shoe_id,
            dealt: false,
            players: roster,
        }
    }

    /// Looks up the dealer.
    ///
    /// Returns `None` only if the session invariant is broken.
    #[must_use]
    pub fn dealer_mut(&mut self) -> Option<&mut Player> {
        self.players.iter_mut().find(|player| player.is_dealer)
    }

    /// Looks up a player by exact name match.
    #[must_use]
    pub fn player_mut(&mut self, name: &str) -> Option<&mut Player> {
        self.players.iter_mut().find(|player| player.name == name)
    }

    /// Iterates over the non-dealer players.
    pub fn non_dealers(&self) -> impl Iterator<Item = &Player> {
        self.players.iter().filter(|player| !player.is_dealer)
    }

    /// Returns whether every non-dealer player is standing or busted.
    #[must_use]
    pub fn round_complete(&self) -> bool {
        self.non_dealers()
            .all(|player| player.standing || player.is_busted())
    }
}

#[cfg(test)]
mod tests {
    use super::{DEALER_NAME, Session};
    use crate::shoe::ShoeId;

    #[test]
    fn new_session_prepends_dealer() {
        let session = Session::new(
            1,
            "T1",
            ShoeId::from("shoe-1"),
            &["Alice".to_string(), "Bob".to_string()],
        );

        assert_eq!(session.players.len(), 3);
        assert_eq!(session.players[0].name, DEALER_NAME);
        assert!(session.players[0].is_dealer);
        assert_eq!(
            session.players.iter().filter(|p| p.is_dealer).count(),
            1
        );
        assert!(!session.dealt);
        assert!(session.players.iter().all(|p| p.hand.is_empty()));
    }

    #[test]
    fn round_complete_ignores_dealer() {
        let mut session = Session::new(
            1,
            "T1",
            ShoeId::from("shoe-1"),
            &["Alice".to_string(), "Bob".to_string()],
        );

        assert!(!session.round_complete());

        session.player_mut("Alice").unwrap().standing = true;
        assert!(!session.round_complete());

        session.player_mut("Bob").unwrap().total = 22;
        assert!(session.round_complete());
    }
}
