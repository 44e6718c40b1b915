//! View projection: the caller-facing session representation.
//!
//! Callers never see the raw identity of a hidden card. Projection is a
//! pure derivation from session state and is applied identically by every
//! operation that returns a session.

use serde::Serialize;

use crate::card::{Card, CardImages};
use crate::session::{Player, Session, SessionId};
use crate::shoe::ShoeId;

/// Placeholder shown for the code, value, and suit of a face-down card.
pub const FACE_DOWN: &str = "XX";

/// Card-back image shown for a face-down card.
pub const FACE_DOWN_IMAGE: &str = "https://www.deckofcardsapi.com/static/img/back.png";

/// A player as seen by callers: the hand is masked, the total is not.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectedPlayer {
    /// Player name.
    pub name: String,
    /// Whether this player is the dealer.
    #[serde(rename = "isDealer")]
    pub is_dealer: bool,
    /// The player's hand with hidden cards masked.
    pub hand: Vec<Card>,
    /// Hand total. Includes hidden cards; totals are never masked.
    pub total: u32,
    /// Whether the player is standing.
    #[serde(rename = "isStanding")]
    pub standing: bool,
}

/// A session as seen by callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectedSession {
    /// Session id.
    pub id: SessionId,
    /// Session display name.
    pub name: String,
    /// Shoe handle.
    #[serde(rename = "shoeId")]
    pub shoe_id: ShoeId,
    /// Whether the opening deal has happened.
    pub dealt: bool,
    /// Participants, dealer first, with masked hands.
    pub players: Vec<ProjectedPlayer>,
}

/// Returns the card as callers may see it.
///
/// A visible card passes through unchanged; a hidden card has its code,
/// value, suit, and image references replaced by the fixed face-down
/// placeholder. Masking is idempotent.
#[must_use]
pub fn mask(card: &Card) -> Card {
    if card.visible {
        return card.clone();
    }

    Card {
        code: FACE_DOWN.to_string(),
        value: FACE_DOWN.to_string(),
        suit: FACE_DOWN.to_string(),
        image: FACE_DOWN_IMAGE.to_string(),
        images: CardImages {
            svg: FACE_DOWN_IMAGE.to_string(),
            png: FACE_DOWN_IMAGE.to_string(),
        },
        visible: false,
    }
}

fn project_player(player: &Player) -> ProjectedPlayer {
    ProjectedPlayer {
        name: player.name.clone(),
        is_dealer: player.is_dealer,
        hand: player.hand.cards().iter().map(mask).collect(),
        total: player.total,
        standing: player.standing,
    }
}

/// Derives the caller-facing representation of a session.
#[must_use]
pub fn project(session: &Session) -> ProjectedSession {
    ProjectedSession {
        id: session.id,
        name: session.name.clone(),
        shoe_id: session.shoe_id.clone(),
        dealt: session.dealt,
        players: session.players.iter().map(project_player).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::{FACE_DOWN, FACE_DOWN_IMAGE, mask};
    use crate::card::{Card, CardImages};

    fn hidden_card() -> Card {
        Card {
            code: "AS".to_string(),
            value: "ACE".to_string(),
            suit: "SPADES".to_string(),
            image: "https://example.invalid/AS.png".to_string(),
            images: CardImages {
                svg: "https://example.invalid/AS.svg".to_string(),
                png: "https://example.invalid/AS.png".to_string(),
            },
            visible: false,
        }
    }

    #[test]
    fn hidden_cards_lose_their_identity() {
        let masked = mask(&hidden_card());
        assert_eq!(masked.code, FACE_DOWN);
        assert_eq!(masked.value, FACE_DOWN);
        assert_eq!(masked.suit, FACE_DOWN);
        assert_eq!(masked.image, FACE_DOWN_IMAGE);
        assert_eq!(masked.images.svg, FACE_DOWN_IMAGE);
        assert_eq!(masked.images.png, FACE_DOWN_IMAGE);
    }

    #[test]
    fn masking_is_idempotent_and_lossless_for_visible_cards() {
        let masked = mask(&hidden_card());
        assert_eq!(mask(&masked), masked);

        let mut visible = hidden_card();
        visible.visible = true;
        assert_eq!(mask(&visible), visible);
    }
}
