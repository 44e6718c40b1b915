//! Hand representation: an append-only card sequence with a derived total.

use serde::{Deserialize, Serialize};

use crate::card::{Card, card_value};

/// An ordered sequence of cards belonging to one player.
///
/// Cards are append-only: they are never removed or reordered once dealt.
/// The hand serializes transparently as a card array.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Hand {
    cards: Vec<Card>,
}

impl Hand {
    /// Creates a new empty hand.
    #[must_use]
    pub const fn new() -> Self {
        Self { cards: Vec::new() }
    }

    /// Appends a card to the hand.
    pub fn push(&mut self, card: Card) {
        self.cards.push(card);
    }

    /// Returns the cards in the hand, in deal order.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Calculates the total of the hand under the fixed valuation rule.
    ///
    /// Hidden cards contribute to the total; the total is never masked.
    #[must_use]
    pub fn total(&self) -> u32 {
        self.cards.iter().map(|card| card_value(&card.value)).sum()
    }

    /// Marks the card at `index` face up.
    ///
    /// Returns `false` if no card exists at that index.
    pub fn reveal(&mut self, index: usize) -> bool {
        match self.cards.get_mut(index) {
            Some(card) => {
                card.visible = true;
                true
            }
            None => false,
        }
    }

    /// Returns the number of cards in the hand.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Returns whether the hand is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::Hand;
    use crate::card::{Card, CardImages};

    fn card(code: &str, value: &str) -> Card {
        Card {
            code: code.to_string(),
            value: value.to_string(),
            suit: "SPADES".to_string(),
            image: String::new(),
            images: CardImages {
                svg: String::new(),
                png: String::new(),
            },
            visible: false,
        }
    }

    #[test]
    fn total_sums_fixed_values() {
        let mut hand = Hand::new();
        hand.push(card("AS", "ACE"));
        hand.push(card("7S", "7"));
        assert_eq!(hand.total(), 17);

        hand.push(card("KS", "KING"));
        assert_eq!(hand.total(), 27);
    }

    #[test]
    fn reveal_flips_visibility_in_place() {
        let mut hand = Hand::new();
        hand.push(card("AS", "ACE"));
        assert!(!hand.cards()[0].visible);

        assert!(hand.reveal(0));
        assert!(hand.cards()[0].visible);
        assert!(!hand.reveal(1));
    }
}
