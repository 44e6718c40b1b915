//! Card types and the fixed valuation rule.

use serde::{Deserialize, Serialize};

/// Number of cards per deck.
pub const DECK_SIZE: usize = 52;

/// Image URL references for a card face.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardImages {
    /// SVG rendering of the card face.
    pub svg: String,
    /// PNG rendering of the card face.
    pub png: String,
}

/// A playing card as delivered by the card source.
///
/// Field names mirror the card source wire format, so drawn cards
/// deserialize directly from a draw response. The `visible` flag is scoped
/// to the hand the card was dealt into; it is absent on freshly drawn
/// cards and defaults to hidden.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    /// Two-character card code, e.g. `"AS"` or `"0H"` (ten of hearts).
    pub code: String,
    /// Face value string, e.g. `"ACE"`, `"KING"`, `"10"`, `"7"`.
    pub value: String,
    /// Suit name, e.g. `"SPADES"`.
    pub suit: String,
    /// Primary card face image URL.
    pub image: String,
    /// Alternate card face image URLs.
    pub images: CardImages,
    /// Whether the card is face up in its hand.
    #[serde(rename = "isVisible", default)]
    pub visible: bool,
}

/// Returns the fixed point value of a card's face value string.
///
/// The value string is taken at face value when it parses as an integer
/// (`"1"` scores 1, `"2"` through `"10"` score themselves); everything
/// else — `"ACE"`, `"KING"`, `"QUEEN"`, `"JACK"` — scores 10. There is no
/// soft/hard ace distinction.
#[must_use]
pub fn card_value(value: &str) -> u32 {
    value.parse::<u32>().unwrap_or(10)
}
