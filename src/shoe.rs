//! Card sources: the shoe abstraction and its implementations.
//!
//! A session never owns cards that have not been dealt; the shoe lives
//! behind a [`CardSource`] and is addressed through an explicit [`ShoeId`]
//! capability rather than ambient state.

use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use rand::SeedableRng;
use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::card::{Card, CardImages, DECK_SIZE};
use crate::error::AdapterError;

/// Number of decks in a session shoe. Six decks (312 cards) avoid
/// reshuffling mid-session for typical table sizes.
pub const SHOE_DECKS: u32 = 6;

/// Default base URL of the upstream deck API.
pub const DECK_API_BASE_URL: &str = "https://www.deckofcardsapi.com";

const CARD_BACK_URL: &str = "https://www.deckofcardsapi.com/static/img/back.png";

/// Opaque handle to one shuffled shoe held by a card source.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShoeId(String);

impl ShoeId {
    /// Returns the handle as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for ShoeId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for ShoeId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl fmt::Display for ShoeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// An external provider of shuffled shoes.
///
/// Each draw consumes from the shoe in a well-defined order; the source
/// never reshuffles on exhaustion.
pub trait CardSource: Send + Sync {
    /// Allocates a new shuffled shoe of `deck_count` standard decks.
    fn new_shoe(
        &self,
        deck_count: u32,
    ) -> impl Future<Output = Result<ShoeId, AdapterError>> + Send;

    /// Draws exactly `count` cards from the shoe, in arrival order.
    ///
    /// A response carrying a different number of cards is an error; no
    /// partial draws are returned.
    fn draw(
        &self,
        shoe_id: &ShoeId,
        count: usize,
    ) -> impl Future<Output = Result<Vec<Card>, AdapterError>> + Send;
}

#[derive(Debug, Deserialize)]
struct NewShoeResponse {
    success: bool,
    deck_id: String,
}

#[derive(Debug, Deserialize)]
struct DrawResponse {
    success: bool,
    cards: Vec<Card>,
}

/// HTTP adapter for the upstream deck API.
#[derive(Debug, Clone)]
pub struct DeckOfCardsClient {
    http: reqwest::Client,
    base_url: String,
}

impl DeckOfCardsClient {
    /// Creates a client against the canonical deck API endpoint.
    #[must_use]
    pub fn new() -> Self {
        Self::with_base_url(DECK_API_BASE_URL)
    }

    /// Creates a client against a custom base URL.
    #[must_use]
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let http = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_else(|err| {
                tracing::warn!(%err, "failed to build tuned http client, using defaults");
                reqwest::Client::new()
            });

        Self {
            http,
            base_url: base_url.into(),
        }
    }
}

impl Default for DeckOfCardsClient {
    fn default() -> Self {
        Self::new()
    }
}

impl CardSource for DeckOfCardsClient {
    async fn new_shoe(&self, deck_count: u32) -> Result<ShoeId, AdapterError> {
        let url = format!(
            "{}/api/deck/new/shuffle/?deck_count={deck_count}",
            self.base_url
        );
        let body: NewShoeResponse = self
            .http
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        if !body.success {
            return Err(AdapterError::Failed);
        }
        tracing::debug!(shoe_id = %body.deck_id, deck_count, "allocated shoe");
        Ok(ShoeId::from(body.deck_id))
    }

    async fn draw(&self, shoe_id: &ShoeId, count: usize) -> Result<Vec<Card>, AdapterError> {
        let url = format!("{}/api/deck/{shoe_id}/draw/?count={count}", self.base_url);
        let body: DrawResponse = self
            .http
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        if !body.success {
            return Err(AdapterError::Failed);
        }
        if body.cards.len() != count {
            return Err(AdapterError::ShortDraw {
                requested: count,
                received: body.cards.len(),
            });
        }
        Ok(body.cards)
    }
}

const SUITS: [(char, &str); 4] = [
    ('S', "SPADES"),
    ('H', "HEARTS"),
    ('D', "DIAMONDS"),
    ('C', "CLUBS"),
];

const RANKS: [(char, &str); 13] = [
    ('A', "ACE"),
    ('2', "2"),
    ('3', "3"),
    ('4', "4"),
    ('5', "5"),
    ('6', "6"),
    ('7', "7"),
    ('8', "8"),
    ('9', "9"),
    ('0', "10"),
    ('J', "JACK"),
    ('Q', "QUEEN"),
    ('K', "KING"),
];

/// In-process deterministic card source.
///
/// Shoes are shuffled with a seeded ChaCha8 RNG and drawn from the front,
/// which makes sessions reproducible for a given seed. Suitable for
/// offline play and tests.
#[derive(Debug)]
pub struct SeededShoe {
    shoes: Mutex<HashMap<ShoeId, Vec<Card>>>,
    rng: Mutex<ChaCha8Rng>,
    next_shoe: AtomicU64,
}

impl SeededShoe {
    /// Creates a card source seeded with `seed`.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            shoes: Mutex::new(HashMap::new()),
            rng: Mutex::new(ChaCha8Rng::seed_from_u64(seed)),
            next_shoe: AtomicU64::new(0),
        }
    }

    fn build_card(rank: char, value: &str, suit_char: char, suit: &str) -> Card {
        let code = format!("{rank}{suit_char}");
        Card {
            image: format!("{DECK_API_BASE_URL}/static/img/{code}.png"),
            images: CardImages {
                svg: format!("{DECK_API_BASE_URL}/static/img/{code}.svg"),
                png: format!("{DECK_API_BASE_URL}/static/img/{code}.png"),
            },
            code,
            value: value.to_string(),
            suit: suit.to_string(),
            visible: false,
        }
    }

    fn build_shoe(deck_count: u32, rng: &mut ChaCha8Rng) -> Vec<Card> {
        let mut cards = Vec::with_capacity(deck_count as usize * DECK_SIZE);

        for _ in 0..deck_count {
            for (suit_char, suit) in SUITS {
                for (rank, value) in RANKS {
                    cards.push(Self::build_card(rank, value, suit_char, suit));
                }
            }
        }

        cards.shuffle(rng);
        cards
    }
}

impl CardSource for SeededShoe {
    async fn new_shoe(&self, deck_count: u32) -> Result<ShoeId, AdapterError> {
        let shoe = {
            let mut rng = self.rng.lock().await;
            Self::build_shoe(deck_count, &mut rng)
        };

        let id = ShoeId(format!(
            "seeded-{}",
            self.next_shoe.fetch_add(1, Ordering::SeqCst)
        ));
        self.shoes.lock().await.insert(id.clone(), shoe);
        Ok(id)
    }

    async fn draw(&self, shoe_id: &ShoeId, count: usize) -> Result<Vec<Card>, AdapterError> {
        let mut shoes = self.shoes.lock().await;
        let shoe = shoes.get_mut(shoe_id).ok_or(AdapterError::Failed)?;

        if shoe.len() < count {
            return Err(AdapterError::ShortDraw {
                requested: count,
                received: shoe.len(),
            });
        }
        Ok(shoe.drain(..count).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::{CardSource, SHOE_DECKS, SeededShoe};
    use crate::card::DECK_SIZE;
    use crate::error::AdapterError;

    #[tokio::test]
    async fn seeded_shoe_is_deterministic_per_seed() {
        let a = SeededShoe::new(42);
        let b = SeededShoe::new(42);

        let shoe_a = a.new_shoe(SHOE_DECKS).await.unwrap();
        let shoe_b = b.new_shoe(SHOE_DECKS).await.unwrap();

        let cards_a = a.draw(&shoe_a, 10).await.unwrap();
        let cards_b = b.draw(&shoe_b, 10).await.unwrap();
        assert_eq!(cards_a, cards_b);
    }

    #[tokio::test]
    async fn draws_consume_the_shoe() {
        let source = SeededShoe::new(1);
        let shoe = source.new_shoe(1).await.unwrap();

        let first = source.draw(&shoe, DECK_SIZE - 1).await.unwrap();
        assert_eq!(first.len(), DECK_SIZE - 1);

        let err = source.draw(&shoe, 2).await.unwrap_err();
        assert!(matches!(
            err,
            AdapterError::ShortDraw {
                requested: 2,
                received: 1
            }
        ));
    }
}
