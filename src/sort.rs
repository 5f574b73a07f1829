//! Trump-aware display ordering of a hand.
//!
//! The trump suit goes first, followed by the rest alternating colours.
//! Without a trump suit the order is spades, hearts, clubs, diamonds.
//! Within a suit, cards run from high to low.

use crate::types::{Card, RankExt, Strain, Suit};

/// Suit order for each trump, indexed by [`suit_order_index`].
const SUIT_ORDER: [[Suit; 4]; 5] = [
    // Clubs
    [Suit::Clubs, Suit::Hearts, Suit::Spades, Suit::Diamonds],
    // Diamonds
    [Suit::Diamonds, Suit::Spades, Suit::Hearts, Suit::Clubs],
    // Hearts
    [Suit::Hearts, Suit::Spades, Suit::Diamonds, Suit::Clubs],
    // Spades
    [Suit::Spades, Suit::Hearts, Suit::Clubs, Suit::Diamonds],
    // No trump
    [Suit::Spades, Suit::Hearts, Suit::Clubs, Suit::Diamonds],
];

fn suit_order_index(trump: Strain) -> usize {
    match trump {
        Strain::Clubs => 0,
        Strain::Diamonds => 1,
        Strain::Hearts => 2,
        Strain::Spades => 3,
        Strain::NoTrump => 4,
    }
}

/// Position of `suit` in the display order for `trump`.
pub fn suit_rank(suit: Suit, trump: Strain) -> usize {
    SUIT_ORDER[suit_order_index(trump)]
        .iter()
        .position(|&s| s == suit)
        .unwrap_or(4)
}

/// Sort key of a card under `trump`: lower sorts first.
pub fn sort_key(card: Card, trump: Strain) -> (usize, std::cmp::Reverse<u8>) {
    (suit_rank(card.suit, trump), std::cmp::Reverse(card.rank.numeric()))
}

/// Return the cards in display order for `trump`. The input is left untouched.
pub fn sort_hand(cards: &[Card], trump: Strain) -> Vec<Card> {
    let mut sorted = cards.to_vec();
    sorted.sort_by_key(|&card| sort_key(card, trump));
    sorted
}
