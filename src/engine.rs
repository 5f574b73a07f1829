//! Trick-by-trick navigation over a deal's play log.
//!
//! The engine starts at play index 0 (the auction, nothing played) and moves
//! one whole trick at a time. Index `n` means tricks `0..n` have been played;
//! the last of them is the trick shown on the table.
//!
//! The declarer trick counter lags one trick behind the table: at index `n`
//! it counts declarer's wins among tricks `0..n-1`, not including the trick
//! just played.

use crate::deal::Deal;
use crate::error::TransitionError;
use crate::types::{
    serialize_card, serialize_seat, Card, CardExt, CardSet, Direction, RankExt, SeatExt, Side,
    Strain, Suit, SEATS,
};
use serde::Serialize;
use tracing::{debug, trace};

/// One card played by one seat.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Play {
    #[serde(serialize_with = "serialize_seat")]
    pub seat: Direction,
    #[serde(serialize_with = "serialize_card")]
    pub card: Card,
}

/// A complete trick of the play log.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trick {
    pub index: usize,
    #[serde(serialize_with = "serialize_seat")]
    pub leader: Direction,
    /// Plays in play order, leader first.
    pub plays: [Play; 4],
    #[serde(serialize_with = "serialize_seat")]
    pub winner: Direction,
}

impl Trick {
    fn new(index: usize, leader: Direction, cards: &[Card], trump: Strain) -> Option<Self> {
        let cards: &[Card; 4] = cards.try_into().ok()?;
        let plays: [Play; 4] = std::array::from_fn(|offset| Play {
            seat: leader.rotate(offset),
            card: cards[offset],
        });
        let winner = winning_play(plays[0].card.suit, trump, &plays).seat;
        Some(Trick {
            index,
            leader,
            plays,
            winner,
        })
    }

    pub fn led_suit(&self) -> Suit {
        self.plays[0].card.suit
    }
}

/// Strength of a card within a trick: trumps beat the led suit, which beats discards.
fn strength(card: Card, led: Suit, trump: Strain) -> (u8, u8) {
    let class = if Some(card.suit) == trump.suit() {
        2
    } else if card.suit == led {
        1
    } else {
        0
    };
    (class, card.rank.numeric())
}

/// The play that wins a trick.
///
/// The highest trump wins; with no trump played, the highest card of the
/// led suit. A card of neither suit never wins. The answer does not depend
/// on the order of `plays`, only on `led`.
pub fn winning_play(led: Suit, trump: Strain, plays: &[Play; 4]) -> Play {
    plays[1..].iter().fold(plays[0], |best, &play| {
        if strength(play.card, led, trump) > strength(best.card, led, trump) {
            play
        } else {
            best
        }
    })
}

/// A seat's cards still in hand: presence by card, iterated in display order.
#[derive(Debug, Clone, PartialEq)]
struct SeatHand {
    order: Vec<Card>,
    present: CardSet,
}

impl SeatHand {
    fn new(cards: &[Card]) -> Self {
        SeatHand {
            order: cards.to_vec(),
            present: cards.iter().copied().collect(),
        }
    }

    fn cards(&self) -> impl Iterator<Item = Card> + '_ {
        self.order
            .iter()
            .copied()
            .filter(|&card| self.present.contains(card))
    }
}

/// Everything the engine mutates, for comparing positions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineState {
    pub play_index: usize,
    pub declarer_tricks: u8,
    pub in_hand: [CardSet; 4],
}

/// Forward/backward trick navigation for one deal.
#[derive(Debug, Clone)]
pub struct TrickEngine {
    tricks: Vec<Trick>,
    hands: [SeatHand; 4],
    declarer_side: Option<Side>,
    play_index: usize,
    declarer_tricks: u8,
}

impl TrickEngine {
    /// Create an engine at index 0 with every card in hand.
    pub fn new(deal: &Deal) -> Self {
        let trump = deal.trump();
        let tricks = deal
            .play()
            .tricks()
            .take(deal.max_trick())
            .enumerate()
            .filter_map(|(index, (leader, cards))| Trick::new(index, leader, cards, trump))
            .collect();

        TrickEngine {
            tricks,
            hands: SEATS.map(|dir| SeatHand::new(deal.hand(dir))),
            declarer_side: deal.declarer().map(SeatExt::partnership),
            play_index: 0,
            declarer_tricks: 0,
        }
    }

    pub fn play_index(&self) -> usize {
        self.play_index
    }

    pub fn max_trick(&self) -> usize {
        self.tricks.len()
    }

    pub fn can_advance(&self) -> bool {
        self.play_index < self.max_trick()
    }

    pub fn can_retreat(&self) -> bool {
        self.play_index > 0
    }

    /// Declarer's side wins among tricks before the one on the table.
    pub fn declarer_tricks(&self) -> u8 {
        self.declarer_tricks
    }

    pub fn declarer_side(&self) -> Option<Side> {
        self.declarer_side
    }

    /// Cards `seat` still holds, in display order.
    pub fn remaining(&self, seat: Direction) -> Vec<Card> {
        self.hands[seat.seat_index()].cards().collect()
    }

    pub fn tricks(&self) -> &[Trick] {
        &self.tricks
    }

    /// The trick on the table: the last one played, if any.
    pub fn current_trick(&self) -> Option<&Trick> {
        self.play_index
            .checked_sub(1)
            .and_then(|index| self.tricks.get(index))
    }

    /// Declarer's side wins among all tricks played so far, table trick included.
    pub fn declarer_tricks_played(&self) -> u8 {
        self.count_declarer_wins(self.play_index)
    }

    pub fn state(&self) -> EngineState {
        EngineState {
            play_index: self.play_index,
            declarer_tricks: self.declarer_tricks,
            in_hand: std::array::from_fn(|i| self.hands[i].present),
        }
    }

    /// Play the next trick: its four cards leave their holders' hands.
    pub fn advance(&mut self) -> Result<&Trick, TransitionError> {
        if !self.can_advance() {
            return Err(TransitionError::AtEnd(self.max_trick()));
        }

        let index = self.play_index;
        let trick = &self.tricks[index];
        for play in &trick.plays {
            let removed = self.hands[play.seat.seat_index()].present.remove(play.card);
            debug_assert!(
                removed,
                "{} not in {}'s hand",
                play.card.token(),
                play.seat.seat_name()
            );
            trace!(seat = play.seat.seat_name(), card = %play.card.token(), "card to table");
        }

        if index > 0 && self.won_by_declarer(index - 1) {
            self.declarer_tricks += 1;
        }
        self.play_index = index + 1;

        let trick = &self.tricks[index];
        debug!(
            trick = index,
            leader = trick.leader.seat_name(),
            winner = trick.winner.seat_name(),
            declarer_tricks = self.declarer_tricks,
            "advanced"
        );
        Ok(trick)
    }

    /// Take back the trick on the table: its cards return to their holders.
    pub fn retreat(&mut self) -> Result<(), TransitionError> {
        if !self.can_retreat() {
            return Err(TransitionError::AtStart);
        }

        let index = self.play_index - 1;
        for play in &self.tricks[index].plays {
            let restored = self.hands[play.seat.seat_index()].present.insert(play.card);
            debug_assert!(
                restored,
                "{} already in {}'s hand",
                play.card.token(),
                play.seat.seat_name()
            );
            trace!(seat = play.seat.seat_name(), card = %play.card.token(), "card to hand");
        }

        self.play_index = index;
        self.declarer_tricks = self.count_declarer_wins(index.saturating_sub(1));

        debug!(
            trick = index,
            declarer_tricks = self.declarer_tricks,
            "retreated"
        );
        Ok(())
    }

    fn won_by_declarer(&self, index: usize) -> bool {
        self.declarer_side
            .is_some_and(|side| self.tricks[index].winner.partnership() == side)
    }

    /// Declarer's side wins among tricks `0..end`.
    fn count_declarer_wins(&self, end: usize) -> u8 {
        (0..end.min(self.tricks.len()))
            .filter(|&index| self.won_by_declarer(index))
            .count() as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::card_from_str;
    use crate::fixtures::{hearts_deal, suit_deal};

    fn card(token: &str) -> Card {
        card_from_str(token).unwrap()
    }

    fn plays(leader: Direction, tokens: [&str; 4]) -> [Play; 4] {
        std::array::from_fn(|i| Play {
            seat: leader.rotate(i),
            card: card(tokens[i]),
        })
    }

    #[test]
    fn test_highest_of_led_suit_wins() {
        let trick = plays(Direction::West, ["S2", "SA", "S5", "S9"]);
        let winner = winning_play(Suit::Spades, Strain::Hearts, &trick);
        assert_eq!(winner.seat, Direction::North);
    }

    #[test]
    fn test_any_trump_beats_led_suit() {
        let trick = plays(Direction::North, ["DA", "D3", "H2", "DK"]);
        let winner = winning_play(Suit::Diamonds, Strain::Hearts, &trick);
        assert_eq!(winner.seat, Direction::South);
        assert_eq!(winner.card, card("H2"));
    }

    #[test]
    fn test_highest_trump_wins_overruff() {
        let trick = plays(Direction::East, ["CA", "S3", "CK", "S7"]);
        let winner = winning_play(Suit::Clubs, Strain::Spades, &trick);
        assert_eq!(winner.seat, Direction::North);
    }

    #[test]
    fn test_discard_never_wins() {
        let trick = plays(Direction::South, ["C2", "HA", "SA", "DA"]);
        assert_eq!(
            winning_play(Suit::Clubs, Strain::NoTrump, &trick).seat,
            Direction::South
        );
    }

    #[test]
    fn test_winner_ignores_input_order() {
        let trick = plays(Direction::North, ["DA", "D3", "H2", "DK"]);
        for shift in 0..4 {
            let rotated: [Play; 4] = std::array::from_fn(|i| trick[(i + shift) % 4]);
            assert_eq!(
                winning_play(Suit::Diamonds, Strain::Hearts, &rotated).seat,
                Direction::South
            );
        }
    }

    #[test]
    fn test_engine_starts_at_auction() {
        let engine = TrickEngine::new(&hearts_deal());
        assert_eq!(engine.play_index(), 0);
        assert_eq!(engine.max_trick(), 2);
        assert!(engine.can_advance());
        assert!(!engine.can_retreat());
        assert!(engine.current_trick().is_none());
        for dir in SEATS {
            assert_eq!(engine.remaining(dir).len(), 13);
        }
    }

    #[test]
    fn test_advance_plays_trick() {
        let deal = hearts_deal();
        let mut engine = TrickEngine::new(&deal);

        let trick = engine.advance().unwrap();
        assert_eq!(trick.winner, Direction::North);
        assert_eq!(trick.leader, Direction::West);

        assert!(!engine.remaining(Direction::North).contains(&card("SA")));
        assert_eq!(engine.remaining(Direction::North).len(), 12);
        assert_eq!(engine.declarer_tricks(), 0);
        assert_eq!(engine.current_trick().unwrap().index, 0);

        let trick = engine.advance().unwrap();
        assert_eq!(trick.winner, Direction::South);
        // North won trick 0; it now shows in the lagged counter
        assert_eq!(engine.declarer_tricks(), 1);
        assert_eq!(engine.declarer_tricks_played(), 2);
        assert!(!engine.can_advance());
    }

    #[test]
    fn test_remaining_hand_keeps_display_order() {
        let deal = hearts_deal();
        let mut engine = TrickEngine::new(&deal);
        engine.advance().unwrap();
        let expected: Vec<Card> = deal
            .hand(Direction::North)
            .iter()
            .copied()
            .filter(|&c| c != card("SA"))
            .collect();
        assert_eq!(engine.remaining(Direction::North), expected);
    }

    #[test]
    fn test_advance_then_retreat_restores_state() {
        let mut engine = TrickEngine::new(&hearts_deal());
        let start = engine.state();
        engine.advance().unwrap();
        let after_one = engine.state();
        engine.advance().unwrap();
        engine.retreat().unwrap();
        assert_eq!(engine.state(), after_one);
        engine.retreat().unwrap();
        assert_eq!(engine.state(), start);
    }

    #[test]
    fn test_boundaries_are_errors() {
        let mut engine = TrickEngine::new(&hearts_deal());
        assert_eq!(engine.retreat(), Err(TransitionError::AtStart));
        engine.advance().unwrap();
        engine.advance().unwrap();
        assert_eq!(engine.advance().unwrap_err(), TransitionError::AtEnd(2));
        assert_eq!(engine.play_index(), 2);
    }

    #[test]
    fn test_counter_lags_one_trick() {
        let mut engine = TrickEngine::new(&suit_deal());
        assert_eq!(engine.max_trick(), 13);

        let mut counts = Vec::new();
        while engine.can_advance() {
            engine.advance().unwrap();
            counts.push(engine.declarer_tricks());
        }
        assert_eq!(counts, (0..13).collect::<Vec<u8>>());
        assert_eq!(engine.declarer_tricks_played(), 13);
        for dir in SEATS {
            assert!(engine.remaining(dir).is_empty());
        }

        engine.retreat().unwrap();
        assert_eq!(engine.declarer_tricks(), 11);
        assert_eq!(engine.remaining(Direction::North), vec![card("S2")]);
    }
}
