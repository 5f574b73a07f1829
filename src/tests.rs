// Scenario and property tests across the whole pipeline.

use proptest::prelude::*;

use crate::codec::{card_from_str, format_hand};
use crate::engine::{winning_play, Play, TrickEngine};
use crate::error::{Error, IntegrityError, TransitionError};
use crate::fixtures::{hearts_deal, suit_play, SUIT_HANDS};
use crate::replay::ReplayController;
use crate::types::{
    card_from_index, Card, CardExt, CardSet, Direction, SeatExt, Strain, Suit, SEATS,
};
use crate::{build_deal, Deal, RawDeal};

const STRAINS: [Strain; 5] = [
    Strain::Clubs,
    Strain::Diamonds,
    Strain::Hearts,
    Strain::Spades,
    Strain::NoTrump,
];

/// Parameters of a random, legally played deal.
#[derive(Debug, Clone)]
struct DealSeed {
    deck: Vec<u8>,
    dealer: usize,
    declarer: usize,
    level: u8,
    strain: usize,
    opening_leader: usize,
    picks: Vec<u8>,
    tricks: usize,
}

fn deal_seed() -> impl Strategy<Value = DealSeed> {
    (
        Just((0u8..52).collect::<Vec<u8>>()).prop_shuffle(),
        0usize..4,
        0usize..4,
        1u8..=7,
        0usize..5,
        0usize..4,
        prop::collection::vec(any::<u8>(), 52),
        0usize..=13,
    )
        .prop_map(
            |(deck, dealer, declarer, level, strain, opening_leader, picks, tricks)| DealSeed {
                deck,
                dealer,
                declarer,
                level,
                strain,
                opening_leader,
                picks,
                tricks,
            },
        )
}

/// Deal the deck and play `seed.tricks` tricks, following suit when possible
/// and letting each trick's winner lead the next.
fn fabricate(seed: &DealSeed) -> Deal {
    let trump = STRAINS[seed.strain];
    let hands: [Vec<Card>; 4] = std::array::from_fn(|seat| {
        seed.deck[seat * 13..seat * 13 + 13]
            .iter()
            .filter_map(|&index| card_from_index(index))
            .collect()
    });

    let mut remaining = hands.clone();
    let mut leader = SEATS[seed.opening_leader];
    let mut tokens = Vec::new();
    let mut k = 0;

    for _ in 0..seed.tricks {
        let mut plays: Vec<Play> = Vec::with_capacity(4);
        for offset in 0..4 {
            let seat = leader.rotate(offset);
            let hand = &mut remaining[seat.seat_index()];
            let led: Option<Suit> = plays.first().map(|p| p.card.suit);
            let candidates: Vec<usize> = (0..hand.len())
                .filter(|&i| led.map_or(true, |suit| hand[i].suit == suit))
                .collect();
            let candidates = if candidates.is_empty() {
                (0..hand.len()).collect()
            } else {
                candidates
            };
            let card = hand.remove(candidates[usize::from(seed.picks[k]) % candidates.len()]);
            k += 1;

            tokens.push(if offset == 0 {
                format!("{}:{}", seat.to_char(), card.token())
            } else {
                card.token()
            });
            plays.push(Play { seat, card });
        }
        let plays: [Play; 4] = [plays[0], plays[1], plays[2], plays[3]];
        leader = winning_play(plays[0].card.suit, trump, &plays).seat;
    }

    let dealer = SEATS[seed.dealer];
    let hand_tokens: Vec<String> = (0..4)
        .map(|i| format_hand(&hands[dealer.rotate(i).seat_index()]))
        .collect();
    let dealer_token = dealer.to_char().to_string();
    let declarer_token = SEATS[seed.declarer].to_char().to_string();
    let contract = format!("{}{}", seed.level, trump.symbol());
    let play = tokens.join(" ");

    build_deal(&RawDeal {
        dealer: &dealer_token,
        vulnerability: "Both",
        declarer: &declarer_token,
        contract: &contract,
        hands: [&hand_tokens[0], &hand_tokens[1], &hand_tokens[2], &hand_tokens[3]],
        auction: "",
        play: &play,
        result: None,
    })
    .unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// The four starting hands are the deck, once each.
    #[test]
    fn prop_hands_cover_the_deck(seed in deal_seed()) {
        let deal = fabricate(&seed);
        let mut deck = CardSet::new();
        for dir in SEATS {
            prop_assert_eq!(deal.hand(dir).len(), 13);
            for &card in deal.hand(dir) {
                prop_assert!(deck.insert(card), "{} dealt twice", card.token());
            }
        }
        prop_assert_eq!(deck.len(), 52);
    }

    /// advance then retreat restores the exact position, from every index.
    #[test]
    fn prop_advance_retreat_round_trip(seed in deal_seed()) {
        let deal = fabricate(&seed);
        let mut engine = TrickEngine::new(&deal);
        prop_assert_eq!(engine.max_trick(), seed.tricks);

        loop {
            let before = engine.state();
            let hands: Vec<Vec<Card>> = SEATS.iter().map(|&d| engine.remaining(d)).collect();
            if !engine.can_advance() {
                break;
            }
            engine.advance().unwrap();
            let after = engine.state();
            engine.retreat().unwrap();
            prop_assert_eq!(&engine.state(), &before);
            let restored: Vec<Vec<Card>> = SEATS.iter().map(|&d| engine.remaining(d)).collect();
            prop_assert_eq!(restored, hands);
            engine.advance().unwrap();
            prop_assert_eq!(engine.state(), after);
        }
    }

    /// Navigation is unavailable exactly at the ends.
    #[test]
    fn prop_boundaries(seed in deal_seed()) {
        let deal = fabricate(&seed);
        let mut engine = TrickEngine::new(&deal);
        prop_assert!(!engine.can_retreat());
        prop_assert_eq!(engine.retreat(), Err(TransitionError::AtStart));

        while engine.can_advance() {
            engine.advance().unwrap();
            prop_assert!(engine.can_retreat());
        }
        prop_assert_eq!(engine.play_index(), engine.max_trick());
        prop_assert!(engine.advance().is_err());

        let mut replay = ReplayController::new(deal);
        replay.seek(13);
        let view = replay.current_view();
        prop_assert!(!view.can_next);
        prop_assert_eq!(view.can_previous, seed.tricks > 0);
    }

    /// The winner depends on the led suit, not on the order plays are listed in.
    #[test]
    fn prop_winner_is_order_independent(seed in deal_seed()) {
        let deal = fabricate(&seed);
        let engine = TrickEngine::new(&deal);
        for trick in engine.tricks() {
            for shift in 1..4 {
                let rotated: [Play; 4] = std::array::from_fn(|i| trick.plays[(i + shift) % 4]);
                let winner = winning_play(trick.led_suit(), deal.trump(), &rotated);
                prop_assert_eq!(winner.seat, trick.winner);
            }
        }
    }

    /// The counter at index n counts declarer's wins among tricks 0..n-1.
    #[test]
    fn prop_counter_lags_table(seed in deal_seed()) {
        let deal = fabricate(&seed);
        let side = deal.declarer().map(SeatExt::partnership);
        let mut engine = TrickEngine::new(&deal);
        while engine.can_advance() {
            engine.advance().unwrap();
            let n = engine.play_index();
            let expected = engine.tricks()[..n - 1]
                .iter()
                .filter(|t| Some(t.winner.partnership()) == side)
                .count() as u8;
            prop_assert_eq!(engine.declarer_tricks(), expected);
        }
    }
}

#[test]
fn test_four_hearts_scenario() {
    let deal = hearts_deal();
    let mut engine = TrickEngine::new(&deal);
    let ace = card_from_str("SA").unwrap();

    let first = engine.advance().unwrap();
    assert_eq!(first.leader, Direction::West);
    assert_eq!(first.winner, Direction::North);
    assert!(!engine.remaining(Direction::North).contains(&ace));
    assert_eq!(engine.declarer_tricks(), 0);

    // South ruffs the diamond ace with the two of trumps
    let second = engine.advance().unwrap();
    assert_eq!(second.leader, Direction::North);
    assert_eq!(second.winner, Direction::South);
}

#[test]
fn test_fifty_card_play_log() {
    let play = suit_play();
    let tokens: Vec<&str> = play.split_whitespace().collect();
    assert_eq!(tokens.len(), 52);
    let play = tokens[..50].join(" ");

    let raw = RawDeal {
        dealer: "N",
        vulnerability: "None",
        declarer: "N",
        contract: "3NT",
        hands: SUIT_HANDS,
        auction: "",
        play: &play,
        result: None,
    };
    assert!(matches!(
        build_deal(&raw),
        Err(Error::Integrity(IntegrityError::PlayLogLength(50)))
    ));
}

#[test]
fn test_club_ace_in_two_hands() {
    let raw = RawDeal {
        dealer: "N",
        vulnerability: "None",
        declarer: "N",
        contract: "3NT",
        hands: ["AKQJT9876543...A", SUIT_HANDS[1], SUIT_HANDS[2], SUIT_HANDS[3]],
        auction: "",
        play: "",
        result: None,
    };
    let club_ace = card_from_str("CA").unwrap();
    match build_deal(&raw) {
        Err(Error::Integrity(IntegrityError::DuplicateCard {
            card,
            first,
            second,
        })) => {
            assert_eq!(card, club_ace);
            assert_eq!(first, Direction::North);
            assert_eq!(second, Direction::West);
        }
        other => panic!("expected duplicate club ace, got {other:?}"),
    }
}
