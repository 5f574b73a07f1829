//! The parsed, immutable representation of one deal.

use crate::codec::{self, PlayLog};
use crate::error::{IntegrityError, Result};
use crate::sort::sort_hand;
use crate::types::{
    Bid, Card, CardExt, CardSet, Contract, Direction, SeatExt, Strain, Vulnerability, SEATS,
};
use tracing::debug;

/// The serialized tokens a deal is built from.
///
/// `hands` are listed starting with the dealer and going clockwise.
#[derive(Debug, Clone, Copy, Default)]
pub struct RawDeal<'a> {
    pub dealer: &'a str,
    pub vulnerability: &'a str,
    pub declarer: &'a str,
    pub contract: &'a str,
    pub hands: [&'a str; 4],
    pub auction: &'a str,
    pub play: &'a str,
    /// Declarer's final trick count, when the record carries one.
    pub result: Option<&'a str>,
}

/// One bridge deal: the starting position, the auction and the play.
#[derive(Debug, Clone, PartialEq)]
pub struct Deal {
    dealer: Direction,
    vulnerability: Vulnerability,
    contract: Contract,
    declarer: Option<Direction>,
    /// Starting hands indexed by `SeatExt::seat_index`, in display order.
    hands: [Vec<Card>; 4],
    auction: Vec<Bid>,
    play: PlayLog,
    result: Option<u8>,
}

/// Build a deal from its serialized tokens.
///
/// The i-th hand belongs to the seat `dealer.rotate(i)`.
pub fn build_deal(raw: &RawDeal<'_>) -> Result<Deal> {
    let dealer = codec::direction_from_str(raw.dealer)?;
    let vulnerability = codec::vulnerability_from_str(raw.vulnerability)?;
    let declarer = codec::optional_direction_from_str(raw.declarer)?;
    let contract = codec::contract_from_str(raw.contract)?;

    let mut hands: [Vec<Card>; 4] = Default::default();
    for (i, token) in raw.hands.iter().enumerate() {
        hands[dealer.rotate(i).seat_index()] = codec::hand_from_str(token)?;
    }

    let auction = codec::bid_log_from_str(raw.auction)?;
    let play = codec::play_log_from_str(raw.play)?;
    let result = raw.result.map(codec::result_from_str).transpose()?;

    let deal = Deal::new(
        dealer,
        vulnerability,
        contract,
        declarer,
        hands,
        auction,
        play,
        result,
    )?;

    debug!(
        dealer = deal.dealer.seat_name(),
        contract = %codec::format_contract(&deal.contract),
        declarer = %codec::format_direction(deal.declarer),
        tricks = deal.max_trick(),
        "built deal"
    );

    Ok(deal)
}

impl Deal {
    /// Assemble a deal from decoded parts, checking they agree with each other.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        dealer: Direction,
        vulnerability: Vulnerability,
        contract: Contract,
        declarer: Option<Direction>,
        hands: [Vec<Card>; 4],
        auction: Vec<Bid>,
        play: PlayLog,
        result: Option<u8>,
    ) -> std::result::Result<Self, IntegrityError> {
        if let Some(level) = contract.level() {
            if !Contract::LEVELS.contains(&level) {
                return Err(IntegrityError::ContractLevel(level));
            }
        }
        check_deck(&hands)?;

        if declarer.is_none() && !contract.is_passed_out() {
            return Err(IntegrityError::MissingDeclarer(codec::format_contract(
                &contract,
            )));
        }

        let trump = contract.trump();
        let hands = hands.map(|hand| sort_hand(&hand, trump));

        let deal = Deal {
            dealer,
            vulnerability,
            contract,
            declarer,
            hands,
            auction,
            play,
            result,
        };
        deal.check_play()?;

        Ok(deal)
    }

    pub fn dealer(&self) -> Direction {
        self.dealer
    }

    pub fn vulnerability(&self) -> Vulnerability {
        self.vulnerability
    }

    pub fn contract(&self) -> &Contract {
        &self.contract
    }

    pub fn declarer(&self) -> Option<Direction> {
        self.declarer
    }

    /// Trump for this deal; `NoTrump` when passed out.
    pub fn trump(&self) -> Strain {
        self.contract.trump()
    }

    /// A seat's starting hand in display order.
    pub fn hand(&self, seat: Direction) -> &[Card] {
        &self.hands[seat.seat_index()]
    }

    /// The seat that was dealt `card`.
    pub fn holder(&self, card: Card) -> Option<Direction> {
        SEATS
            .into_iter()
            .find(|&dir| self.hand(dir).contains(&card))
    }

    pub fn auction(&self) -> &[Bid] {
        &self.auction
    }

    /// Every bid paired with its bidder, starting with the dealer.
    pub fn auction_calls(&self) -> impl Iterator<Item = (Direction, Bid)> + '_ {
        self.auction
            .iter()
            .enumerate()
            .map(|(i, &bid)| (self.dealer.rotate(i), bid))
    }

    pub fn play(&self) -> &PlayLog {
        &self.play
    }

    /// Recorded final trick count for declarer, if the record had one.
    pub fn result(&self) -> Option<u8> {
        self.result
    }

    /// Number of tricks the replay can step through.
    pub fn max_trick(&self) -> usize {
        if self.contract.is_passed_out() {
            0
        } else {
            self.play.complete_tricks()
        }
    }

    /// The starting hands as a `bridge_types` deal.
    pub fn to_bridge_deal(&self) -> bridge_types::Deal {
        let mut deal = bridge_types::Deal::new();
        for dir in SEATS {
            let mut hand = bridge_types::Hand::new();
            for &card in self.hand(dir) {
                hand.add_card(card);
            }
            deal.set_hand(dir, hand);
        }
        deal
    }

    /// The starting hands as a PBN deal string, starting with the dealer.
    pub fn to_pbn(&self) -> String {
        self.to_bridge_deal().to_pbn(self.dealer)
    }

    /// Every played card must be held by the seat whose turn it is, once.
    fn check_play(&self) -> std::result::Result<(), IntegrityError> {
        let len = self.play.len();
        if self.contract.is_passed_out() && len > 0 {
            return Err(IntegrityError::PlayWithoutContract(len));
        }
        if len % 4 != 0 || len > 52 {
            return Err(IntegrityError::PlayLogLength(len));
        }

        let mut played = CardSet::new();
        for (trick, (leader, cards)) in self.play.tricks().enumerate() {
            for (offset, &card) in cards.iter().enumerate() {
                let seat = leader.rotate(offset);
                if !played.insert(card) {
                    return Err(IntegrityError::CardPlayedTwice { trick, card });
                }
                if !self.hand(seat).contains(&card) {
                    // check_deck guarantees every card has a holder
                    let holder = self.holder(card).unwrap_or(seat);
                    return Err(IntegrityError::CardNotHeld {
                        trick,
                        card,
                        seat,
                        holder,
                    });
                }
            }
        }

        Ok(())
    }
}

/// The four hands must cover the deck exactly once.
fn check_deck(hands: &[Vec<Card>; 4]) -> std::result::Result<(), IntegrityError> {
    let mut owner: [Option<Direction>; 52] = [None; 52];

    for dir in SEATS {
        for &card in &hands[dir.seat_index()] {
            let slot = &mut owner[usize::from(card.deck_index())];
            if let Some(first) = *slot {
                return Err(IntegrityError::DuplicateCard {
                    card,
                    first,
                    second: dir,
                });
            }
            *slot = Some(dir);
        }
    }

    let missing = owner.iter().filter(|o| o.is_none()).count();
    if missing > 0 {
        return Err(IntegrityError::MissingCards(missing));
    }

    Ok(())
}
