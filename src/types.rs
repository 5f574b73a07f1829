//! Domain primitives.
//!
//! Cards, seats and vulnerability are the `bridge_types` ones. This module
//! adds what deal review needs on top of them: a stable card index for
//! bitsets, clockwise seat arithmetic, the 2-bit vulnerability encoding, and
//! a contract model that can be passed out.

pub use bridge_types::{Card, Direction, Rank, Suit, Vulnerability};
use serde::Serializer;

/// Seats in index order. Seat arithmetic is modulo 4, clockwise.
///
/// An unknown seat ("no direction") is `Option<Direction>::None`, so it can
/// never take part in seat arithmetic.
pub const SEATS: [Direction; 4] = [
    Direction::North,
    Direction::East,
    Direction::South,
    Direction::West,
];

/// Suits in index order, lowest first.
pub const SUITS: [Suit; 4] = [Suit::Clubs, Suit::Diamonds, Suit::Hearts, Suit::Spades];

/// Suits in the order hands are written: spades first.
pub const WRITTEN_SUITS: [Suit; 4] = [Suit::Spades, Suit::Hearts, Suit::Diamonds, Suit::Clubs];

/// Ranks lowest to highest.
pub const RANKS: [Rank; 13] = [
    Rank::Two,
    Rank::Three,
    Rank::Four,
    Rank::Five,
    Rank::Six,
    Rank::Seven,
    Rank::Eight,
    Rank::Nine,
    Rank::Ten,
    Rank::Jack,
    Rank::Queen,
    Rank::King,
    Rank::Ace,
];

pub trait RankExt {
    /// Numeric rank, 2 through 14.
    fn numeric(self) -> u8;
}

impl RankExt for Rank {
    fn numeric(self) -> u8 {
        self as u8
    }
}

pub fn rank_from_numeric(value: u8) -> Option<Rank> {
    RANKS.get(usize::from(value.checked_sub(2)?)).copied()
}

fn suit_index(suit: Suit) -> u8 {
    match suit {
        Suit::Clubs => 0,
        Suit::Diamonds => 1,
        Suit::Hearts => 2,
        Suit::Spades => 3,
    }
}

pub trait CardExt {
    /// Stable identifier in 0..52: clubs 0-12, diamonds 13-25, hearts 26-38, spades 39-51.
    fn deck_index(&self) -> u8;

    /// Two-character token, suit then rank (`SA`, `HT`).
    fn token(&self) -> String;
}

impl CardExt for Card {
    fn deck_index(&self) -> u8 {
        suit_index(self.suit) * 13 + (self.rank.numeric() - 2)
    }

    fn token(&self) -> String {
        format!("{}{}", self.suit.to_char(), self.rank.to_char())
    }
}

pub fn card_from_index(index: u8) -> Option<Card> {
    let suit = *SUITS.get(usize::from(index / 13))?;
    let rank = rank_from_numeric(index % 13 + 2)?;
    Some(Card::new(suit, rank))
}

/// A set of cards keyed by [`CardExt::deck_index`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct CardSet(u64);

impl CardSet {
    pub const fn new() -> Self {
        CardSet(0)
    }

    /// Adds a card, returning false if it was already present.
    pub fn insert(&mut self, card: Card) -> bool {
        let bit = 1u64 << card.deck_index();
        let fresh = self.0 & bit == 0;
        self.0 |= bit;
        fresh
    }

    /// Removes a card, returning false if it was absent.
    pub fn remove(&mut self, card: Card) -> bool {
        let bit = 1u64 << card.deck_index();
        let present = self.0 & bit != 0;
        self.0 &= !bit;
        present
    }

    pub fn contains(&self, card: Card) -> bool {
        self.0 & (1u64 << card.deck_index()) != 0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }
}

impl FromIterator<Card> for CardSet {
    fn from_iter<I: IntoIterator<Item = Card>>(iter: I) -> Self {
        let mut set = CardSet::new();
        for card in iter {
            set.insert(card);
        }
        set
    }
}

/// Clockwise seat arithmetic.
pub trait SeatExt {
    /// North 0, East 1, South 2, West 3.
    fn seat_index(self) -> usize;

    /// The seat `n` places clockwise from this one.
    fn rotate(self, n: usize) -> Direction;

    /// Clockwise offset from `self` to `to`, in 0..4.
    fn offset_to(self, to: Direction) -> usize;

    fn partnership(self) -> Side;

    fn seat_name(self) -> &'static str;
}

impl SeatExt for Direction {
    fn seat_index(self) -> usize {
        match self {
            Direction::North => 0,
            Direction::East => 1,
            Direction::South => 2,
            Direction::West => 3,
        }
    }

    fn rotate(self, n: usize) -> Direction {
        SEATS[(self.seat_index() + n % 4) % 4]
    }

    fn offset_to(self, to: Direction) -> usize {
        (to.seat_index() + 4 - self.seat_index()) % 4
    }

    fn partnership(self) -> Side {
        match self {
            Direction::North | Direction::South => Side::NorthSouth,
            Direction::East | Direction::West => Side::EastWest,
        }
    }

    fn seat_name(self) -> &'static str {
        match self {
            Direction::North => "North",
            Direction::East => "East",
            Direction::South => "South",
            Direction::West => "West",
        }
    }
}

/// A partnership.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
pub enum Side {
    NorthSouth,
    EastWest,
}

impl Side {
    pub fn opponents(self) -> Side {
        match self {
            Side::NorthSouth => Side::EastWest,
            Side::EastWest => Side::NorthSouth,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Side::NorthSouth => "NS",
            Side::EastWest => "EW",
        }
    }
}

/// Vulnerability as a 2-bit value: bit 0 = NS vulnerable, bit 1 = EW vulnerable.
pub trait VulnerabilityExt {
    fn as_bits(self) -> u8;

    fn includes(self, seat: Direction) -> bool;
}

impl VulnerabilityExt for Vulnerability {
    fn as_bits(self) -> u8 {
        match self {
            Vulnerability::None => 0,
            Vulnerability::NorthSouth => 1,
            Vulnerability::EastWest => 2,
            Vulnerability::Both => 3,
        }
    }

    fn includes(self, seat: Direction) -> bool {
        let bit = match seat.partnership() {
            Side::NorthSouth => 1,
            Side::EastWest => 2,
        };
        self.as_bits() & bit != 0
    }
}

pub fn vulnerability_from_bits(bits: u8) -> Vulnerability {
    match bits & 3 {
        0 => Vulnerability::None,
        1 => Vulnerability::NorthSouth,
        2 => Vulnerability::EastWest,
        _ => Vulnerability::Both,
    }
}

/// A contract denomination. `NoTrump` doubles as the "no trump suit" sort key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
pub enum Strain {
    Clubs,
    Diamonds,
    Hearts,
    Spades,
    NoTrump,
}

impl Strain {
    /// The trump suit, if any
    pub fn suit(self) -> Option<Suit> {
        match self {
            Strain::Clubs => Some(Suit::Clubs),
            Strain::Diamonds => Some(Suit::Diamonds),
            Strain::Hearts => Some(Suit::Hearts),
            Strain::Spades => Some(Suit::Spades),
            Strain::NoTrump => None,
        }
    }

    pub fn from_suit(suit: Suit) -> Strain {
        match suit {
            Suit::Clubs => Strain::Clubs,
            Suit::Diamonds => Strain::Diamonds,
            Suit::Hearts => Strain::Hearts,
            Suit::Spades => Strain::Spades,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Strain::Clubs => "C",
            Strain::Diamonds => "D",
            Strain::Hearts => "H",
            Strain::Spades => "S",
            Strain::NoTrump => "NT",
        }
    }
}

/// Doubling state of a contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize)]
pub enum Doubled {
    #[default]
    Undoubled,
    Doubled,
    Redoubled,
}

/// The final contract of a deal. Declarer lives on the deal, not here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
pub enum Contract {
    /// All four players passed; there is no play.
    PassedOut,
    Bid {
        level: u8,
        strain: Strain,
        doubled: Doubled,
    },
}

impl Contract {
    pub const LEVELS: std::ops::RangeInclusive<u8> = 1..=7;

    pub fn new(level: u8, strain: Strain, doubled: Doubled) -> Self {
        Contract::Bid {
            level,
            strain,
            doubled,
        }
    }

    pub fn is_passed_out(&self) -> bool {
        matches!(self, Contract::PassedOut)
    }

    /// Trump for sorting and trick resolution; `NoTrump` when passed out.
    pub fn trump(&self) -> Strain {
        match self {
            Contract::PassedOut => Strain::NoTrump,
            Contract::Bid { strain, .. } => *strain,
        }
    }

    pub fn level(&self) -> Option<u8> {
        match self {
            Contract::PassedOut => None,
            Contract::Bid { level, .. } => Some(*level),
        }
    }

    /// Tricks declarer needs: level + 6. None outside levels 1-7.
    pub fn tricks_required(&self) -> Option<u8> {
        self.level()
            .filter(|level| Self::LEVELS.contains(level))
            .map(|level| level + 6)
    }

    /// Tricks the defenders need to set the contract. None outside levels 1-7.
    pub fn defense_required(&self) -> Option<u8> {
        self.level()
            .filter(|level| Self::LEVELS.contains(level))
            .map(|level| 8 - level)
    }
}

/// One entry of the auction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
pub enum Bid {
    Pass,
    Double,
    Redouble,
    Call { level: u8, strain: Strain },
}

// Views serialize seats by name and cards by token.

pub(crate) fn serialize_seat<S: Serializer>(
    seat: &Direction,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(seat.seat_name())
}

pub(crate) fn serialize_optional_seat<S: Serializer>(
    seat: &Option<Direction>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match seat {
        Some(seat) => serializer.serialize_some(seat.seat_name()),
        None => serializer.serialize_none(),
    }
}

pub(crate) fn serialize_card<S: Serializer>(card: &Card, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&card.token())
}

pub(crate) fn serialize_cards<S: Serializer>(
    cards: &[Card],
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_seq(cards.iter().map(CardExt::token))
}
