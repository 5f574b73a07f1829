//! Error types for deal reconstruction and replay.

use crate::types::{Card, CardExt, Direction, SeatExt};
use thiserror::Error;

/// A log token that does not match its grammar.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("invalid direction token: {0:?}")]
    Direction(String),

    #[error("invalid vulnerability token: {0:?}")]
    Vulnerability(String),

    #[error("invalid contract token: {0:?}")]
    Contract(String),

    #[error("invalid card token: {0:?}")]
    Card(String),

    #[error("invalid hand {token:?}: {reason}")]
    Hand { token: String, reason: String },

    #[error("invalid bid token: {0:?}")]
    Bid(String),

    #[error("invalid play token {token:?}: {reason}")]
    Play { token: String, reason: String },

    #[error("invalid result token: {0:?}")]
    Result(String),

    #[error("record line {line}: {reason}")]
    Record { line: usize, reason: String },
}

/// Parsed components that are individually well-formed but jointly inconsistent.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum IntegrityError {
    #[error("{} is held by both {} and {}", .card.token(), .first.seat_name(), .second.seat_name())]
    DuplicateCard {
        card: Card,
        first: Direction,
        second: Direction,
    },

    #[error("hands are missing {0} cards of the deck")]
    MissingCards(usize),

    #[error("contract level {0} is outside 1-7")]
    ContractLevel(u8),

    #[error("contract {0} has no declarer")]
    MissingDeclarer(String),

    #[error("play log has {0} cards; expected a multiple of 4, at most 52")]
    PlayLogLength(usize),

    #[error("passed-out deal has {0} cards in its play log")]
    PlayWithoutContract(usize),

    #[error(
        "trick {}: {} plays {}, which {} holds",
        .trick,
        .seat.seat_name(),
        .card.token(),
        .holder.seat_name()
    )]
    CardNotHeld {
        trick: usize,
        card: Card,
        seat: Direction,
        holder: Direction,
    },

    #[error("trick {}: {} was already played", .trick, .card.token())]
    CardPlayedTwice { trick: usize, card: Card },
}

/// A trick navigation call made outside its precondition.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionError {
    #[error("cannot advance past trick {0}")]
    AtEnd(usize),

    #[error("cannot retreat before the auction")]
    AtStart,
}

/// Any failure raised by this crate.
#[derive(Error, Debug)]
pub enum Error {
    #[error("malformed deal record: {0}")]
    Parse(#[from] ParseError),

    #[error("inconsistent deal record: {0}")]
    Integrity(#[from] IntegrityError),

    #[error("illegal transition: {0}")]
    Transition(#[from] TransitionError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for replay operations
pub type Result<T> = std::result::Result<T, Error>;
