//! Bridge deal review.
//!
//! This crate rebuilds a complete bridge deal (who held what, who bid what,
//! who played what, who won each trick) from compact log strings, and lets
//! a viewer step forward and backward through the tricks:
//! - **codec** - parsers and formatters for the log tokens
//! - **deal** - the immutable, integrity-checked deal
//! - **sort** - trump-aware display order of a hand
//! - **engine** - trick navigation with exact backward recovery
//! - **replay** - the session a rendering layer drives
//! - **record** - tag-pair text records carrying all tokens of a deal
//!
//! # Example
//!
//! ```
//! use bridge_replay::{build_deal, Direction, RawDeal, ReplayController};
//!
//! let raw = RawDeal {
//!     dealer: "S",
//!     vulnerability: "None",
//!     declarer: "N",
//!     contract: "4H",
//!     hands: [
//!         "9876.765432..654",
//!         "JT2..K9876542.32",
//!         "AKQ.AKQJ.A.AKQJT",
//!         "543.T98.QJT3.987",
//!     ],
//!     auction: "P P 1C P 1H P 4H P P P",
//!     play: "W:S2 SA S5 S9 N:DA D3 H2 DK",
//!     result: None,
//! };
//!
//! let mut replay = ReplayController::new(build_deal(&raw).unwrap());
//! replay.next();
//! let view = replay.current_view();
//! assert_eq!(view.table_winner, Some(Direction::North));
//! assert_eq!(view.seat(Direction::North).cards.len(), 12);
//! ```

pub mod codec;
mod deal;
pub mod engine;
mod error;
pub mod record;
pub mod replay;
pub mod sort;
mod types;

pub use deal::{build_deal, Deal, RawDeal};
pub use engine::{winning_play, EngineState, Play, Trick, TrickEngine};
pub use error::{Error, IntegrityError, ParseError, Result, TransitionError};
pub use record::{read_records, read_records_file, DealRecord, RecordReader};
pub use replay::{NavEvent, Phase, ReplayController, ReplayOptions, ReplayView, TrickTally};
pub use sort::sort_hand;
pub use types::{
    Bid, Card, CardExt, CardSet, Contract, Direction, Doubled, Rank, RankExt, SeatExt, Side,
    Strain, Suit, Vulnerability, VulnerabilityExt,
};

#[cfg(test)]
mod fixtures;
#[cfg(test)]
mod tests;
