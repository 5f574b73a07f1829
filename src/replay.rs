//! The review session a rendering layer talks to.
//!
//! A [`ReplayController`] owns one deal and one [`TrickEngine`]. The UI asks
//! for a [`ReplayView`] snapshot and feeds back [`NavEvent`]s; events at a
//! boundary are ignored rather than treated as errors.

use crate::deal::{build_deal, Deal, RawDeal};
use crate::engine::{EngineState, Play, TrickEngine};
use crate::error::Result;
use crate::types::{
    serialize_cards, serialize_optional_seat, serialize_seat, Card, Direction, SeatExt, Side,
    VulnerabilityExt, SEATS,
};
use serde::Serialize;
use std::fmt;
use tracing::warn;

/// Session options.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReplayOptions {
    /// The seat drawn at the bottom of the table.
    pub viewer: Direction,
}

impl Default for ReplayOptions {
    fn default() -> Self {
        ReplayOptions {
            viewer: Direction::South,
        }
    }
}

/// Navigation input from the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavEvent {
    Next,
    Previous,
}

/// Where a seat is drawn, relative to the viewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TablePosition {
    Bottom,
    Left,
    Top,
    Right,
}

impl TablePosition {
    fn of(viewer: Direction, seat: Direction) -> Self {
        match viewer.offset_to(seat) {
            0 => TablePosition::Bottom,
            1 => TablePosition::Left,
            2 => TablePosition::Top,
            _ => TablePosition::Right,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Phase {
    /// Index 0: the auction is shown, nothing has been played.
    Auction,
    Play,
}

/// One seat as the table shows it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeatView {
    #[serde(serialize_with = "serialize_seat")]
    pub seat: Direction,
    pub position: TablePosition,
    pub vulnerable: bool,
    pub dealer: bool,
    /// Cards still in hand, in display order.
    #[serde(serialize_with = "serialize_cards")]
    pub cards: Vec<Card>,
}

/// Trick counts relative to declarer's side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TrickTally {
    pub declarer_side: Side,
    /// Declarer's wins before the trick on the table.
    pub declarer: u8,
    /// Defenders' wins before the trick on the table.
    pub defenders: u8,
    pub declarer_target: u8,
    pub defense_target: u8,
}

impl fmt::Display for TrickTally {
    /// `NS:3/10 EW:2/4`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}/{} {}:{}/{}",
            self.declarer_side.label(),
            self.declarer,
            self.declarer_target,
            self.declarer_side.opponents().label(),
            self.defenders,
            self.defense_target
        )
    }
}

/// Snapshot of the review position, for rendering.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReplayView {
    pub play_index: usize,
    pub max_trick: usize,
    pub phase: Phase,
    /// Seats in North, East, South, West order.
    pub seats: [SeatView; 4],
    /// The trick on the table, leader first; empty during the auction.
    pub table: Vec<Play>,
    /// Winner of the trick on the table.
    #[serde(serialize_with = "serialize_optional_seat")]
    pub table_winner: Option<Direction>,
    /// None for a passed-out deal.
    pub tally: Option<TrickTally>,
    /// Declarer's final trick count, once the last trick is on the table.
    pub final_tricks: Option<u8>,
    pub can_next: bool,
    pub can_previous: bool,
}

impl ReplayView {
    pub fn seat(&self, seat: Direction) -> &SeatView {
        &self.seats[seat.seat_index()]
    }
}

/// One deal-review session.
#[derive(Debug, Clone)]
pub struct ReplayController {
    deal: Deal,
    engine: TrickEngine,
    options: ReplayOptions,
}

impl ReplayController {
    pub fn new(deal: Deal) -> Self {
        Self::with_options(deal, ReplayOptions::default())
    }

    pub fn with_options(deal: Deal, options: ReplayOptions) -> Self {
        let engine = TrickEngine::new(&deal);
        ReplayController {
            deal,
            engine,
            options,
        }
    }

    /// Build the deal from its tokens and open a session on it.
    pub fn from_raw(raw: &RawDeal<'_>, options: ReplayOptions) -> Result<Self> {
        Ok(Self::with_options(build_deal(raw)?, options))
    }

    pub fn deal(&self) -> &Deal {
        &self.deal
    }

    pub fn engine(&self) -> &TrickEngine {
        &self.engine
    }

    pub fn options(&self) -> ReplayOptions {
        self.options
    }

    pub fn play_index(&self) -> usize {
        self.engine.play_index()
    }

    /// Apply a UI event. Returns whether the position changed.
    pub fn handle(&mut self, event: NavEvent) -> bool {
        let moved = match event {
            NavEvent::Next => self.engine.can_advance() && self.engine.advance().is_ok(),
            NavEvent::Previous => self.engine.can_retreat() && self.engine.retreat().is_ok(),
        };
        if !moved {
            warn!(?event, play_index = self.engine.play_index(), "ignored navigation event");
        }
        moved
    }

    pub fn next(&mut self) -> bool {
        self.handle(NavEvent::Next)
    }

    pub fn previous(&mut self) -> bool {
        self.handle(NavEvent::Previous)
    }

    /// Step to `index`, clamped to the playable range.
    pub fn seek(&mut self, index: usize) {
        let target = index.min(self.engine.max_trick());
        while self.engine.play_index() < target && self.next() {}
        while self.engine.play_index() > target && self.previous() {}
    }

    pub fn state(&self) -> EngineState {
        self.engine.state()
    }

    pub fn current_view(&self) -> ReplayView {
        let engine = &self.engine;
        let play_index = engine.play_index();
        let at_end = engine.max_trick() > 0 && play_index == engine.max_trick();

        let seats = SEATS.map(|seat| SeatView {
            seat,
            position: TablePosition::of(self.options.viewer, seat),
            vulnerable: self.deal.vulnerability().includes(seat),
            dealer: seat == self.deal.dealer(),
            cards: engine.remaining(seat),
        });

        let current = engine.current_trick();

        ReplayView {
            play_index,
            max_trick: engine.max_trick(),
            phase: if play_index == 0 {
                Phase::Auction
            } else {
                Phase::Play
            },
            seats,
            table: current.map(|t| t.plays.to_vec()).unwrap_or_default(),
            table_winner: current.map(|t| t.winner),
            tally: self.tally(),
            final_tricks: at_end
                .then(|| self.deal.result().unwrap_or(engine.declarer_tricks_played())),
            can_next: engine.can_advance(),
            can_previous: engine.can_retreat(),
        }
    }

    fn tally(&self) -> Option<TrickTally> {
        let side = self.engine.declarer_side()?;
        let contract = self.deal.contract();
        let declarer = self.engine.declarer_tricks();
        let completed = self.engine.play_index().saturating_sub(1) as u8;

        Some(TrickTally {
            declarer_side: side,
            declarer,
            defenders: completed.saturating_sub(declarer),
            declarer_target: contract.tricks_required()?,
            defense_target: contract.defense_required()?,
        })
    }
}
