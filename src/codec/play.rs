//! Play log codec.
//!
//! Cards are whitespace separated. The first card of every group of four
//! names the seat that led it: `W:S2 SA S5 S9 N:DA D3 H2 DK`.

use super::{card_from_str, direction_from_str};
use crate::error::ParseError;
use crate::types::{Card, CardExt, Direction};

/// Cards in play order plus the leading seat of every group of four.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlayLog {
    cards: Vec<Card>,
    leads: Vec<Direction>,
}

impl PlayLog {
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// One entry per group of four, including a trailing partial group.
    pub fn leads(&self) -> &[Direction] {
        &self.leads
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Number of complete four-card groups.
    pub fn complete_tricks(&self) -> usize {
        self.cards.len() / 4
    }

    /// Leader and cards of trick `index`, if that group is complete.
    pub fn trick(&self, index: usize) -> Option<(Direction, &[Card])> {
        let cards = self.cards.chunks_exact(4).nth(index)?;
        Some((*self.leads.get(index)?, cards))
    }

    /// Iterate over complete tricks.
    pub fn tricks(&self) -> impl Iterator<Item = (Direction, &[Card])> + '_ {
        self.leads.iter().copied().zip(self.cards.chunks_exact(4))
    }
}

/// Parse a play log. Length rules (multiple of 4, at most 52) are checked
/// when the deal is built, where they are an integrity problem.
pub fn play_log_from_str(s: &str) -> Result<PlayLog, ParseError> {
    let mut log = PlayLog::default();

    for (i, token) in s.split_whitespace().enumerate() {
        let err = |reason: &str| ParseError::Play {
            token: token.to_string(),
            reason: reason.to_string(),
        };

        let card_token = match token.split_once(':') {
            Some((seat, card)) => {
                if i % 4 != 0 {
                    return Err(err("leader prefix in the middle of a trick"));
                }
                let leader =
                    direction_from_str(seat).map_err(|_| err("invalid leader prefix"))?;
                log.leads.push(leader);
                card
            }
            None => {
                if i % 4 == 0 {
                    return Err(err("first card of a trick needs a leader prefix"));
                }
                token
            }
        };

        let card = card_from_str(card_token).map_err(|_| err("invalid card"))?;
        log.cards.push(card);
    }

    Ok(log)
}

/// Format a play log, one leader prefix per group of four.
pub fn format_play_log(log: &PlayLog) -> String {
    log.cards
        .iter()
        .enumerate()
        .map(|(i, card)| match (i % 4, log.leads.get(i / 4)) {
            (0, Some(leader)) => format!("{}:{}", leader.to_char(), card.token()),
            _ => card.token(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}
