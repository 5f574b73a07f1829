//! Parsers and formatters for the compact tokens a deal log is made of.
//!
//! Every primitive has a `*_from_str` parser and a `format_*` counterpart:
//! ```text
//! direction     N E S W            (declarer may also be "-")
//! vulnerability None NS EW Both
//! contract      4H 3NT 2SX 1CXX Pass
//! hand          AKQT3.J6.KJ42.95   (spades.hearts.diamonds.clubs)
//! bid log       1C P 1H X XX P P P
//! play log      W:S2 SA S5 S9 N:DA D3 H2 DK
//! ```
//!
//! The functions are pure: no I/O and no state between calls.

mod auction;
mod play;

pub use auction::{bid_log_from_str, format_bid, format_bid_log};
pub use play::{format_play_log, play_log_from_str, PlayLog};

use crate::error::ParseError;
use crate::types::{
    Card, CardExt, CardSet, Contract, Direction, Doubled, Rank, Strain, Suit, Vulnerability,
    WRITTEN_SUITS,
};

/// Parse a seat token (`N`, `E`, `S`, `W`). Case-sensitive.
pub fn direction_from_str(s: &str) -> Result<Direction, ParseError> {
    match s {
        "N" => Ok(Direction::North),
        "E" => Ok(Direction::East),
        "S" => Ok(Direction::South),
        "W" => Ok(Direction::West),
        _ => Err(ParseError::Direction(s.to_string())),
    }
}

/// Parse a seat token that may be `-` for "no direction".
pub fn optional_direction_from_str(s: &str) -> Result<Option<Direction>, ParseError> {
    match s {
        "-" => Ok(None),
        _ => direction_from_str(s).map(Some),
    }
}

pub fn format_direction(dir: Option<Direction>) -> String {
    dir.map_or_else(|| "-".to_string(), |d| d.to_char().to_string())
}

/// Parse a vulnerability token into its 2-bit encoding.
pub fn vulnerability_from_str(s: &str) -> Result<Vulnerability, ParseError> {
    match s {
        "None" | "Love" | "-" => Ok(Vulnerability::None),
        "NS" => Ok(Vulnerability::NorthSouth),
        "EW" => Ok(Vulnerability::EastWest),
        "Both" | "All" => Ok(Vulnerability::Both),
        _ => Err(ParseError::Vulnerability(s.to_string())),
    }
}

pub fn format_vulnerability(vul: Vulnerability) -> &'static str {
    match vul {
        Vulnerability::None => "None",
        Vulnerability::NorthSouth => "NS",
        Vulnerability::EastWest => "EW",
        Vulnerability::Both => "Both",
    }
}

/// Split a `<level><strain>` prefix off a token, returning the rest.
pub(crate) fn split_level_strain(s: &str) -> Option<(u8, Strain, &str)> {
    let mut chars = s.chars();
    let level = chars.next()?.to_digit(10)?;
    if !(1..=7).contains(&level) {
        return None;
    }
    let rest = chars.as_str();
    let (strain, rest) = if let Some(rest) = rest.strip_prefix("NT") {
        (Strain::NoTrump, rest)
    } else {
        let mut chars = rest.chars();
        let strain = match chars.next()? {
            'N' => Strain::NoTrump,
            c => Strain::from_suit(suit_from_char(c)?),
        };
        (strain, chars.as_str())
    };
    Some((level as u8, strain, rest))
}

/// Parse a contract token; `Pass` (or `P`) means the deal was passed out.
pub fn contract_from_str(s: &str) -> Result<Contract, ParseError> {
    if s == "Pass" || s == "P" {
        return Ok(Contract::PassedOut);
    }

    let err = || ParseError::Contract(s.to_string());
    let (level, strain, rest) = split_level_strain(s).ok_or_else(err)?;
    let doubled = match rest {
        "" => Doubled::Undoubled,
        "X" => Doubled::Doubled,
        "XX" => Doubled::Redoubled,
        _ => return Err(err()),
    };

    Ok(Contract::new(level, strain, doubled))
}

pub fn format_contract(contract: &Contract) -> String {
    match contract {
        Contract::PassedOut => "Pass".to_string(),
        Contract::Bid {
            level,
            strain,
            doubled,
        } => {
            let doubling = match doubled {
                Doubled::Undoubled => "",
                Doubled::Doubled => "X",
                Doubled::Redoubled => "XX",
            };
            format!("{}{}{}", level, strain.symbol(), doubling)
        }
    }
}

/// Suit letters are upper case only.
fn suit_from_char(c: char) -> Option<Suit> {
    if c.is_ascii_uppercase() {
        Suit::from_char(c)
    } else {
        None
    }
}

/// Rank characters are digits or upper-case letters (`T` for ten).
fn rank_from_char(c: char) -> Option<Rank> {
    if c.is_ascii_digit() || c.is_ascii_uppercase() {
        Rank::from_char(c)
    } else {
        None
    }
}

/// Parse a card token: suit letter then rank letter (`SA`, `H2`, `DT`).
pub fn card_from_str(s: &str) -> Result<Card, ParseError> {
    let mut chars = s.chars();
    let card = match (chars.next(), chars.next(), chars.next()) {
        (Some(suit), Some(rank), None) => suit_from_char(suit)
            .zip(rank_from_char(rank))
            .map(|(suit, rank)| Card::new(suit, rank)),
        _ => None,
    };
    card.ok_or_else(|| ParseError::Card(s.to_string()))
}

/// Format a card as its two-character token.
pub fn format_card(card: &Card) -> String {
    card.token()
}

/// Parse a single seat's hand in `spades.hearts.diamonds.clubs` form.
///
/// The hand must hold exactly 13 distinct cards. An empty group is a void.
pub fn hand_from_str(s: &str) -> Result<Vec<Card>, ParseError> {
    let err = |reason: String| ParseError::Hand {
        token: s.to_string(),
        reason,
    };

    let groups: Vec<&str> = s.split('.').collect();
    if groups.len() != 4 {
        return Err(err(format!(
            "expected 4 suits separated by dots, got {}",
            groups.len()
        )));
    }

    let mut cards = Vec::with_capacity(13);
    let mut seen = CardSet::new();

    for (suit, group) in WRITTEN_SUITS.into_iter().zip(groups) {
        for c in group.chars() {
            let rank = rank_from_char(c).ok_or_else(|| err(format!("invalid rank {c:?}")))?;
            let card = Card::new(suit, rank);
            if !seen.insert(card) {
                return Err(err(format!("{} appears twice", card.token())));
            }
            cards.push(card);
        }
    }

    if cards.len() != 13 {
        return Err(err(format!("expected 13 cards, got {}", cards.len())));
    }

    Ok(cards)
}

/// Format a hand as `spades.hearts.diamonds.clubs`, ranks high to low.
pub fn format_hand(cards: &[Card]) -> String {
    WRITTEN_SUITS
        .iter()
        .map(|&suit| {
            let mut ranks: Vec<Rank> = cards
                .iter()
                .filter(|c| c.suit == suit)
                .map(|c| c.rank)
                .collect();
            ranks.sort_by(|a, b| b.cmp(a));
            ranks.into_iter().map(|rank| rank.to_char()).collect::<String>()
        })
        .collect::<Vec<_>>()
        .join(".")
}

/// Parse declarer's final trick count (0-13).
pub fn result_from_str(s: &str) -> Result<u8, ParseError> {
    s.parse::<u8>()
        .ok()
        .filter(|tricks| *tricks <= 13)
        .ok_or_else(|| ParseError::Result(s.to_string()))
}
