//! Bid log codec.

use super::split_level_strain;
use crate::error::ParseError;
use crate::types::Bid;

/// Parse a single bid token. A trailing `!` alert marker is accepted and dropped.
fn bid_from_str(token: &str) -> Result<Bid, ParseError> {
    let bid = token.strip_suffix('!').unwrap_or(token);

    match bid {
        "P" | "Pass" | "p" => Ok(Bid::Pass),
        "X" | "D" | "d" => Ok(Bid::Double),
        "XX" | "R" | "r" => Ok(Bid::Redouble),
        _ => match split_level_strain(bid) {
            Some((level, strain, "")) => Ok(Bid::Call { level, strain }),
            _ => Err(ParseError::Bid(token.to_string())),
        },
    }
}

/// Split a whitespace-delimited bid log into bids, in the order they were made.
pub fn bid_log_from_str(s: &str) -> Result<Vec<Bid>, ParseError> {
    s.split_whitespace().map(bid_from_str).collect()
}

pub fn format_bid(bid: &Bid) -> String {
    match bid {
        Bid::Pass => "P".to_string(),
        Bid::Double => "X".to_string(),
        Bid::Redouble => "XX".to_string(),
        Bid::Call { level, strain } => format!("{}{}", level, strain.symbol()),
    }
}

pub fn format_bid_log(bids: &[Bid]) -> String {
    bids.iter().map(format_bid).collect::<Vec<_>>().join(" ")
}
