//! Tag-pair deal records.
//!
//! A record carries every token of one deal, one tag per line, in the
//! style of PBN tag pairs. Records are separated by blank lines:
//!
//! ```text
//! [Title "Board 7"]
//! [Dealer "S"]
//! [Vulnerable "None"]
//! [Declarer "N"]
//! [Contract "4H"]
//! [Deal "9876.765432..654 JT2..K9876542.32 AKQ.AKQJ.A.AKQJT 543.T98.QJT3.987"]
//! [Auction "P P 1C P 1H P 4H P P P"]
//! [Play "W:S2 SA S5 S9 N:DA D3 H2 DK"]
//! [Result "10"]
//! ```
//!
//! `Deal` lists the hands starting with the dealer.

mod reader;
mod writer;

pub use reader::{read_records, read_records_file, RecordReader};
pub use writer::{record_to_string, write_records};

use crate::deal::{build_deal, Deal, RawDeal};
use crate::error::{ParseError, Result};
use crate::types::SeatExt;

/// The raw tokens of one deal, as read from a record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DealRecord {
    /// Line the record starts on, 1-based; 0 for records built in memory.
    pub line: usize,
    pub title: Option<String>,
    pub dealer: Option<String>,
    pub vulnerable: Option<String>,
    pub declarer: Option<String>,
    pub contract: Option<String>,
    pub deal: Option<String>,
    pub auction: Option<String>,
    pub play: Option<String>,
    pub result: Option<String>,
}

impl DealRecord {
    /// Set a field from a tag. Returns false for tags this format does not use.
    pub fn apply_tag(&mut self, name: &str, value: &str) -> bool {
        let slot = match name {
            "Title" => &mut self.title,
            "Dealer" => &mut self.dealer,
            "Vulnerable" => &mut self.vulnerable,
            "Declarer" => &mut self.declarer,
            "Contract" => &mut self.contract,
            "Deal" => &mut self.deal,
            "Auction" => &mut self.auction,
            "Play" => &mut self.play,
            "Result" => &mut self.result,
            _ => return false,
        };
        *slot = Some(value.to_string());
        true
    }

    fn required<'a>(&self, field: &'a Option<String>, tag: &str) -> Result<&'a str> {
        field.as_deref().ok_or_else(|| {
            ParseError::Record {
                line: self.line,
                reason: format!("missing {tag} tag"),
            }
            .into()
        })
    }

    /// Decode and check the record's tokens.
    ///
    /// Vulnerable defaults to `None`, Declarer to `-`, Auction and Play to empty.
    pub fn build(&self) -> Result<Deal> {
        let dealer = self.required(&self.dealer, "Dealer")?;
        let contract = self.required(&self.contract, "Contract")?;
        let deal = self.required(&self.deal, "Deal")?;

        let hands: Vec<&str> = deal.split_whitespace().collect();
        let hands: [&str; 4] = hands.try_into().map_err(|hands: Vec<&str>| ParseError::Hand {
            token: deal.to_string(),
            reason: format!("expected 4 hands, got {}", hands.len()),
        })?;

        build_deal(&RawDeal {
            dealer,
            vulnerability: self.vulnerable.as_deref().unwrap_or("None"),
            declarer: self.declarer.as_deref().unwrap_or("-"),
            contract,
            hands,
            auction: self.auction.as_deref().unwrap_or(""),
            play: self.play.as_deref().unwrap_or(""),
            result: self.result.as_deref(),
        })
    }

    /// Encode a deal back into record tokens.
    pub fn from_deal(deal: &Deal) -> Self {
        use crate::codec;

        let hands: Vec<String> = (0..4)
            .map(|i| codec::format_hand(deal.hand(deal.dealer().rotate(i))))
            .collect();

        DealRecord {
            line: 0,
            title: None,
            dealer: Some(deal.dealer().to_char().to_string()),
            vulnerable: Some(codec::format_vulnerability(deal.vulnerability()).to_string()),
            declarer: Some(codec::format_direction(deal.declarer())),
            contract: Some(codec::format_contract(deal.contract())),
            deal: Some(hands.join(" ")),
            auction: Some(codec::format_bid_log(deal.auction())),
            play: Some(codec::format_play_log(deal.play())),
            result: deal.result().map(|tricks| tricks.to_string()),
        }
    }
}
