// Deal records shared by the unit tests.

use crate::deal::{build_deal, Deal, RawDeal};
use crate::types::RANKS;

/// Hands for a 4H contract by North, dealt by South (S, W, N, E order).
pub const HEARTS_HANDS: [&str; 4] = [
    "9876.765432..654",
    "JT2..K9876542.32",
    "AKQ.AKQJ.A.AKQJT",
    "543.T98.QJT3.987",
];

/// West leads a spade to North's ace; North cashes the diamond ace and South ruffs.
pub const HEARTS_PLAY: &str = "W:S2 SA S5 S9 N:DA D3 H2 DK";

pub fn hearts_raw(play: &str) -> RawDeal<'_> {
    RawDeal {
        dealer: "S",
        vulnerability: "None",
        declarer: "N",
        contract: "4H",
        hands: HEARTS_HANDS,
        auction: "P P 1C P 1H P 4H P P P",
        play,
        result: Some("10"),
    }
}

pub fn hearts_deal() -> Deal {
    build_deal(&hearts_raw(HEARTS_PLAY)).unwrap()
}

/// Each seat holds one whole suit: N spades, E hearts, S diamonds, W clubs.
pub const SUIT_HANDS: [&str; 4] = [
    "AKQJT98765432...",
    ".AKQJT98765432..",
    "..AKQJT98765432.",
    "...AKQJT98765432",
];

/// North leads every spade from the top; everyone else discards from the top.
pub fn suit_play() -> String {
    RANKS
        .iter()
        .rev()
        .map(|rank| {
            let c = rank.to_char();
            format!("N:S{c} H{c} D{c} C{c}")
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// 3NT by North with every trick won by North.
pub fn suit_deal() -> Deal {
    let play = suit_play();
    build_deal(&RawDeal {
        dealer: "N",
        vulnerability: "Both",
        declarer: "N",
        contract: "3NT",
        hands: SUIT_HANDS,
        auction: "3NT P P P",
        play: &play,
        result: None,
    })
    .unwrap()
}
