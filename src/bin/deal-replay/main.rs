//! deal-replay - Step through the tricks of recorded bridge deals
//!
//! Reads a file of tag-pair deal records and prints the table at each trick
//! (or at one chosen trick) the way a review screen would show it:
//! - the four hands still held, in trump-aware order
//! - the trick on the table and its winner
//! - the running trick tally for both sides
//!
//! Usage: deal-replay --input <deals.txt> [--trick <n>] [--viewer S] [--json]

use bridge_replay::codec::{
    direction_from_str, format_bid, format_contract, format_direction, format_hand,
};
use bridge_replay::{
    read_records_file, CardExt, DealRecord, Direction, Error, Phase, ReplayController,
    ReplayOptions, ReplayView, SeatExt,
};
use clap::Parser;
use std::path::Path;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "deal-replay")]
#[command(about = "Trick-by-trick review of recorded bridge deals")]
#[command(version)]
struct Args {
    /// Input file of deal records
    #[arg(short = 'i', long = "input", required = true)]
    input: String,

    /// Show only this position (0 = before the opening lead)
    #[arg(short = 't', long = "trick")]
    trick: Option<usize>,

    /// Seat drawn at the bottom of the table (N, E, S or W)
    #[arg(long = "viewer", default_value = "S", value_parser = parse_viewer)]
    viewer: Direction,

    /// Print views as JSON lines
    #[arg(long = "json")]
    json: bool,

    /// Print each starting deal as a PBN deal string
    #[arg(long = "pbn")]
    pbn: bool,

    /// Verbose output - log engine transitions
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,
}

fn parse_viewer(s: &str) -> Result<Direction, String> {
    direction_from_str(s).map_err(|e| e.to_string())
}

fn main() {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let records = match read_records_file(Path::new(&args.input)) {
        Ok(records) => records,
        Err(e) => {
            eprintln!("Error in '{}': {}", args.input, e);
            std::process::exit(1);
        }
    };

    let mut failed = 0;
    for record in &records {
        if let Err(e) = review(record, &args) {
            eprintln!("Deal at line {}: {}", record.line, e);
            failed += 1;
        }
    }

    if args.verbose {
        eprintln!("Reviewed {} deal(s), {} rejected", records.len(), failed);
    }
    if failed > 0 {
        std::process::exit(1);
    }
}

/// Build one record and print the positions asked for.
fn review(record: &DealRecord, args: &Args) -> Result<(), Error> {
    let deal = record.build()?;
    let options = ReplayOptions {
        viewer: args.viewer,
    };
    let mut replay = ReplayController::with_options(deal, options);

    if !args.json {
        print_header(record, &replay);
    }
    if args.pbn {
        println!("[Deal \"{}\"]", replay.deal().to_pbn());
    }

    let positions: Vec<usize> = match args.trick {
        Some(n) => vec![n.min(replay.engine().max_trick())],
        None => (0..=replay.engine().max_trick()).collect(),
    };

    for index in positions {
        replay.seek(index);
        let view = replay.current_view();
        if args.json {
            match serde_json::to_string(&view) {
                Ok(line) => println!("{}", line),
                Err(e) => eprintln!("Error serializing view: {}", e),
            }
        } else {
            print_view(&view);
        }
    }
    Ok(())
}

fn print_header(record: &DealRecord, replay: &ReplayController) {
    let deal = replay.deal();
    if let Some(title) = &record.title {
        println!("{}", title);
    }
    println!(
        "Dealer {}, contract {} by {}",
        deal.dealer().seat_name(),
        format_contract(deal.contract()),
        format_direction(deal.declarer())
    );
    if !deal.auction().is_empty() {
        let calls: Vec<String> = deal
            .auction_calls()
            .map(|(seat, bid)| format!("{}:{}", seat.to_char(), format_bid(&bid)))
            .collect();
        println!("Auction: {}", calls.join(" "));
    }
}

fn print_view(view: &ReplayView) {
    match view.phase {
        Phase::Auction => println!("-- before the opening lead --"),
        Phase::Play => println!("-- trick {} of {} --", view.play_index, view.max_trick),
    }
    for seat in &view.seats {
        let marker = if seat.dealer { "*" } else { " " };
        let vul = if seat.vulnerable { " (vul)" } else { "" };
        let position = format!("{:?}", seat.position);
        println!(
            "{}{:<6} {:<7} {}{}",
            marker,
            seat.seat.seat_name(),
            position,
            format_hand(&seat.cards),
            vul
        );
    }
    if !view.table.is_empty() {
        let plays: Vec<String> = view
            .table
            .iter()
            .map(|p| format!("{}:{}", p.seat.to_char(), p.card.token()))
            .collect();
        let winner = view
            .table_winner
            .map(SeatExt::seat_name)
            .unwrap_or_default();
        println!("Table: {}  won by {}", plays.join(" "), winner);
    }
    if let Some(tally) = view.tally {
        println!("Tricks: {}", tally);
    }
    if let Some(total) = view.final_tricks {
        println!("Declarer took {} trick(s)", total);
    }
}
