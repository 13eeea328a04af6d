//! potsplit CLI
//!
//! Track a cash-game session and settle it from the command line. State
//! lives in a single JSON file between invocations.
//!
//! # Usage
//!
//! ```bash
//! # Seat players with their buy-ins
//! potsplit add Alice 50
//! potsplit add Bob 50
//!
//! # Start play, record rebuys and final payouts
//! potsplit start
//! potsplit rebuy Bob 25
//! potsplit payout Alice 100
//! potsplit payout Bob 25
//!
//! # Who pays whom
//! potsplit settle
//! ```

use potsplit::core::money::round_to_cents;
use potsplit::core::player::PlayerId;
use potsplit::core::session::{Phase, Session};
use potsplit::simulation::generator::{generate_random_table, TableConfig};
use potsplit::store::file_store::{FileStore, DEFAULT_STORE_PATH};
use potsplit::store::snapshot::SessionSnapshot;
use rust_decimal::Decimal;
use std::process;

fn print_usage() {
    eprintln!(
        r#"potsplit - cash-game ledger and settlement

USAGE:
    potsplit <COMMAND> [OPTIONS]

COMMANDS:
    add <NAME> <AMOUNT>      Seat a player with their initial buy-in
    start                    Start the game (needs at least 2 players)
    rebuy <NAME> <AMOUNT>    Record an additional buy-in
    payout <NAME> <AMOUNT>   Record what a player cashed out
    settle                   Compute who pays whom and freeze the session
    show                     Print the current session
    reset                    Wipe the session and delete its file
    generate                 Generate a random in-play table (for testing)
    help                     Show this message

OPTIONS:
    --file <FILE>       Session file (default: potsplit.json)
    --format <FORMAT>   Output format for show/settle: text (default) or json

OPTIONS (generate):
    --players <N>       Number of players (default: 8)
    --min-buy-in <X>    Smallest buy-in (default: 20)
    --max-buy-in <X>    Largest buy-in (default: 200)
    --rebuys <P>        Chance a player rebuys once, 0.0 to 1.0 (default: 0.3)

EXAMPLES:
    potsplit add Alice 50
    potsplit add Bob 50
    potsplit start
    potsplit payout Alice 80
    potsplit payout Bob 20
    potsplit settle
    potsplit generate --players 6 --file night.json"#
    );
}

/// Pull `--file <FILE>` out of the args; everything else passes through.
fn extract_store(args: &[String]) -> (FileStore, Vec<String>) {
    let mut path = DEFAULT_STORE_PATH.to_string();
    let mut rest = Vec::new();
    let mut i = 0;
    while i < args.len() {
        if args[i] == "--file" {
            i += 1;
            path = args.get(i).cloned().unwrap_or_else(|| {
                eprintln!("--file requires a path");
                process::exit(1);
            });
        } else {
            rest.push(args[i].clone());
        }
        i += 1;
    }
    (FileStore::new(path), rest)
}

fn save_or_die(store: &FileStore, session: &Session) {
    if let Err(e) = store.try_save(session) {
        eprintln!("Error saving session to '{}': {}", store.path().display(), e);
        process::exit(1);
    }
}

fn parse_amount(raw: &str) -> Decimal {
    raw.parse().unwrap_or_else(|e| {
        eprintln!("Invalid amount '{}': {}", raw, e);
        process::exit(1);
    })
}

fn resolve_player(session: &Session, name: &str) -> PlayerId {
    match session.player_by_name(name) {
        Some(player) => player.id(),
        None => {
            eprintln!("No player named '{}' at the table", name);
            process::exit(1);
        }
    }
}

fn fmt_money(amount: Decimal) -> String {
    format!("${:.2}", amount)
}

fn fmt_net(net: Decimal) -> String {
    if net < Decimal::ZERO {
        format!("-${:.2}", net.abs())
    } else {
        format!("+${:.2}", net)
    }
}

fn cmd_add(args: &[String]) {
    let (store, rest) = extract_store(args);
    if rest.len() != 2 {
        eprintln!("Usage: potsplit add <NAME> <AMOUNT>");
        process::exit(1);
    }
    let amount = parse_amount(&rest[1]);

    let mut session = store.load();
    match session.add_player(&rest[0], amount) {
        Ok(_) => {
            save_or_die(&store, &session);
            println!(
                "Seated {} with a {} buy-in ({} players, {} on the table)",
                rest[0].trim(),
                fmt_money(round_to_cents(amount)),
                session.player_count(),
                fmt_money(session.pot())
            );
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}

fn cmd_start(args: &[String]) {
    let (store, rest) = extract_store(args);
    if !rest.is_empty() {
        eprintln!("Unknown option: {}", rest[0]);
        process::exit(1);
    }

    let mut session = store.load();
    match session.start_game() {
        Ok(()) => {
            save_or_die(&store, &session);
            println!(
                "Game on: {} players, {} on the table",
                session.player_count(),
                fmt_money(session.pot())
            );
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}

fn cmd_rebuy(args: &[String]) {
    let (store, rest) = extract_store(args);
    if rest.len() != 2 {
        eprintln!("Usage: potsplit rebuy <NAME> <AMOUNT>");
        process::exit(1);
    }
    let amount = parse_amount(&rest[1]);

    let mut session = store.load();
    let id = resolve_player(&session, &rest[0]);
    match session.add_rebuy(id, amount) {
        Ok(()) => {
            save_or_die(&store, &session);
            let total = session
                .player(id)
                .map(|p| p.total_buy_in())
                .unwrap_or_default();
            println!(
                "Rebuy of {} recorded; {} is in for {}",
                fmt_money(round_to_cents(amount)),
                rest[0].trim(),
                fmt_money(total)
            );
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}

fn cmd_payout(args: &[String]) {
    let (store, rest) = extract_store(args);
    if rest.len() != 2 {
        eprintln!("Usage: potsplit payout <NAME> <AMOUNT>");
        process::exit(1);
    }

    let mut session = store.load();
    let id = resolve_player(&session, &rest[0]);
    match session.set_payout(id, &rest[1]) {
        Ok(()) => {
            save_or_die(&store, &session);
            let payout = session.player(id).map(|p| p.payout()).unwrap_or_default();
            println!(
                "Payout of {} recorded for {}",
                fmt_money(round_to_cents(payout)),
                rest[0].trim()
            );
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}

fn cmd_settle(args: &[String]) {
    let (store, rest) = extract_store(args);
    let mut format = "text".to_string();
    let mut i = 0;
    while i < rest.len() {
        match rest[i].as_str() {
            "--format" => {
                i += 1;
                format = rest.get(i).cloned().unwrap_or_else(|| {
                    eprintln!("--format requires 'text' or 'json'");
                    process::exit(1);
                });
            }
            _ => {
                eprintln!("Unknown option: {}", rest[i]);
                process::exit(1);
            }
        }
        i += 1;
    }

    let mut session = store.load();
    match session.settle() {
        Ok(report) => {
            save_or_die(&store, &session);
            if format == "json" {
                println!("{}", serde_json::to_string_pretty(&report).unwrap());
            } else {
                println!("{}", report);
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}

fn cmd_show(args: &[String]) {
    let (store, rest) = extract_store(args);
    let mut format = "text".to_string();
    let mut i = 0;
    while i < rest.len() {
        match rest[i].as_str() {
            "--format" => {
                i += 1;
                format = rest.get(i).cloned().unwrap_or_else(|| {
                    eprintln!("--format requires 'text' or 'json'");
                    process::exit(1);
                });
            }
            _ => {
                eprintln!("Unknown option: {}", rest[i]);
                process::exit(1);
            }
        }
        i += 1;
    }

    let session = store.load();
    if format == "json" {
        let snapshot = SessionSnapshot::capture(&session);
        println!("{}", serde_json::to_string_pretty(&snapshot).unwrap());
        return;
    }

    println!("=== Session ===");
    println!("Phase:          {}", session.phase());
    println!("Players:        {}", session.player_count());
    println!("Total buy-ins:  {}", fmt_money(session.total_buy_ins()));
    println!("Total payouts:  {}", fmt_money(session.total_payouts()));

    if session.player_count() > 0 {
        println!();
        for player in session.players() {
            println!(
                "  {:<14} buy-in {:>9}  rebuys {:>2}  total {:>9}  payout {:>9}  net {:>9}",
                player.name(),
                fmt_money(player.buy_in()),
                player.additional_buy_ins().len(),
                fmt_money(player.total_buy_in()),
                fmt_money(round_to_cents(player.payout())),
                fmt_net(player.net_result())
            );
        }
    }

    if session.phase() == Phase::Settled {
        println!();
        if session.settlements().is_empty() {
            println!("No transfers needed. Everyone broke even.");
        } else {
            println!("Settlements:");
            for transfer in session.settlements() {
                println!("  {}", transfer);
            }
        }
    }
}

fn cmd_reset(args: &[String]) {
    let (store, rest) = extract_store(args);
    if !rest.is_empty() {
        eprintln!("Unknown option: {}", rest[0]);
        process::exit(1);
    }

    if let Err(e) = store.try_clear() {
        eprintln!("Error clearing '{}': {}", store.path().display(), e);
        process::exit(1);
    }
    println!("Session cleared");
}

fn cmd_generate(args: &[String]) {
    let (store, rest) = extract_store(args);
    let mut players = 8usize;
    let mut min_buy_in = Decimal::from(20);
    let mut max_buy_in = Decimal::from(200);
    let mut rebuy_probability = 0.3f64;
    let mut i = 0;
    while i < rest.len() {
        match rest[i].as_str() {
            "--players" => {
                i += 1;
                players = rest.get(i).and_then(|s| s.parse().ok()).unwrap_or_else(|| {
                    eprintln!("--players requires a number");
                    process::exit(1);
                });
            }
            "--min-buy-in" => {
                i += 1;
                min_buy_in = rest.get(i).and_then(|s| s.parse().ok()).unwrap_or_else(|| {
                    eprintln!("--min-buy-in requires an amount");
                    process::exit(1);
                });
            }
            "--max-buy-in" => {
                i += 1;
                max_buy_in = rest.get(i).and_then(|s| s.parse().ok()).unwrap_or_else(|| {
                    eprintln!("--max-buy-in requires an amount");
                    process::exit(1);
                });
            }
            "--rebuys" => {
                i += 1;
                rebuy_probability =
                    rest.get(i).and_then(|s| s.parse().ok()).unwrap_or_else(|| {
                        eprintln!("--rebuys requires a probability");
                        process::exit(1);
                    });
            }
            _ => {
                eprintln!("Unknown option: {}", rest[i]);
                process::exit(1);
            }
        }
        i += 1;
    }

    if players < 2 {
        eprintln!("--players must be at least 2");
        process::exit(1);
    }
    if min_buy_in <= Decimal::ZERO || max_buy_in < min_buy_in {
        eprintln!("buy-in range must be positive with min <= max");
        process::exit(1);
    }
    if !(0.0..=1.0).contains(&rebuy_probability) {
        eprintln!("--rebuys must be between 0.0 and 1.0");
        process::exit(1);
    }

    let config = TableConfig {
        player_count: players,
        min_buy_in,
        max_buy_in,
        rebuy_probability,
    };
    let session = generate_random_table(&config);
    save_or_die(&store, &session);
    eprintln!(
        "Generated a {}-player table with {} in play → {}",
        players,
        fmt_money(session.pot()),
        store.path().display()
    );
}

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    let command = args[1].as_str();
    let rest = &args[2..];

    match command {
        "add" => cmd_add(rest),
        "start" => cmd_start(rest),
        "rebuy" => cmd_rebuy(rest),
        "payout" => cmd_payout(rest),
        "settle" => cmd_settle(rest),
        "show" => cmd_show(rest),
        "reset" => cmd_reset(rest),
        "generate" => cmd_generate(rest),
        "help" | "--help" | "-h" => print_usage(),
        _ => {
            eprintln!("Unknown command: {}", command);
            print_usage();
            process::exit(1);
        }
    }
}
