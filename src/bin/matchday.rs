//! Automated matchday runner over a JSON data directory.
//! Run with: cargo run --bin matchday
//! Configure with env: HARVEST_DATA_DIR (default "."), TICK_SECONDS
//! (default 120), RUST_LOG. Pass --once to run a single tick and exit.

use harvest_league::advance_tick;
use harvest_league::sim::StatSimulator;
use harvest_league::store::file::{FileClock, FileLeagues, FileMarket, FilePlayers};
use std::time::Duration;

fn main() {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let data_dir = std::env::var("HARVEST_DATA_DIR").unwrap_or_else(|_| ".".to_string());
    let tick_seconds: u64 = std::env::var("TICK_SECONDS")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(120);
    let once = std::env::args().any(|a| a == "--once");

    let mut clock = FileClock::new(&data_dir);
    let mut players = FilePlayers::new(&data_dir);
    let league_store = FileLeagues::new(&data_dir);
    let mut market = FileMarket::new(&data_dir);
    let mut sim = StatSimulator;

    log::info!(
        "matchday runner started (data dir: {}, every {}s)",
        data_dir,
        tick_seconds
    );

    loop {
        let mut leagues = league_store.load();
        let report = advance_tick(&mut leagues, &mut clock, &mut players, &mut sim, &mut market);
        if let Err(e) = league_store.save(&leagues) {
            log::error!("failed to persist leagues: {}", e);
        }
        log::info!(
            "tick finished: {} player(s) advanced, {} failure(s)",
            report.advanced_count(),
            report.failures.len()
        );
        if once {
            break;
        }
        std::thread::sleep(Duration::from_secs(tick_seconds));
    }
}
