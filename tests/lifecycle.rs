//! League lifecycle: membership, settings, the snake draft, and the
//! offseason rollover into a new season.

use harvest_league::store::memory::{MemoryClock, MemoryPlayers, MemoryPool, RecordingMarket};
use harvest_league::store::PlayerStore;
use harvest_league::{
    continue_league_new_season, create_league, delete_league, generate_matchup_schedule,
    join_league, kick_player, leave_league, record_pick, start_draft, update_settings,
    ArchivedTeam, Farmer, FarmerTally, League, LeagueError, LeagueSettings, LeagueStatus, Role,
};
use std::collections::{BTreeMap, HashMap};

fn league_of(players: &[&str]) -> League {
    let mut league = League::new("TESTCODE", "Test League", players[0]);
    for p in &players[1..] {
        join_league(&mut league, *p).unwrap();
    }
    league.matchup_schedule = generate_matchup_schedule(&league);
    league
}

#[test]
fn new_leagues_start_with_defaults() {
    let league = create_league("Harvest Cup", "host");

    assert_eq!(league.code.len(), 8);
    assert!(league.code.chars().all(|c| c.is_ascii_hexdigit()));
    assert_eq!(league.status, LeagueStatus::Forming);
    assert_eq!(league.players, vec!["host"]);
    assert_eq!(league.matchdays, 30);
    assert!(league.use_playoffs);
    assert!(!league.settings_locked);
    assert_eq!(league.matchup_schedule["host"].len(), 10);
}

#[test]
fn joining_twice_is_rejected() {
    let mut league = league_of(&["host"]);

    join_league(&mut league, "guest").unwrap();
    let err = join_league(&mut league, "guest").unwrap_err();

    assert!(matches!(err, LeagueError::AlreadyMember(_)));
    assert_eq!(league.players.len(), 2);
}

#[test]
fn membership_changes_regenerate_the_schedule() {
    let mut league = league_of(&["host", "a", "b"]);

    join_league(&mut league, "c").unwrap();
    assert!(league.matchup_schedule.contains_key("c"));

    leave_league(&mut league, "c").unwrap();
    assert!(!league.matchup_schedule.contains_key("c"));
}

#[test]
fn hosts_cannot_leave_their_own_league() {
    let mut league = league_of(&["host", "a"]);
    assert!(matches!(
        leave_league(&mut league, "host"),
        Err(LeagueError::HostCannotLeave)
    ));
    assert!(matches!(
        leave_league(&mut league, "stranger"),
        Err(LeagueError::NotAMember(_))
    ));
}

#[test]
fn only_the_host_edits_settings() {
    let mut league = league_of(&["host", "a"]);
    let settings = LeagueSettings {
        matchdays: 12,
        use_playoffs: true,
        playoff_cutoff: 4,
        lock_market_in_playoffs: false,
    };

    assert!(matches!(
        update_settings(&mut league, "a", settings),
        Err(LeagueError::NotHost)
    ));

    update_settings(&mut league, "host", settings).unwrap();
    assert_eq!(league.matchdays, 12);
    // Schedule is resized to the new season length: 12 / 3 cycles.
    assert_eq!(league.matchup_schedule["host"].len(), 4);
}

#[test]
fn scheduling_the_draft_freezes_the_league() {
    let mut league = league_of(&["host", "a"]);
    start_draft(&mut league, "host").unwrap();

    assert_eq!(league.status, LeagueStatus::Drafting);
    assert!(league.settings_locked);
    assert!(league.draft_time.is_some());

    assert!(matches!(
        join_league(&mut league, "late"),
        Err(LeagueError::SettingsLocked)
    ));
    assert!(matches!(
        leave_league(&mut league, "a"),
        Err(LeagueError::SettingsLocked)
    ));
    let settings = LeagueSettings {
        matchdays: 9,
        use_playoffs: false,
        playoff_cutoff: 2,
        lock_market_in_playoffs: false,
    };
    assert!(matches!(
        update_settings(&mut league, "host", settings),
        Err(LeagueError::SettingsLocked)
    ));
}

#[test]
fn snake_order_alternates_direction_each_round() {
    let mut league = league_of(&["host", "a", "b"]);
    start_draft(&mut league, "host").unwrap();

    // Three members picking five farmers each.
    assert_eq!(league.snake_order.len(), 15);
    let first_round = &league.snake_order[0..3];
    let second_round: Vec<String> = league.snake_order[3..6].iter().rev().cloned().collect();
    assert_eq!(first_round, second_round.as_slice());
    for member in ["host", "a", "b"] {
        assert_eq!(league.snake_order.iter().filter(|p| *p == member).count(), 5);
    }
}

#[test]
fn completing_the_draft_activates_the_league_and_resets_the_clock() {
    let mut league = league_of(&["host", "a"]);
    start_draft(&mut league, "host").unwrap();
    let mut players = MemoryPlayers::default();
    let mut clock = MemoryClock(17);

    let mut next_role: HashMap<String, usize> = HashMap::new();
    for pick in 0..league.snake_order.len() {
        let picker = league.snake_order[pick].clone();
        let slot = next_role.entry(picker.clone()).or_insert(0);
        let role = Role::ALL[*slot];
        *slot += 1;
        let farmer = Farmer::new(format!("Farmer {pick}"), 6, 6, 6, 6);
        record_pick(&mut league, &picker, farmer, role, &mut players, &mut clock).unwrap();
    }

    assert!(league.draft_complete);
    assert_eq!(league.status, LeagueStatus::Active);
    assert!(league.draft_time.is_none());
    assert_eq!(clock.0, 0);
    assert_eq!(league.picked_farmers.len(), 10);
    assert!(players.player("host").has_complete_roster());
    assert!(players.player("a").has_complete_roster());
}

#[test]
fn picking_out_of_turn_is_rejected() {
    let mut league = league_of(&["host", "a"]);
    start_draft(&mut league, "host").unwrap();
    let mut players = MemoryPlayers::default();
    let mut clock = MemoryClock(0);

    let on_turn = league.snake_order[0].clone();
    let not_on_turn = if on_turn == "host" { "a" } else { "host" };
    let err = record_pick(
        &mut league,
        not_on_turn,
        Farmer::new("Hank", 6, 6, 6, 6),
        Role::FixMeiser,
        &mut players,
        &mut clock,
    )
    .unwrap_err();

    assert_eq!(err, LeagueError::NotYourTurn(on_turn));
    assert_eq!(league.picks_made, 0);
}

#[test]
fn farmers_and_roles_are_single_use() {
    let mut league = league_of(&["host", "a"]);
    start_draft(&mut league, "host").unwrap();
    let mut players = MemoryPlayers::default();
    let mut clock = MemoryClock(0);

    // With two members the second and third picks belong to the same person.
    let first = league.snake_order[0].clone();
    let second = league.snake_order[1].clone();
    record_pick(
        &mut league,
        &first,
        Farmer::new("Hank", 6, 6, 6, 6),
        Role::FixMeiser,
        &mut players,
        &mut clock,
    )
    .unwrap();

    let dup_farmer = record_pick(
        &mut league,
        &second,
        Farmer::new("Hank", 4, 4, 4, 4),
        Role::FixMeiser,
        &mut players,
        &mut clock,
    )
    .unwrap_err();
    assert!(matches!(dup_farmer, LeagueError::FarmerAlreadyPicked(_)));

    record_pick(
        &mut league,
        &second,
        Farmer::new("Joe", 4, 4, 4, 4),
        Role::FixMeiser,
        &mut players,
        &mut clock,
    )
    .unwrap();
    let dup_role = record_pick(
        &mut league,
        &second,
        Farmer::new("Pete", 4, 4, 4, 4),
        Role::FixMeiser,
        &mut players,
        &mut clock,
    )
    .unwrap_err();
    assert_eq!(dup_role, LeagueError::RoleOccupied(Role::FixMeiser));
}

#[test]
fn kicked_players_lose_record_and_state() {
    let mut league = league_of(&["host", "a", "b"]);
    league.draft_complete = true;
    league.records.entry("b".to_string()).or_default().wins = 2;
    let mut players = MemoryPlayers::default();
    let mut state = players.player("b");
    state.matchday = 4;
    players.set_player("b", state);

    assert!(matches!(
        kick_player(&mut league, "a", "b", &mut players),
        Err(LeagueError::NotHost)
    ));

    kick_player(&mut league, "host", "b", &mut players).unwrap();
    assert!(!league.is_member("b"));
    assert!(!league.records.contains_key("b"));
    assert!(!league.matchup_schedule.contains_key("b"));
    assert_eq!(players.player("b").matchday, 0);
}

#[test]
fn deleting_a_league_clears_state_and_resets_the_clock() {
    let mut leagues = BTreeMap::new();
    let mut league = league_of(&["host", "a"]);
    league.draft_complete = true;
    leagues.insert("TESTCODE".to_string(), league);
    let mut players = MemoryPlayers::default();
    let mut state = players.player("a");
    state.matchday = 4;
    players.set_player("a", state);
    let mut clock = MemoryClock(4);
    let mut market = RecordingMarket::default();

    assert!(matches!(
        delete_league(&mut leagues, "TESTCODE", "a", &mut players, &mut clock, &mut market),
        Err(LeagueError::NotHost)
    ));
    assert!(matches!(
        delete_league(&mut leagues, "NOPE", "host", &mut players, &mut clock, &mut market),
        Err(LeagueError::UnknownLeague(_))
    ));
    assert_eq!(clock.0, 4);

    delete_league(&mut leagues, "TESTCODE", "host", &mut players, &mut clock, &mut market)
        .unwrap();

    assert!(leagues.is_empty());
    assert_eq!(players.player("a"), Default::default());
    assert_eq!(market.resets, vec!["TESTCODE"]);
    assert_eq!(clock.0, 0);
}

fn finished_league() -> League {
    let mut league = league_of(&["host", "a"]);
    league.status = LeagueStatus::Finished;
    league.winner = Some("host".to_string());
    league.draft_complete = true;
    league.settings_locked = true;
    league.records.entry("host".to_string()).or_default().wins = 2;
    league.recorded_matchups.insert("a_vs_host_cycle_0".to_string());
    league.archived_teams.insert(
        "host".to_string(),
        ArchivedTeam {
            team: [(Role::FixMeiser, Farmer::new("Hank", 4, 7, 5, 8))]
                .into_iter()
                .collect(),
            final_points: 60,
            matchdays_played: 6,
            team_name: "Golden Acres".to_string(),
            profile_pic: String::new(),
        },
    );
    league.farmer_tallies.insert(
        "Hank".to_string(),
        FarmerTally {
            games_played: 6,
            total_points: 66,
            total_injuries: 0,
        },
    );
    league
}

#[test]
fn continuing_requires_a_finished_season() {
    let mut league = league_of(&["host", "a"]);
    let mut clock = MemoryClock(6);
    let mut players = MemoryPlayers::default();
    let mut pool = MemoryPool::default();
    let mut market = RecordingMarket::default();

    let err = continue_league_new_season(
        &mut league,
        &mut clock,
        &mut players,
        &mut pool,
        &mut market,
    )
    .unwrap_err();
    assert_eq!(err, LeagueError::InvalidState);
}

#[test]
fn undrafted_farmers_keep_their_stats() {
    let mut league = finished_league();
    let mut clock = MemoryClock(6);
    let mut players = MemoryPlayers::default();
    // Joe played zero games; nothing in the season tells us how he would
    // have fared, so the rollover must not dock him.
    let mut pool = MemoryPool {
        base: vec![Farmer::new("Joe", 8, 5, 5, 5)],
        ..MemoryPool::default()
    };
    let mut market = RecordingMarket::default();

    continue_league_new_season(&mut league, &mut clock, &mut players, &mut pool, &mut market)
        .unwrap();

    let joe = pool.per_league["TESTCODE"]
        .iter()
        .find(|f| f.name == "Joe")
        .unwrap();
    // The random best-stat boost may raise strength; nothing may fall.
    assert!(joe.strength >= 8, "strength dropped to {}", joe.strength);
    assert_eq!(joe.handy, 5);
    assert_eq!(joe.stamina, 5);
    assert_eq!(joe.physical, 5);
}

#[test]
fn offseason_rollover_resets_the_league_and_evolves_the_pool() {
    let mut league = finished_league();
    let mut clock = MemoryClock(6);
    let mut players = MemoryPlayers::default();
    let mut pool = MemoryPool {
        base: vec![
            Farmer::new("Hank", 4, 7, 5, 8),
            Farmer::new("Joe", 5, 5, 5, 5),
        ],
        ..MemoryPool::default()
    };
    let mut market = RecordingMarket::default();

    continue_league_new_season(&mut league, &mut clock, &mut players, &mut pool, &mut market)
        .unwrap();

    // League identity and settings survive; every trace of the season goes.
    assert_eq!(league.status, LeagueStatus::Forming);
    assert_eq!(league.players, vec!["host", "a"]);
    assert!(!league.settings_locked);
    assert!(!league.draft_complete);
    assert!(league.winner.is_none());
    assert!(league.records.is_empty());
    assert!(league.recorded_matchups.is_empty());
    assert!(league.archived_teams.is_empty());
    assert!(league.farmer_tallies.is_empty());
    assert_eq!(league.matchup_schedule["host"].len(), league.total_cycles());
    assert_eq!(clock.0, 0);
    assert_eq!(market.resets, vec!["TESTCODE"]);
    assert_eq!(players.player("host"), Default::default());

    // The archive reflects the tallies captured at finish time.
    let archive = &pool.archives["TESTCODE"];
    let hank = &archive["Hank"];
    assert_eq!(hank.games_played, 6);
    assert_eq!(hank.total_points, 66);
    assert!(hank.was_drafted);
    assert_eq!(hank.best_role, Role::FixMeiser);
    assert!(!archive["Joe"].was_drafted);

    // Hank averaged 11 points with a role stat of 7: the progression bumps
    // it, and the small pool guarantees a random boost on top.
    let evolved = &pool.per_league["TESTCODE"];
    let hank = evolved.iter().find(|f| f.name == "Hank").unwrap();
    assert!(hank.handy >= 8 && hank.handy <= 10);
    for farmer in evolved {
        for stat in [farmer.strength, farmer.handy, farmer.stamina, farmer.physical] {
            assert!((1..=10).contains(&stat), "{} has stat {stat}", farmer.name);
        }
    }
}
