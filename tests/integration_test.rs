use arena_leaderboards::models::{StatRecord, Weapon, WeaponShots};
use arena_leaderboards::source::StaticSource;
use arena_leaderboards::{parse_request, Family, LeaderboardService, Period, Settings};
use chrono::{DateTime, TimeZone, Utc};
use std::collections::HashMap;
use std::sync::Arc;

fn match_record(match_id: &str, name: &str, at: DateTime<Utc>) -> StatRecord {
    StatRecord {
        player_id: None,
        name: name.to_string(),
        match_id: match_id.to_string(),
        timestamp: Some(at),
        kills: 0,
        deaths: 0,
        damage_dealt: 0,
        damage_taken: 0,
        win: false,
        loss: false,
        medals: HashMap::new(),
        weapons: HashMap::new(),
    }
}

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 15, 13, 0, 0).unwrap()
}

fn service(records: Vec<StatRecord>) -> LeaderboardService {
    LeaderboardService::new(Arc::new(StaticSource::new(records)), Settings::default()).unwrap()
}

#[tokio::test]
async fn week_window_keeps_only_this_weeks_matches() {
    let in_week = Utc.with_ymd_and_hms(2024, 5, 13, 0, 0, 0).unwrap();
    let last_week = Utc.with_ymd_and_hms(2024, 5, 12, 23, 59, 59).unwrap();

    let mut current = match_record("m1", "Alice", in_week);
    current.kills = 7;
    let mut stale = match_record("m0", "Alice", last_week);
    stale.kills = 100;

    let table = service(vec![current, stale])
        .leaderboard(Family::Kills, Period::Week, now())
        .await
        .unwrap();

    assert_eq!(table.entries.len(), 1);
    assert_eq!(table.entries[0].values[0], "7");
}

#[tokio::test]
async fn rendered_table_is_rectangular_and_titled() {
    let mut alice = match_record("m1", "Alice", now());
    alice.kills = 10;
    alice.deaths = 4;
    let mut bob = match_record("m1", "^1Bob^7", now());
    bob.kills = 3;
    bob.deaths = 9;

    let table = service(vec![alice, bob])
        .leaderboard(Family::Kills, Period::Day, now())
        .await
        .unwrap();
    let text = table.render();

    assert!(text.contains("Kills (today)"));
    assert!(text.contains("^1Bob^7"));
    let widths: Vec<usize> = text
        .lines()
        .map(|line| arena_leaderboards::render::strip_formatting(line).chars().count())
        .collect();
    assert!(widths.windows(2).all(|pair| pair[0] == pair[1]));
}

#[tokio::test]
async fn best_players_combine_kills_damage_and_accuracy() {
    let mut fragger = match_record("m1", "Fragger", now());
    fragger.kills = 30;
    let mut sniper = match_record("m1", "Sniper", now());
    sniper.damage_dealt = 1000;
    sniper
        .weapons
        .insert(Weapon::Railgun, WeaponShots { hits: 45, shots: 100 });

    let table = service(vec![fragger, sniper])
        .leaderboard(Family::Best, Period::Day, now())
        .await
        .unwrap();

    // 45*1.5 + 0.3 = 67.8 beats 30*0.5 = 15
    assert_eq!(table.entries[0].name, "Sniper");
    assert_eq!(table.entries[0].values[0], "67.80");
    assert_eq!(table.entries[1].values[0], "15.00");
}

#[tokio::test]
async fn command_text_drives_the_full_pipeline() {
    let request = parse_request("!lb winners month").unwrap();
    assert_eq!(request.family, Family::Winners);

    let mut winner = match_record("m1", "Alice", now());
    winner.win = true;
    let table = service(vec![winner])
        .leaderboard(request.family, request.period, now())
        .await
        .unwrap();
    assert_eq!(table.entries[0].values, vec!["1", "0"]);
}
