use shelfgap_catalog::types::*;
use shelfgap_db::*;

fn seed_franchise(conn: &rusqlite::Connection, id: &str, name: &str) {
    upsert_franchise(
        conn,
        &Franchise {
            id: id.to_string(),
            name: name.to_string(),
            estimated_total_games: None,
            first_game_year: None,
            created_at: String::new(),
            updated_at: String::new(),
        },
    )
    .unwrap();
}

fn seed_entry(
    conn: &rusqlite::Connection,
    franchise: &str,
    id: &str,
    title: &str,
    year: Option<i32>,
    platforms: &[&str],
    status: EntryStatus,
) {
    upsert_entry(
        conn,
        &GameEntry {
            id: id.to_string(),
            franchise_id: franchise.to_string(),
            title: title.to_string(),
            release_year: year,
            platforms: platforms.iter().map(|p| p.to_string()).collect(),
            edition_of: None,
            status,
            source_notes: None,
            version: 0,
            created_at: String::new(),
            updated_at: String::new(),
        },
    )
    .unwrap();
}

#[test]
fn entries_for_franchise_preserves_insertion_order() {
    let conn = open_memory().unwrap();
    seed_franchise(&conn, "mario", "Mario");
    seed_entry(&conn, "mario", "mario:c", "Charlie", None, &[], EntryStatus::Confirmed);
    seed_entry(&conn, "mario", "mario:a", "Alpha", None, &[], EntryStatus::Confirmed);
    seed_entry(&conn, "mario", "mario:b", "Bravo", None, &[], EntryStatus::Confirmed);

    let titles: Vec<String> = entries_for_franchise(&conn, "mario")
        .unwrap()
        .into_iter()
        .map(|e| e.title)
        .collect();
    assert_eq!(titles, vec!["Charlie", "Alpha", "Bravo"]);
}

#[test]
fn find_by_title_substring_is_case_insensitive() {
    let conn = open_memory().unwrap();
    seed_franchise(&conn, "mario", "Mario");
    seed_entry(
        &conn,
        "mario",
        "mario:smb",
        "Super Mario Bros.",
        Some(1985),
        &["NES"],
        EntryStatus::Confirmed,
    );

    let matches = find_by_title(&conn, "mario", "super mario").unwrap();
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].platforms, vec!["NES"]);
}

#[test]
fn find_by_title_falls_back_to_fuzzy() {
    let conn = open_memory().unwrap();
    seed_franchise(&conn, "bond", "James Bond");
    seed_entry(
        &conn,
        "bond",
        "bond:goldeneye",
        "GoldenEye 007",
        Some(1997),
        &["N64"],
        EntryStatus::Confirmed,
    );

    // One transposition; no substring match.
    let matches = find_by_title(&conn, "bond", "GoldenEey 007").unwrap();
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].id, "bond:goldeneye");
}

#[test]
fn find_by_title_scoped_to_franchise() {
    let conn = open_memory().unwrap();
    seed_franchise(&conn, "mario", "Mario");
    seed_franchise(&conn, "zelda", "Zelda");
    seed_entry(&conn, "mario", "mario:kart", "Mario Kart 64", Some(1996), &["N64"], EntryStatus::Confirmed);

    assert!(find_by_title(&conn, "zelda", "Mario Kart 64").unwrap().is_empty());
}

#[test]
fn summary_counts_and_full_coverage() {
    let conn = open_memory().unwrap();
    seed_franchise(&conn, "mario", "Mario");
    for i in 0..5 {
        seed_entry(
            &conn,
            "mario",
            &format!("mario:game-{i}"),
            &format!("Game {i}"),
            Some(1990 + i),
            &["NES"],
            EntryStatus::Confirmed,
        );
    }

    let summary = franchise_summary(&conn, "mario").unwrap();
    assert_eq!(summary.confirmed, 5);
    assert_eq!(summary.missing, 0);
    assert_eq!(summary.coverage, Coverage::Percent(100.0));
    assert_eq!(summary.platforms.len(), 1);
    assert_eq!(summary.platforms[0].platform, "NES");
    assert_eq!(summary.platforms[0].confirmed, 5);
}

#[test]
fn summary_empty_franchise_is_insufficient_data() {
    let conn = open_memory().unwrap();
    seed_franchise(&conn, "mario", "Mario");

    let summary = franchise_summary(&conn, "mario").unwrap();
    assert_eq!(summary.confirmed, 0);
    assert_eq!(summary.missing, 0);
    assert_eq!(summary.coverage, Coverage::InsufficientData);
}

#[test]
fn summary_unknown_franchise_is_not_found() {
    let conn = open_memory().unwrap();
    assert!(matches!(
        franchise_summary(&conn, "halo"),
        Err(OperationError::NotFound { .. })
    ));
}

#[test]
fn missing_stubs_count_against_coverage() {
    let conn = open_memory().unwrap();
    seed_franchise(&conn, "mario", "Mario");
    seed_entry(&conn, "mario", "mario:a", "A", None, &[], EntryStatus::Confirmed);
    seed_entry(&conn, "mario", "mario:b", "B", None, &[], EntryStatus::MissingFromStore);
    seed_entry(&conn, "mario", "mario:c", "C", None, &[], EntryStatus::MissingFromStore);

    let summary = franchise_summary(&conn, "mario").unwrap();
    assert_eq!(summary.confirmed, 1);
    assert_eq!(summary.missing, 2);
    match summary.coverage {
        Coverage::Percent(p) => assert!((p - 33.333).abs() < 0.01),
        other => panic!("expected percent, got {other:?}"),
    }
}

#[test]
fn coverage_is_monotonic_as_missing_entries_confirm() {
    let conn = open_memory().unwrap();
    seed_franchise(&conn, "mario", "Mario");
    for i in 0..4 {
        seed_entry(
            &conn,
            "mario",
            &format!("mario:game-{i}"),
            &format!("Game {i}"),
            None,
            &[],
            EntryStatus::MissingFromStore,
        );
    }

    let mut last = 0.0f64;
    for i in 0..4 {
        let mut entry = get_entry(&conn, &format!("mario:game-{i}")).unwrap();
        entry.status = EntryStatus::Confirmed;
        upsert_entry(&conn, &entry).unwrap();

        let summary = franchise_summary(&conn, "mario").unwrap();
        let Coverage::Percent(p) = summary.coverage else {
            panic!("expected percent");
        };
        assert!(p >= last, "coverage regressed: {p} < {last}");
        last = p;
    }
    assert_eq!(last, 100.0);
}

#[test]
fn store_stats_counts_everything() {
    let conn = open_memory().unwrap();
    seed_franchise(&conn, "mario", "Mario");
    seed_entry(&conn, "mario", "mario:a", "A", None, &["NES", "SNES"], EntryStatus::Confirmed);
    seed_entry(&conn, "mario", "mario:b", "B", None, &["SNES"], EntryStatus::MissingFromStore);

    let stats = store_stats(&conn).unwrap();
    assert_eq!(stats.franchises, 1);
    assert_eq!(stats.entries, 2);
    assert_eq!(stats.confirmed, 1);
    assert_eq!(stats.missing, 1);
    assert_eq!(stats.platforms, 2);
    assert_eq!(stats.open_reviews, 0);
}

#[test]
fn coverage_percent_edge_cases() {
    assert_eq!(coverage_percent(0, 0), Coverage::InsufficientData);
    assert_eq!(coverage_percent(5, 0), Coverage::Percent(100.0));
    assert_eq!(coverage_percent(0, 5), Coverage::Percent(0.0));
    assert_eq!(coverage_percent(1, 1), Coverage::Percent(50.0));
}
