use rusqlite::Connection;
use shelfgap_catalog::types::*;
use shelfgap_catalog::vocab::PlatformVocab;
use shelfgap_db::{open_memory, upsert_franchise};
use shelfgap_import::{ImportError, LineOutcome, import_list, log_import};

fn setup() -> (Connection, PlatformVocab) {
    let conn = open_memory().unwrap();
    upsert_franchise(
        &conn,
        &Franchise {
            id: "mario".to_string(),
            name: "Mario".to_string(),
            estimated_total_games: None,
            first_game_year: None,
            created_at: String::new(),
            updated_at: String::new(),
        },
    )
    .unwrap();
    (conn, PlatformVocab::builtin())
}

#[test]
fn single_confirmed_entry() {
    let (conn, vocab) = setup();
    let outcome = import_list(
        &conn,
        "mario",
        "- **Super Mario Bros.** (1985) - NES\n",
        &vocab,
        None,
    )
    .unwrap();

    assert_eq!(outcome.stats.accepted, 1);
    assert_eq!(outcome.stats.skipped, 0);

    let entries = shelfgap_db::entries_for_franchise(&conn, "mario").unwrap();
    assert_eq!(entries.len(), 1);
    let entry = &entries[0];
    assert_eq!(entry.title, "Super Mario Bros.");
    assert_eq!(entry.release_year, Some(1985));
    assert_eq!(entry.platforms, vec!["NES"]);
    assert_eq!(entry.status, EntryStatus::Confirmed);
}

#[test]
fn missing_marker_creates_stub() {
    let (conn, vocab) = setup();
    let outcome = import_list(
        &conn,
        "mario",
        "- **GoldenEye 007** (1997) - Nintendo 64 ***[MISSING]***\n",
        &vocab,
        None,
    )
    .unwrap();

    assert_eq!(outcome.stats.missing_stubs, 1);
    assert_eq!(outcome.stats.accepted, 0);

    let entries = shelfgap_db::entries_for_franchise(&conn, "mario").unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].title, "GoldenEye 007");
    assert_eq!(entries[0].release_year, Some(1997));
    assert_eq!(entries[0].status, EntryStatus::MissingFromStore);
}

#[test]
fn same_title_same_year_merges_platforms() {
    let (conn, vocab) = setup();
    let text = "Title X (2000) - PS2\nTitle X (2000) - Xbox\n";
    let outcome = import_list(&conn, "mario", text, &vocab, None).unwrap();

    assert_eq!(outcome.stats.accepted, 1);
    assert_eq!(outcome.stats.merged, 1);

    let entries = shelfgap_db::entries_for_franchise(&conn, "mario").unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].platforms, vec!["PS2", "Xbox"]);
}

#[test]
fn different_years_stay_distinct() {
    let (conn, vocab) = setup();
    let text = "- **Title X** (2000) - PS2\n- **Title X** (2005) - PS2\n";
    import_list(&conn, "mario", text, &vocab, None).unwrap();

    let entries = shelfgap_db::entries_for_franchise(&conn, "mario").unwrap();
    assert_eq!(entries.len(), 2);
}

#[test]
fn platform_aliases_canonicalize_before_merge() {
    let (conn, vocab) = setup();
    let text = "Title X (2000) - PS2\nTitle X (2000) - PlayStation 2\n";
    import_list(&conn, "mario", text, &vocab, None).unwrap();

    let entries = shelfgap_db::entries_for_franchise(&conn, "mario").unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].platforms, vec!["PS2"]);
}

#[test]
fn importing_twice_is_idempotent() {
    let (conn, vocab) = setup();
    let text = "\
# Mario
- **Super Mario Bros.** (1985) - NES
- **Super Mario World** (1990) - SNES
- **Mario Party 4** (2002) - GameCube ***[MISSING]***
";
    import_list(&conn, "mario", text, &vocab, None).unwrap();
    let first: Vec<_> = shelfgap_db::entries_for_franchise(&conn, "mario")
        .unwrap()
        .into_iter()
        .map(|e| (e.id, e.title, e.release_year, e.platforms, e.status))
        .collect();

    import_list(&conn, "mario", text, &vocab, None).unwrap();
    let second: Vec<_> = shelfgap_db::entries_for_franchise(&conn, "mario")
        .unwrap()
        .into_iter()
        .map(|e| (e.id, e.title, e.release_year, e.platforms, e.status))
        .collect();

    assert_eq!(first, second);
}

#[test]
fn bad_lines_are_skipped_not_fatal() {
    let (conn, vocab) = setup();
    let text = "\
- **Super Mario Bros.** (1985) - NES
- ****
just some prose that is not an entry at all but has no year or platforms either
- **Super Mario World** (1990) - SNES
";
    let outcome = import_list(&conn, "mario", text, &vocab, None).unwrap();

    // The prose line still yields a title (it's free text), so only the
    // empty-bold line is unparseable; what matters is the batch finished.
    assert_eq!(outcome.stats.accepted + outcome.stats.merged, 3);
    assert_eq!(outcome.stats.skipped, 1);

    let skipped: Vec<_> = outcome
        .lines
        .iter()
        .filter(|l| matches!(l.outcome, LineOutcome::Skipped { .. }))
        .collect();
    assert_eq!(skipped.len(), 1);
    assert_eq!(skipped[0].line_no, 2);
}

#[test]
fn sub_bullet_becomes_edition_variant() {
    let (conn, vocab) = setup();
    let text = "\
- **Title X** (2000) - PS2
  - **Title X: Collector's Edition** (2001) - PS2
";
    import_list(&conn, "mario", text, &vocab, None).unwrap();

    let entries = shelfgap_db::entries_for_franchise(&conn, "mario").unwrap();
    assert_eq!(entries.len(), 2);
    let base = entries.iter().find(|e| e.title == "Title X").unwrap();
    let variant = entries
        .iter()
        .find(|e| e.title == "Title X: Collector's Edition")
        .unwrap();
    assert_eq!(variant.edition_of.as_deref(), Some(base.id.as_str()));
}

#[test]
fn edition_qualifier_links_to_existing_base() {
    let (conn, vocab) = setup();
    let text = "\
- **Wind Waker** (2003) - GameCube
- **Wind Waker HD** (2013) - Wii U
";
    import_list(&conn, "mario", text, &vocab, None).unwrap();

    let entries = shelfgap_db::entries_for_franchise(&conn, "mario").unwrap();
    let base = entries.iter().find(|e| e.title == "Wind Waker").unwrap();
    let remaster = entries.iter().find(|e| e.title == "Wind Waker HD").unwrap();
    assert_eq!(remaster.edition_of.as_deref(), Some(base.id.as_str()));
}

#[test]
fn confirmed_line_upgrades_missing_stub() {
    let (conn, vocab) = setup();
    import_list(
        &conn,
        "mario",
        "- **Mario Paint** (1992) - SNES ***[MISSING]***\n",
        &vocab,
        None,
    )
    .unwrap();
    import_list(&conn, "mario", "- **Mario Paint** (1992) - SNES\n", &vocab, None).unwrap();

    let entries = shelfgap_db::entries_for_franchise(&conn, "mario").unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].status, EntryStatus::Confirmed);
}

#[test]
fn missing_marker_never_downgrades_confirmed() {
    let (conn, vocab) = setup();
    import_list(&conn, "mario", "- **Mario Paint** (1992) - SNES\n", &vocab, None).unwrap();
    import_list(
        &conn,
        "mario",
        "- **Mario Paint** (1992) - SNES ***[MISSING]***\n",
        &vocab,
        None,
    )
    .unwrap();

    let entries = shelfgap_db::entries_for_franchise(&conn, "mario").unwrap();
    assert_eq!(entries[0].status, EntryStatus::Confirmed);
}

#[test]
fn missing_note_lands_in_source_notes() {
    let (conn, vocab) = setup();
    import_list(
        &conn,
        "mario",
        "- **Mario's Hotel** (1994) - CD-i ***[MISSING - mobile; shut down 2021]***\n",
        &vocab,
        None,
    )
    .unwrap();

    let entries = shelfgap_db::entries_for_franchise(&conn, "mario").unwrap();
    assert_eq!(entries[0].source_notes.as_deref(), Some("mobile; shut down 2021"));
}

#[test]
fn unknown_franchise_is_an_error() {
    let conn = open_memory().unwrap();
    let vocab = PlatformVocab::builtin();
    match import_list(&conn, "halo", "- **Halo** (2001) - Xbox\n", &vocab, None) {
        Err(ImportError::UnknownFranchise(f)) => assert_eq!(f, "halo"),
        other => panic!("expected UnknownFranchise, got {other:?}"),
    }
}

#[test]
fn log_import_records_run() {
    let (conn, vocab) = setup();
    let outcome = import_list(
        &conn,
        "mario",
        "- **Super Mario Bros.** (1985) - NES\n",
        &vocab,
        None,
    )
    .unwrap();
    let id = log_import(&conn, "mario", "mario.md", &outcome.stats).unwrap();
    assert!(id > 0);

    let logs = shelfgap_db::list_import_logs(&conn, None).unwrap();
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].source_name, "mario.md");
    assert_eq!(logs[0].accepted, 1);
}
