use std::path::PathBuf;

use cricket_insights::data::{
    DataLoader, DataProcessor, MatchRecord, CANONICAL_TEAM_NAME, LEGACY_TEAM_NAME,
};
use cricket_insights::DashboardError;

fn fixture(name: &str) -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(name);
    path
}

fn team_columns(r: &MatchRecord) -> [Option<&str>; 3] {
    [r.team1.as_deref(), r.team2.as_deref(), r.winner.as_deref()]
}

#[test]
fn loads_every_row_with_optional_columns() {
    let dataset = DataLoader::load(&fixture("matches_small.csv")).expect("fixture should load");
    let rows = dataset.table.records();
    assert_eq!(rows.len(), 10);

    let first = &rows[0];
    assert_eq!(first.id, Some(1));
    assert_eq!(first.season, Some(2017));
    assert_eq!(first.city.as_deref(), Some("Hyderabad"));
    assert_eq!(first.toss_decision.as_deref(), Some("field"));
    assert_eq!(first.win_by_runs, 35);
    assert_eq!(first.win_by_wickets, 0);
    assert_eq!(first.umpires[0].as_deref(), Some("AY Dandekar"));
    assert_eq!(first.umpires[2], None);

    assert_eq!(
        rows[6].venue.as_deref(),
        Some("Punjab Cricket Association Stadium, Mohali")
    );
    // no-result match
    assert_eq!(rows[8].winner, None);
    assert_eq!(rows[8].player_of_match, None);
    // blank city
    assert_eq!(rows[9].city, None);
    assert_eq!(dataset.table.season_span(), Some((2008, 2017)));
}

#[test]
fn legacy_spelling_is_gone_after_load() {
    let dataset = DataLoader::load(&fixture("matches_small.csv")).expect("fixture should load");
    assert_eq!(dataset.normalized_cells, 3);

    for record in dataset.table.records() {
        assert!(team_columns(record)
            .iter()
            .all(|v| *v != Some(LEGACY_TEAM_NAME)));
    }

    let pune = &dataset.table.records()[1];
    assert_eq!(pune.team2.as_deref(), Some(CANONICAL_TEAM_NAME));
    assert_eq!(pune.winner.as_deref(), Some(CANONICAL_TEAM_NAME));
}

#[test]
fn normalization_only_touches_legacy_cells() {
    let raw = DataLoader::read_matches(&fixture("matches_small.csv")).expect("fixture should load");
    let mut normalized = raw.clone();
    DataProcessor::normalize_team_names(&mut normalized);

    for (before, after) in raw.records().iter().zip(normalized.records()) {
        for (b, a) in team_columns(before).iter().zip(team_columns(after).iter()) {
            if *b == Some(LEGACY_TEAM_NAME) {
                assert_eq!(*a, Some(CANONICAL_TEAM_NAME));
            } else {
                assert_eq!(a, b);
            }
        }
        assert_eq!(before.toss_winner, after.toss_winner);
        assert_eq!(before.city, after.city);
        assert_eq!(before.player_of_match, after.player_of_match);
        assert_eq!(before.win_by_runs, after.win_by_runs);
    }

    let once = normalized.clone();
    assert_eq!(DataProcessor::normalize_team_names(&mut normalized), 0);
    assert_eq!(normalized, once);
}

#[test]
fn missing_file_is_data_unavailable() {
    let err = DataLoader::load(&fixture("no_such_file.csv")).unwrap_err();
    assert!(matches!(err, DashboardError::DataUnavailable(_)));
}

#[test]
fn missing_required_column_is_data_unavailable() {
    let err = DataLoader::load(&fixture("matches_missing_winner.csv")).unwrap_err();
    match err {
        DashboardError::DataUnavailable(msg) => assert!(msg.contains("winner")),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn text_cells_are_kept_verbatim() {
    let table = DataLoader::read_matches(&fixture("matches_padded.csv")).expect("fixture should load");
    let rows = table.records();
    assert_eq!(rows[0].city.as_deref(), Some(" Pune "));
    assert_eq!(rows[0].player_of_match.as_deref(), Some("KA Pollard "));
    assert_eq!(rows[1].city, None);
}
