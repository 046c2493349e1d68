use std::fs;
use std::path::PathBuf;

use cricket_insights::charts::StaticChartRenderer;
use cricket_insights::data::{DataLoader, MatchRecord, MatchTable};
use cricket_insights::View;

const SIZE: [u32; 2] = [600, 400];

fn fixture(name: &str) -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(name);
    path
}

fn tmp_dir(name: &str) -> PathBuf {
    let mut p = std::env::temp_dir();
    p.push(format!("cricket_export_{}", name));
    let _ = fs::remove_dir_all(&p);
    fs::create_dir_all(&p).unwrap();
    p
}

fn file_names(paths: &[PathBuf]) -> Vec<String> {
    paths
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
        .collect()
}

#[test]
fn export_all_writes_every_chart() {
    let dataset = DataLoader::load(&fixture("matches_small.csv")).unwrap();
    let dir = tmp_dir("all");

    let written = StaticChartRenderer::export_all(&dataset.table, &dir, SIZE).unwrap();

    assert_eq!(
        file_names(&written),
        [
            "team_performances_1.png",
            "toss_decisions_1.png",
            "toss_decisions_2.png",
            "win_frequencies_1.png",
            "top_players_1.png",
            "match_outcomes_1.png",
            "match_outcomes_2.png",
        ]
    );
    for path in &written {
        assert!(path.starts_with(&dir));
        assert!(fs::metadata(path).unwrap().len() > 0);
    }
}

#[test]
fn render_png_produces_png_bytes() {
    let dataset = DataLoader::load(&fixture("matches_small.csv")).unwrap();
    let panels = View::TeamPerformances.build(&dataset.table);
    let spec = panels[0].chart.as_ref().unwrap();

    let bytes = StaticChartRenderer::render_png(spec, SIZE[0], SIZE[1]).unwrap();
    assert!(bytes.starts_with(b"\x89PNG"));
}

#[test]
fn empty_panel_is_skipped_on_export() {
    let table = MatchTable::from_records(vec![
        MatchRecord {
            win_by_wickets: 4,
            ..Default::default()
        },
        MatchRecord {
            win_by_wickets: 7,
            ..Default::default()
        },
    ]);
    let dir = tmp_dir("skip_empty");

    let written = StaticChartRenderer::export_view(View::MatchOutcomes, &table, &dir, SIZE).unwrap();

    assert_eq!(file_names(&written), ["match_outcomes_2.png"]);
    assert!(!dir.join("match_outcomes_1.png").exists());
}
