//! CSV Data Loader Module
//! Reads the match dataset with Polars and extracts typed match records.

use crate::data::DataProcessor;
use crate::error::DashboardError;
use log::{debug, info};
use polars::prelude::*;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Columns every dataset must provide.
pub const REQUIRED_COLUMNS: [&str; 10] = [
    "season",
    "city",
    "team1",
    "team2",
    "toss_winner",
    "toss_decision",
    "winner",
    "win_by_runs",
    "win_by_wickets",
    "player_of_match",
];

/// One completed match.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MatchRecord {
    pub id: Option<i64>,
    pub season: Option<i32>,
    pub city: Option<String>,
    pub date: Option<String>,
    pub team1: Option<String>,
    pub team2: Option<String>,
    pub toss_winner: Option<String>,
    pub toss_decision: Option<String>,
    pub result: Option<String>,
    pub dl_applied: bool,
    pub winner: Option<String>,
    pub win_by_runs: u32,
    pub win_by_wickets: u32,
    pub player_of_match: Option<String>,
    pub venue: Option<String>,
    pub umpires: [Option<String>; 3],
}

/// In-memory match table. Immutable once loading has finished.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MatchTable {
    records: Vec<MatchRecord>,
}

impl MatchTable {
    pub fn from_records(records: Vec<MatchRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[MatchRecord] {
        &self.records
    }

    pub(crate) fn records_mut(&mut self) -> &mut [MatchRecord] {
        &mut self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// First and last season present, if any.
    pub fn season_span(&self) -> Option<(i32, i32)> {
        let mut seasons = self.records.iter().filter_map(|r| r.season);
        let first = seasons.next()?;
        Some(seasons.fold((first, first), |(lo, hi), s| (lo.min(s), hi.max(s))))
    }
}

/// A loaded, normalized dataset shared read-only with every view.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub table: Arc<MatchTable>,
    pub path: PathBuf,
    /// Cells rewritten by the team-name normalization pass.
    pub normalized_cells: usize,
}

fn text(col: &[Option<String>], i: usize) -> Option<String> {
    col.get(i).cloned().flatten()
}

fn number(col: &[Option<f64>], i: usize) -> Option<f64> {
    col.get(i).copied().flatten()
}

/// Margins are whole, non-negative; anything else reads as 0.
fn margin(col: &[Option<f64>], i: usize) -> u32 {
    number(col, i)
        .filter(|v| *v > 0.0)
        .map(|v| v.round() as u32)
        .unwrap_or(0)
}

/// Handles CSV file loading with Polars.
pub struct DataLoader;

impl DataLoader {
    /// Load and normalize the dataset at `path`.
    pub fn load(path: &Path) -> Result<Dataset, DashboardError> {
        info!("Loading match dataset from {}", path.display());
        let mut table = Self::read_matches(path)?;
        let normalized_cells = DataProcessor::normalize_team_names(&mut table);
        info!(
            "Loaded {} matches ({} team names normalized)",
            table.len(),
            normalized_cells
        );

        Ok(Dataset {
            table: Arc::new(table),
            path: path.to_path_buf(),
            normalized_cells,
        })
    }

    /// Read match records without normalizing them.
    pub fn read_matches(path: &Path) -> Result<MatchTable, DashboardError> {
        if !path.is_file() {
            return Err(DashboardError::data_unavailable(format!(
                "{} not found",
                path.display()
            )));
        }

        let path_str = path.to_string_lossy().to_string();
        let df = LazyCsvReader::new(&path_str)
            .with_infer_schema_length(Some(10000))
            .with_ignore_errors(true)
            .finish()
            .and_then(|lazy| lazy.collect())
            .map_err(|e| DashboardError::data_unavailable(e.to_string()))?;

        Self::check_columns(&df)?;
        let table = Self::extract_records(&df)
            .map_err(|e| DashboardError::data_unavailable(e.to_string()))?;
        debug!("Extracted {} records from {} columns", table.len(), df.width());
        Ok(table)
    }

    fn check_columns(df: &DataFrame) -> Result<(), DashboardError> {
        let present: Vec<String> = df
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect();

        let missing: Vec<&str> = REQUIRED_COLUMNS
            .iter()
            .copied()
            .filter(|name| !present.iter().any(|p| p == name))
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(DashboardError::data_unavailable(format!(
                "missing columns: {}",
                missing.join(", ")
            )))
        }
    }

    fn extract_records(df: &DataFrame) -> Result<MatchTable, PolarsError> {
        let height = df.height();

        let id = Self::numeric_column(df, "id")?;
        let season = Self::numeric_column(df, "season")?;
        let city = Self::text_column(df, "city")?;
        let date = Self::text_column(df, "date")?;
        let team1 = Self::text_column(df, "team1")?;
        let team2 = Self::text_column(df, "team2")?;
        let toss_winner = Self::text_column(df, "toss_winner")?;
        let toss_decision = Self::text_column(df, "toss_decision")?;
        let result = Self::text_column(df, "result")?;
        let dl_applied = Self::numeric_column(df, "dl_applied")?;
        let winner = Self::text_column(df, "winner")?;
        let win_by_runs = Self::numeric_column(df, "win_by_runs")?;
        let win_by_wickets = Self::numeric_column(df, "win_by_wickets")?;
        let player_of_match = Self::text_column(df, "player_of_match")?;
        let venue = Self::text_column(df, "venue")?;
        let umpire1 = Self::text_column(df, "umpire1")?;
        let umpire2 = Self::text_column(df, "umpire2")?;
        let umpire3 = Self::text_column(df, "umpire3")?;

        let records = (0..height)
            .map(|i| MatchRecord {
                id: number(&id, i).map(|v| v as i64),
                season: number(&season, i).map(|v| v as i32),
                city: text(&city, i),
                date: text(&date, i),
                team1: text(&team1, i),
                team2: text(&team2, i),
                toss_winner: text(&toss_winner, i),
                toss_decision: text(&toss_decision, i),
                result: text(&result, i),
                dl_applied: number(&dl_applied, i).is_some_and(|v| v != 0.0),
                winner: text(&winner, i),
                win_by_runs: margin(&win_by_runs, i),
                win_by_wickets: margin(&win_by_wickets, i),
                player_of_match: text(&player_of_match, i),
                venue: text(&venue, i),
                umpires: [text(&umpire1, i), text(&umpire2, i), text(&umpire3, i)],
            })
            .collect();

        Ok(MatchTable::from_records(records))
    }

    /// Text values of a column, kept verbatim; empty cells and absent columns read as `None`.
    fn text_column(df: &DataFrame, name: &str) -> Result<Vec<Option<String>>, PolarsError> {
        let Ok(column) = df.column(name) else {
            return Ok(Vec::new());
        };
        let as_text = column.cast(&DataType::String)?;
        let values = as_text
            .as_materialized_series()
            .str()?
            .into_iter()
            .map(|v| v.filter(|s| !s.is_empty()).map(str::to_string))
            .collect();
        Ok(values)
    }

    /// Numeric values of a column; unparseable cells and absent columns read as `None`.
    fn numeric_column(df: &DataFrame, name: &str) -> Result<Vec<Option<f64>>, PolarsError> {
        let Ok(column) = df.column(name) else {
            return Ok(Vec::new());
        };
        let value_f64 = column.cast(&DataType::Float64)?;
        let values = value_f64
            .f64()?
            .into_iter()
            .map(|v| v.filter(|x| !x.is_nan()))
            .collect();
        Ok(values)
    }
}
