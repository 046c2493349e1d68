//! Match Aggregation Module
//! The six summaries behind the dashboard views. Each one is a single pass
//! over the normalized table that builds a count map keyed by the grouping.

use crate::data::MatchTable;
use crate::error::DashboardError;
use log::debug;
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Number of players kept by the award ranking.
pub const TOP_PLAYERS: usize = 10;

pub const TOSS_WON_MATCH: &str = "Won Match";
pub const TOSS_LOST_MATCH: &str = "Lost Match";

/// Counts per category, highest first. Equal counts keep first-seen order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CountSeries {
    pub entries: Vec<(String, usize)>,
}

impl CountSeries {
    pub fn total(&self) -> usize {
        self.entries.iter().map(|(_, c)| c).sum()
    }

    pub fn get(&self, label: &str) -> Option<usize> {
        self.entries
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, c)| *c)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

}

/// A count together with its fraction of the whole.
#[derive(Debug, Clone, PartialEq)]
pub struct Share {
    pub label: String,
    pub count: usize,
    pub fraction: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Distribution {
    pub shares: Vec<Share>,
    pub total: usize,
}

impl Distribution {
    fn from_counts(counts: &[(String, usize)]) -> Self {
        let total: usize = counts.iter().map(|(_, c)| c).sum();
        let shares = counts
            .iter()
            .map(|(label, count)| Share {
                label: label.clone(),
                count: *count,
                fraction: if total == 0 {
                    0.0
                } else {
                    *count as f64 / total as f64
                },
            })
            .collect();
        Self { shares, total }
    }

    pub fn fraction(&self, label: &str) -> Option<f64> {
        self.shares
            .iter()
            .find(|s| s.label == label)
            .map(|s| s.fraction)
    }
}

/// Dense season × city matrix of recorded wins.
#[derive(Debug, Clone, PartialEq)]
pub struct CitySeasonMatrix {
    /// Row keys, ascending.
    pub seasons: Vec<i32>,
    /// Column keys, alphabetical.
    pub cities: Vec<String>,
    /// `counts[row][col]`, zero where the pair never occurs.
    pub counts: Vec<Vec<usize>>,
}

impl CitySeasonMatrix {
    pub fn get(&self, season: i32, city: &str) -> usize {
        let row = self.seasons.iter().position(|s| *s == season);
        let col = self.cities.iter().position(|c| c == city);
        match (row, col) {
            (Some(r), Some(c)) => self.counts[r][c],
            _ => 0,
        }
    }

    pub fn max_count(&self) -> usize {
        self.counts
            .iter()
            .flat_map(|row| row.iter().copied())
            .max()
            .unwrap_or(0)
    }
}

/// How a decisive match was won.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarginKind {
    Runs,
    Wickets,
}

impl MarginKind {
    /// Histogram bin count used for this margin.
    pub fn bins(self) -> usize {
        match self {
            MarginKind::Runs => 20,
            MarginKind::Wickets => 10,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MarginKind::Runs => "Runs",
            MarginKind::Wickets => "Wickets",
        }
    }
}

/// Positive margins of one kind, in table order.
#[derive(Debug, Clone, PartialEq)]
pub struct MarginSample {
    pub kind: MarginKind,
    pub values: Vec<f64>,
}

/// Stateless aggregation functions over a normalized match table.
pub struct Aggregator;

impl Aggregator {
    /// Count occurrences, ordering by count descending then first appearance.
    pub fn count_values<'a>(values: impl IntoIterator<Item = &'a str>) -> CountSeries {
        let mut index: HashMap<&'a str, usize> = HashMap::new();
        let mut entries: Vec<(String, usize)> = Vec::new();

        for value in values {
            match index.get(value) {
                Some(&i) => entries[i].1 += 1,
                None => {
                    index.insert(value, entries.len());
                    entries.push((value.to_string(), 1));
                }
            }
        }

        // Stable sort keeps first-seen order within equal counts.
        entries.sort_by(|a, b| b.1.cmp(&a.1));
        CountSeries { entries }
    }

    /// Wins per team; matches without a winner are skipped.
    pub fn win_counts(table: &MatchTable) -> Result<CountSeries, DashboardError> {
        let counts = Self::count_values(table.records().iter().filter_map(|r| r.winner.as_deref()));
        Self::non_empty(counts.entries.is_empty(), "team wins")?;
        Ok(counts)
    }

    /// Share of each toss decision.
    pub fn toss_decisions(table: &MatchTable) -> Result<Distribution, DashboardError> {
        let counts = Self::count_values(
            table
                .records()
                .iter()
                .filter_map(|r| r.toss_decision.as_deref()),
        );
        Self::non_empty(counts.entries.is_empty(), "toss decisions")?;
        Ok(Distribution::from_counts(&counts.entries))
    }

    /// Matches won vs lost by the toss winner, over every row.
    ///
    /// `toss_winner` is compared as loaded. It is not part of the team-name
    /// rewrite, so a legacy spelling there counts as a lost match.
    pub fn toss_impact(table: &MatchTable) -> Result<Distribution, DashboardError> {
        Self::non_empty(table.is_empty(), "toss impact")?;

        let won = table
            .records()
            .iter()
            .filter(|r| match (r.toss_winner.as_deref(), r.winner.as_deref()) {
                (Some(toss), Some(winner)) => toss == winner,
                _ => false,
            })
            .count();

        Ok(Distribution::from_counts(&[
            (TOSS_WON_MATCH.to_string(), won),
            (TOSS_LOST_MATCH.to_string(), table.len() - won),
        ]))
    }

    /// Wins per (season, city). Rows missing either key are ignored; a pair
    /// whose matches all lack a winner is kept with count 0.
    pub fn city_season_wins(table: &MatchTable) -> Result<CitySeasonMatrix, DashboardError> {
        let mut cells: BTreeMap<(i32, &str), usize> = BTreeMap::new();
        let mut cities: BTreeSet<&str> = BTreeSet::new();

        for record in table.records() {
            let (Some(season), Some(city)) = (record.season, record.city.as_deref()) else {
                continue;
            };
            let cell = cells.entry((season, city)).or_insert(0);
            if record.winner.is_some() {
                *cell += 1;
            }
            cities.insert(city);
        }
        Self::non_empty(cells.is_empty(), "city/season wins")?;

        let seasons: Vec<i32> = cells
            .keys()
            .map(|(s, _)| *s)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let cities: Vec<&str> = cities.into_iter().collect();

        let counts = seasons
            .iter()
            .map(|season| {
                cities
                    .iter()
                    .map(|city| cells.get(&(*season, *city)).copied().unwrap_or(0))
                    .collect()
            })
            .collect();

        Ok(CitySeasonMatrix {
            seasons,
            cities: cities.into_iter().map(str::to_string).collect(),
            counts,
        })
    }

    /// The ten most frequent player-of-the-match recipients.
    pub fn top_players(table: &MatchTable) -> Result<CountSeries, DashboardError> {
        let mut counts = Self::count_values(
            table
                .records()
                .iter()
                .filter_map(|r| r.player_of_match.as_deref()),
        );
        Self::non_empty(counts.entries.is_empty(), "player awards")?;
        counts.entries.truncate(TOP_PLAYERS);
        Ok(counts)
    }

    /// Positive margins of the given kind.
    pub fn win_margins(table: &MatchTable, kind: MarginKind) -> Result<MarginSample, DashboardError> {
        let values: Vec<f64> = table
            .records()
            .iter()
            .map(|r| match kind {
                MarginKind::Runs => r.win_by_runs,
                MarginKind::Wickets => r.win_by_wickets,
            })
            .filter(|m| *m > 0)
            .map(f64::from)
            .collect();

        let what = match kind {
            MarginKind::Runs => "wins by runs",
            MarginKind::Wickets => "wins by wickets",
        };
        Self::non_empty(values.is_empty(), what)?;
        Ok(MarginSample { kind, values })
    }

    fn non_empty(empty: bool, what: &'static str) -> Result<(), DashboardError> {
        if empty {
            debug!("Aggregate '{}' is empty", what);
            Err(DashboardError::EmptyInput(what))
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::MatchRecord;

    fn table(rows: Vec<MatchRecord>) -> MatchTable {
        MatchTable::from_records(rows)
    }

    fn played(season: i32, city: &str, winner: Option<&str>) -> MatchRecord {
        MatchRecord {
            season: Some(season),
            city: Some(city.to_string()),
            winner: winner.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn win_counts_sum_to_decided_matches() {
        let t = table(vec![
            played(2017, "Pune", Some("A")),
            played(2017, "Pune", None),
            played(2017, "Mumbai", Some("B")),
            played(2017, "Mumbai", Some("A")),
        ]);
        let wins = Aggregator::win_counts(&t).unwrap();
        assert_eq!(wins.total(), 3);
        assert_eq!(wins.entries[0], ("A".to_string(), 2));
    }

    #[test]
    fn equal_counts_keep_first_seen_order() {
        let counts = Aggregator::count_values(["x", "y", "z", "y", "x", "z"]);
        let labels: Vec<&str> = counts.entries.iter().map(|(l, _)| l.as_str()).collect();
        assert_eq!(labels, ["x", "y", "z"]);

        let counts = Aggregator::count_values(["x", "y", "y"]);
        assert_eq!(counts.entries[0].0, "y");
    }

    #[test]
    fn toss_decision_fractions() {
        let t = table(
            ["bat", "field", "bat"]
                .iter()
                .map(|d| MatchRecord {
                    toss_decision: Some(d.to_string()),
                    ..Default::default()
                })
                .collect(),
        );
        let dist = Aggregator::toss_decisions(&t).unwrap();
        assert_eq!(dist.total, 3);
        assert!((dist.fraction("bat").unwrap() - 2.0 / 3.0).abs() < 1e-12);
        assert!((dist.fraction("field").unwrap() - 1.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn toss_impact_partitions_every_row() {
        let row = |toss: &str, winner: Option<&str>| MatchRecord {
            toss_winner: Some(toss.to_string()),
            winner: winner.map(str::to_string),
            ..Default::default()
        };
        let t = table(vec![
            row("A", Some("A")),
            row("A", Some("B")),
            row("B", None),
            row("Rising Pune Supergiant", Some("Rising Pune Supergiants")),
        ]);
        let impact = Aggregator::toss_impact(&t).unwrap();
        let won = impact.shares[0].count;
        let lost = impact.shares[1].count;
        assert_eq!(impact.shares[0].label, TOSS_WON_MATCH);
        // legacy toss winner vs rewritten winner is a loss
        assert_eq!(won, 1);
        assert_eq!(won + lost, t.len());
    }

    #[test]
    fn city_season_matrix_is_zero_filled() {
        let t = table(vec![
            played(2008, "Bangalore", Some("A")),
            played(2008, "Bangalore", Some("B")),
            played(2009, "Durban", Some("A")),
            played(2009, "Durban", None),
            played(2010, "Chennai", None),
            MatchRecord {
                season: Some(2010),
                ..Default::default()
            },
        ]);
        let m = Aggregator::city_season_wins(&t).unwrap();
        assert_eq!(m.seasons, vec![2008, 2009, 2010]);
        assert_eq!(m.cities, vec!["Bangalore", "Chennai", "Durban"]);
        assert_eq!(m.get(2008, "Bangalore"), 2);
        assert_eq!(m.get(2009, "Durban"), 1);
        assert_eq!(m.get(2010, "Chennai"), 0);
        assert_eq!(m.get(2008, "Durban"), 0);
        assert_eq!(m.get(1999, "Nowhere"), 0);
        assert!(m.counts.iter().all(|row| row.len() == 3));
    }

    #[test]
    fn top_players_capped_and_sorted() {
        let names: Vec<String> = (0..15)
            .flat_map(|i| std::iter::repeat(format!("P{i}")).take(i % 4 + 1))
            .collect();
        let t = table(
            names
                .iter()
                .map(|n| MatchRecord {
                    player_of_match: Some(n.clone()),
                    ..Default::default()
                })
                .collect(),
        );
        let top = Aggregator::top_players(&t).unwrap();
        assert_eq!(top.len(), TOP_PLAYERS);
        assert!(top.entries.windows(2).all(|w| w[0].1 >= w[1].1));
        assert_eq!(top.entries[0], ("P3".to_string(), 4));
    }

    #[test]
    fn margin_filters_drop_zero() {
        let t = table(
            [15, 0, 40, 0]
                .iter()
                .map(|runs| MatchRecord {
                    win_by_runs: *runs,
                    ..Default::default()
                })
                .collect(),
        );
        let runs = Aggregator::win_margins(&t, MarginKind::Runs).unwrap();
        assert_eq!(runs.values, vec![15.0, 40.0]);
        assert_eq!(
            Aggregator::win_margins(&t, MarginKind::Wickets),
            Err(DashboardError::EmptyInput("wins by wickets"))
        );
    }

    #[test]
    fn empty_table_is_empty_input_everywhere() {
        let t = MatchTable::default();
        assert!(matches!(Aggregator::win_counts(&t), Err(DashboardError::EmptyInput(_))));
        assert!(matches!(Aggregator::toss_decisions(&t), Err(DashboardError::EmptyInput(_))));
        assert!(matches!(Aggregator::toss_impact(&t), Err(DashboardError::EmptyInput(_))));
        assert!(matches!(Aggregator::city_season_wins(&t), Err(DashboardError::EmptyInput(_))));
        assert!(matches!(Aggregator::top_players(&t), Err(DashboardError::EmptyInput(_))));
    }
}
