//! Navigation Views
//! Maps each sidebar option to the aggregations and charts it shows.

use crate::charts::ChartSpec;
use crate::data::MatchTable;
use crate::error::DashboardError;
use crate::stats::{Aggregator, MarginKind};
use log::warn;

/// One sidebar option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum View {
    #[default]
    TeamPerformances,
    TossDecisions,
    WinFrequencies,
    TopPlayers,
    MatchOutcomes,
}

/// A chart slot inside a view. Empty aggregates keep their slot and show a
/// message instead of a chart.
#[derive(Debug, Clone, PartialEq)]
pub struct Panel {
    pub heading: Option<&'static str>,
    pub chart: Result<ChartSpec, DashboardError>,
}

impl View {
    pub const ALL: [View; 5] = [
        View::TeamPerformances,
        View::TossDecisions,
        View::WinFrequencies,
        View::TopPlayers,
        View::MatchOutcomes,
    ];

    pub fn label(self) -> &'static str {
        match self {
            View::TeamPerformances => "Team Performances",
            View::TossDecisions => "Toss Decisions",
            View::WinFrequencies => "Win Frequencies",
            View::TopPlayers => "Top Players",
            View::MatchOutcomes => "Match Outcomes",
        }
    }

    pub fn from_label(label: &str) -> Result<View, DashboardError> {
        View::ALL
            .into_iter()
            .find(|v| v.label() == label)
            .ok_or_else(|| DashboardError::UnknownSelection(label.to_string()))
    }

    /// Page heading shown above the view's charts.
    pub fn heading(self) -> &'static str {
        match self {
            View::TeamPerformances => "Team Performances (Number of Wins)",
            View::TossDecisions => "Toss Decisions",
            View::WinFrequencies => "Win Frequencies Across Cities and Seasons",
            View::TopPlayers => "Top Players of the Match",
            View::MatchOutcomes => "Match Outcomes by Runs and Wickets",
        }
    }

    /// Stable name for exported files.
    pub fn slug(self) -> &'static str {
        match self {
            View::TeamPerformances => "team_performances",
            View::TossDecisions => "toss_decisions",
            View::WinFrequencies => "win_frequencies",
            View::TopPlayers => "top_players",
            View::MatchOutcomes => "match_outcomes",
        }
    }

    /// Run this view's aggregations and build its charts.
    pub fn build(self, table: &MatchTable) -> Vec<Panel> {
        let panels = match self {
            View::TeamPerformances => vec![Panel {
                heading: None,
                chart: Aggregator::win_counts(table).map(|w| ChartSpec::team_performance(&w)),
            }],
            View::TossDecisions => vec![
                Panel {
                    heading: Some("Toss Decisions Distribution"),
                    chart: Aggregator::toss_decisions(table).map(|d| ChartSpec::toss_decisions(&d)),
                },
                Panel {
                    heading: Some("Toss Winning Impact"),
                    chart: Aggregator::toss_impact(table).map(|d| ChartSpec::toss_impact(&d)),
                },
            ],
            View::WinFrequencies => vec![Panel {
                heading: None,
                chart: Aggregator::city_season_wins(table).map(|m| ChartSpec::city_season(&m)),
            }],
            View::TopPlayers => vec![Panel {
                heading: None,
                chart: Aggregator::top_players(table).map(|t| ChartSpec::top_players(&t)),
            }],
            View::MatchOutcomes => vec![
                Panel {
                    heading: Some("Matches Won by Runs"),
                    chart: Aggregator::win_margins(table, MarginKind::Runs)
                        .map(|s| ChartSpec::win_margin(&s)),
                },
                Panel {
                    heading: Some("Matches Won by Wickets"),
                    chart: Aggregator::win_margins(table, MarginKind::Wickets)
                        .map(|s| ChartSpec::win_margin(&s)),
                },
            ],
        };

        for panel in &panels {
            if let Err(e) = &panel.chart {
                warn!("{}: {}", self.label(), e);
            }
        }
        panels
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_round_trip() {
        for view in View::ALL {
            assert_eq!(View::from_label(view.label()), Ok(view));
        }
    }

    #[test]
    fn unknown_label_is_rejected() {
        assert_eq!(
            View::from_label("Player Ratings"),
            Err(DashboardError::UnknownSelection("Player Ratings".to_string()))
        );
    }

    #[test]
    fn default_is_first_option() {
        assert_eq!(View::default(), View::ALL[0]);
    }
}
