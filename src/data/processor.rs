//! Data Processor Module
//! One-time cleaning of the loaded match table.

use crate::data::MatchTable;

/// Historical misspelling of the Pune franchise.
pub const LEGACY_TEAM_NAME: &str = "Rising Pune Supergiant";
pub const CANONICAL_TEAM_NAME: &str = "Rising Pune Supergiants";

/// Handles data cleaning operations.
pub struct DataProcessor;

impl DataProcessor {
    /// Rewrite the legacy team spelling in `team1`, `team2` and `winner`.
    ///
    /// Absent values stay absent. Returns the number of cells changed, so a
    /// second pass always returns 0.
    pub fn normalize_team_names(table: &mut MatchTable) -> usize {
        let mut changed = 0;

        for record in table.records_mut() {
            for cell in [&mut record.team1, &mut record.team2, &mut record.winner] {
                if let Some(name) = cell {
                    if name.as_str() == LEGACY_TEAM_NAME {
                        *name = CANONICAL_TEAM_NAME.to_string();
                        changed += 1;
                    }
                }
            }
        }

        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::MatchRecord;

    fn record(team1: &str, team2: &str, winner: Option<&str>) -> MatchRecord {
        MatchRecord {
            team1: Some(team1.to_string()),
            team2: Some(team2.to_string()),
            toss_winner: Some(LEGACY_TEAM_NAME.to_string()),
            winner: winner.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn rewrites_all_three_columns() {
        let mut table = MatchTable::from_records(vec![
            record(LEGACY_TEAM_NAME, "Mumbai Indians", Some(LEGACY_TEAM_NAME)),
            record("Gujarat Lions", LEGACY_TEAM_NAME, None),
        ]);

        assert_eq!(DataProcessor::normalize_team_names(&mut table), 3);

        let rows = table.records();
        assert_eq!(rows[0].team1.as_deref(), Some(CANONICAL_TEAM_NAME));
        assert_eq!(rows[0].team2.as_deref(), Some("Mumbai Indians"));
        assert_eq!(rows[0].winner.as_deref(), Some(CANONICAL_TEAM_NAME));
        assert_eq!(rows[1].team2.as_deref(), Some(CANONICAL_TEAM_NAME));
        assert_eq!(rows[1].winner, None);
        // toss_winner is outside the pass
        assert_eq!(rows[0].toss_winner.as_deref(), Some(LEGACY_TEAM_NAME));
    }

    #[test]
    fn second_pass_changes_nothing() {
        let mut table = MatchTable::from_records(vec![record(
            LEGACY_TEAM_NAME,
            LEGACY_TEAM_NAME,
            Some(LEGACY_TEAM_NAME),
        )]);
        DataProcessor::normalize_team_names(&mut table);
        let once = table.clone();

        assert_eq!(DataProcessor::normalize_team_names(&mut table), 0);
        assert_eq!(table, once);
    }
}
