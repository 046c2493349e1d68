//! Chart Specifications
//! Pure description of each chart: kind, labels, colors and annotations.
//! Drawing happens later, either interactively or to a static image.

use crate::charts::palette::{
    ColorMap, Rgb, RUNS_COLOR, TOSS_DECISION_COLORS, TOSS_IMPACT_COLORS, WICKETS_COLOR,
};
use crate::stats::{
    CitySeasonMatrix, CountSeries, Distribution, Histogram, MarginKind, MarginSample,
    StatsCalculator,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    VerticalBar,
    HorizontalBar,
    Pie,
    Heatmap,
    Histogram,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub label: String,
    pub value: usize,
    pub color: Rgb,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BarChartSpec {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub horizontal: bool,
    pub bars: Vec<Bar>,
    /// Print each bar's integer value above it.
    pub annotate: bool,
}

impl BarChartSpec {
    pub fn max_value(&self) -> usize {
        self.bars.iter().map(|b| b.value).max().unwrap_or(0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Slice {
    pub label: String,
    pub count: usize,
    pub fraction: f64,
    pub color: Rgb,
}

impl Slice {
    /// Percentage label, one decimal place.
    pub fn percent_label(&self) -> String {
        format!("{:.1}%", self.fraction * 100.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PieChartSpec {
    pub title: String,
    pub slices: Vec<Slice>,
    /// Degrees counter-clockwise from the positive x axis.
    pub start_angle: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HeatmapSpec {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub row_labels: Vec<String>,
    pub col_labels: Vec<String>,
    pub cells: Vec<Vec<usize>>,
    pub colormap: ColorMap,
    pub annotate: bool,
}

impl HeatmapSpec {
    pub fn max_value(&self) -> usize {
        self.cells
            .iter()
            .flat_map(|row| row.iter().copied())
            .max()
            .unwrap_or(0)
    }

    /// Fill color for a cell value.
    pub fn cell_color(&self, value: usize) -> Rgb {
        let max = self.max_value();
        let t = if max == 0 {
            0.0
        } else {
            value as f64 / max as f64
        };
        self.colormap.at(t)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HistogramSpec {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub histogram: Histogram,
    /// Count-scaled density overlay.
    pub density: Option<Vec<[f64; 2]>>,
    pub color: Rgb,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ChartSpec {
    Bar(BarChartSpec),
    Pie(PieChartSpec),
    Heatmap(HeatmapSpec),
    Histogram(HistogramSpec),
}

impl ChartSpec {
    pub fn kind(&self) -> ChartKind {
        match self {
            ChartSpec::Bar(bar) if bar.horizontal => ChartKind::HorizontalBar,
            ChartSpec::Bar(_) => ChartKind::VerticalBar,
            ChartSpec::Pie(_) => ChartKind::Pie,
            ChartSpec::Heatmap(_) => ChartKind::Heatmap,
            ChartSpec::Histogram(_) => ChartKind::Histogram,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            ChartSpec::Bar(s) => &s.title,
            ChartSpec::Pie(s) => &s.title,
            ChartSpec::Heatmap(s) => &s.title,
            ChartSpec::Histogram(s) => &s.title,
        }
    }

    /// Wins per team, one coolwarm color per bar.
    pub fn team_performance(wins: &CountSeries) -> Self {
        let colors = ColorMap::CoolWarm.sample(wins.len());
        ChartSpec::Bar(BarChartSpec {
            title: "Team Performances (Number of Wins)".to_string(),
            x_label: "Teams".to_string(),
            y_label: "Number of Wins".to_string(),
            horizontal: false,
            bars: Self::bars(wins, colors),
            annotate: true,
        })
    }

    pub fn toss_decisions(dist: &Distribution) -> Self {
        Self::pie("Distribution of Toss Decisions", dist, &TOSS_DECISION_COLORS, 70.0)
    }

    pub fn toss_impact(dist: &Distribution) -> Self {
        Self::pie("Impact of Toss on Match Results", dist, &TOSS_IMPACT_COLORS, 90.0)
    }

    pub fn city_season(matrix: &CitySeasonMatrix) -> Self {
        ChartSpec::Heatmap(HeatmapSpec {
            title: "Win Frequencies Across Cities and Seasons".to_string(),
            x_label: "City".to_string(),
            y_label: "Season".to_string(),
            row_labels: matrix.seasons.iter().map(|s| s.to_string()).collect(),
            col_labels: matrix.cities.clone(),
            cells: matrix.counts.clone(),
            colormap: ColorMap::YlGnBu,
            annotate: true,
        })
    }

    /// Award leaders, top entry first.
    pub fn top_players(top: &CountSeries) -> Self {
        let colors = ColorMap::Viridis.sample(top.len());
        ChartSpec::Bar(BarChartSpec {
            title: "Top 10 Players of the Match".to_string(),
            x_label: "Number of Awards".to_string(),
            y_label: "Players".to_string(),
            horizontal: true,
            bars: Self::bars(top, colors),
            annotate: false,
        })
    }

    pub fn win_margin(sample: &MarginSample) -> Self {
        let histogram = StatsCalculator::histogram(&sample.values, sample.kind.bins());
        let density = StatsCalculator::density_curve(&sample.values, histogram.bin_width());
        let color = match sample.kind {
            MarginKind::Runs => RUNS_COLOR,
            MarginKind::Wickets => WICKETS_COLOR,
        };

        ChartSpec::Histogram(HistogramSpec {
            title: format!("Distribution of Wins by {}", sample.kind.label()),
            x_label: format!("Win by {}", sample.kind.label()),
            y_label: "Frequency".to_string(),
            histogram,
            density,
            color,
        })
    }

    fn bars(series: &CountSeries, colors: Vec<Rgb>) -> Vec<Bar> {
        series
            .entries
            .iter()
            .zip(colors)
            .map(|((label, value), color)| Bar {
                label: label.clone(),
                value: *value,
                color,
            })
            .collect()
    }

    fn pie(title: &str, dist: &Distribution, colors: &[Rgb], start_angle: f64) -> Self {
        let slices = dist
            .shares
            .iter()
            .enumerate()
            .map(|(i, share)| Slice {
                label: share.label.clone(),
                count: share.count,
                fraction: share.fraction,
                color: colors[i % colors.len()],
            })
            .collect();

        ChartSpec::Pie(PieChartSpec {
            title: title.to_string(),
            slices,
            start_angle,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(entries: &[(&str, usize)]) -> CountSeries {
        CountSeries {
            entries: entries.iter().map(|(l, c)| (l.to_string(), *c)).collect(),
        }
    }

    #[test]
    fn team_bars_are_annotated_vertical() {
        let spec = ChartSpec::team_performance(&series(&[("A", 5), ("B", 3)]));
        assert_eq!(spec.kind(), ChartKind::VerticalBar);
        let ChartSpec::Bar(bar) = spec else {
            panic!("expected bar chart");
        };
        assert!(bar.annotate);
        assert_eq!(bar.bars.len(), 2);
        assert_eq!(bar.max_value(), 5);
        assert_ne!(bar.bars[0].color, bar.bars[1].color);
    }

    #[test]
    fn pies_use_their_own_hues() {
        let dist = Distribution {
            shares: vec![],
            total: 0,
        };
        let ChartSpec::Pie(decision) = ChartSpec::toss_decisions(&dist) else {
            panic!("expected pie");
        };
        assert_eq!(decision.start_angle, 70.0);

        let slice = Slice {
            label: "bat".to_string(),
            count: 2,
            fraction: 2.0 / 3.0,
            color: TOSS_DECISION_COLORS[0],
        };
        assert_eq!(slice.percent_label(), "66.7%");
    }

    #[test]
    fn margin_histograms_use_fixed_bins() {
        let runs = MarginSample {
            kind: MarginKind::Runs,
            values: vec![1.0, 20.0, 35.0, 80.0, 140.0],
        };
        let ChartSpec::Histogram(hist) = ChartSpec::win_margin(&runs) else {
            panic!("expected histogram");
        };
        assert_eq!(hist.histogram.counts.len(), 20);
        assert_eq!(hist.color, RUNS_COLOR);
        assert_eq!(hist.x_label, "Win by Runs");
        assert!(hist.density.is_some());

        let wickets = MarginSample {
            kind: MarginKind::Wickets,
            values: vec![3.0, 7.0],
        };
        let ChartSpec::Histogram(hist) = ChartSpec::win_margin(&wickets) else {
            panic!("expected histogram");
        };
        assert_eq!(hist.histogram.counts.len(), 10);
        assert_eq!(hist.color, WICKETS_COLOR);
    }

    #[test]
    fn heatmap_colors_scale_to_max() {
        let matrix = CitySeasonMatrix {
            seasons: vec![2008, 2009],
            cities: vec!["Delhi".to_string()],
            counts: vec![vec![0], vec![4]],
        };
        let ChartSpec::Heatmap(heat) = ChartSpec::city_season(&matrix) else {
            panic!("expected heatmap");
        };
        assert_eq!(heat.row_labels, vec!["2008", "2009"]);
        assert_eq!(heat.cell_color(0), ColorMap::YlGnBu.at(0.0));
        assert_eq!(heat.cell_color(4), ColorMap::YlGnBu.at(1.0));
    }
}
