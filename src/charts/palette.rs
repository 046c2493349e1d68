//! Chart Palettes
//! Fixed hues and continuous colormaps sampled by linear interpolation.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0, 0, 0);
    pub const WHITE: Rgb = Rgb(255, 255, 255);

    /// Relative luminance in `0.0..=1.0`.
    pub fn luminance(self) -> f64 {
        (0.2126 * self.0 as f64 + 0.7152 * self.1 as f64 + 0.0722 * self.2 as f64) / 255.0
    }

    /// Black or white, whichever reads better on top of `self`.
    pub fn contrast_text(self) -> Rgb {
        if self.luminance() > 0.5 {
            Rgb::BLACK
        } else {
            Rgb::WHITE
        }
    }

    fn lerp(self, other: Rgb, t: f64) -> Rgb {
        let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
        Rgb(mix(self.0, other.0), mix(self.1, other.1), mix(self.2, other.2))
    }
}

// Toss pies
pub const TOSS_DECISION_COLORS: [Rgb; 2] = [Rgb(0x66, 0xb3, 0xff), Rgb(0xff, 0xb3, 0x66)];
pub const TOSS_IMPACT_COLORS: [Rgb; 2] = [Rgb(0x88, 0xc9, 0x99), Rgb(0xf8, 0x8c, 0x9c)];

// Win-margin histograms
pub const RUNS_COLOR: Rgb = Rgb(0, 0, 255);
pub const WICKETS_COLOR: Rgb = Rgb(0, 128, 0);

/// Continuous colormaps used by the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorMap {
    CoolWarm,
    Viridis,
    YlGnBu,
}

impl ColorMap {
    fn stops(self) -> &'static [Rgb] {
        match self {
            ColorMap::CoolWarm => &[
                Rgb(59, 76, 192),
                Rgb(141, 176, 254),
                Rgb(221, 220, 220),
                Rgb(244, 154, 123),
                Rgb(180, 4, 38),
            ],
            ColorMap::Viridis => &[
                Rgb(68, 1, 84),
                Rgb(59, 82, 139),
                Rgb(33, 145, 140),
                Rgb(94, 201, 98),
                Rgb(253, 231, 37),
            ],
            ColorMap::YlGnBu => &[
                Rgb(255, 255, 217),
                Rgb(199, 233, 180),
                Rgb(65, 182, 196),
                Rgb(34, 94, 168),
                Rgb(8, 29, 88),
            ],
        }
    }

    /// Color at `t`, clamped to `0.0..=1.0`.
    pub fn at(self, t: f64) -> Rgb {
        let stops = self.stops();
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let scaled = t * (stops.len() - 1) as f64;
        let idx = (scaled.floor() as usize).min(stops.len() - 2);
        stops[idx].lerp(stops[idx + 1], scaled - idx as f64)
    }

    /// `n` discrete colors, evenly spaced and excluding both extremes.
    pub fn sample(self, n: usize) -> Vec<Rgb> {
        (0..n)
            .map(|i| self.at((i + 1) as f64 / (n + 1) as f64))
            .collect()
    }
}
