//! Simulated trend chart.
//!
//! Both series are random noise drawn fresh for every page render. They are
//! decoration and say nothing about the analyzed text.

use rand::Rng;
use rand_distr::StandardNormal;

/// Points per series.
pub const POINTS: usize = 20;

pub const TITLE: &str = "Analytics Overview (Simulated)";

const SERIES: [(&str, &str); 2] = [("Positive Trend", "#2e7d32"), ("Negative Trend", "#c62828")];

pub struct TrendSeries {
    pub name: &'static str,
    pub color: &'static str,
    pub values: Vec<f64>,
}

pub struct TrendChart {
    pub series: Vec<TrendSeries>,
}

impl TrendChart {
    /// Draw a chart from the thread-local generator.
    pub fn random() -> Self {
        Self::generate(&mut rand::thread_rng())
    }

    pub fn generate<R: Rng>(rng: &mut R) -> Self {
        let series = SERIES
            .iter()
            .map(|&(name, color)| TrendSeries {
                name,
                color,
                values: (0..POINTS).map(|_| rng.sample(StandardNormal)).collect(),
            })
            .collect();
        Self { series }
    }

    /// Smallest and largest value over all series, widened so the range is never empty.
    pub fn bounds(&self) -> (f64, f64) {
        let values = self.series.iter().flat_map(|s| s.values.iter().copied());
        let (min, max) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
        if !min.is_finite() || !max.is_finite() {
            return (-1.0, 1.0);
        }
        if (max - min).abs() < f64::EPSILON {
            return (min - 1.0, max + 1.0);
        }
        (min, max)
    }

    /// SVG `points` attribute for one series scaled into `width` x `height`.
    pub fn polyline(&self, series: &TrendSeries, width: f64, height: f64) -> String {
        let (min, max) = self.bounds();
        let step = width / (POINTS.saturating_sub(1).max(1)) as f64;

        series
            .values
            .iter()
            .enumerate()
            .map(|(i, v)| {
                let x = i as f64 * step;
                let y = height - (v - min) / (max - min) * height;
                format!("{:.1},{:.1}", x, y)
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Vertical position of zero, clamped into the plot area.
    pub fn zero_line(&self, height: f64) -> f64 {
        let (min, max) = self.bounds();
        (height - (0.0 - min) / (max - min) * height).clamp(0.0, height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_chart_shape() {
        let chart = TrendChart::generate(&mut StdRng::seed_from_u64(7));

        let names: Vec<&str> = chart.series.iter().map(|s| s.name).collect();
        assert_eq!(names, vec!["Positive Trend", "Negative Trend"]);
        assert!(chart.series.iter().all(|s| s.values.len() == POINTS));
    }

    #[test]
    fn test_polyline_stays_in_plot_area() {
        let chart = TrendChart::generate(&mut StdRng::seed_from_u64(42));

        for series in &chart.series {
            let points = chart.polyline(series, 600.0, 200.0);
            let pairs: Vec<&str> = points.split(' ').collect();
            assert_eq!(pairs.len(), POINTS);
            for pair in pairs {
                let (x, y) = pair.split_once(',').unwrap();
                let (x, y): (f64, f64) = (x.parse().unwrap(), y.parse().unwrap());
                assert!((0.0..=600.0).contains(&x));
                assert!((0.0..=200.0).contains(&y));
            }
        }
    }

    #[test]
    fn test_flat_series_has_nonempty_bounds() {
        let chart = TrendChart {
            series: vec![TrendSeries {
                name: "Positive Trend",
                color: "#000",
                values: vec![0.5; POINTS],
            }],
        };
        let (min, max) = chart.bounds();
        assert!(max > min);
    }
}
