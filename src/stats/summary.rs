//! Delivery Summary Module
//! Histogram, density curve and descriptive statistics over delivery times.

use crate::data::DeliveredOrder;
use statrs::distribution::{Continuous, Normal};
use statrs::statistics::Statistics;

/// Default number of histogram bins.
pub const DEFAULT_HISTOGRAM_BINS: usize = 30;

/// Points sampled along the density curve.
const KDE_POINTS: usize = 200;

/// One histogram bar covering `[start, end)`; the last bin also includes `end`.
#[derive(Debug, Clone, PartialEq)]
pub struct HistogramBin {
    pub start: f64,
    pub end: f64,
    pub count: u64,
}

impl HistogramBin {
    pub fn center(&self) -> f64 {
        (self.start + self.end) / 2.0
    }

    pub fn width(&self) -> f64 {
        self.end - self.start
    }
}

/// Descriptive statistics of delivery times for the selected range.
#[derive(Debug, Clone, PartialEq)]
pub struct DeliverySummary {
    pub orders: usize,
    pub mean: f64,
    pub median: f64,
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
    /// Share of rows delivered on or before the estimate.
    pub on_time_share: f64,
}

impl Default for DeliverySummary {
    fn default() -> Self {
        Self {
            orders: 0,
            mean: f64::NAN,
            median: f64::NAN,
            std_dev: f64::NAN,
            min: f64::NAN,
            max: f64::NAN,
            on_time_share: f64::NAN,
        }
    }
}

/// Everything the histogram panel draws.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeliveryDistribution {
    pub bins: Vec<HistogramBin>,
    /// Gaussian KDE scaled to bar counts, as `(delivery_time, orders)` points.
    pub density: Vec<[f64; 2]>,
    pub summary: DeliverySummary,
}

pub struct DeliveryStats;

impl DeliveryStats {
    /// Delivery times as floats. Orders without an estimate are left out.
    pub fn delivery_times(orders: &[DeliveredOrder]) -> Vec<f64> {
        orders
            .iter()
            .filter_map(|o| o.delivery_time.map(|days| days as f64))
            .collect()
    }

    /// Build bins, density curve and summary for a set of delivered orders.
    pub fn distribution(orders: &[DeliveredOrder], bins: usize) -> DeliveryDistribution {
        let values = Self::delivery_times(orders);
        let bins = Self::histogram(&values, bins);
        let density = Self::density_curve(&values, &bins);
        DeliveryDistribution {
            summary: Self::summarize(&values),
            bins,
            density,
        }
    }

    pub fn summarize(values: &[f64]) -> DeliverySummary {
        let n = values.len();
        if n == 0 {
            return DeliverySummary::default();
        }

        let mut sorted = values.to_vec();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

        let median = if n % 2 == 0 {
            (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
        } else {
            sorted[n / 2]
        };
        let std_dev = if n > 1 { values.iter().std_dev() } else { 0.0 };
        let on_time = values.iter().filter(|&&v| v >= 0.0).count();

        DeliverySummary {
            orders: n,
            mean: values.iter().mean(),
            median,
            std_dev,
            min: sorted[0],
            max: sorted[n - 1],
            on_time_share: on_time as f64 / n as f64,
        }
    }

    /// Equal-width bins spanning the data. A single distinct value gets a
    /// unit-wide window centered on it.
    pub fn histogram(values: &[f64], bins: usize) -> Vec<HistogramBin> {
        if values.is_empty() || bins == 0 {
            return Vec::new();
        }

        let (mut lo, mut hi) = values
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            });
        if lo == hi {
            lo -= 0.5;
            hi += 0.5;
        }

        let width = (hi - lo) / bins as f64;
        let mut counts = vec![0u64; bins];
        for &v in values {
            let idx = (((v - lo) / width).floor() as usize).min(bins - 1);
            counts[idx] += 1;
        }

        counts
            .into_iter()
            .enumerate()
            .map(|(i, count)| HistogramBin {
                start: lo + i as f64 * width,
                end: if i + 1 == bins {
                    hi
                } else {
                    lo + (i + 1) as f64 * width
                },
                count,
            })
            .collect()
    }

    /// Gaussian kernel density with Scott's bandwidth, scaled so the curve
    /// reads in orders per bin. Empty when the data has no spread.
    pub fn density_curve(values: &[f64], bins: &[HistogramBin]) -> Vec<[f64; 2]> {
        let n = values.len();
        let (Some(first), Some(last)) = (bins.first(), bins.last()) else {
            return Vec::new();
        };
        if n < 2 {
            return Vec::new();
        }

        let std_dev = values.iter().std_dev();
        let bandwidth = std_dev * (n as f64).powf(-0.2);
        let Ok(kernel) = Normal::new(0.0, bandwidth) else {
            return Vec::new();
        };

        let scale = n as f64 * first.width();
        let (lo, hi) = (first.start, last.end);
        let step = (hi - lo) / (KDE_POINTS - 1) as f64;

        (0..KDE_POINTS)
            .map(|i| {
                let x = lo + i as f64 * step;
                let density = values.iter().map(|&v| kernel.pdf(x - v)).sum::<f64>() / n as f64;
                [x, density * scale]
            })
            .collect()
    }
}
