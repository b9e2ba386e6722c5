//! Fixed-width histogram of interval values

use serde::Serialize;

/// Number of bins used when none is configured
pub const DEFAULT_BINS: usize = 30;

const BAR_CHAR: char = '█';

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

/// Equal-width bins spanning the minimum to the maximum value.
///
/// The last bin includes its upper edge. A sequence with a single distinct
/// value gets the range `value ± 0.5`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Histogram {
    pub bins: Vec<Bin>,
}

impl Histogram {
    pub fn from_values(values: &[f64], bin_count: usize) -> Self {
        let bin_count = bin_count.max(1);
        let (lo, hi) = value_range(values);
        let width = (hi - lo) / bin_count as f64;

        let mut bins: Vec<Bin> = (0..bin_count)
            .map(|i| Bin {
                lower: lo + width * i as f64,
                upper: if i + 1 == bin_count {
                    hi
                } else {
                    lo + width * (i + 1) as f64
                },
                count: 0,
            })
            .collect();

        for value in values {
            let index = (((value - lo) / width).floor() as usize).min(bin_count - 1);
            bins[index].count += 1;
        }

        Self { bins }
    }

    pub fn total(&self) -> usize {
        self.bins.iter().map(|b| b.count).sum()
    }

    pub fn max_count(&self) -> usize {
        self.bins.iter().map(|b| b.count).max().unwrap_or(0)
    }

    /// Render one line per bin with bars scaled to `bar_width` characters
    pub fn render_text(&self, bar_width: usize) -> String {
        let max = self.max_count();
        let mut output = String::new();

        for bin in &self.bins {
            let length = if max == 0 {
                0
            } else {
                // Non-empty bins always get at least one character
                ((bin.count * bar_width + max - 1) / max).max(usize::from(bin.count > 0))
            };
            output.push_str(&format!(
                "  {:>10.2} - {:<10.2} | {:<width$} {}\n",
                bin.lower,
                bin.upper,
                BAR_CHAR.to_string().repeat(length),
                bin.count,
                width = bar_width
            ));
        }
        output
    }
}

fn value_range(values: &[f64]) -> (f64, f64) {
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    if values.is_empty() {
        (0.0, 1.0)
    } else if min == max {
        (min - 0.5, max + 0.5)
    } else {
        (min, max)
    }
}
