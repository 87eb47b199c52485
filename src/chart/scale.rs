// ---------------------------------------------------------------------------
// LinearScale – domain → range mapping
// ---------------------------------------------------------------------------

/// Continuous linear mapping from a data interval onto a pixel interval.
///
/// A degenerate domain (`d0 == d1`) maps everything to the middle of the
/// range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    pub domain: [f64; 2],
    pub range: [f64; 2],
}

impl LinearScale {
    pub fn new(domain: [f64; 2], range: [f64; 2]) -> Self {
        Self { domain, range }
    }

    /// Map a domain value onto the range. Values outside the domain
    /// extrapolate.
    pub fn apply(&self, v: f64) -> f64 {
        let [d0, d1] = self.domain;
        let [r0, r1] = self.range;
        let span = d1 - d0;
        let t = if span == 0.0 { 0.5 } else { (v - d0) / span };
        r0 + t * (r1 - r0)
    }

    /// Roughly `count` round tick values inside the domain, ascending.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        let [a, b] = self.domain;
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        nice_ticks(lo, hi, count)
    }

    /// Tick values paired with labels whose precision fits the step.
    pub fn tick_labels(&self, count: usize) -> Vec<(f64, String)> {
        let ticks = self.ticks(count);
        let decimals = match ticks.as_slice() {
            [first, second, ..] => decimals_for_step((second - first).abs()),
            _ => 0,
        };
        ticks
            .into_iter()
            .map(|t| (t, format!("{t:.decimals$}")))
            .collect()
    }
}

// -- Tick helpers --

/// Ascending ticks on a 1-2-5 step grid. Sub-unit steps are built by
/// dividing integer indices, so `0.1`-style values print cleanly.
fn nice_ticks(lo: f64, hi: f64, count: usize) -> Vec<f64> {
    if !lo.is_finite() || !hi.is_finite() || count == 0 {
        return Vec::new();
    }
    if lo == hi {
        return vec![lo];
    }
    let raw = (hi - lo) / count as f64;
    let power = raw.log10().floor();
    let error = raw / 10f64.powf(power);
    let factor = if error >= 50f64.sqrt() {
        10.0
    } else if error >= 10f64.sqrt() {
        5.0
    } else if error >= 2f64.sqrt() {
        2.0
    } else {
        1.0
    };

    if power < 0.0 {
        let inv = 10f64.powf(-power) / factor;
        let mut i1 = (lo * inv).round();
        let mut i2 = (hi * inv).round();
        if i1 / inv < lo {
            i1 += 1.0;
        }
        if i2 / inv > hi {
            i2 -= 1.0;
        }
        (i1 as i64..=i2 as i64).map(|i| i as f64 / inv).collect()
    } else {
        let step = 10f64.powf(power) * factor;
        let mut i1 = (lo / step).round();
        let mut i2 = (hi / step).round();
        if i1 * step < lo {
            i1 += 1.0;
        }
        if i2 * step > hi {
            i2 -= 1.0;
        }
        (i1 as i64..=i2 as i64).map(|i| i as f64 * step).collect()
    }
}

fn decimals_for_step(step: f64) -> usize {
    if step <= 0.0 || !step.is_finite() {
        return 0;
    }
    (-step.log10().floor()).max(0.0) as usize
}
