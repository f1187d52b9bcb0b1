//! ASCII plotting for terminal output.
//!
//! This is intentionally "dumb" (fixed-size grid), optimized for:
//! - quick visual sanity checks of the tail fit in a terminal
//! - deterministic output (helpful for golden tests)
//!
//! Plot elements, in the family's coordinates (`t` or `ln t` vs `ln S`):
//! - survival points outside the chosen window: `.`
//! - survival points inside the chosen window: `o`
//! - fitted tail line: `-`

use crate::domain::TailFamily;
use crate::fit::fit_window;
use crate::models::{predict_log_survival, regressor};

/// Render `ln S` against the family's abscissa with the chosen window's line.
pub fn render_survival_plot(
    family: TailFamily,
    fired: &[f64],
    survival: &[f64],
    best_limit: usize,
    width: usize,
    height: usize,
) -> String {
    let width = width.max(10);
    let height = height.max(5);

    let points: Vec<(usize, f64, f64)> = fired
        .iter()
        .zip(survival)
        .enumerate()
        .map(|(i, (&t, &s))| (i, regressor(family, t), s.ln()))
        .filter(|(_, x, y)| x.is_finite() && y.is_finite())
        .collect();

    let Some(((x_min, x_max), (y_min, y_max))) = ranges(&points) else {
        return "Plot: not enough finite points to draw.\n".to_string();
    };
    let (y_min, y_max) = pad_range(y_min, y_max, 0.05);

    let mut canvas = Canvas::new(width, height, (x_min, x_max), (y_min, y_max));

    // Line first so the survival markers stay visible on top of it.
    if let Some(line) = fit_window(family, fired, survival, best_limit) {
        let x_start = points
            .iter()
            .find(|(i, _, _)| *i >= best_limit)
            .map_or(x_min, |&(_, x, _)| x);
        canvas.trace(x_start, x_max, |x| line.intercept + line.slope * x, '-');
    }

    for &(i, x, y) in &points {
        canvas.put(x, y, if i >= best_limit { 'o' } else { '.' });
    }

    let x_label = match family {
        TailFamily::Exponential => "t",
        TailFamily::Power => "ln t",
    };
    let mut out = format!("Plot: {x_label}=[{x_min:.3}, {x_max:.3}] | ln S=[{y_min:.3}, {y_max:.3}]\n");
    out.push_str(&canvas.render());
    out
}

/// Fitted `ln S` at the horizon, for annotating where the extrapolation starts.
pub fn log_survival_at(family: TailFamily, fired: &[f64], survival: &[f64], best_limit: usize, t: f64) -> Option<f64> {
    let line = fit_window(family, fired, survival, best_limit)?;
    let y = predict_log_survival(family, t, line.intercept, line.slope);
    y.is_finite().then_some(y)
}

type Range = (f64, f64);

fn ranges(points: &[(usize, f64, f64)]) -> Option<(Range, Range)> {
    let (x, y) = points.iter().fold(
        ((f64::INFINITY, f64::NEG_INFINITY), (f64::INFINITY, f64::NEG_INFINITY)),
        |((x_lo, x_hi), (y_lo, y_hi)), &(_, x, y)| ((x_lo.min(x), x_hi.max(x)), (y_lo.min(y), y_hi.max(y))),
    );
    (x.1 > x.0 && y.1 > y.0).then_some((x, y))
}

fn pad_range(min: f64, max: f64, frac: f64) -> (f64, f64) {
    let pad = ((max - min).abs() * frac).max(1e-12);
    (min - pad, max + pad)
}

/// Row-major character grid over a fixed data window; row 0 is the top.
struct Canvas {
    cols: usize,
    rows: usize,
    x: Range,
    y: Range,
    cells: Vec<char>,
}

impl Canvas {
    fn new(cols: usize, rows: usize, x: Range, y: Range) -> Self {
        Self {
            cols,
            rows,
            x,
            y,
            cells: vec![' '; cols * rows],
        }
    }

    fn col(&self, x: f64) -> usize {
        let u = ((x - self.x.0) / (self.x.1 - self.x.0)).clamp(0.0, 1.0);
        (u * (self.cols - 1) as f64).round() as usize
    }

    fn row(&self, y: f64) -> usize {
        let u = ((y - self.y.0) / (self.y.1 - self.y.0)).clamp(0.0, 1.0);
        ((1.0 - u) * (self.rows - 1) as f64).round() as usize
    }

    /// Data x at the centre of column `c`.
    fn x_at(&self, c: usize) -> f64 {
        self.x.0 + (self.x.1 - self.x.0) * c as f64 / (self.cols - 1) as f64
    }

    fn put(&mut self, x: f64, y: f64, ch: char) {
        let idx = self.row(y) * self.cols + self.col(x);
        self.cells[idx] = ch;
    }

    /// Trace `f` column by column over `[x_from, x_to]`, filling the vertical
    /// run between neighbouring columns so steep lines stay connected. Only
    /// blank cells are written.
    fn trace(&mut self, x_from: f64, x_to: f64, f: impl Fn(f64) -> f64, ch: char) {
        let (c_from, c_to) = (self.col(x_from), self.col(x_to));
        let mut prev_row: Option<usize> = None;
        for c in c_from..=c_to {
            let y = f(self.x_at(c));
            if !y.is_finite() {
                prev_row = None;
                continue;
            }
            let r = self.row(y);
            let (lo, hi) = match prev_row {
                Some(p) if p < r => (p + 1, r),
                Some(p) if p > r => (r, p - 1),
                _ => (r, r),
            };
            for rr in lo..=hi {
                let cell = &mut self.cells[rr * self.cols + c];
                if *cell == ' ' {
                    *cell = ch;
                }
            }
            prev_row = Some(r);
        }
    }

    fn render(&self) -> String {
        let mut out = String::with_capacity((self.cols + 1) * self.rows);
        for line in self.cells.chunks(self.cols) {
            out.extend(line);
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::survival::survival_curve;

    #[test]
    fn plot_has_header_and_fixed_grid() {
        let fired = [0.5, 1.2, 1.9, 2.4, 3.1];
        let survival = survival_curve(5, 8);
        let txt = render_survival_plot(TailFamily::Exponential, &fired, &survival, 1, 20, 6);

        let lines: Vec<&str> = txt.lines().collect();
        assert!(lines[0].starts_with("Plot: t=[0.500, 3.100]"));
        assert_eq!(lines.len(), 7);
        assert!(lines[1..].iter().all(|l| l.chars().count() == 20));

        // First point is outside the window, the other four inside it.
        let body = lines[1..].join("\n");
        assert_eq!(body.matches('.').count(), 1);
        assert_eq!(body.matches('o').count(), 4);
        assert!(body.contains('-'));
    }

    #[test]
    fn plot_corners_hold_extreme_points() {
        let fired = [1.0, 2.0, 3.0];
        let survival = survival_curve(3, 4);
        let txt = render_survival_plot(TailFamily::Exponential, &fired, &survival, 0, 10, 5);
        let lines: Vec<&str> = txt.lines().collect();
        // Highest survival at the earliest time -> top-left; lowest -> bottom-right.
        assert!(lines[1].starts_with('o'));
        assert!(lines[5].ends_with('o'));
    }

    #[test]
    fn trace_fills_steep_segments() {
        let mut canvas = Canvas::new(3, 5, (0.0, 2.0), (0.0, 4.0));
        canvas.trace(0.0, 2.0, |x| 2.0 * x, '-');
        assert_eq!(canvas.render(), "  -\n  -\n - \n - \n-  \n");
    }

    #[test]
    fn degenerate_input_is_reported() {
        let txt = render_survival_plot(TailFamily::Exponential, &[1.0], &[0.5], 0, 10, 5);
        assert!(txt.contains("not enough finite points"));
    }

    #[test]
    fn fitted_log_survival_at_horizon() {
        // ln S exactly linear in t with slope -0.4.
        let survival = survival_curve(10, 20);
        let fired: Vec<f64> = survival.iter().map(|s| -s.ln() / 0.4).collect();
        let y = log_survival_at(TailFamily::Exponential, &fired, &survival, 0, 5.0).unwrap();
        assert!((y + 2.0).abs() < 1e-9);
    }
}
