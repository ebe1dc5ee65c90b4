use crate::schema::{Period, RatioSeries};
use colored::{Color, Colorize};

/// Terminal line chart of a P/E series, with its mean drawn as a dotted line.
///
/// ```text
/// P/E Ratio Trend for AAPL (Period: 1y)
///
/// P/E Ratio
/// 22.00 ┤                                       •
///       │                                       │
///       │                                       │
///       │                                       │
///       │                             •──────────
/// 20.72 ┤┄┄┄┄┄┄┄┄┄┄┄┄┄┄┄┄┄┄┄┄┄┄┄┄┄┄┄┄┄┄│┄┄┄┄┄┄┄┄┄┄
///       │          •──────────        │
///       │          │         •─────────
/// 20.00 ┤•──────────
///       └────────────────────────────────────────
///        2024-01-01                    2024-01-05
///                          Date
/// ── P/E Ratio Trend (AAPL)   ┄┄ Mean P/E (20.72)
/// ```
pub struct Chart<'a> {
    series: &'a RatioSeries,
    ticker: &'a str,
    period: Period,
    width: usize,
    height: usize,
    color: bool,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Cell {
    Empty,
    Mean,
    Line(char),
}

const LINE_COLOR: Color = Color::Cyan;
const MEAN_COLOR: Color = Color::Red;

impl<'a> Chart<'a> {
    pub const DEFAULT_WIDTH: usize = 72;
    pub const DEFAULT_HEIGHT: usize = 16;
    pub const MAX_WIDTH: usize = 500;
    pub const MAX_HEIGHT: usize = 200;

    pub fn new(series: &'a RatioSeries, ticker: &'a str, period: Period) -> Self {
        Self {
            series,
            ticker,
            period,
            width: Self::DEFAULT_WIDTH,
            height: Self::DEFAULT_HEIGHT,
            color: true,
        }
    }

    /// Plot area in characters; clamped to 8 x 3 ..= `MAX_WIDTH` x `MAX_HEIGHT`.
    pub fn with_size(mut self, width: usize, height: usize) -> Self {
        self.width = width.clamp(8, Self::MAX_WIDTH);
        self.height = height.clamp(3, Self::MAX_HEIGHT);
        self
    }

    /// Render without ANSI colors.
    pub fn plain(mut self) -> Self {
        self.color = false;
        self
    }

    /// `None` when the series has no defined value to plot.
    pub fn render(&self) -> Option<String> {
        let mean = self.series.mean()?;
        let (lo, hi) = self.series.min_max()?;
        let (width, height) = (self.width, self.height);

        let row_of = |value: f64| -> usize {
            if hi == lo {
                height / 2
            } else {
                (((hi - value) / (hi - lo)) * (height - 1) as f64).round() as usize
            }
        };
        let last = self.series.len().saturating_sub(1);
        let column_of = |index: usize| -> usize {
            if last == 0 {
                0
            } else {
                (index * (width - 1) + last / 2) / last
            }
        };

        // plot
        let mut grid = vec![vec![Cell::Empty; width]; height];
        let mean_row = row_of(mean);
        grid[mean_row].fill(Cell::Mean);

        let mut previous: Option<(usize, usize)> = None;
        for (index, point) in self.series.points.iter().enumerate() {
            let Some(value) = point.value.filter(|v| v.is_finite()) else {
                previous = None;
                continue;
            };
            let (x1, r1) = (column_of(index), row_of(value));
            if let Some((x0, r0)) = previous {
                for cell in &mut grid[r0][x0 + 1..=x1.max(x0)] {
                    *cell = Cell::Line('─');
                }
                for row in r0.min(r1) + 1..r0.max(r1) {
                    grid[row][x1] = Cell::Line('│');
                }
            }
            grid[r1][x1] = Cell::Line('•');
            previous = Some((x1, r1));
        }

        // frame; the extremes keep their labels when the mean rounds onto them
        let label_of = |row: usize| -> Option<f64> {
            match row {
                0 => Some(hi),
                r if r == height - 1 => Some(lo),
                r if r == mean_row => Some(mean),
                _ => None,
            }
        };
        let label_width = [0, mean_row, height - 1]
            .into_iter()
            .filter_map(label_of)
            .map(|value| format!("{value:.2}").len())
            .max()
            .unwrap_or(0);

        let mut lines = Vec::with_capacity(height + 8);
        lines.push(self.bold(&format!(
            "P/E Ratio Trend for {} (Period: {})",
            self.ticker, self.period
        )));
        lines.push(String::new());
        lines.push("P/E Ratio".to_string());
        for (row, cells) in grid.iter().enumerate() {
            let axis = match label_of(row) {
                Some(value) => format!("{value:>label_width$.2} ┤"),
                None => format!("{:>label_width$} │", ""),
            };
            lines.push(format!("{axis}{}", self.paint_row(cells)));
        }
        let gutter = " ".repeat(label_width + 1);
        lines.push(format!("{gutter}└{}", "─".repeat(width)));
        lines.push(format!("{gutter} {}", self.date_axis()));
        lines.push(format!("{gutter} {:^width$}", "Date"));
        lines.push(format!(
            "{} P/E Ratio Trend ({})   {} Mean P/E ({mean:.2})",
            self.paint("──", LINE_COLOR),
            self.ticker,
            self.paint("┄┄", MEAN_COLOR),
        ));

        Some(lines.join("\n"))
    }

    /// First date flush left, last date flush right.
    fn date_axis(&self) -> String {
        let mut dates = self.series.dates();
        let (Some(first), last) = (dates.next(), dates.last()) else {
            return String::new();
        };
        let first = first.to_string();
        match last.map(|date| date.to_string()) {
            Some(last) if self.width >= first.len() + last.len() + 1 => {
                let gap = self.width - first.len() - last.len();
                format!("{first}{}{last}", " ".repeat(gap))
            }
            _ => first,
        }
    }

    fn paint_row(&self, cells: &[Cell]) -> String {
        let mut out = String::new();
        let mut run = String::new();
        let mut kind = Cell::Empty;
        for cell in cells {
            let this = match cell {
                Cell::Line(_) => Cell::Line(' '),
                other => *other,
            };
            if this != kind && !run.is_empty() {
                out.push_str(&self.paint_run(&run, kind));
                run.clear();
            }
            kind = this;
            run.push(match cell {
                Cell::Empty => ' ',
                Cell::Mean => '┄',
                Cell::Line(c) => *c,
            });
        }
        out.push_str(&self.paint_run(&run, kind));
        out.trim_end().to_string()
    }

    fn paint_run(&self, run: &str, kind: Cell) -> String {
        match kind {
            Cell::Empty => run.to_string(),
            Cell::Mean => self.paint(run, MEAN_COLOR),
            Cell::Line(_) => self.paint(run, LINE_COLOR),
        }
    }

    fn paint(&self, text: &str, color: Color) -> String {
        if self.color {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn bold(&self, text: &str) -> String {
        if self.color {
            text.bold().to_string()
        } else {
            text.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::RatioPoint;
    use chrono::NaiveDate;

    fn series(values: &[Option<f64>]) -> RatioSeries {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let points = values
            .iter()
            .zip(start.iter_days())
            .map(|(value, date)| RatioPoint {
                date,
                value: *value,
            })
            .collect();
        RatioSeries::new("Historical PE Ratio", points)
    }

    fn plot_rows(rendered: &str) -> Vec<&str> {
        rendered
            .lines()
            .filter(|line| line.contains(" ┤") || line.contains(" │"))
            .collect()
    }

    #[test]
    fn renders_title_legend_and_mean() {
        let s = series(&[Some(20.0), Some(20.4), Some(20.2), Some(21.0), Some(22.0)]);
        let rendered = Chart::new(&s, "AAPL", Period::OneYear)
            .with_size(40, 9)
            .plain()
            .render()
            .unwrap();

        assert!(rendered.starts_with("P/E Ratio Trend for AAPL (Period: 1y)"));
        assert!(rendered.contains("── P/E Ratio Trend (AAPL)"));
        assert!(rendered.contains("┄┄ Mean P/E (20.72)"));
        assert!(rendered.contains("2024-01-01"));
        assert!(rendered.contains("2024-01-05"));

        let rows = plot_rows(&rendered);
        assert_eq!(rows.len(), 9);
        assert!(rows[0].starts_with("22.00 ┤"));
        assert!(rows[8].starts_with("20.00 ┤"));
        assert!(rows.iter().any(|row| row.starts_with("20.72 ┤") && row.contains('┄')));
        assert_eq!(rendered.matches('•').count(), 5);
    }

    #[test]
    fn undefined_days_break_the_line() {
        let s = series(&[Some(10.0), None, None, Some(12.0)]);
        let rendered = Chart::new(&s, "MSFT", Period::SixMonths)
            .with_size(20, 5)
            .plain()
            .render()
            .unwrap();
        assert_eq!(rendered.matches('•').count(), 2);
        assert!(plot_rows(&rendered).iter().all(|row| !row.contains('─')));
        assert!(rendered.contains("Mean P/E (11.00)"));
    }

    #[test]
    fn flat_series_sits_mid_height() {
        let s = series(&[Some(15.0), Some(15.0), Some(15.0)]);
        let rendered = Chart::new(&s, "KO", Period::OneMonth)
            .with_size(12, 5)
            .plain()
            .render()
            .unwrap();
        let rows = plot_rows(&rendered);
        assert_eq!(rows.len(), 5);
        assert!(rows[2].contains('•'));
        assert!(!rows[0].contains('•'));
    }

    #[test]
    fn nothing_to_plot() {
        let empty = RatioSeries::empty("Historical PE Ratio");
        assert!(Chart::new(&empty, "AAPL", Period::OneYear).render().is_none());

        let undefined = series(&[None, None, None]);
        assert!(Chart::new(&undefined, "AAPL", Period::OneYear).render().is_none());
    }

    #[test]
    fn size_is_clamped() {
        let s = series(&[Some(10.0), Some(12.0)]);
        let rendered = Chart::new(&s, "AAPL", Period::OneYear)
            .with_size(usize::MAX, usize::MAX)
            .plain()
            .render()
            .unwrap();
        assert_eq!(plot_rows(&rendered).len(), Chart::MAX_HEIGHT);
        let x_axis = rendered.lines().find(|line| line.contains('└')).unwrap();
        assert_eq!(x_axis.matches('─').count(), Chart::MAX_WIDTH);

        let rendered = Chart::new(&s, "AAPL", Period::OneYear)
            .with_size(0, 0)
            .plain()
            .render()
            .unwrap();
        assert_eq!(plot_rows(&rendered).len(), 3);
    }

    #[test]
    fn single_point() {
        let s = series(&[Some(18.5)]);
        let rendered = Chart::new(&s, "T", Period::FiveDays).plain().render().unwrap();
        assert_eq!(rendered.matches('•').count(), 1);
        assert!(rendered.contains("Mean P/E (18.50)"));
    }
}
