//! Server-side SVG charts for the dashboard and the log sheets.
//!
//! `Charts::init` is called once at startup and the result lives in the
//! application state; renderers borrow it.

use crate::models::{DutyStatus, LogEntry};
use crate::ui::escape_html;

#[derive(Debug, Clone)]
pub struct Charts {
    width: f64,
    height: f64,
    padding_x: f64,
    padding_y: f64,
    top: f64,
    bar_fill: &'static str,
    bar_stroke: &'static str,
    line_stroke: &'static str,
    line_fill: &'static str,
}

const STATUS_LABELS: [&str; 4] = ["Sleeper", "Off duty", "On duty", "Driving"];

impl Charts {
    pub fn init() -> Self {
        Self {
            width: 600.0,
            height: 260.0,
            padding_x: 44.0,
            padding_y: 34.0,
            top: 24.0,
            bar_fill: "rgba(75, 192, 192, 0.6)",
            bar_stroke: "rgba(75, 192, 192, 1)",
            line_stroke: "#1d4ed8",
            line_fill: "rgba(29, 78, 216, 0.3)",
        }
    }

    /// Bar chart of the monthly trip counts, bars in the order given.
    ///
    /// Callers render their own placeholder when there are no months.
    pub fn monthly_bars(&self, title: &str, bars: &[(String, u32)]) -> String {
        let mut svg = self.open(title);

        let max = bars.iter().map(|(_, count)| *count).max().unwrap_or(0).max(1);
        let ticks = max.min(4);
        let plot_height = self.height - self.top - self.padding_y;
        let scale_y = plot_height / f64::from(max);
        let y = |value: f64| self.height - self.padding_y - value * scale_y;

        for i in 0..=ticks {
            let value = f64::from(max) * f64::from(i) / f64::from(ticks);
            let y_pos = y(value);
            svg.push_str(&format!(
                r#"<line class="chart-grid" x1="{x1}" y1="{y_pos:.2}" x2="{x2}" y2="{y_pos:.2}" /><text class="chart-label" x="{lx}" y="{ly:.2}" text-anchor="end">{label}</text>"#,
                x1 = self.padding_x,
                x2 = self.width - self.padding_x,
                lx = self.padding_x - 10.0,
                ly = y_pos + 4.0,
                label = format_axis_value(value),
            ));
        }

        let slot = (self.width - self.padding_x * 2.0) / bars.len() as f64;
        let bar_width = slot * 0.6;
        for (index, (label, count)) in bars.iter().enumerate() {
            let x = self.padding_x + slot * index as f64 + (slot - bar_width) / 2.0;
            let top = y(f64::from(*count));
            svg.push_str(&format!(
                r#"<rect class="chart-bar" x="{x:.2}" y="{top:.2}" width="{bar_width:.2}" height="{h:.2}" fill="{fill}" stroke="{stroke}" stroke-width="1"><title>{label}: {count}</title></rect><text class="chart-label" x="{cx:.2}" y="{ly}" text-anchor="middle">{label}</text>"#,
                h = self.height - self.padding_y - top,
                fill = self.bar_fill,
                stroke = self.bar_stroke,
                label = escape_html(label),
                cx = x + bar_width / 2.0,
                ly = self.height - self.padding_y + 18.0,
            ));
        }

        svg.push_str("</svg>");
        svg
    }

    /// Filled line over `[start, end]` at the status level, one grid row per duty status.
    pub fn duty_status_line(&self, entry: &LogEntry) -> String {
        let mut svg = self.open("Log Status Over Time");
        let level = entry.status.unwrap_or(DutyStatus::Unknown).level();
        let plot_height = self.height - self.top - self.padding_y;
        let scale_y = plot_height / 3.0;
        let y = |value: f64| self.height - self.padding_y - value * scale_y;

        for (index, label) in STATUS_LABELS.iter().enumerate() {
            let y_pos = y(index as f64);
            svg.push_str(&format!(
                r#"<line class="chart-grid" x1="{x1}" y1="{y_pos:.2}" x2="{x2}" y2="{y_pos:.2}" /><text class="chart-label" x="{lx}" y="{ly:.2}" text-anchor="end">{label}</text>"#,
                x1 = self.padding_x + 30.0,
                x2 = self.width - self.padding_x,
                lx = self.padding_x + 24.0,
                ly = y_pos + 4.0,
            ));
        }

        let x_start = self.padding_x + 30.0;
        let x_end = self.width - self.padding_x;
        let line_y = y(f64::from(level));
        let base_y = y(0.0);
        svg.push_str(&format!(
            r#"<path class="chart-fill" d="M {x_start} {base_y:.2} L {x_start} {line_y:.2} L {x_end} {line_y:.2} L {x_end} {base_y:.2} Z" fill="{fill}" /><path class="chart-line" d="M {x_start} {line_y:.2} L {x_end} {line_y:.2}" stroke="{stroke}" /><circle class="chart-point" cx="{x_start}" cy="{line_y:.2}" r="4" /><circle class="chart-point" cx="{x_end}" cy="{line_y:.2}" r="4" />"#,
            fill = self.line_fill,
            stroke = self.line_stroke,
        ));

        let label_y = self.height - self.padding_y + 18.0;
        for (x, text) in [(x_start, &entry.start_time), (x_end, &entry.end_time)] {
            svg.push_str(&format!(
                r#"<text class="chart-label" x="{x}" y="{label_y}" text-anchor="middle">{}</text>"#,
                escape_html(text.as_deref().unwrap_or("N/A")),
            ));
        }

        svg.push_str("</svg>");
        svg
    }

    fn open(&self, title: &str) -> String {
        format!(
            r#"<svg class="chart" viewBox="0 0 {w} {h}" role="img" aria-label="{t}"><text class="chart-title" x="50%" y="16" text-anchor="middle">{t}</text>"#,
            w = self.width,
            h = self.height,
            t = escape_html(title),
        )
    }
}

fn format_axis_value(value: f64) -> String {
    let rounded = (value * 10.0).round() / 10.0;
    if rounded.fract() == 0.0 {
        format!("{rounded:.0}")
    } else {
        format!("{rounded:.1}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_bar_per_month() {
        let bars = vec![("January".to_string(), 2), ("March".to_string(), 5)];
        let svg = Charts::init().monthly_bars("Monthly Trips Created", &bars);
        assert_eq!(svg.matches("<rect").count(), 2);
        assert!(svg.contains("January: 2"));
        assert!(svg.contains("March: 5"));
        assert!(svg.ends_with("</svg>"));
    }

    #[test]
    fn status_line_sits_on_the_status_row() {
        let charts = Charts::init();
        let driving = LogEntry {
            status: Some(DutyStatus::Driving),
            start_time: Some("06:00".into()),
            end_time: Some("17:00".into()),
            ..LogEntry::default()
        };
        let sleeper = LogEntry {
            status: Some(DutyStatus::Sleeper),
            ..LogEntry::default()
        };

        let top_row = format!("{:.2}", 260.0 - 34.0 - 3.0 * ((260.0 - 24.0 - 34.0) / 3.0));
        let bottom_row = format!("{:.2}", 260.0 - 34.0);
        assert!(charts.duty_status_line(&driving).contains(&format!("L 556 {top_row}")));
        let sleeper_svg = charts.duty_status_line(&sleeper);
        assert!(sleeper_svg.contains(&format!("L 556 {bottom_row}")));
        assert!(sleeper_svg.contains(">N/A<"));
    }

    #[test]
    fn axis_values_drop_trailing_zero() {
        assert_eq!(format_axis_value(2.0), "2");
        assert_eq!(format_axis_value(1.25), "1.3");
    }
}
