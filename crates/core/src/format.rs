use std::time::Duration;

use crate::views::Bar;

pub fn format_range(start: &str, end: &str) -> String {
    format!("{}–{}", start, end)
}

/// Score in [0, 1] as a whole percentage, truncated.
pub fn format_percent(score: f64) -> String {
    format!("{}%", (score * 100.0) as i64)
}

pub fn format_duration(d: Duration) -> String {
    let secs = d.as_secs_f64();
    if secs < 60.0 {
        format!("{:.1}s", secs)
    } else {
        format!("{:.0}m {:.0}s", (secs / 60.0).floor(), secs % 60.0)
    }
}

/// Left-aligned text table with a header rule.
pub fn format_table(columns: &[String], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = columns.iter().map(|c| c.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate().take(widths.len()) {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }

    let line = |cells: &[String]| {
        widths
            .iter()
            .enumerate()
            .map(|(i, w)| {
                let cell = cells.get(i).map(String::as_str).unwrap_or("");
                format!("{:<width$}", cell, width = *w)
            })
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut output = String::new();
    output.push_str(&line(columns));
    output.push('\n');
    output.push_str(
        &widths
            .iter()
            .map(|w| "─".repeat(*w))
            .collect::<Vec<_>>()
            .join("  "),
    );
    output.push('\n');
    for row in rows {
        output.push_str(&line(row));
        output.push('\n');
    }
    output
}

/// Horizontal bar chart scaled so the largest bar spans `width` cells.
pub fn format_bar_chart(bars: &[Bar], width: usize) -> String {
    let label_width = bars
        .iter()
        .map(|b| b.label.chars().count())
        .max()
        .unwrap_or(0);
    let max = bars.iter().map(|b| b.value).fold(0.0_f64, f64::max);

    let mut output = String::new();
    for bar in bars {
        let cells = if max > 0.0 {
            ((bar.value.max(0.0) / max) * width as f64).round() as usize
        } else {
            0
        };
        output.push_str(&format!(
            "{:<lw$} │{} {}\n",
            bar.label,
            "█".repeat(cells),
            bar.value,
            lw = label_width
        ));
    }
    output
}
