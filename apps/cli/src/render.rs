use console::style;
use contexteq_core::{
    format::{format_bar_chart, format_table},
    views::{NoticeLevel, Widget},
};

const CHART_WIDTH: usize = 40;

pub fn render_widgets(widgets: &[Widget]) -> String {
    let mut output = String::new();
    for widget in widgets {
        render_widget(&mut output, widget, 0);
    }
    output
}

fn push_lines(output: &mut String, text: &str, indent: usize) {
    let pad = " ".repeat(indent);
    for line in text.lines() {
        output.push_str(&pad);
        output.push_str(line);
        output.push('\n');
    }
}

fn render_widget(output: &mut String, widget: &Widget, indent: usize) {
    match widget {
        Widget::Heading { text } => {
            push_lines(output, &format!("\n{}", style(text).cyan().bold()), indent)
        }
        Widget::Caption { text } => push_lines(output, &style(text).dim().to_string(), indent),
        Widget::Label { text } => push_lines(output, &style(text).bold().to_string(), indent),
        Widget::Text { text } => push_lines(output, text, indent),
        Widget::Metric { label, value } => push_lines(
            output,
            &format!("{} {}", style(format!("{label}:")).dim(), style(value).bold()),
            indent,
        ),
        Widget::Notice { level, text } => {
            let line = match level {
                NoticeLevel::Success => format!("{} {}", style("✓").green().bold(), text),
                NoticeLevel::Info => format!("{} {}", style("ℹ").blue().bold(), text),
                NoticeLevel::Warning => format!("{} {}", style("!").yellow().bold(), text),
            };
            push_lines(output, &line, indent);
        }
        Widget::Expander { title, body } => {
            push_lines(output, &format!("▸ {}", style(title).yellow()), indent);
            for child in body {
                render_widget(output, child, indent + 2);
            }
        }
        Widget::Json { value } => {
            let pretty = serde_json::to_string_pretty(value).unwrap_or_default();
            push_lines(output, &pretty, indent);
        }
        Widget::Table { columns, rows } => {
            push_lines(output, &format_table(columns, rows), indent);
        }
        Widget::BarChart {
            title,
            x_label,
            y_label,
            bars,
        } => {
            push_lines(output, &style(title).bold().to_string(), indent);
            push_lines(
                output,
                &style(format!("{x_label} vs {y_label}")).dim().to_string(),
                indent,
            );
            push_lines(output, &format_bar_chart(bars, CHART_WIDTH), indent);
        }
        Widget::Bullets { items } => {
            for item in items {
                push_lines(output, &format!("• {item}"), indent);
            }
        }
        Widget::Columns { columns } => {
            for column in columns {
                for child in column {
                    render_widget(output, child, indent);
                }
            }
        }
    }
}
