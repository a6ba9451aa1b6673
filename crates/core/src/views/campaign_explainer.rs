use std::{fmt, str::FromStr};

use crate::{
    error::ContextEqError,
    fixtures::FixtureStore,
    types::KpiRow,
    views::{Bar, Widget},
};

pub const INSIGHT: &str =
    "Insight: smiling people segment shows highest Retention; early logo aligns with CTR lift.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Metric {
    #[default]
    Ctr,
    Retention,
    Roas,
}

impl Metric {
    pub const ALL: [Metric; 3] = [Metric::Ctr, Metric::Retention, Metric::Roas];

    pub fn label(&self) -> &'static str {
        match self {
            Metric::Ctr => "CTR",
            Metric::Retention => "Retention",
            Metric::Roas => "ROAS",
        }
    }

    pub fn value(&self, row: &KpiRow) -> f64 {
        match self {
            Metric::Ctr => row.ctr,
            Metric::Retention => row.retention,
            Metric::Roas => row.roas,
        }
    }
}

impl FromStr for Metric {
    type Err = ContextEqError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ctr" => Ok(Metric::Ctr),
            "retention" => Ok(Metric::Retention),
            "roas" => Ok(Metric::Roas),
            _ => Err(ContextEqError::InvalidMetric(s.to_string())),
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

pub fn chart(rows: &[KpiRow], metric: Metric) -> Widget {
    Widget::BarChart {
        title: format!("{} by Video Moment", metric.label()),
        x_label: "Moment".to_string(),
        y_label: metric.label().to_string(),
        bars: rows
            .iter()
            .map(|row| Bar {
                label: row.moment.clone(),
                value: metric.value(row),
            })
            .collect(),
    }
}

pub fn render(rows: &[KpiRow], metric: Metric) -> Vec<Widget> {
    let mut columns = vec!["moment".to_string()];
    columns.extend(Metric::ALL.iter().map(|m| m.label().to_string()));

    vec![
        Widget::Table {
            columns,
            rows: rows
                .iter()
                .map(|row| {
                    let mut cells = vec![row.moment.clone()];
                    cells.extend(Metric::ALL.iter().map(|m| m.value(row).to_string()));
                    cells
                })
                .collect(),
        },
        chart(rows, metric),
        Widget::caption(INSIGHT),
    ]
}

pub fn run(metric: Metric) -> Vec<Widget> {
    render(&FixtureStore::builtin().kpi_rows(), metric)
}
