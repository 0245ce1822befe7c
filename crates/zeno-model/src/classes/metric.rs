use serde::{Deserialize, Serialize};
use zeno_core::prelude::*;

///
/// Metric
///
/// A named aggregation over a group of records. `count` needs no
/// column; `mean` averages one numeric column, which may be stored
/// per-model under a `{column}_{model}` name.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricType {
    Count,
    Mean,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Metric {
    pub id: i64,
    pub name: String,
    #[serde(rename = "type")]
    pub metric_type: MetricType,
    #[serde(default)]
    pub columns: Vec<String>,
}

impl Metric {
    /// The fallback metric used when a requested metric id is unknown.
    #[must_use]
    pub fn count() -> Self {
        Self {
            id: -1,
            name: "count".to_string(),
            metric_type: MetricType::Count,
            columns: Vec::new(),
        }
    }
}

///
/// GroupMetric
///
/// The result of computing a metric over one group: the metric value
/// (absent when it is undefined for the group) and the group size.
///

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GroupMetric {
    pub metric: Option<f64>,
    pub size: usize,
}

/// Resolve the column a mean metric reads for the given model.
///
/// Model-scoped output columns are stored as `{column}_{model}`; when
/// no record carries that name, the unscoped column is used instead.
fn resolve_column<'a>(column: &'a str, model: Option<&str>, records: &[&Record]) -> String {
    if let Some(model) = model {
        let scoped = format!("{column}_{model}");
        if records.iter().any(|record| record.get(&scoped).is_some()) {
            return scoped;
        }
    }
    column.to_string()
}

/// Compute a metric over a group of records.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn metric_map(metric: &Metric, model: Option<&str>, records: &[&Record]) -> GroupMetric {
    let size = records.len();
    match metric.metric_type {
        MetricType::Count => GroupMetric {
            metric: Some(size as f64),
            size,
        },
        MetricType::Mean => {
            let Some(column) = metric.columns.first() else {
                return GroupMetric { metric: None, size };
            };
            let column = resolve_column(column, model, records);
            let values: Vec<f64> = records
                .iter()
                .filter_map(|record| record.get(&column).and_then(Value::as_f64))
                .collect();
            let mean = if values.is_empty() {
                None
            } else {
                Some(values.iter().sum::<f64>() / values.len() as f64)
            };
            GroupMetric { metric: mean, size }
        }
    }
}
