use crate::classes::{
    ALL_INSTANCES_ID, AxisValue, BeeswarmParameters, Chart, ChartType, GroupMetric,
    HeatmapParameters, Metric, RadarParameters, Slice, SlicesMetricsOrModels, SlicesOrModels,
    TableParameters, XCParameters, metric_map,
};
use serde_json::json;
use zeno_core::prelude::*;

///
/// Chart data
///
/// Turns a saved chart into the JSON payload its renderer consumes:
/// `{"table": [...]}` with one element per chart cell. Every generator
/// is total; a chart whose stored parameters do not decode for its
/// type yields the empty table instead of an error.
///

///
/// ChartContext
///
/// Everything a chart needs from its project: the loaded records and
/// the project's saved slices and metrics.
///

#[derive(Clone, Copy, Debug)]
pub struct ChartContext<'a> {
    pub records: &'a [Record],
    pub slices: &'a [Slice],
    pub metrics: &'a [Metric],
}

impl ChartContext<'_> {
    /// Slices selected by id. The sentinel id resolves to the
    /// "All instances" pseudo-slice, appended last as the stored
    /// charts expect.
    fn selected_slices(&self, ids: &[i64]) -> Vec<Slice> {
        let mut selected: Vec<Slice> = self
            .slices
            .iter()
            .filter(|slice| ids.contains(&slice.id))
            .cloned()
            .collect();
        if ids.contains(&ALL_INSTANCES_ID) {
            selected.push(Slice::all_instances());
        }
        selected
    }

    /// Metrics selected by id, with the count fallback available under
    /// its sentinel id.
    fn selected_metrics(&self, ids: &[i64]) -> Vec<Metric> {
        self.metrics
            .iter()
            .cloned()
            .chain(std::iter::once(Metric::count()))
            .filter(|metric| ids.contains(&metric.id))
            .collect()
    }

    /// A single metric by id, falling back to count when unknown.
    fn metric(&self, id: i64) -> Metric {
        self.metrics
            .iter()
            .find(|metric| metric.id == id)
            .cloned()
            .unwrap_or_else(Metric::count)
    }

    fn group_metric(&self, metric: &Metric, model: &str, expr: &FilterExpr) -> GroupMetric {
        let members = filter(expr, self.records);
        metric_map(metric, Some(model), &members)
    }
}

fn table_payload(elements: Vec<serde_json::Value>) -> String {
    json!({ "table": elements }).to_string()
}

/// Decode a chart's stored parameters for its type, or warn and bail
/// to the empty table.
fn decode_params<T: serde::de::DeserializeOwned>(chart: &Chart) -> Option<T> {
    match serde_json::from_value(chart.parameters.clone()) {
        Ok(params) => Some(params),
        Err(err) => {
            tracing::warn!(
                chart = chart.id,
                error = %err,
                "chart parameters do not match its chart type"
            );
            None
        }
    }
}

/// Bar and line charts: one element per slice/model pair, with the x
/// and color channels each bound to one of the two dimensions.
#[must_use]
pub fn xyc_data(chart: &Chart, ctx: &ChartContext<'_>) -> String {
    let Some(params) = decode_params::<XCParameters>(chart) else {
        return table_payload(Vec::new());
    };

    let metric = ctx.metric(params.metric);
    let mut elements = Vec::new();
    for slice in ctx.selected_slices(&params.slices) {
        let expr = slice.expression();
        for model in &params.models {
            let result = ctx.group_metric(&metric, model, &expr);
            elements.push(json!({
                "x_value": match params.x_channel {
                    SlicesOrModels::Slices => &slice.slice_name,
                    SlicesOrModels::Models => model,
                },
                "color_value": match params.color_channel {
                    SlicesOrModels::Models => model,
                    SlicesOrModels::Slices => &slice.slice_name,
                },
                "y_value": result.metric,
                "size": result.size,
            }));
        }
    }
    table_payload(elements)
}

/// Tabular charts: the cross product of metrics, slices, and models,
/// keyed by slice and metric ids rather than names.
#[must_use]
pub fn table_data(chart: &Chart, ctx: &ChartContext<'_>) -> String {
    let Some(params) = decode_params::<TableParameters>(chart) else {
        return table_payload(Vec::new());
    };

    let mut elements = Vec::new();
    for metric in ctx.selected_metrics(&params.metrics) {
        for slice in ctx.selected_slices(&params.slices) {
            let expr = slice.expression();
            for model in &params.models {
                let result = ctx.group_metric(&metric, model, &expr);
                elements.push(json!({
                    "x_value": match params.x_channel {
                        SlicesMetricsOrModels::Slices => json!(slice.id),
                        SlicesMetricsOrModels::Models => json!(model),
                        SlicesMetricsOrModels::Metrics => json!(metric.id),
                    },
                    "fixed_value": result.metric,
                    "y_value": match params.y_channel {
                        SlicesOrModels::Slices => json!(slice.id),
                        SlicesOrModels::Models => json!(model),
                    },
                    "size": result.size,
                }));
            }
        }
    }
    table_payload(elements)
}

/// Beeswarm charts: metric values on the x axis, with the metric's
/// name carried on each element.
#[must_use]
pub fn beeswarm_data(chart: &Chart, ctx: &ChartContext<'_>) -> String {
    let Some(params) = decode_params::<BeeswarmParameters>(chart) else {
        return table_payload(Vec::new());
    };

    let mut elements = Vec::new();
    for metric in ctx.selected_metrics(&params.metrics) {
        for slice in ctx.selected_slices(&params.slices) {
            let expr = slice.expression();
            for model in &params.models {
                let result = ctx.group_metric(&metric, model, &expr);
                elements.push(json!({
                    "color_value": match params.color_channel {
                        SlicesOrModels::Slices => &slice.slice_name,
                        SlicesOrModels::Models => model,
                    },
                    "x_value": result.metric,
                    "y_value": match params.y_channel {
                        SlicesOrModels::Slices => &slice.slice_name,
                        SlicesOrModels::Models => model,
                    },
                    "size": result.size,
                    "metric": &metric.name,
                }));
            }
        }
    }
    table_payload(elements)
}

/// Radar charts: three channels over slices, models, and metrics.
#[must_use]
pub fn radar_data(chart: &Chart, ctx: &ChartContext<'_>) -> String {
    let Some(params) = decode_params::<RadarParameters>(chart) else {
        return table_payload(Vec::new());
    };

    let mut elements = Vec::new();
    for metric in ctx.selected_metrics(&params.metrics) {
        for slice in ctx.selected_slices(&params.slices) {
            let expr = slice.expression();
            for model in &params.models {
                let result = ctx.group_metric(&metric, model, &expr);
                elements.push(json!({
                    "axis_value": match params.axis_channel {
                        SlicesMetricsOrModels::Slices => &slice.slice_name,
                        SlicesMetricsOrModels::Models => model,
                        SlicesMetricsOrModels::Metrics => &metric.name,
                    },
                    "fixed_value": result.metric,
                    "layer_value": match params.layer_channel {
                        SlicesOrModels::Slices => &slice.slice_name,
                        SlicesOrModels::Models => model,
                    },
                    "size": result.size,
                }));
            }
        }
    }
    table_payload(elements)
}

/// One heatmap axis, resolved: either a slice or a model name.
enum Axis {
    Slice(Slice),
    Model(String),
}

impl Axis {
    fn label(&self) -> &str {
        match self {
            Self::Slice(slice) => &slice.slice_name,
            Self::Model(model) => model,
        }
    }
}

fn resolve_axis(ctx: &ChartContext<'_>, channel: SlicesOrModels, values: &[AxisValue]) -> Vec<Axis> {
    match channel {
        SlicesOrModels::Slices => {
            let ids: Vec<i64> = values
                .iter()
                .filter_map(|value| match value {
                    AxisValue::Id(id) => Some(*id),
                    AxisValue::Model(_) => None,
                })
                .collect();
            ctx.selected_slices(&ids).into_iter().map(Axis::Slice).collect()
        }
        SlicesOrModels::Models => values
            .iter()
            .filter_map(|value| match value {
                AxisValue::Model(model) => Some(Axis::Model(model.clone())),
                AxisValue::Id(_) => None,
            })
            .collect(),
    }
}

/// Heatmap charts: a grid over two axes. A cell's group is the
/// conjunction of whatever slice filters its axes carry, and its model
/// is the models-axis value when one axis iterates models, otherwise
/// the chart's fixed model.
#[must_use]
pub fn heatmap_data(chart: &Chart, ctx: &ChartContext<'_>) -> String {
    let Some(params) = decode_params::<HeatmapParameters>(chart) else {
        return table_payload(Vec::new());
    };

    let metric = ctx.metric(params.metric);
    let x_axis = resolve_axis(ctx, params.x_channel, &params.x_values);
    let y_axis = resolve_axis(ctx, params.y_channel, &params.y_values);

    let mut elements = Vec::new();
    for x in &x_axis {
        for y in &y_axis {
            let mut exprs = Vec::new();
            let mut model = params.model.as_str();
            for axis in [x, y] {
                match axis {
                    Axis::Slice(slice) => exprs.push(slice.expression()),
                    Axis::Model(axis_model) => model = axis_model.as_str(),
                }
            }
            let expr = FilterExpr::and(exprs);
            let result = ctx.group_metric(&metric, model, &expr);
            elements.push(json!({
                "x_value": x.label(),
                "fixed_value": result.metric,
                "y_value": y.label(),
                "size": result.size,
            }));
        }
    }
    table_payload(elements)
}

/// Compute the payload for any saved chart.
#[must_use]
pub fn chart_data(chart: &Chart, ctx: &ChartContext<'_>) -> String {
    match chart.chart_type {
        ChartType::Bar | ChartType::Line => xyc_data(chart, ctx),
        ChartType::Table => table_data(chart, ctx),
        ChartType::Beeswarm => beeswarm_data(chart, ctx),
        ChartType::Radar => radar_data(chart, ctx),
        ChartType::Heatmap => heatmap_data(chart, ctx),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classes::MetricType;

    fn records() -> Vec<Record> {
        vec![
            Record::new("1")
                .with("label", "cat")
                .with("accuracy_gpt2", 1.0)
                .with("accuracy_bert", 0.0),
            Record::new("2")
                .with("label", "cat")
                .with("accuracy_gpt2", 0.0)
                .with("accuracy_bert", 0.0),
            Record::new("3")
                .with("label", "dog")
                .with("accuracy_gpt2", 1.0)
                .with("accuracy_bert", 1.0),
        ]
    }

    fn slices() -> Vec<Slice> {
        vec![
            Slice::from_stored(1, "cats", None, "label == 'cat'").unwrap(),
            Slice::from_stored(2, "dogs", None, "label == 'dog'").unwrap(),
        ]
    }

    fn metrics() -> Vec<Metric> {
        vec![Metric {
            id: 1,
            name: "accuracy".to_string(),
            metric_type: MetricType::Mean,
            columns: vec!["accuracy".to_string()],
        }]
    }

    fn table_of(payload: &str) -> Vec<serde_json::Value> {
        let parsed: serde_json::Value = serde_json::from_str(payload).unwrap();
        parsed["table"].as_array().unwrap().clone()
    }

    #[test]
    fn bar_chart_crosses_slices_and_models() {
        let records = records();
        let slices = slices();
        let metrics = metrics();
        let ctx = ChartContext {
            records: &records,
            slices: &slices,
            metrics: &metrics,
        };
        let chart = Chart {
            id: 1,
            name: "accuracy".to_string(),
            chart_type: ChartType::Bar,
            parameters: json!({
                "slices": [1, -1],
                "metric": 1,
                "models": ["gpt2"],
                "xChannel": "slices",
                "colorChannel": "models",
            }),
        };

        let table = table_of(&chart_data(&chart, &ctx));
        assert_eq!(table.len(), 2);
        assert_eq!(table[0]["x_value"], "cats");
        assert_eq!(table[0]["y_value"], 0.5);
        assert_eq!(table[0]["size"], 2);
        assert_eq!(table[1]["x_value"], "All instances");
        assert_eq!(table[1]["size"], 3);
    }

    #[test]
    fn table_chart_crosses_metrics_slices_and_models() {
        let records = records();
        let slices = slices();
        let metrics = metrics();
        let ctx = ChartContext {
            records: &records,
            slices: &slices,
            metrics: &metrics,
        };
        let chart = Chart {
            id: 6,
            name: "overview".to_string(),
            chart_type: ChartType::Table,
            parameters: json!({
                "metrics": [1, -1],
                "slices": [1, 2],
                "models": ["gpt2"],
                "yChannel": "slices",
                "xChannel": "metrics",
                "fixedChannel": "metrics",
            }),
        };

        let table = table_of(&chart_data(&chart, &ctx));
        assert_eq!(table.len(), 4);

        // accuracy × cats
        assert_eq!(table[0]["x_value"], 1);
        assert_eq!(table[0]["y_value"], 1);
        assert_eq!(table[0]["fixed_value"], 0.5);
        assert_eq!(table[0]["size"], 2);
        // accuracy × dogs
        assert_eq!(table[1]["y_value"], 2);
        assert_eq!(table[1]["fixed_value"], 1.0);
        // count × cats, count × dogs
        assert_eq!(table[2]["x_value"], -1);
        assert_eq!(table[2]["fixed_value"], 2.0);
        assert_eq!(table[3]["fixed_value"], 1.0);
        assert_eq!(table[3]["size"], 1);
    }

    #[test]
    fn beeswarm_chart_carries_the_metric_name() {
        let records = records();
        let slices = slices();
        let metrics = metrics();
        let ctx = ChartContext {
            records: &records,
            slices: &slices,
            metrics: &metrics,
        };
        let chart = Chart {
            id: 7,
            name: "spread".to_string(),
            chart_type: ChartType::Beeswarm,
            parameters: json!({
                "metrics": [-1],
                "slices": [1],
                "models": ["gpt2"],
                "yChannel": "slices",
                "colorChannel": "models",
                "fixedDimension": "y",
            }),
        };

        let table = table_of(&chart_data(&chart, &ctx));
        assert_eq!(table.len(), 1);
        assert_eq!(table[0]["color_value"], "gpt2");
        assert_eq!(table[0]["y_value"], "cats");
        assert_eq!(table[0]["x_value"], 2.0);
        assert_eq!(table[0]["size"], 2);
        assert_eq!(table[0]["metric"], "count");
    }

    #[test]
    fn radar_chart_binds_axis_and_layer_channels() {
        let records = records();
        let slices = slices();
        let metrics = metrics();
        let ctx = ChartContext {
            records: &records,
            slices: &slices,
            metrics: &metrics,
        };
        let chart = Chart {
            id: 8,
            name: "by slice".to_string(),
            chart_type: ChartType::Radar,
            parameters: json!({
                "metrics": [1],
                "slices": [1, 2],
                "models": ["gpt2"],
                "axisChannel": "slices",
                "layerChannel": "models",
                "fixedChannel": "metrics",
            }),
        };

        let table = table_of(&chart_data(&chart, &ctx));
        assert_eq!(table.len(), 2);
        assert_eq!(table[0]["axis_value"], "cats");
        assert_eq!(table[0]["layer_value"], "gpt2");
        assert_eq!(table[0]["fixed_value"], 0.5);
        assert_eq!(table[0]["size"], 2);
        assert_eq!(table[1]["axis_value"], "dogs");
        assert_eq!(table[1]["fixed_value"], 1.0);
        assert_eq!(table[1]["size"], 1);
    }

    #[test]
    fn unknown_metric_id_falls_back_to_count() {
        let records = records();
        let slices = slices();
        let metrics = metrics();
        let ctx = ChartContext {
            records: &records,
            slices: &slices,
            metrics: &metrics,
        };
        let chart = Chart {
            id: 2,
            name: "counts".to_string(),
            chart_type: ChartType::Line,
            parameters: json!({
                "slices": [2],
                "metric": 99,
                "models": ["gpt2"],
                "xChannel": "slices",
                "colorChannel": "models",
            }),
        };

        let table = table_of(&chart_data(&chart, &ctx));
        assert_eq!(table[0]["y_value"], 1.0);
        assert_eq!(table[0]["size"], 1);
    }

    #[test]
    fn mismatched_parameters_yield_empty_table() {
        let records = records();
        let slices = slices();
        let metrics = metrics();
        let ctx = ChartContext {
            records: &records,
            slices: &slices,
            metrics: &metrics,
        };
        let chart = Chart {
            id: 3,
            name: "broken".to_string(),
            chart_type: ChartType::Table,
            parameters: json!({"unexpected": true}),
        };

        assert!(table_of(&chart_data(&chart, &ctx)).is_empty());
    }

    #[test]
    fn heatmap_slice_by_slice_conjoins_both_filters() {
        let records = records();
        let slices = slices();
        let metrics = metrics();
        let ctx = ChartContext {
            records: &records,
            slices: &slices,
            metrics: &metrics,
        };
        let chart = Chart {
            id: 4,
            name: "overlap".to_string(),
            chart_type: ChartType::Heatmap,
            parameters: json!({
                "metric": -1,
                "xValues": [1, 2],
                "yValues": [1, 2],
                "model": "gpt2",
                "xChannel": "slices",
                "yChannel": "slices",
            }),
        };

        let table = table_of(&chart_data(&chart, &ctx));
        assert_eq!(table.len(), 4);
        // cats ∩ cats
        assert_eq!(table[0]["size"], 2);
        // cats ∩ dogs is empty
        assert_eq!(table[1]["size"], 0);
    }

    #[test]
    fn heatmap_models_axis_overrides_fixed_model() {
        let records = records();
        let slices = slices();
        let metrics = metrics();
        let ctx = ChartContext {
            records: &records,
            slices: &slices,
            metrics: &metrics,
        };
        let chart = Chart {
            id: 5,
            name: "by model".to_string(),
            chart_type: ChartType::Heatmap,
            parameters: json!({
                "metric": 1,
                "xValues": [1],
                "yValues": ["gpt2", "bert"],
                "model": "ignored",
                "xChannel": "slices",
                "yChannel": "models",
            }),
        };

        let table = table_of(&chart_data(&chart, &ctx));
        assert_eq!(table.len(), 2);
        assert_eq!(table[0]["y_value"], "gpt2");
        assert_eq!(table[0]["fixed_value"], 0.5);
        assert_eq!(table[1]["y_value"], "bert");
        assert_eq!(table[1]["fixed_value"], 0.0);
    }
}
