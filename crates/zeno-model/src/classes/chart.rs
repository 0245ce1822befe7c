use serde::{Deserialize, Serialize};

///
/// Chart
///
/// A saved visualization: a chart type plus type-specific parameters.
/// Parameters are stored as raw JSON and decoded per chart type when
/// the chart's data is computed, so an old or mismatched payload never
/// fails the project load.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ChartType {
    Bar,
    Line,
    Table,
    Beeswarm,
    Radar,
    Heatmap,
}

/// Which dimension a chart channel iterates over.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlicesOrModels {
    Slices,
    Models,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlicesMetricsOrModels {
    Slices,
    Models,
    Metrics,
}

///
/// XCParameters
///
/// Bar and line charts: an x channel and a color channel, each bound
/// to either the slice list or the model list.
///

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct XCParameters {
    pub slices: Vec<i64>,
    pub metric: i64,
    pub models: Vec<String>,
    pub x_channel: SlicesOrModels,
    pub color_channel: SlicesOrModels,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableParameters {
    pub metrics: Vec<i64>,
    pub slices: Vec<i64>,
    pub models: Vec<String>,
    pub y_channel: SlicesOrModels,
    pub x_channel: SlicesMetricsOrModels,
    pub fixed_channel: SlicesMetricsOrModels,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BeeswarmParameters {
    pub metrics: Vec<i64>,
    pub slices: Vec<i64>,
    pub models: Vec<String>,
    pub y_channel: SlicesOrModels,
    pub color_channel: SlicesOrModels,
    pub fixed_dimension: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RadarParameters {
    pub metrics: Vec<i64>,
    pub slices: Vec<i64>,
    pub models: Vec<String>,
    pub axis_channel: SlicesMetricsOrModels,
    pub layer_channel: SlicesOrModels,
    pub fixed_channel: SlicesMetricsOrModels,
}

/// One heatmap axis entry: a slice id or a model name.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AxisValue {
    Id(i64),
    Model(String),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeatmapParameters {
    pub metric: i64,
    pub x_values: Vec<AxisValue>,
    pub y_values: Vec<AxisValue>,
    pub model: String,
    pub x_channel: SlicesOrModels,
    pub y_channel: SlicesOrModels,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Chart {
    pub id: i64,
    pub name: String,
    #[serde(rename = "type")]
    pub chart_type: ChartType,
    pub parameters: serde_json::Value,
}
