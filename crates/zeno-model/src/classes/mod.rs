//! Typed models mirroring the dashboard's API payloads. Everything
//! serializes camelCase with byte-stable enum wire values.

mod chart;
mod column;
mod folder;
mod metric;
mod project;
mod slice;
mod tag;

pub use chart::{
    AxisValue, BeeswarmParameters, Chart, ChartType, HeatmapParameters, RadarParameters,
    SlicesMetricsOrModels, SlicesOrModels, TableParameters, XCParameters,
};
pub use column::{Column, ColumnType, MetadataType};
pub use folder::Folder;
pub use metric::{GroupMetric, Metric, MetricType, metric_map};
pub use project::{Project, ProjectStats};
pub use slice::{ALL_INSTANCES_ID, Slice};
pub use tag::Tag;
