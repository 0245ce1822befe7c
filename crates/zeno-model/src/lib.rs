//! Schema layer for the Zeno dashboard: the project/slice/tag/chart
//! classes exchanged with the data-serving API, membership resolution
//! over record sets, and chart data generation.
#![warn(unreachable_pub)]

pub mod chart_data;
pub mod classes;
pub mod error;
pub mod membership;

pub use chart_data::{ChartContext, chart_data};
pub use classes::{
    AxisValue, BeeswarmParameters, Chart, ChartType, Column, ColumnType, Folder, GroupMetric,
    HeatmapParameters, MetadataType, Metric, MetricType, Project, ProjectStats, RadarParameters,
    Slice, SlicesMetricsOrModels, SlicesOrModels, TableParameters, Tag, XCParameters,
};
pub use error::SliceLoadError;
