use serde::{Deserialize, Serialize};

///
/// Project
///
/// A project bundles datasets, models, and everything users create on
/// top of them: slices, tags, folders, charts.
///

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub uuid: String,
    pub name: String,
    /// Instance view used to render the project's data.
    pub view: String,
    #[serde(default = "default_true")]
    pub calculate_histogram_metrics: bool,
    #[serde(default = "default_samples_per_page")]
    pub samples_per_page: u32,
    /// Whether the requesting user can edit the project.
    pub editor: bool,
    pub public: bool,
}

const fn default_true() -> bool {
    true
}

const fn default_samples_per_page() -> u32 {
    10
}

///
/// ProjectStats
///

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectStats {
    pub num_instances: usize,
    pub num_charts: usize,
    pub num_models: usize,
}
