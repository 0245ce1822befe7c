use serde::{Deserialize, Serialize};

///
/// Tag
///
/// A hand-picked set of instances, stored as the list of their data
/// ids. Unlike slices, tag membership is extensional and never depends
/// on column values.
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tag {
    pub id: i64,
    pub tag_name: String,
    #[serde(default)]
    pub folder_id: Option<i64>,
    #[serde(default)]
    pub data_ids: Vec<String>,
}

impl Tag {
    #[must_use]
    pub fn new(id: i64, tag_name: &str, data_ids: Vec<String>) -> Self {
        Self {
            id,
            tag_name: tag_name.to_string(),
            folder_id: None,
            data_ids,
        }
    }
}
