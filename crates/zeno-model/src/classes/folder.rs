use serde::{Deserialize, Serialize};

///
/// Folder
///
/// Folders group slices and tags within a project.
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Folder {
    pub id: i64,
    pub name: String,
}
