use serde::{Deserialize, Serialize};

///
/// ColumnType
///
/// Role of a column within a project's data table.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ColumnType {
    /// Input data instance, raw or a filename.
    Data,
    /// Ground truth label.
    Label,
    /// Model output.
    Output,
    /// Metadata feature for an input instance.
    Feature,
    /// Vector embedding for an instance or output.
    Embedding,
}

///
/// MetadataType
///
/// Value kind of a metadata column. Datetime values are carried as
/// text.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MetadataType {
    Nominal,
    Continuous,
    Boolean,
    Datetime,
    Other,
}

///
/// Column
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    pub id: String,
    pub name: String,
    pub column_type: ColumnType,
    pub data_type: MetadataType,
    /// Set for model-scoped columns (outputs, model features).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enum_wire_values_match_the_api() {
        assert_eq!(
            serde_json::to_string(&ColumnType::Embedding).unwrap(),
            "\"EMBEDDING\""
        );
        assert_eq!(
            serde_json::to_string(&MetadataType::Continuous).unwrap(),
            "\"CONTINUOUS\""
        );
    }
}
