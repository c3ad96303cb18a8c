//! Grid data types.

use serde::{Deserialize, Serialize};
use timberline_shared::types::{ForestId, Month, RecordType};

use super::schema::{LabelColumn, RowAnnotations};

/// One member of a dimension table.
///
/// Grades and activities carry different attribute columns, so every
/// attribute is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DimensionMember {
    /// Primary key.
    pub id: i32,
    /// Plain name, if the table has one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Product grade code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grade_code: Option<String>,
    /// Cost activity name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub activity_name: Option<String>,
    /// Cost activity category.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl DimensionMember {
    /// Returns the row label.
    ///
    /// Falls back to `activity_name`, then `name`, then `grade_code` when the
    /// preferred column is missing, and finally to `#<id>`.
    #[must_use]
    pub fn display_name(&self, preferred: LabelColumn) -> String {
        let preferred_value = match preferred {
            LabelColumn::GradeCode => self.grade_code.as_deref(),
            LabelColumn::ActivityName => self.activity_name.as_deref(),
            LabelColumn::Name => self.name.as_deref(),
        };

        [
            preferred_value,
            self.activity_name.as_deref(),
            self.name.as_deref(),
            self.grade_code.as_deref(),
        ]
        .into_iter()
        .flatten()
        .find(|label| !label.trim().is_empty())
        .map_or_else(|| format!("#{}", self.id), str::to_string)
    }
}

/// Key of one monthly grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridKey {
    /// Forest the figures belong to.
    pub forest_id: ForestId,
    /// Calendar month.
    pub month: Month,
    /// Budget or actual.
    pub record_type: RecordType,
}

impl GridKey {
    /// Creates a grid key.
    #[must_use]
    pub const fn new(forest_id: ForestId, month: Month, record_type: RecordType) -> Self {
        Self {
            forest_id,
            month,
            record_type,
        }
    }
}

/// A stored fact row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactRecord<M> {
    /// Forest.
    pub forest_id: ForestId,
    /// Dimension member id (grade or activity).
    pub dimension_id: i32,
    /// Calendar month.
    pub month: Month,
    /// Budget or actual.
    pub record_type: RecordType,
    /// Measure values.
    pub measures: M,
}

/// A pivoted row as served to a grid editor.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GridRow<M> {
    /// Dimension member id.
    pub dimension_id: i32,
    /// Row label.
    pub label: String,
    /// Grade code, for production grids.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grade_code: Option<String>,
    /// Measure values, zero when no fact exists.
    #[serde(flatten)]
    pub measures: M,
    /// Derived read-only columns.
    #[serde(flatten)]
    pub annotations: RowAnnotations,
}

/// An edited row submitted back by a grid editor.
///
/// Any extra columns (labels, derived values) are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridEdit<M> {
    /// Dimension member id.
    pub dimension_id: i32,
    /// Measure values.
    #[serde(flatten)]
    pub measures: M,
}
