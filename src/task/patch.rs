//! Partial task updates.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::task::{due_date, normalize_labels, Column, Task};

/// Highest order a client may set explicitly. Appends stay far below `u64::MAX`.
pub const MAX_ORDER: u64 = u32::MAX as u64;

/// Any subset of a task's mutable fields, as sent in `PUT /tasks/:id`.
///
/// `due_date` distinguishes "not sent" (`None`) from "cleared"
/// (`Some(None)`, sent as `""` or `null`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labels: Option<Vec<String>>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_due_date_patch",
        deserialize_with = "deserialize_due_date_patch"
    )]
    pub due_date: Option<Option<NaiveDate>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column: Option<Column>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<u64>,
}

impl TaskPatch {
    /// A move: the shape a drag-and-drop drop produces.
    pub fn moving(column: Column, order: u64) -> Self {
        Self {
            column: Some(column),
            order: Some(order),
            ..Self::default()
        }
    }

    /// Reject orders outside `1..=MAX_ORDER`.
    pub fn validate(&self) -> Result<(), String> {
        match self.order {
            Some(order) if order == 0 || order > MAX_ORDER => Err(format!(
                "order must be between 1 and {}, got {}",
                MAX_ORDER, order
            )),
            _ => Ok(()),
        }
    }

    /// Whether this patch touches `column` or `order`.
    pub fn is_move(&self) -> bool {
        self.column.is_some() || self.order.is_some()
    }

    /// Apply the patch to `task`.
    ///
    /// `append_order` is the order the task takes when it changes column
    /// without an explicit `order`; the caller computes it from the target
    /// column (max + 1). Siblings are never touched.
    pub fn apply(self, task: &mut Task, append_order: Option<u64>) {
        if let Some(column) = self.column {
            if column != task.column {
                task.column = column;
                if let Some(order) = self.order.or(append_order) {
                    task.order = order;
                }
            }
        }
        if let Some(order) = self.order {
            task.order = order;
        }

        if let Some(text) = self.text {
            task.text = text;
        }
        if let Some(description) = self.description {
            task.description = description;
        }
        if let Some(labels) = self.labels {
            task.labels = normalize_labels(labels);
        }
        if let Some(due) = self.due_date {
            task.due_date = due;
        }
    }
}

fn serialize_due_date_patch<S>(
    value: &Option<Option<NaiveDate>>,
    serializer: S,
) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match value {
        Some(inner) => due_date::serialize(inner, serializer),
        None => serializer.serialize_none(),
    }
}

fn deserialize_due_date_patch<'de, D>(deserializer: D) -> Result<Option<Option<NaiveDate>>, D::Error>
where
    D: Deserializer<'de>,
{
    due_date::deserialize(deserializer).map(Some)
}
