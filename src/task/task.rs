//! Core Task type and the fixed board columns.
//!
//! # Invariants
//! - `id` never changes after creation and is unique within a store
//! - `order` is positive; it is unique within a column only at the moment
//!   the store assigns it

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Task identifier (decimal integer on the wire).
pub type TaskId = u64;

/// One of the three workflow stages a task belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Column {
    Todo,
    Doing,
    Done,
}

impl Column {
    /// Columns in board display order (left to right).
    pub const ALL: [Column; 3] = [Column::Todo, Column::Doing, Column::Done];

    pub fn as_str(&self) -> &'static str {
        match self {
            Column::Todo => "todo",
            Column::Doing => "doing",
            Column::Done => "done",
        }
    }

    /// Position of this column on the board, matching `Column::ALL`.
    pub fn index(&self) -> usize {
        match self {
            Column::Todo => 0,
            Column::Doing => 1,
            Column::Done => 2,
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Column {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "todo" => Ok(Column::Todo),
            "doing" => Ok(Column::Doing),
            "done" => Ok(Column::Done),
            other => Err(format!("unknown column '{}'", other)),
        }
    }
}

/// A card on the board.
///
/// Field order and names match the JSON the board UI consumes:
/// `{id, text, column, order, description, labels, dueDate}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    pub text: String,
    pub column: Column,
    pub order: u64,
    #[serde(default)]
    pub description: String,
    /// Set semantics; kept in first-seen order for stable rendering.
    #[serde(default)]
    pub labels: Vec<String>,
    #[serde(default, with = "due_date")]
    pub due_date: Option<NaiveDate>,
}

impl Task {
    /// Create a fresh task in `todo` with empty content fields.
    pub fn new(id: TaskId, text: impl Into<String>, order: u64) -> Self {
        Self {
            id,
            text: text.into(),
            column: Column::Todo,
            order,
            description: String::new(),
            labels: Vec::new(),
            due_date: None,
        }
    }
}

/// Drop duplicate labels, keeping the first occurrence of each.
pub fn normalize_labels(labels: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(labels.len());
    for label in labels {
        if !out.contains(&label) {
            out.push(label);
        }
    }
    out
}

/// Wire form of the due date: `"YYYY-MM-DD"`, or `""` when unset.
///
/// Both `""` and `null` are accepted on input as "no date".
pub(crate) mod due_date {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    pub const FORMAT: &str = "%Y-%m-%d";

    pub fn serialize<S>(date: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match date {
            Some(d) => serializer.serialize_str(&d.format(FORMAT).to_string()),
            None => serializer.serialize_str(""),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        parse(raw.as_deref().unwrap_or("")).map_err(serde::de::Error::custom)
    }

    pub fn parse(raw: &str) -> Result<Option<NaiveDate>, String> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Ok(None);
        }
        NaiveDate::parse_from_str(raw, FORMAT)
            .map(Some)
            .map_err(|e| format!("invalid dueDate '{}': {}", raw, e))
    }
}
