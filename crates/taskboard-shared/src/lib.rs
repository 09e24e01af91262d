use std::fmt;
use std::str::FromStr;

use serde::de::DeserializeOwned;
use serde::{
  Deserialize,
  Deserializer,
  Serialize,
  Serializer
};
use serde_json::{
  Map,
  Value
};

/// Envelope payload keys used by the
/// store.
pub mod keys {
  pub const TASKS: &str = "tasks";
  pub const TASK: &str = "task";
  pub const CATEGORIES: &str =
    "categories";
  pub const USER: &str = "user";
  pub const COUNT: &str = "count";
  pub const EXISTS: &str = "exists";
}

/// Form and query parameter names.
pub mod fields {
  pub const TASK_ID: &str = "taskId";
  pub const TASK_NAME: &str =
    "taskName";
  pub const DESCRIPTION: &str =
    "description";
  pub const CATEGORY_ID: &str =
    "categoryId";
  pub const CATEGORY_NAME: &str =
    "categoryName";
  pub const DUE_DATE: &str = "dueDate";
  pub const PRIORITY: &str = "priority";
  pub const STATUS: &str = "status";
  pub const KEYWORD: &str = "keyword";
}

#[derive(
  Debug,
  Clone,
  PartialEq,
  Eq,
  thiserror::Error,
)]
#[error("unknown {kind} ordinal {value}")]
pub struct UnknownOrdinal {
  pub kind:  &'static str,
  pub value: i64
}

#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  PartialOrd,
  Ord,
  Serialize,
  Deserialize,
)]
#[serde(
  try_from = "i64",
  into = "i64"
)]
pub enum TaskStatus {
  Open,
  InProgress,
  Done
}

impl TaskStatus {
  pub const ALL: [TaskStatus; 3] = [
    TaskStatus::Open,
    TaskStatus::InProgress,
    TaskStatus::Done
  ];

  pub fn ordinal(self) -> i64 {
    match self {
      | TaskStatus::Open => 0,
      | TaskStatus::InProgress => 1,
      | TaskStatus::Done => 2
    }
  }

  pub fn label(self) -> &'static str {
    match self {
      | TaskStatus::Open => "Open",
      | TaskStatus::InProgress => {
        "In progress"
      }
      | TaskStatus::Done => "Done"
    }
  }

  /// Stable css/class key.
  pub fn key(self) -> &'static str {
    match self {
      | TaskStatus::Open => "open",
      | TaskStatus::InProgress => {
        "in-progress"
      }
      | TaskStatus::Done => "done"
    }
  }
}

impl TryFrom<i64> for TaskStatus {
  type Error = UnknownOrdinal;

  fn try_from(
    value: i64
  ) -> Result<Self, Self::Error> {
    match value {
      | 0 => Ok(TaskStatus::Open),
      | 1 => Ok(TaskStatus::InProgress),
      | 2 => Ok(TaskStatus::Done),
      | _ => {
        Err(UnknownOrdinal {
          kind: "status",
          value
        })
      }
    }
  }
}

impl From<TaskStatus> for i64 {
  fn from(status: TaskStatus) -> Self {
    status.ordinal()
  }
}

impl FromStr for TaskStatus {
  type Err = UnknownOrdinal;

  fn from_str(
    s: &str
  ) -> Result<Self, Self::Err> {
    parse_ordinal(s, "status")
      .and_then(TaskStatus::try_from)
  }
}

impl fmt::Display for TaskStatus {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>
  ) -> fmt::Result {
    f.write_str(self.label())
  }
}

/// Ordered from least to most urgent;
/// `Ord` follows the wire ordinal.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  PartialOrd,
  Ord,
  Serialize,
  Deserialize,
)]
#[serde(
  try_from = "i64",
  into = "i64"
)]
pub enum TaskPriority {
  Low,
  Medium,
  High,
  Urgent
}

impl TaskPriority {
  pub const ALL: [TaskPriority; 4] = [
    TaskPriority::Low,
    TaskPriority::Medium,
    TaskPriority::High,
    TaskPriority::Urgent
  ];

  pub fn ordinal(self) -> i64 {
    match self {
      | TaskPriority::Low => 1,
      | TaskPriority::Medium => 2,
      | TaskPriority::High => 3,
      | TaskPriority::Urgent => 4
    }
  }

  pub fn label(self) -> &'static str {
    match self {
      | TaskPriority::Low => "Low",
      | TaskPriority::Medium => "Medium",
      | TaskPriority::High => "High",
      | TaskPriority::Urgent => "Urgent"
    }
  }

  pub fn key(self) -> &'static str {
    match self {
      | TaskPriority::Low => "low",
      | TaskPriority::Medium => "medium",
      | TaskPriority::High => "high",
      | TaskPriority::Urgent => "urgent"
    }
  }
}

impl TryFrom<i64> for TaskPriority {
  type Error = UnknownOrdinal;

  fn try_from(
    value: i64
  ) -> Result<Self, Self::Error> {
    match value {
      | 1 => Ok(TaskPriority::Low),
      | 2 => Ok(TaskPriority::Medium),
      | 3 => Ok(TaskPriority::High),
      | 4 => Ok(TaskPriority::Urgent),
      | _ => {
        Err(UnknownOrdinal {
          kind: "priority",
          value
        })
      }
    }
  }
}

impl From<TaskPriority> for i64 {
  fn from(priority: TaskPriority) -> Self {
    priority.ordinal()
  }
}

impl FromStr for TaskPriority {
  type Err = UnknownOrdinal;

  fn from_str(
    s: &str
  ) -> Result<Self, Self::Err> {
    parse_ordinal(s, "priority")
      .and_then(TaskPriority::try_from)
  }
}

impl fmt::Display for TaskPriority {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>
  ) -> fmt::Result {
    f.write_str(self.label())
  }
}

fn parse_ordinal(
  s: &str,
  kind: &'static str
) -> Result<i64, UnknownOrdinal> {
  s.trim().parse::<i64>().map_err(
    |_| UnknownOrdinal {
      kind,
      value: -1
    }
  )
}

/// Opaque record identifier. The store
/// sends integers today but nothing
/// here depends on that.
#[derive(
  Debug,
  Clone,
  PartialEq,
  Eq,
  Hash,
  PartialOrd,
  Ord,
  Default,
)]
pub struct RecordId(String);

impl RecordId {
  pub fn new(
    value: impl Into<String>
  ) -> Self {
    Self(value.into().trim().to_string())
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }

  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }
}

impl fmt::Display for RecordId {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>
  ) -> fmt::Result {
    f.write_str(&self.0)
  }
}

impl From<&str> for RecordId {
  fn from(value: &str) -> Self {
    Self::new(value)
  }
}

impl From<i64> for RecordId {
  fn from(value: i64) -> Self {
    Self(value.to_string())
  }
}

impl Serialize for RecordId {
  fn serialize<S>(
    &self,
    serializer: S
  ) -> Result<S::Ok, S::Error>
  where
    S: Serializer
  {
    serializer.serialize_str(&self.0)
  }
}

impl<'de> Deserialize<'de> for RecordId {
  fn deserialize<D>(
    deserializer: D
  ) -> Result<Self, D::Error>
  where
    D: Deserializer<'de>
  {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
      Int(i64),
      Text(String)
    }

    Ok(
      match RawId::deserialize(
        deserializer
      )? {
        | RawId::Int(value) => {
          RecordId::from(value)
        }
        | RawId::Text(value) => {
          RecordId::new(value)
        }
      }
    )
  }
}

/// A date exactly as the store sent it.
/// Normalization to a calendar date
/// happens in the core.
#[derive(
  Debug,
  Clone,
  PartialEq,
  Eq,
  Serialize,
  Deserialize,
)]
#[serde(untagged)]
pub enum WireDate {
  Millis(i64),
  Text(String)
}

#[derive(
  Debug,
  Clone,
  Serialize,
  Deserialize,
  PartialEq,
)]
#[serde(rename_all = "camelCase")]
pub struct TaskDto {
  pub task_id:       RecordId,
  #[serde(default)]
  pub title:         String,
  #[serde(default)]
  pub description:   Option<String>,
  #[serde(default)]
  pub category_id:   Option<RecordId>,
  #[serde(default)]
  pub category_name: Option<String>,
  #[serde(default)]
  pub due_date:      Option<WireDate>,
  #[serde(default)]
  pub status:        Option<TaskStatus>,
  #[serde(default)]
  pub priority:
    Option<TaskPriority>
}

#[derive(
  Debug,
  Clone,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
)]
#[serde(rename_all = "camelCase")]
pub struct CategoryDto {
  pub category_id:   RecordId,
  #[serde(default)]
  pub category_name: String,
  #[serde(default)]
  pub description:   Option<String>
}

#[derive(
  Debug,
  Clone,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
  #[serde(default)]
  pub user_id:  Option<RecordId>,
  #[serde(default)]
  pub username: String,
  #[serde(default)]
  pub email:    Option<String>
}

/// The uniform `{success, message?,
/// ...payload}` response shape.
#[derive(
  Debug,
  Clone,
  Default,
  Serialize,
  Deserialize,
  PartialEq,
)]
pub struct Envelope {
  #[serde(default)]
  pub success: bool,
  #[serde(
    default,
    skip_serializing_if = "Option::is_none"
  )]
  pub message: Option<String>,
  #[serde(flatten)]
  pub payload: Map<String, Value>
}

impl Envelope {
  pub fn ok() -> Self {
    Self {
      success: true,
      ..Self::default()
    }
  }

  pub fn failure(
    message: impl Into<String>
  ) -> Self {
    Self {
      success: false,
      message: Some(message.into()),
      payload: Map::new()
    }
  }

  pub fn with(
    mut self,
    key: &str,
    value: impl Serialize
  ) -> Self {
    let value =
      serde_json::to_value(value)
        .unwrap_or(Value::Null);
    self
      .payload
      .insert(key.to_string(), value);
    self
  }

  pub fn has(&self, key: &str) -> bool {
    self
      .payload
      .get(key)
      .is_some_and(|value| {
        !value.is_null()
      })
  }

  /// Removes and decodes one payload
  /// entry. `None` when the key is
  /// absent or null.
  pub fn take<T>(
    &mut self,
    key: &str
  ) -> Option<Result<T, serde_json::Error>>
  where
    T: DeserializeOwned
  {
    match self.payload.remove(key) {
      | None | Some(Value::Null) => None,
      | Some(value) => {
        Some(serde_json::from_value(
          value
        ))
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use rstest::rstest;
  use serde_json::json;

  use super::*;

  #[rstest]
  #[case(0, TaskStatus::Open)]
  #[case(1, TaskStatus::InProgress)]
  #[case(2, TaskStatus::Done)]
  fn status_ordinals_follow_the_wire(
    #[case] ordinal: i64,
    #[case] status: TaskStatus
  ) {
    assert_eq!(
      TaskStatus::try_from(ordinal),
      Ok(status)
    );
    assert_eq!(status.ordinal(), ordinal);
  }

  #[test]
  fn unknown_ordinals_are_rejected() {
    assert!(
      TaskStatus::try_from(3).is_err()
    );
    assert!(
      TaskPriority::try_from(0).is_err()
    );
    assert!(
      "urgent"
        .parse::<TaskPriority>()
        .is_err()
    );
    assert_eq!(
      "4".parse::<TaskPriority>(),
      Ok(TaskPriority::Urgent)
    );
  }

  #[test]
  fn priority_orders_by_urgency() {
    assert!(
      TaskPriority::Urgent
        > TaskPriority::High
    );
    assert!(
      TaskPriority::Medium
        > TaskPriority::Low
    );
  }

  #[test]
  fn task_dto_accepts_numeric_and_text_ids()
   {
    let raw = json!({
      "taskId": 17,
      "title": "Water plants",
      "categoryId": "3",
      "dueDate": 1_709_596_800_000_i64,
      "status": 1,
      "priority": 3
    });

    let task: TaskDto =
      serde_json::from_value(raw)
        .expect("task decodes");
    assert_eq!(task.task_id.as_str(), "17");
    assert_eq!(
      task.category_id,
      Some(RecordId::new("3"))
    );
    assert_eq!(
      task.due_date,
      Some(WireDate::Millis(
        1_709_596_800_000
      ))
    );
    assert_eq!(
      task.status,
      Some(TaskStatus::InProgress)
    );
    assert_eq!(
      task.priority,
      Some(TaskPriority::High)
    );
    assert_eq!(task.description, None);
  }

  #[test]
  fn task_dto_rejects_out_of_range_status()
   {
    let raw = json!({
      "taskId": 1,
      "status": 7
    });
    assert!(
      serde_json::from_value::<TaskDto>(
        raw
      )
      .is_err()
    );
  }

  #[test]
  fn envelope_splits_payload_from_header()
   {
    let mut envelope: Envelope =
      serde_json::from_value(json!({
        "success": true,
        "categories": [
          {"categoryId": 1, "categoryName": "Home"}
        ]
      }))
      .expect("envelope decodes");

    assert!(envelope.success);
    assert_eq!(envelope.message, None);
    let categories: Vec<CategoryDto> =
      envelope
        .take(keys::CATEGORIES)
        .expect("present")
        .expect("decodes");
    assert_eq!(categories.len(), 1);
    assert_eq!(
      categories[0].category_name,
      "Home"
    );
    assert!(
      envelope
        .take::<Vec<TaskDto>>(keys::TASKS)
        .is_none()
    );
  }

  #[test]
  fn failure_envelope_keeps_message() {
    let envelope: Envelope =
      serde_json::from_str(
        r#"{"success":false,"message":"not logged in"}"#
      )
      .expect("envelope decodes");
    assert!(!envelope.success);
    assert_eq!(
      envelope.message.as_deref(),
      Some("not logged in")
    );
  }
}
