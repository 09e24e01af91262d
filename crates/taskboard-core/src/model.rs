use chrono::NaiveDate;
use taskboard_shared::{
  CategoryDto,
  RecordId,
  TaskDto,
  TaskPriority,
  TaskStatus,
  UserDto
};

use crate::datetime::normalize_wire_date;
use crate::error::BoardError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
  pub id:            RecordId,
  pub title:         String,
  pub description:   Option<String>,
  pub category_id:   RecordId,
  pub category_name: Option<String>,
  pub due_date:      NaiveDate,
  pub status:        TaskStatus,
  pub priority:      TaskPriority
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
  pub id:   RecordId,
  pub name: String
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
  pub username: String
}

impl TryFrom<TaskDto> for Task {
  type Error = BoardError;

  /// A record missing status or
  /// priority takes the store's column
  /// defaults (Open, Low); out-of-range
  /// values never reach this point.
  fn try_from(
    dto: TaskDto
  ) -> Result<Self, Self::Error> {
    if dto.task_id.is_empty() {
      return Err(BoardError::decode(
        "task without taskId"
      ));
    }

    let category_id = dto
      .category_id
      .filter(|id| !id.is_empty())
      .ok_or_else(|| {
        BoardError::decode(format!(
          "task {} has no categoryId",
          dto.task_id
        ))
      })?;

    let due_date = dto
      .due_date
      .as_ref()
      .ok_or_else(|| {
        BoardError::decode(format!(
          "task {} has no dueDate",
          dto.task_id
        ))
      })
      .and_then(normalize_wire_date)?;

    let description = dto
      .description
      .map(|text| text.trim().to_string())
      .filter(|text| !text.is_empty());

    Ok(Task {
      id: dto.task_id,
      title: dto.title,
      description,
      category_id,
      category_name: dto.category_name,
      due_date,
      status: dto
        .status
        .unwrap_or(TaskStatus::Open),
      priority: dto
        .priority
        .unwrap_or(TaskPriority::Low)
    })
  }
}

impl From<CategoryDto> for Category {
  fn from(dto: CategoryDto) -> Self {
    Self {
      id:   dto.category_id,
      name: dto.category_name
    }
  }
}

impl From<UserDto> for User {
  fn from(dto: UserDto) -> Self {
    Self {
      username: dto.username
    }
  }
}

/// Converts a whole list; one bad
/// record fails the list so a partial
/// paint never happens.
pub fn tasks_from_dtos(
  dtos: Vec<TaskDto>
) -> Result<Vec<Task>, BoardError> {
  dtos
    .into_iter()
    .map(Task::try_from)
    .collect()
}
