use taskboard_shared::{
  RecordId,
  TaskPriority,
  TaskStatus
};
use tracing::{
  info,
  instrument,
  warn
};

use crate::client::{
  ResourceClient,
  Transport
};
use crate::datetime::{
  form_value,
  parse_form_date
};
use crate::error::BoardError;

/// Raw task form contents. An empty
/// `task_id` means "create".
#[derive(
  Debug, Clone, Default, PartialEq, Eq,
)]
pub struct TaskDraft {
  pub task_id:     String,
  pub title:       String,
  pub description: String,
  pub category_id: String,
  pub due_date:    String,
  pub priority:    Option<TaskPriority>
}

/// Task fields that passed required
/// field checks, trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskFields {
  pub title:       String,
  pub description: String,
  pub category_id: RecordId,
  pub due_date:    String,
  pub priority:    TaskPriority
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskCommand {
  Create(TaskFields),
  Update(RecordId, TaskFields)
}

impl TaskDraft {
  pub fn task_id(
    &self
  ) -> Option<RecordId> {
    let id = RecordId::new(
      self.task_id.as_str()
    );
    (!id.is_empty()).then_some(id)
  }

  pub fn fields(
    &self
  ) -> Result<TaskFields, BoardError> {
    let title = required(
      &self.title,
      "title"
    )?;
    let category_id = required(
      &self.category_id,
      "categoryId"
    )?;
    let due_date = required(
      &self.due_date,
      "dueDate"
    )
    .and_then(|value| {
      parse_form_date(&value)
        .map(form_value)
        .ok_or(BoardError::validation(
          "dueDate"
        ))
    })?;
    let priority =
      self.priority.ok_or(
        BoardError::validation(
          "priority"
        )
      )?;

    Ok(TaskFields {
      title,
      description: self
        .description
        .trim()
        .to_string(),
      category_id: RecordId::new(
        category_id
      ),
      due_date,
      priority
    })
  }

  /// Update if and only if a non-empty
  /// id is present.
  pub fn command(
    &self
  ) -> Result<TaskCommand, BoardError> {
    let fields = self.fields()?;
    Ok(match self.task_id() {
      | Some(id) => {
        TaskCommand::Update(id, fields)
      }
      | None => TaskCommand::Create(fields)
    })
  }
}

fn required(
  value: &str,
  field: &'static str
) -> Result<String, BoardError> {
  let trimmed = value.trim();
  if trimmed.is_empty() {
    Err(BoardError::validation(field))
  } else {
    Ok(trimmed.to_string())
  }
}

#[derive(
  Debug, Clone, Copy, PartialEq, Eq,
)]
pub enum MutationOutcome {
  Applied,
  /// The user declined a confirmation;
  /// nothing was sent.
  Cancelled
}

/// Validates and issues writes. Never
/// touches the rendered list; the
/// caller refreshes on `Applied`.
pub struct MutationCoordinator<'a, T> {
  client: &'a ResourceClient<T>
}

impl<'a, T: Transport>
  MutationCoordinator<'a, T>
{
  pub fn new(
    client: &'a ResourceClient<T>
  ) -> Self {
    Self { client }
  }

  /// Validates, then creates or
  /// updates depending on whether the
  /// draft carries an id.
  #[instrument(skip(self, draft))]
  pub async fn submit_task(
    &self,
    draft: &TaskDraft
  ) -> Result<MutationOutcome, BoardError>
  {
    match draft.command()? {
      | TaskCommand::Create(fields) => {
        self.create_task(&fields).await
      }
      | TaskCommand::Update(
        id,
        fields
      ) => {
        self.update_task(&id, &fields).await
      }
    }
  }

  async fn create_task(
    &self,
    fields: &TaskFields
  ) -> Result<MutationOutcome, BoardError>
  {
    self.client.create_task(fields).await?;
    info!(title = %fields.title, "task created");
    Ok(MutationOutcome::Applied)
  }

  async fn update_task(
    &self,
    task_id: &RecordId,
    fields: &TaskFields
  ) -> Result<MutationOutcome, BoardError>
  {
    self
      .client
      .update_task(task_id, fields)
      .await?;
    info!(task_id = %task_id, "task updated");
    Ok(MutationOutcome::Applied)
  }

  #[instrument(skip(self), fields(task_id = %task_id))]
  pub async fn set_task_status(
    &self,
    task_id: &RecordId,
    status: TaskStatus
  ) -> Result<MutationOutcome, BoardError>
  {
    if task_id.is_empty() {
      return Err(BoardError::validation(
        "taskId"
      ));
    }
    self
      .client
      .update_task_status(task_id, status)
      .await?;
    Ok(MutationOutcome::Applied)
  }

  /// One-click completion.
  pub async fn complete_task(
    &self,
    task_id: &RecordId
  ) -> Result<MutationOutcome, BoardError>
  {
    self
      .set_task_status(
        task_id,
        TaskStatus::Done
      )
      .await
  }

  /// `confirm` is the blocking yes/no
  /// gate; it runs before anything is
  /// sent.
  #[instrument(skip(self, confirm), fields(task_id = %task_id))]
  pub async fn delete_task(
    &self,
    task_id: &RecordId,
    confirm: impl FnOnce() -> bool
  ) -> Result<MutationOutcome, BoardError>
  {
    if task_id.is_empty() {
      return Err(BoardError::validation(
        "taskId"
      ));
    }
    if !confirm() {
      info!("task deletion canceled");
      return Ok(MutationOutcome::Cancelled);
    }
    self.client.delete_task(task_id).await?;
    Ok(MutationOutcome::Applied)
  }

  /// Asks the store about the name
  /// first; an unreachable check does
  /// not block the create.
  #[instrument(skip(self))]
  pub async fn create_category(
    &self,
    name: &str,
    exists_message: &str
  ) -> Result<MutationOutcome, BoardError>
  {
    let name =
      required(name, "categoryName")?;

    match self
      .client
      .category_exists(&name)
      .await
    {
      | Ok(true) => {
        return Err(
          BoardError::application(
            exists_message
          )
        );
      }
      | Ok(false) => {}
      | Err(error) => {
        warn!(%error, "category name check failed; creating anyway");
      }
    }

    self
      .client
      .create_category(&name)
      .await?;
    Ok(MutationOutcome::Applied)
  }

  #[instrument(skip(self), fields(category_id = %category_id))]
  pub async fn update_category(
    &self,
    category_id: &RecordId,
    name: &str
  ) -> Result<MutationOutcome, BoardError>
  {
    let name =
      required(name, "categoryName")?;
    if category_id.is_empty() {
      return Err(BoardError::validation(
        "categoryId"
      ));
    }
    self
      .client
      .update_category(category_id, &name)
      .await?;
    Ok(MutationOutcome::Applied)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn draft() -> TaskDraft {
    TaskDraft {
      task_id:     String::new(),
      title:       " Buy milk ".to_string(),
      description: String::new(),
      category_id: "3".to_string(),
      due_date:    "2024-03-05".to_string(),
      priority:    Some(
        TaskPriority::Medium
      )
    }
  }

  #[test]
  fn empty_id_creates() {
    let command = draft()
      .command()
      .expect("draft is valid");
    let TaskCommand::Create(fields) =
      command
    else {
      panic!("expected create");
    };
    assert_eq!(fields.title, "Buy milk");
  }

  #[test]
  fn non_empty_id_updates() {
    let mut with_id = draft();
    with_id.task_id = " 12 ".to_string();
    assert!(matches!(
      with_id.command(),
      Ok(TaskCommand::Update(id, _))
        if id.as_str() == "12"
    ));

    with_id.task_id = "   ".to_string();
    assert!(matches!(
      with_id.command(),
      Ok(TaskCommand::Create(_))
    ));
  }

  #[test]
  fn each_required_field_is_checked() {
    let cases: [(
      fn(&mut TaskDraft),
      &'static str
    ); 4] = [
      (
        |d: &mut TaskDraft| {
          d.title = "  ".to_string()
        },
        "title"
      ),
      (
        |d: &mut TaskDraft| {
          d.category_id = String::new()
        },
        "categoryId"
      ),
      (
        |d: &mut TaskDraft| {
          d.due_date = String::new()
        },
        "dueDate"
      ),
      (
        |d: &mut TaskDraft| {
          d.priority = None
        },
        "priority"
      )
    ];

    for (mutate, field) in cases {
      let mut broken = draft();
      mutate(&mut broken);
      assert_eq!(
        broken.command(),
        Err(BoardError::validation(field))
      );
    }
  }

  #[test]
  fn due_date_must_be_a_calendar_day() {
    let mut broken = draft();
    broken.due_date = "next tuesday".into();
    assert_eq!(
      broken.fields(),
      Err(BoardError::validation("dueDate"))
    );
  }

  #[test]
  fn description_is_optional() {
    let mut no_desc = draft();
    no_desc.description =
      "   ".to_string();
    let fields = no_desc
      .fields()
      .expect("draft is valid");
    assert_eq!(fields.description, "");
  }
}
