use std::collections::BTreeMap;

use taskboard_shared::{
  RecordId,
  TaskStatus
};

use crate::config::BoardConfig;
use crate::datetime::format_display;
use crate::edit::{
  EditPhase,
  EditSession
};
use crate::model::{
  Category,
  Task
};
use crate::mutation::TaskDraft;
use crate::reconciler::ListView;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryView {
  Categories(Vec<Category>),
  Empty,
  Failed
}

/// Snapshot of the task form for
/// painting.
#[derive(
  Debug, Clone, PartialEq, Eq, Default,
)]
pub struct FormView {
  pub phase: EditPhase,
  pub draft: TaskDraft,
  pub error: Option<String>
}

impl FormView {
  pub fn is_visible(&self) -> bool {
    self.phase != EditPhase::Closed
  }

  pub fn submit_enabled(&self) -> bool {
    self.phase == EditPhase::Populated
  }

  pub fn is_edit(&self) -> bool {
    !self.draft.task_id.trim().is_empty()
  }
}

impl From<&EditSession> for FormView {
  fn from(session: &EditSession) -> Self {
    Self {
      phase: session.phase(),
      draft: session.form().clone(),
      error: session
        .error()
        .map(str::to_string)
    }
  }
}

#[derive(
  Debug, Clone, PartialEq, Eq, Default,
)]
pub struct StatusCounts(
  pub BTreeMap<TaskStatus, u64>
);

impl StatusCounts {
  pub fn get(
    &self,
    status: TaskStatus
  ) -> u64 {
    self.0.get(&status).copied().unwrap_or(0)
  }
}

/// Paints board state. Every method
/// must be a pure function of its
/// argument: painting the same value
/// twice leaves the same screen.
pub trait Renderer {
  fn paint_tasks(&self, view: &ListView);

  fn paint_categories(
    &self,
    view: &CategoryView
  );

  fn paint_form(&self, form: &FormView);

  fn paint_user(&self, username: &str);

  fn paint_counts(
    &self,
    counts: &StatusCounts
  );
}

/// Blocking dialogs and navigation.
pub trait Interaction {
  fn alert(&self, message: &str);

  fn confirm(&self, message: &str) -> bool;

  fn navigate(&self, url: &str);
}

/// Display projection of one task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskRow {
  pub id:            RecordId,
  pub title:         String,
  pub description:   String,
  pub has_description: bool,
  pub category_name: Option<String>,
  pub status_label:  &'static str,
  pub status_key:    &'static str,
  pub priority_label: &'static str,
  pub priority_key:  &'static str,
  pub due:           String,
  pub can_complete:  bool
}

pub fn task_row(
  task: &Task,
  config: &BoardConfig
) -> TaskRow {
  TaskRow {
    id:              task.id.clone(),
    title:           task.title.clone(),
    description:     task
      .description
      .clone()
      .unwrap_or_else(|| {
        config
          .messages
          .no_description
          .clone()
      }),
    has_description: task
      .description
      .is_some(),
    category_name:   task
      .category_name
      .clone(),
    status_label:    task.status.label(),
    status_key:      task.status.key(),
    priority_label:  task.priority.label(),
    priority_key:    task.priority.key(),
    due:             format_display(
      task.due_date,
      &config.display_date_format
    ),
    can_complete:    task.status
      != TaskStatus::Done
  }
}

/// Text for the non-list states of the
/// task pane.
pub fn placeholder_text(
  view: &ListView,
  config: &BoardConfig
) -> Option<String> {
  let messages = &config.messages;
  match view {
    | ListView::Loading => {
      Some(messages.loading.clone())
    }
    | ListView::Empty => {
      Some(messages.no_tasks.clone())
    }
    | ListView::Failed(_) => {
      Some(messages.load_failed.clone())
    }
    | ListView::Tasks(_) => None
  }
}

#[cfg(test)]
mod tests {
  use chrono::NaiveDate;
  use taskboard_shared::TaskPriority;

  use super::*;
  use crate::error::BoardError;

  fn task() -> Task {
    Task {
      id:            RecordId::new("3"),
      title:         "Call plumber"
        .to_string(),
      description:   None,
      category_id:   RecordId::new("1"),
      category_name: Some(
        "Home".to_string()
      ),
      due_date:      NaiveDate::from_ymd_opt(
        2024, 3, 5
      )
      .expect("valid date"),
      status:        TaskStatus::Done,
      priority:      TaskPriority::Urgent
    }
  }

  #[test]
  fn row_uses_labels_and_display_format() {
    let config = BoardConfig::default();
    let row = task_row(&task(), &config);
    assert_eq!(row.due, "2024/03/05");
    assert_eq!(row.status_label, "Done");
    assert_eq!(row.priority_key, "urgent");
    assert_eq!(
      row.description,
      config.messages.no_description
    );
    assert!(!row.has_description);
    assert!(!row.can_complete);
  }

  #[test]
  fn empty_and_failed_placeholders_differ() {
    let config = BoardConfig::default();
    let empty = placeholder_text(
      &ListView::Empty,
      &config
    );
    let failed = placeholder_text(
      &ListView::Failed(
        BoardError::transport("reset")
      ),
      &config
    );
    assert!(empty.is_some());
    assert_ne!(empty, failed);
    assert_eq!(
      placeholder_text(
        &ListView::Tasks(vec![task()]),
        &config
      ),
      None
    );
  }

  #[test]
  fn form_view_tracks_session() {
    let mut session = EditSession::new();
    assert!(
      !FormView::from(&session).is_visible()
    );
    let _ticket =
      session.open_edit(RecordId::new("3"));
    let view = FormView::from(&session);
    assert!(view.is_visible());
    assert!(!view.submit_enabled());
  }
}
