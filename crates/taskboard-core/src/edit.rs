use chrono::NaiveDate;
use taskboard_shared::RecordId;
use tracing::{
  debug,
  warn
};

use crate::datetime::form_value;
use crate::error::BoardError;
use crate::model::Task;
use crate::mutation::TaskDraft;

#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Default,
)]
pub enum EditPhase {
  #[default]
  Closed,
  FetchingDetail,
  Populated,
  Submitting
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailTicket {
  pub generation: u64,
  pub task_id:    RecordId
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailOutcome {
  Populated,
  /// The session moved on; the
  /// response was dropped.
  Stale,
  /// The fetch failed and the session
  /// closed.
  Closed(BoardError)
}

/// The task form's lifecycle:
/// `Closed -> FetchingDetail ->
/// Populated -> Submitting -> Closed`,
/// with cancel possible from any open
/// phase. New-task sessions start at
/// `Populated`.
#[derive(Debug, Clone, Default)]
pub struct EditSession {
  phase:      EditPhase,
  form:       TaskDraft,
  generation: u64,
  error:      Option<String>
}

impl EditSession {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn phase(&self) -> EditPhase {
    self.phase
  }

  pub fn form(&self) -> &TaskDraft {
    &self.form
  }

  pub fn error(&self) -> Option<&str> {
    self.error.as_deref()
  }

  pub fn is_open(&self) -> bool {
    self.phase != EditPhase::Closed
  }

  pub fn can_submit(&self) -> bool {
    self.phase == EditPhase::Populated
  }

  pub fn open_new(
    &mut self,
    today: NaiveDate
  ) {
    self.generation += 1;
    self.form = TaskDraft {
      due_date: form_value(today),
      ..TaskDraft::default()
    };
    self.error = None;
    self.phase = EditPhase::Populated;
    debug!(
      generation = self.generation,
      "opened new task form"
    );
  }

  /// Clears the form and locks submit
  /// until the detail arrives.
  pub fn open_edit(
    &mut self,
    task_id: RecordId
  ) -> DetailTicket {
    self.generation += 1;
    self.form = TaskDraft::default();
    self.error = None;
    self.phase = EditPhase::FetchingDetail;
    debug!(
      generation = self.generation,
      task_id = %task_id,
      "fetching task detail for edit"
    );
    DetailTicket {
      generation: self.generation,
      task_id
    }
  }

  /// Fills every field from the fetched
  /// record, never from the list row.
  pub fn detail_loaded(
    &mut self,
    ticket: &DetailTicket,
    result: Result<Task, BoardError>
  ) -> DetailOutcome {
    if ticket.generation != self.generation
      || self.phase
        != EditPhase::FetchingDetail
    {
      warn!(
        task_id = %ticket.task_id,
        "discarding stale task detail"
      );
      return DetailOutcome::Stale;
    }

    match result {
      | Ok(task) => {
        self.form = TaskDraft {
          task_id:     task
            .id
            .as_str()
            .to_string(),
          title:       task.title,
          description: task
            .description
            .unwrap_or_default(),
          category_id: task
            .category_id
            .as_str()
            .to_string(),
          due_date:    form_value(
            task.due_date
          ),
          priority:    Some(task.priority)
        };
        self.phase = EditPhase::Populated;
        DetailOutcome::Populated
      }
      | Err(error) => {
        self.close();
        DetailOutcome::Closed(error)
      }
    }
  }

  /// Applies a user edit. Ignored
  /// unless the form is editable.
  pub fn edit(
    &mut self,
    apply: impl FnOnce(&mut TaskDraft)
  ) {
    if self.phase == EditPhase::Populated {
      apply(&mut self.form);
    }
  }

  /// Locks the form and hands out the
  /// draft to submit. `None` while a
  /// submit is already running or the
  /// form is not ready.
  pub fn begin_submit(
    &mut self
  ) -> Option<TaskDraft> {
    if !self.can_submit() {
      debug!(
        phase = ?self.phase,
        "ignoring submit"
      );
      return None;
    }
    self.phase = EditPhase::Submitting;
    self.error = None;
    Some(self.form.clone())
  }

  /// `Err` keeps the form open with the
  /// message attached.
  pub fn submit_finished(
    &mut self,
    result: Result<(), String>
  ) {
    if self.phase != EditPhase::Submitting {
      return;
    }
    match result {
      | Ok(()) => self.close(),
      | Err(message) => {
        self.error = Some(message);
        self.phase = EditPhase::Populated;
      }
    }
  }

  pub fn cancel(&mut self) {
    if self.is_open() {
      debug!("task form cancelled");
    }
    self.close();
  }

  fn close(&mut self) {
    self.generation += 1;
    self.phase = EditPhase::Closed;
    self.form = TaskDraft::default();
  }
}
