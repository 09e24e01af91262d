use tracing::{
  debug,
  warn
};

use crate::error::BoardError;
use crate::filter::{
  FetchRequest,
  FilterState,
  Selection,
  SortMode,
  select_fetch
};
use crate::model::Task;

#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Default,
)]
pub enum ViewPhase {
  #[default]
  Idle,
  Loading,
  Loaded,
  Failed
}

/// What the task list pane shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListView {
  Loading,
  Tasks(Vec<Task>),
  /// A successful fetch with zero
  /// records.
  Empty,
  Failed(BoardError)
}

/// A fetch the caller must run and
/// report back with the same `seq`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
  pub seq:     u64,
  pub intent:  FilterState,
  pub request: FetchRequest
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewMsg {
  Select(Selection),
  Sort(SortMode),
  /// Re-run the current filter, e.g.
  /// after a mutation.
  Refresh,
  FetchSucceeded {
    seq:   u64,
    tasks: Vec<Task>
  },
  FetchFailed {
    seq:   u64,
    error: BoardError
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewEffect {
  Paint(ListView),
  Fetch(FetchTicket)
}

/// Owns the filter state and decides
/// which response may paint. Only the
/// response carrying the highest issued
/// sequence number is accepted; all
/// others are dropped.
#[derive(Debug, Default)]
pub struct Reconciler {
  filter:   FilterState,
  phase:    ViewPhase,
  last_seq: u64
}

impl Reconciler {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn filter(&self) -> &FilterState {
    &self.filter
  }

  pub fn phase(&self) -> ViewPhase {
    self.phase
  }

  pub fn last_seq(&self) -> u64 {
    self.last_seq
  }

  pub fn handle(
    &mut self,
    msg: ViewMsg
  ) -> Vec<ViewEffect> {
    match msg {
      | ViewMsg::Select(selection) => {
        self.filter.set_mode(selection);
        self.begin_fetch()
      }
      | ViewMsg::Sort(sort) => {
        self.filter.set_sort(sort);
        self.begin_fetch()
      }
      | ViewMsg::Refresh => {
        self.begin_fetch()
      }
      | ViewMsg::FetchSucceeded {
        seq,
        tasks
      } => {
        if !self.accepts(seq) {
          return vec![];
        }
        self.phase = ViewPhase::Loaded;
        debug!(
          seq,
          count = tasks.len(),
          "painting fetched tasks"
        );
        let view = if tasks.is_empty() {
          ListView::Empty
        } else {
          ListView::Tasks(tasks)
        };
        vec![ViewEffect::Paint(view)]
      }
      | ViewMsg::FetchFailed {
        seq,
        error
      } => {
        if !self.accepts(seq) {
          return vec![];
        }
        self.phase = ViewPhase::Failed;
        warn!(seq, %error, "task fetch failed");
        vec![ViewEffect::Paint(
          ListView::Failed(error)
        )]
      }
    }
  }

  /// Reports the outcome of `seq`.
  /// `None` means the response was
  /// stale and must not be painted.
  pub fn complete(
    &mut self,
    seq: u64,
    result: Result<Vec<Task>, BoardError>
  ) -> Option<ListView> {
    let msg = match result {
      | Ok(tasks) => {
        ViewMsg::FetchSucceeded {
          seq,
          tasks
        }
      }
      | Err(error) => {
        ViewMsg::FetchFailed { seq, error }
      }
    };
    self.handle(msg).into_iter().find_map(
      |effect| match effect {
        | ViewEffect::Paint(view) => {
          Some(view)
        }
        | ViewEffect::Fetch(_) => None
      }
    )
  }

  fn begin_fetch(
    &mut self
  ) -> Vec<ViewEffect> {
    self.last_seq += 1;
    self.phase = ViewPhase::Loading;
    let ticket = FetchTicket {
      seq:     self.last_seq,
      intent:  self.filter.clone(),
      request: select_fetch(&self.filter)
    };
    debug!(
      seq = ticket.seq,
      request = ?ticket.request,
      "issuing task fetch"
    );
    vec![
      ViewEffect::Paint(ListView::Loading),
      ViewEffect::Fetch(ticket),
    ]
  }

  fn accepts(&self, seq: u64) -> bool {
    if seq != self.last_seq {
      warn!(
        seq,
        latest = self.last_seq,
        "discarding stale task response"
      );
      return false;
    }
    if self.phase != ViewPhase::Loading {
      warn!(
        seq,
        phase = ?self.phase,
        "discarding duplicate task \
         response"
      );
      return false;
    }
    true
  }
}
