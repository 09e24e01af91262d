use taskboard_shared::{
  RecordId,
  TaskPriority,
  TaskStatus
};

/// Exactly one selection is active at a
/// time. Picking one replaces the
/// others.
#[derive(
  Debug, Clone, PartialEq, Eq, Default,
)]
pub enum Selection {
  #[default]
  AllTasks,
  ByCategory(RecordId),
  ByStatus(TaskStatus),
  ByPriority(TaskPriority),
  BySearch(String)
}

#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Default,
)]
pub enum SortMode {
  #[default]
  DueDateAscending,
  PriorityDescending
}

#[derive(
  Debug, Clone, PartialEq, Eq, Default,
)]
pub struct FilterState {
  selection: Selection,
  sort:      SortMode
}

impl FilterState {
  pub fn selection(&self) -> &Selection {
    &self.selection
  }

  pub fn sort(&self) -> SortMode {
    self.sort
  }

  /// Replaces the selection. An empty
  /// search keyword or empty category
  /// id means "all tasks".
  pub fn set_mode(
    &mut self,
    selection: Selection
  ) {
    self.selection = match selection {
      | Selection::BySearch(keyword) => {
        let keyword = keyword.trim();
        if keyword.is_empty() {
          Selection::AllTasks
        } else {
          Selection::BySearch(
            keyword.to_string()
          )
        }
      }
      | Selection::ByCategory(id)
        if id.is_empty() =>
      {
        Selection::AllTasks
      }
      | other => other
    };
  }

  pub fn set_sort(
    &mut self,
    sort: SortMode
  ) {
    self.sort = sort;
  }

  pub fn active_category(
    &self
  ) -> Option<&RecordId> {
    match &self.selection {
      | Selection::ByCategory(id) => {
        Some(id)
      }
      | _ => None
    }
  }

  pub fn search_keyword(
    &self
  ) -> Option<&str> {
    match &self.selection {
      | Selection::BySearch(keyword) => {
        Some(keyword)
      }
      | _ => None
    }
  }
}

/// One list endpoint of the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchRequest {
  Search(String),
  Category(RecordId),
  Status(TaskStatus),
  Priority(TaskPriority),
  OrderedByPriority,
  All
}

/// Picks the single endpoint for a
/// filter snapshot. First match wins.
///
/// The priority-ordered list is only
/// reachable when no selection is
/// active: the store has no endpoint
/// combining a filter with that order,
/// so a category/status/priority/search
/// selection silently keeps its own
/// (due-date) order.
pub fn select_fetch(
  state: &FilterState
) -> FetchRequest {
  match &state.selection {
    | Selection::BySearch(keyword)
      if !keyword.trim().is_empty() =>
    {
      FetchRequest::Search(
        keyword.trim().to_string()
      )
    }
    | Selection::ByCategory(id)
      if !id.is_empty() =>
    {
      FetchRequest::Category(id.clone())
    }
    | Selection::ByStatus(status) => {
      FetchRequest::Status(*status)
    }
    | Selection::ByPriority(priority) => {
      FetchRequest::Priority(*priority)
    }
    | _ => {
      match state.sort {
        | SortMode::PriorityDescending => {
          FetchRequest::OrderedByPriority
        }
        | SortMode::DueDateAscending => {
          FetchRequest::All
        }
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use rstest::rstest;

  use super::*;

  fn state(
    selection: Selection,
    sort: SortMode
  ) -> FilterState {
    let mut state =
      FilterState::default();
    state.set_mode(selection);
    state.set_sort(sort);
    state
  }

  #[rstest]
  #[case(
    Selection::AllTasks,
    SortMode::DueDateAscending,
    FetchRequest::All
  )]
  #[case(
    Selection::AllTasks,
    SortMode::PriorityDescending,
    FetchRequest::OrderedByPriority
  )]
  #[case(
    Selection::BySearch("milk".into()),
    SortMode::PriorityDescending,
    FetchRequest::Search("milk".into())
  )]
  #[case(
    Selection::ByCategory(RecordId::new("7")),
    SortMode::PriorityDescending,
    FetchRequest::Category(RecordId::new("7"))
  )]
  #[case(
    Selection::ByStatus(TaskStatus::Done),
    SortMode::PriorityDescending,
    FetchRequest::Status(TaskStatus::Done)
  )]
  #[case(
    Selection::ByPriority(TaskPriority::High),
    SortMode::DueDateAscending,
    FetchRequest::Priority(TaskPriority::High)
  )]
  #[case(
    Selection::BySearch("   ".into()),
    SortMode::DueDateAscending,
    FetchRequest::All
  )]
  #[case(
    Selection::ByCategory(RecordId::new("")),
    SortMode::PriorityDescending,
    FetchRequest::OrderedByPriority
  )]
  fn fetch_selection_order(
    #[case] selection: Selection,
    #[case] sort: SortMode,
    #[case] expected: FetchRequest
  ) {
    assert_eq!(
      select_fetch(&state(selection, sort)),
      expected
    );
  }

  #[test]
  fn empty_search_is_all_tasks() {
    let mut state =
      FilterState::default();
    state.set_mode(Selection::BySearch(
      String::new()
    ));
    assert_eq!(
      state.selection(),
      &Selection::AllTasks
    );
  }

  #[test]
  fn category_and_search_replace_each_other()
   {
    let mut state =
      FilterState::default();
    state.set_mode(Selection::BySearch(
      " milk ".into()
    ));
    assert_eq!(
      state.search_keyword(),
      Some("milk")
    );

    state.set_mode(Selection::ByCategory(
      RecordId::new("4")
    ));
    assert_eq!(state.search_keyword(), None);
    assert_eq!(
      state.active_category(),
      Some(&RecordId::new("4"))
    );

    state.set_mode(Selection::BySearch(
      "eggs".into()
    ));
    assert_eq!(state.active_category(), None);
  }

  #[test]
  fn sort_does_not_touch_selection() {
    let mut state =
      FilterState::default();
    state.set_mode(Selection::ByStatus(
      TaskStatus::Open
    ));
    state.set_sort(
      SortMode::PriorityDescending
    );
    assert_eq!(
      state.selection(),
      &Selection::ByStatus(
        TaskStatus::Open
      )
    );
    assert_eq!(
      state.sort(),
      SortMode::PriorityDescending
    );
  }
}
