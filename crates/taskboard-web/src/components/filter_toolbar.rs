use taskboard_core::{
  Selection,
  SortMode
};
use taskboard_shared::{
  TaskPriority,
  TaskStatus
};
use web_sys::{
  HtmlInputElement,
  HtmlSelectElement
};
use yew::{
  Callback,
  Event,
  Html,
  InputEvent,
  Properties,
  TargetCast,
  function_component,
  html
};

const ALL: &str = "all";
const SORT_DUE: &str = "due";
const SORT_PRIORITY: &str = "priority";

#[derive(Properties, PartialEq)]
pub struct FilterToolbarProps {
  pub search:          String,
  pub selection:       Selection,
  pub sort:            SortMode,
  pub on_search_input: Callback<String>,
  pub on_select:       Callback<Selection>,
  pub on_sort:         Callback<SortMode>,
  pub on_new_task:     Callback<()>
}

/// Select values use the wire ordinals;
/// `all` clears the selection.
fn status_selection(
  value: &str
) -> Selection {
  value
    .parse::<TaskStatus>()
    .map(Selection::ByStatus)
    .unwrap_or(Selection::AllTasks)
}

fn priority_selection(
  value: &str
) -> Selection {
  value
    .parse::<TaskPriority>()
    .map(Selection::ByPriority)
    .unwrap_or(Selection::AllTasks)
}

#[function_component(FilterToolbar)]
pub fn filter_toolbar(
  props: &FilterToolbarProps
) -> Html {
  let status_value =
    match &props.selection {
      | Selection::ByStatus(status) => {
        status.ordinal().to_string()
      }
      | _ => ALL.to_string()
    };
  let priority_value =
    match &props.selection {
      | Selection::ByPriority(priority) => {
        priority.ordinal().to_string()
      }
      | _ => ALL.to_string()
    };
  let sort_value = match props.sort {
    | SortMode::DueDateAscending => {
      SORT_DUE
    }
    | SortMode::PriorityDescending => {
      SORT_PRIORITY
    }
  };

  let on_search = {
    let on_search_input =
      props.on_search_input.clone();
    Callback::from(move |e: InputEvent| {
      let input: HtmlInputElement =
        e.target_unchecked_into();
      on_search_input.emit(input.value());
    })
  };
  let on_status = {
    let on_select = props.on_select.clone();
    Callback::from(move |e: Event| {
      let select: HtmlSelectElement =
        e.target_unchecked_into();
      on_select.emit(status_selection(
        &select.value()
      ));
    })
  };
  let on_priority = {
    let on_select = props.on_select.clone();
    Callback::from(move |e: Event| {
      let select: HtmlSelectElement =
        e.target_unchecked_into();
      on_select.emit(priority_selection(
        &select.value()
      ));
    })
  };
  let on_sort = {
    let on_sort = props.on_sort.clone();
    Callback::from(move |e: Event| {
      let select: HtmlSelectElement =
        e.target_unchecked_into();
      let sort =
        if select.value() == SORT_PRIORITY {
          SortMode::PriorityDescending
        } else {
          SortMode::DueDateAscending
        };
      on_sort.emit(sort);
    })
  };
  let on_new_task = {
    let on_new_task =
      props.on_new_task.clone();
    move |_| on_new_task.emit(())
  };

  html! {
      <div class="toolbar">
          <input
              class="search"
              type="search"
              placeholder="Search tasks"
              value={props.search.clone()}
              oninput={on_search}
          />
          <select onchange={on_status}>
              <option value={ALL} selected={status_value == ALL}>{ "Any status" }</option>
              {
                  for TaskStatus::ALL.into_iter().map(|status| {
                      let value = status.ordinal().to_string();
                      let selected = value == status_value;
                      html! { <option value={value} selected={selected}>{ status.label() }</option> }
                  })
              }
          </select>
          <select onchange={on_priority}>
              <option value={ALL} selected={priority_value == ALL}>{ "Any priority" }</option>
              {
                  for TaskPriority::ALL.into_iter().map(|priority| {
                      let value = priority.ordinal().to_string();
                      let selected = value == priority_value;
                      html! { <option value={value} selected={selected}>{ priority.label() }</option> }
                  })
              }
          </select>
          <select onchange={on_sort}>
              <option value={SORT_DUE} selected={sort_value == SORT_DUE}>{ "Due date" }</option>
              <option value={SORT_PRIORITY} selected={sort_value == SORT_PRIORITY}>{ "Priority" }</option>
          </select>
          <button class="btn primary" onclick={on_new_task}>{ "New task" }</button>
      </div>
  }
}
