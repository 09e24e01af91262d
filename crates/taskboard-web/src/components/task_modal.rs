use taskboard_core::edit::EditPhase;
use taskboard_core::model::Category;
use taskboard_core::mutation::TaskDraft;
use taskboard_core::render::FormView;
use taskboard_shared::TaskPriority;
use web_sys::{
  HtmlInputElement,
  HtmlSelectElement,
  HtmlTextAreaElement
};
use yew::{
  Callback,
  Event,
  Html,
  InputEvent,
  Properties,
  SubmitEvent,
  TargetCast,
  function_component,
  html
};

/// One field change in the task form.
#[derive(Debug, Clone, PartialEq)]
pub enum FormEdit {
  Title(String),
  Description(String),
  Category(String),
  DueDate(String),
  Priority(Option<TaskPriority>)
}

impl FormEdit {
  pub fn apply(self, draft: &mut TaskDraft) {
    match self {
      | FormEdit::Title(value) => {
        draft.title = value
      }
      | FormEdit::Description(value) => {
        draft.description = value
      }
      | FormEdit::Category(value) => {
        draft.category_id = value
      }
      | FormEdit::DueDate(value) => {
        draft.due_date = value
      }
      | FormEdit::Priority(value) => {
        draft.priority = value
      }
    }
  }
}

#[derive(Properties, PartialEq)]
pub struct TaskModalProps {
  pub form:       FormView,
  pub categories: Vec<Category>,
  pub on_change:  Callback<FormEdit>,
  pub on_submit:  Callback<()>,
  pub on_cancel:  Callback<()>
}

#[function_component(TaskModal)]
pub fn task_modal(
  props: &TaskModalProps
) -> Html {
  if !props.form.is_visible() {
    return html! {};
  }

  let draft = &props.form.draft;
  let fetching = props.form.phase
    == EditPhase::FetchingDetail;
  let busy = !props.form.submit_enabled();
  let title = if props.form.is_edit()
    || fetching
  {
    "Edit task"
  } else {
    "New task"
  };

  let on_title = {
    let on_change = props.on_change.clone();
    Callback::from(move |e: InputEvent| {
      let input: HtmlInputElement =
        e.target_unchecked_into();
      on_change
        .emit(FormEdit::Title(input.value()));
    })
  };
  let on_description = {
    let on_change = props.on_change.clone();
    Callback::from(move |e: InputEvent| {
      let input: HtmlTextAreaElement =
        e.target_unchecked_into();
      on_change.emit(FormEdit::Description(
        input.value()
      ));
    })
  };
  let on_category = {
    let on_change = props.on_change.clone();
    Callback::from(move |e: Event| {
      let select: HtmlSelectElement =
        e.target_unchecked_into();
      on_change.emit(FormEdit::Category(
        select.value()
      ));
    })
  };
  let on_due = {
    let on_change = props.on_change.clone();
    Callback::from(move |e: Event| {
      let input: HtmlInputElement =
        e.target_unchecked_into();
      on_change.emit(FormEdit::DueDate(
        input.value()
      ));
    })
  };
  let on_priority = {
    let on_change = props.on_change.clone();
    Callback::from(move |e: Event| {
      let select: HtmlSelectElement =
        e.target_unchecked_into();
      on_change.emit(FormEdit::Priority(
        select.value().parse().ok()
      ));
    })
  };
  let on_submit = {
    let on_submit = props.on_submit.clone();
    Callback::from(move |e: SubmitEvent| {
      e.prevent_default();
      on_submit.emit(());
    })
  };
  let on_cancel = {
    let on_cancel = props.on_cancel.clone();
    move |_| on_cancel.emit(())
  };

  let priority_value = draft
    .priority
    .map(|priority| {
      priority.ordinal().to_string()
    })
    .unwrap_or_default();

  html! {
      <div class="modal-backdrop">
          <form class="modal" onsubmit={on_submit}>
              <div class="header">{ title }</div>
              {
                  match &props.form.error {
                      Some(error) => html! { <div class="form-error">{ error }</div> },
                      None => html! {},
                  }
              }
              <label>{ "Title" }</label>
              <input
                  type="text"
                  value={draft.title.clone()}
                  disabled={busy}
                  oninput={on_title}
              />
              <label>{ "Description" }</label>
              <textarea
                  value={draft.description.clone()}
                  disabled={busy}
                  oninput={on_description}
              />
              <label>{ "Category" }</label>
              <select disabled={busy} onchange={on_category}>
                  <option value="" selected={draft.category_id.is_empty()}>{ "Choose a category" }</option>
                  {
                      for props.categories.iter().map(|category| {
                          let selected = category.id.as_str() == draft.category_id;
                          html! {
                              <option value={category.id.to_string()} selected={selected}>
                                  { &category.name }
                              </option>
                          }
                      })
                  }
              </select>
              <label>{ "Due date" }</label>
              <input
                  type="date"
                  value={draft.due_date.clone()}
                  disabled={busy}
                  onchange={on_due}
              />
              <label>{ "Priority" }</label>
              <select disabled={busy} onchange={on_priority}>
                  <option value="" selected={priority_value.is_empty()}>{ "Choose a priority" }</option>
                  {
                      for TaskPriority::ALL.into_iter().map(|priority| {
                          let value = priority.ordinal().to_string();
                          let selected = value == priority_value;
                          html! { <option value={value} selected={selected}>{ priority.label() }</option> }
                      })
                  }
              </select>
              <div class="modal-actions">
                  <button type="button" class="btn" onclick={on_cancel}>{ "Cancel" }</button>
                  <button type="submit" class="btn primary" disabled={busy}>
                      { if fetching { "Loading..." } else { "Save" } }
                  </button>
              </div>
          </form>
      </div>
  }
}
