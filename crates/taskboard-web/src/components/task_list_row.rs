use taskboard_core::render::TaskRow;
use taskboard_shared::RecordId;
use yew::{
  Callback,
  Html,
  MouseEvent,
  Properties,
  classes,
  function_component,
  html
};

#[derive(Properties, PartialEq)]
pub struct TaskListRowProps {
  pub row:         TaskRow,
  pub on_complete: Callback<RecordId>,
  pub on_edit:     Callback<RecordId>,
  pub on_delete:   Callback<RecordId>
}

#[function_component(TaskListRow)]
pub fn task_list_row(
  props: &TaskListRowProps
) -> Html {
  let row = &props.row;
  let dot_class = classes!(
    "dot",
    row.status_key
  );
  let priority_class = classes!(
    "badge",
    "priority",
    row.priority_key
  );
  let description_class =
    if row.has_description {
      "task-subtitle"
    } else {
      "task-subtitle muted"
    };

  let on_complete = {
    let id = row.id.clone();
    let on_complete =
      props.on_complete.clone();
    move |e: MouseEvent| {
      e.stop_propagation();
      on_complete.emit(id.clone());
    }
  };
  let on_edit = {
    let id = row.id.clone();
    let on_edit = props.on_edit.clone();
    move |e: MouseEvent| {
      e.stop_propagation();
      on_edit.emit(id.clone());
    }
  };
  let on_delete = {
    let id = row.id.clone();
    let on_delete =
      props.on_delete.clone();
    move |e: MouseEvent| {
      e.stop_propagation();
      on_delete.emit(id.clone());
    }
  };

  html! {
      <div class="row">
          <div class={dot_class}></div>
          <div>
              <div>{ &row.title }</div>
              <div class={description_class}>{ &row.description }</div>
              <div style="margin-top:4px;display:flex;gap:6px;flex-wrap:wrap;">
                  <span class="badge">{ row.status_label }</span>
                  <span class={priority_class}>{ row.priority_label }</span>
                  {
                      match &row.category_name {
                          Some(name) => html! { <span class="badge">{ name }</span> },
                          None => html! {},
                      }
                  }
              </div>
          </div>
          <div class="row-actions">
              <span class="badge">{ format!("due:{}", row.due) }</span>
              {
                  if row.can_complete {
                      html! { <button class="btn" onclick={on_complete}>{ "Complete" }</button> }
                  } else {
                      html! {}
                  }
              }
              <button class="btn" onclick={on_edit}>{ "Edit" }</button>
              <button class="btn danger" onclick={on_delete}>{ "Delete" }</button>
          </div>
      </div>
  }
}
