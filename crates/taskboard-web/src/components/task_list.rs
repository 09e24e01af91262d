use taskboard_core::ListView;
use taskboard_core::render::TaskRow;
use taskboard_shared::RecordId;
use yew::{
  Callback,
  Html,
  Properties,
  function_component,
  html
};

use super::TaskListRow;

#[derive(Properties, PartialEq)]
pub struct TaskListProps {
  pub view:        ListView,
  pub rows:        Vec<TaskRow>,
  /// Loading / empty / failed text.
  pub placeholder: Option<String>,
  pub on_complete: Callback<RecordId>,
  pub on_edit:     Callback<RecordId>,
  pub on_delete:   Callback<RecordId>
}

#[function_component(TaskList)]
pub fn task_list(
  props: &TaskListProps
) -> Html {
  let placeholder_class =
    match props.view {
      | ListView::Failed(_) => {
        "placeholder error"
      }
      | _ => "placeholder"
    };

  html! {
      <div class="panel list">
          <div class="header">{ "Tasks" }</div>
          {
              match &props.placeholder {
                  Some(text) => html! { <div class={placeholder_class}>{ text }</div> },
                  None => html! {
                      <>
                          {
                              for props.rows.iter().cloned().map(|row| html! {
                                  <TaskListRow
                                      key={row.id.to_string()}
                                      row={row.clone()}
                                      on_complete={props.on_complete.clone()}
                                      on_edit={props.on_edit.clone()}
                                      on_delete={props.on_delete.clone()}
                                  />
                              })
                          }
                      </>
                  },
              }
          }
      </div>
  }
}
