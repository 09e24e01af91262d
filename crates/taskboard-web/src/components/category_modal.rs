use taskboard_shared::RecordId;
use web_sys::HtmlInputElement;
use yew::{
  Callback,
  Html,
  InputEvent,
  Properties,
  SubmitEvent,
  TargetCast,
  function_component,
  html
};

/// Open category dialog. `id` is set
/// when renaming.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CategoryDraft {
  pub id:   Option<RecordId>,
  pub name: String
}

#[derive(Properties, PartialEq)]
pub struct CategoryModalProps {
  pub draft:     CategoryDraft,
  pub busy:      bool,
  pub on_input:  Callback<String>,
  pub on_submit: Callback<()>,
  pub on_cancel: Callback<()>
}

#[function_component(CategoryModal)]
pub fn category_modal(
  props: &CategoryModalProps
) -> Html {
  let title = if props.draft.id.is_some() {
    "Rename category"
  } else {
    "New category"
  };
  let on_input = {
    let on_input = props.on_input.clone();
    Callback::from(move |e: InputEvent| {
      let input: HtmlInputElement =
        e.target_unchecked_into();
      on_input.emit(input.value());
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

  html! {
      <div class="modal-backdrop">
          <form class="modal" onsubmit={on_submit}>
              <div class="header">{ title }</div>
              <label>{ "Name" }</label>
              <input
                  type="text"
                  value={props.draft.name.clone()}
                  disabled={props.busy}
                  oninput={on_input}
              />
              <div class="modal-actions">
                  <button type="button" class="btn" onclick={on_cancel}>{ "Cancel" }</button>
                  <button type="submit" class="btn primary" disabled={props.busy}>{ "Save" }</button>
              </div>
          </form>
      </div>
  }
}
