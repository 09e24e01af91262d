use yew::{
  Callback,
  Html,
  MouseEvent,
  Properties,
  function_component,
  html
};

#[derive(Properties, PartialEq)]
pub struct BoardHeaderProps {
  pub title:           String,
  pub username:        Option<String>,
  pub on_logout_click:
    Callback<MouseEvent>
}

#[function_component(BoardHeader)]
pub fn board_header(
  props: &BoardHeaderProps
) -> Html {
  html! {
      <div class="board-header">
          <span class="board-title">{ props.title.clone() }</span>
          <span class="board-user">
              { props.username.clone().unwrap_or_default() }
          </span>
          <button class="btn" onclick={props.on_logout_click.clone()}>{ "Sign out" }</button>
      </div>
  }
}
