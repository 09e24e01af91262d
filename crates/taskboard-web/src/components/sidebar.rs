use taskboard_core::Selection;
use taskboard_core::model::Category;
use taskboard_core::render::{
  CategoryView,
  StatusCounts
};
use taskboard_shared::{
  RecordId,
  TaskStatus
};
use yew::{
  Callback,
  Html,
  MouseEvent,
  Properties,
  function_component,
  html
};

#[derive(Properties, PartialEq)]
pub struct SidebarProps {
  pub categories:        CategoryView,
  pub active:            Option<RecordId>,
  pub counts:            Option<StatusCounts>,
  pub no_categories:     String,
  pub categories_failed: String,
  pub on_select:         Callback<Selection>,
  pub on_new_category:   Callback<()>,
  pub on_rename:         Callback<Category>
}

#[function_component(Sidebar)]
pub fn sidebar(
  props: &SidebarProps
) -> Html {
  let make_item = |category: &Category| {
    let active = props.active.as_ref()
      == Some(&category.id);
    let class = if active {
      "item active"
    } else {
      "item"
    };
    let on_select = props.on_select.clone();
    let on_rename = props.on_rename.clone();
    let id = category.id.clone();
    let for_rename = category.clone();
    html! {
        <div class={class} onclick={move |_| on_select.emit(Selection::ByCategory(id.clone()))}>
            <span>{ &category.name }</span>
            <button
                class="btn ghost"
                onclick={move |e: MouseEvent| {
                    e.stop_propagation();
                    on_rename.emit(for_rename.clone());
                }}
            >
                { "Rename" }
            </button>
        </div>
    }
  };

  let all_class = if props.active.is_none() {
    "item active"
  } else {
    "item"
  };
  let on_all = {
    let on_select = props.on_select.clone();
    move |_| on_select.emit(Selection::AllTasks)
  };
  let on_new_category = {
    let on_new_category =
      props.on_new_category.clone();
    move |_| on_new_category.emit(())
  };

  html! {
      <div class="panel sidebar">
          <div class="header">{ "Categories" }</div>
          <div class={all_class} onclick={on_all}>{ "All tasks" }</div>
          {
              match &props.categories {
                  CategoryView::Categories(categories) => html! {
                      <>{ for categories.iter().map(make_item) }</>
                  },
                  CategoryView::Empty => html! {
                      <div class="placeholder">{ &props.no_categories }</div>
                  },
                  CategoryView::Failed => html! {
                      <div class="placeholder error">{ &props.categories_failed }</div>
                  },
              }
          }
          <button class="btn" onclick={on_new_category}>{ "New category" }</button>
          {
              match &props.counts {
                  Some(counts) => html! {
                      <div class="counts">
                          {
                              for TaskStatus::ALL.into_iter().map(|status| html! {
                                  <div class="count-line">
                                      <span>{ status.label() }</span>
                                      <span class="badge">{ counts.get(status).to_string() }</span>
                                  </div>
                              })
                          }
                      </div>
                  },
                  None => html! {},
              }
          }
      </div>
  }
}
