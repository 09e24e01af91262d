use std::future::Future;
use std::rc::Rc;

use chrono::Local;
use gloo::console::log;
use gloo::timers::callback::Timeout;
use taskboard_core::model::Category;
use taskboard_core::render::{
  CategoryView,
  FormView,
  StatusCounts,
  placeholder_text,
  task_row
};
use taskboard_core::{
  Board,
  BoardConfig,
  ListView,
  Selection,
  SortMode
};
use taskboard_shared::RecordId;
use yew::{
  Callback,
  Html,
  MouseEvent,
  function_component,
  html,
  use_effect_with,
  use_memo,
  use_mut_ref,
  use_state
};

use crate::bridge::{
  BrowserDialogs,
  YewRenderer
};
use crate::components::{
  BoardHeader,
  CategoryDraft,
  CategoryModal,
  FilterToolbar,
  FormEdit,
  Sidebar,
  TaskList,
  TaskModal
};
use crate::http::HttpTransport;

const BOARD_CONFIG_TOML: &str =
  include_str!("../assets/taskboard.toml");

type WebBoard = Board<
  HttpTransport,
  YewRenderer,
  BrowserDialogs
>;

/// Runs one board operation in the
/// background.
fn run<F, Fut>(
  board: &Rc<WebBoard>,
  operation: F
) where
  F: FnOnce(Rc<WebBoard>) -> Fut,
  Fut: Future<Output = ()> + 'static
{
  wasm_bindgen_futures::spawn_local(
    operation(board.clone())
  );
}

#[function_component(App)]
pub fn app() -> Html {
  let tasks =
    use_state(|| ListView::Loading);
  let categories =
    use_state(|| CategoryView::Empty);
  let form = use_state(FormView::default);
  let user = use_state(|| None::<String>);
  let counts =
    use_state(|| None::<StatusCounts>);
  let search = use_state(String::new);
  let category_draft =
    use_state(|| None::<CategoryDraft>);
  let category_busy = use_state(|| false);
  let search_timer =
    use_mut_ref(|| None::<Timeout>);

  let board = {
    let renderer = YewRenderer {
      tasks:      tasks.clone(),
      categories: categories.clone(),
      form:       form.clone(),
      user:       user.clone(),
      counts:     counts.clone()
    };
    use_memo((), move |_| {
      let config =
        BoardConfig::load_or_default(
          BOARD_CONFIG_TOML
        );
      Board::new(
        config,
        HttpTransport,
        renderer,
        BrowserDialogs
      )
    })
  };

  {
    let board = board.clone();
    use_effect_with((), move |_| {
      ui_debug(
        "app.mounted",
        "frontend mounted and hooks \
         initialized"
      );
      run(&board, |board| async move {
        let stayed = board.start().await;
        tracing::info!(stayed, "board start finished");
      });
      || ()
    });
  }

  let on_search_input = {
    let board = board.clone();
    let search = search.clone();
    let search_timer = search_timer.clone();
    Callback::from(move |text: String| {
      search.set(text.clone());
      let generation =
        board.search_input(&text);
      let delay = u32::try_from(
        board.search_delay().as_millis()
      )
      .unwrap_or(u32::MAX);
      let board = board.clone();
      let timeout =
        Timeout::new(delay, move || {
          run(&board, |board| async move {
            board
              .search_timer_fired(generation)
              .await
          });
        });
      // Replacing the handle drops and
      // cancels the previous timer.
      *search_timer.borrow_mut() =
        Some(timeout);
    })
  };

  let on_select = {
    let board = board.clone();
    let search = search.clone();
    let search_timer = search_timer.clone();
    Callback::from(
      move |selection: Selection| {
        ui_debug(
          "filter.select",
          &format!("{selection:?}")
        );
        search_timer.borrow_mut().take();
        board.cancel_search();
        search.set(String::new());
        run(&board, |board| async move {
          board.select(selection).await
        });
      }
    )
  };

  let on_sort = {
    let board = board.clone();
    Callback::from(move |sort: SortMode| {
      ui_debug(
        "filter.sort",
        &format!("{sort:?}")
      );
      run(&board, |board| async move {
        board.sort(sort).await
      });
    })
  };

  let on_complete = {
    let board = board.clone();
    Callback::from(move |id: RecordId| {
      ui_debug("task.complete", id.as_str());
      run(&board, |board| async move {
        board.complete_task(&id).await
      });
    })
  };

  let on_delete = {
    let board = board.clone();
    Callback::from(move |id: RecordId| {
      ui_debug("task.delete", id.as_str());
      run(&board, |board| async move {
        board.delete_task(&id).await
      });
    })
  };

  let on_edit = {
    let board = board.clone();
    Callback::from(move |id: RecordId| {
      ui_debug("task.edit", id.as_str());
      run(&board, |board| async move {
        board.open_edit_task(id).await
      });
    })
  };

  let on_new_task = {
    let board = board.clone();
    Callback::from(move |()| {
      ui_debug(
        "task.new",
        "opening empty task form"
      );
      board.open_new_task(
        Local::now().date_naive()
      );
    })
  };

  let on_form_change = {
    let board = board.clone();
    Callback::from(move |edit: FormEdit| {
      board.edit_form(|draft| {
        edit.apply(draft)
      });
    })
  };

  let on_form_submit = {
    let board = board.clone();
    Callback::from(move |()| {
      ui_debug(
        "button.save.click",
        "save click fired"
      );
      run(&board, |board| async move {
        board.submit_form().await
      });
    })
  };

  let on_form_cancel = {
    let board = board.clone();
    Callback::from(move |()| {
      board.cancel_form()
    })
  };

  let on_new_category = {
    let category_draft =
      category_draft.clone();
    Callback::from(move |()| {
      category_draft
        .set(Some(CategoryDraft::default()));
    })
  };

  let on_rename_category = {
    let category_draft =
      category_draft.clone();
    Callback::from(
      move |category: Category| {
        category_draft.set(Some(
          CategoryDraft {
            id:   Some(category.id),
            name: category.name
          }
        ));
      }
    )
  };

  let on_category_input = {
    let category_draft =
      category_draft.clone();
    Callback::from(move |name: String| {
      if let Some(current) =
        (*category_draft).clone()
      {
        category_draft.set(Some(
          CategoryDraft {
            name,
            ..current
          }
        ));
      }
    })
  };

  let on_category_submit = {
    let board = board.clone();
    let category_draft =
      category_draft.clone();
    let category_busy =
      category_busy.clone();
    Callback::from(move |()| {
      if *category_busy {
        return;
      }
      let Some(draft) =
        (*category_draft).clone()
      else {
        return;
      };
      category_busy.set(true);
      let category_draft =
        category_draft.clone();
      let category_busy =
        category_busy.clone();
      run(&board, |board| async move {
        let saved = board
          .submit_category(
            draft.id,
            &draft.name
          )
          .await;
        category_busy.set(false);
        if saved {
          category_draft.set(None);
        }
      });
    })
  };

  let on_category_cancel = {
    let category_draft =
      category_draft.clone();
    Callback::from(move |()| {
      category_draft.set(None)
    })
  };

  let on_logout_click = {
    let board = board.clone();
    Callback::from(move |_: MouseEvent| {
      ui_debug("user.logout", "sign out");
      run(&board, |board| async move {
        board.logout().await
      });
    })
  };

  let config = board.config();
  let filter = board.filter();
  let rows = match &*tasks {
    | ListView::Tasks(list) => {
      list
        .iter()
        .map(|task| task_row(task, config))
        .collect()
    }
    | _ => Vec::new()
  };
  let placeholder =
    placeholder_text(&tasks, config);
  let category_options =
    match &*categories {
      | CategoryView::Categories(list) => {
        list.clone()
      }
      | _ => Vec::new()
    };

  html! {
      <div class="app">
          <BoardHeader
              title={"Task board".to_string()}
              username={(*user).clone()}
              on_logout_click={on_logout_click}
          />
          <div class="board">
              <Sidebar
                  categories={(*categories).clone()}
                  active={filter.active_category().cloned()}
                  counts={(*counts).clone()}
                  no_categories={config.messages.no_categories.clone()}
                  categories_failed={config.messages.categories_failed.clone()}
                  on_select={on_select.clone()}
                  on_new_category={on_new_category}
                  on_rename={on_rename_category}
              />
              <div class="main">
                  <FilterToolbar
                      search={(*search).clone()}
                      selection={filter.selection().clone()}
                      sort={filter.sort()}
                      on_search_input={on_search_input}
                      on_select={on_select}
                      on_sort={on_sort}
                      on_new_task={on_new_task}
                  />
                  <TaskList
                      view={(*tasks).clone()}
                      rows={rows}
                      placeholder={placeholder}
                      on_complete={on_complete}
                      on_edit={on_edit}
                      on_delete={on_delete}
                  />
              </div>
          </div>
          <TaskModal
              form={(*form).clone()}
              categories={category_options}
              on_change={on_form_change}
              on_submit={on_form_submit}
              on_cancel={on_form_cancel}
          />
          {
              match (*category_draft).clone() {
                  Some(draft) => html! {
                      <CategoryModal
                          draft={draft}
                          busy={*category_busy}
                          on_input={on_category_input}
                          on_submit={on_category_submit}
                          on_cancel={on_category_cancel}
                      />
                  },
                  None => html! {},
              }
          }
      </div>
  }
}

pub(crate) fn ui_debug(
  event: &str,
  detail: &str
) {
  tracing::debug!(
    event, detail, "ui-debug"
  );
  log!(format!(
    "[ui-debug] {event}: {detail}"
  ));
}
