use taskboard_core::render::{
  CategoryView,
  FormView,
  StatusCounts
};
use taskboard_core::{
  Interaction,
  ListView,
  Renderer
};
use yew::UseStateHandle;

use crate::app::ui_debug;

/// Paints by replacing Yew state; the
/// component re-renders from there.
#[derive(Clone)]
pub struct YewRenderer {
  pub tasks:      UseStateHandle<ListView>,
  pub categories:
    UseStateHandle<CategoryView>,
  pub form:       UseStateHandle<FormView>,
  pub user:
    UseStateHandle<Option<String>>,
  pub counts:
    UseStateHandle<Option<StatusCounts>>
}

impl Renderer for YewRenderer {
  fn paint_tasks(&self, view: &ListView) {
    let detail = match view {
      | ListView::Loading => {
        "loading".to_string()
      }
      | ListView::Tasks(tasks) => {
        format!("{} tasks", tasks.len())
      }
      | ListView::Empty => {
        "empty".to_string()
      }
      | ListView::Failed(err) => {
        format!("failed: {err}")
      }
    };
    ui_debug("paint.tasks", &detail);
    self.tasks.set(view.clone());
  }

  fn paint_categories(
    &self,
    view: &CategoryView
  ) {
    self.categories.set(view.clone());
  }

  fn paint_form(&self, form: &FormView) {
    ui_debug(
      "paint.form",
      &format!("{:?}", form.phase)
    );
    self.form.set(form.clone());
  }

  fn paint_user(&self, username: &str) {
    self
      .user
      .set(Some(username.to_string()));
  }

  fn paint_counts(
    &self,
    counts: &StatusCounts
  ) {
    self.counts.set(Some(counts.clone()));
  }
}

/// Native browser dialogs and page
/// navigation.
#[derive(Debug, Clone, Default)]
pub struct BrowserDialogs;

impl Interaction for BrowserDialogs {
  fn alert(&self, message: &str) {
    ui_debug("dialog.alert", message);
    gloo::dialogs::alert(message);
  }

  fn confirm(&self, message: &str) -> bool {
    let confirmed =
      gloo::dialogs::confirm(message);
    ui_debug(
      "dialog.confirm",
      &format!("{message} -> {confirmed}")
    );
    confirmed
  }

  fn navigate(&self, url: &str) {
    let result = web_sys::window()
      .map(|window| {
        window.location().set_href(url)
      });
    match result {
      | Some(Ok(())) => {
        tracing::info!(%url, "navigating away")
      }
      | Some(Err(err)) => {
        tracing::error!(%url, error = ?err, "navigation failed")
      }
      | None => {
        tracing::error!(%url, "no window to navigate")
      }
    }
  }
}
