use std::cell::RefCell;
use std::time::Duration;

use chrono::NaiveDate;
use taskboard_shared::{
  RecordId,
  TaskStatus
};
use tracing::{
  debug,
  error,
  info,
  instrument,
  warn
};

use crate::client::{
  ResourceClient,
  Transport
};
use crate::config::BoardConfig;
use crate::debounce::SearchDebouncer;
use crate::edit::{
  DetailOutcome,
  EditSession
};
use crate::error::{
  BoardError,
  ErrorKind
};
use crate::filter::{
  FilterState,
  Selection,
  SortMode
};
use crate::mutation::{
  MutationCoordinator,
  MutationOutcome,
  TaskDraft
};
use crate::reconciler::{
  FetchTicket,
  Reconciler,
  ViewEffect,
  ViewMsg,
  ViewPhase
};
use crate::render::{
  CategoryView,
  FormView,
  Interaction,
  Renderer,
  StatusCounts
};

/// Wires the reconciler, the edit
/// session and the mutation coordinator
/// to a transport, a renderer and the
/// user's dialogs.
///
/// Everything runs on one thread.
/// Operations take `&self` so several
/// can be in flight at once; no
/// `RefCell` borrow is held across an
/// `.await`.
pub struct Board<T, R, I> {
  config:      BoardConfig,
  client:      ResourceClient<T>,
  renderer:    R,
  interaction: I,
  view:        RefCell<Reconciler>,
  session:     RefCell<EditSession>,
  debouncer:   RefCell<SearchDebouncer>
}

impl<T, R, I> Board<T, R, I>
where
  T: Transport,
  R: Renderer,
  I: Interaction
{
  pub fn new(
    config: BoardConfig,
    transport: T,
    renderer: R,
    interaction: I
  ) -> Self {
    let client = ResourceClient::new(
      transport,
      config.base_url.clone()
    );
    let debouncer = SearchDebouncer::new(
      config.search_debounce()
    );
    Self {
      config,
      client,
      renderer,
      interaction,
      view: RefCell::new(Reconciler::new()),
      session: RefCell::new(
        EditSession::new()
      ),
      debouncer: RefCell::new(debouncer)
    }
  }

  pub fn config(&self) -> &BoardConfig {
    &self.config
  }

  pub fn client(
    &self
  ) -> &ResourceClient<T> {
    &self.client
  }

  pub fn renderer(&self) -> &R {
    &self.renderer
  }

  pub fn filter(&self) -> FilterState {
    self.view.borrow().filter().clone()
  }

  pub fn phase(&self) -> ViewPhase {
    self.view.borrow().phase()
  }

  pub fn form(&self) -> FormView {
    FormView::from(&*self.session.borrow())
  }

  /// User check, categories, first list.
  /// Returns `false` when the session
  /// is gone and the page navigated to
  /// the login screen.
  #[instrument(skip(self))]
  pub async fn start(&self) -> bool {
    info!("starting task board");
    if !self.load_user().await {
      return false;
    }
    self.load_categories().await;
    self.refresh().await;
    self.load_counts().await;
    true
  }

  #[instrument(skip(self))]
  pub async fn load_user(&self) -> bool {
    match self.client.current_user().await
    {
      | Ok(user) => {
        debug!(username = %user.username, "signed in");
        self
          .renderer
          .paint_user(&user.username);
        true
      }
      | Err(BoardError::Unauthenticated) => {
        let url = self.config.login_url();
        warn!(%url, "not signed in; leaving board");
        self.interaction.navigate(&url);
        false
      }
      | Err(err) => {
        error!(error = %err, "loading user info failed");
        self.interaction.alert(
          &self
            .config
            .messages
            .user_info_failed
        );
        true
      }
    }
  }

  #[instrument(skip(self))]
  pub async fn load_categories(&self) {
    let view = match self
      .client
      .list_categories()
      .await
    {
      | Ok(categories)
        if categories.is_empty() =>
      {
        CategoryView::Empty
      }
      | Ok(categories) => {
        debug!(
          count = categories.len(),
          "categories loaded"
        );
        CategoryView::Categories(categories)
      }
      | Err(err) => {
        error!(error = %err, "loading categories failed");
        CategoryView::Failed
      }
    };
    self.renderer.paint_categories(&view);
  }

  /// Status summary. A failed count
  /// leaves the previous summary up.
  #[instrument(skip(self))]
  pub async fn load_counts(&self) {
    if !self.config.count_statuses {
      return;
    }
    let mut counts = StatusCounts::default();
    for status in TaskStatus::ALL {
      match self
        .client
        .count_tasks(status)
        .await
      {
        | Ok(count) => {
          counts.0.insert(status, count);
        }
        | Err(err) => {
          warn!(error = %err, ?status, "task count failed");
          return;
        }
      }
    }
    self.renderer.paint_counts(&counts);
  }

  pub async fn select(
    &self,
    selection: Selection
  ) {
    self
      .dispatch(ViewMsg::Select(selection))
      .await;
  }

  pub async fn sort(&self, sort: SortMode) {
    self.dispatch(ViewMsg::Sort(sort)).await;
  }

  /// Re-runs whatever filter is active.
  pub async fn refresh(&self) {
    self.dispatch(ViewMsg::Refresh).await;
  }

  /// Applies the reconciler's effects in
  /// the order it emitted them.
  async fn dispatch(&self, msg: ViewMsg) {
    let effects =
      self.view.borrow_mut().handle(msg);
    for effect in effects {
      match effect {
        | ViewEffect::Paint(view) => {
          self.renderer.paint_tasks(&view)
        }
        | ViewEffect::Fetch(ticket) => {
          self.run_fetch(ticket).await
        }
      }
    }
  }

  #[instrument(skip(self, ticket), fields(seq = ticket.seq))]
  async fn run_fetch(
    &self,
    ticket: FetchTicket
  ) {
    let result = self
      .client
      .list_tasks(&ticket.request)
      .await;
    match &result {
      | Err(err)
        if err.kind()
          == ErrorKind::Transport =>
      {
        error!(error = %err, request = ?ticket.request, "task fetch transport failure");
      }
      | _ => {}
    }

    let painted = self
      .view
      .borrow_mut()
      .complete(ticket.seq, result);
    match painted {
      | Some(view) => {
        self.renderer.paint_tasks(&view)
      }
      | None => {
        debug!("fetch superseded; not painting")
      }
    }
  }

  /// Records a keystroke in the search
  /// box. The host arms a timer for
  /// [`Self::search_delay`] and calls
  /// [`Self::search_timer_fired`] with
  /// the returned generation.
  pub fn search_input(
    &self,
    text: &str
  ) -> u64 {
    self.debouncer.borrow_mut().input(text)
  }

  pub fn search_delay(&self) -> Duration {
    self.debouncer.borrow().delay()
  }

  pub async fn search_timer_fired(
    &self,
    generation: u64
  ) {
    let keyword = self
      .debouncer
      .borrow_mut()
      .fire(generation);
    if let Some(keyword) = keyword {
      self
        .select(Selection::BySearch(
          keyword
        ))
        .await;
    }
  }

  /// Picking any other control drops a
  /// half-typed search.
  pub fn cancel_search(&self) {
    self.debouncer.borrow_mut().cancel();
  }

  #[instrument(skip(self), fields(task_id = %task_id))]
  pub async fn complete_task(
    &self,
    task_id: &RecordId
  ) {
    let result =
      MutationCoordinator::new(&self.client)
        .complete_task(task_id)
        .await;
    self.after_mutation(result).await;
  }

  #[instrument(skip(self), fields(task_id = %task_id))]
  pub async fn delete_task(
    &self,
    task_id: &RecordId
  ) {
    let prompt = self
      .config
      .messages
      .confirm_delete
      .clone();
    let result =
      MutationCoordinator::new(&self.client)
        .delete_task(task_id, || {
          self.interaction.confirm(&prompt)
        })
        .await;
    self.after_mutation(result).await;
  }

  pub fn open_new_task(
    &self,
    today: NaiveDate
  ) {
    self.session.borrow_mut().open_new(today);
    self.paint_form();
  }

  #[instrument(skip(self), fields(task_id = %task_id))]
  pub async fn open_edit_task(
    &self,
    task_id: RecordId
  ) {
    let ticket = self
      .session
      .borrow_mut()
      .open_edit(task_id);
    self.paint_form();

    let result = self
      .client
      .task_detail(&ticket.task_id)
      .await;
    let outcome = self
      .session
      .borrow_mut()
      .detail_loaded(&ticket, result);

    match outcome {
      | DetailOutcome::Populated => {
        self.paint_form()
      }
      | DetailOutcome::Stale => {}
      | DetailOutcome::Closed(err) => {
        error!(error = %err, "task detail fetch failed");
        self.paint_form();
        self
          .interaction
          .alert(&self.message_for(&err));
      }
    }
  }

  pub fn edit_form(
    &self,
    apply: impl FnOnce(&mut TaskDraft)
  ) {
    self.session.borrow_mut().edit(apply);
    self.paint_form();
  }

  pub fn cancel_form(&self) {
    self.session.borrow_mut().cancel();
    self.paint_form();
  }

  /// Creates or updates depending on
  /// whether the form carries an id.
  #[instrument(skip(self))]
  pub async fn submit_form(&self) {
    let draft =
      self.session.borrow_mut().begin_submit();
    let Some(draft) = draft else {
      return;
    };
    self.paint_form();

    let result =
      MutationCoordinator::new(&self.client)
        .submit_task(&draft)
        .await;

    match result {
      | Ok(_) => {
        self
          .session
          .borrow_mut()
          .submit_finished(Ok(()));
        self.paint_form();
        self.refresh().await;
        self.load_counts().await;
      }
      | Err(err) => {
        let message = self.message_for(&err);
        warn!(error = %err, "task submit failed");
        self
          .session
          .borrow_mut()
          .submit_finished(Err(message.clone()));
        self.paint_form();
        self.interaction.alert(&message);
      }
    }
  }

  /// Returns `true` when the category
  /// was saved.
  #[instrument(skip(self))]
  pub async fn submit_category(
    &self,
    category_id: Option<RecordId>,
    name: &str
  ) -> bool {
    let coordinator =
      MutationCoordinator::new(&self.client);
    let result = match category_id
      .filter(|id| !id.is_empty())
    {
      | Some(id) => {
        coordinator
          .update_category(&id, name)
          .await
      }
      | None => {
        coordinator
          .create_category(
            name,
            &self.config.messages.category_exists
          )
          .await
      }
    };

    match result {
      | Ok(_) => {
        self.load_categories().await;
        self.refresh().await;
        true
      }
      | Err(err) => {
        warn!(error = %err, "category submit failed");
        self
          .interaction
          .alert(&self.message_for(&err));
        false
      }
    }
  }

  #[instrument(skip(self))]
  pub async fn logout(&self) {
    match self.client.logout().await {
      | Ok(()) => {
        info!("signed out");
        self
          .interaction
          .navigate(&self.config.login_url());
      }
      | Err(err) => {
        error!(error = %err, "logout failed");
        self.interaction.alert(
          &self.config.messages.logout_failed
        );
      }
    }
  }

  async fn after_mutation(
    &self,
    result: Result<
      MutationOutcome,
      BoardError
    >
  ) {
    match result {
      | Ok(MutationOutcome::Applied) => {
        self.refresh().await;
        self.load_counts().await;
      }
      | Ok(MutationOutcome::Cancelled) => {}
      | Err(err) => {
        warn!(error = %err, "mutation failed");
        self
          .interaction
          .alert(&self.message_for(&err));
      }
    }
  }

  fn message_for(
    &self,
    err: &BoardError
  ) -> String {
    let messages = &self.config.messages;
    let required = match err {
      | BoardError::Validation {
        field: "categoryName"
      } => &messages.category_required,
      | _ => &messages.required_fields
    };
    err.user_message(
      &messages.generic_failure,
      required
    )
  }

  fn paint_form(&self) {
    let form = self.form();
    self.renderer.paint_form(&form);
  }
}
