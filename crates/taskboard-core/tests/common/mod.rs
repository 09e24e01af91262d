#![allow(dead_code)]

use std::cell::RefCell;
use std::future::Future;
use std::rc::Rc;

use async_trait::async_trait;
use futures::channel::oneshot;
use futures::executor::LocalPool;
use futures::task::LocalSpawnExt;
use serde_json::{Value, json};
use taskboard_core::edit::EditPhase;
use taskboard_core::render::{CategoryView, FormView, StatusCounts};
use taskboard_core::{
    ApiRequest, Board, BoardConfig, BoardError, Interaction, ListView, Renderer, Transport,
};
use taskboard_shared::{Envelope, keys};
use tracing_subscriber::EnvFilter;

pub type Reply = Result<Envelope, BoardError>;
type Responder = Box<dyn Fn(&ApiRequest) -> Reply>;

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

#[derive(Default)]
struct TransportState {
    sent: Vec<ApiRequest>,
    held: Vec<(ApiRequest, oneshot::Sender<Reply>)>,
    responder: Option<Responder>,
}

/// Records every request. Either answers immediately through a responder
/// or parks the request until the test releases it.
#[derive(Clone, Default)]
pub struct FakeTransport {
    state: Rc<RefCell<TransportState>>,
}

impl FakeTransport {
    pub fn held() -> Self {
        Self::default()
    }

    pub fn responding(responder: impl Fn(&ApiRequest) -> Reply + 'static) -> Self {
        let transport = Self::default();
        transport.state.borrow_mut().responder = Some(Box::new(responder));
        transport
    }

    pub fn sent(&self) -> Vec<ApiRequest> {
        self.state.borrow().sent.clone()
    }

    pub fn sent_urls(&self) -> Vec<String> {
        self.sent().into_iter().map(|request| request.url).collect()
    }

    pub fn held_count(&self) -> usize {
        self.state.borrow().held.len()
    }

    /// Answers the oldest parked request whose URL ends with `endpoint`.
    pub fn release(&self, endpoint: &str, reply: Reply) {
        let sender = {
            let mut state = self.state.borrow_mut();
            let index = state
                .held
                .iter()
                .position(|(request, _)| request.url.ends_with(endpoint))
                .expect("a parked request for the endpoint");
            state.held.remove(index).1
        };
        let _ = sender.send(reply);
    }
}

#[async_trait(?Send)]
impl Transport for FakeTransport {
    async fn send(&self, request: ApiRequest) -> Result<Envelope, BoardError> {
        let receiver = {
            let mut state = self.state.borrow_mut();
            state.sent.push(request.clone());
            if let Some(responder) = &state.responder {
                return responder(&request);
            }
            let (sender, receiver) = oneshot::channel();
            state.held.push((request, sender));
            receiver
        };
        receiver
            .await
            .unwrap_or_else(|_| Err(BoardError::transport("request dropped")))
    }
}

#[derive(Default)]
pub struct Painted {
    pub tasks: Vec<ListView>,
    pub categories: Vec<CategoryView>,
    pub forms: Vec<FormView>,
    pub users: Vec<String>,
    pub counts: Vec<StatusCounts>,
}

#[derive(Clone, Default)]
pub struct RecordingRenderer {
    painted: Rc<RefCell<Painted>>,
}

impl RecordingRenderer {
    pub fn last_tasks(&self) -> Option<ListView> {
        self.painted.borrow().tasks.last().cloned()
    }

    pub fn task_paints(&self) -> Vec<ListView> {
        self.painted.borrow().tasks.clone()
    }

    pub fn last_titles(&self) -> Vec<String> {
        match self.last_tasks() {
            Some(ListView::Tasks(tasks)) => tasks.into_iter().map(|task| task.title).collect(),
            other => panic!("expected a task list, got {other:?}"),
        }
    }

    pub fn last_form(&self) -> FormView {
        self.painted.borrow().forms.last().cloned().unwrap_or_default()
    }

    pub fn last_categories(&self) -> Option<CategoryView> {
        self.painted.borrow().categories.last().cloned()
    }

    pub fn users(&self) -> Vec<String> {
        self.painted.borrow().users.clone()
    }

    pub fn last_counts(&self) -> Option<StatusCounts> {
        self.painted.borrow().counts.last().cloned()
    }
}

impl Renderer for RecordingRenderer {
    fn paint_tasks(&self, view: &ListView) {
        self.painted.borrow_mut().tasks.push(view.clone());
    }

    fn paint_categories(&self, view: &CategoryView) {
        self.painted.borrow_mut().categories.push(view.clone());
    }

    fn paint_form(&self, form: &FormView) {
        self.painted.borrow_mut().forms.push(form.clone());
    }

    fn paint_user(&self, username: &str) {
        self.painted.borrow_mut().users.push(username.to_string());
    }

    fn paint_counts(&self, counts: &StatusCounts) {
        self.painted.borrow_mut().counts.push(counts.clone());
    }
}

#[derive(Default)]
struct DialogState {
    alerts: Vec<String>,
    confirms: Vec<String>,
    navigations: Vec<String>,
    answer: bool,
}

#[derive(Clone, Default)]
pub struct ScriptedDialogs {
    state: Rc<RefCell<DialogState>>,
}

impl ScriptedDialogs {
    pub fn answer(&self, yes: bool) {
        self.state.borrow_mut().answer = yes;
    }

    pub fn alerts(&self) -> Vec<String> {
        self.state.borrow().alerts.clone()
    }

    pub fn confirms(&self) -> Vec<String> {
        self.state.borrow().confirms.clone()
    }

    pub fn navigations(&self) -> Vec<String> {
        self.state.borrow().navigations.clone()
    }
}

impl Interaction for ScriptedDialogs {
    fn alert(&self, message: &str) {
        self.state.borrow_mut().alerts.push(message.to_string());
    }

    fn confirm(&self, message: &str) -> bool {
        let mut state = self.state.borrow_mut();
        state.confirms.push(message.to_string());
        state.answer
    }

    fn navigate(&self, url: &str) {
        self.state.borrow_mut().navigations.push(url.to_string());
    }
}

pub type TestBoard = Board<FakeTransport, RecordingRenderer, ScriptedDialogs>;

pub fn quiet_config() -> BoardConfig {
    BoardConfig {
        count_statuses: false,
        ..BoardConfig::default()
    }
}

pub fn board_with(
    config: BoardConfig,
    transport: FakeTransport,
) -> (Rc<TestBoard>, ScriptedDialogs) {
    init_tracing();
    let dialogs = ScriptedDialogs::default();
    let board = Board::new(
        config,
        transport,
        RecordingRenderer::default(),
        dialogs.clone(),
    );
    (Rc::new(board), dialogs)
}

pub fn board(transport: FakeTransport) -> (Rc<TestBoard>, ScriptedDialogs) {
    board_with(quiet_config(), transport)
}

pub fn spawn(pool: &LocalPool, future: impl Future<Output = ()> + 'static) {
    pool.spawner()
        .spawn_local(future)
        .expect("spawn board operation");
}

pub fn task_json(id: i64, title: &str) -> Value {
    json!({
        "taskId": id,
        "title": title,
        "description": "",
        "categoryId": 7,
        "categoryName": "Home",
        "dueDate": "2024-03-05",
        "status": 0,
        "priority": 2
    })
}

pub fn tasks_reply(tasks: &[(i64, &str)]) -> Reply {
    let tasks: Vec<Value> = tasks
        .iter()
        .map(|(id, title)| task_json(*id, title))
        .collect();
    Ok(Envelope::ok().with(keys::TASKS, tasks))
}

pub fn form_is_closed(form: &FormView) -> bool {
    form.phase == EditPhase::Closed && !form.is_visible()
}
