mod common;

use futures::executor::block_on;
use rstest::rstest;
use serde_json::json;
use taskboard_core::client::endpoints;
use taskboard_core::mutation::TaskFields;
use taskboard_core::{BoardError, ErrorKind, FetchRequest, Method, ResourceClient};
use taskboard_shared::{Envelope, RecordId, TaskPriority, TaskStatus, fields, keys};

use common::{FakeTransport, init_tracing, task_json, tasks_reply};

fn client(transport: FakeTransport) -> ResourceClient<FakeTransport> {
    init_tracing();
    ResourceClient::new(transport, "/taskmanager/")
}

#[rstest]
#[case(FetchRequest::All, endpoints::TASK_LIST, None)]
#[case(FetchRequest::OrderedByPriority, endpoints::TASK_PRIORITY_ORDER, None)]
#[case(
    FetchRequest::Category(RecordId::new("7")),
    endpoints::TASK_BY_CATEGORY,
    Some((fields::CATEGORY_ID, "7"))
)]
#[case(
    FetchRequest::Status(TaskStatus::InProgress),
    endpoints::TASK_BY_STATUS,
    Some((fields::STATUS, "1"))
)]
#[case(
    FetchRequest::Priority(TaskPriority::Urgent),
    endpoints::TASK_BY_PRIORITY,
    Some((fields::PRIORITY, "4"))
)]
#[case(
    FetchRequest::Search("milk".to_string()),
    endpoints::TASK_SEARCH,
    Some((fields::KEYWORD, "milk"))
)]
fn each_fetch_hits_one_endpoint(
    #[case] fetch: FetchRequest,
    #[case] endpoint: &str,
    #[case] param: Option<(&str, &str)>,
) {
    let transport = FakeTransport::responding(|_| tasks_reply(&[(1, "Mow lawn")]));
    let client = client(transport.clone());

    let tasks = block_on(client.list_tasks(&fetch)).expect("tasks");

    assert_eq!(tasks.len(), 1);
    let sent = transport.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].method, Method::Get);
    assert_eq!(sent[0].url, format!("/taskmanager/{endpoint}"));
    match param {
        Some((name, value)) => {
            assert_eq!(sent[0].params.len(), 1);
            assert_eq!(sent[0].param(name), Some(value));
        }
        None => assert!(sent[0].params.is_empty()),
    }
}

#[test]
fn missing_task_list_means_no_tasks() {
    let client = client(FakeTransport::responding(|_| Ok(Envelope::ok())));

    let tasks = block_on(client.list_tasks(&FetchRequest::All)).expect("tasks");

    assert!(tasks.is_empty());
}

#[test]
fn unsuccessful_envelope_carries_store_message() {
    let client = client(FakeTransport::responding(|_| {
        Ok(Envelope::failure("category name already exists"))
    }));

    let err = block_on(client.create_category("Home")).expect_err("store refused");

    assert_eq!(err, BoardError::application("category name already exists"));
    assert_eq!(err.kind(), ErrorKind::Application);
}

#[test]
fn malformed_task_fails_the_whole_list() {
    let client = client(FakeTransport::responding(|_| {
        let mut broken = task_json(2, "No category");
        broken["categoryId"] = json!(null);
        Ok(Envelope::ok().with(keys::TASKS, vec![task_json(1, "Mow lawn"), broken]))
    }));

    let err = block_on(client.list_tasks(&FetchRequest::All)).expect_err("bad record");

    assert_eq!(err.kind(), ErrorKind::Transport);
}

#[test]
fn millisecond_due_dates_are_read_as_calendar_days() {
    let client = client(FakeTransport::responding(|_| {
        let mut task = task_json(1, "Mow lawn");
        // 2024-03-05T12:00:00Z
        task["dueDate"] = json!(1_709_640_000_000_i64);
        Ok(Envelope::ok().with(keys::TASK, task))
    }));

    let task = block_on(client.task_detail(&RecordId::new("1"))).expect("detail");

    assert_eq!(task.due_date.to_string(), "2024-03-05");
}

#[test]
fn update_posts_form_with_task_id() {
    let transport = FakeTransport::responding(|_| Ok(Envelope::ok()));
    let client = client(transport.clone());
    let fields_in = TaskFields {
        title: "Call plumber".to_string(),
        description: "kitchen sink".to_string(),
        category_id: RecordId::new("7"),
        due_date: "2024-03-05".to_string(),
        priority: TaskPriority::Medium,
    };

    block_on(client.update_task(&RecordId::new("3"), &fields_in)).expect("updated");

    let sent = transport.sent();
    assert_eq!(sent[0].method, Method::Post);
    assert_eq!(sent[0].url, format!("/taskmanager/{}", endpoints::TASK_UPDATE));
    assert_eq!(sent[0].param(fields::TASK_ID), Some("3"));
    assert_eq!(sent[0].param(fields::TASK_NAME), Some("Call plumber"));
    assert_eq!(sent[0].param(fields::DESCRIPTION), Some("kitchen sink"));
    assert_eq!(sent[0].param(fields::CATEGORY_ID), Some("7"));
    assert_eq!(sent[0].param(fields::DUE_DATE), Some("2024-03-05"));
    assert_eq!(sent[0].param(fields::PRIORITY), Some("2"));
}

#[test]
fn refused_user_info_means_signed_out() {
    let client = client(FakeTransport::responding(|_| {
        Ok(Envelope::failure("not logged in"))
    }));

    let err = block_on(client.current_user()).expect_err("no session");

    assert_eq!(err, BoardError::Unauthenticated);
}

#[test]
fn transport_failures_pass_through() {
    let client = client(FakeTransport::responding(|_| {
        Err(BoardError::transport("connection reset"))
    }));

    let err = block_on(client.count_tasks(TaskStatus::Open)).expect_err("offline");

    assert_eq!(err.kind(), ErrorKind::Transport);
}

#[test]
fn category_name_check_reads_exists_flag() {
    let transport =
        FakeTransport::responding(|_| Ok(Envelope::ok().with(keys::EXISTS, false)));
    let client = client(transport.clone());

    let exists = block_on(client.category_exists("Garden")).expect("checked");

    assert!(!exists);
    assert_eq!(transport.sent()[0].param(fields::CATEGORY_NAME), Some("Garden"));
}
