use async_trait::async_trait;
use serde::de::DeserializeOwned;
use taskboard_shared::{
  CategoryDto,
  Envelope,
  RecordId,
  TaskDto,
  TaskStatus,
  UserDto,
  fields,
  keys
};
use tracing::{
  debug,
  instrument,
  warn
};

use crate::error::BoardError;
use crate::filter::FetchRequest;
use crate::model::{
  Category,
  Task,
  User,
  tasks_from_dtos
};
use crate::mutation::TaskFields;

pub mod endpoints {
  pub const TASK_LIST: &str =
    "api/task/list";
  pub const TASK_BY_CATEGORY: &str =
    "api/task/category";
  pub const TASK_BY_STATUS: &str =
    "api/task/status";
  pub const TASK_BY_PRIORITY: &str =
    "api/task/priority";
  pub const TASK_PRIORITY_ORDER: &str =
    "api/task/priorityOrder";
  pub const TASK_SEARCH: &str =
    "api/task/search";
  pub const TASK_DETAIL: &str =
    "api/task/detail";
  pub const TASK_COUNT: &str =
    "api/task/count";
  pub const TASK_CREATE: &str =
    "api/task/create";
  pub const TASK_UPDATE: &str =
    "api/task/update";
  pub const TASK_UPDATE_STATUS: &str =
    "api/task/updateStatus";
  pub const TASK_DELETE: &str =
    "api/task/delete";
  pub const CATEGORY_LIST: &str =
    "api/category/list";
  pub const CATEGORY_CREATE: &str =
    "api/category/create";
  pub const CATEGORY_UPDATE: &str =
    "api/category/update";
  pub const CATEGORY_CHECK_NAME: &str =
    "api/category/checkName";
  pub const USER_INFO: &str =
    "api/user/info";
  pub const USER_LOGOUT: &str =
    "api/user/logout";
}

#[derive(
  Debug, Clone, Copy, PartialEq, Eq,
)]
pub enum Method {
  Get,
  /// URL-encoded form body.
  Post
}

/// One call against the store. For GET
/// `params` become the query string,
/// for POST the form body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
  pub method: Method,
  pub url:    String,
  pub params: Vec<(&'static str, String)>
}

impl ApiRequest {
  pub fn param(
    &self,
    name: &str
  ) -> Option<&str> {
    self
      .params
      .iter()
      .find(|(key, _)| *key == name)
      .map(|(_, value)| value.as_str())
  }
}

/// Moves requests over the wire and
/// hands back the decoded envelope.
/// Implementations report network and
/// parse failures as
/// `BoardError::Transport` /
/// `BoardError::Decode`; they never
/// interpret `success`.
#[async_trait(?Send)]
pub trait Transport {
  async fn send(
    &self,
    request: ApiRequest
  ) -> Result<Envelope, BoardError>;
}

/// Typed operations over the three
/// resource collections.
pub struct ResourceClient<T> {
  transport: T,
  base_url:  String
}

impl<T: Transport> ResourceClient<T> {
  pub fn new(
    transport: T,
    base_url: impl Into<String>
  ) -> Self {
    Self {
      transport,
      base_url: base_url.into()
    }
  }

  pub fn transport(&self) -> &T {
    &self.transport
  }

  fn request(
    &self,
    method: Method,
    path: &str,
    params: Vec<(&'static str, String)>
  ) -> ApiRequest {
    ApiRequest {
      method,
      url: format!(
        "{}/{}",
        self.base_url.trim_end_matches('/'),
        path
      ),
      params
    }
  }

  async fn call(
    &self,
    request: ApiRequest
  ) -> Result<Envelope, BoardError> {
    debug!(
      url = %request.url,
      method = ?request.method,
      "sending store request"
    );
    let envelope =
      self.transport.send(request).await?;
    if envelope.success {
      Ok(envelope)
    } else {
      Err(BoardError::application(
        envelope
          .message
          .unwrap_or_default()
      ))
    }
  }

  #[instrument(skip(self))]
  pub async fn list_tasks(
    &self,
    fetch: &FetchRequest
  ) -> Result<Vec<Task>, BoardError> {
    let request = match fetch {
      | FetchRequest::All => {
        self.request(
          Method::Get,
          endpoints::TASK_LIST,
          vec![]
        )
      }
      | FetchRequest::OrderedByPriority => {
        self.request(
          Method::Get,
          endpoints::TASK_PRIORITY_ORDER,
          vec![]
        )
      }
      | FetchRequest::Category(id) => {
        self.request(
          Method::Get,
          endpoints::TASK_BY_CATEGORY,
          vec![(
            fields::CATEGORY_ID,
            id.to_string()
          )]
        )
      }
      | FetchRequest::Status(status) => {
        self.request(
          Method::Get,
          endpoints::TASK_BY_STATUS,
          vec![(
            fields::STATUS,
            status.ordinal().to_string()
          )]
        )
      }
      | FetchRequest::Priority(
        priority
      ) => self.request(
        Method::Get,
        endpoints::TASK_BY_PRIORITY,
        vec![(
          fields::PRIORITY,
          priority.ordinal().to_string()
        )]
      ),
      | FetchRequest::Search(keyword) => {
        self.request(
          Method::Get,
          endpoints::TASK_SEARCH,
          vec![(
            fields::KEYWORD,
            keyword.clone()
          )]
        )
      }
    };

    let mut envelope =
      self.call(request).await?;
    let dtos: Vec<TaskDto> =
      optional_payload(
        &mut envelope,
        keys::TASKS
      )?
      .unwrap_or_default();
    tasks_from_dtos(dtos)
  }

  #[instrument(skip(self), fields(task_id = %id))]
  pub async fn task_detail(
    &self,
    id: &RecordId
  ) -> Result<Task, BoardError> {
    let mut envelope = self
      .call(self.request(
        Method::Get,
        endpoints::TASK_DETAIL,
        vec![(
          fields::TASK_ID,
          id.to_string()
        )]
      ))
      .await?;
    let dto: TaskDto = required_payload(
      &mut envelope,
      keys::TASK
    )?;
    Task::try_from(dto)
  }

  #[instrument(skip(self))]
  pub async fn count_tasks(
    &self,
    status: TaskStatus
  ) -> Result<u64, BoardError> {
    let mut envelope = self
      .call(self.request(
        Method::Get,
        endpoints::TASK_COUNT,
        vec![(
          fields::STATUS,
          status.ordinal().to_string()
        )]
      ))
      .await?;
    required_payload(
      &mut envelope,
      keys::COUNT
    )
  }

  #[instrument(skip(self, task))]
  pub async fn create_task(
    &self,
    task: &TaskFields
  ) -> Result<(), BoardError> {
    self
      .call(self.request(
        Method::Post,
        endpoints::TASK_CREATE,
        task_form(task)
      ))
      .await
      .map(|_| ())
  }

  #[instrument(skip(self, task), fields(task_id = %id))]
  pub async fn update_task(
    &self,
    id: &RecordId,
    task: &TaskFields
  ) -> Result<(), BoardError> {
    let mut form = task_form(task);
    form.push((
      fields::TASK_ID,
      id.to_string()
    ));
    self
      .call(self.request(
        Method::Post,
        endpoints::TASK_UPDATE,
        form
      ))
      .await
      .map(|_| ())
  }

  #[instrument(skip(self), fields(task_id = %id))]
  pub async fn update_task_status(
    &self,
    id: &RecordId,
    status: TaskStatus
  ) -> Result<(), BoardError> {
    self
      .call(self.request(
        Method::Post,
        endpoints::TASK_UPDATE_STATUS,
        vec![
          (
            fields::TASK_ID,
            id.to_string()
          ),
          (
            fields::STATUS,
            status.ordinal().to_string()
          ),
        ]
      ))
      .await
      .map(|_| ())
  }

  #[instrument(skip(self), fields(task_id = %id))]
  pub async fn delete_task(
    &self,
    id: &RecordId
  ) -> Result<(), BoardError> {
    self
      .call(self.request(
        Method::Post,
        endpoints::TASK_DELETE,
        vec![(
          fields::TASK_ID,
          id.to_string()
        )]
      ))
      .await
      .map(|_| ())
  }

  #[instrument(skip(self))]
  pub async fn list_categories(
    &self
  ) -> Result<Vec<Category>, BoardError>
  {
    let mut envelope = self
      .call(self.request(
        Method::Get,
        endpoints::CATEGORY_LIST,
        vec![]
      ))
      .await?;
    let dtos: Vec<CategoryDto> =
      optional_payload(
        &mut envelope,
        keys::CATEGORIES
      )?
      .unwrap_or_default();
    Ok(
      dtos
        .into_iter()
        .map(Category::from)
        .collect()
    )
  }

  #[instrument(skip(self))]
  pub async fn category_exists(
    &self,
    name: &str
  ) -> Result<bool, BoardError> {
    let mut envelope = self
      .call(self.request(
        Method::Get,
        endpoints::CATEGORY_CHECK_NAME,
        vec![(
          fields::CATEGORY_NAME,
          name.to_string()
        )]
      ))
      .await?;
    required_payload(
      &mut envelope,
      keys::EXISTS
    )
  }

  #[instrument(skip(self))]
  pub async fn create_category(
    &self,
    name: &str
  ) -> Result<(), BoardError> {
    self
      .call(self.request(
        Method::Post,
        endpoints::CATEGORY_CREATE,
        vec![(
          fields::CATEGORY_NAME,
          name.to_string()
        )]
      ))
      .await
      .map(|_| ())
  }

  #[instrument(skip(self), fields(category_id = %id))]
  pub async fn update_category(
    &self,
    id: &RecordId,
    name: &str
  ) -> Result<(), BoardError> {
    self
      .call(self.request(
        Method::Post,
        endpoints::CATEGORY_UPDATE,
        vec![
          (
            fields::CATEGORY_ID,
            id.to_string()
          ),
          (
            fields::CATEGORY_NAME,
            name.to_string()
          ),
        ]
      ))
      .await
      .map(|_| ())
  }

  /// `success: false` here means the
  /// session is gone.
  #[instrument(skip(self))]
  pub async fn current_user(
    &self
  ) -> Result<User, BoardError> {
    let mut envelope = match self
      .call(self.request(
        Method::Get,
        endpoints::USER_INFO,
        vec![]
      ))
      .await
    {
      | Ok(envelope) => envelope,
      | Err(BoardError::Application {
        message
      }) => {
        warn!(%message, "user info rejected");
        return Err(
          BoardError::Unauthenticated
        );
      }
      | Err(err) => return Err(err)
    };
    let dto: UserDto = required_payload(
      &mut envelope,
      keys::USER
    )?;
    Ok(User::from(dto))
  }

  #[instrument(skip(self))]
  pub async fn logout(
    &self
  ) -> Result<(), BoardError> {
    self
      .call(self.request(
        Method::Post,
        endpoints::USER_LOGOUT,
        vec![]
      ))
      .await
      .map(|_| ())
  }
}

fn task_form(
  task: &TaskFields
) -> Vec<(&'static str, String)> {
  vec![
    (
      fields::TASK_NAME,
      task.title.clone()
    ),
    (
      fields::DESCRIPTION,
      task.description.clone()
    ),
    (
      fields::CATEGORY_ID,
      task.category_id.to_string()
    ),
    (
      fields::DUE_DATE,
      task.due_date.clone()
    ),
    (
      fields::PRIORITY,
      task.priority.ordinal().to_string()
    ),
  ]
}

fn optional_payload<P>(
  envelope: &mut Envelope,
  key: &str
) -> Result<Option<P>, BoardError>
where
  P: DeserializeOwned
{
  envelope
    .take::<P>(key)
    .transpose()
    .map_err(BoardError::from)
}

fn required_payload<P>(
  envelope: &mut Envelope,
  key: &str
) -> Result<P, BoardError>
where
  P: DeserializeOwned
{
  optional_payload(envelope, key)?
    .ok_or_else(|| {
      BoardError::decode(format!(
        "response is missing `{key}`"
      ))
    })
}
