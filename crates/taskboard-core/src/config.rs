use std::time::Duration;

use serde::Deserialize;
use tracing::{
  info,
  warn
};

use crate::error::BoardError;

pub const DEFAULT_SEARCH_DEBOUNCE_MS: u64 =
  300;

#[derive(
  Debug, Clone, PartialEq, Deserialize,
)]
#[serde(default)]
pub struct BoardConfig {
  pub base_url:            String,
  pub login_path:          String,
  pub search_debounce_ms:  u64,
  pub display_date_format: String,
  pub count_statuses:      bool,
  pub messages:            Messages
}

/// Every user-visible string the core
/// produces.
#[derive(
  Debug, Clone, PartialEq, Deserialize,
)]
#[serde(default)]
pub struct Messages {
  pub loading:             String,
  pub no_tasks:            String,
  pub load_failed:         String,
  pub generic_failure:     String,
  pub required_fields:     String,
  pub category_required:   String,
  pub confirm_delete:      String,
  pub no_categories:       String,
  pub categories_failed:   String,
  pub category_exists:     String,
  pub user_info_failed:    String,
  pub logout_failed:       String,
  pub no_description:      String
}

impl Default for BoardConfig {
  fn default() -> Self {
    Self {
      base_url:            "/taskmanager"
        .to_string(),
      login_path:          "/login.html"
        .to_string(),
      search_debounce_ms:
        DEFAULT_SEARCH_DEBOUNCE_MS,
      display_date_format: "%Y/%m/%d"
        .to_string(),
      count_statuses:      true,
      messages:            Messages::default()
    }
  }
}

impl Default for Messages {
  fn default() -> Self {
    Self {
      loading:           "Loading tasks..."
        .to_string(),
      no_tasks:          "No tasks yet"
        .to_string(),
      load_failed:
        "Could not load tasks, please \
         refresh and try again"
          .to_string(),
      generic_failure:
        "Operation failed, please try \
         again later"
          .to_string(),
      required_fields:
        "Please fill in all required \
         fields"
          .to_string(),
      category_required:
        "Please enter a category name"
          .to_string(),
      confirm_delete:
        "Delete this task?".to_string(),
      no_categories:     "No categories"
        .to_string(),
      categories_failed:
        "Could not load categories"
          .to_string(),
      category_exists:
        "A category with this name \
         already exists"
          .to_string(),
      user_info_failed:
        "Could not load account \
         details, please refresh"
          .to_string(),
      logout_failed:
        "Sign-out failed, please \
         refresh and try again"
          .to_string(),
      no_description:    "No description"
        .to_string()
    }
  }
}

impl BoardConfig {
  pub fn from_toml_str(
    text: &str
  ) -> Result<Self, BoardError> {
    let mut config =
      toml::from_str::<BoardConfig>(text)
        .map_err(|err| {
          BoardError::decode(format!(
            "config: {err}"
          ))
        })?;
    config.sanitize();
    Ok(config)
  }

  /// Parses `text`, falling back to the
  /// defaults when it is unusable.
  pub fn load_or_default(
    text: &str
  ) -> Self {
    match Self::from_toml_str(text) {
      | Ok(config) => {
        info!(
          base_url = %config.base_url,
          debounce_ms = config.search_debounce_ms,
          "loaded board config"
        );
        config
      }
      | Err(error) => {
        warn!(%error, "failed parsing board config; using defaults");
        Self::default()
      }
    }
  }

  pub fn search_debounce(
    &self
  ) -> Duration {
    Duration::from_millis(
      self.search_debounce_ms
    )
  }

  /// Absolute path of an API endpoint.
  pub fn endpoint(
    &self,
    path: &str
  ) -> String {
    format!(
      "{}/{}",
      self.base_url,
      path.trim_start_matches('/')
    )
  }

  pub fn login_url(&self) -> String {
    self.endpoint(&self.login_path)
  }

  fn sanitize(&mut self) {
    let trimmed = self
      .base_url
      .trim()
      .trim_end_matches('/')
      .to_string();
    if trimmed != self.base_url {
      warn!(
        base_url = %self.base_url,
        "normalizing base_url"
      );
    }
    self.base_url = trimmed;

    if self.search_debounce_ms == 0 {
      warn!(
        "search_debounce_ms must be \
         positive; using default"
      );
      self.search_debounce_ms =
        DEFAULT_SEARCH_DEBOUNCE_MS;
    }

    if self
      .display_date_format
      .trim()
      .is_empty()
    {
      warn!(
        "empty display_date_format; \
         using default"
      );
      self.display_date_format =
        BoardConfig::default()
          .display_date_format;
    }

    if self.login_path.trim().is_empty()
    {
      self.login_path =
        BoardConfig::default().login_path;
    }
  }
}
