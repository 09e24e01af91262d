use thiserror::Error;

/// Which bucket of the error taxonomy a
/// failure belongs to.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq,
)]
pub enum ErrorKind {
  /// Missing input, caught before any
  /// network call.
  Validation,
  /// The store answered
  /// `success: false`.
  Application,
  /// Network failure or a response that
  /// could not be understood.
  Transport,
  /// The session is gone; the page
  /// must leave the board.
  Unauthenticated
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
  #[error("required field `{field}` is empty")]
  Validation { field: &'static str },

  #[error("{message}")]
  Application { message: String },

  #[error("transport failure: {detail}")]
  Transport { detail: String },

  #[error("malformed response: {detail}")]
  Decode { detail: String },

  #[error("not signed in")]
  Unauthenticated
}

impl BoardError {
  pub fn validation(
    field: &'static str
  ) -> Self {
    Self::Validation { field }
  }

  pub fn application(
    message: impl Into<String>
  ) -> Self {
    Self::Application {
      message: message.into()
    }
  }

  pub fn transport(
    detail: impl Into<String>
  ) -> Self {
    Self::Transport {
      detail: detail.into()
    }
  }

  pub fn decode(
    detail: impl Into<String>
  ) -> Self {
    Self::Decode {
      detail: detail.into()
    }
  }

  pub fn kind(&self) -> ErrorKind {
    match self {
      | BoardError::Validation {
        ..
      } => ErrorKind::Validation,
      | BoardError::Application {
        ..
      } => ErrorKind::Application,
      | BoardError::Transport {
        ..
      }
      | BoardError::Decode {
        ..
      } => ErrorKind::Transport,
      | BoardError::Unauthenticated => {
        ErrorKind::Unauthenticated
      }
    }
  }

  /// Text shown to the user. Store
  /// messages pass through verbatim;
  /// transport problems collapse to
  /// `fallback`.
  pub fn user_message(
    &self,
    fallback: &str,
    required: &str
  ) -> String {
    match self {
      | BoardError::Validation {
        ..
      } => required.to_string(),
      | BoardError::Application {
        message
      } if !message.trim().is_empty() => {
        message.clone()
      }
      | BoardError::Application {
        ..
      }
      | BoardError::Transport {
        ..
      }
      | BoardError::Decode {
        ..
      }
      | BoardError::Unauthenticated => {
        fallback.to_string()
      }
    }
  }
}

impl From<serde_json::Error> for BoardError {
  fn from(err: serde_json::Error) -> Self {
    BoardError::decode(err.to_string())
  }
}
