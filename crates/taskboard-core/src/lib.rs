pub mod board;
pub mod client;
pub mod config;
pub mod datetime;
pub mod debounce;
pub mod edit;
pub mod error;
pub mod filter;
pub mod model;
pub mod mutation;
pub mod reconciler;
pub mod render;

pub use board::Board;
pub use client::{
  ApiRequest,
  Method,
  ResourceClient,
  Transport
};
pub use config::BoardConfig;
pub use error::{
  BoardError,
  ErrorKind
};
pub use filter::{
  FetchRequest,
  FilterState,
  Selection,
  SortMode
};
pub use reconciler::ListView;
pub use render::{
  Interaction,
  Renderer
};
