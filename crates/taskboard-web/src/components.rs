mod board_header;
mod category_modal;
mod filter_toolbar;
mod sidebar;
mod task_list;
mod task_list_row;
mod task_modal;

pub use board_header::BoardHeader;
pub use category_modal::{
  CategoryDraft,
  CategoryModal
};
pub use filter_toolbar::FilterToolbar;
pub use sidebar::Sidebar;
pub use task_list::TaskList;
pub use task_list_row::TaskListRow;
pub use task_modal::{
  FormEdit,
  TaskModal
};
