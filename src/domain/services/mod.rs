mod app_state;
mod exports;
mod history;
mod session_manager;

pub use app_state::*;
pub use exports::*;
pub use history::*;
pub use session_manager::*;
