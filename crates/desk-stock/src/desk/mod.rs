//! Interactive desk: form parsing, state and submission flows

pub mod flow;
pub mod forms;
pub mod state;

pub use flow::Desk;
pub use forms::{SingleStockForm, can_compare, parse_symbol_list};
pub use state::{DeskState, Mode, Notice, NoticeLevel, RequestId};
