//! List view logic independent of the terminal: filtering, pagination, row actions and
//! the per-panel render model.

pub mod actions;
pub mod filter;
pub mod paginator;
pub mod panel;
pub mod view;

pub use actions::{
    ActionOutcome, AllowDelete, DeleteDecision, DeletePolicy, LabOrdersGuard, Notifier,
    OrderLookup, RecordHandler, RowAction, RowActionDispatcher,
};
pub use filter::{filter_records, matches};
pub use paginator::{PageSize, PageWindow, Paginator};
pub use panel::{ListPanel, PageMove};
pub use view::{build_list, ListContent, NavControls, PageView};
