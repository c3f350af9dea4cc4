//! Dashboard core: pure pagination/merge/sort state machine and view-model helpers.
mod effect;
mod error;
mod merge;
mod msg;
mod page;
mod sort;
mod state;
mod update;
mod view_model;

pub use effect::{Effect, FetchRequest};
pub use error::LoadError;
pub use merge::{apply_page, MergeMode, MergeOutcome};
pub use msg::Msg;
pub use page::{Page, Record};
pub use sort::{sorted, SortDirection, SortField, SortSpec};
pub use state::{Generation, Lifecycle, SessionState};
pub use update::update;
pub use view_model::{CategoryTone, DashboardView, RecordRow};
