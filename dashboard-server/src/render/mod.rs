//! HTML rendering for the dashboard page

pub mod charts;
pub mod page;

pub use page::{render_dashboard, ExportNotice, PageContext};
