//! HTML rendering of backend payloads.
//!
//! Renderers are pure functions from a decoded payload to an HTML fragment.
//! Absent sections emit nothing; present sections emit a titled block with
//! only the sub-fields that are present. Backend text is escaped unless the
//! [`HtmlPolicy`] says otherwise.

pub mod html;
mod insights;
mod report;
mod text;

pub use html::{HtmlPolicy, escape};
pub use insights::InsightsRenderer;
pub use report::ReportRenderer;
pub use text::plain_text;
