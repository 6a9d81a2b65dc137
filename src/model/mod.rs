//! Typed payloads exchanged with the campaign backend.
//!
//! The backend produces its report and insights documents from LLM output, so
//! every field is optional and may arrive in an unexpected shape. Decoding is
//! lenient (see [`presence`]): a missing, empty or mis-shaped field becomes
//! `None` rather than a decode error, which keeps the renderers total over
//! these types.

pub mod campaign;
pub mod form;
pub mod insights;
pub mod presence;
pub mod report;
pub mod status;

pub use campaign::{CampaignDetail, CampaignSummary, SavedReport};
pub use form::FormInput;
pub use insights::InsightsPayload;
pub use presence::FieldValue;
pub use report::ReportPayload;
pub use status::{ConnectionStatus, Platform};
