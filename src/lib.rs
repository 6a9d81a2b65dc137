//! Campaign assistant: the client side of a marketing-campaign report
//! service.
//!
//! Collects campaign parameters, validates them, calls the report backend and
//! renders the returned report, ad-platform connection status and audience
//! insights as HTML. The same [`controller::Controller`] drives both the
//! local web UI ([`web`]) and the command line.

pub mod analytics;
pub mod api;
pub mod config;
pub mod controller;
pub mod error;
pub mod insights;
pub mod integrations;
pub mod model;
pub mod notify;
pub mod render;
pub mod validate;
pub mod view;
pub mod web;
