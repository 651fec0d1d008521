//! Sales-tender tracking dashboard — library surface.
//!
//! The core engines (countdown, timeline geometry, scroll coordination) are
//! pure modules re-exported here so the integration tests and the binary
//! share one implementation.

pub mod api;
pub mod app;
pub mod countdown;
pub mod event;
pub mod form;
pub mod model;
pub mod report;
pub mod theme;
pub mod timeline;
