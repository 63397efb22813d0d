//! Baize: Context-Driven Content Personalization
//!
//! The personalization core of a billiards-retail marketing site: a
//! versioned context state engine with a pure reducer, a content priority
//! scorer, a durable offline booking queue, a CMS content store, and an
//! in-memory API performance monitor.

pub mod booking;
pub mod cli;
pub mod cms;
pub mod config;
pub mod context;
pub mod error;
pub mod logging;
pub mod perf;
pub mod scoring;
pub mod storage;
pub mod telemetry;
pub mod types;
