//! Ayumi library
//!
//! Daily devotional dashboard: a same-day cache, a remote generator and a
//! bundled fallback, combined so the reader always has something to show.

pub mod app;
pub mod cache;
pub mod cli;
pub mod clock;
pub mod config;
pub mod content;
pub mod gate;
pub mod logger;
pub mod provider;
pub mod resolver;
pub mod ui;
