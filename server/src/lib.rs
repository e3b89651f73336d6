//! Beacon content-marketing analytics server
//!
//! Library crate backing the `beacon` binary. The interesting parts live in
//! `domain`: multi-touch attribution, metric aggregation, and content
//! recommendation scoring over a SQLite-backed metric store.

pub mod api;
pub mod app;
pub mod core;
pub mod data;
pub mod domain;
pub mod utils;
