//! Gold Price Feed
//!
//! Turns the unstable gold price tables published by Vietnamese retailers into
//! a normalized feed, with trends linked across runs.

pub mod application;
pub mod domain;
pub mod infrastructure;
