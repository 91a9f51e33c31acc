//! Core types and trait definitions for the Macro Insight data service.
//!
//! This crate has no HTTP or database dependencies. It owns
//! the domain model, the [`store::IndicatorStore`] abstraction, and the pure
//! read-side logic (period resolution, payload assembly) plus seeding.

#![allow(async_fn_in_trait)]

pub mod catalog;
pub mod chain;
pub mod error;
pub mod indicator;
pub mod ingest;
pub mod period;
pub mod query;
pub mod release;
pub mod seed;
pub mod series;
pub mod store;

pub use error::{Error, Result};
