//! ESG Advisor - KPI evaluation and AHP decision support for ESG reporting
//!
//! This crate evaluates environmental sensor data and social KPIs of a
//! textile plant against configurable targets, and combines them with
//! financial indicators into an AHP-weighted decision report. The tools are
//! exposed to an LLM agent through a typed request/response interface.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
