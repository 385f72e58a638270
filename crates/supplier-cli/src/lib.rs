//! Resolver CLI building blocks: settings, logging, the resolve pipeline and
//! its printed report.

#![deny(unsafe_code)]

pub mod logging;
pub mod pipeline;
pub mod report;
pub mod sample;
pub mod settings;
pub mod summary;
