// Library target for integration tests and the `validate_course` binary.
// The terminal entry point is main.rs, which declares the same module tree,
// so much of it looks unused from here.
#![allow(dead_code)]

pub mod course;
pub mod logging;
pub mod quiz;

mod app;
mod config;
mod event;
mod ui;
