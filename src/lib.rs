//! Library exports for snipmark subsystems.
//!
//! Exposes the canvas and history engine, the session state machine and the
//! capture/export collaborators so that shells (the headless CLI, tests or a
//! display backend) can drive a capture session.

pub mod backend;
pub mod capture;
pub mod config;
pub mod draw;
pub mod input;
pub mod ui;
pub mod util;

pub use config::Config;
