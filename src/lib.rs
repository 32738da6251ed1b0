//! Tasklist - Terminal Task List Library
//!
//! A single-view task list for the terminal: add short items, mark them
//! complete, delete them, and the list survives restarts through a local
//! key-value snapshot.

pub mod domain;
pub mod application;
pub mod infrastructure;
pub mod presentation;

pub use domain::*;
pub use application::*;
