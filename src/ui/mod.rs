//! UI module exports

pub mod app;
pub mod components;
