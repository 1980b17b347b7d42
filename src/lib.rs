pub mod app;
pub mod config;
pub mod controller;
pub mod map_sync;
pub mod non_zero_duration;
pub mod probe;
pub mod resolver;
mod uri_tools;
pub mod view;
