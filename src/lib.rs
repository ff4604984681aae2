pub mod app;
pub mod config;
pub mod core;
pub mod data;
pub mod grid;
pub mod input;
pub mod logging;
pub mod modules;
pub mod nav;
pub mod pages;
pub mod ui;
