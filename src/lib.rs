pub mod config;
pub mod favorites;
pub mod humanize;
pub mod items;
pub mod network;
pub mod observability;
pub mod runner;
pub mod ui;
