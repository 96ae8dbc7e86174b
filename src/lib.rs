pub mod database;
pub mod error;
pub mod importer;
pub mod models;
pub mod ranking;
pub mod ratios;
pub mod ui;
