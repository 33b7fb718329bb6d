pub mod api;
pub mod config;
pub mod consts;
pub mod detection;
pub mod error;
pub mod io;
pub mod render;
pub mod report;
pub mod stats;
pub mod table;
pub mod upload;
pub mod viewer;
