pub mod config;
pub mod controller;
pub mod data;
pub mod error;
pub mod fields;
pub mod handlers;
pub mod scene;
pub mod selection;
