//! Multimodal freight route planner server.
//!
//! A web application that answers: "which ports and airports should this
//! shipment pass through, and which combination is cheapest?"

pub mod config;
pub mod directory;
pub mod domain;
pub mod planner;
pub mod web;
