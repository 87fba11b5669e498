//! Mergington High School extracurricular activities API.
//!
//! `database` holds the in-memory registry, `services` the signup rules and
//! `web` the axum router around them.

pub mod config;
pub mod database;
pub mod models;
pub mod services;
pub mod web;
