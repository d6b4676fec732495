//! Humidity API - humidity readings classified into soil moisture bands
//!
//! This library exposes the core modules for testing and reuse.

pub mod common;
pub mod config;
pub mod entity;
pub mod error;
pub mod gateway;
pub mod humidity;
pub mod poller;
pub mod routes;
pub mod usecases;
