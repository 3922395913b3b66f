//! Pizza and topping management service.
//!
//! Layers, leaves first: [`model`] entities, [`storage`] repositories,
//! [`service`] managers enforcing the business rules, and the [`api`] HTTP
//! boundary. [`config`] feeds the composition root in `main`.

pub mod api;
pub mod config;
pub mod model;
pub mod service;
pub mod storage;
