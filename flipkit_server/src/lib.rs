//! # FlipKit server
//! This crate hosts the HTTP layer of the FlipKit marketplace backend. It is responsible for:
//! * Verifying Paystack payments and reconciling them against orders.
//! * Creating pending orders at checkout start.
//! * Serving the vendor catalogue.
//! * Google sign-in and bearer-token sessions.
//! * The USD→NGN exchange-rate lookup.
//!
//! ## Configuration
//! The server is configured via environment variables. See [config](config/index.html) for more information.
//!
//! All business logic lives in `flipkit_engine`; handlers here are generic over the engine traits and the outbound
//! integration traits, so the endpoint tests can run against mocks.

pub mod auth;
pub mod cli;
pub mod config;
pub mod data_objects;
pub mod errors;
pub mod integrations;
pub mod routes;
pub mod server;
