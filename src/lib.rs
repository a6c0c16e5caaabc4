//! Digital Trust Portal Library
//!
//! Client and reference server for an explainable credit scoring API aimed at
//! informal and gig workers. The client side posts form input to the API and
//! renders the JSON it returns; the server side implements the same API with
//! rule-based scoring over an in-memory store.
//!
//! # Modules
//!
//! - `api`: Server-facing namespace (handlers, routes).
//! - `domain`: Scoring domain namespace (scoring, validation, models, errors).
//! - `integrations`: Outbound integrations (scoring API client).
//! - `api_client`: JSON transport client for the scoring API.
//! - `config`: Configuration management.
//! - `controllers`: Page controllers (register, calculate, profile, result).
//! - `errors`: Error handling types.
//! - `forms`: Form field parsing.
//! - `handlers`: HTTP request handlers.
//! - `models`: Wire payloads.
//! - `render`: HTML fragments for the profile and result pages.
//! - `routes`: Router assembly and OpenAPI document.
//! - `scoring`: Rule-based trust scoring.
//! - `session`: Session context and its checksummed file store.
//! - `store`: In-memory user and credit profile storage.
//! - `validation`: Server-side payload validation.

pub mod api;
pub mod domain;
pub mod integrations;

pub mod api_client;
pub mod config;
pub mod controllers;
pub mod errors;
pub mod forms;
pub mod handlers;
pub mod models;
pub mod render;
pub mod routes;
pub mod scoring;
pub mod session;
pub mod store;
pub mod validation;
