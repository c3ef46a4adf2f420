//! # Emarsys API Rust Client
//!
//! A Rust client for the Emarsys marketing REST API with interchangeable
//! blocking and async connections.
//!
//! ## Overview
//!
//! This crate provides:
//! - Type-safe configuration via [`EmarsysConfig`] and [`EmarsysConfigBuilder`]
//! - Validated newtypes for credentials and the API base URI
//! - WSSE request signing via [`auth::wsse`]
//! - A blocking [`SyncConnection`] and a non-blocking [`AsyncConnection`]
//!   behind one [`Connection`] trait
//! - Resource objects for contacts, contact fields, contact lists and settings
//! - An [`Emarsys`] client bundling one connection with every resource
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use emarsys_api::{Emarsys, SyncConnection};
//! use emarsys_api::resources::ContactParams;
//! use serde_json::json;
//!
//! let client = Emarsys::new(SyncConnection::new("username", "secret").unwrap());
//!
//! let reply = client
//!     .contacts()
//!     .create(&json!({"3": "squirrel@squirrelmail.com"}), &ContactParams::default())
//!     .unwrap();
//!
//! // {"data": {"id": 19739576}, "replyCode": 0, "replyText": "OK"}
//! println!("{reply}");
//! ```
//!
//! ## Async Usage
//!
//! The same resource methods return futures when the client is built on an
//! [`AsyncConnection`]. Nothing is sent until the future is awaited.
//!
//! ```rust,no_run
//! use emarsys_api::{AsyncConnection, Emarsys, KeyId};
//! use emarsys_api::resources::ContactQueryParams;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Emarsys::new(AsyncConnection::new("username", "secret")?);
//!
//! let params = ContactQueryParams {
//!     limit: Some(10),
//!     ..Default::default()
//! };
//! let (emails, settings) = tokio::join!(
//!     client.contacts().query(KeyId::EMAIL, &params),
//!     client.settings().get(),
//! );
//! println!("{} / {}", emails?, settings?);
//! # Ok(())
//! # }
//! ```
//!
//! ## Configuration
//!
//! ```rust
//! use std::time::Duration;
//! use emarsys_api::{BaseUri, EmarsysConfig, Secret, SyncConnection, Username};
//!
//! let config = EmarsysConfig::builder()
//!     .username(Username::new("username").unwrap())
//!     .secret(Secret::new("secret").unwrap())
//!     .base_uri(BaseUri::new("https://api.emarsys.net/").unwrap())
//!     .timeout(Duration::from_secs(30))
//!     .user_agent_prefix("MyApp/1.0")
//!     .build()
//!     .unwrap();
//!
//! let connection = SyncConnection::from_config(config).unwrap();
//! ```
//!
//! ## Design Principles
//!
//! - **No global state**: configuration is instance-based and passed explicitly
//! - **Fail-fast validation**: all newtypes validate on construction
//! - **Thread-safe**: connections, resources and the client are `Send + Sync`
//! - **No hidden retries**: every call is sent exactly once
//! - **Pass-through replies**: successful bodies are returned unchanged

pub mod auth;
pub mod client;
pub mod clients;
pub mod config;
pub mod error;
pub mod resources;

// Re-export public types at crate root for convenience
pub use auth::{Credentials, WsseToken};
pub use client::{Emarsys, Resource, RESOURCE_NAMES};
pub use config::{BaseUri, EmarsysConfig, EmarsysConfigBuilder, Secret, Username};
pub use error::ConfigError;

// Re-export connection types
pub use clients::{
    ApiFuture, AsyncConnection, Connection, HttpError, HttpMethod, HttpRequest,
    HttpRequestBuilder, HttpResponseError, InvalidCallError, Reply, ResponseDecodeError,
    SyncConnection,
};

pub use resources::KeyId;
