//! Web front end and directory plumbing for verdap
//!
//! The front end talks to the directory through a [`client::DirectoryClient`]
//! holding its own bound session; handlers never reach into the engine
//! directly.

pub mod backend;
pub mod client;
pub mod server;
pub mod web;

pub use backend::DirectoryBackend;
pub use client::DirectoryClient;
pub use server::WebServer;
