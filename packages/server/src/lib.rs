// Notes API - Core
//
// Backend for a personal notes app. Users sign up and log in with emailed
// one-time passcodes, then manage their own notes behind a bearer token.
//
// Domains live in domains/*, infrastructure traits and wiring in kernel/.

pub mod common;
pub mod config;
pub mod domains;
pub mod kernel;
pub mod server;

pub use config::*;
