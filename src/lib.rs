//! Resolve `.env` files against an environment store.
//!
//! [`Resolver::resolve`] is the safe default and works over a
//! process-isolated in-memory store.
//!
//! The convenience [`resolve`] entry point mutates the process environment
//! and is `unsafe`, because callers must guarantee no concurrent
//! process-environment access.

mod env;
mod error;
mod options;
mod resolved;
mod resolver;
mod source;

pub use env::EnvStore;
pub use error::Error;
pub use options::{Config, Encoding, FlagDefaults, Output};
pub use resolved::Resolved;
pub use resolver::{Resolver, resolve};
pub use source::{DotenvSource, ParseSource};
