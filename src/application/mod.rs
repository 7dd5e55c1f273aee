// SPDX-License-Identifier: MPL-2.0
//! Application layer - Use cases and orchestration.
//!
//! - [`port`]: Trait definitions (interfaces) for dependency inversion
//! - [`session`]: The editing [`Session`](session::Session), sole owner of wizard state
//!
//! # Dependency Rule
//!
//! - Application layer depends on the domain layer and on media value types
//! - Infrastructure layer implements application layer ports
//! - The `app` layer drives the session and executes the work it asks for

pub mod port;
pub mod session;

pub use session::{RequestSequence, Sequence, Session};
