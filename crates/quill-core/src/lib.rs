//! # Quill Core
//!
//! The domain layer of the Quill blog.
//! Posts, categories and admin sessions, plus the two pieces of real logic:
//! the query matcher ([`search`]) and the inline markup formatter ([`markup`]).
//! This crate has no infrastructure dependencies; storage and transport live
//! behind the traits in [`ports`].

pub mod archive;
pub mod domain;
pub mod editor;
pub mod error;
pub mod markup;
pub mod ports;
pub mod search;

pub use error::{DomainError, RepoError};
