//! A small MongoDB-backed repository for `Person` records.
//!
//! The caller builds the client with [`mongo::connect`], hands a database to
//! [`PersonRepository::new`] and owns the client until shutdown.

pub mod config;
pub mod error;
pub mod mongo;
pub mod person;
pub mod repository;

pub use config::{Config, ConfigError};
pub use error::{RepositoryError, RepositoryResult};
pub use person::{DeletionSummary, NewPerson, Person, PersonSummary};
pub use repository::PersonRepository;
