//! ORKG Statement Graph Engine
//!
//! The knowledge-graph core of the Open Research Knowledge Graph: typed
//! things (resources, predicates, classes, literals) linked by
//! subject-predicate-object statements, a single-parent class hierarchy,
//! ordered lists, and bounded breadth-first "bundle" extraction.
//!
//! # Architecture
//!
//! - `graph`: domain types, errors, XSD validation and the traversal algorithm
//! - `persistence`: repository ports and the `InMemoryGraph` adapter
//! - `service`: use-case services that validate commands before writing
//! - `config`: YAML configuration and `tracing` setup
//!
//! All APIs are synchronous. Services share repositories through
//! `Arc<dyn …Repository>` and are `Send + Sync`.
//!
//! ## Example Usage
//!
//! ```rust
//! use orkg_graph::config::GraphConfig;
//! use orkg_graph::graph::{BundleConfiguration, Sort};
//! use orkg_graph::service::{
//!     CreatePredicateCommand, CreateResourceCommand, CreateStatementCommand, GraphServices,
//!     PredicateUseCases, ResourceUseCases, StatementUseCases,
//! };
//!
//! let (_graph, services) = GraphServices::in_memory(&GraphConfig::default());
//!
//! let a = services.resources.create(CreateResourceCommand::new("Paper A")).unwrap();
//! let b = services.resources.create(CreateResourceCommand::new("Paper B")).unwrap();
//! let cites = services.predicates.create(CreatePredicateCommand::new("cites")).unwrap();
//!
//! // Identical triples are stored once
//! let first = services.statements.create(CreateStatementCommand::new(a.clone(), cites.clone(), b.clone())).unwrap();
//! let again = services.statements.create(CreateStatementCommand::new(a.clone(), cites, b)).unwrap();
//! assert_eq!(first, again);
//!
//! let bundle = services
//!     .statements
//!     .fetch_as_bundle(&a, &BundleConfiguration::default(), false, &Sort::unsorted())
//!     .unwrap();
//! assert_eq!(bundle.len(), 1);
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod graph;
pub mod persistence;
pub mod service;

// Re-export main types for convenience
pub use config::{init_logging, ConfigError, GraphConfig};

pub use graph::{
    Bundle, BundleConfiguration, Class, Clock, Contributor, ContributorId, ErrorKind,
    GeneralStatement, GraphError, GraphResult, List, Literal, Predicate, Resource, Sort,
    StatementId, Thing, ThingId,
};

pub use persistence::InMemoryGraph;

pub use service::GraphServices;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get version string
pub fn version() -> &'static str {
    VERSION
}
