//! Statement graph data model
//!
//! This module implements the typed triple model:
//! - Things (resources, literals, predicates, classes) as a closed enum
//! - Statements connecting a subject thing to an object thing over a predicate
//! - Subclass relations forming a single-parent class forest
//! - Bundles: subgraphs fetched breadth-first around a root thing

pub mod bundle;
pub mod clock;
pub mod contributor;
pub mod error;
pub mod statement;
pub mod thing;
pub mod traversal;
pub mod types;
pub mod vocab;
pub mod xsd;

// Re-export main types
pub use bundle::{Bundle, BundleConfiguration, Direction, Sort, SortOrder, SortProperty};
pub use clock::{Clock, FixedClock, SystemClock};
pub use contributor::Contributor;
pub use error::{ErrorKind, GraphError, GraphResult, InvalidStatementReason, StatementInUseReason};
pub use statement::{
    ChildClass, ClassHierarchyEntry, ClassSubclassRelation, GeneralStatement, PredicateUsageCount,
    StatementFilter,
};
pub use thing::{Class, ExtractionMethod, List, Literal, Predicate, Resource, Thing, Visibility};
pub use types::{ContributorId, ObservatoryId, OrganizationId, StatementId, ThingId};
pub use xsd::{Datatype, XsdDatatype};
