//! Domain errors of the statement graph
//!
//! Every service operation either succeeds completely or returns exactly one
//! of these errors, identifying the precondition that was violated.

use super::types::{ContributorId, StatementId, ThingId};
use std::fmt;
use thiserror::Error;

/// Why a statement was rejected as invalid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidStatementReason {
    SubjectMustNotBeLiteral,
    IsListElementStatement,
}

impl fmt::Display for InvalidStatementReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvalidStatementReason::SubjectMustNotBeLiteral => {
                write!(f, "Subject must not be a literal.")
            }
            InvalidStatementReason::IsListElementStatement => write!(
                f,
                "A list element statement cannot be managed using the statements endpoint. Please see the documentation on how to manage lists."
            ),
        }
    }
}

/// Why a statement cannot be deleted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatementInUseReason {
    UsedInList,
}

impl fmt::Display for StatementInUseReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatementInUseReason::UsedInList => write!(
                f,
                "A statement cannot be deleted when it is used in a list. Please see the documentation on how to manage lists."
            ),
        }
    }
}

/// Error families, used by callers to map errors to responses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    AlreadyExists,
    InvalidInput,
    NotModifiable,
    InUse,
    Forbidden,
}

/// Errors that can occur during graph operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("Thing \"{0}\" not found.")]
    ThingNotFound(ThingId),

    #[error("Class \"{0}\" not found.")]
    ClassNotFound(ThingId),

    #[error("Predicate \"{0}\" not found.")]
    PredicateNotFound(ThingId),

    #[error("Resource \"{0}\" not found.")]
    ResourceNotFound(ThingId),

    #[error("Literal \"{0}\" not found.")]
    LiteralNotFound(ThingId),

    #[error("Statement \"{0}\" not found.")]
    StatementNotFound(StatementId),

    #[error("Subject \"{0}\" not found.")]
    StatementSubjectNotFound(ThingId),

    #[error("Predicate \"{0}\" not found.")]
    StatementPredicateNotFound(ThingId),

    #[error("Object \"{0}\" not found.")]
    StatementObjectNotFound(ThingId),

    #[error("List \"{0}\" not found.")]
    ListNotFound(ThingId),

    #[error("All elements inside the list have to exist. Missing: {}", join(.0))]
    ListElementNotFound(Vec<ThingId>),

    #[error("Class \"{0}\" already exists.")]
    ClassAlreadyExists(ThingId),

    #[error("The URI <{uri}> is already assigned to class with ID \"{class_id}\".")]
    DuplicateUri { uri: String, class_id: ThingId },

    #[error("Predicate \"{0}\" already exists.")]
    PredicateAlreadyExists(ThingId),

    #[error("Literal \"{0}\" already exists.")]
    LiteralAlreadyExists(ThingId),

    #[error("Thing \"{0}\" already exists.")]
    ThingAlreadyExists(ThingId),

    #[error("Statement \"{0}\" already exists.")]
    StatementAlreadyExists(StatementId),

    #[error("Class \"{child_id}\" already has a parent class (while assigning \"{parent_id}\").")]
    ParentClassAlreadyExists { child_id: ThingId, parent_id: ThingId },

    #[error("Class \"{0}\" already has child classes.")]
    ParentClassAlreadyHasChildren(ThingId),

    #[error("A label must not be blank or contain newlines and must be at most {0} characters long.")]
    InvalidLabel(usize),

    #[error("Literal value \"{label}\" is not a valid \"{datatype}\".")]
    InvalidLiteralLabel { label: String, datatype: String },

    #[error("Literal value is longer than {0} characters.")]
    LiteralLabelTooLong(usize),

    #[error("Datatype \"{0}\" is not a valid IRI or known prefixed name.")]
    InvalidLiteralDatatype(String),

    #[error("The collection of classes contains invalid or reserved classes: {}", join(.0))]
    InvalidClassCollection(Vec<ThingId>),

    #[error("Class \"{0}\" is both whitelisted and blacklisted.")]
    InvalidClassFilter(ThingId),

    #[error("The class \"{child_id}\" cannot be a subclass of \"{parent_id}\".")]
    InvalidSubclassRelation { child_id: ThingId, parent_id: ThingId },

    #[error("The URI <{0}> is not absolute.")]
    UriNotAbsolute(String),

    #[error("The class \"{0}\" already has a URI. It is not allowed to change URIs.")]
    CannotResetUri(ThingId),

    #[error("{0}")]
    InvalidStatement(InvalidStatementReason),

    #[error("Class \"{0}\" is not modifiable.")]
    ClassNotModifiable(ThingId),

    #[error("Literal \"{0}\" is not modifiable.")]
    LiteralNotModifiable(ThingId),

    #[error("Predicate \"{0}\" is not modifiable.")]
    PredicateNotModifiable(ThingId),

    #[error("Resource \"{0}\" is not modifiable.")]
    ResourceNotModifiable(ThingId),

    #[error("Statement \"{0}\" is not modifiable.")]
    StatementNotModifiable(StatementId),

    #[error("List \"{0}\" is not modifiable.")]
    ListNotModifiable(ThingId),

    #[error("Unable to delete predicate \"{0}\" because it is used in at least one statement.")]
    PredicateInUse(ThingId),

    #[error("Unable to delete resource \"{0}\" because it is used in at least one statement.")]
    ResourceUsedInStatement(ThingId),

    #[error("Unable to delete list \"{0}\" because it is used in at least one statement.")]
    ListInUse(ThingId),

    #[error("{0}")]
    StatementInUse(StatementInUseReason),

    #[error("Contributor {} does not own the entity to be changed and is not a curator.", display_contributor(.0))]
    NeitherOwnerNorCurator(Option<ContributorId>),
}

impl GraphError {
    pub fn kind(&self) -> ErrorKind {
        use GraphError::*;
        match self {
            ThingNotFound(_)
            | ClassNotFound(_)
            | PredicateNotFound(_)
            | ResourceNotFound(_)
            | LiteralNotFound(_)
            | StatementNotFound(_)
            | StatementSubjectNotFound(_)
            | StatementPredicateNotFound(_)
            | StatementObjectNotFound(_)
            | ListNotFound(_)
            | ListElementNotFound(_) => ErrorKind::NotFound,
            ClassAlreadyExists(_)
            | DuplicateUri { .. }
            | PredicateAlreadyExists(_)
            | LiteralAlreadyExists(_)
            | ThingAlreadyExists(_)
            | StatementAlreadyExists(_)
            | ParentClassAlreadyExists { .. }
            | ParentClassAlreadyHasChildren(_) => ErrorKind::AlreadyExists,
            InvalidLabel(_)
            | InvalidLiteralLabel { .. }
            | LiteralLabelTooLong(_)
            | InvalidLiteralDatatype(_)
            | InvalidClassCollection(_)
            | InvalidClassFilter(_)
            | InvalidSubclassRelation { .. }
            | UriNotAbsolute(_)
            | CannotResetUri(_)
            | InvalidStatement(_) => ErrorKind::InvalidInput,
            ClassNotModifiable(_)
            | LiteralNotModifiable(_)
            | PredicateNotModifiable(_)
            | ResourceNotModifiable(_)
            | StatementNotModifiable(_)
            | ListNotModifiable(_) => ErrorKind::NotModifiable,
            PredicateInUse(_) | ResourceUsedInStatement(_) | ListInUse(_) | StatementInUse(_) => {
                ErrorKind::InUse
            }
            NeitherOwnerNorCurator(_) => ErrorKind::Forbidden,
        }
    }
}

pub type GraphResult<T> = Result<T, GraphError>;

fn join(ids: &[ThingId]) -> String {
    ids.iter()
        .map(|id| format!("\"{}\"", id))
        .collect::<Vec<_>>()
        .join(", ")
}

fn display_contributor(id: &Option<ContributorId>) -> String {
    match id {
        Some(id) => format!("\"{}\"", id),
        None => "\"unknown\"".to_string(),
    }
}
