//! Statements and class relations: the edges of the graph

use super::thing::{Class, Predicate, Thing};
use super::types::{ContributorId, StatementId, ThingId};
use super::vocab::predicates;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A materialized subject -> predicate -> object edge
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneralStatement {
    pub id: StatementId,
    pub subject: Thing,
    pub predicate: Predicate,
    pub object: Thing,
    pub created_at: DateTime<Utc>,
    pub created_by: Option<ContributorId>,
    pub modifiable: bool,
    /// Position of the object inside a list, for list element statements
    pub index: Option<usize>,
}

impl GeneralStatement {
    /// A `hasListElement` edge out of a `List` resource
    ///
    /// Such edges are owned by the list they belong to and may only be
    /// changed through the list service.
    pub fn is_list_element_statement(&self) -> bool {
        is_list_element_edge(&self.subject, &self.predicate.id)
    }
}

/// True when an edge from `subject` over `predicate_id` would be a list element edge
pub fn is_list_element_edge(subject: &Thing, predicate_id: &ThingId) -> bool {
    predicate_id == predicates::HAS_LIST_ELEMENT
        && subject.as_resource().map(|r| r.is_list()).unwrap_or(false)
}

/// A `child -> parent` subclass edge
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassSubclassRelation {
    pub child: Class,
    pub parent: Class,
    pub created_at: DateTime<Utc>,
    pub created_by: Option<ContributorId>,
}

/// A direct subclass together with the number of its own direct subclasses
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChildClass {
    pub class: Class,
    pub child_count: usize,
}

/// One class of an ancestor chain
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassHierarchyEntry {
    pub class: Class,
    pub parent_id: Option<ThingId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredicateUsageCount {
    pub predicate_id: ThingId,
    pub count: usize,
}

/// Conjunctive filter over statements; `None` fields match everything
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatementFilter {
    pub subject_id: Option<ThingId>,
    pub predicate_id: Option<ThingId>,
    pub object_id: Option<ThingId>,
    pub object_label: Option<String>,
    pub created_by: Option<ContributorId>,
    pub created_at_start: Option<DateTime<Utc>>,
    pub created_at_end: Option<DateTime<Utc>>,
}

impl StatementFilter {
    pub fn matches(&self, statement: &GeneralStatement) -> bool {
        self.subject_id.as_ref().map_or(true, |id| statement.subject.id() == id)
            && self.predicate_id.as_ref().map_or(true, |id| &statement.predicate.id == id)
            && self.object_id.as_ref().map_or(true, |id| statement.object.id() == id)
            && self
                .object_label
                .as_deref()
                .map_or(true, |label| statement.object.label() == label)
            && self
                .created_by
                .map_or(true, |by| statement.created_by == Some(by))
            && self
                .created_at_start
                .map_or(true, |start| statement.created_at >= start)
            && self
                .created_at_end
                .map_or(true, |end| statement.created_at <= end)
    }
}
