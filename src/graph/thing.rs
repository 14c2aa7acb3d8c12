//! Things: the typed vertices of the statement graph
//!
//! A thing is one of four closed variants:
//! - Resource: an entity with zero or more classes
//! - Literal: a typed value
//! - Predicate: the label of an edge
//! - Class: a type that resources can be instances of

use super::types::{ContributorId, ObservatoryId, OrganizationId, ThingId};
use super::vocab::classes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// How a resource came into the graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExtractionMethod {
    #[default]
    Unknown,
    Manual,
    Automatic,
}

/// Listing state of a resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Visibility {
    #[default]
    Default,
    Featured,
    Unlisted,
    Deleted,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    pub id: ThingId,
    pub label: String,
    pub created_at: DateTime<Utc>,
    /// Ordered set of class ids this resource is an instance of
    pub classes: BTreeSet<ThingId>,
    pub created_by: Option<ContributorId>,
    pub observatory_id: Option<ObservatoryId>,
    pub organization_id: Option<OrganizationId>,
    pub extraction_method: ExtractionMethod,
    pub visibility: Visibility,
    pub verified: Option<bool>,
    /// Who unlisted the resource; only set while visibility is Unlisted
    pub unlisted_by: Option<ContributorId>,
    pub modifiable: bool,
}

impl Resource {
    pub fn new(id: impl Into<ThingId>, label: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Resource {
            id: id.into(),
            label: label.into(),
            created_at,
            classes: BTreeSet::new(),
            created_by: None,
            observatory_id: None,
            organization_id: None,
            extraction_method: ExtractionMethod::Unknown,
            visibility: Visibility::Default,
            verified: None,
            unlisted_by: None,
            modifiable: true,
        }
    }

    pub fn with_class(mut self, class: impl Into<ThingId>) -> Self {
        self.classes.insert(class.into());
        self
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn is_list(&self) -> bool {
        self.has_class(classes::LIST)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Literal {
    pub id: ThingId,
    pub label: String,
    pub datatype: String,
    pub created_at: DateTime<Utc>,
    pub created_by: Option<ContributorId>,
    pub modifiable: bool,
}

impl Literal {
    pub const DEFAULT_DATATYPE: &'static str = "xsd:string";

    pub fn new(id: impl Into<ThingId>, label: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Literal {
            id: id.into(),
            label: label.into(),
            datatype: Self::DEFAULT_DATATYPE.to_string(),
            created_at,
            created_by: None,
            modifiable: true,
        }
    }

    pub fn with_datatype(mut self, datatype: impl Into<String>) -> Self {
        self.datatype = datatype.into();
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Predicate {
    pub id: ThingId,
    pub label: String,
    pub created_at: DateTime<Utc>,
    pub created_by: Option<ContributorId>,
    pub modifiable: bool,
}

impl Predicate {
    pub fn new(id: impl Into<ThingId>, label: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Predicate {
            id: id.into(),
            label: label.into(),
            created_at,
            created_by: None,
            modifiable: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Class {
    pub id: ThingId,
    pub label: String,
    /// Absolute IRI; once set it is immutable
    pub uri: Option<String>,
    pub created_at: DateTime<Utc>,
    pub created_by: Option<ContributorId>,
    pub modifiable: bool,
}

impl Class {
    pub fn new(id: impl Into<ThingId>, label: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Class {
            id: id.into(),
            label: label.into(),
            uri: None,
            created_at,
            created_by: None,
            modifiable: true,
        }
    }

    pub fn with_uri(mut self, uri: impl Into<String>) -> Self {
        self.uri = Some(uri.into());
        self
    }
}

/// Any vertex of the graph
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "_class", rename_all = "snake_case")]
pub enum Thing {
    Resource(Resource),
    Literal(Literal),
    Predicate(Predicate),
    Class(Class),
}

impl Thing {
    pub fn id(&self) -> &ThingId {
        match self {
            Thing::Resource(r) => &r.id,
            Thing::Literal(l) => &l.id,
            Thing::Predicate(p) => &p.id,
            Thing::Class(c) => &c.id,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Thing::Resource(r) => &r.label,
            Thing::Literal(l) => &l.label,
            Thing::Predicate(p) => &p.label,
            Thing::Class(c) => &c.label,
        }
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        match self {
            Thing::Resource(r) => r.created_at,
            Thing::Literal(l) => l.created_at,
            Thing::Predicate(p) => p.created_at,
            Thing::Class(c) => c.created_at,
        }
    }

    pub fn created_by(&self) -> Option<ContributorId> {
        match self {
            Thing::Resource(r) => r.created_by,
            Thing::Literal(l) => l.created_by,
            Thing::Predicate(p) => p.created_by,
            Thing::Class(c) => c.created_by,
        }
    }

    pub fn modifiable(&self) -> bool {
        match self {
            Thing::Resource(r) => r.modifiable,
            Thing::Literal(l) => l.modifiable,
            Thing::Predicate(p) => p.modifiable,
            Thing::Class(c) => c.modifiable,
        }
    }

    pub fn is_literal(&self) -> bool {
        matches!(self, Thing::Literal(_))
    }

    pub fn as_resource(&self) -> Option<&Resource> {
        match self {
            Thing::Resource(r) => Some(r),
            _ => None,
        }
    }

    pub fn as_class(&self) -> Option<&Class> {
        match self {
            Thing::Class(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_predicate(&self) -> Option<&Predicate> {
        match self {
            Thing::Predicate(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_literal(&self) -> Option<&Literal> {
        match self {
            Thing::Literal(l) => Some(l),
            _ => None,
        }
    }

    /// Labels a thing carries in the graph, as matched by bundle filters
    ///
    /// Every thing carries `Thing` plus its kind; resources additionally
    /// carry each of their class ids.
    pub fn thing_labels(&self) -> Vec<ThingId> {
        let kind = match self {
            Thing::Resource(_) => classes::RESOURCE,
            Thing::Literal(_) => classes::LITERAL,
            Thing::Predicate(_) => classes::PREDICATE,
            Thing::Class(_) => classes::CLASS,
        };
        let mut labels = vec![ThingId::new(classes::THING), ThingId::new(kind)];
        if let Thing::Resource(r) = self {
            labels.extend(r.classes.iter().cloned());
        }
        labels
    }

    pub fn has_any_label(&self, candidates: &[ThingId]) -> bool {
        let labels = self.thing_labels();
        candidates.iter().any(|c| labels.contains(c))
    }
}

impl From<Resource> for Thing {
    fn from(r: Resource) -> Self {
        Thing::Resource(r)
    }
}

impl From<Literal> for Thing {
    fn from(l: Literal) -> Self {
        Thing::Literal(l)
    }
}

impl From<Predicate> for Thing {
    fn from(p: Predicate) -> Self {
        Thing::Predicate(p)
    }
}

impl From<Class> for Thing {
    fn from(c: Class) -> Self {
        Thing::Class(c)
    }
}

/// An ordered list of things, stored as a `List` resource with indexed
/// `hasListElement` statements
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct List {
    pub id: ThingId,
    pub label: String,
    pub elements: Vec<ThingId>,
    pub created_at: DateTime<Utc>,
    pub created_by: Option<ContributorId>,
    pub modifiable: bool,
}
