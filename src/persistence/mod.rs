//! Repository ports of the statement graph
//!
//! Services only talk to storage through these traits. Every method is a
//! single atomic step against the backing store; sequences of calls made by
//! a service are not. The crate ships one adapter, [`InMemoryGraph`], which
//! implements all of them over explicit adjacency indices.

pub mod memory;

pub use memory::InMemoryGraph;

use crate::graph::{
    Class, ClassSubclassRelation, Contributor, ContributorId, GeneralStatement, List, Literal,
    Predicate, PredicateUsageCount, Resource, StatementFilter, StatementId, Thing, ThingId,
};

/// Lookup of any thing by id, regardless of its kind
pub trait ThingRepository: Send + Sync {
    fn find_thing(&self, id: &ThingId) -> Option<Thing>;

    fn thing_exists(&self, id: &ThingId) -> bool {
        self.find_thing(id).is_some()
    }
}

pub trait ResourceRepository: Send + Sync {
    fn next_resource_id(&self) -> ThingId;
    fn save_resource(&self, resource: Resource);
    fn find_resource(&self, id: &ThingId) -> Option<Resource>;
    fn find_all_resources_by_class(&self, class_id: &ThingId) -> Vec<Resource>;
    /// Remove the resource, which must not take part in any statement
    fn delete_resource(&self, id: &ThingId);
}

pub trait PredicateRepository: Send + Sync {
    fn next_predicate_id(&self) -> ThingId;
    fn save_predicate(&self, predicate: Predicate);
    fn find_predicate(&self, id: &ThingId) -> Option<Predicate>;
    /// Remove the predicate together with the statements it is the subject of
    fn delete_predicate(&self, id: &ThingId);
}

pub trait ClassRepository: Send + Sync {
    fn next_class_id(&self) -> ThingId;
    fn save_class(&self, class: Class);
    fn find_class(&self, id: &ThingId) -> Option<Class>;
    fn find_class_by_uri(&self, uri: &str) -> Option<Class>;

    fn class_exists(&self, id: &ThingId) -> bool {
        self.find_class(id).is_some()
    }
}

pub trait LiteralRepository: Send + Sync {
    fn next_literal_id(&self) -> ThingId;
    fn save_literal(&self, literal: Literal);
    fn find_literal(&self, id: &ThingId) -> Option<Literal>;
}

pub trait StatementRepository: Send + Sync {
    fn next_statement_id(&self) -> StatementId;

    /// Store a statement, replacing any statement with the same id
    ///
    /// Subject, predicate and object must already exist.
    fn save_statement(&self, statement: GeneralStatement);
    fn save_all_statements(&self, statements: Vec<GeneralStatement>);

    fn find_statement(&self, id: &StatementId) -> Option<GeneralStatement>;
    fn find_statement_by_triple(
        &self,
        subject_id: &ThingId,
        predicate_id: &ThingId,
        object_id: &ThingId,
    ) -> Option<GeneralStatement>;
    /// Statements matching the filter, in insertion order
    fn find_all_statements(&self, filter: &StatementFilter) -> Vec<GeneralStatement>;
    fn find_outgoing_statements(&self, subject_id: &ThingId) -> Vec<GeneralStatement>;

    fn count_statements(&self) -> usize;
    fn count_incoming_statements(&self, object_id: &ThingId) -> usize;
    fn is_used_as_object(&self, id: &ThingId) -> bool {
        self.count_incoming_statements(id) > 0
    }
    /// Whether the thing is the subject or object of any statement
    fn has_statements(&self, id: &ThingId) -> bool;
    fn is_predicate_used(&self, predicate_id: &ThingId) -> bool;
    /// Usage per predicate, most used first, ties ordered by id
    fn count_predicate_usage(&self) -> Vec<PredicateUsageCount>;

    /// Delete statements by id and return the literals left without any
    /// incoming statement, which are removed as well
    fn delete_statements(&self, ids: &[StatementId]) -> Vec<ThingId>;
    fn delete_all_statements(&self);
}

/// Read side of the class forest
pub trait ClassHierarchyRepository: Send + Sync {
    fn find_parent_id(&self, child_id: &ThingId) -> Option<ThingId>;
    /// Direct subclasses, ordered by id
    fn find_child_ids(&self, parent_id: &ThingId) -> Vec<ThingId>;
    /// True if `child_id` is a transitive subclass of `id`
    fn exists_child(&self, id: &ThingId, child_id: &ThingId) -> bool;
    /// Topmost ancestor, or `None` when the class has no parent
    fn find_root_id(&self, id: &ThingId) -> Option<ThingId>;
    /// Classes without a parent, ordered by id
    fn find_all_root_ids(&self) -> Vec<ThingId>;
    /// Resources that are instances of the class or any of its subclasses
    fn count_class_instances(&self, id: &ThingId) -> usize;
}

/// Write side of the class forest
pub trait ClassRelationRepository: Send + Sync {
    fn save_relations(&self, relations: Vec<ClassSubclassRelation>);
    fn delete_relation_by_child_id(&self, child_id: &ThingId);
    fn delete_all_relations(&self);
}

pub trait ListRepository: Send + Sync {
    /// Store the list resource and replace its element statements atomically
    fn save_list(&self, list: List);
    fn find_list(&self, id: &ThingId) -> Option<List>;
    fn list_exists(&self, id: &ThingId) -> bool {
        self.find_list(id).is_some()
    }
    fn delete_list(&self, id: &ThingId);
}

pub trait ContributorRepository: Send + Sync {
    fn save_contributor(&self, contributor: Contributor);
    fn find_contributor(&self, id: &ContributorId) -> Option<Contributor>;
}
