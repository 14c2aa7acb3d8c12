//! In-memory backend implementing every repository port
//!
//! Statements are stored by id reference and materialized on read, so
//! changes to a thing are visible through every statement touching it.
//! Outgoing and incoming adjacency lists keep insertion order.

use super::{
    ClassHierarchyRepository, ClassRelationRepository, ClassRepository, ContributorRepository,
    ListRepository, LiteralRepository, PredicateRepository, ResourceRepository,
    StatementRepository, ThingRepository,
};
use crate::graph::vocab::{classes, predicates};
use crate::graph::{
    Class, ClassSubclassRelation, Contributor, ContributorId, GeneralStatement, List, Literal,
    Predicate, PredicateUsageCount, Resource, StatementFilter, StatementId, Thing, ThingId,
};
use chrono::{DateTime, Utc};
use indexmap::{IndexMap, IndexSet};
use parking_lot::RwLock;
use std::collections::{BTreeSet, HashMap, VecDeque};
use tracing::debug;

/// A statement as stored: ids only
#[derive(Debug, Clone)]
struct StoredStatement {
    id: StatementId,
    subject_id: ThingId,
    predicate_id: ThingId,
    object_id: ThingId,
    created_at: DateTime<Utc>,
    created_by: Option<ContributorId>,
    modifiable: bool,
    index: Option<usize>,
}

impl From<&GeneralStatement> for StoredStatement {
    fn from(s: &GeneralStatement) -> Self {
        StoredStatement {
            id: s.id.clone(),
            subject_id: s.subject.id().clone(),
            predicate_id: s.predicate.id.clone(),
            object_id: s.object.id().clone(),
            created_at: s.created_at,
            created_by: s.created_by,
            modifiable: s.modifiable,
            index: s.index,
        }
    }
}

#[derive(Debug, Clone)]
struct ParentEdge {
    parent_id: ThingId,
    #[allow(dead_code)]
    created_at: DateTime<Utc>,
    #[allow(dead_code)]
    created_by: Option<ContributorId>,
}

#[derive(Debug, Default)]
struct GraphState {
    things: HashMap<ThingId, Thing>,
    statements: IndexMap<StatementId, StoredStatement>,
    outgoing: HashMap<ThingId, IndexSet<StatementId>>,
    incoming: HashMap<ThingId, IndexSet<StatementId>>,
    class_parents: HashMap<ThingId, ParentEdge>,
    class_children: HashMap<ThingId, BTreeSet<ThingId>>,
    contributors: HashMap<ContributorId, Contributor>,
    id_counters: HashMap<char, u64>,
}

impl GraphState {
    fn next_id(&mut self, prefix: char) -> String {
        loop {
            let counter = self.id_counters.entry(prefix).or_insert(0);
            *counter += 1;
            let candidate = format!("{}{}", prefix, counter);
            let taken = if prefix == 'S' {
                self.statements.contains_key(&StatementId::new(candidate.as_str()))
            } else {
                self.things.contains_key(&ThingId::new(candidate.as_str()))
            };
            if !taken {
                return candidate;
            }
        }
    }

    fn materialize(&self, stored: &StoredStatement) -> Option<GeneralStatement> {
        let subject = self.things.get(&stored.subject_id)?.clone();
        let predicate = self.things.get(&stored.predicate_id)?.as_predicate()?.clone();
        let object = self.things.get(&stored.object_id)?.clone();
        Some(GeneralStatement {
            id: stored.id.clone(),
            subject,
            predicate,
            object,
            created_at: stored.created_at,
            created_by: stored.created_by,
            modifiable: stored.modifiable,
            index: stored.index,
        })
    }

    fn materialize_all<'a>(
        &self,
        ids: impl IntoIterator<Item = &'a StatementId>,
    ) -> Vec<GeneralStatement> {
        ids.into_iter()
            .filter_map(|id| self.statements.get(id))
            .filter_map(|stored| self.materialize(stored))
            .collect()
    }

    fn insert_statement(&mut self, stored: StoredStatement) {
        self.unlink_statement(&stored.id);
        self.outgoing
            .entry(stored.subject_id.clone())
            .or_default()
            .insert(stored.id.clone());
        self.incoming
            .entry(stored.object_id.clone())
            .or_default()
            .insert(stored.id.clone());
        self.statements.insert(stored.id.clone(), stored);
    }

    /// Remove a statement from all indices, returning it
    fn unlink_statement(&mut self, id: &StatementId) -> Option<StoredStatement> {
        let stored = self.statements.shift_remove(id)?;
        if let Some(out) = self.outgoing.get_mut(&stored.subject_id) {
            out.shift_remove(id);
        }
        if let Some(inc) = self.incoming.get_mut(&stored.object_id) {
            inc.shift_remove(id);
        }
        Some(stored)
    }

    fn incoming_count(&self, id: &ThingId) -> usize {
        self.incoming.get(id).map_or(0, |s| s.len())
    }

    /// Drop literals among `candidates` that nothing points to any more
    fn collect_orphan_literals(&mut self, candidates: Vec<ThingId>) -> Vec<ThingId> {
        let mut collected = Vec::new();
        for id in candidates {
            if collected.contains(&id) {
                continue;
            }
            let is_literal = self.things.get(&id).map_or(false, Thing::is_literal);
            if is_literal && self.incoming_count(&id) == 0 {
                self.things.remove(&id);
                self.incoming.remove(&id);
                collected.push(id);
            }
        }
        collected
    }

    fn delete_statements(&mut self, ids: &[StatementId]) -> Vec<ThingId> {
        let objects: Vec<ThingId> = ids
            .iter()
            .filter_map(|id| self.unlink_statement(id))
            .map(|stored| stored.object_id)
            .collect();
        self.collect_orphan_literals(objects)
    }

    fn outgoing_ids(&self, id: &ThingId) -> Vec<StatementId> {
        self.outgoing
            .get(id)
            .map(|s| s.iter().cloned().collect())
            .unwrap_or_default()
    }

    fn descendants_of(&self, id: &ThingId) -> Vec<ThingId> {
        let mut result = Vec::new();
        let mut queue: VecDeque<&ThingId> = VecDeque::new();
        queue.push_back(id);
        while let Some(current) = queue.pop_front() {
            if let Some(children) = self.class_children.get(current) {
                for child in children {
                    if !result.contains(child) && child != id {
                        result.push(child.clone());
                        queue.push_back(child);
                    }
                }
            }
        }
        result
    }
}

/// Thread-safe in-memory graph
#[derive(Debug, Default)]
pub struct InMemoryGraph {
    state: RwLock<GraphState>,
}

impl InMemoryGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of things of any kind
    pub fn thing_count(&self) -> usize {
        self.state.read().things.len()
    }

    /// Remove everything
    pub fn clear(&self) {
        *self.state.write() = GraphState::default();
    }

    fn save_thing(&self, thing: Thing) {
        let mut state = self.state.write();
        state.things.insert(thing.id().clone(), thing);
    }
}

impl ThingRepository for InMemoryGraph {
    fn find_thing(&self, id: &ThingId) -> Option<Thing> {
        self.state.read().things.get(id).cloned()
    }
}

impl ResourceRepository for InMemoryGraph {
    fn next_resource_id(&self) -> ThingId {
        ThingId::new(self.state.write().next_id('R'))
    }

    fn save_resource(&self, resource: Resource) {
        self.save_thing(resource.into());
    }

    fn find_resource(&self, id: &ThingId) -> Option<Resource> {
        self.state
            .read()
            .things
            .get(id)
            .and_then(Thing::as_resource)
            .cloned()
    }

    fn find_all_resources_by_class(&self, class_id: &ThingId) -> Vec<Resource> {
        let state = self.state.read();
        let mut resources: Vec<Resource> = state
            .things
            .values()
            .filter_map(Thing::as_resource)
            .filter(|r| r.classes.contains(class_id))
            .cloned()
            .collect();
        resources.sort_by(|a, b| a.id.cmp(&b.id));
        resources
    }

    fn delete_resource(&self, id: &ThingId) {
        let mut state = self.state.write();
        if !matches!(state.things.get(id), Some(Thing::Resource(_))) {
            return;
        }
        state.things.remove(id);
        state.outgoing.remove(id);
        state.incoming.remove(id);
        debug!("Deleted resource {}", id);
    }
}

impl PredicateRepository for InMemoryGraph {
    fn next_predicate_id(&self) -> ThingId {
        ThingId::new(self.state.write().next_id('P'))
    }

    fn save_predicate(&self, predicate: Predicate) {
        self.save_thing(predicate.into());
    }

    fn find_predicate(&self, id: &ThingId) -> Option<Predicate> {
        self.state
            .read()
            .things
            .get(id)
            .and_then(Thing::as_predicate)
            .cloned()
    }

    fn delete_predicate(&self, id: &ThingId) {
        let mut state = self.state.write();
        if !matches!(state.things.get(id), Some(Thing::Predicate(_))) {
            return;
        }
        // Statements describing the predicate go with it
        let outgoing = state.outgoing_ids(id);
        let collected = state.delete_statements(&outgoing);
        state.things.remove(id);
        state.outgoing.remove(id);
        state.incoming.remove(id);
        debug!(
            "Deleted predicate {} with {} statements, {} literals collected",
            id,
            outgoing.len(),
            collected.len()
        );
    }
}

impl ClassRepository for InMemoryGraph {
    fn next_class_id(&self) -> ThingId {
        ThingId::new(self.state.write().next_id('C'))
    }

    fn save_class(&self, class: Class) {
        self.save_thing(class.into());
    }

    fn find_class(&self, id: &ThingId) -> Option<Class> {
        self.state
            .read()
            .things
            .get(id)
            .and_then(Thing::as_class)
            .cloned()
    }

    fn find_class_by_uri(&self, uri: &str) -> Option<Class> {
        self.state
            .read()
            .things
            .values()
            .filter_map(Thing::as_class)
            .find(|c| c.uri.as_deref() == Some(uri))
            .cloned()
    }
}

impl LiteralRepository for InMemoryGraph {
    fn next_literal_id(&self) -> ThingId {
        ThingId::new(self.state.write().next_id('L'))
    }

    fn save_literal(&self, literal: Literal) {
        self.save_thing(literal.into());
    }

    fn find_literal(&self, id: &ThingId) -> Option<Literal> {
        self.state
            .read()
            .things
            .get(id)
            .and_then(Thing::as_literal)
            .cloned()
    }
}

impl StatementRepository for InMemoryGraph {
    fn next_statement_id(&self) -> StatementId {
        StatementId::new(self.state.write().next_id('S'))
    }

    fn save_statement(&self, statement: GeneralStatement) {
        self.state.write().insert_statement((&statement).into());
    }

    fn save_all_statements(&self, statements: Vec<GeneralStatement>) {
        let mut state = self.state.write();
        for statement in &statements {
            state.insert_statement(statement.into());
        }
    }

    fn find_statement(&self, id: &StatementId) -> Option<GeneralStatement> {
        let state = self.state.read();
        state.statements.get(id).and_then(|s| state.materialize(s))
    }

    fn find_statement_by_triple(
        &self,
        subject_id: &ThingId,
        predicate_id: &ThingId,
        object_id: &ThingId,
    ) -> Option<GeneralStatement> {
        let state = self.state.read();
        state
            .outgoing
            .get(subject_id)?
            .iter()
            .filter_map(|id| state.statements.get(id))
            .find(|s| &s.predicate_id == predicate_id && &s.object_id == object_id)
            .and_then(|s| state.materialize(s))
    }

    fn find_all_statements(&self, filter: &StatementFilter) -> Vec<GeneralStatement> {
        let state = self.state.read();
        let candidates: Vec<GeneralStatement> = if let Some(subject_id) = &filter.subject_id {
            state.materialize_all(state.outgoing.get(subject_id).into_iter().flatten())
        } else if let Some(object_id) = &filter.object_id {
            state.materialize_all(state.incoming.get(object_id).into_iter().flatten())
        } else {
            state.materialize_all(state.statements.keys())
        };
        candidates.into_iter().filter(|s| filter.matches(s)).collect()
    }

    fn find_outgoing_statements(&self, subject_id: &ThingId) -> Vec<GeneralStatement> {
        let state = self.state.read();
        state.materialize_all(state.outgoing.get(subject_id).into_iter().flatten())
    }

    fn count_statements(&self) -> usize {
        self.state.read().statements.len()
    }

    fn count_incoming_statements(&self, object_id: &ThingId) -> usize {
        self.state.read().incoming_count(object_id)
    }

    fn has_statements(&self, id: &ThingId) -> bool {
        let state = self.state.read();
        state.incoming_count(id) > 0 || state.outgoing.get(id).map_or(false, |s| !s.is_empty())
    }

    fn is_predicate_used(&self, predicate_id: &ThingId) -> bool {
        self.state
            .read()
            .statements
            .values()
            .any(|s| &s.predicate_id == predicate_id)
    }

    fn count_predicate_usage(&self) -> Vec<PredicateUsageCount> {
        let state = self.state.read();
        let mut counts: HashMap<&ThingId, usize> = HashMap::new();
        for stored in state.statements.values() {
            *counts.entry(&stored.predicate_id).or_insert(0) += 1;
        }
        let mut usage: Vec<PredicateUsageCount> = counts
            .into_iter()
            .map(|(id, count)| PredicateUsageCount {
                predicate_id: id.clone(),
                count,
            })
            .collect();
        usage.sort_by(|a, b| {
            b.count
                .cmp(&a.count)
                .then_with(|| a.predicate_id.cmp(&b.predicate_id))
        });
        usage
    }

    fn delete_statements(&self, ids: &[StatementId]) -> Vec<ThingId> {
        self.state.write().delete_statements(ids)
    }

    fn delete_all_statements(&self) {
        let mut state = self.state.write();
        let ids: Vec<StatementId> = state.statements.keys().cloned().collect();
        state.delete_statements(&ids);
    }
}

impl ClassHierarchyRepository for InMemoryGraph {
    fn find_parent_id(&self, child_id: &ThingId) -> Option<ThingId> {
        self.state
            .read()
            .class_parents
            .get(child_id)
            .map(|edge| edge.parent_id.clone())
    }

    fn find_child_ids(&self, parent_id: &ThingId) -> Vec<ThingId> {
        self.state
            .read()
            .class_children
            .get(parent_id)
            .map(|children| children.iter().cloned().collect())
            .unwrap_or_default()
    }

    fn exists_child(&self, id: &ThingId, child_id: &ThingId) -> bool {
        self.state.read().descendants_of(id).contains(child_id)
    }

    fn find_root_id(&self, id: &ThingId) -> Option<ThingId> {
        let state = self.state.read();
        let mut current = state.class_parents.get(id)?.parent_id.clone();
        let mut seen = vec![id.clone()];
        while let Some(edge) = state.class_parents.get(&current) {
            if seen.contains(&current) {
                break;
            }
            seen.push(current.clone());
            current = edge.parent_id.clone();
        }
        Some(current)
    }

    fn find_all_root_ids(&self) -> Vec<ThingId> {
        let state = self.state.read();
        let mut roots: Vec<ThingId> = state
            .things
            .values()
            .filter_map(Thing::as_class)
            .filter(|c| !state.class_parents.contains_key(&c.id))
            .map(|c| c.id.clone())
            .collect();
        roots.sort();
        roots
    }

    fn count_class_instances(&self, id: &ThingId) -> usize {
        let state = self.state.read();
        let mut class_ids = state.descendants_of(id);
        class_ids.push(id.clone());
        state
            .things
            .values()
            .filter_map(Thing::as_resource)
            .filter(|r| class_ids.iter().any(|c| r.classes.contains(c)))
            .count()
    }
}

impl ClassRelationRepository for InMemoryGraph {
    fn save_relations(&self, relations: Vec<ClassSubclassRelation>) {
        let mut state = self.state.write();
        for relation in relations {
            let child_id = relation.child.id.clone();
            let parent_id = relation.parent.id.clone();
            if let Some(old) = state.class_parents.get(&child_id).cloned() {
                if let Some(children) = state.class_children.get_mut(&old.parent_id) {
                    children.remove(&child_id);
                }
            }
            state
                .class_children
                .entry(parent_id.clone())
                .or_default()
                .insert(child_id.clone());
            state.class_parents.insert(
                child_id,
                ParentEdge {
                    parent_id,
                    created_at: relation.created_at,
                    created_by: relation.created_by,
                },
            );
        }
    }

    fn delete_relation_by_child_id(&self, child_id: &ThingId) {
        let mut state = self.state.write();
        if let Some(edge) = state.class_parents.remove(child_id) {
            if let Some(children) = state.class_children.get_mut(&edge.parent_id) {
                children.remove(child_id);
            }
        }
    }

    fn delete_all_relations(&self) {
        let mut state = self.state.write();
        state.class_parents.clear();
        state.class_children.clear();
    }
}

impl ListRepository for InMemoryGraph {
    fn save_list(&self, list: List) {
        let mut state = self.state.write();
        let has_list_element = ThingId::new(predicates::HAS_LIST_ELEMENT);
        if !state.things.contains_key(&has_list_element) {
            state.things.insert(
                has_list_element.clone(),
                Predicate::new(has_list_element.clone(), "has list element", list.created_at).into(),
            );
        }

        let mut resource = match state.things.get(&list.id) {
            Some(Thing::Resource(existing)) => existing.clone(),
            _ => Resource::new(list.id.clone(), list.label.clone(), list.created_at)
                .with_class(classes::LIST),
        };
        resource.label = list.label.clone();
        resource.created_by = list.created_by;
        resource.modifiable = list.modifiable;
        resource.classes.insert(ThingId::new(classes::LIST));
        state.things.insert(list.id.clone(), resource.into());

        let old: Vec<StoredStatement> = state
            .outgoing_ids(&list.id)
            .iter()
            .filter_map(|id| state.statements.get(id))
            .filter(|s| s.predicate_id == has_list_element)
            .cloned()
            .collect();
        for stored in &old {
            state.unlink_statement(&stored.id);
        }

        for (index, element) in list.elements.iter().enumerate() {
            let id = StatementId::new(state.next_id('S'));
            state.insert_statement(StoredStatement {
                id,
                subject_id: list.id.clone(),
                predicate_id: has_list_element.clone(),
                object_id: element.clone(),
                created_at: list.created_at,
                created_by: list.created_by,
                modifiable: true,
                index: Some(index),
            });
        }

        state.collect_orphan_literals(old.into_iter().map(|s| s.object_id).collect());
    }

    fn find_list(&self, id: &ThingId) -> Option<List> {
        let state = self.state.read();
        let resource = state.things.get(id)?.as_resource()?;
        if !resource.is_list() {
            return None;
        }
        let mut elements: Vec<(usize, ThingId)> = state
            .outgoing
            .get(id)
            .into_iter()
            .flatten()
            .filter_map(|sid| state.statements.get(sid))
            .filter(|s| s.predicate_id == predicates::HAS_LIST_ELEMENT)
            .map(|s| (s.index.unwrap_or(usize::MAX), s.object_id.clone()))
            .collect();
        elements.sort_by_key(|(index, _)| *index);
        Some(List {
            id: resource.id.clone(),
            label: resource.label.clone(),
            elements: elements.into_iter().map(|(_, id)| id).collect(),
            created_at: resource.created_at,
            created_by: resource.created_by,
            modifiable: resource.modifiable,
        })
    }

    fn delete_list(&self, id: &ThingId) {
        let mut state = self.state.write();
        let is_list = state
            .things
            .get(id)
            .and_then(Thing::as_resource)
            .map_or(false, Resource::is_list);
        if !is_list {
            return;
        }
        let outgoing = state.outgoing_ids(id);
        state.delete_statements(&outgoing);
        state.things.remove(id);
        state.outgoing.remove(id);
    }
}

impl ContributorRepository for InMemoryGraph {
    fn save_contributor(&self, contributor: Contributor) {
        self.state
            .write()
            .contributors
            .insert(contributor.id, contributor);
    }

    fn find_contributor(&self, id: &ContributorId) -> Option<Contributor> {
        self.state.read().contributors.get(id).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn now() -> DateTime<Utc> {
        Utc::now()
    }

    fn statement(graph: &InMemoryGraph, subject: &str, predicate: &str, object: &str) -> StatementId {
        let id = graph.next_statement_id();
        let subject = graph.find_thing(&ThingId::new(subject)).unwrap();
        let predicate = graph.find_predicate(&ThingId::new(predicate)).unwrap();
        let object = graph.find_thing(&ThingId::new(object)).unwrap();
        graph.save_statement(GeneralStatement {
            id: id.clone(),
            subject,
            predicate,
            object,
            created_at: now(),
            created_by: None,
            modifiable: true,
            index: None,
        });
        id
    }

    fn seeded() -> InMemoryGraph {
        let graph = InMemoryGraph::new();
        graph.save_resource(Resource::new("R1", "Paper A", now()));
        graph.save_resource(Resource::new("R2", "Paper B", now()));
        graph.save_predicate(Predicate::new("P1", "cites", now()));
        graph.save_literal(Literal::new("L1", "2023", now()));
        graph
    }

    #[test]
    fn test_generated_ids_skip_taken() {
        let graph = seeded();
        assert_eq!(graph.next_resource_id(), ThingId::new("R3"));
        assert_eq!(graph.next_literal_id(), ThingId::new("L2"));
        assert_eq!(graph.next_statement_id(), StatementId::new("S1"));
        assert_eq!(graph.next_statement_id(), StatementId::new("S2"));
    }

    #[test]
    fn test_adjacency_and_materialization() {
        let graph = seeded();
        let s1 = statement(&graph, "R1", "P1", "R2");
        statement(&graph, "R1", "P1", "L1");

        assert_eq!(graph.count_statements(), 2);
        assert_eq!(graph.find_outgoing_statements(&ThingId::new("R1")).len(), 2);
        assert_eq!(graph.count_incoming_statements(&ThingId::new("R2")), 1);
        assert!(graph.is_predicate_used(&ThingId::new("P1")));

        let found = graph
            .find_statement_by_triple(&ThingId::new("R1"), &ThingId::new("P1"), &ThingId::new("R2"))
            .unwrap();
        assert_eq!(found.id, s1);

        // Things are materialized on read
        graph.save_resource(Resource::new("R2", "Paper B (revised)", now()));
        let found = graph.find_statement(&s1).unwrap();
        assert_eq!(found.object.label(), "Paper B (revised)");
    }

    #[test]
    fn test_delete_collects_orphan_literals() {
        let graph = seeded();
        let s1 = statement(&graph, "R1", "P1", "L1");
        let s2 = statement(&graph, "R2", "P1", "L1");

        assert!(graph.delete_statements(&[s1]).is_empty());
        assert!(graph.find_literal(&ThingId::new("L1")).is_some());

        let collected = graph.delete_statements(&[s2]);
        assert_eq!(collected, vec![ThingId::new("L1")]);
        assert!(graph.find_literal(&ThingId::new("L1")).is_none());
    }

    #[test]
    fn test_delete_ignores_missing_ids() {
        let graph = seeded();
        statement(&graph, "R1", "P1", "R2");
        assert!(graph.delete_statements(&[StatementId::new("S404")]).is_empty());
        assert_eq!(graph.count_statements(), 1);
    }

    #[test]
    fn test_predicate_usage_counts() {
        let graph = seeded();
        graph.save_predicate(Predicate::new("P2", "year", now()));
        statement(&graph, "R1", "P1", "R2");
        statement(&graph, "R2", "P1", "R1");
        statement(&graph, "R1", "P2", "L1");

        let usage = graph.count_predicate_usage();
        assert_eq!(usage[0].predicate_id, ThingId::new("P1"));
        assert_eq!(usage[0].count, 2);
        assert_eq!(usage[1].count, 1);
    }

    #[test]
    fn test_class_forest_queries() {
        // 1 -> {2, 3}, 3 -> {5, 6}, 4 on its own
        let graph = InMemoryGraph::new();
        for id in ["1", "2", "3", "4", "5", "6"] {
            graph.save_class(Class::new(id, format!("class {}", id), now()));
        }
        let relation = |child: &str, parent: &str| ClassSubclassRelation {
            child: graph.find_class(&ThingId::new(child)).unwrap(),
            parent: graph.find_class(&ThingId::new(parent)).unwrap(),
            created_at: now(),
            created_by: None,
        };
        graph.save_relations(vec![
            relation("2", "1"),
            relation("3", "1"),
            relation("5", "3"),
            relation("6", "3"),
        ]);

        assert_eq!(
            graph.find_all_root_ids(),
            vec![ThingId::new("1"), ThingId::new("4")]
        );
        assert_eq!(graph.find_root_id(&ThingId::new("6")), Some(ThingId::new("1")));
        assert_eq!(graph.find_root_id(&ThingId::new("1")), None);
        assert!(graph.exists_child(&ThingId::new("1"), &ThingId::new("6")));
        assert!(!graph.exists_child(&ThingId::new("6"), &ThingId::new("1")));
        assert_eq!(
            graph.find_child_ids(&ThingId::new("3")),
            vec![ThingId::new("5"), ThingId::new("6")]
        );

        graph.save_resource(Resource::new("R1", "instance", now()).with_class("5"));
        graph.save_resource(Resource::new("R2", "instance", now()).with_class("2"));
        graph.save_resource(Resource::new("R3", "instance", now()).with_class("4"));
        assert_eq!(graph.count_class_instances(&ThingId::new("1")), 2);
        assert_eq!(graph.count_class_instances(&ThingId::new("3")), 1);

        graph.delete_relation_by_child_id(&ThingId::new("3"));
        assert_eq!(graph.find_parent_id(&ThingId::new("3")), None);
        assert_eq!(graph.find_child_ids(&ThingId::new("1")), vec![ThingId::new("2")]);
    }

    #[test]
    fn test_list_round_trip_keeps_order_and_duplicates() {
        let graph = seeded();
        graph.save_list(List {
            id: ThingId::new("R10"),
            label: "authors".to_string(),
            elements: vec![ThingId::new("R2"), ThingId::new("L1"), ThingId::new("R2")],
            created_at: now(),
            created_by: None,
            modifiable: true,
        });

        let list = graph.find_list(&ThingId::new("R10")).unwrap();
        assert_eq!(
            list.elements,
            vec![ThingId::new("R2"), ThingId::new("L1"), ThingId::new("R2")]
        );
        assert!(graph.find_resource(&ThingId::new("R10")).unwrap().is_list());

        graph.save_list(List {
            elements: vec![ThingId::new("R1")],
            ..list
        });
        let list = graph.find_list(&ThingId::new("R10")).unwrap();
        assert_eq!(list.elements, vec![ThingId::new("R1")]);
        // L1 lost its only incoming statement
        assert!(graph.find_literal(&ThingId::new("L1")).is_none());

        graph.delete_list(&ThingId::new("R10"));
        assert!(graph.find_list(&ThingId::new("R10")).is_none());
        assert_eq!(graph.count_incoming_statements(&ThingId::new("R1")), 0);
    }

    #[test]
    fn test_has_statements_in_either_direction() {
        let graph = seeded();
        statement(&graph, "R1", "P1", "L1");
        assert!(graph.has_statements(&ThingId::new("R1")));
        assert!(graph.has_statements(&ThingId::new("L1")));
        assert!(!graph.has_statements(&ThingId::new("R2")));
        // Predicates in use are not subjects or objects
        assert!(!graph.has_statements(&ThingId::new("P1")));
    }

    #[test]
    fn test_delete_resource_only_removes_the_resource() {
        let graph = seeded();
        graph.delete_resource(&ThingId::new("R2"));
        assert!(graph.find_resource(&ThingId::new("R2")).is_none());
        assert!(graph.find_resource(&ThingId::new("R1")).is_some());
        // Deleting a non-resource id is ignored
        graph.delete_resource(&ThingId::new("P1"));
        assert!(graph.find_predicate(&ThingId::new("P1")).is_some());
    }

    #[test]
    fn test_delete_predicate_removes_its_description() {
        let graph = seeded();
        statement(&graph, "P1", "P1", "L1");
        assert_eq!(graph.count_statements(), 1);
        graph.delete_predicate(&ThingId::new("P1"));

        assert!(graph.find_predicate(&ThingId::new("P1")).is_none());
        assert_eq!(graph.count_statements(), 0);
        assert!(graph.find_literal(&ThingId::new("L1")).is_none());
    }
}
