//! Class hierarchy service: the single-parent subclass forest

use crate::graph::{
    ChildClass, Class, ClassHierarchyEntry, ClassSubclassRelation, Clock, ContributorId,
    GraphError, GraphResult, ThingId,
};
use crate::persistence::{ClassHierarchyRepository, ClassRelationRepository, ClassRepository};
use std::sync::Arc;
use tracing::info;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateClassHierarchyCommand {
    pub parent_id: ThingId,
    pub child_ids: Vec<ThingId>,
    pub contributor_id: Option<ContributorId>,
    /// Refuse parents that already have subclasses
    pub check_if_parent_is_leaf: bool,
}

impl CreateClassHierarchyCommand {
    pub fn new(parent_id: impl Into<ThingId>, child_ids: Vec<ThingId>) -> Self {
        CreateClassHierarchyCommand {
            parent_id: parent_id.into(),
            child_ids,
            contributor_id: None,
            check_if_parent_is_leaf: false,
        }
    }
}

pub trait ClassHierarchyUseCases: Send + Sync {
    fn create(&self, command: CreateClassHierarchyCommand) -> GraphResult<()>;
    fn find_all_children_by_parent_id(&self, id: &ThingId) -> GraphResult<Vec<ChildClass>>;
    fn find_parent_by_child_id(&self, id: &ThingId) -> GraphResult<Option<Class>>;
    fn find_root_by_descendant_id(&self, id: &ThingId) -> GraphResult<Option<Class>>;
    fn find_all_roots(&self) -> Vec<Class>;
    /// The class and its ancestors, root first
    fn find_class_hierarchy(&self, id: &ThingId) -> GraphResult<Vec<ClassHierarchyEntry>>;
    fn count_class_instances(&self, id: &ThingId) -> GraphResult<usize>;
    fn delete_by_child_id(&self, child_id: &ThingId) -> GraphResult<()>;
}

pub struct ClassHierarchyService {
    classes: Arc<dyn ClassRepository>,
    hierarchy: Arc<dyn ClassHierarchyRepository>,
    relations: Arc<dyn ClassRelationRepository>,
    clock: Arc<dyn Clock>,
}

impl ClassHierarchyService {
    pub fn new(
        classes: Arc<dyn ClassRepository>,
        hierarchy: Arc<dyn ClassHierarchyRepository>,
        relations: Arc<dyn ClassRelationRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            classes,
            hierarchy,
            relations,
            clock,
        }
    }

    fn require_class(&self, id: &ThingId) -> GraphResult<Class> {
        self.classes
            .find_class(id)
            .ok_or_else(|| GraphError::ClassNotFound(id.clone()))
    }

    fn classes_by_ids(&self, ids: Vec<ThingId>) -> Vec<Class> {
        ids.iter().filter_map(|id| self.classes.find_class(id)).collect()
    }
}

impl ClassHierarchyUseCases for ClassHierarchyService {
    fn create(&self, command: CreateClassHierarchyCommand) -> GraphResult<()> {
        let parent = self.require_class(&command.parent_id)?;
        if command.check_if_parent_is_leaf
            && !self.hierarchy.find_child_ids(&parent.id).is_empty()
        {
            return Err(GraphError::ParentClassAlreadyHasChildren(parent.id));
        }

        let now = self.clock.now();
        let mut relations: Vec<ClassSubclassRelation> = Vec::with_capacity(command.child_ids.len());
        for child_id in &command.child_ids {
            if relations.iter().any(|r| &r.child.id == child_id) {
                continue;
            }
            if child_id == &parent.id {
                return Err(GraphError::InvalidSubclassRelation {
                    child_id: child_id.clone(),
                    parent_id: parent.id.clone(),
                });
            }
            let child = self.require_class(child_id)?;
            if self.hierarchy.find_parent_id(child_id).is_some() {
                return Err(GraphError::ParentClassAlreadyExists {
                    child_id: child_id.clone(),
                    parent_id: parent.id.clone(),
                });
            }
            if self.hierarchy.exists_child(child_id, &parent.id) {
                return Err(GraphError::InvalidSubclassRelation {
                    child_id: child_id.clone(),
                    parent_id: parent.id.clone(),
                });
            }
            relations.push(ClassSubclassRelation {
                child,
                parent: parent.clone(),
                created_at: now,
                created_by: command.contributor_id,
            });
        }

        if !relations.is_empty() {
            info!(
                "Adding {} subclasses to class {}",
                relations.len(),
                parent.id
            );
            self.relations.save_relations(relations);
        }
        Ok(())
    }

    fn find_all_children_by_parent_id(&self, id: &ThingId) -> GraphResult<Vec<ChildClass>> {
        self.require_class(id)?;
        let children = self
            .classes_by_ids(self.hierarchy.find_child_ids(id))
            .into_iter()
            .map(|class| {
                let child_count = self.hierarchy.find_child_ids(&class.id).len();
                ChildClass { class, child_count }
            })
            .collect();
        Ok(children)
    }

    fn find_parent_by_child_id(&self, id: &ThingId) -> GraphResult<Option<Class>> {
        self.require_class(id)?;
        Ok(self
            .hierarchy
            .find_parent_id(id)
            .and_then(|parent_id| self.classes.find_class(&parent_id)))
    }

    fn find_root_by_descendant_id(&self, id: &ThingId) -> GraphResult<Option<Class>> {
        self.require_class(id)?;
        Ok(self
            .hierarchy
            .find_root_id(id)
            .and_then(|root_id| self.classes.find_class(&root_id)))
    }

    fn find_all_roots(&self) -> Vec<Class> {
        self.classes_by_ids(self.hierarchy.find_all_root_ids())
    }

    fn find_class_hierarchy(&self, id: &ThingId) -> GraphResult<Vec<ClassHierarchyEntry>> {
        let mut class = self.require_class(id)?;
        let mut entries: Vec<ClassHierarchyEntry> = Vec::new();
        loop {
            let parent_id = self.hierarchy.find_parent_id(&class.id);
            let next = parent_id.as_ref().and_then(|p| self.classes.find_class(p));
            entries.push(ClassHierarchyEntry { class, parent_id });
            match next {
                Some(parent) if !entries.iter().any(|e| e.class.id == parent.id) => class = parent,
                _ => break,
            }
        }
        entries.reverse();
        Ok(entries)
    }

    fn count_class_instances(&self, id: &ThingId) -> GraphResult<usize> {
        self.require_class(id)?;
        Ok(self.hierarchy.count_class_instances(id))
    }

    fn delete_by_child_id(&self, child_id: &ThingId) -> GraphResult<()> {
        self.require_class(child_id)?;
        if self.hierarchy.find_parent_id(child_id).is_some() {
            self.relations.delete_relation_by_child_id(child_id);
            info!("Removed parent class of {}", child_id);
        }
        Ok(())
    }
}
