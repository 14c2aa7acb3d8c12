//! List service
//!
//! Lists are resources classed `List` whose elements are kept as indexed
//! `hasListElement` statements. Elements are always written as a whole
//! through [`ListRepository::save_list`], so the element statements stay
//! dense and ordered.

use crate::graph::vocab::is_valid_label;
use crate::graph::{Clock, ContributorId, GraphError, GraphResult, List, Thing, ThingId};
use crate::persistence::{ListRepository, ResourceRepository, StatementRepository, ThingRepository};
use std::sync::Arc;
use tracing::info;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateListCommand {
    pub id: Option<ThingId>,
    pub label: String,
    pub elements: Vec<ThingId>,
    pub contributor_id: Option<ContributorId>,
}

impl CreateListCommand {
    pub fn new(label: impl Into<String>, elements: Vec<ThingId>) -> Self {
        CreateListCommand {
            id: None,
            label: label.into(),
            elements,
            contributor_id: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateListCommand {
    pub id: ThingId,
    pub label: Option<String>,
    pub elements: Option<Vec<ThingId>>,
}

pub trait ListUseCases: Send + Sync {
    fn create(&self, command: CreateListCommand) -> GraphResult<ThingId>;
    fn update(&self, command: UpdateListCommand) -> GraphResult<()>;
    /// Deleting an unknown list is a no-op
    fn delete(&self, id: &ThingId) -> GraphResult<()>;
    fn find_by_id(&self, id: &ThingId) -> Option<List>;
    fn find_all_elements_by_id(&self, id: &ThingId) -> GraphResult<Vec<Thing>>;
    fn exists(&self, id: &ThingId) -> bool;
}

pub struct ListService {
    things: Arc<dyn ThingRepository>,
    lists: Arc<dyn ListRepository>,
    resources: Arc<dyn ResourceRepository>,
    statements: Arc<dyn StatementRepository>,
    clock: Arc<dyn Clock>,
    max_label_length: usize,
}

impl ListService {
    pub fn new(
        things: Arc<dyn ThingRepository>,
        lists: Arc<dyn ListRepository>,
        resources: Arc<dyn ResourceRepository>,
        statements: Arc<dyn StatementRepository>,
        clock: Arc<dyn Clock>,
        max_label_length: usize,
    ) -> Self {
        Self {
            things,
            lists,
            resources,
            statements,
            clock,
            max_label_length,
        }
    }

    fn validate_label(&self, label: &str) -> GraphResult<()> {
        if is_valid_label(label, self.max_label_length) {
            Ok(())
        } else {
            Err(GraphError::InvalidLabel(self.max_label_length))
        }
    }

    /// All element ids must resolve; reports every missing one, in order
    fn validate_elements(&self, elements: &[ThingId]) -> GraphResult<()> {
        let mut missing: Vec<ThingId> = Vec::new();
        for id in elements {
            if !self.things.thing_exists(id) && !missing.contains(id) {
                missing.push(id.clone());
            }
        }
        if missing.is_empty() {
            Ok(())
        } else {
            Err(GraphError::ListElementNotFound(missing))
        }
    }
}

impl ListUseCases for ListService {
    fn create(&self, command: CreateListCommand) -> GraphResult<ThingId> {
        self.validate_label(&command.label)?;
        self.validate_elements(&command.elements)?;
        let id = match command.id {
            Some(id) => {
                if self.things.thing_exists(&id) {
                    return Err(GraphError::ThingAlreadyExists(id));
                }
                id
            }
            None => self.resources.next_resource_id(),
        };

        self.lists.save_list(List {
            id: id.clone(),
            label: command.label,
            elements: command.elements,
            created_at: self.clock.now(),
            created_by: command.contributor_id,
            modifiable: true,
        });
        info!("Created list {}", id);
        Ok(id)
    }

    fn update(&self, command: UpdateListCommand) -> GraphResult<()> {
        let list = self
            .lists
            .find_list(&command.id)
            .ok_or_else(|| GraphError::ListNotFound(command.id.clone()))?;
        if !list.modifiable {
            return Err(GraphError::ListNotModifiable(list.id));
        }
        if let Some(label) = &command.label {
            self.validate_label(label)?;
        }
        if let Some(elements) = &command.elements {
            self.validate_elements(elements)?;
        }

        let updated = List {
            label: command.label.unwrap_or_else(|| list.label.clone()),
            elements: command.elements.unwrap_or_else(|| list.elements.clone()),
            ..list.clone()
        };
        if updated == list {
            return Ok(());
        }
        self.lists.save_list(updated);
        info!("Updated list {}", list.id);
        Ok(())
    }

    fn delete(&self, id: &ThingId) -> GraphResult<()> {
        let Some(list) = self.lists.find_list(id) else {
            return Ok(());
        };
        if !list.modifiable {
            return Err(GraphError::ListNotModifiable(list.id));
        }
        if self.statements.is_used_as_object(id) {
            return Err(GraphError::ListInUse(list.id));
        }
        self.lists.delete_list(id);
        info!("Deleted list {}", id);
        Ok(())
    }

    fn find_by_id(&self, id: &ThingId) -> Option<List> {
        self.lists.find_list(id)
    }

    fn find_all_elements_by_id(&self, id: &ThingId) -> GraphResult<Vec<Thing>> {
        let list = self
            .lists
            .find_list(id)
            .ok_or_else(|| GraphError::ListNotFound(id.clone()))?;
        Ok(list
            .elements
            .iter()
            .filter_map(|element| self.things.find_thing(element))
            .collect())
    }

    fn exists(&self, id: &ThingId) -> bool {
        self.lists.list_exists(id)
    }
}
