//! Predicate service

use crate::graph::vocab::is_valid_label;
use crate::graph::{Clock, ContributorId, GraphError, GraphResult, Predicate, ThingId};
use crate::persistence::{
    ContributorRepository, PredicateRepository, StatementRepository, ThingRepository,
};
use super::acting_contributor;
use std::sync::Arc;
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatePredicateCommand {
    pub id: Option<ThingId>,
    pub label: String,
    pub contributor_id: Option<ContributorId>,
    pub modifiable: bool,
}

impl CreatePredicateCommand {
    pub fn new(label: impl Into<String>) -> Self {
        CreatePredicateCommand {
            id: None,
            label: label.into(),
            contributor_id: None,
            modifiable: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdatePredicateCommand {
    pub id: ThingId,
    pub label: Option<String>,
}

pub trait PredicateUseCases: Send + Sync {
    fn create(&self, command: CreatePredicateCommand) -> GraphResult<ThingId>;
    fn update(&self, command: UpdatePredicateCommand) -> GraphResult<()>;
    fn delete(&self, id: &ThingId, contributor_id: Option<ContributorId>) -> GraphResult<()>;
    fn find_by_id(&self, id: &ThingId) -> Option<Predicate>;
}

pub struct PredicateService {
    things: Arc<dyn ThingRepository>,
    predicates: Arc<dyn PredicateRepository>,
    statements: Arc<dyn StatementRepository>,
    contributors: Arc<dyn ContributorRepository>,
    clock: Arc<dyn Clock>,
    max_label_length: usize,
}

impl PredicateService {
    pub fn new(
        things: Arc<dyn ThingRepository>,
        predicates: Arc<dyn PredicateRepository>,
        statements: Arc<dyn StatementRepository>,
        contributors: Arc<dyn ContributorRepository>,
        clock: Arc<dyn Clock>,
        max_label_length: usize,
    ) -> Self {
        Self {
            things,
            predicates,
            statements,
            contributors,
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
}

impl PredicateUseCases for PredicateService {
    fn create(&self, command: CreatePredicateCommand) -> GraphResult<ThingId> {
        self.validate_label(&command.label)?;
        let id = match command.id {
            Some(id) => {
                if self.things.thing_exists(&id) {
                    return Err(GraphError::PredicateAlreadyExists(id));
                }
                id
            }
            None => self.predicates.next_predicate_id(),
        };

        let predicate = Predicate {
            created_by: command.contributor_id,
            modifiable: command.modifiable,
            ..Predicate::new(id.clone(), command.label, self.clock.now())
        };
        self.predicates.save_predicate(predicate);
        info!("Created predicate {}", id);
        Ok(id)
    }

    fn update(&self, command: UpdatePredicateCommand) -> GraphResult<()> {
        let predicate = self
            .predicates
            .find_predicate(&command.id)
            .ok_or_else(|| GraphError::PredicateNotFound(command.id.clone()))?;
        if !predicate.modifiable {
            return Err(GraphError::PredicateNotModifiable(predicate.id));
        }
        let Some(label) = command.label else {
            return Ok(());
        };
        self.validate_label(&label)?;
        if label == predicate.label {
            debug!("Predicate {} unchanged, skipping update", predicate.id);
            return Ok(());
        }
        let id = predicate.id.clone();
        self.predicates.save_predicate(Predicate { label, ..predicate });
        info!("Updated predicate {}", id);
        Ok(())
    }

    fn delete(&self, id: &ThingId, contributor_id: Option<ContributorId>) -> GraphResult<()> {
        let predicate = self
            .predicates
            .find_predicate(id)
            .ok_or_else(|| GraphError::PredicateNotFound(id.clone()))?;
        if !predicate.modifiable {
            return Err(GraphError::PredicateNotModifiable(predicate.id));
        }
        if self.statements.is_predicate_used(id) || self.statements.is_used_as_object(id) {
            return Err(GraphError::PredicateInUse(predicate.id));
        }
        let allowed = acting_contributor(self.contributors.as_ref(), contributor_id)
            .map_or(false, |c| c.is_owner_or_curator(predicate.created_by));
        if !allowed {
            return Err(GraphError::NeitherOwnerNorCurator(contributor_id));
        }

        self.predicates.delete_predicate(id);
        info!("Deleted predicate {}", id);
        Ok(())
    }

    fn find_by_id(&self, id: &ThingId) -> Option<Predicate> {
        self.predicates.find_predicate(id)
    }
}
