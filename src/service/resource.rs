//! Resource service

use crate::graph::vocab::{is_reserved_class, is_valid_label};
use crate::graph::{
    Clock, Contributor, ContributorId, ExtractionMethod, GraphError, GraphResult, ObservatoryId,
    OrganizationId, Resource, ThingId, Visibility,
};
use crate::persistence::{
    ClassRepository, ContributorRepository, ResourceRepository, StatementRepository,
    ThingRepository,
};
use super::acting_contributor;
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::{debug, info};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateResourceCommand {
    pub id: Option<ThingId>,
    pub label: String,
    pub classes: BTreeSet<ThingId>,
    pub contributor_id: Option<ContributorId>,
    pub observatory_id: Option<ObservatoryId>,
    pub organization_id: Option<OrganizationId>,
    pub extraction_method: ExtractionMethod,
    pub modifiable: bool,
}

impl CreateResourceCommand {
    pub fn new(label: impl Into<String>) -> Self {
        CreateResourceCommand {
            label: label.into(),
            modifiable: true,
            ..Default::default()
        }
    }

    pub fn with_id(mut self, id: impl Into<ThingId>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_class(mut self, class: impl Into<ThingId>) -> Self {
        self.classes.insert(class.into());
        self
    }
}

/// Changes to a resource; `contributor_id` is the contributor making them
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateResourceCommand {
    pub id: ThingId,
    pub contributor_id: Option<ContributorId>,
    pub label: Option<String>,
    pub classes: Option<BTreeSet<ThingId>>,
    pub observatory_id: Option<ObservatoryId>,
    pub organization_id: Option<OrganizationId>,
    pub extraction_method: Option<ExtractionMethod>,
    pub visibility: Option<Visibility>,
    pub verified: Option<bool>,
    pub modifiable: Option<bool>,
}

impl UpdateResourceCommand {
    pub fn new(id: impl Into<ThingId>, contributor_id: Option<ContributorId>) -> Self {
        UpdateResourceCommand {
            id: id.into(),
            contributor_id,
            label: None,
            classes: None,
            observatory_id: None,
            organization_id: None,
            extraction_method: None,
            visibility: None,
            verified: None,
            modifiable: None,
        }
    }
}

pub trait ResourceUseCases: Send + Sync {
    fn create(&self, command: CreateResourceCommand) -> GraphResult<ThingId>;
    fn update(&self, command: UpdateResourceCommand) -> GraphResult<()>;
    fn delete(&self, id: &ThingId, contributor_id: Option<ContributorId>) -> GraphResult<()>;
    fn find_by_id(&self, id: &ThingId) -> Option<Resource>;
    fn find_all_by_class(&self, class_id: &ThingId) -> Vec<Resource>;
}

pub struct ResourceService {
    things: Arc<dyn ThingRepository>,
    resources: Arc<dyn ResourceRepository>,
    classes: Arc<dyn ClassRepository>,
    statements: Arc<dyn StatementRepository>,
    contributors: Arc<dyn ContributorRepository>,
    clock: Arc<dyn Clock>,
    max_label_length: usize,
}

impl ResourceService {
    pub fn new(
        things: Arc<dyn ThingRepository>,
        resources: Arc<dyn ResourceRepository>,
        classes: Arc<dyn ClassRepository>,
        statements: Arc<dyn StatementRepository>,
        contributors: Arc<dyn ContributorRepository>,
        clock: Arc<dyn Clock>,
        max_label_length: usize,
    ) -> Self {
        Self {
            things,
            resources,
            classes,
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

    /// Classes must exist and must not be reserved
    fn validate_classes(&self, classes: &BTreeSet<ThingId>) -> GraphResult<()> {
        let invalid: Vec<ThingId> = classes
            .iter()
            .filter(|id| is_reserved_class(id) || !self.classes.class_exists(id))
            .cloned()
            .collect();
        if invalid.is_empty() {
            Ok(())
        } else {
            Err(GraphError::InvalidClassCollection(invalid))
        }
    }

    fn require_owner_or_curator(
        &self,
        actor: &Option<Contributor>,
        owner: Option<ContributorId>,
    ) -> GraphResult<()> {
        match actor {
            Some(actor) if actor.is_owner_or_curator(owner) => Ok(()),
            _ => Err(GraphError::NeitherOwnerNorCurator(actor.as_ref().map(|a| a.id))),
        }
    }

    fn require_curator(&self, actor: &Option<Contributor>) -> GraphResult<()> {
        match actor {
            Some(actor) if actor.is_curator => Ok(()),
            _ => Err(GraphError::NeitherOwnerNorCurator(actor.as_ref().map(|a| a.id))),
        }
    }
}

impl ResourceUseCases for ResourceService {
    fn create(&self, command: CreateResourceCommand) -> GraphResult<ThingId> {
        self.validate_label(&command.label)?;
        self.validate_classes(&command.classes)?;
        let id = match command.id {
            Some(id) => {
                if self.things.thing_exists(&id) {
                    return Err(GraphError::ThingAlreadyExists(id));
                }
                id
            }
            None => self.resources.next_resource_id(),
        };

        let resource = Resource {
            classes: command.classes,
            created_by: command.contributor_id,
            observatory_id: command.observatory_id,
            organization_id: command.organization_id,
            extraction_method: command.extraction_method,
            modifiable: command.modifiable,
            ..Resource::new(id.clone(), command.label, self.clock.now())
        };
        self.resources.save_resource(resource);
        info!("Created resource {}", id);
        Ok(id)
    }

    fn update(&self, command: UpdateResourceCommand) -> GraphResult<()> {
        let resource = self
            .resources
            .find_resource(&command.id)
            .ok_or_else(|| GraphError::ResourceNotFound(command.id.clone()))?;
        if !resource.modifiable {
            return Err(GraphError::ResourceNotModifiable(resource.id));
        }
        if let Some(label) = &command.label {
            self.validate_label(label)?;
        }
        if let Some(classes) = &command.classes {
            if classes != &resource.classes {
                self.validate_classes(classes)?;
            }
        }

        let actor = acting_contributor(self.contributors.as_ref(), command.contributor_id);
        let mut updated = resource.clone();
        if let Some(visibility) = command.visibility {
            if visibility != resource.visibility {
                let curated = |v: Visibility| matches!(v, Visibility::Featured | Visibility::Unlisted);
                if curated(visibility) || curated(resource.visibility) {
                    self.require_curator(&actor)?;
                } else {
                    self.require_owner_or_curator(&actor, resource.created_by)?;
                }
                updated.visibility = visibility;
                updated.unlisted_by = match visibility {
                    Visibility::Unlisted => command.contributor_id,
                    _ => None,
                };
            }
        }
        if let Some(verified) = command.verified {
            if Some(verified) != resource.verified {
                self.require_curator(&actor)?;
                updated.verified = Some(verified);
            }
        }
        if let Some(label) = command.label {
            updated.label = label;
        }
        if let Some(classes) = command.classes {
            updated.classes = classes;
        }
        if let Some(observatory_id) = command.observatory_id {
            updated.observatory_id = Some(observatory_id);
        }
        if let Some(organization_id) = command.organization_id {
            updated.organization_id = Some(organization_id);
        }
        if let Some(extraction_method) = command.extraction_method {
            updated.extraction_method = extraction_method;
        }
        if let Some(modifiable) = command.modifiable {
            updated.modifiable = modifiable;
        }

        if updated == resource {
            debug!("Resource {} unchanged, skipping update", resource.id);
            return Ok(());
        }
        self.resources.save_resource(updated);
        info!("Updated resource {}", resource.id);
        Ok(())
    }

    fn delete(&self, id: &ThingId, contributor_id: Option<ContributorId>) -> GraphResult<()> {
        let resource = self
            .resources
            .find_resource(id)
            .ok_or_else(|| GraphError::ResourceNotFound(id.clone()))?;
        if !resource.modifiable {
            return Err(GraphError::ResourceNotModifiable(resource.id));
        }
        if self.statements.has_statements(id) {
            return Err(GraphError::ResourceUsedInStatement(resource.id));
        }
        let actor = acting_contributor(self.contributors.as_ref(), contributor_id);
        self.require_owner_or_curator(&actor, resource.created_by)?;

        self.resources.delete_resource(id);
        info!("Deleted resource {}", id);
        Ok(())
    }

    fn find_by_id(&self, id: &ThingId) -> Option<Resource> {
        self.resources.find_resource(id)
    }

    fn find_all_by_class(&self, class_id: &ThingId) -> Vec<Resource> {
        self.resources.find_all_resources_by_class(class_id)
    }
}
