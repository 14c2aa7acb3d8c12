//! Class service

use crate::graph::vocab::{is_reserved_class, is_valid_label};
use crate::graph::{Class, Clock, ContributorId, GraphError, GraphResult, ThingId};
use crate::persistence::{ClassRepository, ThingRepository};
use oxiri::Iri;
use std::sync::Arc;
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateClassCommand {
    pub id: Option<ThingId>,
    pub label: String,
    pub uri: Option<String>,
    pub contributor_id: Option<ContributorId>,
    pub modifiable: bool,
}

impl CreateClassCommand {
    pub fn new(label: impl Into<String>) -> Self {
        CreateClassCommand {
            id: None,
            label: label.into(),
            uri: None,
            contributor_id: None,
            modifiable: true,
        }
    }

    pub fn with_id(mut self, id: impl Into<ThingId>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_uri(mut self, uri: impl Into<String>) -> Self {
        self.uri = Some(uri.into());
        self
    }
}

/// Partial update; a URI can only be added, never changed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateClassCommand {
    pub id: ThingId,
    pub label: Option<String>,
    pub uri: Option<String>,
}

/// Full replacement of label and URI
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplaceClassCommand {
    pub id: ThingId,
    pub label: String,
    pub uri: Option<String>,
}

pub trait ClassUseCases: Send + Sync {
    fn create(&self, command: CreateClassCommand) -> GraphResult<ThingId>;
    fn update(&self, command: UpdateClassCommand) -> GraphResult<()>;
    fn replace(&self, command: ReplaceClassCommand) -> GraphResult<()>;
    fn find_by_id(&self, id: &ThingId) -> Option<Class>;
    fn find_by_uri(&self, uri: &str) -> Option<Class>;
}

pub struct ClassService {
    things: Arc<dyn ThingRepository>,
    classes: Arc<dyn ClassRepository>,
    clock: Arc<dyn Clock>,
    max_label_length: usize,
}

impl ClassService {
    pub fn new(
        things: Arc<dyn ThingRepository>,
        classes: Arc<dyn ClassRepository>,
        clock: Arc<dyn Clock>,
        max_label_length: usize,
    ) -> Self {
        Self {
            things,
            classes,
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

    /// A new URI must be absolute and not yet assigned to another class
    fn validate_new_uri(&self, uri: &str) -> GraphResult<()> {
        if Iri::parse(uri).is_err() {
            return Err(GraphError::UriNotAbsolute(uri.to_string()));
        }
        match self.classes.find_class_by_uri(uri) {
            Some(existing) => Err(GraphError::DuplicateUri {
                uri: uri.to_string(),
                class_id: existing.id,
            }),
            None => Ok(()),
        }
    }

    fn find_modifiable(&self, id: &ThingId) -> GraphResult<Class> {
        let class = self
            .classes
            .find_class(id)
            .ok_or_else(|| GraphError::ClassNotFound(id.clone()))?;
        if !class.modifiable {
            return Err(GraphError::ClassNotModifiable(class.id));
        }
        Ok(class)
    }

    fn save_if_changed(&self, original: &Class, updated: Class) {
        if &updated == original {
            debug!("Class {} unchanged, skipping update", original.id);
            return;
        }
        self.classes.save_class(updated);
        info!("Updated class {}", original.id);
    }
}

impl ClassUseCases for ClassService {
    fn create(&self, command: CreateClassCommand) -> GraphResult<ThingId> {
        self.validate_label(&command.label)?;
        if let Some(uri) = &command.uri {
            self.validate_new_uri(uri)?;
        }
        let id = match command.id {
            Some(id) => {
                if is_reserved_class(&id) || self.things.thing_exists(&id) {
                    return Err(GraphError::ClassAlreadyExists(id));
                }
                id
            }
            None => self.classes.next_class_id(),
        };

        let class = Class {
            uri: command.uri,
            created_by: command.contributor_id,
            modifiable: command.modifiable,
            ..Class::new(id.clone(), command.label, self.clock.now())
        };
        self.classes.save_class(class);
        info!("Created class {}", id);
        Ok(id)
    }

    fn update(&self, command: UpdateClassCommand) -> GraphResult<()> {
        if command.label.is_none() && command.uri.is_none() {
            return Ok(());
        }
        let class = self.find_modifiable(&command.id)?;
        if let Some(label) = &command.label {
            self.validate_label(label)?;
        }
        if let Some(uri) = &command.uri {
            match &class.uri {
                Some(current) if current == uri => {}
                Some(_) => return Err(GraphError::CannotResetUri(class.id)),
                None => self.validate_new_uri(uri)?,
            }
        }

        let mut updated = class.clone();
        if let Some(label) = command.label {
            updated.label = label;
        }
        if let Some(uri) = command.uri {
            updated.uri = Some(uri);
        }
        self.save_if_changed(&class, updated);
        Ok(())
    }

    fn replace(&self, command: ReplaceClassCommand) -> GraphResult<()> {
        let class = self.find_modifiable(&command.id)?;
        self.validate_label(&command.label)?;
        match (&class.uri, &command.uri) {
            (Some(current), Some(uri)) if current == uri => {}
            (Some(_), _) => return Err(GraphError::CannotResetUri(class.id)),
            (None, Some(uri)) => self.validate_new_uri(uri)?,
            (None, None) => {}
        }

        let updated = Class {
            label: command.label,
            uri: command.uri,
            ..class.clone()
        };
        self.save_if_changed(&class, updated);
        Ok(())
    }

    fn find_by_id(&self, id: &ThingId) -> Option<Class> {
        self.classes.find_class(id)
    }

    fn find_by_uri(&self, uri: &str) -> Option<Class> {
        self.classes.find_class_by_uri(uri)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::vocab::MAX_LABEL_LENGTH;
    use crate::graph::SystemClock;
    use crate::persistence::InMemoryGraph;

    fn service() -> ClassService {
        let graph = Arc::new(InMemoryGraph::new());
        ClassService::new(graph.clone(), graph, Arc::new(SystemClock), MAX_LABEL_LENGTH)
    }

    #[test]
    fn test_create() {
        let service = service();
        let id = service
            .create(CreateClassCommand::new("Paper").with_uri("https://orkg.org/class/Paper"))
            .unwrap();
        assert_eq!(id, ThingId::new("C1"));
        assert_eq!(
            service.find_by_uri("https://orkg.org/class/Paper").map(|c| c.id),
            Some(id)
        );
    }

    #[test]
    fn test_create_rejects_reserved_and_taken_ids() {
        let service = service();
        assert_eq!(
            service.create(CreateClassCommand::new("list").with_id("List")),
            Err(GraphError::ClassAlreadyExists(ThingId::new("List")))
        );
        service.create(CreateClassCommand::new("a").with_id("C5")).unwrap();
        assert_eq!(
            service.create(CreateClassCommand::new("b").with_id("C5")),
            Err(GraphError::ClassAlreadyExists(ThingId::new("C5")))
        );
    }

    #[test]
    fn test_create_uri_rules() {
        let service = service();
        assert_eq!(
            service.create(CreateClassCommand::new("a").with_uri("relative/path")),
            Err(GraphError::UriNotAbsolute("relative/path".to_string()))
        );
        let id = service
            .create(CreateClassCommand::new("a").with_uri("https://example.org/A"))
            .unwrap();
        assert_eq!(
            service.create(CreateClassCommand::new("b").with_uri("https://example.org/A")),
            Err(GraphError::DuplicateUri {
                uri: "https://example.org/A".to_string(),
                class_id: id,
            })
        );
        // Rejected creates leave the id sequence untouched
        assert_eq!(
            service.create(CreateClassCommand::new("b").with_uri("https://example.org/B")),
            Ok(ThingId::new("C2"))
        );
    }

    #[test]
    fn test_update() {
        let service = service();
        let id = service.create(CreateClassCommand::new("a")).unwrap();

        // Nothing to change, not even looked up
        service
            .update(UpdateClassCommand {
                id: ThingId::new("C404"),
                label: None,
                uri: None,
            })
            .unwrap();

        service
            .update(UpdateClassCommand {
                id: id.clone(),
                label: Some("b".to_string()),
                uri: Some("https://example.org/B".to_string()),
            })
            .unwrap();
        let class = service.find_by_id(&id).unwrap();
        assert_eq!(class.label, "b");
        assert_eq!(class.uri.as_deref(), Some("https://example.org/B"));

        assert_eq!(
            service.update(UpdateClassCommand {
                id: id.clone(),
                label: None,
                uri: Some("https://example.org/C".to_string()),
            }),
            Err(GraphError::CannotResetUri(id.clone()))
        );
        // Same URI again is fine
        service
            .update(UpdateClassCommand {
                id,
                label: None,
                uri: Some("https://example.org/B".to_string()),
            })
            .unwrap();
    }

    #[test]
    fn test_update_not_modifiable() {
        let service = service();
        let mut command = CreateClassCommand::new("locked");
        command.modifiable = false;
        let id = service.create(command).unwrap();
        assert_eq!(
            service.update(UpdateClassCommand {
                id: id.clone(),
                label: Some("\n".to_string()),
                uri: None,
            }),
            Err(GraphError::ClassNotModifiable(id.clone()))
        );
        assert_eq!(
            service.replace(ReplaceClassCommand {
                id: id.clone(),
                label: "x".to_string(),
                uri: None,
            }),
            Err(GraphError::ClassNotModifiable(id))
        );
    }

    #[test]
    fn test_replace() {
        let service = service();
        let id = service
            .create(CreateClassCommand::new("a").with_uri("https://example.org/A"))
            .unwrap();
        assert_eq!(
            service.replace(ReplaceClassCommand {
                id: id.clone(),
                label: "b".to_string(),
                uri: None,
            }),
            Err(GraphError::CannotResetUri(id.clone()))
        );
        service
            .replace(ReplaceClassCommand {
                id: id.clone(),
                label: "b".to_string(),
                uri: Some("https://example.org/A".to_string()),
            })
            .unwrap();
        assert_eq!(service.find_by_id(&id).unwrap().label, "b");
        assert_eq!(
            service.replace(ReplaceClassCommand {
                id: ThingId::new("C404"),
                label: "b".to_string(),
                uri: None,
            }),
            Err(GraphError::ClassNotFound(ThingId::new("C404")))
        );
    }
}
