//! Literal service

use crate::graph::vocab::is_valid_literal_label;
use crate::graph::xsd::resolve_datatype;
use crate::graph::{Clock, ContributorId, GraphError, GraphResult, Literal, ThingId};
use crate::persistence::{LiteralRepository, ThingRepository};
use std::sync::Arc;
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateLiteralCommand {
    pub id: Option<ThingId>,
    pub label: String,
    pub datatype: String,
    pub contributor_id: Option<ContributorId>,
    pub modifiable: bool,
}

impl CreateLiteralCommand {
    pub fn new(label: impl Into<String>) -> Self {
        CreateLiteralCommand {
            id: None,
            label: label.into(),
            datatype: Literal::DEFAULT_DATATYPE.to_string(),
            contributor_id: None,
            modifiable: true,
        }
    }

    pub fn with_datatype(mut self, datatype: impl Into<String>) -> Self {
        self.datatype = datatype.into();
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateLiteralCommand {
    pub id: ThingId,
    pub label: Option<String>,
    pub datatype: Option<String>,
}

pub trait LiteralUseCases: Send + Sync {
    fn create(&self, command: CreateLiteralCommand) -> GraphResult<ThingId>;
    fn update(&self, command: UpdateLiteralCommand) -> GraphResult<()>;
    fn find_by_id(&self, id: &ThingId) -> Option<Literal>;
}

pub struct LiteralService {
    things: Arc<dyn ThingRepository>,
    literals: Arc<dyn LiteralRepository>,
    clock: Arc<dyn Clock>,
    max_label_length: usize,
}

impl LiteralService {
    pub fn new(
        things: Arc<dyn ThingRepository>,
        literals: Arc<dyn LiteralRepository>,
        clock: Arc<dyn Clock>,
        max_label_length: usize,
    ) -> Self {
        Self {
            things,
            literals,
            clock,
            max_label_length,
        }
    }

    /// Check the datatype, then the label against it
    fn validate(&self, label: &str, datatype: &str) -> GraphResult<()> {
        let resolved = resolve_datatype(datatype)
            .ok_or_else(|| GraphError::InvalidLiteralDatatype(datatype.to_string()))?;
        if !is_valid_literal_label(label, self.max_label_length) {
            return Err(GraphError::LiteralLabelTooLong(self.max_label_length));
        }
        if !resolved.can_parse(label) {
            return Err(GraphError::InvalidLiteralLabel {
                label: label.to_string(),
                datatype: datatype.to_string(),
            });
        }
        Ok(())
    }
}

impl LiteralUseCases for LiteralService {
    fn create(&self, command: CreateLiteralCommand) -> GraphResult<ThingId> {
        self.validate(&command.label, &command.datatype)?;
        let id = match command.id {
            Some(id) => {
                if self.things.thing_exists(&id) {
                    return Err(GraphError::LiteralAlreadyExists(id));
                }
                id
            }
            None => self.literals.next_literal_id(),
        };

        let literal = Literal {
            datatype: command.datatype,
            created_by: command.contributor_id,
            modifiable: command.modifiable,
            ..Literal::new(id.clone(), command.label, self.clock.now())
        };
        self.literals.save_literal(literal);
        info!("Created literal {}", id);
        Ok(id)
    }

    fn update(&self, command: UpdateLiteralCommand) -> GraphResult<()> {
        if command.label.is_none() && command.datatype.is_none() {
            return Ok(());
        }
        let literal = self
            .literals
            .find_literal(&command.id)
            .ok_or_else(|| GraphError::LiteralNotFound(command.id.clone()))?;
        if !literal.modifiable {
            return Err(GraphError::LiteralNotModifiable(literal.id));
        }

        let label = command.label.unwrap_or_else(|| literal.label.clone());
        let datatype = command.datatype.unwrap_or_else(|| literal.datatype.clone());
        self.validate(&label, &datatype)?;
        if label == literal.label && datatype == literal.datatype {
            debug!("Literal {} unchanged, skipping update", literal.id);
            return Ok(());
        }

        let id = literal.id.clone();
        self.literals.save_literal(Literal {
            label,
            datatype,
            ..literal
        });
        info!("Updated literal {}", id);
        Ok(())
    }

    fn find_by_id(&self, id: &ThingId) -> Option<Literal> {
        self.literals.find_literal(id)
    }
}
