//! Statement service: validated triple mutation, bundles and counts

use crate::graph::error::{InvalidStatementReason, StatementInUseReason};
use crate::graph::statement::is_list_element_edge;
use crate::graph::traversal::find_subgraph;
use crate::graph::vocab::{classes, predicates};
use crate::graph::{
    Bundle, BundleConfiguration, Clock, ContributorId, GeneralStatement, GraphError, GraphResult,
    Predicate, PredicateUsageCount, Sort, StatementFilter, StatementId, Thing, ThingId,
};
use crate::persistence::{LiteralRepository, StatementRepository, ThingRepository};
use indexmap::IndexMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateStatementCommand {
    pub id: Option<StatementId>,
    pub subject_id: ThingId,
    pub predicate_id: ThingId,
    pub object_id: ThingId,
    pub contributor_id: Option<ContributorId>,
    pub modifiable: bool,
}

impl CreateStatementCommand {
    pub fn new(
        subject_id: impl Into<ThingId>,
        predicate_id: impl Into<ThingId>,
        object_id: impl Into<ThingId>,
    ) -> Self {
        CreateStatementCommand {
            id: None,
            subject_id: subject_id.into(),
            predicate_id: predicate_id.into(),
            object_id: object_id.into(),
            contributor_id: None,
            modifiable: true,
        }
    }
}

/// Replaces the given parts of a statement; `None` keeps the current value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateStatementCommand {
    pub statement_id: StatementId,
    pub subject_id: Option<ThingId>,
    pub predicate_id: Option<ThingId>,
    pub object_id: Option<ThingId>,
}

impl UpdateStatementCommand {
    pub fn new(statement_id: StatementId) -> Self {
        UpdateStatementCommand {
            statement_id,
            subject_id: None,
            predicate_id: None,
            object_id: None,
        }
    }
}

pub trait StatementUseCases: Send + Sync {
    /// Create a statement, or return the id of an identical existing one
    fn create(&self, command: CreateStatementCommand) -> GraphResult<StatementId>;
    /// Like `create`, but allows list element statements
    fn create_unsafe(&self, command: CreateStatementCommand) -> GraphResult<StatementId>;
    fn update(&self, command: UpdateStatementCommand) -> GraphResult<()>;
    fn delete_by_id(&self, id: &StatementId) -> GraphResult<()>;
    fn delete_all_by_id(&self, ids: &[StatementId]) -> GraphResult<()>;
    fn delete_all(&self);

    fn find_by_id(&self, id: &StatementId) -> Option<GeneralStatement>;
    fn exists(&self, id: &StatementId) -> bool;
    fn find_all(&self, filter: &StatementFilter, sort: &Sort) -> Vec<GeneralStatement>;
    fn count(&self) -> usize;

    fn fetch_as_bundle(
        &self,
        root_id: &ThingId,
        configuration: &BundleConfiguration,
        include_first: bool,
        sort: &Sort,
    ) -> GraphResult<Bundle>;
    fn count_statements_in_paper_subgraph(&self, id: &ThingId) -> GraphResult<usize>;
    fn count_incoming_statements_by_id(&self, id: &ThingId) -> GraphResult<usize>;
    fn count_incoming_statements_by_ids(&self, ids: &[ThingId]) -> IndexMap<ThingId, usize>;
    fn count_predicate_usage(&self) -> Vec<PredicateUsageCount>;
    /// First literal `description` of each given thing that has one
    fn find_all_descriptions(&self, ids: &[ThingId]) -> IndexMap<ThingId, String>;
}

pub struct StatementService {
    things: Arc<dyn ThingRepository>,
    statements: Arc<dyn StatementRepository>,
    literals: Arc<dyn LiteralRepository>,
    clock: Arc<dyn Clock>,
}

impl StatementService {
    pub fn new(
        things: Arc<dyn ThingRepository>,
        statements: Arc<dyn StatementRepository>,
        literals: Arc<dyn LiteralRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            things,
            statements,
            literals,
            clock,
        }
    }

    fn create_statement(
        &self,
        command: CreateStatementCommand,
        allow_list_elements: bool,
    ) -> GraphResult<StatementId> {
        let subject = self
            .things
            .find_thing(&command.subject_id)
            .ok_or_else(|| GraphError::StatementSubjectNotFound(command.subject_id.clone()))?;
        if subject.is_literal() {
            return Err(GraphError::InvalidStatement(
                InvalidStatementReason::SubjectMustNotBeLiteral,
            ));
        }
        if !allow_list_elements && is_list_element_edge(&subject, &command.predicate_id) {
            return Err(GraphError::InvalidStatement(
                InvalidStatementReason::IsListElementStatement,
            ));
        }
        let predicate = self.find_predicate(&command.predicate_id)?;
        let object = self
            .things
            .find_thing(&command.object_id)
            .ok_or_else(|| GraphError::StatementObjectNotFound(command.object_id.clone()))?;

        if let Some(existing) = self.statements.find_statement_by_triple(
            &command.subject_id,
            &command.predicate_id,
            &command.object_id,
        ) {
            return match command.id {
                Some(id) if id != existing.id => Err(GraphError::StatementAlreadyExists(id)),
                _ => Ok(existing.id),
            };
        }

        let id = match command.id {
            Some(id) => {
                if self.statements.find_statement(&id).is_some() {
                    return Err(GraphError::StatementAlreadyExists(id));
                }
                id
            }
            None => self.statements.next_statement_id(),
        };

        self.statements.save_statement(GeneralStatement {
            id: id.clone(),
            subject,
            predicate,
            object,
            created_at: self.clock.now(),
            created_by: command.contributor_id,
            modifiable: command.modifiable,
            index: None,
        });
        info!(
            "Created statement {} ({} {} {})",
            id, command.subject_id, command.predicate_id, command.object_id
        );
        Ok(id)
    }

    fn find_predicate(&self, id: &ThingId) -> GraphResult<Predicate> {
        match self.things.find_thing(id) {
            Some(Thing::Predicate(predicate)) => Ok(predicate),
            _ => Err(GraphError::StatementPredicateNotFound(id.clone())),
        }
    }

    fn require_thing(&self, id: &ThingId) -> GraphResult<()> {
        if self.things.thing_exists(id) {
            Ok(())
        } else {
            Err(GraphError::ThingNotFound(id.clone()))
        }
    }

    fn subgraph(&self, root_id: &ThingId, configuration: &BundleConfiguration) -> Bundle {
        let statements = find_subgraph(
            root_id,
            configuration,
            |id| self.statements.find_outgoing_statements(id),
            |_| true,
        );
        Bundle::new(root_id.clone(), statements)
    }
}

impl StatementUseCases for StatementService {
    fn create(&self, command: CreateStatementCommand) -> GraphResult<StatementId> {
        self.create_statement(command, false)
    }

    fn create_unsafe(&self, command: CreateStatementCommand) -> GraphResult<StatementId> {
        self.create_statement(command, true)
    }

    fn update(&self, command: UpdateStatementCommand) -> GraphResult<()> {
        let statement = self
            .statements
            .find_statement(&command.statement_id)
            .ok_or_else(|| GraphError::StatementNotFound(command.statement_id.clone()))?;
        if !statement.modifiable {
            return Err(GraphError::StatementNotModifiable(statement.id));
        }
        if statement.is_list_element_statement() {
            return Err(GraphError::InvalidStatement(
                InvalidStatementReason::IsListElementStatement,
            ));
        }

        let subject = match command.subject_id {
            Some(id) if &id != statement.subject.id() => {
                let subject = self
                    .things
                    .find_thing(&id)
                    .ok_or(GraphError::StatementSubjectNotFound(id))?;
                if subject.is_literal() {
                    return Err(GraphError::InvalidStatement(
                        InvalidStatementReason::SubjectMustNotBeLiteral,
                    ));
                }
                subject
            }
            _ => statement.subject.clone(),
        };
        let predicate = match command.predicate_id {
            Some(id) if id != statement.predicate.id => self.find_predicate(&id)?,
            _ => statement.predicate.clone(),
        };
        let object = match command.object_id {
            Some(id) if &id != statement.object.id() => self
                .things
                .find_thing(&id)
                .ok_or(GraphError::StatementObjectNotFound(id))?,
            _ => statement.object.clone(),
        };
        if is_list_element_edge(&subject, &predicate.id) {
            return Err(GraphError::InvalidStatement(
                InvalidStatementReason::IsListElementStatement,
            ));
        }

        let updated = GeneralStatement {
            subject,
            predicate,
            object,
            ..statement.clone()
        };
        if updated == statement {
            debug!("Statement {} unchanged, skipping update", statement.id);
            return Ok(());
        }

        let collected = self.statements.delete_statements(&[statement.id.clone()]);
        if let Thing::Literal(literal) = &statement.object {
            if collected.contains(&literal.id) && updated.object.id() == &literal.id {
                warn!(
                    "Literal {} was collected while updating statement {}, restoring it",
                    literal.id, statement.id
                );
                self.literals.save_literal(literal.clone());
            }
        }
        self.statements.save_statement(updated);
        info!("Updated statement {}", statement.id);
        Ok(())
    }

    fn delete_by_id(&self, id: &StatementId) -> GraphResult<()> {
        self.delete_all_by_id(std::slice::from_ref(id))
    }

    fn delete_all_by_id(&self, ids: &[StatementId]) -> GraphResult<()> {
        let mut existing = Vec::with_capacity(ids.len());
        for id in ids {
            let Some(statement) = self.statements.find_statement(id) else {
                continue;
            };
            if !statement.modifiable {
                return Err(GraphError::StatementNotModifiable(statement.id));
            }
            if statement.is_list_element_statement() {
                return Err(GraphError::StatementInUse(StatementInUseReason::UsedInList));
            }
            existing.push(statement.id);
        }
        if existing.is_empty() {
            return Ok(());
        }
        let collected = self.statements.delete_statements(&existing);
        info!(
            "Deleted {} statements, {} orphaned literals collected",
            existing.len(),
            collected.len()
        );
        Ok(())
    }

    fn delete_all(&self) {
        self.statements.delete_all_statements();
        info!("Deleted all statements");
    }

    fn find_by_id(&self, id: &StatementId) -> Option<GeneralStatement> {
        self.statements.find_statement(id)
    }

    fn exists(&self, id: &StatementId) -> bool {
        self.statements.find_statement(id).is_some()
    }

    fn find_all(&self, filter: &StatementFilter, sort: &Sort) -> Vec<GeneralStatement> {
        let mut statements = self.statements.find_all_statements(filter);
        sort.apply(&mut statements);
        statements
    }

    fn count(&self) -> usize {
        self.statements.count_statements()
    }

    fn fetch_as_bundle(
        &self,
        root_id: &ThingId,
        configuration: &BundleConfiguration,
        include_first: bool,
        sort: &Sort,
    ) -> GraphResult<Bundle> {
        self.require_thing(root_id)?;
        configuration.validate()?;

        let mut bundle = self.subgraph(root_id, configuration);
        if include_first {
            let first = self.subgraph(root_id, &BundleConfiguration::first_level());
            bundle = bundle.merge(first, sort);
        } else {
            sort.apply(&mut bundle.statements);
        }
        debug!(
            "Fetched bundle for {} with {} statements",
            root_id,
            bundle.len()
        );
        Ok(bundle)
    }

    fn count_statements_in_paper_subgraph(&self, id: &ThingId) -> GraphResult<usize> {
        self.require_thing(id)?;
        // Links to other papers, problems and fields belong to those subgraphs
        let configuration = BundleConfiguration {
            blacklist: [classes::PAPER, classes::PROBLEM, classes::RESEARCH_FIELD]
                .into_iter()
                .map(ThingId::new)
                .collect(),
            ..Default::default()
        };
        let statements = find_subgraph(
            id,
            &configuration,
            |thing_id| self.statements.find_outgoing_statements(thing_id),
            |_| true,
        );
        Ok(statements.len())
    }

    fn count_incoming_statements_by_id(&self, id: &ThingId) -> GraphResult<usize> {
        self.require_thing(id)?;
        Ok(self.statements.count_incoming_statements(id))
    }

    fn count_incoming_statements_by_ids(&self, ids: &[ThingId]) -> IndexMap<ThingId, usize> {
        ids.iter()
            .map(|id| (id.clone(), self.statements.count_incoming_statements(id)))
            .collect()
    }

    fn count_predicate_usage(&self) -> Vec<PredicateUsageCount> {
        self.statements.count_predicate_usage()
    }

    fn find_all_descriptions(&self, ids: &[ThingId]) -> IndexMap<ThingId, String> {
        let mut descriptions = IndexMap::new();
        for id in ids {
            let filter = StatementFilter {
                subject_id: Some(id.clone()),
                predicate_id: Some(ThingId::new(predicates::DESCRIPTION)),
                ..Default::default()
            };
            let description = self
                .statements
                .find_all_statements(&filter)
                .into_iter()
                .find_map(|s| s.object.as_literal().map(|l| l.label.clone()));
            if let Some(description) = description {
                descriptions.insert(id.clone(), description);
            }
        }
        descriptions
    }
}
