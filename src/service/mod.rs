//! Use-case services over the repository ports
//!
//! Each service validates a command, checks modifiability and ownership
//! rules, and only then writes through the repositories. [`GraphServices`]
//! wires all of them against one shared store.

pub mod class;
pub mod class_hierarchy;
pub mod list;
pub mod literal;
pub mod predicate;
pub mod resource;
pub mod statement;

pub use class::{ClassService, ClassUseCases, CreateClassCommand, ReplaceClassCommand, UpdateClassCommand};
pub use class_hierarchy::{ClassHierarchyService, ClassHierarchyUseCases, CreateClassHierarchyCommand};
pub use list::{CreateListCommand, ListService, ListUseCases, UpdateListCommand};
pub use literal::{CreateLiteralCommand, LiteralService, LiteralUseCases, UpdateLiteralCommand};
pub use predicate::{CreatePredicateCommand, PredicateService, PredicateUseCases, UpdatePredicateCommand};
pub use resource::{CreateResourceCommand, ResourceService, ResourceUseCases, UpdateResourceCommand};
pub use statement::{CreateStatementCommand, StatementService, StatementUseCases, UpdateStatementCommand};

use crate::config::GraphConfig;
use crate::graph::{Clock, Contributor, ContributorId};
use crate::persistence::{ContributorRepository, InMemoryGraph};
use std::sync::Arc;

/// Resolve the contributor performing an action.
///
/// Ids without a stored profile act as plain contributors without curator rights.
pub(crate) fn acting_contributor(
    contributors: &dyn ContributorRepository,
    id: Option<ContributorId>,
) -> Option<Contributor> {
    id.map(|id| {
        contributors
            .find_contributor(&id)
            .unwrap_or_else(|| Contributor::new(id, ""))
    })
}

/// All services, sharing one store and one clock
pub struct GraphServices {
    pub resources: ResourceService,
    pub predicates: PredicateService,
    pub classes: ClassService,
    pub literals: LiteralService,
    pub statements: StatementService,
    pub class_hierarchy: ClassHierarchyService,
    pub lists: ListService,
}

impl GraphServices {
    pub fn new(graph: Arc<InMemoryGraph>, config: &GraphConfig, clock: Arc<dyn Clock>) -> Self {
        let max = config.max_label_length;
        GraphServices {
            resources: ResourceService::new(
                graph.clone(),
                graph.clone(),
                graph.clone(),
                graph.clone(),
                graph.clone(),
                clock.clone(),
                max,
            ),
            predicates: PredicateService::new(
                graph.clone(),
                graph.clone(),
                graph.clone(),
                graph.clone(),
                clock.clone(),
                max,
            ),
            classes: ClassService::new(graph.clone(), graph.clone(), clock.clone(), max),
            literals: LiteralService::new(graph.clone(), graph.clone(), clock.clone(), max),
            statements: StatementService::new(graph.clone(), graph.clone(), graph.clone(), clock.clone()),
            class_hierarchy: ClassHierarchyService::new(
                graph.clone(),
                graph.clone(),
                graph.clone(),
                clock.clone(),
            ),
            lists: ListService::new(graph.clone(), graph.clone(), graph.clone(), graph, clock, max),
        }
    }

    /// Services over a fresh in-memory store with the system clock
    pub fn in_memory(config: &GraphConfig) -> (Arc<InMemoryGraph>, Self) {
        let graph = Arc::new(InMemoryGraph::new());
        let services = Self::new(graph.clone(), config, Arc::new(crate::graph::SystemClock));
        (graph, services)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_acting_contributor() {
        let graph = InMemoryGraph::new();
        let curator = ContributorId::random();
        graph.save_contributor(Contributor::curator(curator, "Curator"));

        assert!(acting_contributor(&graph, None).is_none());
        assert!(acting_contributor(&graph, Some(curator)).unwrap().is_curator);

        let unknown = ContributorId::random();
        let actor = acting_contributor(&graph, Some(unknown)).unwrap();
        assert_eq!(actor.id, unknown);
        assert!(!actor.is_curator);
    }
}
