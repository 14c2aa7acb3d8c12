use orkg_graph::config::GraphConfig;
use orkg_graph::graph::{Contributor, ContributorId, GraphError, ThingId, Visibility};
use orkg_graph::persistence::ContributorRepository;
use orkg_graph::service::{
    ClassUseCases, CreateClassCommand, CreateListCommand, CreateLiteralCommand,
    CreatePredicateCommand, CreateResourceCommand, CreateStatementCommand, GraphServices,
    ListUseCases, LiteralUseCases, PredicateUseCases, ResourceUseCases, StatementUseCases,
    UpdateClassCommand, UpdateListCommand, UpdateLiteralCommand, UpdatePredicateCommand,
    UpdateResourceCommand, UpdateStatementCommand,
};

#[test]
fn test_unmodifiable_things_reject_changes() {
    let (_, services) = GraphServices::in_memory(&GraphConfig::default());

    let mut resource = CreateResourceCommand::new("fixed");
    resource.modifiable = false;
    let resource = services.resources.create(resource).unwrap();
    let mut update = UpdateResourceCommand::new(resource.clone(), None);
    update.label = Some("changed".to_string());
    assert_eq!(
        services.resources.update(update),
        Err(GraphError::ResourceNotModifiable(resource.clone()))
    );
    assert_eq!(
        services.resources.delete(&resource, None),
        Err(GraphError::ResourceNotModifiable(resource))
    );

    let mut predicate = CreatePredicateCommand::new("fixed");
    predicate.modifiable = false;
    let predicate = services.predicates.create(predicate).unwrap();
    assert_eq!(
        services.predicates.update(UpdatePredicateCommand {
            id: predicate.clone(),
            label: Some("changed".to_string()),
        }),
        Err(GraphError::PredicateNotModifiable(predicate))
    );

    let mut class = CreateClassCommand::new("fixed");
    class.modifiable = false;
    let class = services.classes.create(class).unwrap();
    assert_eq!(
        services.classes.update(UpdateClassCommand {
            id: class.clone(),
            label: Some("changed".to_string()),
            uri: None,
        }),
        Err(GraphError::ClassNotModifiable(class))
    );

    let mut literal = CreateLiteralCommand::new("fixed");
    literal.modifiable = false;
    let literal = services.literals.create(literal).unwrap();
    assert_eq!(
        services.literals.update(UpdateLiteralCommand {
            id: literal.clone(),
            label: Some("changed".to_string()),
            datatype: None,
        }),
        Err(GraphError::LiteralNotModifiable(literal))
    );

    let a = services.resources.create(CreateResourceCommand::new("a")).unwrap();
    let b = services.resources.create(CreateResourceCommand::new("b")).unwrap();
    let p = services.predicates.create(CreatePredicateCommand::new("p")).unwrap();
    let mut statement = CreateStatementCommand::new(a.clone(), p, b.clone());
    statement.modifiable = false;
    let statement = services.statements.create(statement).unwrap();
    let mut update = UpdateStatementCommand::new(statement.clone());
    update.object_id = Some(a);
    assert_eq!(
        services.statements.update(update),
        Err(GraphError::StatementNotModifiable(statement.clone()))
    );
    assert_eq!(
        services.statements.delete_by_id(&statement),
        Err(GraphError::StatementNotModifiable(statement))
    );
}

#[test]
fn test_updates_without_changes_are_no_ops() {
    let (_, services) = GraphServices::in_memory(&GraphConfig::default());
    let id = services
        .resources
        .create(CreateResourceCommand::new("same"))
        .unwrap();
    let before = services.resources.find_by_id(&id).unwrap();

    let mut update = UpdateResourceCommand::new(id.clone(), None);
    update.label = Some("same".to_string());
    update.visibility = Some(Visibility::Default);
    services.resources.update(update).unwrap();
    assert_eq!(services.resources.find_by_id(&id).unwrap(), before);

    let list = services
        .lists
        .create(CreateListCommand::new("list", vec![id.clone()]))
        .unwrap();
    services
        .lists
        .update(UpdateListCommand {
            id: list.clone(),
            label: Some("list".to_string()),
            elements: Some(vec![id]),
        })
        .unwrap();
    assert_eq!(services.lists.find_by_id(&list).unwrap().label, "list");
}

#[test]
fn test_curation_rules() {
    let (graph, services) = GraphServices::in_memory(&GraphConfig::default());
    let owner = ContributorId::random();
    let curator = ContributorId::random();
    graph.save_contributor(Contributor::new(owner, "Owner"));
    graph.save_contributor(Contributor::curator(curator, "Curator"));

    let mut command = CreateResourceCommand::new("Paper");
    command.contributor_id = Some(owner);
    let id = services.resources.create(command).unwrap();

    let mut feature = UpdateResourceCommand::new(id.clone(), Some(owner));
    feature.visibility = Some(Visibility::Featured);
    assert_eq!(
        services.resources.update(feature.clone()),
        Err(GraphError::NeitherOwnerNorCurator(Some(owner)))
    );
    feature.contributor_id = Some(curator);
    services.resources.update(feature).unwrap();

    let mut unlist = UpdateResourceCommand::new(id.clone(), Some(curator));
    unlist.visibility = Some(Visibility::Unlisted);
    services.resources.update(unlist).unwrap();
    assert_eq!(
        services.resources.find_by_id(&id).unwrap().unlisted_by,
        Some(curator)
    );

    let mut restore = UpdateResourceCommand::new(id.clone(), Some(curator));
    restore.visibility = Some(Visibility::Default);
    services.resources.update(restore).unwrap();
    let resource = services.resources.find_by_id(&id).unwrap();
    assert_eq!(resource.visibility, Visibility::Default);
    assert_eq!(resource.unlisted_by, None);

    // Owners may soft-delete their own resources
    let mut delete = UpdateResourceCommand::new(id.clone(), Some(owner));
    delete.visibility = Some(Visibility::Deleted);
    services.resources.update(delete).unwrap();

    let mut verify = UpdateResourceCommand::new(id.clone(), Some(owner));
    verify.verified = Some(true);
    assert_eq!(
        services.resources.update(verify),
        Err(GraphError::NeitherOwnerNorCurator(Some(owner)))
    );
}

#[test]
fn test_resource_delete_rules() {
    let (graph, services) = GraphServices::in_memory(&GraphConfig::default());
    let owner = ContributorId::random();
    graph.save_contributor(Contributor::new(owner, "Owner"));

    let mut command = CreateResourceCommand::new("target");
    command.contributor_id = Some(owner);
    let target = services.resources.create(command).unwrap();
    let source = services.resources.create(CreateResourceCommand::new("source")).unwrap();
    let p = services.predicates.create(CreatePredicateCommand::new("p")).unwrap();
    let statement = services
        .statements
        .create(CreateStatementCommand::new(source, p, target.clone()))
        .unwrap();

    assert_eq!(
        services.resources.delete(&target, Some(owner)),
        Err(GraphError::ResourceUsedInStatement(target.clone()))
    );
    services.statements.delete_by_id(&statement).unwrap();

    // Unknown contributors act without curator rights
    let stranger = ContributorId::random();
    assert_eq!(
        services.resources.delete(&target, Some(stranger)),
        Err(GraphError::NeitherOwnerNorCurator(Some(stranger)))
    );
    services.resources.delete(&target, Some(owner)).unwrap();
    assert_eq!(
        services.resources.delete(&target, Some(owner)),
        Err(GraphError::ResourceNotFound(target))
    );
}

#[test]
fn test_resource_with_outgoing_statement_is_kept() {
    let (graph, services) = GraphServices::in_memory(&GraphConfig::default());
    let owner = ContributorId::random();
    graph.save_contributor(Contributor::new(owner, "Owner"));

    let mut command = CreateResourceCommand::new("subject");
    command.contributor_id = Some(owner);
    let subject = services.resources.create(command).unwrap();
    let p = services.predicates.create(CreatePredicateCommand::new("p")).unwrap();
    let year = services.literals.create(CreateLiteralCommand::new("2024")).unwrap();
    let statement = services
        .statements
        .create(CreateStatementCommand::new(subject.clone(), p, year.clone()))
        .unwrap();

    assert_eq!(
        services.resources.delete(&subject, Some(owner)),
        Err(GraphError::ResourceUsedInStatement(subject.clone()))
    );
    assert!(services.resources.find_by_id(&subject).is_some());
    assert!(services.statements.find_by_id(&statement).is_some());
    assert!(services.literals.find_by_id(&year).is_some());
}

#[test]
fn test_predicate_delete_rules() {
    let (graph, services) = GraphServices::in_memory(&GraphConfig::default());
    let owner = ContributorId::random();
    graph.save_contributor(Contributor::new(owner, "Owner"));

    let mut command = CreatePredicateCommand::new("cites");
    command.contributor_id = Some(owner);
    let cites = services.predicates.create(command).unwrap();
    let related = services.predicates.create(CreatePredicateCommand::new("related")).unwrap();
    let paper = services.resources.create(CreateResourceCommand::new("paper")).unwrap();

    // Used as an object
    let pointer = services
        .statements
        .create(CreateStatementCommand::new(paper.clone(), related.clone(), cites.clone()))
        .unwrap();
    assert_eq!(
        services.predicates.delete(&cites, Some(owner)),
        Err(GraphError::PredicateInUse(cites.clone()))
    );
    services.statements.delete_by_id(&pointer).unwrap();

    // Used as a subject only
    services
        .statements
        .create(CreateStatementCommand::new(cites.clone(), related, paper))
        .unwrap();
    assert_eq!(services.statements.count(), 1);
    services.predicates.delete(&cites, Some(owner)).unwrap();
    assert!(services.predicates.find_by_id(&cites).is_none());
    assert_eq!(services.statements.count(), 0);
}

#[test]
fn test_configured_label_limit() {
    let config = GraphConfig {
        max_label_length: 4,
        ..GraphConfig::default()
    };
    let (_, services) = GraphServices::in_memory(&config);
    assert_eq!(
        services.resources.create(CreateResourceCommand::new("too long")),
        Err(GraphError::InvalidLabel(4))
    );
    assert_eq!(
        services.predicates.create(CreatePredicateCommand::new("long")).map(|_| ()),
        Ok(())
    );
    assert_eq!(
        services
            .resources
            .create(CreateResourceCommand::new("ok").with_class("Literal")),
        Err(GraphError::InvalidClassCollection(vec![ThingId::new("Literal")]))
    );
}
