use anyhow::{Context, Result};
use orkg_graph::config::{init_logging, GraphConfig};
use orkg_graph::graph::vocab::classes;
use orkg_graph::graph::BundleConfiguration;
use orkg_graph::service::{
    ClassUseCases, CreateClassCommand, CreateListCommand, CreateLiteralCommand,
    CreatePredicateCommand, CreateResourceCommand, CreateStatementCommand, GraphServices,
    ListUseCases, LiteralUseCases, PredicateUseCases, ResourceUseCases, StatementUseCases,
};
use orkg_graph::ThingId;
use tracing::info;

fn main() -> Result<()> {
    let config = match std::env::args().nth(1) {
        Some(path) => GraphConfig::load(&path).with_context(|| format!("loading config {path}"))?,
        None => GraphConfig::default(),
    };
    init_logging(&config);

    println!("ORKG Statement Graph v{}", orkg_graph::version());
    println!("==========================================");
    println!();

    let (graph, services) = GraphServices::in_memory(&config);
    if !config.seed {
        info!("Seeding disabled, nothing to show");
        return Ok(());
    }

    let root = seed(&services)?;
    println!("Seeded {} things", graph.thing_count());

    let bundle = services.statements.fetch_as_bundle(
        &root,
        &BundleConfiguration::default(),
        true,
        &config.default_bundle_sort,
    )?;
    println!("\n=== Bundle of {} ({} statements) ===", root, bundle.len());
    println!("{}", serde_json::to_string_pretty(&bundle)?);

    let in_subgraph = services.statements.count_statements_in_paper_subgraph(&root)?;
    println!("\nStatements in paper subgraph: {}", in_subgraph);

    let usage = services.statements.count_predicate_usage();
    println!("\n=== Predicate usage ===");
    for entry in usage {
        println!("  {}: {}", entry.predicate_id, entry.count);
    }
    Ok(())
}

/// Two papers citing each other, an author list and a publication year
fn seed(services: &GraphServices) -> Result<ThingId> {
    services
        .classes
        .create(CreateClassCommand::new("Paper").with_id(classes::PAPER))?;

    let paper_a = services
        .resources
        .create(CreateResourceCommand::new("Paper A").with_class(classes::PAPER))?;
    let paper_b = services
        .resources
        .create(CreateResourceCommand::new("Paper B").with_class(classes::PAPER))?;
    let author = services
        .resources
        .create(CreateResourceCommand::new("Ada Lovelace"))?;

    let cites = services.predicates.create(CreatePredicateCommand::new("cites"))?;
    let authors = services.predicates.create(CreatePredicateCommand::new("authors"))?;
    let year = services
        .predicates
        .create(CreatePredicateCommand::new("publication year"))?;

    let year_literal = services
        .literals
        .create(CreateLiteralCommand::new("2024").with_datatype("xsd:integer"))?;
    let author_list = services
        .lists
        .create(CreateListCommand::new("authors of Paper A", vec![author]))?;

    for (subject, predicate, object) in [
        (&paper_a, &cites, &paper_b),
        (&paper_b, &cites, &paper_a),
        (&paper_a, &authors, &author_list),
        (&paper_a, &year, &year_literal),
    ] {
        services.statements.create(CreateStatementCommand::new(
            subject.clone(),
            predicate.clone(),
            object.clone(),
        ))?;
    }
    info!("Seeded demo graph rooted at {}", paper_a);
    Ok(paper_a)
}
