//! Bundles: subgraphs fetched around a root thing, and their ordering

use super::error::{GraphError, GraphResult};
use super::statement::GeneralStatement;
use super::thing::Thing;
use super::types::ThingId;
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use uuid::Uuid;

/// Limits and label filters of a bundle fetch
///
/// Levels count edges from the root: the root's own outgoing statements
/// are on level 1.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BundleConfiguration {
    /// Statements on this level or above it are walked but not returned
    pub min_level: Option<usize>,
    /// Statements below this level are neither returned nor walked
    pub max_level: Option<usize>,
    /// Objects carrying any of these labels are cut off
    #[serde(default)]
    pub blacklist: Vec<ThingId>,
    /// If non-empty, objects must carry at least one of these labels
    #[serde(default)]
    pub whitelist: Vec<ThingId>,
}

impl BundleConfiguration {
    /// Only the root's own outgoing statements
    pub fn first_level() -> Self {
        BundleConfiguration {
            min_level: None,
            max_level: Some(1),
            blacklist: Vec::new(),
            whitelist: Vec::new(),
        }
    }

    pub fn validate(&self) -> GraphResult<()> {
        match self.blacklist.iter().find(|id| self.whitelist.contains(id)) {
            Some(id) => Err(GraphError::InvalidClassFilter(id.clone())),
            None => Ok(()),
        }
    }

    /// Whether a statement pointing at `object` passes the label filters
    pub fn admits(&self, object: &Thing) -> bool {
        if object.has_any_label(&self.blacklist) {
            return false;
        }
        self.whitelist.is_empty() || object.has_any_label(&self.whitelist)
    }

    pub fn within_max_level(&self, level: usize) -> bool {
        self.max_level.map_or(true, |max| level <= max)
    }

    pub fn above_min_level(&self, level: usize) -> bool {
        self.min_level.map_or(true, |min| level > min)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortProperty {
    Id,
    CreatedAt,
    CreatedBy,
    Index,
    SubjectId,
    SubjectLabel,
    SubjectCreatedAt,
    SubjectCreatedBy,
    ObjectId,
    ObjectLabel,
    ObjectCreatedAt,
    ObjectCreatedBy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortOrder {
    pub property: SortProperty,
    #[serde(default)]
    pub direction: Direction,
}

/// Ordering of statements; an empty sort means newest first
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Sort {
    orders: Vec<SortOrder>,
}

#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
enum SortKey<'a> {
    Text(&'a str),
    Time(DateTime<Utc>),
    Position(usize),
    Contributor(Uuid),
}

impl Sort {
    pub fn unsorted() -> Self {
        Sort::default()
    }

    pub fn by(property: SortProperty, direction: Direction) -> Self {
        Sort {
            orders: vec![SortOrder { property, direction }],
        }
    }

    pub fn then(mut self, property: SortProperty, direction: Direction) -> Self {
        self.orders.push(SortOrder { property, direction });
        self
    }

    pub fn is_unsorted(&self) -> bool {
        self.orders.is_empty()
    }

    pub fn orders(&self) -> &[SortOrder] {
        &self.orders
    }

    pub fn compare(&self, a: &GeneralStatement, b: &GeneralStatement) -> Ordering {
        if self.orders.is_empty() {
            return b.created_at.cmp(&a.created_at);
        }
        for order in &self.orders {
            let ordering = compare_keys(
                sort_key(a, order.property),
                sort_key(b, order.property),
                order.direction,
            );
            if ordering != Ordering::Equal {
                return ordering;
            }
        }
        Ordering::Equal
    }

    /// Stable sort of statements in place
    pub fn apply(&self, statements: &mut [GeneralStatement]) {
        statements.sort_by(|a, b| self.compare(a, b));
    }
}

fn sort_key(statement: &GeneralStatement, property: SortProperty) -> Option<SortKey<'_>> {
    match property {
        SortProperty::Id => Some(SortKey::Text(statement.id.as_str())),
        SortProperty::CreatedAt => Some(SortKey::Time(statement.created_at)),
        SortProperty::CreatedBy => statement.created_by.map(|c| SortKey::Contributor(c.0)),
        SortProperty::Index => statement.index.map(SortKey::Position),
        SortProperty::SubjectId => Some(SortKey::Text(statement.subject.id().as_str())),
        SortProperty::SubjectLabel => Some(SortKey::Text(statement.subject.label())),
        SortProperty::SubjectCreatedAt => Some(SortKey::Time(statement.subject.created_at())),
        SortProperty::SubjectCreatedBy => statement
            .subject
            .created_by()
            .map(|c| SortKey::Contributor(c.0)),
        SortProperty::ObjectId => Some(SortKey::Text(statement.object.id().as_str())),
        SortProperty::ObjectLabel => Some(SortKey::Text(statement.object.label())),
        SortProperty::ObjectCreatedAt => Some(SortKey::Time(statement.object.created_at())),
        SortProperty::ObjectCreatedBy => statement
            .object
            .created_by()
            .map(|c| SortKey::Contributor(c.0)),
    }
}

// Missing values sort last in either direction.
fn compare_keys(a: Option<SortKey<'_>>, b: Option<SortKey<'_>>, direction: Direction) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => match direction {
            Direction::Asc => a.cmp(&b),
            Direction::Desc => b.cmp(&a),
        },
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Statements reachable from a root thing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bundle {
    pub root_id: ThingId,
    pub statements: Vec<GeneralStatement>,
}

impl Bundle {
    pub fn new(root_id: ThingId, statements: Vec<GeneralStatement>) -> Self {
        Bundle { root_id, statements }
    }

    pub fn len(&self) -> usize {
        self.statements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    /// Union of two bundles of the same root, deduplicated by statement id
    pub fn merge(self, other: Bundle, sort: &Sort) -> Bundle {
        let mut by_id: IndexMap<_, _> = self
            .statements
            .into_iter()
            .map(|s| (s.id.clone(), s))
            .collect();
        for statement in other.statements {
            by_id.entry(statement.id.clone()).or_insert(statement);
        }
        let mut statements: Vec<_> = by_id.into_values().collect();
        sort.apply(&mut statements);
        Bundle {
            root_id: self.root_id,
            statements,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::thing::{Literal, Predicate, Resource};
    use crate::graph::types::{ContributorId, StatementId};

    fn statement(id: &str, object_label: &str, secs: i64) -> GeneralStatement {
        let created_at = DateTime::<Utc>::from_timestamp(1_700_000_000 + secs, 0).unwrap();
        GeneralStatement {
            id: StatementId::new(id),
            subject: Resource::new("R1", "root", created_at).into(),
            predicate: Predicate::new("P1", "p", created_at),
            object: Literal::new(format!("L{}", id), object_label, created_at).into(),
            created_at,
            created_by: None,
            modifiable: true,
            index: None,
        }
    }

    #[test]
    fn test_validate_rejects_overlapping_filters() {
        let config = BundleConfiguration {
            blacklist: vec![ThingId::new("Paper")],
            whitelist: vec![ThingId::new("Paper")],
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(GraphError::InvalidClassFilter(ThingId::new("Paper")))
        );
        assert!(BundleConfiguration::default().validate().is_ok());
    }

    #[test]
    fn test_admits() {
        let now = Utc::now();
        let paper: Thing = Resource::new("R2", "Paper", now).with_class("Paper").into();
        let literal: Thing = Literal::new("L1", "x", now).into();

        let config = BundleConfiguration {
            blacklist: vec![ThingId::new("Paper")],
            ..Default::default()
        };
        assert!(!config.admits(&paper));
        assert!(config.admits(&literal));

        let config = BundleConfiguration {
            whitelist: vec![ThingId::new("Literal")],
            ..Default::default()
        };
        assert!(!config.admits(&paper));
        assert!(config.admits(&literal));
    }

    #[test]
    fn test_levels() {
        let config = BundleConfiguration {
            min_level: Some(1),
            max_level: Some(3),
            ..Default::default()
        };
        assert!(!config.above_min_level(1));
        assert!(config.above_min_level(2));
        assert!(config.within_max_level(3));
        assert!(!config.within_max_level(4));

        let first = BundleConfiguration::first_level();
        assert!(first.within_max_level(1));
        assert!(!first.within_max_level(2));
    }

    #[test]
    fn test_unsorted_is_newest_first() {
        let mut statements = vec![statement("S1", "a", 0), statement("S2", "b", 10)];
        Sort::unsorted().apply(&mut statements);
        assert_eq!(statements[0].id, StatementId::new("S2"));
    }

    #[test]
    fn test_sort_by_object_label_then_id() {
        let mut statements = vec![
            statement("S3", "b", 0),
            statement("S2", "a", 0),
            statement("S1", "b", 0),
        ];
        Sort::by(SortProperty::ObjectLabel, Direction::Asc)
            .then(SortProperty::Id, Direction::Desc)
            .apply(&mut statements);
        let ids: Vec<_> = statements.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["S2", "S3", "S1"]);
    }

    #[test]
    fn test_missing_values_sort_last() {
        let mut a = statement("S1", "a", 0);
        let b = statement("S2", "b", 0);
        a.created_by = Some(ContributorId::random());

        for direction in [Direction::Asc, Direction::Desc] {
            let mut statements = vec![b.clone(), a.clone()];
            Sort::by(SortProperty::CreatedBy, direction).apply(&mut statements);
            assert_eq!(statements[0].id, StatementId::new("S1"));
        }
    }

    #[test]
    fn test_merge_deduplicates() {
        let root = ThingId::new("R1");
        let left = Bundle::new(root.clone(), vec![statement("S1", "a", 0), statement("S2", "b", 5)]);
        let right = Bundle::new(root.clone(), vec![statement("S2", "b", 5), statement("S3", "c", 9)]);

        let merged = left.merge(right, &Sort::unsorted());
        let ids: Vec<_> = merged.statements.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["S3", "S2", "S1"]);
        assert_eq!(merged.root_id, root);
    }
}
