//! Reserved vocabulary and label rules

use super::types::ThingId;

/// Maximum number of characters in any label
pub const MAX_LABEL_LENGTH: usize = 8164;

/// Well-known class ids
pub mod classes {
    pub const THING: &str = "Thing";
    pub const RESOURCE: &str = "Resource";
    pub const LITERAL: &str = "Literal";
    pub const PREDICATE: &str = "Predicate";
    pub const CLASS: &str = "Class";
    pub const LIST: &str = "List";
    pub const PAPER: &str = "Paper";
    pub const PROBLEM: &str = "Problem";
    pub const RESEARCH_FIELD: &str = "ResearchField";
}

/// Well-known predicate ids
pub mod predicates {
    pub const HAS_LIST_ELEMENT: &str = "hasListElement";
    pub const DESCRIPTION: &str = "description";
}

/// Class ids that can never be assigned to a resource or used as a class id
pub const RESERVED_CLASS_IDS: [&str; 6] = [
    classes::THING,
    classes::LITERAL,
    classes::CLASS,
    classes::PREDICATE,
    classes::RESOURCE,
    classes::LIST,
];

pub fn is_reserved_class(id: &ThingId) -> bool {
    RESERVED_CLASS_IDS.contains(&id.as_str())
}

/// Labels of resources, predicates, classes and lists: bounded, single line, not blank
pub fn is_valid_label(label: &str, max_length: usize) -> bool {
    !label.trim().is_empty()
        && label.chars().count() <= max_length
        && !label.contains(['\n', '\r'])
}

/// Literal values may be blank or multi-line but are still bounded
pub fn is_valid_literal_label(label: &str, max_length: usize) -> bool {
    label.chars().count() <= max_length
}
