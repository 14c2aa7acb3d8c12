//! Literal datatypes
//!
//! Datatypes are given either as prefixed names (`xsd:integer`, `rdf:HTML`)
//! or as absolute IRIs. XSD types known to the graph constrain the lexical
//! form of literal labels; any other absolute IRI is accepted as an opaque
//! datatype.

use oxiri::Iri;
use regex::Regex;
use std::sync::LazyLock;

pub const XSD_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema#";

/// Prefixes that may be used in datatype names
const KNOWN_PREFIXES: [(&str, &str); 4] = [
    ("xsd", XSD_NAMESPACE),
    ("rdf", "http://www.w3.org/1999/02/22-rdf-syntax-ns#"),
    ("rdfs", "http://www.w3.org/2000/01/rdf-schema#"),
    ("owl", "http://www.w3.org/2002/07/owl#"),
];

static DECIMAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([+-])?([0-9]+(\.[0-9]*)?|\.[0-9]+)$").unwrap());
static INTEGER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[+-]?[0-9]+$").unwrap());
static FLOAT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(([+-])?([0-9]+(\.[0-9]*)?|\.[0-9]+)([Ee]([+-])?[0-9]+)?|(\+|-)?INF|NaN)$")
        .unwrap()
});
static BOOLEAN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(true|false|1|0)$").unwrap());
static DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^-?([1-9][0-9]{3,}|0[0-9]{3})-(0[1-9]|1[0-2])-(0[1-9]|[12][0-9]|3[01])(Z|[+-]((0[0-9]|1[0-3]):[0-5][0-9]|14:00))?$")
        .unwrap()
});
static DATE_TIME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^-?([1-9][0-9]{3,}|0[0-9]{3})-(0[1-9]|1[0-2])-(0[1-9]|[12][0-9]|3[01])T(([01][0-9]|2[0-3]):[0-5][0-9]:[0-5][0-9](\.[0-9]+)?|(24:00:00(\.0+)?))(Z|[+-]((0[0-9]|1[0-3]):[0-5][0-9]|14:00))?$")
        .unwrap()
});
static TIME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(([01][0-9]|2[0-3]):[0-5][0-9]:[0-5][0-9](\.[0-9]+)?|(24:00:00(\.0+)?))(Z|[+-]((0[0-9]|1[0-3]):[0-5][0-9]|14:00))?$")
        .unwrap()
});
static DURATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^-?P(([0-9]+Y([0-9]+M)?([0-9]+D)?|([0-9]+M)([0-9]+D)?|([0-9]+D))(T(([0-9]+H)([0-9]+M)?([0-9]+(\.[0-9]+)?S)?|([0-9]+M)([0-9]+(\.[0-9]+)?S)?|([0-9]+(\.[0-9]+)?S)))?|T(([0-9]+H)([0-9]+M)?([0-9]+(\.[0-9]+)?S)?|([0-9]+M)([0-9]+(\.[0-9]+)?S)?|([0-9]+(\.[0-9]+)?S)))$")
        .unwrap()
});
static G_YEAR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^-?([1-9][0-9]{3,}|0[0-9]{3})(Z|[+-]((0[0-9]|1[0-3]):[0-5][0-9]|14:00))?$").unwrap()
});
static G_YEAR_MONTH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^-?([1-9][0-9]{3,}|0[0-9]{3})-(0[1-9]|1[0-2])(Z|[+-]((0[0-9]|1[0-3]):[0-5][0-9]|14:00))?$")
        .unwrap()
});
static POSITIVE_INTEGER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?0*[1-9][0-9]*$").unwrap());
static NON_NEGATIVE_INTEGER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(-0+|\+?[0-9]+)$").unwrap());
static NEGATIVE_INTEGER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^-0*[1-9][0-9]*$").unwrap());
static NON_POSITIVE_INTEGER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(-[0-9]+|\+?0+)$").unwrap());
static HEX_BINARY: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^([0-9a-fA-F]{2})*$").unwrap());
static TOKEN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^([^\s]+( [^\s]+)*)?$").unwrap());

/// XSD datatypes with a checked lexical space
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum XsdDatatype {
    String,
    Integer,
    Int,
    Decimal,
    Float,
    Double,
    Boolean,
    Date,
    DateTime,
    Time,
    AnyUri,
    Duration,
    GYear,
    GYearMonth,
    PositiveInteger,
    NonNegativeInteger,
    NegativeInteger,
    NonPositiveInteger,
    UnsignedInt,
    UnsignedLong,
    HexBinary,
    Token,
    NormalizedString,
}

impl XsdDatatype {
    pub const ALL: [XsdDatatype; 23] = [
        XsdDatatype::String,
        XsdDatatype::Integer,
        XsdDatatype::Int,
        XsdDatatype::Decimal,
        XsdDatatype::Float,
        XsdDatatype::Double,
        XsdDatatype::Boolean,
        XsdDatatype::Date,
        XsdDatatype::DateTime,
        XsdDatatype::Time,
        XsdDatatype::AnyUri,
        XsdDatatype::Duration,
        XsdDatatype::GYear,
        XsdDatatype::GYearMonth,
        XsdDatatype::PositiveInteger,
        XsdDatatype::NonNegativeInteger,
        XsdDatatype::NegativeInteger,
        XsdDatatype::NonPositiveInteger,
        XsdDatatype::UnsignedInt,
        XsdDatatype::UnsignedLong,
        XsdDatatype::HexBinary,
        XsdDatatype::Token,
        XsdDatatype::NormalizedString,
    ];

    pub fn local_name(&self) -> &'static str {
        match self {
            XsdDatatype::String => "string",
            XsdDatatype::Integer => "integer",
            XsdDatatype::Int => "int",
            XsdDatatype::Decimal => "decimal",
            XsdDatatype::Float => "float",
            XsdDatatype::Double => "double",
            XsdDatatype::Boolean => "boolean",
            XsdDatatype::Date => "date",
            XsdDatatype::DateTime => "dateTime",
            XsdDatatype::Time => "time",
            XsdDatatype::AnyUri => "anyURI",
            XsdDatatype::Duration => "duration",
            XsdDatatype::GYear => "gYear",
            XsdDatatype::GYearMonth => "gYearMonth",
            XsdDatatype::PositiveInteger => "positiveInteger",
            XsdDatatype::NonNegativeInteger => "nonNegativeInteger",
            XsdDatatype::NegativeInteger => "negativeInteger",
            XsdDatatype::NonPositiveInteger => "nonPositiveInteger",
            XsdDatatype::UnsignedInt => "unsignedInt",
            XsdDatatype::UnsignedLong => "unsignedLong",
            XsdDatatype::HexBinary => "hexBinary",
            XsdDatatype::Token => "token",
            XsdDatatype::NormalizedString => "normalizedString",
        }
    }

    pub fn from_local_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.local_name() == name)
    }

    pub fn prefixed_name(&self) -> String {
        format!("xsd:{}", self.local_name())
    }

    pub fn iri(&self) -> String {
        format!("{}{}", XSD_NAMESPACE, self.local_name())
    }

    /// Check that a label lies in the lexical space of this type
    pub fn can_parse(&self, value: &str) -> bool {
        match self {
            XsdDatatype::String => true,
            XsdDatatype::Integer => INTEGER.is_match(value),
            XsdDatatype::Int => INTEGER.is_match(value) && value.parse::<i32>().is_ok(),
            XsdDatatype::Decimal => DECIMAL.is_match(value),
            XsdDatatype::Float | XsdDatatype::Double => FLOAT.is_match(value),
            XsdDatatype::Boolean => BOOLEAN.is_match(value),
            XsdDatatype::Date => DATE.is_match(value),
            XsdDatatype::DateTime => DATE_TIME.is_match(value),
            XsdDatatype::Time => TIME.is_match(value),
            XsdDatatype::AnyUri => Iri::parse(value).is_ok(),
            XsdDatatype::Duration => DURATION.is_match(value),
            XsdDatatype::GYear => G_YEAR.is_match(value),
            XsdDatatype::GYearMonth => G_YEAR_MONTH.is_match(value),
            XsdDatatype::PositiveInteger => POSITIVE_INTEGER.is_match(value),
            XsdDatatype::NonNegativeInteger => NON_NEGATIVE_INTEGER.is_match(value),
            XsdDatatype::NegativeInteger => NEGATIVE_INTEGER.is_match(value),
            XsdDatatype::NonPositiveInteger => NON_POSITIVE_INTEGER.is_match(value),
            XsdDatatype::UnsignedInt => in_unsigned_range(value, u32::MAX.into()),
            XsdDatatype::UnsignedLong => in_unsigned_range(value, u64::MAX.into()),
            XsdDatatype::HexBinary => HEX_BINARY.is_match(value),
            XsdDatatype::Token => TOKEN.is_match(value),
            XsdDatatype::NormalizedString => !value.contains(['\n', '\r', '\t']),
        }
    }
}

// Signed forms such as "-0" and "+7" are valid as long as the value fits.
fn in_unsigned_range(value: &str, max: i128) -> bool {
    INTEGER.is_match(value) && value.parse::<i128>().map_or(false, |n| (0..=max).contains(&n))
}

/// A datatype after resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Datatype {
    Xsd(XsdDatatype),
    /// Any other absolute IRI; labels are not checked
    Iri(String),
}

impl Datatype {
    pub fn can_parse(&self, value: &str) -> bool {
        match self {
            Datatype::Xsd(xsd) => xsd.can_parse(value),
            Datatype::Iri(_) => true,
        }
    }
}

/// Resolve a datatype name, or `None` if it is neither a known prefixed
/// name nor an absolute IRI
pub fn resolve_datatype(datatype: &str) -> Option<Datatype> {
    if let Some(local) = datatype.strip_prefix("xsd:") {
        return XsdDatatype::from_local_name(local).map(Datatype::Xsd);
    }
    if let Some(local) = datatype.strip_prefix(XSD_NAMESPACE) {
        return XsdDatatype::from_local_name(local).map(Datatype::Xsd);
    }
    for (prefix, namespace) in KNOWN_PREFIXES {
        if let Some(local) = datatype
            .strip_prefix(prefix)
            .and_then(|rest| rest.strip_prefix(':'))
        {
            return Some(Datatype::Iri(format!("{}{}", namespace, local)));
        }
    }
    // Opaque datatypes need an authority or the urn scheme
    if !(datatype.contains("://") || datatype.starts_with("urn:")) {
        return None;
    }
    Iri::parse(datatype)
        .ok()
        .map(|iri| Datatype::Iri(iri.into_inner().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_prefixed_xsd() {
        assert_eq!(
            resolve_datatype("xsd:decimal"),
            Some(Datatype::Xsd(XsdDatatype::Decimal))
        );
        assert_eq!(
            resolve_datatype("http://www.w3.org/2001/XMLSchema#integer"),
            Some(Datatype::Xsd(XsdDatatype::Integer))
        );
        assert_eq!(resolve_datatype("xsd:nonsense"), None);
    }

    #[test]
    fn test_resolve_other_prefixes_and_iris() {
        assert_eq!(
            resolve_datatype("rdf:HTML"),
            Some(Datatype::Iri(
                "http://www.w3.org/1999/02/22-rdf-syntax-ns#HTML".to_string()
            ))
        );
        assert_eq!(
            resolve_datatype("https://example.org/units#meter"),
            Some(Datatype::Iri("https://example.org/units#meter".to_string()))
        );
    }

    #[test]
    fn test_resolve_invalid() {
        assert_eq!(resolve_datatype("foo_bar:string"), None);
        assert_eq!(resolve_datatype("%§&invalid$§/"), None);
        assert_eq!(resolve_datatype("no colon"), None);
        assert_eq!(resolve_datatype("ex:unit"), None);
        assert_eq!(
            resolve_datatype("urn:example:unit"),
            Some(Datatype::Iri("urn:example:unit".to_string()))
        );
    }

    #[test]
    fn test_numeric_lexical_forms() {
        assert!(XsdDatatype::Decimal.can_parse("-1.5"));
        assert!(XsdDatatype::Decimal.can_parse(".5"));
        assert!(!XsdDatatype::Decimal.can_parse("1e5"));
        assert!(!XsdDatatype::Decimal.can_parse("not a number"));

        assert!(XsdDatatype::Integer.can_parse("+42"));
        assert!(!XsdDatatype::Integer.can_parse("4.2"));
        assert!(!XsdDatatype::Int.can_parse("99999999999"));

        assert!(XsdDatatype::Float.can_parse("1.5E-3"));
        assert!(XsdDatatype::Float.can_parse("NaN"));
        assert!(XsdDatatype::Double.can_parse("-INF"));

        assert!(XsdDatatype::PositiveInteger.can_parse("5"));
        assert!(!XsdDatatype::PositiveInteger.can_parse("0"));
        assert!(XsdDatatype::NonNegativeInteger.can_parse("0"));
        assert!(XsdDatatype::NegativeInteger.can_parse("-3"));
        assert!(!XsdDatatype::NegativeInteger.can_parse("-0"));
        assert!(XsdDatatype::NonPositiveInteger.can_parse("0"));
        assert!(!XsdDatatype::UnsignedInt.can_parse("-1"));
        assert!(XsdDatatype::UnsignedInt.can_parse("-0"));
        assert!(XsdDatatype::UnsignedInt.can_parse("+4294967295"));
        assert!(!XsdDatatype::UnsignedInt.can_parse("4294967296"));
        assert!(XsdDatatype::UnsignedLong.can_parse("-000"));
        assert!(XsdDatatype::UnsignedLong.can_parse("18446744073709551615"));
        assert!(!XsdDatatype::UnsignedLong.can_parse("18446744073709551616"));
    }

    #[test]
    fn test_temporal_lexical_forms() {
        assert!(XsdDatatype::Date.can_parse("2023-10-06"));
        assert!(XsdDatatype::Date.can_parse("2023-10-06Z"));
        assert!(!XsdDatatype::Date.can_parse("2023-13-06"));

        assert!(XsdDatatype::DateTime.can_parse("2023-10-06T11:28:14.613254+01:00"));
        assert!(!XsdDatatype::DateTime.can_parse("2023-10-06 11:28:14"));

        assert!(XsdDatatype::Time.can_parse("11:28:14"));
        assert!(XsdDatatype::Duration.can_parse("P1Y2M3DT4H5M6S"));
        assert!(XsdDatatype::Duration.can_parse("PT0.5S"));
        assert!(!XsdDatatype::Duration.can_parse("P"));
        assert!(XsdDatatype::GYear.can_parse("2023"));
        assert!(XsdDatatype::GYearMonth.can_parse("2023-10"));
    }

    #[test]
    fn test_other_lexical_forms() {
        assert!(XsdDatatype::Boolean.can_parse("true"));
        assert!(XsdDatatype::Boolean.can_parse("0"));
        assert!(!XsdDatatype::Boolean.can_parse("yes"));
        assert!(XsdDatatype::HexBinary.can_parse("0FB7"));
        assert!(!XsdDatatype::HexBinary.can_parse("0FB"));
        assert!(XsdDatatype::Token.can_parse("a token"));
        assert!(!XsdDatatype::Token.can_parse(" leading"));
        assert!(XsdDatatype::AnyUri.can_parse("https://orkg.org"));
        assert!(XsdDatatype::String.can_parse("anything\ngoes"));
    }

    #[test]
    fn test_names() {
        assert_eq!(XsdDatatype::DateTime.prefixed_name(), "xsd:dateTime");
        assert_eq!(
            XsdDatatype::AnyUri.iri(),
            "http://www.w3.org/2001/XMLSchema#anyURI"
        );
        for t in XsdDatatype::ALL {
            assert_eq!(XsdDatatype::from_local_name(t.local_name()), Some(t));
        }
    }
}
