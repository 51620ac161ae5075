//! Query descriptions for document listings.
//!
//! A listing request carries a flat set of [`Query`] values. Filters are
//! combined with AND semantics; `OrderAsc`/`OrderDesc` apply in the order
//! given; `Limit` caps the page and `Select` projects attributes. The hosted
//! store receives each query as a JSON-encoded string parameter, the shape
//! produced by [`Query::to_wire`].

use serde_json::{json, Value};

/// Page size applied when a listing carries no explicit `Limit`.
pub const DEFAULT_PAGE_LIMIT: usize = 25;

/// One clause of a document listing.
#[derive(Debug, Clone, PartialEq)]
pub enum Query {
    /// Attribute equals the given value.
    Equal { attribute: String, value: Value },
    /// Attribute is null (or absent).
    IsNull { attribute: String },
    /// Attribute is present and non-null.
    IsNotNull { attribute: String },
    /// Attribute is greater than or equal to the given value.
    GreaterThanEqual { attribute: String, value: Value },
    /// Attribute is strictly less than the given value.
    LessThan { attribute: String, value: Value },
    /// String attribute contains the given substring.
    Contains { attribute: String, value: Value },
    /// All nested filters match.
    And { queries: Vec<Query> },
    /// Sort ascending by attribute.
    OrderAsc { attribute: String },
    /// Sort descending by attribute.
    OrderDesc { attribute: String },
    /// Cap the number of returned documents.
    Limit { count: usize },
    /// Return only the named attributes.
    Select { attributes: Vec<String> },
}

impl Query {
    pub fn equal(attribute: &str, value: impl Into<Value>) -> Self {
        Self::Equal {
            attribute: attribute.to_string(),
            value: value.into(),
        }
    }

    pub fn is_null(attribute: &str) -> Self {
        Self::IsNull {
            attribute: attribute.to_string(),
        }
    }

    pub fn is_not_null(attribute: &str) -> Self {
        Self::IsNotNull {
            attribute: attribute.to_string(),
        }
    }

    pub fn greater_than_equal(attribute: &str, value: impl Into<Value>) -> Self {
        Self::GreaterThanEqual {
            attribute: attribute.to_string(),
            value: value.into(),
        }
    }

    pub fn less_than(attribute: &str, value: impl Into<Value>) -> Self {
        Self::LessThan {
            attribute: attribute.to_string(),
            value: value.into(),
        }
    }

    pub fn contains(attribute: &str, value: impl Into<Value>) -> Self {
        Self::Contains {
            attribute: attribute.to_string(),
            value: value.into(),
        }
    }

    pub fn and(queries: Vec<Query>) -> Self {
        Self::And { queries }
    }

    pub fn order_asc(attribute: &str) -> Self {
        Self::OrderAsc {
            attribute: attribute.to_string(),
        }
    }

    pub fn order_desc(attribute: &str) -> Self {
        Self::OrderDesc {
            attribute: attribute.to_string(),
        }
    }

    pub fn limit(count: usize) -> Self {
        Self::Limit { count }
    }

    pub fn select(attributes: &[&str]) -> Self {
        Self::Select {
            attributes: attributes.iter().map(|a| a.to_string()).collect(),
        }
    }

    /// True for clauses that narrow the result set, as opposed to ordering,
    /// paging, or projection.
    pub fn is_filter(&self) -> bool {
        matches!(
            self,
            Self::Equal { .. }
                | Self::IsNull { .. }
                | Self::IsNotNull { .. }
                | Self::GreaterThanEqual { .. }
                | Self::LessThan { .. }
                | Self::Contains { .. }
                | Self::And { .. }
        )
    }

    /// Wire representation understood by the hosted store: an object with a
    /// `method` name plus `attribute`/`values` payload.
    pub fn to_wire(&self) -> Value {
        match self {
            Self::Equal { attribute, value } => {
                json!({ "method": "equal", "attribute": attribute, "values": [value] })
            }
            Self::IsNull { attribute } => {
                json!({ "method": "isNull", "attribute": attribute, "values": [] })
            }
            Self::IsNotNull { attribute } => {
                json!({ "method": "isNotNull", "attribute": attribute, "values": [] })
            }
            Self::GreaterThanEqual { attribute, value } => {
                json!({ "method": "greaterThanEqual", "attribute": attribute, "values": [value] })
            }
            Self::LessThan { attribute, value } => {
                json!({ "method": "lessThan", "attribute": attribute, "values": [value] })
            }
            Self::Contains { attribute, value } => {
                json!({ "method": "contains", "attribute": attribute, "values": [value] })
            }
            Self::And { queries } => {
                let nested: Vec<Value> = queries.iter().map(Query::to_wire).collect();
                json!({ "method": "and", "values": nested })
            }
            Self::OrderAsc { attribute } => {
                json!({ "method": "orderAsc", "attribute": attribute, "values": [] })
            }
            Self::OrderDesc { attribute } => {
                json!({ "method": "orderDesc", "attribute": attribute, "values": [] })
            }
            Self::Limit { count } => {
                json!({ "method": "limit", "values": [count] })
            }
            Self::Select { attributes } => {
                json!({ "method": "select", "values": attributes })
            }
        }
    }

    /// The wire object serialized to the string form sent as a `queries[]`
    /// request parameter.
    pub fn to_wire_string(&self) -> String {
        self.to_wire().to_string()
    }
}
