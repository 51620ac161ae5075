//! In-process [`DocumentStore`] used by tests.
//!
//! Mirrors the hosted store's observable behavior for the query subset the
//! repositories use: AND-combined filters, multi-key ordering, paging with
//! a default limit, attribute projection, and a `total` that counts all
//! matches rather than the returned page.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::{Map, Value};

use crate::backend::DocumentStore;
use crate::document::{DocumentList, FIELD_CREATED_AT, FIELD_ID, FIELD_UPDATED_AT};
use crate::error::StoreError;
use crate::query::{Query, DEFAULT_PAGE_LIMIT};

/// [`DocumentStore`] holding all documents in memory.
#[derive(Default)]
pub struct MemoryStore {
    /// Documents per collection, in insertion order.
    collections: Mutex<HashMap<String, Vec<Value>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of documents currently held in a collection.
    pub fn len(&self, collection: &str) -> usize {
        let collections = self.lock();
        collections.get(collection).map_or(0, Vec::len)
    }

    pub fn is_empty(&self, collection: &str) -> bool {
        self.len(collection) == 0
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, Vec<Value>>> {
        self.collections
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn now_string() -> String {
        Utc::now().to_rfc3339_opts(SecondsFormat::Nanos, true)
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn create_document(
        &self,
        collection: &str,
        document_id: &str,
        data: Value,
    ) -> Result<Value, StoreError> {
        let fields = match data {
            Value::Object(fields) => fields,
            _ => {
                return Err(StoreError::Api {
                    status: 400,
                    message: "Document data must be a JSON object".into(),
                })
            }
        };

        let mut collections = self.lock();
        let documents = collections.entry(collection.to_string()).or_default();

        if documents
            .iter()
            .any(|doc| doc.get(FIELD_ID).and_then(Value::as_str) == Some(document_id))
        {
            return Err(StoreError::Api {
                status: 409,
                message: "Document with the requested ID already exists.".into(),
            });
        }

        let now = Self::now_string();
        let mut document = Map::new();
        document.insert(FIELD_ID.into(), Value::String(document_id.to_string()));
        document.insert(FIELD_CREATED_AT.into(), Value::String(now.clone()));
        document.insert(FIELD_UPDATED_AT.into(), Value::String(now));
        for (key, value) in fields {
            document.insert(key, value);
        }

        let document = Value::Object(document);
        documents.push(document.clone());
        Ok(document)
    }

    async fn get_document(
        &self,
        collection: &str,
        document_id: &str,
    ) -> Result<Value, StoreError> {
        let collections = self.lock();
        collections
            .get(collection)
            .and_then(|docs| {
                docs.iter()
                    .find(|doc| doc.get(FIELD_ID).and_then(Value::as_str) == Some(document_id))
            })
            .cloned()
            .ok_or_else(|| StoreError::not_found(collection, document_id))
    }

    async fn update_document(
        &self,
        collection: &str,
        document_id: &str,
        data: Value,
    ) -> Result<Value, StoreError> {
        let fields = match data {
            Value::Object(fields) => fields,
            _ => {
                return Err(StoreError::Api {
                    status: 400,
                    message: "Document data must be a JSON object".into(),
                })
            }
        };

        let mut collections = self.lock();
        let document = collections
            .get_mut(collection)
            .and_then(|docs| {
                docs.iter_mut()
                    .find(|doc| doc.get(FIELD_ID).and_then(Value::as_str) == Some(document_id))
            })
            .ok_or_else(|| StoreError::not_found(collection, document_id))?;

        if let Value::Object(existing) = document {
            for (key, value) in fields {
                // System attributes are store-owned.
                if key.starts_with('$') {
                    continue;
                }
                existing.insert(key, value);
            }
            existing.insert(FIELD_UPDATED_AT.into(), Value::String(Self::now_string()));
        }

        Ok(document.clone())
    }

    async fn delete_document(
        &self,
        collection: &str,
        document_id: &str,
    ) -> Result<(), StoreError> {
        let mut collections = self.lock();
        let documents = collections
            .get_mut(collection)
            .ok_or_else(|| StoreError::not_found(collection, document_id))?;

        let before = documents.len();
        documents.retain(|doc| doc.get(FIELD_ID).and_then(Value::as_str) != Some(document_id));
        if documents.len() == before {
            return Err(StoreError::not_found(collection, document_id));
        }
        Ok(())
    }

    async fn list_documents(
        &self,
        collection: &str,
        queries: &[Query],
    ) -> Result<DocumentList<Value>, StoreError> {
        let snapshot: Vec<Value> = {
            let collections = self.lock();
            collections.get(collection).cloned().unwrap_or_default()
        };

        let mut matched: Vec<Value> = snapshot
            .into_iter()
            .filter(|doc| queries.iter().filter(|q| q.is_filter()).all(|q| matches(doc, q)))
            .collect();
        let total = matched.len();

        let orders: Vec<(&str, bool)> = queries
            .iter()
            .filter_map(|q| match q {
                Query::OrderAsc { attribute } => Some((attribute.as_str(), false)),
                Query::OrderDesc { attribute } => Some((attribute.as_str(), true)),
                _ => None,
            })
            .collect();
        if !orders.is_empty() {
            matched.sort_by(|a, b| {
                for (attribute, descending) in &orders {
                    let left = a.get(attribute).unwrap_or(&Value::Null);
                    let right = b.get(attribute).unwrap_or(&Value::Null);
                    let mut ordering = compare_values(left, right);
                    if *descending {
                        ordering = ordering.reverse();
                    }
                    if ordering != Ordering::Equal {
                        return ordering;
                    }
                }
                Ordering::Equal
            });
        }

        let limit = queries
            .iter()
            .find_map(|q| match q {
                Query::Limit { count } => Some(*count),
                _ => None,
            })
            .unwrap_or(DEFAULT_PAGE_LIMIT);
        matched.truncate(limit);

        let selected = queries.iter().find_map(|q| match q {
            Query::Select { attributes } => Some(attributes),
            _ => None,
        });
        if let Some(attributes) = selected {
            matched = matched
                .into_iter()
                .map(|doc| {
                    let mut projected = Map::new();
                    for attribute in attributes {
                        if let Some(value) = doc.get(attribute) {
                            projected.insert(attribute.clone(), value.clone());
                        }
                    }
                    Value::Object(projected)
                })
                .collect();
        }

        Ok(DocumentList {
            total,
            documents: matched,
        })
    }
}

/// Evaluates one filter clause against a document. Modifier clauses
/// (ordering, limit, select) always match.
fn matches(document: &Value, query: &Query) -> bool {
    match query {
        Query::Equal { attribute, value } => document.get(attribute) == Some(value),
        Query::IsNull { attribute } => document.get(attribute).is_none_or(Value::is_null),
        Query::IsNotNull { attribute } => {
            document.get(attribute).is_some_and(|v| !v.is_null())
        }
        Query::GreaterThanEqual { attribute, value } => match document.get(attribute) {
            Some(v) if !v.is_null() => compare_values(v, value) != Ordering::Less,
            _ => false,
        },
        Query::LessThan { attribute, value } => match document.get(attribute) {
            Some(v) if !v.is_null() => compare_values(v, value) == Ordering::Less,
            _ => false,
        },
        Query::Contains { attribute, value } => {
            match (document.get(attribute).and_then(Value::as_str), value.as_str()) {
                (Some(haystack), Some(needle)) => haystack
                    .to_lowercase()
                    .contains(&needle.to_lowercase()),
                _ => false,
            }
        }
        Query::And { queries } => queries.iter().all(|q| matches(document, q)),
        _ => true,
    }
}

/// Total order over attribute values: nulls first, then booleans, numbers
/// and strings. Strings that both parse as RFC 3339 timestamps compare as
/// instants, so mixed offset or precision representations order correctly.
fn compare_values(left: &Value, right: &Value) -> Ordering {
    match (left, right) {
        (Value::Null, Value::Null) => Ordering::Equal,
        (Value::Null, _) => Ordering::Less,
        (_, Value::Null) => Ordering::Greater,
        (Value::Bool(l), Value::Bool(r)) => l.cmp(r),
        (Value::Number(l), Value::Number(r)) => l
            .as_f64()
            .partial_cmp(&r.as_f64())
            .unwrap_or(Ordering::Equal),
        (Value::String(l), Value::String(r)) => compare_strings(l, r),
        _ => Ordering::Equal,
    }
}

fn compare_strings(left: &str, right: &str) -> Ordering {
    match (
        DateTime::parse_from_rfc3339(left),
        DateTime::parse_from_rfc3339(right),
    ) {
        (Ok(l), Ok(r)) => l.cmp(&r),
        _ => left.cmp(right),
    }
}
