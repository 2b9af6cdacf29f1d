//! Wire types for the Firestore REST API.
//!
//! Only the small subset of the document and query surface this service
//! touches is modeled: string and array values, field projections, and the
//! `IN` filter used for the token lookup.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A typed Firestore value.
///
/// Firestore encodes values as single-variant objects (`{"stringValue": ..}`);
/// optional fields stand in for the variants this service reads and writes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Value {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub string_value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference_value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub array_value: Option<ArrayValue>,
}

impl Value {
    /// A `stringValue`
    pub fn string(s: impl Into<String>) -> Self {
        Value {
            string_value: Some(s.into()),
            ..Default::default()
        }
    }

    /// A `referenceValue` holding a full document resource name
    pub fn reference(name: impl Into<String>) -> Self {
        Value {
            reference_value: Some(name.into()),
            ..Default::default()
        }
    }

    /// An `arrayValue` wrapping the given values
    pub fn array(values: Vec<Value>) -> Self {
        Value {
            array_value: Some(ArrayValue { values }),
            ..Default::default()
        }
    }
}

/// An array of Firestore values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ArrayValue {
    #[serde(default)]
    pub values: Vec<Value>,
}

/// A Firestore document: resource name plus typed fields
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Full resource name, e.g.
    /// `projects/p/databases/(default)/documents/groups/g1`
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub fields: HashMap<String, Value>,
}

impl Document {
    /// Last path segment of the resource name (the document id)
    pub fn doc_id(&self) -> &str {
        self.name.rsplit('/').next().unwrap_or_default()
    }

    /// String field by name, if present and a string
    pub fn string_field(&self, field: &str) -> Option<&str> {
        self.fields.get(field)?.string_value.as_deref()
    }

    /// String-array field by name; non-string elements are skipped
    pub fn string_array_field(&self, field: &str) -> Vec<String> {
        self.fields
            .get(field)
            .and_then(|v| v.array_value.as_ref())
            .map(|a| {
                a.values
                    .iter()
                    .filter_map(|v| v.string_value.clone())
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// `documents:runQuery` request body
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunQueryRequest {
    pub structured_query: StructuredQuery,
}

/// Structured query: collection, projection, and an optional filter
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StructuredQuery {
    pub from: Vec<CollectionSelector>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub select: Option<Projection>,
    #[serde(rename = "where", skip_serializing_if = "Option::is_none")]
    pub filter: Option<Filter>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionSelector {
    pub collection_id: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Projection {
    pub fields: Vec<FieldReference>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldReference {
    pub field_path: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Filter {
    pub field_filter: FieldFilter,
}

#[derive(Debug, Clone, Serialize)]
pub struct FieldFilter {
    pub field: FieldReference,
    pub op: String,
    pub value: Value,
}

/// One streamed element of a `runQuery` response.
///
/// Elements without a `document` (read-time markers) are skipped by callers.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RunQueryResponseItem {
    #[serde(default)]
    pub document: Option<Document>,
}
