//! Core types for kpidex-core.
//!
//! The knowledge base is a strict hierarchy:
//!
//! ```text
//! Domain ─► Industry ─► Classification ─► Department ─► Subdepartment ─┬─► Kpi
//!                                                                      └─► UseCase
//! ```
//!
//! Field names follow the JSON document the data is published as (`domain`,
//! `industry`, `kpicollection`, …) through serde renames, so the Rust side can
//! use plain `name` fields.

use serde::{Deserialize, Deserializer, Serialize};

/// Top-level grouping of industries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Domain {
    #[serde(rename = "domain")]
    pub name: String,
    #[serde(default)]
    pub industries: Vec<Industry>,
}

/// A named sector within a domain. Root of the classification tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Industry {
    #[serde(rename = "industry")]
    pub name: String,
    #[serde(default)]
    pub classifications: Vec<Classification>,
}

impl Industry {
    /// Every subdepartment of this industry, in document order.
    pub fn subdepartments(&self) -> impl Iterator<Item = &Subdepartment> {
        self.classifications
            .iter()
            .flat_map(|c| c.departments.iter())
            .flat_map(|d| d.subdepartments.iter())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    /// Optional label. Not used for matching.
    #[serde(
        rename = "classification",
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub name: Option<String>,
    #[serde(default)]
    pub departments: Vec<Department>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Department {
    #[serde(rename = "department")]
    pub name: String,
    #[serde(default)]
    pub subdepartments: Vec<Subdepartment>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subdepartment {
    #[serde(rename = "subdepartment")]
    pub name: String,
    #[serde(default)]
    pub kpicollection: Vec<Kpi>,
    #[serde(default)]
    pub usecases: Vec<UseCase>,
}

/// A key performance indicator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Kpi {
    #[serde(rename = "kpi")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub formula: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub explanation: Option<String>,
}

/// A named business scenario.
///
/// `name` is `None` when the source document carries something other than a
/// string under `usecase` (a number, an object, …). Such entries stay in the
/// dataset but never match a query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UseCase {
    #[serde(rename = "usecase", default, deserialize_with = "lenient_string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub definitions: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub business_impact: Option<String>,
}

impl UseCase {
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

/// Accept any JSON value; keep it only if it is a string.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<serde_json::Value>::deserialize(deserializer)? {
        Some(serde_json::Value::String(s)) => Ok(Some(s)),
        _ => Ok(None),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
