//! Procedure DTOs.
//!
//! # Design
//! `ProcedureRecord` mirrors what the catalog backend returns from the search
//! endpoint; `Procedure` is the shape handed to callers, with the display
//! name exposed as `nom`. The mapping between the two is the only reshaping
//! the client performs. Detail payloads are passed through as raw JSON and
//! have no type here.

use serde::{Deserialize, Serialize};

/// Backend-assigned procedure identifier.
pub type ProcedureId = i64;

/// A search hit as the backend sends it. Fields beyond `id` and `name` are
/// ignored.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ProcedureRecord {
    pub id: ProcedureId,
    pub name: String,
}

/// A search hit as callers see it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Procedure {
    pub id: ProcedureId,
    /// Display name.
    pub nom: String,
}

impl From<ProcedureRecord> for Procedure {
    fn from(record: ProcedureRecord) -> Self {
        Self {
            id: record.id,
            nom: record.name,
        }
    }
}
