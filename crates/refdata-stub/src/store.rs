//! In-memory storage backend using DashMap.
//!
//! Structures are keyed by id, with a second map from name to id that makes
//! the duplicate-name check atomic. Each structure's elements live in one
//! `Vec` in insertion order; newest-first ordering is a reverse walk.

use std::sync::Arc;

use chrono::Utc;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use refdata_core::{
    display_value, CreateStructureRequest, Element, ElementId, ElementPage, ElementValues,
    Structure, StructureId,
};
use uuid::Uuid;

use crate::error::ApiError;

/// Maximum number of structures returned by a listing.
pub const LIST_LIMIT: usize = 100;

/// Inner storage holding all DashMaps.
#[derive(Default)]
struct Inner {
    structures: DashMap<StructureId, Structure>,
    names: DashMap<String, StructureId>,
    elements: DashMap<StructureId, Vec<Element>>,
}

/// Shared application state.
///
/// Cheaply cloneable via `Arc`; all clones share the same data.
#[derive(Clone, Default)]
pub struct AppState {
    inner: Arc<Inner>,
}

fn new_id() -> String {
    Uuid::new_v4().simple().to_string()
}

/// Validate a path id and normalise it to the simple form ids are stored
/// under. Any form `Uuid::try_parse` accepts addresses the same structure.
fn parse_id(raw: &str, invalid: &str) -> Result<StructureId, ApiError> {
    let uuid = Uuid::try_parse(raw).map_err(|_| ApiError::BadRequest(invalid.to_string()))?;
    Ok(StructureId::new(uuid.simple().to_string()))
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Structures ──────────────────────────────────────────────────

    /// Insert a new structure. Names are unique by exact match.
    pub fn create_structure(&self, req: CreateStructureRequest) -> Result<Structure, ApiError> {
        match self.inner.names.entry(req.name.clone()) {
            Entry::Occupied(_) => Err(ApiError::Conflict(
                "Structure name already exists".to_string(),
            )),
            Entry::Vacant(slot) => {
                let now = Utc::now();
                let structure = Structure {
                    id: StructureId::new(new_id()),
                    name: req.name,
                    description: req.description,
                    fields: req.fields,
                    created_at: Some(now),
                    updated_at: Some(now),
                };
                self.inner
                    .structures
                    .insert(structure.id.clone(), structure.clone());
                self.inner.elements.insert(structure.id.clone(), Vec::new());
                slot.insert(structure.id.clone());
                Ok(structure)
            }
        }
    }

    /// Structures whose name or description contains `q`, case-insensitively,
    /// sorted by name and capped at [`LIST_LIMIT`].
    pub fn list_structures(&self, q: &str) -> Vec<Structure> {
        let needle = q.to_lowercase();
        let mut found: Vec<Structure> = self
            .inner
            .structures
            .iter()
            .filter(|entry| {
                let s = entry.value();
                needle.is_empty()
                    || s.name.to_lowercase().contains(&needle)
                    || s.description.to_lowercase().contains(&needle)
            })
            .map(|entry| entry.value().clone())
            .collect();
        found.sort_by(|a, b| a.name.cmp(&b.name));
        found.truncate(LIST_LIMIT);
        found
    }

    pub fn get_structure(&self, raw_id: &str) -> Result<Structure, ApiError> {
        let id = parse_id(raw_id, "Invalid ID")?;
        self.inner
            .structures
            .get(&id)
            .map(|entry| entry.value().clone())
            .ok_or_else(ApiError::structure_not_found)
    }

    pub fn find_structure_by_name(&self, name: &str) -> Option<Structure> {
        let id = self.inner.names.get(name)?.value().clone();
        self.inner
            .structures
            .get(&id)
            .map(|entry| entry.value().clone())
    }

    // ── Elements ────────────────────────────────────────────────────

    fn element_owner(&self, raw_id: &str) -> Result<Structure, ApiError> {
        let id = parse_id(raw_id, "Invalid structure ID")?;
        self.inner
            .structures
            .get(&id)
            .map(|entry| entry.value().clone())
            .ok_or_else(ApiError::structure_not_found)
    }

    /// Append a batch of elements, all stamped with the same time.
    pub fn add_elements(
        &self,
        raw_id: &str,
        batch: Vec<ElementValues>,
    ) -> Result<Vec<Element>, ApiError> {
        let structure = self.element_owner(raw_id)?;
        Ok(self.insert_values(&structure.id, batch))
    }

    pub(crate) fn insert_values(
        &self,
        structure_id: &StructureId,
        batch: Vec<ElementValues>,
    ) -> Vec<Element> {
        let now = Utc::now();
        let created: Vec<Element> = batch
            .into_iter()
            .map(|values| Element {
                id: ElementId::new(new_id()),
                structure_id: structure_id.clone(),
                values,
                created_at: Some(now),
                updated_at: Some(now),
            })
            .collect();
        self.inner
            .elements
            .entry(structure_id.clone())
            .or_default()
            .extend(created.iter().cloned());
        created
    }

    /// Remove every element of a structure, returning how many there were.
    pub(crate) fn clear_elements(&self, structure_id: &StructureId) -> u64 {
        match self.inner.elements.get_mut(structure_id) {
            Some(mut entry) => {
                let removed = entry.len() as u64;
                entry.clear();
                removed
            }
            None => 0,
        }
    }

    /// One page of a structure's elements, newest first.
    ///
    /// With a non-empty `q`, an element matches when the value of any of the
    /// structure's declared fields contains `q`, case-insensitively. `total`
    /// counts all matches.
    pub fn search_elements(
        &self,
        raw_id: &str,
        q: &str,
        skip: u64,
        limit: u64,
    ) -> Result<ElementPage, ApiError> {
        let structure = self.element_owner(raw_id)?;
        let needle = q.to_lowercase();
        let matches: Vec<Element> = match self.inner.elements.get(&structure.id) {
            Some(entry) => entry
                .value()
                .iter()
                .rev()
                .filter(|e| {
                    needle.is_empty()
                        || structure.fields.iter().any(|f| {
                            e.values.contains_key(&f.name)
                                && display_value(e.values.get(&f.name))
                                    .to_lowercase()
                                    .contains(&needle)
                        })
                })
                .cloned()
                .collect(),
            None => Vec::new(),
        };

        let total = matches.len() as u64;
        let items = matches
            .into_iter()
            .skip(skip as usize)
            .take(limit as usize)
            .collect();
        Ok(ElementPage {
            items,
            total,
            skip: Some(skip),
            limit: Some(limit),
        })
    }
}
