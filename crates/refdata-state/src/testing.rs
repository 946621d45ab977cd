//! In-memory gateway used by the state machine tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use refdata_core::{
    CreateStructureRequest, Element, ElementId, ElementPage, ElementQuery, ElementValues, Field,
    NewElement, RemoteError, RemoteGateway, Structure, StructureId,
};

#[derive(Default)]
struct Inner {
    structures: Vec<Structure>,
    elements: Vec<Element>,
    calls: Vec<&'static str>,
    failures: HashMap<&'static str, RemoteError>,
    next_id: u64,
}

impl Inner {
    fn next_id(&mut self, prefix: &str) -> String {
        self.next_id += 1;
        format!("{prefix}-{}", self.next_id)
    }

    fn record(&mut self, op: &'static str) -> Result<(), RemoteError> {
        self.calls.push(op);
        match self.failures.get(op) {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }
}

#[derive(Default)]
pub(crate) struct FakeGateway {
    inner: Mutex<Inner>,
}

impl FakeGateway {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent call of `op` fail with `err`.
    pub(crate) fn fail(&self, op: &'static str, err: RemoteError) {
        self.inner.lock().unwrap().failures.insert(op, err);
    }

    pub(crate) fn heal(&self, op: &'static str) {
        self.inner.lock().unwrap().failures.remove(op);
    }

    pub(crate) fn calls(&self) -> Vec<&'static str> {
        self.inner.lock().unwrap().calls.clone()
    }

    pub(crate) fn structures(&self) -> Vec<Structure> {
        self.inner.lock().unwrap().structures.clone()
    }

    pub(crate) fn elements(&self) -> Vec<Element> {
        self.inner.lock().unwrap().elements.clone()
    }

    pub(crate) fn seed_structure(&self, name: &str, fields: Vec<Field>) -> Structure {
        let mut inner = self.inner.lock().unwrap();
        let structure = Structure {
            id: StructureId::new(inner.next_id("s")),
            name: name.to_string(),
            description: String::new(),
            fields,
            created_at: None,
            updated_at: None,
        };
        inner.structures.push(structure.clone());
        structure
    }

    /// Insert `count` elements whose `code` value is `E<n>`.
    pub(crate) fn seed_elements(&self, structure_id: &StructureId, count: usize) {
        let mut inner = self.inner.lock().unwrap();
        for n in 0..count {
            let mut values = ElementValues::new();
            values.insert("code".into(), serde_json::json!(format!("E{n}")));
            let id = ElementId::new(inner.next_id("e"));
            inner.elements.push(Element {
                id,
                structure_id: structure_id.clone(),
                values,
                created_at: None,
                updated_at: None,
            });
        }
    }
}

#[async_trait]
impl RemoteGateway for FakeGateway {
    async fn create_structure(
        &self,
        req: &CreateStructureRequest,
    ) -> Result<Structure, RemoteError> {
        let mut inner = self.inner.lock().unwrap();
        inner.record("createStructure")?;
        let structure = Structure {
            id: StructureId::new(inner.next_id("s")),
            name: req.name.clone(),
            description: req.description.clone(),
            fields: req.fields.clone(),
            created_at: None,
            updated_at: None,
        };
        inner.structures.push(structure.clone());
        Ok(structure)
    }

    async fn list_structures(&self, q: &str) -> Result<Vec<Structure>, RemoteError> {
        let mut inner = self.inner.lock().unwrap();
        inner.record("listStructures")?;
        let needle = q.to_lowercase();
        Ok(inner
            .structures
            .iter()
            .filter(|s| needle.is_empty() || s.name.to_lowercase().contains(&needle))
            .cloned()
            .collect())
    }

    async fn get_structure(&self, id: &StructureId) -> Result<Structure, RemoteError> {
        let mut inner = self.inner.lock().unwrap();
        inner.record("getStructure")?;
        inner
            .structures
            .iter()
            .find(|s| &s.id == id)
            .cloned()
            .ok_or_else(|| {
                RemoteError::new("getStructure", "HTTP 404")
                    .with_status(404)
                    .with_detail("Structure not found")
            })
    }

    async fn add_elements(
        &self,
        structure_id: &StructureId,
        elements: &[NewElement],
    ) -> Result<Vec<Element>, RemoteError> {
        let mut inner = self.inner.lock().unwrap();
        inner.record("addElements")?;
        let mut created = Vec::new();
        for e in elements {
            let id = ElementId::new(inner.next_id("e"));
            let element = Element {
                id,
                structure_id: structure_id.clone(),
                values: e.values.clone(),
                created_at: None,
                updated_at: None,
            };
            inner.elements.push(element.clone());
            created.push(element);
        }
        Ok(created)
    }

    async fn search_elements(
        &self,
        structure_id: &StructureId,
        query: &ElementQuery,
    ) -> Result<ElementPage, RemoteError> {
        let mut inner = self.inner.lock().unwrap();
        inner.record("searchElements")?;
        let needle = query.q.to_lowercase();
        let matches: Vec<Element> = inner
            .elements
            .iter()
            .filter(|e| &e.structure_id == structure_id)
            .filter(|e| {
                needle.is_empty()
                    || e.values
                        .values()
                        .filter_map(|v| v.as_str())
                        .any(|s| s.to_lowercase().contains(&needle))
            })
            .cloned()
            .collect();
        let total = matches.len() as u64;
        let items = matches
            .into_iter()
            .skip(query.offset as usize)
            .take(query.limit as usize)
            .collect();
        Ok(ElementPage {
            items,
            total,
            skip: Some(query.offset),
            limit: Some(query.limit),
        })
    }
}
