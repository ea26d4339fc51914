//! The endpoint catalog: an immutable, validated record collection plus derived indexes.

use crate::diagram::{DiagramDecl, PopupSource};
use crate::model::{ActorEndpointIndex, Complexity, EndpointRecord, EntityFieldSchema, EntityFields};
use crate::{Error, Result};
use indexmap::IndexMap;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// On-disk shape of a catalog file (JSON or YAML).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogDocument {
    #[serde(default)]
    pub records: Vec<EndpointRecord>,
    #[serde(default)]
    pub actor_endpoints: ActorEndpointIndex,
    #[serde(default)]
    pub entity_fields: EntityFieldSchema,
    /// Preferred tag order for the listing; tags not named here follow in first-seen order.
    #[serde(default)]
    pub tag_order: Vec<String>,
    #[serde(default)]
    pub tag_display_names: IndexMap<String, String>,
    #[serde(default)]
    pub diagram: Option<DiagramDecl>,
}

#[derive(Debug, Clone)]
pub struct Catalog {
    records: Vec<EndpointRecord>,
    by_id: FxHashMap<String, usize>,
    actor_endpoints: ActorEndpointIndex,
    entity_fields: EntityFieldSchema,
    tag_order: Vec<String>,
    tag_display_names: IndexMap<String, String>,
    diagram: DiagramDecl,
}

impl Catalog {
    /// Validates and indexes `records`. Fails on duplicate ids, on ids that are not usable as a
    /// file name / URL segment, and on empty method/path.
    pub fn new(records: Vec<EndpointRecord>) -> Result<Self> {
        let mut by_id: FxHashMap<String, usize> = FxHashMap::default();
        by_id.reserve(records.len());
        for (idx, record) in records.iter().enumerate() {
            if record.id.trim().is_empty() {
                return Err(Error::InvalidRecord {
                    id: format!("#{idx}"),
                    message: "empty id".to_string(),
                });
            }
            if !is_route_safe_id(&record.id) {
                return Err(Error::InvalidRecord {
                    id: record.id.clone(),
                    message: "id may only contain ASCII letters, digits, '.', '_' and '-' (no \"..\")"
                        .to_string(),
                });
            }
            if record.method.as_str().is_empty() {
                return Err(Error::InvalidRecord {
                    id: record.id.clone(),
                    message: "empty method".to_string(),
                });
            }
            if record.path.trim().is_empty() {
                return Err(Error::InvalidRecord {
                    id: record.id.clone(),
                    message: "empty path".to_string(),
                });
            }
            if by_id.insert(record.id.clone(), idx).is_some() {
                return Err(Error::DuplicateId {
                    id: record.id.clone(),
                });
            }
            if !record.method.is_known() {
                tracing::warn!(
                    id = %record.id,
                    method = %record.method,
                    "endpoint uses an unrecognized HTTP method"
                );
            }
        }

        Ok(Self {
            records,
            by_id,
            actor_endpoints: ActorEndpointIndex::new(),
            entity_fields: EntityFieldSchema::new(),
            tag_order: Vec::new(),
            tag_display_names: IndexMap::new(),
            diagram: DiagramDecl::platform_default(),
        })
    }

    pub fn from_document(doc: CatalogDocument) -> Result<Self> {
        let catalog = Self::new(doc.records)?
            .with_actor_endpoints(doc.actor_endpoints)
            .with_entity_fields(doc.entity_fields)
            .with_tag_order(doc.tag_order)
            .with_tag_display_names(doc.tag_display_names);
        let catalog = match doc.diagram {
            Some(diagram) => catalog.with_diagram(diagram),
            None => catalog,
        };

        let report = catalog.integrity_report();
        for r in &report.dangling {
            tracing::warn!(owner = %r.owner, id = %r.id, "index references an unknown endpoint id");
        }
        for name in &report.unknown_popup_sources {
            tracing::warn!(source = %name, "diagram node references an unknown actor or entity");
        }
        for (id, param) in &report.undocumented_path_params {
            tracing::debug!(id = %id, param = %param, "path placeholder has no path_params row");
        }
        tracing::debug!(
            records = catalog.records.len(),
            actors = catalog.actor_endpoints.len(),
            entities = catalog.entity_fields.len(),
            "catalog loaded"
        );
        Ok(catalog)
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        let doc: CatalogDocument = serde_json::from_str(text)?;
        Self::from_document(doc)
    }

    pub fn from_yaml_str(text: &str) -> Result<Self> {
        let doc: CatalogDocument = serde_yaml::from_str(text)?;
        Self::from_document(doc)
    }

    /// Loads a catalog file, choosing the format from its extension.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.display().to_string(),
            source,
        })?;
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();
        match ext.as_str() {
            "json" => Self::from_json_str(&text),
            "yaml" | "yml" => Self::from_yaml_str(&text),
            _ => Err(Error::UnsupportedFormat { extension: ext }),
        }
    }

    pub fn with_actor_endpoints(mut self, index: ActorEndpointIndex) -> Self {
        self.actor_endpoints = index;
        self
    }

    pub fn with_entity_fields(mut self, schema: EntityFieldSchema) -> Self {
        self.entity_fields = schema;
        self
    }

    pub fn with_tag_order(mut self, tag_order: Vec<String>) -> Self {
        self.tag_order = tag_order;
        self
    }

    pub fn with_tag_display_names(mut self, names: IndexMap<String, String>) -> Self {
        self.tag_display_names = names;
        self
    }

    pub fn with_diagram(mut self, diagram: DiagramDecl) -> Self {
        self.diagram = diagram;
        self
    }

    pub fn records(&self) -> &[EndpointRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&EndpointRecord> {
        self.by_id.get(id).map(|&idx| &self.records[idx])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.by_id.contains_key(id)
    }

    /// Records sharing `record`'s tag and subcategory, excluding `record`, in catalog order.
    pub fn siblings<'a>(&'a self, record: &EndpointRecord) -> Vec<&'a EndpointRecord> {
        self.records
            .iter()
            .filter(|other| other.is_related_to(record))
            .collect()
    }

    /// Complex siblings of a complex record. Empty for simple and moderate records.
    pub fn related<'a>(&'a self, record: &EndpointRecord) -> Vec<&'a EndpointRecord> {
        if record.complexity != Complexity::Complex {
            return Vec::new();
        }
        self.records
            .iter()
            .filter(|other| other.complexity == Complexity::Complex && other.is_related_to(record))
            .collect()
    }

    pub fn actor_endpoints(&self) -> &ActorEndpointIndex {
        &self.actor_endpoints
    }

    /// Records reachable by `actor`, in catalog order. Unknown ids are skipped.
    pub fn actor_records(&self, actor: &str) -> Vec<&EndpointRecord> {
        let Some(ids) = self.actor_endpoints.get(actor) else {
            return Vec::new();
        };
        let mut idxs: Vec<usize> = ids
            .iter()
            .filter_map(|id| self.by_id.get(id.as_str()).copied())
            .collect();
        idxs.sort_unstable();
        idxs.dedup();
        idxs.into_iter().map(|idx| &self.records[idx]).collect()
    }

    pub fn entity_fields(&self) -> &EntityFieldSchema {
        &self.entity_fields
    }

    pub fn entity(&self, name: &str) -> Option<&EntityFields> {
        self.entity_fields.get(name)
    }

    pub fn tag_order(&self) -> &[String] {
        &self.tag_order
    }

    pub fn tag_display_name<'a>(&'a self, tag: &'a str) -> &'a str {
        self.tag_display_names
            .get(tag)
            .map(String::as_str)
            .unwrap_or(tag)
    }

    pub fn diagram(&self) -> &DiagramDecl {
        &self.diagram
    }

    pub fn integrity_report(&self) -> IntegrityReport {
        let mut report = IntegrityReport::default();

        for (actor, ids) in &self.actor_endpoints {
            for id in ids {
                if !self.contains(id) {
                    report.dangling.push(DanglingReference {
                        owner: actor.clone(),
                        id: id.clone(),
                    });
                }
            }
        }

        for node in &self.diagram.nodes {
            let known = match &node.popup {
                PopupSource::Actor(name) => self.actor_endpoints.contains_key(name),
                PopupSource::Entity(name) => self.entity_fields.contains_key(name),
            };
            if !known {
                report
                    .unknown_popup_sources
                    .push(node.popup.name().to_string());
            }
        }

        for record in &self.records {
            for placeholder in record.path_placeholders() {
                if !record.path_params.iter().any(|p| p.name == placeholder) {
                    report
                        .undocumented_path_params
                        .push((record.id.clone(), placeholder.to_string()));
                }
            }
        }

        report
    }
}

/// Ids become `ep-{id}.html` file names and `href` values verbatim.
pub fn is_route_safe_id(id: &str) -> bool {
    !id.is_empty()
        && !id.contains("..")
        && id
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'.' | b'_' | b'-'))
}

/// An index entry pointing at an id the catalog does not contain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DanglingReference {
    pub owner: String,
    pub id: String,
}

/// Data-integrity findings. None of these prevent rendering.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IntegrityReport {
    pub dangling: Vec<DanglingReference>,
    pub unknown_popup_sources: Vec<String>,
    pub undocumented_path_params: Vec<(String, String)>,
}

impl IntegrityReport {
    pub fn is_clean(&self) -> bool {
        self.dangling.is_empty()
            && self.unknown_popup_sources.is_empty()
            && self.undocumented_path_params.is_empty()
    }
}
