use indexmap::IndexMap;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::OnceLock;

pub const DEFAULT_SUBCATEGORY: &str = "General";
pub const DEFAULT_RESPONSE_STATUS: u16 = 200;

/// Actor name -> ordered endpoint ids reachable by that actor.
pub type ActorEndpointIndex = IndexMap<String, Vec<String>>;

/// Entity name -> storage location and ordered field rows.
pub type EntityFieldSchema = IndexMap<String, EntityFields>;

/// HTTP method of an endpoint record.
///
/// Unknown method strings are preserved as [`Method::Other`] so that a catalog with an
/// unexpected verb still loads and renders (with an unstyled badge).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
    Other(String),
}

impl Method {
    pub fn known() -> [Method; 5] {
        [
            Method::Get,
            Method::Post,
            Method::Put,
            Method::Patch,
            Method::Delete,
        ]
    }

    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        match raw.to_ascii_uppercase().as_str() {
            "GET" => Method::Get,
            "POST" => Method::Post,
            "PUT" => Method::Put,
            "PATCH" => Method::Patch,
            "DELETE" => Method::Delete,
            _ => Method::Other(raw.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
            Method::Other(raw) => raw.as_str(),
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Method::Other(_))
    }
}

impl From<String> for Method {
    fn from(value: String) -> Self {
        Method::parse(&value)
    }
}

impl From<Method> for String {
    fn from(value: Method) -> Self {
        value.as_str().to_string()
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Complexity {
    #[default]
    Simple,
    Moderate,
    Complex,
}

/// A `(name, type, description)` row, written either as a 3-element array or as an object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "FieldRowRepr")]
pub struct FieldRow {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
    pub description: String,
}

impl FieldRow {
    pub fn new(
        name: impl Into<String>,
        ty: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
            description: description.into(),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum FieldRowRepr {
    Tuple(String, String, String),
    Object {
        name: String,
        #[serde(rename = "type", default)]
        ty: String,
        #[serde(default)]
        description: String,
    },
}

impl From<FieldRowRepr> for FieldRow {
    fn from(value: FieldRowRepr) -> Self {
        match value {
            FieldRowRepr::Tuple(name, ty, description) => Self {
                name,
                ty,
                description,
            },
            FieldRowRepr::Object {
                name,
                ty,
                description,
            } => Self {
                name,
                ty,
                description,
            },
        }
    }
}

/// Whether a request-body field is required. Rows written without the column are
/// `Unspecified` rather than guessed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Required {
    Yes,
    No,
    #[default]
    Unspecified,
}

impl Required {
    pub fn label(self) -> &'static str {
        match self {
            Required::Yes => "Yes",
            Required::No => "No",
            Required::Unspecified => "-",
        }
    }
}

impl Required {
    /// Reads a `required` cell by truthiness. Only null leaves it unspecified; `yes`/`no`,
    /// `true`/`false` and numbers map to a flag, other non-empty text counts as required.
    pub fn from_cell(value: &Value) -> Self {
        match value {
            Value::Null => Required::Unspecified,
            Value::Bool(b) => Required::from(*b),
            Value::Number(n) => Required::from(n.as_f64().is_some_and(|v| v != 0.0)),
            Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
                "" | "no" | "n" | "false" | "0" | "optional" => Required::No,
                "-" | "unspecified" => Required::Unspecified,
                _ => Required::Yes,
            },
            Value::Array(items) => Required::from(!items.is_empty()),
            Value::Object(map) => Required::from(!map.is_empty()),
        }
    }
}

impl From<bool> for Required {
    fn from(value: bool) -> Self {
        if value { Required::Yes } else { Required::No }
    }
}

/// A request-body row.
///
/// Accepted shapes:
/// - `[name, type, required, description]`
/// - `[name, type, description]` (required unspecified)
/// - shorter arrays (missing columns stay `None`)
/// - `{ name, type?, required?, description? }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "BodyRowRepr")]
pub struct BodyRow {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: Option<String>,
    pub required: Required,
    pub description: Option<String>,
}

impl BodyRow {
    pub fn new(
        name: impl Into<String>,
        ty: impl Into<String>,
        required: Required,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            ty: Some(ty.into()),
            required,
            description: Some(description.into()),
        }
    }

    fn from_cells(cells: &[Value]) -> Self {
        fn text(v: Option<&Value>) -> Option<String> {
            match v? {
                Value::Null => None,
                Value::String(s) => Some(s.clone()),
                other => Some(other.to_string()),
            }
        }

        match cells.len() {
            0 => Self {
                name: String::new(),
                ty: None,
                required: Required::Unspecified,
                description: None,
            },
            1 | 2 => Self {
                name: text(cells.first()).unwrap_or_default(),
                ty: text(cells.get(1)),
                required: Required::Unspecified,
                description: None,
            },
            3 => Self {
                name: text(cells.first()).unwrap_or_default(),
                ty: text(cells.get(1)),
                required: Required::Unspecified,
                description: text(cells.get(2)),
            },
            _ => Self {
                name: text(cells.first()).unwrap_or_default(),
                ty: text(cells.get(1)),
                required: cells
                    .get(2)
                    .map(Required::from_cell)
                    .unwrap_or_default(),
                description: text(cells.last()),
            },
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum BodyRowRepr {
    Cells(Vec<Value>),
    Object {
        name: String,
        #[serde(rename = "type", default)]
        ty: Option<String>,
        #[serde(default)]
        required: Option<Value>,
        #[serde(default)]
        description: Option<String>,
    },
}

impl From<BodyRowRepr> for BodyRow {
    fn from(value: BodyRowRepr) -> Self {
        match value {
            BodyRowRepr::Cells(cells) => BodyRow::from_cells(&cells),
            BodyRowRepr::Object {
                name,
                ty,
                required,
                description,
            } => Self {
                name,
                ty,
                required: required
                    .as_ref()
                    .map(Required::from_cell)
                    .unwrap_or_default(),
                description,
            },
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityFields {
    #[serde(default, alias = "firestore_path")]
    pub storage_path: String,
    #[serde(default)]
    pub fields: Vec<FieldRow>,
}

fn default_subcategory() -> String {
    DEFAULT_SUBCATEGORY.to_string()
}

/// One catalog entry describing a single API endpoint's contract and documentation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointRecord {
    pub id: String,
    pub method: Method,
    pub path: String,
    pub title: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description_long: Option<String>,
    pub tag: String,
    #[serde(default = "default_subcategory")]
    pub subcategory: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth: Option<String>,
    #[serde(default)]
    pub complexity: Complexity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_file: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_line: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_status: Option<u16>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub path_params: Vec<FieldRow>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub query_params: Vec<FieldRow>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub request_body: Vec<BodyRow>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub response_fields: Vec<FieldRow>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub status_codes: BTreeMap<u16, String>,
}

impl EndpointRecord {
    /// Minimal record; everything optional stays empty.
    pub fn new(
        id: impl Into<String>,
        method: Method,
        path: impl Into<String>,
        title: impl Into<String>,
        tag: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            method,
            path: path.into(),
            title: title.into(),
            summary: String::new(),
            description_long: None,
            tag: tag.into(),
            subcategory: default_subcategory(),
            auth: None,
            complexity: Complexity::default(),
            source_file: None,
            source_line: None,
            response_status: None,
            path_params: Vec::new(),
            query_params: Vec::new(),
            request_body: Vec::new(),
            response_fields: Vec::new(),
            status_codes: BTreeMap::new(),
        }
    }

    /// Stable route token addressing this record's detail page.
    pub fn route_token(&self) -> String {
        route_token_for(&self.id)
    }

    pub fn response_status(&self) -> u16 {
        self.response_status.unwrap_or(DEFAULT_RESPONSE_STATUS)
    }

    /// Long description, falling back to the summary. `None` when both are blank.
    pub fn description(&self) -> Option<&str> {
        self.description_long
            .as_deref()
            .filter(|d| !d.trim().is_empty())
            .or_else(|| Some(self.summary.as_str()).filter(|s| !s.trim().is_empty()))
    }

    /// Lowercased `path title summary description_long`, the text a search query matches.
    pub fn search_haystack(&self) -> String {
        format!(
            "{} {} {} {}",
            self.path,
            self.title,
            self.summary,
            self.description_long.as_deref().unwrap_or("")
        )
        .to_lowercase()
    }

    pub fn is_related_to(&self, other: &EndpointRecord) -> bool {
        self.id != other.id && self.tag == other.tag && self.subcategory == other.subcategory
    }

    /// Names of the `{param}` placeholders in `path`, in order of appearance.
    pub fn path_placeholders(&self) -> Vec<&str> {
        placeholder_regex()
            .captures_iter(&self.path)
            .filter_map(|c| c.get(1).map(|m| m.as_str()))
            .collect()
    }
}

pub fn route_token_for(id: &str) -> String {
    format!("ep-{id}")
}

fn placeholder_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\{([^{}/]+)\}").expect("valid regex"))
}
