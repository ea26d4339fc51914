//! Static node/edge declarations of the architecture diagram.
//!
//! Node positions are configuration, not computed from data: each node has a fixed `left`
//! (percent of the container width, or px) and `top` offset.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Actor,
    Data,
}

impl NodeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            NodeKind::Actor => "actor",
            NodeKind::Data => "data",
        }
    }
}

/// Where a node's popup content comes from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "name", rename_all = "lowercase")]
pub enum PopupSource {
    /// Endpoints reachable by the named actor (`actor_endpoints`).
    Actor(String),
    /// Field table of the named entity (`entity_fields`).
    Entity(String),
}

impl PopupSource {
    pub fn name(&self) -> &str {
        match self {
            PopupSource::Actor(name) | PopupSource::Entity(name) => name,
        }
    }
}

/// A single placement coordinate: `"36%"`, `"30px"` or a bare number (px).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "OffsetRepr", into = "String")]
pub enum Offset {
    Percent(f64),
    Px(f64),
}

impl Offset {
    /// Resolves against the container extent along the same axis.
    pub fn resolve(self, extent: f64) -> f64 {
        match self {
            Offset::Percent(p) => extent * p / 100.0,
            Offset::Px(px) => px,
        }
    }

    pub fn css(self) -> String {
        match self {
            Offset::Percent(p) => format!("{p}%"),
            Offset::Px(px) => format!("{px}px"),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OffsetRepr {
    Number(f64),
    Text(String),
}

impl TryFrom<OffsetRepr> for Offset {
    type Error = String;

    fn try_from(value: OffsetRepr) -> Result<Self, Self::Error> {
        let raw = match value {
            OffsetRepr::Number(n) => return Ok(Offset::Px(n)),
            OffsetRepr::Text(s) => s,
        };
        let t = raw.trim();
        let (num, percent) = if let Some(n) = t.strip_suffix('%') {
            (n, true)
        } else if let Some(n) = t.strip_suffix("px") {
            (n, false)
        } else {
            (t, false)
        };
        let v = num
            .trim()
            .parse::<f64>()
            .map_err(|_| format!("invalid offset: {raw:?}"))?;
        if !v.is_finite() {
            return Err(format!("invalid offset: {raw:?}"));
        }
        Ok(if percent {
            Offset::Percent(v)
        } else {
            Offset::Px(v)
        })
    }
}

impl From<Offset> for String {
    fn from(value: Offset) -> Self {
        value.css()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NodePlacement {
    pub left: Offset,
    pub top: Offset,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagramNode {
    pub id: String,
    pub kind: NodeKind,
    pub label: String,
    #[serde(default)]
    pub subtitle: String,
    pub popup: PopupSource,
    pub placement: NodePlacement,
}

impl DiagramNode {
    /// Element id of this node's popup (`n-team` -> `p-team`).
    pub fn popup_id(&self) -> String {
        match self.id.strip_prefix("n-") {
            Some(rest) => format!("p-{rest}"),
            None => format!("p-{}", self.id),
        }
    }
}

/// A directed edge. Parallel edges are kept as declared.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagramEdge {
    pub from: String,
    pub to: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DiagramDecl {
    #[serde(default)]
    pub nodes: Vec<DiagramNode>,
    #[serde(default)]
    pub edges: Vec<DiagramEdge>,
}

impl DiagramDecl {
    pub fn node(&self, id: &str) -> Option<&DiagramNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// The eight-node platform overview: three actors and five data entities.
    pub fn platform_default() -> Self {
        fn node(
            id: &str,
            kind: NodeKind,
            label: &str,
            subtitle: &str,
            left_percent: f64,
            top_px: f64,
        ) -> DiagramNode {
            let popup = match kind {
                NodeKind::Actor => PopupSource::Actor(label.to_string()),
                NodeKind::Data => PopupSource::Entity(label.to_string()),
            };
            DiagramNode {
                id: id.to_string(),
                kind,
                label: label.to_string(),
                subtitle: subtitle.to_string(),
                popup,
                placement: NodePlacement {
                    left: Offset::Percent(left_percent),
                    top: Offset::Px(top_px),
                },
            }
        }

        fn edge(from: &str, to: &str, label: &str) -> DiagramEdge {
            DiagramEdge {
                from: from.to_string(),
                to: to.to_string(),
                label: Some(label.to_string()),
            }
        }

        use NodeKind::{Actor, Data};
        Self {
            nodes: vec![
                node("n-ipm", Actor, "IPM Admin", "Platform administrator", 2.0, 30.0),
                node("n-client", Data, "Client", "Tenant company", 36.0, 30.0),
                node("n-ca", Actor, "Client Admin", "Company administrator", 68.0, 30.0),
                node("n-access", Data, "Access Request", "Permission workflow", 2.0, 200.0),
                node("n-team", Data, "Team", "Working group", 36.0, 200.0),
                node("n-employee", Data, "Employee", "Team member", 68.0, 200.0),
                node("n-meeting", Data, "Meeting", "Facilitated session", 36.0, 380.0),
                node("n-fac", Actor, "Facilitator", "Runs meetings", 68.0, 380.0),
            ],
            edges: vec![
                edge("n-ipm", "n-client", "creates"),
                edge("n-ipm", "n-access", "requests access"),
                edge("n-client", "n-ca", "has"),
                edge("n-client", "n-team", "contains"),
                edge("n-ca", "n-employee", "manages"),
                edge("n-ca", "n-team", "manages"),
                edge("n-team", "n-meeting", "has"),
                edge("n-employee", "n-fac", "can be"),
                edge("n-fac", "n-meeting", "creates"),
            ],
        }
    }
}
