use serde_json::{Map, Value, json};
use std::path::Path;
use std::time::Duration;

/// Site configuration as a JSON object with dotted-path access.
///
/// `SiteConfig::default()` carries every default; user overrides (JSON or YAML) are applied
/// with [`SiteConfig::deep_merge`].
#[derive(Debug, Clone, PartialEq)]
pub struct SiteConfig(Value);

impl Default for SiteConfig {
    fn default() -> Self {
        Self(json!({
            "site": {
                "title": "API Reference",
                "description": "Interactive architecture overview and endpoint reference.",
            },
            "diagram": {
                "gutter": 12,
                "popupWidth": 480,
                "popupHeight": 400,
                "graceMs": 150,
                "settleMs": 200,
                "labelOffset": 6,
                "nominalWidth": 960,
                "minHeight": 620,
            },
        }))
    }
}

impl SiteConfig {
    pub fn empty_object() -> Self {
        Self(Value::Object(Map::new()))
    }

    pub fn from_value(value: Value) -> Self {
        Self(value)
    }

    pub fn from_json_str(text: &str) -> crate::Result<Self> {
        Ok(Self(serde_json::from_str(text)?))
    }

    pub fn from_yaml_str(text: &str) -> crate::Result<Self> {
        Ok(Self(serde_yaml::from_str(text)?))
    }

    /// Defaults deep-merged with an override file (`.json`, `.yaml` or `.yml`).
    pub fn load(path: impl AsRef<Path>) -> crate::Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| crate::Error::Io {
            path: path.display().to_string(),
            source,
        })?;
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();
        let overrides = match ext.as_str() {
            "json" => Self::from_json_str(&text)?,
            "yaml" | "yml" => Self::from_yaml_str(&text)?,
            _ => return Err(crate::Error::UnsupportedFormat { extension: ext }),
        };
        let mut cfg = Self::default();
        cfg.deep_merge(overrides.as_value());
        tracing::debug!(path = %path.display(), "site config loaded");
        Ok(cfg)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    fn get(&self, dotted_path: &str) -> Option<&Value> {
        let mut cur = &self.0;
        for segment in dotted_path.split('.') {
            cur = cur.as_object()?.get(segment)?;
        }
        Some(cur)
    }

    pub fn get_str(&self, dotted_path: &str) -> Option<&str> {
        self.get(dotted_path)?.as_str()
    }

    pub fn get_f64(&self, dotted_path: &str) -> Option<f64> {
        self.get(dotted_path)?.as_f64().filter(|v| v.is_finite())
    }

    pub fn get_u64(&self, dotted_path: &str) -> Option<u64> {
        self.get(dotted_path)?.as_u64()
    }

    pub fn set_value(&mut self, dotted_path: &str, value: Value) {
        // Configs are objects; a non-object root (e.g. from `from_value`) is replaced so this
        // never panics on user input.
        if !self.0.is_object() {
            self.0 = Value::Object(Map::new());
        }

        let Value::Object(ref mut root) = self.0 else {
            return;
        };
        let mut cur: &mut Map<String, Value> = root;
        let mut segments = dotted_path.split('.').peekable();
        while let Some(seg) = segments.next() {
            if segments.peek().is_none() {
                cur.insert(seg.to_string(), value);
                return;
            }
            let slot = cur.entry(seg).or_insert_with(|| Value::Object(Map::new()));
            if !slot.is_object() {
                *slot = Value::Object(Map::new());
            }
            let Some(next) = slot.as_object_mut() else {
                return;
            };
            cur = next;
        }
    }

    pub fn deep_merge(&mut self, other: &Value) {
        deep_merge_value(&mut self.0, other);
    }

    pub fn site_title(&self) -> &str {
        self.get_str("site.title").unwrap_or("API Reference")
    }

    pub fn diagram_settings(&self) -> DiagramSettings {
        let d = DiagramSettings::default();
        let px = |key: &str, fallback: f64| {
            self.get_f64(&format!("diagram.{key}"))
                .filter(|v| *v >= 0.0)
                .unwrap_or(fallback)
        };
        let ms = |key: &str, fallback: Duration| {
            self.get_u64(&format!("diagram.{key}"))
                .map(Duration::from_millis)
                .unwrap_or(fallback)
        };
        DiagramSettings {
            gutter: px("gutter", d.gutter),
            popup_width: px("popupWidth", d.popup_width),
            popup_height: px("popupHeight", d.popup_height),
            grace: ms("graceMs", d.grace),
            settle: ms("settleMs", d.settle),
            label_offset: px("labelOffset", d.label_offset),
            nominal_width: px("nominalWidth", d.nominal_width),
            min_height: px("minHeight", d.min_height),
        }
    }
}

fn deep_merge_value(base: &mut Value, incoming: &Value) {
    match (base, incoming) {
        (Value::Object(base_map), Value::Object(in_map)) => {
            for (key, in_value) in in_map {
                match base_map.get_mut(key) {
                    Some(base_value) => deep_merge_value(base_value, in_value),
                    None => {
                        base_map.insert(key.clone(), in_value.clone());
                    }
                }
            }
        }
        (base_slot, in_value) => {
            *base_slot = in_value.clone();
        }
    }
}

/// Typed view of the `diagram.*` config keys.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiagramSettings {
    /// Horizontal gap between a node and its popup.
    pub gutter: f64,
    /// Nominal popup size used for overflow checks.
    pub popup_width: f64,
    pub popup_height: f64,
    /// Hover-intent grace period before a popup hides.
    pub grace: Duration,
    /// One-shot redraw delay after the first draw.
    pub settle: Duration,
    /// Perpendicular distance between an edge and its label.
    pub label_offset: f64,
    /// Container width assumed for the server-side first paint.
    pub nominal_width: f64,
    pub min_height: f64,
}

impl Default for DiagramSettings {
    fn default() -> Self {
        Self {
            gutter: 12.0,
            popup_width: 480.0,
            popup_height: 400.0,
            grace: Duration::from_millis(150),
            settle: Duration::from_millis(200),
            label_offset: 6.0,
            nominal_width: 960.0,
            min_height: 620.0,
        }
    }
}
