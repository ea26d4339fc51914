//! Typed HTML builder.
//!
//! Every piece of catalog text enters the output through [`Element::text`],
//! [`Element::attr`] or [`Markup::text`], which escape it. Unescaped strings can only be
//! introduced by this crate (`Markup::trusted`) for its own CSS/script constants and
//! sanitized Markdown output.

use apidoc_core::sanitize::{escape_attr, escape_text};
use std::fmt;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Markup(String);

impl Markup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Escaped text node.
    pub fn text(text: &str) -> Self {
        Self(escape_text(text).into_owned())
    }

    pub(crate) fn trusted(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn push(&mut self, other: impl Into<Markup>) {
        self.0.push_str(&other.into().0);
    }

    pub fn push_text(&mut self, text: &str) {
        self.0.push_str(&escape_text(text));
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Markup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<M: Into<Markup>> FromIterator<M> for Markup {
    fn from_iter<I: IntoIterator<Item = M>>(iter: I) -> Self {
        let mut out = Markup::new();
        out.extend(iter);
        out
    }
}

impl<M: Into<Markup>> Extend<M> for Markup {
    fn extend<I: IntoIterator<Item = M>>(&mut self, iter: I) {
        for m in iter {
            self.push(m);
        }
    }
}

const VOID_TAGS: &[&str] = &["br", "hr", "img", "input", "meta", "link"];

#[derive(Debug, Clone)]
pub struct Element {
    tag: &'static str,
    classes: Vec<String>,
    attrs: Vec<(&'static str, String)>,
    children: Markup,
}

/// Starts an element. Tag and attribute names are static, so only values need escaping.
pub fn el(tag: &'static str) -> Element {
    Element {
        tag,
        classes: Vec::new(),
        attrs: Vec::new(),
        children: Markup::new(),
    }
}

impl Element {
    pub fn class(mut self, class: impl Into<String>) -> Self {
        let class = class.into();
        if !class.is_empty() {
            self.classes.push(class);
        }
        self
    }

    pub fn attr(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.attrs.push((name, value.into()));
        self
    }

    /// Boolean attribute (`hidden="hidden"`) emitted only when `on`.
    pub fn flag(self, name: &'static str, on: bool) -> Self {
        if on { self.attr(name, name) } else { self }
    }

    pub fn attr_opt(self, name: &'static str, value: Option<impl Into<String>>) -> Self {
        match value {
            Some(v) => self.attr(name, v),
            None => self,
        }
    }

    pub fn text(mut self, text: impl AsRef<str>) -> Self {
        self.children.push_text(text.as_ref());
        self
    }

    pub fn child(mut self, child: impl Into<Markup>) -> Self {
        self.children.push(child);
        self
    }

    pub fn children<M: Into<Markup>>(mut self, children: impl IntoIterator<Item = M>) -> Self {
        self.children.extend(children);
        self
    }

    pub fn build(self) -> Markup {
        let mut out = String::with_capacity(self.children.0.len() + 32);
        out.push('<');
        out.push_str(self.tag);
        if !self.classes.is_empty() {
            out.push_str(" class=\"");
            out.push_str(&escape_attr(&self.classes.join(" ")));
            out.push('"');
        }
        for (name, value) in &self.attrs {
            out.push(' ');
            out.push_str(name);
            out.push_str("=\"");
            out.push_str(&escape_attr(value));
            out.push('"');
        }
        out.push('>');
        if VOID_TAGS.contains(&self.tag) {
            return Markup(out);
        }
        out.push_str(&self.children.0);
        out.push_str("</");
        out.push_str(self.tag);
        out.push('>');
        Markup(out)
    }
}

impl From<Element> for Markup {
    fn from(value: Element) -> Self {
        value.build()
    }
}

impl From<&Markup> for Markup {
    fn from(value: &Markup) -> Self {
        value.clone()
    }
}
