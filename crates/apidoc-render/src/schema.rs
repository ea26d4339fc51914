//! Record -> ordered display sections.
//!
//! Section order is fixed; a section whose source field/list is empty is omitted entirely.
//! Rendering is pure: the same record and catalog always produce identical output.

use crate::badge::{auth_badge, method_badge, status_badge};
use crate::markup::{Markup, el};
use crate::route::Links;
use apidoc_core::{BodyRow, Catalog, EndpointRecord, FieldRow};
use pulldown_cmark::{CowStr, Event, Options, Parser, Tag};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionKind {
    Header,
    Meta,
    Description,
    PathParameters,
    QueryParameters,
    RequestBody,
    Response,
    StatusCodes,
    Related,
}

impl SectionKind {
    /// Value of the section's `data-section` attribute.
    pub fn marker(self) -> &'static str {
        match self {
            SectionKind::Header => "header",
            SectionKind::Meta => "meta",
            SectionKind::Description => "description",
            SectionKind::PathParameters => "path-parameters",
            SectionKind::QueryParameters => "query-parameters",
            SectionKind::RequestBody => "request-body",
            SectionKind::Response => "response",
            SectionKind::StatusCodes => "status-codes",
            SectionKind::Related => "related-endpoints",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub kind: SectionKind,
    pub heading: Option<String>,
    pub body: Markup,
}

impl Section {
    fn new(kind: SectionKind, heading: Option<String>, body: Markup) -> Self {
        Self {
            kind,
            heading,
            body,
        }
    }

    pub fn to_markup(&self) -> Markup {
        el("section")
            .class("ep-section")
            .attr("data-section", self.kind.marker())
            .child(
                self.heading
                    .as_deref()
                    .map(|h| el("h3").text(h).build())
                    .unwrap_or_default(),
            )
            .child(&self.body)
            .build()
    }
}

pub fn render_sections(record: &EndpointRecord, catalog: &Catalog, links: &Links) -> Vec<Section> {
    let mut out = Vec::with_capacity(9);
    out.push(header_section(record));
    out.extend(meta_section(record));
    out.extend(description_section(record));
    if !record.path_params.is_empty() {
        out.push(Section::new(
            SectionKind::PathParameters,
            Some("Path Parameters".to_string()),
            field_table(["Name", "Type", "Description"], &record.path_params),
        ));
    }
    if !record.query_params.is_empty() {
        out.push(Section::new(
            SectionKind::QueryParameters,
            Some("Query Parameters".to_string()),
            field_table(["Name", "Type", "Description"], &record.query_params),
        ));
    }
    if !record.request_body.is_empty() {
        out.push(Section::new(
            SectionKind::RequestBody,
            Some("Request Body".to_string()),
            body_table(&record.request_body),
        ));
    }
    if !record.response_fields.is_empty() {
        out.push(Section::new(
            SectionKind::Response,
            Some(format!("Response ({})", record.response_status())),
            field_table(["Field", "Type", "Description"], &record.response_fields),
        ));
    }
    if !record.status_codes.is_empty() {
        out.push(status_section(record));
    }
    out.extend(related_section(record, catalog, links));
    out
}

/// All sections of `record`, concatenated.
pub fn render_record(record: &EndpointRecord, catalog: &Catalog, links: &Links) -> Markup {
    render_sections(record, catalog, links)
        .iter()
        .map(Section::to_markup)
        .collect()
}

fn header_section(record: &EndpointRecord) -> Section {
    let body = Markup::from_iter([
        el("div")
            .class("ep-header")
            .child(method_badge(&record.method))
            .text(" ")
            .child(el("span").class("endpoint-path").text(&record.path))
            .build(),
        el("h2").class("ep-title").text(&record.title).build(),
    ]);
    Section::new(SectionKind::Header, None, body)
}

fn meta_section(record: &EndpointRecord) -> Option<Section> {
    let mut parts = Vec::new();
    if let Some(auth) = record.auth.as_deref().filter(|a| !a.trim().is_empty()) {
        parts.push(auth_badge(auth));
    }
    if let Some(file) = record.source_file.as_deref().filter(|f| !f.trim().is_empty()) {
        let location = match record.source_line {
            Some(line) => format!("{file}:{line}"),
            None => file.to_string(),
        };
        parts.push(el("span").class("source-ref").text(location).build());
    }
    if parts.is_empty() {
        return None;
    }
    Some(Section::new(
        SectionKind::Meta,
        None,
        el("div").class("ep-meta").children(parts).build(),
    ))
}

fn description_section(record: &EndpointRecord) -> Option<Section> {
    let text = record.description()?;
    Some(Section::new(
        SectionKind::Description,
        Some("Description".to_string()),
        el("div").class("ep-description").child(markdown(text)).build(),
    ))
}

/// Markdown to HTML with raw HTML demoted to text and script URLs neutralized.
pub fn markdown(text: &str) -> Markup {
    let parser = Parser::new_ext(text, Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH)
        .map(|event| match event {
            Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
            Event::Start(Tag::Link {
                link_type,
                dest_url,
                title,
                id,
            }) => Event::Start(Tag::Link {
                link_type,
                dest_url: safe_url(dest_url),
                title,
                id,
            }),
            Event::Start(Tag::Image {
                link_type,
                dest_url,
                title,
                id,
            }) => Event::Start(Tag::Image {
                link_type,
                dest_url: safe_url(dest_url),
                title,
                id,
            }),
            other => other,
        });
    let mut out = String::with_capacity(text.len() * 3 / 2);
    pulldown_cmark::html::push_html(&mut out, parser);
    Markup::trusted(out)
}

fn safe_url(url: CowStr<'_>) -> CowStr<'_> {
    let lowered = url.trim_start().to_ascii_lowercase();
    if lowered.starts_with("javascript:") || lowered.starts_with("vbscript:") || lowered.starts_with("data:") {
        CowStr::Borrowed("#")
    } else {
        url
    }
}

fn table<const N: usize>(headers: [&str; N], rows: Markup) -> Markup {
    el("table")
        .class("schema-table")
        .child(
            el("thead").child(
                el("tr").children(headers.iter().map(|h| el("th").text(h))),
            ),
        )
        .child(el("tbody").child(rows))
        .build()
}

fn field_table(headers: [&str; 3], rows: &[FieldRow]) -> Markup {
    let body: Markup = rows
        .iter()
        .map(|row| {
            el("tr")
                .child(el("td").class("field-name").text(&row.name))
                .child(el("td").class("field-type").text(&row.ty))
                .child(el("td").text(&row.description))
        })
        .collect();
    table(headers, body)
}

fn body_table(rows: &[BodyRow]) -> Markup {
    const UNKNOWN: &str = "-";
    let body: Markup = rows
        .iter()
        .map(|row| {
            el("tr")
                .child(el("td").class("field-name").text(&row.name))
                .child(
                    el("td")
                        .class("field-type")
                        .text(row.ty.as_deref().unwrap_or(UNKNOWN)),
                )
                .child(el("td").text(row.required.label()))
                .child(el("td").text(row.description.as_deref().unwrap_or(UNKNOWN)))
        })
        .collect();
    table(["Field", "Type", "Required", "Description"], body)
}

fn status_section(record: &EndpointRecord) -> Section {
    // BTreeMap iteration is ascending by code.
    let body: Markup = record
        .status_codes
        .iter()
        .map(|(code, desc)| {
            el("tr")
                .child(el("td").child(status_badge(*code)))
                .child(el("td").text(desc))
        })
        .collect();
    Section::new(
        SectionKind::StatusCodes,
        Some("Status Codes".to_string()),
        table(["Code", "Description"], body),
    )
}

fn related_section(record: &EndpointRecord, catalog: &Catalog, links: &Links) -> Option<Section> {
    let related = catalog.related(record);
    if related.is_empty() {
        return None;
    }
    let items = related.iter().map(|rel| {
        el("li").child(
            el("a")
                .class("related-endpoint")
                .attr("href", links.endpoint(&rel.id))
                .attr("data-endpoint", rel.id.as_str())
                .child(method_badge(&rel.method))
                .text(" ")
                .child(el("code").text(&rel.path))
                .text(" ")
                .child(el("span").class("related-title").text(&rel.title)),
        )
    });
    Some(Section::new(
        SectionKind::Related,
        Some("Related Endpoints".to_string()),
        el("ul").class("related-list").children(items).build(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use apidoc_core::{Complexity, Method, Required};

    fn rec(id: &str, tag: &str, sub: &str) -> EndpointRecord {
        let mut r = EndpointRecord::new(id, Method::Get, format!("/api/{id}"), format!("T {id}"), tag);
        r.subcategory = sub.to_string();
        r
    }

    fn kinds(sections: &[Section]) -> Vec<SectionKind> {
        sections.iter().map(|s| s.kind).collect()
    }

    #[test]
    fn minimal_record_renders_header_only() {
        let r = rec("a", "t", "S");
        let catalog = Catalog::new(vec![r.clone()]).unwrap();
        let sections = render_sections(&r, &catalog, &Links::static_site());
        assert_eq!(kinds(&sections), vec![SectionKind::Header]);
    }

    #[test]
    fn single_query_param_renders_one_row() {
        let mut r = rec("a", "t", "S");
        r.query_params = vec![FieldRow::new("limit", "int", "Max rows")];
        let catalog = Catalog::new(vec![r.clone()]).unwrap();
        let sections = render_sections(&r, &catalog, &Links::static_site());
        assert_eq!(
            kinds(&sections),
            vec![SectionKind::Header, SectionKind::QueryParameters]
        );
        let body = sections[1].body.as_str();
        assert_eq!(body.matches("<tr>").count(), 2, "header row + one data row");
        assert!(body.contains("<td class=\"field-name\">limit</td>"));
        assert!(!body.contains("Path Parameters"));
    }

    #[test]
    fn sections_follow_fixed_order() {
        let mut r = rec("a", "t", "S");
        r.complexity = Complexity::Complex;
        r.auth = Some("Bearer".into());
        r.summary = "Short".into();
        r.path_params = vec![FieldRow::new("id", "str", "Id")];
        r.query_params = vec![FieldRow::new("q", "str", "Query")];
        r.request_body = vec![BodyRow::new("name", "str", Required::Yes, "Name")];
        r.response_fields = vec![FieldRow::new("ok", "bool", "Flag")];
        r.status_codes.insert(404, "Missing".into());
        r.status_codes.insert(200, "OK".into());
        let mut other = rec("b", "t", "S");
        other.complexity = Complexity::Complex;
        let catalog = Catalog::new(vec![r.clone(), other]).unwrap();
        let sections = render_sections(&r, &catalog, &Links::static_site());
        assert_eq!(
            kinds(&sections),
            vec![
                SectionKind::Header,
                SectionKind::Meta,
                SectionKind::Description,
                SectionKind::PathParameters,
                SectionKind::QueryParameters,
                SectionKind::RequestBody,
                SectionKind::Response,
                SectionKind::StatusCodes,
                SectionKind::Related,
            ]
        );
        assert_eq!(sections[6].heading.as_deref(), Some("Response (200)"));
        let codes = sections[7].body.as_str();
        let ok = codes.find(">200<").unwrap();
        let missing = codes.find(">404<").unwrap();
        assert!(ok < missing);
    }

    #[test]
    fn rendering_is_idempotent() {
        let mut r = rec("a", "t", "S");
        r.description_long = Some("Creates a **thing**.".into());
        r.complexity = Complexity::Complex;
        let catalog = Catalog::new(vec![r.clone(), rec("b", "t", "S")]).unwrap();
        let links = Links::static_site();
        assert_eq!(
            render_record(&r, &catalog, &links),
            render_record(&r, &catalog, &links)
        );
    }

    #[test]
    fn related_lists_complex_siblings_only() {
        let mut a = rec("A", "Meetings", "Analysis");
        a.complexity = Complexity::Complex;
        let b = rec("B", "Meetings", "Analysis");
        let mut c = rec("C", "Meetings", "Analysis");
        c.complexity = Complexity::Complex;
        let mut d = rec("D", "Meetings", "Lifecycle");
        d.complexity = Complexity::Complex;
        let catalog = Catalog::new(vec![a.clone(), b.clone(), c, d]).unwrap();
        let links = Links::static_site();

        let sections = render_sections(&a, &catalog, &links);
        let related = sections.last().unwrap();
        assert_eq!(related.kind, SectionKind::Related);
        let html = related.body.as_str();
        assert!(html.contains("href=\"ep-C.html\""));
        assert!(!html.contains("ep-B.html"));
        assert!(!html.contains("ep-D.html"));
        assert!(!html.contains("ep-A.html"));

        let sections = render_sections(&b, &catalog, &links);
        assert!(!kinds(&sections).contains(&SectionKind::Related));
    }

    #[test]
    fn complex_record_without_siblings_has_no_related_section() {
        let mut a = rec("a", "t", "S");
        a.complexity = Complexity::Complex;
        let catalog = Catalog::new(vec![a.clone()]).unwrap();
        let sections = render_sections(&a, &catalog, &Links::static_site());
        assert!(!kinds(&sections).contains(&SectionKind::Related));
    }

    #[test]
    fn short_body_rows_render_placeholders() {
        let mut r = rec("a", "t", "S");
        r.request_body = serde_json::from_str(r#"[["file", "audio/wav"], ["only"]]"#).unwrap();
        let catalog = Catalog::new(vec![r.clone()]).unwrap();
        let sections = render_sections(&r, &catalog, &Links::static_site());
        let body = sections[1].body.as_str();
        assert!(body.contains(
            "<td class=\"field-name\">file</td><td class=\"field-type\">audio/wav</td><td>-</td><td>-</td>"
        ));
        assert!(body.contains(
            "<td class=\"field-name\">only</td><td class=\"field-type\">-</td><td>-</td><td>-</td>"
        ));
    }

    #[test]
    fn catalog_text_is_escaped() {
        let mut r = rec("a", "t", "S");
        r.title = "<script>alert(1)</script>".into();
        r.description_long = Some("Hi <img src=x onerror=alert(1)> [x](javascript:alert(1))".into());
        let catalog = Catalog::new(vec![r.clone()]).unwrap();
        let html = render_record(&r, &catalog, &Links::static_site()).into_string();
        assert!(!html.contains("<script>"));
        assert!(!html.contains("<img"));
        assert!(!html.contains("javascript:"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn description_falls_back_to_summary() {
        let mut r = rec("a", "t", "S");
        r.summary = "Lists *all* clients".into();
        let catalog = Catalog::new(vec![r.clone()]).unwrap();
        let sections = render_sections(&r, &catalog, &Links::static_site());
        assert_eq!(sections[1].kind, SectionKind::Description);
        assert!(sections[1].body.as_str().contains("<em>all</em>"));
    }

    #[test]
    fn section_markup_carries_marker() {
        let r = rec("a", "t", "S");
        let catalog = Catalog::new(vec![r.clone()]).unwrap();
        let html = render_record(&r, &catalog, &Links::static_site());
        assert!(html.as_str().starts_with("<section class=\"ep-section\" data-section=\"header\">"));
    }
}
