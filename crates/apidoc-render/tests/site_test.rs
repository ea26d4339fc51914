use apidoc_core::{Catalog, MethodFilter, SearchQuery, SiteConfig};
use apidoc_render::listing::render_listing;
use apidoc_render::schema::render_sections;
use apidoc_render::{Links, SectionKind, render_record, render_site};
use serde_json::json;
use std::path::PathBuf;

fn workspace_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
}

fn fixture() -> Catalog {
    let path = workspace_root()
        .join("fixtures")
        .join("catalog")
        .join("platform.json");
    Catalog::load(&path).expect("fixture catalog")
}

#[test]
fn site_has_home_listing_and_one_page_per_record() {
    let catalog = fixture();
    let files = render_site(&catalog, &SiteConfig::default()).expect("site");
    assert_eq!(files.len(), catalog.len() + 2);
    assert_eq!(files[0].path, PathBuf::from("index.html"));
    assert_eq!(files[1].path, PathBuf::from("endpoints.html"));
    for record in catalog.records() {
        let name = format!("ep-{}.html", record.id);
        assert!(
            files.iter().any(|f| f.path == PathBuf::from(&name)),
            "missing {name}"
        );
    }
    for f in &files {
        assert!(f.contents.starts_with("<!DOCTYPE html>"), "{:?}", f.path);
    }
}

#[test]
fn home_embeds_the_diagram_with_configured_title() {
    let mut config = SiteConfig::default();
    config.deep_merge(&json!({ "site": { "title": "IPM Partners Backend" }, "diagram": { "graceMs": 300 } }));
    let files = render_site(&fixture(), &config).expect("site");
    let home = &files[0].contents;
    assert!(home.contains("<h1>IPM Partners Backend</h1>"));
    assert!(home.contains("class=\"diagram\" id=\"architecture\""));
    assert!(home.contains("\"graceMs\":300"));
    assert!(home.contains("IPM Admin Endpoints"));
}

#[test]
fn detail_pages_link_back_and_to_related_records() {
    let files = render_site(&fixture(), &SiteConfig::default()).expect("site");
    let diarize = files
        .iter()
        .find(|f| f.path == PathBuf::from("ep-meetings-diarize.html"))
        .unwrap();
    assert!(diarize.contents.contains("href=\"endpoints.html\""));
    assert!(diarize.contents.contains("href=\"ep-meetings-analyze.html\""));
    assert!(!diarize.contents.contains("href=\"ep-meetings-summary.html\""));
}

#[test]
fn fixture_sections_follow_record_content() {
    let catalog = fixture();
    let links = Links::static_site();

    let list = catalog.get("clients-list").unwrap();
    let kinds: Vec<SectionKind> = render_sections(list, &catalog, &links)
        .iter()
        .map(|s| s.kind)
        .collect();
    assert!(kinds.contains(&SectionKind::QueryParameters));
    assert!(!kinds.contains(&SectionKind::RequestBody));
    assert!(!kinds.contains(&SectionKind::Related));

    let create = catalog.get("clients-create").unwrap();
    let html = render_record(create, &catalog, &links).into_string();
    assert!(html.contains("Response (201)"));
    assert!(!html.contains("data-section=\"query-parameters\""));

    let voice = catalog.get("employees-voice").unwrap();
    let html = render_record(voice, &catalog, &links).into_string();
    assert!(html.contains("<td class=\"field-type\">audio/wav</td><td>-</td><td>-</td>"));
}

#[test]
fn listing_search_composes_text_and_method() {
    let catalog = fixture();
    let links = Links::static_site();
    let query = SearchQuery::new("MEETING", "POST".parse::<MethodFilter>().unwrap());
    let html = render_listing(&catalog, &query, &links).into_string();

    let card = |id: &str| {
        let href = format!("href=\"ep-{id}.html\"");
        let at = html.find(&href).unwrap_or_else(|| panic!("no card for {id}"));
        let end = at + html[at..].find('>').unwrap();
        html[at..end].to_string()
    };
    for id in ["meetings-create", "meetings-diarize", "meetings-analyze"] {
        assert!(!card(id).contains("hidden"), "{id}");
    }
    for id in ["meetings-list", "meetings-summary", "clients-create"] {
        assert!(card(id).ends_with("hidden=\"hidden\""), "{id}");
    }
    assert_eq!(html.matches("class=\"endpoint-card\"").count(), catalog.len());
}
