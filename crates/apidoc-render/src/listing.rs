//! The catalog browser: stats, search controls and tag -> subcategory -> card groups.
//!
//! Every record gets a card. `query` only decides which cards (and emptied groups) start out
//! `hidden`; the embedded script re-applies the same rule on every keystroke using each card's
//! `data-search` / `data-method` attributes, so clearing the search brings every card back.

use crate::badge::{auth_badge, method_badge};
use crate::markup::{Element, Markup, el};
use crate::route::Links;
use apidoc_core::search::method_counts;
use apidoc_core::{Catalog, EndpointRecord, Method, MethodFilter, SearchQuery};
use indexmap::IndexMap;

pub const EMPTY_MESSAGE: &str = "No endpoints match your search.";

const FILTER_SCRIPT: &str = r#"
(function () {
  var root = document.currentScript && document.currentScript.parentElement;
  if (!root) return;
  var input = root.querySelector('.listing-search');
  var select = root.querySelector('.listing-method');
  var empty = root.querySelector('.listing-empty');
  function apply() {
    var q = (input.value || '').trim().toLowerCase();
    var m = select.value;
    var shown = 0;
    root.querySelectorAll('.endpoint-card').forEach(function (card) {
      var ok = (m === 'All' || card.getAttribute('data-method') === m) &&
        (!q || card.getAttribute('data-search').indexOf(q) !== -1);
      card.hidden = !ok;
      if (ok) shown++;
    });
    root.querySelectorAll('.subcategory-group, .tag-group').forEach(function (group) {
      group.hidden = !group.querySelector('.endpoint-card:not([hidden])');
    });
    root.querySelectorAll('.tag-group').forEach(function (group) {
      var count = group.querySelector('.tag-count');
      if (count) count.textContent = '(' + group.querySelectorAll('.endpoint-card:not([hidden])').length + ' endpoints)';
    });
    empty.hidden = shown > 0;
  }
  input.addEventListener('input', apply);
  select.addEventListener('change', apply);
})();
"#;

/// Tag display order: `tag_order` entries that occur in `records`, then the remaining tags in
/// first-seen order.
pub fn tag_sequence<'a>(catalog: &'a Catalog, records: &[&'a EndpointRecord]) -> Vec<&'a str> {
    let mut out: Vec<&str> = catalog
        .tag_order()
        .iter()
        .map(String::as_str)
        .filter(|tag| records.iter().any(|r| r.tag == *tag))
        .collect();
    for r in records {
        if !out.contains(&r.tag.as_str()) {
            out.push(r.tag.as_str());
        }
    }
    out
}

/// Records grouped by subcategory, first-seen order.
pub fn group_by_subcategory<'a>(
    records: impl IntoIterator<Item = &'a EndpointRecord>,
) -> IndexMap<&'a str, Vec<&'a EndpointRecord>> {
    let mut groups: IndexMap<&str, Vec<&EndpointRecord>> = IndexMap::new();
    for r in records {
        groups.entry(r.subcategory.as_str()).or_default().push(r);
    }
    groups
}

fn stat_pills(catalog: &Catalog) -> Markup {
    let counts = method_counts(catalog.records());
    el("div")
        .class("stat-pills")
        .child(
            el("span")
                .class("stat-pill")
                .class("stat-total")
                .text(format!("Total: {}", catalog.len())),
        )
        .children(counts.iter().map(|(method, count)| {
            el("span")
                .class("stat-pill")
                .child(method_badge(&Method::parse(method)))
                .text(format!(" {count}"))
        }))
        .build()
}

fn filter_controls(query: &SearchQuery) -> Markup {
    let mut options = vec![MethodFilter::All];
    options.extend(Method::known().into_iter().map(MethodFilter::Only));
    if matches!(&query.method, MethodFilter::Only(m) if !m.is_known()) {
        options.push(query.method.clone());
    }
    let select = el("select")
        .class("listing-method")
        .attr("aria-label", "Method")
        .children(options.iter().map(|opt| {
            let mut o = el("option").attr("value", opt.label());
            if *opt == query.method {
                o = o.attr("selected", "selected");
            }
            o.text(opt.label())
        }));
    el("div")
        .class("listing-filters")
        .child(
            el("input")
                .class("listing-search")
                .attr("type", "search")
                .attr("aria-label", "Search endpoints")
                .attr(
                    "placeholder",
                    "Type to filter by path, title, or description...",
                )
                .attr("value", query.text()),
        )
        .child(select)
        .build()
}

fn card_element(record: &EndpointRecord, links: &Links) -> Element {
    let mut head = el("div")
        .class("card-head")
        .child(method_badge(&record.method))
        .child(el("span").class("endpoint-path").text(&record.path));
    if let Some(auth) = record.auth.as_deref().filter(|a| !a.trim().is_empty()) {
        head = head.child(auth_badge(auth));
    }
    el("a")
        .class("endpoint-card")
        .attr("href", links.endpoint(&record.id))
        .attr("data-method", record.method.as_str())
        .attr("data-search", record.search_haystack())
        .child(head)
        .child(el("div").class("card-title").text(&record.title))
        .child(el("div").class("card-summary").text(&record.summary))
}

pub fn endpoint_card(record: &EndpointRecord, links: &Links) -> Markup {
    card_element(record, links).build()
}

fn tag_group(
    catalog: &Catalog,
    tag: &str,
    records: &[&EndpointRecord],
    query: &SearchQuery,
    links: &Links,
) -> Markup {
    let subgroups = group_by_subcategory(records.iter().copied());
    let visible = records.iter().filter(|r| query.matches(r)).count();
    el("section")
        .class("tag-group")
        .attr("data-tag", tag)
        .flag("hidden", visible == 0)
        .child(
            el("h2")
                .class("tag-header")
                .text(catalog.tag_display_name(tag))
                .text(" ")
                .child(
                    el("span")
                        .class("tag-count")
                        .text(format!("({visible} endpoints)")),
                ),
        )
        .children(subgroups.iter().map(|(sub, recs)| {
            el("div")
                .class("subcategory-group")
                .flag("hidden", !recs.iter().any(|r| query.matches(r)))
                .child(el("h3").class("subcategory-header").text(sub))
                .children(
                    recs.iter()
                        .map(|r| card_element(r, links).flag("hidden", !query.matches(r))),
                )
        }))
        .child(el("hr").class("section-divider"))
        .build()
}

/// Full listing body with `query` pre-applied. Non-matching cards are present but `hidden`;
/// when nothing matches, the empty message is shown.
pub fn render_listing(catalog: &Catalog, query: &SearchQuery, links: &Links) -> Markup {
    let all: Vec<&EndpointRecord> = catalog.records().iter().collect();
    let any_match = all.iter().any(|r| query.matches(r));
    let groups: Markup = tag_sequence(catalog, &all)
        .iter()
        .map(|tag| {
            let in_tag: Vec<&EndpointRecord> =
                all.iter().copied().filter(|r| r.tag == *tag).collect();
            tag_group(catalog, tag, &in_tag, query, links)
        })
        .collect();

    el("div")
        .class("endpoint-listing")
        .child(el("h1").text("All Endpoints"))
        .child(el("p").class("listing-intro").text(
            "Complete reference of every API endpoint, organised by category and sub-category.",
        ))
        .child(stat_pills(catalog))
        .child(filter_controls(query))
        .child(
            el("p")
                .class("listing-empty")
                .flag("hidden", any_match)
                .text(EMPTY_MESSAGE),
        )
        .child(groups)
        .child(Markup::trusted(format!("<script>{FILTER_SCRIPT}</script>")))
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(id: &str, method: Method, tag: &str, sub: &str, title: &str) -> EndpointRecord {
        let mut r = EndpointRecord::new(id, method, format!("/{tag}/{id}"), title, tag);
        r.subcategory = sub.to_string();
        r
    }

    fn catalog() -> Catalog {
        Catalog::new(vec![
            rec("x1", Method::Get, "extra", "Misc", "Extra one"),
            rec("m1", Method::Post, "meetings", "Lifecycle", "Create meeting"),
            rec("m2", Method::Get, "meetings", "Lifecycle", "List meetings"),
            rec("c1", Method::Post, "clients", "Admin", "Create client"),
            rec("m3", Method::Post, "meetings", "Analysis", "Analyze meeting"),
        ])
        .unwrap()
        .with_tag_order(vec!["clients".into(), "meetings".into(), "ghosts".into()])
    }

    #[test]
    fn tags_follow_preferred_order_then_first_seen() {
        let c = catalog();
        let all: Vec<&EndpointRecord> = c.records().iter().collect();
        assert_eq!(tag_sequence(&c, &all), vec!["clients", "meetings", "extra"]);
    }

    #[test]
    fn subcategories_keep_first_seen_order() {
        let c = catalog();
        let groups = group_by_subcategory(c.records().iter().filter(|r| r.tag == "meetings"));
        let keys: Vec<&str> = groups.keys().copied().collect();
        assert_eq!(keys, vec!["Lifecycle", "Analysis"]);
        assert_eq!(groups["Lifecycle"].len(), 2);
    }

    fn card_tag(html: &str, id: &str) -> String {
        let href = format!("href=\"ep-{id}.html\"");
        let at = html.find(&href).expect("card present");
        let start = html[..at].rfind('<').unwrap();
        let end = at + html[at..].find('>').unwrap();
        html[start..=end].to_string()
    }

    #[test]
    fn listing_hides_cards_outside_the_query() {
        let c = catalog();
        let q = SearchQuery::new("meeting", MethodFilter::Only(Method::Post));
        let html = render_listing(&c, &q, &Links::static_site()).into_string();

        for id in ["m1", "m3"] {
            assert!(!card_tag(&html, id).contains("hidden"), "{id}");
        }
        for id in ["m2", "c1", "x1"] {
            assert!(card_tag(&html, id).contains("hidden=\"hidden\""), "{id}");
        }
        assert!(html.contains("<option value=\"POST\" selected=\"selected\">POST</option>"));
        assert!(html.contains("<p class=\"listing-empty\" hidden=\"hidden\">"));
        assert!(html.contains("<section class=\"tag-group\" data-tag=\"clients\" hidden=\"hidden\">"));
        assert!(html.contains("<section class=\"tag-group\" data-tag=\"meetings\">"));
        assert!(html.contains("<span class=\"tag-count\">(2 endpoints)</span>"));
    }

    #[test]
    fn empty_query_shows_every_card() {
        let c = catalog();
        let html = render_listing(&c, &SearchQuery::default(), &Links::static_site()).into_string();
        assert_eq!(html.matches("class=\"endpoint-card\"").count(), 5);
        for id in ["x1", "m1", "m2", "c1", "m3"] {
            assert!(!card_tag(&html, id).contains("hidden"), "{id}");
        }
        assert!(!html.contains("tag-group\" data-tag=\"extra\" hidden"));
        assert!(html.contains("<span class=\"tag-count\">(3 endpoints)</span>"));
    }

    #[test]
    fn empty_result_shows_message() {
        let c = catalog();
        let q = SearchQuery::new("no such thing", MethodFilter::All);
        let html = render_listing(&c, &q, &Links::static_site()).into_string();
        assert!(html.contains(&format!("<p class=\"listing-empty\">{EMPTY_MESSAGE}</p>")));
        assert_eq!(html.matches("class=\"endpoint-card\"").count(), 5);
        assert!(!html.contains("<section class=\"tag-group\" data-tag=\"meetings\">"));
    }

    #[test]
    fn stats_count_every_record_regardless_of_filter() {
        let c = catalog();
        let q = SearchQuery::new("client", MethodFilter::All);
        let html = render_listing(&c, &q, &Links::static_site()).into_string();
        assert!(html.contains("Total: 5"));
        assert!(html.contains("<span class=\"method-badge method-post\">POST</span> 3"));
    }

    #[test]
    fn cards_carry_client_filter_data() {
        let c = catalog();
        let html = endpoint_card(c.get("m1").unwrap(), &Links::static_site()).into_string();
        assert!(html.contains("data-method=\"POST\""));
        assert!(html.contains("data-search=\"/meetings/m1 create meeting  \""));
    }
}
