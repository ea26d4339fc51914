//! Single-record detail view.

use crate::markup::{Markup, el};
use crate::route::{Links, PageOutcome};

pub const NOT_FOUND_MESSAGE: &str = "Endpoint not found.";

/// Back link plus the record's sections, or the not-found placeholder.
pub fn render_detail(outcome: &PageOutcome, links: &Links) -> Markup {
    let back = el("a")
        .class("back-link")
        .attr("href", links.listing())
        .text("\u{2190} Back to All Endpoints");
    match outcome {
        PageOutcome::Found(page) => el("article")
            .class("endpoint-detail")
            .attr("data-endpoint", page.id.as_str())
            .child(back)
            .children(page.sections.iter().map(|s| s.to_markup()))
            .build(),
        PageOutcome::NotFound { id } => el("article")
            .class("endpoint-detail")
            .child(back)
            .child(
                el("div")
                    .class("not-found")
                    .attr("role", "alert")
                    .attr("data-endpoint", id.as_str())
                    .text(NOT_FOUND_MESSAGE),
            )
            .build(),
    }
}

/// Page title for an outcome.
pub fn detail_title(outcome: &PageOutcome) -> &str {
    match outcome {
        PageOutcome::Found(page) => &page.title,
        PageOutcome::NotFound { .. } => NOT_FOUND_MESSAGE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::route::PageHandle;
    use apidoc_core::{Catalog, EndpointRecord, Method};

    #[test]
    fn removed_record_renders_placeholder() {
        let catalog = Catalog::new(vec![EndpointRecord::new(
            "a",
            Method::Get,
            "/a",
            "A",
            "t",
        )])
        .unwrap();
        let links = Links::static_site();
        let html = render_detail(&PageHandle::new("gone", "Gone").render(&catalog, &links), &links)
            .into_string();
        assert!(html.contains(NOT_FOUND_MESSAGE));
        assert!(html.contains("href=\"endpoints.html\""));
        assert!(!html.contains("data-section"));

        let outcome = PageHandle::new("a", "A").render(&catalog, &links);
        assert_eq!(detail_title(&outcome), "A");
        let html = render_detail(&outcome, &links).into_string();
        assert!(html.contains("data-section=\"header\""));
        assert!(!html.contains(NOT_FOUND_MESSAGE));
    }
}
