use crate::markup::{Markup, el};
use crate::route::Links;
use crate::style::global_style;

/// Wraps `body` in a complete HTML document with the site navigation bar.
pub fn document(page_title: &str, site_title: &str, links: &Links, body: Markup) -> Markup {
    let title = if page_title.is_empty() || page_title == site_title {
        site_title.to_string()
    } else {
        format!("{page_title} | {site_title}")
    };
    let head = el("head")
        .child(el("meta").attr("charset", "utf-8"))
        .child(
            el("meta")
                .attr("name", "viewport")
                .attr("content", "width=device-width, initial-scale=1"),
        )
        .child(el("title").text(title))
        .child(global_style());
    let nav = el("nav")
        .class("site-nav")
        .child(
            el("a")
                .class("site-title")
                .attr("href", links.home())
                .text(site_title),
        )
        .child(el("a").attr("href", links.home()).text("Architecture"))
        .child(el("a").attr("href", links.listing()).text("All Endpoints"));

    let mut out = Markup::trusted("<!DOCTYPE html>\n");
    out.push(
        el("html")
            .attr("lang", "en")
            .child(head)
            .child(el("body").child(nav).child(el("main").child(body))),
    );
    out
}
