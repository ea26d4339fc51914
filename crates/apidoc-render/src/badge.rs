use crate::markup::{Markup, el};
use apidoc_core::Method;

/// CSS modifier class for a method badge; `None` for methods outside the known set.
pub fn method_class(method: &Method) -> Option<&'static str> {
    match method {
        Method::Get => Some("method-get"),
        Method::Post => Some("method-post"),
        Method::Put => Some("method-put"),
        Method::Patch => Some("method-patch"),
        Method::Delete => Some("method-delete"),
        Method::Other(_) => None,
    }
}

pub fn method_badge(method: &Method) -> Markup {
    el("span")
        .class("method-badge")
        .class(method_class(method).unwrap_or_default())
        .text(method.as_str())
        .build()
}

/// Small badge used inside diagram popups.
pub fn method_badge_compact(method: &Method) -> Markup {
    el("span")
        .class("mbadge")
        .class(method_class(method).unwrap_or_default())
        .text(method.as_str())
        .build()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusClass {
    Success,
    ClientError,
    ServerError,
}

impl StatusClass {
    pub fn of(code: u16) -> Self {
        if code < 300 {
            StatusClass::Success
        } else if code < 500 {
            StatusClass::ClientError
        } else {
            StatusClass::ServerError
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            StatusClass::Success => "2xx",
            StatusClass::ClientError => "4xx",
            StatusClass::ServerError => "5xx",
        }
    }

    pub fn css_class(self) -> &'static str {
        match self {
            StatusClass::Success => "status-2xx",
            StatusClass::ClientError => "status-4xx",
            StatusClass::ServerError => "status-5xx",
        }
    }
}

pub fn status_badge(code: u16) -> Markup {
    el("span")
        .class("status-code")
        .class(StatusClass::of(code).css_class())
        .text(code.to_string())
        .build()
}

pub fn auth_badge(label: &str) -> Markup {
    el("span").class("auth-badge").text(label).build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_classes_follow_numeric_ranges() {
        let cases = [
            (201, "2xx"),
            (404, "4xx"),
            (503, "5xx"),
            (299, "2xx"),
            (300, "4xx"),
            (499, "4xx"),
            (500, "5xx"),
        ];
        for (code, label) in cases {
            assert_eq!(StatusClass::of(code).label(), label, "code {code}");
        }
    }

    #[test]
    fn known_methods_get_a_modifier_class() {
        assert_eq!(
            method_badge(&Method::Patch).as_str(),
            "<span class=\"method-badge method-patch\">PATCH</span>"
        );
    }

    #[test]
    fn unknown_methods_fall_back_to_an_unstyled_badge() {
        let m = Method::parse("PURGE");
        assert_eq!(method_class(&m), None);
        assert_eq!(
            method_badge(&m).as_str(),
            "<span class=\"method-badge\">PURGE</span>"
        );
        assert_eq!(
            method_badge_compact(&m).as_str(),
            "<span class=\"mbadge\">PURGE</span>"
        );
    }
}
