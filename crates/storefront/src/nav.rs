//! Page-chrome navigation rules.
//!
//! Which nav link is highlighted, and which clicks should play the page-exit
//! transition before navigating. Rendering is up to the front end; the
//! rules are served under `/nav`.

use serde::Deserialize;

/// Page assumed when the path has no file segment.
pub const INDEX_PAGE: &str = "index.html";

/// The current page: last path segment, or [`INDEX_PAGE`] for a bare path.
#[must_use]
pub fn current_page(path: &str) -> &str {
    match path.rsplit('/').next() {
        Some(segment) if !segment.is_empty() => segment,
        _ => INDEX_PAGE,
    }
}

/// Whether a nav link with `href` should be highlighted on `path`.
#[must_use]
pub fn is_active_link(href: &str, path: &str) -> bool {
    href == current_page(path)
}

/// Where a clicked link sits on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkContext {
    /// Ordinary page content or navigation.
    #[default]
    Page,
    /// Inside the cart modal.
    CartModal,
    /// Inside the login/signup modal.
    AuthModal,
    /// Inside a form.
    Form,
}

/// A clicked link.
#[derive(Debug, Clone, Copy, Default)]
pub struct LinkClick<'a> {
    pub href: Option<&'a str>,
    pub opens_new_tab: bool,
    pub is_download: bool,
    pub context: LinkContext,
}

/// Whether the click should play the exit transition and navigate to the
/// returned href. External, in-page, new-tab and download links, and links
/// inside modals or forms, are left to the browser.
#[must_use]
pub fn exit_transition_target<'a>(click: &LinkClick<'a>) -> Option<&'a str> {
    if click.context != LinkContext::Page || click.opens_new_tab || click.is_download {
        return None;
    }

    let href = click.href.filter(|href| !href.is_empty())?;
    if href.starts_with('#') || is_absolute_http(href) {
        return None;
    }
    Some(href)
}

fn is_absolute_http(href: &str) -> bool {
    let lower = href.to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_current_page() {
        assert_eq!(current_page("/shop.html"), "shop.html");
        assert_eq!(current_page("/site/faq.html"), "faq.html");
        assert_eq!(current_page("/"), INDEX_PAGE);
        assert_eq!(current_page(""), INDEX_PAGE);
    }

    #[test]
    fn test_active_link() {
        assert!(is_active_link("shop.html", "/shop.html"));
        assert!(is_active_link("index.html", "/"));
        assert!(!is_active_link("faq.html", "/shop.html"));
    }

    #[test]
    fn test_exit_transition_internal_only() {
        let click = |href| LinkClick {
            href: Some(href),
            ..LinkClick::default()
        };

        assert_eq!(exit_transition_target(&click("shop.html")), Some("shop.html"));
        assert_eq!(exit_transition_target(&click("#faq")), None);
        assert_eq!(exit_transition_target(&click("HTTPS://example.com")), None);
        assert_eq!(exit_transition_target(&click("")), None);
        assert_eq!(exit_transition_target(&LinkClick::default()), None);
    }

    #[test]
    fn test_exit_transition_skips_special_links() {
        let base = LinkClick {
            href: Some("about.html"),
            ..LinkClick::default()
        };

        for click in [
            LinkClick { opens_new_tab: true, ..base },
            LinkClick { is_download: true, ..base },
            LinkClick { context: LinkContext::CartModal, ..base },
            LinkClick { context: LinkContext::AuthModal, ..base },
            LinkClick { context: LinkContext::Form, ..base },
        ] {
            assert_eq!(exit_transition_target(&click), None);
        }
    }
}
