//! Page-chrome navigation handlers.

use axum::{Json, extract::Query};
use serde::{Deserialize, Serialize};

use crate::nav::{self, LinkClick, LinkContext};

use super::Reply;

/// Active-link query: the link's href and the page being shown.
#[derive(Debug, Deserialize)]
pub struct ActiveQuery {
    pub href: String,
    #[serde(default)]
    pub path: String,
}

/// Whether a nav link is highlighted.
#[derive(Debug, Serialize)]
pub struct ActiveLink {
    pub current_page: String,
    pub active: bool,
}

/// A clicked link, as reported by the page.
#[derive(Debug, Deserialize)]
pub struct ClickQuery {
    pub href: Option<String>,
    #[serde(default)]
    pub new_tab: bool,
    #[serde(default)]
    pub download: bool,
    #[serde(default)]
    pub context: LinkContext,
}

/// Where the exit transition should navigate, if it plays at all.
#[derive(Debug, Serialize)]
pub struct Transition {
    pub target: Option<String>,
}

/// Whether `href` is the current page's nav link.
///
/// GET /nav/active?href=shop.html&path=/shop.html
pub async fn active(Query(query): Query<ActiveQuery>) -> Json<Reply<ActiveLink>> {
    Json(Reply::data(ActiveLink {
        current_page: nav::current_page(&query.path).to_owned(),
        active: nav::is_active_link(&query.href, &query.path),
    }))
}

/// Whether a link click plays the exit transition.
///
/// GET /nav/transition?href=about.html&context=page
pub async fn transition(Query(query): Query<ClickQuery>) -> Json<Reply<Transition>> {
    let click = LinkClick {
        href: query.href.as_deref(),
        opens_new_tab: query.new_tab,
        is_download: query.download,
        context: query.context,
    };
    Json(Reply::data(Transition {
        target: nav::exit_transition_target(&click).map(str::to_owned),
    }))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::http::Uri;
    use axum::response::IntoResponse;
    use serde_json::Value;

    use super::*;
    use crate::routes::test_support::body;

    fn query<T: serde::de::DeserializeOwned>(uri: &'static str) -> Query<T> {
        Query::try_from_uri(&Uri::from_static(uri)).unwrap()
    }

    async fn data(response: impl IntoResponse) -> Value {
        body(response.into_response()).await["data"].clone()
    }

    #[tokio::test]
    async fn test_active_link() {
        let json = data(active(query("/nav/active?href=shop.html&path=/shop.html")).await).await;
        assert_eq!(json["current_page"], "shop.html");
        assert_eq!(json["active"], true);

        let json = data(active(query("/nav/active?href=index.html&path=/")).await).await;
        assert_eq!(json["current_page"], "index.html");
        assert_eq!(json["active"], true);

        let json = data(active(query("/nav/active?href=faq.html&path=/shop.html")).await).await;
        assert_eq!(json["active"], false);
    }

    #[tokio::test]
    async fn test_transition_target() {
        let json = data(transition(query("/nav/transition?href=about.html")).await).await;
        assert_eq!(json["target"], "about.html");

        for uri in [
            "/nav/transition?href=about.html&context=cart_modal",
            "/nav/transition?href=about.html&new_tab=true",
            "/nav/transition?href=about.html&download=true",
            "/nav/transition?href=%23faq",
            "/nav/transition",
        ] {
            let json = data(transition(query(uri)).await).await;
            assert!(json["target"].is_null(), "{uri}");
        }
    }

    #[test]
    fn test_active_needs_href() {
        let uri = Uri::from_static("/nav/active?path=/shop.html");
        assert!(Query::<ActiveQuery>::try_from_uri(&uri).is_err());
    }
}
