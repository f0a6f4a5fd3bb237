//! Fragment-based page routing
//!
//! Pages are DOM sections toggled visible one at a time. The router keeps the set of
//! known sections and which one is active; applying the result to the DOM is left to
//! the caller.

use crate::config::PortalConfig;
use std::fmt;

/// Identifier of a page section; matches the section's element id and the URL fragment.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PageId(String);

impl PageId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn default_page() -> Self {
        Self::new(PortalConfig::DEFAULT_PAGE)
    }

    pub fn auth() -> Self {
        Self::new(PortalConfig::AUTH_PAGE)
    }

    pub fn profile() -> Self {
        Self::new(PortalConfig::PROFILE_PAGE)
    }

    /// Whether the page needs an active session to be reachable directly
    pub fn is_protected(&self) -> bool {
        PortalConfig::PROTECTED_PAGES.contains(&self.as_str())
    }

    /// `#id`, as pushed into the address bar
    pub fn fragment(&self) -> String {
        format!("#{}", self.0)
    }
}

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PageId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Outcome of a navigation, for the presentation layer to apply
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Navigation {
    /// Requested page; nav links with this `data-page` are marked active
    pub target: PageId,
    /// Page made visible, `None` when no section matches the target
    pub shown: Option<PageId>,
}

impl Navigation {
    /// Fragment to push into the address bar
    pub fn fragment(&self) -> String {
        self.target.fragment()
    }
}

#[derive(Clone, Debug, Default)]
pub struct Router {
    pages: Vec<PageId>,
    active: Option<PageId>,
}

impl Router {
    pub fn new(pages: impl IntoIterator<Item = PageId>) -> Self {
        let mut pages: Vec<PageId> = pages.into_iter().collect();
        pages.dedup();
        Self {
            pages,
            active: None,
        }
    }

    pub fn pages(&self) -> &[PageId] {
        &self.pages
    }

    pub fn contains(&self, page: &PageId) -> bool {
        self.pages.contains(page)
    }

    pub const fn active(&self) -> Option<&PageId> {
        self.active.as_ref()
    }

    /// Hide every page, then show `target` if it is a known page.
    pub fn navigate_to(&mut self, target: &PageId) -> Navigation {
        self.active = self.contains(target).then(|| target.clone());
        if self.active.is_none() {
            tracing::debug!(page = %target, "navigation target has no matching section");
        } else {
            tracing::debug!(page = %target, "navigated");
        }

        Navigation {
            target: target.clone(),
            shown: self.active.clone(),
        }
    }

    /// Map a URL fragment to the page that should be shown.
    ///
    /// An empty fragment means the default page; protected pages fall back to the
    /// auth page while logged out.
    pub fn resolve(fragment: &str, logged_in: bool) -> PageId {
        let id = fragment.strip_prefix('#').unwrap_or(fragment);
        let target = if id.is_empty() {
            PageId::default_page()
        } else {
            PageId::new(id)
        };

        if target.is_protected() && !logged_in {
            tracing::debug!(page = %target, "protected page requested while logged out");
            PageId::auth()
        } else {
            target
        }
    }

    /// Resolve the fragment and navigate to the result
    pub fn resolve_from_location(&mut self, fragment: &str, logged_in: bool) -> Navigation {
        let target = Self::resolve(fragment, logged_in);
        self.navigate_to(&target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn router() -> Router {
        Router::new(
            ["about", "auth", "profile", "feedback", "download"]
                .into_iter()
                .map(PageId::from),
        )
    }

    #[test]
    fn every_known_page_becomes_the_only_active_one() {
        let mut router = router();
        for page in router.pages().to_vec() {
            let nav = router.navigate_to(&page);
            assert_eq!(nav.shown.as_ref(), Some(&page));
            assert_eq!(router.active(), Some(&page));
            assert_eq!(nav.fragment(), format!("#{page}"));
        }
    }

    #[test]
    fn unknown_page_hides_everything_but_still_updates_fragment() {
        let mut router = router();
        router.navigate_to(&PageId::from("about"));

        let nav = router.navigate_to(&PageId::from("pricing"));
        assert_eq!(nav.shown, None);
        assert_eq!(router.active(), None);
        assert_eq!(nav.fragment(), "#pricing");
    }

    #[test]
    fn empty_fragment_resolves_to_default() {
        assert_eq!(Router::resolve("", false), PageId::from("about"));
        assert_eq!(Router::resolve("#", true), PageId::from("about"));
    }

    #[test]
    fn protected_pages_require_login() {
        for page in PortalConfig::PROTECTED_PAGES {
            assert_eq!(Router::resolve(page, false), PageId::auth());
            assert_eq!(Router::resolve(&format!("#{page}"), false), PageId::auth());
            assert_eq!(Router::resolve(page, true), PageId::from(page));
        }
    }

    #[test]
    fn public_pages_resolve_unchanged() {
        assert_eq!(Router::resolve("#auth", false), PageId::auth());
        assert_eq!(Router::resolve("about", false), PageId::from("about"));
    }

    #[test]
    fn resolve_from_location_activates_result() {
        let mut router = router();
        let nav = router.resolve_from_location("#download", false);
        assert_eq!(nav.target, PageId::auth());
        assert_eq!(router.active(), Some(&PageId::auth()));
    }
}
