//! Permalink formatting: `<base>/@/<scheme>/<host>`.

use super::uri::Uri;
use crate::config::SiteConfig;
use crate::model::Site;

/// Format the canonical permalink for an identifier.
pub fn format_permalink(config: &SiteConfig, uri: &Uri) -> String {
    format!(
        "{}/@/{}/{}",
        config.base_url().trim_end_matches('/'),
        uri.scheme(),
        uri.host()
    )
}

impl Uri {
    /// Public permalink for this identifier, or `None` when nothing
    /// resolves (an unresolvable identifier has no live target and
    /// advertising it would produce a dead link).
    ///
    /// The permalink route resolves incoming requests by cache lookup
    /// only — no index scan per request — so an uncached identifier is
    /// resolved here first to pre-warm the cache.
    pub fn permalink(&self, site: &Site) -> Option<String> {
        if !site.uuids().contains(&self.to_string()) {
            self.resolve(site)?;
        }
        Some(format_permalink(site.config(), self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use std::fs;
    use tempfile::TempDir;

    fn site_with(base_url: &str, files: &[(&str, &str)]) -> (TempDir, Site) {
        let dir = TempDir::new().unwrap();
        let content = dir.path().join("content");
        for (rel, text) in files {
            let path = content.join(rel);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, text).unwrap();
        }
        let mut config = SiteConfig::with_root(dir.path());
        config.site.base_url = base_url.to_string();
        (dir, Site::load(config))
    }

    #[test]
    fn test_permalink_pre_warms_cache() {
        let (_dir, site) = site_with(
            "https://example.com/",
            &[("blog/hello/page.toml", "uuid = \"abc123\"\n")],
        );

        let uri = Uri::parse("page://abc123").unwrap();
        assert!(!site.uuids().contains("page://abc123"));

        let url = uri.permalink(&site).unwrap();
        assert_eq!(url, "https://example.com/@/page/abc123");

        // The advertised identifier is now resolvable by cache lookup
        // alone, the only lookup the permalink route performs.
        assert_eq!(
            site.uuids().get("page://abc123").unwrap().as_str(),
            "blog/hello"
        );
    }

    #[test]
    fn test_unresolvable_identifier_has_no_permalink() {
        let (_dir, site) = site_with("https://example.com", &[]);
        let uri = Uri::parse("page://nothere").unwrap();
        assert_eq!(uri.permalink(&site), None);
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let (_dir, site) = site_with(
            "https://example.com/sub/",
            &[("a/page.toml", "uuid = \"abc123\"\n")],
        );
        let url = Uri::parse("page://abc123").unwrap().permalink(&site).unwrap();
        assert_eq!(url, "https://example.com/sub/@/page/abc123");
    }
}
