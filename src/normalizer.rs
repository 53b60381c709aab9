//! # URL Normalizer Module
//!
//! Derives the canonical crawl stem from a raw user-supplied URL string.
//! The stem doubles as the seed for site mapping: usually the bare hostname,
//! but for known code-hosting domains with an `/owner/repo` path the stem
//! becomes `host/owner/repo` so the crawl is rooted at the repository rather
//! than the whole host.

use crate::error::{Error, Result};
use std::fmt;
use url::Url;

/// Scheme prepended to inputs that arrive without one
const DEFAULT_SCHEME: &str = "http";

/// Hosts where a two-segment path identifies a repository
const CODE_HOSTS: &[&str] = &["github.com", "gitlab.com"];

/// The normalized crawl-entry value derived from a URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedSite {
    stem: String,
}

impl NormalizedSite {
    /// The stem string: `host` or `host/owner/repo`
    pub fn stem(&self) -> &str {
        &self.stem
    }
}

impl fmt::Display for NormalizedSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.stem)
    }
}

/// Normalize a raw URL string into a crawl stem
///
/// Inputs without a recognizable scheme get [`DEFAULT_SCHEME`] prepended
/// before parsing. Strings that still fail to parse as a URL, or parse to a
/// URL without a host, yield [`Error::InvalidUrl`].
pub fn normalize_site(raw: &str) -> Result<NormalizedSite> {
    let candidate = if raw.starts_with("http://") || raw.starts_with("https://") {
        raw.to_string()
    } else {
        format!("{}://{}", DEFAULT_SCHEME, raw)
    };

    let parsed = Url::parse(&candidate).map_err(|_| Error::InvalidUrl(raw.to_string()))?;

    let host = parsed
        .host_str()
        .ok_or_else(|| Error::InvalidUrl(raw.to_string()))?
        .to_string();

    let mut stem = host.clone();
    if CODE_HOSTS.contains(&host.as_str()) {
        let segments: Vec<&str> = parsed
            .path_segments()
            .map(|s| s.filter(|p| !p.is_empty()).collect())
            .unwrap_or_default();

        if let [owner, repo, ..] = segments.as_slice() {
            stem = format!("{}/{}/{}", host, owner, repo);
        }
    }

    Ok(NormalizedSite { stem })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prepends_scheme_when_missing() {
        let site = normalize_site("example.com").unwrap();
        assert_eq!(site.stem(), "example.com");
    }

    #[test]
    fn keeps_host_for_full_urls() {
        let site = normalize_site("https://example.com/blog/post").unwrap();
        assert_eq!(site.stem(), "example.com");
    }

    #[test]
    fn rejects_unparseable_input() {
        let err = normalize_site("not a url").unwrap_err();
        assert!(matches!(err, Error::InvalidUrl(_)));
    }

    #[test]
    fn extends_stem_for_code_hosting_repo() {
        let site = normalize_site("https://github.com/acme/widgets").unwrap();
        assert_eq!(site.stem(), "github.com/acme/widgets");
    }

    #[test]
    fn ignores_path_beyond_owner_and_repo() {
        let site = normalize_site("https://github.com/acme/widgets/tree/main/src").unwrap();
        assert_eq!(site.stem(), "github.com/acme/widgets");
    }

    #[test]
    fn bare_code_host_stays_bare() {
        let site = normalize_site("https://github.com/acme").unwrap();
        assert_eq!(site.stem(), "github.com");
    }

    #[test]
    fn non_code_host_path_is_dropped() {
        let site = normalize_site("https://docs.example.com/acme/widgets").unwrap();
        assert_eq!(site.stem(), "docs.example.com");
    }
}
