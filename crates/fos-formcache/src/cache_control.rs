//! Page-level cache control
//!
//! `<meta name="turbo-cache-control" content="no-cache">` in the head turns
//! form caching off for the whole page.

use fos_dom::Document;

use crate::FormCacheConfig;

/// Reads the head marker that globally disables caching
#[derive(Debug, Clone, Copy)]
pub struct CacheControl<'a> {
    config: &'a FormCacheConfig,
}

impl<'a> CacheControl<'a> {
    pub fn new(config: &'a FormCacheConfig) -> Self {
        Self { config }
    }

    /// False only when the marker exists and its content is the no-cache sentinel
    pub fn allow_cache(&self, doc: &Document) -> bool {
        let Some(marker) = doc.head_element_named(&self.config.cache_control_name) else {
            return true;
        };
        let tree = doc.tree();
        // Only <meta> exposes `content`
        if !tree.is_element_named(marker, "meta") {
            return true;
        }
        tree.get_attribute(marker, "content") != Some(self.config.no_cache_value.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc_with_meta(tag: &str, content: &str) -> Document {
        let mut doc = Document::default();
        let head = doc.head();
        doc.append_element(head, tag, &[("name", "turbo-cache-control"), ("content", content)])
            .unwrap();
        doc
    }

    #[test]
    fn test_absent_marker_allows() {
        let config = FormCacheConfig::default();
        assert!(CacheControl::new(&config).allow_cache(&Document::default()));
    }

    #[test]
    fn test_no_cache_disables() {
        let config = FormCacheConfig::default();
        assert!(!CacheControl::new(&config).allow_cache(&doc_with_meta("meta", "no-cache")));
    }

    #[test]
    fn test_other_content_allows() {
        let config = FormCacheConfig::default();
        let control = CacheControl::new(&config);
        assert!(control.allow_cache(&doc_with_meta("meta", "no-preview")));
        assert!(control.allow_cache(&doc_with_meta("meta", "No-Cache")));
        assert!(control.allow_cache(&doc_with_meta("meta", "")));
    }

    #[test]
    fn test_non_meta_marker_allows() {
        let config = FormCacheConfig::default();
        assert!(CacheControl::new(&config).allow_cache(&doc_with_meta("link", "no-cache")));
    }

    #[test]
    fn test_marker_in_body_ignored() {
        let config = FormCacheConfig::default();
        let mut doc = Document::default();
        let body = doc.body();
        doc.append_element(body, "meta", &[("name", "turbo-cache-control"), ("content", "no-cache")])
            .unwrap();
        assert!(CacheControl::new(&config).allow_cache(&doc));
    }
}
