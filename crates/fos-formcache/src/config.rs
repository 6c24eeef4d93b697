//! Form cache configuration

use fos_dom::{DomTree, NodeId};
use serde::{Deserialize, Serialize};

use crate::FormCacheError;

/// Attribute names, marker names and event names used by the form cache
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormCacheConfig {
    /// Attribute storing the JSON-encoded cached value
    pub cache_attribute: String,

    /// Local opt-out attribute (element, form or any ancestor)
    pub opt_out_attribute: String,

    /// Framework-wide opt-out attribute
    pub framework_attribute: String,

    /// Value of either opt-out attribute that disables caching
    pub opt_out_value: String,

    /// `name` of the head marker controlling page caching
    pub cache_control_name: String,

    /// Marker `content` that disables caching for the whole page
    pub no_cache_value: String,

    /// Framework event fired after every navigation, including restores
    pub load_event: String,

    /// Framework event fired before the page is snapshotted
    pub before_cache_event: String,
}

impl Default for FormCacheConfig {
    fn default() -> Self {
        Self {
            cache_attribute: "data-turbo-bfcache-form-value".to_string(),
            opt_out_attribute: "data-turbo-bfcache-form".to_string(),
            framework_attribute: "data-turbo".to_string(),
            opt_out_value: "false".to_string(),
            cache_control_name: "turbo-cache-control".to_string(),
            no_cache_value: "no-cache".to_string(),
            load_event: "turbo:load".to_string(),
            before_cache_event: "turbo:before-cache".to_string(),
        }
    }
}

impl FormCacheConfig {
    /// Load overrides from JSON; missing keys keep their defaults
    pub fn from_json(json: &str) -> Result<Self, FormCacheError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject empty names and a cache attribute that collides with an opt-out
    pub fn validate(&self) -> Result<(), FormCacheError> {
        let required = [
            ("cache_attribute", &self.cache_attribute),
            ("opt_out_attribute", &self.opt_out_attribute),
            ("framework_attribute", &self.framework_attribute),
            ("cache_control_name", &self.cache_control_name),
            ("load_event", &self.load_event),
            ("before_cache_event", &self.before_cache_event),
        ];
        if let Some((field, _)) = required.iter().find(|(_, value)| value.trim().is_empty()) {
            return Err(FormCacheError::InvalidConfig(format!("{field} must not be empty")));
        }

        let cache = &self.cache_attribute;
        if cache.eq_ignore_ascii_case(&self.opt_out_attribute)
            || cache.eq_ignore_ascii_case(&self.framework_attribute)
        {
            return Err(FormCacheError::InvalidConfig(format!(
                "cache_attribute {cache} collides with an opt-out attribute"
            )));
        }
        Ok(())
    }

    /// Check whether `id` itself carries an opt-out marker
    pub fn is_opt_out(&self, tree: &DomTree, id: NodeId) -> bool {
        [&self.framework_attribute, &self.opt_out_attribute]
            .into_iter()
            .any(|attr| tree.get_attribute(id, attr) == Some(self.opt_out_value.as_str()))
    }
}
