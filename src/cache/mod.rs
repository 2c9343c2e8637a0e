//! In-memory field metadata cache.
//!
//! Field definitions are fetched once and kept until the caller explicitly
//! asks for a refresh. There is no expiry: `last_refresh` is recorded for
//! information only. A refresh replaces the whole index; it is never
//! patched in place.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::SystemTime;

use tracing::trace;

use crate::api::types::Field;

/// Id prefix Jira uses for custom fields.
pub const CUSTOM_FIELD_PREFIX: &str = "customfield_";

/// Field definitions plus a case-insensitive name index.
#[derive(Debug, Clone)]
pub struct FieldIndex {
    /// Fields in server order.
    fields: Vec<Field>,
    /// Lowercased name, id or clause name → canonical field id.
    name_to_id: HashMap<String, String>,
    /// When the fields were fetched.
    last_refresh: SystemTime,
}

impl FieldIndex {
    /// Build the index for a freshly fetched field list.
    ///
    /// Keys are the lowercased display name, id and every clause name of each
    /// field. When two fields share a key, the one later in server order wins.
    pub fn build(fields: Vec<Field>) -> Self {
        let mut name_to_id = HashMap::with_capacity(fields.len() * 3);
        for field in &fields {
            let keys = std::iter::once(&field.name)
                .chain(std::iter::once(&field.id))
                .chain(field.clause_names.iter());
            for key in keys {
                if let Some(previous) = name_to_id.insert(key.to_lowercase(), field.id.clone()) {
                    if previous != field.id {
                        trace!(
                            key = %key,
                            previous = %previous,
                            id = %field.id,
                            "Field key reassigned"
                        );
                    }
                }
            }
        }

        Self {
            fields,
            name_to_id,
            last_refresh: SystemTime::now(),
        }
    }

    /// All fields in server order.
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// When this index was built.
    pub fn last_refresh(&self) -> SystemTime {
        self.last_refresh
    }

    /// Resolve a display name, id or clause name to a field id.
    ///
    /// Matching is case-insensitive. Returns `None` when nothing matches.
    pub fn id_by_name(&self, name: &str) -> Option<&str> {
        self.name_to_id
            .get(&name.to_lowercase())
            .map(String::as_str)
    }

    /// Find a field by its exact id.
    pub fn by_id(&self, id: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.id == id)
    }

    /// Custom fields only, in server order.
    pub fn custom(&self) -> impl Iterator<Item = &Field> {
        self.fields
            .iter()
            .filter(|f| f.id.starts_with(CUSTOM_FIELD_PREFIX))
    }

    /// Fields whose name or id contains `keyword`, case-insensitively.
    ///
    /// Matches keep server order (no ranking) and are truncated to `limit`.
    pub fn search(&self, keyword: &str, limit: usize) -> Vec<&Field> {
        let keyword = keyword.to_lowercase();
        self.fields
            .iter()
            .filter(|f| {
                f.name.to_lowercase().contains(&keyword) || f.id.to_lowercase().contains(&keyword)
            })
            .take(limit)
            .collect()
    }
}

/// Cache state: nothing fetched yet, or a populated index.
#[derive(Debug, Clone, Default)]
pub enum FieldCache {
    /// No fields fetched yet.
    #[default]
    Empty,
    /// Fields fetched at some point; valid until replaced.
    Populated(Arc<FieldIndex>),
}

impl FieldCache {
    /// The cached index, if populated.
    pub fn get(&self) -> Option<Arc<FieldIndex>> {
        match self {
            FieldCache::Empty => None,
            FieldCache::Populated(index) => Some(Arc::clone(index)),
        }
    }

    /// Replace the cache contents with a new index.
    pub fn replace(&mut self, index: Arc<FieldIndex>) {
        *self = FieldCache::Populated(index);
    }

    /// Whether fields have been fetched.
    pub fn is_populated(&self) -> bool {
        matches!(self, FieldCache::Populated(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(id: &str, name: &str, clause_names: &[&str]) -> Field {
        Field {
            id: id.to_string(),
            name: name.to_string(),
            custom: id.starts_with(CUSTOM_FIELD_PREFIX),
            clause_names: clause_names.iter().map(|s| s.to_string()).collect(),
            ..Field::default()
        }
    }

    fn sample() -> FieldIndex {
        FieldIndex::build(vec![
            field("summary", "Summary", &["summary"]),
            field("status", "Status", &["status"]),
            field("customfield_10002", "Story Points", &["cf[10002]", "Story Points"]),
            field("customfield_10100", "Epic Link", &["cf[10100]", "Epic Link"]),
            field("resolution", "Resolution", &["resolution"]),
        ])
    }

    #[test]
    fn test_id_by_name_is_case_insensitive() {
        let index = sample();
        for input in ["STATUS", "status", "Status"] {
            assert_eq!(index.id_by_name(input), Some("status"));
        }
    }

    #[test]
    fn test_id_by_name_resolves_name_id_and_clause() {
        let index = sample();
        assert_eq!(index.id_by_name("story points"), Some("customfield_10002"));
        assert_eq!(index.id_by_name("CUSTOMFIELD_10002"), Some("customfield_10002"));
        assert_eq!(index.id_by_name("cf[10100]"), Some("customfield_10100"));
    }

    #[test]
    fn test_id_by_name_unknown_is_none() {
        assert_eq!(sample().id_by_name("Sprint"), None);
        assert_eq!(sample().id_by_name(""), None);
    }

    #[test]
    fn test_alias_collision_last_write_wins() {
        let index = FieldIndex::build(vec![
            field("customfield_1", "Team", &["team"]),
            field("customfield_2", "Team", &["team"]),
        ]);
        assert_eq!(index.id_by_name("team"), Some("customfield_2"));
        // Each id still resolves to itself.
        assert_eq!(index.id_by_name("customfield_1"), Some("customfield_1"));
    }

    #[test]
    fn test_by_id_is_exact() {
        let index = sample();
        assert_eq!(index.by_id("status").unwrap().name, "Status");
        assert!(index.by_id("STATUS").is_none());
        assert!(index.by_id("missing").is_none());
    }

    #[test]
    fn test_custom_filters_by_prefix() {
        let index = sample();
        let ids: Vec<&str> = index.custom().map(|f| f.id.as_str()).collect::<Vec<_>>();
        assert_eq!(ids, vec!["customfield_10002", "customfield_10100"]);
    }

    #[test]
    fn test_search_matches_name_or_id_in_server_order() {
        let index = sample();
        let names: Vec<&str> = index.search("TUS", 10).iter().map(|f| f.id.as_str()).collect();
        assert_eq!(names, vec!["status"]);

        let names: Vec<&str> = index.search("s", 3).iter().map(|f| f.id.as_str()).collect();
        assert_eq!(names, vec!["summary", "status", "customfield_10002"]);

        let names: Vec<&str> = index
            .search("CUSTOMFIELD", 1)
            .iter()
            .map(|f| f.id.as_str())
            .collect();
        assert_eq!(names, vec!["customfield_10002"]);

        assert!(index.search("nothing-like-this", 10).is_empty());
        assert!(index.search("s", 0).is_empty());
    }

    #[test]
    fn test_cache_states() {
        let mut cache = FieldCache::default();
        assert!(!cache.is_populated());
        assert!(cache.get().is_none());

        let first = Arc::new(sample());
        cache.replace(Arc::clone(&first));
        assert!(cache.is_populated());
        assert!(Arc::ptr_eq(&cache.get().unwrap(), &first));

        let second = Arc::new(FieldIndex::build(vec![field("summary", "Summary", &[])]));
        cache.replace(Arc::clone(&second));
        let current = cache.get().unwrap();
        assert!(Arc::ptr_eq(&current, &second));
        assert_eq!(current.fields().len(), 1);
        assert_eq!(current.id_by_name("status"), None);
    }
}
