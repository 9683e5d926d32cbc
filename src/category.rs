/// Extension-based file categorization.
///
/// Maps a file extension (with leading dot, e.g. `.txt`) to a user-defined
/// category name. The mapping is built once from the loaded configuration
/// and stays immutable for the whole run.
///
/// # Examples
///
/// ```
/// use std::collections::HashMap;
/// use tidyshelf::category::{CategoryMap, DEFAULT_CATEGORY};
///
/// let mut raw = HashMap::new();
/// raw.insert("images".to_string(), vec![".jpg".to_string(), ".png".to_string()]);
/// let map = CategoryMap::new(raw);
///
/// assert_eq!(map.resolve(".jpg"), "images");
/// assert_eq!(map.resolve(".xyz"), DEFAULT_CATEGORY);
/// ```
use std::collections::{HashMap, HashSet};

/// Category used for files whose extension matches no configured category.
pub const DEFAULT_CATEGORY: &str = "others";

/// One configured category with its extension set (lowercased, dots kept).
#[derive(Debug, Clone)]
struct CategoryRule {
    name: String,
    extensions: HashSet<String>,
}

/// Compiled category lookup table.
///
/// Lookups are case-insensitive. Every category is consulted before the
/// default is returned, so a match in the last configured category is
/// found just as reliably as one in the first.
#[derive(Debug, Clone)]
pub struct CategoryMap {
    categories: Vec<CategoryRule>,
}

impl CategoryMap {
    /// Builds a lookup table from a raw category → extensions mapping.
    pub fn new(raw: HashMap<String, Vec<String>>) -> Self {
        let mut categories: Vec<CategoryRule> = raw
            .into_iter()
            .map(|(name, extensions)| CategoryRule {
                name,
                extensions: extensions.iter().map(|ext| ext.to_lowercase()).collect(),
            })
            .collect();

        // HashMap iteration order is arbitrary; sort so runs are deterministic.
        categories.sort_by(|a, b| a.name.cmp(&b.name));

        Self { categories }
    }

    /// Resolves an extension string (leading dot included, empty for
    /// extensionless files) to a category name.
    ///
    /// Checks all configured categories; falls back to [`DEFAULT_CATEGORY`]
    /// only when none of them contains the extension.
    pub fn resolve(&self, ext: &str) -> &str {
        let ext = ext.to_lowercase();
        for rule in &self.categories {
            if rule.extensions.contains(&ext) {
                return &rule.name;
            }
        }
        DEFAULT_CATEGORY
    }

    /// Iterates the configured category names in sorted order.
    pub fn category_names(&self) -> impl Iterator<Item = &str> {
        self.categories.iter().map(|rule| rule.name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_map() -> CategoryMap {
        let mut raw = HashMap::new();
        raw.insert(
            "images".to_string(),
            vec![".jpg".to_string(), ".png".to_string()],
        );
        raw.insert("docs".to_string(), vec![".txt".to_string()]);
        raw.insert("zarchives".to_string(), vec![".zip".to_string()]);
        CategoryMap::new(raw)
    }

    #[test]
    fn test_resolve_known_extension() {
        let map = sample_map();
        assert_eq!(map.resolve(".jpg"), "images");
        assert_eq!(map.resolve(".txt"), "docs");
    }

    #[test]
    fn test_resolve_is_case_insensitive() {
        let map = sample_map();
        assert_eq!(map.resolve(".JPG"), "images");
        assert_eq!(map.resolve(".Txt"), "docs");
    }

    #[test]
    fn test_resolve_unknown_extension_falls_back() {
        let map = sample_map();
        assert_eq!(map.resolve(".xyz"), DEFAULT_CATEGORY);
    }

    #[test]
    fn test_resolve_empty_extension_falls_back() {
        let map = sample_map();
        assert_eq!(map.resolve(""), DEFAULT_CATEGORY);
    }

    #[test]
    fn test_resolve_checks_every_category() {
        // "zarchives" sorts last; a match there must still be found rather
        // than short-circuiting to the default after the first category.
        let map = sample_map();
        assert_eq!(map.resolve(".zip"), "zarchives");
    }

    #[test]
    fn test_uppercase_config_extensions_are_normalized() {
        let mut raw = HashMap::new();
        raw.insert("images".to_string(), vec![".JPG".to_string()]);
        let map = CategoryMap::new(raw);
        assert_eq!(map.resolve(".jpg"), "images");
    }

    #[test]
    fn test_category_names_sorted() {
        let map = sample_map();
        let names: Vec<&str> = map.category_names().collect();
        assert_eq!(names, vec!["docs", "images", "zarchives"]);
    }

    #[test]
    fn test_empty_mapping_always_defaults() {
        let map = CategoryMap::new(HashMap::new());
        assert_eq!(map.resolve(".jpg"), DEFAULT_CATEGORY);
    }
}
