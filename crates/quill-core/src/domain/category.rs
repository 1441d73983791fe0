use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Categories offered when no explicit set is configured.
pub const DEFAULT_CATEGORIES: [&str; 5] = [
    "AI",
    "Robotics",
    "Neurology",
    "Quantum Computing",
    "Biotechnology",
];

/// Which category labels a post may carry.
///
/// `Open` accepts any non-empty label. `Closed` accepts the listed names plus
/// whatever categories are currently managed in storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", content = "names", rename_all = "lowercase")]
pub enum CategoryPolicy {
    Open,
    Closed(Vec<String>),
}

impl Default for CategoryPolicy {
    fn default() -> Self {
        CategoryPolicy::Closed(DEFAULT_CATEGORIES.iter().map(|c| c.to_string()).collect())
    }
}

impl CategoryPolicy {
    pub fn allows(&self, name: &str, known: &[String]) -> bool {
        match self {
            CategoryPolicy::Open => !name.trim().is_empty(),
            CategoryPolicy::Closed(names) => names
                .iter()
                .chain(known.iter())
                .any(|allowed| allowed == name),
        }
    }
}

/// Trim a category name and reject empty ones.
pub fn normalize_category_name(name: &str) -> Result<String, DomainError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(DomainError::Validation(
            "category name must not be empty".to_string(),
        ));
    }
    Ok(name.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closed_policy_accepts_defaults_and_known() {
        let policy = CategoryPolicy::default();
        assert!(policy.allows("AI", &[]));
        assert!(!policy.allows("ai", &[]));
        assert!(policy.allows("Space", &["Space".to_string()]));
    }

    #[test]
    fn test_open_policy_accepts_any_label() {
        assert!(CategoryPolicy::Open.allows("anything at all", &[]));
        assert!(!CategoryPolicy::Open.allows("  ", &[]));
    }

    #[test]
    fn test_normalize_category_name() {
        assert_eq!(normalize_category_name("  AI ").unwrap(), "AI");
        assert!(normalize_category_name("   ").is_err());
    }
}
