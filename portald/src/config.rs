use std::path::PathBuf;

pub const DEFAULT_ADDR: &str = "127.0.0.1:4878";
pub const PAGINATION_LIMIT_DEFAULT: u32 = 25;
pub const PAGINATION_OFFSET_DEFAULT: u32 = 0;
pub const SEARCH_PATH_DEFAULT: &str = "/search";

/// Knobs the search service reads on every call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchSettings {
    /// Page size used when the caller sends no limit.
    pub default_limit: u32,
    /// Path of the next/previous links; also routed to the search handler.
    pub search_path: String,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            default_limit: PAGINATION_LIMIT_DEFAULT,
            search_path: SEARCH_PATH_DEFAULT.to_string(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct PortalConfig {
    pub addr: String,
    pub search: SearchSettings,
    /// JSON catalog seeding the in-memory consumer; empty catalog when unset.
    pub catalog_path: Option<PathBuf>,
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            addr: DEFAULT_ADDR.to_string(),
            search: SearchSettings::default(),
            catalog_path: None,
        }
    }
}

impl PortalConfig {
    /// - PORTAL_ADDR (default 127.0.0.1:4878)
    /// - PORTAL_PAGINATION_LIMIT_DEFAULT (default 25, must be positive)
    /// - PORTAL_SEARCH_PATH (default /search)
    /// - PORTAL_CATALOG (optional)
    pub fn from_env() -> Self {
        let mut cfg = Self::default();

        if let Some(addr) = env_non_empty("PORTAL_ADDR") {
            cfg.addr = addr;
        }

        let limit = parse_env_u32("PORTAL_PAGINATION_LIMIT_DEFAULT", cfg.search.default_limit);
        if limit > 0 {
            cfg.search.default_limit = limit;
        }

        if let Some(path) = env_non_empty("PORTAL_SEARCH_PATH") {
            cfg.search.search_path = path;
        }

        cfg.catalog_path = env_non_empty("PORTAL_CATALOG").map(PathBuf::from);

        cfg
    }
}

fn env_non_empty(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn parse_env_u32(key: &str, default_val: u32) -> u32 {
    std::env::var(key)
        .ok()
        .and_then(|s| s.trim().parse::<u32>().ok())
        .unwrap_or(default_val)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_platform_constants() {
        let cfg = PortalConfig::default();
        assert_eq!(cfg.addr, "127.0.0.1:4878");
        assert_eq!(cfg.search.default_limit, 25);
        assert_eq!(cfg.search.search_path, "/search");
        assert!(cfg.catalog_path.is_none());
    }

    #[test]
    fn unparsable_numbers_fall_back() {
        assert_eq!(parse_env_u32("PORTAL_TEST_UNSET_NUMBER", 7), 7);
    }
}
