use std::path::Path;

use crate::error::Error;
use crate::types::ReplaceStrategy;

/// Name of the optional configuration file looked up in the root directory.
pub const CONFIG_FILE: &str = ".casefix.toml";

/// Run configuration loaded from `.casefix.toml`.
/// Exclude patterns are `/`-separated path prefixes relative to the root.
#[derive(Debug, Clone)]
pub struct Config {
    /// Attribute names whose values are treated as file references.
    pub attributes: Vec<String>,
    /// Root-relative path prefixes that are never processed.
    pub exclude: Vec<String>,
    /// File extensions, without the dot, that mark a file as HTML.
    pub extensions: Vec<String>,
    /// How corrections are applied to the document text.
    pub strategy: ReplaceStrategy,
}

/// Raw TOML structure for `.casefix.toml`.
#[derive(serde::Deserialize)]
#[serde(deny_unknown_fields)]
struct CasefixTomlConfig {
    #[serde(default)]
    attributes: Option<Vec<String>>,
    #[serde(default)]
    exclude: Vec<String>,
    #[serde(default)]
    extensions: Option<Vec<String>>,
    #[serde(default)]
    strategy: Option<ReplaceStrategy>,
}

impl Default for Config {
    fn default() -> Self {
        return Self {
            attributes: vec!["src".to_string(), "href".to_string()],
            exclude: Vec::new(),
            extensions: vec!["html".to_string(), "htm".to_string()],
            strategy: ReplaceStrategy::default(),
        };
    }
}

impl Config {
    /// Load config from `.casefix.toml` in the given root directory.
    /// Returns the defaults if the file doesn't exist. A file that exists but
    /// is malformed is an error, never a silent fallback to defaults.
    ///
    /// # Errors
    ///
    /// Returns `Error::Io` if reading fails (other than not-found),
    /// or `Error::TomlDe` if the TOML is malformed.
    pub fn load(root: &Path) -> Result<Self, Error> {
        let path = root.join(CONFIG_FILE);
        let content = match std::fs::read_to_string(&path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(Error::Io(e)),
        };
        return Self::parse(&content);
    }

    /// Parse config from TOML content, filling unset keys with defaults.
    ///
    /// # Errors
    ///
    /// Returns `Error::TomlDe` if the TOML is malformed or has unknown keys.
    pub fn parse(content: &str) -> Result<Self, Error> {
        let raw: CasefixTomlConfig = toml::from_str(content)?;
        let defaults = Self::default();
        return Ok(Self {
            attributes: raw.attributes.unwrap_or(defaults.attributes),
            exclude: raw.exclude,
            extensions: raw
                .extensions
                .map(|exts| {
                    return exts
                        .iter()
                        .map(|e| return e.trim_start_matches('.').to_string())
                        .collect();
                })
                .unwrap_or(defaults.extensions),
            strategy: raw.strategy.unwrap_or(defaults.strategy),
        });
    }

    /// Whether a file name has one of the configured extensions, ignoring case.
    pub fn is_candidate(&self, path: &Path) -> bool {
        let Some(ext) = path.extension().and_then(|e| return e.to_str()) else {
            return false;
        };
        return self.extensions.iter().any(|want| return want.eq_ignore_ascii_case(ext));
    }

    /// Check whether a root-relative path should be processed.
    /// A path is skipped if it starts with any exclude pattern.
    pub fn should_scan(&self, relative_path: &str) -> bool {
        return !self.exclude.iter().any(|p| return relative_path.starts_with(p.as_str()));
    }
}

#[cfg(test)]
#[allow(clippy::missing_panics_doc, reason = "tests")]
mod tests {
    use super::*;

    #[test]
    fn defaults_select_html_and_htm_in_any_case() {
        let config = Config::default();
        assert!(config.is_candidate(Path::new("index.html")));
        assert!(config.is_candidate(Path::new("OLD/INDEX.HTM")));
        assert!(config.is_candidate(Path::new("page.Html")));
        assert!(!config.is_candidate(Path::new("style.css")));
        assert!(!config.is_candidate(Path::new("html")));
    }

    #[test]
    fn parses_partial_config_over_defaults() {
        let config = Config::parse("exclude = [\"vendor/\"]\nstrategy = \"literal\"\n").unwrap();
        assert_eq!(config.strategy, ReplaceStrategy::Literal);
        assert_eq!(config.attributes, vec!["src".to_string(), "href".to_string()]);
        assert!(!config.should_scan("vendor/lib/index.html"));
        assert!(config.should_scan("docs/index.html"));
    }

    #[test]
    fn extensions_accept_leading_dot() {
        let config = Config::parse("extensions = [\".xhtml\"]").unwrap();
        assert!(config.is_candidate(Path::new("a.XHTML")));
        assert!(!config.is_candidate(Path::new("a.html")));
    }

    #[test]
    fn rejects_unknown_keys() {
        assert!(matches!(Config::parse("colour = \"red\""), Err(Error::TomlDe(_))));
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(dir.path()).unwrap();
        assert_eq!(config.strategy, ReplaceStrategy::Span);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE), "strategy = [").unwrap();
        assert!(Config::load(dir.path()).is_err());
    }
}
