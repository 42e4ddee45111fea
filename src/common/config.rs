use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

/// Which documents the switcher lists when invoked.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListMode {
    /// Documents in the currently active group; falls back to the whole
    /// window when the active group is empty.
    ActiveGroup,
    /// All open documents in the window.
    Window,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SwitcherSettings {
    /// Appended to a candidate's primary label when the document has
    /// unsaved changes.
    pub mark_dirty_file_char: String,
    /// When true, the secondary label carries the path relative to the
    /// enclosing project root.
    pub show_full_file_path: bool,
    /// Alphabetize the candidate list. Absent and `false` both leave the
    /// list in window order.
    pub sort: Option<bool>,
}

impl Default for SwitcherSettings {
    fn default() -> Self {
        Self {
            mark_dirty_file_char: "*".to_string(),
            show_full_file_path: true,
            sort: None,
        }
    }
}

impl SwitcherSettings {
    pub fn sort_enabled(&self) -> bool {
        self.sort.unwrap_or(false)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub switcher: SwitcherSettings,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub settings: Settings,
}

impl Config {
    pub fn parse(contents: &str) -> anyhow::Result<Self> {
        toml::from_str(contents).context("failed to parse config")
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config at {}", path.display()))?;
        Self::parse(&contents)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn defaults_when_empty() {
        let config = Config::parse("").unwrap();
        assert_eq!(config.settings.switcher.mark_dirty_file_char, "*");
        assert!(config.settings.switcher.show_full_file_path);
        assert_eq!(config.settings.switcher.sort, None);
        assert!(!config.settings.switcher.sort_enabled());
    }

    #[test]
    fn parses_switcher_settings() {
        let config = Config::parse(
            r#"
            [settings.switcher]
            mark_dirty_file_char = "•"
            show_full_file_path = false
            sort = true
            "#,
        )
        .unwrap();
        let switcher = &config.settings.switcher;
        assert_eq!(switcher.mark_dirty_file_char, "•");
        assert!(!switcher.show_full_file_path);
        assert!(switcher.sort_enabled());
    }

    #[test]
    fn sort_false_is_distinct_from_absent_but_both_disable() {
        let absent = Config::parse("").unwrap();
        let explicit = Config::parse("[settings.switcher]\nsort = false\n").unwrap();
        assert_eq!(absent.settings.switcher.sort, None);
        assert_eq!(explicit.settings.switcher.sort, Some(false));
        assert!(!absent.settings.switcher.sort_enabled());
        assert!(!explicit.settings.switcher.sort_enabled());
    }

    #[test]
    fn list_mode_uses_snake_case() {
        #[derive(Deserialize)]
        struct Invocation {
            list_mode: ListMode,
        }
        let inv: Invocation = toml::from_str("list_mode = \"active_group\"").unwrap();
        assert_eq!(inv.list_mode, ListMode::ActiveGroup);
        let inv: Invocation = toml::from_str("list_mode = \"window\"").unwrap();
        assert_eq!(inv.list_mode, ListMode::Window);
    }
}
