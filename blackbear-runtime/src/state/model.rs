use chrono::{DateTime, FixedOffset};
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};

/// Free-form provider settings, passed through to the comment widget.
pub type ProviderTable = BTreeMap<String, String>;

pub(crate) fn flag(table: &ProviderTable, key: &str) -> bool {
    table.get(key).is_some_and(|v| v.trim().eq_ignore_ascii_case("true"))
}

pub(crate) fn present(table: &ProviderTable, key: &str) -> bool {
    table.get(key).is_some_and(|v| !v.trim().is_empty())
}

/// Theme section of the settings file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    pub disqus_shortname: Option<String>,
    pub livere_datauid: Option<String>,
    pub gitalk: Option<ProviderTable>,
    pub utterances: Option<ProviderTable>,
    pub cusdis: Option<ProviderTable>,
    pub changyan: Option<ProviderTable>,
    pub toc: TocSetting,
    pub social: BTreeMap<String, Option<String>>,
    pub fancybox: bool,
    pub latex: bool,
    pub leancloud: LeanCloudConfig,
    pub rss: RssSetting,
}

/// `toc: true` or a table of options (which also enables the TOC).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum TocSetting {
    Enabled(bool),
    Options(BTreeMap<String, String>),
}

impl Default for TocSetting {
    fn default() -> Self {
        TocSetting::Enabled(false)
    }
}

impl TocSetting {
    pub fn is_enabled(&self) -> bool {
        match self {
            TocSetting::Enabled(enabled) => *enabled,
            TocSetting::Options(_) => true,
        }
    }

    pub fn options(&self) -> BTreeMap<String, String> {
        match self {
            TocSetting::Enabled(_) => BTreeMap::new(),
            TocSetting::Options(options) => options.clone(),
        }
    }
}

/// `rss: false`, `rss: default` (use the site feed path) or an explicit path.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum RssSetting {
    Enabled(bool),
    Path(String),
}

impl Default for RssSetting {
    fn default() -> Self {
        RssSetting::Enabled(false)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LeanCloudConfig {
    pub app_id: Option<String>,
    pub app_key: Option<String>,
}

/// Site section of the settings file.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub title: String,
    pub author: Option<String>,
    pub root: String,
    pub feed: Option<FeedConfig>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: String::new(),
            author: None,
            root: "/".to_string(),
            feed: None,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    pub path: Option<String>,
}

/// Which kind of page is being rendered, as decided by the site generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageKind {
    Home,
    Archive(ArchiveScope),
    Category,
    Tag,
    /// A standalone page such as "About".
    Page,
    Post,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveScope {
    All,
    Year,
    Month,
}

/// Front matter and rendered content of the current page.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Page {
    pub title: Option<String>,
    pub layout: Option<String>,
    pub comments: bool,
    pub toc: Option<bool>,
    pub category: Option<String>,
    pub tag: Option<String>,
    pub year: Option<i32>,
    pub month: Option<u32>,
    pub date: Option<DateTime<FixedOffset>>,
    pub author: Option<String>,
    pub description: Option<String>,
    pub excerpt: Option<String>,
    pub content: Option<String>,
    pub categories: Vec<String>,
    pub tags: Vec<String>,
    pub prev: Option<PageLink>,
    pub next: Option<PageLink>,
}

impl Default for Page {
    fn default() -> Self {
        Self {
            title: None,
            layout: None,
            comments: true,
            toc: None,
            category: None,
            tag: None,
            year: None,
            month: None,
            date: None,
            author: None,
            description: None,
            excerpt: None,
            content: None,
            categories: Vec::new(),
            tags: Vec::new(),
            prev: None,
            next: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PageLink {
    pub path: String,
    pub title: String,
}

/// Services the site generator provides to the helpers.
pub trait SiteContext {
    /// Localized string for `key`; returns `key` itself when untranslated.
    fn translate(&self, key: &str) -> String;

    /// Public URL for a site-relative path.
    fn url_for(&self, path: &str) -> String;
}

/// [`SiteContext`] backed by a fixed translation table and the site root.
#[derive(Debug, Clone, Default)]
pub struct StaticContext {
    root: String,
    strings: HashMap<String, String>,
}

impl StaticContext {
    pub fn new(root: impl Into<String>) -> Self {
        let mut root = root.into();
        if !root.ends_with('/') {
            root.push('/');
        }
        Self {
            root,
            strings: HashMap::new(),
        }
    }

    pub fn for_site(site: &SiteConfig) -> Self {
        Self::new(site.root.clone())
    }

    pub fn with_translation(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.strings.insert(key.into(), value.into());
        self
    }
}

impl SiteContext for StaticContext {
    fn translate(&self, key: &str) -> String {
        self.strings
            .get(key)
            .cloned()
            .unwrap_or_else(|| key.to_string())
    }

    fn url_for(&self, path: &str) -> String {
        if path.contains("://") || path.starts_with('#') || path.starts_with("//") {
            return path.to_string();
        }
        format!("{}{}", self.root, path.trim_start_matches('/'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_for_prefixes_root_once() {
        let ctx = StaticContext::new("/blog");
        assert_eq!(ctx.url_for("/2024/01/hello/"), "/blog/2024/01/hello/");
        assert_eq!(ctx.url_for("tags/rust/"), "/blog/tags/rust/");
        assert_eq!(ctx.url_for("https://example.com/x"), "https://example.com/x");
        assert_eq!(ctx.url_for("#comments"), "#comments");
    }

    #[test]
    fn untranslated_keys_echo_back() {
        let ctx = StaticContext::new("/").with_translation("posts.toc", "Contents");
        assert_eq!(ctx.translate("posts.toc"), "Contents");
        assert_eq!(ctx.translate("menu.about"), "menu.about");
    }

    #[test]
    fn settings_toggles() {
        assert!(!TocSetting::default().is_enabled());
        let options: BTreeMap<_, _> = [("number".to_string(), "false".to_string())].into();
        assert!(TocSetting::Options(options).is_enabled());
        assert!(Page::default().comments);
    }
}
