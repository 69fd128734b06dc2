use super::model::{RssSetting, SiteConfig, SiteContext, ThemeConfig};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RssFeed {
    pub path: String,
    pub title: String,
}

/// Site-wide feature switches derived from the theme config.
#[derive(Debug, Clone, Copy)]
pub struct SiteFeatures<'a> {
    theme: &'a ThemeConfig,
    site: &'a SiteConfig,
}

impl<'a> SiteFeatures<'a> {
    pub fn new(theme: &'a ThemeConfig, site: &'a SiteConfig) -> Self {
        Self { theme, site }
    }

    pub fn fancybox(&self) -> bool {
        self.theme.fancybox
    }

    pub fn latex(&self) -> bool {
        self.theme.latex
    }

    /// LeanCloud visit counting needs both the app id and key.
    pub fn leancloud(&self) -> bool {
        let filled = |v: &Option<String>| v.as_deref().is_some_and(|s| !s.trim().is_empty());
        filled(&self.theme.leancloud.app_id) && filled(&self.theme.leancloud.app_key)
    }

    /// `"default"` (or `true`) follows the site's feed path, any other string
    /// is the feed path itself.
    pub fn rss(&self, ctx: &dyn SiteContext) -> Option<RssFeed> {
        let site_feed = || {
            self.site
                .feed
                .as_ref()
                .and_then(|feed| feed.path.clone())
                .filter(|path| !path.is_empty())
        };

        let path = match &self.theme.rss {
            RssSetting::Enabled(false) => None,
            RssSetting::Enabled(true) => site_feed(),
            RssSetting::Path(path) if path == "default" => site_feed().or_else(|| Some(path.clone())),
            RssSetting::Path(path) if path.is_empty() => None,
            RssSetting::Path(path) => Some(path.clone()),
        }?;

        Some(RssFeed {
            path,
            title: ctx.translate("rss_feed"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::model::{FeedConfig, LeanCloudConfig, StaticContext};

    fn site_with_feed(path: Option<&str>) -> SiteConfig {
        SiteConfig {
            feed: Some(FeedConfig {
                path: path.map(str::to_string),
            }),
            ..Default::default()
        }
    }

    #[test]
    fn rss_default_uses_site_feed_path() {
        let theme = ThemeConfig {
            rss: RssSetting::Path("default".into()),
            ..Default::default()
        };
        let site = site_with_feed(Some("atom.xml"));
        let ctx = StaticContext::new("/").with_translation("rss_feed", "RSS");
        let feed = SiteFeatures::new(&theme, &site).rss(&ctx).unwrap();
        assert_eq!(feed, RssFeed { path: "atom.xml".into(), title: "RSS".into() });
    }

    #[test]
    fn rss_default_without_feed_keeps_literal_path() {
        let theme = ThemeConfig {
            rss: RssSetting::Path("default".into()),
            ..Default::default()
        };
        let site = SiteConfig::default();
        let ctx = StaticContext::new("/");
        assert_eq!(SiteFeatures::new(&theme, &site).rss(&ctx).unwrap().path, "default");
    }

    #[test]
    fn rss_explicit_path_and_disabled() {
        let site = site_with_feed(Some("atom.xml"));
        let ctx = StaticContext::new("/");

        let custom = ThemeConfig {
            rss: RssSetting::Path("/feed.xml".into()),
            ..Default::default()
        };
        assert_eq!(SiteFeatures::new(&custom, &site).rss(&ctx).unwrap().path, "/feed.xml");

        let off = ThemeConfig::default();
        assert!(SiteFeatures::new(&off, &site).rss(&ctx).is_none());
    }

    #[test]
    fn leancloud_needs_both_credentials() {
        let site = SiteConfig::default();
        let mut theme = ThemeConfig {
            leancloud: LeanCloudConfig {
                app_id: Some("id".into()),
                app_key: None,
            },
            ..Default::default()
        };
        assert!(!SiteFeatures::new(&theme, &site).leancloud());

        theme.leancloud.app_key = Some("key".into());
        assert!(SiteFeatures::new(&theme, &site).leancloud());
    }
}
