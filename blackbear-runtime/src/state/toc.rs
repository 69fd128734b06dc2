use std::cell::OnceCell;
use std::collections::BTreeMap;

use super::model::{Page, PageKind, SiteContext, ThemeConfig};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TocConfig {
    pub title: String,
    pub content: Option<String>,
    pub options: BTreeMap<String, String>,
}

/// Decides whether a page renders a table of contents.
#[derive(Debug)]
pub struct TocState<'a> {
    theme: &'a ThemeConfig,
    page: &'a Page,
    kind: PageKind,
    show: OnceCell<bool>,
}

impl<'a> TocState<'a> {
    pub fn new(theme: &'a ThemeConfig, page: &'a Page, kind: PageKind) -> Self {
        Self {
            theme,
            page,
            kind,
            show: OnceCell::new(),
        }
    }

    pub fn should_show(&self) -> bool {
        *self.show.get_or_init(|| {
            self.kind != PageKind::Home
                && self.page.toc != Some(false)
                && self.theme.toc.is_enabled()
                && self.page.content.as_deref().is_some_and(has_heading)
        })
    }

    pub fn toc_config(&self, ctx: &dyn SiteContext) -> TocConfig {
        TocConfig {
            title: ctx.translate("posts.toc"),
            content: self.page.content.clone(),
            options: self.theme.toc.options(),
        }
    }
}

/// True if `html` contains an opening `<h1>`..`<h6>` tag.
pub fn has_heading(html: &str) -> bool {
    html.match_indices("<h").any(|(i, _)| {
        let rest = &html.as_bytes()[i + 2..];
        matches!(rest.first(), Some(b'1'..=b'6')) && rest[1..].contains(&b'>')
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::model::{StaticContext, TocSetting};

    fn article(content: &str) -> Page {
        Page {
            content: Some(content.to_string()),
            ..Default::default()
        }
    }

    fn toc_theme() -> ThemeConfig {
        ThemeConfig {
            toc: TocSetting::Enabled(true),
            ..Default::default()
        }
    }

    #[test]
    fn detects_headings() {
        assert!(has_heading("<p>x</p><h2 id=\"intro\">Intro</h2>"));
        assert!(has_heading("<h6>tiny</h6>"));
        assert!(!has_heading("<p>no headings</p><hr>"));
        assert!(!has_heading("<header>site</header>"));
        assert!(!has_heading("<H2>shouting</H2>"));
        assert!(!has_heading("<h7>nope</h7>"));
        assert!(!has_heading("ends with <h3"));
    }

    #[test]
    fn shown_for_post_with_headings() {
        let theme = toc_theme();
        let page = article("<h2>Setup</h2><p>...</p>");
        assert!(TocState::new(&theme, &page, PageKind::Post).should_show());
    }

    #[test]
    fn hidden_on_home_opt_out_disabled_theme_or_flat_content() {
        let theme = toc_theme();
        let page = article("<h2>Setup</h2>");
        assert!(!TocState::new(&theme, &page, PageKind::Home).should_show());

        let opted_out = Page {
            toc: Some(false),
            ..article("<h2>Setup</h2>")
        };
        assert!(!TocState::new(&theme, &opted_out, PageKind::Post).should_show());

        let plain = ThemeConfig::default();
        assert!(!TocState::new(&plain, &page, PageKind::Post).should_show());

        let flat = article("<p>just text</p>");
        assert!(!TocState::new(&theme, &flat, PageKind::Post).should_show());

        let empty = Page::default();
        assert!(!TocState::new(&theme, &empty, PageKind::Post).should_show());
    }

    #[test]
    fn config_uses_translated_title() {
        let theme = toc_theme();
        let page = article("<h1>A</h1>");
        let ctx = StaticContext::new("/").with_translation("posts.toc", "Contents");
        let config = TocState::new(&theme, &page, PageKind::Post).toc_config(&ctx);
        assert_eq!(config.title, "Contents");
        assert_eq!(config.content.as_deref(), Some("<h1>A</h1>"));
        assert!(config.options.is_empty());
    }
}
