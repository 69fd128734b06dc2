use super::model::{ArchiveScope, Page, PageKind, SiteConfig, SiteContext};

/// Words per minute used for the reading-time estimate.
const READING_SPEED: usize = 200;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pagination {
    pub prev_link: Option<String>,
    pub prev_title: Option<String>,
    pub next_link: Option<String>,
    pub next_title: Option<String>,
}

impl Pagination {
    pub fn has_prev(&self) -> bool {
        self.prev_link.is_some()
    }

    pub fn has_next(&self) -> bool {
        self.next_link.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostMeta {
    /// `YYYY-MM-DD`
    pub date: Option<String>,
    pub author: Option<String>,
    pub categories: Vec<String>,
    pub tags: Vec<String>,
    pub word_count: usize,
    /// Minutes, rounded up.
    pub reading_time: usize,
}

/// Title and post-level decisions for the current page.
#[derive(Debug, Clone, Copy)]
pub struct PageState<'a> {
    page: &'a Page,
    site: &'a SiteConfig,
    kind: PageKind,
}

impl<'a> PageState<'a> {
    pub fn new(page: &'a Page, site: &'a SiteConfig, kind: PageKind) -> Self {
        Self { page, site, kind }
    }

    /// Document `<title>`.
    pub fn title(&self, ctx: &dyn SiteContext) -> String {
        let site = &self.site.title;
        let page_title = self.page.title.as_deref().filter(|t| !t.is_empty());

        match self.kind {
            PageKind::Home => site.clone(),
            PageKind::Archive(scope) => self.archive_title(scope, ctx),
            PageKind::Category => {
                format!("{} · {}", self.page.category.as_deref().unwrap_or_default(), site)
            }
            PageKind::Tag => format!("{} · {}", self.page.tag.as_deref().unwrap_or_default(), site),
            PageKind::Page => match page_title {
                Some(title) => format!("{} · {}", menu_title(title, ctx), site),
                None => site.clone(),
            },
            PageKind::Post => match page_title {
                Some(title) => format!("{} - {}", title, site),
                None => site.clone(),
            },
        }
    }

    fn archive_title(&self, scope: ArchiveScope, ctx: &dyn SiteContext) -> String {
        let base = ctx.translate("menu.archives");
        let site = &self.site.title;
        let year = self.page.year.map(|y| y.to_string()).unwrap_or_default();

        match scope {
            ArchiveScope::Month => {
                let month = self.page.month.map(|m| m.to_string()).unwrap_or_default();
                format!("{} - {}/{} · {}", base, year, month, site)
            }
            ArchiveScope::Year => format!("{} - {} · {}", base, year, site),
            ArchiveScope::All => format!("{} · {}", base, site),
        }
    }

    pub fn is_post_page(&self) -> bool {
        self.kind != PageKind::Home && self.page.layout.as_deref() == Some("post")
    }

    pub fn show_post_meta(&self) -> bool {
        self.is_post_page()
    }

    /// Summary HTML for index listings.
    pub fn excerpt(&self) -> String {
        if let Some(description) = self.page.description.as_deref().filter(|d| !d.is_empty()) {
            return format!("<p>{}</p>", description);
        }
        self.page.excerpt.clone().unwrap_or_default()
    }

    pub fn show_excerpt(&self) -> bool {
        [&self.page.description, &self.page.excerpt]
            .iter()
            .any(|v| v.as_deref().is_some_and(|s| !s.is_empty()))
    }

    pub fn pagination(&self, ctx: &dyn SiteContext) -> Option<Pagination> {
        let (prev, next) = (self.page.prev.as_ref(), self.page.next.as_ref());
        if prev.is_none() && next.is_none() {
            return None;
        }

        Some(Pagination {
            prev_link: prev.map(|p| ctx.url_for(&p.path)),
            prev_title: prev.map(|p| p.title.clone()),
            next_link: next.map(|n| ctx.url_for(&n.path)),
            next_title: next.map(|n| n.title.clone()),
        })
    }

    pub fn post_meta(&self) -> PostMeta {
        let word_count = self
            .page
            .content
            .as_deref()
            .map_or(0, |c| c.split_whitespace().count());

        PostMeta {
            date: self.page.date.map(|d| d.format("%Y-%m-%d").to_string()),
            author: self.page.author.clone().or_else(|| self.site.author.clone()),
            categories: self.page.categories.clone(),
            tags: self.page.tags.clone(),
            word_count,
            reading_time: word_count.div_ceil(READING_SPEED),
        }
    }
}

/// Localized menu label for `name`, or `name` itself if there is none.
pub fn menu_title(name: &str, ctx: &dyn SiteContext) -> String {
    let key = format!("menu.{}", name.to_lowercase());
    let translated = ctx.translate(&key);
    if translated == key {
        name.to_string()
    } else {
        translated
    }
}

/// Whether the menu entry for `path` links to the page at `current_path`.
/// Directory-style entries also match their `index.html`.
pub fn is_menu_active(current_path: &str, path: &str) -> bool {
    current_path == path
        || current_path
            .strip_prefix(path)
            .is_some_and(|rest| rest == "index.html")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::model::{PageLink, StaticContext};
    use chrono::DateTime;

    fn site() -> SiteConfig {
        SiteConfig {
            title: "Bear Notes".into(),
            author: Some("grizzly".into()),
            ..Default::default()
        }
    }

    fn ctx() -> StaticContext {
        StaticContext::new("/blog/")
            .with_translation("menu.archives", "Archives")
            .with_translation("menu.about", "About Me")
    }

    fn titled(title: &str) -> Page {
        Page {
            title: Some(title.into()),
            ..Default::default()
        }
    }

    #[test]
    fn titles_per_page_kind() {
        let site = site();
        let ctx = ctx();
        let title = |page: &Page, kind| PageState::new(page, &site, kind).title(&ctx);

        assert_eq!(title(&titled("ignored"), PageKind::Home), "Bear Notes");
        assert_eq!(title(&titled("Hibernation"), PageKind::Post), "Hibernation - Bear Notes");
        assert_eq!(title(&titled("About"), PageKind::Page), "About Me · Bear Notes");
        assert_eq!(title(&titled("Links"), PageKind::Page), "Links · Bear Notes");
        assert_eq!(title(&Page::default(), PageKind::Post), "Bear Notes");

        let category = Page {
            category: Some("Rust".into()),
            ..Default::default()
        };
        assert_eq!(title(&category, PageKind::Category), "Rust · Bear Notes");

        let tag = Page {
            tag: Some("async".into()),
            ..Default::default()
        };
        assert_eq!(title(&tag, PageKind::Tag), "async · Bear Notes");
    }

    #[test]
    fn archive_titles() {
        let site = site();
        let ctx = ctx();
        let page = Page {
            year: Some(2024),
            month: Some(3),
            ..Default::default()
        };
        let title = |scope| PageState::new(&page, &site, PageKind::Archive(scope)).title(&ctx);

        assert_eq!(title(ArchiveScope::Month), "Archives - 2024/3 · Bear Notes");
        assert_eq!(title(ArchiveScope::Year), "Archives - 2024 · Bear Notes");
        assert_eq!(title(ArchiveScope::All), "Archives · Bear Notes");
    }

    #[test]
    fn post_page_detection() {
        let site = site();
        let post = Page {
            layout: Some("post".into()),
            ..Default::default()
        };
        assert!(PageState::new(&post, &site, PageKind::Post).show_post_meta());
        assert!(!PageState::new(&post, &site, PageKind::Home).is_post_page());
        assert!(!PageState::new(&Page::default(), &site, PageKind::Page).is_post_page());
    }

    #[test]
    fn menu_entry_matches_path_or_its_index() {
        assert!(is_menu_active("/blog/about/", "/blog/about/"));
        assert!(is_menu_active("/blog/about/index.html", "/blog/about/"));
        assert!(!is_menu_active("/blog/about/team/", "/blog/about/"));
        assert!(!is_menu_active("/blog/", "/blog/about/"));
    }

    #[test]
    fn excerpt_prefers_description() {
        let site = site();
        let page = Page {
            description: Some("Short".into()),
            excerpt: Some("<p>Long</p>".into()),
            ..Default::default()
        };
        let state = PageState::new(&page, &site, PageKind::Post);
        assert_eq!(state.excerpt(), "<p>Short</p>");
        assert!(state.show_excerpt());

        let bare = Page::default();
        let state = PageState::new(&bare, &site, PageKind::Post);
        assert_eq!(state.excerpt(), "");
        assert!(!state.show_excerpt());
    }

    #[test]
    fn pagination_links_go_through_url_for() {
        let site = site();
        let ctx = ctx();
        let page = Page {
            next: Some(PageLink {
                path: "2024/03/spring/".into(),
                title: "Spring".into(),
            }),
            ..Default::default()
        };
        let pagination = PageState::new(&page, &site, PageKind::Post)
            .pagination(&ctx)
            .unwrap();
        assert!(!pagination.has_prev());
        assert!(pagination.has_next());
        assert_eq!(pagination.next_link.as_deref(), Some("/blog/2024/03/spring/"));
        assert_eq!(pagination.next_title.as_deref(), Some("Spring"));

        assert!(PageState::new(&Page::default(), &site, PageKind::Post)
            .pagination(&ctx)
            .is_none());
    }

    #[test]
    fn post_meta_counts_words_and_falls_back_to_site_author() {
        let site = site();
        let words = vec!["honey"; 401].join(" ");
        let page = Page {
            date: Some(DateTime::parse_from_rfc3339("2024-03-09T22:15:00+08:00").unwrap()),
            content: Some(format!("  {}\n", words)),
            tags: vec!["bears".into()],
            ..Default::default()
        };
        let meta = PageState::new(&page, &site, PageKind::Post).post_meta();

        assert_eq!(meta.date.as_deref(), Some("2024-03-09"));
        assert_eq!(meta.author.as_deref(), Some("grizzly"));
        assert_eq!(meta.word_count, 401);
        assert_eq!(meta.reading_time, 3);
        assert_eq!(meta.tags, vec!["bears".to_string()]);
        assert!(meta.categories.is_empty());
    }

    #[test]
    fn empty_post_reads_instantly() {
        let site = site();
        let meta = PageState::new(&Page::default(), &site, PageKind::Post).post_meta();
        assert_eq!(meta.word_count, 0);
        assert_eq!(meta.reading_time, 0);
        assert_eq!(meta.date, None);
    }
}
