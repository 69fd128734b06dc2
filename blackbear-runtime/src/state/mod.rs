//! Decisions a page template needs: whether to show comments or a TOC,
//! which social links to render, the document title, where the TOC sits
//! while scrolling and so on.
//!
//! Everything is derived from explicit config and page objects; routing and
//! i18n come in through [`PageKind`] and [`SiteContext`].

mod comments;
mod model;
mod page;
mod scroll;
mod site;
mod social;
mod toc;

pub use comments::{CommentKind, CommentState, CommentSystem};
pub use model::{
    ArchiveScope, FeedConfig, LeanCloudConfig, Page, PageKind, PageLink, ProviderTable,
    RssSetting, SiteConfig, SiteContext, StaticContext, ThemeConfig, TocSetting,
};
pub use page::{is_menu_active, menu_title, PageState, Pagination, PostMeta};
pub use scroll::{
    active_toc_link, show_back_to_top, TocLayout, TocPosition, BACK_TO_TOP_THRESHOLD,
    HEADER_OFFSET, TOC_SPACING,
};
pub use site::{RssFeed, SiteFeatures};
pub use social::{SocialLink, SocialState};
pub use toc::{has_heading, TocConfig, TocState};

/// All per-page state helpers for one render.
#[derive(Debug)]
pub struct StateManagers<'a> {
    pub comments: CommentState<'a>,
    pub toc: TocState<'a>,
    pub social: SocialState<'a>,
    pub site: SiteFeatures<'a>,
    pub page: PageState<'a>,
}

impl<'a> StateManagers<'a> {
    pub fn new(theme: &'a ThemeConfig, site: &'a SiteConfig, page: &'a Page, kind: PageKind) -> Self {
        Self {
            comments: CommentState::new(theme, page, kind),
            toc: TocState::new(theme, page, kind),
            social: SocialState::new(theme),
            site: SiteFeatures::new(theme, site),
            page: PageState::new(page, site, kind),
        }
    }

    pub fn from_settings(settings: &'a crate::Settings, page: &'a Page, kind: PageKind) -> Self {
        Self::new(&settings.theme, &settings.site, page, kind)
    }
}
