use std::cell::OnceCell;

use super::model::{flag, present, Page, PageKind, ProviderTable, ThemeConfig};

/// Supported comment widgets, in the order they are preferred.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentKind {
    Disqus,
    Livere,
    Gitalk,
    Utterances,
    Cusdis,
    Changyan,
}

impl CommentKind {
    pub const PRIORITY: [CommentKind; 6] = [
        CommentKind::Disqus,
        CommentKind::Livere,
        CommentKind::Gitalk,
        CommentKind::Utterances,
        CommentKind::Cusdis,
        CommentKind::Changyan,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CommentKind::Disqus => "disqus",
            CommentKind::Livere => "livere",
            CommentKind::Gitalk => "gitalk",
            CommentKind::Utterances => "utterances",
            CommentKind::Cusdis => "cusdis",
            CommentKind::Changyan => "changyan",
        }
    }

    /// Element id the widget mounts into.
    pub fn container_id(&self) -> &'static str {
        match self {
            CommentKind::Disqus => "disqus_thread",
            CommentKind::Livere => "lv-container",
            CommentKind::Gitalk => "gitalk-container",
            CommentKind::Utterances => "utterances-container",
            CommentKind::Cusdis => "cusdis_thread",
            CommentKind::Changyan => "SOHUCS",
        }
    }

    /// Provider settings if the theme configures this widget.
    fn configured(&self, theme: &ThemeConfig) -> Option<ProviderTable> {
        let single = |key: &str, value: &Option<String>| {
            value
                .as_deref()
                .filter(|v| !v.trim().is_empty())
                .map(|v| ProviderTable::from([(key.to_string(), v.to_string())]))
        };

        match self {
            CommentKind::Disqus => single("shortname", &theme.disqus_shortname),
            CommentKind::Livere => single("datauid", &theme.livere_datauid),
            CommentKind::Gitalk => theme.gitalk.clone().filter(|t| flag(t, "enable")),
            CommentKind::Utterances => theme.utterances.clone().filter(|t| flag(t, "enable")),
            CommentKind::Cusdis => theme.cusdis.clone().filter(|t| present(t, "app_id")),
            CommentKind::Changyan => theme
                .changyan
                .clone()
                .filter(|t| present(t, "appid") && present(t, "appkey")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentSystem {
    pub kind: CommentKind,
    pub container_id: &'static str,
    pub config: ProviderTable,
}

/// Decides whether and which comment widget a page gets.
#[derive(Debug)]
pub struct CommentState<'a> {
    theme: &'a ThemeConfig,
    page: &'a Page,
    kind: PageKind,
    available: OnceCell<Vec<CommentSystem>>,
}

impl<'a> CommentState<'a> {
    pub fn new(theme: &'a ThemeConfig, page: &'a Page, kind: PageKind) -> Self {
        Self {
            theme,
            page,
            kind,
            available: OnceCell::new(),
        }
    }

    pub fn should_show(&self) -> bool {
        self.kind != PageKind::Home && self.page.comments
    }

    /// Every configured widget, highest priority first.
    pub fn available_systems(&self) -> &[CommentSystem] {
        self.available.get_or_init(|| {
            CommentKind::PRIORITY
                .iter()
                .filter_map(|kind| {
                    kind.configured(self.theme).map(|config| CommentSystem {
                        kind: *kind,
                        container_id: kind.container_id(),
                        config,
                    })
                })
                .collect()
        })
    }

    pub fn preferred_system(&self) -> Option<&CommentSystem> {
        self.available_systems().first()
    }
}
