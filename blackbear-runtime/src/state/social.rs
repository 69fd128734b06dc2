use std::cell::OnceCell;

use super::model::ThemeConfig;

/// Known platforms: name, icon class, profile URL prefix.
const PLATFORMS: [(&str, &str, &str); 8] = [
    ("github", "icon-github", "https://github.com/"),
    ("twitter", "icon-twitter", "https://twitter.com/"),
    ("facebook", "icon-facebook", "https://facebook.com/"),
    ("linkedin", "icon-linkedin", "https://linkedin.com/in/"),
    ("email", "icon-email", "mailto:"),
    ("weibo", "icon-weibo", "https://weibo.com/"),
    ("zhihu", "icon-zhihu", "https://zhihu.com/people/"),
    ("douban", "icon-douban", "https://douban.com/people/"),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SocialLink {
    pub platform: &'static str,
    pub username: String,
    pub icon: &'static str,
    pub url: String,
    pub title: String,
}

#[derive(Debug)]
pub struct SocialState<'a> {
    theme: &'a ThemeConfig,
    links: OnceCell<Vec<SocialLink>>,
}

impl<'a> SocialState<'a> {
    pub fn new(theme: &'a ThemeConfig) -> Self {
        Self {
            theme,
            links: OnceCell::new(),
        }
    }

    /// Links for every known platform with a non-blank username, in the fixed
    /// platform order. Unknown platforms in the config are ignored.
    pub fn links(&self) -> &[SocialLink] {
        self.links.get_or_init(|| {
            PLATFORMS
                .iter()
                .filter_map(|&(platform, icon, prefix)| {
                    let username = self.theme.social.get(platform)?.as_deref()?.trim();
                    if username.is_empty() {
                        return None;
                    }
                    Some(SocialLink {
                        platform,
                        username: username.to_string(),
                        icon,
                        url: format!("{}{}", prefix, username),
                        title: capitalize(platform),
                    })
                })
                .collect()
        })
    }

    pub fn has_links(&self) -> bool {
        !self.links().is_empty()
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
