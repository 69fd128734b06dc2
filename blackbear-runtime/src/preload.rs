use std::fmt;

/// The `as` attribute of a `<link rel="preload">`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreloadKind {
    Style,
    Script,
    Font,
    Fetch,
}

impl PreloadKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PreloadKind::Style => "style",
            PreloadKind::Script => "script",
            PreloadKind::Font => "font",
            PreloadKind::Fetch => "fetch",
        }
    }

    fn for_url(url: &str) -> Self {
        const FONT_SUFFIXES: [&str; 4] = [".woff", ".woff2", ".ttf", ".otf"];

        if url.ends_with(".css") {
            PreloadKind::Style
        } else if url.ends_with(".js") {
            PreloadKind::Script
        } else if FONT_SUFFIXES.iter().any(|s| url.ends_with(s)) {
            PreloadKind::Font
        } else {
            PreloadKind::Fetch
        }
    }
}

/// A resource worth fetching before the parser reaches it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreloadHint {
    pub href: String,
    pub kind: PreloadKind,
    pub crossorigin: Option<&'static str>,
}

impl PreloadHint {
    /// Fonts are always fetched anonymously, otherwise the browser discards
    /// the preloaded response.
    pub fn for_url(url: impl Into<String>) -> Self {
        let href = url.into();
        let kind = PreloadKind::for_url(&href);
        let crossorigin = (kind == PreloadKind::Font).then_some("anonymous");
        Self {
            href,
            kind,
            crossorigin,
        }
    }
}

pub fn preload_hints<I, U>(urls: I) -> Vec<PreloadHint>
where
    I: IntoIterator<Item = U>,
    U: Into<String>,
{
    urls.into_iter().map(PreloadHint::for_url).collect()
}

impl fmt::Display for PreloadHint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            r#"<link rel="preload" href="{}" as="{}""#,
            escape_attr(&self.href),
            self.kind.as_str()
        )?;
        if let Some(crossorigin) = self.crossorigin {
            write!(f, r#" crossorigin="{}""#, crossorigin)?;
        }
        f.write_str(">")
    }
}

fn escape_attr(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}
