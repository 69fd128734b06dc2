use blackbear::state::{Page, PageKind, StaticContext};
use blackbear::{Settings, StateManagers};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt().init();

    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "config/blackbear.yaml".to_string());
    let settings = if path.ends_with(".toml") {
        Settings::from_toml(&path)?
    } else {
        Settings::from_yaml(&path)?
    };

    let ctx = StaticContext::for_site(&settings.site)
        .with_translation("posts.toc", "Contents")
        .with_translation("rss_feed", "RSS Feed")
        .with_translation("menu.archives", "Archives");

    let page = Page {
        title: Some("Hibernation notes".to_string()),
        layout: Some("post".to_string()),
        content: Some("<h2>Before winter</h2><p>Eat.</p><h2>After</h2><p>Eat more.</p>".to_string()),
        ..Default::default()
    };
    let state = StateManagers::from_settings(&settings, &page, PageKind::Post);

    println!("title:     {}", state.page.title(&ctx));
    println!("toc:       {}", state.toc.should_show());
    println!("comments:  {}", state.comments.should_show());
    if let Some(system) = state.comments.preferred_system() {
        println!("  widget:  {} (#{})", system.kind.as_str(), system.container_id);
    }
    for link in state.social.links() {
        println!("social:    {} -> {}", link.title, link.url);
    }
    if let Some(feed) = state.site.rss(&ctx) {
        println!("rss:       {} ({})", feed.path, feed.title);
    }
    let meta = state.page.post_meta();
    println!("reading:   {} words, {} min", meta.word_count, meta.reading_time);
    Ok(())
}
