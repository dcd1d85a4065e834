//! HTML email body.
//!
//! Content is inserted as-is; callers are trusted and nothing is escaped.

use super::provider::Message;
use super::version_gate::VersionState;
use crate::config::ApplicationConfig;

/// Content-ID under which the inline logo is attached
pub const LOGO_CID: &str = "logo-site.png";

const STYLE: &str = r#"<style>
  .notify-header {
    padding: 10px 0;
    border-bottom: 1px solid #f1f1f1;
    text-align: center;
  }
  .notify-header img {
    width: auto;
    height: 40px;
    object-fit: contain;
    vertical-align: middle;
  }
  .notify-update-tip {
    display: flex;
    justify-content: space-between;
    padding: 10px;
    font-size: 12px;
    background: #fff4e5;
    color: #663c00;
    text-decoration: none;
  }
  .notify-main {
    padding: 10px;
  }
  .notify-footer {
    padding: 10px 0;
    border-top: 1px solid #f1f1f1;
    text-align: center;
    font-size: 12px;
    color: #6e6e73;
  }
</style>"#;

/// Names shown in the header alt text and the footer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Branding {
    pub name: String,
    pub author: String,
    pub author_url: String,
}

impl From<&ApplicationConfig> for Branding {
    fn from(config: &ApplicationConfig) -> Self {
        Self {
            name: config.name.clone(),
            author: config.author.clone(),
            author_url: config.author_url.clone(),
        }
    }
}

/// Renders the email body for the current year
pub fn render(message: &Message, version: &VersionState, branding: &Branding) -> String {
    let year = jiff::Zoned::now().year();
    render_at_year(message, version, branding, year)
}

pub fn render_at_year(
    message: &Message,
    version: &VersionState,
    branding: &Branding,
    year: i16,
) -> String {
    let banner = if version.has_update {
        format!(
            r#"<a class="notify-update-tip" href="{url}" target="_blank"><span>{name} {latest} is available ›</span></a>"#,
            url = version.release_url,
            name = branding.name,
            latest = version.latest_version_label,
        )
    } else {
        String::new()
    };

    let body = if message.is_html() {
        message.content().to_string()
    } else {
        format!(r#"<pre style="margin: 0;">{}</pre>"#, message.content())
    };

    format!(
        r#"{STYLE}
<section>
  <header class="notify-header">
    <img src="cid:{LOGO_CID}" width="120" height="24" alt="{name}" />
  </header>
  {banner}
  <main class="notify-main">
    {body}
  </main>
  <footer class="notify-footer">
    <span>{name} v{current}</span> |
    <span>Copyright © {year} <a href="{author_url}" target="_blank">{author}</a></span>
  </footer>
</section>"#,
        name = branding.name,
        current = version.current_version_label,
        author = branding.author,
        author_url = branding.author_url,
    )
}
