//! HTML 输出
//!
//! 页面骨架和主题 CSS 通过 rust-embed 内嵌；记录中的文本全部转义，
//! 只有 http(s) URL 会写进 href/src。

use std::collections::HashMap;

use rust_embed::Embed;
use tracing::warn;

use super::template::Template;
use super::view::{LinkButton, Media, PageView, PresaveStatus, PresaveView};
use crate::utils::url_validator::is_safe_http_url;

#[derive(Embed)]
#[folder = "assets/"]
pub struct PageAssets;

fn asset_text(path: &str) -> String {
    match PageAssets::get(path) {
        Some(file) => String::from_utf8_lossy(&file.data).into_owned(),
        None => {
            warn!("Embedded asset missing: {}", path);
            String::new()
        }
    }
}

pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// 单遍替换 %KEY% 占位符，插入的内容不会再被扫描
fn fill(skeleton: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(skeleton.len() * 2);
    let mut rest = skeleton;

    while let Some(start) = rest.find('%') {
        out.push_str(&rest[..start]);
        let after = &rest[start + 1..];
        let key_end = after.find('%');
        match key_end.and_then(|end| {
            let key = &after[..end];
            values.iter().find(|(k, _)| *k == key).map(|(_, v)| (end, *v))
        }) {
            Some((end, value)) => {
                out.push_str(value);
                rest = &after[end + 1..];
            }
            None => {
                out.push('%');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

fn stylesheet(template: Template) -> String {
    let mut css = asset_text("base.css");
    css.push('\n');
    css.push_str(&asset_text(&template.stylesheet()));
    css
}

fn render_media(media: &Media) -> String {
    match media {
        Media::Embed(src) => format!(
            r#"<iframe class="player" src="{}" width="100%" height="352" frameborder="0" allow="autoplay; clipboard-write; encrypted-media; fullscreen; picture-in-picture" loading="lazy"></iframe>"#,
            escape_html(src)
        ),
        Media::InvalidEmbed => {
            r#"<p class="notice notice-invalid">Invalid Spotify URL</p>"#.to_string()
        }
        Media::Cover(src) if is_safe_http_url(src) => format!(
            r#"<img class="cover" src="{}" alt="Cover art" loading="lazy">"#,
            escape_html(src)
        ),
        Media::Cover(_) | Media::None => String::new(),
    }
}

fn render_icon(button: &LinkButton) -> String {
    match button.icon {
        Some(icon) => format!(
            r#"<span class="icon icon-{}" aria-hidden="true">{}</span>"#,
            icon,
            escape_html(&button.name.chars().take(1).collect::<String>())
        ),
        None => String::new(),
    }
}

fn render_platforms(slug: &str, buttons: &[LinkButton]) -> String {
    let slug = urlencoding::encode(slug);
    let mut seen: HashMap<&str, usize> = HashMap::new();
    buttons
        .iter()
        .map(|b| {
            // 同一平台出现多次时用 ?n= 区分
            let nth = seen.entry(b.platform_id.as_str()).or_insert(0);
            let query = if *nth > 0 {
                format!("?n={}", nth)
            } else {
                String::new()
            };
            *nth += 1;
            format!(
                r#"<a class="platform-button{}" href="/{}/go/{}{}" style="--brand: {}">{}<span class="label">{}</span></a>"#,
                if b.icon.is_none() { " text-only" } else { "" },
                slug,
                urlencoding::encode(&b.platform_id),
                query,
                b.color,
                render_icon(b),
                escape_html(b.name)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_socials(buttons: &[LinkButton]) -> String {
    buttons
        .iter()
        .filter(|b| is_safe_http_url(&b.url))
        .map(|b| {
            format!(
                r#"<a class="social{}" href="{}" target="_blank" rel="noopener noreferrer" aria-label="{}" style="--brand: {}">{}<span class="label">{}</span></a>"#,
                if b.icon.is_none() { " text-only" } else { "" },
                escape_html(&b.url),
                escape_html(b.name),
                b.color,
                render_icon(b),
                escape_html(b.name)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_bio(bio: &str) -> String {
    let bio = bio.trim();
    if bio.is_empty() {
        return String::new();
    }
    format!(
        r#"<p class="bio">{}</p>"#,
        escape_html(bio).replace('\n', "<br>")
    )
}

fn render_avatar(avatar: Option<&str>) -> String {
    match avatar {
        Some(src) if is_safe_http_url(src) => format!(
            r#"<img class="avatar" src="{}" alt="" loading="lazy">"#,
            escape_html(src)
        ),
        _ => String::new(),
    }
}

fn page_title(artist: &str, title: &str) -> String {
    match (artist.trim(), title.trim()) {
        ("", "") => "smartlink".to_string(),
        (a, "") => escape_html(a),
        ("", t) => escape_html(t),
        (a, t) => format!("{} - {}", escape_html(t), escape_html(a)),
    }
}

/// 渲染 smart link 页面
pub fn render_page(view: &PageView) -> String {
    let contact = match &view.contact {
        Some((text, url)) if is_safe_http_url(url) => format!(
            r#"<a class="contact-button" href="{}" target="_blank" rel="noopener noreferrer">{}</a>"#,
            escape_html(url),
            escape_html(text)
        ),
        _ => String::new(),
    };

    fill(
        &asset_text("page.html"),
        &[
            ("PAGE_TITLE", &page_title(&view.artist_name, &view.title)),
            ("STYLES", &stylesheet(view.template)),
            ("THEME", view.template.id()),
            ("AVATAR", &render_avatar(view.avatar_url.as_deref())),
            ("ARTIST", &escape_html(&view.artist_name)),
            ("TITLE", &escape_html(&view.title)),
            ("MEDIA", &render_media(&view.media)),
            ("PLATFORMS", &render_platforms(&view.slug, &view.platforms)),
            ("BIO", &render_bio(&view.bio)),
            ("SOCIALS", &render_socials(&view.socials)),
            ("CONTACT", &contact),
        ],
    )
}

/// 渲染预存页面
pub fn render_presave(view: &PresaveView) -> String {
    let release = view
        .release_date
        .map(|d| {
            format!(
                r#"<p class="release-date">Out {}</p>"#,
                d.format("%B %-d, %Y")
            )
        })
        .unwrap_or_default();

    let status = match view.status {
        PresaveStatus::Pending => String::new(),
        PresaveStatus::Saved => {
            r#"<p class="notice notice-ok">Pre-saved! It will land in your library on release day.</p>"#
                .to_string()
        }
        PresaveStatus::Failed => {
            r#"<p class="notice notice-invalid">Spotify did not confirm the pre-save. Please try again.</p>"#
                .to_string()
        }
    };

    let action = format!(
        r#"<a class="platform-button presave-button" href="/presave/{}/authorize" style="--brand: #1DB954"><span class="icon icon-spotify" aria-hidden="true">S</span><span class="label">Pre-save on Spotify</span></a>"#,
        urlencoding::encode(&view.slug)
    );

    fill(
        &asset_text("presave.html"),
        &[
            ("PAGE_TITLE", &page_title(&view.artist_name, &view.title)),
            ("STYLES", &stylesheet(view.template)),
            ("THEME", view.template.id()),
            ("ARTIST", &escape_html(&view.artist_name)),
            ("TITLE", &escape_html(&view.title)),
            ("MEDIA", &render_media(&view.media)),
            ("RELEASE", &release),
            ("STATUS", &status),
            ("ACTION", &action),
        ],
    )
}

fn render_error_page(heading: &str, message: &str) -> String {
    fill(
        &asset_text("not_found.html"),
        &[
            ("STYLES", &stylesheet(Template::Classic)),
            ("HEADING", heading),
            ("MESSAGE", message),
        ],
    )
}

pub fn render_not_found() -> String {
    render_error_page("404", "This page does not exist or is not public.")
}

/// 存储不可用时的 503 页面
pub fn render_unavailable() -> String {
    render_error_page("503", "This page is temporarily unavailable. Please try again shortly.")
}
