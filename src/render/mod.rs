//! 页面渲染
//!
//! 记录 -> `PageView`（过滤、注册表关联、嵌入播放器）-> 带主题 CSS 的 HTML。

pub mod embed;
pub mod html;
pub mod template;
pub mod view;

pub use embed::{is_spotify_url, resolve_spotify_embed};
pub use html::{
    PageAssets, escape_html, render_not_found, render_page, render_presave, render_unavailable,
};
pub use template::Template;
pub use view::{LinkButton, Media, PageView, PresaveStatus, PresaveView, platform_target};

use crate::storage::{LinkRecord, Presave};

/// 记录直接渲染为完整页面
pub fn render_link(record: &LinkRecord) -> String {
    render_page(&PageView::build(record))
}

pub fn render_presave_page(presave: &Presave, status: PresaveStatus) -> String {
    render_presave(&PresaveView::build(presave, status))
}
