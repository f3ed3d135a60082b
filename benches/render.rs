//! 页面渲染性能
//!
//! 公开页面每次请求都会重新渲染，这里测量单页 HTML 生成的开销。

use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};

use smartlink::render::{PresaveStatus, render_link, render_presave_page};
use smartlink::storage::{LinkRecord, PlatformLink, Presave, SocialLink};

fn sample_link() -> LinkRecord {
    let mut record = LinkRecord::new("bench-id", "bench-owner");
    record.slug = "the-band".to_string();
    record.artist_name = "The Band & <Friends>".to_string();
    record.title = "Debut".to_string();
    record.bio = "Four people, one garage.".to_string();
    record.player_url = Some("https://open.spotify.com/album/1DFixLWuPkv3KT3TnV35m3".to_string());
    record.platforms = [
        ("spotify", "https://open.spotify.com/album/1DFixLWuPkv3KT3TnV35m3"),
        ("apple_music", "https://music.apple.com/us/album/1"),
        ("deezer", "https://www.deezer.com/album/1"),
        ("youtube_music", "https://music.youtube.com/playlist?list=1"),
        ("tidal", "https://tidal.com/album/1"),
        ("unknown-platform", "https://example.com/1"),
    ]
    .into_iter()
    .map(|(id, url)| PlatformLink {
        platform_id: id.to_string(),
        url: url.to_string(),
    })
    .collect();
    record.socials = vec![
        SocialLink {
            platform_id: "instagram".to_string(),
            url: "https://instagram.com/theband".to_string(),
        },
        SocialLink {
            platform_id: "tiktok".to_string(),
            url: "https://tiktok.com/@theband".to_string(),
        },
    ];
    record
}

fn bench_render_link(c: &mut Criterion) {
    let mut group = c.benchmark_group("render");

    let record = sample_link();
    group.bench_function("link_page", |b| {
        b.iter(|| render_link(black_box(&record)))
    });

    for template in ["classic", "neon", "does-not-exist"] {
        let mut themed = sample_link();
        themed.template = template.to_string();
        group.bench_function(format!("link_page_{}", template), |b| {
            b.iter(|| render_link(black_box(&themed)))
        });
    }

    let now = chrono::Utc::now();
    let presave = Presave {
        id: "bench-presave".to_string(),
        owner_id: "bench-owner".to_string(),
        slug: "second".to_string(),
        artist_name: "The Band".to_string(),
        title: "Second".to_string(),
        release_date: Some(now),
        cover_url: Some("https://example.com/cover.jpg".to_string()),
        spotify_url: Some("https://open.spotify.com/album/1DFixLWuPkv3KT3TnV35m3".to_string()),
        template: "classic".to_string(),
        is_public: true,
        created_at: now,
        updated_at: now,
    };
    group.bench_function("presave_page", |b| {
        b.iter(|| render_presave_page(black_box(&presave), PresaveStatus::Pending))
    });

    group.finish();
}

criterion_group!(benches, bench_render_link);
criterion_main!(benches);
