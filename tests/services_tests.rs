//! 服务层集成测试：LinkService / PresaveService / DraftService / MetricsService

use std::sync::{Arc, Once};

use chrono::{Duration, Utc};
use tempfile::TempDir;

use smartlink::config::{StaticConfig, init_config};
use smartlink::errors::SmartlinkError;
use smartlink::runtime::lifetime::startup::StartupContext;
use smartlink::services::LinkService;
use smartlink::storage::{ClickEvent, LinkRecord, PlatformLink, Presave, SeaOrmStorage};
use smartlink::wizard::{DraftPatch, WizardStep};

static INIT: Once = Once::new();

fn init_static_config() {
    INIT.call_once(|| {
        init_config();
    });
}

async fn create_context() -> (StartupContext, TempDir) {
    init_static_config();
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("services_test.db");
    let db_url = format!("sqlite://{}?mode=rwc", db_path.display());

    let storage = Arc::new(
        SeaOrmStorage::new(&db_url, "sqlite")
            .await
            .expect("Failed to create storage"),
    );
    let ctx = StartupContext::from_storage(storage, &StaticConfig::default());
    (ctx, temp_dir)
}

fn spotify_link() -> PlatformLink {
    PlatformLink {
        platform_id: "spotify".to_string(),
        url: "https://open.spotify.com/track/4uLU6hMCjMI75M1A2tKUQC".to_string(),
    }
}

fn new_link(owner: &str, slug: &str) -> LinkRecord {
    let mut record = LinkRecord::new("", owner);
    record.slug = slug.to_string();
    record.artist_name = "The Band".to_string();
    record.title = "Debut".to_string();
    record.template = String::new();
    record.platforms = vec![spotify_link()];
    record
}

// =============================================================================
// LinkService
// =============================================================================

#[tokio::test]
async fn test_create_link_assigns_id_and_default_template() {
    let (ctx, _dir) = create_context().await;

    let created = ctx
        .link_service
        .create_link(new_link("owner-a", "  the-band "))
        .await
        .unwrap();

    assert!(!created.id.is_empty());
    assert_eq!(created.slug, "the-band");
    assert_eq!(created.template, "classic");

    let found = ctx.link_service.find_by_slug("the-band").await.unwrap();
    assert_eq!(found.map(|r| r.id), Some(created.id));
}

#[tokio::test]
async fn test_slug_conflict_rejected() {
    let (ctx, _dir) = create_context().await;
    ctx.link_service
        .create_link(new_link("owner-a", "taken"))
        .await
        .unwrap();

    let err = ctx
        .link_service
        .create_link(new_link("owner-b", "taken"))
        .await
        .unwrap_err();
    assert!(matches!(err, SmartlinkError::Conflict(_)));
}

#[tokio::test]
async fn test_invalid_records_rejected() {
    let (ctx, _dir) = create_context().await;

    let mut bad_slug = new_link("owner-a", "has space");
    bad_slug.title = "x".to_string();
    assert!(matches!(
        ctx.link_service.create_link(bad_slug).await,
        Err(SmartlinkError::Validation(_))
    ));

    let mut no_artist = new_link("owner-a", "no-artist");
    no_artist.artist_name = "   ".to_string();
    assert!(matches!(
        ctx.link_service.create_link(no_artist).await,
        Err(SmartlinkError::Validation(_))
    ));

    let mut bad_url = new_link("owner-a", "bad-url");
    bad_url.platforms[0].url = "javascript:alert(1)".to_string();
    assert!(matches!(
        ctx.link_service.create_link(bad_url).await,
        Err(SmartlinkError::Validation(_))
    ));

    assert_eq!(ctx.storage.count_links().await.unwrap(), 0);
}

#[tokio::test]
async fn test_update_changes_slug_and_invalidates_cache() {
    let (ctx, _dir) = create_context().await;
    let created = ctx
        .link_service
        .create_link(new_link("owner-a", "old-slug"))
        .await
        .unwrap();

    // 先让旧 slug 进入缓存
    assert!(ctx.link_service.find_by_slug("old-slug").await.unwrap().is_some());

    let mut changed = new_link("someone-else", "new-slug");
    changed.title = "Renamed".to_string();
    let updated = ctx
        .link_service
        .update_link(&created.id, changed)
        .await
        .unwrap();

    assert_eq!(updated.owner_id, "owner-a");
    assert_eq!(
        updated.created_at.timestamp(),
        created.created_at.timestamp()
    );
    assert!(ctx.link_service.find_by_slug("old-slug").await.unwrap().is_none());
    assert_eq!(
        ctx.link_service
            .find_by_slug("new-slug")
            .await
            .unwrap()
            .map(|r| r.title),
        Some("Renamed".to_string())
    );
}

#[tokio::test]
async fn test_delete_missing_link_is_not_found() {
    let (ctx, _dir) = create_context().await;
    assert!(matches!(
        ctx.link_service.delete_link("missing").await,
        Err(SmartlinkError::NotFound(_))
    ));
    assert!(matches!(
        ctx.link_service.get_link("missing").await,
        Err(SmartlinkError::NotFound(_))
    ));
}

#[tokio::test]
async fn test_negative_cache_cleared_on_create() {
    let (ctx, _dir) = create_context().await;
    assert!(ctx.link_service.find_by_slug("later").await.unwrap().is_none());

    ctx.link_service
        .create_link(new_link("owner-a", "later"))
        .await
        .unwrap();
    assert!(ctx.link_service.find_by_slug("later").await.unwrap().is_some());
}

#[tokio::test]
async fn test_default_template_override() {
    init_static_config();
    let temp_dir = TempDir::new().unwrap();
    let db_url = format!(
        "sqlite://{}?mode=rwc",
        temp_dir.path().join("template.db").display()
    );
    let storage = Arc::new(SeaOrmStorage::new(&db_url, "sqlite").await.unwrap());
    let service = LinkService::new(storage, 60, 100).with_default_template("neon");

    let created = service
        .create_link(new_link("owner-a", "neon-page"))
        .await
        .unwrap();
    assert_eq!(created.template, "neon");
}

// =============================================================================
// PresaveService
// =============================================================================

fn new_presave(owner: &str, slug: &str) -> Presave {
    let now = Utc::now();
    Presave {
        id: String::new(),
        owner_id: owner.to_string(),
        slug: slug.to_string(),
        artist_name: "The Band".to_string(),
        title: "Second".to_string(),
        release_date: Some(now + Duration::days(7)),
        cover_url: None,
        spotify_url: Some("https://open.spotify.com/album/1DFixLWuPkv3KT3TnV35m3".to_string()),
        template: String::new(),
        is_public: true,
        created_at: now,
        updated_at: now,
    }
}

#[tokio::test]
async fn test_presave_crud() {
    let (ctx, _dir) = create_context().await;
    let created = ctx
        .presave_service
        .create_presave(new_presave("owner-a", "second"))
        .await
        .unwrap();
    assert!(!created.id.is_empty());

    let err = ctx
        .presave_service
        .create_presave(new_presave("owner-b", "second"))
        .await
        .unwrap_err();
    assert!(matches!(err, SmartlinkError::Conflict(_)));

    let listed = ctx.presave_service.list_presaves("owner-a").await.unwrap();
    assert_eq!(listed.len(), 1);

    ctx.presave_service.delete_presave(&created.id).await.unwrap();
    assert!(
        ctx.presave_service
            .find_by_slug("second")
            .await
            .unwrap()
            .is_none()
    );
}

// =============================================================================
// DraftService
// =============================================================================

#[tokio::test]
async fn test_wizard_walk_and_submit() {
    let (ctx, _dir) = create_context().await;
    let drafts = &ctx.draft_service;

    let state = drafts.create("owner-a", None).unwrap();
    assert_eq!(state.step, WizardStep::Artist);
    assert!(!state.can_advance);

    let err = drafts.next(&state.id).unwrap_err();
    assert!(matches!(err, SmartlinkError::WizardStepInvalid(_)));

    drafts
        .update(
            &state.id,
            DraftPatch {
                artist_name: Some("The Band".to_string()),
                ..Default::default()
            },
        )
        .unwrap();
    assert_eq!(drafts.next(&state.id).unwrap().step, WizardStep::Release);
    assert_eq!(drafts.back(&state.id).unwrap().step, WizardStep::Artist);

    // 没填平台不能提交
    assert!(matches!(
        drafts.submit(&state.id).await,
        Err(SmartlinkError::WizardStepInvalid(_))
    ));

    drafts
        .update(
            &state.id,
            DraftPatch {
                title: Some("Debut".to_string()),
                slug: Some("wizard-band".to_string()),
                platforms: Some(vec![spotify_link()]),
                ..Default::default()
            },
        )
        .unwrap();

    let result = drafts.submit(&state.id).await.unwrap();
    assert_eq!(result.redirect, "/wizard-band");
    assert_eq!(result.link.owner_id, "owner-a");
    assert!(matches!(
        drafts.get(&state.id),
        Err(SmartlinkError::DraftNotFound(_))
    ));

    let stored = ctx.link_service.get_link(&result.link.id).await.unwrap();
    assert_eq!(stored.platforms, vec![spotify_link()]);
}

#[tokio::test]
async fn test_failed_submit_keeps_draft() {
    let (ctx, _dir) = create_context().await;
    ctx.link_service
        .create_link(new_link("owner-b", "taken"))
        .await
        .unwrap();

    let patch = DraftPatch {
        artist_name: Some("The Band".to_string()),
        title: Some("Debut".to_string()),
        slug: Some("taken".to_string()),
        platforms: Some(vec![spotify_link()]),
        ..Default::default()
    };
    let state = ctx.draft_service.create("owner-a", Some(patch)).unwrap();

    assert!(matches!(
        ctx.draft_service.submit(&state.id).await,
        Err(SmartlinkError::Conflict(_))
    ));
    let kept = ctx.draft_service.get(&state.id).unwrap();
    assert_eq!(kept.draft.slug, "taken");
}

#[tokio::test]
async fn test_edit_existing_link_keeps_id() {
    let (ctx, _dir) = create_context().await;
    let created = ctx
        .link_service
        .create_link(new_link("owner-a", "edit-me"))
        .await
        .unwrap();

    let state = ctx.draft_service.edit(&created.id).await.unwrap();
    assert_eq!(state.draft.slug, "edit-me");

    ctx.draft_service
        .update(
            &state.id,
            DraftPatch {
                title: Some("Edited".to_string()),
                ..Default::default()
            },
        )
        .unwrap();
    let result = ctx.draft_service.submit(&state.id).await.unwrap();

    assert_eq!(result.link.id, created.id);
    assert_eq!(result.link.title, "Edited");
    assert_eq!(ctx.storage.count_links().await.unwrap(), 1);
}

// =============================================================================
// MetricsService
// =============================================================================

#[tokio::test]
async fn test_owner_metrics_counts_links_and_presaves() {
    let (ctx, _dir) = create_context().await;
    let link = ctx
        .link_service
        .create_link(new_link("owner-a", "metrics-band"))
        .await
        .unwrap();
    let presave = ctx
        .presave_service
        .create_presave(new_presave("owner-a", "metrics-presave"))
        .await
        .unwrap();
    let foreign = ctx
        .link_service
        .create_link(new_link("owner-b", "foreign"))
        .await
        .unwrap();

    for event in [
        ClickEvent::view(&link.id),
        ClickEvent::view(&link.id),
        ClickEvent::view(&link.id),
        ClickEvent::view(&link.id),
        ClickEvent::click(&link.id, "spotify"),
        ClickEvent::view(&presave.id),
        ClickEvent::presave(&presave.id, "spotify"),
        ClickEvent::view(&foreign.id),
    ] {
        ctx.click_recorder.record(event).await.unwrap();
    }

    let summary = ctx
        .metrics_service
        .owner_metrics("owner-a", None)
        .await
        .unwrap();
    assert_eq!(summary.total_views, 5);
    assert_eq!(summary.total_clicks, 2);
    assert!((summary.click_rate - 40.0).abs() < f64::EPSILON);
    assert_eq!(summary.items.len(), 2);
    assert_eq!(summary.platforms.len(), 1);
    assert_eq!(summary.platforms[0].clicks, 2);
    assert!(summary.since.is_none());

    let item = summary
        .items
        .iter()
        .find(|i| i.link_id == link.id)
        .unwrap();
    assert_eq!(item.views, 4);
    assert!((item.click_rate - 25.0).abs() < f64::EPSILON);
}

#[tokio::test]
async fn test_owner_metrics_since_window() {
    let (ctx, _dir) = create_context().await;
    let link = ctx
        .link_service
        .create_link(new_link("owner-a", "window"))
        .await
        .unwrap();

    let mut old = ClickEvent::view(&link.id);
    old.created_at = Utc::now() - Duration::days(30);
    ctx.storage.record_click(&old).await.unwrap();
    ctx.storage
        .record_click(&ClickEvent::view(&link.id))
        .await
        .unwrap();

    let summary = ctx
        .metrics_service
        .owner_metrics("owner-a", Some("7d"))
        .await
        .unwrap();
    assert_eq!(summary.total_views, 1);
    assert!(summary.since.is_some());

    assert!(matches!(
        ctx.metrics_service
            .owner_metrics("owner-a", Some("not-a-date"))
            .await,
        Err(SmartlinkError::DateParse(_))
    ));
}

#[tokio::test]
async fn test_owner_metrics_empty_owner() {
    let (ctx, _dir) = create_context().await;
    let summary = ctx
        .metrics_service
        .owner_metrics("nobody", None)
        .await
        .unwrap();
    assert_eq!(summary.total_views, 0);
    assert_eq!(summary.click_rate, 0.0);
    assert!(summary.items.is_empty());
}
