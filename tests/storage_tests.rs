//! SeaOrmStorage 集成测试（SQLite 临时库）

use std::sync::Once;

use chrono::{Duration, Utc};
use tempfile::TempDir;

use smartlink::config::init_config;
use smartlink::storage::{
    ClickEvent, ClickKind, LinkRecord, PlatformLink, Presave, Profile, SeaOrmStorage, SocialLink,
};

static INIT: Once = Once::new();

fn init_static_config() {
    INIT.call_once(|| {
        init_config();
    });
}

async fn create_temp_storage() -> (SeaOrmStorage, TempDir) {
    init_static_config();
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("storage_test.db");
    let db_url = format!("sqlite://{}?mode=rwc", db_path.display());

    let storage = SeaOrmStorage::new(&db_url, "sqlite")
        .await
        .expect("Failed to create storage");
    (storage, temp_dir)
}

fn sample_link(id: &str, owner: &str, slug: &str) -> LinkRecord {
    let mut record = LinkRecord::new(id, owner);
    record.slug = slug.to_string();
    record.artist_name = "The Band".to_string();
    record.title = "Debut".to_string();
    record.platforms = vec![
        PlatformLink {
            platform_id: "spotify".to_string(),
            url: "https://open.spotify.com/track/4uLU6hMCjMI75M1A2tKUQC".to_string(),
        },
        PlatformLink {
            platform_id: "deezer".to_string(),
            url: "https://www.deezer.com/track/1".to_string(),
        },
    ];
    record.socials = vec![SocialLink {
        platform_id: "instagram".to_string(),
        url: "https://instagram.com/theband".to_string(),
    }];
    record
}

fn sample_presave(id: &str, owner: &str, slug: &str) -> Presave {
    let now = Utc::now();
    Presave {
        id: id.to_string(),
        owner_id: owner.to_string(),
        slug: slug.to_string(),
        artist_name: "The Band".to_string(),
        title: "Second".to_string(),
        release_date: Some(now + Duration::days(14)),
        cover_url: None,
        spotify_url: Some("https://open.spotify.com/album/1DFixLWuPkv3KT3TnV35m3".to_string()),
        template: "classic".to_string(),
        is_public: true,
        created_at: now,
        updated_at: now,
    }
}

// =============================================================================
// Smart links
// =============================================================================

#[tokio::test]
async fn test_link_round_trip_keeps_platform_order() {
    let (storage, _dir) = create_temp_storage().await;
    let record = sample_link("l1", "owner-a", "the-band");

    storage.upsert_link(&record).await.unwrap();

    let loaded = storage.get_link("l1").await.unwrap().expect("link exists");
    assert_eq!(loaded.slug, "the-band");
    assert_eq!(loaded.platforms, record.platforms);
    assert_eq!(loaded.socials, record.socials);
    assert!(loaded.is_public);

    let by_slug = storage.get_link_by_slug("the-band").await.unwrap();
    assert_eq!(by_slug.map(|l| l.id), Some("l1".to_string()));
}

#[tokio::test]
async fn test_link_upsert_replaces_fields() {
    let (storage, _dir) = create_temp_storage().await;
    let mut record = sample_link("l1", "owner-a", "the-band");
    storage.upsert_link(&record).await.unwrap();

    record.title = "Reissue".to_string();
    record.platforms.truncate(1);
    record.is_public = false;
    storage.upsert_link(&record).await.unwrap();

    let loaded = storage.get_link("l1").await.unwrap().unwrap();
    assert_eq!(loaded.title, "Reissue");
    assert_eq!(loaded.platforms.len(), 1);
    assert!(!loaded.is_public);
    assert_eq!(storage.count_links().await.unwrap(), 1);
}

#[tokio::test]
async fn test_list_links_scoped_to_owner() {
    let (storage, _dir) = create_temp_storage().await;
    storage
        .upsert_link(&sample_link("l1", "owner-a", "a-one"))
        .await
        .unwrap();
    storage
        .upsert_link(&sample_link("l2", "owner-a", "a-two"))
        .await
        .unwrap();
    storage
        .upsert_link(&sample_link("l3", "owner-b", "b-one"))
        .await
        .unwrap();

    let owned = storage.list_links("owner-a").await.unwrap();
    assert_eq!(owned.len(), 2);
    assert!(owned.iter().all(|l| l.owner_id == "owner-a"));

    let ids = storage.link_ids_for_owner("owner-b").await.unwrap();
    assert_eq!(ids, vec!["l3".to_string()]);

    assert!(storage.list_links("nobody").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_delete_link() {
    let (storage, _dir) = create_temp_storage().await;
    storage
        .upsert_link(&sample_link("l1", "owner-a", "the-band"))
        .await
        .unwrap();

    storage.delete_link("l1").await.unwrap();
    assert!(storage.get_link("l1").await.unwrap().is_none());
    assert!(storage.get_link_by_slug("the-band").await.unwrap().is_none());
}

// =============================================================================
// Profiles / presaves
// =============================================================================

#[tokio::test]
async fn test_profile_upsert_and_delete() {
    let (storage, _dir) = create_temp_storage().await;
    let now = Utc::now();
    let profile = Profile {
        id: "owner-a".to_string(),
        display_name: "The Band".to_string(),
        email: Some("band@example.com".to_string()),
        avatar_url: None,
        created_at: now,
        updated_at: now,
    };

    storage.upsert_profile(&profile).await.unwrap();
    let loaded = storage.get_profile("owner-a").await.unwrap().unwrap();
    assert_eq!(loaded.display_name, "The Band");
    assert_eq!(loaded.email.as_deref(), Some("band@example.com"));

    storage.delete_profile("owner-a").await.unwrap();
    assert!(storage.get_profile("owner-a").await.unwrap().is_none());
}

#[tokio::test]
async fn test_presave_lookup_by_slug() {
    let (storage, _dir) = create_temp_storage().await;
    let presave = sample_presave("p1", "owner-a", "second-album");
    storage.upsert_presave(&presave).await.unwrap();

    let loaded = storage
        .get_presave_by_slug("second-album")
        .await
        .unwrap()
        .expect("presave exists");
    assert_eq!(loaded.id, "p1");
    assert_eq!(loaded.spotify_url, presave.spotify_url);
    assert!(loaded.release_date.is_some());

    assert_eq!(
        storage.presave_ids_for_owner("owner-a").await.unwrap(),
        vec!["p1".to_string()]
    );

    storage.delete_presave("p1").await.unwrap();
    assert!(storage.get_presave("p1").await.unwrap().is_none());
}

// =============================================================================
// Click log
// =============================================================================

#[tokio::test]
async fn test_load_clicks_filters_by_ids_and_since() {
    let (storage, _dir) = create_temp_storage().await;

    let mut old_view = ClickEvent::view("l1");
    old_view.created_at = Utc::now() - Duration::days(10);
    storage.record_click(&old_view).await.unwrap();
    storage.record_click(&ClickEvent::view("l1")).await.unwrap();
    storage
        .record_click(&ClickEvent::click("l1", "spotify").with_referrer(Some("t.co".to_string())))
        .await
        .unwrap();
    storage.record_click(&ClickEvent::view("other")).await.unwrap();

    let all = storage.load_clicks(&["l1".to_string()], None).await.unwrap();
    assert_eq!(all.len(), 3);
    assert!(all.iter().all(|e| e.link_id == "l1"));

    let recent = storage
        .load_clicks(&["l1".to_string()], Some(Utc::now() - Duration::days(1)))
        .await
        .unwrap();
    assert_eq!(recent.len(), 2);

    let click = recent
        .iter()
        .find(|e| e.kind == ClickKind::Click)
        .expect("click recorded");
    assert_eq!(click.platform_id.as_deref(), Some("spotify"));
    assert_eq!(click.referrer.as_deref(), Some("t.co"));

    assert!(storage.load_clicks(&[], None).await.unwrap().is_empty());
}
