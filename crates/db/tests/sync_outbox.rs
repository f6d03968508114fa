//! Integration tests for the sync outbox: idempotent NEEDS_SYNC upsert
//! and in-place status transitions.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use nurture_db::models::lead::UpsertLead;
use nurture_db::models::sync_record::{
    DESTINATION_GHL, SYNC_STATUS_FAILED, SYNC_STATUS_NEEDS_SYNC, SYNC_STATUS_SENT,
};
use nurture_db::repositories::{LeadRepo, SyncRecordRepo};

fn ts(s: &str) -> DateTime<Utc> {
    s.parse().unwrap()
}

async fn seed_lead(pool: &PgPool, lead_id: &str) {
    LeadRepo::upsert(pool, lead_id, &UpsertLead::default(), ts("2026-01-01T00:00:00Z"))
        .await
        .unwrap();
}

#[sqlx::test(migrations = "./migrations")]
async fn needs_sync_upsert_is_idempotent(pool: PgPool) {
    seed_lead(&pool, "L1").await;

    let t1 = ts("2026-02-01T10:00:00Z");
    let first = SyncRecordRepo::upsert(
        &pool,
        "L1",
        DESTINATION_GHL,
        SYNC_STATUS_NEEDS_SYNC,
        Some("HOT_ENGAGED"),
        t1,
    )
    .await
    .unwrap();

    let t2 = ts("2026-02-02T10:00:00Z");
    let second = SyncRecordRepo::upsert(
        &pool,
        "L1",
        DESTINATION_GHL,
        SYNC_STATUS_NEEDS_SYNC,
        Some("HOT_ENGAGED"),
        t2,
    )
    .await
    .unwrap();

    // Same row, refreshed updated_at, original created_at.
    assert_eq!(first.id, second.id);
    assert_eq!(second.created_at, t1);
    assert_eq!(second.updated_at, t2);

    let all = SyncRecordRepo::list(&pool, None, Some("L1"), 200).await.unwrap();
    assert_eq!(all.len(), 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn transition_needs_sync_to_sent(pool: PgPool) {
    seed_lead(&pool, "L1").await;
    let t1 = ts("2026-02-01T10:00:00Z");
    SyncRecordRepo::upsert(&pool, "L1", DESTINATION_GHL, SYNC_STATUS_NEEDS_SYNC, None, t1)
        .await
        .unwrap();

    let t2 = ts("2026-02-01T11:00:00Z");
    let sent = SyncRecordRepo::transition(
        &pool,
        "L1",
        DESTINATION_GHL,
        SYNC_STATUS_NEEDS_SYNC,
        SYNC_STATUS_SENT,
        None,
        t2,
    )
    .await
    .unwrap()
    .expect("NEEDS_SYNC row should transition");

    assert_eq!(sent.status, SYNC_STATUS_SENT);
    assert_eq!(sent.updated_at, t2);

    // No NEEDS_SYNC row remains.
    let pending = SyncRecordRepo::find_by_key(&pool, "L1", DESTINATION_GHL, SYNC_STATUS_NEEDS_SYNC)
        .await
        .unwrap();
    assert!(pending.is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn transition_without_pending_row_is_none(pool: PgPool) {
    seed_lead(&pool, "L1").await;
    let result = SyncRecordRepo::transition(
        &pool,
        "L1",
        DESTINATION_GHL,
        SYNC_STATUS_NEEDS_SYNC,
        SYNC_STATUS_FAILED,
        Some("connection refused"),
        ts("2026-02-01T11:00:00Z"),
    )
    .await
    .unwrap();
    assert!(result.is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn list_filters_by_status(pool: PgPool) {
    seed_lead(&pool, "L1").await;
    seed_lead(&pool, "L2").await;
    let t = ts("2026-02-01T10:00:00Z");

    SyncRecordRepo::upsert(&pool, "L1", DESTINATION_GHL, SYNC_STATUS_NEEDS_SYNC, None, t)
        .await
        .unwrap();
    SyncRecordRepo::upsert(&pool, "L2", DESTINATION_GHL, SYNC_STATUS_NEEDS_SYNC, None, t)
        .await
        .unwrap();
    SyncRecordRepo::transition(
        &pool,
        "L2",
        DESTINATION_GHL,
        SYNC_STATUS_NEEDS_SYNC,
        SYNC_STATUS_SENT,
        None,
        t,
    )
    .await
    .unwrap();

    let pending = SyncRecordRepo::list(&pool, Some(SYNC_STATUS_NEEDS_SYNC), None, 200)
        .await
        .unwrap();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].lead_id, "L1");

    let sent = SyncRecordRepo::list(&pool, Some(SYNC_STATUS_SENT), None, 200)
        .await
        .unwrap();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].lead_id, "L2");
}
