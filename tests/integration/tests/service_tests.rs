//! Service-level scenarios over the in-memory store
//!
//! Run with: cargo test -p integration-tests --test service_tests

use std::sync::Arc;

use chrono::{Duration, Utc};
use integration_tests::{memory_context, unique_chat, MemoryStore};
use woxl_core::{parse_duration, DomainError, RoleLevel, UserId};
use woxl_service::{
    AssignRoleRequest, IssueWarnRequest, RoleService, ServiceContext, ServiceError, WarnService,
};

const OWNER: UserId = UserId::new(1);

fn context(page_size: u32) -> (Arc<MemoryStore>, ServiceContext) {
    let store = Arc::new(MemoryStore::new());
    let ctx = memory_context(&store, page_size).unwrap();
    (store, ctx)
}

fn domain(err: &ServiceError) -> &DomainError {
    err.as_domain().unwrap()
}

// ============================================================================
// Roles
// ============================================================================

#[tokio::test]
async fn test_assign_then_list_has_single_entry() {
    let (_, ctx) = context(10);
    let chat = unique_chat();
    let roles = RoleService::new(&ctx);
    roles.bootstrap_owner(chat, OWNER).await.unwrap();

    let target = UserId::new(20);
    roles
        .assign(chat, OWNER, target, AssignRoleRequest::new(RoleLevel::Moderator, None))
        .await
        .unwrap();
    roles
        .assign(chat, OWNER, target, AssignRoleRequest::new(RoleLevel::JuniorAdmin, Some("trusted".to_string())))
        .await
        .unwrap();

    let roster = roles.list(chat).await.unwrap();
    let entries: Vec<_> = roster
        .groups
        .iter()
        .flat_map(|g| g.members.iter())
        .filter(|m| m.user_id == target)
        .collect();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].level, RoleLevel::JuniorAdmin);
    assert_eq!(entries[0].reason.as_deref(), Some("trusted"));
    assert_eq!(entries[0].assigned_by, Some(OWNER));
}

#[tokio::test]
async fn test_promote_then_demote_restores_level() {
    let (_, ctx) = context(10);
    let chat = unique_chat();
    let roles = RoleService::new(&ctx);
    roles.bootstrap_owner(chat, OWNER).await.unwrap();

    for start in [RoleLevel::JuniorModerator, RoleLevel::Moderator, RoleLevel::JuniorAdmin, RoleLevel::Admin] {
        let target = UserId::new(100 + i64::from(start.as_i16()));
        roles
            .assign(chat, OWNER, target, AssignRoleRequest::new(start, None))
            .await
            .unwrap();

        let up = roles.promote(chat, OWNER, target).await.unwrap();
        assert_eq!(up.old, start);
        let down = roles.demote(chat, OWNER, target).await.unwrap();
        assert_eq!(down.new, start);
    }
}

#[tokio::test]
async fn test_steps_stop_at_bounds() {
    let (_, ctx) = context(10);
    let chat = unique_chat();
    let roles = RoleService::new(&ctx);
    roles.bootstrap_owner(chat, OWNER).await.unwrap();

    let err = roles.promote(chat, OWNER, OWNER).await.unwrap_err();
    assert!(matches!(domain(&err), DomainError::AlreadyAtBound { level: RoleLevel::Owner }));

    let junior = UserId::new(7);
    roles
        .assign(chat, OWNER, junior, AssignRoleRequest::new(RoleLevel::JuniorModerator, None))
        .await
        .unwrap();
    let err = roles.demote(chat, OWNER, junior).await.unwrap_err();
    assert!(matches!(
        domain(&err),
        DomainError::AlreadyAtBound { level: RoleLevel::JuniorModerator }
    ));

    let err = roles.promote(chat, OWNER, UserId::new(999)).await.unwrap_err();
    assert!(matches!(domain(&err), DomainError::RoleNotFound(_)));
}

#[tokio::test]
async fn test_only_owner_manages_roles() {
    let (_, ctx) = context(10);
    let chat = unique_chat();
    let roles = RoleService::new(&ctx);
    roles.bootstrap_owner(chat, OWNER).await.unwrap();

    let b = UserId::new(2);
    let c = UserId::new(3);
    roles
        .assign(chat, OWNER, b, AssignRoleRequest::new(RoleLevel::Admin, None))
        .await
        .unwrap();

    let err = roles
        .assign(chat, b, c, AssignRoleRequest::new(RoleLevel::Admin, None))
        .await
        .unwrap_err();
    assert!(matches!(
        domain(&err),
        DomainError::Unauthorized { required: RoleLevel::Owner }
    ));

    let err = roles.revoke(chat, b, OWNER).await.unwrap_err();
    assert!(domain(&err).is_authorization());
}

#[tokio::test]
async fn test_revoke_returns_prior_role() {
    let (_, ctx) = context(10);
    let chat = unique_chat();
    let roles = RoleService::new(&ctx);
    roles.bootstrap_owner(chat, OWNER).await.unwrap();

    let target = UserId::new(5);
    roles
        .assign(chat, OWNER, target, AssignRoleRequest::new(RoleLevel::Moderator, None))
        .await
        .unwrap();

    let removed = roles.revoke(chat, OWNER, target).await.unwrap();
    assert_eq!(removed.level, RoleLevel::Moderator);

    let err = roles.revoke(chat, OWNER, target).await.unwrap_err();
    assert!(matches!(domain(&err), DomainError::RoleNotFound(_)));
}

// ============================================================================
// Warns
// ============================================================================

async fn seed_warns(ctx: &ServiceContext, chat: woxl_core::ChatId, count: i64) {
    RoleService::new(ctx).bootstrap_owner(chat, OWNER).await.unwrap();
    let warns = WarnService::new(ctx);
    for i in 0..count {
        warns
            .issue(chat, OWNER, UserId::new(1000 + i), IssueWarnRequest::new(Some(format!("w{i}")), None))
            .await
            .unwrap();
    }
}

#[tokio::test]
async fn test_revoke_active_then_list_excludes() {
    let (store, ctx) = context(10);
    let chat = unique_chat();
    seed_warns(&ctx, chat, 2).await;
    let warns = WarnService::new(&ctx);

    let target = UserId::new(1000);
    warns
        .issue(chat, OWNER, target, IssueWarnRequest::new(None, Some(Duration::hours(1))))
        .await
        .unwrap();

    assert_eq!(warns.revoke_active(chat, OWNER, target).await.unwrap(), 2);

    let page = warns.list_active(chat, 1).await.unwrap();
    assert_eq!(page.total, 1);
    assert!(page.items.iter().all(|w| w.user_id != target));

    // Soft delete keeps history
    assert_eq!(store.all_warns(chat).len(), 3);

    let err = warns.revoke_active(chat, OWNER, target).await.unwrap_err();
    assert!(matches!(domain(&err), DomainError::WarnNotFound(_)));
}

#[tokio::test]
async fn test_list_active_pages_newest_first() {
    let (_, ctx) = context(10);
    let chat = unique_chat();
    seed_warns(&ctx, chat, 25).await;
    let warns = WarnService::new(&ctx);

    let first = warns.list_active(chat, 1).await.unwrap();
    let reasons: Vec<_> = first.items.iter().filter_map(|w| w.reason.clone()).collect();
    assert_eq!(reasons.len(), 10);
    assert_eq!(reasons[0], "w24");
    assert_eq!(reasons[9], "w15");

    let second = warns.list_active(chat, 2).await.unwrap();
    assert_eq!(second.items[0].reason.as_deref(), Some("w14"));
    assert_eq!(second.first_index(), 11);

    // Beyond the last page clamps to the last page
    let clamped = warns.list_active(chat, 9).await.unwrap();
    assert_eq!(clamped.page, 3);
    assert_eq!(clamped.items.len(), 5);
    assert_eq!(clamped.items[4].reason.as_deref(), Some("w0"));

    let below = warns.list_active(chat, 0).await.unwrap();
    assert_eq!(below.page, 1);
}

#[tokio::test]
async fn test_empty_list_has_one_page() {
    let (_, ctx) = context(10);
    let page = WarnService::new(&ctx).list_active(unique_chat(), 4).await.unwrap();
    assert_eq!(page.page, 1);
    assert_eq!(page.total, 0);
    assert!(page.items.is_empty());
    assert!(page.is_last());
}

#[tokio::test]
async fn test_unassigned_user_cannot_warn() {
    let (_, ctx) = context(10);
    let chat = unique_chat();
    RoleService::new(&ctx).bootstrap_owner(chat, OWNER).await.unwrap();

    let err = WarnService::new(&ctx)
        .issue(chat, UserId::new(50), UserId::new(51), IssueWarnRequest::new(None, None))
        .await
        .unwrap_err();
    assert!(matches!(
        domain(&err),
        DomainError::Unauthorized { required: RoleLevel::JuniorModerator }
    ));
}

#[tokio::test]
async fn test_warn_expiry_from_duration() {
    let (_, ctx) = context(10);
    let chat = unique_chat();
    RoleService::new(&ctx).bootstrap_owner(chat, OWNER).await.unwrap();

    let before = Utc::now();
    let warn = WarnService::new(&ctx)
        .issue(chat, OWNER, UserId::new(9), IssueWarnRequest::new(None, parse_duration("10m")))
        .await
        .unwrap();
    let until = warn.until.unwrap();
    assert!(until >= before + Duration::minutes(10));
    assert!(until <= Utc::now() + Duration::minutes(10));
}

#[test]
fn test_duration_examples() {
    assert_eq!(parse_duration("10m"), Some(Duration::seconds(600)));
    assert_eq!(parse_duration("2h"), Some(Duration::seconds(7200)));
    assert_eq!(parse_duration("1w"), Some(Duration::seconds(604_800)));
    assert_eq!(parse_duration("abc"), None);
}
