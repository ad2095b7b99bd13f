//! Integration tests for the GTD view queries and workflow steps:
//! - View membership (including the reference view's status exemption)
//! - Secondary filters composed with views
//! - Clarify and complete transitions
//! - Context and project item listings

use chrono::{TimeZone, Utc};
use gtd_core::classify::{GtdView, ItemFilter, ItemStatus, ItemType};
use gtd_core::types::Timestamp;
use sqlx::PgPool;

use gtd_db::models::context::CreateContext;
use gtd_db::models::item::{ClarifyItem, CreateItem};
use gtd_db::models::project::CreateProject;
use gtd_db::repositories::{ContextRepo, DashboardRepo, ItemRepo, ProjectRepo, UserRepo};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn seed_user(pool: &PgPool, email: &str) -> i64 {
    UserRepo::create(pool, "Test User", email, "$argon2id$fake-hash")
        .await
        .unwrap()
        .id
}

fn new_item(title: &str, item_type: ItemType) -> CreateItem {
    CreateItem {
        title: title.to_string(),
        description: None,
        item_type: Some(item_type),
        due_date: None,
        reminder_date: None,
        energy_level: None,
        time_estimate: None,
        notes: None,
        project_id: None,
        context_id: None,
        waiting_for_person: None,
        waiting_since: None,
    }
}

fn at(y: i32, m: u32, d: u32, h: u32) -> Timestamp {
    Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
}

async fn titles(
    pool: &PgPool,
    user: i64,
    view: GtdView,
    filter: &ItemFilter,
) -> Vec<String> {
    ItemRepo::list_view(pool, user, view, filter)
        .await
        .unwrap()
        .into_iter()
        .map(|i| i.title)
        .collect()
}

// ---------------------------------------------------------------------------
// Test: view membership scenario
// ---------------------------------------------------------------------------

// Four items: an inbox capture, an overdue next action, a completed next
// action that was also overdue, and a piece of reference material. Each
// view claims exactly the items it should.
#[sqlx::test(migrations = "./migrations")]
async fn test_view_membership(pool: PgPool) {
    let user = seed_user(&pool, "views@example.com").await;
    let now = at(2026, 8, 26, 15);
    let yesterday = at(2026, 8, 25, 12);

    ItemRepo::create(&pool, user, &new_item("A capture", ItemType::Inbox))
        .await
        .unwrap();

    let mut b = new_item("B overdue action", ItemType::NextAction);
    b.due_date = Some(yesterday);
    ItemRepo::create(&pool, user, &b).await.unwrap();

    let mut c = new_item("C done action", ItemType::NextAction);
    c.due_date = Some(yesterday);
    let c = ItemRepo::create(&pool, user, &c).await.unwrap();
    ItemRepo::complete(&pool, user, c.id).await.unwrap().unwrap();

    ItemRepo::create(&pool, user, &new_item("D reference", ItemType::Reference))
        .await
        .unwrap();

    let none = ItemFilter::default();
    assert_eq!(titles(&pool, user, GtdView::Inbox, &none).await, ["A capture"]);
    assert_eq!(
        titles(&pool, user, GtdView::NextActions, &none).await,
        ["B overdue action"]
    );
    assert_eq!(
        titles(&pool, user, GtdView::Reference, &none).await,
        ["D reference"]
    );
    assert!(titles(&pool, user, GtdView::WaitingFor, &none).await.is_empty());
    assert!(titles(&pool, user, GtdView::SomedayMaybe, &none).await.is_empty());

    // Overdue picks up B only: C is past due but no longer active.
    let overdue = DashboardRepo::overdue_items(&pool, user, now, 10)
        .await
        .unwrap();
    let overdue_titles: Vec<_> = overdue.iter().map(|i| i.title.as_str()).collect();
    assert_eq!(overdue_titles, ["B overdue action"]);
}

// ---------------------------------------------------------------------------
// Test: reference view ignores status
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_reference_view_keeps_completed_material(pool: PgPool) {
    let user = seed_user(&pool, "reference@example.com").await;

    let kept = ItemRepo::create(&pool, user, &new_item("Style guide", ItemType::Reference))
        .await
        .unwrap();
    ItemRepo::complete(&pool, user, kept.id).await.unwrap().unwrap();

    let listed = titles(&pool, user, GtdView::Reference, &ItemFilter::default()).await;
    assert_eq!(listed, ["Style guide"]);
}

// ---------------------------------------------------------------------------
// Test: secondary filters compose with a view
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_view_filters(pool: PgPool) {
    let user = seed_user(&pool, "filters@example.com").await;
    let context = ContextRepo::create(
        &pool,
        user,
        &CreateContext {
            name: "@computer".to_string(),
            icon: None,
            color: None,
        },
    )
    .await
    .unwrap();

    let mut quick = new_item("Quick email", ItemType::NextAction);
    quick.context_id = Some(context.id);
    quick.energy_level = Some(1);
    quick.time_estimate = Some(10);
    ItemRepo::create(&pool, user, &quick).await.unwrap();

    let mut deep = new_item("Deep work", ItemType::NextAction);
    deep.context_id = Some(context.id);
    deep.energy_level = Some(3);
    deep.time_estimate = Some(120);
    ItemRepo::create(&pool, user, &deep).await.unwrap();

    // No estimate recorded: never matches a max_minutes filter.
    let mut unsized_task = new_item("Unsized task", ItemType::NextAction);
    unsized_task.energy_level = Some(1);
    ItemRepo::create(&pool, user, &unsized_task).await.unwrap();

    let by_context = ItemFilter {
        context_id: Some(context.id),
        ..Default::default()
    };
    assert_eq!(
        titles(&pool, user, GtdView::NextActions, &by_context)
            .await
            .len(),
        2
    );

    let low_energy = ItemFilter {
        energy_level: Some(1),
        ..Default::default()
    };
    let listed = titles(&pool, user, GtdView::NextActions, &low_energy).await;
    assert!(listed.contains(&"Quick email".to_string()));
    assert!(listed.contains(&"Unsized task".to_string()));

    let half_hour = ItemFilter {
        max_minutes: Some(30),
        ..Default::default()
    };
    assert_eq!(
        titles(&pool, user, GtdView::NextActions, &half_hour).await,
        ["Quick email"]
    );

    let combined = ItemFilter {
        context_id: Some(context.id),
        energy_level: Some(1),
        max_minutes: Some(30),
    };
    assert_eq!(
        titles(&pool, user, GtdView::NextActions, &combined).await,
        ["Quick email"]
    );
}

// ---------------------------------------------------------------------------
// Test: next-actions default ordering
// ---------------------------------------------------------------------------

// Dated items come first, soonest due leading; undated items follow with
// higher energy first.
#[sqlx::test(migrations = "./migrations")]
async fn test_next_actions_default_ordering(pool: PgPool) {
    let user = seed_user(&pool, "ordering@example.com").await;

    let mut soon = new_item("Due soon", ItemType::NextAction);
    soon.due_date = Some(at(2026, 8, 27, 9));
    let mut later = new_item("Due later", ItemType::NextAction);
    later.due_date = Some(at(2026, 9, 3, 9));
    let mut high = new_item("Undated high energy", ItemType::NextAction);
    high.energy_level = Some(3);
    let mut low = new_item("Undated low energy", ItemType::NextAction);
    low.energy_level = Some(1);

    // Inserted out of order so the assertion exercises the sort.
    for item in [&low, &later, &high, &soon] {
        ItemRepo::create(&pool, user, item).await.unwrap();
    }

    assert_eq!(
        titles(&pool, user, GtdView::NextActions, &ItemFilter::default()).await,
        [
            "Due soon",
            "Due later",
            "Undated high energy",
            "Undated low energy"
        ]
    );
}

// ---------------------------------------------------------------------------
// Test: clarify moves an inbox item into a view
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_clarify_workflow(pool: PgPool) {
    let user = seed_user(&pool, "clarify@example.com").await;
    let context = ContextRepo::create(
        &pool,
        user,
        &CreateContext {
            name: "@phone".to_string(),
            icon: None,
            color: None,
        },
    )
    .await
    .unwrap();
    let captured = ItemRepo::create(&pool, user, &new_item("Figure out taxes", ItemType::Inbox))
        .await
        .unwrap();

    let clarified = ItemRepo::clarify(
        &pool,
        user,
        captured.id,
        &ClarifyItem {
            item_type: ItemType::NextAction,
            project_id: None,
            context_id: Some(context.id),
            waiting_for_person: None,
            waiting_since: None,
        },
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(clarified.item_type, ItemType::NextAction);
    assert_eq!(clarified.context_id, Some(context.id));
    assert_eq!(clarified.status, ItemStatus::Active);

    // Re-clarifying an already-clarified item is allowed.
    let reclarified = ItemRepo::clarify(
        &pool,
        user,
        captured.id,
        &ClarifyItem {
            item_type: ItemType::SomedayMaybe,
            project_id: None,
            context_id: None,
            waiting_for_person: None,
            waiting_since: None,
        },
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(reclarified.item_type, ItemType::SomedayMaybe);
    // Organizational fields not mentioned stay put.
    assert_eq!(reclarified.context_id, Some(context.id));

    assert!(titles(&pool, user, GtdView::Inbox, &ItemFilter::default())
        .await
        .is_empty());
}

// ---------------------------------------------------------------------------
// Test: completing keeps the type, reference items included
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_complete_preserves_type(pool: PgPool) {
    let user = seed_user(&pool, "complete@example.com").await;
    let reference = ItemRepo::create(&pool, user, &new_item("Old manual", ItemType::Reference))
        .await
        .unwrap();

    let completed = ItemRepo::complete(&pool, user, reference.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(completed.status, ItemStatus::Completed);
    assert_eq!(completed.item_type, ItemType::Reference);
}

// ---------------------------------------------------------------------------
// Test: context and project listings
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_list_by_context_active_only(pool: PgPool) {
    let user = seed_user(&pool, "bycontext@example.com").await;
    let context = ContextRepo::create(
        &pool,
        user,
        &CreateContext {
            name: "@home".to_string(),
            icon: None,
            color: None,
        },
    )
    .await
    .unwrap();

    let mut active = new_item("Fix the tap", ItemType::NextAction);
    active.context_id = Some(context.id);
    ItemRepo::create(&pool, user, &active).await.unwrap();

    let mut done = new_item("Mow the lawn", ItemType::NextAction);
    done.context_id = Some(context.id);
    let done = ItemRepo::create(&pool, user, &done).await.unwrap();
    ItemRepo::complete(&pool, user, done.id).await.unwrap().unwrap();

    let listed = ItemRepo::list_by_context(&pool, user, context.id)
        .await
        .unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].title, "Fix the tap");
    // The joined context reference comes back populated.
    assert_eq!(listed[0].context.as_ref().unwrap().name, "@home");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_next_actions_for_project(pool: PgPool) {
    let user = seed_user(&pool, "projitems@example.com").await;
    let project = ProjectRepo::create(
        &pool,
        user,
        &CreateProject {
            title: "Launch".to_string(),
            description: None,
            status: None,
            due_date: None,
        },
    )
    .await
    .unwrap();

    let mut action = new_item("Write announcement", ItemType::NextAction);
    action.project_id = Some(project.id);
    ItemRepo::create(&pool, user, &action).await.unwrap();

    let mut someday = new_item("Translate docs", ItemType::SomedayMaybe);
    someday.project_id = Some(project.id);
    ItemRepo::create(&pool, user, &someday).await.unwrap();

    let listed = ItemRepo::next_actions_for_project(&pool, user, project.id)
        .await
        .unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].title, "Write announcement");

    // The annotated project load agrees on the counts.
    let with_counts = ProjectRepo::find_with_counts(&pool, user, project.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(with_counts.items_count, 2);
    assert_eq!(with_counts.next_actions_count, 1);
    assert_eq!(with_counts.progress_percentage, 0);
}
