//! Integration tests for the dashboard aggregation queries:
//! - Per-view and project counts
//! - Due-window listings against a fixed clock
//! - Energy bucketing and context breakdown edge cases
//! - Stale waiting-for detection

use chrono::{NaiveDate, TimeZone, Utc};
use gtd_core::classify::ItemType;
use gtd_core::time::{day_range, month_range, week_range};
use gtd_core::types::Timestamp;
use sqlx::PgPool;

use gtd_db::models::context::CreateContext;
use gtd_db::models::item::CreateItem;
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

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

// Wednesday afternoon; the week is Mon 2026-08-24 through Sun 2026-08-30.
const NOW: (i32, u32, u32, u32) = (2026, 8, 26, 15);

// ---------------------------------------------------------------------------
// Test: view and project counts
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_view_counts(pool: PgPool) {
    let user = seed_user(&pool, "counts@example.com").await;

    ItemRepo::create(&pool, user, &new_item("capture 1", ItemType::Inbox))
        .await
        .unwrap();
    ItemRepo::create(&pool, user, &new_item("capture 2", ItemType::Inbox))
        .await
        .unwrap();
    ItemRepo::create(&pool, user, &new_item("action", ItemType::NextAction))
        .await
        .unwrap();

    // Completed reference material still counts for the reference view.
    let reference = ItemRepo::create(&pool, user, &new_item("manual", ItemType::Reference))
        .await
        .unwrap();
    ItemRepo::complete(&pool, user, reference.id)
        .await
        .unwrap()
        .unwrap();

    // A completed next action counts for no view.
    let done = ItemRepo::create(&pool, user, &new_item("done", ItemType::NextAction))
        .await
        .unwrap();
    ItemRepo::complete(&pool, user, done.id).await.unwrap().unwrap();

    ProjectRepo::create(
        &pool,
        user,
        &CreateProject {
            title: "Active project".to_string(),
            description: None,
            status: None,
            due_date: None,
        },
    )
    .await
    .unwrap();

    let counts = DashboardRepo::view_counts(&pool, user).await.unwrap();
    assert_eq!(counts.inbox, 2);
    assert_eq!(counts.next_actions, 1);
    assert_eq!(counts.waiting_for, 0);
    assert_eq!(counts.someday_maybe, 0);
    assert_eq!(counts.reference, 1);
    assert_eq!(counts.active_projects, 1);
    assert_eq!(counts.completed_projects, 0);
}

// ---------------------------------------------------------------------------
// Test: due windows
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_due_windows(pool: PgPool) {
    let user = seed_user(&pool, "due@example.com").await;
    let now = at(NOW.0, NOW.1, NOW.2, NOW.3);

    let mut overdue = new_item("overdue", ItemType::NextAction);
    overdue.due_date = Some(at(2026, 8, 25, 9));
    ItemRepo::create(&pool, user, &overdue).await.unwrap();

    let mut today = new_item("today", ItemType::NextAction);
    today.due_date = Some(at(2026, 8, 26, 18));
    ItemRepo::create(&pool, user, &today).await.unwrap();

    let mut friday = new_item("friday", ItemType::NextAction);
    friday.due_date = Some(at(2026, 8, 28, 9));
    ItemRepo::create(&pool, user, &friday).await.unwrap();

    let mut next_month = new_item("next month", ItemType::NextAction);
    next_month.due_date = Some(at(2026, 9, 20, 9));
    ItemRepo::create(&pool, user, &next_month).await.unwrap();

    let listed = DashboardRepo::overdue_items(&pool, user, now, 10).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].title, "overdue");
    assert_eq!(DashboardRepo::overdue_count(&pool, user, now).await.unwrap(), 1);

    let today_items = DashboardRepo::due_in_range(&pool, user, day_range(now), 10)
        .await
        .unwrap();
    let today_titles: Vec<_> = today_items.iter().map(|i| i.title.as_str()).collect();
    assert_eq!(today_titles, ["today"]);

    // The week window includes today and friday; overdue already passed.
    let week_items = DashboardRepo::due_in_range(&pool, user, week_range(now), 10)
        .await
        .unwrap();
    let week_titles: Vec<_> = week_items.iter().map(|i| i.title.as_str()).collect();
    assert_eq!(week_titles, ["overdue", "today", "friday"]);
}

// ---------------------------------------------------------------------------
// Test: energy buckets always report all three levels
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_energy_buckets_with_empty_levels(pool: PgPool) {
    let user = seed_user(&pool, "energy@example.com").await;

    let mut high = new_item("sprint", ItemType::NextAction);
    high.energy_level = Some(3);
    ItemRepo::create(&pool, user, &high).await.unwrap();

    let mut also_high = new_item("deep dive", ItemType::NextAction);
    also_high.energy_level = Some(3);
    ItemRepo::create(&pool, user, &also_high).await.unwrap();

    // Inbox items do not count as next actions regardless of energy.
    let mut inbox = new_item("capture", ItemType::Inbox);
    inbox.energy_level = Some(1);
    ItemRepo::create(&pool, user, &inbox).await.unwrap();

    let buckets = DashboardRepo::next_actions_by_energy(&pool, user).await.unwrap();
    assert_eq!(buckets.low, 0);
    assert_eq!(buckets.medium, 0);
    assert_eq!(buckets.high, 2);
}

// ---------------------------------------------------------------------------
// Test: context breakdown excludes idle contexts
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_context_breakdown_excludes_zero_counts(pool: PgPool) {
    let user = seed_user(&pool, "breakdown@example.com").await;
    let busy = ContextRepo::create(
        &pool,
        user,
        &CreateContext {
            name: "@busy".to_string(),
            icon: None,
            color: None,
        },
    )
    .await
    .unwrap();
    ContextRepo::create(
        &pool,
        user,
        &CreateContext {
            name: "@idle".to_string(),
            icon: None,
            color: None,
        },
    )
    .await
    .unwrap();

    let mut item = new_item("tagged", ItemType::NextAction);
    item.context_id = Some(busy.id);
    ItemRepo::create(&pool, user, &item).await.unwrap();

    let breakdown = DashboardRepo::context_breakdown(&pool, user).await.unwrap();
    assert_eq!(breakdown.len(), 1);
    assert_eq!(breakdown[0].name, "@busy");
    assert_eq!(breakdown[0].active_items_count, 1);
}

// ---------------------------------------------------------------------------
// Test: active projects sort nulls last and derive progress
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_active_projects_ordering_and_progress(pool: PgPool) {
    let user = seed_user(&pool, "projects@example.com").await;

    // No due date and no items: progress 0, sorted last.
    ProjectRepo::create(
        &pool,
        user,
        &CreateProject {
            title: "Undated".to_string(),
            description: None,
            status: None,
            due_date: None,
        },
    )
    .await
    .unwrap();

    let dated = ProjectRepo::create(
        &pool,
        user,
        &CreateProject {
            title: "Dated".to_string(),
            description: None,
            status: None,
            due_date: Some(date(2026, 9, 15)),
        },
    )
    .await
    .unwrap();

    // 4 items, 1 completed: progress 25.
    for n in 0..4 {
        let mut item = new_item(&format!("task {n}"), ItemType::NextAction);
        item.project_id = Some(dated.id);
        let created = ItemRepo::create(&pool, user, &item).await.unwrap();
        if n == 0 {
            ItemRepo::complete(&pool, user, created.id).await.unwrap().unwrap();
        }
    }

    let listed = DashboardRepo::active_projects(&pool, user, 5).await.unwrap();
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].title, "Dated");
    assert_eq!(listed[0].items_count, 4);
    assert_eq!(listed[0].progress_percentage, 25);
    assert_eq!(listed[1].title, "Undated");
    assert_eq!(listed[1].progress_percentage, 0);
}

// ---------------------------------------------------------------------------
// Test: stale waiting-for items
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_stale_waiting(pool: PgPool) {
    let user = seed_user(&pool, "waiting@example.com").await;
    // Items waiting seven days or more surface; fresher ones do not.
    let cutoff = date(2026, 8, 19);

    let mut stale = new_item("Contract from legal", ItemType::WaitingFor);
    stale.waiting_for_person = Some("Dana".to_string());
    stale.waiting_since = Some(date(2026, 8, 10));
    ItemRepo::create(&pool, user, &stale).await.unwrap();

    let mut boundary = new_item("Quote from vendor", ItemType::WaitingFor);
    boundary.waiting_since = Some(date(2026, 8, 19));
    ItemRepo::create(&pool, user, &boundary).await.unwrap();

    let mut fresh = new_item("Reply from Sam", ItemType::WaitingFor);
    fresh.waiting_since = Some(date(2026, 8, 24));
    ItemRepo::create(&pool, user, &fresh).await.unwrap();

    let listed = DashboardRepo::stale_waiting(&pool, user, cutoff, 5).await.unwrap();
    let titles: Vec<_> = listed.iter().map(|i| i.title.as_str()).collect();
    assert_eq!(titles, ["Contract from legal", "Quote from vendor"]);
    assert_eq!(listed[0].waiting_for_person.as_deref(), Some("Dana"));
}

// ---------------------------------------------------------------------------
// Test: productivity windows key off completion time
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_productivity_counts_recent_completions(pool: PgPool) {
    let user = seed_user(&pool, "productivity@example.com").await;
    let now = Utc::now();

    let done = ItemRepo::create(&pool, user, &new_item("shipped", ItemType::NextAction))
        .await
        .unwrap();
    ItemRepo::complete(&pool, user, done.id).await.unwrap().unwrap();

    ItemRepo::create(&pool, user, &new_item("pending", ItemType::NextAction))
        .await
        .unwrap();

    let stats = DashboardRepo::productivity(&pool, user, week_range(now), month_range(now))
        .await
        .unwrap();
    assert_eq!(stats.completed_this_week, 1);
    assert_eq!(stats.completed_this_month, 1);
    assert_eq!(stats.projects_completed_this_month, 0);
}
