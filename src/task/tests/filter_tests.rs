//! Unit tests for board filtering and column display ordering.

#![expect(
    clippy::expect_used,
    reason = "Test code uses expect for assertion clarity"
)]

use crate::task::domain::{
    Board, PersistedTaskData, Priority, Status, Task, TaskCode, TaskFilter, TaskId, display_order,
};
use chrono::{DateTime, Utc};
use rstest::rstest;
use std::cmp::Ordering;

fn at(minute: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(1_790_000_000 + minute * 60, 0).expect("valid timestamp")
}

fn stored_task(
    title: &str,
    description: &str,
    code: TaskCode,
    priority: Priority,
    board: Board,
    assignee: &str,
    created_minute: i64,
) -> Task {
    Task::from_persisted(PersistedTaskData {
        id: TaskId::new(),
        code,
        title: title.to_owned(),
        description: description.to_owned(),
        priority,
        status: Status::Backlog,
        board,
        assignee: assignee.to_owned(),
        created_at: at(created_minute),
        updated_at: at(created_minute),
    })
}

#[rstest]
fn filter_always_applies_board_partition() {
    let dev_task = stored_task(
        "Fix QR routing",
        "",
        TaskCode::from_parts(Priority::Critical, 1),
        Priority::Critical,
        Board::PontisDev,
        "Blake",
        0,
    );

    assert!(TaskFilter::new(Board::PontisDev).matches(&dev_task));
    assert!(!TaskFilter::new(Board::Personal).matches(&dev_task));
}

#[rstest]
fn assignee_filter_is_exact_match() {
    let task = stored_task(
        "Grant report",
        "",
        TaskCode::from_parts(Priority::High, 2),
        Priority::High,
        Board::PontisOps,
        "Clara",
        0,
    );

    let matching = TaskFilter::new(Board::PontisOps).with_assignee("Clara");
    let other = TaskFilter::new(Board::PontisOps).with_assignee("Blake");
    assert!(matching.matches(&task));
    assert!(!other.matches(&task));
}

#[rstest]
fn priority_filter_narrows_the_view() {
    let task = stored_task(
        "Partner portal orders",
        "",
        TaskCode::from_parts(Priority::Critical, 3),
        Priority::Critical,
        Board::PontisDev,
        "Blake",
        0,
    );

    assert!(
        TaskFilter::new(Board::PontisDev)
            .with_priority(Priority::Critical)
            .matches(&task)
    );
    assert!(
        !TaskFilter::new(Board::PontisDev)
            .with_priority(Priority::Low)
            .matches(&task)
    );
}

#[rstest]
#[case("qr code")]
#[case("CLAIM FLOW")]
#[case("c-001")]
fn search_is_case_insensitive_across_title_description_and_code(#[case] needle: &str) {
    let task = stored_task(
        "QR Code routing bug",
        "QR should route through the claim flow",
        TaskCode::from_parts(Priority::Critical, 1),
        Priority::Critical,
        Board::PontisDev,
        "Blake",
        0,
    );

    let filter = TaskFilter::new(Board::PontisDev).with_search(needle);
    assert!(filter.matches(&task));
}

#[rstest]
fn search_with_no_hit_hides_the_task() {
    let task = stored_task(
        "Elderly-friendly onboarding",
        "Phone-assisted claim flow",
        TaskCode::from_parts(Priority::High, 4),
        Priority::High,
        Board::PontisDev,
        "Blake",
        0,
    );

    let filter = TaskFilter::new(Board::PontisDev).with_search("memorial");
    assert!(!filter.matches(&task));
}

#[rstest]
fn higher_priority_precedes_regardless_of_age() {
    let older_high = stored_task(
        "A",
        "",
        TaskCode::from_parts(Priority::High, 1),
        Priority::High,
        Board::PontisDev,
        "",
        0,
    );
    let newer_critical = stored_task(
        "B",
        "",
        TaskCode::from_parts(Priority::Critical, 1),
        Priority::Critical,
        Board::PontisDev,
        "",
        5,
    );

    assert_eq!(display_order(&newer_critical, &older_high), Ordering::Less);
    assert_eq!(display_order(&older_high, &newer_critical), Ordering::Greater);
}

#[rstest]
fn equal_priority_orders_newest_first() {
    let older = stored_task(
        "Old",
        "",
        TaskCode::from_parts(Priority::Medium, 1),
        Priority::Medium,
        Board::PontisDev,
        "",
        0,
    );
    let newer = stored_task(
        "New",
        "",
        TaskCode::from_parts(Priority::Medium, 2),
        Priority::Medium,
        Board::PontisDev,
        "",
        10,
    );

    assert_eq!(display_order(&newer, &older), Ordering::Less);
}
