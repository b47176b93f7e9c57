mod common;

use chrono::NaiveDate;
use common::memory_tracker;
use spesa_core::{
    core::services::SummaryService,
    domain::{DateRange, ExpenseStats, LineItemDraft, Period},
};

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn week_filter_honours_iso_week_boundaries() {
    let mut tracker = memory_tracker();
    tracker
        .add_expense("Conad", "2024-01-29", vec![LineItemDraft::new("Latte", 1.0)])
        .unwrap(); // Monday of the target week
    tracker
        .add_expense("Coop", "2024-02-04", vec![LineItemDraft::new("Pane", 2.0)])
        .unwrap(); // Sunday of the target week
    tracker
        .add_expense("Lidl", "2024-02-05", vec![LineItemDraft::new("Uova", 3.0)])
        .unwrap(); // Monday of the following week

    let filtered = tracker.expenses_in_period(Some(Period::Week), Some(day(2024, 2, 1)));
    let stores: Vec<_> = filtered.iter().map(|e| e.store.as_str()).collect();
    assert_eq!(stores, vec!["Conad", "Coop"]);
}

#[test]
fn month_and_year_filters_are_inclusive_of_their_edges() {
    let mut tracker = memory_tracker();
    for date in ["2024-02-01", "2024-02-29", "2024-03-01"] {
        tracker
            .add_expense("Conad", date, vec![LineItemDraft::new("Latte", 1.0)])
            .unwrap();
    }

    let feb = tracker.expenses_in_period(Some(Period::Month), Some(day(2024, 2, 15)));
    assert_eq!(feb.len(), 2);

    let year = tracker.expenses_in_period(Some(Period::Year), Some(day(2024, 6, 1)));
    assert_eq!(year.len(), 3);
}

#[test]
fn unfiltered_period_returns_everything() {
    let mut tracker = memory_tracker();
    tracker
        .add_expense("Conad", "2020-01-01", vec![LineItemDraft::new("Latte", 1.0)])
        .unwrap();
    tracker
        .add_expense("Coop", "2024-06-01", vec![LineItemDraft::new("Pane", 2.0)])
        .unwrap();
    assert_eq!(tracker.expenses_in_period(None, None).len(), 2);
}

#[test]
fn stats_on_no_expenses_are_all_zero() {
    let tracker = memory_tracker();
    let stats = tracker.stats_for_period(Some(Period::Day), Some(day(2024, 3, 1)));
    assert_eq!(stats, ExpenseStats::default());
}

#[test]
fn equal_totals_resolve_to_the_first_expense() {
    let mut tracker = memory_tracker();
    tracker
        .add_expense("Conad", "2024-03-01", vec![LineItemDraft::new("Latte", 9.0)])
        .unwrap();
    tracker
        .add_expense("Lidl", "2024-03-02", vec![LineItemDraft::new("Pane", 9.0)])
        .unwrap();

    let stats = tracker.stats_for_period(None, None);
    assert_eq!(stats.max.store, "Conad");
    assert_eq!(stats.min.store, "Conad");
}

#[test]
fn category_breakdown_counts_items_across_expenses() {
    let mut tracker = memory_tracker();
    tracker
        .add_expense(
            "Conad",
            "2024-03-01",
            vec![
                LineItemDraft::new("Latte", 1.0).with_category("Dairy"),
                LineItemDraft::new("Yogurt", 2.0).with_category("Dairy"),
            ],
        )
        .unwrap();
    tracker
        .add_expense("Lidl", "2024-03-02", vec![LineItemDraft::new("Pane", 3.0)])
        .unwrap();

    let stats = tracker.stats_for_period(None, None);
    assert_eq!(stats.category_stats["Dairy"].count, 2);
    assert_eq!(stats.category_stats["Dairy"].total, 3.0);
    assert_eq!(stats.category_stats["Other"].count, 1);
    assert_eq!(stats.store_stats["Conad"].count, 1);
    assert_eq!(stats.store_stats["Conad"].total, 3.0);
}

#[test]
fn daily_totals_feed_a_week_of_buckets() {
    let mut tracker = memory_tracker();
    tracker
        .add_expense("Conad", "2024-01-29", vec![LineItemDraft::new("Latte", 2.5)])
        .unwrap();
    tracker
        .add_expense("Coop", "2024-01-31", vec![LineItemDraft::new("Pane", 1.5)])
        .unwrap();

    let range = DateRange {
        start: day(2024, 1, 29),
        end: day(2024, 2, 4),
    };
    let totals = SummaryService::daily_totals(tracker.expenses(), range);
    assert_eq!(totals.len(), 7);
    assert_eq!(totals[0], (day(2024, 1, 29), 2.5));
    assert_eq!(totals[2], (day(2024, 1, 31), 1.5));
    assert_eq!(totals[6], (day(2024, 2, 4), 0.0));
}
