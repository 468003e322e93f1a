// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

mod common;

use chrono::{Datelike, TimeZone, Utc};
use common::{date, today, Report};
use cq_core::{EntryKind, Error, Issue, Named, ProjectScoped, TimeEntry, User, LABOR_COST_TYPE};
use yare::parameterized;

const NONE: &[&str] = &[];

#[test]
fn no_filters_returns_every_entry() {
    let report = Report::new();
    report.add_time_entry(date(2013, 1, 1));
    let (time, cost) = report.db.entry_counts().unwrap();
    assert_eq!(report.count(), time + cost);
    assert_eq!(report.count(), 3);
}

#[test]
fn every_entry_is_normalized() {
    let report = Report::new();
    let result = report.query().result().unwrap();
    for entry in &result {
        assert!(!entry.cost_type.is_empty());
        if entry.kind == EntryKind::TimeEntry {
            assert_eq!(entry.cost_type, LABOR_COST_TYPE);
            assert_ne!(entry.activity_id, -1);
        } else {
            assert_eq!(entry.activity_id, -1);
        }
    }
}

#[test]
fn project_filter_keeps_project_entries() {
    let report = Report::new();
    let mut query = report.query();
    query
        .filter("project_id", "=", &[report.project.to_string()])
        .unwrap();
    assert_eq!(query.result().unwrap().count(), 2);
}

#[test]
fn same_filter_twice_equals_once() {
    let report = Report::new();
    let id = report.project.to_string();

    let mut once = report.query();
    once.filter("project_id", "=", &[&id]).unwrap();
    let mut twice = report.query();
    twice.filter("project_id", "=", &[&id]).unwrap();
    twice.filter("project_id", "=", &[&id]).unwrap();

    assert_eq!(once.result().unwrap(), twice.result().unwrap());
}

#[test]
fn conflicting_ids_give_empty_result() {
    let report = Report::new();
    let mut query = report.query();
    query
        .filter("project_id", "=", &[report.project.to_string()])
        .unwrap()
        .filter("project_id", "=", &[report.missing_project().to_string()])
        .unwrap();
    assert_eq!(query.result().unwrap().count(), 0);
}

#[test]
fn closed_status_counts_closed_issues() {
    let report = Report::empty();
    for n in 0..3 {
        let issue = report.add_issue(&format!("closed {n}"), report.closed_status);
        report.add_issue_time_entry(issue, date(2013, 1, 10));
    }
    let open = report.add_issue("still open", report.open_status);
    report.add_issue_time_entry(open, date(2013, 1, 10));

    let mut closed = report.query();
    closed.filter("status_id", "c", NONE).unwrap();
    assert_eq!(closed.result().unwrap().count(), 3);

    let mut open = report.query();
    open.filter("status_id", "o", NONE).unwrap();
    assert_eq!(open.result().unwrap().count(), 1);
}

#[test]
fn subject_matches_exactly() {
    let report = Report::new();
    let issue = report.add_issue("matching subject", report.open_status);
    report.add_issue_time_entry(issue, date(2013, 1, 10));
    let other = report.add_issue("something else", report.open_status);
    report.add_issue_time_entry(other, date(2013, 1, 10));

    let mut query = report.query();
    query.filter("subject", "=", &["matching subject"]).unwrap();
    assert_eq!(query.result().unwrap().count(), 1);
}

#[test]
fn spent_on_rejects_closed_operator() {
    let report = Report::new();
    let mut query = report.query();
    let err = query.filter("spent_on", "c", NONE).err().unwrap();
    assert!(matches!(err, Error::UnsupportedOperator { .. }));
}

#[test]
fn unknown_filter_is_an_error() {
    let report = Report::new();
    let mut query = report.query();
    let err = query.filter("nonexistent_field", "=", &["1"]).err().unwrap();
    assert!(matches!(err, Error::UnknownFilter(_)));
}

#[test]
fn invalid_operand_is_an_error() {
    let report = Report::new();
    let mut query = report.query();
    let err = query.filter("spent_on", ">d", &["yesterday"]).err().unwrap();
    assert!(matches!(err, Error::InvalidOperand { .. }));
}

#[test]
fn date_relative_filters_use_the_clock() {
    let report = Report::empty();
    report.add_time_entry(date(2013, 1, 16)); // today
    report.add_time_entry(date(2013, 1, 14)); // Monday, same week
    report.add_cost_entry(date(2013, 1, 13)); // Sunday, previous week
    report.add_cost_entry(date(2012, 12, 1));

    let count = |op: &str, values: &[&str]| {
        let mut query = report.query();
        query.filter("spent_on", op, values).unwrap();
        query.result().unwrap().count()
    };
    assert_eq!(count("t", NONE), 1);
    assert_eq!(count("w", NONE), 2);
    assert_eq!(count("<t-", &["3"]), 3);
    assert_eq!(count(">t-", &["30"]), 1);
    assert_eq!(count("t-", &["2"]), 1);
    assert_eq!(count("<d", &["2013-01-14"]), 2);
    assert_eq!(count("<>d", &["2013-01-01", "2013-01-31"]), 3);
}

#[test]
fn entry_kinds_filter_by_reference() {
    let report = Report::new();
    let count = |field: &str, value: String| {
        let mut query = report.query();
        query.filter(field, "=", &[value]).unwrap();
        query.result().unwrap().count()
    };
    assert_eq!(count("activity_id", report.activity.to_string()), 1);
    assert_eq!(count("activity_id", "-1".into()), 1);
    assert_eq!(count("cost_type_id", report.cost_type.to_string()), 1);
    assert_eq!(count("cost_type_id", "-1".into()), 1);
}

#[test]
fn nullable_references_support_null_operators() {
    let report = Report::new();
    let mut none = report.query();
    none.filter("assigned_to_id", "!*", NONE).unwrap();
    assert_eq!(none.result().unwrap().count(), 2);

    let mut any = report.query();
    any.filter("assigned_to_id", "*", NONE).unwrap();
    assert_eq!(any.result().unwrap().count(), 0);
}

#[test]
fn total_costs_sum_real_costs() {
    let report = Report::new();
    report.add_cost_entry(date(2013, 1, 1));
    assert_eq!(report.query().result().unwrap().total_costs(), 40.0);
}

/// Ids shared by the issues of [`issue_fields_report`].
struct IssueRefs {
    tracker: i64,
    priority: i64,
    author: i64,
    assignee: i64,
    category: i64,
    version: i64,
}

/// Three issues with every optional reference set, one entry each, next
/// to the entries of [`Report::new`] and one issue left at its defaults.
/// Only the first issue carries start and due dates.
fn issue_fields_report() -> (Report, IssueRefs) {
    let report = Report::new();
    let db = &report.db;
    let refs = IssueRefs {
        tracker: db.insert_tracker(&Named::new("Feature")).unwrap(),
        priority: db.insert_priority(&Named::new("Urgent")).unwrap(),
        author: db.insert_user(&User::new("bob", "Bob")).unwrap(),
        assignee: db.insert_user(&User::new("carol", "Carol")).unwrap(),
        category: db
            .insert_category(&ProjectScoped::new(report.project, "Backend"))
            .unwrap(),
        version: db
            .insert_version(&ProjectScoped::new(report.project, "1.0"))
            .unwrap(),
    };

    for n in 0..3 {
        let mut issue = Issue::new(
            report.project,
            refs.tracker,
            report.open_status,
            refs.priority,
            refs.author,
            format!("feature {n}"),
        );
        issue.assigned_to_id = Some(refs.assignee);
        issue.category_id = Some(refs.category);
        issue.fixed_version_id = Some(refs.version);
        if n == 0 {
            issue.start_date = Some(date(2013, 1, 2));
            issue.due_date = Some(date(2013, 2, 1));
        }
        let id = db.insert_issue(&issue).unwrap();
        report.add_issue_time_entry(id, date(2013, 1, 10));
    }

    let plain = report.add_issue("plain", report.open_status);
    report.add_issue_time_entry(plain, date(2013, 1, 10));
    (report, refs)
}

#[parameterized(
    tracker = { "tracker_id" },
    priority = { "priority_id" },
    author = { "author_id" },
    assignee = { "assigned_to_id" },
    category = { "category_id" },
    version = { "fixed_version_id" },
)]
fn issue_references_filter_through_the_issue(field: &str) {
    let (report, refs) = issue_fields_report();
    let id = match field {
        "tracker_id" => refs.tracker,
        "priority_id" => refs.priority,
        "author_id" => refs.author,
        "assigned_to_id" => refs.assignee,
        "category_id" => refs.category,
        _ => refs.version,
    };
    let mut query = report.query();
    query.filter(field, "=", &[id.to_string()]).unwrap();
    assert_eq!(query.result().unwrap().count(), 3);
}

#[parameterized(
    start = { "start_date", "2013-01-02" },
    due = { "due_date", "2013-02-01" },
)]
fn issue_dates_filter_on_day(field: &str, day: &str) {
    let (report, _) = issue_fields_report();
    let mut query = report.query();
    query.filter(field, "=d", &[day]).unwrap();
    assert_eq!(query.result().unwrap().count(), 1);
}

#[test]
fn updated_on_after_twenty_years_ago_keeps_everything() {
    let (report, _) = issue_fields_report();
    let long_ago = today().with_year(today().year() - 20).unwrap().to_string();

    let mut after = report.query();
    after.filter("updated_on", ">d", &[&long_ago]).unwrap();
    assert_eq!(after.result().unwrap().count(), report.count());
    assert_eq!(report.count(), 6);

    let mut before = report.query();
    before.filter("updated_on", "<d", &[&long_ago]).unwrap();
    assert_eq!(before.result().unwrap().count(), 0);
}

#[test]
fn created_on_today_uses_entry_timestamps() {
    let report = Report::new();
    let morning = Utc.with_ymd_and_hms(2013, 1, 16, 9, 30, 0).unwrap();
    let entry = TimeEntry::new(report.project, report.user, report.activity, 1.0, date(2013, 1, 1))
        .with_timestamps(morning, morning);
    report.db.insert_time_entry(&entry).unwrap();

    let mut query = report.query();
    query.filter("created_on", "t", NONE).unwrap();
    let result = query.result().unwrap();
    assert_eq!(result.count(), 1);
    assert_eq!(result.entries()[0].created_on, morning);
}
