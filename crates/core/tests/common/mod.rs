// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]
#![allow(dead_code)]

use chrono::NaiveDate;
use cq_core::{
    CostEntry, Database, FilterRegistry, FixedClock, Issue, IssueStatus, Named, Project, Query,
    TimeEntry, User,
};

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// "Today" for every scenario: Wednesday 2013-01-16.
pub fn today() -> NaiveDate {
    date(2013, 1, 16)
}

/// An in-memory store with a private registry and a pinned clock.
pub struct Report {
    pub db: Database,
    pub registry: FilterRegistry,
    pub project: i64,
    pub user: i64,
    pub open_status: i64,
    pub closed_status: i64,
    pub tracker: i64,
    pub priority: i64,
    pub activity: i64,
    pub cost_type: i64,
}

impl Report {
    /// Seeds one project, one user, one of each enumeration and two
    /// statuses, then one time entry and one cost entry.
    pub fn new() -> Self {
        let report = Report::empty();
        report.add_time_entry(date(2013, 1, 15));
        report.add_cost_entry(date(2013, 1, 14));
        report
    }

    /// Seeds reference records only.
    pub fn empty() -> Self {
        let db = Database::open_in_memory().unwrap();
        let project = db.insert_project(&Project::new("Apollo")).unwrap();
        let user = db.insert_user(&User::new("alice", "Alice")).unwrap();
        db.insert_user(&User::anonymous()).unwrap();
        let open_status = db.insert_status(&IssueStatus::new("New", false)).unwrap();
        let closed_status = db.insert_status(&IssueStatus::new("Closed", true)).unwrap();
        let tracker = db.insert_tracker(&Named::new("Bug")).unwrap();
        let priority = db.insert_priority(&Named::new("Normal")).unwrap();
        let activity = db.insert_activity(&Named::new("Design")).unwrap();
        let cost_type = db.insert_cost_type(&Named::new("Hardware")).unwrap();
        Report {
            db,
            registry: FilterRegistry::new(),
            project,
            user,
            open_status,
            closed_status,
            tracker,
            priority,
            activity,
            cost_type,
        }
    }

    pub fn query(&self) -> Query<'_, Database, FixedClock> {
        Query::new(&self.db)
            .with_registry(&self.registry)
            .with_clock(FixedClock::on(today()))
    }

    pub fn count(&self) -> usize {
        self.query().result().unwrap().count()
    }

    pub fn add_issue(&self, subject: &str, status: i64) -> i64 {
        let issue = Issue::new(
            self.project,
            self.tracker,
            status,
            self.priority,
            self.user,
            subject,
        );
        self.db.insert_issue(&issue).unwrap()
    }

    pub fn add_time_entry(&self, spent_on: NaiveDate) -> i64 {
        let entry = TimeEntry::new(self.project, self.user, self.activity, 1.0, spent_on);
        self.db.insert_time_entry(&entry).unwrap()
    }

    pub fn add_issue_time_entry(&self, issue: i64, spent_on: NaiveDate) -> i64 {
        let entry =
            TimeEntry::new(self.project, self.user, self.activity, 1.0, spent_on).with_issue(issue);
        self.db.insert_time_entry(&entry).unwrap()
    }

    pub fn add_cost_entry(&self, spent_on: NaiveDate) -> i64 {
        let entry = CostEntry::new(self.project, self.user, self.cost_type, 2.0, spent_on)
            .with_costs(Some(20.0), None);
        self.db.insert_cost_entry(&entry).unwrap()
    }

    /// A project id with no row.
    pub fn missing_project(&self) -> i64 {
        self.project + 1000
    }
}
