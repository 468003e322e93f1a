// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! SQLite-backed store for cost reports.
//!
//! The [`Database`] struct holds projects, users, issues, time entries, cost
//! entries and custom field metadata, and implements the engine's consumed
//! interfaces: [`EntrySource`], [`CustomFieldSource`] and
//! [`ReferenceCatalog`].

use chrono::{DateTime, Duration, NaiveDate, SecondsFormat, SubsecRound, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::custom_field::{CacheStamp, CustomField, CustomFieldKind};
use crate::entry::{CostEntry, IssueFields, RawEntry, TimeEntry};
use crate::error::{Error, Result};
use crate::record::{
    Fixture, ImportSummary, Issue, IssueStatus, Named, Project, ProjectScoped, User,
};
use crate::source::{CustomFieldSource, EntrySource, Reference, ReferenceCatalog, ReferenceKind};

/// SQL schema for the cost report database.
pub const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS projects (
    id INTEGER PRIMARY KEY,
    name TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY,
    login TEXT NOT NULL,
    name TEXT NOT NULL,
    anonymous INTEGER NOT NULL DEFAULT 0
);

CREATE TABLE IF NOT EXISTS issue_statuses (
    id INTEGER PRIMARY KEY,
    name TEXT NOT NULL,
    is_closed INTEGER NOT NULL DEFAULT 0
);

-- Plain named enumerations
CREATE TABLE IF NOT EXISTS trackers (id INTEGER PRIMARY KEY, name TEXT NOT NULL);
CREATE TABLE IF NOT EXISTS priorities (id INTEGER PRIMARY KEY, name TEXT NOT NULL);
CREATE TABLE IF NOT EXISTS activities (id INTEGER PRIMARY KEY, name TEXT NOT NULL);
CREATE TABLE IF NOT EXISTS cost_types (id INTEGER PRIMARY KEY, name TEXT NOT NULL);

CREATE TABLE IF NOT EXISTS issue_categories (
    id INTEGER PRIMARY KEY,
    project_id INTEGER NOT NULL,
    name TEXT NOT NULL,
    FOREIGN KEY (project_id) REFERENCES projects(id)
);

CREATE TABLE IF NOT EXISTS versions (
    id INTEGER PRIMARY KEY,
    project_id INTEGER NOT NULL,
    name TEXT NOT NULL,
    FOREIGN KEY (project_id) REFERENCES projects(id)
);

CREATE TABLE IF NOT EXISTS issues (
    id INTEGER PRIMARY KEY,
    project_id INTEGER NOT NULL,
    tracker_id INTEGER NOT NULL,
    status_id INTEGER NOT NULL,
    priority_id INTEGER NOT NULL,
    author_id INTEGER NOT NULL,
    assigned_to_id INTEGER,
    category_id INTEGER,
    fixed_version_id INTEGER,
    subject TEXT NOT NULL,
    start_date TEXT,
    due_date TEXT,
    created_on TEXT NOT NULL,
    updated_on TEXT NOT NULL,
    FOREIGN KEY (project_id) REFERENCES projects(id),
    FOREIGN KEY (tracker_id) REFERENCES trackers(id),
    FOREIGN KEY (status_id) REFERENCES issue_statuses(id),
    FOREIGN KEY (priority_id) REFERENCES priorities(id),
    FOREIGN KEY (author_id) REFERENCES users(id),
    FOREIGN KEY (assigned_to_id) REFERENCES users(id),
    FOREIGN KEY (category_id) REFERENCES issue_categories(id),
    FOREIGN KEY (fixed_version_id) REFERENCES versions(id)
);

CREATE TABLE IF NOT EXISTS time_entries (
    id INTEGER PRIMARY KEY,
    project_id INTEGER NOT NULL,
    user_id INTEGER NOT NULL,
    issue_id INTEGER,
    activity_id INTEGER NOT NULL,
    hours REAL NOT NULL,
    spent_on TEXT NOT NULL,
    overridden_costs REAL,
    costs REAL,
    created_on TEXT NOT NULL,
    updated_on TEXT NOT NULL,
    FOREIGN KEY (project_id) REFERENCES projects(id),
    FOREIGN KEY (user_id) REFERENCES users(id),
    FOREIGN KEY (issue_id) REFERENCES issues(id),
    FOREIGN KEY (activity_id) REFERENCES activities(id)
);

CREATE TABLE IF NOT EXISTS cost_entries (
    id INTEGER PRIMARY KEY,
    project_id INTEGER NOT NULL,
    user_id INTEGER NOT NULL,
    issue_id INTEGER,
    cost_type_id INTEGER NOT NULL,
    units REAL NOT NULL,
    spent_on TEXT NOT NULL,
    overridden_costs REAL,
    costs REAL,
    created_on TEXT NOT NULL,
    updated_on TEXT NOT NULL,
    FOREIGN KEY (project_id) REFERENCES projects(id),
    FOREIGN KEY (user_id) REFERENCES users(id),
    FOREIGN KEY (issue_id) REFERENCES issues(id),
    FOREIGN KEY (cost_type_id) REFERENCES cost_types(id)
);

CREATE TABLE IF NOT EXISTS custom_fields (
    id INTEGER PRIMARY KEY,
    name TEXT NOT NULL UNIQUE,
    kind TEXT NOT NULL DEFAULT 'issue',
    format TEXT NOT NULL,
    searchable INTEGER NOT NULL DEFAULT 0,
    possible_values TEXT NOT NULL DEFAULT '[]',
    created_on TEXT NOT NULL,
    updated_on TEXT NOT NULL
);

-- Issue custom values, stored as text
CREATE TABLE IF NOT EXISTS custom_values (
    custom_field_id INTEGER NOT NULL,
    issue_id INTEGER NOT NULL,
    value TEXT NOT NULL,
    PRIMARY KEY (custom_field_id, issue_id),
    FOREIGN KEY (custom_field_id) REFERENCES custom_fields(id) ON DELETE CASCADE,
    FOREIGN KEY (issue_id) REFERENCES issues(id) ON DELETE CASCADE
);

-- High-water marks of metadata timestamps
CREATE TABLE IF NOT EXISTS stamps (
    name TEXT PRIMARY KEY,
    at TEXT NOT NULL
);

-- Indexes
CREATE INDEX IF NOT EXISTS idx_time_entries_issue ON time_entries(issue_id);
CREATE INDEX IF NOT EXISTS idx_cost_entries_issue ON cost_entries(issue_id);
CREATE INDEX IF NOT EXISTS idx_custom_values_issue ON custom_values(issue_id);
CREATE INDEX IF NOT EXISTS idx_custom_fields_updated ON custom_fields(updated_on);
"#;

/// Issue columns joined onto entries, in [`issue_fields`] order.
const ISSUE_COLUMNS: &str = "i.id, i.author_id, i.status_id, s.is_closed, i.tracker_id,
    i.priority_id, i.assigned_to_id, i.category_id, i.fixed_version_id, i.subject,
    i.start_date, i.due_date";

const CUSTOM_FIELD_COLUMNS: &str =
    "id, name, kind, format, searchable, possible_values, created_on, updated_on";

fn conversion_error(message: String) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(
        0,
        rusqlite::types::Type::Text,
        Box::new(Error::CorruptedData(message)),
    )
}

/// Parse a string value from the database, returning a rusqlite error on parse failure.
fn parse_db<T: std::str::FromStr>(
    value: &str,
    column: &str,
) -> std::result::Result<T, rusqlite::Error> {
    value
        .parse()
        .map_err(|_| conversion_error(format!("invalid value '{value}' in column '{column}'")))
}

/// Parse an RFC3339 timestamp from the database.
fn parse_timestamp(
    value: &str,
    column: &str,
) -> std::result::Result<DateTime<Utc>, rusqlite::Error> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| conversion_error(format!("invalid timestamp '{value}' in column '{column}'")))
}

fn parse_date(value: &str, column: &str) -> std::result::Result<NaiveDate, rusqlite::Error> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| conversion_error(format!("invalid date '{value}' in column '{column}'")))
}

fn parse_date_opt(
    value: Option<String>,
    column: &str,
) -> std::result::Result<Option<NaiveDate>, rusqlite::Error> {
    value.map(|v| parse_date(&v, column)).transpose()
}

/// Fixed-width RFC3339 so timestamps order correctly as text.
fn timestamp(t: &DateTime<Utc>) -> String {
    t.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn date(d: &NaiveDate) -> String {
    d.format("%Y-%m-%d").to_string()
}

fn date_opt(d: Option<&NaiveDate>) -> Option<String> {
    d.map(date)
}

/// Read the joined issue columns starting at `offset`.
fn issue_fields(row: &Row, offset: usize) -> rusqlite::Result<Option<IssueFields>> {
    let Some(id) = row.get::<_, Option<i64>>(offset)? else {
        return Ok(None);
    };
    let start: Option<String> = row.get(offset + 10)?;
    let due: Option<String> = row.get(offset + 11)?;
    Ok(Some(IssueFields {
        id,
        author_id: row.get(offset + 1)?,
        status_id: row.get(offset + 2)?,
        status_closed: row.get::<_, Option<bool>>(offset + 3)?.unwrap_or(false),
        tracker_id: row.get(offset + 4)?,
        priority_id: row.get(offset + 5)?,
        assigned_to_id: row.get(offset + 6)?,
        category_id: row.get(offset + 7)?,
        fixed_version_id: row.get(offset + 8)?,
        subject: row.get(offset + 9)?,
        start_date: parse_date_opt(start, "start_date")?,
        due_date: parse_date_opt(due, "due_date")?,
        custom_values: BTreeMap::new(),
    }))
}

fn custom_field_from_row(row: &Row) -> rusqlite::Result<CustomField> {
    let kind: String = row.get(2)?;
    let format: String = row.get(3)?;
    let possible: String = row.get(5)?;
    let created: String = row.get(6)?;
    let updated: String = row.get(7)?;
    Ok(CustomField {
        id: row.get(0)?,
        name: row.get(1)?,
        kind: parse_db(&kind, "kind")?,
        format: parse_db(&format, "format")?,
        searchable: row.get(4)?,
        possible_values: serde_json::from_str(&possible).map_err(|_| {
            conversion_error(format!("invalid value '{possible}' in column 'possible_values'"))
        })?,
        created_on: parse_timestamp(&created, "created_on")?,
        updated_on: parse_timestamp(&updated, "updated_on")?,
    })
}

/// Run schema creation on a database connection.
pub fn run_migrations(conn: &Connection) -> Result<()> {
    conn.execute_batch(SCHEMA)?;
    Ok(())
}

/// SQLite database connection with cost report operations.
pub struct Database {
    /// The underlying SQLite connection.
    pub conn: Connection,
    /// Canonical file path, or a process-unique name for in-memory stores.
    source_id: String,
}

impl Database {
    /// Open a database connection at the given path, creating and migrating if needed.
    pub fn open(path: &Path) -> Result<Self> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(path)?;

        // Enable foreign keys and WAL mode for concurrency
        conn.execute_batch(
            "PRAGMA foreign_keys = ON;
             PRAGMA journal_mode = WAL;
             PRAGMA busy_timeout = 5000;",
        )?;

        let source_id = path
            .canonicalize()
            .unwrap_or_else(|_| path.to_path_buf())
            .display()
            .to_string();
        let db = Database { conn, source_id };
        run_migrations(&db.conn)?;
        Ok(db)
    }

    /// Open an in-memory database (for testing).
    pub fn open_in_memory() -> Result<Self> {
        static NEXT: AtomicU64 = AtomicU64::new(1);

        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        let source_id = format!(":memory:{}", NEXT.fetch_add(1, Ordering::Relaxed));
        let db = Database { conn, source_id };
        run_migrations(&db.conn)?;
        Ok(db)
    }

    // Reference records

    pub fn insert_project(&self, project: &Project) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO projects (id, name) VALUES (NULLIF(?1, 0), ?2)",
            params![project.id, project.name],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    pub fn insert_user(&self, user: &User) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO users (id, login, name, anonymous) VALUES (NULLIF(?1, 0), ?2, ?3, ?4)",
            params![user.id, user.login, user.name, user.anonymous],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Look up a user by login.
    pub fn find_user(&self, login: &str) -> Result<Option<User>> {
        let user = self
            .conn
            .query_row(
                "SELECT id, login, name, anonymous FROM users WHERE login = ?1",
                params![login],
                |row| {
                    Ok(User {
                        id: row.get(0)?,
                        login: row.get(1)?,
                        name: row.get(2)?,
                        anonymous: row.get(3)?,
                    })
                },
            )
            .optional()?;
        Ok(user)
    }

    pub fn insert_status(&self, status: &IssueStatus) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO issue_statuses (id, name, is_closed) VALUES (NULLIF(?1, 0), ?2, ?3)",
            params![status.id, status.name, status.is_closed],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    pub fn insert_tracker(&self, tracker: &Named) -> Result<i64> {
        self.insert_named("trackers", tracker)
    }

    pub fn insert_priority(&self, priority: &Named) -> Result<i64> {
        self.insert_named("priorities", priority)
    }

    pub fn insert_activity(&self, activity: &Named) -> Result<i64> {
        self.insert_named("activities", activity)
    }

    pub fn insert_cost_type(&self, cost_type: &Named) -> Result<i64> {
        self.insert_named("cost_types", cost_type)
    }

    fn insert_named(&self, table: &str, record: &Named) -> Result<i64> {
        let sql = format!("INSERT INTO {table} (id, name) VALUES (NULLIF(?1, 0), ?2)");
        self.conn.execute(&sql, params![record.id, record.name])?;
        Ok(self.conn.last_insert_rowid())
    }

    pub fn insert_category(&self, category: &ProjectScoped) -> Result<i64> {
        self.insert_scoped("issue_categories", category)
    }

    pub fn insert_version(&self, version: &ProjectScoped) -> Result<i64> {
        self.insert_scoped("versions", version)
    }

    fn insert_scoped(&self, table: &str, record: &ProjectScoped) -> Result<i64> {
        let sql =
            format!("INSERT INTO {table} (id, project_id, name) VALUES (NULLIF(?1, 0), ?2, ?3)");
        self.conn
            .execute(&sql, params![record.id, record.project_id, record.name])?;
        Ok(self.conn.last_insert_rowid())
    }

    // Issues

    pub fn insert_issue(&self, issue: &Issue) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO issues (id, project_id, tracker_id, status_id, priority_id, author_id,
             assigned_to_id, category_id, fixed_version_id, subject, start_date, due_date,
             created_on, updated_on)
             VALUES (NULLIF(?1, 0), ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)",
            params![
                issue.id,
                issue.project_id,
                issue.tracker_id,
                issue.status_id,
                issue.priority_id,
                issue.author_id,
                issue.assigned_to_id,
                issue.category_id,
                issue.fixed_version_id,
                issue.subject,
                date_opt(issue.start_date.as_ref()),
                date_opt(issue.due_date.as_ref()),
                timestamp(&issue.created_on),
                timestamp(&issue.updated_on),
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Move an issue to another status.
    pub fn set_issue_status(&self, issue_id: i64, status_id: i64) -> Result<()> {
        let affected = self.conn.execute(
            "UPDATE issues SET status_id = ?1, updated_on = ?2 WHERE id = ?3",
            params![status_id, timestamp(&Utc::now()), issue_id],
        )?;
        if affected == 0 {
            return Err(Error::NotFound {
                kind: "issue",
                id: issue_id,
            });
        }
        Ok(())
    }

    // Entries

    pub fn insert_time_entry(&self, entry: &TimeEntry) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO time_entries (id, project_id, user_id, issue_id, activity_id, hours,
             spent_on, overridden_costs, costs, created_on, updated_on)
             VALUES (NULLIF(?1, 0), ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
            params![
                entry.id,
                entry.project_id,
                entry.user_id,
                entry.issue_id,
                entry.activity_id,
                entry.hours,
                date(&entry.spent_on),
                entry.overridden_costs,
                entry.costs,
                timestamp(&entry.created_on),
                timestamp(&entry.updated_on),
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    pub fn insert_cost_entry(&self, entry: &CostEntry) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO cost_entries (id, project_id, user_id, issue_id, cost_type_id, units,
             spent_on, overridden_costs, costs, created_on, updated_on)
             VALUES (NULLIF(?1, 0), ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
            params![
                entry.id,
                entry.project_id,
                entry.user_id,
                entry.issue_id,
                entry.cost_type_id,
                entry.units,
                date(&entry.spent_on),
                entry.overridden_costs,
                entry.costs,
                timestamp(&entry.created_on),
                timestamp(&entry.updated_on),
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Number of stored time entries and cost entries.
    pub fn entry_counts(&self) -> Result<(usize, usize)> {
        let (time, cost): (i64, i64) = self.conn.query_row(
            "SELECT (SELECT COUNT(*) FROM time_entries), (SELECT COUNT(*) FROM cost_entries)",
            [],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )?;
        Ok((
            usize::try_from(time).unwrap_or_default(),
            usize::try_from(cost).unwrap_or_default(),
        ))
    }

    fn scan_time_entries(&self) -> Result<Vec<(TimeEntry, Option<IssueFields>)>> {
        let sql = format!(
            "SELECT t.id, t.project_id, t.user_id, t.issue_id, t.activity_id, t.hours,
                    t.spent_on, t.overridden_costs, t.costs, t.created_on, t.updated_on,
                    {ISSUE_COLUMNS}
             FROM time_entries t
             LEFT JOIN issues i ON i.id = t.issue_id
             LEFT JOIN issue_statuses s ON s.id = i.status_id
             ORDER BY t.id"
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt
            .query_map([], |row| {
                let spent: String = row.get(6)?;
                let created: String = row.get(9)?;
                let updated: String = row.get(10)?;
                let entry = TimeEntry {
                    id: row.get(0)?,
                    project_id: row.get(1)?,
                    user_id: row.get(2)?,
                    issue_id: row.get(3)?,
                    activity_id: row.get(4)?,
                    hours: row.get(5)?,
                    spent_on: parse_date(&spent, "spent_on")?,
                    overridden_costs: row.get(7)?,
                    costs: row.get(8)?,
                    created_on: parse_timestamp(&created, "created_on")?,
                    updated_on: parse_timestamp(&updated, "updated_on")?,
                };
                Ok((entry, issue_fields(row, 11)?))
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    fn scan_cost_entries(&self) -> Result<Vec<(CostEntry, Option<String>, Option<IssueFields>)>> {
        let sql = format!(
            "SELECT c.id, c.project_id, c.user_id, c.issue_id, c.cost_type_id, c.units,
                    c.spent_on, c.overridden_costs, c.costs, c.created_on, c.updated_on,
                    ct.name, {ISSUE_COLUMNS}
             FROM cost_entries c
             LEFT JOIN cost_types ct ON ct.id = c.cost_type_id
             LEFT JOIN issues i ON i.id = c.issue_id
             LEFT JOIN issue_statuses s ON s.id = i.status_id
             ORDER BY c.id"
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt
            .query_map([], |row| {
                let spent: String = row.get(6)?;
                let created: String = row.get(9)?;
                let updated: String = row.get(10)?;
                let entry = CostEntry {
                    id: row.get(0)?,
                    project_id: row.get(1)?,
                    user_id: row.get(2)?,
                    issue_id: row.get(3)?,
                    cost_type_id: row.get(4)?,
                    units: row.get(5)?,
                    spent_on: parse_date(&spent, "spent_on")?,
                    overridden_costs: row.get(7)?,
                    costs: row.get(8)?,
                    created_on: parse_timestamp(&created, "created_on")?,
                    updated_on: parse_timestamp(&updated, "updated_on")?,
                };
                Ok((entry, row.get(11)?, issue_fields(row, 12)?))
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    /// Custom values of every issue, keyed by issue id.
    fn issue_custom_values(&self) -> Result<HashMap<i64, BTreeMap<i64, String>>> {
        let mut stmt = self
            .conn
            .prepare("SELECT issue_id, custom_field_id, value FROM custom_values")?;
        let rows = stmt
            .query_map([], |row| {
                Ok((row.get::<_, i64>(0)?, row.get::<_, i64>(1)?, row.get::<_, String>(2)?))
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        let mut values: HashMap<i64, BTreeMap<i64, String>> = HashMap::new();
        for (issue_id, field_id, value) in rows {
            values.entry(issue_id).or_default().insert(field_id, value);
        }
        Ok(values)
    }

    // Custom fields

    /// Next metadata timestamp, strictly after every one handed out before.
    fn next_custom_field_stamp(&self) -> Result<DateTime<Utc>> {
        let last: Option<String> = self
            .conn
            .query_row(
                "SELECT at FROM stamps WHERE name = 'custom_fields'",
                [],
                |row| row.get(0),
            )
            .optional()?;
        let now = Utc::now().trunc_subsecs(6);
        let next = match last {
            Some(s) => {
                let last = parse_timestamp(&s, "at")?;
                if now > last {
                    now
                } else {
                    last + Duration::microseconds(1)
                }
            }
            None => now,
        };
        self.conn.execute(
            "INSERT INTO stamps (name, at) VALUES ('custom_fields', ?1)
             ON CONFLICT(name) DO UPDATE SET at = excluded.at",
            params![timestamp(&next)],
        )?;
        Ok(next)
    }

    /// Create a custom field, returning its id.
    pub fn create_custom_field(&self, field: &CustomField) -> Result<i64> {
        let at = self.next_custom_field_stamp()?;
        self.conn.execute(
            "INSERT INTO custom_fields (id, name, kind, format, searchable, possible_values,
             created_on, updated_on)
             VALUES (NULLIF(?1, 0), ?2, ?3, ?4, ?5, ?6, ?7, ?7)",
            params![
                field.id,
                field.name,
                field.kind.as_str(),
                field.format.as_str(),
                field.searchable,
                serde_json::to_string(&field.possible_values)?,
                timestamp(&at),
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Update a custom field's definition.
    pub fn update_custom_field(&self, field: &CustomField) -> Result<()> {
        let at = self.next_custom_field_stamp()?;
        let affected = self.conn.execute(
            "UPDATE custom_fields SET name = ?1, kind = ?2, format = ?3, searchable = ?4,
             possible_values = ?5, updated_on = ?6 WHERE id = ?7",
            params![
                field.name,
                field.kind.as_str(),
                field.format.as_str(),
                field.searchable,
                serde_json::to_string(&field.possible_values)?,
                timestamp(&at),
                field.id,
            ],
        )?;
        if affected == 0 {
            return Err(Error::NotFound {
                kind: "custom field",
                id: field.id,
            });
        }
        Ok(())
    }

    /// Delete a custom field and its values.
    pub fn delete_custom_field(&self, id: i64) -> Result<()> {
        let affected = self
            .conn
            .execute("DELETE FROM custom_fields WHERE id = ?1", params![id])?;
        if affected == 0 {
            return Err(Error::NotFound {
                kind: "custom field",
                id,
            });
        }
        Ok(())
    }

    pub fn custom_field(&self, id: i64) -> Result<CustomField> {
        let sql = format!("SELECT {CUSTOM_FIELD_COLUMNS} FROM custom_fields WHERE id = ?1");
        let field = self
            .conn
            .query_row(&sql, params![id], custom_field_from_row)
            .optional()?;
        field.ok_or(Error::NotFound {
            kind: "custom field",
            id,
        })
    }

    pub fn custom_field_by_name(&self, name: &str) -> Result<CustomField> {
        let sql = format!("SELECT {CUSTOM_FIELD_COLUMNS} FROM custom_fields WHERE name = ?1");
        let field = self
            .conn
            .query_row(&sql, params![name], custom_field_from_row)
            .optional()?;
        field.ok_or_else(|| Error::CustomFieldNotFound(name.to_string()))
    }

    /// Set an issue's value for an issue custom field.
    pub fn set_custom_value(&self, custom_field_id: i64, issue_id: i64, value: &str) -> Result<()> {
        let field = self.custom_field(custom_field_id)?;
        if field.kind != CustomFieldKind::Issue {
            return Err(Error::InvalidFieldKind(field.kind.to_string()));
        }
        self.conn.execute(
            "INSERT INTO custom_values (custom_field_id, issue_id, value) VALUES (?1, ?2, ?3)
             ON CONFLICT(custom_field_id, issue_id) DO UPDATE SET value = excluded.value",
            params![custom_field_id, issue_id, value],
        )?;
        Ok(())
    }

    // Bulk loading

    /// Load a fixture in one transaction.
    pub fn import(&self, fixture: &Fixture) -> Result<ImportSummary> {
        let tx = self.conn.unchecked_transaction()?;
        let mut records = 0;
        for project in &fixture.projects {
            self.insert_project(project)?;
            records += 1;
        }
        for user in &fixture.users {
            self.insert_user(user)?;
            records += 1;
        }
        for status in &fixture.statuses {
            self.insert_status(status)?;
            records += 1;
        }
        for (table, named) in [
            ("trackers", &fixture.trackers),
            ("priorities", &fixture.priorities),
            ("activities", &fixture.activities),
            ("cost_types", &fixture.cost_types),
        ] {
            for record in named {
                self.insert_named(table, record)?;
                records += 1;
            }
        }
        for category in &fixture.categories {
            self.insert_category(category)?;
            records += 1;
        }
        for version in &fixture.versions {
            self.insert_version(version)?;
            records += 1;
        }
        for issue in &fixture.issues {
            self.insert_issue(issue)?;
            records += 1;
        }
        for field in &fixture.custom_fields {
            self.create_custom_field(field)?;
        }
        for value in &fixture.custom_values {
            self.set_custom_value(value.custom_field_id, value.issue_id, &value.value)?;
            records += 1;
        }
        for entry in &fixture.time_entries {
            self.insert_time_entry(entry)?;
        }
        for entry in &fixture.cost_entries {
            self.insert_cost_entry(entry)?;
        }
        tx.commit()?;
        Ok(ImportSummary {
            records,
            custom_fields: fixture.custom_fields.len(),
            time_entries: fixture.time_entries.len(),
            cost_entries: fixture.cost_entries.len(),
        })
    }
}

impl EntrySource for Database {
    fn scan(&self) -> Result<Vec<RawEntry>> {
        let custom_values = self.issue_custom_values()?;
        let attach = |issue: Option<IssueFields>| {
            issue.map(|mut i| {
                if let Some(values) = custom_values.get(&i.id) {
                    i.custom_values = values.clone();
                }
                i
            })
        };

        let mut entries: Vec<RawEntry> = self
            .scan_time_entries()?
            .into_iter()
            .map(|(entry, issue)| RawEntry::Time {
                entry,
                issue: attach(issue),
            })
            .collect();
        entries.extend(
            self.scan_cost_entries()?
                .into_iter()
                .map(|(entry, cost_type, issue)| RawEntry::Cost {
                    entry,
                    cost_type,
                    issue: attach(issue),
                }),
        );
        Ok(entries)
    }
}

impl CustomFieldSource for Database {
    fn source_id(&self) -> &str {
        &self.source_id
    }

    fn custom_fields(&self) -> Result<Vec<CustomField>> {
        let sql = format!("SELECT {CUSTOM_FIELD_COLUMNS} FROM custom_fields ORDER BY id");
        let mut stmt = self.conn.prepare(&sql)?;
        let fields = stmt
            .query_map([], custom_field_from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(fields)
    }

    fn custom_field_stamp(&self) -> Result<CacheStamp> {
        let (count, latest): (i64, Option<String>) = self.conn.query_row(
            "SELECT COUNT(*), MAX(updated_on) FROM custom_fields",
            [],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )?;
        let latest = latest
            .map(|s| parse_timestamp(&s, "updated_on"))
            .transpose()?;
        Ok(CacheStamp::new(usize::try_from(count).unwrap_or_default(), latest))
    }
}

impl ReferenceCatalog for Database {
    fn references(&self, kind: ReferenceKind) -> Result<Vec<Reference>> {
        let sql = match kind {
            ReferenceKind::Project => "SELECT id, name, 0 FROM projects ORDER BY name",
            ReferenceKind::User => "SELECT id, name, anonymous FROM users ORDER BY name",
            ReferenceKind::Issue => {
                "SELECT id, '#' || id || ' ' || subject, 0 FROM issues ORDER BY id"
            }
            ReferenceKind::CostType => "SELECT id, name, 0 FROM cost_types ORDER BY name",
            ReferenceKind::Activity => "SELECT id, name, 0 FROM activities ORDER BY id",
            ReferenceKind::Status => "SELECT id, name, 0 FROM issue_statuses ORDER BY id",
            ReferenceKind::Tracker => "SELECT id, name, 0 FROM trackers ORDER BY id",
            ReferenceKind::Priority => "SELECT id, name, 0 FROM priorities ORDER BY id",
            ReferenceKind::Category => "SELECT id, name, 0 FROM issue_categories ORDER BY name",
            ReferenceKind::Version => "SELECT id, name, 0 FROM versions ORDER BY name",
        };
        let mut stmt = self.conn.prepare(sql)?;
        let references = stmt
            .query_map([], |row| {
                Ok(Reference {
                    id: row.get(0)?,
                    label: row.get(1)?,
                    anonymous: row.get(2)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(references)
    }
}

#[cfg(test)]
#[path = "db_tests.rs"]
mod tests;
