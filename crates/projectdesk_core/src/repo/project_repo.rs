//! Project persistence and joined read views.
//!
//! # Invariants
//! - `insert` never overwrites: a duplicate project number is a
//!   [`RepoError::Conflict`] from the primary-key constraint.
//! - View decoding applies read-side defaults: negative total price clamps
//!   to zero, blank descriptions and missing joined names get placeholders.

use super::{parse_date, parse_decimal, RepoError, RepoResult};
use crate::model::project::{Project, ProjectView, DEFAULT_DESCRIPTION};
use rusqlite::{params, Connection, OptionalExtension, Row};
use rust_decimal::Decimal;

const NO_CUSTOMER: &str = "No Customer";
const NO_CONTACT: &str = "No Contact Person";
const NO_SERVICE: &str = "No Service";
const NO_STAFF: &str = "No Staff";
const NO_ROLE: &str = "No Role";
const NO_STATUS: &str = "No Status";

const PROJECT_SELECT_SQL: &str = "SELECT
    project_number,
    name,
    start_date,
    end_date,
    customer_id,
    service_id,
    staff_id,
    status_id,
    total_price,
    description
FROM projects";

const VIEW_SELECT_SQL: &str = "SELECT
    p.project_number,
    p.name,
    p.start_date,
    p.end_date,
    c.name          AS customer_name,
    c.contact_person,
    p.service_id,
    sv.name         AS service_name,
    sv.hourly_price,
    p.staff_id,
    st.name         AS staff_name,
    r.name          AS role_name,
    p.status_id,
    su.name         AS status_name,
    p.total_price,
    p.description
FROM projects p
LEFT JOIN customers c ON c.customer_id = p.customer_id
LEFT JOIN services sv ON sv.service_id = p.service_id
LEFT JOIN staff st ON st.staff_id = p.staff_id
LEFT JOIN roles r ON r.role_id = st.role_id
LEFT JOIN statuses su ON su.status_id = p.status_id";

/// Repository contract for project rows, keyed by project number.
pub trait ProjectRepository {
    fn find(&self, project_number: &str) -> RepoResult<Option<Project>>;
    fn insert(&self, project: &Project) -> RepoResult<()>;
    fn update(&self, project: &Project) -> RepoResult<()>;
    /// Returns whether a row was removed.
    fn delete(&self, project_number: &str) -> RepoResult<bool>;
    fn view_by_number(&self, project_number: &str) -> RepoResult<Option<ProjectView>>;
    fn list_views(&self) -> RepoResult<Vec<ProjectView>>;
}

pub struct SqliteProjectRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteProjectRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl ProjectRepository for SqliteProjectRepository<'_> {
    fn find(&self, project_number: &str) -> RepoResult<Option<Project>> {
        let raw = self
            .conn
            .query_row(
                &format!("{PROJECT_SELECT_SQL} WHERE project_number = ?1;"),
                params![project_number],
                raw_project_row,
            )
            .optional()?;
        raw.map(decode_project).transpose()
    }

    fn insert(&self, project: &Project) -> RepoResult<()> {
        self.conn.execute(
            "INSERT INTO projects (
                project_number,
                name,
                start_date,
                end_date,
                customer_id,
                service_id,
                staff_id,
                status_id,
                total_price,
                description
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10);",
            params![
                project.project_number,
                project.name,
                project.start_date.to_string(),
                project.end_date.to_string(),
                project.customer_id,
                project.service_id,
                project.staff_id,
                project.status_id,
                project.total_price.to_string(),
                project.description.as_deref(),
            ],
        )?;
        Ok(())
    }

    fn update(&self, project: &Project) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE projects SET
                name = ?1,
                start_date = ?2,
                end_date = ?3,
                customer_id = ?4,
                service_id = ?5,
                staff_id = ?6,
                status_id = ?7,
                total_price = ?8,
                description = ?9
             WHERE project_number = ?10;",
            params![
                project.name,
                project.start_date.to_string(),
                project.end_date.to_string(),
                project.customer_id,
                project.service_id,
                project.staff_id,
                project.status_id,
                project.total_price.to_string(),
                project.description.as_deref(),
                project.project_number,
            ],
        )?;
        if changed == 0 {
            return Err(RepoError::NotFound(format!(
                "project '{}' not found",
                project.project_number
            )));
        }
        Ok(())
    }

    fn delete(&self, project_number: &str) -> RepoResult<bool> {
        let changed = self.conn.execute(
            "DELETE FROM projects WHERE project_number = ?1;",
            params![project_number],
        )?;
        Ok(changed > 0)
    }

    fn view_by_number(&self, project_number: &str) -> RepoResult<Option<ProjectView>> {
        let raw = self
            .conn
            .query_row(
                &format!("{VIEW_SELECT_SQL} WHERE p.project_number = ?1;"),
                params![project_number],
                raw_view_row,
            )
            .optional()?;
        raw.map(decode_view).transpose()
    }

    fn list_views(&self) -> RepoResult<Vec<ProjectView>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{VIEW_SELECT_SQL} ORDER BY p.project_number;"))?;
        let mut rows = stmt.query([])?;
        let mut views = Vec::new();
        while let Some(row) = rows.next()? {
            views.push(decode_view(raw_view_row(row)?)?);
        }
        Ok(views)
    }
}

struct RawProject {
    project_number: String,
    name: String,
    start_date: String,
    end_date: String,
    customer_id: Option<i64>,
    service_id: Option<i64>,
    staff_id: Option<i64>,
    status_id: Option<i64>,
    total_price: String,
    description: Option<String>,
}

fn raw_project_row(row: &Row<'_>) -> rusqlite::Result<RawProject> {
    Ok(RawProject {
        project_number: row.get("project_number")?,
        name: row.get("name")?,
        start_date: row.get("start_date")?,
        end_date: row.get("end_date")?,
        customer_id: row.get("customer_id")?,
        service_id: row.get("service_id")?,
        staff_id: row.get("staff_id")?,
        status_id: row.get("status_id")?,
        total_price: row.get("total_price")?,
        description: row.get("description")?,
    })
}

fn decode_project(raw: RawProject) -> RepoResult<Project> {
    Ok(Project {
        start_date: parse_date("projects", "start_date", &raw.start_date)?,
        end_date: parse_date("projects", "end_date", &raw.end_date)?,
        total_price: parse_decimal("projects", "total_price", &raw.total_price)?,
        project_number: raw.project_number,
        name: raw.name,
        customer_id: raw.customer_id,
        service_id: raw.service_id,
        staff_id: raw.staff_id,
        status_id: raw.status_id,
        description: raw.description,
    })
}

struct RawView {
    project_number: String,
    name: String,
    start_date: String,
    end_date: String,
    customer_name: Option<String>,
    contact_person: Option<String>,
    service_id: Option<i64>,
    service_name: Option<String>,
    hourly_price: Option<String>,
    staff_id: Option<i64>,
    staff_name: Option<String>,
    role_name: Option<String>,
    status_id: Option<i64>,
    status_name: Option<String>,
    total_price: String,
    description: Option<String>,
}

fn raw_view_row(row: &Row<'_>) -> rusqlite::Result<RawView> {
    Ok(RawView {
        project_number: row.get("project_number")?,
        name: row.get("name")?,
        start_date: row.get("start_date")?,
        end_date: row.get("end_date")?,
        customer_name: row.get("customer_name")?,
        contact_person: row.get("contact_person")?,
        service_id: row.get("service_id")?,
        service_name: row.get("service_name")?,
        hourly_price: row.get("hourly_price")?,
        staff_id: row.get("staff_id")?,
        staff_name: row.get("staff_name")?,
        role_name: row.get("role_name")?,
        status_id: row.get("status_id")?,
        status_name: row.get("status_name")?,
        total_price: row.get("total_price")?,
        description: row.get("description")?,
    })
}

fn decode_view(raw: RawView) -> RepoResult<ProjectView> {
    let total_price = parse_decimal("projects", "total_price", &raw.total_price)?;
    let hourly_price = match raw.hourly_price {
        Some(text) => parse_decimal("services", "hourly_price", &text)?,
        None => Decimal::ZERO,
    };
    let description = match raw.description {
        Some(text) if !text.trim().is_empty() => text,
        _ => DEFAULT_DESCRIPTION.to_string(),
    };
    Ok(ProjectView {
        start_date: parse_date("projects", "start_date", &raw.start_date)?,
        end_date: parse_date("projects", "end_date", &raw.end_date)?,
        project_number: raw.project_number,
        name: raw.name,
        customer_name: raw.customer_name.unwrap_or_else(|| NO_CUSTOMER.to_string()),
        contact_person: raw.contact_person.unwrap_or_else(|| NO_CONTACT.to_string()),
        service_id: raw.service_id.unwrap_or(0),
        service_name: raw.service_name.unwrap_or_else(|| NO_SERVICE.to_string()),
        hourly_price,
        staff_id: raw.staff_id.unwrap_or(0),
        staff_name: raw.staff_name.unwrap_or_else(|| NO_STAFF.to_string()),
        role_name: raw.role_name.unwrap_or_else(|| NO_ROLE.to_string()),
        status_id: raw.status_id.unwrap_or(0),
        status_name: raw.status_name.unwrap_or_else(|| NO_STATUS.to_string()),
        // A corrupted negative value must never escape the read path.
        total_price: total_price.max(Decimal::ZERO),
        description,
    })
}
