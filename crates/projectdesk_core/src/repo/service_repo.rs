//! Service lookup, insert and price update.
//!
//! The price column is mutable metadata on the name identity; `update_price`
//! exists because the ensure-resolver reconciles a drifted price in place
//! instead of inserting a second row under the same name.

use super::{parse_decimal, RepoError, RepoResult};
use crate::model::service::Service;
use crate::model::ServiceId;
use rusqlite::{params, Connection, OptionalExtension, Row};
use rust_decimal::Decimal;

const SERVICE_SELECT_SQL: &str = "SELECT service_id, name, hourly_price FROM services";

/// Repository contract for service rows. Natural key is the name.
pub trait ServiceRepository {
    fn find_by_name(&self, name: &str) -> RepoResult<Option<Service>>;
    fn insert(&self, name: &str, hourly_price: Decimal) -> RepoResult<ServiceId>;
    fn update_price(&self, service_id: ServiceId, hourly_price: Decimal) -> RepoResult<()>;
    fn list(&self) -> RepoResult<Vec<Service>>;
}

pub struct SqliteServiceRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteServiceRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl ServiceRepository for SqliteServiceRepository<'_> {
    fn find_by_name(&self, name: &str) -> RepoResult<Option<Service>> {
        let row = self
            .conn
            .query_row(
                &format!("{SERVICE_SELECT_SQL} WHERE name = ?1;"),
                params![name],
                raw_service_row,
            )
            .optional()?;
        row.map(decode_service).transpose()
    }

    fn insert(&self, name: &str, hourly_price: Decimal) -> RepoResult<ServiceId> {
        self.conn.execute(
            "INSERT INTO services (name, hourly_price) VALUES (?1, ?2);",
            params![name, hourly_price.to_string()],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn update_price(&self, service_id: ServiceId, hourly_price: Decimal) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE services SET hourly_price = ?1 WHERE service_id = ?2;",
            params![hourly_price.to_string(), service_id],
        )?;
        if changed == 0 {
            return Err(RepoError::NotFound(format!(
                "service {service_id} not found"
            )));
        }
        Ok(())
    }

    fn list(&self) -> RepoResult<Vec<Service>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{SERVICE_SELECT_SQL} ORDER BY service_id;"))?;
        let mut rows = stmt.query([])?;
        let mut services = Vec::new();
        while let Some(row) = rows.next()? {
            services.push(decode_service(raw_service_row(row)?)?);
        }
        Ok(services)
    }
}

fn raw_service_row(row: &Row<'_>) -> rusqlite::Result<(ServiceId, String, String)> {
    Ok((row.get(0)?, row.get(1)?, row.get(2)?))
}

fn decode_service((service_id, name, price_text): (ServiceId, String, String)) -> RepoResult<Service> {
    let hourly_price = parse_decimal("services", "hourly_price", &price_text)?;
    Ok(Service {
        service_id,
        name,
        hourly_price,
    })
}
