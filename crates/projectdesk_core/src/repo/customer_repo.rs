//! Customer lookup and insert.

use super::RepoResult;
use crate::model::customer::Customer;
use crate::model::CustomerId;
use rusqlite::{params, Connection, OptionalExtension, Row};

const CUSTOMER_SELECT_SQL: &str =
    "SELECT customer_id, name, contact_person FROM customers";

/// Repository contract for customer rows. Natural key is the name.
pub trait CustomerRepository {
    fn find_by_name(&self, name: &str) -> RepoResult<Option<Customer>>;
    fn find_by_id(&self, customer_id: CustomerId) -> RepoResult<Option<Customer>>;
    fn insert(&self, name: &str, contact_person: &str) -> RepoResult<CustomerId>;
    fn list(&self) -> RepoResult<Vec<Customer>>;
}

pub struct SqliteCustomerRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteCustomerRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl CustomerRepository for SqliteCustomerRepository<'_> {
    fn find_by_name(&self, name: &str) -> RepoResult<Option<Customer>> {
        let customer = self
            .conn
            .query_row(
                &format!("{CUSTOMER_SELECT_SQL} WHERE name = ?1;"),
                params![name],
                parse_customer_row,
            )
            .optional()?;
        Ok(customer)
    }

    fn find_by_id(&self, customer_id: CustomerId) -> RepoResult<Option<Customer>> {
        let customer = self
            .conn
            .query_row(
                &format!("{CUSTOMER_SELECT_SQL} WHERE customer_id = ?1;"),
                params![customer_id],
                parse_customer_row,
            )
            .optional()?;
        Ok(customer)
    }

    fn insert(&self, name: &str, contact_person: &str) -> RepoResult<CustomerId> {
        self.conn.execute(
            "INSERT INTO customers (name, contact_person) VALUES (?1, ?2);",
            params![name, contact_person],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn list(&self) -> RepoResult<Vec<Customer>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{CUSTOMER_SELECT_SQL} ORDER BY customer_id;"))?;
        let mut rows = stmt.query([])?;
        let mut customers = Vec::new();
        while let Some(row) = rows.next()? {
            customers.push(parse_customer_row(row)?);
        }
        Ok(customers)
    }
}

fn parse_customer_row(row: &Row<'_>) -> rusqlite::Result<Customer> {
    Ok(Customer {
        customer_id: row.get("customer_id")?,
        name: row.get("name")?,
        contact_person: row.get("contact_person")?,
    })
}
