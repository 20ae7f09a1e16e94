//! Customer ensure-resolver, creation and read paths.

use super::ensure::{ensure_or_create, run_owned, Resolution};
use super::WorkflowResult;
use crate::db::{ConnectionFactory, UnitOfWork};
use crate::model::customer::{Customer, CustomerRequest, DEFAULT_CONTACT_PERSON};
use crate::model::{CustomerId, ValidationError};
use crate::repo::customer_repo::{CustomerRepository, SqliteCustomerRepository};
use log::info;

pub struct CustomerService<'a> {
    uow: &'a UnitOfWork,
    reads: &'a ConnectionFactory,
}

impl<'a> CustomerService<'a> {
    pub fn new(uow: &'a UnitOfWork, reads: &'a ConnectionFactory) -> Self {
        Self { uow, reads }
    }

    /// Returns the key of the customer named `name`, creating the row if
    /// absent. A missing or blank contact person is stored as
    /// [`DEFAULT_CONTACT_PERSON`].
    pub fn ensure_customer(
        &self,
        name: &str,
        contact_person: Option<&str>,
    ) -> WorkflowResult<CustomerId> {
        if name.trim().is_empty() {
            return Err(ValidationError::EmptyCustomerName.into());
        }

        let contact = match contact_person {
            Some(value) if !value.trim().is_empty() => value,
            _ => DEFAULT_CONTACT_PERSON,
        };

        ensure_or_create(
            self.uow,
            |conn| {
                let repo = SqliteCustomerRepository::new(conn);
                Ok(match repo.find_by_name(name)? {
                    Some(customer) => {
                        info!(
                            "event=ensure_customer module=service status=hit customer_id={}",
                            customer.customer_id
                        );
                        Resolution::Exists(customer.customer_id)
                    }
                    None => {
                        info!("event=ensure_customer module=service status=miss");
                        Resolution::Absent
                    }
                })
            },
            |conn, _| SqliteCustomerRepository::new(conn).insert(name, contact),
        )
    }

    /// Creates a customer unconditionally; both name and contact person are
    /// required here, unlike the ensure path.
    pub fn create_customer(&self, request: &CustomerRequest) -> WorkflowResult<CustomerId> {
        request.validate()?;
        let contact = request
            .contact_person
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .ok_or(ValidationError::EmptyContactPerson)?;

        run_owned(self.uow, |uow| {
            SqliteCustomerRepository::new(uow.connection()).insert(&request.name, contact)
        })
    }

    /// Whether a customer row with this key exists.
    pub fn customer_exists(&self, customer_id: CustomerId) -> WorkflowResult<bool> {
        let repo = SqliteCustomerRepository::new(self.uow.connection());
        Ok(repo.find_by_id(customer_id)?.is_some())
    }

    /// Lists all customers on a short-lived read connection.
    pub fn list_customers(&self) -> WorkflowResult<Vec<Customer>> {
        let conn = self.reads.open_read()?;
        let customers = SqliteCustomerRepository::new(&conn).list()?;
        Ok(customers)
    }
}
