//! Service ensure-resolver and read paths.

use super::ensure::{ensure_or_create, Resolution};
use super::WorkflowResult;
use crate::db::{ConnectionFactory, UnitOfWork};
use crate::model::service::{Service, ServiceRequest};
use crate::model::ServiceId;
use crate::repo::service_repo::{ServiceRepository, SqliteServiceRepository};
use log::info;

pub struct ServiceService<'a> {
    uow: &'a UnitOfWork,
    reads: &'a ConnectionFactory,
}

impl<'a> ServiceService<'a> {
    pub fn new(uow: &'a UnitOfWork, reads: &'a ConnectionFactory) -> Self {
        Self { uow, reads }
    }

    /// Returns the key of the service with the requested name, creating the
    /// row if absent.
    ///
    /// Contract, by design: when a row with the same name already exists but
    /// its hourly price differs from the request, this call UPDATES the
    /// stored price in place and returns the existing key. Ensure-by-name is
    /// therefore not read-only for services; callers that must not mutate
    /// price should look the row up through a repository instead.
    pub fn ensure_service(&self, request: &ServiceRequest) -> WorkflowResult<ServiceId> {
        request.validate()?;

        ensure_or_create(
            self.uow,
            |conn| {
                let repo = SqliteServiceRepository::new(conn);
                Ok(match repo.find_by_name(&request.name)? {
                    Some(existing) if existing.hourly_price != request.hourly_price => {
                        info!(
                            "event=ensure_service module=service status=price_drift service_id={} stored={} requested={}",
                            existing.service_id, existing.hourly_price, request.hourly_price
                        );
                        Resolution::ExistsStale(existing.service_id)
                    }
                    Some(existing) => {
                        info!(
                            "event=ensure_service module=service status=hit service_id={}",
                            existing.service_id
                        );
                        Resolution::Exists(existing.service_id)
                    }
                    None => {
                        info!("event=ensure_service module=service status=miss");
                        Resolution::Absent
                    }
                })
            },
            |conn, existing| {
                let repo = SqliteServiceRepository::new(conn);
                match existing {
                    Some(service_id) => {
                        repo.update_price(service_id, request.hourly_price)?;
                        Ok(service_id)
                    }
                    None => repo.insert(&request.name, request.hourly_price),
                }
            },
        )
    }

    /// Lists all services on a short-lived read connection.
    pub fn list_services(&self) -> WorkflowResult<Vec<Service>> {
        let conn = self.reads.open_read()?;
        let services = SqliteServiceRepository::new(&conn).list()?;
        Ok(services)
    }
}
