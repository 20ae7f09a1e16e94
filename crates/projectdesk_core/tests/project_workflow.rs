use chrono::NaiveDate;
use projectdesk_core::{
    ConnectionFactory, CustomerRequest, ProjectDetailsRequest, ProjectService,
    ProjectUpdateRequest, ServiceRequest, StaffRequest, UnitOfWork, ValidationError,
    WorkflowError, DEFAULT_DESCRIPTION,
};
use rusqlite::Connection;
use rust_decimal::Decimal;

fn setup(tag: &str) -> (ConnectionFactory, UnitOfWork) {
    let factory = ConnectionFactory::shared_memory(tag);
    let uow = UnitOfWork::new(factory.open_primary().unwrap());
    (factory, uow)
}

fn date(value: &str) -> NaiveDate {
    value.parse().unwrap()
}

fn website_revamp_request() -> ProjectDetailsRequest {
    ProjectDetailsRequest {
        project_number: "P-1001".to_string(),
        name: "Website Revamp".to_string(),
        start_date: Some(date("2025-01-01")),
        end_date: Some(date("2025-03-01")),
        customer_id: 0,
        customer: Some(CustomerRequest::new("Acme Inc", Some("Jane"))),
        service: Some(ServiceRequest::new("Development", Decimal::new(15000, 2))),
        staff: Some(StaffRequest::new("Bob", "Developer")),
        status_id: 1,
        total_price: Decimal::new(500000, 2),
        description: None,
    }
}

#[test]
fn create_project_with_details_assembles_all_dependencies() {
    let (factory, uow) = setup("workflow-create");
    let projects = ProjectService::new(&uow, &factory);

    let number = projects
        .create_project_with_details(&website_revamp_request())
        .unwrap();
    assert_eq!(number, "P-1001");
    assert!(!uow.has_active_transaction());

    let view = projects.project_by_number("P-1001").unwrap().unwrap();
    assert_eq!(view.name, "Website Revamp");
    assert_eq!(view.customer_name, "Acme Inc");
    assert_eq!(view.contact_person, "Jane");
    // The seeded "Development" service is reused, not duplicated.
    assert_eq!(view.service_id, 2);
    assert_eq!(view.service_name, "Development");
    assert_eq!(view.hourly_price, Decimal::new(15000, 2));
    assert_eq!(view.staff_name, "Bob");
    assert_eq!(view.role_name, "Developer");
    assert_eq!(view.status_name, "New");
    assert_eq!(view.total_price, Decimal::new(500000, 2));
    assert_eq!(view.description, DEFAULT_DESCRIPTION);

    let conn = uow.connection();
    assert_eq!(count(conn, "SELECT COUNT(*) FROM customers;"), 1);
    assert_eq!(count(conn, "SELECT COUNT(*) FROM services;"), 2);
    assert_eq!(count(conn, "SELECT COUNT(*) FROM staff;"), 1);
}

#[test]
fn duplicate_project_number_is_a_conflict_and_leaves_state_untouched() {
    let (factory, uow) = setup("workflow-duplicate");
    let projects = ProjectService::new(&uow, &factory);

    projects
        .create_project_with_details(&website_revamp_request())
        .unwrap();

    let err = projects
        .create_project_with_details(&website_revamp_request())
        .unwrap_err();
    assert!(matches!(err, WorkflowError::Conflict(_)));
    assert!(!uow.has_active_transaction());

    let conn = uow.connection();
    assert_eq!(count(conn, "SELECT COUNT(*) FROM projects;"), 1);
    assert_eq!(count(conn, "SELECT COUNT(*) FROM customers;"), 1);
    assert_eq!(count(conn, "SELECT COUNT(*) FROM staff;"), 1);
}

#[test]
fn failed_assembly_rolls_back_dependency_rows() {
    let (factory, uow) = setup("workflow-atomic");
    let projects = ProjectService::new(&uow, &factory);

    // Status 99 does not exist, so the final project insert violates the
    // foreign key after customer, role and staff rows were already created
    // inside the same owned transaction.
    let mut request = website_revamp_request();
    request.status_id = 99;

    let err = projects.create_project_with_details(&request).unwrap_err();
    assert!(matches!(err, WorkflowError::Conflict(_)));
    assert!(!uow.has_active_transaction());

    let conn = uow.connection();
    assert_eq!(count(conn, "SELECT COUNT(*) FROM projects;"), 0);
    assert_eq!(count(conn, "SELECT COUNT(*) FROM customers;"), 0);
    assert_eq!(count(conn, "SELECT COUNT(*) FROM staff;"), 0);
    assert_eq!(
        count(conn, "SELECT COUNT(*) FROM roles WHERE name = 'Developer';"),
        1
    );
}

#[test]
fn caller_owned_rollback_discards_resolver_writes() {
    let (factory, uow) = setup("workflow-caller-owned");
    let projects = ProjectService::new(&uow, &factory);

    // A temporary trigger makes the staff insert fail mid-assembly. It is
    // created outside the transaction so the rollback cannot remove it.
    uow.connection()
        .execute_batch(
            "CREATE TEMP TRIGGER fail_staff_insert BEFORE INSERT ON staff
             BEGIN SELECT RAISE(ABORT, 'staff insert disabled'); END;",
        )
        .unwrap();

    uow.begin().unwrap();
    let mut request = website_revamp_request();
    request.staff = Some(StaffRequest::new("Carol", "Auditor"));
    let err = projects.create_project_with_details(&request).unwrap_err();
    assert!(matches!(err, WorkflowError::Conflict(_)));
    // The caller owns the transaction; the workflow joined and left it open.
    assert!(uow.has_active_transaction());
    uow.rollback().unwrap();

    let conn = uow.connection();
    assert_eq!(count(conn, "SELECT COUNT(*) FROM customers;"), 0);
    assert_eq!(
        count(conn, "SELECT COUNT(*) FROM roles WHERE name = 'Auditor';"),
        0
    );
}

#[test]
fn validation_fails_before_any_transaction_or_write() {
    let (factory, uow) = setup("workflow-validate");
    let projects = ProjectService::new(&uow, &factory);

    let mut request = website_revamp_request();
    request.start_date = None;

    let err = projects.create_project_with_details(&request).unwrap_err();
    assert!(matches!(
        err,
        WorkflowError::Validation(ValidationError::MissingStartDate)
    ));
    assert!(!uow.has_active_transaction());
    assert_eq!(count(uow.connection(), "SELECT COUNT(*) FROM customers;"), 0);
}

#[test]
fn missing_customer_input_is_rejected_at_resolution() {
    let (factory, uow) = setup("workflow-no-customer");
    let projects = ProjectService::new(&uow, &factory);

    let mut request = website_revamp_request();
    request.customer = None;

    let err = projects.create_project_with_details(&request).unwrap_err();
    assert!(matches!(
        err,
        WorkflowError::Validation(ValidationError::MissingCustomer)
    ));
    assert_eq!(count(uow.connection(), "SELECT COUNT(*) FROM projects;"), 0);
}

#[test]
fn explicit_customer_id_takes_precedence_over_descriptive_input() {
    let (factory, uow) = setup("workflow-customer-id");
    let projects = ProjectService::new(&uow, &factory);

    uow.connection()
        .execute(
            "INSERT INTO customers (name, contact_person) VALUES ('Initech', 'Bill');",
            [],
        )
        .unwrap();

    let mut request = website_revamp_request();
    request.customer_id = 1;
    request.customer = Some(CustomerRequest::new("Ignored Corp", None));
    projects.create_project_with_details(&request).unwrap();

    let view = projects.project_by_number("P-1001").unwrap().unwrap();
    assert_eq!(view.customer_name, "Initech");
    assert_eq!(count(uow.connection(), "SELECT COUNT(*) FROM customers;"), 1);
}

#[test]
fn update_project_re_resolves_descriptive_dependencies() {
    let (factory, uow) = setup("workflow-update");
    let projects = ProjectService::new(&uow, &factory);

    projects
        .create_project_with_details(&website_revamp_request())
        .unwrap();

    let update = ProjectUpdateRequest {
        project_number: "P-1001".to_string(),
        name: "  ".to_string(),
        start_date: date("2025-02-01"),
        end_date: date("2025-04-01"),
        customer_id: None,
        service_id: None,
        staff_id: None,
        status_id: Some(2),
        total_price: Decimal::new(750000, 2),
        description: Some("Rescoped".to_string()),
        service: Some(ServiceRequest::new("Design Review", Decimal::new(9000, 2))),
        staff: Some(StaffRequest::new("Dana", "Designer")),
        customer: None,
    };
    projects.update_project(&update).unwrap();

    let view = projects.project_by_number("P-1001").unwrap().unwrap();
    assert_eq!(view.name, "Unnamed Project");
    assert_eq!(view.start_date, date("2025-02-01"));
    assert_eq!(view.service_name, "Design Review");
    assert_eq!(view.staff_name, "Dana");
    assert_eq!(view.role_name, "Designer");
    assert_eq!(view.status_name, "In Progress");
    assert_eq!(view.total_price, Decimal::new(750000, 2));
    assert_eq!(view.description, "Rescoped");
    // The original customer assignment is untouched.
    assert_eq!(view.customer_name, "Acme Inc");
}

#[test]
fn update_of_missing_project_is_not_found() {
    let (factory, uow) = setup("workflow-update-missing");
    let projects = ProjectService::new(&uow, &factory);

    let update = ProjectUpdateRequest {
        project_number: "P-9999".to_string(),
        name: "Ghost".to_string(),
        start_date: date("2025-01-01"),
        end_date: date("2025-02-01"),
        customer_id: None,
        service_id: None,
        staff_id: None,
        status_id: None,
        total_price: Decimal::ZERO,
        description: None,
        service: None,
        staff: None,
        customer: None,
    };
    let err = projects.update_project(&update).unwrap_err();
    assert!(matches!(err, WorkflowError::NotFound(_)));
}

#[test]
fn delete_project_reports_whether_a_row_was_removed() {
    let (factory, uow) = setup("workflow-delete");
    let projects = ProjectService::new(&uow, &factory);

    projects
        .create_project_with_details(&website_revamp_request())
        .unwrap();

    assert!(projects.delete_project("P-1001").unwrap());
    assert!(!projects.delete_project("P-1001").unwrap());
    assert_eq!(count(uow.connection(), "SELECT COUNT(*) FROM projects;"), 0);
}

fn count(conn: &Connection, sql: &str) -> i64 {
    conn.query_row(sql, [], |row| row.get(0)).unwrap()
}
