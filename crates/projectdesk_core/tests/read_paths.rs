use chrono::NaiveDate;
use projectdesk_core::{
    ConnectionFactory, CustomerRequest, ProjectDetailsRequest, ProjectService, RoleService,
    ServiceRequest, StaffRequest, StaffService, UnitOfWork, DEFAULT_DESCRIPTION,
};
use rust_decimal::Decimal;

fn setup(tag: &str) -> (ConnectionFactory, UnitOfWork) {
    let factory = ConnectionFactory::shared_memory(tag);
    let uow = UnitOfWork::new(factory.open_primary().unwrap());
    (factory, uow)
}

fn date(value: &str) -> NaiveDate {
    value.parse().unwrap()
}

fn sample_request(number: &str, name: &str) -> ProjectDetailsRequest {
    ProjectDetailsRequest {
        project_number: number.to_string(),
        name: name.to_string(),
        start_date: Some(date("2025-01-01")),
        end_date: Some(date("2025-03-01")),
        customer_id: 0,
        customer: Some(CustomerRequest::new("Acme Inc", Some("Jane"))),
        service: Some(ServiceRequest::new("Development", Decimal::new(15000, 2))),
        staff: Some(StaffRequest::new("Bob", "Developer")),
        status_id: 1,
        total_price: Decimal::new(500000, 2),
        description: Some("Initial engagement".to_string()),
    }
}

#[test]
fn negative_stored_total_price_is_clamped_to_zero_in_views() {
    let (factory, uow) = setup("reads-clamp");
    let projects = ProjectService::new(&uow, &factory);

    projects
        .create_project_with_details(&sample_request("P-2001", "Clamped"))
        .unwrap();
    uow.connection()
        .execute(
            "UPDATE projects SET total_price = '-50' WHERE project_number = 'P-2001';",
            [],
        )
        .unwrap();

    let view = projects.project_by_number("P-2001").unwrap().unwrap();
    assert_eq!(view.total_price, Decimal::ZERO);

    let listed = projects.list_projects().unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].total_price, Decimal::ZERO);
}

#[test]
fn blank_stored_description_gets_the_placeholder_in_views() {
    let (factory, uow) = setup("reads-description");
    let projects = ProjectService::new(&uow, &factory);

    projects
        .create_project_with_details(&sample_request("P-2002", "Blanked"))
        .unwrap();
    uow.connection()
        .execute(
            "UPDATE projects SET description = '   ' WHERE project_number = 'P-2002';",
            [],
        )
        .unwrap();

    let view = projects.project_by_number("P-2002").unwrap().unwrap();
    assert_eq!(view.description, DEFAULT_DESCRIPTION);
}

#[test]
fn views_substitute_placeholders_for_missing_joined_rows() {
    let (factory, uow) = setup("reads-placeholders");
    let projects = ProjectService::new(&uow, &factory);

    // A bare row with no dependencies at all, as older data may contain.
    uow.connection()
        .execute(
            "INSERT INTO projects (project_number, name, start_date, end_date, total_price)
             VALUES ('P-2003', 'Orphan', '2025-01-01', '2025-02-01', '100.00');",
            [],
        )
        .unwrap();

    let view = projects.project_by_number("P-2003").unwrap().unwrap();
    assert_eq!(view.customer_name, "No Customer");
    assert_eq!(view.contact_person, "No Contact Person");
    assert_eq!(view.service_name, "No Service");
    assert_eq!(view.hourly_price, Decimal::ZERO);
    assert_eq!(view.staff_name, "No Staff");
    assert_eq!(view.role_name, "No Role");
    assert_eq!(view.status_name, "No Status");
}

#[test]
fn list_projects_is_ordered_by_project_number() {
    let (factory, uow) = setup("reads-ordering");
    let projects = ProjectService::new(&uow, &factory);

    projects
        .create_project_with_details(&sample_request("P-3002", "Second"))
        .unwrap();
    projects
        .create_project_with_details(&sample_request("P-3001", "First"))
        .unwrap();

    let listed = projects.list_projects().unwrap();
    let numbers: Vec<&str> = listed
        .iter()
        .map(|view| view.project_number.as_str())
        .collect();
    assert_eq!(numbers, ["P-3001", "P-3002"]);
}

#[test]
fn list_statuses_returns_the_seeded_reference_data() {
    let (factory, uow) = setup("reads-statuses");
    let projects = ProjectService::new(&uow, &factory);

    let statuses = projects.list_statuses().unwrap();
    let names: Vec<&str> = statuses.iter().map(|status| status.name.as_str()).collect();
    assert_eq!(names, ["New", "In Progress", "Completed"]);
}

#[test]
fn staff_listing_joins_role_names() {
    let (factory, uow) = setup("reads-staff");
    let staff = StaffService::new(&uow, &factory);

    staff
        .ensure_staff(&StaffRequest::new("Alice", "Designer"))
        .unwrap();

    let views = staff.list_staff().unwrap();
    assert_eq!(views.len(), 1);
    assert_eq!(views[0].name, "Alice");
    assert_eq!(views[0].role_name, "Designer");
}

#[test]
fn role_listing_includes_seeded_and_created_roles() {
    let (factory, uow) = setup("reads-roles");
    let roles = RoleService::new(&uow, &factory);

    roles.ensure_role("Auditor").unwrap();

    let listed = roles.list_roles().unwrap();
    let names: Vec<&str> = listed.iter().map(|role| role.name.as_str()).collect();
    assert!(names.contains(&"Project Manager"));
    assert!(names.contains(&"Auditor"));
}

#[test]
fn project_views_serialize_for_api_consumers() {
    let (factory, uow) = setup("reads-serialize");
    let projects = ProjectService::new(&uow, &factory);

    projects
        .create_project_with_details(&sample_request("P-2004", "Serialized"))
        .unwrap();

    let view = projects.project_by_number("P-2004").unwrap().unwrap();
    let json = serde_json::to_value(&view).unwrap();
    assert_eq!(json["project_number"], "P-2004");
    assert_eq!(json["start_date"], "2025-01-01");
    assert_eq!(json["total_price"], "5000.00");
    assert_eq!(json["role_name"], "Developer");
}

#[test]
fn read_connections_reject_writes() {
    let (factory, _uow) = setup("reads-query-only");

    let reader = factory.open_read().unwrap();
    let err = reader
        .execute("INSERT INTO roles (name) VALUES ('Smuggled');", [])
        .unwrap_err();
    assert!(matches!(err, rusqlite::Error::SqliteFailure(_, _)));
}
