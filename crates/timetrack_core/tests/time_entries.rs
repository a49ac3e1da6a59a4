use chrono::{DateTime, Duration, TimeZone, Utc};
use rusqlite::Connection;
use timetrack_core::db::open_db_in_memory;
use timetrack_core::service::views::{LookupTables, UNKNOWN_LABEL};
use timetrack_core::{
    EntityId, NewProject, NewTask, NewTimeEntry, NewUser, ProjectService, Repository,
    ServiceError, TaskService, TimeEntry, TimeEntryService, UnitOfWork, UserService,
    ValidationError,
};

struct Fixture {
    user_id: EntityId,
    task_id: EntityId,
}

fn fixture(conn: &Connection) -> Fixture {
    let uow = UnitOfWork::new(conn);
    let user = UserService::new(uow).create_user(&NewUser::new("John Doe")).unwrap();
    let project = ProjectService::new(uow)
        .create_project(&NewProject::new("E-commerce Platform"))
        .unwrap();
    let task = TaskService::new(uow)
        .create_task(&NewTask::new("Database Design", 8.0, project.id, user.id))
        .unwrap();
    Fixture {
        user_id: user.id,
        task_id: task.id,
    }
}

fn at(hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 4, hour, minute, 0).unwrap()
}

#[test]
fn create_returns_joined_view_with_duration() {
    let conn = open_db_in_memory().unwrap();
    let ids = fixture(&conn);
    let service = TimeEntryService::new(UnitOfWork::new(&conn));

    let view = service
        .create_time_entry(&NewTimeEntry::new(at(9, 0), at(11, 30), ids.task_id, ids.user_id))
        .unwrap();

    assert_eq!(view.task_title, "Database Design");
    assert_eq!(view.user_name, "John Doe");
    assert!((view.duration_hours - 2.5).abs() < 1e-9);

    let loaded = service.get_time_entry(view.id).unwrap();
    assert_eq!(loaded, view);
}

#[test]
fn timestamps_keep_millisecond_precision() {
    let conn = open_db_in_memory().unwrap();
    let ids = fixture(&conn);
    let service = TimeEntryService::new(UnitOfWork::new(&conn));

    let start = at(8, 0) + Duration::milliseconds(250);
    let view = service
        .create_time_entry(&NewTimeEntry::new(start, at(9, 0), ids.task_id, ids.user_id))
        .unwrap();
    assert_eq!(view.start, start);
}

#[test]
fn end_must_follow_start() {
    let conn = open_db_in_memory().unwrap();
    let ids = fixture(&conn);
    let service = TimeEntryService::new(UnitOfWork::new(&conn));

    let err = service
        .create_time_entry(&NewTimeEntry::new(at(9, 0), at(9, 0), ids.task_id, ids.user_id))
        .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Validation(ValidationError::EndNotAfterStart)
    ));
    assert_eq!(err.to_string(), "End time must be after start time");
}

#[test]
fn range_within_one_millisecond_is_rejected() {
    let conn = open_db_in_memory().unwrap();
    let ids = fixture(&conn);
    let service = TimeEntryService::new(UnitOfWork::new(&conn));

    let err = service
        .create_time_entry(&NewTimeEntry::new(
            at(9, 0) + Duration::microseconds(100),
            at(9, 0) + Duration::microseconds(900),
            ids.task_id,
            ids.user_id,
        ))
        .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Validation(ValidationError::EndNotAfterStart)
    ));

    let view = service
        .create_time_entry(&NewTimeEntry::new(
            at(9, 0) + Duration::microseconds(100),
            at(9, 0) + Duration::microseconds(1_900),
            ids.task_id,
            ids.user_id,
        ))
        .unwrap();
    assert_eq!(view.start, at(9, 0));
    assert_eq!(view.end, at(9, 0) + Duration::milliseconds(1));
    assert!(view.duration_hours > 0.0);
}

#[test]
fn create_requires_existing_task_and_user() {
    let conn = open_db_in_memory().unwrap();
    let ids = fixture(&conn);
    let service = TimeEntryService::new(UnitOfWork::new(&conn));

    let err = service
        .create_time_entry(&NewTimeEntry::new(at(9, 0), at(10, 0), ids.task_id + 9, ids.user_id))
        .unwrap_err();
    assert!(matches!(err, ServiceError::MissingReference { entity: "Task", .. }));

    let err = service
        .create_time_entry(&NewTimeEntry::new(at(9, 0), at(10, 0), ids.task_id, ids.user_id + 9))
        .unwrap_err();
    assert!(matches!(err, ServiceError::MissingReference { entity: "User", .. }));
}

#[test]
fn update_replaces_range_and_missing_entry_is_not_found() {
    let conn = open_db_in_memory().unwrap();
    let ids = fixture(&conn);
    let service = TimeEntryService::new(UnitOfWork::new(&conn));
    let view = service
        .create_time_entry(&NewTimeEntry::new(at(9, 0), at(10, 0), ids.task_id, ids.user_id))
        .unwrap();

    let updated = service
        .update_time_entry(
            view.id,
            &NewTimeEntry::new(at(13, 0), at(17, 0), ids.task_id, ids.user_id),
        )
        .unwrap();
    assert_eq!(updated.id, view.id);
    assert!((updated.duration_hours - 4.0).abs() < 1e-9);

    let err = service
        .update_time_entry(
            view.id + 1,
            &NewTimeEntry::new(at(13, 0), at(17, 0), ids.task_id, ids.user_id),
        )
        .unwrap_err();
    assert!(matches!(err, ServiceError::NotFound { entity: "Time entry", .. }));
}

#[test]
fn filtered_listings_check_parent_and_join_names() {
    let conn = open_db_in_memory().unwrap();
    let ids = fixture(&conn);
    let uow = UnitOfWork::new(&conn);
    let service = TimeEntryService::new(uow);
    service
        .create_time_entry(&NewTimeEntry::new(at(9, 0), at(10, 0), ids.task_id, ids.user_id))
        .unwrap();
    service
        .create_time_entry(&NewTimeEntry::new(at(11, 0), at(12, 0), ids.task_id, ids.user_id))
        .unwrap();

    let by_task = service.list_time_entries_by_task(ids.task_id).unwrap();
    assert_eq!(by_task.len(), 2);
    assert!(by_task.iter().all(|view| view.user_name == "John Doe"));

    let by_user = service.list_time_entries_by_user(ids.user_id).unwrap();
    assert_eq!(by_user.len(), 2);
    assert!(by_user.iter().all(|view| view.task_title == "Database Design"));

    assert!(matches!(
        service.list_time_entries_by_task(404).unwrap_err(),
        ServiceError::NotFound { entity: "Task", id: 404 }
    ));
    assert!(matches!(
        service.list_time_entries_by_user(404).unwrap_err(),
        ServiceError::NotFound { entity: "User", id: 404 }
    ));
    assert_eq!(service.list_time_entries().unwrap().len(), 2);
}

#[test]
fn deleting_user_cascades_to_tasks_and_entries() {
    let conn = open_db_in_memory().unwrap();
    let ids = fixture(&conn);
    let uow = UnitOfWork::new(&conn);
    TimeEntryService::new(uow)
        .create_time_entry(&NewTimeEntry::new(at(9, 0), at(10, 0), ids.task_id, ids.user_id))
        .unwrap();

    UserService::new(uow).delete_user(ids.user_id).unwrap();

    assert_eq!(uow.tasks().count().unwrap(), 0);
    assert_eq!(uow.time_entries().count().unwrap(), 0);
}

#[test]
fn delete_missing_entry_is_not_found() {
    let conn = open_db_in_memory().unwrap();
    let service = TimeEntryService::new(UnitOfWork::new(&conn));

    let err = service.delete_time_entry(12).unwrap_err();
    assert_eq!(err.to_string(), "Time entry with ID 12 not found");
}

#[test]
fn unresolvable_names_render_as_unknown() {
    let lookups = LookupTables::from_rows(Vec::new(), Vec::new(), Vec::new());
    let entry = TimeEntry {
        id: 1,
        start: at(9, 0),
        end: at(10, 0),
        task_item_id: 5,
        user_id: 6,
    };

    let view = lookups.time_entry_view(&entry);
    assert_eq!(view.task_title, UNKNOWN_LABEL);
    assert_eq!(view.user_name, "Unknown");
}
