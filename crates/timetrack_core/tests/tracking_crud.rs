use timetrack_core::db::open_db_in_memory;
use timetrack_core::{
    NewProject, NewTask, NewUser, ProjectService, Repository, ServiceError, TaskService,
    UnitOfWork, UserService, ValidationError,
};

#[test]
fn user_create_get_update_delete() {
    let conn = open_db_in_memory().unwrap();
    let service = UserService::new(UnitOfWork::new(&conn));

    let created = service.create_user(&NewUser::new("  Ada Lovelace ")).unwrap();
    assert_eq!(created.full_name, "Ada Lovelace");

    let loaded = service.get_user(created.id).unwrap();
    assert_eq!(loaded, created);

    let updated = service
        .update_user(created.id, &NewUser::new("Ada King"))
        .unwrap();
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.full_name, "Ada King");

    service.delete_user(created.id).unwrap();
    match service.get_user(created.id).unwrap_err() {
        ServiceError::NotFound { entity, id } => {
            assert_eq!(entity, "User");
            assert_eq!(id, created.id);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn list_returns_rows_in_id_order() {
    let conn = open_db_in_memory().unwrap();
    let service = ProjectService::new(UnitOfWork::new(&conn));

    let first = service.create_project(&NewProject::new("Zeta")).unwrap();
    let second = service.create_project(&NewProject::new("Alpha")).unwrap();

    let names = service
        .list_projects()
        .unwrap()
        .into_iter()
        .map(|project| (project.id, project.name))
        .collect::<Vec<_>>();
    assert_eq!(
        names,
        vec![(first.id, "Zeta".to_string()), (second.id, "Alpha".to_string())]
    );
}

#[test]
fn invalid_names_are_rejected_before_any_write() {
    let conn = open_db_in_memory().unwrap();
    let uow = UnitOfWork::new(&conn);

    let err = UserService::new(uow).create_user(&NewUser::new(" x ")).unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Validation(ValidationError::TextLength { field: "fullName", actual: 1 })
    ));

    let err = ProjectService::new(uow)
        .create_project(&NewProject::new("p".repeat(101)))
        .unwrap_err();
    assert!(matches!(err, ServiceError::Validation(_)));

    assert_eq!(uow.users().count().unwrap(), 0);
    assert_eq!(uow.projects().count().unwrap(), 0);
}

#[test]
fn update_and_delete_missing_rows_report_not_found() {
    let conn = open_db_in_memory().unwrap();
    let service = ProjectService::new(UnitOfWork::new(&conn));

    let err = service
        .update_project(77, &NewProject::new("Ghost"))
        .unwrap_err();
    assert_eq!(err.to_string(), "Project with ID 77 not found");

    let err = service.delete_project(77).unwrap_err();
    assert!(matches!(err, ServiceError::NotFound { entity: "Project", id: 77 }));
}

#[test]
fn update_validates_draft_before_looking_up_target() {
    let conn = open_db_in_memory().unwrap();
    let service = UserService::new(UnitOfWork::new(&conn));

    let err = service.update_user(5, &NewUser::new("")).unwrap_err();
    assert!(matches!(err, ServiceError::Validation(_)));
}

#[test]
fn task_create_requires_existing_project_and_user() {
    let conn = open_db_in_memory().unwrap();
    let uow = UnitOfWork::new(&conn);
    let user = UserService::new(uow).create_user(&NewUser::new("Jane Smith")).unwrap();
    let project = ProjectService::new(uow)
        .create_project(&NewProject::new("Mobile App"))
        .unwrap();
    let tasks = TaskService::new(uow);

    let err = tasks
        .create_task(&NewTask::new("Design", 4.0, project.id + 100, user.id))
        .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::MissingReference { entity: "Project", .. }
    ));

    let err = tasks
        .create_task(&NewTask::new("Design", 4.0, project.id, user.id + 100))
        .unwrap_err();
    assert!(matches!(err, ServiceError::MissingReference { entity: "User", .. }));

    let task = tasks
        .create_task(&NewTask::new(" Design ", 4.5, project.id, user.id))
        .unwrap();
    assert_eq!(task.title, "Design");
    assert!((task.estimate_hours - 4.5).abs() < f64::EPSILON);
    assert_eq!(uow.tasks().count().unwrap(), 1);
}

#[test]
fn task_estimate_bounds_are_enforced() {
    let conn = open_db_in_memory().unwrap();
    let uow = UnitOfWork::new(&conn);
    let user = UserService::new(uow).create_user(&NewUser::new("Bob")).unwrap();
    let project = ProjectService::new(uow)
        .create_project(&NewProject::new("API"))
        .unwrap();
    let tasks = TaskService::new(uow);

    for estimate in [0.0, 0.09, 1000.01] {
        let err = tasks
            .create_task(&NewTask::new("Testing", estimate, project.id, user.id))
            .unwrap_err();
        assert!(matches!(
            err,
            ServiceError::Validation(ValidationError::EstimateOutOfRange { .. })
        ));
    }
    assert!(tasks
        .create_task(&NewTask::new("Testing", 1000.0, project.id, user.id))
        .is_ok());
}

#[test]
fn task_update_replaces_all_fields() {
    let conn = open_db_in_memory().unwrap();
    let uow = UnitOfWork::new(&conn);
    let users = UserService::new(uow);
    let projects = ProjectService::new(uow);
    let tasks = TaskService::new(uow);

    let alice = users.create_user(&NewUser::new("Alice")).unwrap();
    let bob = users.create_user(&NewUser::new("Bob")).unwrap();
    let web = projects.create_project(&NewProject::new("Web")).unwrap();
    let ops = projects.create_project(&NewProject::new("Ops")).unwrap();

    let task = tasks
        .create_task(&NewTask::new("Deploy", 2.0, web.id, alice.id))
        .unwrap();
    let updated = tasks
        .update_task(task.id, &NewTask::new("Deploy v2", 3.0, ops.id, bob.id))
        .unwrap();

    assert_eq!(updated.id, task.id);
    assert_eq!(updated.title, "Deploy v2");
    assert_eq!(updated.project_id, ops.id);
    assert_eq!(updated.assigned_user_id, bob.id);

    let err = tasks
        .update_task(task.id + 50, &NewTask::new("Deploy v3", 3.0, ops.id, bob.id))
        .unwrap_err();
    assert!(matches!(err, ServiceError::NotFound { entity: "Task", .. }));

    let err = tasks
        .update_task(task.id, &NewTask::new("Deploy v3", 3.0, ops.id + 50, bob.id))
        .unwrap_err();
    assert!(matches!(err, ServiceError::MissingReference { .. }));
}

#[test]
fn tasks_filter_by_project_and_user() {
    let conn = open_db_in_memory().unwrap();
    let uow = UnitOfWork::new(&conn);
    let users = UserService::new(uow);
    let projects = ProjectService::new(uow);
    let tasks = TaskService::new(uow);

    let alice = users.create_user(&NewUser::new("Alice")).unwrap();
    let bob = users.create_user(&NewUser::new("Bob")).unwrap();
    let web = projects.create_project(&NewProject::new("Web")).unwrap();
    let ops = projects.create_project(&NewProject::new("Ops")).unwrap();

    let a = tasks.create_task(&NewTask::new("Layout", 2.0, web.id, alice.id)).unwrap();
    let b = tasks.create_task(&NewTask::new("Deploy", 1.0, ops.id, alice.id)).unwrap();
    let c = tasks.create_task(&NewTask::new("Styling", 3.0, web.id, bob.id)).unwrap();

    let ids = |items: Vec<timetrack_core::TaskItem>| {
        items.into_iter().map(|task| task.id).collect::<Vec<_>>()
    };
    assert_eq!(ids(tasks.list_tasks_by_project(web.id).unwrap()), vec![a.id, c.id]);
    assert_eq!(ids(tasks.list_tasks_by_user(alice.id).unwrap()), vec![a.id, b.id]);
    assert_eq!(ids(tasks.list_tasks().unwrap()), vec![a.id, b.id, c.id]);

    let err = tasks.list_tasks_by_project(999).unwrap_err();
    assert!(matches!(err, ServiceError::NotFound { entity: "Project", id: 999 }));
    let err = tasks.list_tasks_by_user(999).unwrap_err();
    assert!(matches!(err, ServiceError::NotFound { entity: "User", id: 999 }));
}

#[test]
fn deleting_project_cascades_to_tasks() {
    let conn = open_db_in_memory().unwrap();
    let uow = UnitOfWork::new(&conn);
    let user = UserService::new(uow).create_user(&NewUser::new("Alice")).unwrap();
    let projects = ProjectService::new(uow);
    let web = projects.create_project(&NewProject::new("Web")).unwrap();
    let ops = projects.create_project(&NewProject::new("Ops")).unwrap();
    let tasks = TaskService::new(uow);
    tasks.create_task(&NewTask::new("Layout", 2.0, web.id, user.id)).unwrap();
    let kept = tasks.create_task(&NewTask::new("Deploy", 1.0, ops.id, user.id)).unwrap();

    projects.delete_project(web.id).unwrap();

    let remaining = tasks.list_tasks().unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].id, kept.id);
}
