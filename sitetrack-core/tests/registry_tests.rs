//! Registry behavioral tests: validation, lookup, update/delete semantics,
//! to-do ownership, and snapshot import/export.

use chrono::NaiveDate;
use sitetrack_core::{
    ProjectDraft, ProjectId, ProjectRegistry, ProjectStatus, RegistryError, TodoDraft, TodoStatus,
    UserRole,
};

fn finish() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 12, 31).expect("valid date")
}

fn draft(name: &str) -> ProjectDraft {
    ProjectDraft {
        name: name.to_string(),
        description: "Example App Project".to_string(),
        status: ProjectStatus::Pending,
        user_role: UserRole::Architect,
        finish_date: finish(),
        cost: 0.0,
        progress: 0,
        todos: vec![],
    }
}

fn todo_draft(name: &str) -> TodoDraft {
    TodoDraft {
        name: name.to_string(),
        description: String::new(),
        status: TodoStatus::Pending,
        due_date: finish(),
    }
}

// ---------------------------------------------------------------------------
// 1. Creation and validation
// ---------------------------------------------------------------------------

#[test]
fn created_ids_are_unique_across_the_registry() {
    let mut registry = ProjectRegistry::new();
    let a = registry.create(draft("Harbor Crossing")).expect("create").id;
    let b = registry.create(draft("Office Tower")).expect("create").id;
    let c = registry.create(draft("River Bridge")).expect("create").id;
    assert_ne!(a, b);
    assert_ne!(b, c);
    assert_ne!(a, c);
}

#[test]
fn short_name_fails_and_leaves_collection_unchanged() {
    let mut registry = ProjectRegistry::new();
    registry.create(draft("Harbor Crossing")).expect("create");

    let err = registry.create(draft("Barn")).unwrap_err();
    assert!(matches!(err, RegistryError::NameTooShort { .. }), "got: {err}");
    assert!(err.to_string().contains("too short"));
    assert_eq!(registry.len(), 1, "failed create must not mutate");
}

#[test]
fn duplicate_name_fails_and_leaves_collection_unchanged() {
    let mut registry = ProjectRegistry::new();
    registry.create(draft("Harbor Crossing")).expect("create");

    let err = registry.create(draft("Harbor Crossing")).unwrap_err();
    assert!(matches!(err, RegistryError::DuplicateName { .. }), "got: {err}");
    assert!(err.to_string().contains("already exists"));
    assert_eq!(registry.len(), 1);
}

#[test]
fn name_uniqueness_is_case_sensitive() {
    let mut registry = ProjectRegistry::new();
    registry.create(draft("Harbor Crossing")).expect("create");
    registry
        .create(draft("harbor crossing"))
        .expect("differently-cased name is a different name");
    assert_eq!(registry.len(), 2);
}

#[test]
fn initials_derive_from_the_first_two_name_tokens() {
    let mut registry = ProjectRegistry::new();
    let ep = registry.create(draft("Example Project")).expect("create");
    assert_eq!(ep.initials, "ep");

    let solo = registry.create(draft("Solos")).expect("create");
    assert_eq!(solo.initials, "s");
}

// ---------------------------------------------------------------------------
// 2. Lookup
// ---------------------------------------------------------------------------

#[test]
fn get_and_get_by_name_miss_softly() {
    let mut registry = ProjectRegistry::new();
    registry.create(draft("Harbor Crossing")).expect("create");

    assert!(registry.get(ProjectId::new()).is_none());
    assert!(registry.get_by_name("Office Tower").is_none());
    assert!(registry.get_by_name("harbor crossing").is_none(), "exact match only");
    assert!(registry.get_by_name("Harbor Crossing").is_some());
}

// ---------------------------------------------------------------------------
// 3. Update
// ---------------------------------------------------------------------------

#[test]
fn update_replaces_fields_but_preserves_id_and_todos() {
    let mut registry = ProjectRegistry::new();
    let id = registry.create(draft("Harbor Crossing")).expect("create").id;
    registry.add_todo(id, todo_draft("Pour footings"));

    let mut replacement = draft("Office Tower");
    replacement.status = ProjectStatus::Active;
    replacement.cost = 2_542_000.0;
    replacement.progress = 35;
    // A draft list must never clobber the owned to-dos.
    replacement.todos = vec![];

    let updated = registry.update(id, replacement).expect("update");
    assert_eq!(updated.id, id);
    assert_eq!(updated.name, "Office Tower");
    assert_eq!(updated.initials, "ot", "initials recomputed from new name");
    assert_eq!(updated.status, ProjectStatus::Active);
    assert_eq!(updated.cost, 2_542_000.0);
    assert_eq!(updated.todos.len(), 1, "todos survive whole-record update");
    assert_eq!(updated.todos[0].name, "Pour footings");
}

#[test]
fn update_does_not_revalidate_name() {
    let mut registry = ProjectRegistry::new();
    registry.create(draft("Harbor Crossing")).expect("create");
    let id = registry.create(draft("Office Tower")).expect("create").id;

    // Length and uniqueness are only checked at create time.
    assert!(registry.update(id, draft("Hut")).is_some());
    assert!(registry.update(id, draft("Harbor Crossing")).is_some());
    assert_eq!(registry.filter("Harbor Crossing").len(), 2);
}

#[test]
fn update_of_missing_project_returns_none() {
    let mut registry = ProjectRegistry::new();
    assert!(registry.update(ProjectId::new(), draft("Office Tower")).is_none());
    assert!(registry.is_empty());
}

// ---------------------------------------------------------------------------
// 4. Delete
// ---------------------------------------------------------------------------

#[test]
fn delete_present_id_shrinks_by_one_and_forgets_the_id() {
    let mut registry = ProjectRegistry::new();
    let id = registry.create(draft("Harbor Crossing")).expect("create").id;
    registry.create(draft("Office Tower")).expect("create");

    let removed = registry.delete(id).expect("present id");
    assert_eq!(removed.name, "Harbor Crossing");
    assert_eq!(registry.len(), 1);
    assert!(registry.get(id).is_none());
}

#[test]
fn delete_absent_id_is_a_noop() {
    let mut registry = ProjectRegistry::new();
    registry.create(draft("Harbor Crossing")).expect("create");
    assert!(registry.delete(ProjectId::new()).is_none());
    assert_eq!(registry.len(), 1);
}

// ---------------------------------------------------------------------------
// 5. Filter and aggregates
// ---------------------------------------------------------------------------

#[test]
fn filter_matches_case_insensitively_preserving_order() {
    let mut registry = ProjectRegistry::new();
    registry.create(draft("Example Project")).expect("create");
    registry.create(draft("Office Tower")).expect("create");
    registry.create(draft("Projection Room")).expect("create");

    let hits = registry.filter("pRoJ");
    let names: Vec<&str> = hits.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, ["Example Project", "Projection Room"]);

    assert!(registry.filter("warehouse").is_empty());
    assert_eq!(registry.len(), 3, "filter must not mutate");
}

#[test]
fn total_cost_sums_all_projects() {
    let mut registry = ProjectRegistry::new();
    assert_eq!(registry.total_cost(), 0.0);

    for (name, cost) in [("Harbor Crossing", 100.0), ("Office Tower", 250.0), ("River Bridge", 0.0)] {
        let mut d = draft(name);
        d.cost = cost;
        registry.create(d).expect("create");
    }
    assert_eq!(registry.total_cost(), 350.0);
}

// ---------------------------------------------------------------------------
// 6. To-do ownership
// ---------------------------------------------------------------------------

#[test]
fn todos_append_in_insertion_order() {
    let mut registry = ProjectRegistry::new();
    let id = registry.create(draft("Harbor Crossing")).expect("create").id;

    registry.add_todo(id, todo_draft("Pour footings"));
    registry.add_todo(id, todo_draft("Erect steel"));

    let names: Vec<&str> = registry.todos(id).iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, ["Pour footings", "Erect steel"]);
}

#[test]
fn add_todo_to_missing_project_is_a_silent_noop() {
    let mut registry = ProjectRegistry::new();
    registry.create(draft("Harbor Crossing")).expect("create");

    assert!(registry.add_todo(ProjectId::new(), todo_draft("Pour footings")).is_none());
    assert_eq!(registry.len(), 1);
    assert!(registry.projects()[0].todos.is_empty());
}

#[test]
fn update_todo_overwrites_in_place() {
    let mut registry = ProjectRegistry::new();
    let id = registry.create(draft("Harbor Crossing")).expect("create").id;
    registry.add_todo(id, todo_draft("Pour footings"));
    let todo_id = registry.add_todo(id, todo_draft("Erect steel")).expect("add").id;

    let updated = registry
        .update_todo(
            id,
            todo_id,
            TodoDraft {
                name: "Erect steel frame".to_string(),
                description: "Bays 1-4".to_string(),
                status: TodoStatus::InProgress,
                due_date: finish(),
            },
        )
        .expect("update");
    assert_eq!(updated.id, todo_id);
    assert_eq!(updated.status, TodoStatus::InProgress);

    let names: Vec<&str> = registry.todos(id).iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, ["Pour footings", "Erect steel frame"], "position kept");
}

#[test]
fn update_todo_misses_softly() {
    let mut registry = ProjectRegistry::new();
    let id = registry.create(draft("Harbor Crossing")).expect("create").id;
    let todo_id = registry.add_todo(id, todo_draft("Pour footings")).expect("add").id;

    assert!(registry.update_todo(ProjectId::new(), todo_id, todo_draft("x")).is_none());
    assert!(registry
        .update_todo(id, sitetrack_core::TodoId::new(), todo_draft("x"))
        .is_none());
    assert_eq!(registry.todos(id)[0].name, "Pour footings");
}

#[test]
fn remove_todo_follows_the_delete_convention() {
    let mut registry = ProjectRegistry::new();
    let id = registry.create(draft("Harbor Crossing")).expect("create").id;
    let todo_id = registry.add_todo(id, todo_draft("Pour footings")).expect("add").id;

    let removed = registry.remove_todo(id, todo_id).expect("present");
    assert_eq!(removed.name, "Pour footings");
    assert!(registry.todos(id).is_empty());

    assert!(registry.remove_todo(id, todo_id).is_none(), "second remove is a no-op");
}

#[test]
fn todos_of_missing_project_are_empty() {
    let registry = ProjectRegistry::new();
    assert!(registry.todos(ProjectId::new()).is_empty());
}

// ---------------------------------------------------------------------------
// 7. Snapshot import/export
// ---------------------------------------------------------------------------

#[test]
fn import_into_fresh_registry_recreates_everything_but_project_ids() {
    let mut registry = ProjectRegistry::new();
    let id = registry.create(draft("Harbor Crossing")).expect("create").id;
    registry.add_todo(id, todo_draft("Pour footings"));
    let mut tower = draft("Office Tower");
    tower.cost = 250.0;
    tower.progress = 60;
    registry.create(tower).expect("create");

    let snapshot = registry.export_snapshot();

    let mut fresh = ProjectRegistry::new();
    let summary = fresh.import_snapshot(snapshot.clone());
    assert_eq!(summary.created, 2);
    assert_eq!(summary.updated, 0);
    assert_eq!(summary.skipped, 0);

    for (original, imported) in snapshot.iter().zip(fresh.projects()) {
        assert_ne!(imported.id, original.id, "create path mints fresh ids");
        assert_eq!(imported.name, original.name);
        assert_eq!(imported.description, original.description);
        assert_eq!(imported.status, original.status);
        assert_eq!(imported.user_role, original.user_role);
        assert_eq!(imported.finish_date, original.finish_date);
        assert_eq!(imported.cost, original.cost);
        assert_eq!(imported.progress, original.progress);
        assert_eq!(imported.initials, original.initials);
        assert_eq!(imported.todos, original.todos, "todos adopted verbatim");
    }
}

#[test]
fn import_matched_by_name_preserves_id_and_todos() {
    let mut registry = ProjectRegistry::new();
    let id = registry.create(draft("Harbor Crossing")).expect("create").id;
    let todo_id = registry.add_todo(id, todo_draft("Pour footings")).expect("add").id;

    let mut record = draft("Harbor Crossing");
    record.status = ProjectStatus::Finished;
    record.progress = 100;
    let mut incoming = ProjectRegistry::new();
    let record = incoming.create(record).expect("create").clone();

    let summary = registry.import_snapshot(vec![record]);
    assert_eq!(summary.updated, 1);

    let project = registry.get(id).expect("still present under the same id");
    assert_eq!(project.status, ProjectStatus::Finished);
    assert_eq!(project.progress, 100);
    assert_eq!(project.todos.len(), 1, "prior todos preserved exactly");
    assert_eq!(project.todos[0].id, todo_id);
}

#[test]
fn import_skips_invalid_records_but_processes_the_rest() {
    let mut source = ProjectRegistry::new();
    source.create(draft("Harbor Crossing")).expect("create");
    source.create(draft("Office Tower")).expect("create");
    let mut records = source.export_snapshot();
    // Sabotage one record below the name minimum; it must not block the batch.
    records[0].name = "Hut".to_string();

    let mut registry = ProjectRegistry::new();
    let summary = registry.import_snapshot(records);
    assert_eq!(summary.created, 1);
    assert_eq!(summary.skipped, 1);
    assert_eq!(registry.len(), 1);
    assert_eq!(registry.projects()[0].name, "Office Tower");
}

#[test]
fn import_fires_created_hook_per_new_project() {
    use std::cell::Cell;
    use std::rc::Rc;

    let mut source = ProjectRegistry::new();
    source.create(draft("Harbor Crossing")).expect("create");
    source.create(draft("Office Tower")).expect("create");
    let records = source.export_snapshot();

    let created = Rc::new(Cell::new(0));
    let counter = created.clone();
    let mut registry = ProjectRegistry::new();
    registry.set_on_created(move |_| counter.set(counter.get() + 1));
    registry.import_snapshot(records);
    assert_eq!(created.get(), 2);
}
