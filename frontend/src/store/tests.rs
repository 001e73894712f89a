use super::*;
use pathprogress_shared::{PathStatus, TaskStatus};

fn task(id: &str, status: TaskStatus) -> TaskResponse {
    TaskResponse {
        id: Identifier::from(id),
        base: TaskPayload {
            title: format!("task {}", id),
            description: Some(format!("about {}", id)),
            r#type: Some(status),
            status: Some(status),
            estimated_minutes: Some(30),
        },
    }
}

fn section(id: &str, tasks: Option<Vec<TaskResponse>>) -> SectionResponse {
    SectionResponse {
        id: Identifier::from(id),
        status: Some(PathStatus::InProgress),
        tasks,
        base: SectionPayload {
            title: format!("section {}", id),
            description: None,
            order_index: Some(1),
            estimated_days: Some(7),
        },
    }
}

fn path(id: &str, sections: Option<Vec<SectionResponse>>) -> PathResponse {
    PathResponse {
        id: Some(Identifier::from(id)),
        status: Some(PathStatus::InProgress),
        sections,
        base: PathPayload {
            title: format!("path {}", id),
            description: Some("A longer description".to_string()),
            start_date: Some("2026-01-01".to_string()),
            target_end_date: Some("2026-03-01".to_string()),
        },
    }
}

#[test]
fn test_upsert_appends_unknown_path() {
    let list = vec![path("p-1", None)];
    let next = upsert_path(&list, &path("p-2", None));

    assert_eq!(next.len(), 2);
    assert_eq!(next[0], list[0]);
    assert_eq!(next[1].base.title, "path p-2");
}

#[test]
fn test_upsert_merges_by_string_coerced_id() {
    let mut existing = path("7", None);
    existing.id = Some(Identifier::Num(7));

    let incoming = PathResponse {
        id: Some(Identifier::from("7")),
        status: None,
        sections: None,
        base: PathPayload {
            title: "Renamed".to_string(),
            description: None,
            start_date: None,
            target_end_date: None,
        },
    };
    let next = upsert_path(std::slice::from_ref(&existing), &incoming);

    assert_eq!(next.len(), 1);
    assert_eq!(next[0].base.title, "Renamed");
    // 响应里缺席的字段保留原值
    assert_eq!(next[0].base.description.as_deref(), Some("A longer description"));
    assert_eq!(next[0].status, Some(PathStatus::InProgress));
    assert_eq!(next[0].id, Some(Identifier::from("7")));
}

#[test]
fn test_upsert_without_id_leaves_list_unchanged() {
    let list = vec![path("p-1", None)];
    let incoming = PathResponse {
        id: None,
        status: None,
        sections: None,
        base: PathPayload {
            title: "Orphan".to_string(),
            description: None,
            start_date: None,
            target_end_date: None,
        },
    };
    assert_eq!(upsert_path(&list, &incoming), list);
}

#[test]
fn test_fields_patch_keeps_absent_values() {
    let original = path("p-1", Some(vec![section("s-1", None)]));
    let sparse = PathResponse {
        id: None,
        status: None,
        sections: None,
        base: PathPayload {
            title: "New title".to_string(),
            description: None,
            start_date: Some("2026-02-01".to_string()),
            target_end_date: None,
        },
    };
    let patched = apply_patch(&original, &PathPatch::Fields(sparse));

    assert_eq!(patched.base.title, "New title");
    assert_eq!(patched.base.start_date.as_deref(), Some("2026-02-01"));
    assert_eq!(patched.base.description, original.base.description);
    assert_eq!(patched.base.target_end_date, original.base.target_end_date);
    assert_eq!(patched.status, original.status);
    assert_eq!(patched.sections, original.sections);
    assert_eq!(patched.id, original.id);
}

#[test]
fn test_section_patch_merges_and_keeps_loaded_tasks() {
    let original = path(
        "p-1",
        Some(vec![section(
            "s-1",
            Some(vec![task("t-1", TaskStatus::Completed)]),
        )]),
    );
    let incoming = SectionResponse {
        id: Identifier::from("s-1"),
        status: None,
        tasks: None,
        base: SectionPayload {
            title: "Renamed section".to_string(),
            description: Some("now described".to_string()),
            order_index: None,
            estimated_days: Some(14),
        },
    };
    let patched = apply_patch(&original, &PathPatch::Section(incoming));
    let sections = patched.sections.unwrap();

    assert_eq!(sections.len(), 1);
    assert_eq!(sections[0].base.title, "Renamed section");
    assert_eq!(sections[0].base.estimated_days, Some(14));
    // 响应没带出子级时，已加载的任务不能丢
    assert_eq!(
        sections[0].tasks.as_ref().map(|tasks| tasks.len()),
        Some(1)
    );
    assert_eq!(sections[0].base.order_index, Some(1));
    assert_eq!(sections[0].status, Some(PathStatus::InProgress));
}

#[test]
fn test_section_patch_appends_and_materializes_sections() {
    let original = path("p-1", None);
    let incoming = section("s-9", None);
    let patched = apply_patch(&original, &PathPatch::Section(incoming.clone()));

    assert_eq!(patched.sections, Some(vec![incoming]));
}

#[test]
fn test_remove_section_leaves_siblings_untouched() {
    let keep = section("s-2", Some(vec![task("t-9", TaskStatus::InProgress)]));
    let original = path("p-1", Some(vec![section("s-1", None), keep.clone()]));

    let patched = apply_patch(&original, &PathPatch::RemoveSection(Identifier::from("s-1")));

    assert_eq!(patched.sections, Some(vec![keep]));
}

#[test]
fn test_task_patch_updates_only_target_task() {
    let untouched_section = section("s-1", Some(vec![task("t-1", TaskStatus::NotStarted)]));
    let original = path(
        "p-1",
        Some(vec![
            untouched_section.clone(),
            section(
                "s-2",
                Some(vec![
                    task("t-3", TaskStatus::NotStarted),
                    task("t-4", TaskStatus::NotStarted),
                ]),
            ),
        ]),
    );
    let incoming = TaskResponse {
        id: Identifier::from("t-3"),
        base: TaskPayload {
            title: "task t-3".to_string(),
            description: None,
            r#type: Some(TaskStatus::Completed),
            status: Some(TaskStatus::Completed),
            estimated_minutes: None,
        },
    };
    let patched = apply_patch(
        &original,
        &PathPatch::Task {
            section_id: Identifier::from("s-2"),
            task: incoming,
        },
    );
    let sections = patched.sections.unwrap();

    assert_eq!(sections[0], untouched_section);
    let tasks = sections[1].tasks.as_ref().unwrap();
    assert_eq!(tasks[0].status(), TaskStatus::Completed);
    // 合并时缺席字段同样落回原值
    assert_eq!(tasks[0].base.description.as_deref(), Some("about t-3"));
    assert_eq!(tasks[0].base.estimated_minutes, Some(30));
    assert_eq!(tasks[1].status(), TaskStatus::NotStarted);
}

#[test]
fn test_task_patch_appends_when_missing() {
    let original = path("p-1", Some(vec![section("s-1", Some(vec![]))]));
    let incoming = task("t-new", TaskStatus::NotStarted);
    let patched = apply_patch(
        &original,
        &PathPatch::Task {
            section_id: Identifier::from("s-1"),
            task: incoming.clone(),
        },
    );

    assert_eq!(
        patched.sections.unwrap()[0].tasks,
        Some(vec![incoming])
    );
}

#[test]
fn test_remove_task_materializes_matching_section_only() {
    let original = path(
        "p-1",
        Some(vec![
            section("s-1", None),
            section(
                "s-2",
                Some(vec![
                    task("t-3", TaskStatus::Completed),
                    task("t-4", TaskStatus::NotStarted),
                ]),
            ),
        ]),
    );
    let patched = apply_patch(
        &original,
        &PathPatch::RemoveTask {
            section_id: Identifier::from("s-2"),
            task_id: Identifier::from("t-3"),
        },
    );
    let sections = patched.sections.unwrap();

    // 没命中的小节保持未展开
    assert_eq!(sections[0].tasks, None);
    let remaining = sections[1].tasks.as_ref().unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].id, Identifier::from("t-4"));
}

#[test]
fn test_remove_task_from_unloaded_section_yields_empty_list() {
    let original = path("p-1", Some(vec![section("s-1", None)]));
    let patched = apply_patch(
        &original,
        &PathPatch::RemoveTask {
            section_id: Identifier::from("s-1"),
            task_id: Identifier::from("t-1"),
        },
    );

    assert_eq!(patched.sections.unwrap()[0].tasks, Some(vec![]));
}

#[test]
fn test_patch_path_in_rewrites_only_target_path() {
    let bystander = path("p-1", Some(vec![section("s-1", None)]));
    let list = vec![bystander.clone(), path("p-2", Some(vec![section("s-2", None)]))];

    let next = patch_path_in(
        &list,
        &Identifier::from("p-2"),
        &PathPatch::RemoveSection(Identifier::from("s-2")),
    );

    assert_eq!(next[0], bystander);
    assert_eq!(next[1].sections, Some(vec![]));
}

#[test]
fn test_remove_path_accepts_either_id_form() {
    let mut numeric = path("3", None);
    numeric.id = Some(Identifier::Num(3));
    let list = vec![numeric, path("4", None)];

    let next = remove_path(&list, &Identifier::from("3"));

    assert_eq!(next.len(), 1);
    assert_eq!(next[0].id, Some(Identifier::from("4")));
}

#[test]
fn test_find_path_matches_numeric_and_text() {
    let mut numeric = path("12", None);
    numeric.id = Some(Identifier::Num(12));
    let list = vec![path("p-1", None), numeric];

    assert!(find_path(&list, &Identifier::from("12")).is_some());
    assert!(find_path(&list, &Identifier::Num(12)).is_some());
    assert!(find_path(&list, &Identifier::from("missing")).is_none());
}

#[test]
fn test_ensure_tasks_loaded() {
    assert!(ensure_tasks_loaded(&section("s-1", Some(vec![]))).is_ok());

    let err = ensure_tasks_loaded(&section("s-1", None)).unwrap_err();
    assert!(matches!(err, ApiError::Precondition(_)));
    assert!(err.to_string().contains("Tasks not loaded"));
}
