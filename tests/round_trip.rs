use pretty_assertions::assert_eq;
use simpletodo::gesture::{DragController, DragThreshold, Point, StackLayout};
use simpletodo::io::store_io::{self, GroupRecord, LoadOutcome, TaskRecord};
use simpletodo::model::{Collection, Entry};
use simpletodo::ops::reorder::Pinned;
use simpletodo::ops::{group_ops, task_ops};
use std::fs;

/// Helper: build a collection from (name, [(text, done)]) tuples
fn build(groups: &[(&str, &[(&str, bool)])]) -> Collection {
    let mut coll = Collection::new();
    for (name, tasks) in groups {
        let g = group_ops::add_named_group(&mut coll, *name);
        for (text, done) in tasks.iter() {
            let t = task_ops::add_task_with_text(&mut coll, g, *text).unwrap();
            task_ops::set_task_done(&mut coll, t, *done).unwrap();
        }
    }
    coll
}

/// Helper: save to a temp file, load into a fresh collection, and assert
/// the records match
fn assert_save_load_round_trip(coll: &Collection) -> Collection {
    let tmp = tempfile::TempDir::new().unwrap();
    let path = tmp.path().join("SimpleToDo/data.json");
    store_io::save(&path, coll).unwrap();

    let mut loaded = Collection::new();
    let outcome = store_io::load(&path, &mut loaded).unwrap();
    assert_eq!(outcome, LoadOutcome::Loaded(coll.group_count()));
    assert_eq!(store_io::encode(&loaded), store_io::encode(coll));
    assert!(loaded.check_invariants().is_empty());
    loaded
}

// ============================================================================
// Save / load round-trips
// ============================================================================

#[test]
fn round_trip_empty_collection() {
    let loaded = assert_save_load_round_trip(&Collection::new());
    assert_eq!(loaded.entries(), &[Entry::Placeholder]);
}

#[test]
fn round_trip_mixed_groups() {
    assert_save_load_round_trip(&build(&[
        ("Work", &[("Ship", false), ("Review", true)]),
        ("", &[]),
        ("Home", &[("", true), ("Dishes", false)]),
    ]));
}

#[test]
fn round_trip_awkward_strings() {
    assert_save_load_round_trip(&build(&[
        ("quotes \" and \\ backslash", &[("line\nbreak", false)]),
        ("ünïcødé ✓", &[("tab\there", true), ("{\"json\": []}", false)]),
        ("   ", &[("null", false)]),
    ]));
}

#[test]
fn round_trip_many_groups_keeps_order() {
    let names: Vec<String> = (0..25).map(|i| format!("group {}", i)).collect();
    let mut coll = Collection::new();
    for name in &names {
        group_ops::add_named_group(&mut coll, name.clone());
    }
    let loaded = assert_save_load_round_trip(&coll);
    let loaded_names: Vec<String> = loaded.groups().map(|g| g.name().to_string()).collect();
    assert_eq!(loaded_names, names);
}

#[test]
fn round_trip_reassigns_identities() {
    let coll = build(&[("Work", &[("Ship", false)])]);
    let loaded = assert_save_load_round_trip(&coll);
    let before = coll.groups().next().unwrap();
    let after = loaded.groups().next().unwrap();
    assert_ne!(before.id(), after.id());
    assert_ne!(before.tasks()[0], after.tasks()[0]);
}

// ============================================================================
// Loading
// ============================================================================

#[test]
fn load_work_ship_sets_back_reference() {
    let tmp = tempfile::TempDir::new().unwrap();
    let path = tmp.path().join("data.json");
    fs::write(
        &path,
        r#"[{"name":"Work","tasks":[{"text":"Ship","isDone":false}]}]"#,
    )
    .unwrap();

    let mut coll = Collection::new();
    store_io::load(&path, &mut coll).unwrap();

    let group = coll.groups().next().unwrap();
    assert_eq!(group.name(), "Work");
    assert_eq!(group.task_count(), 1);
    let task = coll.task(group.tasks()[0]).unwrap();
    assert_eq!(task.text(), "Ship");
    assert!(!task.is_done());
    assert_eq!(task.group(), Some(group.id()));
}

#[test]
fn load_missing_path_is_empty() {
    let tmp = tempfile::TempDir::new().unwrap();
    let mut coll = Collection::new();
    let outcome = store_io::load(&tmp.path().join("missing/data.json"), &mut coll).unwrap();
    assert_eq!(outcome, LoadOutcome::Missing);
    assert_eq!(coll.groups().count(), 0);
}

#[test]
fn load_file_written_with_pascal_case_fields() {
    let tmp = tempfile::TempDir::new().unwrap();
    let path = tmp.path().join("data.json");
    fs::write(
        &path,
        r#"[
  { "Name": "Old", "Tasks": [ { "Text": "t1", "IsDone": true } ] },
  { "Name": "Older", "Tasks": null }
]"#,
    )
    .unwrap();

    let mut coll = Collection::new();
    assert_eq!(store_io::load(&path, &mut coll).unwrap(), LoadOutcome::Loaded(2));
    assert_eq!(
        store_io::encode(&coll),
        vec![
            GroupRecord {
                name: "Old".into(),
                tasks: vec![TaskRecord {
                    text: "t1".into(),
                    is_done: true,
                }],
            },
            GroupRecord {
                name: "Older".into(),
                tasks: vec![],
            },
        ]
    );
}

// ============================================================================
// Drag scenarios through the store
// ============================================================================

fn drag_group(coll: &mut Collection, source_row: usize, target_row: Option<usize>) -> Option<(usize, usize)> {
    let layout = StackLayout::new(coll.entries().to_vec(), 30.0);
    let mut controller = DragController::new(DragThreshold::default(), Pinned::GROUPS);

    let press = layout.row_center(source_row);
    controller.begin_drag(press);
    let nudge = Point::new(press.x + 10.0, press.y);
    controller.update_drag(nudge, &layout, layout.hit_test(nudge))?;

    let release = match target_row {
        Some(row) => layout.row_center(row),
        None => Point::new(0.0, 10_000.0),
    };
    let request = controller.take_drop(release, &layout, layout.hit_test(release), layout.items())?;
    match request.item {
        Entry::Group(g) => group_ops::reorder_groups(coll, g, request.target),
        Entry::Placeholder => None,
    }
}

#[test]
fn scenario_single_group_then_swap() {
    let mut coll = build(&[("A", &[("T1", false), ("T2", false)])]);
    let a = coll.group_at(0).unwrap();

    assert_eq!(drag_group(&mut coll, 1, Some(0)), None);
    assert_eq!(drag_group(&mut coll, 1, None), None);
    assert_eq!(coll.entries(), &[Entry::Placeholder, Entry::Group(a)]);

    let b = group_ops::add_named_group(&mut coll, "B");
    assert_eq!(
        coll.entries(),
        &[Entry::Placeholder, Entry::Group(a), Entry::Group(b)]
    );
    assert_eq!(drag_group(&mut coll, 2, Some(1)), Some((2, 1)));
    assert_eq!(
        coll.entries(),
        &[Entry::Placeholder, Entry::Group(b), Entry::Group(a)]
    );
}

#[test]
fn scenario_dragging_placeholder_does_nothing() {
    let mut coll = build(&[("A", &[]), ("B", &[])]);
    let before = coll.entries().to_vec();
    assert_eq!(drag_group(&mut coll, 0, Some(2)), None);
    assert_eq!(coll.entries(), before.as_slice());
}

#[test]
fn scenario_drop_without_drag_is_noop() {
    let coll = build(&[("A", &[]), ("B", &[])]);
    let before = coll.entries().to_vec();
    let layout = StackLayout::new(before.clone(), 30.0);
    let mut controller: DragController<Entry> = DragController::new(DragThreshold::default(), Pinned::GROUPS);

    let release = Point::new(0.0, 10_000.0);
    let request = controller.take_drop(release, &layout, layout.hit_test(release), layout.items());
    assert!(request.is_none());
    assert_eq!(coll.entries(), before.as_slice());
}

#[test]
fn reordered_groups_persist_in_new_order() {
    let mut coll = build(&[("A", &[]), ("B", &[]), ("C", &[])]);
    drag_group(&mut coll, 3, Some(1)).unwrap();
    let loaded = assert_save_load_round_trip(&coll);
    let names: Vec<&str> = loaded.groups().map(|g| g.name()).collect();
    assert_eq!(names, vec!["C", "A", "B"]);
}
