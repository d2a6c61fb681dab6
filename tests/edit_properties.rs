use std::sync::Arc;

use glade_core::document::Document;
use glade_core::edit::{EditCommand, EditError};
use glade_core::event::{DocumentEvent, RecordingBus};
use glade_core::scene::SceneHandle;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Spawns a node attached under the document root.
fn attached(doc: &Document, name: &str) -> SceneHandle {
    let node = doc.tree().spawn(name);
    doc.tree().attach(doc.tree().root().id(), node.clone());
    node
}

/// Detached copy of a live node (same ids), ready to be mutated into
/// the "after" state of a diff-mode edit.
fn working_copy(live: &SceneHandle) -> SceneHandle {
    live.read().duplicate().instantiate()
}

// ---------------------------------------------------------------------------
// Round trips
// ---------------------------------------------------------------------------

#[test]
fn diff_round_trip_restores_exact_state() {
    let doc = Document::new();
    let room = attached(&doc, "room");
    {
        let mut obj = room.write();
        obj.transform.translation = [4.0, 0.0, -2.0];
        obj.properties.insert("floor".into(), "wood".into());
    }
    let door = doc.tree().spawn("door");
    room.write().children.push(door);
    let initial = room.read().duplicate();

    let after = working_copy(&room);
    {
        let mut obj = after.write();
        obj.name = "hall".into();
        obj.transform.translation = [0.0, 0.0, 0.0];
        obj.properties.insert("floor".into(), "tile".into());
        obj.children.clear();
    }

    let command = EditCommand::diff(std::slice::from_ref(&room), &[after]);
    command.perform(&doc).unwrap();
    assert_eq!(room.read().name, "hall");

    command.reverse(&doc).unwrap();
    // Field-for-field, including descendant subtree shape.
    assert_eq!(room.read().duplicate(), initial);
}

#[test]
fn perform_reverse_is_a_noop_on_observable_state() {
    let doc = Document::new();
    let nodes: Vec<SceneHandle> = (0..3).map(|i| attached(&doc, &format!("n{i}"))).collect();
    let initial: Vec<_> = nodes.iter().map(|n| n.read().duplicate()).collect();

    let afters: Vec<SceneHandle> = nodes
        .iter()
        .map(|n| {
            let copy = working_copy(n);
            copy.write().transform.scale = [2.0, 2.0, 2.0];
            copy
        })
        .collect();

    let command = EditCommand::diff(&nodes, &afters);
    command.perform(&doc).unwrap();
    command.reverse(&doc).unwrap();

    for (node, snapshot) in nodes.iter().zip(&initial) {
        assert_eq!(&node.read().duplicate(), snapshot);
    }
}

#[test]
fn callback_round_trip_ignores_what_the_callback_did() {
    let doc = Document::new();
    let node = attached(&doc, "canvas");
    let initial = node.read().duplicate();

    // Deliberately messy, non-invertible mutation.
    let command = EditCommand::with_callback(
        std::slice::from_ref(&node),
        Arc::new(|doc, obj| {
            obj.name = format!("{}-{}", obj.name, obj.properties.len());
            obj.properties.clear();
            obj.children.push(doc.tree().spawn("debris"));
            obj.children.push(doc.tree().spawn("more-debris"));
            Ok(())
        }),
    );

    command.perform(&doc).unwrap();
    assert_eq!(node.read().children.len(), 2);

    command.reverse(&doc).unwrap();
    assert_eq!(node.read().duplicate(), initial);
}

// ---------------------------------------------------------------------------
// Construction and stale references
// ---------------------------------------------------------------------------

#[test]
fn unmatched_identities_are_excluded() {
    let doc = Document::new();
    let one = attached(&doc, "one");
    let two = attached(&doc, "two");

    let command = EditCommand::diff(&[one.clone(), two], &[working_copy(&one)]);
    assert_eq!(command.len(), 1);
}

#[test]
fn stale_reference_is_a_silent_noop() {
    let doc = Document::new();
    let gone = attached(&doc, "gone");
    let stays = attached(&doc, "stays");

    let gone_after = working_copy(&gone);
    gone_after.write().name = "gone2".into();
    let stays_after = working_copy(&stays);
    stays_after.write().name = "stays2".into();

    let command = EditCommand::diff(&[gone.clone(), stays.clone()], &[gone_after, stays_after]);
    doc.tree().detach(gone.id()).unwrap();

    command.perform(&doc).unwrap();
    assert_eq!(stays.read().name, "stays2");
    assert!(doc.tree().find(gone.id()).is_none());
}

// ---------------------------------------------------------------------------
// Selection across edits
// ---------------------------------------------------------------------------

#[test]
fn selection_survives_when_target_still_resolves() {
    let doc = Document::new();
    let node = attached(&doc, "held");
    doc.selection().select([node.clone()]);

    let after = working_copy(&node);
    after.write().name = "held2".into();
    let command = EditCommand::diff(std::slice::from_ref(&node), &[after]);

    command.perform(&doc).unwrap();
    assert_eq!(doc.selection().selected_ids(), vec![node.id()]);

    command.reverse(&doc).unwrap();
    assert_eq!(doc.selection().selected_ids(), vec![node.id()]);
}

#[test]
fn selection_drops_nodes_deleted_by_another_reference() {
    let doc = Document::new();
    let parent = attached(&doc, "parent");
    let child = doc.tree().spawn("child");
    parent.write().children.push(child.clone());
    let other = attached(&doc, "other");

    doc.selection().select([child, other.clone()]);

    // One command, two references: editing the parent deletes the
    // child; the other reference is an unrelated rename.
    let parent_after = working_copy(&parent);
    parent_after.write().children.clear();
    let other_after = working_copy(&other);
    other_after.write().name = "other2".into();

    let command = EditCommand::diff(
        &[parent.clone(), other.clone()],
        &[parent_after, other_after],
    );
    command.perform(&doc).unwrap();

    // The deleted child is silently dropped; the survivor remains.
    assert_eq!(doc.selection().selected_ids(), vec![other.id()]);
}

// ---------------------------------------------------------------------------
// Notifications
// ---------------------------------------------------------------------------

#[test]
fn each_direction_publishes_selection_then_structure() {
    let bus = Arc::new(RecordingBus::new());
    let doc = Document::with_bus(bus.clone());
    let node = attached(&doc, "n");
    let after = working_copy(&node);
    after.write().name = "n2".into();
    let command = EditCommand::diff(std::slice::from_ref(&node), &[after]);

    for _ in 0..2 {
        command.perform(&doc).unwrap();
        command.reverse(&doc).unwrap();
    }

    let events = bus.take();
    assert_eq!(events.len(), 8);
    for pair in events.chunks(2) {
        assert!(matches!(pair[0], DocumentEvent::SelectionChanged));
        assert!(matches!(pair[1], DocumentEvent::TreeStructureChanged { .. }));
    }
}

#[test]
fn structure_event_carries_touched_nodes() {
    let bus = Arc::new(RecordingBus::new());
    let doc = Document::with_bus(bus.clone());
    let a = attached(&doc, "a");
    let b = attached(&doc, "b");

    let command = EditCommand::with_callback(
        &[a.clone(), b.clone()],
        Arc::new(|_doc, obj| {
            obj.name.push('!');
            Ok(())
        }),
    );
    command.perform(&doc).unwrap();

    let events = bus.take();
    match &events[1] {
        DocumentEvent::TreeStructureChanged { nodes } => {
            let mut ids: Vec<_> = nodes.iter().map(SceneHandle::id).collect();
            ids.sort();
            let mut expected = vec![a.id(), b.id()];
            expected.sort();
            assert_eq!(ids, expected);
        }
        other => panic!("expected structure event, got {other:?}"),
    }
}

// ---------------------------------------------------------------------------
// Failure path
// ---------------------------------------------------------------------------

#[test]
fn callback_failure_reports_first_error() {
    let doc = Document::new();
    let nodes: Vec<SceneHandle> = (0..4).map(|i| attached(&doc, &format!("n{i}"))).collect();

    let command = EditCommand::with_callback(
        &nodes,
        Arc::new(|_doc, obj| {
            if obj.name.ends_with('2') {
                Err(EditError::callback("refused"))
            } else {
                obj.name.push('!');
                Ok(())
            }
        }),
    );
    assert_eq!(command.perform(&doc), Err(EditError::callback("refused")));

    // Reverse still restores everything that was applied.
    command.reverse(&doc).unwrap();
    for (i, node) in nodes.iter().enumerate() {
        assert_eq!(node.read().name, format!("n{i}"));
    }
}
