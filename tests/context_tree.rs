use literal_select::attributes::AttrValue;
use literal_select::context::{ContextError, ContextNode};

#[test]
fn invariant_duplicate_child_fails() {
    let root = ContextNode::new_root("root");
    let first = root.make_child("b").unwrap();
    first.set_attr("marker", "original");

    match root.make_child("b") {
        Err(ContextError::ChildExists { parent, name }) => {
            assert_eq!(parent, "root");
            assert_eq!(name, "b");
        }
        other => panic!("expected duplicate child error, got {other:?}"),
    }

    // Existing child is not replaced
    let kept = root.child("b").unwrap();
    assert_eq!(kept.attr("marker"), Some(AttrValue::from("original")));
    assert_eq!(root.children(), vec!["b".to_string()]);
}

#[test]
fn invariant_deselected_root_deactivates_new_child() {
    let root = ContextNode::new_root("root");
    root.select(false);

    let child = root.make_child("x").unwrap();
    assert!(child.is_self_selected());
    assert!(!child.is_active());
}

#[test]
fn invariant_deselected_middle_deactivates_subtree() {
    let root = ContextNode::new_root("root");
    let a = root.make_child("a").unwrap();
    let b = a.make_child("b").unwrap();

    a.select(false);

    assert!(!b.is_active());
    assert!(!a.is_active());
    assert!(root.is_active());

    a.select(true);
    assert!(b.is_active());
}

#[test]
fn select_touches_only_the_node() {
    let root = ContextNode::new_root("root");
    let a = root.make_child("a").unwrap();
    let b = a.make_child("b").unwrap();

    a.select(false);
    assert!(root.is_self_selected());
    assert!(b.is_self_selected());
}

#[test]
fn get_child_missing_is_none() {
    let root = ContextNode::new_root("root");
    root.make_child("a").unwrap();

    assert!(root.child("a").is_some());
    assert!(root.child("zzz").is_none());
}

#[test]
fn path_runs_from_node_to_root() {
    let root = ContextNode::new_root("svc");
    let http = root.make_child("http").unwrap();
    let auth = http.make_child("auth").unwrap();

    let path = auth.path();
    assert_eq!(path.len(), 3);
    assert!(std::sync::Arc::ptr_eq(&path[0], &auth));
    assert!(std::sync::Arc::ptr_eq(&path[2], &root));

    assert_eq!(auth.name_path(), vec!["auth", "http", "svc"]);
    assert_eq!(root.name_path(), vec!["svc"]);
    assert!(root.is_root());
    assert!(!auth.is_root());
    assert_eq!(auth.parent().map(|p| p.name().to_string()), Some("http".to_string()));
}

#[test]
fn same_name_allowed_under_different_parents() {
    let root = ContextNode::new_root("root");
    let a = root.make_child("a").unwrap();
    let b = root.make_child("b").unwrap();

    let under_a = a.make_child("leaf").unwrap();
    let under_b = b.make_child("leaf").unwrap();

    b.select(false);
    assert!(under_a.is_active());
    assert!(!under_b.is_active());
}

#[test]
fn node_attributes_are_per_node() {
    let root = ContextNode::new_root("root");
    let child = root.make_child("c").unwrap();

    root.set_attr("owner", "platform");
    assert_eq!(root.attr("owner"), Some("platform".into()));
    assert_eq!(child.attr("owner"), None);

    child.replace_attr("retries", Some(AttrValue::Number(3)));
    assert_eq!(child.attr("retries"), Some(AttrValue::Number(3)));
    child.replace_attr("retries", None);
    assert_eq!(child.attr("retries"), None);

    root.unset_attr("owner");
    assert_eq!(root.attr("owner"), None);
}

#[test]
fn dropped_root_detaches_descendants() {
    let root = ContextNode::new_root("root");
    let child = root.make_child("c").unwrap();
    assert!(child.is_active());

    drop(root);

    assert!(child.parent().is_none());
    assert_eq!(child.name_path(), vec!["c"]);
    assert!(!child.is_active());
}

#[test]
fn node_attributes_accept_structured_values() {
    let root = ContextNode::new_root("root");
    root.set_attr("routes", serde_json::json!(["/a", "/b"]));

    assert_eq!(
        root.attr("routes").and_then(|v| v.as_json().cloned()),
        Some(serde_json::json!(["/a", "/b"]))
    );
}
