use serde_json::{json, Value};
use yuca::error::YucaError;
use yuca::path::{resolve, PathKey, Route, Segment};

fn routes_of(tree: &Value) -> Vec<(String, Value)> {
    let mut routes = resolve(tree.as_object().unwrap())
        .map(|directive| {
            let (route, value) = directive.unwrap();
            (route.to_string(), value.clone())
        })
        .collect::<Vec<_>>();
    routes.sort_by(|a, b| a.0.cmp(&b.0));
    routes
}

#[test]
fn test_path_key_parsing() {
    assert_eq!(
        PathKey::parse("projects[0]").unwrap(),
        PathKey {
            name: "projects".to_string(),
            index: Some(0)
        }
    );
    assert_eq!(
        PathKey::parse("projects").unwrap(),
        PathKey {
            name: "projects".to_string(),
            index: None
        }
    );
}

#[test]
fn test_resolve_flattens_nested_tree() {
    let tree = json!({
        "name": "Jane",
        "contact": {"email": "jane@example.com"},
        "projects[1]": {
            "title": "Renamed",
            "tags": [0, 2]
        }
    });

    assert_eq!(
        routes_of(&tree),
        vec![
            ("contact.email".to_string(), json!("jane@example.com")),
            ("name".to_string(), json!("Jane")),
            ("projects[1].tags".to_string(), json!([0, 2])),
            ("projects[1].title".to_string(), json!("Renamed")),
        ]
    );
}

#[test]
fn test_resolve_route_segments() {
    let tree = json!({"projects[3]": {"title": "x"}});
    let (route, _) = resolve(tree.as_object().unwrap()).next().unwrap().unwrap();
    assert_eq!(
        route.segments(),
        &[
            Segment::Field("projects".to_string()),
            Segment::Index(3),
            Segment::Field("title".to_string()),
        ]
    );
}

#[test]
fn test_resolve_siblings_after_indexed_branch() {
    let tree = json!({
        "a[0]": {"b[1]": {"c": 1}, "d": 2},
        "e": 3
    });

    let routes: Vec<String> = routes_of(&tree).into_iter().map(|(r, _)| r).collect();
    assert_eq!(routes, vec!["a[0].b[1].c", "a[0].d", "e"]);
}

#[test]
fn test_resolve_is_restartable() {
    let tree = json!({"x": {"y": 1}, "z": [0]});
    assert_eq!(routes_of(&tree), routes_of(&tree));
}

#[test]
fn test_resolve_empty_tree() {
    let tree = serde_json::Map::new();
    assert_eq!(resolve(&tree).count(), 0);
}

#[test]
fn test_resolve_rejects_malformed_key() {
    let tree = json!({"projects[x]": {"title": "a"}});
    let results: Vec<_> = resolve(tree.as_object().unwrap()).collect();
    assert_eq!(results.len(), 1);
    assert!(matches!(results[0], Err(YucaError::MalformedKey { ref key }) if key == "projects[x]"));
}

#[test]
fn test_resolve_rejects_indexed_leaf() {
    let tree = json!({"projects[0]": "not a mapping"});
    let mut directives = resolve(tree.as_object().unwrap());
    assert!(matches!(directives.next(), Some(Err(YucaError::IndexedLeaf { .. }))));
    assert!(directives.next().is_none());
}

#[test]
fn test_route_builders() {
    let route = Route::new().field("contact").field("email");
    assert_eq!(
        route.segments(),
        [Segment::Field("contact".to_string()), Segment::Field("email".to_string())]
    );
    assert_eq!(route.to_string(), "contact.email");
}
