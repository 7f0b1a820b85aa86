use super::*;
use crate::helpers::*;
use std::sync::Arc;

fn create_test_registry() -> Registry {
    Registry::new(vec![
        create_entry("alpha", Arc::new(FixedEntry::new(vec![0, 1, 0]))),
        create_entry("beta", Arc::new(FixedEntry::new(vec![0, 1, 0]))),
    ])
}

#[test]
fn can_list_metadata_in_registration_order() {
    let registry = create_test_registry();

    let ids = registry.list().iter().map(|meta| meta.id.as_str()).collect::<Vec<_>>();

    assert_eq!(ids, vec!["alpha", "beta"]);
    assert!(registry.list().iter().all(|meta| !meta.name.is_empty() && !meta.description.is_empty()));
}

#[test]
fn can_resolve_exact_match_only() {
    let registry = create_test_registry();

    assert_eq!(registry.resolve("alpha").map(|entry| entry.id.as_str()), Ok("alpha"));

    for id in ["Alpha", "alph", "alpha ", "gamma"] {
        let result = registry.resolve(id).map(|entry| entry.id.as_str());

        assert_eq!(result, Err(GatewayError::NotFound(format!("algorithm '{id}' is not found"))));
    }
}

#[test]
fn can_resolve_repeatedly_without_mutation() {
    let registry = create_test_registry();

    let first = registry.resolve("beta").map(|entry| entry.id.clone());
    let second = registry.resolve("beta").map(|entry| entry.id.clone());

    assert_eq!(first, second);
    assert_eq!(registry.list().len(), 2);
}
