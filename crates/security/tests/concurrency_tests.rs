//! Tests for concurrent first-time policy synthesis.
//!
//! Many callers request the same new name at once. Every caller must get a
//! valid, field-equal policy and the store must end with a single entry.

use std::sync::{Arc, Barrier};
use std::thread;

use meridian_security::AuthorizationPolicyProvider;

const CALLERS: usize = 32;

/// Threads released together by a barrier.
#[test]
fn test_concurrent_threads_single_entry() {
    let provider = AuthorizationPolicyProvider::new();
    let barrier = Barrier::new(CALLERS);
    let name = "Module:Edit:Administrators,Editors:RequireEntityId";

    let policies: Vec<_> = thread::scope(|s| {
        let handles: Vec<_> = (0..CALLERS)
            .map(|_| {
                let provider = &provider;
                let barrier = &barrier;
                s.spawn(move || {
                    barrier.wait();
                    provider.get_or_create(name)
                })
            })
            .collect();

        handles
            .into_iter()
            .map(|h| h.join().expect("caller panicked"))
            .collect()
    });

    assert_eq!(policies.len(), CALLERS);
    let expected = policies[0].as_ref().expect("policy").permission().cloned();
    for policy in &policies {
        let policy = policy.as_ref().expect("every caller gets a policy");
        assert_eq!(policy.permission().cloned(), expected);
    }

    assert_eq!(provider.store().len(), 1);
    assert_eq!(provider.store().names(), vec![name.to_string()]);
}

/// Threads mixing a legacy alias with its canonical form.
#[test]
fn test_concurrent_alias_and_canonical() {
    let provider = AuthorizationPolicyProvider::new();
    let barrier = Barrier::new(CALLERS);

    thread::scope(|s| {
        for i in 0..CALLERS {
            let provider = &provider;
            let barrier = &barrier;
            s.spawn(move || {
                barrier.wait();
                let name = if i % 2 == 0 {
                    "ViewModule"
                } else {
                    "Module:View:Administrators:RequireEntityId"
                };
                assert!(provider.get_or_create(name).is_some());
            });
        }
    });

    assert_eq!(provider.store().len(), 1);
}

/// Async tasks sharing one provider by `Arc`.
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_tasks_single_entry() {
    let provider = Arc::new(AuthorizationPolicyProvider::new());
    let name = "Page:View:Registered Users";

    let tasks: Vec<_> = (0..CALLERS)
        .map(|_| {
            let provider = Arc::clone(&provider);
            tokio::spawn(async move { provider.get_or_create(name) })
        })
        .collect();

    for task in tasks {
        let policy = task.await.expect("task panicked").expect("policy");
        let req = policy.permission().expect("permission requirement");
        assert_eq!(req.entity_name, "Page");
        assert!(req.has_role("Registered Users"));
    }

    assert_eq!(provider.store().len(), 1);
}

/// Distinct names raced together each get exactly one entry.
#[test]
fn test_concurrent_distinct_names() {
    let provider = AuthorizationPolicyProvider::new();
    let barrier = Barrier::new(CALLERS);
    let names: Vec<String> = (0..4).map(|i| format!("Entity{}:View:Users", i)).collect();

    thread::scope(|s| {
        for i in 0..CALLERS {
            let provider = &provider;
            let barrier = &barrier;
            let name = names[i % names.len()].as_str();
            s.spawn(move || {
                barrier.wait();
                provider.get_or_create(name)
            });
        }
    });

    assert_eq!(provider.store().len(), names.len());
}
