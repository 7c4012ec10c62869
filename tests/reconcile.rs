//! Behavioural properties of the reconciliation engine

use std::collections::HashMap;

use container_tabs::engine::{self, DEFAULT_CHANNEL_CAPACITY};
use container_tabs::host::{DEFAULT_CONTEXT_ID, PRIVATE_CONTEXT_ID};
use container_tabs::render::{Mutation, CONTAINER_ID_ATTR};
use container_tabs::session::TEMPORARY_CONTAINER_KEY;
use container_tabs::{
    Config, ContainerIdentity, ElementList, HostBindings, MemoryHost, Reconciler, RenderTarget,
    SessionStorage, Transition, WindowContext,
};

fn identity(id: &str, name: &str, color: &str) -> ContainerIdentity {
    ContainerIdentity {
        id: id.to_string(),
        name: name.to_string(),
        icon_url: "resource://usercontext-content/cart.svg".to_string(),
        icon: "cart".to_string(),
        color: color.to_string(),
        color_code: "#51cd00".to_string(),
    }
}

async fn sidebar(host: &MemoryHost, incognito: bool) -> Reconciler {
    Reconciler::initialize(
        HostBindings::memory(host.clone()),
        ElementList::new(),
        WindowContext { id: 42, incognito },
        Config::default(),
        SessionStorage::new(),
    )
    .await
    .unwrap()
}

/// No container id may appear on more than one element
fn assert_no_duplicates(tree: &ElementList) {
    let mut seen: HashMap<String, usize> = HashMap::new();
    for id in tree.container_ids() {
        *seen.entry(id).or_default() += 1;
    }
    for (id, count) in seen {
        assert_eq!(count, 1, "'{}' rendered {} times", id, count);
    }
}

fn assert_group_last(sidebar: &Reconciler) {
    assert_eq!(
        sidebar.tree().children().last(),
        Some(&sidebar.aggregate().element())
    );
}

#[tokio::test]
async fn test_every_id_represented_exactly_once() {
    let host = MemoryHost::new(vec![
        identity("c1", "Personal", "blue"),
        identity("c2", "Work", "orange"),
        identity("tmp1", "tmp1", "red"),
    ])
    .with_temporary(["tmp1", "tmp2"]);
    let mut sidebar = sidebar(&host, false).await;

    sidebar.on_created(identity("tmp2", "tmp2", "red")).await.unwrap();
    sidebar.on_created(identity("c3", "Banking", "green")).await.unwrap();
    host.tag_temporary("c2");
    sidebar.on_updated(identity("c2", "Work", "orange")).await.unwrap();
    sidebar.on_removed("c1");

    for id in [DEFAULT_CONTEXT_ID, "c2", "c3", "tmp1", "tmp2"] {
        let standalone = sidebar.is_standalone(id);
        let grouped = sidebar.is_temporary_member(id);
        assert!(standalone ^ grouped, "'{}' standalone={} grouped={}", id, standalone, grouped);
    }
    assert!(!sidebar.is_standalone("c1") && !sidebar.is_temporary_member("c1"));
    assert_eq!(sidebar.len(), 5);
    sidebar.check_invariant().unwrap();
}

#[tokio::test]
async fn test_temporary_round_trip_never_duplicates() {
    let host = MemoryHost::default();
    let mut sidebar = sidebar(&host, false).await;

    sidebar.on_created(identity("a", "A", "blue")).await.unwrap();
    assert_no_duplicates(sidebar.tree());

    host.tag_temporary("a");
    let t = sidebar.on_updated(identity("a", "A", "blue")).await.unwrap();
    assert_eq!(t, Transition::Demoted);
    assert_no_duplicates(sidebar.tree());

    host.untag_temporary("a");
    let t = sidebar.on_updated(identity("a", "A", "blue")).await.unwrap();
    assert_eq!(t, Transition::Promoted);
    assert_no_duplicates(sidebar.tree());

    assert!(sidebar.is_standalone("a"));
    assert!(!sidebar.is_temporary_member("a"));
    assert!(sidebar.aggregate().is_empty());
    sidebar.check_invariant().unwrap();
}

#[tokio::test]
async fn test_double_removal_matches_single() {
    let host = MemoryHost::default();
    let mut once = sidebar(&host, false).await;
    let mut twice = sidebar(&host, false).await;

    for sidebar in [&mut once, &mut twice] {
        sidebar.on_created(identity("c1", "Work", "blue")).await.unwrap();
        sidebar.on_created(identity("c2", "Home", "pink")).await.unwrap();
    }

    once.on_removed("c1");
    twice.on_removed("c1");
    assert_eq!(twice.on_removed("c1"), Transition::Ignored);

    assert_eq!(once.tree().container_ids(), twice.tree().container_ids());
    assert_eq!(once.snapshot().entries, twice.snapshot().entries);
}

#[tokio::test]
async fn test_private_window_shows_single_context() {
    let host = MemoryHost::new(vec![
        identity("c1", "Personal", "blue"),
        identity("c2", "Work", "orange"),
        identity("c3", "Banking", "green"),
    ]);
    let sidebar = sidebar(&host, true).await;

    assert_eq!(
        sidebar.tree().container_ids(),
        vec![PRIVATE_CONTEXT_ID, TEMPORARY_CONTAINER_KEY]
    );
    let snapshot = sidebar.snapshot();
    assert_eq!(snapshot.entries.len(), 1);
    assert_eq!(snapshot.entries[0].name, Config::default().labels.private);
}

#[tokio::test]
async fn test_private_context_survives_classifier_outage() {
    let host = MemoryHost::new(vec![identity("c1", "Personal", "blue")]);
    host.fail_classification(PRIVATE_CONTEXT_ID);
    let sidebar = sidebar(&host, true).await;

    let snapshot = sidebar.snapshot();
    assert_eq!(snapshot.entry_ids(), vec![PRIVATE_CONTEXT_ID]);
    assert!(snapshot.temporary.is_empty());
    sidebar.check_invariant().unwrap();
}

#[tokio::test]
async fn test_color_change_leaves_name_untouched() {
    let host = MemoryHost::default();
    let mut sidebar = sidebar(&host, false).await;
    sidebar.on_created(identity("c1", "Work", "blue")).await.unwrap();
    let element = sidebar.entry("c1").unwrap().element();

    let before = sidebar.tree().mutations().len();
    sidebar.on_updated(identity("c1", "Work", "yellow")).await.unwrap();
    let patches = &sidebar.tree().mutations()[before..];

    assert_eq!(
        patches,
        &[Mutation::AttributeSet {
            id: element,
            name: "data-identity-color".to_string(),
            value: "yellow".to_string(),
        }]
    );
    assert_eq!(sidebar.tree().attribute(element, "label").as_deref(), Some("Work"));
    assert_eq!(
        sidebar.tree().attribute(element, CONTAINER_ID_ATTR).as_deref(),
        Some("c1")
    );
}

#[tokio::test]
async fn test_group_stays_last() {
    let host = MemoryHost::default().with_temporary(["t1"]);
    let mut sidebar = sidebar(&host, false).await;
    assert_group_last(&sidebar);

    for (id, name) in [("c1", "One"), ("t1", "t1"), ("c2", "Two"), ("c3", "Three")] {
        sidebar.on_created(identity(id, name, "turquoise")).await.unwrap();
        assert_group_last(&sidebar);
    }

    host.untag_temporary("t1");
    sidebar.on_updated(identity("t1", "Kept", "turquoise")).await.unwrap();
    assert_group_last(&sidebar);
    assert_eq!(
        sidebar.tree().container_ids(),
        vec![DEFAULT_CONTEXT_ID, "c1", "c2", "c3", "t1", TEMPORARY_CONTAINER_KEY]
    );
}

#[tokio::test]
async fn test_started_engine_keeps_early_notifications() {
    let host = MemoryHost::new(vec![identity("c1", "Work", "blue")]);
    let (sender, handle) = engine::start(
        HostBindings::memory(host.clone()),
        ElementList::new(),
        WindowContext { id: 42, incognito: false },
        Config::default(),
        SessionStorage::new(),
        DEFAULT_CHANNEL_CAPACITY,
    );

    sender.created(identity("c2", "Shopping", "green")).await.unwrap();
    sender.removed("c1").await.unwrap();
    drop(sender);

    let outcome = handle.await.unwrap().unwrap();
    assert_eq!(outcome.processed, 2);
    assert_eq!(
        outcome.reconciler.snapshot().entry_ids(),
        vec![DEFAULT_CONTEXT_ID, "c2"]
    );
    outcome.reconciler.check_invariant().unwrap();
}

#[tokio::test]
async fn test_actor_drives_full_lifecycle() {
    let host = MemoryHost::new(vec![identity("c1", "Work", "blue")]);
    let sidebar = sidebar(&host, false).await;
    let (sender, handle) = engine::spawn(sidebar, DEFAULT_CHANNEL_CAPACITY);

    sender.created(identity("c2", "Shopping", "green")).await.unwrap();
    sender.flush().await.unwrap();
    host.tag_temporary("c2");
    sender.updated(identity("c2", "Shopping", "green")).await.unwrap();
    sender.removed("c1").await.unwrap();
    sender.removed("c1").await.unwrap();
    drop(sender);

    let outcome = handle.await.unwrap();
    assert_eq!(outcome.processed, 4);
    assert_eq!(outcome.failed, 0);

    let snapshot = outcome.reconciler.snapshot();
    assert_eq!(snapshot.entry_ids(), vec![DEFAULT_CONTEXT_ID]);
    assert_eq!(snapshot.temporary, vec!["c2".to_string()]);
    outcome.reconciler.check_invariant().unwrap();
}
