//! End-to-end shopper flows against the in-memory and file stores.

use std::sync::Arc;

use storefront_cache::{FileStore, MemoryStore, SessionId, Storage};
use storefront_commerce::prelude::*;

fn shirt() -> Product {
    Product::new("1", "Shirt", Money::new(1999)).with_options(
        ProductOptions::from_flat(["White", "Black"], ["S", "M", "L"]),
    )
}

#[test]
fn cart_add_merge_remove() {
    let store = Arc::new(MemoryStore::new());
    let mut session = StorefrontSession::start(store, SessionId::new("flow"));
    let shirt = shirt();

    let line = session.cart_mut().add_to_cart(&shirt, "White", "M");
    assert_eq!(session.cart().total_items(), 1);
    assert_eq!(session.cart().total_price(), "19.99");

    session.cart_mut().add_to_cart(&shirt, "White", "M");
    assert_eq!(session.cart().unique_line_count(), 1);
    assert_eq!(session.cart().total_items(), 2);
    assert_eq!(session.cart().total_price(), "39.98");

    assert!(session.cart_mut().remove_from_cart(&line));
    assert_eq!(session.cart().total_items(), 0);
    assert_eq!(session.cart().total_price(), "0.00");
}

#[test]
fn selection_flow_across_colors() {
    let store = Arc::new(MemoryStore::new());
    let mut session = StorefrontSession::start(store, SessionId::new("flow"));
    let shirt = shirt();

    let mut selection = Selection::for_product(&shirt);
    assert_eq!(selection.available_sizes(&shirt), ["S", "M", "L"]);
    assert_eq!(
        session.add_selection(&shirt, &mut selection).unwrap_err().to_string(),
        "Please select a size"
    );

    selection.select_size("L");
    session.add_selection(&shirt, &mut selection).unwrap();

    selection.select_color("Black");
    selection.select_size("L");
    session.add_selection(&shirt, &mut selection).unwrap();

    assert_eq!(session.cart().unique_line_count(), 2);
    assert_eq!(session.cart().total_price(), "39.98");
}

#[test]
fn sessions_do_not_share_state() {
    let store = Arc::new(MemoryStore::new());
    let catalog = Catalog::seed();
    let backpack = catalog.get(&ProductId::new("6")).unwrap();

    let mut alice = StorefrontSession::start(Arc::clone(&store), SessionId::generate());
    let bob = StorefrontSession::start(Arc::clone(&store), SessionId::generate());

    alice.cart_mut().add_to_cart(backpack, "Black", "");
    alice.view_product(&catalog, &ProductId::new("6")).unwrap();

    let bob_again = StorefrontSession::start(Arc::clone(&store), bob.id().clone());
    assert!(bob_again.cart().is_empty());
    assert!(bob_again.recently_viewed().list().is_empty());
    assert_eq!(alice.cart().total_price(), "39.99");
}

#[test]
fn recently_viewed_excludes_current_product() {
    let store = Arc::new(MemoryStore::new());
    let catalog = Catalog::seed();
    let session = StorefrontSession::start(store, SessionId::new("browse"));

    for id in ["1", "2", "3", "4"] {
        session.view_product(&catalog, &ProductId::new(id)).unwrap();
    }
    session.view_product(&catalog, &ProductId::new("2")).unwrap();

    let names: Vec<String> = session
        .recently_viewed()
        .list_excluding(&ProductId::new("2"))
        .into_iter()
        .map(|e| e.name)
        .collect();
    assert_eq!(names, ["Wireless Headphones", "Running Shoes"]);
}

#[test]
fn file_store_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("state.json");
    let catalog = Catalog::seed();
    let jeans = catalog.get(&ProductId::new("2")).unwrap();

    {
        let store = Arc::new(FileStore::open(&path).unwrap());
        let mut session = StorefrontSession::start(store, SessionId::new("disk"));
        session.cart_mut().add_to_cart(jeans, "Blue", "32");
        session.cart_mut().add_to_cart(jeans, "Blue", "32");
        session.view_product(&catalog, &ProductId::new("2")).unwrap();
        session.end();
    }

    let store = Arc::new(FileStore::open(&path).unwrap());
    assert_eq!(
        store.keys().unwrap(),
        ["session:disk:cart", "session:disk:recentlyViewed"]
    );

    let session = StorefrontSession::start(store, SessionId::new("disk"));
    assert_eq!(session.cart().total_items(), 2);
    assert_eq!(session.cart().total_price(), "99.98");
    assert_eq!(session.recently_viewed().list().len(), 1);
}
