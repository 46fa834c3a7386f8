//! ShoppingList state-transition tests: add, remove, complete, totals.

mod common;

use common::{apple_banana, mixed_list, names};
use shopcalc::{ShopCalcError, ShoppingList};

// ---------------------------------------------------------------------------
// add_item
// ---------------------------------------------------------------------------

#[test]
fn add_item_appends_to_pending() {
    let mut list = ShoppingList::new();
    let message = list.add_item("Apple", 3, Some(298.0)).unwrap();
    assert!(message.contains("Apple"));

    let items = list.items();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].name, "Apple");
    assert_eq!(items[0].quantity, 3);
    assert_eq!(items[0].price, Some(298.0));
    assert!(items[0].completed_at.is_none());
}

#[test]
fn add_item_preserves_insertion_order() {
    let list = apple_banana();
    assert_eq!(names(&list.items()), vec!["Apple", "Banana"]);
}

#[test]
fn add_item_rejects_blank_name() {
    let mut list = ShoppingList::new();
    for name in ["", "   "] {
        let err = list.add_item(name, 1, None).unwrap_err();
        assert!(matches!(err, ShopCalcError::InvalidArgument(_)));
        assert!(err.is_domain());
    }
    assert!(list.is_empty());
}

#[test]
fn add_item_rejects_zero_quantity_and_bad_prices() {
    let mut list = ShoppingList::new();
    assert!(list.add_item("Egg", 0, None).is_err());
    assert!(list.add_item("Egg", 1, Some(-1.0)).is_err());
    assert!(list.add_item("Egg", 1, Some(f64::NAN)).is_err());
    assert!(list.add_item("Egg", 1, Some(f64::INFINITY)).is_err());
    assert!(list.is_empty());

    list.add_item("Free sample", 1, Some(0.0)).unwrap();
    assert_eq!(list.len(), 1);
}

// ---------------------------------------------------------------------------
// remove_item
// ---------------------------------------------------------------------------

#[test]
fn remove_item_shifts_later_items_down() {
    let mut list = apple_banana();
    list.add_item("Cherry", 1, None).unwrap();

    let removed = list.remove_item(1).unwrap();
    assert_eq!(removed.name, "Banana");
    assert_eq!(names(&list.items()), vec!["Apple", "Cherry"]);
    assert!(list.completed_items().is_empty());
}

#[test]
fn remove_item_out_of_range_changes_nothing() {
    let mut list = apple_banana();
    let err = list.remove_item(5).unwrap_err();
    assert!(matches!(err, ShopCalcError::InvalidIndex { index: 5, len: 2 }));
    assert!(!err.is_domain());

    assert_eq!(names(&list.items()), vec!["Apple", "Banana"]);
    assert!(list.completed_items().is_empty());
}

#[test]
fn remove_item_on_empty_list_fails() {
    let mut list = ShoppingList::new();
    assert!(matches!(
        list.remove_item(0),
        Err(ShopCalcError::InvalidIndex { index: 0, len: 0 })
    ));
}

// ---------------------------------------------------------------------------
// complete_item
// ---------------------------------------------------------------------------

#[test]
fn complete_item_moves_to_completed() {
    let mut list = apple_banana();
    let done = list.complete_item(0).unwrap();
    assert_eq!(done.name, "Apple");
    assert!(done.is_completed());

    assert_eq!(names(&list.items()), vec!["Banana"]);
    assert_eq!(names(&list.completed_items()), vec!["Apple"]);
    assert_eq!(list.calculate_total(), 2.0 * 158.0);
}

#[test]
fn complete_item_stamps_completion_time() {
    let mut list = apple_banana();
    list.complete_item(1).unwrap();
    let completed = list.completed_items();
    let banana = &completed[0];
    assert!(banana.completed_at.unwrap() >= banana.added_at);
    assert!(list.items()[0].completed_at.is_none());
}

#[test]
fn completed_items_keep_completion_order() {
    let mut list = apple_banana();
    list.add_item("Cherry", 1, None).unwrap();
    list.complete_item(2).unwrap();
    list.complete_item(0).unwrap();
    assert_eq!(names(&list.completed_items()), vec!["Cherry", "Apple"]);
    assert_eq!(names(&list.items()), vec!["Banana"]);
}

#[test]
fn complete_item_out_of_range_changes_nothing() {
    let mut list = apple_banana();
    assert!(matches!(
        list.complete_item(2),
        Err(ShopCalcError::InvalidIndex { index: 2, len: 2 })
    ));
    assert_eq!(list.len(), 2);
    assert_eq!(list.completed_len(), 0);
}

#[test]
fn stale_index_addresses_the_shifted_item() {
    // Indices are positional: after completing index 0, index 0 is Banana.
    let mut list = apple_banana();
    list.complete_item(0).unwrap();
    let second = list.complete_item(0).unwrap();
    assert_eq!(second.name, "Banana");
    assert!(list.complete_item(0).is_err());
}

// ---------------------------------------------------------------------------
// Snapshots
// ---------------------------------------------------------------------------

#[test]
fn snapshots_are_independent() {
    let list = mixed_list();

    let mut items = list.items();
    items.clear();
    let mut completed = list.completed_items();
    completed[0].name = "changed".into();

    assert_eq!(list.len(), 3);
    assert_eq!(list.completed_items()[0].name, "バナナ");
}

// ---------------------------------------------------------------------------
// calculate_total
// ---------------------------------------------------------------------------

#[test]
fn total_skips_unpriced_items() {
    let mut list = ShoppingList::new();
    list.add_item("A", 2, Some(100.0)).unwrap();
    list.add_item("B", 1, None).unwrap();
    list.add_item("C", 3, Some(50.0)).unwrap();
    assert_eq!(list.calculate_total(), 350.0);
}

#[test]
fn total_excludes_completed_items() {
    let list = mixed_list();
    assert_eq!(list.calculate_total(), 3.0 * 298.0 + 2.0 * 120.5);
}

#[test]
fn total_of_empty_list_is_zero() {
    assert_eq!(ShoppingList::new().calculate_total(), 0.0);
}
