use std::rc::Rc;

use noql::accordion::{Accordion, Selection};
use noql::content::Catalog;
use noql::platform::Navigation;
use noql::platform::cli::HeadlessNavigation;

fn accordion_with_fragment(fragment: Option<&str>) -> (Accordion, Rc<HeadlessNavigation>) {
    let catalog = Rc::new(Catalog::load().unwrap());
    let navigation = Rc::new(HeadlessNavigation::with_fragment(fragment));
    let accordion = Accordion::new(catalog, Rc::clone(&navigation) as Rc<dyn Navigation>);
    (accordion, navigation)
}

#[test]
fn deep_link_opens_its_topic_on_load() {
    let (accordion, _navigation) = accordion_with_fragment(Some("dynamic-schema-needs"));
    assert_eq!(accordion.selection(), Selection::Open(0));
}

#[test]
fn unknown_fragment_on_load_opens_nothing() {
    let (accordion, _navigation) = accordion_with_fragment(Some("not-a-real-topic"));
    assert_eq!(accordion.selection(), Selection::Closed);
}

#[test]
fn plain_load_opens_nothing() {
    let (accordion, _navigation) = accordion_with_fragment(None);
    assert_eq!(accordion.selection(), Selection::Closed);
}

#[test]
fn toggle_pushes_the_slug_fragment() {
    let (accordion, navigation) = accordion_with_fragment(None);

    accordion.toggle(1);

    assert_eq!(accordion.selection(), Selection::Open(1));
    assert_eq!(
        navigation.current_fragment(),
        Some("scale-out-architecture".to_owned()),
    );
    assert_eq!(navigation.entry_count(), 2);
}

#[test]
fn closing_pushes_a_fragmentless_entry() {
    let (accordion, navigation) = accordion_with_fragment(None);

    accordion.toggle(1);
    accordion.toggle(1);

    assert_eq!(accordion.selection(), Selection::Closed);
    assert_eq!(navigation.current_fragment(), None);
    assert_eq!(navigation.entry_count(), 3);
}

#[test]
fn switching_topics_never_shows_two_open() {
    let (accordion, navigation) = accordion_with_fragment(None);

    accordion.toggle(2);
    accordion.toggle(6);

    assert_eq!(accordion.selection(), Selection::Open(6));
    assert_eq!(accordion.selection().open_index(), Some(6));
    assert_eq!(
        navigation.current_fragment(),
        Some("real-world-performance".to_owned()),
    );
}

#[test]
fn back_navigation_updates_selection_without_pushing() {
    let (accordion, navigation) = accordion_with_fragment(None);

    accordion.toggle(0);
    accordion.toggle(3);
    assert_eq!(navigation.entry_count(), 3);

    navigation.back();

    assert_eq!(accordion.selection(), Selection::Open(0));
    assert_eq!(navigation.entry_count(), 3);
}

#[test]
fn forward_navigation_reopens_the_later_topic() {
    let (accordion, navigation) = accordion_with_fragment(None);

    accordion.toggle(0);
    accordion.toggle(3);
    navigation.back();
    navigation.forward();

    assert_eq!(accordion.selection(), Selection::Open(3));
    assert_eq!(navigation.entry_count(), 3);
}

#[test]
fn back_to_a_fragmentless_entry_keeps_the_selection() {
    let (accordion, navigation) = accordion_with_fragment(None);

    accordion.toggle(3);
    navigation.back();

    // The first entry has no fragment, so the topic stays open.
    assert_eq!(accordion.selection(), Selection::Open(3));
}

#[test]
fn manual_fragment_edit_opens_the_topic_without_a_controller_push() {
    let (accordion, navigation) = accordion_with_fragment(None);

    navigation.navigate(Some("enterprise-support"));

    assert_eq!(accordion.selection(), Selection::Open(7));
    assert_eq!(navigation.entry_count(), 2);
}

#[test]
fn out_of_range_toggle_is_ignored() {
    let (accordion, navigation) = accordion_with_fragment(None);

    accordion.toggle(99);

    assert_eq!(accordion.selection(), Selection::Closed);
    assert_eq!(navigation.entry_count(), 1);
}
