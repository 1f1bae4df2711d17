use std::rc::Rc;

use zoon::{Mutable, Signal, SignalExt};

use crate::content::Catalog;
use crate::platform::Navigation;

/// Which topic body is expanded; at most one at a time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Selection {
    Closed,
    Open(usize),
}

impl Selection {
    /// Next selection after the user presses the header of `index`.
    pub fn toggled(self, index: usize) -> Self {
        if self == Self::Open(index) {
            Self::Closed
        } else {
            Self::Open(index)
        }
    }

    /// Next selection after the address fragment becomes `fragment`.
    ///
    /// Unrecognized and absent fragments leave the selection alone; only a
    /// fragment naming a known topic moves it.
    pub fn navigated(self, catalog: &Catalog, fragment: Option<&str>) -> Self {
        match fragment.and_then(|fragment| catalog.resolve(fragment)) {
            Some(index) => Self::Open(index),
            None => self,
        }
    }

    pub fn open_index(self) -> Option<usize> {
        match self {
            Self::Open(index) => Some(index),
            Self::Closed => None,
        }
    }
}

/// Accordion selection kept in sync with the address fragment, both ways.
///
/// User toggles push history entries; fragment changes arriving from the
/// outside update the selection without pushing anything back.
#[derive(Clone)]
pub struct Accordion {
    catalog: Rc<Catalog>,
    selection: Mutable<Selection>,
    navigation: Rc<dyn Navigation>,
}

impl Accordion {
    pub fn new(catalog: Rc<Catalog>, navigation: Rc<dyn Navigation>) -> Self {
        let initial =
            Selection::Closed.navigated(&catalog, navigation.current_fragment().as_deref());
        let selection = Mutable::new(initial);

        // The callback captures the catalog and the selection cell only, so
        // external fragment changes never loop back into a push.
        navigation.on_fragment_change(Box::new({
            let catalog = Rc::clone(&catalog);
            let selection = selection.clone();
            move |fragment| {
                let next = selection.get().navigated(&catalog, fragment.as_deref());
                selection.set_neq(next);
            }
        }));

        Self {
            catalog,
            selection,
            navigation,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Handles a press on the header of `index`; out-of-range presses are
    /// ignored.
    pub fn toggle(&self, index: usize) {
        if index >= self.catalog.len() {
            return;
        }
        let next = self.selection.get().toggled(index);
        self.selection.set(next);
        match next {
            Selection::Open(open) => self.navigation.push_fragment(self.catalog.slug(open)),
            Selection::Closed => self.navigation.push_fragment(None),
        }
    }

    pub fn selection(&self) -> Selection {
        self.selection.get()
    }

    pub fn selection_signal(&self) -> impl Signal<Item = Selection> + use<> {
        self.selection.signal()
    }

    pub fn is_open_signal(&self, index: usize) -> impl Signal<Item = bool> + use<> {
        self.selection
            .signal()
            .map(move |selection| selection == Selection::Open(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Catalog {
        Catalog::load().unwrap()
    }

    #[test]
    fn toggling_a_closed_topic_opens_it() {
        assert_eq!(Selection::Closed.toggled(2), Selection::Open(2));
    }

    #[test]
    fn toggling_the_open_topic_closes_it() {
        assert_eq!(Selection::Open(2).toggled(2), Selection::Closed);
    }

    #[test]
    fn toggling_another_topic_switches_directly() {
        assert_eq!(Selection::Open(2).toggled(5), Selection::Open(5));
    }

    #[test]
    fn known_fragment_opens_its_topic() {
        let catalog = catalog();
        assert_eq!(
            Selection::Closed.navigated(&catalog, Some("performance-at-scale")),
            Selection::Open(3),
        );
    }

    #[test]
    fn unknown_fragment_changes_nothing() {
        let catalog = catalog();
        assert_eq!(
            Selection::Open(1).navigated(&catalog, Some("not-a-real-topic")),
            Selection::Open(1),
        );
        assert_eq!(
            Selection::Closed.navigated(&catalog, Some("not-a-real-topic")),
            Selection::Closed,
        );
    }

    #[test]
    fn absent_fragment_changes_nothing() {
        let catalog = catalog();
        assert_eq!(
            Selection::Open(4).navigated(&catalog, None),
            Selection::Open(4),
        );
        assert_eq!(Selection::Closed.navigated(&catalog, None), Selection::Closed);
    }
}
