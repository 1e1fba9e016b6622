//! Marker-to-handler registry.
//!
//! DESIGN
//! ======
//! The registry is built once at startup and scanned against any scope: the
//! whole document at init, and again after a partial is injected. Each
//! element is stamped with its marker's bound attribute after attaching, so
//! repeated scans never attach the same handler twice.

#[cfg(test)]
#[path = "registry_test.rs"]
mod registry_test;

use std::rc::Rc;

use super::markers::Marker;

/// Element that can carry a "behavior attached" stamp.
pub trait Markable {
    fn is_bound(&self, attribute: &str) -> bool;
    fn mark_bound(&self, attribute: &str);
}

impl<T: Markable + ?Sized> Markable for Rc<T> {
    fn is_bound(&self, attribute: &str) -> bool {
        (**self).is_bound(attribute)
    }

    fn mark_bound(&self, attribute: &str) {
        (**self).mark_bound(attribute);
    }
}

/// A subtree that can be queried by selector.
pub trait Scope<E> {
    fn select_all(&self, selector: &str) -> Vec<E>;
}

/// Matches within a subtree: the root itself first when it matches, then
/// its matching descendants.
pub fn subtree_matches<E: Clone>(root: &E, root_matches: bool, descendants: Vec<E>) -> Vec<E> {
    let mut found = Vec::with_capacity(descendants.len() + 1);
    if root_matches {
        found.push(root.clone());
    }
    found.extend(descendants);
    found
}

/// Behavior attached to elements matching a marker.
pub trait Widget<E> {
    fn marker(&self) -> Marker;
    fn attach(&self, element: &E);
}

pub struct WidgetRegistry<E> {
    widgets: Vec<Box<dyn Widget<E>>>,
}

impl<E> Default for WidgetRegistry<E> {
    fn default() -> Self {
        Self { widgets: Vec::new() }
    }
}

impl<E: Markable> WidgetRegistry<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a handler. Handlers run in registration order during a scan.
    pub fn register(&mut self, widget: impl Widget<E> + 'static) -> &mut Self {
        self.widgets.push(Box::new(widget));
        self
    }

    pub fn markers(&self) -> Vec<Marker> {
        self.widgets.iter().map(|w| w.marker()).collect()
    }

    pub fn len(&self) -> usize {
        self.widgets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }

    /// Attach every handler to its unbound matches in `scope`.
    ///
    /// Returns how many elements were newly activated.
    pub fn scan(&self, scope: &dyn Scope<E>) -> usize {
        let mut attached = 0;
        for widget in &self.widgets {
            let marker = widget.marker();
            let bound = marker.bound_attribute();
            for element in scope.select_all(marker.selector()) {
                if element.is_bound(bound) {
                    continue;
                }
                widget.attach(&element);
                element.mark_bound(bound);
                attached += 1;
            }
        }
        attached
    }
}
