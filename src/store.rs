// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Observable application state
//!
//! [`Writable`] holds a value and synchronously notifies every subscriber
//! before `set` returns. [`Derived`] recomputes from its dependencies on
//! every change and notifies its own subscribers in turn. [`AppState`] is
//! the single context object built at startup and handed to whatever drives
//! the UI; there are no process-wide stores.
//!
//! Everything here is single-threaded (`Rc`/`RefCell`).

use crate::data::{load_distros, load_tags, CatalogSource};
use crate::filter::filtered_view;
use crate::types::{Distro, Tag};
use std::cell::{Cell, RefCell};
use std::collections::BTreeSet;
use std::fmt;
use std::rc::{Rc, Weak};
use tracing::{debug, trace};

// =============================================================================
// Observable primitives
// =============================================================================

/// Handle returned by `subscribe`, used to unsubscribe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

type Callback<T> = Rc<dyn Fn(&T)>;

struct Slot<T> {
    value: RefCell<Rc<T>>,
    subscribers: RefCell<Vec<(SubscriptionId, Callback<T>)>>,
    next_id: Cell<u64>,
}

/// Shared observable cell; the read side of every store
pub struct Observable<T> {
    slot: Rc<Slot<T>>,
}

impl<T> Clone for Observable<T> {
    fn clone(&self) -> Self {
        Self {
            slot: Rc::clone(&self.slot),
        }
    }
}

impl<T: fmt::Debug + 'static> fmt::Debug for Observable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observable")
            .field("value", &self.get())
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

impl<T: 'static> Observable<T> {
    fn new(value: T) -> Self {
        Self {
            slot: Rc::new(Slot {
                value: RefCell::new(Rc::new(value)),
                subscribers: RefCell::new(Vec::new()),
                next_id: Cell::new(0),
            }),
        }
    }

    fn downgrade(&self) -> WeakObservable<T> {
        WeakObservable {
            slot: Rc::downgrade(&self.slot),
        }
    }

    /// Current value
    #[must_use]
    pub fn get(&self) -> Rc<T> {
        Rc::clone(&self.slot.value.borrow())
    }

    /// Number of live subscribers
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.slot.subscribers.borrow().len()
    }

    /// Register `callback` without calling it
    fn watch(&self, callback: Callback<T>) -> SubscriptionId {
        let id = SubscriptionId(self.slot.next_id.get());
        self.slot.next_id.set(id.0 + 1);
        self.slot.subscribers.borrow_mut().push((id, callback));
        id
    }

    /// Register `callback`, call it with the current value, then on every change
    pub fn subscribe(&self, callback: impl Fn(&T) + 'static) -> SubscriptionId {
        let callback: Callback<T> = Rc::new(callback);
        let id = self.watch(Rc::clone(&callback));
        callback(&*self.get());
        id
    }

    /// Remove a subscriber; false if it was not registered
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut subscribers = self.slot.subscribers.borrow_mut();
        let before = subscribers.len();
        subscribers.retain(|(sub, _)| *sub != id);
        subscribers.len() != before
    }

    fn replace(&self, value: T) {
        *self.slot.value.borrow_mut() = Rc::new(value);
        self.notify();
    }

    fn notify(&self) {
        // Snapshot so callbacks may subscribe, unsubscribe or set re-entrantly.
        let callbacks: Vec<Callback<T>> = self
            .slot
            .subscribers
            .borrow()
            .iter()
            .map(|(_, cb)| Rc::clone(cb))
            .collect();
        for callback in callbacks {
            // Read per call so a nested set is what later subscribers see.
            callback(&*self.get());
        }
    }
}

struct WeakObservable<T> {
    slot: Weak<Slot<T>>,
}

impl<T> WeakObservable<T> {
    fn upgrade(&self) -> Option<Observable<T>> {
        self.slot.upgrade().map(|slot| Observable { slot })
    }
}

/// Anything that can be read and observed
pub trait Readable<T: 'static> {
    /// Underlying observable cell
    fn observable(&self) -> &Observable<T>;

    /// Current value
    fn get(&self) -> Rc<T> {
        self.observable().get()
    }

    /// See [`Observable::subscribe`]
    fn subscribe(&self, callback: impl Fn(&T) + 'static) -> SubscriptionId
    where
        Self: Sized,
    {
        self.observable().subscribe(callback)
    }

    /// See [`Observable::unsubscribe`]
    fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.observable().unsubscribe(id)
    }
}

impl<T: 'static> Readable<T> for Observable<T> {
    fn observable(&self) -> &Observable<T> {
        self
    }
}

/// A store whose value is replaced wholesale by `set`
pub struct Writable<T> {
    inner: Observable<T>,
}

impl<T: 'static> Writable<T> {
    /// Create a store holding `value`
    pub fn new(value: T) -> Self {
        Self {
            inner: Observable::new(value),
        }
    }

    /// Replace the value and notify every subscriber
    pub fn set(&self, value: T) {
        self.inner.replace(value);
    }

    /// Compute a new value from the current one, then `set` it
    pub fn update(&self, f: impl FnOnce(&T) -> T) {
        let next = f(&*self.inner.get());
        self.set(next);
    }
}

impl<T: 'static> Readable<T> for Writable<T> {
    fn observable(&self) -> &Observable<T> {
        &self.inner
    }
}

impl<T: fmt::Debug + 'static> fmt::Debug for Writable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Writable").field(&self.inner.get()).finish()
    }
}

/// A read-only projection recomputed whenever a dependency changes
pub struct Derived<T> {
    inner: Observable<T>,
    detach: Vec<Box<dyn Fn()>>,
}

impl<T: 'static> Derived<T> {
    /// Derive a value from two dependencies
    pub fn from2<A, B, F>(a: &impl Readable<A>, b: &impl Readable<B>, compute: F) -> Self
    where
        A: 'static,
        B: 'static,
        F: Fn(&A, &B) -> T + 'static,
    {
        let a = a.observable();
        let b = b.observable();
        let inner = Observable::new(compute(&*a.get(), &*b.get()));

        let recompute: Rc<dyn Fn()> = {
            let (wa, wb, target) = (a.downgrade(), b.downgrade(), inner.downgrade());
            Rc::new(move || {
                if let (Some(a), Some(b), Some(target)) = (wa.upgrade(), wb.upgrade(), target.upgrade()) {
                    target.replace(compute(&*a.get(), &*b.get()));
                }
            })
        };

        let on_a = Rc::clone(&recompute);
        let id_a = a.watch(Rc::new(move |_: &A| on_a()));
        let on_b = recompute;
        let id_b = b.watch(Rc::new(move |_: &B| on_b()));

        let (wa, wb) = (a.downgrade(), b.downgrade());
        let detach: Vec<Box<dyn Fn()>> = vec![
            Box::new(move || {
                if let Some(a) = wa.upgrade() {
                    a.unsubscribe(id_a);
                }
            }),
            Box::new(move || {
                if let Some(b) = wb.upgrade() {
                    b.unsubscribe(id_b);
                }
            }),
        ];

        Self { inner, detach }
    }
}

impl<T: 'static> Readable<T> for Derived<T> {
    fn observable(&self) -> &Observable<T> {
        &self.inner
    }
}

impl<T> Drop for Derived<T> {
    fn drop(&mut self) {
        for detach in &self.detach {
            detach();
        }
    }
}

impl<T: fmt::Debug + 'static> fmt::Debug for Derived<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Derived").field(&self.inner.get()).finish()
    }
}

// =============================================================================
// Application state
// =============================================================================

/// The application context: catalog, filter selection, inspection state
#[derive(Debug)]
pub struct AppState {
    selected_tags: Writable<BTreeSet<String>>,
    selected_distro: Writable<Option<Distro>>,
    tags: Writable<Vec<Tag>>,
    distros: Writable<Vec<Distro>>,
    loading: Writable<bool>,
    error: Writable<Option<String>>,
    filtered_distros: Derived<Vec<Distro>>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    /// Create state with an empty catalog and `loading = true`
    #[must_use]
    pub fn new() -> Self {
        let selected_tags = Writable::new(BTreeSet::new());
        let distros = Writable::new(Vec::new());
        let filtered_distros = filtered_view(&distros, &selected_tags);
        Self {
            selected_tags,
            selected_distro: Writable::new(None),
            tags: Writable::new(Vec::new()),
            distros,
            loading: Writable::new(true),
            error: Writable::new(None),
            filtered_distros,
        }
    }

    /// Active tag filter
    #[must_use]
    pub fn selected_tags(&self) -> &Writable<BTreeSet<String>> {
        &self.selected_tags
    }

    /// Distro currently being inspected
    #[must_use]
    pub fn selected_distro(&self) -> &Writable<Option<Distro>> {
        &self.selected_distro
    }

    /// Tag catalog
    #[must_use]
    pub fn tags(&self) -> &Writable<Vec<Tag>> {
        &self.tags
    }

    /// Distro catalog, in source order
    #[must_use]
    pub fn distros(&self) -> &Writable<Vec<Distro>> {
        &self.distros
    }

    /// True until the initial load settles
    #[must_use]
    pub fn loading(&self) -> &Writable<bool> {
        &self.loading
    }

    /// Most recent load failure
    #[must_use]
    pub fn error(&self) -> &Writable<Option<String>> {
        &self.error
    }

    /// Distros matching every selected tag, sorted by priority
    #[must_use]
    pub fn filtered_distros(&self) -> &Derived<Vec<Distro>> {
        &self.filtered_distros
    }

    /// Look up a loaded tag
    #[must_use]
    pub fn tag_by_id(&self, id: &str) -> Option<Tag> {
        self.tags.get().iter().find(|t| t.id == id).cloned()
    }

    /// Look up a loaded distro
    #[must_use]
    pub fn distro_by_id(&self, id: &str) -> Option<Distro> {
        self.distros.get().iter().find(|d| d.id == id).cloned()
    }

    // -------------------------------------------------------------------------
    // Data actions
    // -------------------------------------------------------------------------

    /// Replace the tag catalog
    pub fn set_tags(&self, tags: Vec<Tag>) {
        self.tags.set(tags);
    }

    /// Replace the distro catalog
    pub fn set_distros(&self, distros: Vec<Distro>) {
        self.distros.set(distros);
    }

    /// Set the loading flag
    pub fn set_loading(&self, loading: bool) {
        self.loading.set(loading);
    }

    /// Set or clear the error message
    pub fn set_error(&self, message: Option<String>) {
        self.error.set(message);
    }

    /// Clear the error message
    pub fn clear_error(&self) {
        self.error.set(None);
    }

    /// Tag filter actions
    #[must_use]
    pub fn tag_actions(&self) -> TagActions<'_> {
        TagActions {
            selected: &self.selected_tags,
        }
    }

    /// Distro selection actions
    #[must_use]
    pub fn distro_actions(&self) -> DistroActions<'_> {
        DistroActions { state: self }
    }

    /// Restore every store to its initial value
    pub fn reset(&self) {
        debug!("Resetting application state");
        self.selected_tags.set(BTreeSet::new());
        self.selected_distro.set(None);
        self.tags.set(Vec::new());
        self.distros.set(Vec::new());
        self.loading.set(true);
        self.error.set(None);
    }

    /// Run the load sequence: fetch both catalogs, then settle `loading`
    ///
    /// Either both catalogs are written or both are cleared; on failure the
    /// first failing collection's message lands in `error`.
    pub async fn initialize<S>(&self, source: &S)
    where
        S: CatalogSource + ?Sized,
    {
        self.set_loading(true);
        let (tags, distros) = tokio::join!(load_tags(source), load_distros(source));

        match (tags.into_result(), distros.into_result()) {
            (Ok(tags), Ok(distros)) => {
                debug!("Catalog ready: {} tags, {} distros", tags.len(), distros.len());
                self.set_tags(tags);
                self.set_distros(distros);
                self.clear_error();
            }
            (Err(message), _) | (_, Err(message)) => {
                self.set_tags(Vec::new());
                self.set_distros(Vec::new());
                self.set_error(Some(message));
            }
        }

        self.set_loading(false);
    }
}

/// Mutations of the tag filter
#[derive(Debug, Clone, Copy)]
pub struct TagActions<'a> {
    selected: &'a Writable<BTreeSet<String>>,
}

impl TagActions<'_> {
    /// Add `tag_id` if absent, remove it if present
    pub fn toggle(&self, tag_id: &str) {
        trace!("Toggling tag {}", tag_id);
        self.selected.update(|current| {
            let mut next = current.clone();
            if !next.remove(tag_id) {
                next.insert(tag_id.to_string());
            }
            next
        });
    }

    /// Remove every tag from the filter
    pub fn clear(&self) {
        self.selected.set(BTreeSet::new());
    }

    /// Replace the filter with exactly these tags
    pub fn set<I, S>(&self, tag_ids: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.selected.set(tag_ids.into_iter().map(Into::into).collect());
    }
}

/// Mutations of the inspected distro
#[derive(Debug, Clone, Copy)]
pub struct DistroActions<'a> {
    state: &'a AppState,
}

impl DistroActions<'_> {
    /// Inspect `distro`
    pub fn select(&self, distro: Distro) {
        self.state.selected_distro.set(Some(distro));
    }

    /// Inspect the loaded distro with this id; false if unknown
    pub fn select_by_id(&self, id: &str) -> bool {
        match self.state.distro_by_id(id) {
            Some(distro) => {
                self.select(distro);
                true
            }
            None => false,
        }
    }

    /// Stop inspecting
    pub fn clear(&self) {
        self.state.selected_distro.set(None);
    }
}
