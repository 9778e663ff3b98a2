//! The CropDash session: one constructible service object owning the
//! field catalog, the selection state, and the latest published
//! aggregate view-model.
//!
//! # Architecture
//!
//! - `Rc<RefCell<...>>` wrapper for interior mutability in a
//!   single-threaded host; the handle is cheaply cloneable and every
//!   clone shares the same state.
//! - Every mutator runs one committed transition: mutate selection (or
//!   catalog) -> synchronous recompute -> exactly one notification to
//!   subscribers. The published view-model is therefore never stale
//!   relative to the last committed selection.
//! - No ambient singletons: construct one session per application
//!   session and pass the handle around.
//!
//! # Usage
//!
//! ```rust
//! use cropdash_fields::catalog::FieldCatalog;
//! use cropdash_session::FieldSession;
//!
//! let session = FieldSession::new(FieldCatalog::sample());
//! session.set_crop_filter(Some("Wheat"));
//! let vm = session.view_model().expect("wheat fields exist in the sample");
//! assert!(vm.selection_label.starts_with("Wheat Fields"));
//! ```

use cropdash_data::aggregate::build_view_model;
use cropdash_data::selection::{Selection, SelectionState};
use cropdash_data::viewmodel::AggregateViewModel;
use cropdash_fields::catalog::FieldCatalog;
use cropdash_fields::snapshot::FieldSnapshot;
use std::cell::RefCell;
use std::rc::Rc;

/// Handle returned by [`FieldSession::subscribe`]; pass it back to
/// [`FieldSession::unsubscribe`] to stop notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubscriptionId(usize);

type Callback = Rc<dyn Fn(Option<&AggregateViewModel>)>;

struct Inner {
    catalog: FieldCatalog,
    state: SelectionState,
    current: Option<AggregateViewModel>,
    subscribers: Vec<(SubscriptionId, Callback)>,
    next_subscription: usize,
}

/// Shared session handle.
#[derive(Clone)]
pub struct FieldSession {
    inner: Rc<RefCell<Inner>>,
}

impl FieldSession {
    /// Create a session over a catalog. The initial selection is
    /// "all fields" and the first aggregate is computed immediately.
    pub fn new(catalog: FieldCatalog) -> Self {
        let state = SelectionState::new();
        let current = build_view_model(&catalog, &state);
        log::info!(
            "[CropDash] session: started with {} catalog features",
            catalog.len()
        );
        FieldSession {
            inner: Rc::new(RefCell::new(Inner {
                catalog,
                state,
                current,
                subscribers: Vec::new(),
                next_subscription: 0,
            })),
        }
    }

    /// Session over the embedded sample catalog.
    pub fn sample() -> Self {
        FieldSession::new(FieldCatalog::sample())
    }

    /// The latest published view-model, `None` when the selection
    /// resolved to no data.
    pub fn view_model(&self) -> Option<AggregateViewModel> {
        self.inner.borrow().current.clone()
    }

    /// The currently active selection mode.
    pub fn selection(&self) -> Selection {
        self.inner.borrow().state.current()
    }

    /// Distinct crop labels of the catalog, first-encountered order.
    pub fn crop_types(&self) -> Vec<String> {
        self.inner.borrow().catalog.crop_types()
    }

    /// Filter to one crop group, or back to all crops on `None`.
    pub fn set_crop_filter(&self, crop: Option<&str>) {
        self.commit(|inner| inner.state.set_crop_filter(crop));
    }

    /// Focus a single catalog field, or drop the focus on `None`
    /// (reverting to the prevailing crop filter).
    pub fn select_field(&self, id: Option<&str>) {
        self.commit(|inner| inner.state.select_field(id));
    }

    /// Focus a saved snapshot, or clear back to all fields on `None`.
    pub fn select_snapshot(&self, snapshot: Option<FieldSnapshot>) {
        self.commit(|inner| inner.state.select_snapshot(snapshot));
    }

    /// Reset the selection to all fields.
    pub fn clear_selection(&self) {
        self.commit(|inner| inner.state.clear());
    }

    /// Replace the whole catalog atomically, keeping the selection.
    pub fn reload(&self, catalog: FieldCatalog) {
        self.commit(|inner| inner.catalog = catalog);
    }

    /// Register a callback fired once per committed transition with
    /// the freshly published view-model.
    pub fn subscribe(
        &self,
        callback: impl Fn(Option<&AggregateViewModel>) + 'static,
    ) -> SubscriptionId {
        let mut inner = self.inner.borrow_mut();
        let id = SubscriptionId(inner.next_subscription);
        inner.next_subscription += 1;
        inner.subscribers.push((id, Rc::new(callback)));
        id
    }

    /// Remove a subscription; returns whether it existed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut inner = self.inner.borrow_mut();
        let before = inner.subscribers.len();
        inner.subscribers.retain(|(sub_id, _)| *sub_id != id);
        inner.subscribers.len() != before
    }

    /// One committed transition: mutate, recompute, notify once.
    fn commit(&self, mutate: impl FnOnce(&mut Inner)) {
        let (view_model, callbacks) = {
            let mut inner = self.inner.borrow_mut();
            mutate(&mut inner);
            inner.current = build_view_model(&inner.catalog, &inner.state);
            let callbacks: Vec<Callback> = inner
                .subscribers
                .iter()
                .map(|(_, callback)| callback.clone())
                .collect();
            (inner.current.clone(), callbacks)
        };
        // borrow is released here so subscribers may re-enter the session
        for callback in callbacks {
            callback(view_model.as_ref());
        }
    }
}
