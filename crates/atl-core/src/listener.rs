//! Event listener registration and completion fan-out.

use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, warn};

use crate::ids::Handle;
use crate::info::RequestInfo;
use crate::kind::RequestTypeFilter;

/// Callback invoked with a completion report.
pub type ListenerCallback = Arc<dyn Fn(&RequestInfo) + Send + Sync>;

/// A listener filter plus the callback to run when it matches.
///
/// Two listeners are equal when they have the same owner, the same callback
/// (by identity) and the same filters.
#[derive(Clone)]
pub struct EventListener {
    /// Only reports owned by this handle are delivered, `NONE` accepts all
    pub callback_owner: Handle,
    pub callback: ListenerCallback,
    pub request_type: RequestTypeFilter,
    /// Kind bits of interest within `request_type`
    pub kind_mask: u32,
}

impl EventListener {
    /// A listener for every request of any owner.
    #[must_use]
    pub fn new(callback: ListenerCallback) -> Self {
        Self {
            callback_owner: Handle::NONE,
            callback,
            request_type: RequestTypeFilter::All,
            kind_mask: u32::MAX,
        }
    }

    #[must_use]
    pub fn with_owner(mut self, owner: Handle) -> Self {
        self.callback_owner = owner;
        self
    }

    #[must_use]
    pub fn with_filter(mut self, request_type: RequestTypeFilter, kind_mask: u32) -> Self {
        self.request_type = request_type;
        self.kind_mask = kind_mask;
        self
    }

    /// Whether `info` passes the type, kind and owner filters.
    #[must_use]
    pub fn matches(&self, info: &RequestInfo) -> bool {
        self.request_type.accepts(info.category)
            && self.kind_mask & info.kind_bit != 0
            && (self.callback_owner.is_none() || self.callback_owner == info.owner)
    }

    fn same_callback(&self, callback: &ListenerCallback) -> bool {
        Arc::ptr_eq(&self.callback, callback)
    }
}

impl PartialEq for EventListener {
    fn eq(&self, other: &Self) -> bool {
        self.callback_owner == other.callback_owner
            && self.same_callback(&other.callback)
            && self.request_type == other.request_type
            && self.kind_mask == other.kind_mask
    }
}

impl Eq for EventListener {}

impl fmt::Debug for EventListener {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventListener")
            .field("callback_owner", &self.callback_owner)
            .field("callback", &Arc::as_ptr(&self.callback).cast::<()>())
            .field("request_type", &self.request_type)
            .field("kind_mask", &format_args!("{:#x}", self.kind_mask))
            .finish()
    }
}

/// Registered listeners, shared between the dispatcher and its callers.
#[derive(Debug, Default)]
pub struct EventListenerRegistry {
    listeners: RwLock<Vec<EventListener>>,
}

impl EventListenerRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener. Registering an equal listener twice is ignored.
    pub fn add(&self, listener: EventListener) {
        let mut listeners = self.listeners.write();
        if listeners.contains(&listener) {
            warn!(owner = listener.callback_owner.0, "Event listener already registered");
            return;
        }
        debug!(owner = listener.callback_owner.0, "Added event listener");
        listeners.push(listener);
    }

    /// Remove the first listener of `owner`, restricted to the one with
    /// `callback` when given. Returns whether a listener was removed.
    pub fn remove(&self, owner: Handle, callback: Option<&ListenerCallback>) -> bool {
        let mut listeners = self.listeners.write();
        let position = listeners.iter().position(|listener| {
            listener.callback_owner == owner
                && callback.is_none_or(|cb| listener.same_callback(cb))
        });

        match position {
            Some(index) => {
                listeners.remove(index);
                debug!(owner = owner.0, "Removed event listener");
                true
            }
            None => {
                warn!(owner = owner.0, "No event listener to remove");
                false
            }
        }
    }

    /// Deliver `info` to the first matching listener.
    ///
    /// Returns whether a listener was invoked. The callback runs outside the
    /// registry lock so it may register or remove listeners.
    pub fn notify(&self, info: &RequestInfo) -> bool {
        let callback = {
            let listeners = self.listeners.read();
            listeners
                .iter()
                .find(|listener| listener.matches(info))
                .map(|listener| Arc::clone(&listener.callback))
        };

        match callback {
            Some(callback) => {
                callback(info);
                true
            }
            None => false,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.listeners.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.listeners.read().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::envelope::{RequestEnvelope, RequestStatus};
    use crate::ids::ControlId;
    use crate::kind::{ManagerRequestKind, ObjectRequestKind, RequestCategory};
    use crate::request::{ManagerRequest, ObjectRequest, Request};

    fn counting_callback() -> (ListenerCallback, Arc<AtomicUsize>) {
        let count = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&count);
        let callback: ListenerCallback = Arc::new(move |_: &RequestInfo| {
            seen.fetch_add(1, Ordering::SeqCst);
        });
        (callback, count)
    }

    fn info_for(request: Request) -> RequestInfo {
        let mut envelope = RequestEnvelope::from(request);
        envelope.set_status(RequestStatus::Success);
        RequestInfo::from_envelope(&envelope)
    }

    fn trigger_info(owner: Handle) -> RequestInfo {
        info_for(Request::new(ObjectRequest::execute_trigger(ControlId::new(1))).with_owner(owner))
    }

    #[test]
    fn test_equality_is_structural() {
        let (callback, _) = counting_callback();
        let (other_callback, _) = counting_callback();
        let listener = EventListener::new(Arc::clone(&callback)).with_owner(Handle(1));

        assert_eq!(listener, EventListener::new(Arc::clone(&callback)).with_owner(Handle(1)));
        assert_ne!(listener, EventListener::new(other_callback).with_owner(Handle(1)));
        assert_ne!(listener, EventListener::new(Arc::clone(&callback)).with_owner(Handle(2)));
        assert_ne!(
            listener,
            listener.clone().with_filter(RequestTypeFilter::Category(RequestCategory::Object), 1)
        );
    }

    #[test]
    fn test_matches_type_kind_and_owner() {
        let (callback, _) = counting_callback();
        let listener = EventListener::new(callback)
            .with_owner(Handle(5))
            .with_filter(
                RequestTypeFilter::Category(RequestCategory::Object),
                ObjectRequestKind::ExecuteTrigger.bit(),
            );

        assert!(listener.matches(&trigger_info(Handle(5))));
        assert!(!listener.matches(&trigger_info(Handle(6))));

        let stop = info_for(
            Request::new(ObjectRequest::StopTrigger { trigger_id: ControlId::new(1) })
                .with_owner(Handle(5)),
        );
        assert!(!listener.matches(&stop));

        let mute = info_for(Request::new(ManagerRequest::MuteAll).with_owner(Handle(5)));
        assert!(!listener.matches(&mute));
    }

    #[test]
    fn test_ownerless_listener_hears_every_owner() {
        let (callback, _) = counting_callback();
        let listener = EventListener::new(callback);
        assert!(listener.matches(&trigger_info(Handle(1))));
        assert!(listener.matches(&trigger_info(Handle::NONE)));
    }

    #[test]
    fn test_duplicate_add_is_ignored() {
        let registry = EventListenerRegistry::new();
        let (callback, _) = counting_callback();
        registry.add(EventListener::new(Arc::clone(&callback)));
        registry.add(EventListener::new(callback));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_notify_first_match_only() {
        let registry = EventListenerRegistry::new();
        let (first, first_count) = counting_callback();
        let (second, second_count) = counting_callback();
        registry.add(EventListener::new(first));
        registry.add(EventListener::new(second));

        assert!(registry.notify(&trigger_info(Handle(1))));
        assert_eq!(first_count.load(Ordering::SeqCst), 1);
        assert_eq!(second_count.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_notify_skips_non_matching() {
        let registry = EventListenerRegistry::new();
        let (managers, manager_count) = counting_callback();
        let (objects, object_count) = counting_callback();
        registry.add(EventListener::new(managers).with_filter(
            RequestTypeFilter::Category(RequestCategory::Manager),
            ManagerRequestKind::MASK,
        ));
        registry.add(EventListener::new(objects).with_filter(
            RequestTypeFilter::Category(RequestCategory::Object),
            ObjectRequestKind::MASK,
        ));

        assert!(registry.notify(&trigger_info(Handle::NONE)));
        assert_eq!(manager_count.load(Ordering::SeqCst), 0);
        assert_eq!(object_count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_notify_without_listeners() {
        let registry = EventListenerRegistry::new();
        assert!(!registry.notify(&trigger_info(Handle(1))));
    }

    #[test]
    fn test_remove_by_callback_or_owner() {
        let registry = EventListenerRegistry::new();
        let (a, _) = counting_callback();
        let (b, _) = counting_callback();
        registry.add(EventListener::new(Arc::clone(&a)).with_owner(Handle(1)));
        registry.add(EventListener::new(b).with_owner(Handle(1)));
        registry.add(EventListener::new(Arc::clone(&a)).with_owner(Handle(2)));

        assert!(registry.remove(Handle(1), Some(&a)));
        assert_eq!(registry.len(), 2);
        assert!(!registry.remove(Handle(1), Some(&a)));

        assert!(registry.remove(Handle(1), None));
        assert_eq!(registry.len(), 1);

        assert!(!registry.remove(Handle(9), None));
        assert!(!registry.is_empty());
    }

    #[test]
    fn test_remove_by_owner_takes_only_the_first() {
        let registry = EventListenerRegistry::new();
        let (first, first_count) = counting_callback();
        let (second, second_count) = counting_callback();
        registry.add(EventListener::new(first).with_owner(Handle(1)));
        registry.add(EventListener::new(second).with_owner(Handle(1)));

        assert!(registry.remove(Handle(1), None));
        assert_eq!(registry.len(), 1);

        assert!(registry.notify(&trigger_info(Handle(1))));
        assert_eq!(first_count.load(Ordering::SeqCst), 0);
        assert_eq!(second_count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_callback_may_touch_registry() {
        let registry = Arc::new(EventListenerRegistry::new());
        let inner = Arc::clone(&registry);
        let callback: ListenerCallback = Arc::new(move |info: &RequestInfo| {
            inner.remove(info.owner, None);
        });
        registry.add(EventListener::new(callback).with_owner(Handle(4)));

        assert!(registry.notify(&trigger_info(Handle(4))));
        assert!(registry.is_empty());
    }
}
