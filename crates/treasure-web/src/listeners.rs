#![forbid(unsafe_code)]

//! DOM event listeners that can be removed exactly.

use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use wasm_bindgen::closure::Closure;
use web_sys::{Event, EventTarget};

use crate::error::MountError;
use crate::events::{EventHost, Listeners};
use crate::wasm::report;

type Callback = Closure<dyn FnMut(Event)>;

/// `addEventListener` / `removeEventListener`.
struct DomEvents;

impl EventHost for DomEvents {
    type Target = EventTarget;
    type Callback = Callback;
    type Error = JsValue;

    fn add(
        &mut self,
        target: &EventTarget,
        kind: &'static str,
        cb: &Callback,
    ) -> Result<(), JsValue> {
        target.add_event_listener_with_callback(kind, cb.as_ref().unchecked_ref())
    }

    fn remove(&mut self, target: &EventTarget, kind: &'static str, cb: &Callback) {
        let removed = target.remove_event_listener_with_callback(kind, cb.as_ref().unchecked_ref());
        if let Err(err) = removed {
            report(&err);
        }
    }
}

/// Listeners registered by one mount. Dropping the set removes everything
/// still registered.
#[derive(Default)]
pub(crate) struct ListenerSet {
    inner: Listeners<EventTarget, Callback>,
}

impl ListenerSet {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Register `handler` for `kind` events on `target`.
    pub(crate) fn listen(
        &mut self,
        target: &EventTarget,
        kind: &'static str,
        handler: impl FnMut(Event) + 'static,
    ) -> Result<(), MountError> {
        let callback = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
        self.inner.listen(&mut DomEvents, target.clone(), kind, callback)?;
        Ok(())
    }

    /// Remove every registered listener.
    pub(crate) fn clear(&mut self) {
        self.inner.clear(&mut DomEvents);
    }
}

impl Drop for ListenerSet {
    fn drop(&mut self) {
        self.clear();
    }
}
