#![forbid(unsafe_code)]

//! Event listener bookkeeping.
//!
//! [`Listeners`] remembers every callback it registered through an
//! [`EventHost`] so that teardown hands the same callback objects back for
//! removal, in registration order.

/// Platform event registration (`addEventListener` / `removeEventListener`).
pub trait EventHost {
    type Target;
    type Callback;
    type Error;

    fn add(
        &mut self,
        target: &Self::Target,
        kind: &'static str,
        callback: &Self::Callback,
    ) -> Result<(), Self::Error>;

    fn remove(&mut self, target: &Self::Target, kind: &'static str, callback: &Self::Callback);
}

struct Entry<T, C> {
    target: T,
    kind: &'static str,
    callback: C,
}

/// Listeners registered by one mount.
pub struct Listeners<T, C> {
    entries: Vec<Entry<T, C>>,
}

impl<T, C> Default for Listeners<T, C> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<T, C> Listeners<T, C> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `callback` for `kind` events on `target` and keep it.
    ///
    /// A callback the host rejects is dropped and not kept.
    pub fn listen<H>(
        &mut self,
        host: &mut H,
        target: T,
        kind: &'static str,
        callback: C,
    ) -> Result<(), H::Error>
    where
        H: EventHost<Target = T, Callback = C>,
    {
        host.add(&target, kind, &callback)?;
        self.entries.push(Entry {
            target,
            kind,
            callback,
        });
        Ok(())
    }

    /// Remove every registered listener and release its callback.
    pub fn clear<H>(&mut self, host: &mut H)
    where
        H: EventHost<Target = T, Callback = C>,
    {
        for e in self.entries.drain(..) {
            host.remove(&e.target, e.kind, &e.callback);
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[derive(Debug, Default)]
    struct FakeEvents {
        added: Vec<(&'static str, &'static str, u32)>,
        removed: Vec<(&'static str, &'static str, u32)>,
        reject: Option<&'static str>,
    }

    impl EventHost for FakeEvents {
        type Target = &'static str;
        type Callback = u32;
        type Error = &'static str;

        fn add(
            &mut self,
            target: &&'static str,
            kind: &'static str,
            cb: &u32,
        ) -> Result<(), &'static str> {
            if self.reject == Some(kind) {
                return Err("rejected");
            }
            self.added.push((*target, kind, *cb));
            Ok(())
        }

        fn remove(&mut self, target: &&'static str, kind: &'static str, cb: &u32) {
            self.removed.push((*target, kind, *cb));
        }
    }

    #[test]
    fn clear_removes_exactly_what_was_added() {
        let mut host = FakeEvents::default();
        let mut set = Listeners::new();
        set.listen(&mut host, "window", "resize", 1).unwrap();
        set.listen(&mut host, "window", "mousemove", 2).unwrap();
        set.listen(&mut host, "input", "input", 3).unwrap();
        assert_eq!(set.len(), 3);

        set.clear(&mut host);
        assert_eq!(host.removed, host.added);
        assert!(set.is_empty());
    }

    #[test]
    fn rejected_listener_is_not_kept() {
        let mut host = FakeEvents {
            reject: Some("click"),
            ..FakeEvents::default()
        };
        let mut set = Listeners::new();
        set.listen(&mut host, "window", "resize", 1).unwrap();
        assert_eq!(set.listen(&mut host, "toggle", "click", 2), Err("rejected"));
        set.clear(&mut host);
        assert_eq!(host.removed, vec![("window", "resize", 1)]);
    }

    #[test]
    fn clear_twice_removes_once() {
        let mut host = FakeEvents::default();
        let mut set = Listeners::new();
        set.listen(&mut host, "window", "resize", 7).unwrap();
        set.clear(&mut host);
        set.clear(&mut host);
        assert_eq!(host.removed.len(), 1);
    }
}
