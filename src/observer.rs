//! One set of window `scroll`/`resize`/`mousemove` listeners shared by every
//! component. Components subscribe with a callback and hold the returned
//! [`Subscription`] for as long as they want updates.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{AddEventListenerOptions, MouseEvent, Window};
use yew::prelude::*;

use crate::error::{self, PageError};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollSnapshot {
    pub scroll_y: f64,
    pub viewport_width: f64,
    pub viewport_height: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointerSnapshot {
    pub client_x: f64,
    pub client_y: f64,
    pub viewport_width: f64,
    pub viewport_height: f64,
}

type Listener<T> = Rc<dyn Fn(&T)>;

/// Ordered callback list with stable ids.
pub struct Registry<T> {
    next_id: Cell<u64>,
    entries: RefCell<Vec<(u64, Listener<T>)>>,
}

impl<T> Default for Registry<T> {
    fn default() -> Self {
        Self {
            next_id: Cell::new(0),
            entries: RefCell::new(Vec::new()),
        }
    }
}

impl<T> Registry<T> {
    pub fn insert(&self, listener: Listener<T>) -> u64 {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        self.entries.borrow_mut().push((id, listener));
        id
    }

    pub fn remove(&self, id: u64) -> bool {
        let mut entries = self.entries.borrow_mut();
        let before = entries.len();
        entries.retain(|(entry_id, _)| *entry_id != id);
        entries.len() != before
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Calls every listener in insertion order. The list is copied first so a
    /// listener may subscribe or unsubscribe while being notified.
    pub fn notify(&self, value: &T) {
        if self.is_empty() {
            return;
        }
        let listeners: Vec<Listener<T>> = self
            .entries
            .borrow()
            .iter()
            .map(|(_, listener)| listener.clone())
            .collect();
        for listener in listeners {
            listener(value);
        }
    }
}

#[derive(Clone, Copy)]
enum Channel {
    Scroll,
    Pointer,
}

struct WindowListeners {
    window: Window,
    on_scroll: Closure<dyn Fn()>,
    on_resize: Closure<dyn Fn()>,
    on_pointer: Closure<dyn Fn(MouseEvent)>,
}

impl Drop for WindowListeners {
    fn drop(&mut self) {
        let _ = self
            .window
            .remove_event_listener_with_callback("scroll", self.on_scroll.as_ref().unchecked_ref());
        let _ = self
            .window
            .remove_event_listener_with_callback("resize", self.on_resize.as_ref().unchecked_ref());
        let _ = self
            .window
            .remove_event_listener_with_callback("mousemove", self.on_pointer.as_ref().unchecked_ref());
        log::debug!("Viewport observer detached");
    }
}

#[derive(Default)]
struct ObserverInner {
    scroll: Registry<ScrollSnapshot>,
    pointer: Registry<PointerSnapshot>,
    last_scroll: Cell<Option<ScrollSnapshot>>,
    listeners: RefCell<Option<WindowListeners>>,
}

#[derive(Clone, Default)]
pub struct ViewportObserver {
    inner: Rc<ObserverInner>,
}

impl PartialEq for ViewportObserver {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

/// Unsubscribes when dropped.
pub struct Subscription {
    observer: Weak<ObserverInner>,
    channel: Channel,
    id: u64,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(inner) = self.observer.upgrade() {
            match self.channel {
                Channel::Scroll => inner.scroll.remove(self.id),
                Channel::Pointer => inner.pointer.remove(self.id),
            };
        }
    }
}

fn viewport_size(window: &Window) -> (f64, f64) {
    let width = window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    let height = window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    (width, height)
}

fn read_scroll(window: &Window) -> ScrollSnapshot {
    let (viewport_width, viewport_height) = viewport_size(window);
    ScrollSnapshot {
        scroll_y: window.scroll_y().unwrap_or(0.0),
        viewport_width,
        viewport_height,
    }
}

impl ViewportObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_attached(&self) -> bool {
        self.inner.listeners.borrow().is_some()
    }

    /// Installs the window listeners. Calling it twice is a no-op.
    pub fn attach(&self) -> Result<(), PageError> {
        if self.is_attached() {
            return Ok(());
        }
        let window = error::window()?;

        let publish_scroll = {
            let weak = Rc::downgrade(&self.inner);
            move || {
                if let (Some(inner), Some(window)) = (weak.upgrade(), web_sys::window()) {
                    ViewportObserver { inner }.publish_scroll(read_scroll(&window));
                }
            }
        };
        let on_scroll = Closure::<dyn Fn()>::new(publish_scroll.clone());
        let on_resize = Closure::<dyn Fn()>::new(publish_scroll);
        let on_pointer = Closure::<dyn Fn(MouseEvent)>::new({
            let weak = Rc::downgrade(&self.inner);
            move |event: MouseEvent| {
                if let (Some(inner), Some(window)) = (weak.upgrade(), web_sys::window()) {
                    let (viewport_width, viewport_height) = viewport_size(&window);
                    ViewportObserver { inner }.publish_pointer(PointerSnapshot {
                        client_x: event.client_x() as f64,
                        client_y: event.client_y() as f64,
                        viewport_width,
                        viewport_height,
                    });
                }
            }
        });

        let passive = AddEventListenerOptions::new();
        passive.set_passive(true);
        window.add_event_listener_with_callback_and_add_event_listener_options(
            "scroll",
            on_scroll.as_ref().unchecked_ref(),
            &passive,
        )?;
        window.add_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref())?;
        window.add_event_listener_with_callback_and_add_event_listener_options(
            "mousemove",
            on_pointer.as_ref().unchecked_ref(),
            &passive,
        )?;

        self.inner.last_scroll.set(Some(read_scroll(&window)));
        *self.inner.listeners.borrow_mut() = Some(WindowListeners {
            window,
            on_scroll,
            on_resize,
            on_pointer,
        });
        log::debug!("Viewport observer attached");
        Ok(())
    }

    pub fn detach(&self) {
        if self.inner.listeners.borrow_mut().take().is_some() {
            let (scroll, pointer) = self.subscriber_count();
            log::debug!(
                "Viewport observer detached ({} scroll, {} pointer subscribers left)",
                scroll,
                pointer
            );
        }
    }

    /// Last scroll state seen, if any.
    pub fn last_scroll(&self) -> Option<ScrollSnapshot> {
        self.inner.last_scroll.get()
    }

    /// Registers `listener` and replays the last known scroll state to it.
    pub fn subscribe_scroll(&self, listener: impl Fn(&ScrollSnapshot) + 'static) -> Subscription {
        let listener: Listener<ScrollSnapshot> = Rc::new(listener);
        let id = self.inner.scroll.insert(listener.clone());
        if let Some(snapshot) = self.last_scroll() {
            listener(&snapshot);
        }
        Subscription {
            observer: Rc::downgrade(&self.inner),
            channel: Channel::Scroll,
            id,
        }
    }

    pub fn subscribe_pointer(&self, listener: impl Fn(&PointerSnapshot) + 'static) -> Subscription {
        let id = self.inner.pointer.insert(Rc::new(listener));
        Subscription {
            observer: Rc::downgrade(&self.inner),
            channel: Channel::Pointer,
            id,
        }
    }

    pub fn publish_scroll(&self, snapshot: ScrollSnapshot) {
        self.inner.last_scroll.set(Some(snapshot));
        self.inner.scroll.notify(&snapshot);
    }

    pub fn publish_pointer(&self, snapshot: PointerSnapshot) {
        self.inner.pointer.notify(&snapshot);
    }

    /// Re-reads the window and republishes, for layout changes that happen
    /// without a scroll (e.g. the loader revealing the page).
    pub fn refresh(&self) {
        if let Some(window) = web_sys::window() {
            self.publish_scroll(read_scroll(&window));
        }
    }

    pub fn subscriber_count(&self) -> (usize, usize) {
        (self.inner.scroll.len(), self.inner.pointer.len())
    }
}

/// Calls `callback` with every scroll update for the lifetime of the
/// component. The most recent closure passed in is the one invoked.
#[hook]
pub fn use_scroll<F>(callback: F)
where
    F: Fn(&ScrollSnapshot) + 'static,
{
    let observer = use_context::<ViewportObserver>();
    let latest = use_mut_ref(|| -> Listener<ScrollSnapshot> { Rc::new(|_: &ScrollSnapshot| {}) });
    *latest.borrow_mut() = Rc::new(callback);

    use_effect_with_deps(
        move |observer| {
            let subscription = match observer {
                Some(observer) => Some(observer.subscribe_scroll(move |snapshot| {
                    let callback = latest.borrow().clone();
                    callback(snapshot);
                })),
                None => {
                    log::warn!("use_scroll called outside a ViewportObserver context");
                    None
                }
            };
            move || drop(subscription)
        },
        observer,
    );
}

#[hook]
pub fn use_pointer<F>(callback: F)
where
    F: Fn(&PointerSnapshot) + 'static,
{
    let observer = use_context::<ViewportObserver>();
    let latest = use_mut_ref(|| -> Listener<PointerSnapshot> { Rc::new(|_: &PointerSnapshot| {}) });
    *latest.borrow_mut() = Rc::new(callback);

    use_effect_with_deps(
        move |observer| {
            let subscription = match observer {
                Some(observer) => Some(observer.subscribe_pointer(move |snapshot| {
                    let callback = latest.borrow().clone();
                    callback(snapshot);
                })),
                None => {
                    log::warn!("use_pointer called outside a ViewportObserver context");
                    None
                }
            };
            move || drop(subscription)
        },
        observer,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(scroll_y: f64) -> ScrollSnapshot {
        ScrollSnapshot {
            scroll_y,
            viewport_width: 1280.0,
            viewport_height: 720.0,
        }
    }

    #[test]
    fn registry_notifies_in_subscription_order() {
        let registry: Registry<u32> = Registry::default();
        let seen = Rc::new(RefCell::new(Vec::new()));
        for tag in ["a", "b", "c"] {
            let seen = seen.clone();
            registry.insert(Rc::new(move |value: &u32| seen.borrow_mut().push((tag, *value))));
        }
        registry.notify(&7);
        assert_eq!(*seen.borrow(), vec![("a", 7), ("b", 7), ("c", 7)]);
    }

    #[test]
    fn registry_tolerates_removal_during_notify() {
        let registry: Rc<Registry<u32>> = Rc::new(Registry::default());
        let calls = Rc::new(Cell::new(0));
        let id_cell = Rc::new(Cell::new(0));
        let id = {
            let registry = registry.clone();
            let calls = calls.clone();
            let id_cell = id_cell.clone();
            registry.clone().insert(Rc::new(move |_: &u32| {
                calls.set(calls.get() + 1);
                registry.remove(id_cell.get());
            }))
        };
        id_cell.set(id);

        registry.notify(&1);
        registry.notify(&2);
        assert_eq!(calls.get(), 1);
        assert!(registry.is_empty());
        assert!(!registry.remove(id));
    }

    #[test]
    fn dropping_subscription_stops_delivery() {
        let observer = ViewportObserver::new();
        let hits = Rc::new(Cell::new(0));
        let subscription = {
            let hits = hits.clone();
            observer.subscribe_scroll(move |_| hits.set(hits.get() + 1))
        };
        observer.publish_scroll(snapshot(10.0));
        assert_eq!(hits.get(), 1);

        drop(subscription);
        observer.publish_scroll(snapshot(20.0));
        assert_eq!(hits.get(), 1);
        assert_eq!(observer.subscriber_count(), (0, 0));
    }

    #[test]
    fn late_subscribers_receive_last_scroll() {
        let observer = ViewportObserver::new();
        observer.publish_scroll(snapshot(340.0));

        let seen = Rc::new(Cell::new(None));
        let _subscription = {
            let seen = seen.clone();
            observer.subscribe_scroll(move |s| seen.set(Some(s.scroll_y)))
        };
        assert_eq!(seen.get(), Some(340.0));
        assert_eq!(observer.last_scroll(), Some(snapshot(340.0)));
    }

    #[test]
    fn pointer_and_scroll_channels_are_independent() {
        let observer = ViewportObserver::new();
        let pointer_hits = Rc::new(Cell::new(0));
        let _pointer = {
            let pointer_hits = pointer_hits.clone();
            observer.subscribe_pointer(move |_| pointer_hits.set(pointer_hits.get() + 1))
        };
        observer.publish_scroll(snapshot(5.0));
        assert_eq!(pointer_hits.get(), 0);

        observer.publish_pointer(PointerSnapshot::default());
        assert_eq!(pointer_hits.get(), 1);
        assert_eq!(observer.subscriber_count(), (0, 1));
    }

    #[test]
    fn subscription_outliving_observer_is_harmless() {
        let observer = ViewportObserver::new();
        let subscription = observer.subscribe_pointer(|_| {});
        drop(observer);
        drop(subscription);
    }
}
