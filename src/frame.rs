use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use crate::error::{self, PageError};

struct FrameInner {
    running: Cell<bool>,
    raf_id: Cell<Option<i32>>,
    callback: RefCell<Option<Closure<dyn FnMut(f64)>>>,
}

impl FrameInner {
    fn schedule(&self) {
        let Some(window) = web_sys::window() else {
            self.running.set(false);
            return;
        };
        if let Some(callback) = self.callback.borrow().as_ref() {
            match window.request_animation_frame(callback.as_ref().unchecked_ref()) {
                Ok(id) => self.raf_id.set(Some(id)),
                Err(e) => {
                    log::warn!("requestAnimationFrame failed: {:?}", e);
                    self.running.set(false);
                }
            }
        }
    }
}

/// Runs a callback on every animation frame until dropped. The callback gets
/// the frame timestamp in milliseconds and must not drop its own loop.
pub struct FrameLoop {
    inner: Rc<FrameInner>,
}

impl FrameLoop {
    pub fn start<F>(mut on_frame: F) -> Result<Self, PageError>
    where
        F: FnMut(f64) + 'static,
    {
        error::window()?;
        let inner = Rc::new(FrameInner {
            running: Cell::new(true),
            raf_id: Cell::new(None),
            callback: RefCell::new(None),
        });

        let weak = Rc::downgrade(&inner);
        let callback = Closure::<dyn FnMut(f64)>::new(move |timestamp: f64| {
            let Some(inner) = weak.upgrade() else {
                return;
            };
            inner.raf_id.set(None);
            if !inner.running.get() {
                return;
            }
            on_frame(timestamp);
            if inner.running.get() {
                inner.schedule();
            }
        });
        *inner.callback.borrow_mut() = Some(callback);
        inner.schedule();

        Ok(Self { inner })
    }
}

impl Drop for FrameLoop {
    fn drop(&mut self) {
        self.inner.running.set(false);
        if let Some(id) = self.inner.raf_id.take() {
            if let Some(window) = web_sys::window() {
                let _ = window.cancel_animation_frame(id);
            }
        }
        self.inner.callback.borrow_mut().take();
    }
}
