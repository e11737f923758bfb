use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::prelude::*;

/// Coalesces redraw requests into one `requestAnimationFrame` callback.
///
/// Any number of `request_redraw()` calls between two frames produce a
/// single repaint.
pub struct RedrawScheduler {
    shared: Rc<Shared>,
}

struct Shared {
    window: Option<web_sys::Window>,
    pending: Cell<Option<i32>>,
    frame: RefCell<Option<Closure<dyn FnMut()>>>,
}

impl Shared {
    fn schedule(&self) {
        if self.pending.get().is_some() {
            return;
        }
        let Some(window) = self.window.as_ref() else {
            return;
        };
        let frame = self.frame.borrow();
        let Some(cb) = frame.as_ref() else {
            return;
        };
        if let Ok(id) = window.request_animation_frame(cb.as_ref().unchecked_ref()) {
            self.pending.set(Some(id));
        }
    }
}

impl RedrawScheduler {
    pub fn new(draw: impl Fn() + 'static) -> Self {
        let shared = Rc::new(Shared {
            window: web_sys::window(),
            pending: Cell::new(None),
            frame: RefCell::new(None),
        });

        let weak = Rc::downgrade(&shared);
        let frame = Closure::<dyn FnMut()>::new(move || {
            if let Some(shared) = weak.upgrade() {
                shared.pending.set(None);
            }
            draw();
        });
        *shared.frame.borrow_mut() = Some(frame);

        Self { shared }
    }

    pub fn request_redraw(&self) {
        self.shared.schedule();
    }
}

impl Drop for RedrawScheduler {
    fn drop(&mut self) {
        if let Some(id) = self.shared.pending.take()
            && let Some(window) = self.shared.window.as_ref()
        {
            let _ = window.cancel_animation_frame(id);
        }
        self.shared.frame.borrow_mut().take();
    }
}
