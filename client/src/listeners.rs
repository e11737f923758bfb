use std::cell::RefCell;
use std::collections::HashMap;

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;

struct WindowBinding {
    window: web_sys::Window,
    event: &'static str,
    handler: Closure<dyn Fn(web_sys::Event)>,
}

impl Drop for WindowBinding {
    fn drop(&mut self) {
        let _ = self
            .window
            .remove_event_listener_with_callback(self.event, self.handler.as_ref().unchecked_ref());
    }
}

thread_local! {
    static WINDOW_BINDINGS: RefCell<HashMap<&'static str, WindowBinding>> = RefCell::new(HashMap::new());
}

/// Attach `handler` to a window event, replacing any handler previously bound
/// through here for the same event. Rebinding on remount keeps stale closures
/// from acting on disposed signals.
pub(crate) fn bind_window(event: &'static str, handler: impl Fn(web_sys::Event) + 'static) {
    let Some(window) = web_sys::window() else {
        return;
    };
    WINDOW_BINDINGS.with(|slot| {
        slot.borrow_mut().remove(event);
    });

    let handler = Closure::<dyn Fn(web_sys::Event)>::new(handler);
    if window
        .add_event_listener_with_callback(event, handler.as_ref().unchecked_ref())
        .is_ok()
    {
        WINDOW_BINDINGS.with(|slot| {
            slot.borrow_mut().insert(
                event,
                WindowBinding {
                    window,
                    event,
                    handler,
                },
            );
        });
    }
}
