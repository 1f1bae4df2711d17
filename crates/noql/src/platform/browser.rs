use std::cell::RefCell;
use std::rc::Rc;

use zoon::{Closure, JsCast, JsValue, Task, Timer, UnwrapThrowExt, history, window};

use super::{ClipboardWriter, Navigation, Scheduler};

/// Fragment of the current address, without the leading `#`.
fn read_fragment() -> Option<String> {
    let hash = window().location().hash().unwrap_or_default();
    let fragment = hash.trim_start_matches('#');
    (!fragment.is_empty()).then(|| fragment.to_owned())
}

fn read_pathname() -> String {
    window()
        .location()
        .pathname()
        .unwrap_or_else(|_| "/".to_string())
}

/// History-backed [`Navigation`].
///
/// `pushState` fires neither `popstate` nor `hashchange`, so pushes stay
/// silent on their own. Back/forward and manual fragment edits may fire
/// both events; registered callbacks have to tolerate duplicate calls.
pub struct BrowserNavigation {
    callbacks: Rc<RefCell<Vec<Box<dyn FnMut(Option<String>)>>>>,
    _popstate_listener: Closure<dyn Fn()>,
    _hashchange_listener: Closure<dyn Fn()>,
}

impl BrowserNavigation {
    pub fn new() -> Self {
        let callbacks: Rc<RefCell<Vec<Box<dyn FnMut(Option<String>)>>>> =
            Rc::new(RefCell::new(Vec::new()));

        let popstate_listener = fragment_listener(Rc::clone(&callbacks));
        let hashchange_listener = fragment_listener(Rc::clone(&callbacks));
        window()
            .add_event_listener_with_callback(
                "popstate",
                popstate_listener.as_ref().unchecked_ref(),
            )
            .unwrap_throw();
        window()
            .add_event_listener_with_callback(
                "hashchange",
                hashchange_listener.as_ref().unchecked_ref(),
            )
            .unwrap_throw();

        Self {
            callbacks,
            _popstate_listener: popstate_listener,
            _hashchange_listener: hashchange_listener,
        }
    }
}

fn fragment_listener(
    callbacks: Rc<RefCell<Vec<Box<dyn FnMut(Option<String>)>>>>,
) -> Closure<dyn Fn()> {
    Closure::new(move || {
        let fragment = read_fragment();
        for callback in callbacks.borrow_mut().iter_mut() {
            callback(fragment.clone());
        }
    })
}

impl Navigation for BrowserNavigation {
    fn current_fragment(&self) -> Option<String> {
        read_fragment()
    }

    fn push_fragment(&self, fragment: Option<&str>) {
        let url = match fragment {
            Some(fragment) => format!("#{fragment}"),
            None => read_pathname(),
        };
        history()
            .push_state_with_url(&JsValue::NULL, "", Some(&url))
            .unwrap_throw();
    }

    fn on_fragment_change(&self, callback: Box<dyn FnMut(Option<String>)>) {
        self.callbacks.borrow_mut().push(callback);
    }
}

/// [`Scheduler`] backed by the browser timer.
pub struct TimerScheduler;

impl Scheduler for TimerScheduler {
    fn schedule(&self, delay_ms: u32, action: Box<dyn FnOnce()>) {
        Task::start(async move {
            Timer::sleep(delay_ms).await;
            action();
        });
    }
}

/// [`ClipboardWriter`] backed by the async Clipboard API.
pub struct BrowserClipboard;

impl ClipboardWriter for BrowserClipboard {
    fn write_text(&self, text: &str) {
        // Promise intentionally ignored; the mark is set optimistically.
        let _ = window().navigator().clipboard().write_text(text);
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn pushed_fragment_is_readable_back() {
        let navigation = BrowserNavigation::new();

        navigation.push_fragment(Some("scale-out-architecture"));
        assert_eq!(
            navigation.current_fragment(),
            Some("scale-out-architecture".to_owned()),
        );

        navigation.push_fragment(None);
        assert_eq!(navigation.current_fragment(), None);
    }
}
