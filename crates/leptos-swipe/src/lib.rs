//! Leptos Swipe Utilities
//!
//! Horizontal touch swipes and global arrow-key handling for Leptos.
//! Uses a distance threshold to tell a swipe from a tap.

use leptos::prelude::*;
use wasm_bindgen::JsCast;

/// Minimum horizontal travel in pixels for a swipe
pub const DEFAULT_SWIPE_THRESHOLD_PX: f64 = 50.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SwipeDirection {
    /// Finger moved right to left
    Left,
    /// Finger moved left to right
    Right,
}

/// Classify a horizontal gesture. Travel at or below the threshold is no swipe.
pub fn classify_swipe(start_x: f64, end_x: f64, threshold: f64) -> Option<SwipeDirection> {
    let distance = start_x - end_x;
    if distance > threshold {
        Some(SwipeDirection::Left)
    } else if distance < -threshold {
        Some(SwipeDirection::Right)
    } else {
        None
    }
}

/// Touch tracking signals
#[derive(Clone, Copy)]
pub struct SwipeSignals {
    pub start_x_read: ReadSignal<Option<f64>>,
    pub start_x_write: WriteSignal<Option<f64>>,
    pub end_x_read: ReadSignal<Option<f64>>,
    pub end_x_write: WriteSignal<Option<f64>>,
    pub threshold: f64,
}

pub fn create_swipe_signals() -> SwipeSignals {
    create_swipe_signals_with_threshold(DEFAULT_SWIPE_THRESHOLD_PX)
}

pub fn create_swipe_signals_with_threshold(threshold: f64) -> SwipeSignals {
    let (start_x_read, start_x_write) = signal(None::<f64>);
    let (end_x_read, end_x_write) = signal(None::<f64>);
    SwipeSignals {
        start_x_read,
        start_x_write,
        end_x_read,
        end_x_write,
        threshold,
    }
}

fn first_touch_x(ev: &web_sys::TouchEvent) -> Option<f64> {
    ev.touches().get(0).map(|touch| touch.client_x() as f64)
}

/// Create touchstart handler. Records the start position.
pub fn make_on_touchstart(swipe: SwipeSignals) -> impl Fn(web_sys::TouchEvent) + Copy + 'static {
    move |ev: web_sys::TouchEvent| {
        swipe.end_x_write.set(None);
        swipe.start_x_write.set(first_touch_x(&ev));
    }
}

/// Create touchmove handler. Tracks the latest position.
pub fn make_on_touchmove(swipe: SwipeSignals) -> impl Fn(web_sys::TouchEvent) + Copy + 'static {
    move |ev: web_sys::TouchEvent| {
        if let Some(x) = first_touch_x(&ev) {
            swipe.end_x_write.set(Some(x));
        }
    }
}

/// Create touchend handler. Fires `on_swipe` when the gesture passed the threshold.
pub fn make_on_touchend<F>(swipe: SwipeSignals, on_swipe: F) -> impl Fn(web_sys::TouchEvent) + Clone + 'static
where
    F: Fn(SwipeDirection) + Clone + 'static,
{
    move |_ev: web_sys::TouchEvent| {
        let start = swipe.start_x_read.get_untracked();
        let end = swipe.end_x_read.get_untracked();
        swipe.start_x_write.set(None);
        swipe.end_x_write.set(None);

        // A tap has no touchmove
        if let (Some(start), Some(end)) = (start, end) {
            if let Some(direction) = classify_swipe(start, end, swipe.threshold) {
                on_swipe(direction);
            }
        }
    }
}

/// Bind a document keydown handler, passing `KeyboardEvent.key`.
/// Keys typed into inputs are not forwarded.
pub fn bind_global_keydown<F>(on_key: F)
where
    F: Fn(&str) + 'static,
{
    use wasm_bindgen::closure::Closure;

    let on_keydown = Closure::<dyn FnMut(web_sys::KeyboardEvent)>::new(move |ev: web_sys::KeyboardEvent| {
        if let Some(target) = ev.target() {
            if target.dyn_ref::<web_sys::HtmlInputElement>().is_some() { return; }
            if target.dyn_ref::<web_sys::HtmlTextAreaElement>().is_some() { return; }
        }
        on_key(&ev.key());
    });

    if let Some(win) = web_sys::window() {
        if let Some(doc) = win.document() {
            let _ = doc.add_event_listener_with_callback("keydown", on_keydown.as_ref().unchecked_ref());
        }
    }
    on_keydown.forget();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_swipe_left_and_right() {
        assert_eq!(classify_swipe(300.0, 200.0, 50.0), Some(SwipeDirection::Left));
        assert_eq!(classify_swipe(100.0, 180.0, 50.0), Some(SwipeDirection::Right));
    }

    #[test]
    fn test_short_moves_are_ignored() {
        assert_eq!(classify_swipe(100.0, 60.0, DEFAULT_SWIPE_THRESHOLD_PX), None);
        assert_eq!(classify_swipe(100.0, 150.0, DEFAULT_SWIPE_THRESHOLD_PX), None);
        assert_eq!(classify_swipe(100.0, 100.0, DEFAULT_SWIPE_THRESHOLD_PX), None);
    }
}
