//! Draggable slider bound to a numeric value.

mod drag;
mod source;
mod subscriptions;

use drag::{BindableControl, DragSlider, SliderBounds, TrackGeometry};
use source::{Orientation, PagePoint, PointerSample};
use subscriptions::{DragPhase, ListenerFactory};

use dioxus::prelude::*;
use std::cell::RefCell;
use std::rc::Rc;
use tracing::debug;

type SharedSlider = Rc<RefCell<DragSlider<SignalListeners>>>;

const LOG_TARGET: &str = "wymusic::slider";

/// Handler slot refreshed on every render and read when the event fires, so
/// the slider always calls the parent's latest handler.
struct LatestHandler<T>(Rc<RefCell<Option<T>>>);

impl<T> Clone for LatestHandler<T> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<T: Copy> LatestHandler<T> {
    fn new() -> Self {
        Self(Rc::new(RefCell::new(None)))
    }

    fn replace(&self, handler: Option<T>) {
        *self.0.borrow_mut() = handler;
    }

    fn get(&self) -> Option<T> {
        *self.0.borrow()
    }
}

#[derive(Clone)]
struct SliderHandlers {
    on_change: LatestHandler<EventHandler<f64>>,
    on_touched: LatestHandler<EventHandler<()>>,
    on_after_change: LatestHandler<EventHandler<f64>>,
}

/// Phases with a live listener. The capture layer exists only while `moving`
/// is set, so nothing listens to document-wide moves between gestures.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
struct LivePhases {
    start: bool,
    moving: bool,
    end: bool,
}

impl LivePhases {
    fn set(&mut self, phase: DragPhase, live: bool) {
        match phase {
            DragPhase::Start => self.start = live,
            DragPhase::Move => self.moving = live,
            DragPhase::End => self.end = live,
        }
    }
}

struct SignalListeners {
    live: Signal<LivePhases>,
}

struct SignalListener {
    phase: DragPhase,
    live: Signal<LivePhases>,
}

impl ListenerFactory for SignalListeners {
    type Guard = SignalListener;

    fn listen(&mut self, phase: DragPhase) -> SignalListener {
        if let Ok(mut live) = self.live.try_write() {
            live.set(phase, true);
        }
        SignalListener {
            phase,
            live: self.live,
        }
    }
}

impl Drop for SignalListener {
    fn drop(&mut self) {
        // The signal is already gone when the whole scope is torn down.
        if let Ok(mut live) = self.live.try_write() {
            live.set(self.phase, false);
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
struct SliderView {
    value: f64,
    offset: f64,
    dragging: bool,
}

fn sync_view(slider: &SharedSlider, mut view: Signal<SliderView>) {
    let next = {
        let slider = slider.borrow();
        SliderView {
            value: slider.value(),
            offset: slider.offset(),
            dragging: slider.is_dragging(),
        }
    };
    if *view.peek() != next {
        view.set(next);
    }
}

fn mouse_sample(evt: &MouseEvent) -> PointerSample {
    let point = evt.client_coordinates();
    PointerSample::Mouse(PagePoint::new(point.x, point.y))
}

fn touch_sample(evt: &TouchEvent) -> PointerSample {
    PointerSample::Touch(
        evt.touches()
            .iter()
            .map(|touch| {
                let point = touch.client_coordinates();
                PagePoint::new(point.x, point.y)
            })
            .collect(),
    )
}

fn measure_track(slider: SharedSlider, track: Signal<Option<Rc<MountedData>>>, view: Signal<SliderView>) {
    let Some(mounted) = track.peek().clone() else {
        return;
    };
    spawn(async move {
        match mounted.get_client_rect().await {
            Ok(rect) => {
                let geometry = if slider.borrow().orientation().is_vertical() {
                    TrackGeometry::new(rect.origin.y, rect.size.height)
                } else {
                    TrackGeometry::new(rect.origin.x, rect.size.width)
                };
                slider.borrow_mut().set_track(geometry);
                sync_view(&slider, view);
            }
            Err(err) => debug!(target: LOG_TARGET, "track measurement failed: {err:?}"),
        }
    });
}

/// Start the gesture against the last known geometry, then refresh the
/// measurement. Move and end listeners are live before this returns.
fn start_gesture(
    slider: SharedSlider,
    track: Signal<Option<Rc<MountedData>>>,
    view: Signal<SliderView>,
    sample: PointerSample,
) {
    let started = slider.borrow_mut().dispatch(DragPhase::Start, &sample);
    if started {
        sync_view(&slider, view);
        measure_track(slider, track, view);
    }
}

fn continue_gesture(
    slider: &SharedSlider,
    view: Signal<SliderView>,
    phase: DragPhase,
    sample: PointerSample,
) {
    let handled = slider.borrow_mut().dispatch(phase, &sample);
    if handled {
        sync_view(slider, view);
    }
}

/// Slider with a draggable handle.
///
/// `value` is the external write path: a new `Some` is written into the
/// slider, `None` leaves the current value alone. `on_change` fires on every
/// interactive change, `on_after_change` once per finished drag.
#[component]
pub fn WySlider(
    #[props(default)] vertical: bool,
    #[props(default = 0.0)] min: f64,
    #[props(default = 100.0)] max: f64,
    #[props(default)] buffer_percent: f64,
    #[props(default)] value: Option<f64>,
    #[props(default)] disabled: bool,
    #[props(default)] class: String,
    on_change: Option<EventHandler<f64>>,
    on_touched: Option<EventHandler<()>>,
    on_after_change: Option<EventHandler<f64>>,
) -> Element {
    let live = use_signal(LivePhases::default);
    let view = use_signal(SliderView::default);
    let mut track = use_signal(|| None::<Rc<MountedData>>);

    let handlers = use_hook(|| SliderHandlers {
        on_change: LatestHandler::new(),
        on_touched: LatestHandler::new(),
        on_after_change: LatestHandler::new(),
    });
    handlers.on_change.replace(on_change);
    handlers.on_touched.replace(on_touched);
    handlers.on_after_change.replace(on_after_change);

    let slider: SharedSlider = use_hook(|| {
        let mut slider = DragSlider::new(
            Orientation::from_vertical(vertical),
            SliderBounds::new(min, max),
            SignalListeners { live },
        );
        let on_change = handlers.on_change.clone();
        slider.register_on_change(Box::new(move |value| {
            if let Some(handler) = on_change.get() {
                handler.call(value);
            }
        }));
        let on_touched = handlers.on_touched.clone();
        slider.register_on_touched(Box::new(move || {
            if let Some(handler) = on_touched.get() {
                handler.call(());
            }
        }));
        let on_after_change = handlers.on_after_change.clone();
        slider.set_on_after_change(Box::new(move |value| {
            if let Some(handler) = on_after_change.get() {
                handler.call(value);
            }
        }));
        Rc::new(RefCell::new(slider))
    });

    {
        let slider = slider.clone();
        use_effect(use_reactive!(|vertical, min, max| {
            slider
                .borrow_mut()
                .reconfigure(Orientation::from_vertical(vertical), SliderBounds::new(min, max));
            sync_view(&slider, view);
        }));
    }

    {
        let slider = slider.clone();
        use_effect(use_reactive!(|value| {
            if let Some(value) = value {
                slider.borrow_mut().write_value(value);
                sync_view(&slider, view);
            }
        }));
    }

    {
        let slider = slider.clone();
        use_effect(use_reactive!(|disabled| {
            slider.borrow_mut().set_disabled_state(disabled);
            sync_view(&slider, view);
        }));
    }

    {
        let slider = slider.clone();
        use_drop(move || slider.borrow_mut().destroy());
    }

    let state = view();
    let phases = live();
    let offset = state.offset;
    let buffer = if buffer_percent.is_finite() {
        buffer_percent.clamp(0.0, 100.0)
    } else {
        0.0
    };
    let (extent, position) = if vertical {
        ("height", "bottom")
    } else {
        ("width", "left")
    };
    let orientation_class = if vertical { "wy-slider-vertical" } else { "wy-slider-horizontal" };
    let state_class = match (phases.start, state.dragging) {
        (_, true) => "wy-slider-dragging",
        (true, false) => "wy-slider-interactive",
        (false, false) => "wy-slider-disabled",
    };
    let bounds = slider.borrow().bounds();

    rsx! {
        div {
            class: "wy-slider {orientation_class} {state_class} {class}",
            role: "slider",
            aria_valuemin: "{bounds.min()}",
            aria_valuemax: "{bounds.max()}",
            aria_valuenow: "{state.value}",
            aria_orientation: if vertical { "vertical" } else { "horizontal" },
            aria_disabled: disabled,
            div {
                class: "wy-slider-track",
                onmounted: {
                    let slider = slider.clone();
                    move |evt: MountedEvent| {
                        track.set(Some(evt.data()));
                        slider.borrow_mut().mount();
                        measure_track(slider.clone(), track, view);
                    }
                },
                onmousedown: {
                    let slider = slider.clone();
                    move |evt: MouseEvent| {
                        evt.prevent_default();
                        evt.stop_propagation();
                        start_gesture(slider.clone(), track, view, mouse_sample(&evt));
                    }
                },
                ontouchstart: {
                    let slider = slider.clone();
                    move |evt: TouchEvent| {
                        evt.prevent_default();
                        evt.stop_propagation();
                        start_gesture(slider.clone(), track, view, touch_sample(&evt));
                    }
                },
                onmouseup: {
                    let slider = slider.clone();
                    move |evt: MouseEvent| {
                        // Release before the capture layer has rendered.
                        continue_gesture(&slider, view, DragPhase::End, mouse_sample(&evt));
                    }
                },
                ontouchmove: {
                    let slider = slider.clone();
                    move |evt: TouchEvent| {
                        evt.prevent_default();
                        continue_gesture(&slider, view, DragPhase::Move, touch_sample(&evt));
                    }
                },
                ontouchend: {
                    let slider = slider.clone();
                    move |evt: TouchEvent| {
                        continue_gesture(&slider, view, DragPhase::End, touch_sample(&evt));
                    }
                },
                div { class: "wy-slider-rail" }
                div {
                    class: "wy-slider-buffer",
                    style: "{extent}: {buffer}%;",
                }
                div {
                    class: "wy-slider-fill",
                    style: "{extent}: {offset}%;",
                }
                div {
                    class: "wy-slider-handle",
                    style: "{position}: {offset}%;",
                }
            }
            if phases.moving || phases.end {
                div {
                    class: "wy-slider-capture",
                    onmousemove: {
                        let slider = slider.clone();
                        move |evt: MouseEvent| {
                            evt.prevent_default();
                            continue_gesture(&slider, view, DragPhase::Move, mouse_sample(&evt));
                        }
                    },
                    onmouseup: {
                        let slider = slider.clone();
                        move |evt: MouseEvent| {
                            continue_gesture(&slider, view, DragPhase::End, mouse_sample(&evt));
                        }
                    },
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn latest_handler_is_read_at_call_time() {
        let slot = LatestHandler::<fn(&Cell<u32>)>::new();
        let relay = {
            let slot = slot.clone();
            move |hits: &Cell<u32>| {
                if let Some(handler) = slot.get() {
                    handler(hits);
                }
            }
        };

        let hits = Cell::new(0);
        relay(&hits);
        assert_eq!(hits.get(), 0);

        slot.replace(Some(|hits: &Cell<u32>| hits.set(hits.get() + 1)));
        relay(&hits);
        assert_eq!(hits.get(), 1);

        slot.replace(Some(|hits: &Cell<u32>| hits.set(hits.get() + 10)));
        relay(&hits);
        assert_eq!(hits.get(), 11);

        slot.replace(None);
        relay(&hits);
        assert_eq!(hits.get(), 11);
    }

    #[test]
    fn live_phases_track_each_slot() {
        let mut phases = LivePhases::default();
        phases.set(DragPhase::Start, true);
        phases.set(DragPhase::Move, true);
        phases.set(DragPhase::End, true);
        phases.set(DragPhase::Move, false);

        assert_eq!(
            phases,
            LivePhases {
                start: true,
                moving: false,
                end: true,
            }
        );
    }
}
