//! Drag slider state machine, independent of any renderer.
//!
//! A gesture is `Start -> Move* -> End`. Only the start listener is attached
//! while idle; move and end listeners exist for the duration of a gesture and
//! are released when it ends, when the slider is disabled, or on
//! [`DragSlider::destroy`].

use super::source::{InputModality, Orientation, PointerSample, SliderEventSource};
use super::subscriptions::{DragPhase, DragSubscriptions, ListenerFactory};
use tracing::trace;

const LOG_TARGET: &str = "wymusic::slider";

pub const DEFAULT_MIN: f64 = 0.0;
pub const DEFAULT_MAX: f64 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SliderBounds {
    min: f64,
    max: f64,
}

impl Default for SliderBounds {
    fn default() -> Self {
        Self {
            min: DEFAULT_MIN,
            max: DEFAULT_MAX,
        }
    }
}

impl SliderBounds {
    /// Reversed bounds are swapped; non-finite ones fall back to the defaults.
    pub fn new(min: f64, max: f64) -> Self {
        let min = if min.is_finite() { min } else { DEFAULT_MIN };
        let max = if max.is_finite() { max } else { DEFAULT_MAX };
        if min <= max {
            Self { min, max }
        } else {
            Self { min: max, max: min }
        }
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    /// NaN becomes `min`, anything else is clamped into range.
    pub fn format_value(&self, value: f64) -> f64 {
        if value.is_nan() {
            self.min
        } else {
            value.clamp(self.min, self.max)
        }
    }

    pub fn value_at_ratio(&self, ratio: f64) -> f64 {
        ratio * (self.max - self.min) + self.min
    }

    /// Position of `value` along the track, in percent.
    pub fn percent(&self, value: f64) -> f64 {
        let span = self.max - self.min;
        if span <= 0.0 {
            return 0.0;
        }
        ((value - self.min) / span * 100.0).clamp(0.0, 100.0)
    }
}

/// Track position and length along the slider axis, in page pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TrackGeometry {
    pub start: f64,
    pub length: f64,
}

impl TrackGeometry {
    pub fn new(start: f64, length: f64) -> Self {
        Self { start, length }
    }

    /// Normalized position of `coordinate` within the track, in `[0, 1]`.
    pub fn ratio(&self, coordinate: f64) -> f64 {
        if !(self.length.is_finite() && self.length > 0.0) {
            return 0.0;
        }
        let ratio = (coordinate - self.start) / self.length;
        if ratio.is_nan() {
            0.0
        } else {
            ratio.clamp(0.0, 1.0)
        }
    }
}

/// Read/write/notify surface a form system binds to.
pub trait BindableControl {
    type Value;

    /// Set the value from outside. Never echoes back through `on_change`.
    fn write_value(&mut self, value: Self::Value);
    fn register_on_change(&mut self, f: Box<dyn FnMut(Self::Value)>);
    fn register_on_touched(&mut self, f: Box<dyn FnMut()>);
    fn set_disabled_state(&mut self, disabled: bool);
}

pub struct DragSlider<L: ListenerFactory> {
    orientation: Orientation,
    bounds: SliderBounds,
    sources: [SliderEventSource; 2],
    track: TrackGeometry,
    value: f64,
    dragging: bool,
    disabled: bool,
    mounted: bool,
    last_move_coordinate: Option<f64>,
    /// Latest coordinate of the live gesture, kept to re-map after a late
    /// track measurement.
    gesture_coordinate: Option<f64>,
    listeners: L,
    subscriptions: DragSubscriptions<L::Guard>,
    on_change: Box<dyn FnMut(f64)>,
    on_touched: Box<dyn FnMut()>,
    on_after_change: Box<dyn FnMut(f64)>,
}

impl<L: ListenerFactory> DragSlider<L> {
    pub fn new(orientation: Orientation, bounds: SliderBounds, listeners: L) -> Self {
        Self {
            orientation,
            bounds,
            sources: SliderEventSource::pair(orientation),
            track: TrackGeometry::default(),
            value: bounds.min(),
            dragging: false,
            disabled: false,
            mounted: false,
            last_move_coordinate: None,
            gesture_coordinate: None,
            listeners,
            subscriptions: DragSubscriptions::default(),
            on_change: Box::new(|_| {}),
            on_touched: Box::new(|| {}),
            on_after_change: Box::new(|_| {}),
        }
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    /// Handle offset in percent of the track.
    pub fn offset(&self) -> f64 {
        self.bounds.percent(self.value)
    }

    pub fn bounds(&self) -> SliderBounds {
        self.bounds
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn is_listening(&self, phase: DragPhase) -> bool {
        self.subscriptions.is_subscribed(phase)
    }

    /// Fired once per finished gesture with the committed value.
    pub fn set_on_after_change(&mut self, f: Box<dyn FnMut(f64)>) {
        self.on_after_change = f;
    }

    /// Track measurement used for coordinate mapping. A measurement that
    /// lands while a gesture is live re-maps the gesture's latest coordinate.
    pub fn set_track(&mut self, track: TrackGeometry) {
        self.track = track;
        if !self.dragging {
            return;
        }
        if let Some(coordinate) = self.gesture_coordinate {
            let value = self.find_closest_value(coordinate);
            self.set_value(value);
        }
    }

    /// Start listening for gestures.
    pub fn mount(&mut self) {
        self.mounted = true;
        if !self.disabled {
            self.subscriptions
                .subscribe(DragPhase::Start, &mut self.listeners);
        }
    }

    /// Release every listener regardless of gesture state. The slider ignores
    /// all events afterwards.
    pub fn destroy(&mut self) {
        self.mounted = false;
        self.dragging = false;
        self.last_move_coordinate = None;
        self.gesture_coordinate = None;
        self.subscriptions.unsubscribe_all();
    }

    pub fn reconfigure(&mut self, orientation: Orientation, bounds: SliderBounds) {
        if orientation != self.orientation {
            self.orientation = orientation;
            self.sources = SliderEventSource::pair(orientation);
        }
        self.bounds = bounds;
        self.value = bounds.format_value(self.value);
    }

    /// Coordinate along the slider axis mapped to a value in range.
    pub fn find_closest_value(&self, coordinate: f64) -> f64 {
        let ratio = self.track.ratio(coordinate);
        let ratio = if self.orientation.is_vertical() {
            1.0 - ratio
        } else {
            ratio
        };
        self.bounds.value_at_ratio(ratio)
    }

    fn resolve(&self, sample: &PointerSample) -> Option<f64> {
        self.sources
            .iter()
            .find(|source| source.matches(sample))
            .and_then(|source| source.extract_coordinate(sample))
    }

    /// Feed one event into the gesture pipeline. Returns false when the event
    /// was ignored.
    pub fn dispatch(&mut self, phase: DragPhase, sample: &PointerSample) -> bool {
        if !self.subscriptions.is_subscribed(phase) {
            return false;
        }
        trace!(
            target: LOG_TARGET,
            "{}",
            InputModality::of(sample).event_name(phase)
        );

        match phase {
            DragPhase::Start => {
                let Some(coordinate) = self.resolve(sample) else {
                    return false;
                };
                let value = self.find_closest_value(coordinate);
                self.toggle_dragging(true);
                self.gesture_coordinate = Some(coordinate);
                self.set_value(value);
                true
            }
            DragPhase::Move => {
                if !self.dragging {
                    return false;
                }
                let Some(coordinate) = self.resolve(sample) else {
                    return false;
                };
                if self.last_move_coordinate == Some(coordinate) {
                    return false;
                }
                self.last_move_coordinate = Some(coordinate);
                self.gesture_coordinate = Some(coordinate);
                let value = self.find_closest_value(coordinate);
                self.set_value(value);
                true
            }
            DragPhase::End => {
                let value = self.value;
                (self.on_after_change)(value);
                (self.on_touched)();
                self.toggle_dragging(false);
                true
            }
        }
    }

    fn toggle_dragging(&mut self, dragging: bool) {
        self.dragging = dragging;
        self.last_move_coordinate = None;
        self.gesture_coordinate = None;
        if dragging {
            self.subscriptions
                .subscribe(DragPhase::Move, &mut self.listeners);
            self.subscriptions
                .subscribe(DragPhase::End, &mut self.listeners);
        } else {
            self.subscriptions.unsubscribe(DragPhase::Move);
            self.subscriptions.unsubscribe(DragPhase::End);
        }
    }

    fn set_value(&mut self, value: f64) {
        let value = self.bounds.format_value(value);
        if self.value != value {
            self.value = value;
            (self.on_change)(value);
        }
    }

}

impl<L: ListenerFactory> BindableControl for DragSlider<L> {
    type Value = f64;

    fn write_value(&mut self, value: f64) {
        self.value = self.bounds.format_value(value);
    }

    fn register_on_change(&mut self, f: Box<dyn FnMut(f64)>) {
        self.on_change = f;
    }

    fn register_on_touched(&mut self, f: Box<dyn FnMut()>) {
        self.on_touched = f;
    }

    /// Disabling aborts a gesture in progress without an after-change event.
    fn set_disabled_state(&mut self, disabled: bool) {
        if self.disabled == disabled {
            return;
        }
        self.disabled = disabled;
        if disabled {
            self.dragging = false;
            self.last_move_coordinate = None;
            self.gesture_coordinate = None;
            self.subscriptions.unsubscribe_all();
        } else if self.mounted {
            self.subscriptions
                .subscribe(DragPhase::Start, &mut self.listeners);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::source::PagePoint;
    use super::super::subscriptions::testing::RecordingListeners;
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Default)]
    struct Calls {
        changes: Rc<RefCell<Vec<f64>>>,
        after: Rc<RefCell<Vec<f64>>>,
        touched: Rc<RefCell<usize>>,
    }

    fn slider(orientation: Orientation) -> (DragSlider<RecordingListeners>, RecordingListeners, Calls) {
        let listeners = RecordingListeners::default();
        let mut slider = DragSlider::new(orientation, SliderBounds::new(0.0, 100.0), listeners.clone());
        slider.set_track(TrackGeometry::new(100.0, 200.0));

        let calls = Calls::default();
        let changes = calls.changes.clone();
        slider.register_on_change(Box::new(move |v| changes.borrow_mut().push(v)));
        let touched = calls.touched.clone();
        slider.register_on_touched(Box::new(move || *touched.borrow_mut() += 1));
        let after = calls.after.clone();
        slider.set_on_after_change(Box::new(move |v| after.borrow_mut().push(v)));

        slider.mount();
        (slider, listeners, calls)
    }

    fn mouse_x(x: f64) -> PointerSample {
        PointerSample::Mouse(PagePoint::new(x, 0.0))
    }

    fn mouse_y(y: f64) -> PointerSample {
        PointerSample::Mouse(PagePoint::new(0.0, y))
    }

    #[test]
    fn format_clamps_and_normalizes() {
        let bounds = SliderBounds::new(10.0, 20.0);

        assert_eq!(bounds.format_value(5.0), 10.0);
        assert_eq!(bounds.format_value(25.0), 20.0);
        assert_eq!(bounds.format_value(f64::INFINITY), 20.0);
        assert_eq!(bounds.format_value(f64::NAN), 10.0);
        assert_eq!(bounds.format_value(15.5), 15.5);
    }

    #[test]
    fn reversed_bounds_are_swapped() {
        let bounds = SliderBounds::new(50.0, -50.0);
        assert_eq!((bounds.min(), bounds.max()), (-50.0, 50.0));

        let bounds = SliderBounds::new(f64::NAN, f64::INFINITY);
        assert_eq!((bounds.min(), bounds.max()), (DEFAULT_MIN, DEFAULT_MAX));
    }

    #[test]
    fn horizontal_maps_left_to_min_and_right_to_max() {
        let (slider, _, _) = slider(Orientation::Horizontal);

        assert_eq!(slider.find_closest_value(100.0), 0.0);
        assert_eq!(slider.find_closest_value(300.0), 100.0);
        assert_eq!(slider.find_closest_value(200.0), 50.0);
        assert_eq!(slider.find_closest_value(-40.0), 0.0);
        assert_eq!(slider.find_closest_value(900.0), 100.0);
    }

    #[test]
    fn vertical_maps_top_to_max_and_bottom_to_min() {
        let (slider, _, _) = slider(Orientation::Vertical);

        assert_eq!(slider.find_closest_value(100.0), 100.0);
        assert_eq!(slider.find_closest_value(300.0), 0.0);
        assert_eq!(slider.find_closest_value(150.0), 75.0);
    }

    #[test]
    fn collapsed_track_maps_to_start() {
        let (mut slider, _, _) = slider(Orientation::Horizontal);
        slider.set_track(TrackGeometry::new(100.0, 0.0));

        assert_eq!(slider.find_closest_value(250.0), 0.0);
    }

    #[test]
    fn only_start_is_listened_to_while_idle() {
        let (slider, listeners, _) = slider(Orientation::Horizontal);

        assert_eq!(listeners.live(), vec![DragPhase::Start]);
        assert!(!slider.is_dragging());
    }

    #[test]
    fn move_before_start_is_ignored() {
        let (mut slider, _, calls) = slider(Orientation::Horizontal);

        assert!(!slider.dispatch(DragPhase::Move, &mouse_x(200.0)));
        assert!(!slider.dispatch(DragPhase::End, &mouse_x(200.0)));
        assert!(calls.changes.borrow().is_empty());
        assert!(calls.after.borrow().is_empty());
    }

    #[test]
    fn gesture_with_duplicate_move_fires_one_after_change() {
        let (mut slider, listeners, calls) = slider(Orientation::Horizontal);

        assert!(slider.dispatch(DragPhase::Start, &mouse_x(150.0)));
        assert!(slider.is_dragging());
        assert_eq!(
            listeners.live(),
            vec![DragPhase::Start, DragPhase::Move, DragPhase::End]
        );

        assert!(slider.dispatch(DragPhase::Move, &mouse_x(250.0)));
        assert!(!slider.dispatch(DragPhase::Move, &mouse_x(250.0)));
        assert!(slider.dispatch(DragPhase::End, &PointerSample::Mouse(PagePoint::new(0.0, 0.0))));

        assert_eq!(*calls.changes.borrow(), vec![25.0, 75.0]);
        assert_eq!(*calls.after.borrow(), vec![75.0]);
        assert_eq!(*calls.touched.borrow(), 1);
        assert!(!slider.is_dragging());
        assert_eq!(listeners.live(), vec![DragPhase::Start]);
    }

    #[test]
    fn end_right_after_start_closes_the_gesture() {
        let (mut slider, listeners, calls) = slider(Orientation::Horizontal);

        assert!(slider.dispatch(DragPhase::Start, &mouse_x(200.0)));
        assert!(slider.dispatch(DragPhase::End, &mouse_x(200.0)));

        assert!(!slider.is_dragging());
        assert_eq!(listeners.live(), vec![DragPhase::Start]);
        assert_eq!(*calls.after.borrow(), vec![50.0]);
        assert_eq!(*calls.touched.borrow(), 1);

        // A measurement arriving after release leaves the committed value alone.
        slider.set_track(TrackGeometry::new(0.0, 400.0));
        assert_eq!(slider.value(), 50.0);
        assert!(!slider.dispatch(DragPhase::Move, &mouse_x(300.0)));
        assert_eq!(*calls.changes.borrow(), vec![50.0]);
    }

    #[test]
    fn late_measurement_remaps_live_gesture() {
        let (mut slider, _, calls) = slider(Orientation::Horizontal);
        slider.set_track(TrackGeometry::default());

        assert!(slider.dispatch(DragPhase::Start, &mouse_x(200.0)));
        assert_eq!(slider.value(), 0.0);

        slider.set_track(TrackGeometry::new(100.0, 200.0));
        assert_eq!(slider.value(), 50.0);
        assert!(slider.dispatch(DragPhase::End, &mouse_x(200.0)));

        assert_eq!(*calls.changes.borrow(), vec![50.0]);
        assert_eq!(*calls.after.borrow(), vec![50.0]);
    }

    #[test]
    fn start_adopts_value_immediately() {
        let (mut slider, _, calls) = slider(Orientation::Horizontal);
        slider.dispatch(DragPhase::Start, &mouse_x(300.0));

        assert_eq!(slider.value(), 100.0);
        assert_eq!(slider.offset(), 100.0);
        assert_eq!(*calls.changes.borrow(), vec![100.0]);
    }

    #[test]
    fn touch_gesture_uses_first_touch() {
        let (mut slider, _, calls) = slider(Orientation::Vertical);
        let touch = |y: f64| PointerSample::Touch(vec![PagePoint::new(0.0, y)]);

        slider.dispatch(DragPhase::Start, &touch(300.0));
        slider.dispatch(DragPhase::Move, &touch(200.0));
        slider.dispatch(DragPhase::End, &PointerSample::Touch(Vec::new()));

        assert_eq!(*calls.changes.borrow(), vec![50.0]);
        assert_eq!(*calls.after.borrow(), vec![50.0]);
    }

    #[test]
    fn unchanged_value_does_not_notify() {
        let (mut slider, _, calls) = slider(Orientation::Horizontal);

        slider.dispatch(DragPhase::Start, &mouse_x(100.0));
        slider.dispatch(DragPhase::Move, &mouse_x(50.0));

        assert!(calls.changes.borrow().is_empty());
        assert_eq!(slider.value(), 0.0);
    }

    #[test]
    fn destroy_mid_drag_makes_events_inert() {
        let (mut slider, listeners, calls) = slider(Orientation::Horizontal);
        slider.dispatch(DragPhase::Start, &mouse_x(150.0));

        slider.destroy();
        assert!(listeners.live().is_empty());

        assert!(!slider.dispatch(DragPhase::Move, &mouse_x(250.0)));
        assert!(!slider.dispatch(DragPhase::End, &mouse_x(250.0)));
        assert!(!slider.dispatch(DragPhase::Start, &mouse_x(250.0)));
        assert_eq!(*calls.changes.borrow(), vec![25.0]);
        assert!(calls.after.borrow().is_empty());
    }

    #[test]
    fn write_value_is_formatted_and_silent() {
        let (mut slider, _, calls) = slider(Orientation::Horizontal);

        slider.write_value(140.0);
        assert_eq!(slider.value(), 100.0);
        slider.write_value(f64::NAN);
        assert_eq!(slider.value(), 0.0);
        slider.write_value(42.0);
        assert_eq!(slider.value(), 42.0);

        assert!(calls.changes.borrow().is_empty());
    }

    #[test]
    fn disabling_aborts_gesture_and_blocks_input() {
        let (mut slider, listeners, calls) = slider(Orientation::Horizontal);
        slider.dispatch(DragPhase::Start, &mouse_x(150.0));

        slider.set_disabled_state(true);
        assert!(listeners.live().is_empty());
        assert!(!slider.dispatch(DragPhase::End, &mouse_x(150.0)));
        assert!(!slider.dispatch(DragPhase::Start, &mouse_x(200.0)));
        assert!(calls.after.borrow().is_empty());

        slider.set_disabled_state(false);
        assert_eq!(listeners.live(), vec![DragPhase::Start]);
        assert!(slider.dispatch(DragPhase::Start, &mouse_x(200.0)));
    }

    #[test]
    fn reconfigure_reformats_value() {
        let (mut slider, _, _) = slider(Orientation::Horizontal);
        slider.write_value(80.0);

        slider.reconfigure(Orientation::Vertical, SliderBounds::new(0.0, 50.0));
        assert_eq!(slider.value(), 50.0);
        assert_eq!(slider.find_closest_value(100.0), 50.0);
    }

    #[test]
    fn percent_of_degenerate_range_is_zero() {
        assert_eq!(SliderBounds::new(5.0, 5.0).percent(5.0), 0.0);
        assert_eq!(SliderBounds::new(0.0, 200.0).percent(50.0), 25.0);
    }
}
