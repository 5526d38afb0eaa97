//! Input normalization for the drag slider.
//!
//! Mouse and touch events arrive in different shapes. Each modality knows how
//! to recognize its own events and pull a single coordinate out of them, so
//! the rest of the slider only ever sees numbers.

use super::subscriptions::DragPhase;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    #[default]
    Horizontal,
    Vertical,
}

impl Orientation {
    pub fn from_vertical(vertical: bool) -> Self {
        if vertical {
            Self::Vertical
        } else {
            Self::Horizontal
        }
    }

    pub fn is_vertical(self) -> bool {
        self == Self::Vertical
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PagePoint {
    pub x: f64,
    pub y: f64,
}

impl PagePoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    fn along(self, orientation: Orientation) -> f64 {
        match orientation {
            Orientation::Horizontal => self.x,
            Orientation::Vertical => self.y,
        }
    }
}

/// A raw pointer event reduced to what the slider cares about.
#[derive(Debug, Clone, PartialEq)]
pub enum PointerSample {
    Mouse(PagePoint),
    /// Active touch points; empty for `touchend`.
    Touch(Vec<PagePoint>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputModality {
    Mouse,
    Touch,
}

impl InputModality {
    pub const ALL: [InputModality; 2] = [InputModality::Mouse, InputModality::Touch];

    /// DOM event name this modality uses for a drag phase.
    pub fn event_name(self, phase: DragPhase) -> &'static str {
        match (self, phase) {
            (Self::Mouse, DragPhase::Start) => "mousedown",
            (Self::Mouse, DragPhase::Move) => "mousemove",
            (Self::Mouse, DragPhase::End) => "mouseup",
            (Self::Touch, DragPhase::Start) => "touchstart",
            (Self::Touch, DragPhase::Move) => "touchmove",
            (Self::Touch, DragPhase::End) => "touchend",
        }
    }

    pub fn of(sample: &PointerSample) -> Self {
        match sample {
            PointerSample::Mouse(_) => Self::Mouse,
            PointerSample::Touch(_) => Self::Touch,
        }
    }
}

/// Per-modality event descriptor, fixed for the lifetime of a slider
/// configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SliderEventSource {
    pub modality: InputModality,
    pub orientation: Orientation,
}

impl SliderEventSource {
    pub fn new(modality: InputModality, orientation: Orientation) -> Self {
        Self {
            modality,
            orientation,
        }
    }

    /// Both sources for one orientation, mouse first.
    pub fn pair(orientation: Orientation) -> [Self; 2] {
        InputModality::ALL.map(|modality| Self::new(modality, orientation))
    }

    pub fn matches(&self, sample: &PointerSample) -> bool {
        InputModality::of(sample) == self.modality
    }

    /// Page coordinate along the slider axis. Touch events use the first
    /// active touch.
    pub fn extract_coordinate(&self, sample: &PointerSample) -> Option<f64> {
        if !self.matches(sample) {
            return None;
        }
        let point = match sample {
            PointerSample::Mouse(point) => *point,
            PointerSample::Touch(points) => *points.first()?,
        };
        Some(point.along(self.orientation)).filter(|value| value.is_finite())
    }
}
