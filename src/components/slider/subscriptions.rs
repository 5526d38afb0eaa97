//! Listener lifetimes for the three drag phases.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DragPhase {
    Start,
    Move,
    End,
}

impl DragPhase {
    pub const ALL: [DragPhase; 3] = [DragPhase::Start, DragPhase::Move, DragPhase::End];
}

/// Creates the listener for a phase. Dropping the returned guard must detach
/// the listener.
pub trait ListenerFactory {
    type Guard;

    fn listen(&mut self, phase: DragPhase) -> Self::Guard;
}

/// One optional listener guard per phase.
#[derive(Debug)]
pub struct DragSubscriptions<G> {
    start: Option<G>,
    moving: Option<G>,
    end: Option<G>,
}

impl<G> Default for DragSubscriptions<G> {
    fn default() -> Self {
        Self {
            start: None,
            moving: None,
            end: None,
        }
    }
}

impl<G> DragSubscriptions<G> {
    fn slot(&self, phase: DragPhase) -> &Option<G> {
        match phase {
            DragPhase::Start => &self.start,
            DragPhase::Move => &self.moving,
            DragPhase::End => &self.end,
        }
    }

    fn slot_mut(&mut self, phase: DragPhase) -> &mut Option<G> {
        match phase {
            DragPhase::Start => &mut self.start,
            DragPhase::Move => &mut self.moving,
            DragPhase::End => &mut self.end,
        }
    }

    /// Attach a listener for `phase` unless one is already attached. Returns
    /// whether a new listener was created.
    pub fn subscribe<F>(&mut self, phase: DragPhase, factory: &mut F) -> bool
    where
        F: ListenerFactory<Guard = G>,
    {
        let slot = self.slot_mut(phase);
        if slot.is_some() {
            return false;
        }
        *slot = Some(factory.listen(phase));
        true
    }

    pub fn unsubscribe(&mut self, phase: DragPhase) -> bool {
        self.slot_mut(phase).take().is_some()
    }

    pub fn unsubscribe_all(&mut self) {
        for phase in DragPhase::ALL {
            self.unsubscribe(phase);
        }
    }

    pub fn is_subscribed(&self, phase: DragPhase) -> bool {
        self.slot(phase).is_some()
    }
}
