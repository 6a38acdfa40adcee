use crate::quiz::assignment::DragPayload;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SlotEvent {
    /// Previous occupant pushed out to make room; it goes back to the pool.
    Evicted { ordinal: usize, payload: DragPayload },
    Filled { ordinal: usize, payload: DragPayload },
}

/// Drop target for one blank. Holds at most one option and never judges it.
#[derive(Clone, Debug)]
pub struct Slot {
    ordinal: usize,
    occupant: Option<DragPayload>,
}

impl Slot {
    pub fn new(ordinal: usize) -> Self {
        Self {
            ordinal,
            occupant: None,
        }
    }

    pub fn occupant(&self) -> Option<&DragPayload> {
        self.occupant.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.occupant.is_none()
    }

    /// Accept `payload`. An existing different occupant is reported as
    /// evicted before the new one is reported as filled.
    pub fn accept<F: FnMut(SlotEvent)>(&mut self, payload: DragPayload, mut report: F) {
        if self.occupant.as_ref().is_some_and(|o| o.id == payload.id) {
            return;
        }
        if let Some(previous) = self.occupant.take() {
            report(SlotEvent::Evicted {
                ordinal: self.ordinal,
                payload: previous,
            });
        }
        self.occupant = Some(payload.clone());
        report(SlotEvent::Filled {
            ordinal: self.ordinal,
            payload,
        });
    }

    pub fn take(&mut self) -> Option<DragPayload> {
        self.occupant.take()
    }
}
