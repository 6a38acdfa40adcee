use rand::Rng;
use rand::seq::SliceRandom;

use crate::quiz::assignment::{Assignment, DragPayload, DropOutcome, Location};
use crate::quiz::question::{OptionId, PromptSpan, Question};
use crate::quiz::slot::{Slot, SlotEvent};

/// Where a lifted option is released.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DropTarget {
    Slot(usize),
    Pool,
    /// Released over nothing; the option stays where it was.
    Outside,
}

#[derive(Clone, Debug)]
struct Lift {
    payload: DragPayload,
    origin: Location,
}

/// Answer state of one fill-in-the-blank question: one slot per blank and
/// the pool of options not placed anywhere.
///
/// A drag is a lift followed by a commit. Only one lift can be in flight, and
/// a commit applies the whole gesture at once, so an option is never in two
/// slots and one gesture is never applied twice.
#[derive(Clone, Debug)]
pub struct BlankBoard {
    slots: Vec<Slot>,
    assignments: Vec<Assignment>,
    lifted: Option<Lift>,
}

impl BlankBoard {
    pub fn new(question: &Question) -> Self {
        let slots = question
            .spans
            .iter()
            .filter_map(|s| match s {
                PromptSpan::Blank { ordinal, .. } => Some(Slot::new(*ordinal)),
                PromptSpan::Text(_) => None,
            })
            .collect();
        let assignments = question.options.iter().map(Assignment::new).collect();
        Self {
            slots,
            assignments,
            lifted: None,
        }
    }

    /// Shuffle the display order of the pool. Placement is unaffected.
    pub fn shuffle_pool<R: Rng>(&mut self, rng: &mut R) {
        self.assignments.shuffle(rng);
    }

    pub fn blank_count(&self) -> usize {
        self.slots.len()
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    pub fn assigned(&self, ordinal: usize) -> Option<&DragPayload> {
        self.slots.get(ordinal).and_then(Slot::occupant)
    }

    /// Unplaced options in display order.
    pub fn pool(&self) -> impl Iterator<Item = &Assignment> {
        self.assignments.iter().filter(|a| !a.is_placed())
    }

    pub fn pool_len(&self) -> usize {
        self.pool().count()
    }

    pub fn location_of(&self, id: OptionId) -> Option<Location> {
        if let Some(i) = self
            .slots
            .iter()
            .position(|s| s.occupant().is_some_and(|p| p.id == id))
        {
            return Some(Location::Slot(i));
        }
        self.assignments
            .iter()
            .any(|a| a.id() == id)
            .then_some(Location::Pool)
    }

    pub fn lifted(&self) -> Option<&DragPayload> {
        self.lifted.as_ref().map(|l| &l.payload)
    }

    /// Pick up an option from the pool or from a slot. Refused while another
    /// lift has not been committed.
    pub fn lift(&mut self, id: OptionId) -> Option<DragPayload> {
        if self.lifted.is_some() {
            tracing::debug!(?id, "lift refused, another drag is in flight");
            return None;
        }
        let origin = self.location_of(id)?;
        let payload = self.assignments.iter().find(|a| a.id() == id)?.pick_up();
        self.lifted = Some(Lift {
            payload: payload.clone(),
            origin,
        });
        Some(payload)
    }

    /// Release the lifted option. Without a lift this is rejected.
    pub fn commit(&mut self, target: DropTarget) -> DropOutcome {
        let Some(lift) = self.lifted.take() else {
            return DropOutcome::Rejected;
        };
        let id = lift.payload.id;

        let outcome = match target {
            DropTarget::Outside => DropOutcome::Rejected,
            DropTarget::Slot(ordinal) if ordinal >= self.slots.len() => DropOutcome::Rejected,
            DropTarget::Slot(ordinal) if lift.origin == Location::Slot(ordinal) => {
                DropOutcome::Placed(Location::Slot(ordinal))
            }
            DropTarget::Slot(ordinal) => {
                if let Location::Slot(from) = lift.origin {
                    self.slots[from].take();
                }
                let mut events = Vec::new();
                self.slots[ordinal].accept(lift.payload, |e| events.push(e));
                for event in events {
                    match event {
                        SlotEvent::Evicted { payload, .. } => {
                            self.notify(payload.id, DropOutcome::Placed(Location::Pool))
                        }
                        SlotEvent::Filled { ordinal, payload } => {
                            self.notify(payload.id, DropOutcome::Placed(Location::Slot(ordinal)))
                        }
                    }
                }
                DropOutcome::Placed(Location::Slot(ordinal))
            }
            DropTarget::Pool => {
                if let Location::Slot(from) = lift.origin {
                    self.slots[from].take();
                }
                self.notify(id, DropOutcome::Placed(Location::Pool));
                DropOutcome::Placed(Location::Pool)
            }
        };

        if outcome == DropOutcome::Rejected {
            self.notify(id, outcome);
        }
        tracing::debug!(?id, ?target, ?outcome, "drag committed");
        outcome
    }

    pub fn cancel(&mut self) {
        self.commit(DropTarget::Outside);
    }

    /// Lift and commit in one step.
    #[cfg(test)]
    pub fn place(&mut self, id: OptionId, ordinal: usize) -> DropOutcome {
        if self.lift(id).is_none() {
            return DropOutcome::Rejected;
        }
        self.commit(DropTarget::Slot(ordinal))
    }

    pub fn return_to_pool(&mut self, id: OptionId) -> DropOutcome {
        if self.lift(id).is_none() {
            return DropOutcome::Rejected;
        }
        self.commit(DropTarget::Pool)
    }

    pub fn filled_count(&self) -> usize {
        self.slots.iter().filter(|s| !s.is_empty()).count()
    }

    pub fn correct_count(&self) -> usize {
        self.slots
            .iter()
            .filter(|s| s.occupant().is_some_and(|p| p.is_correct))
            .count()
    }

    /// Every blank holds a correct option. True for a board without blanks.
    pub fn all_correct(&self) -> bool {
        self.correct_count() == self.slots.len()
    }

    pub fn is_untouched(&self) -> bool {
        self.filled_count() == 0 && self.lifted.is_none()
    }

    /// Send every option back to the pool, keeping the pool order.
    pub fn clear(&mut self) {
        for slot in &mut self.slots {
            slot.take();
        }
        for a in &mut self.assignments {
            a.drop_outcome(DropOutcome::Placed(Location::Pool));
        }
        self.lifted = None;
    }

    fn notify(&mut self, id: OptionId, outcome: DropOutcome) {
        if let Some(a) = self.assignments.iter_mut().find(|a| a.id() == id) {
            a.drop_outcome(outcome);
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::*;
    use crate::quiz::question::{Modality, RawOption, RawQuestion};

    fn board() -> BlankBoard {
        let raw = RawQuestion {
            question: "{blank0} loves {blank1}".into(),
            category: Modality::FillInBlank,
            options: vec![
                RawOption { text: "Alice".into(), is_correct: true },
                RawOption { text: "Bob".into(), is_correct: true },
                RawOption { text: "Eve".into(), is_correct: false },
            ],
        };
        BlankBoard::new(&Question::from_raw(&raw, 0).unwrap())
    }

    fn slots_holding(b: &BlankBoard, id: OptionId) -> usize {
        b.slots()
            .iter()
            .filter(|s| s.occupant().is_some_and(|p| p.id == id))
            .count()
    }

    #[test]
    fn new_board_has_full_pool_and_empty_slots() {
        let b = board();
        assert_eq!(b.blank_count(), 2);
        assert_eq!(b.pool_len(), 3);
        assert!(b.is_untouched());
        assert!(!b.all_correct());
    }

    #[test]
    fn placing_removes_from_pool() {
        let mut b = board();
        assert_eq!(b.place(OptionId(0), 0), DropOutcome::Placed(Location::Slot(0)));
        assert_eq!(b.pool_len(), 2);
        assert_eq!(b.location_of(OptionId(0)), Some(Location::Slot(0)));
    }

    #[test]
    fn moving_between_slots_vacates_origin() {
        let mut b = board();
        b.place(OptionId(0), 0);
        b.place(OptionId(0), 1);
        assert!(b.assigned(0).is_none());
        assert_eq!(b.assigned(1).map(|p| p.id), Some(OptionId(0)));
        assert_eq!(slots_holding(&b, OptionId(0)), 1);
    }

    #[test]
    fn dropping_on_occupied_slot_evicts_to_pool() {
        let mut b = board();
        b.place(OptionId(0), 0);
        b.place(OptionId(2), 0);
        assert_eq!(b.assigned(0).map(|p| p.id), Some(OptionId(2)));
        assert_eq!(b.location_of(OptionId(0)), Some(Location::Pool));
        let pool: Vec<OptionId> = b.pool().map(|a| a.id()).collect();
        assert_eq!(pool, vec![OptionId(0), OptionId(1)]);
    }

    #[test]
    fn drop_outside_leaves_everything_in_place() {
        let mut b = board();
        b.place(OptionId(1), 1);
        b.lift(OptionId(1)).unwrap();
        assert_eq!(b.commit(DropTarget::Outside), DropOutcome::Rejected);
        assert_eq!(b.assigned(1).map(|p| p.id), Some(OptionId(1)));
        assert_eq!(b.pool_len(), 2);
        assert!(b.lifted().is_none());
    }

    #[test]
    fn second_lift_is_refused_until_commit() {
        let mut b = board();
        assert!(b.lift(OptionId(0)).is_some());
        assert!(b.lift(OptionId(1)).is_none());
        assert_eq!(b.place(OptionId(1), 0), DropOutcome::Rejected);
        b.commit(DropTarget::Slot(1));
        assert_eq!(b.assigned(1).map(|p| p.id), Some(OptionId(0)));
        assert!(b.assigned(0).is_none());
    }

    #[test]
    fn commit_without_lift_is_rejected() {
        let mut b = board();
        assert_eq!(b.commit(DropTarget::Slot(0)), DropOutcome::Rejected);
        assert!(b.is_untouched());
    }

    #[test]
    fn out_of_range_slot_is_rejected() {
        let mut b = board();
        b.lift(OptionId(0));
        assert_eq!(b.commit(DropTarget::Slot(9)), DropOutcome::Rejected);
        assert_eq!(b.location_of(OptionId(0)), Some(Location::Pool));
    }

    #[test]
    fn return_to_pool_from_slot() {
        let mut b = board();
        b.place(OptionId(0), 0);
        assert_eq!(b.return_to_pool(OptionId(0)), DropOutcome::Placed(Location::Pool));
        assert!(b.is_untouched());
        assert_eq!(b.pool_len(), 3);
    }

    #[test]
    fn correctness_is_all_or_nothing() {
        let mut b = board();
        b.place(OptionId(0), 0);
        b.place(OptionId(2), 1);
        assert_eq!(b.correct_count(), 1);
        assert!(!b.all_correct());
        b.place(OptionId(1), 1);
        assert!(b.all_correct());
    }

    #[test]
    fn repeated_drops_never_double_count() {
        let mut b = board();
        for _ in 0..3 {
            b.place(OptionId(0), 0);
        }
        assert_eq!(b.correct_count(), 1);
        assert_eq!(b.filled_count(), 1);
    }

    #[test]
    fn any_drag_sequence_keeps_single_ownership() {
        let mut b = board();
        let moves = [(0, 0), (1, 0), (0, 1), (2, 1), (1, 1), (0, 0), (2, 0)];
        for (id, slot) in moves {
            b.place(OptionId(id), slot);
            for id in 0..3 {
                let in_slots = slots_holding(&b, OptionId(id));
                assert!(in_slots <= 1);
                let in_pool = b.pool().any(|a| a.id() == OptionId(id));
                assert_eq!(in_slots + in_pool as usize, 1);
            }
        }
    }

    #[test]
    fn clear_restores_pool_and_keeps_order() {
        let mut b = board();
        b.shuffle_pool(&mut SmallRng::seed_from_u64(7));
        let order: Vec<OptionId> = b.pool().map(|a| a.id()).collect();
        b.place(OptionId(0), 0);
        b.lift(OptionId(1));
        b.clear();
        assert!(b.is_untouched());
        let after: Vec<OptionId> = b.pool().map(|a| a.id()).collect();
        assert_eq!(order, after);
    }

    #[test]
    fn board_without_blanks_is_vacuously_correct() {
        let raw = RawQuestion {
            question: "Nothing here".into(),
            category: Modality::FillInBlank,
            options: vec![],
        };
        let b = BlankBoard::new(&Question::from_raw(&raw, 0).unwrap());
        assert_eq!(b.blank_count(), 0);
        assert!(b.all_correct());
    }
}
