use crate::quiz::question::{AnswerOption, OptionId};

/// Everything a drag carries: the option's identity, label and correctness.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DragPayload {
    pub id: OptionId,
    pub text: String,
    pub is_correct: bool,
}

impl From<&AnswerOption> for DragPayload {
    fn from(option: &AnswerOption) -> Self {
        Self {
            id: option.id,
            text: option.text.clone(),
            is_correct: option.is_correct,
        }
    }
}

/// Where an option currently lives on a fill-in-the-blank board.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Location {
    Pool,
    Slot(usize),
}

/// How a drag interaction ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DropOutcome {
    Placed(Location),
    Rejected,
}

/// A draggable option. It does not know where it may land; the only state it
/// keeps is whether it currently sits in a slot, so the pool can hide it.
#[derive(Clone, Debug)]
pub struct Assignment {
    payload: DragPayload,
    placed: bool,
}

impl Assignment {
    pub fn new(option: &AnswerOption) -> Self {
        Self {
            payload: DragPayload::from(option),
            placed: false,
        }
    }

    pub fn id(&self) -> OptionId {
        self.payload.id
    }

    pub fn text(&self) -> &str {
        &self.payload.text
    }

    pub fn is_correct(&self) -> bool {
        self.payload.is_correct
    }

    pub fn is_placed(&self) -> bool {
        self.placed
    }

    pub fn pick_up(&self) -> DragPayload {
        self.payload.clone()
    }

    pub fn drop_outcome(&mut self, outcome: DropOutcome) {
        match outcome {
            DropOutcome::Placed(Location::Slot(_)) => self.placed = true,
            DropOutcome::Placed(Location::Pool) => self.placed = false,
            DropOutcome::Rejected => {}
        }
    }
}
