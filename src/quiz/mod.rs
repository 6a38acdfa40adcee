pub mod answer;
pub mod assignment;
pub mod board;
pub mod question;
pub mod result;
pub mod session;
pub mod slot;
pub mod view;

pub use question::{Modality, OptionId, QuestionSet};
pub use session::{Phase, QuizSession};
