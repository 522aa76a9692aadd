use serde::{Deserialize, Serialize};

/// Step number, unique within its recipe
pub type StepNumber = u32;

/// A single instruction step of a recipe, keyed by step number
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    pub step_number: StepNumber,
    pub instruction: String,
    pub optional: bool,

    /// Timer duration in seconds
    pub timer_seconds: Option<u32>,
}

impl Step {
    pub fn new(step_number: StepNumber, instruction: String) -> Self {
        Self {
            step_number,
            instruction,
            optional: false,
            timer_seconds: None,
        }
    }

    pub fn with_timer(mut self, seconds: u32) -> Self {
        self.timer_seconds = Some(seconds);
        self
    }
}
