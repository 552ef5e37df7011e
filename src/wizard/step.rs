use crate::errors::{BookingError, Result};

/// A statically defined wizard step and the fields validated on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepDescriptor {
    pub index: usize,
    pub title: String,
    pub fields: Vec<String>,
}

impl StepDescriptor {
    pub fn new(index: usize, title: impl Into<String>, fields: &[&str]) -> Self {
        Self {
            index,
            title: title.into(),
            fields: fields.iter().map(|name| (*name).to_string()).collect(),
        }
    }
}

/// Active step tracking. Always satisfies `1 <= active <= total`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepState {
    active: usize,
    total: usize,
}

impl StepState {
    pub fn new(total: usize) -> Result<Self> {
        if total == 0 {
            return Err(BookingError::InvalidTemplate(
                "a wizard needs at least one step".into(),
            ));
        }
        Ok(Self { active: 1, total })
    }

    pub fn active(&self) -> usize {
        self.active
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn is_final(&self) -> bool {
        self.active == self.total
    }

    /// Moves forward one step unless already on the final one.
    pub fn advance(&mut self) -> bool {
        if self.active < self.total {
            self.active += 1;
            true
        } else {
            false
        }
    }

    /// Moves back one step unless already on the first one.
    pub fn retreat(&mut self) -> bool {
        if self.active > 1 {
            self.active -= 1;
            true
        } else {
            false
        }
    }

    pub fn jump_to(&mut self, step: usize) -> Result<()> {
        if step == 0 || step > self.total {
            return Err(BookingError::StepOutOfRange {
                step,
                total: self.total,
            });
        }
        self.active = step;
        Ok(())
    }

    /// Progress indicator flags: entry `i` is lit when step `i + 1` has been
    /// reached.
    pub fn indicators(&self) -> Vec<bool> {
        (1..=self.total).map(|step| step <= self.active).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_on_first_step() {
        let state = StepState::new(3).unwrap();
        assert_eq!(state.active(), 1);
        assert_eq!(state.total(), 3);
        assert!(!state.is_final());
    }

    #[test]
    fn zero_steps_is_rejected() {
        assert!(StepState::new(0).is_err());
    }

    #[test]
    fn advance_stops_at_final_step() {
        let mut state = StepState::new(3).unwrap();
        assert!(state.advance());
        assert!(state.advance());
        assert!(state.is_final());
        assert!(!state.advance());
        assert_eq!(state.active(), 3);
    }

    #[test]
    fn retreat_stops_at_first_step() {
        let mut state = StepState::new(3).unwrap();
        assert!(!state.retreat());
        assert_eq!(state.active(), 1);
        state.advance();
        assert!(state.retreat());
        assert_eq!(state.active(), 1);
    }

    #[test]
    fn jump_to_checks_range() {
        let mut state = StepState::new(3).unwrap();
        state.jump_to(3).unwrap();
        assert_eq!(state.active(), 3);
        let err = state.jump_to(4).unwrap_err();
        assert!(matches!(err, BookingError::StepOutOfRange { step: 4, total: 3 }));
        assert!(state.jump_to(0).is_err());
        assert_eq!(state.active(), 3);
    }

    #[test]
    fn indicators_light_up_reached_steps() {
        let mut state = StepState::new(3).unwrap();
        assert_eq!(state.indicators(), vec![true, false, false]);
        state.advance();
        assert_eq!(state.indicators(), vec![true, true, false]);
    }
}
