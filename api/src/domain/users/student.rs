/// Hour totals at which a student earns an accolade, ascending.
pub const ACCOLADE_MILESTONES: [i32; 4] = [10, 25, 50, 100];

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum HoursError {
    #[error("Hours cannot be negative")]
    Negative,
    #[error("Hours total is too large")]
    Overflow,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Student {
    pub id: i64,
    pub username: String,
    pub name: String,
    pub total_hours: i32,
    pub confirmation_requested: bool,
}

impl Student {
    pub fn new(id: i64, username: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id,
            username: username.into(),
            name: name.into(),
            total_hours: 0,
            confirmation_requested: false,
        }
    }

    /// Adds `hours` to the running total. On error the total is left untouched.
    pub fn add_hours(&mut self, hours: i32) -> Result<i32, HoursError> {
        if hours < 0 {
            return Err(HoursError::Negative);
        }
        self.total_hours = self
            .total_hours
            .checked_add(hours)
            .ok_or(HoursError::Overflow)?;
        Ok(self.total_hours)
    }

    pub fn accolades(&self) -> Vec<i32> {
        ACCOLADE_MILESTONES
            .iter()
            .copied()
            .take_while(|m| *m <= self.total_hours)
            .collect()
    }

    pub fn next_milestone(&self) -> Option<i32> {
        ACCOLADE_MILESTONES
            .iter()
            .copied()
            .find(|m| *m > self.total_hours)
    }

    pub fn request_confirmation(&mut self) {
        self.confirmation_requested = true;
    }

    pub fn confirm_hours(&mut self) {
        self.confirmation_requested = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn student() -> Student {
        Student::new(1, "testuser", "Test User")
    }

    #[test]
    fn new_student_starts_empty() {
        let s = student();
        assert_eq!(s.total_hours, 0);
        assert!(!s.confirmation_requested);
        assert!(s.accolades().is_empty());
        assert_eq!(s.next_milestone(), Some(10));
    }

    #[test]
    fn add_hours_accumulates() {
        let mut s = student();
        assert_eq!(s.add_hours(5), Ok(5));
        assert_eq!(s.add_hours(10), Ok(15));
        assert_eq!(s.add_hours(0), Ok(15));
    }

    #[test]
    fn negative_hours_are_rejected_without_side_effects() {
        let mut s = student();
        s.add_hours(7).unwrap();
        assert_eq!(s.add_hours(-5), Err(HoursError::Negative));
        assert_eq!(s.total_hours, 7);
    }

    #[test]
    fn overflow_is_rejected() {
        let mut s = student();
        s.add_hours(i32::MAX).unwrap();
        assert_eq!(s.add_hours(1), Err(HoursError::Overflow));
        assert_eq!(s.total_hours, i32::MAX);
    }

    #[test]
    fn accolades_follow_thresholds() {
        let mut s = student();
        s.add_hours(10).unwrap();
        assert_eq!(s.accolades(), vec![10]);
        s.add_hours(15).unwrap();
        assert_eq!(s.accolades(), vec![10, 25]);
        s.add_hours(100).unwrap();
        assert_eq!(s.accolades(), ACCOLADE_MILESTONES.to_vec());
        assert_eq!(s.next_milestone(), None);
    }

    #[test]
    fn accolades_are_monotonic_and_bounded() {
        let mut s = student();
        let mut previous: Vec<i32> = Vec::new();
        for _ in 0..60 {
            s.add_hours(3).unwrap();
            let current = s.accolades();
            assert!(current.starts_with(&previous));
            assert!(current.iter().all(|m| *m <= s.total_hours));
            assert!(current.iter().all(|m| ACCOLADE_MILESTONES.contains(m)));
            previous = current;
        }
    }

    #[test]
    fn confirmation_flag_transitions() {
        let mut s = student();
        s.request_confirmation();
        assert!(s.confirmation_requested);
        s.request_confirmation();
        assert!(s.confirmation_requested);
        s.confirm_hours();
        assert!(!s.confirmation_requested);
    }
}
