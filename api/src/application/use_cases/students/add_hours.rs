use crate::application::ports::student_repository::StudentRepository;
use crate::domain::users::{HoursError, Student};

#[derive(thiserror::Error, Debug)]
pub enum AddHoursError {
    #[error("Student not found")]
    StudentNotFound,
    #[error(transparent)]
    InvalidHours(#[from] HoursError),
    #[error("failed to update student")]
    Repository(#[source] anyhow::Error),
}

pub struct AddHours<'a, S: StudentRepository + ?Sized> {
    pub students: &'a S,
}

impl<'a, S: StudentRepository + ?Sized> AddHours<'a, S> {
    pub async fn execute(&self, student_id: i64, hours: i32) -> Result<Student, AddHoursError> {
        if hours < 0 {
            return Err(HoursError::Negative.into());
        }
        let student = self
            .students
            .add_hours(student_id, hours)
            .await
            .map_err(|e| match e.downcast::<HoursError>() {
                Ok(hours_err) => AddHoursError::InvalidHours(hours_err),
                Err(e) => AddHoursError::Repository(e),
            })?
            .ok_or(AddHoursError::StudentNotFound)?;
        tracing::debug!(student_id, hours, total_hours = student.total_hours, "hours_added");
        Ok(student)
    }
}
