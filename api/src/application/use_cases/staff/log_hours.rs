use crate::application::ports::student_repository::StudentRepository;
use crate::application::ports::user_repository::UserRepository;
use crate::application::use_cases::students::add_hours::{AddHours, AddHoursError};
use crate::domain::users::{HoursError, Student};

#[derive(thiserror::Error, Debug)]
pub enum LogHoursError {
    #[error("Staff not found")]
    StaffNotFound,
    #[error("Student not found")]
    StudentNotFound,
    #[error(transparent)]
    InvalidHours(#[from] HoursError),
    #[error("failed to log hours")]
    Repository(#[source] anyhow::Error),
}

impl From<AddHoursError> for LogHoursError {
    fn from(err: AddHoursError) -> Self {
        match err {
            AddHoursError::StudentNotFound => LogHoursError::StudentNotFound,
            AddHoursError::InvalidHours(e) => LogHoursError::InvalidHours(e),
            AddHoursError::Repository(e) => LogHoursError::Repository(e),
        }
    }
}

pub struct LogHours<'a, U, S>
where
    U: UserRepository + ?Sized,
    S: StudentRepository + ?Sized,
{
    pub users: &'a U,
    pub students: &'a S,
}

impl<'a, U, S> LogHours<'a, U, S>
where
    U: UserRepository + ?Sized,
    S: StudentRepository + ?Sized,
{
    pub async fn execute(
        &self,
        staff_id: i64,
        student_id: i64,
        hours: i32,
    ) -> Result<Student, LogHoursError> {
        if !super::is_staff(self.users, staff_id)
            .await
            .map_err(LogHoursError::Repository)?
        {
            return Err(LogHoursError::StaffNotFound);
        }
        let student = AddHours {
            students: self.students,
        }
        .execute(student_id, hours)
        .await?;
        tracing::info!(staff_id, student_id, hours, "hours_logged");
        Ok(student)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::use_cases::test_support::seed_user;
    use crate::domain::users::UserType;
    use crate::infrastructure::memory::InMemoryStore;

    #[tokio::test]
    async fn staff_logs_hours_for_student() {
        let store = InMemoryStore::new();
        let staff = seed_user(&store, "teacher2", UserType::Staff).await;
        let student = seed_user(&store, "student1", UserType::Student).await;
        let uc = LogHours {
            users: &store,
            students: &store,
        };
        let updated = uc.execute(staff, student, 20).await.unwrap();
        assert_eq!(updated.total_hours, 20);
    }

    #[tokio::test]
    async fn missing_student_reports_message() {
        let store = InMemoryStore::new();
        let staff = seed_user(&store, "teacher3", UserType::Staff).await;
        let uc = LogHours {
            users: &store,
            students: &store,
        };
        let err = uc.execute(staff, 99999, 20).await.unwrap_err();
        assert!(matches!(err, LogHoursError::StudentNotFound));
        assert_eq!(err.to_string(), "Student not found");
    }

    #[tokio::test]
    async fn students_cannot_act_as_staff() {
        let store = InMemoryStore::new();
        let a = seed_user(&store, "student_a", UserType::Student).await;
        let b = seed_user(&store, "student_b", UserType::Student).await;
        let uc = LogHours {
            users: &store,
            students: &store,
        };
        assert!(matches!(
            uc.execute(a, b, 5).await,
            Err(LogHoursError::StaffNotFound)
        ));
        assert_eq!(store.find_student(b).await.unwrap().unwrap().total_hours, 0);
    }

    #[tokio::test]
    async fn negative_hours_rejected() {
        let store = InMemoryStore::new();
        let staff = seed_user(&store, "teacher4", UserType::Staff).await;
        let student = seed_user(&store, "student2", UserType::Student).await;
        let uc = LogHours {
            users: &store,
            students: &store,
        };
        let err = uc.execute(staff, student, -1).await.unwrap_err();
        assert!(matches!(err, LogHoursError::InvalidHours(HoursError::Negative)));
        assert_eq!(err.to_string(), "Hours cannot be negative");
    }
}
