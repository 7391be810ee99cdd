use crate::application::ports::student_repository::StudentRepository;
use crate::application::ports::user_repository::UserRepository;
use crate::domain::users::Student;

#[derive(thiserror::Error, Debug)]
pub enum ConfirmHoursError {
    #[error("Staff not found")]
    StaffNotFound,
    #[error("Student not found")]
    StudentNotFound,
    #[error("failed to confirm hours")]
    Repository(#[source] anyhow::Error),
}

pub struct ConfirmStudentHours<'a, U, S>
where
    U: UserRepository + ?Sized,
    S: StudentRepository + ?Sized,
{
    pub users: &'a U,
    pub students: &'a S,
}

impl<'a, U, S> ConfirmStudentHours<'a, U, S>
where
    U: UserRepository + ?Sized,
    S: StudentRepository + ?Sized,
{
    /// Clears the student's confirmation flag. Confirming a student with no
    /// pending request succeeds and leaves the flag cleared.
    pub async fn execute(&self, staff_id: i64, student_id: i64) -> Result<Student, ConfirmHoursError> {
        if !super::is_staff(self.users, staff_id)
            .await
            .map_err(ConfirmHoursError::Repository)?
        {
            return Err(ConfirmHoursError::StaffNotFound);
        }
        let student = self
            .students
            .set_confirmation_requested(student_id, false)
            .await
            .map_err(ConfirmHoursError::Repository)?
            .ok_or(ConfirmHoursError::StudentNotFound)?;
        tracing::info!(staff_id, student_id, "hours_confirmed");
        Ok(student)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::use_cases::students::request_confirmation::RequestConfirmation;
    use crate::application::use_cases::test_support::seed_user;
    use crate::domain::users::UserType;
    use crate::infrastructure::memory::InMemoryStore;

    #[tokio::test]
    async fn request_then_confirm_round_trip() {
        let store = InMemoryStore::new();
        let staff = seed_user(&store, "teacher4", UserType::Staff).await;
        let student = seed_user(&store, "student2", UserType::Student).await;

        let requested = RequestConfirmation { students: &store }
            .execute(student)
            .await
            .unwrap();
        assert!(requested.confirmation_requested);

        let confirmed = ConfirmStudentHours {
            users: &store,
            students: &store,
        }
        .execute(staff, student)
        .await
        .unwrap();
        assert!(!confirmed.confirmation_requested);
        assert!(!store.find_student(student).await.unwrap().unwrap().confirmation_requested);
    }

    #[tokio::test]
    async fn validates_both_parties() {
        let store = InMemoryStore::new();
        let staff = seed_user(&store, "teacher5", UserType::Staff).await;
        let student = seed_user(&store, "student3", UserType::Student).await;
        RequestConfirmation { students: &store }
            .execute(student)
            .await
            .unwrap();
        let uc = ConfirmStudentHours {
            users: &store,
            students: &store,
        };
        assert!(matches!(
            uc.execute(staff, 12345).await,
            Err(ConfirmHoursError::StudentNotFound)
        ));
        // a student cannot clear their own flag through the staff action
        assert!(matches!(
            uc.execute(student, student).await,
            Err(ConfirmHoursError::StaffNotFound)
        ));
        assert!(store.find_student(student).await.unwrap().unwrap().confirmation_requested);
    }
}
