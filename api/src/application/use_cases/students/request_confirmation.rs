use crate::application::ports::student_repository::StudentRepository;
use crate::domain::users::Student;

#[derive(thiserror::Error, Debug)]
pub enum RequestConfirmationError {
    #[error("Student not found")]
    StudentNotFound,
    #[error("failed to update student")]
    Repository(#[source] anyhow::Error),
}

pub struct RequestConfirmation<'a, S: StudentRepository + ?Sized> {
    pub students: &'a S,
}

impl<'a, S: StudentRepository + ?Sized> RequestConfirmation<'a, S> {
    pub async fn execute(&self, student_id: i64) -> Result<Student, RequestConfirmationError> {
        let student = self
            .students
            .set_confirmation_requested(student_id, true)
            .await
            .map_err(RequestConfirmationError::Repository)?
            .ok_or(RequestConfirmationError::StudentNotFound)?;
        tracing::info!(student_id, "confirmation_requested");
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
    async fn sets_flag_and_is_idempotent() {
        let store = InMemoryStore::new();
        let id = seed_user(&store, "confirm_test", UserType::Student).await;
        assert!(!store.find_student(id).await.unwrap().unwrap().confirmation_requested);

        let uc = RequestConfirmation { students: &store };
        assert!(uc.execute(id).await.unwrap().confirmation_requested);
        assert!(uc.execute(id).await.unwrap().confirmation_requested);
        assert!(store.find_student(id).await.unwrap().unwrap().confirmation_requested);
    }

    #[tokio::test]
    async fn missing_student() {
        let store = InMemoryStore::new();
        let uc = RequestConfirmation { students: &store };
        assert!(matches!(
            uc.execute(42).await,
            Err(RequestConfirmationError::StudentNotFound)
        ));
    }
}
