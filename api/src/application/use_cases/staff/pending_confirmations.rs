use crate::application::ports::student_repository::StudentRepository;
use crate::domain::users::Student;

pub struct PendingConfirmations<'a, S: StudentRepository + ?Sized> {
    pub students: &'a S,
}

impl<'a, S: StudentRepository + ?Sized> PendingConfirmations<'a, S> {
    pub async fn execute(&self) -> anyhow::Result<Vec<Student>> {
        self.students.pending_confirmations().await
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
    async fn lists_only_flagged_students() {
        let store = InMemoryStore::new();
        let s1 = seed_user(&store, "Pending_One", UserType::Student).await;
        seed_user(&store, "Pending_Two", UserType::Student).await;
        let s3 = seed_user(&store, "Pending_Three", UserType::Student).await;
        let request = RequestConfirmation { students: &store };
        request.execute(s1).await.unwrap();
        request.execute(s3).await.unwrap();

        let pending = PendingConfirmations { students: &store }
            .execute()
            .await
            .unwrap();
        let names: Vec<&str> = pending.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Pending One", "Pending Three"]);
    }
}
