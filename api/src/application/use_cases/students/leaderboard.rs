use crate::application::dto::students::LeaderboardEntryDto;
use crate::application::ports::student_repository::StudentRepository;

pub struct GetLeaderboard<'a, S: StudentRepository + ?Sized> {
    pub students: &'a S,
}

impl<'a, S: StudentRepository + ?Sized> GetLeaderboard<'a, S> {
    /// Entries are ordered by `total_hours` descending. Equal totals share a rank
    /// and the following rank is skipped (1, 2, 2, 4).
    pub async fn execute(&self, limit: i64) -> anyhow::Result<Vec<LeaderboardEntryDto>> {
        let mut students = self.students.leaderboard(limit).await?;
        students.sort_by(|a, b| b.total_hours.cmp(&a.total_hours).then(a.id.cmp(&b.id)));

        let mut out: Vec<LeaderboardEntryDto> = Vec::with_capacity(students.len());
        for (idx, s) in students.into_iter().enumerate() {
            let rank = match out.last() {
                Some(prev) if prev.total_hours == s.total_hours => prev.rank,
                _ => idx + 1,
            };
            out.push(LeaderboardEntryDto {
                rank,
                id: s.id,
                username: s.username,
                name: s.name,
                total_hours: s.total_hours,
            });
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::use_cases::students::add_hours::AddHours;
    use crate::application::use_cases::test_support::seed_user;
    use crate::domain::users::UserType;
    use crate::infrastructure::memory::InMemoryStore;

    #[tokio::test]
    async fn orders_by_hours_descending() {
        let store = InMemoryStore::new();
        let s1 = seed_user(&store, "Leader_One", UserType::Student).await;
        let s2 = seed_user(&store, "Leader_Two", UserType::Student).await;
        let s3 = seed_user(&store, "Leader_Three", UserType::Student).await;
        seed_user(&store, "Some_Staff", UserType::Staff).await;
        let add = AddHours { students: &store };
        add.execute(s1, 50).await.unwrap();
        add.execute(s2, 25).await.unwrap();
        add.execute(s3, 75).await.unwrap();

        let board = GetLeaderboard { students: &store }
            .execute(100)
            .await
            .unwrap();
        assert_eq!(board.len(), 3);
        assert_eq!(board[0].name, "Leader Three");
        assert_eq!(board[0].total_hours, 75);
        assert_eq!(board[1].total_hours, 50);
        assert_eq!(board[2].total_hours, 25);
        assert_eq!(
            board.iter().map(|e| e.rank).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
    }

    #[tokio::test]
    async fn ties_share_rank_and_order_is_non_increasing() {
        let store = InMemoryStore::new();
        let add = AddHours { students: &store };
        for (name, hours) in [("a_1", 5), ("b_2", 30), ("c_3", 30), ("d_4", 0), ("e_5", 12)] {
            let id = seed_user(&store, name, UserType::Student).await;
            add.execute(id, hours).await.unwrap();
        }
        let board = GetLeaderboard { students: &store }
            .execute(100)
            .await
            .unwrap();
        assert!(board.windows(2).all(|w| w[0].total_hours >= w[1].total_hours));
        assert_eq!(
            board.iter().map(|e| e.rank).collect::<Vec<_>>(),
            vec![1, 1, 3, 4, 5]
        );
    }

    #[tokio::test]
    async fn limit_truncates() {
        let store = InMemoryStore::new();
        for name in ["one", "two", "three"] {
            seed_user(&store, name, UserType::Student).await;
        }
        let board = GetLeaderboard { students: &store }.execute(2).await.unwrap();
        assert_eq!(board.len(), 2);
    }
}
