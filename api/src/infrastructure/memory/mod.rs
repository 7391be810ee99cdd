use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::application::ports::student_repository::StudentRepository;
use crate::application::ports::user_repository::{
    NewUser, UserRepository, UserRow, UsernameConflict,
};
use crate::domain::users::{Student, UserType};

/// Process-local store implementing every repository port. Data is lost on restart.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    state: RwLock<State>,
}

#[derive(Debug, Default)]
struct State {
    next_id: i64,
    users: BTreeMap<i64, UserRow>,
    students: BTreeMap<i64, StudentState>,
}

#[derive(Debug, Default, Clone, Copy)]
struct StudentState {
    total_hours: i32,
    confirmation_requested: bool,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl State {
    fn student(&self, id: i64) -> Option<Student> {
        let user = self.users.get(&id)?;
        let st = self.students.get(&id)?;
        Some(Student {
            id,
            username: user.username.clone(),
            name: user.name.clone(),
            total_hours: st.total_hours,
            confirmation_requested: st.confirmation_requested,
        })
    }

    fn students(&self) -> Vec<Student> {
        self.students
            .keys()
            .filter_map(|id| self.student(*id))
            .collect()
    }
}

fn public_row(row: &UserRow) -> UserRow {
    UserRow {
        password_hash: None,
        ..row.clone()
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn create_user(&self, new_user: &NewUser) -> anyhow::Result<UserRow> {
        let mut state = self.state.write().await;
        if state
            .users
            .values()
            .any(|u| u.username == new_user.username)
        {
            return Err(UsernameConflict.into());
        }
        state.next_id += 1;
        let id = state.next_id;
        let row = UserRow {
            id,
            username: new_user.username.clone(),
            name: new_user.name.clone(),
            user_type: new_user.user_type,
            created_at: chrono::Utc::now(),
            password_hash: Some(new_user.password_hash.clone()),
        };
        state.users.insert(id, row.clone());
        if new_user.user_type == UserType::Student {
            state.students.insert(id, StudentState::default());
        }
        Ok(row)
    }

    async fn find_by_username(&self, username: &str) -> anyhow::Result<Option<UserRow>> {
        let state = self.state.read().await;
        Ok(state
            .users
            .values()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn find_by_id(&self, id: i64) -> anyhow::Result<Option<UserRow>> {
        let state = self.state.read().await;
        Ok(state.users.get(&id).map(public_row))
    }

    async fn list_users(&self) -> anyhow::Result<Vec<UserRow>> {
        let state = self.state.read().await;
        Ok(state.users.values().map(public_row).collect())
    }

    async fn update_username(&self, id: i64, username: &str) -> anyhow::Result<Option<UserRow>> {
        let mut state = self.state.write().await;
        if state
            .users
            .values()
            .any(|u| u.id != id && u.username == username)
        {
            return Err(UsernameConflict.into());
        }
        Ok(state.users.get_mut(&id).map(|row| {
            row.username = username.to_string();
            public_row(row)
        }))
    }
}

#[async_trait]
impl StudentRepository for InMemoryStore {
    async fn find_student(&self, id: i64) -> anyhow::Result<Option<Student>> {
        Ok(self.state.read().await.student(id))
    }

    async fn add_hours(&self, id: i64, hours: i32) -> anyhow::Result<Option<Student>> {
        let mut state = self.state.write().await;
        let Some(mut student) = state.student(id) else {
            return Ok(None);
        };
        student.add_hours(hours)?;
        if let Some(st) = state.students.get_mut(&id) {
            st.total_hours = student.total_hours;
        }
        Ok(Some(student))
    }

    async fn set_confirmation_requested(
        &self,
        id: i64,
        requested: bool,
    ) -> anyhow::Result<Option<Student>> {
        let mut state = self.state.write().await;
        let Some(mut student) = state.student(id) else {
            return Ok(None);
        };
        if requested {
            student.request_confirmation();
        } else {
            student.confirm_hours();
        }
        if let Some(st) = state.students.get_mut(&id) {
            st.confirmation_requested = student.confirmation_requested;
        }
        Ok(Some(student))
    }

    async fn leaderboard(&self, limit: i64) -> anyhow::Result<Vec<Student>> {
        let mut students = self.state.read().await.students();
        students.sort_by(|a, b| b.total_hours.cmp(&a.total_hours).then(a.id.cmp(&b.id)));
        students.truncate(usize::try_from(limit.max(0)).unwrap_or(usize::MAX));
        Ok(students)
    }

    async fn pending_confirmations(&self) -> anyhow::Result<Vec<Student>> {
        let students = self.state.read().await.students();
        Ok(students
            .into_iter()
            .filter(|s| s.confirmation_requested)
            .collect())
    }
}
