use std::sync::Arc;

use crate::application::ports::student_repository::StudentRepository;
use crate::application::ports::user_repository::UserRepository;
use crate::bootstrap::config::Config;
use crate::infrastructure::memory::InMemoryStore;

#[derive(Clone)]
pub struct AppContext {
    pub cfg: Config,
    services: Arc<AppServices>,
}

#[derive(Clone)]
pub struct AppServices {
    user_repo: Arc<dyn UserRepository>,
    student_repo: Arc<dyn StudentRepository>,
}

impl AppServices {
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        student_repo: Arc<dyn StudentRepository>,
    ) -> Self {
        Self {
            user_repo,
            student_repo,
        }
    }

    /// Both ports served by one process-local store.
    pub fn in_memory() -> Self {
        let store = Arc::new(InMemoryStore::new());
        Self::new(store.clone(), store)
    }
}

impl AppContext {
    pub fn new(cfg: Config, services: AppServices) -> Self {
        Self {
            cfg,
            services: Arc::new(services),
        }
    }

    pub fn user_repo(&self) -> Arc<dyn UserRepository> {
        self.services.user_repo.clone()
    }

    pub fn student_repo(&self) -> Arc<dyn StudentRepository> {
        self.services.student_repo.clone()
    }
}
