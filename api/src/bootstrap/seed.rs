use crate::application::ports::user_repository::UserRepository;
use crate::application::use_cases::auth::register::{Register, RegisterRequest};
use crate::bootstrap::app_context::AppContext;
use crate::domain::users::UserType;

/// Creates the configured staff account when it does not exist yet.
pub async fn ensure_bootstrap_staff(ctx: &AppContext) -> anyhow::Result<()> {
    let Some(staff) = ctx.cfg.bootstrap_staff.as_ref() else {
        return Ok(());
    };
    let repo = ctx.user_repo();
    if let Some(existing) = repo.find_by_username(&staff.username).await? {
        if existing.user_type != UserType::Staff {
            tracing::warn!(username = %staff.username, "bootstrap_staff_username_taken_by_student");
        }
        return Ok(());
    }
    let uc = Register {
        repo: repo.as_ref(),
    };
    let user = uc
        .execute(&RegisterRequest {
            username: staff.username.clone(),
            name: staff.name.clone(),
            password: staff.password.clone(),
            user_type: UserType::Staff,
        })
        .await?;
    tracing::info!(user_id = user.id, username = %user.username, "bootstrap_staff_created");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bootstrap::app_context::AppServices;
    use crate::bootstrap::config::Config;

    fn ctx(pairs: &[(&str, &str)]) -> AppContext {
        let cfg = Config::from_lookup(|k| {
            pairs
                .iter()
                .find(|(key, _)| *key == k)
                .map(|(_, v)| v.to_string())
        })
        .unwrap();
        AppContext::new(cfg, AppServices::in_memory())
    }

    #[tokio::test]
    async fn creates_staff_once() {
        let ctx = ctx(&[
            ("BOOTSTRAP_STAFF_USERNAME", "head_teacher"),
            ("BOOTSTRAP_STAFF_PASSWORD", "changeme"),
            ("BOOTSTRAP_STAFF_NAME", "Head Teacher"),
        ]);
        ensure_bootstrap_staff(&ctx).await.unwrap();
        ensure_bootstrap_staff(&ctx).await.unwrap();
        let users = ctx.user_repo().list_users().await.unwrap();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].user_type, UserType::Staff);
        assert_eq!(users[0].name, "Head Teacher");
    }

    #[tokio::test]
    async fn noop_without_config() {
        let ctx = ctx(&[]);
        ensure_bootstrap_staff(&ctx).await.unwrap();
        assert!(ctx.user_repo().list_users().await.unwrap().is_empty());
    }
}
