//! # User Repository
//!
//! Accounts mirrored from the identity provider, and their role.

use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::DbResult;
use market_core::{User, UserRole};

#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        UserRepository { pool }
    }

    /// Creates a user. New users are always buyers.
    pub async fn create(&self, name: Option<&str>, email: Option<&str>) -> DbResult<User> {
        let id = Uuid::new_v4().to_string();

        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (id, name, email)
            VALUES (?1, ?2, ?3)
            RETURNING id, name, email, role, created_at
            "#,
        )
        .bind(&id)
        .bind(name)
        .bind(email)
        .fetch_one(&self.pool)
        .await?;

        debug!(user_id = %user.id, "User created");
        Ok(user)
    }

    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, name, email, role, created_at FROM users WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Role of `user_id`. Unknown users are treated as buyers.
    pub async fn role_of(&self, user_id: &str) -> DbResult<UserRole> {
        let role: Option<UserRole> = sqlx::query_scalar("SELECT role FROM users WHERE id = ?1")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(role.unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use crate::repository::fixtures;
    use market_core::UserRole;

    #[tokio::test]
    async fn test_new_user_is_buyer() {
        let db = fixtures::database().await;
        let user = db
            .users()
            .create(Some("Ada"), Some("ada@example.com"))
            .await
            .unwrap();

        assert_eq!(user.role, UserRole::Buyer);
        assert_eq!(db.users().role_of(&user.id).await.unwrap(), UserRole::Buyer);

        let found = db.users().get_by_id(&user.id).await.unwrap().unwrap();
        assert_eq!(found.email.as_deref(), Some("ada@example.com"));
    }

    #[tokio::test]
    async fn test_unknown_user_defaults_to_buyer() {
        let db = fixtures::database().await;
        assert_eq!(db.users().role_of("nobody").await.unwrap(), UserRole::Buyer);
        assert!(db.users().get_by_id("nobody").await.unwrap().is_none());
    }
}
