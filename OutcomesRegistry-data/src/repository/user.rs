use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::database::DatabasePool;
use crate::models::user::{Profile, UserRoleRecord};
use super::errors::RepositoryError;
use super::in_memory::InMemoryStorage;
use super::resolve_pool;
use super::storage::DatabaseStorage;

/// Repository trait for user roles and profiles
#[async_trait]
pub trait UserRepositoryTrait: Send + Sync {
    /// Role names held by the user, oldest grant first
    async fn get_roles(&self, user_id: &str) -> Result<Vec<String>, RepositoryError>;

    /// Grant a role; granting twice keeps the original row
    async fn assign_role(&self, user_id: &str, role: &str) -> Result<UserRoleRecord, RepositoryError>;

    /// Get a profile by user id
    async fn get_profile(&self, user_id: &str) -> Result<Option<Profile>, RepositoryError>;

    /// Insert or replace a profile
    async fn save_profile(&self, profile: Profile) -> Result<Profile, RepositoryError>;
}

/// User repository
#[derive(Debug, Clone, Default)]
pub struct UserRepository {
    pool: Option<DatabasePool>,
    roles: InMemoryStorage<UserRoleRecord>,
    profiles: InMemoryStorage<Profile>,
}

impl UserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_pool(pool: DatabasePool) -> Self {
        Self {
            pool: Some(pool),
            ..Self::default()
        }
    }
}

#[async_trait]
impl UserRepositoryTrait for UserRepository {
    async fn get_roles(&self, user_id: &str) -> Result<Vec<String>, RepositoryError> {
        match resolve_pool(&self.pool) {
            Some(pool) => DatabaseStorage::get_roles_for_user(&pool, user_id),
            None => {
                let mut records = self.roles.filter(|r| r.user_id == user_id)?;
                records.sort_by(|a, b| a.created_at.cmp(&b.created_at));
                Ok(records.into_iter().map(|r| r.role).collect())
            }
        }
    }

    async fn assign_role(&self, user_id: &str, role: &str) -> Result<UserRoleRecord, RepositoryError> {
        if role.trim().is_empty() {
            return Err(RepositoryError::Validation("invalid role: empty".to_string()));
        }

        let record = UserRoleRecord {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            role: role.to_string(),
            created_at: Utc::now().to_rfc3339(),
        };

        match resolve_pool(&self.pool) {
            Some(pool) => DatabaseStorage::insert_user_role(&pool, &record),
            None => {
                if let Some(existing) = self.roles.find(|r| r.user_id == user_id && r.role == role)? {
                    return Ok(existing);
                }
                self.roles.insert(&record.id, record.clone())
            }
        }
    }

    async fn get_profile(&self, user_id: &str) -> Result<Option<Profile>, RepositoryError> {
        match resolve_pool(&self.pool) {
            Some(pool) => DatabaseStorage::get_profile(&pool, user_id),
            None => self.profiles.get(user_id),
        }
    }

    async fn save_profile(&self, profile: Profile) -> Result<Profile, RepositoryError> {
        match resolve_pool(&self.pool) {
            Some(pool) => {
                DatabaseStorage::upsert_profile(&pool, &profile)?;
                Ok(profile)
            },
            None => self.profiles.insert(&profile.id.clone(), profile),
        }
    }
}
