//! Repository trait definitions for data access abstraction.
//!
//! All repository operations are async and cancellable by dropping
//! the returned future; no repository retries on its own.

use uuid::Uuid;

use crate::error::AppResult;
use crate::models::{
    session::{CreateSession, Session},
    user::{CreateUser, UpdateUser, User},
};

pub trait UserRepository: Send + Sync {
    fn create(&self, input: CreateUser) -> impl Future<Output = AppResult<User>> + Send;
    fn get_by_id(&self, id: Uuid) -> impl Future<Output = AppResult<User>> + Send;
    fn get_by_email(&self, email: &str) -> impl Future<Output = AppResult<User>> + Send;
    fn get_by_username(&self, username: &str) -> impl Future<Output = AppResult<User>> + Send;
    fn update(&self, id: Uuid, input: UpdateUser) -> impl Future<Output = AppResult<User>> + Send;
    fn delete(&self, id: Uuid) -> impl Future<Output = AppResult<()>> + Send;
}

/// Session store contract.
///
/// The store enforces uniqueness of `session_token` and must provide
/// read-your-writes consistency per token/id. `delete_by_id` is
/// atomic with respect to concurrent callers and succeeds when the
/// row is already absent — revocation is idempotent.
pub trait SessionRepository: Send + Sync {
    fn create(&self, input: CreateSession) -> impl Future<Output = AppResult<Session>> + Send;
    fn get_by_id(&self, id: Uuid) -> impl Future<Output = AppResult<Session>> + Send;
    fn get_by_token(&self, token: &str) -> impl Future<Output = AppResult<Session>> + Send;
    fn delete_by_id(&self, id: Uuid) -> impl Future<Output = AppResult<()>> + Send;
    /// Returns the number of sessions deleted.
    fn delete_all_for_user(&self, user_id: Uuid) -> impl Future<Output = AppResult<u64>> + Send;
    /// Deletes rows past their `expires_at`. Storage hygiene only —
    /// expired rows already fail validation without being swept.
    fn delete_expired(&self) -> impl Future<Output = AppResult<u64>> + Send;
}
