//! Startup creation of the administrator account.

use folio_db::models::admin::CreateAdmin;
use folio_db::AdminStore;

use crate::auth::password;
use crate::config::AdminCredentials;
use crate::error::AppResult;

/// Create the configured admin if no account with that username exists.
///
/// Returns `true` when an account was created. An existing account is left
/// untouched, including its password.
pub async fn ensure_admin<S>(store: &S, credentials: &AdminCredentials) -> AppResult<bool>
where
    S: AdminStore + ?Sized,
{
    if store
        .find_admin_by_username(&credentials.username)
        .await?
        .is_some()
    {
        tracing::debug!(username = %credentials.username, "Admin account already exists");
        return Ok(false);
    }

    password::check_length(&credentials.password)?;
    let password_hash = password::hash(&credentials.password)?;

    let admin = store
        .create_admin(&CreateAdmin {
            username: credentials.username.clone(),
            password_hash,
        })
        .await?;

    tracing::info!(admin_id = admin.id, username = %admin.username, "Admin account created");
    Ok(true)
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use folio_db::MemoryStore;

    use folio_core::error::CoreError;

    use super::*;
    use crate::error::AppError;

    fn creds(password: &str) -> AdminCredentials {
        AdminCredentials {
            username: "owner".into(),
            password: password.into(),
        }
    }

    #[tokio::test]
    async fn creates_admin_once() {
        let store = MemoryStore::new();

        assert!(ensure_admin(&store, &creds("first-password")).await.unwrap());
        assert!(!ensure_admin(&store, &creds("second-password")).await.unwrap());

        let admin = store.find_admin_by_username("owner").await.unwrap().unwrap();
        assert!(password::matches("first-password", &admin.password_hash).unwrap());
    }

    #[tokio::test]
    async fn rejects_short_password() {
        let store = MemoryStore::new();
        let err = ensure_admin(&store, &creds("short")).await.unwrap_err();
        assert_matches!(err, AppError::Core(CoreError::Validation(_)));
        assert!(store.find_admin_by_username("owner").await.unwrap().is_none());
    }
}
