//! Self-registration, simulated email verification, login and own-password change

use crate::auth::{Passwords, SessionUser};
use crate::storage::Store;
use crate::utils::validation::{
    MAX_NAME_LEN, validate_email, validate_password, validate_required_text,
};
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{Account, RegisterForm, Role};
use shared::util::normalize_email;

/// Create an unverified User account
///
/// Returns the stored (normalized) email, which becomes the pending
/// verification email.
pub fn register(store: &mut Store, passwords: &Passwords, form: &RegisterForm) -> AppResult<String> {
    let first_name = form.first_name.trim();
    let last_name = form.last_name.trim();
    let email = normalize_email(&form.email);

    validate_required_text(first_name, "First name", MAX_NAME_LEN)?;
    validate_required_text(last_name, "Last name", MAX_NAME_LEN)?;
    validate_email(&email)?;
    validate_password(&form.password)?;

    if store.email_taken(&email, None) {
        return Err(AppError::new(ErrorCode::EmailAlreadyRegistered).with_detail("email", email));
    }

    let password_hash = passwords.hash(&form.password)?;
    let id = store.next_id.account();
    store.accounts.push(Account {
        id,
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
        email: email.clone(),
        password_hash,
        role: Role::User,
        verified: false,
    });

    tracing::info!(account_id = id, email = %email, "Account registered, awaiting verification");
    Ok(email)
}

/// Mark the account registered under `email` as verified
pub fn verify(store: &mut Store, email: &str) -> AppResult<()> {
    let account = store
        .accounts
        .iter_mut()
        .find(|a| a.email == email)
        .ok_or_else(|| AppError::new(ErrorCode::AccountNotFound).with_detail("email", email))?;
    account.verified = true;
    tracing::info!(account_id = account.id, "Email verified");
    Ok(())
}

/// Check login credentials
///
/// Unknown email, wrong password and unverified account all produce the
/// same [`ErrorCode::InvalidCredentials`] error.
pub fn authenticate(
    store: &Store,
    passwords: &Passwords,
    email: &str,
    password: &str,
) -> AppResult<SessionUser> {
    let email = normalize_email(email);
    let account = store
        .account_by_email(&email)
        .filter(|a| a.verified && passwords.verify(password, &a.password_hash));

    match account {
        Some(account) => Ok(SessionUser::from(account)),
        None => {
            tracing::info!(email = %email, "Login rejected");
            Err(AppError::invalid_credentials())
        }
    }
}

/// Change the signed-in user's own password
pub fn change_password(
    store: &mut Store,
    passwords: &Passwords,
    user_id: i64,
    current: &str,
    new_password: &str,
) -> AppResult<()> {
    let account = store
        .account(user_id)
        .ok_or_else(|| AppError::new(ErrorCode::AccountNotFound))?;
    if !passwords.verify(current, &account.password_hash) {
        return Err(AppError::new(ErrorCode::CurrentPasswordMismatch));
    }
    validate_password(new_password)?;

    let password_hash = passwords.hash(new_password)?;
    if let Some(account) = store.account_mut(user_id) {
        account.password_hash = password_hash;
    }
    tracing::info!(account_id = user_id, "Password changed from profile");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::test_support::seeded;
    use crate::storage::{SEED_ADMIN_EMAIL, SEED_ADMIN_PASSWORD};

    fn form(email: &str, password: &str) -> RegisterForm {
        RegisterForm {
            first_name: " Ada ".into(),
            last_name: "Lovelace".into(),
            email: email.into(),
            password: password.into(),
        }
    }

    #[test]
    fn test_register_creates_unverified_user() {
        let (mut store, passwords) = seeded();
        let email = register(&mut store, &passwords, &form(" Ada@Example.com ", "secret1")).unwrap();
        assert_eq!(email, "ada@example.com");

        let account = store.account_by_email("ada@example.com").unwrap();
        assert_eq!(account.id, 2);
        assert_eq!(account.first_name, "Ada");
        assert_eq!(account.role, Role::User);
        assert!(!account.verified);
        assert_ne!(account.password_hash, "secret1");
        assert_eq!(store.next_id.account, 3);
    }

    #[test]
    fn test_register_duplicate_normalized_email() {
        let (mut store, passwords) = seeded();
        register(&mut store, &passwords, &form("ada@example.com", "secret1")).unwrap();
        let before = store.clone();

        let err = register(&mut store, &passwords, &form("ADA@example.com  ", "other-pass"))
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::EmailAlreadyRegistered);
        assert_eq!(store, before);
    }

    #[test]
    fn test_register_short_password_not_persisted() {
        let (mut store, passwords) = seeded();
        let err = register(&mut store, &passwords, &form("bob@example.com", "12345")).unwrap_err();
        assert_eq!(err.code, ErrorCode::PasswordTooShort);
        assert!(store.account_by_email("bob@example.com").is_none());
        assert_eq!(store.next_id.account, 2);
    }

    #[test]
    fn test_register_requires_names() {
        let (mut store, passwords) = seeded();
        let mut f = form("bob@example.com", "secret1");
        f.first_name = "   ".into();
        let err = register(&mut store, &passwords, &f).unwrap_err();
        assert_eq!(err.code, ErrorCode::RequiredField);
    }

    #[test]
    fn test_login_matrix() {
        let (mut store, passwords) = seeded();
        register(&mut store, &passwords, &form("ada@example.com", "secret1")).unwrap();

        // Unverified
        let err = authenticate(&store, &passwords, "ada@example.com", "secret1").unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidCredentials);

        verify(&mut store, "ada@example.com").unwrap();
        let user = authenticate(&store, &passwords, "  ADA@example.COM", "secret1").unwrap();
        assert_eq!(user.email, "ada@example.com");

        // Password is case-sensitive
        let wrong = authenticate(&store, &passwords, "ada@example.com", "SECRET1").unwrap_err();
        let unknown = authenticate(&store, &passwords, "nobody@example.com", "secret1").unwrap_err();
        assert_eq!(wrong.message, unknown.message);
        assert_eq!(wrong.code, ErrorCode::InvalidCredentials);
    }

    #[test]
    fn test_seed_admin_login() {
        let (store, passwords) = seeded();
        let user = authenticate(&store, &passwords, SEED_ADMIN_EMAIL, SEED_ADMIN_PASSWORD).unwrap();
        assert!(user.is_admin());
        assert_eq!(user.id, 1);
    }

    #[test]
    fn test_verify_unknown_email() {
        let (mut store, _) = seeded();
        let err = verify(&mut store, "ghost@example.com").unwrap_err();
        assert_eq!(err.code, ErrorCode::AccountNotFound);
    }

    #[test]
    fn test_change_password() {
        let (mut store, passwords) = seeded();
        let err = change_password(&mut store, &passwords, 1, "wrong", "newpass1").unwrap_err();
        assert_eq!(err.code, ErrorCode::CurrentPasswordMismatch);

        let err =
            change_password(&mut store, &passwords, 1, SEED_ADMIN_PASSWORD, "123").unwrap_err();
        assert_eq!(err.code, ErrorCode::PasswordTooShort);

        change_password(&mut store, &passwords, 1, SEED_ADMIN_PASSWORD, "newpass1").unwrap();
        assert!(authenticate(&store, &passwords, SEED_ADMIN_EMAIL, "newpass1").is_ok());
        assert!(authenticate(&store, &passwords, SEED_ADMIN_EMAIL, SEED_ADMIN_PASSWORD).is_err());
    }
}
