//! Admin account management

use crate::auth::Passwords;
use crate::storage::Store;
use crate::utils::validation::{
    MAX_NAME_LEN, validate_email, validate_password, validate_required_text,
};
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{Account, AccountForm};
use shared::util::normalize_email;

/// Create or update an account depending on `form.edit_id`
///
/// Add mode requires a password of at least 6 characters. Edit mode keeps
/// the stored password when the field is blank. The email must be unique
/// across all other accounts in both modes.
pub fn save(store: &mut Store, passwords: &Passwords, form: &AccountForm) -> AppResult<Account> {
    let first_name = form.first_name.trim();
    let last_name = form.last_name.trim();
    let email = normalize_email(&form.email);

    validate_required_text(first_name, "First name", MAX_NAME_LEN)?;
    validate_required_text(last_name, "Last name", MAX_NAME_LEN)?;
    validate_email(&email)?;

    match form.edit_id {
        Some(id) => {
            if store.account(id).is_none() {
                return Err(AppError::new(ErrorCode::AccountNotFound).with_detail("id", id));
            }
            if store.email_taken(&email, Some(id)) {
                return Err(AppError::new(ErrorCode::EmailInUse).with_detail("email", email));
            }
            let password_hash = if form.password.is_empty() {
                None
            } else {
                validate_password(&form.password)?;
                Some(passwords.hash(&form.password)?)
            };

            let account = store
                .account_mut(id)
                .ok_or_else(|| AppError::new(ErrorCode::AccountNotFound))?;
            account.first_name = first_name.to_string();
            account.last_name = last_name.to_string();
            account.email = email;
            account.role = form.role;
            account.verified = form.verified;
            if let Some(hash) = password_hash {
                account.password_hash = hash;
            }
            tracing::info!(account_id = id, "Account updated");
            Ok(account.clone())
        }
        None => {
            validate_password(&form.password)?;
            if store.email_taken(&email, None) {
                return Err(AppError::new(ErrorCode::EmailInUse).with_detail("email", email));
            }
            let account = Account {
                id: store.next_id.account(),
                first_name: first_name.to_string(),
                last_name: last_name.to_string(),
                email,
                password_hash: passwords.hash(&form.password)?,
                role: form.role,
                verified: form.verified,
            };
            tracing::info!(account_id = account.id, role = %account.role, "Account created");
            store.accounts.push(account.clone());
            Ok(account)
        }
    }
}

/// Reject an action the signed-in user may not perform on their own account
pub fn guard_not_self(id: i64, actor_id: Option<i64>, code: ErrorCode) -> AppResult<()> {
    if actor_id == Some(id) {
        return Err(AppError::new(code));
    }
    Ok(())
}

/// Set a new password on someone else's account
pub fn reset_password(
    store: &mut Store,
    passwords: &Passwords,
    id: i64,
    actor_id: Option<i64>,
    new_password: &str,
) -> AppResult<()> {
    guard_not_self(id, actor_id, ErrorCode::CannotResetOwnPassword)?;
    validate_password(new_password)?;
    if store.account(id).is_none() {
        return Err(AppError::new(ErrorCode::AccountNotFound).with_detail("id", id));
    }

    let password_hash = passwords.hash(new_password)?;
    if let Some(account) = store.account_mut(id) {
        account.password_hash = password_hash;
    }
    tracing::info!(account_id = id, "Password reset by admin");
    Ok(())
}

/// Remove one account. Employees linked to it are left as they are.
pub fn delete(store: &mut Store, id: i64, actor_id: Option<i64>) -> AppResult<Account> {
    guard_not_self(id, actor_id, ErrorCode::CannotDeleteSelf)?;
    let index = store
        .accounts
        .iter()
        .position(|a| a.id == id)
        .ok_or_else(|| AppError::new(ErrorCode::AccountNotFound).with_detail("id", id))?;
    let removed = store.accounts.remove(index);
    tracing::info!(account_id = id, "Account deleted");
    Ok(removed)
}
