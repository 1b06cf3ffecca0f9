//! Application controller
//!
//! [`App`] owns every piece of runtime state and runs the
//! read → validate → mutate → save → re-render loop. Each handler either
//! completes fully (store saved, page re-rendered, success toast queued)
//! or leaves the store as it was and queues one error toast.
//!
//! # State
//!
//! | Field | Meaning |
//! |-------|---------|
//! | local | persistent key-value slots (store, session token, pending email) |
//! | session | process-lifetime slots (just-verified flag) |
//! | store | every entity collection and id counter |
//! | auth | the signed-in user |
//! | route / page | what is currently shown |
//! | request_form | the item-request form, kept across re-renders |

use crate::auth::{AuthState, Passwords, Presentation, SessionUser};
use crate::core::Config;
use crate::router::{Resolution, Route, Router};
use crate::services::{accounts, departments, employees, registration, requests};
use crate::storage::{
    AUTH_TOKEN_KEY, JUST_VERIFIED_KEY, KvStore, MemoryKv, PENDING_EMAIL_KEY, Store,
};
use crate::toast::{ToastKind, Toasts};
use crate::views::{self, Page};
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{
    Account, AccountForm, Department, DepartmentForm, Employee, EmployeeForm, RegisterForm,
    Request, RequestForm,
};
use std::time::Duration;

/// Confirmation and free-text input during a handler
pub trait Prompter {
    /// Ask a yes/no question
    fn confirm(&mut self, message: &str) -> bool;

    /// Ask for a line of text; `None` when the user backs out
    fn prompt(&mut self, message: &str) -> Option<String>;
}

pub struct App {
    config: Config,
    local: Box<dyn KvStore>,
    session: MemoryKv,
    store: Store,
    auth: AuthState,
    router: Router,
    passwords: Passwords,
    toasts: Toasts,
    route: Route,
    page: Page,
    request_form: RequestForm,
}

impl App {
    /// Load the store, restore the session and show Home
    pub fn start(config: Config, local: Box<dyn KvStore>) -> AppResult<Self> {
        let passwords = Passwords::new(config.argon2_memory_kib, config.argon2_iterations)?;
        Self::start_with(config, local, passwords)
    }

    /// Same as [`App::start`] with an explicit hashing profile
    pub fn start_with(
        config: Config,
        local: Box<dyn KvStore>,
        passwords: Passwords,
    ) -> AppResult<Self> {
        let store = Store::load(local.as_ref(), &passwords)?;
        let mut app = Self {
            router: Router::new(config.strict_admin_routes),
            toasts: Toasts::new(Duration::from_millis(config.toast_ttl_ms)),
            config,
            local,
            session: MemoryKv::new(),
            store,
            auth: AuthState::default(),
            passwords,
            route: Route::Home,
            page: views::render_home(None),
            request_form: RequestForm::default(),
        };
        app.restore_session();
        app.navigate("")?;
        tracing::info!(
            accounts = app.store.accounts.len(),
            authenticated = app.auth.is_authenticated(),
            strict_admin = app.router.is_strict(),
            "Portal started"
        );
        Ok(app)
    }

    // ========== Accessors ==========

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn auth(&self) -> &AuthState {
        &self.auth
    }

    pub fn presentation(&self) -> Presentation {
        self.auth.presentation()
    }

    pub fn route(&self) -> Route {
        self.route
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn toasts(&mut self) -> &mut Toasts {
        &mut self.toasts
    }

    pub fn request_form(&self) -> &RequestForm {
        &self.request_form
    }

    pub fn request_form_mut(&mut self) -> &mut RequestForm {
        &mut self.request_form
    }

    /// Email waiting for verification, if any
    pub fn pending_email(&self) -> AppResult<Option<String>> {
        self.local.get(PENDING_EMAIL_KEY)
    }

    // ========== Session ==========

    /// Resolve the stored token to a verified account
    ///
    /// A token that no longer matches one is dropped without a message.
    pub fn restore_session(&mut self) {
        let token = match self.local.get(AUTH_TOKEN_KEY) {
            Ok(token) => token,
            Err(e) => {
                tracing::warn!(error = %e, "Session token unreadable");
                None
            }
        };
        let Some(token) = token else {
            self.auth.set_session(None);
            return;
        };

        let user = self
            .store
            .account_by_email(&token)
            .filter(|a| a.verified)
            .map(SessionUser::from);
        if user.is_none() {
            tracing::debug!("Discarding stale session token");
            if let Err(e) = self.local.remove(AUTH_TOKEN_KEY) {
                tracing::warn!(error = %e, "Failed to discard session token");
            }
        }
        self.auth.set_session(user);
    }

    // ========== Navigation ==========

    /// Show the page for `fragment`, following at most one redirect
    pub fn navigate(&mut self, fragment: &str) -> AppResult<()> {
        let requested = Route::from_fragment(fragment);
        let route = match self.router.resolve(requested, self.auth.user()) {
            Resolution::Render(route) => route,
            Resolution::Redirect(target) => {
                tracing::debug!(from = %requested, to = %target, "Redirect");
                target
            }
        };

        let just_verified =
            route == Route::Login && self.session.take(JUST_VERIFIED_KEY)?.is_some();
        self.page = self.render(route, just_verified)?;
        self.route = route;
        Ok(())
    }

    /// Re-render the current page from the current state
    pub fn refresh(&mut self) -> AppResult<()> {
        self.page = self.render(self.route, false)?;
        Ok(())
    }

    fn render(&self, route: Route, just_verified: bool) -> AppResult<Page> {
        let user = self.auth.user();
        let page = match (route, user) {
            (Route::Home, _) => views::render_home(user),
            (Route::Register, _) => views::render_register(),
            (Route::VerifyEmail, _) => {
                views::render_verify_email(self.local.get(PENDING_EMAIL_KEY)?.as_deref())
            }
            (Route::Login, _) => views::render_login(just_verified),
            (Route::Profile, Some(u)) => views::render_profile(u),
            (Route::Requests, Some(u)) => views::render_requests(&self.store, u),
            (Route::Profile | Route::Requests, None) => views::render_login(false),
            (Route::Accounts, _) => views::render_accounts(&self.store),
            (Route::Departments, _) => views::render_departments(&self.store),
            (Route::Employees, _) => views::render_employees(&self.store),
        };
        Ok(page)
    }

    // ========== Plumbing ==========

    /// Run a store mutation and persist it
    ///
    /// On a save failure the in-memory store is put back as it was.
    fn mutate<T>(
        &mut self,
        op: impl FnOnce(&mut Store, &Passwords) -> AppResult<T>,
    ) -> AppResult<T> {
        let before = self.store.clone();
        let value = op(&mut self.store, &self.passwords)?;
        if let Err(e) = self.store.save(self.local.as_mut()) {
            tracing::error!(error = %e, "Store save failed, changes discarded");
            self.store = before;
            return Err(e);
        }
        Ok(value)
    }

    /// Turn a failed handler into a toast; cancellations stay silent
    fn report<T>(&mut self, result: AppResult<T>) -> AppResult<T> {
        if let Err(e) = &result {
            if e.is_cancelled() {
                return result;
            }
            tracing::info!(code = %e.code, message = %e.message, "Operation rejected");
            self.toasts.push(ToastKind::for_error(e), e.message.clone());
        }
        result
    }

    fn session_user(&self) -> AppResult<SessionUser> {
        self.auth.user().cloned().ok_or_else(AppError::not_authenticated)
    }

    /// Check that the session may use the page behind `route`, toasting if not
    ///
    /// The console calls this before it asks for form fields.
    pub fn authorize(&mut self, route: Route) -> AppResult<()> {
        let result = self.require_access(route);
        self.report(result)
    }

    /// Reject actions behind a page the current session may not open
    fn require_access(&self, route: Route) -> AppResult<()> {
        match self.router.resolve(route, self.auth.user()) {
            Resolution::Render(_) => Ok(()),
            Resolution::Redirect(_) if self.auth.is_authenticated() => {
                Err(AppError::new(ErrorCode::AdminRequired))
            }
            Resolution::Redirect(_) => Err(AppError::not_authenticated()),
        }
    }

    // ========== Registration / verification / login ==========

    pub fn register(&mut self, form: &RegisterForm) -> AppResult<String> {
        let result = self.try_register(form);
        self.report(result)
    }

    fn try_register(&mut self, form: &RegisterForm) -> AppResult<String> {
        // Pending slot first; put back as it was if the account is not stored
        let previous = self.local.get(PENDING_EMAIL_KEY)?;
        self.local
            .set(PENDING_EMAIL_KEY, &shared::util::normalize_email(&form.email))?;
        let email = match self
            .mutate(|store, passwords| registration::register(store, passwords, form))
        {
            Ok(email) => email,
            Err(e) => {
                let restored = match previous {
                    Some(pending) => self.local.set(PENDING_EMAIL_KEY, &pending),
                    None => self.local.remove(PENDING_EMAIL_KEY),
                };
                if let Err(restore_err) = restored {
                    tracing::error!(error = %restore_err, "Failed to restore pending email");
                }
                return Err(e);
            }
        };
        self.toasts
            .success("Registration successful. Please verify your email.");
        self.navigate(&Route::VerifyEmail.fragment())?;
        Ok(email)
    }

    /// Simulated click on the emailed verification link
    ///
    /// Without a pending email this only navigates to Register.
    pub fn verify(&mut self) -> AppResult<()> {
        let result = self.try_verify();
        self.report(result)
    }

    fn try_verify(&mut self) -> AppResult<()> {
        let Some(email) = self.local.get(PENDING_EMAIL_KEY)? else {
            self.navigate(&Route::Register.fragment())?;
            return Err(AppError::new(ErrorCode::NoPendingVerification));
        };
        self.mutate(|store, _| registration::verify(store, &email))?;
        self.local.remove(PENDING_EMAIL_KEY)?;
        self.session.set(JUST_VERIFIED_KEY, "1")?;
        self.toasts.success("Email verified successfully!");
        self.navigate(&Route::Login.fragment())
    }

    pub fn login(&mut self, email: &str, password: &str) -> AppResult<()> {
        let result = self.try_login(email, password);
        self.report(result)
    }

    fn try_login(&mut self, email: &str, password: &str) -> AppResult<()> {
        let user = registration::authenticate(&self.store, &self.passwords, email, password)?;
        self.local.set(AUTH_TOKEN_KEY, &user.email)?;
        self.auth.set_session(Some(user));
        self.toasts.success("Login successful!");
        self.navigate(&Route::Profile.fragment())
    }

    pub fn logout(&mut self) -> AppResult<()> {
        self.local.remove(AUTH_TOKEN_KEY)?;
        self.auth.set_session(None);
        self.request_form.reset();
        self.toasts.info("Logged out.");
        self.navigate(&Route::Home.fragment())
    }

    pub fn change_password(&mut self, current: &str, new_password: &str) -> AppResult<()> {
        let result = self.try_change_password(current, new_password);
        self.report(result)
    }

    fn try_change_password(&mut self, current: &str, new_password: &str) -> AppResult<()> {
        let user = self.session_user()?;
        self.mutate(|store, passwords| {
            registration::change_password(store, passwords, user.id, current, new_password)
        })?;
        self.toasts.success("Password updated.");
        self.refresh()
    }

    // ========== Accounts ==========

    pub fn save_account(&mut self, form: &AccountForm) -> AppResult<Account> {
        let result = self.try_save_account(form);
        self.report(result)
    }

    fn try_save_account(&mut self, form: &AccountForm) -> AppResult<Account> {
        self.require_access(Route::Accounts)?;
        let account = self.mutate(|store, passwords| accounts::save(store, passwords, form))?;
        if self.auth.user_id() == Some(account.id) {
            self.local.set(AUTH_TOKEN_KEY, &account.email)?;
            self.auth.set_session(Some(SessionUser::from(&account)));
        }
        self.toasts.success(if form.is_edit() {
            "Account updated."
        } else {
            "Account added."
        });
        self.refresh()?;
        Ok(account)
    }

    /// Reset another account's password
    ///
    /// Targeting the signed-in account sends the user to Profile instead.
    pub fn reset_password(&mut self, id: i64, prompter: &mut dyn Prompter) -> AppResult<()> {
        let result = self.try_reset_password(id, prompter);
        self.report(result)
    }

    fn try_reset_password(&mut self, id: i64, prompter: &mut dyn Prompter) -> AppResult<()> {
        self.require_access(Route::Accounts)?;
        let actor = self.auth.user_id();
        if let Err(e) = accounts::guard_not_self(id, actor, ErrorCode::CannotResetOwnPassword) {
            self.navigate(&Route::Profile.fragment())?;
            return Err(e);
        }
        let email = self
            .store
            .account(id)
            .map(|a| a.email.clone())
            .ok_or_else(|| AppError::new(ErrorCode::AccountNotFound).with_detail("id", id))?;
        let new_password = prompter
            .prompt(&format!("New password for {email}:"))
            .ok_or_else(AppError::cancelled)?;

        self.mutate(|store, passwords| {
            accounts::reset_password(store, passwords, id, actor, &new_password)
        })?;
        self.toasts.success("Password reset.");
        self.refresh()
    }

    pub fn delete_account(&mut self, id: i64, prompter: &mut dyn Prompter) -> AppResult<Account> {
        let result = self.try_delete_account(id, prompter);
        self.report(result)
    }

    fn try_delete_account(&mut self, id: i64, prompter: &mut dyn Prompter) -> AppResult<Account> {
        self.require_access(Route::Accounts)?;
        let actor = self.auth.user_id();
        accounts::guard_not_self(id, actor, ErrorCode::CannotDeleteSelf)?;
        if !prompter.confirm("Delete this account?") {
            return Err(AppError::cancelled());
        }
        let removed = self.mutate(|store, _| accounts::delete(store, id, actor))?;
        self.toasts.success("Account deleted.");
        self.refresh()?;
        Ok(removed)
    }

    // ========== Departments ==========

    pub fn save_department(&mut self, form: &DepartmentForm) -> AppResult<Department> {
        let result = self.try_save_department(form);
        self.report(result)
    }

    fn try_save_department(&mut self, form: &DepartmentForm) -> AppResult<Department> {
        self.require_access(Route::Departments)?;
        let dept = self.mutate(|store, _| departments::save(store, form))?;
        self.toasts.success("Department saved.");
        self.refresh()?;
        Ok(dept)
    }

    pub fn delete_department(
        &mut self,
        id: i64,
        prompter: &mut dyn Prompter,
    ) -> AppResult<Department> {
        let result = self.try_delete_department(id, prompter);
        self.report(result)
    }

    fn try_delete_department(
        &mut self,
        id: i64,
        prompter: &mut dyn Prompter,
    ) -> AppResult<Department> {
        self.require_access(Route::Departments)?;
        if !prompter.confirm("Delete this department?") {
            return Err(AppError::cancelled());
        }
        let removed = self.mutate(|store, _| departments::delete(store, id))?;
        self.toasts.success("Department deleted.");
        self.refresh()?;
        Ok(removed)
    }

    // ========== Employees ==========

    pub fn save_employee(&mut self, form: &EmployeeForm) -> AppResult<Employee> {
        let result = self.try_save_employee(form);
        self.report(result)
    }

    fn try_save_employee(&mut self, form: &EmployeeForm) -> AppResult<Employee> {
        self.require_access(Route::Employees)?;
        let employee = self.mutate(|store, _| employees::save(store, form))?;
        self.toasts.success("Employee saved.");
        self.refresh()?;
        Ok(employee)
    }

    pub fn delete_employee(&mut self, id: i64, prompter: &mut dyn Prompter) -> AppResult<Employee> {
        let result = self.try_delete_employee(id, prompter);
        self.report(result)
    }

    fn try_delete_employee(&mut self, id: i64, prompter: &mut dyn Prompter) -> AppResult<Employee> {
        self.require_access(Route::Employees)?;
        if !prompter.confirm("Delete this employee?") {
            return Err(AppError::cancelled());
        }
        let removed = self.mutate(|store, _| employees::delete(store, id))?;
        self.toasts.success("Employee deleted.");
        self.refresh()?;
        Ok(removed)
    }

    // ========== Requests ==========

    /// Submit the current request form as the signed-in user
    ///
    /// The form is cleared only when the request is stored.
    pub fn submit_request(&mut self) -> AppResult<Request> {
        let result = self.try_submit_request();
        self.report(result)
    }

    fn try_submit_request(&mut self) -> AppResult<Request> {
        let user = self.session_user()?;
        let form = self.request_form.clone();
        let request = self.mutate(|store, _| {
            requests::submit(store, &user.email, &form, shared::util::today())
        })?;
        self.request_form.reset();
        self.toasts.success("Request submitted.");
        self.refresh()?;
        Ok(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{SEED_ADMIN_EMAIL, SEED_ADMIN_PASSWORD, STORE_KEY};
    use crate::toast::Toast;

    /// Memory storage whose writes to one key always fail
    struct FailingKv {
        inner: MemoryKv,
        fail_key: &'static str,
    }

    impl KvStore for FailingKv {
        fn get(&self, key: &str) -> AppResult<Option<String>> {
            self.inner.get(key)
        }

        fn set(&mut self, key: &str, value: &str) -> AppResult<()> {
            if key == self.fail_key {
                return Err(AppError::database("disk full"));
            }
            self.inner.set(key, value)
        }

        fn remove(&mut self, key: &str) -> AppResult<()> {
            self.inner.remove(key)
        }
    }

    fn failing_app(fail_key: &'static str) -> App {
        App::start_with(
            Config::for_test("/tmp/portal-unit"),
            Box::new(FailingKv {
                inner: MemoryKv::new(),
                fail_key,
            }),
            Passwords::fast(),
        )
        .unwrap()
    }

    fn newcomer() -> RegisterForm {
        RegisterForm {
            first_name: "Ana".into(),
            last_name: "Reyes".into(),
            email: "Ana@Example.com".into(),
            password: "secret1".into(),
        }
    }

    struct Scripted {
        confirm: bool,
        answer: Option<String>,
    }

    impl Prompter for Scripted {
        fn confirm(&mut self, _message: &str) -> bool {
            self.confirm
        }

        fn prompt(&mut self, _message: &str) -> Option<String> {
            self.answer.clone()
        }
    }

    fn app() -> App {
        App::start_with(
            Config::for_test("/tmp/portal-unit"),
            Box::new(MemoryKv::new()),
            Passwords::fast(),
        )
        .unwrap()
    }

    fn admin_app() -> App {
        let mut app = app();
        app.login(SEED_ADMIN_EMAIL, SEED_ADMIN_PASSWORD).unwrap();
        app.toasts().drain();
        app
    }

    fn last_toast(app: &mut App) -> Toast {
        app.toasts().drain().pop().unwrap()
    }

    #[test]
    fn test_start_shows_home_as_guest() {
        let app = app();
        assert_eq!(app.route(), Route::Home);
        assert!(!app.auth().is_authenticated());
    }

    #[test]
    fn test_guest_navigation_redirects_to_login() {
        let mut app = app();
        app.navigate("#/accounts").unwrap();
        assert_eq!(app.route(), Route::Login);
        app.navigate("#/nowhere").unwrap();
        assert_eq!(app.route(), Route::Home);
    }

    #[test]
    fn test_failed_login_toasts_generic_error() {
        let mut app = app();
        assert!(app.login(SEED_ADMIN_EMAIL, "wrong").is_err());
        let toast = last_toast(&mut app);
        assert_eq!(toast.kind, ToastKind::Error);
        assert_eq!(toast.message, "Invalid email, password, or unverified account.");
        assert_eq!(app.route(), Route::Home);
    }

    #[test]
    fn test_delete_self_rejected_before_confirm() {
        let mut app = admin_app();
        let mut prompter = Scripted {
            confirm: true,
            answer: None,
        };
        let err = app.delete_account(1, &mut prompter).unwrap_err();
        assert_eq!(err.code, ErrorCode::CannotDeleteSelf);
        assert_eq!(last_toast(&mut app).message, "Cannot delete your own account.");
        assert_eq!(app.store().accounts.len(), 1);
    }

    #[test]
    fn test_declined_confirm_changes_nothing_silently() {
        let mut app = admin_app();
        let mut prompter = Scripted {
            confirm: false,
            answer: None,
        };
        let err = app.delete_department(1, &mut prompter).unwrap_err();
        assert!(err.is_cancelled());
        assert!(app.toasts().drain().is_empty());
        assert_eq!(app.store().departments.len(), 2);
    }

    #[test]
    fn test_reset_own_password_goes_to_profile() {
        let mut app = admin_app();
        app.navigate("#/accounts").unwrap();
        let mut prompter = Scripted {
            confirm: true,
            answer: Some("another1".into()),
        };
        app.reset_password(1, &mut prompter).unwrap_err();
        let toast = last_toast(&mut app);
        assert_eq!(toast.kind, ToastKind::Warning);
        assert_eq!(toast.message, "Use profile to change your own password.");
        assert_eq!(app.route(), Route::Profile);
    }

    #[test]
    fn test_guest_cannot_call_admin_handlers() {
        let mut app = app();
        let err = app.save_department(&DepartmentForm {
            edit_id: None,
            name: "Ops".into(),
            description: String::new(),
        });
        assert_eq!(err.unwrap_err().code, ErrorCode::NotAuthenticated);
        assert_eq!(app.store().departments.len(), 2);
    }

    #[test]
    fn test_register_keeps_store_when_pending_email_cannot_be_written() {
        let mut app = failing_app(PENDING_EMAIL_KEY);
        let err = app.register(&newcomer()).unwrap_err();
        assert_eq!(err.code, ErrorCode::DatabaseError);
        assert_eq!(last_toast(&mut app).kind, ToastKind::Error);
        assert_eq!(app.store().accounts.len(), 1);
        assert!(app.store().account_by_email("ana@example.com").is_none());
        assert_eq!(app.route(), Route::Home);
    }

    #[test]
    fn test_register_clears_pending_email_when_store_save_fails() {
        let mut app = failing_app(STORE_KEY);
        let err = app.register(&newcomer()).unwrap_err();
        assert_eq!(err.code, ErrorCode::DatabaseError);
        assert_eq!(app.store().accounts.len(), 1);
        assert_eq!(app.pending_email().unwrap(), None);
    }

    #[test]
    fn test_rejected_registration_keeps_earlier_pending_email() {
        let mut app = app();
        app.register(&newcomer()).unwrap();
        let err = app
            .register(&RegisterForm {
                email: "bob@example.com".into(),
                password: "123".into(),
                ..newcomer()
            })
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::PasswordTooShort);
        assert_eq!(app.pending_email().unwrap().as_deref(), Some("ana@example.com"));
    }

    #[test]
    fn test_submit_request_resets_form() {
        let mut app = admin_app();
        app.navigate("#/requests").unwrap();
        app.request_form_mut().kind = "Equipment".into();
        app.request_form_mut().row_mut(0).unwrap().name = "Laptop".into();
        app.request_form_mut().add_row();

        let request = app.submit_request().unwrap();
        assert_eq!(request.employee_email, SEED_ADMIN_EMAIL);
        assert_eq!(app.request_form().rows().len(), 1);
        assert_eq!(last_toast(&mut app).message, "Request submitted.");
        assert_eq!(app.page().table().unwrap().rows.len(), 1);
    }
}
