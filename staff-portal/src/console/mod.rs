//! Interactive console front-end
//!
//! Reads one command per line, collects form fields through prompts,
//! hands them to [`App`] and draws the resulting page and toasts.

mod command;
mod terminal;

pub use command::{
    AccountAction, Command, ProfileAction, RecordAction, RequestAction, help_text, parse_line,
};
pub use terminal::Terminal;

use crate::core::App;
use crate::router::Route;
use crate::views::text::{render_nav, render_page, render_toasts};
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{
    AccountForm, DepartmentForm, EmployeeForm, ItemRow, RegisterForm, RequestForm, Role,
};
use std::io::{self, BufRead, Write};

/// What the loop does after a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct Console<R, W> {
    app: App,
    term: Terminal<R, W>,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(app: App, term: Terminal<R, W>) -> Self {
        Self { app, term }
    }

    pub fn app(&self) -> &App {
        &self.app
    }

    pub fn terminal(&self) -> &Terminal<R, W> {
        &self.term
    }

    /// Run until `quit` or end of input
    pub fn run(&mut self) -> anyhow::Result<()> {
        self.draw()?;
        while let Some(line) = self.term.read_line("> ")? {
            if line.trim().is_empty() {
                continue;
            }
            let command = match parse_line(&line) {
                Ok(command) => command,
                Err(e) => {
                    self.term.say(&e.to_string())?;
                    continue;
                }
            };
            if self.execute(command)? == Flow::Quit {
                break;
            }
        }
        tracing::info!("Console closed");
        Ok(())
    }

    /// Perform one command and redraw
    pub fn execute(&mut self, command: Command) -> anyhow::Result<Flow> {
        tracing::debug!(?command, "Command");
        match command {
            Command::Go { route } => settle(self.app.navigate(&route)),
            Command::Register => self.register()?,
            Command::Verify => settle(self.app.verify()),
            Command::Login => self.login()?,
            Command::Logout => settle(self.app.logout()),
            Command::Profile {
                action: ProfileAction::Password,
            } => self.change_password()?,
            Command::Account { action } => self.account(action)?,
            Command::Dept { action } => self.department(action)?,
            Command::Employee { action } => self.employee(action)?,
            Command::Request {
                action: RequestAction::New,
            } => self.new_request()?,
            Command::Show => {}
            Command::Help => {
                self.term.say(&help_text())?;
                return Ok(Flow::Continue);
            }
            Command::Quit => return Ok(Flow::Quit),
        }
        self.draw()?;
        Ok(Flow::Continue)
    }

    fn draw(&mut self) -> io::Result<()> {
        let nav = render_nav(self.app.auth().nav_label(), self.app.presentation());
        let page = render_page(self.app.page());
        let toasts = render_toasts(&self.app.toasts().drain());
        self.term.say(&format!("\n{nav}\n\n{page}"))?;
        if !toasts.is_empty() {
            self.term.say(&toasts)?;
        }
        Ok(())
    }

    /// Toast a form-level input problem
    fn reject(&mut self, err: AppError) {
        self.app.toasts().error(err.message);
    }

    // ========== Registration / login ==========

    fn register(&mut self) -> io::Result<()> {
        let mut form = RegisterForm::default();
        let Some(first_name) = self.term.field("First name", "")? else { return Ok(()) };
        let Some(last_name) = self.term.field("Last name", "")? else { return Ok(()) };
        let Some(email) = self.term.field("Email", "")? else { return Ok(()) };
        let Some(password) = self.term.field("Password", "")? else { return Ok(()) };
        form.first_name = first_name;
        form.last_name = last_name;
        form.email = email;
        form.password = password;
        settle(self.app.register(&form));
        Ok(())
    }

    fn login(&mut self) -> io::Result<()> {
        let Some(email) = self.term.field("Email", "")? else { return Ok(()) };
        let Some(password) = self.term.field("Password", "")? else { return Ok(()) };
        settle(self.app.login(&email, &password));
        Ok(())
    }

    fn change_password(&mut self) -> io::Result<()> {
        if !self.app.auth().is_authenticated() {
            self.reject(AppError::not_authenticated());
            return Ok(());
        }
        let Some(current) = self.term.field("Current password", "")? else { return Ok(()) };
        let Some(new_password) = self.term.field("New password", "")? else { return Ok(()) };
        settle(self.app.change_password(&current, &new_password));
        Ok(())
    }

    // ========== Accounts ==========

    fn account(&mut self, action: AccountAction) -> io::Result<()> {
        if self.app.authorize(Route::Accounts).is_err() {
            return Ok(());
        }
        match action {
            AccountAction::Add => {
                let form = AccountForm {
                    verified: true,
                    ..AccountForm::default()
                };
                if let Some(form) = self.account_form(form)? {
                    settle(self.app.save_account(&form));
                }
            }
            AccountAction::Edit { id } => {
                let Some(account) = self.app.store().account(id) else {
                    self.reject(AppError::new(ErrorCode::AccountNotFound));
                    return Ok(());
                };
                let form = AccountForm::for_edit(account);
                if let Some(form) = self.account_form(form)? {
                    settle(self.app.save_account(&form));
                }
            }
            AccountAction::Reset { id } => settle(self.app.reset_password(id, &mut self.term)),
            AccountAction::Delete { id } => settle(self.app.delete_account(id, &mut self.term)),
        }
        Ok(())
    }

    fn account_form(&mut self, mut form: AccountForm) -> io::Result<Option<AccountForm>> {
        let Some(first_name) = self.term.field("First name", &form.first_name)? else {
            return Ok(None);
        };
        let Some(last_name) = self.term.field("Last name", &form.last_name)? else {
            return Ok(None);
        };
        let Some(email) = self.term.field("Email", &form.email)? else { return Ok(None) };
        let password_label = if form.is_edit() {
            "Password (blank keeps current)"
        } else {
            "Password"
        };
        let Some(password) = self.term.field(password_label, "")? else { return Ok(None) };
        let Some(role) = self.term.field("Role (User/Admin)", form.role.as_str())? else {
            return Ok(None);
        };
        let verified_now = if form.verified { "y" } else { "n" };
        let Some(verified) = self.term.field("Verified (y/n)", verified_now)? else {
            return Ok(None);
        };

        form.role = match role.parse::<Role>() {
            Ok(role) => role,
            Err(msg) => {
                self.reject(AppError::validation(msg));
                return Ok(None);
            }
        };
        form.first_name = first_name;
        form.last_name = last_name;
        form.email = email;
        form.password = password;
        form.verified = matches!(verified.trim().to_lowercase().as_str(), "y" | "yes");
        Ok(Some(form))
    }

    // ========== Departments ==========

    fn department(&mut self, action: RecordAction) -> io::Result<()> {
        if self.app.authorize(Route::Departments).is_err() {
            return Ok(());
        }
        let form = match action {
            RecordAction::Delete { id } => {
                settle(self.app.delete_department(id, &mut self.term));
                return Ok(());
            }
            RecordAction::Add => DepartmentForm::default(),
            RecordAction::Edit { id } => match self.app.store().department(id) {
                Some(dept) => DepartmentForm::for_edit(dept),
                None => {
                    self.reject(AppError::new(ErrorCode::DepartmentNotFound));
                    return Ok(());
                }
            },
        };

        let Some(name) = self.term.field("Name", &form.name)? else { return Ok(()) };
        let Some(description) = self.term.field("Description", &form.description)? else {
            return Ok(());
        };
        let form = DepartmentForm {
            name,
            description,
            ..form
        };
        settle(self.app.save_department(&form));
        Ok(())
    }

    // ========== Employees ==========

    fn employee(&mut self, action: RecordAction) -> io::Result<()> {
        if self.app.authorize(Route::Employees).is_err() {
            return Ok(());
        }
        let form = match action {
            RecordAction::Delete { id } => {
                settle(self.app.delete_employee(id, &mut self.term));
                return Ok(());
            }
            RecordAction::Add => EmployeeForm {
                dept_id: self.app.store().departments.first().map_or(0, |d| d.id),
                ..EmployeeForm::default()
            },
            RecordAction::Edit { id } => {
                let store = self.app.store();
                match store.employee(id) {
                    Some(emp) => EmployeeForm::for_edit(
                        emp,
                        store.account(emp.user_id).map(|a| a.email.as_str()),
                    ),
                    None => {
                        self.reject(AppError::new(ErrorCode::EmployeeNotFound));
                        return Ok(());
                    }
                }
            }
        };

        let Some(employee_id) = self.term.field("Employee ID", &form.employee_id)? else {
            return Ok(());
        };
        let Some(email) = self.term.field("Account email", &form.email)? else { return Ok(()) };
        let Some(position) = self.term.field("Position", &form.position)? else {
            return Ok(());
        };
        let current_dept = if form.dept_id > 0 {
            form.dept_id.to_string()
        } else {
            String::new()
        };
        let Some(dept) = self.term.field("Department id", &current_dept)? else {
            return Ok(());
        };
        let Some(hire_date) = self.term.field("Hire date (YYYY-MM-DD)", &form.hire_date)? else {
            return Ok(());
        };

        let dept_id = match dept.trim().parse::<i64>() {
            Ok(id) => id,
            Err(_) => {
                self.reject(AppError::new(ErrorCode::DepartmentNotFound));
                return Ok(());
            }
        };
        let form = EmployeeForm {
            employee_id,
            email,
            position,
            dept_id,
            hire_date,
            ..form
        };
        settle(self.app.save_employee(&form));
        Ok(())
    }

    // ========== Requests ==========

    /// Fill the request form row by row; a blank item name ends the list
    fn new_request(&mut self) -> io::Result<()> {
        if self.app.authorize(Route::Requests).is_err() {
            return Ok(());
        }
        let current_kind = self.app.request_form().kind.clone();
        let Some(kind) = self.term.field("Type", &current_kind)? else { return Ok(()) };

        let mut form = RequestForm::new(kind);
        loop {
            let Some(name) = self.term.field("Item name (blank to finish)", "")? else {
                return Ok(());
            };
            if name.trim().is_empty() {
                break;
            }
            let Some(qty) = self.term.field("Quantity", "1")? else { return Ok(()) };
            let filled = form.rows().len() == 1 && form.rows()[0].name.is_empty();
            if filled {
                if let Some(row) = form.row_mut(0) {
                    *row = ItemRow::new(name, qty);
                }
            } else {
                form.push_row(ItemRow::new(name, qty));
            }
        }

        *self.app.request_form_mut() = form;
        settle(self.app.submit_request());
        Ok(())
    }
}

/// Handler errors are already toasted by the app
fn settle<T>(result: AppResult<T>) {
    if let Err(e) = result {
        tracing::debug!(code = %e.code, "Command finished with error");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::Passwords;
    use crate::core::Config;
    use crate::storage::MemoryKv;
    use std::io::Cursor;

    fn console(input: &str) -> Console<Cursor<Vec<u8>>, Vec<u8>> {
        let app = App::start_with(
            Config::for_test("/tmp/portal-console"),
            Box::new(MemoryKv::new()),
            Passwords::fast(),
        )
        .unwrap();
        Console::new(app, Terminal::new(Cursor::new(input.as_bytes().to_vec()), Vec::new()))
    }

    fn output(c: &Console<Cursor<Vec<u8>>, Vec<u8>>) -> String {
        String::from_utf8_lossy(c.terminal().output()).into_owned()
    }

    #[test]
    fn test_login_and_add_department() {
        let script = "login\nadmin@example.com\nPassword123!\n\
                      dept add\nFinance\nMoney\n\
                      quit\n";
        let mut c = console(script);
        c.run().unwrap();

        assert!(c.app().auth().is_authenticated());
        assert_eq!(c.app().store().departments.len(), 3);
        assert_eq!(c.app().route(), Route::Profile);
        let out = output(&c);
        assert!(out.contains("(success) Login successful!"));
        assert!(out.contains("(success) Department saved."));
    }

    #[test]
    fn test_request_rows_collected_until_blank() {
        let script = "login\nadmin@example.com\nPassword123!\n\
                      go requests\n\
                      request new\nEquipment\nLaptop\n1\nMouse\nlots\n\n";
        let mut c = console(script);
        c.run().unwrap();

        let requests = &c.app().store().requests;
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].items.len(), 2);
        assert_eq!(requests[0].items[1].qty, 1);
        assert!(output(&c).contains("Laptop (1), Mouse (1)"));
    }

    #[test]
    fn test_guest_account_command_refused_without_prompts() {
        let mut c = console("account add\nshould-not-be-read\n");
        c.run().unwrap();
        let out = output(&c);
        assert!(out.contains("(error)"));
        assert!(!out.contains("First name"));
        assert_eq!(c.app().store().accounts.len(), 1);
    }

    #[test]
    fn test_unknown_command_reports_and_continues() {
        let mut c = console("fly away\nshow\n");
        c.run().unwrap();
        let out = output(&c);
        assert!(out.contains("error:"));
        assert!(out.matches("== Home (#/) ==").count() >= 2);
    }
}
