//! Menu controller - the interactive front end.
//!
//! The controller is a two-state loop. While nobody is logged in it offers
//! register and login; once a user is authenticated it offers the ledger,
//! report, logout and exit actions. Domain errors are printed and the loop
//! carries on in the same state; anything else ends [`MenuController::run`].

/// Terminal and scripted console implementations
pub mod console;

use crate::{
    core::{
        account,
        ledger::{self, BudgetChange, BudgetDeleteScope},
        report,
        session::SessionContext,
    },
    errors::Result,
};
use console::{Console, ask, ask_password};
use sea_orm::DatabaseConnection;
use tracing::{debug, info};

const BANNER: &str = "-------------------";
const DIVIDER: &str = "-----------------------------";

/// Where the menu loop is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuState {
    /// Register or login
    Unauthenticated,
    /// Ledger and report actions for the session user
    Authenticated,
    /// The user chose exit or input ended
    Exited,
}

/// Drives the menus for one session over one console.
pub struct MenuController<'a, C: Console> {
    db: &'a DatabaseConnection,
    console: C,
    session: SessionContext,
    budget_delete_scope: BudgetDeleteScope,
}

impl<'a, C: Console> MenuController<'a, C> {
    /// Creates a controller with an empty session.
    pub const fn new(
        db: &'a DatabaseConnection,
        console: C,
        budget_delete_scope: BudgetDeleteScope,
    ) -> Self {
        Self {
            db,
            console,
            session: SessionContext::new(),
            budget_delete_scope,
        }
    }

    /// The console the controller writes to.
    pub const fn console(&self) -> &C {
        &self.console
    }

    /// The controller's session.
    pub const fn session(&self) -> &SessionContext {
        &self.session
    }

    /// Runs the menus until the user exits or input ends.
    ///
    /// # Errors
    /// Returns store, I/O and hashing errors; user-facing errors are printed
    /// and do not end the loop.
    pub async fn run(&mut self) -> Result<()> {
        let mut state = MenuState::Unauthenticated;

        while state != MenuState::Exited {
            let step = match state {
                MenuState::Unauthenticated => self.unauthenticated_step().await,
                MenuState::Authenticated => self.authenticated_step().await,
                MenuState::Exited => Ok(MenuState::Exited),
            };

            state = match step {
                Ok(next) => next,
                Err(e) if e.is_user_facing() => {
                    debug!(error = %e, "Action failed");
                    self.console.write_line(&e.to_string())?;
                    state
                }
                Err(e) => return Err(e),
            };
        }

        self.console.write_line("Exiting the Budget Tracker CLI.")?;
        Ok(())
    }

    async fn unauthenticated_step(&mut self) -> Result<MenuState> {
        self.console.write_line(BANNER)?;
        self.console.write_line("Budget Tracker CLI")?;
        self.console.write_line(BANNER)?;
        self.console.write_line("1. Register")?;
        self.console.write_line("2. Login")?;

        let Some(choice) = ask(&mut self.console, "Enter your choice (1-2): ")? else {
            return Ok(MenuState::Exited);
        };

        match choice.as_str() {
            "1" => self.register().await,
            "2" => self.login().await,
            _ => {
                self.console.write_line("Invalid choice. Please try again.")?;
                Ok(MenuState::Unauthenticated)
            }
        }
    }

    async fn register(&mut self) -> Result<MenuState> {
        let Some(username) = ask(&mut self.console, "Enter your username: ")? else {
            return Ok(MenuState::Exited);
        };
        let Some(password) = ask_password(&mut self.console, "Enter your password: ")? else {
            return Ok(MenuState::Exited);
        };
        let Some(email) = ask(&mut self.console, "Enter your email: ")? else {
            return Ok(MenuState::Exited);
        };

        let user = account::register(self.db, &username, &password, &email).await?;
        self.console.write_line("Registration successful.")?;
        self.session.login(user);
        Ok(MenuState::Authenticated)
    }

    async fn login(&mut self) -> Result<MenuState> {
        let Some(username) = ask(&mut self.console, "Enter your username: ")? else {
            return Ok(MenuState::Exited);
        };
        let Some(password) = ask_password(&mut self.console, "Enter your password: ")? else {
            return Ok(MenuState::Exited);
        };

        let user = account::authenticate(self.db, &username, &password).await?;
        self.console.write_line("Login successful.")?;
        self.session.login(user);
        Ok(MenuState::Authenticated)
    }

    async fn authenticated_step(&mut self) -> Result<MenuState> {
        self.print_user_menu().await?;

        let Some(choice) = ask(&mut self.console, "Enter your choice (1-9): ")? else {
            return Ok(MenuState::Exited);
        };

        let completed = match choice.as_str() {
            "1" => self.add_transaction().await?,
            "2" => self.view_transactions().await?,
            "3" => self.delete_transaction().await?,
            "4" => self.set_budget().await?,
            "5" => self.view_budgets().await?,
            "6" => self.delete_budget().await?,
            "7" => self.generate_report().await?,
            "8" => return self.logout(),
            "9" => return Ok(MenuState::Exited),
            _ => {
                self.console.write_line("Invalid choice. Please try again.")?;
                true
            }
        };

        Ok(if completed {
            MenuState::Authenticated
        } else {
            MenuState::Exited
        })
    }

    async fn print_user_menu(&mut self) -> Result<()> {
        let username = self.session.current_user()?.username.clone();
        let balance = report::calculate_balance(self.db, &self.session).await?;

        self.console.write_line(&format!("Welcome, {username}!"))?;
        self.console.write_line(DIVIDER)?;
        self.console.write_line(&report::format_balance(balance))?;
        self.console.write_line(DIVIDER)?;
        for item in [
            "1. Add a transaction",
            "2. View all transactions",
            "3. Delete a transaction",
            "4. Set budget",
            "5. View all budgets",
            "6. Delete budget",
            "7. Generate report",
            "8. Logout",
            "9. Exit",
        ] {
            self.console.write_line(item)?;
        }
        Ok(())
    }

    // The action methods below return `Ok(false)` when input ends mid-action.

    async fn add_transaction(&mut self) -> Result<bool> {
        self.console.write_line("Add a new transaction:")?;
        let Some(transaction_type) = ask(&mut self.console, "Type (income/expense): ")? else {
            return Ok(false);
        };
        let Some(category) = ask(&mut self.console, "Category: ")? else {
            return Ok(false);
        };
        let Some(amount) = ask(&mut self.console, "Amount: ")? else {
            return Ok(false);
        };
        let Some(date) = ask(&mut self.console, "Date (YYYY-MM-DD): ")? else {
            return Ok(false);
        };

        ledger::add_transaction(
            self.db,
            &self.session,
            &transaction_type,
            &category,
            &amount,
            &date,
        )
        .await?;
        self.console.write_line("Transaction added successfully!")?;
        Ok(true)
    }

    async fn view_transactions(&mut self) -> Result<bool> {
        let transactions = ledger::list_transactions(self.db, &self.session).await?;
        if transactions.is_empty() {
            self.console.write_line("No transactions found, please add one.")?;
            return Ok(true);
        }

        self.console.write_line("Viewing all transactions:")?;
        for transaction in &transactions {
            self.console.write_line(&report::format_transaction_details(transaction))?;
        }
        Ok(true)
    }

    async fn delete_transaction(&mut self) -> Result<bool> {
        let transactions = ledger::list_transactions(self.db, &self.session).await?;
        if transactions.is_empty() {
            self.console.write_line("No transactions found.")?;
            return Ok(true);
        }

        self.console.write_line("Available transactions:")?;
        for transaction in &transactions {
            self.console.write_line(&report::format_transaction_line(transaction))?;
        }

        let Some(id_text) = ask(
            &mut self.console,
            "Enter the ID of the transaction you want to delete: ",
        )?
        else {
            return Ok(false);
        };
        let Some(transaction_id) = self.parse_id(&id_text)? else {
            return Ok(true);
        };

        ledger::delete_transaction(self.db, &self.session, transaction_id).await?;
        self.console.write_line("Transaction deleted successfully.")?;
        Ok(true)
    }

    async fn set_budget(&mut self) -> Result<bool> {
        self.console.write_line("Set Budget:")?;
        let Some(category) = ask(&mut self.console, "Enter the budget category: ")? else {
            return Ok(false);
        };
        let Some(amount) = ask(&mut self.console, "Enter the budget amount: ")? else {
            return Ok(false);
        };

        let (_, change) = ledger::set_budget(self.db, &self.session, &category, &amount).await?;
        let message = match change {
            BudgetChange::Created => "Budget set successfully.",
            BudgetChange::Updated => "Budget updated successfully.",
        };
        self.console.write_line(message)?;
        Ok(true)
    }

    async fn view_budgets(&mut self) -> Result<bool> {
        let budgets = ledger::list_budgets(self.db, &self.session).await?;
        if budgets.is_empty() {
            self.console.write_line("No budgets found. Please add one.")?;
            return Ok(true);
        }

        self.console.write_line("Viewing all budgets:")?;
        for budget in &budgets {
            self.console.write_line(&report::format_budget_line(budget))?;
        }
        Ok(true)
    }

    async fn delete_budget(&mut self) -> Result<bool> {
        let budgets = ledger::list_budgets(self.db, &self.session).await?;
        if budgets.is_empty() {
            self.console.write_line("No budgets found.")?;
            return Ok(true);
        }

        self.console.write_line("Available budgets:")?;
        for budget in &budgets {
            self.console.write_line(&report::format_budget_line(budget))?;
        }

        let Some(id_text) = ask(
            &mut self.console,
            "Enter the ID of the budget you want to delete: ",
        )?
        else {
            return Ok(false);
        };
        let Some(budget_id) = self.parse_id(&id_text)? else {
            return Ok(true);
        };

        ledger::delete_budget(self.db, &self.session, budget_id, self.budget_delete_scope)
            .await?;
        self.console.write_line("Budget deleted successfully.")?;
        Ok(true)
    }

    async fn generate_report(&mut self) -> Result<bool> {
        let Some(target_text) = self
            .console
            .read_line("User ID for the report (leave blank for your own): ")?
        else {
            return Ok(false);
        };

        let target = if target_text.trim().is_empty() {
            None
        } else {
            match self.parse_id(&target_text)? {
                Some(id) => Some(id),
                None => return Ok(true),
            }
        };

        let user_report = report::generate_report(self.db, &self.session, target).await?;
        self.console.write_line(&report::format_report(&user_report))?;
        Ok(true)
    }

    fn logout(&mut self) -> Result<MenuState> {
        if let Some(user) = self.session.logout() {
            info!(user_id = user.id, "User logged out");
        }
        self.console.write_line("Logged out successfully.")?;
        Ok(MenuState::Unauthenticated)
    }

    /// Parses a record id, printing a message and returning `None` if it is
    /// not a whole number.
    fn parse_id(&mut self, text: &str) -> Result<Option<i64>> {
        if let Ok(id) = text.trim().parse::<i64>() {
            Ok(Some(id))
        } else {
            self.console
                .write_line(&format!("Invalid ID '{}'. Please enter a number.", text.trim()))?;
            Ok(None)
        }
    }
}
