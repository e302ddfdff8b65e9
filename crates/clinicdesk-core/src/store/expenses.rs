//! Expense store operations.

use rusqlite::{params, OptionalExtension, Row};
use tracing::debug;

use super::{Store, StoreError, StoreResult};
use crate::models::{Expense, ExpensePatch, NewExpense};

const EXPENSE_COLUMNS: &str = "id, title, category, amount, description, \
     expense_date, supplier, receipt_number, created_at";

fn expense_from_row(row: &Row<'_>) -> rusqlite::Result<Expense> {
    Ok(Expense {
        id: row.get(0)?,
        title: row.get(1)?,
        category: row.get(2)?,
        amount: row.get(3)?,
        description: row.get(4)?,
        date: row.get(5)?,
        supplier: row.get(6)?,
        receipt_number: row.get(7)?,
        created_at: row.get(8)?,
    })
}

impl Store {
    /// Log an expense, assigning a fresh id and creation timestamp.
    pub fn add_expense(&self, data: NewExpense) -> StoreResult<Expense> {
        let expense = Expense::new(data);
        self.conn.execute(
            r#"
            INSERT INTO expenses (
                id, title, category, amount, description,
                expense_date, supplier, receipt_number, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            "#,
            params![
                expense.id,
                expense.title,
                expense.category,
                expense.amount,
                expense.description,
                expense.date,
                expense.supplier,
                expense.receipt_number,
                expense.created_at,
            ],
        )?;
        debug!(id = %expense.id, "added expense");
        Ok(expense)
    }

    /// Get an expense by id.
    pub fn get_expense(&self, id: &str) -> StoreResult<Option<Expense>> {
        self.conn
            .query_row(
                &format!("SELECT {EXPENSE_COLUMNS} FROM expenses WHERE id = ?"),
                [id],
                expense_from_row,
            )
            .optional()
            .map_err(Into::into)
    }

    /// Merge a partial update into an existing expense. Unknown ids are an
    /// explicit error.
    pub fn update_expense(&self, id: &str, patch: ExpensePatch) -> StoreResult<Expense> {
        let mut expense = self
            .get_expense(id)?
            .ok_or_else(|| StoreError::NotFound(format!("expense {id}")))?;
        expense.apply(patch);

        self.conn.execute(
            r#"
            UPDATE expenses SET
                title = ?2,
                category = ?3,
                amount = ?4,
                description = ?5,
                expense_date = ?6,
                supplier = ?7,
                receipt_number = ?8
            WHERE id = ?1
            "#,
            params![
                expense.id,
                expense.title,
                expense.category,
                expense.amount,
                expense.description,
                expense.date,
                expense.supplier,
                expense.receipt_number,
            ],
        )?;
        debug!(id = %expense.id, "updated expense");
        Ok(expense)
    }

    /// Delete an expense. Idempotent: returns `false` when the id is absent.
    pub fn delete_expense(&self, id: &str) -> StoreResult<bool> {
        let rows_affected = self
            .conn
            .execute("DELETE FROM expenses WHERE id = ?", [id])?;
        if rows_affected > 0 {
            debug!(id, "deleted expense");
        }
        Ok(rows_affected > 0)
    }

    /// List all expenses in insertion order.
    pub fn list_expenses(&self) -> StoreResult<Vec<Expense>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {EXPENSE_COLUMNS} FROM expenses ORDER BY rowid"
        ))?;
        let rows = stmt.query_map([], expense_from_row)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }
}
