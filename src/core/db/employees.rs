/// Employee Records Module
///
/// The fixed employee table layout and the statements that operate on it.
/// Table names are free, column names are not.

use crate::core::db::ident::Identifier;
use crate::core::Result;
use rusqlite::{params, Connection, Row};
use std::fmt;

/// Column list of the employee table, in declaration order
pub const EMPLOYEE_COLUMNS: [&str; 5] = ["EmployeeID", "FirstName", "LastName", "Age", "Department"];

/// Builds the CREATE TABLE statement for an employee table named `table`.
pub fn create_table_sql(table: &Identifier) -> String {
    format!(
        "CREATE TABLE {} (
            EmployeeID INTEGER PRIMARY KEY AUTOINCREMENT,
            FirstName NVARCHAR(50),
            LastName NVARCHAR(50),
            Age INT,
            Department NVARCHAR(50)
        )",
        table.quoted()
    )
}

/// Field values for a record that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEmployee {
    pub first_name: String,
    pub last_name: String,
    pub age: i64,
    pub department: String,
}

impl NewEmployee {
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        age: i64,
        department: impl Into<String>,
    ) -> Self {
        NewEmployee {
            first_name: first_name.into(),
            last_name: last_name.into(),
            age,
            department: department.into(),
        }
    }
}

/// A stored employee row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Employee {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub age: Option<i64>,
    pub department: String,
}

impl Employee {
    /// Maps a `SELECT *` row by column name. NULL text columns become empty strings.
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Employee {
            id: row.get("EmployeeID")?,
            first_name: row.get::<_, Option<String>>("FirstName")?.unwrap_or_default(),
            last_name: row.get::<_, Option<String>>("LastName")?.unwrap_or_default(),
            age: row.get("Age")?,
            department: row.get::<_, Option<String>>("Department")?.unwrap_or_default(),
        })
    }
}

impl fmt::Display for Employee {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ID: {}, Name: {} {}, Age: ", self.id, self.first_name, self.last_name)?;
        match self.age {
            Some(age) => write!(f, "{}", age)?,
            None => f.write_str("None")?,
        }
        write!(f, ", Department: {}", self.department)
    }
}

/// Creates the employee table. Commit is the caller's concern.
pub fn create_table(conn: &Connection, table: &Identifier) -> Result<()> {
    conn.execute(&create_table_sql(table), [])?;
    Ok(())
}

/// Inserts a record and returns the identifier the table assigned to it.
pub fn insert_employee(conn: &Connection, table: &Identifier, employee: &NewEmployee) -> Result<i64> {
    conn.execute(
        &format!(
            "INSERT INTO {} (FirstName, LastName, Age, Department) VALUES (?1, ?2, ?3, ?4)",
            table.quoted()
        ),
        params![
            employee.first_name,
            employee.last_name,
            employee.age,
            employee.department
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Reads every row of the table, in storage order.
pub fn select_employees(conn: &Connection, table: &Identifier) -> Result<Vec<Employee>> {
    let mut stmt = conn.prepare(&format!("SELECT * FROM {}", table.quoted()))?;
    let rows = stmt.query_map([], Employee::from_row)?;

    let mut employees = Vec::new();
    for row in rows {
        employees.push(row?);
    }
    Ok(employees)
}

/// Deletes the row with `employee_id`, returning how many rows were removed.
pub fn delete_employee(conn: &Connection, table: &Identifier, employee_id: i64) -> Result<usize> {
    let removed = conn.execute(
        &format!("DELETE FROM {} WHERE EmployeeID = ?1", table.quoted()),
        [employee_id],
    )?;
    Ok(removed)
}
