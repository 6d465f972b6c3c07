use crate::core::db::NewEmployee;
use crate::core::{CrudError, Result};
use crate::manager::DatabaseManager;
use std::io::{BufRead, Write};

/// A parsed menu selection.
#[derive(Debug, PartialEq)]
pub enum MenuChoice {
    CreateDatabase,
    CreateTable,
    InsertRecord,
    ReadRecords,
    DeleteRecord,
    DeleteDatabase,
    Exit,
    Unknown(i64),
}

/// Parses the text typed at the choice prompt.
///
/// Returns `None` when the input is not a number at all; numbers outside
/// 1-7 become `MenuChoice::Unknown`.
pub fn parse_choice(input: &str) -> Option<MenuChoice> {
    let number: i64 = input.trim().parse().ok()?;
    Some(match number {
        1 => MenuChoice::CreateDatabase,
        2 => MenuChoice::CreateTable,
        3 => MenuChoice::InsertRecord,
        4 => MenuChoice::ReadRecords,
        5 => MenuChoice::DeleteRecord,
        6 => MenuChoice::DeleteDatabase,
        7 => MenuChoice::Exit,
        other => MenuChoice::Unknown(other),
    })
}

/// The menu shown before every choice prompt.
pub fn render_menu() -> String {
    [
        "Choose an option:",
        "1. Create Database",
        "2. Create Table",
        "3. Insert Record",
        "4. Read Records",
        "5. Delete Record",
        "6. Delete Database",
        "7. Exit",
    ]
    .join("\n")
}

/// Console side of the menu: prompts on `output`, answers from `input`.
struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    /// Prints `prompt` and reads one line without its line ending.
    /// `None` means the input is exhausted.
    fn prompt(&mut self, prompt: &str) -> Result<Option<String>> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    /// Like `prompt`, but running out of input is an error.
    fn ask(&mut self, prompt: &str) -> Result<String> {
        self.prompt(prompt)?
            .ok_or_else(|| CrudError::Input("unexpected end of input".to_string()))
    }

    fn ask_number(&mut self, prompt: &str, field: &str) -> Result<i64> {
        let answer = self.ask(prompt)?;
        answer
            .trim()
            .parse()
            .map_err(|_| CrudError::Input(format!("{} must be a whole number, got '{}'", field, answer)))
    }

    fn say(&mut self, text: impl std::fmt::Display) -> Result<()> {
        writeln!(self.output, "{}", text)?;
        Ok(())
    }

    fn list_databases(&mut self, manager: &DatabaseManager) -> Result<()> {
        let databases = manager.get_existing_databases()?;
        self.say("Existing databases:")?;
        for db in databases {
            self.say(format_args!(" - {}", db))?;
        }
        Ok(())
    }
}

/// Runs the numbered menu until the user picks Exit or input runs out.
///
/// Invalid names are reported and the menu continues; driver errors and
/// non-numeric ages or ids end the loop with an error.
pub fn run_menu<R: BufRead, W: Write>(manager: &DatabaseManager, input: R, output: W) -> Result<()> {
    let mut console = Console { input, output };

    loop {
        console.say(format_args!("\n{}", render_menu()))?;
        let Some(line) = console.prompt("Enter your choice: ")? else {
            console.say("")?;
            break;
        };
        let Some(choice) = parse_choice(&line) else {
            console.say("Invalid input. Please enter a number.")?;
            continue;
        };

        let outcome = match choice {
            MenuChoice::CreateDatabase => {
                console.list_databases(manager)?;
                let db_name = console.ask("Enter database name: ")?;
                manager.create_database(&db_name)
            }
            MenuChoice::CreateTable => {
                console.list_databases(manager)?;
                let db_name = console.ask("Enter the name of the database to create the table in: ")?;
                if !manager.database_exists(&db_name)? {
                    console.say(format_args!("Database '{}' does not exist.", db_name))?;
                    continue;
                }
                let table_name = console.ask("Enter table name: ")?;
                manager.create_table(&db_name, &table_name)
            }
            MenuChoice::InsertRecord => {
                console.list_databases(manager)?;
                let db_name = console.ask("Enter database name: ")?;
                let table_name = console.ask("Enter table name: ")?;
                let first_name = console.ask("Enter first name: ")?;
                let last_name = console.ask("Enter last name: ")?;
                let age = console.ask_number("Enter age: ", "Age")?;
                let department = console.ask("Enter department: ")?;
                let employee = NewEmployee::new(first_name, last_name, age, department);
                manager.insert_record(&db_name, &table_name, &employee)
            }
            MenuChoice::ReadRecords => {
                console.list_databases(manager)?;
                let db_name = console.ask("Enter database name: ")?;
                let table_name = console.ask("Enter table name: ")?;
                manager.read_records(&db_name, &table_name)
            }
            MenuChoice::DeleteRecord => {
                console.list_databases(manager)?;
                let db_name = console.ask("Enter database name: ")?;
                let table_name = console.ask("Enter table name: ")?;
                let employee_id = console.ask_number("Enter Employee ID to delete: ", "Employee ID")?;
                manager.delete_record(&db_name, &table_name, employee_id)
            }
            MenuChoice::DeleteDatabase => {
                console.list_databases(manager)?;
                let db_name = console.ask("Enter database name to delete: ")?;
                manager.delete_database(&db_name)
            }
            MenuChoice::Exit => {
                console.say("Exiting the program...")?;
                break;
            }
            MenuChoice::Unknown(_) => {
                console.say("Invalid choice. Please try again.")?;
                continue;
            }
        };

        match outcome {
            Ok(outcome) => console.say(outcome)?,
            Err(e @ (CrudError::InvalidIdentifier { .. } | CrudError::SystemDatabase(_))) => {
                console.say(e)?
            }
            Err(e) => return Err(e),
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::db::Server;
    use std::io::Cursor;
    use tempfile::TempDir;

    fn test_manager() -> (TempDir, DatabaseManager) {
        let dir = TempDir::new().unwrap();
        let server = Server::new(dir.path(), "master", "sqlite").unwrap();
        (dir, DatabaseManager::new(server))
    }

    fn run(manager: &DatabaseManager, script: &str) -> (Result<()>, String) {
        let mut output = Vec::new();
        let result = run_menu(manager, Cursor::new(script.as_bytes()), &mut output);
        (result, String::from_utf8(output).unwrap())
    }

    #[test]
    fn test_parse_choices() {
        assert_eq!(parse_choice("1"), Some(MenuChoice::CreateDatabase));
        assert_eq!(parse_choice(" 4 \n"), Some(MenuChoice::ReadRecords));
        assert_eq!(parse_choice("7"), Some(MenuChoice::Exit));
        assert_eq!(parse_choice("0"), Some(MenuChoice::Unknown(0)));
        assert_eq!(parse_choice("-3"), Some(MenuChoice::Unknown(-3)));
        assert_eq!(parse_choice("two"), None);
        assert_eq!(parse_choice(""), None);
    }

    #[test]
    fn test_menu_text() {
        insta::assert_snapshot!(render_menu(), @r###"
        Choose an option:
        1. Create Database
        2. Create Table
        3. Insert Record
        4. Read Records
        5. Delete Record
        6. Delete Database
        7. Exit
        "###);
    }

    #[test]
    fn test_invalid_input_reprompts() {
        let (_dir, manager) = test_manager();
        let (result, output) = run(&manager, "abc\n9\n7\n");
        assert!(result.is_ok());
        assert!(output.contains("Invalid input. Please enter a number."));
        assert!(output.contains("Invalid choice. Please try again."));
        assert!(output.ends_with("Exiting the program...\n"));
        assert_eq!(output.matches("Enter your choice: ").count(), 3);
    }

    #[test]
    fn test_end_of_input_exits() {
        let (_dir, manager) = test_manager();
        let (result, output) = run(&manager, "");
        assert!(result.is_ok());
        assert!(output.contains("Enter your choice: "));
    }

    #[test]
    fn test_create_database_lists_existing_first() {
        let (_dir, manager) = test_manager();
        let (result, output) = run(&manager, "1\ntestdb\n1\ntestdb\n7\n");
        assert!(result.is_ok());

        let listing = output.find("Existing databases:\n - master\n").unwrap();
        let created = output.find("Database 'testdb' created successfully!").unwrap();
        assert!(listing < created);
        assert!(output.contains(" - master\n - testdb\n"));
        assert!(output.contains("Database 'testdb' already exists."));
    }

    #[test]
    fn test_create_table_checks_database_before_table_name() {
        let (_dir, manager) = test_manager();
        let (result, output) = run(&manager, "2\nghost\n7\n");
        assert!(result.is_ok());
        assert!(output.contains("Database 'ghost' does not exist."));
        assert!(!output.contains("Enter table name: "));
    }

    #[test]
    fn test_full_record_flow() {
        let (_dir, manager) = test_manager();
        let script = "1\nhr\n2\nhr\nStaff\n3\nhr\nStaff\nJane\nDoe\n30\nEng\n4\nhr\nStaff\n5\nhr\nStaff\n1\n4\nhr\nStaff\n7\n";
        let (result, output) = run(&manager, script);
        assert!(result.is_ok(), "{:?}", result);

        assert!(output.contains("Table 'Staff' created successfully in database 'hr'!"));
        assert!(output.contains("Record for Jane Doe inserted successfully!"));
        assert!(output.contains("\nRecords in table 'Staff':\nID: 1, Name: Jane Doe, Age: 30, Department: Eng\n"));
        assert!(output.contains("Record with ID 1 deleted successfully!"));
        assert!(output.contains("\nRecords in table 'Staff':\n\nChoose an option:"));
    }

    #[test]
    fn test_invalid_identifier_is_reported_and_loop_continues() {
        let (_dir, manager) = test_manager();
        let (result, output) = run(&manager, "1\nbad name\n6\nmaster\n7\n");
        assert!(result.is_ok());
        assert!(output.contains("Invalid database name 'bad name'"));
        assert!(output.contains("'master' is the system database"));
        assert!(output.ends_with("Exiting the program...\n"));
    }

    #[test]
    fn test_non_numeric_age_ends_loop() {
        let (_dir, manager) = test_manager();
        manager.create_database("hr").unwrap();
        let (result, output) = run(&manager, "3\nhr\nStaff\nJane\nDoe\nthirty\nEng\n7\n");
        match result {
            Err(CrudError::Input(msg)) => assert!(msg.contains("Age must be a whole number")),
            other => panic!("Expected Input error, got {:?}", other),
        }
        assert!(!output.contains("Exiting the program..."));
    }

    #[test]
    fn test_driver_error_ends_loop() {
        let (_dir, manager) = test_manager();
        manager.create_database("hr").unwrap();
        let (result, _) = run(&manager, "4\nhr\nMissingTable\n7\n");
        assert!(matches!(result, Err(CrudError::Database(_))));
    }

    #[test]
    fn test_end_of_input_mid_prompt_is_an_error() {
        let (_dir, manager) = test_manager();
        let (result, _) = run(&manager, "3\nhr\n");
        assert!(matches!(result, Err(CrudError::Input(_))));
    }
}
