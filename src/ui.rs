// UI layer: a simple interactive menu over the catalog using `dialoguer`.
// All conversion between raw user input and core types (numeric status
// selectors, id parsing, year validation) happens here, as does every bit
// of coloring -- the core never prints.

use crate::catalog::{validate_year, Book, Catalog, Status};
use crate::storage::Storage;
use anyhow::Result;
use console::style;
use dialoguer::{Input, Select};

/// Main interactive menu. Receives a loaded `Catalog` and runs a select
/// loop until the user chooses "Exit".
///
/// Note: `Select::interact()` is keyboard-driven: arrow keys and Enter
/// choose an option. Core errors are printed and the loop continues; no
/// catalog error ever ends the process.
pub fn main_menu<S: Storage>(mut catalog: Catalog<S>) -> Result<()> {
    loop {
        let items = vec![
            "Add a book",
            "Remove a book",
            "Search books",
            "List all books",
            "Change a book's status",
            "Exit",
        ];
        println!("\n--- Library catalog ---");
        let selection = Select::new().items(&items).default(0).interact()?;
        match selection {
            0 => handle_add(&mut catalog)?,
            1 => handle_remove(&mut catalog)?,
            2 => handle_search(&catalog)?,
            3 => handle_list(&catalog),
            4 => handle_change_status(&mut catalog)?,
            5 => break,
            _ => {}
        }
    }
    Ok(())
}

/// Collect title, author and a validated year, then add the book.
fn handle_add<S: Storage>(catalog: &mut Catalog<S>) -> Result<()> {
    let title: String = Input::new().with_prompt("Title").interact_text()?;
    let author: String = Input::new().with_prompt("Author").interact_text()?;

    // Re-ask until the year passes validation, like the original prompt.
    let year = loop {
        let raw: String = Input::new().with_prompt("Publication year").interact_text()?;
        match validate_year(&raw) {
            Ok(year) => break year,
            Err(e) => println!("{}", style(e).red()),
        }
    };

    match catalog.add(&title, &author, year) {
        Ok(id) => println!("Book added with ID {}", style(id).green()),
        Err(e) => println!("{}", style(e).red()),
    }
    Ok(())
}

fn handle_remove<S: Storage>(catalog: &mut Catalog<S>) -> Result<()> {
    let id = match prompt_id("ID of the book to remove")? {
        Some(id) => id,
        None => return Ok(()),
    };
    match catalog.remove(id) {
        Ok(()) => println!("Book with ID {} removed.", style(id).green()),
        Err(e) => println!("{}", style(e).red()),
    }
    Ok(())
}

fn handle_search<S: Storage>(catalog: &Catalog<S>) -> Result<()> {
    let query: String = Input::new()
        .with_prompt("Title, author or year to search for")
        .allow_empty(true)
        .interact_text()?;
    let results = catalog.search(&query);
    if results.is_empty() {
        println!("{}", style("No books found.").red());
    } else {
        for book in results {
            print_book(book);
        }
    }
    Ok(())
}

fn handle_list<S: Storage>(catalog: &Catalog<S>) {
    let books = catalog.list();
    if books.is_empty() {
        println!("{}", style("The catalog is empty.").red());
        return;
    }
    for book in books {
        print_book(book);
    }
}

fn handle_change_status<S: Storage>(catalog: &mut Catalog<S>) -> Result<()> {
    let id = match prompt_id("ID of the book to update")? {
        Some(id) => id,
        None => return Ok(()),
    };
    let selector: String = Input::new()
        .with_prompt("New status (1 = available, 2 = checked out)")
        .interact_text()?;
    // Invalid selector and unknown id are different errors; both just get
    // printed here and leave the catalog untouched.
    let status = match Status::from_selector(&selector) {
        Ok(status) => status,
        Err(e) => {
            println!("{}", style(e).red());
            return Ok(());
        }
    };
    match catalog.change_status(id, status) {
        Ok(()) => println!(
            "Status of book {} changed to {}.",
            style(id).green(),
            style(status).green()
        ),
        Err(e) => println!("{}", style(e).red()),
    }
    Ok(())
}

/// Prompt for a numeric book id. Returns `None` (after a message) when
/// the input is not a number, so callers can fall back to the menu.
fn prompt_id(prompt: &str) -> Result<Option<u64>> {
    let raw: String = Input::new().with_prompt(prompt).interact_text()?;
    match raw.trim().parse() {
        Ok(id) => Ok(Some(id)),
        Err(_) => {
            println!("{}", style("The ID must be a number!").red());
            Ok(None)
        }
    }
}

/// Render one record on a single line, values in green.
fn print_book(book: &Book) {
    println!(
        "ID: {}, Title: {}, Author: {}, Year: {}, Status: {}",
        style(book.id).green(),
        style(&book.title).green(),
        style(&book.author).green(),
        style(book.year).green(),
        style(book.status).green(),
    );
}
