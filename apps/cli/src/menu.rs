//! Interactive menu loop.
//!
//! Every handler collects its input, calls the inventory service and
//! prints the outcome. Failures - parse errors, duplicate names,
//! insufficient stock, unknown ids - are reported and terminate only the
//! current operation; control always returns to the menu.

use std::path::Path;

use anyhow::Result;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use kardex_core::{validation, Inventory, Money};

use crate::charts;
use crate::tables;

/// Runs the menu loop until the user quits or closes the input stream.
pub async fn run(inventory: &Inventory) -> Result<()> {
    let mut rl = DefaultEditor::new()?;

    loop {
        print_menu();

        let Some(choice) = prompt(&mut rl, "Choose an option (1-6): ")? else {
            break;
        };

        match choice.trim() {
            "1" => register_product(&mut rl, inventory).await?,
            "2" => movement_menu(&mut rl, inventory).await?,
            "3" => delete_product(&mut rl, inventory).await?,
            "4" => show_report(inventory).await?,
            "5" => render_charts(inventory).await?,
            "6" => {
                println!("Bye.");
                break;
            }
            other => println!("Unknown option '{other}'. Choose a number from 1 to 6."),
        }
    }

    Ok(())
}

fn print_menu() {
    println!();
    println!("--- Kardex Inventory ------------------------");
    println!("1. Register product");
    println!("2. Record stock movement");
    println!("3. Delete product");
    println!("4. Stock report");
    println!("5. Render charts");
    println!("6. Quit");
    println!("---------------------------------------------");
}

/// Reads one line. `None` means the user cancelled (Ctrl-C / Ctrl-D).
fn prompt(rl: &mut DefaultEditor, text: &str) -> Result<Option<String>> {
    match rl.readline(text) {
        Ok(line) => Ok(Some(line)),
        Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => Ok(None),
        Err(err) => Err(err.into()),
    }
}

// =============================================================================
// Handlers
// =============================================================================

async fn register_product(rl: &mut DefaultEditor, inventory: &Inventory) -> Result<()> {
    println!();
    println!("--- Register Product ---");

    let Some(name) = prompt(rl, "Name: ")? else {
        return Ok(());
    };
    let Some(category) = prompt(rl, "Category (blank for none): ")? else {
        return Ok(());
    };
    let Some(price_raw) = prompt(rl, "Unit price (e.g. 10.99): ")? else {
        return Ok(());
    };
    let price: Money = match price_raw.parse() {
        Ok(price) => price,
        Err(err) => {
            println!("Error: {err}");
            return Ok(());
        }
    };
    let Some(quantity_raw) = prompt(rl, "Starting quantity: ")? else {
        return Ok(());
    };
    let quantity: i64 = match quantity_raw.trim().parse() {
        Ok(quantity) => quantity,
        Err(_) => {
            println!("Error: quantity must be a whole number.");
            return Ok(());
        }
    };

    let category = category.trim();
    let category = (!category.is_empty()).then_some(category);

    match inventory
        .register_product(&name, category, price, quantity)
        .await
    {
        Ok(product) => println!(
            "Product '{}' registered with id {}.",
            product.name, product.id
        ),
        Err(err) => println!("Error: {err}"),
    }
    Ok(())
}

async fn movement_menu(rl: &mut DefaultEditor, inventory: &Inventory) -> Result<()> {
    println!();
    println!("--- Stock Movement ---");
    println!("1. Inbound (receive stock)");
    println!("2. Outbound (ship stock)");

    let Some(choice) = prompt(rl, "Choose an option (1 or 2): ")? else {
        return Ok(());
    };

    match choice.trim() {
        "1" => record_inflow(rl, inventory).await,
        "2" => record_outflow(rl, inventory).await,
        _ => {
            println!("Unknown option.");
            Ok(())
        }
    }
}

async fn record_inflow(rl: &mut DefaultEditor, inventory: &Inventory) -> Result<()> {
    let Some((product_id, quantity)) = ask_id_and_quantity(rl, "to receive")? else {
        return Ok(());
    };

    match inventory.record_inflow(product_id, quantity).await {
        Ok(change) => println!(
            "Received {} units; '{}' now holds {}.",
            quantity, change.product.name, change.product.quantity
        ),
        Err(err) => println!("Error: {err}"),
    }
    Ok(())
}

async fn record_outflow(rl: &mut DefaultEditor, inventory: &Inventory) -> Result<()> {
    let Some((product_id, quantity)) = ask_id_and_quantity(rl, "to ship")? else {
        return Ok(());
    };

    let Some(date_raw) = prompt(rl, "Outflow date YYYY-MM-DD (blank for today): ")? else {
        return Ok(());
    };
    let date_raw = date_raw.trim();
    let out_date = if date_raw.is_empty() {
        None
    } else {
        match validation::parse_out_date(date_raw) {
            Ok(date) => Some(date),
            Err(err) => {
                println!("Error: {err}");
                return Ok(());
            }
        }
    };

    match inventory.record_outflow(product_id, quantity, out_date).await {
        Ok(change) => {
            println!(
                "Shipped {} units; '{}' now holds {}.",
                quantity, change.product.name, change.product.quantity
            );
            if let Some(date) = out_date {
                println!("Outflow date recorded as {date}.");
            }
        }
        Err(err) => println!("Error: {err}"),
    }
    Ok(())
}

/// Asks for a product id and a quantity; `None` when cancelled or
/// unparseable (already reported).
fn ask_id_and_quantity(rl: &mut DefaultEditor, verb: &str) -> Result<Option<(i64, i64)>> {
    let Some(id_raw) = prompt(rl, "Product id: ")? else {
        return Ok(None);
    };
    let Ok(product_id) = id_raw.trim().parse::<i64>() else {
        println!("Error: id must be a whole number.");
        return Ok(None);
    };

    let Some(quantity_raw) = prompt(rl, &format!("Quantity {verb}: "))? else {
        return Ok(None);
    };
    let Ok(quantity) = quantity_raw.trim().parse::<i64>() else {
        println!("Error: quantity must be a whole number.");
        return Ok(None);
    };

    Ok(Some((product_id, quantity)))
}

async fn delete_product(rl: &mut DefaultEditor, inventory: &Inventory) -> Result<()> {
    println!();
    println!("--- Delete Product ---");

    let Some(id_raw) = prompt(rl, "Product id to delete: ")? else {
        return Ok(());
    };
    let Ok(product_id) = id_raw.trim().parse::<i64>() else {
        println!("Error: id must be a whole number.");
        return Ok(());
    };

    let product = match inventory.get_product(product_id).await {
        Ok(product) => product,
        Err(err) => {
            println!("Error: {err}");
            return Ok(());
        }
    };
    let history = match inventory.list_movements_for(product_id).await {
        Ok(history) => history,
        Err(err) => {
            println!("Error: {err}");
            return Ok(());
        }
    };

    println!(
        "This deletes '{}' (id {}) and its {} ledger entries.",
        product.name,
        product.id,
        history.len()
    );
    let Some(confirm) = prompt(rl, "Are you sure? (y/N): ")? else {
        return Ok(());
    };
    if !matches!(confirm.trim(), "y" | "Y") {
        println!("Deletion cancelled.");
        return Ok(());
    }

    match inventory.remove_product(product_id).await {
        Ok(removed) => println!("Product '{}' and its history deleted.", removed.name),
        Err(err) => println!("Error: {err}"),
    }
    Ok(())
}

async fn show_report(inventory: &Inventory) -> Result<()> {
    println!();
    println!("--- Stock Report ---");

    let products = match inventory.list_products().await {
        Ok(products) => products,
        Err(err) => {
            println!("Error: {err}");
            return Ok(());
        }
    };

    if products.is_empty() {
        println!("No products registered yet.");
        return Ok(());
    }

    tables::print_report(&products, chrono::Utc::now());
    Ok(())
}

async fn render_charts(inventory: &Inventory) -> Result<()> {
    println!();
    println!("--- Charts ---");

    let (products, movements) = match (
        inventory.list_products().await,
        inventory.list_movements().await,
    ) {
        (Ok(products), Ok(movements)) => (products, movements),
        (Err(err), _) | (_, Err(err)) => {
            println!("Error: {err}");
            return Ok(());
        }
    };

    match charts::render_all(&products, &movements, Path::new(".")) {
        Ok(paths) if paths.is_empty() => println!("Nothing to chart yet."),
        Ok(paths) => {
            for path in paths {
                println!("Wrote {}", path.display());
            }
        }
        Err(err) => println!("Error: {err}"),
    }
    Ok(())
}
