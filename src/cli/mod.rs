//! Interactive CLI over a single injected [`Tracker`].
//!
//! This is view-collaborator glue: every operation flows through the tracker
//! facade, and nothing here holds state of its own.

use colored::Colorize;
use dialoguer::{theme::ColorfulTheme, Confirm, Input, Select};

use crate::{
    config::{Config, ConfigManager},
    core::Tracker,
    domain::{parse_date, Expense, LineItemDraft, Period},
    errors::CliError,
    storage::JsonFileBackend,
};

const SUGGESTION_THRESHOLD: f64 = 0.84;

/// Entry point for the `spesa_core_cli` binary.
pub fn run_cli() -> Result<(), CliError> {
    let backend = JsonFileBackend::new_default()?;
    let mut tracker = Tracker::new(Box::new(backend));
    let config = ConfigManager::new()?.load()?;
    run_loop(&mut tracker, &config)
}

fn run_loop(tracker: &mut Tracker, config: &Config) -> Result<(), CliError> {
    let theme = ColorfulTheme::default();
    loop {
        println!();
        let choice = Select::with_theme(&theme)
            .with_prompt("Spesa")
            .items(&["Cart", "History", "Dashboard", "Stores", "Quit"])
            .default(0)
            .interact()?;
        match choice {
            0 => cart_menu(tracker, config, &theme)?,
            1 => history_menu(tracker, config, &theme)?,
            2 => dashboard(tracker, config, &theme)?,
            3 => stores_menu(tracker, &theme)?,
            _ => return Ok(()),
        }
    }
}

fn cart_menu(
    tracker: &mut Tracker,
    config: &Config,
    theme: &ColorfulTheme,
) -> Result<(), CliError> {
    loop {
        print_cart(tracker, config);
        let choice = Select::with_theme(theme)
            .with_prompt("Cart")
            .items(&[
                "Add product",
                "Remove product",
                "Checkout",
                "Clear cart",
                "Back",
            ])
            .default(0)
            .interact()?;
        match choice {
            0 => add_product(tracker, config, theme)?,
            1 => remove_product(tracker, theme)?,
            2 => {
                checkout(tracker, config, theme)?;
                return Ok(());
            }
            3 => {
                if Confirm::with_theme(theme)
                    .with_prompt("Discard every item in the cart?")
                    .default(false)
                    .interact()?
                {
                    tracker.cart_clear();
                }
            }
            _ => return Ok(()),
        }
    }
}

fn print_cart(tracker: &Tracker, config: &Config) {
    let cart = tracker.cart();
    if cart.is_empty() {
        println!("{}", "The cart is empty.".dimmed());
        return;
    }
    for item in cart.items() {
        println!(
            "  {} {} {}",
            item.name.bold(),
            config.format_amount(item.price),
            format!("[{}]", item.category).dimmed()
        );
    }
    println!(
        "  {} {}",
        "Total:".bold(),
        config.format_amount(cart.total()).green()
    );
}

fn add_product(
    tracker: &mut Tracker,
    config: &Config,
    theme: &ColorfulTheme,
) -> Result<(), CliError> {
    let name: String = Input::with_theme(theme)
        .with_prompt("Product name")
        .interact_text()?;
    let price: f64 = Input::with_theme(theme)
        .with_prompt("Price")
        .interact_text()?;
    let category: String = Input::with_theme(theme)
        .with_prompt("Category")
        .default("Other".to_string())
        .interact_text()?;
    let notes: String = Input::with_theme(theme)
        .with_prompt("Notes (optional)")
        .allow_empty(true)
        .interact_text()?;

    let mut draft = LineItemDraft::new(name, price).with_category(category);
    if !notes.trim().is_empty() {
        draft = draft.with_notes(notes);
    }

    match tracker.cart_add_item(draft) {
        Ok(addition) => {
            println!(
                "{} {} added.",
                "✓".green(),
                addition.item.name.bold()
            );
            if let Some(comparison) = addition.comparison {
                if comparison.is_increase() {
                    println!(
                        "{}",
                        format!(
                            "  {:.0}% above the best recorded price ({})",
                            comparison.percent_difference,
                            config.format_amount(comparison.reference_price)
                        )
                        .yellow()
                    );
                } else {
                    println!("{}", "  matches the best recorded price".green());
                }
            }
        }
        Err(err) => println!("{} {}", "✗".red(), err),
    }
    Ok(())
}

fn remove_product(tracker: &mut Tracker, theme: &ColorfulTheme) -> Result<(), CliError> {
    if tracker.cart().is_empty() {
        return Ok(());
    }
    let labels: Vec<String> = tracker
        .cart()
        .items()
        .iter()
        .map(|item| format!("{} ({:.2})", item.name, item.price))
        .collect();
    let index = Select::with_theme(theme)
        .with_prompt("Remove which product?")
        .items(&labels)
        .default(0)
        .interact()?;
    let id = tracker.cart().items()[index].id.clone();
    tracker.cart_remove_item(&id);
    Ok(())
}

fn checkout(
    tracker: &mut Tracker,
    config: &Config,
    theme: &ColorfulTheme,
) -> Result<(), CliError> {
    if tracker.cart().is_empty() {
        println!("{}", "Nothing to check out.".dimmed());
        return Ok(());
    }

    let mut stores = tracker.stores();
    stores.push("Other (type a name)".into());
    let picked = Select::with_theme(theme)
        .with_prompt("Store")
        .items(&stores)
        .default(0)
        .interact()?;
    let store = if picked == stores.len() - 1 {
        let typed: String = Input::with_theme(theme)
            .with_prompt("Store name")
            .interact_text()?;
        if let Some(suggestion) = suggest_store(&typed, &tracker.stores()) {
            let keep = Confirm::with_theme(theme)
                .with_prompt(format!("Did you mean `{suggestion}`?"))
                .default(true)
                .interact()?;
            if keep {
                suggestion
            } else {
                typed
            }
        } else {
            typed
        }
    } else {
        stores[picked].clone()
    };

    let default_date = tracker
        .cart()
        .pending_date()
        .map(|date| date.to_string())
        .unwrap_or_else(|| chrono::Utc::now().date_naive().to_string());
    let date: String = Input::with_theme(theme)
        .with_prompt("Date (YYYY-MM-DD)")
        .default(default_date)
        .validate_with(|input: &String| {
            parse_date(input)
                .map(|_| ())
                .ok_or("expected a YYYY-MM-DD calendar date")
        })
        .interact_text()?;

    match tracker.checkout(&store, &date) {
        Ok(expense) => println!(
            "{} Saved {} at {} on {}.",
            "✓".green(),
            config.format_amount(expense.total).bold(),
            expense.store,
            expense.date
        ),
        Err(err) => println!("{} {}", "✗".red(), err),
    }
    Ok(())
}

fn history_menu(
    tracker: &mut Tracker,
    config: &Config,
    theme: &ColorfulTheme,
) -> Result<(), CliError> {
    let query: String = Input::with_theme(theme)
        .with_prompt("Filter by store or product (empty for all)")
        .allow_empty(true)
        .interact_text()?;
    let matches = tracker.search_expenses(&query);
    if matches.is_empty() {
        println!("{}", "No matching expenses.".dimmed());
        return Ok(());
    }
    for expense in &matches {
        print_expense(expense, config);
    }

    if Confirm::with_theme(theme)
        .with_prompt("Delete one of these?")
        .default(false)
        .interact()?
    {
        let labels: Vec<String> = matches
            .iter()
            .map(|expense| {
                format!(
                    "{} {} {}",
                    expense.date,
                    expense.store,
                    config.format_amount(expense.total)
                )
            })
            .collect();
        let index = Select::with_theme(theme)
            .with_prompt("Delete which expense?")
            .items(&labels)
            .default(0)
            .interact()?;
        tracker.remove_expense(&matches[index].id.clone());
    }
    Ok(())
}

fn print_expense(expense: &Expense, config: &Config) {
    println!(
        "  {} {} {}",
        expense.date.to_string().bold(),
        expense.store,
        config.format_amount(expense.total).green()
    );
    for product in &expense.products {
        println!(
            "      {} {}",
            product.name,
            config.format_amount(product.price).dimmed()
        );
    }
}

fn dashboard(
    tracker: &Tracker,
    config: &Config,
    theme: &ColorfulTheme,
) -> Result<(), CliError> {
    let choice = Select::with_theme(theme)
        .with_prompt("Period")
        .items(&["All", "Day", "Week", "Month", "Year"])
        .default(0)
        .interact()?;
    let period = match choice {
        1 => Some(Period::Day),
        2 => Some(Period::Week),
        3 => Some(Period::Month),
        4 => Some(Period::Year),
        _ => None,
    };

    let stats = tracker.stats_for_period(period, None);
    println!();
    println!(
        "  {} {}   {} {}",
        "Total:".bold(),
        config.format_amount(stats.total).green(),
        "Expenses:".bold(),
        stats.count
    );
    if stats.count > 0 {
        println!(
            "  {} {} ({})   {} {} ({})   {} {}",
            "Max:".bold(),
            config.format_amount(stats.max.amount),
            stats.max.store,
            "Min:".bold(),
            config.format_amount(stats.min.amount),
            stats.min.store,
            "Avg:".bold(),
            config.format_amount(stats.avg_per_expense)
        );
    }
    if !stats.store_stats.is_empty() {
        println!("  {}", "By store:".bold());
        for (store, totals) in &stats.store_stats {
            println!(
                "    {store}: {} across {} expense(s)",
                config.format_amount(totals.total),
                totals.count
            );
        }
    }
    if !stats.category_stats.is_empty() {
        println!("  {}", "By category:".bold());
        for (category, totals) in &stats.category_stats {
            println!(
                "    {category}: {} across {} item(s)",
                config.format_amount(totals.total),
                totals.count
            );
        }
    }
    Ok(())
}

fn stores_menu(tracker: &mut Tracker, theme: &ColorfulTheme) -> Result<(), CliError> {
    loop {
        for store in tracker.stores() {
            println!("  {store}");
        }
        let choice = Select::with_theme(theme)
            .with_prompt("Stores")
            .items(&["Add", "Rename", "Remove", "Reset defaults", "Back"])
            .default(4)
            .interact()?;
        match choice {
            0 => {
                let name: String = Input::with_theme(theme)
                    .with_prompt("New store name")
                    .interact_text()?;
                if !tracker.add_store(&name) {
                    println!("{}", "Already present or invalid.".yellow());
                }
            }
            1 => {
                let stores = tracker.stores();
                if stores.is_empty() {
                    continue;
                }
                let index = Select::with_theme(theme)
                    .with_prompt("Rename which store?")
                    .items(&stores)
                    .default(0)
                    .interact()?;
                let new_name: String = Input::with_theme(theme)
                    .with_prompt("New name")
                    .interact_text()?;
                if !tracker.rename_store(&stores[index], &new_name) {
                    println!("{}", "Rename failed (duplicate or invalid name).".yellow());
                }
            }
            2 => {
                let stores = tracker.stores();
                if stores.is_empty() {
                    continue;
                }
                let index = Select::with_theme(theme)
                    .with_prompt("Remove which store?")
                    .items(&stores)
                    .default(0)
                    .interact()?;
                if Confirm::with_theme(theme)
                    .with_prompt(format!("Remove `{}`?", stores[index]))
                    .default(false)
                    .interact()?
                {
                    tracker.remove_store(&stores[index]);
                }
            }
            3 => {
                if Confirm::with_theme(theme)
                    .with_prompt("Replace the list with the default stores?")
                    .default(false)
                    .interact()?
                {
                    tracker.reset_default_stores();
                }
            }
            _ => return Ok(()),
        }
    }
}

/// Closest known store name for a typed one, when it is similar enough.
fn suggest_store(input: &str, stores: &[String]) -> Option<String> {
    let needle = input.trim().to_lowercase();
    if needle.is_empty() {
        return None;
    }
    stores
        .iter()
        .map(|store| (store, strsim::jaro_winkler(&needle, &store.to_lowercase())))
        .filter(|(store, score)| *score >= SUGGESTION_THRESHOLD && !store.eq_ignore_ascii_case(input.trim()))
        .max_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(store, _)| store.clone())
}
