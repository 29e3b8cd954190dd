//! # Reminder Form CLI
//!
//! Headless front end over the persisted form.
//!
//! ```text
//! reminder show
//! reminder set <field> <value>
//! reminder reminders '[{"n":10,"unit":"m"}]'
//! reminder schedule
//! reminder cancel
//! ```

use anyhow::{bail, Result};
use dotenvy::dotenv;
use log::info;
use std::sync::Arc;

use reminder_form::features::FormField;
use reminder_form::{
    Config, FormController, HttpAppointmentApi, SqliteStore, SubmitAction, SystemClock,
};

const USAGE: &str = "usage: reminder <show | schedule | cancel | set <field> <value> | reminders <json>>";

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv().ok();

    let config = Config::from_env()?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&config.log_level))
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some(command) = args.first() else {
        bail!(USAGE);
    };

    let store = SqliteStore::open(&config.store_path)?;
    let api = HttpAppointmentApi::new(&config)?;
    let mut controller = FormController::new(
        &config,
        Box::new(store),
        Arc::new(api),
        Arc::new(SystemClock),
    );
    controller.restore()?;

    match command.as_str() {
        "show" => {}
        "set" => {
            let (Some(name), Some(value)) = (args.get(1), args.get(2)) else {
                bail!(USAGE);
            };
            let field: FormField = name.parse()?;
            controller.set_field(field, value.as_str())?;
            info!("{} updated", field.label());
        }
        "reminders" => {
            let Some(serialized) = args.get(1) else {
                bail!(USAGE);
            };
            controller.set_reminders(serialized)?;
        }
        "schedule" | "cancel" => {
            let action = if command == "schedule" {
                SubmitAction::Schedule
            } else {
                SubmitAction::Cancel
            };
            let outcome = controller.submit(action).await?;
            println!("{}", outcome.user_message());
            if !outcome.is_success() {
                std::process::exit(1);
            }
            return Ok(());
        }
        other => bail!("unknown command '{other}'\n{USAGE}"),
    }

    print_form(&controller);
    Ok(())
}

fn print_form(controller: &FormController) {
    let fields = controller.fields();
    for field in FormField::all() {
        println!("{:<12} {}", field.label(), fields.get(*field));
    }

    println!("Reminders:");
    for entry in controller.editor().entries() {
        let flag = if entry.is_invalid() { "  (in the past)" } else { "" };
        if entry.count_locked() {
            println!("  {}{flag}", entry.unit().label());
        } else {
            println!("  {} {} before{flag}", entry.count(), entry.unit().label());
        }
    }

    let validation = controller.validation();
    if validation.is_valid() {
        println!("Ready to submit");
    } else {
        for issue in validation.issues() {
            println!("! {issue}");
        }
    }
}
