mod balance;
mod cli;
mod db;
mod error;
mod fmt;
mod ledger;
mod models;
mod rates;
mod reconciler;
mod settings;

use clap::Parser;

use cli::{
    AccountsCommands, AuxCommands, Cli, Commands, EntryCommands, ProductsCommands, RateCommands,
    ReportCommands,
};

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Init { data_dir, store_name } => cli::init::run(data_dir, store_name),
        Commands::Accounts { command } => match command {
            AccountsCommands::Add { code, name, nature } => {
                cli::accounts::add(&code, &name, &nature)
            }
            AccountsCommands::List => cli::accounts::list(),
        },
        Commands::Entry { command } => match command {
            EntryCommands::Add { date, memo, debits, credits } => {
                cli::journal::add(&date, memo.as_deref(), &debits, &credits)
            }
            EntryCommands::List { month } => cli::journal::list(month.as_deref()),
        },
        Commands::Products { command } => match command {
            ProductsCommands::Add {
                sku,
                category,
                model,
                title,
                detail,
                cost_usd,
                price,
                stock,
            } => cli::products::add(&sku, &category, model, title, detail, cost_usd, price, stock),
            ProductsCommands::List => cli::products::list(),
        },
        Commands::Aux { command } => match command {
            AuxCommands::Add { account, name } => cli::aux::add(&account, &name),
            AuxCommands::Line { name, kind, amount, date, description } => {
                cli::aux::line(&name, &kind, amount, date.as_deref(), description.as_deref())
            }
            AuxCommands::Reconcile { name } => cli::aux::reconcile(&name),
        },
        Commands::Report { command } => match command {
            ReportCommands::Balance { from_date, to_date, month } => {
                cli::report::balance(from_date.as_deref(), to_date.as_deref(), month.as_deref())
            }
        },
        Commands::Rate { command } => match command {
            RateCommands::Set { value } => cli::rate::set(value),
            RateCommands::Show => cli::rate::show(),
        },
        Commands::Demo => cli::demo::run(),
        Commands::Status => cli::status::run(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
