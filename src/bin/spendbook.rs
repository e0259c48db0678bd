use std::{
    fs::File,
    io::{self, Stdout},
    path::PathBuf,
    process::ExitCode,
};

use clap::{Parser, Subcommand};

use spendbook::{
    Error, FilterCriteria, Ledger, LedgerConfig, PaginationConfig, Presenter, TransactionForm,
    TransactionType, TypeFilter,
    category::categories_for,
    config::DEFAULT_TIMEZONE,
    derive_filter_options,
    export::{DEFAULT_EXPORT_FILE_NAME, write_csv},
    filter::parse_selection,
    logging::setup_logging,
    stores::{DEFAULT_STORAGE_KEY, FileStore},
    terminal::TerminalPresenter,
    timezone::today_in,
};

/// Record income and expenses and browse them page by page.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Directory holding the transaction record.
    #[arg(long, env = "SPENDBOOK_DATA_DIR", default_value = ".", global = true)]
    data_dir: PathBuf,

    /// The number of transactions shown per page.
    #[arg(long, default_value_t = 5, global = true)]
    page_size: usize,

    /// The canonical timezone used for today's date, e.g. "Asia/Kolkata".
    #[arg(long, env = "SPENDBOOK_TIMEZONE", default_value = DEFAULT_TIMEZONE, global = true)]
    timezone: String,

    /// Log more detail to stderr. Repeat for more.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Record a new transaction.
    Add {
        /// What the transaction was for.
        #[arg(long)]
        title: String,

        /// The amount as a whole number, e.g. "1,500".
        #[arg(long)]
        amount: String,

        /// Either "income" or "expense".
        #[arg(long = "type", value_name = "TYPE")]
        transaction_type: String,

        /// The category, defaults to the first category of the type.
        #[arg(long)]
        category: Option<String>,

        /// The date as YYYY-MM-DD, defaults to today.
        #[arg(long)]
        date: Option<String>,
    },

    /// Delete a transaction by its ID.
    Remove {
        /// The ID shown in the first column of `list`.
        #[arg(allow_negative_numbers = true)]
        id: i64,
    },

    /// Show a page of transactions with their totals.
    List {
        /// Only show transactions whose title contains this text.
        #[arg(long, default_value = "")]
        search: String,

        /// "all", "income" or "expense".
        #[arg(long = "type", value_name = "TYPE", default_value = "all")]
        transaction_type: TypeFilter,

        /// A category or "all".
        #[arg(long, default_value = "all")]
        category: String,

        /// A month as YYYY-MM or "all".
        #[arg(long, default_value = "all")]
        month: String,

        /// The page to show.
        #[arg(long, default_value_t = 1, allow_negative_numbers = true)]
        page: i64,
    },

    /// Show the months and categories that can be filtered on.
    Options,

    /// Show the categories available for new transactions.
    Categories {
        /// Only show the categories of this type.
        #[arg(long = "type", value_name = "TYPE")]
        transaction_type: Option<TransactionType>,
    },

    /// Export every transaction as CSV.
    Export {
        /// Write to this file instead of stdout.
        #[arg(short, long, num_args = 0..=1, default_missing_value = DEFAULT_EXPORT_FILE_NAME)]
        output: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    let args = Args::parse();
    setup_logging(args.verbose);

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("{error}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<(), Error> {
    let config = LedgerConfig {
        data_dir: args.data_dir,
        storage_key: DEFAULT_STORAGE_KEY.to_owned(),
        timezone: args.timezone,
        pagination: PaginationConfig {
            default_page_size: args.page_size,
            ..Default::default()
        },
    };
    config.validate()?;

    tracing::debug!("Using config {config:?}");

    match args.command {
        Command::Add {
            title,
            amount,
            transaction_type,
            category,
            date,
        } => {
            let form = TransactionForm {
                title,
                amount,
                transaction_type,
                category,
                date,
            };
            let today = today_in(&config.timezone)?;

            open_ledger(&config)?.add(&form, today)?;
        }
        Command::Remove { id } => {
            open_ledger(&config)?.remove(id)?;
        }
        Command::List {
            search,
            transaction_type,
            category,
            month,
            page,
        } => {
            let criteria = FilterCriteria {
                search_text: search,
                transaction_type,
                category: parse_selection(&category),
                month: parse_selection(&month),
            };

            let mut ledger = open_ledger(&config)?.with_criteria(criteria);
            ledger.go_to_page(page);
        }
        Command::Options => {
            let store = config.open_store();
            let options = derive_filter_options(store.all());

            terminal_presenter(&config).show_filter_options(&options);
        }
        Command::Categories { transaction_type } => {
            let types = match transaction_type {
                Some(transaction_type) => vec![transaction_type],
                None => vec![TransactionType::Income, TransactionType::Expense],
            };

            for transaction_type in types {
                println!(
                    "{}: {}",
                    transaction_type.label(),
                    categories_for(transaction_type).join(", ")
                );
            }
        }
        Command::Export { output } => {
            let store = config.open_store();

            match output {
                Some(path) => {
                    let file = File::create(&path).map_err(|error| {
                        Error::StorageError(format!("could not create {}: {error}", path.display()))
                    })?;
                    write_csv(store.all(), file)?;
                    eprintln!("Exported {} transactions to {}", store.all().len(), path.display());
                }
                None => write_csv(store.all(), io::stdout())?,
            }
        }
    }

    Ok(())
}

fn terminal_presenter(config: &LedgerConfig) -> TerminalPresenter<Stdout> {
    TerminalPresenter::new(io::stdout(), config.pagination.max_pages)
}

fn open_ledger(
    config: &LedgerConfig,
) -> Result<Ledger<FileStore, TerminalPresenter<Stdout>>, Error> {
    Ok(Ledger::new(
        config.open_store(),
        config.page_state()?,
        terminal_presenter(config),
    ))
}
