use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use reorder_advisor::error::AdvisorError;
use reorder_advisor::io::{reporting, store::SalesStore, synthetic};
use reorder_advisor::model::record::parse_sale_date;
use reorder_advisor::{Catalog, EstimationParameters, ProductReport, ReorderPlanner};
use std::error::Error;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "reorder-advisor")]
#[command(author, version, about = "Reorder points and target stock from recent sales")]
struct Cli {
    /// JSON file holding every product's sales history
    #[arg(long, global = true, default_value = "sales_history.json")]
    store: PathBuf,

    /// Date to compute as of (YYYY-MM-DD). Defaults to today.
    #[arg(long, global = true, value_parser = parse_date_arg)]
    as_of: Option<NaiveDate>,

    /// Days averaged by the demand estimator
    #[arg(long, global = true)]
    window_days: Option<u32>,

    /// Days between placing a reorder and receiving stock
    #[arg(long, global = true)]
    lead_time_days: Option<u32>,

    /// Buffer days of demand held as safety stock
    #[arg(long, global = true)]
    safety_days: Option<u32>,

    /// Sales older than this many days are dropped on save
    #[arg(long, global = true)]
    retention_days: Option<u32>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Register a new product
    AddProduct { name: String },
    /// List known products
    List,
    /// Record (or overwrite) the units sold on a date
    RecordSale {
        name: String,
        #[arg(allow_hyphen_values = true)]
        quantity: i64,
        /// Sale date (YYYY-MM-DD). Defaults to the as-of date.
        #[arg(long, value_parser = parse_date_arg)]
        date: Option<NaiveDate>,
    },
    /// Show a product's most recent sales
    History {
        name: String,
        #[arg(long, default_value_t = 30)]
        limit: usize,
    },
    /// Show reorder recommendations for one or every product
    Recommend { name: Option<String> },
    /// Drop sales older than the retention horizon
    Prune,
    /// Write CSV files
    Export {
        #[command(subcommand)]
        target: ExportTarget,
    },
    /// Fill a product with synthetic daily sales ending on the as-of date
    Demo {
        name: String,
        #[arg(long, default_value_t = 60)]
        days: u32,
        #[arg(long, default_value_t = 10.0)]
        mean: f64,
        #[arg(long, default_value_t = 3.0)]
        std_dev: f64,
        #[arg(long, default_value_t = 42)]
        seed: u64,
    },
}

#[derive(Subcommand)]
enum ExportTarget {
    /// Recommendations for every product
    Recommendations { path: PathBuf },
    /// One product's sales history
    History { name: String, path: PathBuf },
}

fn parse_date_arg(raw: &str) -> Result<NaiveDate, String> {
    parse_sale_date(raw).ok_or_else(|| format!("'{}' is not a YYYY-MM-DD date", raw))
}

impl Cli {
    fn params(&self) -> EstimationParameters {
        let defaults = EstimationParameters::default();
        EstimationParameters {
            window_days: self.window_days.unwrap_or(defaults.window_days),
            lead_time_days: self.lead_time_days.unwrap_or(defaults.lead_time_days),
            safety_days: self.safety_days.unwrap_or(defaults.safety_days),
            retention_days: self.retention_days.unwrap_or(defaults.retention_days),
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    // RUST_LOG overrides the default level.
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .format_timestamp(None)
        .init();

    let cli = Cli::parse();
    run(cli)
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let params = cli.params();
    let as_of = cli.as_of.unwrap_or_else(|| Local::now().date_naive());
    let store = SalesStore::new(&cli.store);
    let planner = ReorderPlanner::new(params);

    let (mut catalog, load_report) = store.load()?;
    if load_report.merged_products > 0 {
        println!(
            "Note: merged {} product key(s) that differ only by surrounding spaces.",
            load_report.merged_products
        );
    }
    if load_report.skipped_records() > 0 || load_report.skipped_products > 0 {
        println!(
            "Note: skipped {} malformed sale(s) and {} unnamed product(s) in '{}'.",
            load_report.skipped_records(),
            load_report.skipped_products,
            store.path().display()
        );
    }

    match cli.command {
        Commands::AddProduct { name } => match catalog.create_product(&name) {
            Ok(name) => {
                store.save(&mut catalog, as_of, params.retention_days)?;
                println!("Product '{}' created.", name);
            }
            Err(AdvisorError::ProductExists(name)) => {
                println!("Product '{}' already exists.", name);
            }
            Err(e) => return Err(e.into()),
        },

        Commands::List => {
            if catalog.is_empty() {
                println!("No products yet. Create one with `add-product <name>`.");
            }
            for (name, history) in catalog.iter() {
                println!("{} ({} sale(s))", name, history.len());
            }
        }

        Commands::RecordSale {
            name,
            quantity,
            date,
        } => {
            let date = date.unwrap_or(as_of);
            let outcome = catalog.record_sale(&name, date, quantity)?;
            match outcome.previous() {
                Some(previous) if i64::from(previous) == quantity => println!(
                    "Sale on {} already recorded with {} unit(s) (unchanged).",
                    date, quantity
                ),
                Some(previous) => println!(
                    "Sale on {} updated from {} to {} unit(s).",
                    date, previous, quantity
                ),
                None => println!("Sale on {} ({} unit(s)) added.", date, quantity),
            }

            store.save(&mut catalog, as_of, params.retention_days)?;
            let report = planner.recommend(name.trim(), catalog.get(&name)?, as_of);
            print_reports(&[report], planner.params());
        }

        Commands::History { name, limit } => {
            let history = catalog.get(&name)?;
            if history.is_empty() {
                println!("No sales recorded for '{}'.", name.trim());
            }
            for record in history.records().iter().take(limit) {
                println!("{}  {:>6}", record.date, record.quantity);
            }
        }

        Commands::Recommend { name } => {
            let reports = match name {
                Some(name) => vec![planner.recommend(name.trim(), catalog.get(&name)?, as_of)],
                None => planner.recommend_all(&catalog, as_of),
            };
            print_reports(&reports, planner.params());
        }

        Commands::Prune => {
            let pruned = store.save(&mut catalog, as_of, params.retention_days)?;
            println!(
                "Removed {} sale(s) older than {} day(s).",
                pruned, params.retention_days
            );
        }

        Commands::Export { target } => match target {
            ExportTarget::Recommendations { path } => {
                let reports = planner.recommend_all(&catalog, as_of);
                reporting::write_recommendations(&path, &reports)?;
                println!("Success! Data written to {}", path.display());
            }
            ExportTarget::History { name, path } => {
                reporting::write_history(&path, name.trim(), catalog.get(&name)?)?;
                println!("Success! Data written to {}", path.display());
            }
        },

        Commands::Demo {
            name,
            days,
            mean,
            std_dev,
            seed,
        } => {
            ensure_product(&mut catalog, &name)?;
            let start = synthetic::start_of_run(as_of, days)?;
            let sales = synthetic::generate_normal_sales(start, days, mean, std_dev, seed)?;
            for sale in &sales {
                catalog.record_sale(&name, sale.date, i64::from(sale.quantity))?;
            }
            store.save(&mut catalog, as_of, params.retention_days)?;
            println!("Generated {} day(s) of sales for '{}'.", sales.len(), name.trim());

            let report = planner.recommend(name.trim(), catalog.get(&name)?, as_of);
            print_reports(&[report], planner.params());
        }
    }

    Ok(())
}

fn ensure_product(catalog: &mut Catalog, name: &str) -> Result<(), AdvisorError> {
    match catalog.create_product(name) {
        Ok(_) | Err(AdvisorError::ProductExists(_)) => Ok(()),
        Err(e) => Err(e),
    }
}

fn print_reports(reports: &[ProductReport], params: &EstimationParameters) {
    println!(
        "\n{:<24} {:>12} {:>14} {:>14}",
        "Product",
        format!("Avg/day ({}d)", params.window_days),
        "Optimal stock",
        "Reorder point"
    );
    for report in reports {
        println!(
            "{:<24} {:>12.2} {:>14} {:>14}",
            report.product, report.daily_rate, report.optimal_stock, report.reorder_point
        );
    }
    println!(
        "Based on lead time={}d and safety={}d.",
        params.lead_time_days, params.safety_days
    );
}
