use std::path::PathBuf;

use clap::{Args as ClapArgs, Parser, Subcommand};
use serde_json::Value;
use storefront_http::HttpResponse;
use storefront_stores::{Error, Pagination, RequestParameters, StoreConfig, Stores, UserQuery};

mod logging;

/// storefront - product and user stores from the command line
#[derive(Parser, Debug)]
#[command(name = "storefront")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Config file (defaults to the user config dir)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Override the API base URL
    #[arg(long, global = true)]
    api_base: Option<String>,

    /// Debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Product actions
    #[command(subcommand)]
    Products(ProductCommand),

    /// User actions
    #[command(subcommand)]
    Users(UserCommand),
}

#[derive(Subcommand, Debug)]
enum ProductCommand {
    /// List products
    List {
        #[arg(long)]
        page: Option<u32>,
        #[arg(long)]
        items_per_page: Option<u32>,
    },
    /// Show one product
    Get { id: String },
    /// Create a product from a JSON payload
    Create { payload: String },
    /// Replace a product with a JSON payload
    Update { id: String, payload: String },
    /// Delete a product
    Delete { id: String },
}

#[derive(ClapArgs, Debug)]
struct UserFilters {
    /// Free-text search
    #[arg(short, long)]
    q: Option<String>,
    #[arg(long)]
    role: Option<String>,
    #[arg(long)]
    plan: Option<String>,
    #[arg(long)]
    status: Option<String>,
    #[arg(long)]
    page: Option<u32>,
    #[arg(long)]
    items_per_page: Option<u32>,
}

impl From<UserFilters> for UserQuery {
    fn from(filters: UserFilters) -> Self {
        let options = (filters.page.is_some() || filters.items_per_page.is_some()).then(|| {
            Pagination {
                page: filters.page,
                items_per_page: filters.items_per_page,
            }
        });

        UserQuery {
            q: filters.q,
            role: filters.role,
            plan: filters.plan,
            status: filters.status,
            options,
        }
    }
}

#[derive(Subcommand, Debug)]
enum UserCommand {
    /// List users
    List(UserFilters),
    /// Show one user
    Get { id: String },
    /// Add a user from a JSON payload
    Add { payload: String },
    /// Delete a user
    Delete { id: String },
}

fn page_params(page: Option<u32>, items_per_page: Option<u32>) -> RequestParameters {
    let mut params = RequestParameters::new();
    if let Some(page) = page {
        params = params.with_query("page", page);
    }
    if let Some(n) = items_per_page {
        params = params.with_query("itemsPerPage", n);
    }
    params
}

fn parse_payload(payload: &str) -> Result<Value, Error> {
    Ok(serde_json::from_str(payload)?)
}

async fn run(args: Args) -> Result<HttpResponse, Error> {
    let mut config = StoreConfig::load(args.config.as_deref())?;
    if let Some(base) = args.api_base {
        config.api_base = base;
    }
    let stores = Stores::from_config(&config)?;

    match args.command {
        Command::Products(cmd) => match cmd {
            ProductCommand::List {
                page,
                items_per_page,
            } => {
                stores
                    .products
                    .fetch_products(page_params(page, items_per_page))
                    .await
            }
            ProductCommand::Get { id } => stores.products.fetch_product(id).await,
            ProductCommand::Create { payload } => {
                stores
                    .products
                    .create_product(parse_payload(&payload)?)
                    .await
            }
            ProductCommand::Update { id, payload } => {
                stores
                    .products
                    .update_product(id, parse_payload(&payload)?)
                    .await
            }
            ProductCommand::Delete { id } => stores.products.delete_product(id).await,
        },
        Command::Users(cmd) => match cmd {
            UserCommand::List(filters) => stores.users.fetch_users(&filters.into()).await,
            UserCommand::Get { id } => stores.users.fetch_user(id).await,
            UserCommand::Add { payload } => stores.users.add_user(parse_payload(&payload)?).await,
            UserCommand::Delete { id } => stores.users.delete_user(id).await,
        },
    }
}

fn print_response(response: &HttpResponse) {
    println!("{} {}", response.status, response.status_text);
    match &response.body {
        Value::Null => {
            if let Some(text) = response.body_text.as_deref().filter(|t| !t.is_empty()) {
                println!("{}", text);
            }
        }
        body => match serde_json::to_string_pretty(body) {
            Ok(pretty) => println!("{}", pretty),
            Err(_) => println!("{}", body),
        },
    }
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    logging::init(args.verbose);

    match run(args).await {
        Ok(response) => print_response(&response),
        Err(e) => {
            tracing::debug!(error = ?e, "command failed");
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
