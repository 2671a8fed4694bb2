//! Vitrine Storefront CLI

use std::process;

use clap::{Args, Parser, Subcommand};
use jiff::Timestamp;
use rustc_hash::FxHashMap;
use uuid::Uuid;
use vitrine_app::{
    context::AppContext,
    domain::catalog::models::{
        DiscountRule, DiscountUuid, NewDiscount, NewProduct, ProductUuid,
    },
};

#[derive(Debug, Parser)]
#[command(name = "vitrine-app", about = "Vitrine storefront CLI", long_about = None)]
struct Cli {
    /// Directory holding the storefront's persisted state
    #[arg(long, env = "VITRINE_DATA_DIR", default_value = ".vitrine")]
    data_dir: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Product(ProductCommand),
    Discount(DiscountCommand),
    Order(OrderCommand),
}

#[derive(Debug, Args)]
struct ProductCommand {
    #[command(subcommand)]
    command: ProductSubcommand,
}

#[derive(Debug, Subcommand)]
enum ProductSubcommand {
    /// List all products
    List,
    /// Add a product to the catalog
    Add(AddProductArgs),
    /// Delete a product by uuid
    Delete(DeleteProductArgs),
}

#[derive(Debug, Args)]
struct AddProductArgs {
    /// Product display name
    #[arg(long)]
    name: String,

    /// Price in minor units
    #[arg(long)]
    price: u64,

    /// Merchandising category
    #[arg(long)]
    category: String,

    /// Product description
    #[arg(long, default_value = "")]
    description: String,

    /// Primary image URL
    #[arg(long, default_value = "")]
    image: String,

    /// Mark the product as featured
    #[arg(long)]
    featured: bool,

    /// Mark the product as a new arrival
    #[arg(long)]
    new_arrival: bool,
}

#[derive(Debug, Args)]
struct DeleteProductArgs {
    /// Product uuid
    uuid: Uuid,
}

#[derive(Debug, Args)]
struct DiscountCommand {
    #[command(subcommand)]
    command: DiscountSubcommand,
}

#[derive(Debug, Subcommand)]
enum DiscountSubcommand {
    /// List all discount codes
    List,
    /// Add a discount code
    Add(AddDiscountArgs),
    /// Delete a discount by uuid
    Delete(DeleteDiscountArgs),
}

#[derive(Debug, Args)]
struct AddDiscountArgs {
    /// Discount code
    #[arg(long)]
    code: String,

    /// Percentage off; mutually exclusive with --amount
    #[arg(long, conflicts_with = "amount")]
    percent: Option<u16>,

    /// Fixed amount off in minor units; mutually exclusive with --percent
    #[arg(long)]
    amount: Option<u64>,

    /// Minimum qualifying amount in minor units
    #[arg(long)]
    min_amount: Option<u64>,

    /// Expiry instant, RFC 3339
    #[arg(long)]
    expires: Timestamp,

    /// Maximum number of uses
    #[arg(long)]
    usage_limit: Option<u32>,

    /// Create the code in a deactivated state
    #[arg(long)]
    inactive: bool,
}

#[derive(Debug, Args)]
struct DeleteDiscountArgs {
    /// Discount uuid
    uuid: Uuid,
}

#[derive(Debug, Args)]
struct OrderCommand {
    #[command(subcommand)]
    command: OrderSubcommand,
}

#[derive(Debug, Subcommand)]
enum OrderSubcommand {
    /// List all placed orders
    List,
}

pub fn main() {
    let _env = dotenvy::dotenv();

    let cli = Cli::parse();

    if let Err(error) = run(cli) {
        eprintln!("{error}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), String> {
    let app = AppContext::from_data_dir(&cli.data_dir)
        .map_err(|error| format!("failed to open data directory: {error}"))?;

    match cli.command {
        Commands::Product(ProductCommand { command }) => run_product(&app, command),
        Commands::Discount(DiscountCommand { command }) => run_discount(&app, command),
        Commands::Order(OrderCommand { command }) => run_order(&app, command),
    }
}

fn run_product(app: &AppContext, command: ProductSubcommand) -> Result<(), String> {
    match command {
        ProductSubcommand::List => {
            let products = app
                .catalog
                .list_products()
                .map_err(|error| format!("failed to list products: {error}"))?;

            for product in products {
                println!(
                    "{}  {:>10}  {}  [{}]",
                    product.uuid, product.price, product.name, product.category
                );
            }

            Ok(())
        }
        ProductSubcommand::Add(args) => {
            let product = app
                .catalog
                .create_product(NewProduct {
                    name: args.name,
                    price: args.price,
                    original_price: None,
                    description: args.description,
                    category: args.category,
                    image: args.image,
                    images: None,
                    in_stock: true,
                    featured: args.featured,
                    new_arrival: args.new_arrival,
                    discount: None,
                    rating: 0.0,
                    reviews: 0,
                    specifications: FxHashMap::default(),
                })
                .map_err(|error| format!("failed to add product: {error}"))?;

            println!("product_uuid: {}", product.uuid);

            Ok(())
        }
        ProductSubcommand::Delete(args) => app
            .catalog
            .delete_product(ProductUuid::from_uuid(args.uuid))
            .map_err(|error| format!("failed to delete product: {error}")),
    }
}

fn run_discount(app: &AppContext, command: DiscountSubcommand) -> Result<(), String> {
    match command {
        DiscountSubcommand::List => {
            let discounts = app
                .catalog
                .list_discounts()
                .map_err(|error| format!("failed to list discounts: {error}"))?;

            for discount in discounts {
                println!(
                    "{}  {}  {}  expires {}  used {}/{}",
                    discount.uuid,
                    discount.code,
                    discount.rule.to_str(),
                    discount.expires_at,
                    discount.used_count,
                    discount
                        .usage_limit
                        .map_or_else(|| "-".to_string(), |limit| limit.to_string()),
                );
            }

            Ok(())
        }
        DiscountSubcommand::Add(args) => {
            let rule = match (args.percent, args.amount) {
                (Some(value), None) => DiscountRule::Percentage { value },
                (None, Some(value)) => DiscountRule::Fixed { value },
                _ => return Err("specify exactly one of --percent or --amount".to_string()),
            };

            let discount = app
                .catalog
                .create_discount(NewDiscount {
                    code: args.code,
                    rule,
                    min_amount: args.min_amount,
                    expires_at: args.expires,
                    is_active: !args.inactive,
                    usage_limit: args.usage_limit,
                })
                .map_err(|error| format!("failed to add discount: {error}"))?;

            println!("discount_uuid: {}", discount.uuid);

            Ok(())
        }
        DiscountSubcommand::Delete(args) => app
            .catalog
            .delete_discount(DiscountUuid::from_uuid(args.uuid))
            .map_err(|error| format!("failed to delete discount: {error}")),
    }
}

fn run_order(app: &AppContext, command: OrderSubcommand) -> Result<(), String> {
    match command {
        OrderSubcommand::List => {
            let orders = app
                .carts
                .orders()
                .map_err(|error| format!("failed to list orders: {error}"))?;

            for order in orders {
                println!(
                    "{}  {}  {:>10}  {}  {}",
                    order.uuid,
                    order.status.to_str(),
                    order.total,
                    order.user_uuid,
                    order.created_at,
                );
            }

            Ok(())
        }
    }
}
