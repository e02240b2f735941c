use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use clap_complete::generate;
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use storefront_core::category::{
    aggregate, build_tree, build_tree_with_brands, Classifier, FALLBACK_PRIORITY,
    OTHER_SUBCATEGORY_ID, OTHER_SUBCATEGORY_NAME,
};
use storefront_core::config::Config;
use storefront_core::{
    load_products, paginate, read_products, CatalogError, Product, ProductFilter, Result,
    RuleTable, SortOrder,
};

mod args;
use args::{Cli, Commands, ConfigAction, RulesAction, Shell, SortArg};

fn main() -> ExitCode {
    let cli = Cli::parse();

    init_tracing(cli.verbose, cli.quiet);

    let base_dir = resolve_base_dir(cli.base_dir);
    tracing::debug!(base_dir = %base_dir.display(), "resolved base directory");
    let json = cli.json;

    let result = match cli.command {
        Some(Commands::Classify { category, name }) => {
            handle_classify(&base_dir, &category, &name, json)
        }
        Some(Commands::Subcategories {
            category,
            products,
            items,
        }) => handle_subcategories(&base_dir, &category, products.as_deref(), items, json),
        Some(Commands::Tree { products, brands }) => {
            handle_tree(&base_dir, products.as_deref(), brands, json)
        }
        Some(Commands::Filter {
            products,
            category,
            subcategory,
            brand,
            min_price,
            max_price,
            search,
            sort,
            page,
            per_page,
        }) => {
            let filter = ProductFilter {
                category,
                subcategory,
                brands: brand,
                min_price,
                max_price,
                search,
                sort: sort_order(sort),
            };
            handle_filter(&base_dir, products.as_deref(), &filter, page, per_page, json)
        }
        Some(Commands::Rules { action }) => handle_rules(action, &base_dir, json),
        Some(Commands::Config { action }) => handle_config(action, &base_dir),
        Some(Commands::Completions { shell }) => {
            handle_completions(shell);
            Ok(())
        }
        None => {
            Cli::command().print_help().ok();
            Ok(())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", "[ERROR]".red().bold(), e);
            ExitCode::from(e.exit_code() as u8)
        }
    }
}

/// `RUST_LOG` wins; otherwise --verbose / --quiet pick the level
fn init_tracing(verbose: bool, quiet: bool) {
    let default_level = if verbose {
        "debug"
    } else if quiet {
        "error"
    } else {
        "warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

fn handle_completions(shell: Shell) {
    let mut cmd = Cli::command();
    let shell = match shell {
        Shell::Bash => clap_complete::Shell::Bash,
        Shell::Zsh => clap_complete::Shell::Zsh,
        Shell::Fish => clap_complete::Shell::Fish,
        Shell::PowerShell => clap_complete::Shell::PowerShell,
        Shell::Elvish => clap_complete::Shell::Elvish,
    };
    generate(shell, &mut cmd, "storefront", &mut io::stdout());
}

fn sort_order(sort: SortArg) -> SortOrder {
    match sort {
        SortArg::Relevance => SortOrder::Relevance,
        SortArg::PriceAsc => SortOrder::PriceAsc,
        SortArg::PriceDesc => SortOrder::PriceDesc,
        SortArg::NameAsc => SortOrder::NameAsc,
    }
}

fn resolve_base_dir(cli_base: Option<PathBuf>) -> PathBuf {
    if let Some(base) = cli_base {
        return base;
    }

    if let Ok(base) = std::env::var("STOREFRONT_BASE") {
        return PathBuf::from(base);
    }

    dirs::home_dir()
        .map(|h| h.join(".storefront"))
        .unwrap_or_else(|| PathBuf::from(".storefront"))
}

/// Load config and build the rule table it describes
fn load_context(base_dir: &Path) -> Result<(Config, RuleTable)> {
    let config = Config::load(base_dir)?;
    let table = config.rule_table()?;
    Ok((config, table))
}

/// Products from --products, then catalog.products, then stdin
fn load_catalog(config: &Config, products: Option<&Path>) -> Result<Vec<Product>> {
    match products.or(config.catalog.products.as_deref()) {
        Some(path) if path != Path::new("-") => load_products(path),
        _ => read_products(io::stdin().lock()),
    }
}

fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn handle_classify(base_dir: &Path, category: &str, name: &str, json: bool) -> Result<()> {
    let (_, table) = load_context(base_dir)?;
    let classifier = Classifier::new(&table);

    let classification = classifier.classify(name, category);
    if json {
        return print_json(&classification);
    }

    match classification {
        Some(c) => {
            println!(
                "{} {} ({})",
                "Subcategory:".green(),
                c.name.cyan().bold(),
                c.id
            );
            println!("  Category: {}", c.category);
            println!("  Priority: {}", c.priority);
            if let Some(description) = &c.description {
                println!("  {}", description.dimmed());
            }
            if c.is_fallback() {
                println!(
                    "{} no keyword of '{}' matched this name.",
                    "Note:".yellow(),
                    category
                );
            }
        }
        None => {
            println!(
                "{} '{}' has no subcategory rules; products are grouped by brand.",
                "Note:".yellow(),
                category
            );
        }
    }
    Ok(())
}

fn handle_subcategories(
    base_dir: &Path,
    category: &str,
    products: Option<&Path>,
    items: bool,
    json: bool,
) -> Result<()> {
    let (config, table) = load_context(base_dir)?;
    let catalog = load_catalog(&config, products)?;
    let classifier = Classifier::new(&table);

    let groups = aggregate(&classifier, &catalog, category);
    if json {
        return print_json(&groups);
    }

    if groups.is_empty() {
        println!("No subcategories for '{}'.", category);
        return Ok(());
    }

    println!();
    for group in &groups {
        println!(
            "  {} ({}) {}",
            group.subcategory.name.cyan().bold(),
            group.subcategory.id,
            format!("[{}]", group.count).dimmed()
        );
        if items {
            for product in &group.products {
                println!("    - {}", product.name);
            }
        }
    }
    println!();
    Ok(())
}

fn handle_tree(base_dir: &Path, products: Option<&Path>, brands: bool, json: bool) -> Result<()> {
    let (config, table) = load_context(base_dir)?;
    let catalog = load_catalog(&config, products)?;
    let classifier = Classifier::new(&table);

    let tree = if brands {
        build_tree_with_brands(&classifier, &catalog)
    } else {
        build_tree(&classifier, &catalog)
    };
    if json {
        return print_json(&tree);
    }

    if tree.is_empty() {
        println!("No categories found.");
        return Ok(());
    }

    println!();
    for node in &tree {
        println!("{} ({})", node.name.cyan().bold(), node.count);
        for sub in &node.subcategories {
            println!("  ├── {} ({})", sub.subcategory.name, sub.count);
        }
    }
    println!();
    Ok(())
}

fn handle_filter(
    base_dir: &Path,
    products: Option<&Path>,
    filter: &ProductFilter,
    page: usize,
    per_page: Option<usize>,
    json: bool,
) -> Result<()> {
    let (config, table) = load_context(base_dir)?;
    let per_page = per_page.unwrap_or(config.catalog.per_page);
    if per_page == 0 {
        return Err(CatalogError::InvalidPageSize);
    }

    let catalog = load_catalog(&config, products)?;
    let classifier = Classifier::new(&table);

    let listing = paginate(filter.apply(&classifier, &catalog), page, per_page);
    if json {
        return print_json(&listing);
    }

    if listing.total_items == 0 {
        println!("No products match.");
        return Ok(());
    }

    println!();
    for product in &listing.items {
        let brand = product.brand_name().unwrap_or("-");
        println!(
            "  {} {} {}",
            format!("{:>10.2}", product.price).green(),
            product.name.bold(),
            format!("({}, {})", brand, product.category).dimmed()
        );
    }
    println!();
    println!(
        "Page {}/{} ({} products)",
        listing.page,
        listing.total_pages.max(1),
        listing.total_items
    );
    Ok(())
}

fn handle_rules(action: RulesAction, base_dir: &Path, json: bool) -> Result<()> {
    let (_, table) = load_context(base_dir)?;

    match action {
        RulesAction::List => {
            let categories = table.categories();
            if json {
                return print_json(&categories);
            }
            println!();
            for rules in categories {
                println!(
                    "  {} ({}) - {} subcategories",
                    rules.display_name.cyan().bold(),
                    rules.key,
                    rules.types.len()
                );
            }
            println!();
        }
        RulesAction::Show { category } => {
            let rules = table.lookup(&category);
            if json {
                return print_json(&rules);
            }
            let Some(rules) = rules else {
                println!(
                    "{} '{}' has no subcategory rules; products are grouped by brand.",
                    "Note:".yellow(),
                    category
                );
                return Ok(());
            };

            println!();
            println!("Category: {}", rules.display_name.cyan().bold());
            println!();
            for rule in &rules.types {
                println!("  {:>3}  {} ({})", rule.priority, rule.name.bold(), rule.id);
                println!("       keywords: {}", rule.keywords.join(", "));
            }
            println!(
                "  {:>3}  {} ({})",
                FALLBACK_PRIORITY,
                OTHER_SUBCATEGORY_NAME.bold(),
                OTHER_SUBCATEGORY_ID
            );
            println!();
        }
    }

    Ok(())
}

fn handle_config(action: ConfigAction, base_dir: &Path) -> Result<()> {
    match action {
        ConfigAction::Get { key } => {
            let config = Config::load(base_dir)?;
            match config.get(&key) {
                Some(value) => {
                    println!("{}", value);
                }
                None => {
                    return Err(CatalogError::ConfigKeyNotFound { key });
                }
            }
        }
        ConfigAction::Set { key, value } => {
            let mut config = Config::load(base_dir)?;
            config.set(&key, &value)?;
            config.save(base_dir)?;
            println!("{} {} = {}", "Set:".green(), key, value);
        }
        ConfigAction::List => {
            let config = Config::load(base_dir)?;
            println!();
            for (key, value) in config.list() {
                println!("{} = {}", key.cyan(), value);
            }
            println!();
        }
        ConfigAction::Path => {
            let path = Config::path(base_dir);
            println!("{}", path.display());
        }
        ConfigAction::Init => {
            let path = Config::init(base_dir)?;
            println!("{} {}", "Initialized:".green(), path.display());
        }
    }

    Ok(())
}
