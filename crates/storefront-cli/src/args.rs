use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "storefront")]
#[command(about = "Browse catalog categories, subcategories and listings")]
#[command(version)]
pub struct Cli {
    /// Verbose output (debug logs)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Quiet output (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Base directory (default: ~/.storefront)
    #[arg(long, global = true)]
    pub base_dir: Option<PathBuf>,

    /// Print JSON instead of formatted text
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

#[derive(Clone, Copy, Debug, Default, ValueEnum)]
pub enum SortArg {
    /// Catalog order
    #[default]
    Relevance,
    PriceAsc,
    PriceDesc,
    NameAsc,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Classify a product name within a category
    Classify {
        /// Category name (e.g., "almacenamiento")
        category: String,

        /// Product name (e.g., "Disco SSD NVMe 1TB")
        name: String,
    },

    /// Show the subcategories of one category with counts
    Subcategories {
        /// Selected category
        category: String,

        /// Products JSON file ("-" for stdin; default: catalog.products or stdin)
        #[arg(short, long)]
        products: Option<PathBuf>,

        /// List the products of each subcategory
        #[arg(long)]
        items: bool,
    },

    /// Show the category → subcategory tree with counts
    Tree {
        /// Products JSON file ("-" for stdin; default: catalog.products or stdin)
        #[arg(short, long)]
        products: Option<PathBuf>,

        /// Fill categories without rules with brand subcategories
        #[arg(long)]
        brands: bool,
    },

    /// Filter, sort and page the product listing
    Filter {
        /// Products JSON file ("-" for stdin; default: catalog.products or stdin)
        #[arg(short, long)]
        products: Option<PathBuf>,

        /// Category name
        #[arg(short, long)]
        category: Option<String>,

        /// Subcategory id (requires --category)
        #[arg(short, long, requires = "category")]
        subcategory: Option<String>,

        /// Brand (repeatable)
        #[arg(short, long)]
        brand: Vec<String>,

        /// Minimum price (inclusive)
        #[arg(long)]
        min_price: Option<f64>,

        /// Maximum price (inclusive)
        #[arg(long)]
        max_price: Option<f64>,

        /// Text to search in product name or brand
        #[arg(long)]
        search: Option<String>,

        /// Sort order
        #[arg(long, value_enum, default_value_t = SortArg::Relevance)]
        sort: SortArg,

        /// Page number (1-based)
        #[arg(long, default_value = "1")]
        page: usize,

        /// Products per page (default: catalog.per_page)
        #[arg(long)]
        per_page: Option<usize>,
    },

    /// Inspect subcategory rules
    Rules {
        #[command(subcommand)]
        action: RulesAction,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand)]
pub enum RulesAction {
    /// List categories that have rules
    List,

    /// Show the rules of one category
    Show {
        /// Category name
        category: String,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Get a config value
    Get {
        /// Config key (e.g., catalog.per_page)
        key: String,
    },

    /// Set a config value
    Set {
        /// Config key (e.g., catalog.per_page)
        key: String,

        /// Value to set
        value: String,
    },

    /// List all config values
    List,

    /// Show config file path
    Path,

    /// Initialize config file with defaults
    Init,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_filter() {
        let cli = Cli::try_parse_from([
            "storefront",
            "filter",
            "--category",
            "almacenamiento",
            "--subcategory",
            "ssd",
            "--brand",
            "Kingston",
            "--brand",
            "Crucial",
            "--sort",
            "price-asc",
            "--per-page",
            "5",
        ])
        .unwrap();

        match cli.command {
            Some(Commands::Filter {
                category,
                subcategory,
                brand,
                sort,
                page,
                per_page,
                ..
            }) => {
                assert_eq!(category.as_deref(), Some("almacenamiento"));
                assert_eq!(subcategory.as_deref(), Some("ssd"));
                assert_eq!(brand, vec!["Kingston", "Crucial"]);
                assert!(matches!(sort, SortArg::PriceAsc));
                assert_eq!(page, 1);
                assert_eq!(per_page, Some(5));
            }
            _ => panic!("expected filter command"),
        }
    }

    #[test]
    fn test_subcategory_requires_category() {
        let result = Cli::try_parse_from(["storefront", "filter", "--subcategory", "ssd"]);
        assert!(result.is_err());
    }
}
