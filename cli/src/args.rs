use std::path::PathBuf;

use clap::{Args as ClapArgs, Parser, Subcommand, builder::RangedU64ValueParser};
use nutriscan_core::domain::common::{
    DEFAULT_RECENT_SEARCH_LIMIT, DEFAULT_SEARCH_DEBOUNCE_MS, DEFAULT_SEARCH_RESULT_LIMIT,
    NutriConfig, PreferencesConfig, SearchConfig, SupabaseConfig,
};

#[derive(Debug, Clone, Parser)]
#[command(name = "nutriscan", version, about = "Look up, compare and keep track of foods")]
pub struct Args {
    #[command(flatten)]
    pub supabase: SupabaseArgs,

    #[command(flatten)]
    pub preferences: PreferencesArgs,

    #[command(flatten)]
    pub search: SearchArgs,

    #[command(flatten)]
    pub log: LogArgs,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct SupabaseArgs {
    #[arg(long = "supabase-url", env = "SUPABASE_URL", global = true, default_value = "")]
    pub url: String,

    #[arg(long = "supabase-anon-key", env = "SUPABASE_ANON_KEY", global = true, default_value = "", hide_env_values = true)]
    pub anon_key: String,

    #[arg(long = "http-timeout", env = "NUTRISCAN_HTTP_TIMEOUT", global = true, default_value_t = 10)]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct PreferencesArgs {
    #[arg(long = "data-dir", env = "NUTRISCAN_DATA_DIR", global = true, default_value = ".nutriscan")]
    pub directory: PathBuf,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct SearchArgs {
    #[arg(long = "search-debounce-ms", env = "NUTRISCAN_SEARCH_DEBOUNCE_MS", global = true, default_value_t = DEFAULT_SEARCH_DEBOUNCE_MS)]
    pub debounce_ms: u64,

    #[arg(long = "recent-limit", env = "NUTRISCAN_RECENT_LIMIT", global = true, default_value_t = DEFAULT_RECENT_SEARCH_LIMIT, value_parser = RangedU64ValueParser::<usize>::new().range(1..))]
    pub recent_limit: usize,

    #[arg(long = "result-limit", env = "NUTRISCAN_RESULT_LIMIT", global = true, default_value_t = DEFAULT_SEARCH_RESULT_LIMIT)]
    pub result_limit: u32,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct LogArgs {
    /// Emit logs as JSON lines.
    #[arg(long = "log-json", env = "LOG_JSON", global = true, default_value_t = false)]
    pub json: bool,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Resolve a scanned barcode.
    Scan { barcode: String },

    /// Search foods by name and remember the search.
    Search {
        #[arg(required = true)]
        text: Vec<String>,
    },

    /// Register a food that is not in the catalogue yet.
    Add(AddArgs),

    /// Change some fields of a registered food.
    Update(UpdateArgs),

    #[command(subcommand)]
    Favorites(FavoritesCommand),

    #[command(subcommand)]
    History(HistoryCommand),

    /// Compare up to three foods by barcode.
    Compare {
        #[arg(required = true)]
        barcodes: Vec<String>,
    },

    Login {
        email: String,
        #[arg(long, env = "NUTRISCAN_PASSWORD", hide_env_values = true)]
        password: String,
    },

    Signup {
        name: String,
        email: String,
        #[arg(long, env = "NUTRISCAN_PASSWORD", hide_env_values = true)]
        password: String,
        /// Defaults to `--password`.
        #[arg(long)]
        confirm_password: Option<String>,
    },

    Logout,

    Whoami,

    #[command(subcommand)]
    Profile(ProfileCommand),
}

#[derive(Debug, Clone, ClapArgs)]
pub struct AddArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub barcode: String,
    #[arg(long)]
    pub brand: Option<String>,
    #[arg(long)]
    pub calories: String,
    #[arg(long)]
    pub protein: String,
    #[arg(long = "carbs")]
    pub carbohydrates: String,
    #[arg(long)]
    pub fat: String,
    #[arg(long)]
    pub sugar: Option<String>,
    #[arg(long)]
    pub fiber: Option<String>,
    #[arg(long)]
    pub sodium: Option<String>,
    #[arg(long)]
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct UpdateArgs {
    pub id: String,
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub barcode: Option<String>,
    #[arg(long)]
    pub brand: Option<String>,
    #[arg(long)]
    pub calories: Option<f64>,
    #[arg(long)]
    pub protein: Option<f64>,
    #[arg(long = "carbs")]
    pub carbohydrates: Option<f64>,
    #[arg(long)]
    pub fat: Option<f64>,
    #[arg(long)]
    pub sugar: Option<f64>,
    #[arg(long)]
    pub fiber: Option<f64>,
    #[arg(long)]
    pub sodium: Option<f64>,
    #[arg(long)]
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Subcommand)]
pub enum FavoritesCommand {
    List,
    /// Add or remove the food with this barcode.
    Toggle { barcode: String },
}

#[derive(Debug, Clone, Subcommand)]
pub enum HistoryCommand {
    List,
    Clear,
    /// Remove one entry, numbered as in `history list`.
    Remove { position: usize },
}

#[derive(Debug, Clone, Subcommand)]
pub enum ProfileCommand {
    Show,
    SetName { name: String },
    SetAvatar { url: String },
}

impl From<Args> for NutriConfig {
    fn from(args: Args) -> Self {
        Self {
            supabase: SupabaseConfig {
                url: args.supabase.url,
                anon_key: args.supabase.anon_key,
                timeout_secs: args.supabase.timeout_secs,
            },
            preferences: PreferencesConfig {
                directory: args.preferences.directory,
            },
            search: SearchConfig {
                debounce_ms: args.search.debounce_ms,
                recent_limit: args.search.recent_limit,
                result_limit: args.search.result_limit,
            },
        }
    }
}
