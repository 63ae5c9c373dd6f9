use clap::{Args, Parser, Subcommand};

use crate::models::{option_label, UserDraft, UserRecord, COUNTRY_OPTIONS, ROLE_OPTIONS, STATE_OPTIONS};

#[derive(Parser)]
#[command(name = "useradmin")]
#[command(about = "Terminal admin console for managing user records")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Use the in-memory backend instead of the remote API
    #[arg(long, global = true)]
    pub offline: bool,

    /// Base URL of the user API (overrides USERADMIN_API_URL)
    #[arg(long, global = true)]
    pub api_url: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Launch the interactive terminal UI (default)
    Tui,

    /// List users
    List {
        /// Page to fetch
        #[arg(short, long, default_value = "1")]
        page: i64,

        /// Page size (defaults to USERADMIN_PAGE_LIMIT)
        #[arg(short, long)]
        limit: Option<u32>,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Create a user through the signup endpoint
    Add(AddArgs),

    /// Delete a user by id
    Delete {
        /// User id (`_id` from the API)
        id: String,
    },
}

/// Field values for `add`; checked with the same rules as the form
#[derive(Args, Debug, Clone)]
pub struct AddArgs {
    #[arg(long)]
    pub first_name: String,

    #[arg(long)]
    pub last_name: String,

    #[arg(long)]
    pub email: String,

    /// Address / street
    #[arg(long)]
    pub address: String,

    #[arg(long)]
    pub city: String,

    /// Country code
    #[arg(long, value_parser = ["US", "CA", "VN"])]
    pub country: String,

    /// State / province
    #[arg(long, value_parser = ["Phu nhuan", "Q1", "Q2"])]
    pub state: String,

    #[arg(long, value_parser = ["admin", "operator", "member"])]
    pub role: String,

    /// Billing address differs from the address above
    #[arg(long)]
    pub billing: bool,
}

impl From<AddArgs> for UserDraft {
    fn from(args: AddArgs) -> Self {
        Self {
            first_name: args.first_name,
            last_name: args.last_name,
            email: args.email,
            address: args.address,
            city: args.city,
            country: args.country,
            state: args.state,
            role: args.role,
            billing: args.billing,
        }
    }
}

const TABLE_HEADER: [&str; 7] = ["ID", "Name", "Email", "City", "Country", "State", "Role"];

/// Fixed-width text table of users
pub fn format_user_table(users: &[UserRecord]) -> String {
    let mut out = format!(
        "{:<26} {:<28} {:<30} {:<14} {:<14} {:<10} {:<9}\n",
        TABLE_HEADER[0],
        TABLE_HEADER[1],
        TABLE_HEADER[2],
        TABLE_HEADER[3],
        TABLE_HEADER[4],
        TABLE_HEADER[5],
        TABLE_HEADER[6]
    );
    out.push_str(&"-".repeat(137));
    out.push('\n');

    for user in users {
        out.push_str(&format!(
            "{:<26} {:<28} {:<30} {:<14} {:<14} {:<10} {:<9}\n",
            truncate_string(user.key(), 26),
            truncate_string(&user.display_name(), 28),
            truncate_string(&user.email, 30),
            truncate_string(&user.city, 14),
            option_label(COUNTRY_OPTIONS, &user.country),
            option_label(STATE_OPTIONS, &user.state),
            option_label(ROLE_OPTIONS, &user.role),
        ));
    }
    out
}

/// Truncate to `max_chars` characters with an ellipsis
pub fn truncate_string(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
