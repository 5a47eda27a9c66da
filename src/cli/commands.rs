// src/cli/commands.rs
use clap::Subcommand;

#[derive(Subcommand, Debug)]
pub enum CliCommand {
    /// Generate passwords without storing anything
    Generate {
        /// Password length (at least 4)
        #[arg(long, short)]
        length: Option<usize>,

        /// How many passwords to print
        #[arg(long, short, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..=100))]
        count: u32,
    },

    /// Create an admin account or rotate its password
    Provision {
        /// Account email
        #[arg(required = true)]
        email: String,

        /// Role to assign (defaults to DEFAULT_ADMIN_ROLE)
        #[arg(long, short)]
        role: Option<String>,

        /// Password length (at least 4)
        #[arg(long, short)]
        length: Option<usize>,

        /// Skip the confirmation prompt
        #[arg(long, short)]
        yes: bool,
    },

    /// Check a password against the stored hash
    Verify {
        /// Account email
        #[arg(required = true)]
        email: String,
    },

    /// List admin accounts
    List,

    /// Remove an admin account
    Remove {
        /// Account email
        #[arg(required = true)]
        email: String,

        /// Skip the confirmation prompt
        #[arg(long, short)]
        yes: bool,
    },

    /// Score a password's strength (0-100)
    Strength {
        /// Password to score
        #[arg(required = true)]
        password: String,
    },
}
