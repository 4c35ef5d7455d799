//! Command line definitions

pub mod commands;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use uuid::Uuid;

use crate::roster::{ExportFormat, SheetSelector};

#[derive(Parser, Debug)]
#[command(name = "zwergenland", version, about = "Zwergenland roster and Microsoft 365 user manager")]
pub struct Cli {
    /// Increase log output (-v info, -vv debug); RUST_LOG takes precedence
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Settings file (default: <config dir>/zwergenland/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Read parent contacts from a roster workbook
    ReadUsers {
        #[command(flatten)]
        roster: RosterArgs,

        #[arg(long, value_enum, default_value_t = ExportFormat::Json)]
        format: ExportFormat,

        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List groups, optionally filtered by display name prefixes
    ListGroups {
        /// Display name prefix, repeatable (default: GROUP_PREFIXES / settings)
        #[arg(long = "prefix")]
        prefixes: Vec<String>,
    },

    /// Create a group unless one with that name exists
    CreateGroup {
        name: String,
        mail_nickname: String,

        /// Create a Microsoft 365 (Unified) group
        #[arg(long)]
        unified: bool,
    },

    /// Add a user to a group
    AddUser { group_id: Uuid, user_id: Uuid },

    /// List the members of a group
    ListMembers { group_id: Uuid },

    /// Look up a user by mail address
    FindUser { email: String },

    /// List guest users
    ListGuests {
        /// Only guests that are not in any group
        #[arg(long)]
        without_group: bool,
    },

    /// Delete guest users that are not in any group
    CleanupGuests {
        /// Only show what would be deleted
        #[arg(long)]
        dry_run: bool,

        /// Do not ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },

    /// Invite all roster contacts and add them to a group
    Sync(SyncArgs),

    /// Show the available sheet layouts
    Layouts,
}

/// Where to read contacts from
#[derive(Args, Debug, Clone)]
pub struct RosterArgs {
    /// Excel workbook (xlsx, xls or ods)
    pub input: PathBuf,

    /// Sheet layout: kindergarten, association or one from the settings file
    #[arg(long, default_value = "kindergarten")]
    pub layout: String,

    /// Sheet name or zero-based index (default: first sheet)
    #[arg(long)]
    pub sheet: Option<SheetSelector>,

    /// Zero-based row where data starts (default: row after the header)
    #[arg(long)]
    pub first_data_row: Option<usize>,
}

#[derive(Args, Debug)]
pub struct SyncArgs {
    #[command(flatten)]
    pub roster: RosterArgs,

    /// Display name of the target group
    #[arg(long)]
    pub group: String,

    /// Mail nickname used if the group has to be created
    #[arg(long)]
    pub mail_nickname: String,

    /// Create the group as Microsoft 365 (Unified) group
    #[arg(long)]
    pub unified: bool,

    /// Overwrite names of existing users that differ from the roster
    #[arg(long)]
    pub update_profiles: bool,

    /// Look everything up but change nothing
    #[arg(long)]
    pub dry_run: bool,

    /// Do not ask for confirmation
    #[arg(short, long)]
    pub yes: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_sync() {
        let cli = Cli::try_parse_from([
            "zwergenland",
            "-vv",
            "sync",
            "liste.xlsx",
            "--layout",
            "association",
            "--sheet",
            "1",
            "--group",
            "Verein",
            "--mail-nickname",
            "verein",
            "--dry-run",
        ])
        .unwrap();

        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Sync(args) => {
                assert_eq!(args.roster.layout, "association");
                assert_eq!(args.roster.sheet, Some(SheetSelector::Index(1)));
                assert!(args.dry_run);
                assert!(!args.yes);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_add_user_requires_uuids() {
        let result = Cli::try_parse_from(["zwergenland", "add-user", "not-a-uuid", "also-not"]);
        assert!(result.is_err());

        let cli = Cli::try_parse_from([
            "zwergenland",
            "add-user",
            "5c6a1f5e-8d1b-4e8f-9a36-2f4d1c7b9e10",
            "243b1de4-ad9f-421c-a933-d55305fb165d",
        ])
        .unwrap();
        assert!(matches!(cli.command, Commands::AddUser { .. }));
    }

    #[test]
    fn test_read_users_defaults() {
        let cli = Cli::try_parse_from(["zwergenland", "read-users", "kita.xlsx"]).unwrap();
        match cli.command {
            Commands::ReadUsers { roster, format, output } => {
                assert_eq!(roster.layout, "kindergarten");
                assert_eq!(roster.first_data_row, None);
                assert_eq!(format, ExportFormat::Json);
                assert!(output.is_none());
            }
            other => panic!("unexpected command {:?}", other),
        }
    }
}
