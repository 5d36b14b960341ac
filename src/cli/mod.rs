//! CLI command definitions and handlers

use std::path::PathBuf;

use clap::{Parser, Subcommand};
pub use clap_complete::Shell;

pub mod apply;
pub mod args;
pub mod auth;
pub mod context;
pub mod conversation;
pub mod handlers;
pub mod init;
pub mod member;
pub mod status;
pub mod user;
pub mod usergroup;

pub use args::{ConversationFilterArgs, OutputFormat, PaginationArgs};
pub use context::CommandContext;

/// slackform - declarative companion for the Slack Web API
#[derive(Parser, Debug)]
#[command(name = "slackform")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (pretty, table, json)
    #[arg(
        long,
        global = true,
        env = "SLACKFORM_FORMAT",
        hide_env = true,
        hide_possible_values = true
    )]
    pub format: Option<OutputFormat>,

    /// Override config file location
    #[arg(long, global = true, env = "SLACKFORM_CONFIG", hide_env = true)]
    pub config: Option<String>,

    /// Slack API token (overrides the config file)
    #[arg(
        long,
        global = true,
        env = "SLACK_API_TOKEN",
        hide_env_values = true
    )]
    pub token: Option<String>,

    /// Custom API base URL (for development/testing)
    #[arg(long, global = true, env = "SLACKFORM_API_HOST", hide = true)]
    pub api_host: Option<String>,

    /// Enable debug logging
    #[arg(long, global = true, env = "SLACKFORM_DEBUG", hide_env = true)]
    pub debug: bool,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize slackform configuration
    Init,

    /// Show authentication and configuration status
    Status,

    /// Check the configured token
    #[command(subcommand)]
    Auth(AuthCommands),

    /// Show workspace details
    #[command(subcommand)]
    Team(TeamCommands),

    /// List and look up channels
    #[command(subcommand, visible_alias = "channel")]
    Conversation(ConversationCommands),

    /// List and look up users, manage profiles
    #[command(subcommand)]
    User(UserCommands),

    /// Manage user groups
    #[command(subcommand, visible_alias = "group")]
    Usergroup(UserGroupCommands),

    /// Manage user group membership
    #[command(subcommand)]
    Member(MemberCommands),

    /// Apply user groups and memberships declared in a manifest
    #[command(after_help = "EXAMPLES:\n  \
            slackform apply -f workspace.yaml\n  \
            slackform apply -f workspace.yaml --dry-run\n\n\
MANIFEST:\n  \
  user_groups:\n    \
    - name: On Call\n      \
      handle: oncall\n      \
      channels: [incidents]\n  \
  memberships:\n    \
    - usergroup: On Call\n      \
      default_user: lead@example.com\n      \
      users: [ada@example.com]")]
    Apply {
        /// Manifest file (YAML)
        #[arg(long, short = 'f')]
        file: PathBuf,

        /// Show what would change without changing anything
        #[arg(long, short = 'n')]
        dry_run: bool,
    },

    /// Generate shell completions
    #[command(after_help = "\
EXAMPLES:
  bash:   slackform completion bash > /etc/bash_completion.d/slackform
  zsh:    slackform completion zsh > \"${fpath[1]}/_slackform\"
  fish:   slackform completion fish > ~/.config/fish/completions/slackform.fish")]
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Token subcommands
#[derive(Subcommand, Debug)]
pub enum AuthCommands {
    /// Show the identity behind the token
    Test,
}

/// Workspace subcommands
#[derive(Subcommand, Debug)]
pub enum TeamCommands {
    /// Show the token's workspace
    Info,
}

/// Conversation subcommands
#[derive(Subcommand, Debug)]
pub enum ConversationCommands {
    /// List conversations
    #[command(
        visible_alias = "ls",
        after_help = "EXAMPLES:\n  \
            slackform conversation list                        # Public channels\n  \
            slackform conversation list -t private_channel     # Public and private\n  \
            slackform conversation list --exclude-archived -n 20"
    )]
    List {
        #[command(flatten)]
        filters: ConversationFilterArgs,

        #[command(flatten)]
        pagination: PaginationArgs,
    },

    /// Show one conversation by ID or name
    #[command(
        visible_alias = "g",
        after_help = "EXAMPLES:\n  \
            slackform conversation get C0123456789\n  \
            slackform conversation get general --by-name\n  \
            slackform conversation get ops --by-name -t private_channel"
    )]
    Get {
        /// Conversation ID (or name with --by-name)
        conversation: String,

        /// Match on the channel name instead of the ID
        #[arg(long)]
        by_name: bool,

        #[command(flatten)]
        filters: ConversationFilterArgs,
    },
}

/// Field to look a user up by
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum UserField {
    #[default]
    Id,
    Email,
    Name,
}

/// Field to look a user group up by
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum UserGroupField {
    #[default]
    Id,
    Name,
}

/// User subcommands
#[derive(Subcommand, Debug)]
pub enum UserCommands {
    /// List workspace members
    #[command(visible_alias = "ls")]
    List {
        /// Include deactivated accounts
        #[arg(long)]
        include_deleted: bool,

        #[command(flatten)]
        pagination: PaginationArgs,
    },

    /// Show one user
    #[command(
        visible_alias = "g",
        after_help = "EXAMPLES:\n  \
            slackform user get U0123456789\n  \
            slackform user get ada@example.com --by email\n  \
            slackform user get ada --by name"
    )]
    Get {
        /// User ID, email or username
        user: String,

        /// Field to match on
        #[arg(long, value_enum, default_value = "id")]
        by: UserField,
    },

    /// Show a user's profile (defaults to the token owner)
    Profile {
        /// User ID
        user: Option<String>,
    },

    /// Show or manage custom status
    #[command(subcommand)]
    Status(UserStatusCommands),

    /// Manage a user's full name
    #[command(subcommand)]
    RealName(RealNameCommands),
}

/// Custom status subcommands
#[derive(Subcommand, Debug)]
pub enum UserStatusCommands {
    /// Show a user's current status (defaults to the token owner)
    #[command(after_help = "EXAMPLES:\n  \
            slackform user status get\n  \
            slackform user status get U0123456789")]
    Get {
        /// User ID
        user: Option<String>,
    },

    /// Set the status
    #[command(after_help = "EXAMPLES:\n  \
            slackform user status set \"In a meeting\" --emoji :calendar:\n  \
            slackform user status set \"Lunch\" --emoji :taco: --expires-in 60")]
    Set {
        /// Status text
        text: String,

        /// Status emoji (e.g. :palm_tree:)
        #[arg(long, short = 'e', default_value = "")]
        emoji: String,

        /// Clear the status after this many minutes
        #[arg(long, conflicts_with = "expiration")]
        expires_in: Option<u32>,

        /// Clear the status at this Unix time (0 = never)
        #[arg(long)]
        expiration: Option<i64>,
    },

    /// Clear the status
    Unset,
}

/// Full name subcommands
#[derive(Subcommand, Debug)]
pub enum RealNameCommands {
    /// Set a user's full name
    Set {
        /// User ID
        user: String,

        /// New full name
        real_name: String,
    },
}

/// User group subcommands
#[derive(Subcommand, Debug)]
pub enum UserGroupCommands {
    /// List user groups
    #[command(visible_alias = "ls")]
    List {
        /// Include disabled groups
        #[arg(long)]
        include_disabled: bool,

        #[command(flatten)]
        pagination: PaginationArgs,
    },

    /// Show a user group with its channels and members
    #[command(
        visible_alias = "g",
        after_help = "EXAMPLES:\n  \
            slackform usergroup get S0123456789\n  \
            slackform usergroup get \"On Call\" --by name\n  \
            slackform usergroup get S0123456789 --format json | jq '.data.users_email'"
    )]
    Get {
        /// User group ID (or name with --by name)
        group: String,

        /// Field to match on
        #[arg(long, value_enum, default_value = "id")]
        by: UserGroupField,
    },

    /// Create the group, or update it if a group with this name exists
    #[command(after_help = "EXAMPLES:\n  \
            slackform usergroup apply \"On Call\" --handle oncall\n  \
            slackform usergroup apply \"On Call\" -c incidents,ops --description \"Pager rotation\"\n  \
            slackform usergroup apply \"On Call\" --dry-run")]
    Apply {
        #[command(flatten)]
        group: UserGroupArgs,

        /// Show what would change without changing anything
        #[arg(long, short = 'n')]
        dry_run: bool,
    },

    /// Update a group by ID
    Update {
        /// User group ID
        id: String,

        #[command(flatten)]
        group: UserGroupArgs,

        /// Show what would change without changing anything
        #[arg(long, short = 'n')]
        dry_run: bool,
    },

    /// Disable a group (Slack has no hard delete)
    Disable {
        /// User group ID
        id: String,

        /// Skip confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,

        /// Show what would happen without disabling
        #[arg(long, short = 'n')]
        dry_run: bool,
    },
}

/// Declared user group attributes
#[derive(clap::Args, Debug, Clone)]
pub struct UserGroupArgs {
    /// Group name
    pub name: String,

    /// Mention handle, without the @
    #[arg(long)]
    pub handle: Option<String>,

    /// Group description
    #[arg(long, short = 'd')]
    pub description: Option<String>,

    /// Default channel names, comma-separated or repeated (omit to leave unchanged)
    #[arg(long, short = 'c', value_delimiter = ',')]
    pub channels: Option<Vec<String>>,

    /// Workspace ID (defaults to the token's workspace)
    #[arg(long)]
    pub team_id: Option<String>,

    /// Workspace-managed type, applied on create only
    #[arg(long, value_parser = ["admin", "owner"])]
    pub auto_type: Option<String>,
}

/// Membership subcommands
#[derive(Subcommand, Debug)]
pub enum MemberCommands {
    /// Replace a group's members
    #[command(after_help = "EXAMPLES:\n  \
            slackform member set \"On Call\" --default-user lead@ex.com ada@ex.com,bob@ex.com\n  \
            slackform member set \"On Call\" --default-user lead@ex.com --dry-run\n  \
            slackform member set \"On Call\" --default-user lead@ex.com ada@ex.com --yes")]
    Set {
        /// User group name
        usergroup: String,

        /// Email of the member that always stays
        #[arg(long, short = 'd')]
        default_user: String,

        /// Other member emails, comma-separated or repeated
        #[arg(value_delimiter = ',')]
        users: Vec<String>,

        /// Preview changes without applying
        #[arg(long, short = 'n')]
        dry_run: bool,

        /// Skip confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },

    /// Show a group's members
    Get {
        /// User group name
        usergroup: String,

        /// Email of the default member (listed separately)
        #[arg(long, short = 'd')]
        default_user: String,
    },

    /// Reset a group to only its default member
    Release {
        /// User group name
        usergroup: String,

        /// Email of the member that stays
        #[arg(long, short = 'd')]
        default_user: String,

        /// Skip confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },
}
