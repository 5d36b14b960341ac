//! slackform - declarative companion for the Slack Web API

use clap::{CommandFactory, Parser};
use log::debug;
use tokio_util::sync::CancellationToken;

mod cli;
mod client;
mod config;
mod error;
mod models;
mod output;
mod reconcile;

use cli::args::GlobalOptions;
use cli::{
    AuthCommands, Cli, Commands, ConversationCommands, MemberCommands, RealNameCommands,
    TeamCommands, UserCommands, UserGroupCommands, UserStatusCommands,
};
use error::Result;

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

fn init_logging(debug: bool) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if debug {
        builder.filter_module("slackform", log::LevelFilter::Debug);
    }
    builder.format_timestamp(None).init();
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.debug);

    let cancel = CancellationToken::new();
    let on_signal = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            debug!("Interrupt received, cancelling");
            on_signal.cancel();
        }
    });

    let opts = GlobalOptions::from_cli(&cli);

    match cli.command {
        Commands::Init => cli::init::run(&opts).await,
        Commands::Status => cli::status::run(&opts),
        Commands::Auth(AuthCommands::Test) => cli::auth::test(&opts, cancel).await,
        Commands::Team(TeamCommands::Info) => cli::auth::team_info(&opts, cancel).await,
        Commands::Conversation(cmd) => match cmd {
            ConversationCommands::List {
                filters,
                pagination,
            } => cli::conversation::list(&opts, cancel, &filters, &pagination).await,
            ConversationCommands::Get {
                conversation,
                by_name,
                filters,
            } => cli::conversation::get(&opts, cancel, &conversation, by_name, &filters).await,
        },
        Commands::User(cmd) => match cmd {
            UserCommands::List {
                include_deleted,
                pagination,
            } => cli::user::list(&opts, cancel, include_deleted, &pagination).await,
            UserCommands::Get { user, by } => cli::user::get(&opts, cancel, &user, by).await,
            UserCommands::Profile { user } => {
                cli::user::profile(&opts, cancel, user.as_deref()).await
            }
            UserCommands::Status(status_cmd) => match status_cmd {
                UserStatusCommands::Get { user } => {
                    cli::user::status_get(&opts, cancel, user.as_deref()).await
                }
                UserStatusCommands::Set {
                    text,
                    emoji,
                    expires_in,
                    expiration,
                } => {
                    cli::user::status_set(&opts, cancel, &text, &emoji, expires_in, expiration)
                        .await
                }
                UserStatusCommands::Unset => cli::user::status_unset(&opts, cancel).await,
            },
            UserCommands::RealName(RealNameCommands::Set { user, real_name }) => {
                cli::user::real_name_set(&opts, cancel, &user, &real_name).await
            }
        },
        Commands::Usergroup(cmd) => match cmd {
            UserGroupCommands::List {
                include_disabled,
                pagination,
            } => cli::usergroup::list(&opts, cancel, include_disabled, &pagination).await,
            UserGroupCommands::Get { group, by } => {
                cli::usergroup::get(&opts, cancel, &group, by).await
            }
            UserGroupCommands::Apply { group, dry_run } => {
                cli::usergroup::apply(&opts, cancel, &group, dry_run).await
            }
            UserGroupCommands::Update { id, group, dry_run } => {
                cli::usergroup::update(&opts, cancel, &id, &group, dry_run).await
            }
            UserGroupCommands::Disable { id, yes, dry_run } => {
                cli::usergroup::disable(&opts, cancel, &id, yes, dry_run).await
            }
        },
        Commands::Member(cmd) => match cmd {
            MemberCommands::Set {
                usergroup,
                default_user,
                users,
                dry_run,
                yes,
            } => {
                cli::member::set(
                    &opts,
                    cancel,
                    &usergroup,
                    &default_user,
                    users,
                    dry_run,
                    yes,
                )
                .await
            }
            MemberCommands::Get {
                usergroup,
                default_user,
            } => cli::member::get(&opts, cancel, &usergroup, &default_user).await,
            MemberCommands::Release {
                usergroup,
                default_user,
                yes,
            } => cli::member::release(&opts, cancel, &usergroup, &default_user, yes).await,
        },
        Commands::Apply { file, dry_run } => cli::apply::run(&opts, cancel, &file, dry_run).await,
        Commands::Completion { shell } => {
            clap_complete::generate(
                shell,
                &mut Cli::command(),
                "slackform",
                &mut std::io::stdout(),
            );
            Ok(())
        }
    }
}
