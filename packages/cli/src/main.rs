use anyhow::Result;
use clap::Parser;
use tip_assistant_cli::{
    args::{Cli, Command},
    command::{
        check_installed::{CheckInstalled, CheckInstalledArgs},
        deactivate::{Deactivate, DeactivateArgs},
        grant_permissions::{GrantPermissions, GrantPermissionsArgs},
        install::{Install, InstallArgs},
        keys::{Keys, KeysArgs},
        save::{Save, SaveArgs},
        show::{Show, ShowArgs},
    },
    config::Config,
    context::CliContext,
    display,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utils::config::{ConfigBuilder, ConfigExt};

#[tokio::main]
async fn main() {
    let Cli { args, command } = Cli::parse();
    let config: Config = ConfigBuilder::new(args).build().unwrap();

    // setup tracing, stdout is reserved for command output
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(config.tracing_env_filter().unwrap())
        .try_init()
        .unwrap();

    let ctx = CliContext::new(config);

    if let Err(err) = run(&ctx, command).await {
        tracing::error!("{err:?}");
        std::process::exit(1);
    }
}

async fn run(ctx: &CliContext, command: Command) -> Result<()> {
    match command {
        Command::Keys { assistant } => display::show(&Keys::run(ctx, KeysArgs { assistant })),

        Command::Show { profile } => display::show(&Show::run(ctx, ShowArgs { profile }).await?),

        Command::CheckInstalled { profile, delegate } => display::show(
            &CheckInstalled::run(ctx, CheckInstalledArgs { profile, delegate }).await?,
        ),

        Command::Save {
            profile,
            destination,
            percentage,
        } => display::show(
            &Save::run(
                ctx,
                SaveArgs {
                    profile,
                    destination,
                    percentage,
                },
            )
            .await?,
        ),

        Command::Deactivate { profile } => {
            display::show(&Deactivate::run(ctx, DeactivateArgs { profile }).await?)
        }

        Command::Install { profile, delegate } => {
            display::show(&Install::run(ctx, InstallArgs { profile, delegate }).await?)
        }

        Command::GrantPermissions {
            profile,
            controller,
            protocol_only,
        } => display::show(
            &GrantPermissions::run(
                ctx,
                GrantPermissionsArgs {
                    profile,
                    controller,
                    protocol_only,
                },
            )
            .await?,
        ),
    }
}
