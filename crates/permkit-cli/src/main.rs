mod console;

use std::io::{self, Read};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use permkit::{
    check_player, colorize, display_groups, display_permissions, resolve_with_args, to_members,
    Membership, PermissionInfo, RenderOptions, Resolution, ResolveOptions,
};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::console::ConsoleHost;

#[derive(Parser)]
#[command(
    name = "permkit",
    version,
    about = "Resolve permission expirations and render permission listings"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Resolve a duration ("5d", "2 months") or ISO 8601 timestamp to an instant
    Resolve {
        /// Duration or timestamp; extra words are joined with spaces
        #[arg(required = true, num_args = 1..)]
        value: Vec<String>,

        /// Reference instant (RFC 3339); defaults to the current time
        #[arg(long)]
        now: Option<String>,

        /// IANA timezone for calendar arithmetic and offset-less timestamps
        #[arg(long, default_value = "UTC")]
        timezone: String,
    },
    /// Render a JSON array of permissions as a sorted listing
    Permissions {
        /// Input file (reads stdin if omitted or "-")
        file: Option<PathBuf>,

        /// Only show permissions containing this text
        #[arg(short, long)]
        filter: Option<String>,

        /// Show the granting plugin of every permission
        #[arg(short, long)]
        verbose: bool,

        /// Plugin name; permissions from other sources are flagged
        #[arg(long, default_value = "permkit")]
        plugin: String,

        /// Header line printed above the listing (may be repeated)
        #[arg(long)]
        header: Vec<String>,

        /// Strip colour codes
        #[arg(long)]
        plain: bool,
    },
    /// Render a JSON array of memberships as a group summary line
    Groups {
        /// Input file (reads stdin if omitted or "-")
        file: Option<PathBuf>,

        /// Group shown when no membership is active
        #[arg(long = "default", default_value = "default")]
        default_group: String,

        /// Only show memberships of this player
        #[arg(long)]
        player: Option<String>,

        /// Players currently online, for the --player check
        #[arg(long, value_delimiter = ',')]
        online: Vec<String>,

        /// Reference instant (RFC 3339); defaults to the current time
        #[arg(long)]
        now: Option<String>,

        /// IANA timezone for expiration timestamps
        #[arg(long, default_value = "UTC")]
        timezone: String,

        /// Strip colour codes
        #[arg(long)]
        plain: bool,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Resolve {
            value,
            now,
            timezone,
        } => {
            let now = parse_now(now.as_deref())?;
            let options = ResolveOptions::with_timezone(&timezone)?;
            let (primary, rest) = value
                .split_first()
                .context("a duration or timestamp is required")?;
            debug!(input = %value.join(" "), %now, %timezone, "resolving duration");

            match resolve_with_args(primary, rest, now, &options)
                .context("failed to resolve duration/timestamp")?
            {
                Resolution::NoValue => println!("no value"),
                Resolution::At(instant) => println!("{instant}"),
            }
        }
        Command::Permissions {
            file,
            filter,
            verbose,
            plugin,
            header,
            plain,
        } => {
            let input = read_input(file.as_deref())?;
            let permissions: Vec<PermissionInfo> =
                serde_json::from_str(&input).context("failed to parse permissions JSON")?;
            debug!(count = permissions.len(), "loaded permissions");

            let host = ConsoleHost::new(plugin, plain);
            let header: Vec<String> = header.iter().map(|h| colorize(h)).collect();
            let options = RenderOptions { filter, verbose };
            display_permissions(&host, &(), &header, &permissions, &options);
        }
        Command::Groups {
            file,
            default_group,
            player,
            online,
            now,
            timezone,
            plain,
        } => {
            let now = parse_now(now.as_deref())?;
            let options = ResolveOptions::with_timezone(&timezone)?;
            let input = read_input(file.as_deref())?;
            let mut memberships: Vec<Membership> =
                serde_json::from_str(&input).context("failed to parse memberships JSON")?;
            debug!(
                count = memberships.len(),
                members = ?to_members(&memberships),
                "loaded memberships"
            );

            let host = ConsoleHost::new("permkit", plain).with_online(online);
            if let Some(player) = &player {
                check_player(&host, &(), player);
                memberships.retain(|m| m.member.eq_ignore_ascii_case(player));
            }
            let line = display_groups(&default_group, &memberships, now, &options.timezone);
            println!("{}", host.render(&line));
        }
    }

    Ok(())
}

fn parse_now(now: Option<&str>) -> Result<DateTime<Utc>> {
    match now {
        Some(text) => Ok(DateTime::parse_from_rfc3339(text)
            .with_context(|| format!("invalid --now '{text}'"))?
            .with_timezone(&Utc)),
        None => Ok(Utc::now()),
    }
}

fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(p) if p != Path::new("-") => std::fs::read_to_string(p)
            .with_context(|| format!("failed to read {}", p.display())),
        _ => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read stdin")?;
            Ok(buf)
        }
    }
}
