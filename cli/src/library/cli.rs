use std::{ffi::OsString, fmt};

use clap::{Parser, builder::NonEmptyStringValueParser};
use console::style;
use tracing::info;

use crate::library::{
    config::{ConnectionConfig, PollConfig},
    constant::{DEFAULT_API_USER, DEFAULT_POLL_INTERVAL_SECS, DEFAULT_POLL_TIMEOUT_SECS},
    ontap::OntapClient,
    prompt::{prompt_password, resolve_password},
    snapshot::make_snapshot,
};

/// Create a new snapshot for an existing ONTAP volume.
#[derive(Parser)]
#[command(name = "create-snap", version)]
#[command(about = "Create a new snapshot for an existing ONTAP volume", long_about = None)]
pub struct Cli {
    /// API server IP
    #[arg(short = 'c', long = "cluster", value_parser = NonEmptyStringValueParser::new())]
    pub cluster: String,

    /// Volume Name
    #[arg(
        short = 'v',
        long = "volume_name",
        visible_alias = "volume-name",
        value_parser = NonEmptyStringValueParser::new()
    )]
    pub volume_name: String,

    /// Snapshot Name
    #[arg(
        short = 's',
        long = "snapshot_name",
        visible_alias = "snapshot-name",
        value_parser = NonEmptyStringValueParser::new()
    )]
    pub snapshot_name: String,

    /// SVM Name (also accepted as -vs)
    #[arg(
        long = "svm_name",
        visible_alias = "svm-name",
        value_parser = NonEmptyStringValueParser::new()
    )]
    pub svm_name: String,

    /// API Username
    #[arg(
        short = 'u',
        long = "api_user",
        visible_alias = "api-user",
        env = "ONTAP_API_USER",
        default_value = DEFAULT_API_USER
    )]
    pub api_user: String,

    /// API Password
    #[arg(
        short = 'p',
        long = "api_pass",
        visible_alias = "api-pass",
        env = "ONTAP_API_PASS",
        hide_env_values = true
    )]
    pub api_pass: Option<String>,

    /// Seconds between job status checks.
    #[arg(long, default_value_t = DEFAULT_POLL_INTERVAL_SECS, hide = true)]
    pub poll_interval: u64,

    /// Seconds to wait for the snapshot job before giving up.
    #[arg(long, default_value_t = DEFAULT_POLL_TIMEOUT_SECS, hide = true)]
    pub poll_timeout: u64,
}

impl fmt::Debug for Cli {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cli")
            .field("cluster", &self.cluster)
            .field("volume_name", &self.volume_name)
            .field("snapshot_name", &self.snapshot_name)
            .field("svm_name", &self.svm_name)
            .field("api_user", &self.api_user)
            .field("api_pass", &self.api_pass.as_ref().map(|_| "********"))
            .field("poll_interval", &self.poll_interval)
            .field("poll_timeout", &self.poll_timeout)
            .finish()
    }
}

/// Rewrite the two-letter `-vs` flag into `--svm_name`.
///
/// clap only knows single-character short flags and would read `-vs` as `-v s`.
pub fn normalize_args<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut passthrough = false;

    args.into_iter()
        .map(Into::into)
        .map(|arg| {
            if passthrough {
                return arg;
            }

            match arg.to_str() {
                Some("--") => {
                    passthrough = true;
                    arg
                }
                Some("-vs") => OsString::from("--svm_name"),
                Some(value) if value.starts_with("-vs=") => {
                    OsString::from(format!("--svm_name={}", &value["-vs=".len()..]))
                }
                _ => arg,
            }
        })
        .collect()
}

pub async fn run() -> anyhow::Result<()> {
    let args = Cli::parse_from(normalize_args(std::env::args_os()));

    let password = resolve_password(args.api_pass, prompt_password)?;

    let config = ConnectionConfig::new(&args.cluster, &args.api_user, password);
    let poll = PollConfig::from_secs(args.poll_interval, args.poll_timeout);

    info!(cluster = %config.host, user = %config.username, "Connecting to cluster");

    let client = OntapClient::new(&config)?;

    let outcome = make_snapshot(
        &client,
        &args.svm_name,
        &args.volume_name,
        &args.snapshot_name,
        &poll,
    )
    .await?;

    // A rejected snapshot is reported but still exits 0.
    if outcome.is_created() {
        println!("{}", outcome);
    } else {
        println!("{}", style(&outcome).red());
    }

    Ok(())
}
