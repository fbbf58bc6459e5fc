use std::io;

use anyhow::Result;
use clap::builder::PossibleValuesParser;
use clap::value_parser;
use clap::Arg;
use clap::ArgAction;
use clap::Command;
use clap_complete::generate;
use clap_complete::Generator;
use clap_complete::Shell;
use strum::VariantNames;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::ChannelName;

fn print_completions<G: Generator>(gen: G, cmd: &mut Command) {
    generate(gen, cmd, cmd.get_name().to_string(), &mut io::stdout());
}

pub fn build() -> Command {
    return Command::new("parley")
        .about("Terminal UI to chat with a streaming chat backend over a realtime channel.")
        .version(env!("CARGO_PKG_VERSION"))
        .arg_required_else_help(false)
        .subcommand(
            Command::new("completions")
                .about("Generates shell completions.")
                .arg(
                    Arg::new("shell")
                        .short('s')
                        .long("shell")
                        .help("Which shell to generate completions for.")
                        .action(ArgAction::Set)
                        .value_parser(value_parser!(Shell))
                        .required(true),
                ),
        )
        .arg(
            Arg::new(ConfigKey::Transport.to_string())
                .long(ConfigKey::Transport.to_string())
                .env("PARLEY_TRANSPORT")
                .num_args(1)
                .help(format!(
                    "The transport used to reach the backend. [default: {}]",
                    Config::default(ConfigKey::Transport)
                ))
                .value_parser(PossibleValuesParser::new(ChannelName::VARIANTS)),
        )
        .arg(
            Arg::new(ConfigKey::WebsocketURL.to_string())
                .long(ConfigKey::WebsocketURL.to_string())
                .env("PARLEY_WEBSOCKET_URL")
                .num_args(1)
                .help(format!(
                    "The websocket endpoint of the backend. [default: {}]",
                    Config::default(ConfigKey::WebsocketURL)
                )),
        )
        .arg(
            Arg::new(ConfigKey::SseURL.to_string())
                .long(ConfigKey::SseURL.to_string())
                .env("PARLEY_SSE_URL")
                .num_args(1)
                .help(format!(
                    "The HTTP endpoint of the backend for the SSE fallback. [default: {}]",
                    Config::default(ConfigKey::SseURL)
                )),
        )
        .arg(
            Arg::new(ConfigKey::Model.to_string())
                .long(ConfigKey::Model.to_string())
                .env("PARLEY_MODEL")
                .num_args(1)
                .help(format!(
                    "The model name shown on generated messages. [default: {}]",
                    Config::default(ConfigKey::Model)
                )),
        )
        .arg(
            Arg::new(ConfigKey::Username.to_string())
                .long(ConfigKey::Username.to_string())
                .env("PARLEY_USERNAME")
                .num_args(1)
                .help("Your name, shown on your own messages. [default: $USER]"),
        )
        .arg(
            Arg::new(ConfigKey::ConnectTimeoutMillis.to_string())
                .long(ConfigKey::ConnectTimeoutMillis.to_string())
                .env("PARLEY_CONNECT_TIMEOUT_MILLIS")
                .num_args(1)
                .help(format!(
                    "How long to wait on the startup connectivity probe. [default: {}]",
                    Config::default(ConfigKey::ConnectTimeoutMillis)
                )),
        );
}

/// Returns false when the invocation was fully handled here and the UI should
/// not start.
pub fn parse() -> Result<bool> {
    let matches = build().get_matches();
    Config::load(vec![&matches]);

    if let Some(("completions", subcmd_matches)) = matches.subcommand() {
        if let Some(completions) = subcmd_matches.get_one::<Shell>("shell").copied() {
            let mut cmd = build();
            print_completions(completions, &mut cmd);
        }
        return Ok(false);
    }

    return Ok(true);
}
