// Copyright 2025 Lablup Inc. and Jeongkyu Shin
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "sshmate",
    version,
    about = "Manage SSH client configuration, validate host entries, and audit key material",
    long_about = "sshmate edits ~/.ssh/config in place while leaving everything it does not touch byte-exact,\nso the file keeps working for the ssh client that owns it. It validates host entries before\nsaving, and audits key material and known_hosts for deprecated algorithms, weak keys, and\nstale entries.",
    after_help = "EXAMPLES:\n  List configured hosts:        sshmate list\n  Add a host:                   sshmate add web --hostname web.internal --user deploy\n  Edit an existing host:        sshmate set web --port 2222\n  Remove a host:                sshmate remove web\n  Validate the whole config:    sshmate check\n  Audit keys and known_hosts:   sshmate audit\n  Drop known_hosts entries:     sshmate forget old.example.com"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(
        short = 'F',
        long,
        help = "Alternative SSH configuration file [default: ~/.ssh/config]"
    )]
    pub config: Option<PathBuf>,

    #[arg(
        short = 'v',
        long,
        action = clap::ArgAction::Count,
        help = "Increase verbosity (-v, -vv, -vvv)"
    )]
    pub verbose: u8,
}

/// Fields a host entry can be created or edited with from the command line.
#[derive(clap::Args, Debug, Default)]
pub struct HostArgs {
    #[arg(long, help = "Real hostname or IP address (HostName)")]
    pub hostname: Option<String>,

    #[arg(short = 'u', long, help = "Login user (User)")]
    pub user: Option<String>,

    #[arg(short = 'p', long, help = "Port number (Port)")]
    pub port: Option<u16>,

    #[arg(short = 'i', long, help = "Private key path (IdentityFile)")]
    pub identity: Option<String>,

    #[arg(short = 'J', long, help = "Jump host specification (ProxyJump)")]
    pub proxy_jump: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(about = "List hosts configured in the SSH config file")]
    List,

    #[command(
        about = "Add a new host entry",
        long_about = "Adds a new Host block at the end of the config file.\nThe entry is validated first; errors block the save, warnings do not.\nExit codes: 0 (saved), 1 (validation errors)"
    )]
    Add {
        #[arg(help = "Host alias for the new entry")]
        host: String,

        #[command(flatten)]
        options: HostArgs,
    },

    #[command(
        about = "Update an existing host entry",
        long_about = "Rewrites the matching Host block with the given fields applied on top\nof its current values. A missing alias is added as a new entry instead.\nExit codes: 0 (saved), 1 (validation errors)"
    )]
    Set {
        #[arg(help = "Host alias to update")]
        host: String,

        #[command(flatten)]
        options: HostArgs,
    },

    #[command(about = "Remove a host entry (no-op when the alias is absent)")]
    Remove {
        #[arg(help = "Host alias to remove")]
        host: String,
    },

    #[command(
        about = "Validate the whole config file",
        long_about = "Runs every host entry through the validator and reports all findings.\nExit codes: 0 (no errors), 1 (errors found)"
    )]
    Check,

    #[command(
        about = "Audit key material and known_hosts",
        long_about = "Scans ~/.ssh for key pairs and checks them against current\nrecommendations, then checks known_hosts for deprecated host-key\nalgorithms and duplicate entries.\nExit codes: 0 (healthy or warnings), 1 (errors found)"
    )]
    Audit,

    #[command(about = "Remove known_hosts entries matching a host name")]
    Forget {
        #[arg(help = "Host name to remove from known_hosts")]
        host: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_add_with_options() {
        let cli = Cli::parse_from([
            "sshmate", "add", "web", "--hostname", "web.internal", "-u", "deploy", "-p", "2222",
        ]);
        match cli.command {
            Commands::Add { host, options } => {
                assert_eq!(host, "web");
                assert_eq!(options.hostname.as_deref(), Some("web.internal"));
                assert_eq!(options.user.as_deref(), Some("deploy"));
                assert_eq!(options.port, Some(2222));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_verbosity_counts() {
        let cli = Cli::parse_from(["sshmate", "-vv", "list"]);
        assert_eq!(cli.verbose, 2);
    }
}
