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

use anyhow::Result;
use clap::Parser;

use sshmate::{
    cli::{Cli, Commands},
    commands::{
        add_host, audit_security, check_config, forget_known_host, list_hosts, remove_host,
        set_host,
    },
    files,
    utils::{expand_tilde, init_logging},
};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config_path = match &cli.config {
        Some(path) => expand_tilde(path),
        None => files::default_config_path(),
    };
    tracing::debug!("using config file {:?}", config_path);

    let exit_code = match &cli.command {
        Commands::List => list_hosts(&config_path).await?,
        Commands::Add { host, options } => add_host(&config_path, host, options).await?,
        Commands::Set { host, options } => set_host(&config_path, host, options).await?,
        Commands::Remove { host } => remove_host(&config_path, host).await?,
        Commands::Check => check_config(&config_path).await?,
        Commands::Audit => audit_security().await?,
        Commands::Forget { host } => forget_known_host(host).await?,
    };

    if exit_code != 0 {
        std::process::exit(exit_code);
    }
    Ok(())
}
