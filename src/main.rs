use anyhow::Result;
use clap::Parser;

use git_autotag::config::{self, CliOverrides, Config};
use git_autotag::git::Git2Repository;
use git_autotag::ui;
use git_autotag::workflow;

#[derive(clap::Parser)]
#[command(
    name = "git-autotag",
    version,
    about = "Create semantic-version git tags automatically"
)]
struct Args {
    #[arg(
        value_name = "STEP",
        help = "Explicitly specify whether to create a new major, minor or patch version \
                (choices: major, minor, patch)"
    )]
    step: Option<String>,

    #[arg(long, help = "Path to the repository")]
    repo: Option<String>,

    #[arg(short, long, help = "Set the message for the tag")]
    message: Option<String>,

    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<String>,

    #[arg(long, help = "Preview the tag that would be created without creating it")]
    dry_run: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let repo = match &args.repo {
        Some(path) => Git2Repository::open(path),
        None => Git2Repository::discover(),
    };
    let repo = match repo {
        Ok(repo) => repo,
        Err(e) => {
            ui::display_error(&e.to_string());
            std::process::exit(1);
        }
    };

    let file_config = match config::load_file_config(args.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            ui::display_error(&format!("Error loading config: {}", e));
            std::process::exit(1);
        }
    };

    let cli = CliOverrides {
        step: args.step,
        message: args.message,
    };
    let config = match Config::resolve(&cli, &repo, &file_config) {
        Ok(cfg) => cfg,
        Err(e) => {
            ui::display_error(&e.to_string());
            std::process::exit(1);
        }
    };

    if config.pull_before_tagging {
        ui::display_status(&format!("Pulling latest tags from {}", config.remote_name));
    }

    match workflow::run(&repo, &config, args.dry_run) {
        Ok(result) if result.dry_run => {
            ui::display_dry_run(
                &result.tag,
                &result.message,
                config.push_after_tagging,
                &config.remote_name,
            );
        }
        Ok(result) => {
            ui::display_success(&format!("Created tag: {}", result.tag));
            if result.pushed {
                ui::display_success(&format!(
                    "Pushed tag: {} to {}",
                    result.tag, config.remote_name
                ));
            }
        }
        Err(e) => {
            ui::display_error(&e.to_string());
            std::process::exit(1);
        }
    }

    Ok(())
}
