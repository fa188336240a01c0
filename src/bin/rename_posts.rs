use std::io::{self, Write};
use std::path::{Path, PathBuf};

use clap::{command, Arg, ArgAction};
use log::warn;

use postgen::config::DEFAULT_POSTS_DIR;
use postgen::rename::{confirm, execute_renames, plan_renames, RenameOutcome};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let matches = command!()
        .about("Rename post folders to the <date>-<slug> name their front matter implies")
        .args([
            Arg::new("execute")
                .long("execute")
                .help("Apply the rename plan instead of only showing it")
                .action(ArgAction::SetTrue),
            Arg::new("posts_dir")
                .long("posts-dir")
                .help("Directory containing one folder per post")
                .value_parser(clap::value_parser!(PathBuf))
                .default_value(DEFAULT_POSTS_DIR),
        ])
        .get_matches();

    let posts_dir: &PathBuf = matches.get_one("posts_dir").unwrap();
    let execute = matches.get_flag("execute");

    // problems are reported as warnings; this tool never fails the process
    if let Err(err) = run(posts_dir, execute) {
        warn!("{err:#}");
    }
}

fn run(posts_dir: &Path, execute: bool) -> anyhow::Result<()> {
    if execute {
        println!("Running in execute mode: stale folders will be renamed.\n");
    } else {
        println!("Dry run: the plan below is only displayed.");
        println!("Re-run with --execute to apply it.\n");
    }

    if !posts_dir.is_dir() {
        warn!("posts directory {posts_dir:?} does not exist");
        return Ok(());
    }

    let plan = plan_renames(posts_dir)?;
    if plan.is_empty() {
        println!("All folders already match their metadata. Nothing to do.");
        return Ok(());
    }

    println!("Rename plan:");
    for entry in &plan {
        println!("  {}  ->  {}", entry.old, entry.new);
    }

    if !execute {
        return Ok(());
    }

    print!("\nApply all renames above? (y/n): ");
    io::stdout().flush()?;
    if !confirm(io::stdin().lock())? {
        println!("Cancelled. Nothing was renamed.");
        return Ok(());
    }

    println!();
    let outcomes = execute_renames(posts_dir, &plan);
    for (entry, outcome) in plan.iter().zip(&outcomes) {
        match outcome {
            RenameOutcome::Renamed => println!("renamed {}  ->  {}", entry.old, entry.new),
            RenameOutcome::SkippedCollision => {
                println!("skipped {}: target {} already exists", entry.old, entry.new)
            }
            RenameOutcome::Failed(reason) => println!("failed {}: {reason}", entry.old),
        }
    }

    Ok(())
}
