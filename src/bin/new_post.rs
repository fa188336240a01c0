use std::path::PathBuf;

use chrono::Local;
use clap::{command, Arg};

use postgen::config::{Config, DEFAULT_AUTHOR, DEFAULT_POSTS_DIR};
use postgen::create::create_post;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let matches = command!()
        .about("Create a new post folder with templated front matter")
        .args([
            Arg::new("title")
                .help("Words of the post title")
                .value_name("TITLE")
                .num_args(1..)
                .required(true),
            Arg::new("posts_dir")
                .long("posts-dir")
                .help("Directory containing one folder per post")
                .value_parser(clap::value_parser!(PathBuf))
                .default_value(DEFAULT_POSTS_DIR),
            Arg::new("author")
                .long("author")
                .help("Author name written into the new post")
                .default_value(DEFAULT_AUTHOR),
        ])
        .get_matches();

    let title = matches
        .get_many::<String>("title")
        .unwrap()
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(" ");
    let cfg = Config {
        posts_dir: matches.get_one::<PathBuf>("posts_dir").unwrap().clone(),
        default_author: matches.get_one::<String>("author").unwrap().clone(),
    };

    let file_path = create_post(&cfg, &title, Local::now().naive_local())?;
    println!("Created {}", file_path.display());

    Ok(())
}
