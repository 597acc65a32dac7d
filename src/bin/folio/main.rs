use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use spdlog::{debug, warn};

use folio::config::Config;
use folio::error::LookupError;
use folio::favorites::{favorite_posts, FavoritesStore, JsonFileFavorites};
use folio::logger::{configure_logger, configure_quiet_logger};
use folio::view::{RssChannel, Sitemap};
use folio::{Catalog, DateFilter, PostRecord, SearchQuery};

use crate::config::{default_log_location, favorites_file, open_config, sample_config_path};
use crate::config_data::{sample_cfg, write_sample_cfg};

mod config;
mod config_data;

const CFG_FILE_NAME: &str = "folio.toml";

const EXIT_NOT_FOUND: u8 = 2;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Config path
    #[arg(short, long, global = true)]
    config_path: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Lists every post, newest first
    List {
        #[arg(long)]
        json: bool,
    },
    /// Shows one post with its rendered content
    Show {
        id: String,
        #[arg(long)]
        json: bool,
    },
    /// Lists the tags, most used first
    Tags {
        #[arg(long)]
        json: bool,
    },
    /// Lists the posts carrying a tag
    Tag {
        tag: String,
        #[arg(long)]
        json: bool,
    },
    /// Searches titles, excerpts, descriptions and tags
    Search {
        query: Option<String>,
        /// Required tag, may be repeated
        #[arg(short, long = "tag")]
        tags: Vec<String>,
        /// all, thisMonth or thisYear
        #[arg(short, long, default_value = "all")]
        date: String,
        /// Maximum number of results
        #[arg(short, long)]
        max: Option<usize>,
        #[arg(long)]
        json: bool,
    },
    /// Writes the RSS feed
    Feed {
        /// Output file. Stdout if absent
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Writes the sitemap
    Sitemap {
        /// Output file. Stdout if absent
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Manages favorite posts
    Favorite {
        #[command(subcommand)]
        action: FavoriteAction,
    },
    /// Prints a sample configuration, or writes it with --out
    SampleConfig {
        #[arg(short, long)]
        out: Option<PathBuf>,
        /// Writes to the user config directory
        #[arg(long)]
        install: bool,
    },
}

#[derive(Subcommand, Debug)]
enum FavoriteAction {
    /// Marks a post as favorite
    Add { id: String },
    /// Removes a post from the favorites
    Remove { id: String },
    /// Lists favorite posts, newest first
    List {
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    let args = Args::parse();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            let not_found = err.downcast_ref::<LookupError>().is_some_and(|e| e.is_not_found());
            if not_found {
                ExitCode::from(EXIT_NOT_FOUND)
            } else {
                ExitCode::FAILURE
            }
        }
    }
}

fn run(args: Args) -> Result<()> {
    if let Command::SampleConfig { ref out, install } = args.command {
        return sample_config_cmd(out.clone(), install);
    }

    let config = open_config(args.config_path)?;
    setup_logger(&config);

    let cache = config.catalog.cache();
    let options = config.catalog.options();
    let catalog = cache.get_or_build(|| Catalog::build(&config.paths.posts_dir, &options))?;

    match args.command {
        Command::List { json } => print_posts(&catalog.posts().iter().collect::<Vec<_>>(), json),
        Command::Show { id, json } => show_cmd(&catalog, &id, json),
        Command::Tags { json } => tags_cmd(&catalog, json),
        Command::Tag { tag, json } => print_posts(&catalog.posts_by_tag(&tag), json),
        Command::Search {
            query,
            tags,
            date,
            max,
            json,
        } => {
            let mut search = SearchQuery::new(query.as_deref().unwrap_or_default())
                .with_date_filter(DateFilter::parse_lenient(&date));
            for tag in tags.iter() {
                search = search.with_tag(tag);
            }
            if let Some(max) = max {
                search = search.with_max_results(max);
            }
            debug!("Searching text={:?} tags={:?} date={}", search.text, search.tags, search.date_filter);
            print_posts(&catalog.search(&search), json)
        }
        Command::Feed { out } => feed_cmd(&config, &catalog, out),
        Command::Sitemap { out } => sitemap_cmd(&config, &catalog, out),
        Command::Favorite { action } => favorite_cmd(&config, &catalog, action),
        Command::SampleConfig { .. } => Ok(()),
    }
}

fn setup_logger(config: &Config) {
    let result = match config.log {
        Some(ref log) => configure_logger(log, default_log_location().as_deref()),
        None => configure_quiet_logger(),
    };
    if let Err(err) = result {
        warn!("Error creating logger sinks. Using console instead. Desc={}", err);
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_posts(posts: &[&PostRecord], json: bool) -> Result<()> {
    if json {
        return print_json(posts);
    }
    for post in posts.iter() {
        println!("{}", post);
    }
    Ok(())
}

fn show_cmd(catalog: &Catalog, id: &str, json: bool) -> Result<()> {
    let post = catalog.get_post(id)?;
    if json {
        return print_json(&post);
    }
    println!("{}", post.title);
    println!("{}", post.date);
    if !post.tags.is_empty() {
        println!("Tags: {}", post.tags.join(", "));
    }
    if let Some(ref description) = post.description {
        println!("{}", description);
    }
    println!();
    println!("{}", post.content_html.as_deref().unwrap_or_default());
    Ok(())
}

fn tags_cmd(catalog: &Catalog, json: bool) -> Result<()> {
    let tags = catalog.tags().by_count();
    if json {
        return print_json(&tags);
    }
    for tag in tags.iter() {
        println!("{} ({})  {}", tag.name, tag.count, tag.slug);
    }
    Ok(())
}

fn write_output(out: Option<PathBuf>, content: &str) -> Result<()> {
    match out {
        Some(path) => {
            fs::write(&path, content).with_context(|| format!("Error writing {}", path.display()))?;
            eprintln!("Written {}", path.display());
        }
        None => println!("{}", content),
    }
    Ok(())
}

fn feed_cmd(config: &Config, catalog: &Catalog, out: Option<PathBuf>) -> Result<()> {
    let channel = RssChannel {
        ch_title: &config.site.title,
        ch_link: &config.site.url,
        ch_desc: &config.site.description,
        posts_path: &config.site.posts_path,
        max_items: Some(config.feed.max_items),
    };
    let xml = channel.render(catalog.posts())?;
    write_output(out, &xml)
}

fn sitemap_cmd(config: &Config, catalog: &Catalog, out: Option<PathBuf>) -> Result<()> {
    let sitemap = Sitemap {
        site_url: &config.site.url,
        pages: &config.site.pages,
        posts_path: &config.site.posts_path,
        tags_path: &config.site.tags_path,
    };
    let xml = sitemap.render(catalog)?;
    write_output(out, &xml)
}

fn favorite_cmd(config: &Config, catalog: &Catalog, action: FavoriteAction) -> Result<()> {
    let file = favorites_file(config)?;
    let mut store = JsonFileFavorites::open(&file)?;

    match action {
        FavoriteAction::Add { id } => {
            if catalog.find(&id).is_none() {
                return Err(LookupError::NotFound { id }.into());
            }
            store.add(&id)?;
        }
        FavoriteAction::Remove { id } => store.remove(&id)?,
        FavoriteAction::List { json } => print_posts(&favorite_posts(catalog, &store), json)?,
    }
    Ok(())
}

fn sample_config_cmd(out: Option<PathBuf>, install: bool) -> Result<()> {
    if out.is_none() && !install {
        print!("{}", sample_cfg());
        return Ok(());
    }
    let path = sample_config_path(out)?;
    write_sample_cfg(&path)?;
    eprintln!("Sample config written to {}", path.display());
    Ok(())
}
