use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "site-atlas")]
#[command(about = "Catalogs every page reachable by same-domain links from a seed URL")]
#[command(version)]
pub struct Args {
    /// Seed URL to start crawling from
    pub url: String,

    /// Maximum number of fetches in flight at once
    #[arg(short, long, default_value_t = 5)]
    pub concurrency: usize,

    /// Stop claiming new pages once this many have been recorded
    #[arg(short = 'p', long)]
    pub max_pages: Option<usize>,

    /// Where to write the CSV report
    #[arg(short, long, default_value = "report.csv")]
    pub output: PathBuf,

    /// Print the records as JSON to stdout instead of writing the CSV report
    #[arg(long)]
    pub json: bool,

    /// Skip pages containing malformed references instead of aborting the crawl
    #[arg(long)]
    pub skip_malformed: bool,

    /// User-Agent header sent with every request
    #[arg(long)]
    pub user_agent: Option<String>,
}
