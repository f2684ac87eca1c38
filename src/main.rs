use clap::Parser;
use site_atlas::report::write_csv_report;
use site_atlas::{Crawl, CrawlError, CrawlResult, MalformedLinkPolicy};

mod args;
use args::Args;

#[tokio::main]
async fn main() {
    // Initialize logging
    env_logger::init();

    // Parse command-line arguments
    let args = Args::parse();

    let exit_code = match run(args).await {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    };

    std::process::exit(exit_code);
}

async fn run(args: Args) -> Result<(), CrawlError> {
    println!("Starting crawl of: {}", args.url);

    let mut crawl = Crawl::new(&args.url).with_max_concurrency(args.concurrency);
    if let Some(max_pages) = args.max_pages {
        crawl = crawl.with_max_pages(max_pages);
    }
    if let Some(user_agent) = &args.user_agent {
        crawl = crawl.with_user_agent(user_agent);
    }
    if args.skip_malformed {
        crawl = crawl.with_malformed_link_policy(MalformedLinkPolicy::SkipPage);
    }

    let start_time = std::time::Instant::now();
    let result = crawl.run().await?;
    ::log::info!(
        "Crawled {} pages in {:.2} seconds",
        result.len(),
        start_time.elapsed().as_secs_f64()
    );

    print_summary(&result);

    if args.json {
        let json = serde_json::to_string_pretty(&result).map_err(std::io::Error::from)?;
        println!("{}", json);
    } else {
        write_csv_report(&result, &args.output)?;
        println!("Report written to {}", args.output.display());
    }

    Ok(())
}

fn print_summary(result: &CrawlResult) {
    println!("Found {} pages:", result.len());

    let mut keys: Vec<&String> = result.keys().collect();
    keys.sort();
    for key in keys {
        let page = &result[key];
        println!("- {}: {} outgoing links", page.url, page.outgoing_links.len());
    }
}
