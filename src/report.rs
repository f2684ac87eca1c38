use crate::results::CrawlResult;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

const HEADER: &str = "page_url,h1,first_paragraph,outgoing_link_urls,image_urls";

/// Writes the crawl result as a CSV report.
///
/// One row per recorded page, link and image lists joined with `;`, rows
/// sorted by normalized key so repeated runs produce identical files. An
/// empty result writes nothing.
pub fn write_csv_report<P: AsRef<Path>>(result: &CrawlResult, path: P) -> io::Result<()> {
    if result.is_empty() {
        ::log::info!("No data to write to CSV");
        return Ok(());
    }

    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    writeln!(writer, "{}", HEADER)?;

    let mut keys: Vec<&String> = result.keys().collect();
    keys.sort();

    for key in keys {
        let page = &result[key];
        let row = [
            escape_field(&page.url),
            escape_field(&page.h1),
            escape_field(&page.first_paragraph),
            escape_field(&page.outgoing_links.join(";")),
            escape_field(&page.image_urls.join(";")),
        ];
        writeln!(writer, "{}", row.join(","))?;
    }

    writer.flush()
}

/// Quote a field if it contains a separator, a quote, or a line break
fn escape_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
