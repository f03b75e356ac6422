/// Rendering of a parsed [`Stats`] record for the terminal or other tools.
use crate::config::OutputFormat;
use rsyncstats::Stats;
use serde::Serialize;

/// JSON shape: the record plus the derived speedup.
#[derive(Debug, Serialize)]
struct Report<'a> {
    #[serde(flatten)]
    stats: &'a Stats,
    speedup: Option<f64>,
}

pub fn render(stats: &Stats, format: OutputFormat) -> Result<String, serde_json::Error> {
    match format {
        OutputFormat::Text => Ok(render_text(stats)),
        OutputFormat::Json => serde_json::to_string_pretty(&Report {
            stats,
            speedup: stats.speedup(),
        }),
    }
}

fn render_text(stats: &Stats) -> String {
    if !stats.found {
        return "no rsync transfer totals found\n".to_string();
    }
    let speedup = match stats.speedup() {
        Some(s) => format!("{s:.2}"),
        None => "n/a".to_string(),
    };
    format!(
        "sent:        {} bytes\n\
         received:    {} bytes\n\
         rate:        {:.2} bytes/sec\n\
         total size:  {} bytes\n\
         speedup:     {}\n",
        stats.total_written, stats.total_read, stats.bytes_per_second, stats.total_size, speedup
    )
}
