use clap::Parser;

use aoclib::{resolve_fields, Notes};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[clap(short, long)]
    verbose: bool,
    /// Multiply the values of fields whose names start with this
    #[clap(short, long, default_value = "departure")]
    prefix: String,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let log_level = if args.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    env_logger::builder()
        .format_module_path(false)
        .format_timestamp_millis()
        .filter_level(log_level)
        .init();
    let stdin = std::io::stdin();
    let input = std::io::read_to_string(stdin)?;
    let notes = Notes::parse(&input)?;
    let start = std::time::Instant::now();
    let assignment = resolve_fields(&notes.rules, &notes.own, &notes.nearby)?;
    log::debug!("resolved {} fields in {:?}", assignment.len(), start.elapsed());
    let product = assignment.prefix_product(&notes.own, &args.prefix)?;
    println!("{}", product);
    Ok(())
}
