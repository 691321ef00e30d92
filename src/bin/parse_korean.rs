use chrono::NaiveDate;
use clap::Parser;
use dinner_order_actions::adapters::clock::SEOUL_UTC_OFFSET_HOURS;
use dinner_order_actions::core::date::parse_korean_date;
use dinner_order_actions::core::numeral::parse_korean_number;
use dinner_order_actions::core::time::{extract_time_phrase, parse_korean_time};
use dinner_order_actions::domain::ports::Clock;
use dinner_order_actions::utils::logger;
use dinner_order_actions::SystemClock;

#[derive(Parser)]
#[command(name = "parse-korean")]
#[command(about = "Show how numeral, time and date parsers read a phrase")]
struct Args {
    /// Phrase to parse, e.g. "다음 주 금요일 7시"
    phrase: String,

    /// Anchor date (yyyy-mm-dd); defaults to today in Seoul
    #[arg(long)]
    today: Option<String>,

    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logger::init_cli_logger(args.verbose);

    let today = match &args.today {
        Some(date) => NaiveDate::parse_from_str(date, "%Y-%m-%d")?,
        None => SystemClock::from_offset_hours(SEOUL_UTC_OFFSET_HOURS)?
            .now()
            .date_naive(),
    };

    println!("🔤 Phrase: {}", args.phrase);
    println!("📅 Anchor: {}", today);

    match parse_korean_number(&args.phrase) {
        Some(n) => println!("  Number: {}", n),
        None => println!("  Number: (not a number)"),
    }

    let time_input = extract_time_phrase(&args.phrase).unwrap_or_else(|| args.phrase.clone());
    let time = parse_korean_time(&time_input);
    if time == time_input.trim() {
        println!("  Time:   (no time pattern)");
    } else {
        println!("  Time:   {}", time);
    }

    match parse_korean_date(&args.phrase, today) {
        Ok(date) if date == args.phrase.trim() => println!("  Date:   (unchanged) {}", date),
        Ok(date) => println!("  Date:   {}", date),
        Err(e) => println!("  Date:   ❌ {}", e),
    }

    Ok(())
}
