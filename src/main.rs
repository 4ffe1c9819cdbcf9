//! CLI entry point for the grades overview.
//!
//! Fetches the grades document once and renders the dashboard, subject
//! pages, monthly progression or a filtered list as text or JSON.

use std::ffi::OsStr;
use std::io::{BufRead, Write};
use std::path::Path;

use anyhow::Result;
use clap::{Parser, Subcommand};
use serde_json::json;
use slimme_cijfers::analytics::aggregate::{
    aggregate_by_subject, aggregate_overall, sort_by_average_desc, sort_by_name,
    subject_aggregate,
};
use slimme_cijfers::analytics::filter::{
    ALL, FilterCriteria, SortKey, band_choice, filter_and_sort, recent, subject_choice,
};
use slimme_cijfers::analytics::grade::GradeStatus;
use slimme_cijfers::analytics::progression::{build_monthly_progression, build_subject_progression};
use slimme_cijfers::analytics::types::{SubjectAggregate, Trend};
use slimme_cijfers::analytics::validate::numeric_result;
use slimme_cijfers::config::Settings;
use slimme_cijfers::fetch::load_source;
use slimme_cijfers::models::{GradeRecord, student_name};
use slimme_cijfers::navigation::{NavigationState, Navigator};
use slimme_cijfers::output::{print_json, write_records_csv};
use slimme_cijfers::parser::parse_grades;
use tracing::{info, warn};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "slimme_cijfers")]
#[command(about = "Overview, statistics and progression of school grades", long_about = None)]
struct Cli {
    /// Path to file or URL to fetch (overrides GRADES_URL)
    #[arg(short, long, global = true, value_name = "FILE_OR_URL")]
    source: Option<String>,

    /// Print JSON instead of text
    #[arg(long, global = true, default_value_t = false)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Dashboard: overall statistics, first subjects and recent grades
    Overview,
    /// All subjects, best average first
    Subjects,
    /// Detail page of a single subject
    Subject {
        /// Subject name as it appears in the data
        name: String,
    },
    /// Average per month with the running overall average
    Progression,
    /// Filtered and sorted list of grades
    List {
        /// Only this subject, or all
        #[arg(long, default_value = ALL)]
        subject: String,

        /// all, excellent, good, sufficient or insufficient
        #[arg(short, long, default_value = ALL)]
        band: String,

        /// date-desc, date-old, subject-az, grade-desc or grade-asc
        #[arg(long, default_value_t = SortKey::DateDesc)]
        sort: SortKey,

        /// Substring of the subject name or short code
        #[arg(short = 'q', long)]
        search: Option<String>,

        /// Also write the list to this CSV file
        #[arg(long)]
        csv: Option<String>,
    },
    /// Interactive drill-down: dashboard, subject list, subject detail
    Browse,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let settings = Settings::from_env().with_source(cli.source.clone());

    let _file_guard = init_logging(&settings.log_file_path)?;

    let bytes = load_source(&settings.source, settings.api_key.as_deref()).await?;
    let records = parse_grades(&bytes)?.items;
    info!(records = records.len(), source = %settings.source, "Grades loaded");

    match cli.command {
        Commands::Overview => overview(&records, cli.json)?,
        Commands::Subjects => subjects(&records, cli.json)?,
        Commands::Subject { name } => subject_detail(&records, &name, cli.json)?,
        Commands::Progression => progression(&records, cli.json)?,
        Commands::List {
            subject,
            band,
            sort,
            search,
            csv,
        } => {
            let criteria = FilterCriteria {
                subject: subject_choice(&subject),
                band: band_choice(&band).map_err(anyhow::Error::msg)?,
                sort,
                search,
            };
            list(&records, &criteria, csv.as_deref(), cli.json)?;
        }
        Commands::Browse => browse(&records)?,
    }

    Ok(())
}

/// Logging setup: colored stderr + JSON rolling log file.
fn init_logging(log_file_path: &str) -> Result<tracing_appender::non_blocking::WorkerGuard> {
    let log_dir = Path::new(log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("slimme_cijfers.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    Ok(file_guard)
}

fn fmt_grade(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{v:.1}"))
}

fn trend_marker(trend: Trend) -> &'static str {
    match trend {
        Trend::Improving => "↑",
        Trend::Declining => "↓",
        Trend::Stable => "-",
    }
}

fn print_subject_row(s: &SubjectAggregate) {
    println!(
        "  {:<24} {:<6} gem {:>4}  hoogste {:>4}  laatste {:>4}  {:>3} cijfers  {}",
        s.name,
        s.short_code,
        fmt_grade(s.average),
        fmt_grade(s.highest),
        fmt_grade(s.latest),
        s.count,
        trend_marker(s.trend),
    );
}

fn print_record_row(r: &GradeRecord) {
    let status = numeric_result(r)
        .map(|v| GradeStatus::of(v).label())
        .unwrap_or("");
    let date = r
        .entry_time()
        .map(|t| t.format("%d-%m-%Y").to_string())
        .unwrap_or_else(|| r.entry_date.clone());
    let mut notes = Vec::new();
    if r.excluded_from_final {
        notes.push("telt niet mee");
    }
    if r.test_not_taken {
        notes.push("niet gemaakt");
    }

    println!(
        "  {:<10} {:<24} {:>5}  {:<11} {} {}",
        date,
        r.subject.name,
        r.result,
        status,
        r.kind,
        notes.join(", "),
    );
}

fn overview(records: &[GradeRecord], as_json: bool) -> Result<()> {
    let stats = aggregate_overall(records);
    let mut top = aggregate_by_subject(records);
    sort_by_name(&mut top);
    top.truncate(3);
    let latest = recent(records, 3);

    if as_json {
        return print_json(&json!({
            "student": student_name(records),
            "stats": stats,
            "subjects": top,
            "recent": latest,
        }));
    }

    println!("Welkom terug, {}!", student_name(records));
    println!();
    println!("  Gemiddelde      {}", fmt_grade(stats.average));
    println!("  Voldoendes      {}/{}", stats.passed_count, stats.countable_total);
    println!("  Hoogste cijfer  {}", fmt_grade(stats.highest));
    println!("  Vakken          {}", stats.subject_count);
    println!();
    println!("Vakken:");
    for s in &top {
        print_subject_row(s);
    }
    println!();
    println!("Recente cijfers:");
    for r in latest {
        print_record_row(r);
    }

    Ok(())
}

fn subjects(records: &[GradeRecord], as_json: bool) -> Result<()> {
    let mut all = aggregate_by_subject(records);
    sort_by_average_desc(&mut all);

    if as_json {
        return print_json(&all);
    }

    println!("Alle Vakken: {} vakken, {} cijfers totaal", all.len(), records.len());
    for s in &all {
        print_subject_row(s);
    }
    Ok(())
}

fn subject_detail(records: &[GradeRecord], name: &str, as_json: bool) -> Result<()> {
    let Some(aggregate) = subject_aggregate(records, name) else {
        warn!(subject = name, "Unknown subject");
        println!("Geen cijfers gevonden voor '{name}'");
        return Ok(());
    };

    let points = build_subject_progression(records, name);
    let criteria = FilterCriteria {
        subject: Some(name.to_string()),
        ..Default::default()
    };
    let grades = filter_and_sort(records, &criteria);

    if as_json {
        return print_json(&json!({
            "subject": aggregate,
            "progression": points,
            "grades": grades,
        }));
    }

    println!("{} ({})", aggregate.short_code.to_uppercase(), aggregate.name);
    println!();
    println!("  Gemiddelde  {}", fmt_grade(aggregate.average));
    println!("  Hoogste     {}", fmt_grade(aggregate.highest));
    println!("  Laatste     {}", fmt_grade(aggregate.latest));
    println!("  Cijfers     {}", aggregate.count);
    println!("  Trend       {}", trend_marker(aggregate.trend));

    if points.len() > 1 {
        println!();
        println!("Cijferontwikkeling:");
        for p in &points {
            println!("  {:<8} {:>4.1}  {}", p.day_label, p.value, p.kind);
        }
    }

    println!();
    println!("Alle cijfers ({}):", grades.len());
    for r in grades {
        print_record_row(r);
    }
    Ok(())
}

fn progression(records: &[GradeRecord], as_json: bool) -> Result<()> {
    let points = build_monthly_progression(records);
    let undated = aggregate_overall(records).undated_count;
    if undated > 0 {
        warn!(undated, "Countable grades without a valid date are left out of the progression");
    }

    if as_json {
        return print_json(&points);
    }

    println!("Ontwikkeling van gemiddelde (per maand):");
    for p in &points {
        println!(
            "  {:<9} maand {:>5.2}  totaal {:>5.2}  hoogste {:>4.1}  {:>3} cijfers",
            p.month_label, p.month_average, p.cumulative_average, p.month_highest, p.count
        );
    }
    Ok(())
}

fn list(
    records: &[GradeRecord],
    criteria: &FilterCriteria,
    csv_path: Option<&str>,
    as_json: bool,
) -> Result<()> {
    let view = filter_and_sort(records, criteria);

    if let Some(path) = csv_path {
        write_records_csv(path, &view)?;
        info!(path, rows = view.len(), "CSV written");
    }

    if as_json {
        return print_json(&view);
    }

    let noun = if view.len() == 1 { "cijfer" } else { "cijfers" };
    println!("{} {} gevonden", view.len(), noun);
    for r in view {
        print_record_row(r);
    }
    Ok(())
}

fn render(nav: &Navigator, records: &[GradeRecord]) -> Result<()> {
    // A fresh page starts at the top.
    println!();
    let trail: Vec<String> = nav
        .breadcrumbs()
        .iter()
        .enumerate()
        .map(|(i, c)| {
            if c.active {
                format!("[{}]", c.label)
            } else {
                format!("{}:{}", i, c.label)
            }
        })
        .collect();
    println!("{}", trail.join(" > "));
    println!();

    match nav.state() {
        NavigationState::Dashboard => overview(records, false),
        NavigationState::SubjectList => subjects(records, false),
        NavigationState::SubjectDetail { subject } => subject_detail(records, subject, false),
    }
}

fn browse(records: &[GradeRecord]) -> Result<()> {
    let mut nav = Navigator::new();
    render(&nav, records)?;

    let stdin = std::io::stdin();
    loop {
        print!("\n(vakken | open <vak> | terug | <nr> | home | stop) > ");
        std::io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim();

        match line {
            "" => continue,
            "stop" | "quit" | "q" => break,
            "home" => {
                nav.go_to_dashboard();
            }
            "vakken" | "subjects" => {
                nav.view_all_subjects();
            }
            "terug" | "back" => {
                let on_detail = matches!(nav.state(), NavigationState::SubjectDetail { .. });
                if on_detail {
                    nav.view_all_subjects();
                } else {
                    nav.go_to_dashboard();
                }
            }
            _ => {
                if let Some(name) = line.strip_prefix("open ") {
                    let name = name.trim();
                    if subject_aggregate(records, name).is_none() {
                        println!("Onbekend vak '{name}'");
                        continue;
                    }
                    nav.open_subject(name);
                } else if let Ok(index) = line.parse::<usize>() {
                    let Some(crumb) = nav.breadcrumbs().into_iter().nth(index) else {
                        println!("Geen kruimel {index}");
                        continue;
                    };
                    nav.follow(&crumb);
                } else {
                    println!("Onbekend commando '{line}'");
                    continue;
                }
            }
        }

        render(&nav, records)?;
    }

    Ok(())
}
