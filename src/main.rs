use clap::Parser;
use tracing_subscriber::EnvFilter;

use portfolio_scorer::models::{Insight, ProfileRecords};
use portfolio_scorer::{Evaluation, ScoringConfig, ScoringEngine};

#[derive(Parser, Debug)]
#[command(name = "portfolio-scorer")]
#[command(version = "0.1.0")]
#[command(about = "Score a GitHub portfolio and explain the result")]
struct Args {
    /// JSON file holding the profile records to score
    #[arg(short, long)]
    input: String,

    /// Output format (json, text, markdown)
    #[arg(short, long, default_value = "text")]
    format: String,

    /// Output file (defaults to stdout)
    #[arg(short, long)]
    output: Option<String>,

    /// JSON scoring configuration (defaults to environment overrides)
    #[arg(short, long)]
    config: Option<String>,
}

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("portfolio_scorer=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    // Load environment variables
    dotenvy::dotenv().ok();

    let args = Args::parse();

    let config = match args.config {
        Some(ref path) => ScoringConfig::from_file(path)?,
        None => ScoringConfig::from_env()?,
    };
    let engine = ScoringEngine::new(config)?;

    tracing::info!("Scoring profile records from: {}", args.input);
    let raw = std::fs::read_to_string(&args.input)?;
    let records: ProfileRecords = serde_json::from_str(&raw)?;

    let evaluation = engine.evaluate(&records)?;
    output_evaluation(&evaluation, &args)?;

    Ok(())
}

fn output_evaluation(evaluation: &Evaluation, args: &Args) -> anyhow::Result<()> {
    let output = match args.format.as_str() {
        "json" => serde_json::to_string_pretty(evaluation)?,
        "markdown" => format_markdown(evaluation),
        _ => format_text(evaluation),
    };

    if let Some(ref path) = args.output {
        std::fs::write(path, &output)?;
        tracing::info!("Output written to: {}", path);
    } else {
        println!("{}", output);
    }

    Ok(())
}

fn format_text(evaluation: &Evaluation) -> String {
    let breakdown = &evaluation.breakdown;
    let mut output = String::new();

    output.push_str(&format!(
        "\n=== Portfolio Score: {:.1}/100 ({}) ===\n\n",
        breakdown.final_score, breakdown.percentile_rank
    ));

    output.push_str("Components:\n");
    for component in breakdown.components() {
        output.push_str(&format!(
            "  - {:<16} {:>5.1}/100 (weight {:.0}%)\n",
            component.name, component.score, component.weight
        ));
    }

    if let Some(ref activity) = evaluation.activity {
        output.push_str(&format!(
            "\nActivity Trend: {} ({})\n",
            activity.trend_signal, activity.trend_details
        ));
        output.push_str(&format!(
            "  Weekly average: {:.1}, longest streak: {} days, current streak: {} days\n",
            activity.weekly_average, activity.longest_streak, activity.current_streak
        ));
        for anomaly in &activity.validation.anomalies {
            output.push_str(&format!("  ! {}\n", anomaly));
        }
    }

    if let Some(ref language) = evaluation.facts.repos.primary_language {
        output.push_str(&format!("\nPrimary Language: {}\n", language));
    }

    let insights = &evaluation.insights;
    if !insights.strengths.is_empty() {
        output.push_str("\nStrengths:\n");
        for strength in &insights.strengths {
            output.push_str(&format!("  + {}: {}\n", strength.title, strength.description));
        }
    }

    if !insights.weaknesses.is_empty() {
        output.push_str("\nAreas for Improvement:\n");
        for weakness in &insights.weaknesses {
            output.push_str(&text_line("-", weakness));
        }
    }

    if !insights.red_flags.is_empty() {
        output.push_str("\nRed Flags:\n");
        for flag in &insights.red_flags {
            output.push_str(&text_line("!", flag));
        }
    }

    output.push_str(&format!(
        "\nScored as of: {}\n",
        evaluation.facts.as_of.format("%Y-%m-%d %H:%M:%S UTC")
    ));

    output
}

fn text_line(marker: &str, insight: &Insight) -> String {
    let mut line = format!(
        "  {} [{}] {}: {}\n",
        marker, insight.significance, insight.title, insight.description
    );
    if let Some(ref guidance) = insight.guidance {
        line.push_str(&format!("      -> {}\n", guidance));
    }
    line
}

fn format_markdown(evaluation: &Evaluation) -> String {
    let breakdown = &evaluation.breakdown;
    let mut output = String::new();

    output.push_str("# Portfolio Score\n\n");
    output.push_str(&format!(
        "**Final score:** {:.1}/100 ({})\n\n",
        breakdown.final_score, breakdown.percentile_rank
    ));

    output.push_str("## Components\n\n");
    output.push_str("| Component | Score | Weight | Weighted |\n");
    output.push_str("|-----------|-------|--------|----------|\n");
    for component in breakdown.components() {
        output.push_str(&format!(
            "| {} | {:.1} | {:.0}% | {:.2} |\n",
            component.name,
            component.score,
            component.weight,
            component.weighted_score()
        ));
    }

    if let Some(ref activity) = evaluation.activity {
        output.push_str("\n## Activity\n\n");
        output.push_str("| Period | Total | Per Week | Active Days |\n");
        output.push_str("|--------|-------|----------|-------------|\n");
        for period in &activity.periods {
            output.push_str(&format!(
                "| {}{} | {} | {:.1} | {} |\n",
                period.label,
                if period.is_partial { " (partial)" } else { "" },
                period.total,
                period.per_week,
                period.active_days
            ));
        }
        output.push_str(&format!(
            "\n**Trend:** {} ({})\n",
            activity.trend_signal, activity.trend_details
        ));
    }

    let sections = [
        ("Strengths", &evaluation.insights.strengths),
        ("Areas for Improvement", &evaluation.insights.weaknesses),
        ("Red Flags", &evaluation.insights.red_flags),
    ];
    for (heading, insights) in sections {
        if insights.is_empty() {
            continue;
        }
        output.push_str(&format!("\n## {}\n\n", heading));
        for insight in insights {
            output.push_str(&format!(
                "- **{}** ({}): {}\n",
                insight.title, insight.significance, insight.description
            ));
            if let Some(ref guidance) = insight.guidance {
                output.push_str(&format!("  - _{}_\n", guidance));
            }
        }
    }

    output.push_str(&format!(
        "\n---\n*Scored as of {}*\n",
        evaluation.facts.as_of.format("%Y-%m-%d %H:%M:%S UTC")
    ));

    output
}
