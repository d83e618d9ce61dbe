use std::time::Duration;

use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use tracing_subscriber::EnvFilter;

use seoanalyzer::models::{AnalysisReport, ModuleResult};
use seoanalyzer::validation::{parse_keywords, validate_url};
use seoanalyzer::{AnalysisPipeline, ClaudeProvider, Config, PipelineConfig};

#[derive(Parser, Debug)]
#[command(name = "seoanalyzer")]
#[command(version = "0.1.0")]
#[command(about = "Analyze a web page for SEO against target keywords")]
struct Args {
    /// Target URL to analyze
    #[arg(short, long)]
    url: String,

    /// Comma-separated focus keywords
    #[arg(short, long)]
    keywords: String,

    /// Output format (text, json)
    #[arg(short, long, default_value = "text")]
    format: String,

    /// Output file (defaults to stdout)
    #[arg(short, long)]
    output: Option<String>,

    /// Enable AI-powered SEO recommendations
    #[arg(long)]
    ai: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("seoanalyzer=info".parse()?)
                .add_directive("reqwest=warn".parse()?),
        )
        .init();

    // Load environment variables
    dotenvy::dotenv().ok();

    let args = Args::parse();

    let url = validate_url(&args.url)?;
    let keywords = parse_keywords(&args.keywords)?;

    let config = Config::from_env()?;
    let pipeline_config = PipelineConfig {
        enable_ai: args.ai,
        ..PipelineConfig::from(&config)
    };

    let mut pipeline = AnalysisPipeline::new(pipeline_config)?;
    if args.ai {
        match config.anthropic_api_key.clone() {
            Some(key) => {
                let llm = ClaudeProvider::new(key, Some(config.llm_model.clone()))?;
                pipeline = pipeline.with_llm(llm);
            }
            None => tracing::warn!("--ai requested but ANTHROPIC_API_KEY is not set"),
        }
    }

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}")?);
    spinner.set_message(format!("Analyzing {}", url));
    spinner.enable_steady_tick(Duration::from_millis(100));

    let result = pipeline.analyze_url(url, &keywords).await;
    spinner.finish_and_clear();
    let report = result?;

    output_report(&report, &args)?;

    Ok(())
}

fn output_report(report: &AnalysisReport, args: &Args) -> anyhow::Result<()> {
    let output = match args.format.as_str() {
        "json" => serde_json::to_string_pretty(report)?,
        _ => format_text(report),
    };

    if let Some(ref path) = args.output {
        std::fs::write(path, &output)?;
        tracing::info!("Report written to: {}", path);
    } else {
        println!("{}", output);
    }

    Ok(())
}

fn format_text(report: &AnalysisReport) -> String {
    let mut output = String::new();

    output.push_str(&format!("\n=== SEO Analysis: {} ===\n\n", report.url));
    output.push_str(&format!("Overall SEO Score: {}/100\n", report.overall_score));
    output.push_str(&format!(
        "Keyword Cluster: {}/100\n\n",
        report.keyword_cluster.cluster_score
    ));

    output.push_str("Keywords:\n");
    for ks in &report.keyword_cluster.individual_scores {
        output.push_str(&format!(
            "  - \"{}\": {}/100 (title: {}, meta: {}, h1: {}, density: {:.1}%)\n",
            ks.keyword,
            ks.score,
            yes_no(ks.in_title),
            yes_no(ks.in_meta),
            yes_no(ks.in_h1),
            ks.density
        ));
    }

    output.push_str("\nModules:\n");
    let mut modules = vec![
        &report.technical_seo,
        &report.content_analysis,
        &report.structure_analysis,
        &report.link_analysis,
    ];
    if let Some(ref ai) = report.ai_analysis {
        modules.push(ai);
    }
    for module in modules {
        output.push_str(&format_module(module));
    }

    if !report.top_recommendations.is_empty() {
        output.push_str("\nTop Recommendations:\n");
        for (i, rec) in report.top_recommendations.iter().enumerate() {
            output.push_str(&format!("  {}. {}\n", i + 1, rec));
        }
    }

    output.push_str(&format!(
        "\nAnalyzed on: {}\n",
        report.analyzed_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));

    output
}

fn format_module(module: &ModuleResult) -> String {
    format!(
        "  {:<18} {:>3}/100  [{}]\n",
        module.module_name, module.score, module.status
    )
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "yes"
    } else {
        "no"
    }
}
