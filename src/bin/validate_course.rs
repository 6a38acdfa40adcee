use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;

use coursedeck::course::{Course, SAMPLE_COURSE};
use coursedeck::quiz::QuestionSet;

/// Check course files for quiz questions the viewer would leave out.
#[derive(Parser)]
#[command(name = "validate_course", version)]
struct Cli {
    /// Course JSON files. The bundled sample is checked when none are given.
    paths: Vec<PathBuf>,

    /// Print the report as JSON.
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Serialize)]
struct ItemReport {
    item: usize,
    title: String,
    questions: usize,
    usable: usize,
    issues: Vec<String>,
}

#[derive(Debug, Serialize)]
struct CourseReport {
    source: String,
    items: Vec<ItemReport>,
}

impl CourseReport {
    fn build(source: String, course: &Course) -> Self {
        let items = course
            .content
            .iter()
            .enumerate()
            .filter(|(_, item)| !item.quizzes.is_empty())
            .map(|(i, item)| {
                let set = QuestionSet::load(&item.quizzes);
                ItemReport {
                    item: i,
                    title: item.title.clone(),
                    questions: item.quizzes.len(),
                    usable: set.questions.len(),
                    issues: set.issues.iter().map(ToString::to_string).collect(),
                }
            })
            .collect();
        Self { source, items }
    }

    fn issue_count(&self) -> usize {
        self.items.iter().map(|i| i.issues.len()).sum()
    }
}

fn load(cli: &Cli) -> Result<Vec<CourseReport>> {
    if cli.paths.is_empty() {
        let course = Course::sample().context("bundled sample course is unreadable")?;
        return Ok(vec![CourseReport::build(SAMPLE_COURSE.to_string(), &course)]);
    }
    cli.paths
        .iter()
        .map(|path| {
            let course = Course::load(path)
                .with_context(|| format!("could not load {}", path.display()))?;
            Ok(CourseReport::build(path.display().to_string(), &course))
        })
        .collect()
}

fn print_text(reports: &[CourseReport]) {
    for report in reports {
        println!("{}", report.source);
        if report.items.is_empty() {
            println!("  no quizzes");
        }
        for item in &report.items {
            println!(
                "  [{}] {}: {}/{} questions usable",
                item.item, item.title, item.usable, item.questions
            );
            for issue in &item.issues {
                println!("      {issue}");
            }
        }
    }
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    let reports = load(&cli)?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    } else {
        print_text(&reports);
    }

    let issues: usize = reports.iter().map(CourseReport::issue_count).sum();
    if issues > 0 {
        eprintln!("{issues} question(s) would be left out");
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}
