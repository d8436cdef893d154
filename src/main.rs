use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};

use kpidata::logging;
use kpidata::pipeline::{Merger, ProjectPaths, RunGuard, save_train_info};
use kpidata::shared::config::{MainSettings, S3Settings, load_main_settings, load_s3_settings};
use kpidata::storage::{ObjectStore, S3ObjectStore};

#[derive(Parser)]
#[command(name = "kpidata")]
#[command(about = "Prepares KPI-extraction training data", long_about = None)]
struct Cli {
    /// Working root holding the data/ and models/ trees
    #[arg(long, default_value = ".")]
    root: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Merge relevance-inference outputs into text_3434.csv
    Merge {
        /// Project to operate on
        #[arg(long)]
        project: String,

        /// Stage through the object store even when the project
        /// settings leave it off
        #[arg(long)]
        s3: bool,
    },
    /// Snapshot the training inputs and settings next to the models
    TrainInfo {
        /// Project to operate on
        #[arg(long)]
        project: String,

        /// Stage through the object store even when the project
        /// settings leave it off
        #[arg(long)]
        s3: bool,
    },
}

struct ProjectContext {
    paths: ProjectPaths,
    main_settings: MainSettings,
    s3_settings: S3Settings,
    s3_usage: bool,
}

fn load_project(root: &Path, project: &str, s3_flag: bool) -> anyhow::Result<ProjectContext> {
    let paths = ProjectPaths::new(project, root);
    let main_settings = load_main_settings(&paths.main_settings_file())
        .with_context(|| format!("loading {}", paths.main_settings_file().display()))?;
    let s3_settings = load_s3_settings(&paths.s3_settings_file())
        .with_context(|| format!("loading {}", paths.s3_settings_file().display()))?;
    let s3_usage = s3_flag || main_settings.general.s3_usage;
    Ok(ProjectContext {
        paths,
        main_settings,
        s3_settings,
        s3_usage,
    })
}

fn run_merge(root: &Path, project: &str, s3_flag: bool) -> anyhow::Result<ExitCode> {
    let ctx = load_project(root, project, s3_flag)?;
    logging::init(&ctx.main_settings.logging)?;
    let _guard = RunGuard::acquire(&ctx.paths.run_marker_file())?;

    let mut merger = Merger::new(project, ctx.s3_usage, ctx.s3_settings, ctx.paths);
    merger.connect_main_store()?;
    if merger.merge()? {
        println!("merged relevance outputs for {project}");
        Ok(ExitCode::SUCCESS)
    } else {
        eprintln!("nothing merged for {project}, see the log for details");
        Ok(ExitCode::FAILURE)
    }
}

fn run_train_info(root: &Path, project: &str, s3_flag: bool) -> anyhow::Result<ExitCode> {
    let ctx = load_project(root, project, s3_flag)?;
    logging::init(&ctx.main_settings.logging)?;
    let _guard = RunGuard::acquire(&ctx.paths.run_marker_file())?;

    let store = if ctx.s3_usage {
        Some(S3ObjectStore::connect(&ctx.s3_settings.main_bucket)?)
    } else {
        None
    };
    let store_ref = store.as_ref().map(|s| s as &dyn ObjectStore);
    let written = save_train_info(
        project,
        ctx.s3_usage,
        store_ref,
        &ctx.main_settings,
        &ctx.s3_settings,
        &ctx.paths,
    )?;
    println!("{}", written.display());
    Ok(ExitCode::SUCCESS)
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    match cli.command {
        Command::Merge { project, s3 } => run_merge(&cli.root, &project, s3),
        Command::TrainInfo { project, s3 } => run_train_info(&cli.root, &project, s3),
    }
}
