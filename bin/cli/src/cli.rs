use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use dcat_quality_core::{Feature, SystemPersona};

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "dcat-quality")]
#[command(about = "Quality assessment of DCAT-AP catalog metadata")]
pub struct Args {
    /// Model name, overrides MODEL_NAME
    #[arg(long, global = true)]
    pub model: Option<String>,

    /// System instruction sent ahead of each prompt
    #[arg(long, global = true, value_enum, default_value_t = PersonaArg::Generic)]
    pub persona: PersonaArg,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Score title and description of every dataset and run rule checks
    Analyze {
        /// Catalog file (JSON array or JSON lines)
        #[arg(long)]
        input: PathBuf,

        /// Write the report here instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,

        /// Completion calls in flight at once
        #[arg(long, default_value_t = 1)]
        concurrency: usize,
    },

    /// Ask for anomalies across one feature of the whole catalog
    Anomalies {
        #[arg(long)]
        input: PathBuf,

        #[arg(long, value_enum)]
        feature: FeatureArg,

        /// Drop hidden-null values before sending the list
        #[arg(long)]
        skip_hidden_nulls: bool,
    },

    /// Rule checks only, no LLM calls
    Check {
        #[arg(long)]
        input: PathBuf,

        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Print a reference table as JSON
    Reference {
        #[arg(value_enum)]
        table: TableArg,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PersonaArg {
    Generic,
    StatisticsOffice,
}

impl From<PersonaArg> for SystemPersona {
    fn from(arg: PersonaArg) -> Self {
        match arg {
            PersonaArg::Generic => SystemPersona::Generic,
            PersonaArg::StatisticsOffice => SystemPersona::StatisticsOffice,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FeatureArg {
    Title,
    Description,
}

impl From<FeatureArg> for Feature {
    fn from(arg: FeatureArg) -> Self {
        match arg {
            FeatureArg::Title => Feature::Title,
            FeatureArg::Description => Feature::Description,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TableArg {
    Dataset,
    Distribution,
    Themes,
    Frequencies,
    HiddenNulls,
}
