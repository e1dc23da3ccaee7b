//! Assess command implementation

use anyhow::Context;
use chrono::{Local, NaiveDate};
use clap::Args;
use rust_decimal::Decimal;
use std::io::Read;
use std::path::PathBuf;

use crate::config::EngineConfig;
use crate::engine::{DiscountEngine, PriceAssessment};
use crate::history::PriceHistory;
use crate::reference::PriceMeta;

#[derive(Args, Debug)]
pub struct AssessArgs {
    /// Price history JSON file, or `-` for stdin
    pub input: PathBuf,

    /// Evaluation date (YYYY-MM-DD), defaults to the local date
    #[arg(long)]
    pub today: Option<NaiveDate>,

    /// Precomputed common price; switches to supplied-reference mode
    #[arg(long)]
    pub common_price: Option<Decimal>,

    /// Precomputed 30-day minimum price (requires --common-price)
    #[arg(long, requires = "common_price")]
    pub min_price: Option<Decimal>,

    /// Pretty-print the JSON output
    #[arg(long)]
    pub pretty: bool,
}

impl AssessArgs {
    pub fn execute(&self, config: &EngineConfig) -> anyhow::Result<()> {
        let output = self.render(&self.assess(config)?)?;
        println!("{}", output);
        Ok(())
    }

    /// Load the history and run the engine
    pub fn assess(&self, config: &EngineConfig) -> anyhow::Result<PriceAssessment> {
        let json = self.read_input()?;
        let history = PriceHistory::from_json(&json)
            .with_context(|| format!("Could not parse {}", self.input.display()))?;
        let today = self.today.unwrap_or_else(|| Local::now().date_naive());
        let engine = DiscountEngine::new(config.clone());

        tracing::info!(
            input = %self.input.display(),
            entries = history.entries().len(),
            %today,
            "Assessing price history"
        );

        let assessment = match self.common_price {
            Some(common_price) => {
                let meta = PriceMeta {
                    common_price,
                    min_price: self.min_price,
                };
                engine.assess_with_meta(&history, &meta, today)?
            }
            None => engine.assess(&history, today)?,
        };
        Ok(assessment)
    }

    fn read_input(&self) -> anyhow::Result<String> {
        if self.input.as_os_str() == "-" {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            return Ok(buf);
        }
        std::fs::read_to_string(&self.input)
            .with_context(|| format!("Could not read {}", self.input.display()))
    }

    fn render(&self, assessment: &PriceAssessment) -> anyhow::Result<String> {
        let rendered = if self.pretty {
            serde_json::to_string_pretty(assessment)?
        } else {
            serde_json::to_string(assessment)?
        };
        Ok(rendered)
    }
}
