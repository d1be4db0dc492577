use std::io::{self, Write};

use anyhow::Result;
use serde::Serialize;

pub mod config;
pub mod presenter;
pub mod types;

use config::{OutputConfig, OutputFormat};
use presenter::{JsonPresenter, Presenter, TextPresenter};
use types::{Envelope, Meta};

pub struct Emitter {
    presenter: Box<dyn Presenter>,
}

impl Emitter {
    pub fn new(cfg: OutputConfig) -> Self {
        let presenter: Box<dyn Presenter> = match cfg.format {
            OutputFormat::Json => Box::new(JsonPresenter { pretty: cfg.pretty }),
            OutputFormat::Text => Box::new(TextPresenter),
        };
        Emitter { presenter }
    }

    pub fn emit(&self, env: &Envelope) -> io::Result<()> {
        let mut out = io::stdout().lock();
        self.presenter.emit(env, &mut out)?;
        out.flush()
    }
}

/// Wrap a result in an envelope and print it to stdout.
pub fn emit_result<T: Serialize>(op: &'static str, result: &T) -> Result<()> {
    let value = serde_json::to_value(result)?;
    let count = value.as_array().map(Vec::len);
    let env = Envelope::result(op, &value, count.map(|n| Meta { count: Some(n) }))?;
    let cfg = OutputConfig::from_env().with_json_flag(crate::telemetry::config::json_mode());
    Emitter::new(cfg).emit(&env)?;
    Ok(())
}
