use anyhow::Result;
use cdrecon_config::{self as config, AppConfig};
use serde::Serialize;
use std::io::{self, Write};

pub mod completions;
pub mod normalize;
pub mod reconcile;

pub struct Context<'a> {
    pub json: bool,
    pub config: &'a AppConfig,
}

impl Context<'_> {
    pub fn delimiter(&self, flag: Option<&str>) -> Result<u8> {
        match flag {
            Some(raw) => Ok(config::parse_delimiter(raw)?),
            None => Ok(self.config.output.delimiter),
        }
    }
}

pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, value)?;
    writeln!(stdout)?;
    Ok(())
}
