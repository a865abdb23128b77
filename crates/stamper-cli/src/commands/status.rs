//! Status command for showing today's summary.

use std::io::Write;

use anyhow::Result;
use stamper_core::{Clock, EventStore, TimeEngine};

use super::util::write_summary;

pub fn run<W, S, C>(writer: &mut W, engine: &TimeEngine<S, C>, json: bool) -> Result<()>
where
    W: Write,
    S: EventStore,
    C: Clock,
{
    let summary = engine.status()?;
    write_summary(writer, &summary, json)
}
