use std::io::Write;

use serde::Serialize;

use crate::ingest::Ingested;
use crate::pack::Painting;

/// One event per logical field of the ingested pack. Topic names match what
/// the front-end listens for.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", content = "payload")]
pub enum PackEvent {
    #[serde(rename = "setId")]
    Id(String),
    #[serde(rename = "setName")]
    Name(String),
    #[serde(rename = "setPackFormat")]
    PackFormat(i32),
    #[serde(rename = "setDescription")]
    Description(String),
    #[serde(rename = "setIcon")]
    Icon(String),
    #[serde(rename = "setPaintings")]
    Paintings(Vec<Painting>),
}

/// Consumer of pack events. Passed explicitly to everything that emits, so
/// there is no ambient session handle.
pub trait PackSink {
    fn emit(&mut self, event: PackEvent) -> anyhow::Result<()>;
}

/// Push every available field to the sink. Fields that were never populated
/// are not emitted; the painting list goes out exactly once, last.
pub fn emit_all(result: &Ingested, sink: &mut dyn PackSink) -> anyhow::Result<()> {
    sink.emit(PackEvent::Id(result.pack.id.clone()))?;
    sink.emit(PackEvent::Name(result.pack.name.clone()))?;
    if let Some(meta) = &result.meta {
        sink.emit(PackEvent::PackFormat(meta.pack_format))?;
        sink.emit(PackEvent::Description(meta.description.clone()))?;
    }
    if let Some(icon) = &result.icon {
        sink.emit(PackEvent::Icon(icon.clone()))?;
    }
    sink.emit(PackEvent::Paintings(result.pack.paintings.clone()))?;
    Ok(())
}

/// Writes one JSON object per event, one per line.
pub struct JsonLineSink<W: Write> {
    out: W,
}

impl<W: Write> JsonLineSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> PackSink for JsonLineSink<W> {
    fn emit(&mut self, event: PackEvent) -> anyhow::Result<()> {
        serde_json::to_writer(&mut self.out, &event)?;
        self.out.write_all(b"\n")?;
        Ok(())
    }
}

#[cfg(test)]
#[derive(Debug, Default)]
pub struct CollectingSink {
    pub events: Vec<PackEvent>,
}

#[cfg(test)]
impl PackSink for CollectingSink {
    fn emit(&mut self, event: PackEvent) -> anyhow::Result<()> {
        self.events.push(event);
        Ok(())
    }
}
