use std::io;
use std::path::PathBuf;

use crate::command::ingest_logged;
use crate::event::{emit_all, JsonLineSink};
use crate::ingest::Ingested;

pub fn inspect(input: &PathBuf, summary: bool) -> anyhow::Result<()> {
    let result = ingest_logged(input)?;

    if summary {
        print_summary(&result);
        return Ok(());
    }

    let stdout = io::stdout().lock();
    let mut sink = JsonLineSink::new(stdout);
    emit_all(&result, &mut sink)
}

fn print_summary(result: &Ingested) {
    println!("Pack: {} ({})", display_or(&result.pack.name, "<unnamed>"), display_or(&result.pack.id, "<no id>"));
    match &result.meta {
        Some(meta) => println!("Format: {} - {}", meta.pack_format, meta.description),
        None => println!("Format: <no pack.mcmeta>"),
    }
    println!("Icon: {}", if result.icon.is_some() { "present" } else { "absent" });

    println!("Paintings: {}", result.pack.paintings.len());
    for painting in &result.pack.paintings {
        println!(
            "  {} ({}x{}){}{}{}",
            painting.id,
            painting.width,
            painting.height,
            painting.name.as_deref().map(|n| format!(" \"{}\"", n)).unwrap_or_default(),
            painting.artist.as_deref().map(|a| format!(" by {}", a)).unwrap_or_default(),
            if painting.data.is_some() { "" } else { " [no image]" },
        );
    }

    if !result.warnings.is_empty() {
        println!("Warnings: {}", result.warnings.len());
    }
}

fn display_or<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.is_empty() {
        fallback
    } else {
        value
    }
}
