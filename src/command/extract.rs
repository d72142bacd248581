use std::path::{Path, PathBuf};

use anyhow::Context;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;

use crate::command::ingest_logged;
use crate::ingest::{ICON_NAME, MANIFEST_NAME, MCMETA_NAME, PNG_DATA_URI_PREFIX};
use crate::pack::McmetaFile;

pub fn extract(input: &PathBuf, output: &PathBuf) -> anyhow::Result<()> {
    let result = ingest_logged(input)?;
    println!("Extracting pack contents to: {}", output.display());

    std::fs::create_dir_all(output)
        .context("Failed to create output directory")?;
    let abs_output = Path::new(output).canonicalize()?;

    if let Some(icon) = &result.icon {
        let bytes = decode_data_uri(icon).context("Failed to decode pack icon")?;
        std::fs::write(abs_output.join(ICON_NAME), bytes)
            .context("Failed to write pack icon")?;
    }

    if let Some(meta) = &result.meta {
        let mcmeta = McmetaFile { pack: meta.clone() };
        std::fs::write(abs_output.join(MCMETA_NAME), serde_json::to_vec_pretty(&mcmeta)?)
            .context("Failed to write pack metadata")?;
    }

    let painting_dir = abs_output.join("painting");
    std::fs::create_dir_all(&painting_dir)?;
    for painting in &result.pack.paintings {
        let Some(data) = &painting.data else {
            println!("Skipping painting: {} (no image data)", painting.id);
            continue;
        };

        let path = painting_dir.join(format!("{}.png", painting.id));
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
            if !parent.canonicalize()?.starts_with(&abs_output) {
                eprintln!("Skipping painting: {} (Tried escaping output directory)", painting.id);
                continue;
            }
        }

        let bytes = decode_data_uri(data)
            .with_context(|| format!("Failed to decode image data for painting {}", painting.id))?;
        println!("Extracting painting: {} ({} bytes)", painting.id, bytes.len());
        std::fs::write(path, bytes)
            .with_context(|| format!("Failed to write painting {} to file", painting.id))?;
    }

    // Normalized manifest, image data stays in the loose files.
    let mut manifest = result.pack.clone();
    for painting in &mut manifest.paintings {
        painting.data = None;
    }
    std::fs::write(abs_output.join(MANIFEST_NAME), serde_json::to_vec_pretty(&manifest)?)
        .context("Failed to write manifest")?;

    println!("Done! Extracted {} paintings", result.pack.paintings.len());
    Ok(())
}

fn decode_data_uri(data: &str) -> anyhow::Result<Vec<u8>> {
    let encoded = data
        .strip_prefix(PNG_DATA_URI_PREFIX)
        .ok_or_else(|| anyhow::anyhow!("Missing data URI prefix"))?;
    Ok(BASE64.decode(encoded)?)
}
