use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use thiserror::Error;
use zip::ZipArchive;

use crate::pack::{McmetaFile, Pack, PackMeta, Painting, PaintingSet, MAX_DIMENSION, MIN_DIMENSION};

pub const MANIFEST_NAME: &str = "custompaintings.json";
pub const MCMETA_NAME: &str = "pack.mcmeta";
pub const ICON_NAME: &str = "pack.png";
pub const PNG_DATA_URI_PREFIX: &str = "data:image/png;base64,";

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("failed to open archive: {0}")]
    Open(#[from] std::io::Error),
    #[error("not a valid zip archive: {0}")]
    Archive(#[from] zip::result::ZipError),
}

/// Everything recovered from one pass over the archive. Per-entry failures do
/// not abort the scan; they are recorded as warnings and the caller decides
/// whether the partial result is acceptable.
#[derive(Debug, Default)]
pub struct Ingested {
    pub meta: Option<PackMeta>,
    pub pack: Pack,
    pub icon: Option<String>,
    pub warnings: Vec<Warning>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Warning {
    pub entry: String,
    pub reason: String,
}

impl Ingested {
    fn warn(&mut self, entry: impl Into<String>, reason: String) {
        self.warnings.push(Warning {
            entry: entry.into(),
            reason,
        });
    }
}

pub fn ingest(path: &Path) -> Result<Ingested, IngestError> {
    let file = File::open(path)?;
    ingest_reader(BufReader::new(file))
}

pub fn ingest_reader<R: Read + Seek>(reader: R) -> Result<Ingested, IngestError> {
    let archive = ZipArchive::new(reader)?;
    Ok(scan(archive))
}

fn scan<R: Read + Seek>(mut archive: ZipArchive<R>) -> Ingested {
    let mut out = Ingested::default();
    let mut paintings = PaintingSet::new();

    for i in 0..archive.len() {
        let mut entry = match archive.by_index(i) {
            Ok(entry) => entry,
            Err(e) => {
                out.warn(format!("entry #{}", i), format!("unreadable entry: {}", e));
                continue;
            }
        };
        if entry.is_dir() {
            continue;
        }
        let name = entry.name().to_string();

        let mut bytes = Vec::new();
        if let Err(e) = entry.read_to_end(&mut bytes) {
            out.warn(name, format!("failed to read entry: {}", e));
            continue;
        }

        if name == MANIFEST_NAME {
            match serde_json::from_slice::<Pack>(&bytes) {
                Ok(pack) => {
                    out.pack.id = pack.id;
                    out.pack.name = pack.name;
                    for painting in pack.paintings {
                        let painting = clamp_dimensions(painting, &mut out);
                        paintings.merge_manifest(painting);
                    }
                }
                Err(e) => out.warn(name, format!("malformed manifest: {}", e)),
            }
        } else if name == MCMETA_NAME {
            match serde_json::from_slice::<McmetaFile>(&bytes) {
                Ok(mcmeta) => out.meta = Some(mcmeta.pack),
                Err(e) => out.warn(name, format!("malformed pack metadata: {}", e)),
            }
        } else if name == ICON_NAME {
            out.icon = Some(png_data_uri(&bytes));
        } else if let Some(id) = painting_id(&name) {
            paintings.attach_image(id, png_data_uri(&bytes));
        }
    }

    out.pack.paintings = paintings.into_paintings();
    out
}

pub fn png_data_uri(bytes: &[u8]) -> String {
    format!("{}{}", PNG_DATA_URI_PREFIX, BASE64.encode(bytes))
}

/// Matches entries whose path ends in `painting/<id>.png` (word characters
/// only) and returns the ID.
fn painting_id(name: &str) -> Option<&str> {
    let (dir, file) = name.rsplit_once('/')?;
    if dir != "painting" && !dir.ends_with("/painting") {
        return None;
    }
    let stem = file.strip_suffix(".png")?;
    if stem.is_empty() || !stem.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_') {
        return None;
    }
    Some(stem)
}

fn clamp_dimensions(mut painting: Painting, out: &mut Ingested) -> Painting {
    let range = MIN_DIMENSION..=MAX_DIMENSION;
    if !range.contains(&painting.height) {
        out.warn(
            MANIFEST_NAME,
            format!(
                "painting {}: height {} out of range, clamped",
                painting.id, painting.height
            ),
        );
        painting.height = painting.height.clamp(MIN_DIMENSION, MAX_DIMENSION);
    }
    if !range.contains(&painting.width) {
        out.warn(
            MANIFEST_NAME,
            format!(
                "painting {}: width {} out of range, clamped",
                painting.id, painting.width
            ),
        );
        painting.width = painting.width.clamp(MIN_DIMENSION, MAX_DIMENSION);
    }
    painting
}
