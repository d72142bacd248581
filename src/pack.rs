use std::collections::HashMap;

use serde::{Deserialize, Serialize};

pub const MIN_DIMENSION: u32 = 1;
pub const MAX_DIMENSION: u32 = 8;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Pack {
    pub id: String,
    pub name: String,
    pub paintings: Vec<Painting>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Painting {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artist: Option<String>,
    #[serde(default = "default_dimension")]
    pub height: u32,
    #[serde(default = "default_dimension")]
    pub width: u32,
    // Image data never comes from the manifest, only from painting/<id>.png entries.
    #[serde(skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
}

fn default_dimension() -> u32 {
    MIN_DIMENSION
}

impl Painting {
    pub fn bare(id: impl Into<String>) -> Self {
        Painting {
            id: id.into(),
            name: None,
            artist: None,
            height: MIN_DIMENSION,
            width: MIN_DIMENSION,
            data: None,
        }
    }
}

/// The `pack.mcmeta` file, a single `pack` object wrapping the actual metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct McmetaFile {
    pub pack: PackMeta,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PackMeta {
    pub pack_format: i32,
    pub description: String,
}

/// Ordered painting accumulation: a list of IDs plus a lookup table, updated
/// together so the final output order is the first-seen order of IDs no matter
/// whether an ID arrived via the manifest or via a loose image entry.
#[derive(Debug, Default)]
pub struct PaintingSet {
    order: Vec<String>,
    entries: HashMap<String, Painting>,
}

impl PaintingSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Register a manifest entry. Descriptive fields from the manifest win;
    /// image data captured earlier from a loose file is carried over.
    pub fn merge_manifest(&mut self, mut painting: Painting) {
        match self.entries.get(&painting.id) {
            Some(existing) => {
                painting.data = existing.data.clone();
                self.entries.insert(painting.id.clone(), painting);
            }
            None => {
                self.order.push(painting.id.clone());
                self.entries.insert(painting.id.clone(), painting);
            }
        }
    }

    /// Register image data for an ID, creating a bare painting if the ID is
    /// unseen. Descriptive fields are never touched.
    pub fn attach_image(&mut self, id: &str, data_uri: String) {
        if !self.entries.contains_key(id) {
            self.order.push(id.to_string());
            self.entries.insert(id.to_string(), Painting::bare(id));
        }
        if let Some(entry) = self.entries.get_mut(id) {
            entry.data = Some(data_uri);
        }
    }

    pub fn into_paintings(mut self) -> Vec<Painting> {
        self.order
            .iter()
            .filter_map(|id| self.entries.remove(id))
            .collect()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn manifest_entry(id: &str, name: &str) -> Painting {
        Painting {
            name: Some(name.to_string()),
            artist: Some("artist".to_string()),
            height: 2,
            width: 3,
            ..Painting::bare(id)
        }
    }

    #[test]
    fn painting_defaults_on_sparse_manifest_json() {
        let painting: Painting = serde_json::from_str(r#"{"id": "plains"}"#).unwrap();
        assert_eq!(painting.id, "plains");
        assert_eq!(painting.name, None);
        assert_eq!(painting.artist, None);
        assert_eq!(painting.height, 1);
        assert_eq!(painting.width, 1);
        assert_eq!(painting.data, None);
    }

    #[test]
    fn manifest_data_field_is_ignored() {
        let painting: Painting =
            serde_json::from_str(r#"{"id": "plains", "data": "data:image/png;base64,AAAA"}"#)
                .unwrap();
        assert_eq!(painting.data, None);
    }

    #[test]
    fn serialized_painting_skips_absent_fields() {
        let json = serde_json::to_value(Painting::bare("plains")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"id": "plains", "height": 1, "width": 1})
        );
    }

    #[test]
    fn mcmeta_defaults_on_missing_fields() {
        let meta: McmetaFile = serde_json::from_str(r#"{"pack": {}}"#).unwrap();
        assert_eq!(meta.pack.pack_format, 0);
        assert_eq!(meta.pack.description, "");
    }

    #[test]
    fn image_then_manifest_merges_both_sides() {
        let mut set = PaintingSet::new();
        set.attach_image("plains", "data:image/png;base64,AAAA".to_string());
        set.merge_manifest(manifest_entry("plains", "Plains"));

        let paintings = set.into_paintings();
        assert_eq!(paintings.len(), 1);
        assert_eq!(paintings[0].name.as_deref(), Some("Plains"));
        assert_eq!(paintings[0].height, 2);
        assert_eq!(
            paintings[0].data.as_deref(),
            Some("data:image/png;base64,AAAA")
        );
    }

    #[test]
    fn manifest_then_image_merges_both_sides() {
        let mut set = PaintingSet::new();
        set.merge_manifest(manifest_entry("plains", "Plains"));
        set.attach_image("plains", "data:image/png;base64,AAAA".to_string());

        let paintings = set.into_paintings();
        assert_eq!(paintings.len(), 1);
        assert_eq!(paintings[0].name.as_deref(), Some("Plains"));
        assert_eq!(
            paintings[0].data.as_deref(),
            Some("data:image/png;base64,AAAA")
        );
    }

    #[test]
    fn first_seen_order_is_preserved_across_sources() {
        let mut set = PaintingSet::new();
        set.attach_image("zebra", "data:image/png;base64,AAAA".to_string());
        set.merge_manifest(manifest_entry("alpha", "Alpha"));
        set.merge_manifest(manifest_entry("zebra", "Zebra"));
        set.attach_image("beta", "data:image/png;base64,BBBB".to_string());

        let ids: Vec<String> = set.into_paintings().into_iter().map(|p| p.id).collect();
        assert_eq!(ids, vec!["zebra", "alpha", "beta"]);
    }

    #[test]
    fn duplicate_manifest_ids_keep_one_entry() {
        let mut set = PaintingSet::new();
        set.merge_manifest(manifest_entry("plains", "First"));
        set.merge_manifest(manifest_entry("plains", "Second"));

        let paintings = set.into_paintings();
        assert_eq!(paintings.len(), 1);
        assert_eq!(paintings[0].name.as_deref(), Some("Second"));
    }
}
