//! Draggable overlay layers and the ordered store that owns them.
//!
//! The store keeps layers in insertion order, which is also their stacking
//! order: later layers render above earlier ones. There is no reorder
//! operation. At most one layer is selected at a time, and the selection is
//! kept valid by construction: `remove` clears a selection pointing at the
//! removed layer, and `select` refuses ids that are not in the store.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::style::{LayerStyle, Position};

/// Content assigned to a new layer when none is provided.
pub const DEFAULT_LAYER_CONTENT: &str = "New Text";

// ============================================================================
// LayerId
// ============================================================================

/// Opaque identifier for a layer.
///
/// Assigned by the store at creation from a monotonic counter; unique within
/// the store and stable for the layer's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LayerId(u64);

impl fmt::Display for LayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// Layer
// ============================================================================

/// What a layer holds. Never changes after creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayerKind {
    /// Free-floating caption text.
    Text,
    /// A solid shape; `content` carries the shape subtype tag (e.g. `"cloud"`).
    Shape,
}

/// One overlay element on the meme canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Layer {
    pub id: LayerId,
    pub kind: LayerKind,
    pub content: String,
    pub position: Position,
    pub rotation_degrees: f32,
    pub style: LayerStyle,
}

impl Layer {
    fn new(id: LayerId, kind: LayerKind, content: &str) -> Self {
        Self {
            id,
            kind,
            content: content.to_string(),
            position: Position::new(150.0, 150.0),
            rotation_degrees: 0.0,
            style: default_style(kind, content),
        }
    }
}

fn default_style(kind: LayerKind, content: &str) -> LayerStyle {
    LayerStyle {
        font_size: match kind {
            LayerKind::Text => 24.0,
            LayerKind::Shape => 0.0,
        },
        color: "#ffffff".to_string(),
        background_color: match kind {
            LayerKind::Text => "transparent".to_string(),
            LayerKind::Shape => "#ffffff".to_string(),
        },
        font_weight: "900".to_string(),
        padding: 8.0,
        corner_radius: if kind == LayerKind::Shape && content == "cloud" {
            50.0
        } else {
            4.0
        },
    }
}

// ============================================================================
// Patches
// ============================================================================

/// Partial update for a layer's top-level fields.
///
/// Patching is split into two explicitly typed operations (this one and
/// [`StylePatch`]) so a field name can never be ambiguous about which shape
/// it targets.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayerPatch {
    pub content: Option<String>,
    pub position: Option<Position>,
    pub rotation_degrees: Option<f32>,
}

/// Partial update for a layer's nested style.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StylePatch {
    pub font_size: Option<f32>,
    pub color: Option<String>,
    pub background_color: Option<String>,
}

// ============================================================================
// LayerStore
// ============================================================================

/// Ordered collection of layers plus the current selection.
#[derive(Debug, Default)]
pub struct LayerStore {
    layers: Vec<Layer>,
    selected: Option<LayerId>,
    next_id: u64,
}

impl LayerStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a layer with kind-dependent defaults, appends it to the top
    /// of the stacking order, selects it, and returns its id.
    ///
    /// Always succeeds.
    pub fn add(&mut self, kind: LayerKind, content: Option<&str>) -> LayerId {
        self.next_id += 1;
        let id = LayerId(self.next_id);
        let layer = Layer::new(id, kind, content.unwrap_or(DEFAULT_LAYER_CONTENT));
        self.layers.push(layer);
        self.selected = Some(id);
        id
    }

    /// Merges a top-level patch into the layer. No-op for an unknown id.
    pub fn update(&mut self, id: LayerId, patch: LayerPatch) {
        let Some(layer) = self.get_mut(id) else {
            return;
        };
        if let Some(content) = patch.content {
            layer.content = content;
        }
        if let Some(position) = patch.position {
            layer.position = position;
        }
        if let Some(rotation) = patch.rotation_degrees {
            layer.rotation_degrees = rotation;
        }
    }

    /// Merges a style patch into the layer's style. No-op for an unknown id.
    pub fn update_style(&mut self, id: LayerId, patch: StylePatch) {
        let Some(layer) = self.get_mut(id) else {
            return;
        };
        if let Some(font_size) = patch.font_size {
            layer.style.font_size = font_size;
        }
        if let Some(color) = patch.color {
            layer.style.color = color;
        }
        if let Some(background_color) = patch.background_color {
            layer.style.background_color = background_color;
        }
    }

    /// Deletes the layer if present, clearing the selection when it pointed
    /// at the removed layer. No-op for an unknown id.
    pub fn remove(&mut self, id: LayerId) {
        self.layers.retain(|layer| layer.id != id);
        if self.selected == Some(id) {
            self.selected = None;
        }
    }

    /// Selects a layer. Returns false (and leaves the selection untouched)
    /// if the id is not in the store, so the selection can never dangle.
    pub fn select(&mut self, id: LayerId) -> bool {
        if self.get(id).is_some() {
            self.selected = Some(id);
            true
        } else {
            false
        }
    }

    /// Clears the selection.
    pub fn deselect(&mut self) {
        self.selected = None;
    }

    pub fn selected(&self) -> Option<LayerId> {
        self.selected
    }

    pub fn selected_layer(&self) -> Option<&Layer> {
        self.selected.and_then(|id| self.get(id))
    }

    pub fn get(&self, id: LayerId) -> Option<&Layer> {
        self.layers.iter().find(|layer| layer.id == id)
    }

    fn get_mut(&mut self, id: LayerId) -> Option<&mut Layer> {
        self.layers.iter_mut().find(|layer| layer.id == id)
    }

    /// Layers in insertion order, which is also stacking order.
    pub fn iter(&self) -> impl Iterator<Item = &Layer> {
        self.layers.iter()
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Removes every layer and clears the selection.
    pub fn clear(&mut self) {
        self.layers.clear();
        self.selected = None;
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_assigns_unique_ids_appends_and_selects() {
        let mut store = LayerStore::new();
        let a = store.add(LayerKind::Text, None);
        let b = store.add(LayerKind::Shape, Some("cloud"));

        assert_ne!(a, b);
        assert_eq!(store.selected(), Some(b));

        // Insertion order is render order.
        let order: Vec<LayerId> = store.iter().map(|l| l.id).collect();
        assert_eq!(order, vec![a, b]);
    }

    #[test]
    fn text_layer_defaults() {
        let mut store = LayerStore::new();
        let id = store.add(LayerKind::Text, None);
        let layer = store.get(id).unwrap();

        assert_eq!(layer.content, DEFAULT_LAYER_CONTENT);
        assert_eq!(layer.position, Position::new(150.0, 150.0));
        assert_eq!(layer.rotation_degrees, 0.0);
        assert_eq!(layer.style.font_size, 24.0);
        assert_eq!(layer.style.background_color, "transparent");
        assert_eq!(layer.style.corner_radius, 4.0);
    }

    #[test]
    fn cloud_shape_gets_round_corners() {
        let mut store = LayerStore::new();
        let cloud = store.add(LayerKind::Shape, Some("cloud"));
        let box_ = store.add(LayerKind::Shape, Some("box"));

        assert_eq!(store.get(cloud).unwrap().style.corner_radius, 50.0);
        assert_eq!(store.get(cloud).unwrap().style.font_size, 0.0);
        assert_eq!(store.get(cloud).unwrap().style.background_color, "#ffffff");
        assert_eq!(store.get(box_).unwrap().style.corner_radius, 4.0);
    }

    #[test]
    fn style_patch_leaves_top_level_untouched() {
        let mut store = LayerStore::new();
        let id = store.add(LayerKind::Text, Some("Hello"));

        store.update_style(
            id,
            StylePatch {
                color: Some("#ff0000".to_string()),
                ..StylePatch::default()
            },
        );

        let layer = store.get(id).unwrap();
        assert_eq!(layer.style.color, "#ff0000");
        assert_eq!(layer.content, "Hello");
        assert_eq!(layer.position, Position::new(150.0, 150.0));
    }

    #[test]
    fn layer_patch_leaves_style_untouched() {
        let mut store = LayerStore::new();
        let id = store.add(LayerKind::Text, Some("Hello"));

        store.update(
            id,
            LayerPatch {
                content: Some("Bye".to_string()),
                ..LayerPatch::default()
            },
        );

        let layer = store.get(id).unwrap();
        assert_eq!(layer.content, "Bye");
        assert_eq!(layer.style.color, "#ffffff");
        assert_eq!(layer.style.font_size, 24.0);
    }

    #[test]
    fn update_unknown_id_is_a_noop() {
        let mut store = LayerStore::new();
        let id = store.add(LayerKind::Text, None);
        store.remove(id);

        store.update(
            id,
            LayerPatch {
                content: Some("ghost".to_string()),
                ..LayerPatch::default()
            },
        );
        store.update_style(
            id,
            StylePatch {
                font_size: Some(99.0),
                ..StylePatch::default()
            },
        );
        assert!(store.is_empty());
    }

    #[test]
    fn removing_selected_layer_clears_selection() {
        let mut store = LayerStore::new();
        let id = store.add(LayerKind::Text, None);
        assert_eq!(store.selected(), Some(id));

        store.remove(id);
        assert_eq!(store.selected(), None);
        assert!(store.is_empty());
    }

    #[test]
    fn removing_other_layer_keeps_selection() {
        let mut store = LayerStore::new();
        let a = store.add(LayerKind::Text, None);
        let b = store.add(LayerKind::Text, None);
        assert!(store.select(a));

        store.remove(b);
        assert_eq!(store.selected(), Some(a));
    }

    #[test]
    fn select_refuses_unknown_id() {
        let mut store = LayerStore::new();
        let a = store.add(LayerKind::Text, None);
        let ghost = store.add(LayerKind::Text, None);
        store.remove(ghost);
        store.select(a);

        assert!(!store.select(ghost));
        assert_eq!(store.selected(), Some(a));
    }

    #[test]
    fn ids_are_not_reused_after_removal() {
        let mut store = LayerStore::new();
        let a = store.add(LayerKind::Text, None);
        store.remove(a);
        let b = store.add(LayerKind::Text, None);
        assert_ne!(a, b);
    }
}
