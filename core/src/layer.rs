//! Named groupings of sets at one granularity of a distribution.

use std::collections::HashMap;

use log::debug;

use crate::set::Set;

/// A named, ordered list of sets.
///
/// One layer describes the partition at one granularity, e.g. one set per
/// core.
#[derive(Debug, Clone)]
pub struct Layer {
    name: String,
    sets: Vec<Set>,
}

impl Layer {
    /// An empty layer called `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sets: Vec::new(),
        }
    }

    /// The layer's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Appends a set.
    pub fn add(&mut self, set: Set) {
        self.sets.push(set);
    }

    /// Number of sets in the layer.
    pub fn len(&self) -> usize {
        self.sets.len()
    }

    /// Whether the layer holds no sets.
    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    /// The sets, in insertion order.
    pub fn sets(&self) -> &[Set] {
        &self.sets
    }

    /// The `index`th set.
    ///
    /// Panics if `index` is out of range.
    pub fn get(&self, index: usize) -> &Set {
        &self.sets[index]
    }

    /// The first set containing a block at `(x, y)`, if any.
    pub fn locate(&self, x: i32, y: i32) -> Option<&Set> {
        self.sets.iter().find(|s| s.contains(x, y))
    }
}

/// All layers produced for one distribution, by name.
#[derive(Debug, Clone, Default)]
pub struct Layers {
    layers: HashMap<String, Layer>,
}

impl Layers {
    /// Name of the one-set-per-cluster layer.
    pub const CLUSTERS: &'static str = "CLUSTERS";
    /// Name of the one-set-per-node layer.
    pub const NODES: &'static str = "NODES";
    /// Name of the one-set-per-core layer.
    pub const CORES: &'static str = "CORES";
    /// Name of the one-set-per-block layer.
    pub const BLOCKS: &'static str = "BLOCKS";
    /// Name of the single-set layer holding every distributed block.
    pub const ALL: &'static str = "ALL";

    /// An empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `layer` under its own name, replacing any previous layer of
    /// that name.
    pub fn add(&mut self, layer: Layer) {
        debug!("adding layer {} with {} sets", layer.name(), layer.len());
        self.layers.insert(layer.name().to_owned(), layer);
    }

    /// The layer called `name`, if present.
    pub fn get(&self, name: &str) -> Option<&Layer> {
        self.layers.get(name)
    }

    /// Whether a layer called `name` is present.
    pub fn contains(&self, name: &str) -> bool {
        self.layers.contains_key(name)
    }

    /// Number of layers.
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    /// Whether no layers are present.
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// All layer names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.layers.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::Block;
    use crate::coordinate::Coordinate;

    fn land_set(coords: &[(i32, i32)]) -> Set {
        Set::new(
            coords
                .iter()
                .map(|&(x, y)| Block::land(Coordinate::new(x, y)))
                .collect(),
        )
    }

    #[test]
    fn test_locate() {
        let mut layer = Layer::new("CORES");
        layer.add(land_set(&[(0, 0), (1, 0)]));
        layer.add(land_set(&[(0, 1), (1, 1)]));

        assert_eq!(layer.locate(1, 0).unwrap().min_y(), 0);
        assert_eq!(layer.locate(0, 1).unwrap().min_y(), 1);
        assert!(layer.locate(5, 5).is_none());
    }

    #[test]
    fn test_layers_registry() {
        let mut layers = Layers::new();
        layers.add(Layer::new(Layers::CORES));
        layers.add(Layer::new(Layers::NODES));

        assert!(layers.contains("CORES"));
        assert!(!layers.contains("GPUS"));
        assert_eq!(layers.names(), vec!["CORES", "NODES"]);
        assert_eq!(layers.get("NODES").unwrap().len(), 0);
        assert_eq!(layers.len(), 2);
    }
}
