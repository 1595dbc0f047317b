//! Human-readable distribution statistics.

use std::io::{self, Write};

use crate::error::{BalanceError, BalanceResult};
use crate::layer::{Layer, Layers};

/// Writes per-set statistics for the named layer: bounding box, block
/// count and external communication of every set.
///
/// Asking for `ALL` (any case) reports the cluster, node, and core layers
/// in turn; any other name must match a layer exactly.
pub fn print_statistics<W: Write>(
    layers: &Layers,
    layer_name: &str,
    out: &mut W,
) -> BalanceResult<()> {
    if layer_name.eq_ignore_ascii_case(Layers::ALL) {
        for &name in &[Layers::CLUSTERS, Layers::NODES, Layers::CORES] {
            if let Some(layer) = layers.get(name) {
                print_layer(layer, out)?;
            }
        }
        return Ok(());
    }
    match layers.get(layer_name) {
        Some(layer) => {
            print_layer(layer, out)?;
            Ok(())
        }
        None => Err(BalanceError::UnknownLayer(layer_name.to_owned())),
    }
}

fn print_layer<W: Write>(layer: &Layer, out: &mut W) -> io::Result<()> {
    writeln!(out, "Statistics for layer: {}", layer.name())?;
    writeln!(out, "  Sets: {}", layer.len())?;
    for (i, set) in layer.sets().iter().enumerate() {
        writeln!(
            out,
            "   {} ({},{}) - ({},{}) {} {}",
            i,
            set.min_x(),
            set.min_y(),
            set.max_x(),
            set.max_y(),
            set.len(),
            set.communication(),
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::Block;
    use crate::coordinate::Coordinate;
    use crate::set::Set;

    fn layers_with_cores() -> Layers {
        let mut cores = Layer::new(Layers::CORES);
        cores.add(Set::new(vec![
            Block::land(Coordinate::new(0, 0)),
            Block::land(Coordinate::new(1, 0)),
        ]));
        cores.add(Set::new(vec![Block::land(Coordinate::new(2, 5))]));
        let mut layers = Layers::new();
        layers.add(cores);
        layers
    }

    #[test]
    fn test_layer_report_format() {
        let layers = layers_with_cores();
        let mut out = Vec::new();
        print_statistics(&layers, "CORES", &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let expected = concat!(
            "Statistics for layer: CORES\n",
            "  Sets: 2\n",
            "   0 (0,0) - (1,0) 2 0\n",
            "   1 (2,5) - (2,5) 1 0\n",
        );
        assert_eq!(text, expected);
    }

    #[test]
    fn test_all_skips_missing_layers() {
        let layers = layers_with_cores();
        let mut out = Vec::new();
        print_statistics(&layers, "all", &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        // Only the core layer exists, so only it is reported.
        assert!(text.starts_with("Statistics for layer: CORES"));
        assert_eq!(text.matches("Statistics for layer").count(), 1);
    }

    #[test]
    fn test_unknown_layer_is_an_error() {
        let layers = layers_with_cores();
        let mut out = Vec::new();
        assert!(print_statistics(&layers, "GPUS", &mut out).is_err());
    }
}
