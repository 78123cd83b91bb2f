//! Reordering of independent layers.

use rustc_hash::FxHashSet;
use tracing::trace;
use crate::diagram::{ Diagram, DiagramError, DiagResult, Layer };

impl Diagram {
    /// Move the layer at `i` to position `j` through adjacent interchanges.
    ///
    /// Each adjacent move is only possible when the two layers' nodes sit on
    /// disjoint wire ranges. By default a move first checks whether the earlier
    /// node lies to the right of the later one; setting `left` checks the
    /// opposite arrangement first, which only matters for nodes with an empty
    /// domain or codomain.
    ///
    /// Fails if either index is out of range or some adjacent pair on the way is
    /// not independent.
    pub fn interchange(&self, i: usize, j: usize, left: bool)
        -> DiagResult<Self>
    {
        let n = self.layers.len();
        if i >= n { return Err(DiagramError::MissingLayer(i, n)); }
        if j >= n { return Err(DiagramError::MissingLayer(j, n)); }
        let mut layers = self.layers.clone();
        if i < j {
            for k in i..j { swap_layers(&mut layers, k, left)?; }
        } else {
            for k in (j..i).rev() { swap_layers(&mut layers, k, left)?; }
        }
        Ok(Self { dom: self.dom.clone(), cod: self.cod.clone(), layers })
    }

    /// Repeatedly interchange independent adjacent layers until no move
    /// applies.
    ///
    /// Without `left`, a node is moved earlier past a preceding node lying
    /// entirely to its right; with `left`, past a preceding node lying entirely
    /// to its left. Diagrams related by interchanges have the same normal form.
    ///
    /// Fails with `NotConnected` if rewriting revisits a diagram, as it does for
    /// adjacent scalars and other closed components.
    pub fn normal_form(&self, left: bool) -> DiagResult<Self> {
        let mut diagram = self.clone();
        let mut seen: FxHashSet<Diagram> = FxHashSet::default();
        seen.insert(diagram.clone());
        let mut moved = true;
        while moved {
            moved = false;
            for i in 0..diagram.layers.len().saturating_sub(1) {
                if !should_move(&diagram.layers[i], &diagram.layers[i + 1], left) {
                    continue;
                }
                trace!("normal form: interchange layers {} and {}", i, i + 1);
                swap_layers(&mut diagram.layers, i, left)?;
                if !seen.insert(diagram.clone()) {
                    return Err(DiagramError::NotConnected);
                }
                moved = true;
            }
        }
        Ok(diagram)
    }
}

fn should_move(first: &Layer, second: &Layer, left: bool) -> bool {
    let off0 = first.offset();
    let off1 = second.offset();
    let cod0 = first.node.n_out();
    let dom1 = second.node.n_in();
    if left { off1 >= off0 + cod0 } else { off0 >= off1 + dom1 }
}

// exchange layers `k` and `k + 1`, re-padding both
fn swap_layers(layers: &mut [Layer], k: usize, left: bool) -> DiagResult<()> {
    let first = &layers[k];
    let second = &layers[k + 1];
    let off0 = first.offset();
    let off1 = second.offset();
    let dom0 = first.node.dom();
    let cod0 = first.node.cod();
    let dom1 = second.node.dom();
    let cod1 = second.node.cod();

    let first_left_of_second = off1 >= off0 + cod0.len();
    let first_right_of_second = off0 >= off1 + dom1.len();
    let (new_first, new_second) =
        if left && first_left_of_second {
            left_case(first, second)
        } else if first_right_of_second {
            let middle = first.left.slice(second.left.len() + dom1.len()..);
            (
                Layer::new(
                    second.left.clone(),
                    second.node.clone(),
                    middle.tensor(&dom0).tensor(&first.right),
                ),
                Layer::new(
                    second.left.tensor(&cod1).tensor(&middle),
                    first.node.clone(),
                    first.right.clone(),
                ),
            )
        } else if first_left_of_second {
            left_case(first, second)
        } else {
            return Err(DiagramError::Interchange(k, k + 1));
        };
    layers[k] = new_first;
    layers[k + 1] = new_second;
    Ok(())
}

// the earlier node lies entirely to the left of the later one
fn left_case(first: &Layer, second: &Layer) -> (Layer, Layer) {
    let dom0 = first.node.dom();
    let cod0 = first.node.cod();
    let middle = second.left.slice(first.left.len() + cod0.len()..);
    (
        Layer::new(
            first.left.tensor(&dom0).tensor(&middle),
            second.node.clone(),
            second.right.clone(),
        ),
        Layer::new(
            first.left.clone(),
            first.node.clone(),
            middle.tensor(&second.node.cod()).tensor(&second.right),
        ),
    )
}
