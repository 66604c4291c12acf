use crate::*;

pub(crate) fn couplet_payload(pairs: u32) -> PairMatchingPayload {
    let mut items = Vec::new();
    let mut correct_pairs = Vec::new();
    for i in 0..pairs {
        let upper = i * 2 + 1;
        let lower = i * 2 + 2;
        items.push(PairItem {
            id: upper,
            text: format!("上句{}", i),
            role: ItemRole::Upper,
        });
        items.push(PairItem {
            id: lower,
            text: format!("下句{}", i),
            role: ItemRole::Lower,
        });
        correct_pairs.push((upper, lower));
    }
    PairMatchingPayload {
        items,
        correct_pairs,
    }
}

pub(crate) fn grid_fill_layout(target: &str, seed: u64) -> GridFillLayout {
    RandomPuzzleGenerator::new(seed)
        .grid_fill(
            &GridFillPayload {
                target_word: target.into(),
            },
            Geometry::new(4, 4, 72., 6.),
        )
        .unwrap()
}

pub(crate) fn matrix_layout(seed: u64) -> MatrixLayout {
    RandomPuzzleGenerator::new(seed)
        .matrix_difference(
            &MatrixDifferencePayload {
                base_glyph: "己".into(),
                variant_glyph: "已".into(),
                preset: None,
            },
            Geometry::new(3, 3, 80., 4.),
        )
        .unwrap()
}

pub(crate) fn pair_layout(pairs: u32, seed: u64) -> PairLayout {
    RandomPuzzleGenerator::new(seed)
        .pair_matching(&couplet_payload(pairs))
        .unwrap()
}

/// Finds the cell holding each target glyph, in target order.
pub(crate) fn solution_path(layout: &GridFillLayout) -> Vec<Coord2> {
    let mut used = Vec::new();
    for &wanted in layout.target() {
        let coords = layout
            .iter_cells()
            .find(|&(coords, glyph)| glyph == wanted && !used.contains(&coords))
            .map(|(coords, _)| coords)
            .unwrap();
        used.push(coords);
    }
    used
}
