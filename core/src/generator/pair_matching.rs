use hashbrown::HashSet;
use rand::prelude::*;
use serde::{Deserialize, Serialize};

use super::shuffle;
use crate::*;

/// Horizontal space between the upper and lower columns.
pub const COLUMN_GAP: f32 = 24.;

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PairMetrics {
    pub column_width: f32,
    pub item_height: f32,
    pub item_gap: f32,
    pub column_gap: f32,
}

impl PairMetrics {
    /// Item size shrinks as the number of pairs grows: `<= 3`, `<= 5` and more.
    pub fn for_pair_count(count: usize) -> Self {
        let (item_height, column_width) = match count {
            0..=3 => (48., 160.),
            4..=5 => (40., 150.),
            _ => (34., 130.),
        };
        Self {
            column_width,
            item_height,
            item_gap: if count <= 5 { 8. } else { 6. },
            column_gap: COLUMN_GAP,
        }
    }

    pub fn total_width(&self) -> f32 {
        self.column_width * 2. + self.column_gap
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlacedItem {
    pub id: ItemId,
    pub text: String,
    pub role: ItemRole,
    pub rect: Rect,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PairLayout {
    /// Upper items in payload order, then the shuffled lower items.
    items: Vec<PlacedItem>,
    /// Declared pairs, stored as `(min, max)`.
    pairs: HashSet<(ItemId, ItemId)>,
    metrics: PairMetrics,
    upper_count: usize,
}

impl PairLayout {
    pub fn items(&self) -> &[PlacedItem] {
        &self.items
    }

    pub fn item(&self, id: ItemId) -> Option<&PlacedItem> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn metrics(&self) -> PairMetrics {
        self.metrics
    }

    pub fn upper_count(&self) -> usize {
        self.upper_count
    }

    pub fn is_declared_pair(&self, a: ItemId, b: ItemId) -> bool {
        self.pairs.contains(&normalize(a, b))
    }

    pub fn height(&self) -> f32 {
        self.items
            .iter()
            .map(|item| item.rect.bottom())
            .fold(0., f32::max)
    }

    /// Each item is hit-tested against its own rectangle.
    pub fn point_to_item(&self, x: f32, y: f32) -> Option<ItemId> {
        self.items
            .iter()
            .find(|item| item.rect.contains(x, y))
            .map(|item| item.id)
    }
}

fn normalize(a: ItemId, b: ItemId) -> (ItemId, ItemId) {
    if a <= b { (a, b) } else { (b, a) }
}

pub(super) fn generate_pair_matching(
    rng: &mut SmallRng,
    payload: &PairMatchingPayload,
) -> Result<PairLayout> {
    let missing = |field: &'static str| PuzzleError::MissingPayloadField {
        game: GameKind::PairMatching,
        field,
    };
    if payload.items.is_empty() {
        return Err(missing("items"));
    }
    if payload.correct_pairs.is_empty() {
        return Err(missing("correct_pairs"));
    }

    let mut ids = HashSet::with_capacity(payload.items.len());
    for item in &payload.items {
        if !ids.insert(item.id) {
            return Err(PuzzleError::DuplicateItem(item.id));
        }
    }
    let mut pairs = HashSet::with_capacity(payload.correct_pairs.len());
    for &(a, b) in &payload.correct_pairs {
        for id in [a, b] {
            if !ids.contains(&id) {
                return Err(PuzzleError::UnknownItem(id));
            }
        }
        pairs.insert(normalize(a, b));
    }

    let (upper, mut lower): (Vec<&PairItem>, Vec<&PairItem>) = payload
        .items
        .iter()
        .partition(|item| item.role == ItemRole::Upper);
    if upper.is_empty() || lower.is_empty() {
        return Err(missing("items"));
    }
    shuffle(rng, &mut lower);

    let metrics = PairMetrics::for_pair_count(upper.len());
    let pitch = metrics.item_height + metrics.item_gap;
    let lower_x = metrics.column_width + metrics.column_gap;
    let place = move |x: f32| {
        move |(i, item): (usize, &&PairItem)| PlacedItem {
            id: item.id,
            text: item.text.clone(),
            role: item.role,
            rect: Rect::new(x, i as f32 * pitch, metrics.column_width, metrics.item_height),
        }
    };
    let items = upper
        .iter()
        .enumerate()
        .map(place(0.))
        .chain(lower.iter().enumerate().map(place(lower_x)))
        .collect();
    log::debug!(
        "Laid out {} upper and {} lower items",
        upper.len(),
        lower.len()
    );

    Ok(PairLayout {
        items,
        pairs,
        metrics,
        upper_count: upper.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::couplet_payload;

    fn generate(payload: &PairMatchingPayload) -> Result<PairLayout> {
        let mut rng = SmallRng::seed_from_u64(9);
        generate_pair_matching(&mut rng, payload)
    }

    #[test]
    fn metrics_follow_pair_count_breakpoints() {
        assert_eq!(PairMetrics::for_pair_count(3).item_height, 48.);
        assert_eq!(PairMetrics::for_pair_count(5).column_width, 150.);
        assert_eq!(PairMetrics::for_pair_count(5).item_gap, 8.);
        assert_eq!(PairMetrics::for_pair_count(8).item_height, 34.);
        assert_eq!(PairMetrics::for_pair_count(8).item_gap, 6.);
    }

    #[test]
    fn upper_items_keep_payload_order() {
        let layout = generate(&couplet_payload(5)).unwrap();
        let upper: Vec<_> = layout
            .items()
            .iter()
            .filter(|item| item.role == ItemRole::Upper)
            .map(|item| (item.id, item.rect.x, item.rect.y))
            .collect();

        assert_eq!(
            upper,
            vec![
                (1, 0., 0.),
                (3, 0., 48.),
                (5, 0., 96.),
                (7, 0., 144.),
                (9, 0., 192.)
            ]
        );
    }

    #[test]
    fn lower_items_sit_in_second_column() {
        let layout = generate(&couplet_payload(3)).unwrap();
        let mut lower: Vec<_> = layout
            .items()
            .iter()
            .filter(|item| item.role == ItemRole::Lower)
            .map(|item| {
                assert_eq!(item.rect.x, 184.);
                item.id
            })
            .collect();
        lower.sort_unstable();

        assert_eq!(lower, vec![2, 4, 6]);
        assert_eq!(layout.upper_count(), 3);
    }

    #[test]
    fn point_to_item_uses_item_rects() {
        let layout = generate(&couplet_payload(2)).unwrap();

        assert_eq!(layout.point_to_item(10., 10.), Some(1));
        assert_eq!(layout.point_to_item(10., 60.), Some(3));
        // gap between the columns
        assert_eq!(layout.point_to_item(170., 10.), None);
        assert!(layout.point_to_item(200., 10.).is_some());
    }

    #[test]
    fn declared_pairs_match_either_order() {
        let layout = generate(&couplet_payload(2)).unwrap();

        assert!(layout.is_declared_pair(1, 2));
        assert!(layout.is_declared_pair(2, 1));
        assert!(!layout.is_declared_pair(1, 4));
    }

    #[test]
    fn rejects_incomplete_payloads() {
        let mut payload = couplet_payload(2);
        payload.correct_pairs.clear();
        assert!(matches!(
            generate(&payload),
            Err(PuzzleError::MissingPayloadField {
                field: "correct_pairs",
                ..
            })
        ));

        let mut payload = couplet_payload(2);
        payload.correct_pairs.push((1, 99));
        assert_eq!(generate(&payload), Err(PuzzleError::UnknownItem(99)));

        let mut payload = couplet_payload(2);
        payload.items[1].id = 1;
        assert_eq!(generate(&payload), Err(PuzzleError::DuplicateItem(1)));

        let payload = PairMatchingPayload {
            items: Vec::new(),
            correct_pairs: vec![(1, 2)],
        };
        assert!(matches!(
            generate(&payload),
            Err(PuzzleError::MissingPayloadField { field: "items", .. })
        ));
    }
}
