// Integration tests for the compiled content tables.
// These tests are native-friendly and avoid wasm/browser APIs.

use std::collections::HashSet;

use lash_academy::content::{GUIDE_MEMO, MAPPING_GUIDE};
use lash_academy::{CONTRAINDICATIONS, EYE_SHAPES, MAPPING_STYLES};

#[test]
fn eye_shapes_are_unique_and_map_to_known_styles() {
    let styles: HashSet<&str> = MAPPING_STYLES.iter().map(|s| &*s.id).collect();
    let mut seen = HashSet::new();
    for shape in EYE_SHAPES.iter() {
        assert!(seen.insert(&*shape.id), "duplicate eye shape '{}'", shape.id);
        assert!(
            styles.contains(&*shape.correct_mapping),
            "eye shape '{}' maps to unknown style '{}'",
            shape.id,
            shape.correct_mapping
        );
        assert!(!shape.explanation.is_empty(), "empty explanation for '{}'", shape.id);
        assert!(shape.image.starts_with("/images/"), "odd image path '{}'", shape.image);
    }
    assert_eq!(EYE_SHAPES.len(), 6);
}

#[test]
fn mapping_styles_are_unique() {
    let mut seen = HashSet::new();
    for style in MAPPING_STYLES.iter() {
        assert!(seen.insert(&*style.id), "duplicate mapping style '{}'", style.id);
        assert!(!style.title.is_empty(), "empty title for '{}'", style.id);
    }
    assert_eq!(MAPPING_STYLES.len(), 5);
}

#[test]
fn contraindication_ids_run_one_to_eight() {
    let ids: Vec<u8> = CONTRAINDICATIONS.iter().map(|c| c.id).collect();
    assert_eq!(ids, (1..=8).collect::<Vec<u8>>());
    for card in CONTRAINDICATIONS {
        assert!(!card.category.is_empty(), "card {} has no category", card.id);
        assert_eq!(card.title, card.title.to_uppercase(), "card {} title not upper-case", card.id);
    }
}

#[test]
fn guide_covers_every_style_once() {
    let guide: Vec<&str> = MAPPING_GUIDE.iter().map(|g| g.style_id).collect();
    let styles: Vec<&str> = MAPPING_STYLES.iter().map(|s| &*s.id).collect();
    assert_eq!(guide, styles);
    assert!(GUIDE_MEMO.contains("natural"));
}
