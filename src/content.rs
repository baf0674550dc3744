//! Static reference content for both widgets.
//!
//! The eye-shape and mapping-style tables are wrapped in a [`Catalog`] so a
//! content collaborator can swap them for a JSON document; the compiled tables
//! below are the default. Contraindication cards and guide entries are fixed.

use std::borrow::Cow;
use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::ContentError;

/// Owned-or-static text. Compiled tables borrow, JSON content owns.
pub type Text = Cow<'static, str>;

const fn text(s: &'static str) -> Text {
    Cow::Borrowed(s)
}

/// An eye morphology the player drags onto a mapping style.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EyeShape {
    pub id: Text,
    pub title: Text,
    pub description: Text,
    pub image: Text,
    /// Id of the only [`MappingStyle`] that counts as a match.
    pub correct_mapping: Text,
    /// Shown in the feedback toast after a correct drop.
    pub explanation: Text,
}

/// A lash-mapping technique; each one is a drop zone.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingStyle {
    pub id: Text,
    pub title: Text,
    pub description: Text,
    pub image: Text,
}

/// One warning card on the contraindication board.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Contraindication {
    pub id: u8,
    pub title: &'static str,
    pub image: &'static str,
    pub description: &'static str,
    pub category: &'static str,
}

/// Reference-guide row for one mapping style.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GuideEntry {
    pub style_id: &'static str,
    pub summary: &'static str,
    pub rule: &'static str,
}

pub static EYE_SHAPES: [EyeShape; 6] = [
    EyeShape {
        id: text("droopy-eyes"),
        title: text("Droopy Eyes"),
        description: text("Upper eyelid that droops towards the outer corner"),
        image: text("/images/yeux-tombants.png"),
        correct_mapping: text("oeil-de-biche"),
        explanation: text(
            "Correct! The doe eye with increasing lengths towards the outer corner corrects the drooping effect.",
        ),
    },
    EyeShape {
        id: text("round-eyes"),
        title: text("Round Eyes"),
        description: text("Naturally rounded eye shape"),
        image: text("/images/yeux-ronds.png"),
        correct_mapping: text("naturel"),
        explanation: text(
            "Exactly! The natural mapping enhances the beautiful round shape without altering it.",
        ),
    },
    EyeShape {
        id: text("deep-set-eyes"),
        title: text("Deep-Set Eyes"),
        description: text("Eyes that appear set back in the socket"),
        image: text("/images/yeux-enfonces.png"),
        correct_mapping: text("oeil-ouvert"),
        explanation: text(
            "Perfect! The open eye with its emphasis at the center makes deep-set eyes stand out.",
        ),
    },
    EyeShape {
        id: text("wide-set-eyes"),
        title: text("Wide-Set Eyes"),
        description: text("Large distance between the two eyes"),
        image: text("/images/yeux-ecartes.png"),
        correct_mapping: text("oeil-de-poupee"),
        explanation: text(
            "Correct! The doll eye concentrates attention at the center and visually brings the eyes closer together.",
        ),
    },
    EyeShape {
        id: text("close-set-eyes"),
        title: text("Close-Set Eyes"),
        description: text("Small distance between the two eyes"),
        image: text("/images/yeux-rapproches.png"),
        correct_mapping: text("oeil-de-biche"),
        explanation: text(
            "Exactly! The doe eye stretches the gaze towards the outside and visually separates the eyes.",
        ),
    },
    EyeShape {
        id: text("small-eyes"),
        title: text("Small Eyes"),
        description: text("Small-sized eyes that lack intensity"),
        image: text("/images/yeux-petits.png"),
        correct_mapping: text("oeil-de-chaton"),
        explanation: text(
            "Perfect! The kitten eye gives a subtle lift that delicately enlarges small eyes.",
        ),
    },
];

pub static MAPPING_STYLES: [MappingStyle; 5] = [
    MappingStyle {
        id: text("oeil-de-poupee"),
        title: text("Doll Eye"),
        description: text("Long lashes in the center, innocent gaze effect"),
        image: text("/images/oeil-de-poupee.png"),
    },
    MappingStyle {
        id: text("naturel"),
        title: text("Natural"),
        description: text("Uniform distribution, enhances natural shape"),
        image: text("/images/naturel.png"),
    },
    MappingStyle {
        id: text("oeil-de-biche"),
        title: text("Doe Eye"),
        description: text("Increasing lengths towards outer corner, elongated effect"),
        image: text("/images/oeil-de-biche.png"),
    },
    MappingStyle {
        id: text("oeil-ouvert"),
        title: text("Open Eye"),
        description: text("Emphasis at center, enlarges small eyes"),
        image: text("/images/oeil-ouvert.png"),
    },
    MappingStyle {
        id: text("oeil-de-chaton"),
        title: text("Kitten Eye"),
        description: text("Soft version of doe eye, subtle lift"),
        image: text("/images/oeil-de-chaton.png"),
    },
];

pub const CONTRAINDICATIONS: &[Contraindication] = &[
    Contraindication {
        id: 1,
        title: "EYE INFECTIONS AND INFLAMMATIONS",
        image: "/images/eye-infections.png",
        description: "Active eye infections (conjunctivitis, stye, blepharitis) can spread with lash manipulation. Adhesives and products can worsen inflammation and delay healing.",
        category: "Ophthalmology",
    },
    Contraindication {
        id: 2,
        title: "RECENT SURGERIES AND PROCEDURES",
        image: "/images/recent-surgeries.png",
        description: "Recent eye surgeries (less than 6 months) require complete healing. Extensions can place tension on fragile tissues and compromise healing.",
        category: "Surgery",
    },
    Contraindication {
        id: 3,
        title: "KNOWN ALLERGIES",
        image: "/images/known-allergies.png",
        description: "Allergies to adhesives, latex, formaldehyde or other components can cause severe reactions: swelling, itching, breathing difficulties requiring emergency treatment.",
        category: "Allergies",
    },
    Contraindication {
        id: 4,
        title: "PREGNANCY AND BREASTFEEDING",
        image: "/images/pregnancy-breastfeeding.png",
        description: "Hormonal changes affect lash growth and skin sensitivity. Adhesive fumes can be concerning, and results may be unpredictable.",
        category: "Maternity",
    },
    Contraindication {
        id: 5,
        title: "CHRONIC EYE DISEASES",
        image: "/images/chronic-eye-diseases.png",
        description: "Conditions like glaucoma, chronic dry eye or eyelid disorders compromise eye health and can be aggravated by extensions.",
        category: "Chronic Conditions",
    },
    Contraindication {
        id: 6,
        title: "CONTACT LENSES",
        image: "/images/contact-lenses.png",
        description: "Contact lenses can interfere with extension application and maintenance. Cleaning oils and repeated rubbing reduce extension lifespan.",
        category: "Eye Equipment",
    },
    Contraindication {
        id: 7,
        title: "HISTORY OF LASH DAMAGE",
        image: "/images/lash-damage-history.png",
        description: "Lashes already weakened by previous treatments, trichotillomania or chemical damage cannot support the weight of extensions without risking permanent loss.",
        category: "Hair History",
    },
    Contraindication {
        id: 8,
        title: "SKIN HYPERSENSITIVITY",
        image: "/images/skin-hypersensitivity.png",
        description: "Sensitive skin or conditions like periorbital eczema react poorly to adhesives and chemicals, causing irritation, redness and prolonged discomfort.",
        category: "Dermatology",
    },
];

pub const MAPPING_GUIDE: &[GuideEntry] = &[
    GuideEntry {
        style_id: "oeil-de-poupee",
        summary: "Long center, short corners = enlarges small eyes",
        rule: "Rule: 12mm center, 9mm corners",
    },
    GuideEntry {
        style_id: "naturel",
        summary: "Uniform lengths = follows natural shape",
        rule: "Rule: same curl everywhere",
    },
    GuideEntry {
        style_id: "oeil-de-biche",
        summary: "Short → long towards outside = corrects droopy eyes",
        rule: "Rule: 9mm inner, 14mm outer",
    },
    GuideEntry {
        style_id: "oeil-ouvert",
        summary: "Peak at center = opens deep-set eyes",
        rule: "Rule: 12mm middle, 10mm corners",
    },
    GuideEntry {
        style_id: "oeil-de-chaton",
        summary: "Soft doe version = subtle lift",
        rule: "Rule: less pronounced progression",
    },
];

pub const GUIDE_MEMO: &str = "Center = enlarge / Outside = elongate / Uniform = natural";

/// Shown when an image reference is empty.
pub const PLACEHOLDER_IMAGE: &str = "/placeholder.svg";

/// Eye shapes and mapping styles the game is played with.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Catalog {
    pub eye_shapes: Vec<EyeShape>,
    pub mapping_styles: Vec<MappingStyle>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self {
            eye_shapes: EYE_SHAPES.to_vec(),
            mapping_styles: MAPPING_STYLES.to_vec(),
        }
    }
}

impl Catalog {
    /// Parse and validate a catalog supplied as JSON.
    pub fn from_json(json: &str) -> Result<Self, ContentError> {
        let catalog: Catalog = serde_json::from_str(json)?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Checks id uniqueness and that every shape maps onto a known style.
    pub fn validate(&self) -> Result<(), ContentError> {
        if self.eye_shapes.is_empty() {
            return Err(ContentError::Empty);
        }
        let mut style_ids = HashSet::new();
        for style in &self.mapping_styles {
            if !style_ids.insert(&*style.id) {
                return Err(ContentError::DuplicateId {
                    kind: "mapping style",
                    id: style.id.to_string(),
                });
            }
        }
        let mut shape_ids = HashSet::new();
        for shape in &self.eye_shapes {
            if !shape_ids.insert(&*shape.id) {
                return Err(ContentError::DuplicateId {
                    kind: "eye shape",
                    id: shape.id.to_string(),
                });
            }
            if !style_ids.contains(&*shape.correct_mapping) {
                return Err(ContentError::DanglingMapping {
                    shape: shape.id.to_string(),
                    style: shape.correct_mapping.to_string(),
                });
            }
        }
        Ok(())
    }

    pub fn shape(&self, id: &str) -> Option<&EyeShape> {
        self.eye_shapes.iter().find(|s| s.id == id)
    }

    pub fn style(&self, id: &str) -> Option<&MappingStyle> {
        self.mapping_styles.iter().find(|s| s.id == id)
    }

    pub fn to_json(&self) -> Result<String, ContentError> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Image path to render, falling back to the placeholder for empty references.
pub fn image_or_placeholder(src: &str) -> &str {
    if src.is_empty() { PLACEHOLDER_IMAGE } else { src }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_catalog_is_valid() {
        assert!(Catalog::default().validate().is_ok());
    }

    #[test]
    fn lookup_by_id() {
        let catalog = Catalog::default();
        let shape = catalog.shape("small-eyes").unwrap();
        assert_eq!(shape.correct_mapping, "oeil-de-chaton");
        assert_eq!(catalog.style("naturel").unwrap().title, "Natural");
        assert!(catalog.shape("almond-eyes").is_none());
    }

    #[test]
    fn from_json_rejects_dangling_mapping() {
        let json = r#"{
            "eyeShapes": [{"id":"a","title":"A","description":"","image":"","correctMapping":"missing","explanation":""}],
            "mappingStyles": [{"id":"s","title":"S","description":"","image":""}]
        }"#;
        let err = Catalog::from_json(json).unwrap_err();
        assert!(matches!(err, ContentError::DanglingMapping { .. }));
    }

    #[test]
    fn from_json_rejects_duplicate_style() {
        let json = r#"{
            "eyeShapes": [{"id":"a","title":"A","description":"","image":"","correctMapping":"s","explanation":""}],
            "mappingStyles": [
                {"id":"s","title":"S","description":"","image":""},
                {"id":"s","title":"S2","description":"","image":""}
            ]
        }"#;
        let err = Catalog::from_json(json).unwrap_err();
        assert!(matches!(err, ContentError::DuplicateId { kind: "mapping style", .. }));
    }

    #[test]
    fn from_json_rejects_empty_catalog() {
        let json = r#"{"eyeShapes": [], "mappingStyles": []}"#;
        assert!(matches!(Catalog::from_json(json), Err(ContentError::Empty)));
    }

    #[test]
    fn json_round_trip_keeps_default_tables() {
        let catalog = Catalog::default();
        let json = catalog.to_json().unwrap();
        assert_eq!(Catalog::from_json(&json).unwrap(), catalog);
    }

    #[test]
    fn placeholder_for_empty_image() {
        assert_eq!(image_or_placeholder(""), PLACEHOLDER_IMAGE);
        assert_eq!(image_or_placeholder("/images/naturel.png"), "/images/naturel.png");
    }
}
