use std::fmt;

use crate::{
    format_scale_name, transpose, JazzStandard, NotationPreference, ScaleRecommendation,
    ScaleType, Transposition,
};

/// One recommended scale spelled for every instrument transposition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaleCard {
    /// Formatted concert-pitch name, e.g. `"Eb Mixolydian"`.
    pub concert: String,
    pub concert_root: String,
    pub bb_root: String,
    pub eb_root: String,
    pub scale_type: ScaleType,
    pub reason: String,
}

impl ScaleCard {
    pub fn new(scale: &ScaleRecommendation, pref: NotationPreference) -> Self {
        let concert_root = transpose(&scale.root, Transposition::Concert.semitones(), pref);
        Self {
            concert: format_scale_name(&concert_root, scale.scale_type.as_str()),
            concert_root,
            bb_root: Transposition::Bb.apply(&scale.root, pref),
            eb_root: Transposition::Eb.apply(&scale.root, pref),
            scale_type: scale.scale_type,
            reason: scale.reason.clone(),
        }
    }

    pub fn root_for(&self, transposition: Transposition) -> &str {
        match transposition {
            Transposition::Concert => &self.concert_root,
            Transposition::Bb => &self.bb_root,
            Transposition::Eb => &self.eb_root,
        }
    }
}

/// Practice sheet for a single standard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaleSheet {
    pub title: String,
    pub notation: NotationPreference,
    pub cards: Vec<ScaleCard>,
}

impl ScaleSheet {
    pub fn for_standard(standard: &JazzStandard, notation: NotationPreference) -> Self {
        Self {
            title: standard.title.clone(),
            notation,
            cards: standard
                .recommended_scales
                .iter()
                .map(|scale| ScaleCard::new(scale, notation))
                .collect(),
        }
    }
}

impl fmt::Display for ScaleSheet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} (notation: {})", self.title, self.notation)?;
        for card in &self.cards {
            writeln!(f)?;
            writeln!(f, "  {}", card.concert)?;
            writeln!(f, "    {}", card.reason)?;
            for transposition in [Transposition::Bb, Transposition::Eb] {
                writeln!(
                    f,
                    "    {:<3} {} {}",
                    transposition.label(),
                    card.root_for(transposition),
                    card.scale_type
                )?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Catalog;

    #[test]
    fn spells_every_transposition() {
        let catalog = Catalog::builtin().unwrap();
        let sheet = ScaleSheet::for_standard(
            catalog.require("so-what").unwrap(),
            NotationPreference::Auto,
        );

        assert_eq!(sheet.cards.len(), 2);
        let bridge = &sheet.cards[1];
        assert_eq!(bridge.concert, "Eb Dorian");
        assert_eq!(bridge.bb_root, "F");
        assert_eq!(bridge.eb_root, "C");
        assert_eq!(bridge.root_for(Transposition::Concert), "Eb");
    }

    #[test]
    fn follows_the_notation_preference() {
        let catalog = Catalog::builtin().unwrap();
        let tune = catalog.require("blue-bossa").unwrap();

        let sharps = ScaleSheet::for_standard(tune, NotationPreference::Sharp);
        assert_eq!(sharps.cards[1].concert, "C# Major");
        assert_eq!(sharps.cards[1].bb_root, "D#");
        assert_eq!(sharps.cards[1].eb_root, "A#");

        let flats = ScaleSheet::for_standard(tune, NotationPreference::Flat);
        assert_eq!(flats.cards[1].concert, "Db Major");
        assert_eq!(flats.cards[1].bb_root, "Eb");
        assert_eq!(flats.cards[1].eb_root, "Bb");
    }

    #[test]
    fn passes_unknown_roots_through_to_the_sheet() {
        let scale = ScaleRecommendation::new("H", ScaleType::Blues, "Notation allemande");
        let card = ScaleCard::new(&scale, NotationPreference::Auto);
        assert_eq!(card.concert, "H Blues");
        assert_eq!(card.bb_root, "H");
        assert_eq!(card.eb_root, "H");
    }

    #[test]
    fn keeps_unresolved_roots_with_spaces_intact() {
        let scale = ScaleRecommendation::new("Si bemol", ScaleType::Major, "Catalogue externe");
        let card = ScaleCard::new(&scale, NotationPreference::Flat);
        assert_eq!(card.concert, "Si bemol Major");
        for transposition in Transposition::ALL {
            assert_eq!(card.root_for(transposition), "Si bemol");
        }
    }

    #[test]
    fn renders_plain_text() {
        let catalog = Catalog::builtin().unwrap();
        let sheet = ScaleSheet::for_standard(
            catalog.require("watermelon-man").unwrap(),
            NotationPreference::Auto,
        );
        let text = sheet.to_string();
        assert!(text.starts_with("Watermelon Man (notation: auto)"));
        assert!(text.contains("F Mixolydian"));
        assert!(text.contains("Bb  G mixolydian"));
        assert!(text.contains("Eb  D mixolydian"));
    }
}
