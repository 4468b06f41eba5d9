// In-memory model for the two linked panels (prompt cards / code cards).
// Hover transitions query an explicit id -> card-index map, so the linking
// behavior is testable without a window. The app replaces the whole set on
// every successful generation.

use std::collections::HashMap;

use egui::Color32;

use crate::types::llm_data::MappingSegment;

// Fixed highlight palette; segment index i gets color i mod 7.
pub const HIGHLIGHT_COLORS: [Color32; 7] = [
    Color32::from_rgb(0x34, 0x98, 0xdb), // #3498db
    Color32::from_rgb(0xe7, 0x4c, 0x3c), // #e74c3c
    Color32::from_rgb(0x2e, 0xcc, 0x71), // #2ecc71
    Color32::from_rgb(0xf3, 0x9c, 0x12), // #f39c12
    Color32::from_rgb(0x9b, 0x59, 0xb6), // #9b59b6
    Color32::from_rgb(0x1a, 0xbc, 0x9c), // #1abc9c
    Color32::from_rgb(0xd3, 0x54, 0x00), // #d35400
];

pub fn color_for_index(index: usize) -> Color32 {
    HIGHLIGHT_COLORS[index % HIGHLIGHT_COLORS.len()]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardKind {
    Prompt,
    Code,
}

#[derive(Debug, Clone)]
pub struct Card {
    pub segment_id: String,
    pub text: String,
    pub kind: CardKind,
    pub color: Color32,
    // Lowercased target language on code cards, for downstream syntax coloring.
    pub syntax_tag: Option<String>,
    linked: bool,
}

impl Card {
    pub fn is_linked(&self) -> bool {
        self.linked
    }
}

// The current set of display pairs plus the hover-link state.
#[derive(Debug, Clone, Default)]
pub struct CardSet {
    cards: Vec<Card>,
    id_index: HashMap<String, Vec<usize>>,
    hover_origin: Option<usize>,
}

impl CardSet {
    // One prompt card and one code card per segment, in mapping order, both
    // tagged with the segment's id and the cycling palette color.
    pub fn from_mapping(mapping: &[MappingSegment], target_language: &str) -> Self {
        let syntax_tag = target_language.trim().to_lowercase();
        let mut cards = Vec::with_capacity(mapping.len() * 2);
        let mut id_index: HashMap<String, Vec<usize>> = HashMap::new();

        for (i, segment) in mapping.iter().enumerate() {
            let color = color_for_index(i);
            for (kind, text, tag) in [
                (CardKind::Prompt, &segment.prompt_segment, None),
                (CardKind::Code, &segment.code_segment, Some(syntax_tag.clone())),
            ] {
                let idx = cards.len();
                cards.push(Card {
                    segment_id: segment.id.clone(),
                    text: text.clone(),
                    kind,
                    color,
                    syntax_tag: tag,
                    linked: false,
                });
                if !segment.id.is_empty() {
                    id_index.entry(segment.id.clone()).or_default().push(idx);
                }
            }
        }

        Self {
            cards,
            id_index,
            hover_origin: None,
        }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn card(&self, idx: usize) -> &Card {
        &self.cards[idx]
    }

    // Card indices of the given kind, in mapping order.
    pub fn indices_of(&self, kind: CardKind) -> Vec<usize> {
        (0..self.cards.len())
            .filter(|&i| self.cards[i].kind == kind)
            .collect()
    }

    // Pointer entered a card: every card sharing its id becomes linked.
    // Re-entering the current origin is a no-op, safe to call every frame.
    // A card with an empty id never transitions.
    pub fn pointer_entered(&mut self, idx: usize) {
        if idx >= self.cards.len() || self.hover_origin == Some(idx) {
            return;
        }
        if self.cards[idx].segment_id.is_empty() {
            return;
        }
        if let Some(prev) = self.hover_origin.take() {
            self.set_group_linked(prev, false);
        }
        self.hover_origin = Some(idx);
        self.set_group_linked(idx, true);
    }

    // Pointer left a card: only the origin card reverts its group.
    pub fn pointer_left(&mut self, idx: usize) {
        if self.hover_origin != Some(idx) {
            return;
        }
        self.hover_origin = None;
        self.set_group_linked(idx, false);
    }

    fn set_group_linked(&mut self, origin: usize, linked: bool) {
        let id = self.cards[origin].segment_id.clone();
        let group = match self.id_index.get(&id) {
            Some(indices) => indices.clone(),
            None => return,
        };
        for i in group {
            self.cards[i].linked = linked;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segment(id: &str, prompt: &str, code: &str) -> MappingSegment {
        MappingSegment {
            id: id.to_string(),
            prompt_segment: prompt.to_string(),
            code_segment: code.to_string(),
        }
    }

    fn mapping_of(n: usize) -> Vec<MappingSegment> {
        (0..n)
            .map(|i| segment(&format!("seg-{}", i + 1), &format!("p{}", i), &format!("c{}", i)))
            .collect()
    }

    #[test]
    fn builds_n_prompt_and_n_code_cards_in_mapping_order() {
        let set = CardSet::from_mapping(&mapping_of(4), "Rust");
        let prompts = set.indices_of(CardKind::Prompt);
        let codes = set.indices_of(CardKind::Code);
        assert_eq!(prompts.len(), 4);
        assert_eq!(codes.len(), 4);
        for (i, (&p, &c)) in prompts.iter().zip(codes.iter()).enumerate() {
            assert_eq!(set.card(p).segment_id, format!("seg-{}", i + 1));
            assert_eq!(set.card(c).segment_id, format!("seg-{}", i + 1));
            assert_eq!(set.card(p).text, format!("p{}", i));
            assert_eq!(set.card(c).text, format!("c{}", i));
        }
    }

    #[test]
    fn colors_cycle_through_the_palette_mod_7() {
        let set = CardSet::from_mapping(&mapping_of(9), "Rust");
        let prompts = set.indices_of(CardKind::Prompt);
        for (i, &p) in prompts.iter().enumerate() {
            assert_eq!(set.card(p).color, HIGHLIGHT_COLORS[i % 7]);
        }
        // Wrap-around: index 7 reuses the first color, index 8 the second,
        // so a length-9 mapping ends on the third palette slot at index 2.
        assert_eq!(set.card(prompts[7]).color, HIGHLIGHT_COLORS[0]);
        assert_eq!(set.card(prompts[7]).color, set.card(prompts[0]).color);
        assert_eq!(set.card(prompts[8]).color, HIGHLIGHT_COLORS[1]);
        assert_eq!(color_for_index(9), HIGHLIGHT_COLORS[2]);
    }

    #[test]
    fn first_palette_color_is_3498db() {
        assert_eq!(color_for_index(0), Color32::from_rgb(0x34, 0x98, 0xdb));
    }

    #[test]
    fn code_cards_carry_the_lowercased_language_tag() {
        let set = CardSet::from_mapping(&mapping_of(1), "  Python ");
        let code = set.indices_of(CardKind::Code)[0];
        let prompt = set.indices_of(CardKind::Prompt)[0];
        assert_eq!(set.card(code).syntax_tag.as_deref(), Some("python"));
        assert!(set.card(prompt).syntax_tag.is_none());
    }

    #[test]
    fn hover_links_every_card_sharing_the_id_and_only_those() {
        let mut set = CardSet::from_mapping(&mapping_of(3), "Rust");
        let origin = set.indices_of(CardKind::Prompt)[1];
        set.pointer_entered(origin);
        for i in 0..set.len() {
            assert_eq!(set.card(i).is_linked(), set.card(i).segment_id == "seg-2");
        }
        set.pointer_left(origin);
        for i in 0..set.len() {
            assert!(!set.card(i).is_linked());
        }
    }

    #[test]
    fn hover_links_all_k_cards_when_an_id_repeats() {
        // Erroneously duplicated ids co-activate rather than erroring.
        let mapping = vec![
            segment("dup", "a", "b"),
            segment("dup", "c", "d"),
            segment("seg-3", "e", "f"),
        ];
        let mut set = CardSet::from_mapping(&mapping, "Rust");
        set.pointer_entered(0);
        let linked: Vec<bool> = (0..set.len()).map(|i| set.card(i).is_linked()).collect();
        assert_eq!(linked, vec![true, true, true, true, false, false]);
        set.pointer_left(0);
        assert!((0..set.len()).all(|i| !set.card(i).is_linked()));
    }

    #[test]
    fn card_with_empty_id_never_transitions() {
        let mapping = vec![segment("", "a", "b"), segment("seg-2", "c", "d")];
        let mut set = CardSet::from_mapping(&mapping, "Rust");
        set.pointer_entered(0);
        assert!((0..set.len()).all(|i| !set.card(i).is_linked()));
    }

    #[test]
    fn leave_from_a_non_origin_card_is_a_no_op() {
        let mut set = CardSet::from_mapping(&mapping_of(2), "Rust");
        set.pointer_entered(0);
        set.pointer_left(3); // different card, different id
        assert!(set.card(0).is_linked());
        assert!(set.card(1).is_linked());
    }

    #[test]
    fn moving_the_pointer_to_another_card_switches_the_linked_group() {
        let mut set = CardSet::from_mapping(&mapping_of(2), "Rust");
        set.pointer_entered(0); // seg-1
        set.pointer_entered(2); // seg-2
        assert!(!set.card(0).is_linked());
        assert!(!set.card(1).is_linked());
        assert!(set.card(2).is_linked());
        assert!(set.card(3).is_linked());
    }

    #[test]
    fn rebuilding_from_the_same_mapping_is_idempotent() {
        let mapping = mapping_of(5);
        let a = CardSet::from_mapping(&mapping, "Go");
        let b = CardSet::from_mapping(&mapping, "Go");
        assert_eq!(a.len(), b.len());
        for i in 0..a.len() {
            assert_eq!(a.card(i).segment_id, b.card(i).segment_id);
            assert_eq!(a.card(i).text, b.card(i).text);
            assert_eq!(a.card(i).color, b.card(i).color);
            assert_eq!(a.card(i).kind, b.card(i).kind);
        }
    }

    #[test]
    fn round_trip_single_segment_scenario() {
        let mapping = vec![segment("seg-1", "create a variable", "let x = 1;")];
        let mut set = CardSet::from_mapping(&mapping, "Rust");
        assert_eq!(set.len(), 2);
        assert_eq!(set.card(0).color, Color32::from_rgb(0x34, 0x98, 0xdb));
        assert_eq!(set.card(1).color, Color32::from_rgb(0x34, 0x98, 0xdb));
        set.pointer_entered(1);
        assert!(set.card(0).is_linked());
        assert!(set.card(1).is_linked());
    }
}
