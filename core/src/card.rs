use alloc::string::String;
use serde::{Deserialize, Serialize};

/// One physical card. Exactly two cards of a game share the same name.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    name: String,
    image: String,
    face_up: bool,
}

impl Card {
    pub fn new(name: impl Into<String>, image: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            image: image.into(),
            face_up: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn image(&self) -> &str {
        &self.image
    }

    pub const fn is_face_up(&self) -> bool {
        self.face_up
    }

    /// Turns the card over, whichever side is currently showing.
    pub fn toggle_flip(&mut self) {
        self.face_up = !self.face_up;
    }

    pub fn matches(&self, other: &Card) -> bool {
        self.name == other.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_card_starts_face_down() {
        let card = Card::new("Go", "./img/Go.svg");

        assert!(!card.is_face_up());
        assert_eq!(card.name(), "Go");
        assert_eq!(card.image(), "./img/Go.svg");
    }

    #[test]
    fn toggle_flip_twice_restores_face() {
        let mut card = Card::new("Go", "./img/Go.svg");

        card.toggle_flip();
        assert!(card.is_face_up());
        card.toggle_flip();
        assert!(!card.is_face_up());
    }

    #[test]
    fn matches_compares_names_only() {
        let mut a = Card::new("Ruby", "./img/Ruby.svg");
        let b = Card::new("Ruby", "./img/other.svg");
        let c = Card::new("Java", "./img/Java.svg");

        a.toggle_flip();

        assert!(a.matches(&b));
        assert!(b.matches(&a));
        assert!(!a.matches(&c));
        assert!(a.is_face_up());
    }
}
