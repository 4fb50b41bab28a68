use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::*;

/// Position of a card in the board's visible arrangement.
pub type CardIndex = usize;

/// Receives "card was clicked" notifications from a [`Board`].
pub type ClickListener = Box<dyn Fn(CardIndex)>;

const MIN_COLUMNS: usize = 2;
const MAX_COLUMNS: usize = 12;

/// Grid column count used to lay out `card_count` cards.
///
/// Half the cards per row, clamped to `2..=12` and forced even. An odd count rounds down, except 11 which rounds up
/// to 12.
pub const fn column_count(card_count: usize) -> usize {
    let columns = card_count / 2;
    let columns = if columns < MIN_COLUMNS {
        MIN_COLUMNS
    } else if columns > MAX_COLUMNS {
        MAX_COLUMNS
    } else {
        columns
    };

    match columns {
        11 => 12,
        odd if odd % 2 != 0 => odd - 1,
        even => even,
    }
}

/// Presentation hint produced whenever the board is ready to be displayed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Layout {
    pub columns: usize,
    pub card_count: usize,
}

pub struct Board {
    cards: Vec<Card>,
    listener: Option<ClickListener>,
}

impl Board {
    pub fn new(cards: Vec<Card>) -> Result<Self> {
        if cards.is_empty() {
            return Err(GameError::EmptyBoard);
        }
        if cards.len() % 2 != 0 {
            return Err(GameError::UnpairedCards(cards.len()));
        }
        Ok(Self {
            cards,
            listener: None,
        })
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn card(&self, index: CardIndex) -> Option<&Card> {
        self.cards.get(index)
    }

    pub(crate) fn card_mut(&mut self, index: CardIndex) -> Option<&mut Card> {
        self.cards.get_mut(index)
    }

    pub fn layout(&self) -> Layout {
        Layout {
            columns: column_count(self.cards.len()),
            card_count: self.cards.len(),
        }
    }

    /// In-place Fisher-Yates shuffle, walking from the last card down.
    pub fn shuffle<R: Rng>(&mut self, rng: &mut R) {
        for i in (1..self.cards.len()).rev() {
            let j = rng.random_range(0..=i);
            self.cards.swap(i, j);
        }
    }

    pub fn flip_all_down(&mut self) {
        for card in self.cards.iter_mut().filter(|card| card.is_face_up()) {
            card.toggle_flip();
        }
    }

    /// Reshuffles and turns everything face down, returning the layout to display.
    pub fn reset<R: Rng>(&mut self, rng: &mut R) -> Layout {
        self.shuffle(rng);
        self.flip_all_down();
        let layout = self.layout();
        log::debug!("board reset: {:?}", layout);
        layout
    }

    /// Installs the single click listener, handing back the one it replaces.
    pub fn register_listener(
        &mut self,
        listener: impl Fn(CardIndex) + 'static,
    ) -> Option<ClickListener> {
        self.listener.replace(Box::new(listener))
    }

    pub fn unregister_listener(&mut self) -> Option<ClickListener> {
        self.listener.take()
    }

    pub fn has_listener(&self) -> bool {
        self.listener.is_some()
    }

    pub fn notify_card_clicked(&self, index: CardIndex) {
        match &self.listener {
            Some(listener) => listener(index),
            None => log::trace!("card {} clicked with no listener", index),
        }
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Board")
            .field("cards", &self.cards)
            .field("listener", &self.listener.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::collections::BTreeMap;
    use alloc::rc::Rc;
    use alloc::string::{String, ToString};
    use alloc::vec;
    use core::cell::RefCell;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    fn tagged_board() -> Board {
        Board::new(vec![
            Card::new("A", "a0"),
            Card::new("A", "a1"),
            Card::new("B", "b0"),
            Card::new("B", "b1"),
        ])
        .unwrap()
    }

    fn order(board: &Board) -> Vec<String> {
        board
            .cards()
            .iter()
            .map(|card| card.image().to_string())
            .collect()
    }

    #[test]
    fn column_count_matches_layout_rules() {
        assert_eq!(column_count(0), 2);
        assert_eq!(column_count(2), 2);
        assert_eq!(column_count(6), 2);
        assert_eq!(column_count(8), 4);
        assert_eq!(column_count(10), 4);
        assert_eq!(column_count(12), 6);
        assert_eq!(column_count(20), 10);
        assert_eq!(column_count(22), 12);
        assert_eq!(column_count(24), 12);
        assert_eq!(column_count(200), 12);
    }

    #[test]
    fn column_count_is_even_and_bounded() {
        for n in 0..400 {
            let columns = column_count(n);
            assert_eq!(columns % 2, 0, "odd column count for {}", n);
            assert!((2..=12).contains(&columns), "{} out of range for {}", columns, n);

            let naive = (n / 2).clamp(2, 12);
            let expected = match naive {
                11 => 12,
                odd if odd % 2 == 1 => odd - 1,
                even => even,
            };
            assert_eq!(columns, expected);
        }
    }

    #[test]
    fn new_rejects_unpaired_and_empty() {
        assert_eq!(
            Board::new(vec![Card::new("A", "a")]).unwrap_err(),
            GameError::UnpairedCards(1)
        );
        assert_eq!(Board::new(Vec::new()).unwrap_err(), GameError::EmptyBoard);
    }

    #[test]
    fn shuffle_is_a_permutation() {
        let mut board = Catalog::builtin().into_board().unwrap();
        let mut before = order(&board);
        let mut rng = SmallRng::seed_from_u64(7);

        board.shuffle(&mut rng);
        let mut after = order(&board);

        assert_eq!(after.len(), 12);
        before.sort();
        after.sort();
        assert_eq!(before, after);
    }

    #[test]
    fn shuffle_is_roughly_uniform() {
        const TRIALS: usize = 24_000;
        let mut rng = SmallRng::seed_from_u64(0x5eed);
        let mut counts: BTreeMap<Vec<String>, usize> = BTreeMap::new();

        for _ in 0..TRIALS {
            let mut board = tagged_board();
            board.shuffle(&mut rng);
            *counts.entry(order(&board)).or_default() += 1;
        }

        // 4! arrangements, ~1000 hits each
        assert_eq!(counts.len(), 24);
        for (arrangement, count) in counts {
            assert!(
                (800..=1200).contains(&count),
                "{:?} seen {} times",
                arrangement,
                count
            );
        }
    }

    #[test]
    fn flip_all_down_only_touches_face_up_cards() {
        let mut board = tagged_board();
        board.card_mut(1).unwrap().toggle_flip();
        board.card_mut(2).unwrap().toggle_flip();

        board.flip_all_down();

        assert!(board.cards().iter().all(|card| !card.is_face_up()));
    }

    #[test]
    fn reset_turns_cards_down_and_reports_layout() {
        let mut board = tagged_board();
        board.card_mut(0).unwrap().toggle_flip();
        let mut rng = SmallRng::seed_from_u64(1);

        let layout = board.reset(&mut rng);

        assert_eq!(
            layout,
            Layout {
                columns: 2,
                card_count: 4
            }
        );
        assert!(board.cards().iter().all(|card| !card.is_face_up()));
    }

    #[test]
    fn notify_forwards_to_single_listener() {
        let mut board = tagged_board();
        let first = Rc::new(RefCell::new(Vec::new()));
        let second = Rc::new(RefCell::new(Vec::new()));

        board.notify_card_clicked(0);

        let sink = first.clone();
        assert!(board.register_listener(move |i| sink.borrow_mut().push(i)).is_none());
        board.notify_card_clicked(1);

        let sink = second.clone();
        assert!(board.register_listener(move |i| sink.borrow_mut().push(i)).is_some());
        board.notify_card_clicked(2);

        assert!(board.unregister_listener().is_some());
        assert!(!board.has_listener());
        board.notify_card_clicked(3);

        assert_eq!(*first.borrow(), vec![1]);
        assert_eq!(*second.borrow(), vec![2]);
    }
}
