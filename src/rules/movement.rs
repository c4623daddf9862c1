//! Movement legality.
//!
//! Legality by lifecycle stage:
//!
//! | Stage | Legal when | Result |
//! | --- | --- | --- |
//! | base | roll is 6 | enters the ring at the color's start offset |
//! | ring | landing offset `<= 5` | advances along the ring, or crosses into the home stretch |
//! | home stretch | `offset + roll <= 5` | advances along the stretch |
//!
//! A ring token whose travelled distance plus the roll exceeds 50 leaves the
//! ring: it lands on home-stretch offset `travelled + roll - 51`. Play never
//! leaves a token on travelled distance 51 (any roll from 50 or less that
//! passes 50 turns off the ring), but a token placed there overshoots the
//! terminal cell on a six and that move is refused, as on the stretch.
//!
//! Coordinates off the board are never movable.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::dice::DiceValue;
use crate::board::{start_offset, RING_LENGTH};
use crate::core::{Color, Player, Token, TokenId, TokenState, HOME_TERMINAL_OFFSET};

/// Last travelled distance a token may occupy on the ring.
const LAST_RING_STEP: usize = 50;

/// Distance at which the home stretch begins (its offset 0).
const HOME_ENTRY_STEP: usize = 51;

/// What a move did to its token.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveKind {
    /// Left base and entered the ring.
    Deployed,
    /// Moved along the ring or along the home stretch.
    Advanced,
    /// Left the ring for the home stretch, short of the terminal cell.
    EnteredHomeStretch,
    /// Reached the terminal home-stretch cell.
    Finished,
}

/// A planned or applied move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MoveOutcome {
    /// The moved token.
    pub token: TokenId,
    /// State before the move.
    pub from: TokenState,
    /// State after the move.
    pub to: TokenState,
    /// Classification of the move.
    pub kind: MoveKind,
}

/// Distance a ring token has covered since its color's entry cell (0..=51).
#[must_use]
pub fn distance_travelled(color: Color, index: u8) -> usize {
    (index as usize + RING_LENGTH - start_offset(color)) % RING_LENGTH
}

/// Whether `token` can move by `dice`.
#[must_use]
pub fn can_move(token: &Token, dice: DiceValue) -> bool {
    plan_move(token.color(), token.id, token.state, dice).is_some()
}

/// Whether any of the player's tokens can move by `dice`.
#[must_use]
pub fn has_any_legal_move(player: &Player, dice: DiceValue) -> bool {
    player.tokens.iter().any(|t| can_move(t, dice))
}

/// Ids of the player's tokens that can move by `dice`, in slot order.
#[must_use]
pub fn legal_tokens(player: &Player, dice: DiceValue) -> SmallVec<[TokenId; 4]> {
    player
        .tokens
        .iter()
        .filter(|t| can_move(t, dice))
        .map(|t| t.id)
        .collect()
}

/// Compute where a token of `color` in `state` ends up after `dice`.
///
/// Returns `None` when the move is illegal.
#[must_use]
pub fn plan_move(color: Color, token: TokenId, state: TokenState, dice: DiceValue) -> Option<MoveOutcome> {
    let roll = dice.get();
    let (to, kind) = match state {
        TokenState::Base => {
            if !dice.is_six() {
                return None;
            }
            (
                TokenState::OnRing {
                    index: start_offset(color) as u8,
                },
                MoveKind::Deployed,
            )
        }
        TokenState::OnRing { index } => {
            if index as usize >= RING_LENGTH {
                return None;
            }
            let travelled = distance_travelled(color, index);
            let target = travelled + roll as usize;
            if target > LAST_RING_STEP {
                let offset = u8::try_from(target - HOME_ENTRY_STEP)
                    .ok()
                    .filter(|o| *o <= HOME_TERMINAL_OFFSET)?;
                let kind = if offset == HOME_TERMINAL_OFFSET {
                    MoveKind::Finished
                } else {
                    MoveKind::EnteredHomeStretch
                };
                (TokenState::OnHomeStretch { offset }, kind)
            } else {
                let index = ((index as usize + roll as usize) % RING_LENGTH) as u8;
                (TokenState::OnRing { index }, MoveKind::Advanced)
            }
        }
        TokenState::OnHomeStretch { offset } => {
            let offset = offset
                .checked_add(roll)
                .filter(|o| *o <= HOME_TERMINAL_OFFSET)?;
            let kind = if offset == HOME_TERMINAL_OFFSET {
                MoveKind::Finished
            } else {
                MoveKind::Advanced
            };
            (TokenState::OnHomeStretch { offset }, kind)
        }
    };

    Some(MoveOutcome {
        token,
        from: state,
        to,
        kind,
    })
}

/// Move one of the player's tokens by `dice`.
///
/// Returns `None` and leaves the player untouched when the token is not
/// the player's or cannot move.
pub fn apply_move(player: &mut Player, token: TokenId, dice: DiceValue) -> Option<MoveOutcome> {
    let color = player.color;
    let slot = player.token_mut(token)?;
    let outcome = plan_move(color, token, slot.state, dice)?;
    slot.state = outcome.to;
    Some(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dice(value: u8) -> DiceValue {
        DiceValue::new(value).unwrap()
    }

    fn player_with(color: Color, states: [TokenState; 4]) -> Player {
        let mut player = Player::new(color, "Ada");
        for (token, state) in player.tokens.iter_mut().zip(states) {
            token.state = state;
        }
        player
    }

    #[test]
    fn test_all_base_needs_six() {
        let player = Player::new(Color::Red, "Ada");
        for face in 1..=5 {
            assert!(!has_any_legal_move(&player, dice(face)));
            assert!(legal_tokens(&player, dice(face)).is_empty());
        }
        assert!(has_any_legal_move(&player, dice(6)));
        assert_eq!(legal_tokens(&player, dice(6)).len(), 4);
    }

    #[test]
    fn test_deploy_uses_start_offset() {
        for color in Color::ALL {
            let mut player = Player::new(color, "Ada");
            let id = player.tokens[0].id;

            let outcome = apply_move(&mut player, id, dice(6)).unwrap();

            assert_eq!(outcome.kind, MoveKind::Deployed);
            assert_eq!(
                player.tokens[0].state,
                TokenState::OnRing {
                    index: start_offset(color) as u8
                }
            );
        }
    }

    #[test]
    fn test_base_without_six_is_noop() {
        let mut player = Player::new(Color::Green, "Ada");
        let before = player.clone();

        assert!(apply_move(&mut player, TokenId::new(4), dice(5)).is_none());
        assert_eq!(player, before);
    }

    #[test]
    fn test_ring_wraps_past_51() {
        let mut player = player_with(
            Color::Green,
            [TokenState::OnRing { index: 50 }, TokenState::Base, TokenState::Base, TokenState::Base],
        );

        apply_move(&mut player, TokenId::new(4), dice(4)).unwrap();

        assert_eq!(player.tokens[0].state, TokenState::OnRing { index: 2 });
    }

    #[test]
    fn test_ring_enters_home_stretch() {
        let mut player = player_with(
            Color::Red,
            [TokenState::OnRing { index: 50 }, TokenState::Base, TokenState::Base, TokenState::Base],
        );

        let outcome = apply_move(&mut player, TokenId::new(0), dice(1)).unwrap();

        assert_eq!(outcome.kind, MoveKind::EnteredHomeStretch);
        assert_eq!(player.tokens[0].state, TokenState::OnHomeStretch { offset: 0 });
    }

    #[test]
    fn test_ring_to_terminal_in_one_move() {
        let outcome = plan_move(Color::Blue, TokenId::new(12), TokenState::OnRing { index: 37 }, dice(6)).unwrap();

        // travelled (37 - 39 + 52) % 52 = 50; 50 + 6 - 51 = 5
        assert_eq!(outcome.to, TokenState::OnHomeStretch { offset: 5 });
        assert_eq!(outcome.kind, MoveKind::Finished);
    }

    #[test]
    fn test_home_overshoot_rejected() {
        let mut player = player_with(
            Color::Yellow,
            [TokenState::OnHomeStretch { offset: 4 }, TokenState::Base, TokenState::Base, TokenState::Base],
        );

        assert!(!has_any_legal_move(&player, dice(2)));
        assert!(apply_move(&mut player, TokenId::new(8), dice(2)).is_none());
        assert_eq!(player.tokens[0].state, TokenState::OnHomeStretch { offset: 4 });
    }

    #[test]
    fn test_home_exact_finish() {
        let mut player = player_with(
            Color::Yellow,
            [TokenState::OnHomeStretch { offset: 3 }, TokenState::Base, TokenState::Base, TokenState::Base],
        );

        let outcome = apply_move(&mut player, TokenId::new(8), dice(2)).unwrap();

        assert_eq!(outcome.kind, MoveKind::Finished);
        assert!(player.tokens[0].is_finished());
    }

    #[test]
    fn test_foreign_token_is_noop() {
        let mut player = Player::new(Color::Red, "Ada");
        assert!(apply_move(&mut player, TokenId::new(5), dice(6)).is_none());
    }

    #[test]
    fn test_overshoot_from_last_ring_cell_refused() {
        let red = TokenId::new(0);
        let last = TokenState::OnRing { index: 51 };

        assert_eq!(plan_move(Color::Red, red, last, DiceValue::SIX), None);

        let outcome = plan_move(Color::Red, red, last, dice(5)).unwrap();
        assert_eq!(outcome.to, TokenState::OnHomeStretch { offset: 5 });
        assert_eq!(outcome.kind, MoveKind::Finished);

        let mut player = Player::new(Color::Red, "Ada");
        player.tokens[0].state = last;
        assert!(!can_move(&player.tokens[0], DiceValue::SIX));
        assert!(has_any_legal_move(&player, DiceValue::SIX)); // base tokens deploy
        assert_eq!(legal_tokens(&player, DiceValue::SIX).as_slice(), &[TokenId::new(1), TokenId::new(2), TokenId::new(3)]);
    }

    #[test]
    fn test_off_board_states_never_move() {
        let mut player = Player::new(Color::Red, "Ada");
        player.tokens[0].state = TokenState::OnHomeStretch { offset: 253 };
        player.tokens[1].state = TokenState::OnRing { index: 200 };

        for face in 1..=6 {
            assert!(!can_move(&player.tokens[0], dice(face)));
            assert!(!can_move(&player.tokens[1], dice(face)));
        }
        assert!(apply_move(&mut player, TokenId::new(1), dice(3)).is_none());
        assert_eq!(player.tokens[1].state, TokenState::OnRing { index: 200 });
    }

    #[test]
    fn test_distance_travelled() {
        assert_eq!(distance_travelled(Color::Red, 0), 0);
        assert_eq!(distance_travelled(Color::Green, 12), 51);
        assert_eq!(distance_travelled(Color::Blue, 0), 13);
    }
}
