use serde::{Deserialize, Serialize};

/// Direction the snake can move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Returns the 180-degree reverse of this direction
    pub fn opposite(&self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Returns true if turning from self to other would be a 180-degree turn
    pub fn is_opposite(&self, other: Direction) -> bool {
        self.opposite() == other
    }

    /// Returns the delta (dx, dy) for moving in this direction
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    /// Heading actually applied for a tick when `requested` is pending.
    ///
    /// Reversals are ignored rather than rejected.
    pub fn resolve(&self, requested: Direction) -> Direction {
        if self.is_opposite(requested) {
            *self
        } else {
            requested
        }
    }
}

/// Direction intent handed to the engine for one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Turn towards a direction before moving
    Move(Direction),
    /// Keep the current heading
    Continue,
}

impl From<Direction> for Action {
    fn from(direction: Direction) -> Self {
        Action::Move(direction)
    }
}

impl From<Option<Direction>> for Action {
    fn from(pending: Option<Direction>) -> Self {
        pending.map(Action::Move).unwrap_or(Action::Continue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opposite_directions() {
        assert!(Direction::Up.is_opposite(Direction::Down));
        assert!(Direction::Down.is_opposite(Direction::Up));
        assert!(Direction::Left.is_opposite(Direction::Right));
        assert!(Direction::Right.is_opposite(Direction::Left));

        assert!(!Direction::Up.is_opposite(Direction::Left));
        assert!(!Direction::Up.is_opposite(Direction::Up));
    }

    #[test]
    fn test_direction_delta() {
        assert_eq!(Direction::Up.delta(), (0, -1));
        assert_eq!(Direction::Down.delta(), (0, 1));
        assert_eq!(Direction::Left.delta(), (-1, 0));
        assert_eq!(Direction::Right.delta(), (1, 0));
    }

    #[test]
    fn test_resolve_ignores_reversal() {
        assert_eq!(Direction::Up.resolve(Direction::Down), Direction::Up);
        assert_eq!(Direction::Up.resolve(Direction::Left), Direction::Left);
        assert_eq!(Direction::Left.resolve(Direction::Right), Direction::Left);
        assert_eq!(Direction::Right.resolve(Direction::Right), Direction::Right);
    }

    #[test]
    fn test_pending_into_action() {
        assert_eq!(Action::from(Some(Direction::Left)), Action::Move(Direction::Left));
        assert_eq!(Action::from(None), Action::Continue);
    }
}
