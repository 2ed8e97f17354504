use std::fmt;
use std::sync::Arc;

/// Unique key identifying an entity (`"player"`, `"enemy3"`, `"boss"`, a weapon name...).
///
/// Backed by a shared string so snapshots can clone keys without allocating.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct EntityId(Arc<str>);

impl EntityId {
    /// Reserved key for the controllable player character.
    pub const PLAYER: &'static str = "player";

    /// Reserved key for the final-level boss.
    pub const BOSS: &'static str = "boss";

    pub fn new(key: impl Into<Arc<str>>) -> Self {
        Self(key.into())
    }

    pub fn player() -> Self {
        Self::new(Self::PLAYER)
    }

    pub fn boss() -> Self {
        Self::new(Self::BOSS)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::borrow::Borrow<str> for EntityId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for EntityId {
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}

impl From<String> for EntityId {
    fn from(key: String) -> Self {
        Self::new(key)
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Discrete grid position expressed in tile coordinates.
///
/// `x` is the column and `y` the row; `y` grows downward.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const ORIGIN: Self = Self { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub const fn translate(self, vector: Vector) -> Self {
        Self::new(self.x + vector.x, self.y + vector.y)
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::ORIGIN
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Relative displacement applied by movement.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vector {
    pub x: i32,
    pub y: i32,
}

impl Vector {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// The four movement directions accepted from the input layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Returns the unit vector for this direction.
    pub const fn vector(self) -> Vector {
        match self {
            Direction::Up => Vector::new(0, -1),
            Direction::Down => Vector::new(0, 1),
            Direction::Left => Vector::new(-1, 0),
            Direction::Right => Vector::new(1, 0),
        }
    }

    /// Returns the 4 orthogonal directions.
    pub const fn all() -> [Direction; 4] {
        [
            Direction::Up,
            Direction::Down,
            Direction::Left,
            Direction::Right,
        ]
    }
}

impl From<Direction> for Vector {
    fn from(direction: Direction) -> Self {
        direction.vector()
    }
}
