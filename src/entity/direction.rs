use strum_macros::{AsRefStr, EnumIter};

/// The four cardinal directions. Screen space: `Up` is negative y.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, AsRefStr, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}
