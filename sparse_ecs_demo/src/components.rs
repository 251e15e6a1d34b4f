//! Plain data components of the demo scene.

use std::fmt;

/// Position of the entity on the plane.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({},{})", self.x, self.y)
    }
}

/// Change of position per second.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Velocity {
    pub x: f32,
    pub y: f32,
}

impl Velocity {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Velocity {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({},{})", self.x, self.y)
    }
}

/// Time left before the entity is deleted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lifetime {
    pub seconds_left: f32,
}

impl Lifetime {
    pub const fn new(seconds_left: f32) -> Self {
        Self { seconds_left }
    }
}

impl fmt::Display for Lifetime {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.seconds_left)
    }
}

/// Rectangle the entity bounces inside of.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundedCollision {
    pub x_min: f32,
    pub x_max: f32,
    pub y_min: f32,
    pub y_max: f32,
}

impl BoundedCollision {
    pub const fn new(x_min: f32, x_max: f32, y_min: f32, y_max: f32) -> Self {
        Self {
            x_min,
            x_max,
            y_min,
            y_max,
        }
    }
}

impl fmt::Display for BoundedCollision {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "(xLimits[{},{}], yLimits[{},{}])",
            self.x_min, self.x_max, self.y_min, self.y_max,
        )
    }
}

/// Symbol which represents the entity in the text grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextRender {
    pub symbol: char,
}

impl TextRender {
    pub const fn new(symbol: char) -> Self {
        Self { symbol }
    }
}

impl fmt::Display for TextRender {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.symbol)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(Position::new(1.5, -2.0).to_string(), "(1.5,-2)");
        assert_eq!(Velocity::new(0.0, 1.0).to_string(), "(0,1)");
        assert_eq!(Lifetime::new(4.0).to_string(), "4");
        assert_eq!(TextRender::new('o').to_string(), "o");
        assert_eq!(
            BoundedCollision::new(-1.0, 1.0, -2.0, 2.0).to_string(),
            "(xLimits[-1,1], yLimits[-2,2])",
        );
    }
}
