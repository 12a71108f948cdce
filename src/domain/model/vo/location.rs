use std::fmt;

use rand::RngExt;

/// Constants for grid coordinate bounds
pub const MIN_COORDINATE: i32 = 1;
pub const MAX_COORDINATE: i32 = 10;

/// Location represents a cell on the delivery grid as a value object.
///
/// A value object is immutable and defined by its attributes.
/// Two locations are considered equal if they have the same coordinates.
/// The default value is explicitly invalid and is rejected by every domain
/// constructor that takes a location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Location {
    /// Column on the grid (MIN_COORDINATE to MAX_COORDINATE)
    x: i32,
    /// Row on the grid (MIN_COORDINATE to MAX_COORDINATE)
    y: i32,
    /// Set only by the validating constructors
    is_valid: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LocationError {
    /// X coordinate is out of valid range (MIN_COORDINATE to MAX_COORDINATE)
    InvalidX(i32),
    /// Y coordinate is out of valid range (MIN_COORDINATE to MAX_COORDINATE)
    InvalidY(i32),
}

impl fmt::Display for LocationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LocationError::InvalidX(x) => {
                write!(
                    f,
                    "Invalid x: {}. Must be between {} and {}",
                    x, MIN_COORDINATE, MAX_COORDINATE
                )
            }
            LocationError::InvalidY(y) => {
                write!(
                    f,
                    "Invalid y: {}. Must be between {} and {}",
                    y, MIN_COORDINATE, MAX_COORDINATE
                )
            }
        }
    }
}

impl std::error::Error for LocationError {}

impl Location {
    /// Creates a new Location value object with validation.
    ///
    /// The x coordinate is checked first, so a location that is invalid on
    /// both axes reports the x axis.
    ///
    /// # Errors
    ///
    /// Returns `LocationError` if either coordinate is outside the grid.
    pub fn new(x: i32, y: i32) -> Result<Self, LocationError> {
        if !(MIN_COORDINATE..=MAX_COORDINATE).contains(&x) {
            return Err(LocationError::InvalidX(x));
        }

        if !(MIN_COORDINATE..=MAX_COORDINATE).contains(&y) {
            return Err(LocationError::InvalidY(y));
        }

        Ok(Self {
            x,
            y,
            is_valid: true,
        })
    }

    /// Returns a uniformly sampled valid location.
    pub fn random() -> Self {
        let mut rng = rand::rng();
        Self {
            x: rng.random_range(MIN_COORDINATE..=MAX_COORDINATE),
            y: rng.random_range(MIN_COORDINATE..=MAX_COORDINATE),
            is_valid: true,
        }
    }

    /// Returns the lower-left corner of the grid, `(1,1)`.
    pub const fn min() -> Self {
        Self {
            x: MIN_COORDINATE,
            y: MIN_COORDINATE,
            is_valid: true,
        }
    }

    /// Returns the upper-right corner of the grid, `(10,10)`.
    pub const fn max() -> Self {
        Self {
            x: MAX_COORDINATE,
            y: MAX_COORDINATE,
            is_valid: true,
        }
    }

    /// Returns the x coordinate.
    #[inline]
    pub fn x(&self) -> i32 {
        self.x
    }

    /// Returns the y coordinate.
    #[inline]
    pub fn y(&self) -> i32 {
        self.y
    }

    /// Returns whether this location was produced by a validating
    /// constructor. Default-constructed locations are invalid.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.is_valid
    }

    /// Calculates the Manhattan distance to another location.
    ///
    /// For two valid locations the result is in `[0, 18]`.
    pub fn distance_to(&self, other: &Location) -> i32 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.x, self.y)
    }
}
