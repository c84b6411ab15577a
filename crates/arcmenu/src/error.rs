use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MenuError {
    #[error("Number of items is off limits: {0} (expected 1 to 10)")]
    ItemCount(usize),
    #[error("Item at position {0} has no id")]
    MissingId(usize),
    #[error("Degenerate geometry: {0}")]
    DegenerateGeometry(&'static str),
    #[error("Speed must be a positive integer number, got {0}")]
    InvalidSpeed(u32),
    #[error("Radius cannot be negative, got {0}")]
    InvalidRadius(f64),
}

impl MenuError {
    /// Errors raised while building a menu from the caller's items.
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::ItemCount(_) | Self::MissingId(_))
    }
}
