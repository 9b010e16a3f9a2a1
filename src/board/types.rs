//! Board types for modboard.

/// Board entity. Boards are seeded reference data.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Board {
    /// Unique board ID.
    pub id: i64,
    /// Board name (unique).
    pub name: String,
    /// Board description.
    pub description: Option<String>,
    /// Display order (lower first).
    pub sort_order: i64,
    /// Creation timestamp.
    pub created_at: String,
}

/// Data for creating a new board.
#[derive(Debug, Clone)]
pub struct NewBoard {
    pub name: String,
    pub description: Option<String>,
    pub sort_order: i64,
}

impl NewBoard {
    /// Create a new board with just a name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            sort_order: 0,
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the sort order.
    pub fn with_sort_order(mut self, sort_order: i64) -> Self {
        self.sort_order = sort_order;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_board_builder() {
        let board = NewBoard::new("General")
            .with_description("Talk about anything")
            .with_sort_order(3);

        assert_eq!(board.name, "General");
        assert_eq!(board.description.as_deref(), Some("Talk about anything"));
        assert_eq!(board.sort_order, 3);
    }

    #[test]
    fn test_new_board_defaults() {
        let board = NewBoard::new("General");
        assert!(board.description.is_none());
        assert_eq!(board.sort_order, 0);
    }
}
