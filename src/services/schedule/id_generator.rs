use crate::models::table::TableId;

/// Source of fresh table ids, injected into the store.
#[cfg_attr(test, mockall::automock)]
pub trait TableIdGenerator: Send {
    fn next_id(&mut self) -> TableId;
}

/// Yields `schedule-1`, `schedule-2`, ...
#[derive(Debug, Clone)]
pub struct SequentialIdGenerator {
    prefix: String,
    next: u64,
}

impl SequentialIdGenerator {
    pub fn new() -> Self {
        Self::with_prefix("schedule")
    }

    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: 1,
        }
    }
}

impl Default for SequentialIdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl TableIdGenerator for SequentialIdGenerator {
    fn next_id(&mut self) -> TableId {
        let id = TableId::new(format!("{}-{}", self.prefix, self.next));
        self.next += 1;
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequential_ids_increase() {
        let mut generator = SequentialIdGenerator::new();
        assert_eq!(generator.next_id().as_str(), "schedule-1");
        assert_eq!(generator.next_id().as_str(), "schedule-2");

        let mut custom = SequentialIdGenerator::with_prefix("plan");
        assert_eq!(custom.next_id().as_str(), "plan-1");
    }
}
