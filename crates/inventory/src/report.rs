use crate::item::{ItemName, Quantity};

/// Snapshot listing of the store, one line per item in insertion order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StockReport {
    lines: Vec<(ItemName, Quantity)>,
}

impl StockReport {
    pub const HEADER: &'static str = "Items Report";

    pub(crate) fn new(lines: Vec<(ItemName, Quantity)>) -> Self {
        Self { lines }
    }
}

impl core::fmt::Display for StockReport {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        writeln!(f, "{}", Self::HEADER)?;
        for (item, quantity) in &self.lines {
            writeln!(f, "{item} -> {quantity}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_report_is_header_only() {
        assert_eq!(StockReport::new(Vec::new()).to_string(), "Items Report\n");
    }

    #[test]
    fn lists_items_in_given_order() {
        let report = StockReport::new(vec![
            (ItemName::parse("pear").unwrap(), Quantity::new(2)),
            (ItemName::parse("apple").unwrap(), Quantity::new(7)),
        ]);
        assert_eq!(report.to_string(), "Items Report\npear -> 2\napple -> 7\n");
    }
}
