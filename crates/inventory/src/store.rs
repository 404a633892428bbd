use chrono::{DateTime, Utc};
use indexmap::IndexMap;

use stockbook_core::{Aggregate, DomainError, DomainResult, Event};

use crate::item::{ItemName, Quantity};
use crate::log::LogEntry;
use crate::report::StockReport;

/// Threshold used by `check_low_items` callers that have no preference.
pub const DEFAULT_LOW_STOCK_THRESHOLD: u64 = 5;

/// Aggregate: the in-memory inventory.
///
/// Invariant: every entry has a quantity greater than zero. An item whose
/// quantity reaches zero is removed; absence means "zero on hand".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InventoryStore {
    pub(crate) quantities: IndexMap<ItemName, Quantity>,
}

/// Command: AddStock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddStock {
    pub item: ItemName,
    pub quantity: Quantity,
    pub occurred_at: DateTime<Utc>,
}

/// Command: RemoveStock. A negative `quantity` puts units back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoveStock {
    pub item: ItemName,
    pub quantity: i64,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InventoryCommand {
    AddStock(AddStock),
    RemoveStock(RemoveStock),
}

/// Event: StockAdded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StockAdded {
    pub item: ItemName,
    pub quantity: Quantity,
    pub occurred_at: DateTime<Utc>,
}

/// Event: StockRemoved. `remaining` is the on-hand count afterwards; zero
/// means the entry is gone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StockRemoved {
    pub item: ItemName,
    pub removed: i64,
    pub remaining: Quantity,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InventoryEvent {
    StockAdded(StockAdded),
    StockRemoved(StockRemoved),
}

impl Event for InventoryEvent {
    fn event_type(&self) -> &'static str {
        match self {
            InventoryEvent::StockAdded(_) => "inventory.stock.added",
            InventoryEvent::StockRemoved(_) => "inventory.stock.removed",
        }
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            InventoryEvent::StockAdded(e) => e.occurred_at,
            InventoryEvent::StockRemoved(e) => e.occurred_at,
        }
    }
}

impl Aggregate for InventoryStore {
    type Command = InventoryCommand;
    type Event = InventoryEvent;
    type Error = DomainError;

    fn apply(&mut self, event: &Self::Event) {
        match event {
            InventoryEvent::StockAdded(e) => {
                let total = self
                    .quantity_of(&e.item)
                    .checked_add(e.quantity)
                    .unwrap_or(Quantity::new(u64::MAX));
                // Adding zero to an absent item leaves it absent.
                if !total.is_zero() {
                    self.quantities.insert(e.item.clone(), total);
                }
            }
            InventoryEvent::StockRemoved(e) => {
                if e.remaining.is_zero() {
                    self.quantities.shift_remove(&e.item);
                } else if let Some(q) = self.quantities.get_mut(&e.item) {
                    *q = e.remaining;
                }
            }
        }
    }

    fn handle(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        match command {
            InventoryCommand::AddStock(cmd) => self.handle_add(cmd),
            InventoryCommand::RemoveStock(cmd) => self.handle_remove(cmd),
        }
    }
}

impl InventoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `qty` units of `item`, creating the entry if needed.
    ///
    /// Rejected input (empty name, negative quantity) returns
    /// `DomainError::Validation` and leaves the store untouched. When `log`
    /// is supplied, one [`LogEntry`] is appended per successful call.
    pub fn add(&mut self, item: &str, qty: i64, log: Option<&mut Vec<LogEntry>>) -> DomainResult<()> {
        let command = ItemName::parse(item)
            .and_then(|item| Ok((item, Quantity::from_signed(qty)?)))
            .map(|(item, quantity)| {
                InventoryCommand::AddStock(AddStock {
                    item,
                    quantity,
                    occurred_at: Utc::now(),
                })
            });

        let events = match command.and_then(|cmd| self.execute(&cmd)) {
            Ok(events) => events,
            Err(err) => {
                tracing::debug!("rejected add of {qty} to '{item}': {err}");
                return Err(err);
            }
        };
        trace_applied(&events);

        if let Some(log) = log {
            log.extend(events.iter().filter_map(|e| match e {
                InventoryEvent::StockAdded(added) => Some(LogEntry::from(added)),
                _ => None,
            }));
        }
        Ok(())
    }

    /// Subtract `qty` units of `item`; the entry is dropped once nothing is left.
    ///
    /// A negative `qty` raises the count. An unknown item is reported as
    /// `DomainError::NotFound` (logged as a warning); any other fault is
    /// logged as an error and leaves the entry untouched.
    pub fn remove(&mut self, item: &str, qty: i64) -> DomainResult<()> {
        let result = self.try_remove(item, qty);
        match &result {
            Ok(()) => {}
            Err(DomainError::NotFound(_)) => {
                tracing::warn!("Warning: Item '{item}' not found in inventory");
            }
            Err(err) => {
                tracing::error!("Error removing item '{item}': {err}");
            }
        }
        result
    }

    fn try_remove(&mut self, item: &str, qty: i64) -> DomainResult<()> {
        // An empty name can never have been stored, so it is simply absent.
        let item = ItemName::parse(item).map_err(|_| DomainError::not_found(item))?;
        let events = self.execute(&InventoryCommand::RemoveStock(RemoveStock {
            item,
            quantity: qty,
            occurred_at: Utc::now(),
        }))?;
        trace_applied(&events);
        Ok(())
    }

    /// On-hand quantity of `item`; 0 when the store has no entry.
    pub fn get_quantity(&self, item: &str) -> u64 {
        self.quantities.get(item).map_or(0, |q| q.value())
    }

    /// Items whose quantity is strictly below `threshold`, in insertion order.
    pub fn check_low_items(&self, threshold: u64) -> Vec<String> {
        self.quantities
            .iter()
            .filter(|(_, q)| q.value() < threshold)
            .map(|(item, _)| item.to_string())
            .collect()
    }

    pub fn report(&self) -> StockReport {
        StockReport::new(self.iter().map(|(item, q)| (item.clone(), q)).collect())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ItemName, Quantity)> {
        self.quantities.iter().map(|(item, q)| (item, *q))
    }

    pub fn len(&self) -> usize {
        self.quantities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quantities.is_empty()
    }

    pub fn clear(&mut self) {
        self.quantities.clear();
    }

    /// Replace all entries, dropping zero quantities.
    pub(crate) fn replace(&mut self, mut quantities: IndexMap<ItemName, Quantity>) {
        quantities.retain(|_, q| !q.is_zero());
        self.quantities = quantities;
    }

    fn quantity_of(&self, item: &ItemName) -> Quantity {
        self.quantities.get(item).copied().unwrap_or(Quantity::ZERO)
    }

    fn handle_add(&self, cmd: &AddStock) -> Result<Vec<InventoryEvent>, DomainError> {
        if self.quantity_of(&cmd.item).checked_add(cmd.quantity).is_none() {
            return Err(DomainError::invariant(format!(
                "quantity of '{}' would overflow",
                cmd.item
            )));
        }

        Ok(vec![InventoryEvent::StockAdded(StockAdded {
            item: cmd.item.clone(),
            quantity: cmd.quantity,
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_remove(&self, cmd: &RemoveStock) -> Result<Vec<InventoryEvent>, DomainError> {
        let current = match self.quantities.get(&cmd.item) {
            Some(q) => *q,
            None => return Err(DomainError::not_found(cmd.item.as_str())),
        };

        let remaining = match u64::try_from(cmd.quantity) {
            Ok(taken) => current.saturating_sub(Quantity::new(taken)),
            Err(_) => current
                .checked_add(Quantity::new(cmd.quantity.unsigned_abs()))
                .ok_or_else(|| {
                    DomainError::invariant(format!("quantity of '{}' would overflow", cmd.item))
                })?,
        };

        Ok(vec![InventoryEvent::StockRemoved(StockRemoved {
            item: cmd.item.clone(),
            removed: cmd.quantity,
            remaining,
            occurred_at: cmd.occurred_at,
        })])
    }
}

fn trace_applied(events: &[InventoryEvent]) {
    for event in events {
        tracing::debug!("{} at {}", event.event_type(), event.occurred_at());
    }
}
