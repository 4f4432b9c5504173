//! Row action dispatch: edit/delete buttons forwarded to external handlers.
//!
//! Deleting a lab is guarded. If any order references the lab, the delete is refused and
//! a single warning is emitted instead of calling the delete handler.

use crate::records::{Lab, Order, Record};

/// Buttons available on every row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowAction {
    Edit,
    Delete,
}

/// External edit/delete callbacks supplied by whoever owns the records
pub trait RecordHandler<R> {
    fn on_edit(&mut self, record: &R);

    fn on_delete(&mut self, record: &R);
}

/// User-facing notification sink
pub trait Notifier {
    fn warning(&mut self, message: &str);
}

/// Lookup of orders by the lab they were sent to
pub trait OrderLookup {
    fn orders_by_lab(&self, lab_id: &str) -> Vec<&Order>;
}

impl OrderLookup for [Order] {
    fn orders_by_lab(&self, lab_id: &str) -> Vec<&Order> {
        self.iter().filter(|order| order.lab_id == lab_id).collect()
    }
}

impl OrderLookup for Vec<Order> {
    fn orders_by_lab(&self, lab_id: &str) -> Vec<&Order> {
        self.as_slice().orders_by_lab(lab_id)
    }
}

/// Result of asking a [`DeletePolicy`] about a record
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteDecision {
    Allow,
    Refuse { warning: String, orders: usize },
}

/// Decides whether a delete request may reach the external handler
pub trait DeletePolicy<R> {
    fn check(&self, record: &R) -> DeleteDecision;
}

/// Forwards every delete (medications)
#[derive(Debug, Clone, Copy, Default)]
pub struct AllowDelete;

impl<R> DeletePolicy<R> for AllowDelete {
    fn check(&self, _record: &R) -> DeleteDecision {
        DeleteDecision::Allow
    }
}

/// Refuses to delete a lab that still has orders
pub struct LabOrdersGuard<'a, O: OrderLookup + ?Sized> {
    orders: &'a O,
}

impl<'a, O: OrderLookup + ?Sized> LabOrdersGuard<'a, O> {
    pub fn new(orders: &'a O) -> Self {
        Self { orders }
    }
}

impl<O: OrderLookup + ?Sized> DeletePolicy<Lab> for LabOrdersGuard<'_, O> {
    fn check(&self, lab: &Lab) -> DeleteDecision {
        let count = self.orders.orders_by_lab(&lab.id).len();
        if count == 0 {
            DeleteDecision::Allow
        } else {
            DeleteDecision::Refuse {
                warning: format!(
                    "لا يمكن حذف المختبر \"{}\" لوجود {} طلب مرتبط به",
                    lab.name, count
                ),
                orders: count,
            }
        }
    }
}

/// What happened after a row button was pressed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    Edited,
    Deleted,
    DeleteRefused { orders: usize },
}

/// Routes row buttons to the handler, consulting the delete policy first
pub struct RowActionDispatcher<'a, R> {
    handler: &'a mut dyn RecordHandler<R>,
    policy: &'a dyn DeletePolicy<R>,
    notifier: &'a mut dyn Notifier,
}

impl<'a, R: Record> RowActionDispatcher<'a, R> {
    pub fn new(
        handler: &'a mut dyn RecordHandler<R>,
        policy: &'a dyn DeletePolicy<R>,
        notifier: &'a mut dyn Notifier,
    ) -> Self {
        Self {
            handler,
            policy,
            notifier,
        }
    }

    pub fn dispatch(&mut self, action: RowAction, record: &R) -> ActionOutcome {
        match action {
            RowAction::Edit => {
                self.handler.on_edit(record);
                ActionOutcome::Edited
            }
            RowAction::Delete => match self.policy.check(record) {
                DeleteDecision::Allow => {
                    log::debug!("forwarding delete of {:?} {}", R::KIND, record.id());
                    self.handler.on_delete(record);
                    ActionOutcome::Deleted
                }
                DeleteDecision::Refuse { warning, orders } => {
                    log::warn!(
                        "refused delete of {:?} {}: {} dependent orders",
                        R::KIND,
                        record.id(),
                        orders
                    );
                    self.notifier.warning(&warning);
                    ActionOutcome::DeleteRefused { orders }
                }
            },
        }
    }
}
