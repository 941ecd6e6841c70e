use api_types::bill::{Bill, BillStatus};

/// Single source of truth for the bill collection.
///
/// Mutated only through the named transitions below; every transition is
/// total and synchronous. After any completed transition `loading` and a
/// set `error` are never both true: `fetch_start` clears the error and the
/// terminal transitions clear `loading`.
#[derive(Debug, Default)]
pub struct BillsStore {
    bills: Vec<Bill>,
    loading: bool,
    error: Option<String>,
}

/// Dashboard totals derived from the current collection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BillsSummary {
    pub total_amount: f64,
    pub pending: usize,
    pub overdue: usize,
}

impl BillsStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bills(&self) -> &[Bill] {
        &self.bills
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Marks a load as in flight. Idempotent while already loading.
    pub fn fetch_start(&mut self) {
        self.loading = true;
        self.error = None;
    }

    /// Replaces the collection wholesale with the server response.
    pub fn fetch_success(&mut self, bills: Vec<Bill>) {
        self.loading = false;
        self.bills = bills;
    }

    /// Records a load failure. The stale collection is kept so the last
    /// known data stays renderable next to the error.
    pub fn fetch_failure(&mut self, message: impl Into<String>) {
        self.loading = false;
        self.error = Some(message.into());
    }

    /// Appends a freshly created bill. No dedup by id: the sync layer only
    /// calls this with server-assigned ids.
    pub fn add(&mut self, bill: Bill) {
        self.bills.push(bill);
    }

    /// Replaces the bill with a matching id in place; no-op when absent.
    pub fn update(&mut self, bill: Bill) {
        if let Some(slot) = self.bills.iter_mut().find(|b| b.id == bill.id) {
            *slot = bill;
        }
    }

    /// Drops the bill with a matching id; no-op when absent.
    pub fn remove(&mut self, id: i64) {
        self.bills.retain(|bill| bill.id != id);
    }

    pub fn summary(&self) -> BillsSummary {
        BillsSummary {
            total_amount: self.bills.iter().map(|bill| bill.amount).sum(),
            pending: self.count_status(BillStatus::Pending),
            overdue: self.count_status(BillStatus::Overdue),
        }
    }

    fn count_status(&self, status: BillStatus) -> usize {
        self.bills
            .iter()
            .filter(|bill| bill.status == status)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use api_types::bill::BillCategory;
    use chrono::NaiveDate;

    fn bill(id: i64, title: &str, amount: f64, status: BillStatus) -> Bill {
        let due = NaiveDate::from_ymd_opt(2026, 9, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        Bill {
            id,
            title: title.to_string(),
            description: None,
            amount,
            due_date: due,
            status,
            category: BillCategory::Other,
            created_at: due,
            user_id: 1,
        }
    }

    #[test]
    fn fetch_start_sets_loading_and_clears_error() {
        let mut store = BillsStore::new();
        store.fetch_failure("boom");
        store.fetch_start();
        assert!(store.is_loading());
        assert!(store.error().is_none());
    }

    #[test]
    fn fetch_success_replaces_wholesale() {
        let mut store = BillsStore::new();
        store.fetch_success(vec![bill(1, "Rent", 1200.0, BillStatus::Pending)]);
        store.fetch_start();
        store.fetch_success(vec![bill(2, "Power", 80.0, BillStatus::Paid)]);
        assert_eq!(store.bills().len(), 1);
        assert_eq!(store.bills()[0].id, 2);
        assert!(!store.is_loading());
    }

    #[test]
    fn fetch_failure_keeps_stale_bills() {
        let mut store = BillsStore::new();
        store.fetch_success(vec![bill(1, "Rent", 1200.0, BillStatus::Pending)]);
        store.fetch_start();
        store.fetch_failure("Failed to fetch bills");
        assert_eq!(store.error(), Some("Failed to fetch bills"));
        assert!(!store.is_loading());
        assert_eq!(store.bills().len(), 1);
    }

    #[test]
    fn add_does_not_dedup_ids() {
        let mut store = BillsStore::new();
        store.add(bill(1, "Rent", 1200.0, BillStatus::Pending));
        store.add(bill(1, "Rent again", 1200.0, BillStatus::Pending));
        assert_eq!(store.bills().len(), 2);
    }

    #[test]
    fn update_missing_id_is_a_noop() {
        let mut store = BillsStore::new();
        store.add(bill(1, "Rent", 1200.0, BillStatus::Pending));
        store.update(bill(9, "Ghost", 5.0, BillStatus::Paid));
        assert_eq!(store.bills().len(), 1);
        assert_eq!(store.bills()[0].title, "Rent");
    }

    #[test]
    fn update_replaces_in_place() {
        let mut store = BillsStore::new();
        store.add(bill(1, "Rent", 1200.0, BillStatus::Pending));
        store.add(bill(2, "Power", 80.0, BillStatus::Pending));
        store.update(bill(1, "Rent (updated)", 1250.0, BillStatus::Pending));
        assert_eq!(store.bills()[0].title, "Rent (updated)");
        assert_eq!(store.bills()[1].id, 2);
    }

    #[test]
    fn remove_missing_id_is_a_noop() {
        let mut store = BillsStore::new();
        store.add(bill(1, "Rent", 1200.0, BillStatus::Pending));
        store.remove(9);
        assert_eq!(store.bills().len(), 1);
    }

    #[test]
    fn remove_filters_by_id() {
        let mut store = BillsStore::new();
        store.add(bill(1, "Rent", 1200.0, BillStatus::Pending));
        store.add(bill(2, "Power", 80.0, BillStatus::Pending));
        store.remove(1);
        assert_eq!(store.bills().len(), 1);
        assert_eq!(store.bills()[0].id, 2);
    }

    #[test]
    fn load_scenario() {
        let mut store = BillsStore::new();
        store.fetch_start();
        assert!(store.is_loading());
        store.fetch_success(vec![bill(1, "Rent", 1200.0, BillStatus::Pending)]);
        assert_eq!(store.bills().len(), 1);
        assert!(!store.is_loading());
        assert!(store.error().is_none());
    }

    #[test]
    fn summary_totals_and_counts() {
        let mut store = BillsStore::new();
        store.fetch_success(vec![
            bill(1, "Rent", 1200.0, BillStatus::Pending),
            bill(2, "Power", 80.5, BillStatus::Overdue),
            bill(3, "Net", 35.0, BillStatus::Paid),
        ]);
        let summary = store.summary();
        assert_eq!(summary.total_amount, 1315.5);
        assert_eq!(summary.pending, 1);
        assert_eq!(summary.overdue, 1);
    }
}
