use crate::fetcher::PriceSource;
use crate::page::SlotPage;
use crate::record::{Plan, PriceRecord};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderOutcome {
    Written,
    Skipped(SkipReason),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    EmptySlotId,
    MissingSlot,
    Absent,
    MissingField,
    FetchFailed,
}

fn check_slot(page: &SlotPage, slot_id: &str) -> Option<SkipReason> {
    if slot_id.is_empty() {
        return Some(SkipReason::EmptySlotId);
    }
    if !page.has_slot(slot_id) {
        return Some(SkipReason::MissingSlot);
    }
    None
}

fn skipped(slot_id: &str, plan: Plan, reason: SkipReason) -> RenderOutcome {
    debug!(slot = %slot_id, %plan, ?reason, "price slot left unchanged");
    RenderOutcome::Skipped(reason)
}

/// Writes the value for `plan` into the slot, or leaves the page untouched.
pub fn render(
    page: &SlotPage,
    slot_id: &str,
    plan: Plan,
    record: Option<&PriceRecord>,
) -> RenderOutcome {
    if let Some(reason) = check_slot(page, slot_id) {
        return skipped(slot_id, plan, reason);
    }
    let Some(record) = record else {
        return skipped(slot_id, plan, SkipReason::Absent);
    };
    let Some(text) = record.display_value(plan) else {
        return skipped(slot_id, plan, SkipReason::MissingField);
    };
    if !page.set_text(slot_id, &text) {
        return skipped(slot_id, plan, SkipReason::MissingSlot);
    }
    RenderOutcome::Written
}

/// Like [`render`], but performs its own fetch once the slot is known to exist.
pub async fn render_fetched(
    page: &SlotPage,
    slot_id: &str,
    plan: Plan,
    source: &dyn PriceSource,
) -> RenderOutcome {
    if let Some(reason) = check_slot(page, slot_id) {
        return skipped(slot_id, plan, reason);
    }
    match source.fetch_price().await {
        Ok(record) => render(page, slot_id, plan, record.as_ref()),
        Err(err) => {
            debug!(slot = %slot_id, %err, "price source failed");
            RenderOutcome::Skipped(SkipReason::FetchFailed)
        }
    }
}
