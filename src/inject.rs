use crate::fetcher::PriceSource;
use crate::page::SlotPage;
use crate::record::Plan;
use crate::render::{RenderOutcome, render, render_fetched};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// A slot to fill and the plan whose price goes into it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceBinding {
    pub slot_id: String,
    pub plan: Plan,
}

impl PriceBinding {
    pub fn new(slot_id: impl Into<String>, plan: Plan) -> Self {
        Self {
            slot_id: slot_id.into(),
            plan,
        }
    }
}

/// Whether one fetch feeds every slot or each slot fetches for itself.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FetchMode {
    #[default]
    Shared,
    PerSlot,
}

pub fn default_bindings() -> Vec<PriceBinding> {
    vec![
        PriceBinding::new("buynow-annual-price", Plan::Annual),
        PriceBinding::new("buynow-annual-per-month-price", Plan::AnnualPerMonth),
    ]
}

/// Fills every bound slot of `html` and returns the updated document.
pub async fn inject_prices(
    html: &str,
    bindings: &[PriceBinding],
    source: &dyn PriceSource,
    mode: FetchMode,
) -> String {
    let page = SlotPage::parse(html);
    if bindings.is_empty() {
        return page.to_html();
    }

    let mut written = 0usize;
    match mode {
        FetchMode::Shared => {
            let record = match source.fetch_price().await {
                Ok(record) => record,
                Err(err) => {
                    debug!(%err, "price source failed; page left unchanged");
                    return page.to_html();
                }
            };
            for binding in bindings {
                if render(&page, &binding.slot_id, binding.plan, record.as_ref())
                    == RenderOutcome::Written
                {
                    written += 1;
                }
            }
        }
        FetchMode::PerSlot => {
            for binding in bindings {
                if render_fetched(&page, &binding.slot_id, binding.plan, source).await
                    == RenderOutcome::Written
                {
                    written += 1;
                }
            }
        }
    }
    info!(written, total = bindings.len(), ?mode, "price slots filled");
    page.to_html()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::tests::StaticSource;
    use serde_json::json;

    const PAGE: &str = r#"<html><body>
        <span id="buynow-annual-price">-</span>
        <span id="buynow-annual-per-month-price">-</span>
    </body></html>"#;

    fn texts(html: &str) -> (Option<String>, Option<String>) {
        let page = SlotPage::parse(html);
        (
            page.slot_text("buynow-annual-price"),
            page.slot_text("buynow-annual-per-month-price"),
        )
    }

    #[tokio::test]
    async fn shared_mode_fetches_once() {
        let source = StaticSource::new(Some(json!({"annual": 49.95, "annual_per_month": 4.16})));
        let html = inject_prices(PAGE, &default_bindings(), &source, FetchMode::Shared).await;
        assert_eq!(
            texts(&html),
            (Some("49.95".into()), Some("4.16".into()))
        );
        assert_eq!(source.calls(), 1);
    }

    #[tokio::test]
    async fn per_slot_mode_fetches_for_each_slot() {
        let source = StaticSource::new(Some(json!({"annual": "$60", "annual_per_month": "$5"})));
        let html = inject_prices(PAGE, &default_bindings(), &source, FetchMode::PerSlot).await;
        assert_eq!(texts(&html), (Some("$60".into()), Some("$5".into())));
        assert_eq!(source.calls(), 2);
    }

    #[tokio::test]
    async fn absent_prices_leave_page_alone() {
        let source = StaticSource::new(None);
        let html = inject_prices(PAGE, &default_bindings(), &source, FetchMode::Shared).await;
        assert_eq!(texts(&html), (Some("-".into()), Some("-".into())));
    }

    #[tokio::test]
    async fn source_error_leaves_page_alone() {
        for mode in [FetchMode::Shared, FetchMode::PerSlot] {
            let source = StaticSource::failing();
            let html = inject_prices(PAGE, &default_bindings(), &source, mode).await;
            assert_eq!(texts(&html), (Some("-".into()), Some("-".into())));
        }
    }

    #[tokio::test]
    async fn partial_record_fills_what_it_can() {
        let source = StaticSource::new(Some(json!({"annual": 49.95})));
        let html = inject_prices(PAGE, &default_bindings(), &source, FetchMode::Shared).await;
        assert_eq!(texts(&html), (Some("49.95".into()), Some("-".into())));
    }

    #[tokio::test]
    async fn no_bindings_skips_fetch() {
        let source = StaticSource::new(Some(json!({"annual": 49.95})));
        let html = inject_prices(PAGE, &[], &source, FetchMode::Shared).await;
        assert_eq!(texts(&html), (Some("-".into()), Some("-".into())));
        assert_eq!(source.calls(), 0);
    }
}
