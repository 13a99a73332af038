use crate::fetcher::PRICE_ENDPOINT;
use crate::inject::{FetchMode, PriceBinding, default_bindings};
use crate::record::Plan;
use anyhow::bail;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::warn;

/// Runtime configuration for the price filler.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub endpoint: String,
    pub bindings: Vec<PriceBinding>,
    pub fetch_mode: FetchMode,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let endpoint = lookup("PRICE_ENDPOINT").unwrap_or_else(|| PRICE_ENDPOINT.to_string());

        let bindings = lookup("PRICE_SLOTS_JSON")
            .and_then(|v| match serde_json::from_str::<BTreeMap<String, String>>(&v) {
                Ok(map) => Some(parse_bindings(map)),
                Err(err) => {
                    warn!(%err, "ignoring unparseable PRICE_SLOTS_JSON");
                    None
                }
            })
            .unwrap_or_else(default_bindings);

        let fetch_mode = match lookup("PRICE_FETCH_MODE").as_deref() {
            None | Some("") | Some("shared") => FetchMode::Shared,
            Some("per-slot") => FetchMode::PerSlot,
            Some(other) => bail!("unknown PRICE_FETCH_MODE {other:?}, expected shared or per-slot"),
        };

        Ok(Self {
            endpoint,
            bindings,
            fetch_mode,
        })
    }
}

fn parse_bindings(map: BTreeMap<String, String>) -> Vec<PriceBinding> {
    map.into_iter()
        .filter_map(|(slot_id, plan)| match plan.parse::<Plan>() {
            Ok(plan) => Some(PriceBinding { slot_id, plan }),
            Err(err) => {
                warn!(slot = %slot_id, %err, "dropping price slot binding");
                None
            }
        })
        .collect()
}
