use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use serde_json::Value;

use crate::event::RawEvent;

/// The site-configuration document kept by the external store. Only the
/// events section matters here; every other section is carried opaquely.
#[derive(Debug, Clone, Deserialize)]
pub struct SiteConfig {
    #[serde(default)]
    pub sections: Vec<Section>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Section {
    // Sections authored without a type are simply never the events section.
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub items: Value,
}

impl SiteConfig {
    /// The ordered event records, or `None` when the document has no
    /// usable events section. Records that do not deserialize are skipped
    /// rather than failing the whole section.
    pub fn events(&self) -> Option<Vec<RawEvent>> {
        let section = self.sections.iter().find(|section| section.kind == "events")?;
        let items = section.items.as_array()?;

        let events: Vec<RawEvent> = items
            .iter()
            .filter_map(|item| serde_json::from_value(item.clone()).ok())
            .collect();

        (!events.is_empty()).then_some(events)
    }
}

pub async fn read_site(path: &Path) -> Result<SiteConfig> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("failed to read site configuration at {}", path.display()))?;

    serde_json::from_str(&raw).context("site configuration is not valid JSON")
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOCUMENT: &str = r#"{
        "sections": [
            { "type": "hero", "items": { "title": "Welcome" } },
            {
                "type": "events",
                "items": [
                    {
                        "name": "Muhurtham",
                        "date": "2025-11-26",
                        "time": "6:00 PM - 8:00 PM",
                        "place": "Tirupati",
                        "liveStreamUrl": "https://example.com/live"
                    },
                    { "name": "Reception", "time": "18:00" },
                    { "name": 42 }
                ]
            }
        ]
    }"#;

    #[test]
    fn events_section_is_found_and_malformed_items_are_skipped() {
        let site: SiteConfig = serde_json::from_str(DOCUMENT).unwrap();
        let events = site.events().unwrap();

        assert_eq!(events.len(), 2);
        assert_eq!(events[0].name, "Muhurtham");
        assert_eq!(events[0].date.as_deref(), Some("2025-11-26"));
        assert_eq!(
            events[0].live_stream_url.as_deref(),
            Some("https://example.com/live")
        );
        assert_eq!(events[1].name, "Reception");
        assert_eq!(events[1].date, None);
    }

    #[test]
    fn untyped_sections_are_ignored() {
        let site: SiteConfig = serde_json::from_str(
            r#"{
                "sections": [
                    { "title": "Our Story" },
                    { "type": "events", "items": [ { "name": "Reception", "time": "18:00" } ] }
                ]
            }"#,
        )
        .unwrap();

        let events = site.events().unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].name, "Reception");
    }

    #[test]
    fn missing_or_empty_events_section_yields_none() {
        let site: SiteConfig =
            serde_json::from_str(r#"{ "sections": [ { "type": "hero" } ] }"#).unwrap();
        assert!(site.events().is_none());

        let site: SiteConfig =
            serde_json::from_str(r#"{ "sections": [ { "type": "events", "items": [] } ] }"#)
                .unwrap();
        assert!(site.events().is_none());

        let site: SiteConfig = serde_json::from_str(r#"{}"#).unwrap();
        assert!(site.events().is_none());
    }
}
