//! Backend A: the read-only tabular feed.

use async_trait::async_trait;

use crate::domain::{Listing, ListingId};
use crate::error::EngineError;
use crate::ingest::DelimitedRows;

use super::{ListingBackend, fetch_tabular_text};

/// Pull-only HTTP backend over a delimited-text export.
///
/// Two known export-URL shapes are tried in sequence when the first returns
/// HTML content. Write operations fail immediately with
/// [`EngineError::UnsupportedOperation`].
#[derive(Debug, Clone)]
pub struct TabularFeedBackend {
    client: reqwest::Client,
    feed_url: String,
    alternate_url: String,
}

impl TabularFeedBackend {
    /// Creates a feed backend over the two export URL shapes.
    #[must_use]
    pub fn new(
        client: reqwest::Client,
        feed_url: impl Into<String>,
        alternate_url: impl Into<String>,
    ) -> Self {
        Self {
            client,
            feed_url: feed_url.into(),
            alternate_url: alternate_url.into(),
        }
    }

    /// Parses raw feed text into listings.
    ///
    /// The first non-blank row is the export header and is skipped; blank
    /// rows are skipped; remaining rows map by fixed column order with
    /// derived color/icon left blank pending enrichment.
    #[must_use]
    pub fn parse_feed(text: &str) -> Vec<Listing> {
        let view = DelimitedRows::new(text);
        view.rows()
            .filter(|row| !is_blank(row))
            .skip(1)
            .map(|row| Listing::from_row(&row))
            .filter(|listing| !listing.id.is_empty())
            .collect()
    }
}

/// A row with no non-empty cell.
fn is_blank(row: &[String]) -> bool {
    row.iter().all(|cell| cell.trim().is_empty())
}

#[async_trait]
impl ListingBackend for TabularFeedBackend {
    async fn fetch_listings(&self) -> Result<Vec<Listing>, EngineError> {
        let text =
            fetch_tabular_text(&self.client, &self.feed_url, &self.alternate_url).await?;
        let listings = Self::parse_feed(&text);
        tracing::debug!(count = listings.len(), "parsed tabular feed");
        Ok(listings)
    }

    async fn create_listing(&self, _listing: &Listing) -> Result<Listing, EngineError> {
        Err(EngineError::UnsupportedOperation("create_listing"))
    }

    async fn update_listing(&self, _listing: &Listing) -> Result<Listing, EngineError> {
        Err(EngineError::UnsupportedOperation("update_listing"))
    }

    async fn delete_listing(&self, _id: &ListingId) -> Result<(), EngineError> {
        Err(EngineError::UnsupportedOperation("delete_listing"))
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    const FEED: &str = "\
id,user,pickup,delivery,pickup_city,delivery_city,distance,unit,cargo_type,title,qty,weight,wunit,dims,offers,min,max,currency,created,pickup_date,delivery_date,name,surname,rating,lang
s1,u1,\"123 Main, Apt 4\",456 Oak,CityA,CityB,50,km,Electronics,Widget,10,200,kg,1x1x1,3,100,300,USD,2024-01-01,2024-01-02,2024-01-03,Jan,Doe,4.5,en

s2,u2,789 Pine,12 Elm,CityC,CityD,120,km,Furniture,Sofa,1,80,kg,2x1x1,0,0,0,EUR,2024-02-01,2024-02-02,2024-02-03,Ada,Roe,5.0,de
";

    #[test]
    fn parses_rows_after_header() {
        let listings = TabularFeedBackend::parse_feed(FEED);
        assert_eq!(listings.len(), 2);

        let Some(first) = listings.first() else {
            panic!("missing listing");
        };
        assert_eq!(first.id, ListingId::from("s1"));
        assert_eq!(first.pickup_location, "123 Main, Apt 4");
        assert_eq!(first.cargo_type, "Electronics");
        assert!(first.trip_color.is_empty());
    }

    #[test]
    fn blank_rows_are_skipped() {
        let listings = TabularFeedBackend::parse_feed(FEED);
        let ids: Vec<_> = listings.iter().map(|l| l.id.clone()).collect();
        assert_eq!(ids, vec![ListingId::from("s1"), ListingId::from("s2")]);
    }

    #[test]
    fn rows_without_id_are_dropped() {
        let text = "header\n,u1,loc\ns3,u3,loc\n";
        let listings = TabularFeedBackend::parse_feed(text);
        assert_eq!(listings.len(), 1);
    }

    #[tokio::test]
    async fn writes_are_unsupported() {
        let backend = TabularFeedBackend::new(
            reqwest::Client::new(),
            "http://localhost/feed",
            "http://localhost/feed-alt",
        );
        let listing = Listing::from_row(&["s1".to_string()]);

        let created = backend.create_listing(&listing).await;
        assert!(matches!(
            created,
            Err(EngineError::UnsupportedOperation("create_listing"))
        ));

        let deleted = backend.delete_listing(&ListingId::from("s1")).await;
        assert!(matches!(
            deleted,
            Err(EngineError::UnsupportedOperation("delete_listing"))
        ));
    }
}
