const TOP_STORIES_URL: &str = "https://www.reddit.com/top.json";

/// Outcome of one listing fetch. A non-200 response keeps the raw body so
/// the caller can see exactly what reddit said.
#[derive(Debug, thiserror::Error)]
pub(crate) enum FetchError {
    #[error("reddit returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("could not decode top listing: {0}")]
    Decode(String),

    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

#[derive(Debug, serde::Deserialize)]
struct Listing {
    data: ListingData,
}

#[derive(Debug, serde::Deserialize)]
struct ListingData {
    children: Vec<serde_json::Value>,
}

/// One GET, no retries, no request timeout. Children come back opaque and
/// in server order.
pub(crate) async fn get_top_stories() -> Result<Vec<serde_json::Value>, FetchError> {
    let response = crate::CLIENT.get(TOP_STORIES_URL).send().await?;

    let status = response.status().as_u16();
    let body = response.text().await?;

    listing_from_response(status, &body)
}

fn listing_from_response(
    status: u16,
    body: &str,
) -> Result<Vec<serde_json::Value>, FetchError> {
    if status != 200 {
        return Err(FetchError::Status {
            status,
            body: body.to_string(),
        });
    }

    let listing: Listing =
        serde_json::from_str(body).map_err(|e| FetchError::Decode(e.to_string()))?;

    Ok(listing.data.children)
}
