use crate::{
    calendar::RawRecord,
    core::{
        IpoClient, IpoError,
        client::{CacheMode, RetryConfig},
        net,
    },
    scrape::extract,
};

pub(super) async fn fetch_calendar(
    client: &IpoClient,
    cache_mode: CacheMode,
    retry_override: Option<&RetryConfig>,
) -> Result<Vec<RawRecord>, IpoError> {
    let url = client.calendar_url()?;

    if cache_mode == CacheMode::Use
        && let Some(body) = client.cache_get(&url).await
    {
        return extract::parse_calendar_page(&body);
    }

    let req = client.http().get(url.clone());
    let resp = client.send_with_retry(req, retry_override).await?;

    if !resp.status().is_success() {
        return Err(IpoError::Status {
            status: resp.status().as_u16(),
            url: resp.url().to_string(),
        });
    }

    let body = net::get_text(resp, "ipo_calendar").await?;
    if cache_mode != CacheMode::Bypass {
        client.cache_put(&url, &body, None).await;
    }

    extract::parse_calendar_page(&body)
}
