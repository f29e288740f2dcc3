/// Read the response body as text, logging the payload size for the endpoint.
pub(crate) async fn get_text(
    resp: reqwest::Response,
    endpoint: &str,
) -> Result<String, reqwest::Error> {
    let text = resp.text().await?;
    tracing::debug!(endpoint, bytes = text.len(), "fetched body");
    Ok(text)
}
