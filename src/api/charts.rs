//! Chart Endpoints

use super::{query_string, ApiClient};
use crate::error::ApiError;
use crate::models::{ChartResponse, ChartSummary, TopChartsResponse};

pub const DEFAULT_CHART_ID: &str = "hot-100";

/// Charts available for browsing
pub async fn top_charts(client: &ApiClient) -> Result<Vec<ChartSummary>, ApiError> {
    let resp: TopChartsResponse = client
        .get_with_timeout("top-charts", client.config().chart_timeout_ms)
        .await?;
    Ok(resp.data)
}

/// One chart for a week (latest when `week` is None), positions `range` (e.g. "1-10")
pub async fn fetch_chart(
    client: &ApiClient,
    chart_id: &str,
    week: Option<&str>,
    range: &str,
) -> Result<ChartResponse, ApiError> {
    let query = query_string(&[("id", Some(chart_id)), ("week", week), ("range", Some(range))]);
    client
        .get_with_timeout(&format!("chart{}", query), client.config().chart_timeout_ms)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testing::*;
    use std::rc::Rc;

    #[tokio::test]
    async fn test_fetch_chart_uses_chart_timeout() {
        let transport = Rc::new(MockTransport::new("unused"));
        transport.route(
            "/chart",
            200,
            r#"{"source": "api", "data": {"title": "Billboard 200", "week": "", "info": "", "songs": []}}"#,
        );
        let (client, _) = client_with_session(transport.clone(), None);

        let resp = fetch_chart(&client, "billboard-200", Some("2025-03-04"), "1-10").await.unwrap();
        assert_eq!(resp.data.title, "Billboard 200");

        let call = transport.calls.borrow()[0].clone();
        assert_eq!(call.timeout_ms, Some(15_000));
        assert!(call.url.ends_with("/chart?id=billboard-200&week=2025-03-04&range=1-10"));
    }
}
