//! End-to-end routing tests through the HTTP service.

#[cfg(test)]
mod tests {
    use crate::{body_json, call, echo_service};

    #[tokio::test]
    async fn test_should_route_literal_path() {
        let service = echo_service();
        let body = body_json(call(&service, "/widgets").await).await;
        assert_eq!(body["operation"], "ListWidgets");
    }

    #[tokio::test]
    async fn test_should_prefer_literal_over_label_segment() {
        let service = echo_service();

        let body = body_json(call(&service, "/widgets/current").await).await;
        assert_eq!(body["operation"], "GetCurrentWidget");

        let body = body_json(call(&service, "/widgets/9").await).await;
        assert_eq!(body["operation"], "GetWidget");
        assert_eq!(body["labels"]["id"][0], "9");
    }

    #[tokio::test]
    async fn test_should_capture_multiple_path_labels() {
        let service = echo_service();
        let body = body_json(call(&service, "/widgets/9/parts/lid").await).await;
        assert_eq!(body["operation"], "GetWidgetPart");
        assert_eq!(body["labels"]["id"][0], "9");
        assert_eq!(body["labels"]["part"][0], "lid");
    }

    #[tokio::test]
    async fn test_should_join_greedy_capture_with_slashes() {
        let service = echo_service();
        let body = body_json(call(&service, "/bundles/2024/stable/widget.tar").await).await;
        assert_eq!(body["operation"], "DownloadBundle");
        assert_eq!(body["labels"]["path"][0], "2024/stable/widget.tar");
    }

    #[tokio::test]
    async fn test_should_decode_percent_escapes_per_segment() {
        let service = echo_service();
        let body = body_json(call(&service, "/widgets/my%20widget").await).await;
        assert_eq!(body["operation"], "GetWidget");
        assert_eq!(body["labels"]["id"][0], "my widget");
    }

    #[tokio::test]
    async fn test_should_route_by_query_action() {
        let service = echo_service();

        let body = body_json(call(&service, "/query?Action=Describe").await).await;
        assert_eq!(body["operation"], "DescribeWidgets");

        let body =
            body_json(call(&service, "/query?Action=List&Tag=blue&Tag=red").await).await;
        assert_eq!(body["operation"], "ListTagged");
        assert_eq!(body["labels"]["tag"][0], "blue");
        assert_eq!(body["labels"]["tag"][1], "red");
    }

    #[tokio::test]
    async fn test_should_return_404_for_unknown_action() {
        let service = echo_service();
        let response = call(&service, "/query?Action=Purge").await;
        assert_eq!(response.status(), http::StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_should_return_404_with_structured_body() {
        let service = echo_service();
        let response = call(&service, "/no/such/route").await;
        assert_eq!(response.status(), http::StatusCode::NOT_FOUND);
        assert!(response.headers().contains_key("x-request-id"));

        let body = body_json(response).await;
        assert_eq!(body["__type"], "NotFound");
        assert!(body["requestId"].is_string());
    }

    #[tokio::test]
    async fn test_should_prefer_query_constrained_route() {
        let service = echo_service();

        // Both search patterns fit structurally; the required literal wins.
        let body = body_json(call(&service, "/search/all?Exact=true&Filter=x").await).await;
        assert_eq!(body["operation"], "SearchWidgetsExact");

        let body = body_json(call(&service, "/search/all?Filter=x").await).await;
        assert_eq!(body["operation"], "SearchWidgets");
        assert_eq!(body["labels"]["filter"][0], "x");
    }

    #[tokio::test]
    async fn test_should_reject_duplicated_required_query_value() {
        let service = echo_service();
        let response = call(&service, "/query?Action=Describe&Action=Describe").await;
        assert_eq!(response.status(), http::StatusCode::NOT_FOUND);
    }
}
