//! Concurrent use of one frozen tree from many tasks.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use corridor_router::{ParsedUri, PatternTree, UriPattern};

    use crate::{body_json, call, echo_service};

    fn shared_tree() -> Arc<PatternTree<String>> {
        let mut tree = PatternTree::new();
        for template in ["widgets/{id}", "widgets/current", "bundles/{path+}"] {
            tree.insert(
                UriPattern::parse(template).expect("valid template"),
                template.to_owned(),
            )
            .expect("no conflicts");
        }
        Arc::new(tree)
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_should_route_concurrently_against_one_tree() {
        let tree = shared_tree();

        let mut handles = Vec::new();
        for index in 0..32 {
            let tree = Arc::clone(&tree);
            handles.push(tokio::spawn(async move {
                let request = ParsedUri::parse(&format!("/widgets/{index}"), None, false);
                let matched = tree.route(&request).expect("should match");
                assert_eq!(matched.payload(), "widgets/{id}");
                assert_eq!(matched.labels().get("id"), Some(format!("{index}").as_str()));
            }));
        }
        for handle in handles {
            handle.await.expect("task should not panic");
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_should_serve_concurrent_requests_through_service() {
        let service = echo_service();

        let mut handles = Vec::new();
        for index in 0..16 {
            let service = service.clone();
            handles.push(tokio::spawn(async move {
                let body =
                    body_json(call(&service, &format!("/widgets/{index}/parts/lid")).await).await;
                assert_eq!(body["operation"], "GetWidgetPart");
                assert_eq!(body["labels"]["id"][0], format!("{index}"));
            }));
        }
        for handle in handles {
            handle.await.expect("task should not panic");
        }
    }
}
