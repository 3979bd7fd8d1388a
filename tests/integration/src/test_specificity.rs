//! Router-level tests over adversarial, ambiguous pattern sets.

#[cfg(test)]
mod tests {
    use corridor_http::schema::ServiceSchema;
    use corridor_router::{ParsedUri, PatternTree, UriPattern};

    fn tree(templates: &[&str]) -> PatternTree<String> {
        let mut tree = PatternTree::new();
        for template in templates {
            tree.insert(
                UriPattern::parse(template).expect("valid template"),
                (*template).to_owned(),
            )
            .expect("no conflicts");
        }
        tree
    }

    fn uri(raw: &str) -> ParsedUri {
        let (path, query) = match raw.split_once('?') {
            Some((path, query)) => (path, Some(query)),
            None => (raw, None),
        };
        ParsedUri::parse(path, query, false)
    }

    #[test]
    fn test_should_backtrack_across_multiple_depths() {
        let tree = tree(&["a/b/c/d", "a/{w}/c/e", "{x}/b/{y}/e"]);

        // The literal chain a -> b -> c dead-ends at d; the winner rebinds
        // b through the label inside the `a` subtree, which short-circuits
        // before the root-level label branch is consulted.
        let request = uri("/a/b/c/e");
        let matched = tree.route(&request).expect("should match");
        assert_eq!(matched.payload(), "a/{w}/c/e");
        assert_eq!(matched.labels().get("w"), Some("b"));

        let request = uri("/a/b/c/d");
        assert_eq!(tree.route(&request).expect("should match").payload(), "a/b/c/d");

        let request = uri("/z/b/q/e");
        let matched = tree.route(&request).expect("should match");
        assert_eq!(matched.payload(), "{x}/b/{y}/e");
        assert_eq!(matched.labels().get("x"), Some("z"));
        assert_eq!(matched.labels().get("y"), Some("q"));
    }

    #[test]
    fn test_should_prefer_literal_subtree_over_greedy() {
        let tree = tree(&["files/{path+}", "files/archive/{name}"]);

        let request = uri("/files/archive/x");
        let matched = tree.route(&request).expect("should match");
        assert_eq!(matched.payload(), "files/archive/{name}");

        let request = uri("/files/other/x");
        let matched = tree.route(&request).expect("should match");
        assert_eq!(matched.payload(), "files/{path+}");
        assert_eq!(matched.labels().get("path"), Some("other/x"));
    }

    #[test]
    fn test_should_let_greedy_absorb_literal_lookalikes() {
        let tree = tree(&["files/{path+}"]);

        // Segments that look like other routes are still plain greedy fuel.
        let request = uri("/files/files/files");
        let matched = tree.route(&request).expect("should match");
        assert_eq!(matched.labels().get("path"), Some("files/files"));
    }

    #[test]
    fn test_should_rank_query_literals_above_label_only_query() {
        let tree = tree(&["r/{id}?Mode={mode}", "r/{id}?Mode=strict"]);

        let request = uri("/r/7?Mode=strict");
        let matched = tree.route(&request).expect("should match");
        assert_eq!(matched.payload(), "r/{id}?Mode=strict");
        assert_eq!(matched.query_rank(), 1);

        let request = uri("/r/7?Mode=loose");
        let matched = tree.route(&request).expect("should match");
        assert_eq!(matched.payload(), "r/{id}?Mode={mode}");
        assert_eq!(matched.labels().get("mode"), Some("loose"));
    }

    #[test]
    fn test_should_propagate_no_match_through_every_branch() {
        let tree = tree(&["a/b", "a/{x}/c", "files/{path+}"]);

        for raw in ["/a", "/a/b/c/d", "/b/a", "/files"] {
            let request = uri(raw);
            assert!(tree.route(&request).is_none(), "unexpected match for {raw}");
        }
    }

    #[test]
    fn test_should_route_identically_across_repeated_calls() {
        let tree = tree(&["widgets/{id}", "widgets/current", "query?Action=Get"]);
        let request = uri("/widgets/current");

        let payloads: Vec<String> = (0..5)
            .map(|_| tree.route(&request).expect("should match").payload().clone())
            .collect();
        assert!(payloads.iter().all(|p| p == "widgets/current"));
    }

    #[test]
    fn test_should_reject_structurally_identical_registrations() {
        let schema = ServiceSchema::new("Ambiguous")
            .operation("First", "r/{id}?Action=Get")
            .operation("Second", "r/{other}?Action=Get");

        let err = schema.compile().expect_err("conflict should be rejected");
        assert_eq!(err.operation, "Second");
    }

    #[test]
    fn test_should_keep_distinct_query_shapes_apart() {
        let schema = ServiceSchema::new("Disambiguated")
            .operation("Get", "r/{id}?Action=Get")
            .operation("List", "r/{id}?Action=List")
            .operation("Plain", "r/{id}");

        let tree = schema.compile().expect("distinct shapes should compile");

        let request = uri("/r/1?Action=List");
        let matched = tree.route(&request).expect("should match");
        assert_eq!(matched.payload().name, "List");

        let request = uri("/r/1");
        assert_eq!(tree.route(&request).expect("should match").payload().name, "Plain");
    }
}
