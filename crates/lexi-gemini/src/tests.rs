//! Tests for the Gemini analysis client

#[cfg(test)]
mod client_tests {
    use crate::{
        Candidate, Content, DocumentAnalyzer, ErrorKind, GeminiClient, GeminiConfig,
        GenerateContentRequest, GenerateContentResponse, GenerateTransport, Part, Result,
        USER_PROMPT_PREFIX,
    };
    use async_trait::async_trait;
    use insta::assert_yaml_snapshot;
    use lexi_core::Error;
    use serde_json::{Value, json};
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    enum Reply {
        Text(String),
        Parts(Vec<String>),
        NoCandidates,
        Status(u16),
        ConnectionRefused,
        Hang,
    }

    /// Transport that records requests and answers with a fixed reply
    struct MockTransport {
        reply: Reply,
        calls: AtomicUsize,
        requests: Mutex<Vec<Value>>,
    }

    impl MockTransport {
        fn new(reply: Reply) -> Self {
            Self {
                reply,
                calls: AtomicUsize::new(0),
                requests: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        fn last_request(&self) -> Value {
            self.requests.lock().unwrap().last().cloned().expect("request recorded")
        }
    }

    fn response_with_parts(parts: Vec<Option<String>>) -> GenerateContentResponse {
        GenerateContentResponse {
            candidates: vec![Candidate {
                content: Some(Content {
                    role: Some("model".to_string()),
                    parts: parts.into_iter().map(|text| Part { text }).collect(),
                }),
            }],
        }
    }

    #[async_trait]
    impl GenerateTransport for MockTransport {
        async fn generate(
            &self,
            _config: &GeminiConfig,
            request: &GenerateContentRequest,
        ) -> Result<GenerateContentResponse> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.requests
                .lock()
                .unwrap()
                .push(serde_json::to_value(request).unwrap());

            match &self.reply {
                Reply::Text(text) => Ok(response_with_parts(vec![Some(text.clone())])),
                Reply::Parts(parts) => Ok(response_with_parts(
                    parts.iter().cloned().map(Some).collect(),
                )),
                Reply::NoCandidates => Ok(GenerateContentResponse::default()),
                Reply::Status(status) => Err(Error::Service {
                    status: *status,
                    message: "quota exceeded".to_string(),
                }),
                Reply::ConnectionRefused => Err(Error::transport(std::io::Error::new(
                    std::io::ErrorKind::ConnectionRefused,
                    "connection refused",
                ))),
                Reply::Hang => {
                    std::future::pending::<()>().await;
                    unreachable!()
                }
            }
        }
    }

    fn valid_payload() -> String {
        json!({
            "document_analysis": {
                "summary": ["a", "b", "c"],
                "tone_check": "Neutral",
                "complexity_score": 4
            },
            "risk_matrix": {
                "high_priority": ["X"],
                "medium_priority": [],
                "low_priority": ["Y"]
            },
            "action_chips": [{ "label": "Review", "action": "Escalate" }],
            "governance_score": { "rating": 82, "esg_notes": "Strong privacy clause" }
        })
        .to_string()
    }

    fn client(reply: Reply) -> GeminiClient<MockTransport> {
        GeminiClient::with_transport(MockTransport::new(reply))
            .with_config(GeminiConfig::new("test_api_key"))
    }

    #[tokio::test]
    async fn test_analyze_returns_parsed_result() {
        let client = client(Reply::Text(valid_payload()));

        let result = client.analyze("This NDA...").await.unwrap();

        assert_eq!(result.document_analysis.tone_check, "Neutral");
        assert_eq!(result.risk_matrix.high_priority, vec!["X"]);
        assert_eq!(result.governance_score.rating, 82.0);
        assert_eq!(client.transport().calls(), 1);
    }

    #[tokio::test]
    async fn test_request_shape() {
        let client = client(Reply::Text(valid_payload()));
        client.analyze("This NDA...").await.unwrap();

        let request = client.transport().last_request();
        assert_eq!(
            request["contents"][0]["parts"][0]["text"],
            format!("{}This NDA...", USER_PROMPT_PREFIX)
        );
        assert_eq!(request["contents"][0]["role"], "user");
        assert!(
            request["systemInstruction"]["parts"][0]["text"]
                .as_str()
                .unwrap()
                .contains("Output must be strict JSON")
        );
        assert!(request["systemInstruction"].get("role").is_none());
        assert_eq!(request["generationConfig"]["responseMimeType"], "application/json");
        assert_eq!(
            request["generationConfig"]["responseSchema"]["required"],
            json!(["document_analysis", "risk_matrix", "action_chips", "governance_score"])
        );
    }

    #[tokio::test]
    async fn test_split_parts_are_joined() {
        let payload = valid_payload();
        let (head, tail) = payload.split_at(payload.len() / 2);
        let client = client(Reply::Parts(vec![head.to_string(), tail.to_string()]));

        let result = client.analyze("contract").await.unwrap();
        assert_eq!(result.action_chips[0].label, "Review");
    }

    #[tokio::test]
    async fn test_missing_credential_issues_no_request() {
        let client = GeminiClient::with_transport(MockTransport::new(Reply::Text(valid_payload())))
            .with_config(GeminiConfig::new("  "));

        let err = client.analyze("contract").await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Configuration);
        assert!(err.to_string().contains("API key is missing"));
        assert_eq!(client.transport().calls(), 0);
    }

    #[tokio::test]
    async fn test_no_candidates_is_empty_response() {
        let client = client(Reply::NoCandidates);
        let err = client.analyze("contract").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::EmptyResponse);
    }

    #[tokio::test]
    async fn test_blank_text_is_empty_response() {
        let client = client(Reply::Text("  \n".to_string()));
        let err = client.analyze("contract").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::EmptyResponse);
    }

    #[tokio::test]
    async fn test_non_json_payload_is_malformed() {
        let client = client(Reply::Text("Here is your analysis: looks fine".to_string()));
        let err = client.analyze("contract").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedResponse);
    }

    #[tokio::test]
    async fn test_missing_top_level_key_is_malformed() {
        let mut payload: Value = serde_json::from_str(&valid_payload()).unwrap();
        payload.as_object_mut().unwrap().remove("governance_score");
        let client = client(Reply::Text(payload.to_string()));

        let err = client.analyze("contract").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedResponse);
        assert!(err.to_string().contains("governance_score"));
    }

    #[tokio::test]
    async fn test_transport_failure_is_propagated_unchanged() {
        let client = client(Reply::ConnectionRefused);
        let err = client.analyze("contract").await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Transport);
        assert_eq!(err.to_string(), "connection refused");
        assert_eq!(client.transport().calls(), 1);
    }

    #[tokio::test]
    async fn test_service_status_is_transport_failure() {
        let client = client(Reply::Status(429));
        let err = client.analyze("contract").await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Transport);
        assert!(err.to_string().contains("429"));
    }

    #[tokio::test]
    async fn test_hung_request_times_out() {
        let client = GeminiClient::with_transport(MockTransport::new(Reply::Hang))
            .with_config(GeminiConfig::new("test_api_key").with_timeout_secs(0));

        let err = client.analyze("contract").await.unwrap_err();

        assert!(matches!(err, Error::Timeout(_)));
        assert_eq!(err.kind(), ErrorKind::Transport);
    }

    #[test]
    fn test_model_override() {
        let client = client(Reply::NoCandidates).with_model("gemini-2.5-pro");
        assert_eq!(client.model_id(), "gemini-2.5-pro");
    }

    #[test]
    fn test_config_snapshot() {
        let config = GeminiConfig::new("test_api_key_redacted");

        assert_yaml_snapshot!(config, @r###"
        model: gemini-3-flash-preview
        api_url: "https://generativelanguage.googleapis.com"
        timeout_secs: 30
        "###);
    }
}
