use std::{sync::Arc, time::Instant};

use async_trait::async_trait;
use rand::Rng;
use serde::Serialize;
use serde_json::Value;

use crate::{
    config::{GatewayConfig, GatewayMode},
    error::{ContextEqError, Result},
    fixtures::FixtureStore,
    types::{Ack, AnalysisResult, Embedding, SearchResult},
};

pub const DEMO_VIDEO_ID: &str = "vid_demo_001";
pub const DEFAULT_QUERY: &str = "sports";
pub const EMBEDDING_DIM: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Analyze,
    Search,
    Embed,
}

impl Operation {
    /// Case-insensitive; `None` for names the gateway does not know.
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "analyze" => Some(Operation::Analyze),
            "search" => Some(Operation::Search),
            "embed" => Some(Operation::Embed),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Analyze => "analyze",
            Operation::Search => "search",
            Operation::Embed => "embed",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalyzeRequest {
    pub video_id: String,
    pub tasks: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchRequest {
    pub video_id: String,
    pub query: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmbedRequest {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Request {
    Analyze(AnalyzeRequest),
    Search(SearchRequest),
    Embed(EmbedRequest),
}

impl Request {
    pub fn analyze(video_id: impl Into<String>, tasks: &[&str]) -> Self {
        Request::Analyze(AnalyzeRequest {
            video_id: video_id.into(),
            tasks: tasks.iter().map(|t| t.to_string()).collect(),
        })
    }

    pub fn search(video_id: impl Into<String>, query: impl Into<String>) -> Self {
        Request::Search(SearchRequest {
            video_id: video_id.into(),
            query: query.into(),
        })
    }

    pub fn embed(text: impl Into<String>) -> Self {
        Request::Embed(EmbedRequest { text: text.into() })
    }

    /// Builds a request from a loose JSON payload, filling gaps with demo defaults.
    pub fn from_payload(operation: Operation, payload: &Value) -> Self {
        let field = |key: &str| payload.get(key).and_then(Value::as_str);
        let video_id = field("video_id").unwrap_or(DEMO_VIDEO_ID).to_string();
        match operation {
            Operation::Analyze => {
                let tasks = payload
                    .get("tasks")
                    .and_then(Value::as_array)
                    .map(|tasks| {
                        tasks
                            .iter()
                            .filter_map(Value::as_str)
                            .map(str::to_string)
                            .collect()
                    })
                    .unwrap_or_default();
                Request::Analyze(AnalyzeRequest { video_id, tasks })
            }
            Operation::Search => Request::Search(SearchRequest {
                video_id,
                query: field("query").unwrap_or(DEFAULT_QUERY).to_string(),
            }),
            Operation::Embed => Request::embed(field("text").unwrap_or_default()),
        }
    }

    pub fn operation(&self) -> Operation {
        match self {
            Request::Analyze(_) => Operation::Analyze,
            Request::Search(_) => Operation::Search,
            Request::Embed(_) => Operation::Embed,
        }
    }

    pub fn body(&self) -> Result<Value> {
        let body = match self {
            Request::Analyze(req) => serde_json::to_value(req)?,
            Request::Search(req) => serde_json::to_value(req)?,
            Request::Embed(req) => serde_json::to_value(req)?,
        };
        Ok(body)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Response {
    Analysis(AnalysisResult),
    Search(SearchResult),
    Embedding(Embedding),
    Ack(Ack),
}

impl Response {
    pub fn into_analysis(self) -> Result<AnalysisResult> {
        match self {
            Response::Analysis(res) => Ok(res),
            other => Err(other.mismatch(Operation::Analyze)),
        }
    }

    pub fn into_search(self) -> Result<SearchResult> {
        match self {
            Response::Search(res) => Ok(res),
            other => Err(other.mismatch(Operation::Search)),
        }
    }

    pub fn into_embedding(self) -> Result<Embedding> {
        match self {
            Response::Embedding(res) => Ok(res),
            other => Err(other.mismatch(Operation::Embed)),
        }
    }

    fn mismatch(&self, operation: Operation) -> ContextEqError {
        let got = match self {
            Response::Analysis(_) => "analysis",
            Response::Search(_) => "search",
            Response::Embedding(_) => "embedding",
            Response::Ack(_) => "ack",
        };
        ContextEqError::UnexpectedResponse {
            operation: operation.as_str(),
            reason: format!("got {got} response"),
        }
    }
}

/// Where a gateway sends its requests.
#[async_trait]
pub trait Backend: Send + Sync {
    async fn handle(&self, request: &Request) -> Result<Response>;
}

pub struct FixtureBackend {
    store: &'static FixtureStore,
}

impl FixtureBackend {
    pub fn new() -> Self {
        Self {
            store: FixtureStore::builtin(),
        }
    }
}

impl Default for FixtureBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Backend for FixtureBackend {
    async fn handle(&self, request: &Request) -> Result<Response> {
        let response = match request {
            Request::Analyze(_) => Response::Analysis(self.store.analysis()),
            Request::Search(req) => {
                let mut res = self.store.search();
                res.query = req.query.clone();
                Response::Search(res)
            }
            Request::Embed(_) => {
                let mut rng = rand::rng();
                let vector = (0..EMBEDDING_DIM).map(|_| rng.random::<f64>()).collect();
                Response::Embedding(Embedding { vector })
            }
        };
        Ok(response)
    }
}

/// Forwards requests as JSON POSTs to `{api_url}/{operation}`.
pub struct HttpBackend {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
}

impl HttpBackend {
    pub fn new(api_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), api_url, api_key)
    }

    pub fn with_client(
        client: reqwest::Client,
        api_url: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            client,
            api_url: api_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }
}

#[async_trait]
impl Backend for HttpBackend {
    async fn handle(&self, request: &Request) -> Result<Response> {
        let operation = request.operation();
        let url = format!("{}/{}", self.api_url, operation.as_str());

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&request.body()?)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ContextEqError::BackendStatus {
                operation: operation.as_str(),
                status: status.as_u16(),
                body: response.text().await.unwrap_or_default(),
            });
        }

        let payload = response.json::<Value>().await?;
        if !payload.is_object() {
            return Err(ContextEqError::UnexpectedResponse {
                operation: operation.as_str(),
                reason: format!("expected a JSON object, got {payload}"),
            });
        }

        let decoded = match request {
            Request::Analyze(_) => {
                let mut res: AnalysisResult = serde_json::from_value(payload)?;
                res.brand_safety_score = clamp_score(res.brand_safety_score);
                Response::Analysis(res)
            }
            Request::Search(req) => {
                let mut res: SearchResult = serde_json::from_value(payload)?;
                if res.query.is_empty() {
                    res.query = req.query.clone();
                }
                for m in &mut res.matches {
                    m.confidence = clamp_score(m.confidence);
                }
                Response::Search(res)
            }
            Request::Embed(_) => {
                let mut res: Embedding = serde_json::from_value(payload)?;
                for v in &mut res.vector {
                    *v = clamp_unit(*v);
                }
                Response::Embedding(res)
            }
        };
        Ok(decoded)
    }
}

fn clamp_score(v: f64) -> f64 {
    if v.is_nan() {
        0.0
    } else {
        v.clamp(0.0, 1.0)
    }
}

fn clamp_unit(v: f64) -> f64 {
    if v.is_nan() {
        0.0
    } else {
        v.clamp(0.0, 1.0 - f64::EPSILON)
    }
}

/// Single entry point for every video-intelligence call.
#[derive(Clone)]
pub struct Gateway {
    config: GatewayConfig,
    backend: Arc<dyn Backend>,
}

impl Gateway {
    pub fn new(config: GatewayConfig) -> Self {
        let backend: Arc<dyn Backend> = match (config.mode, &config.credentials) {
            (GatewayMode::Live, Some(key)) => Arc::new(HttpBackend::new(&config.api_url, key)),
            _ => Arc::new(FixtureBackend::new()),
        };
        Self { config, backend }
    }

    pub fn with_backend(config: GatewayConfig, backend: Arc<dyn Backend>) -> Self {
        Self { config, backend }
    }

    pub fn mode(&self) -> GatewayMode {
        self.config.mode
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    pub async fn invoke(&self, request: Request) -> Result<Response> {
        let operation = request.operation();
        let started = Instant::now();
        tracing::debug!(operation = operation.as_str(), mode = %self.config.mode, "gateway call");

        if self.config.mode == GatewayMode::Fixture && !self.config.latency.is_zero() {
            tokio::time::sleep(self.config.latency).await;
        }

        let result = self.backend.handle(&request).await;
        match &result {
            Ok(_) => tracing::info!(
                operation = operation.as_str(),
                mode = %self.config.mode,
                elapsed_ms = started.elapsed().as_millis() as u64,
                "gateway call finished"
            ),
            Err(e) => tracing::warn!(
                operation = operation.as_str(),
                mode = %self.config.mode,
                error = %e,
                "gateway call failed"
            ),
        }
        result
    }

    /// String-facing variant. Unknown operations are acknowledged without a call.
    pub async fn invoke_named(&self, operation: &str, payload: &Value) -> Result<Response> {
        let Some(op) = Operation::parse(operation) else {
            tracing::debug!(operation, "unknown operation acknowledged");
            return Ok(Response::Ack(Ack::default()));
        };
        self.invoke(Request::from_payload(op, payload)).await
    }

    pub async fn analyze(&self, video_id: &str, tasks: &[&str]) -> Result<AnalysisResult> {
        self.invoke(Request::analyze(video_id, tasks))
            .await?
            .into_analysis()
    }

    pub async fn search(&self, video_id: &str, query: &str) -> Result<SearchResult> {
        self.invoke(Request::search(video_id, query))
            .await?
            .into_search()
    }

    pub async fn embed(&self, text: &str) -> Result<Embedding> {
        self.invoke(Request::embed(text)).await?.into_embedding()
    }
}
