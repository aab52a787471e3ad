use crate::ServiceEndpoint;
use axum::{
    Router,
    extract::State,
    http::{HeaderMap, Method, StatusCode, Uri},
    response::IntoResponse,
    routing::post,
};
use bytes::Bytes;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::net::{TcpListener, ToSocketAddrs};
use wireline::envelope::{
    MessageType, ProtocolKind, RemoteFault, RemoteFaultKind, TransportKind, build_message,
    read_envelope,
};
use wireline_middleware::{MiddlewareDirection, MiddlewarePipeline, MiddlewareRegistration};
use wireline_rpc_service::{DEFAULT_RPC_PATH, RequestContext, normalize_headers};
use wireline_tracing::TracingLayer;

/// Composition settings for an [`RpcServer`].
pub struct ServerConfig {
    /// URL path the RPC handler mounts on.
    pub path: String,

    pub transport: TransportKind,
    pub protocol: ProtocolKind,

    /// Middleware applied to every request, in registration order.
    pub register: Vec<MiddlewareRegistration>,

    /// Inbound tracing hook; `None` disables tracing entirely.
    pub tracing: Option<TracingLayer>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            path: DEFAULT_RPC_PATH.to_string(),
            transport: TransportKind::Buffered,
            protocol: ProtocolKind::Binary,
            register: Vec::new(),
            tracing: None,
        }
    }
}

impl ServerConfig {
    pub fn new() -> Self {
        ServerConfig::default()
    }
}

struct ServerState {
    endpoint: Arc<ServiceEndpoint>,
    pipeline: MiddlewarePipeline,
    transport: TransportKind,
    protocol: ProtocolKind,
    tracing: Option<TracingLayer>,
}

/// An RPC server decorating an axum HTTP service.
///
/// Each POST to the configured path flows through header normalization,
/// the inbound tracing hook, incoming data middleware, envelope decode,
/// handler dispatch, the reply (or fault) envelope, and outgoing data
/// middleware, in that order. Handler failures and unknown methods answer
/// HTTP 200 with an exception envelope (they are protocol-level results,
/// not transport failures), while undecodable requests answer 400 and
/// middleware rejections 500.
pub struct RpcServer {
    state: Arc<ServerState>,
    path: String,
}

impl RpcServer {
    pub fn new(config: ServerConfig) -> Self {
        let pipeline = MiddlewarePipeline::with_registrations(
            config.transport,
            config.protocol,
            config.register,
        );
        RpcServer {
            state: Arc::new(ServerState {
                endpoint: Arc::new(ServiceEndpoint::new()),
                pipeline,
                transport: config.transport,
                protocol: config.protocol,
                tracing: config.tracing,
            }),
            path: config.path,
        }
    }

    /// Returns an `Arc` clone of the underlying service endpoint, so
    /// handler registration is not tied to the server value itself.
    pub fn endpoint(&self) -> Arc<ServiceEndpoint> {
        self.state.endpoint.clone()
    }

    /// Binds to an address and starts serving.
    pub async fn serve<A: ToSocketAddrs>(
        self,
        addr: A,
    ) -> Result<std::net::SocketAddr, axum::BoxError> {
        let listener = TcpListener::bind(addr).await?;
        self.serve_with_listener(listener).await
    }

    /// Convenience wrapper around [`RpcServer::serve`] for a host/port pair.
    pub async fn serve_on(
        self,
        host: &str,
        port: u16,
    ) -> Result<std::net::SocketAddr, axum::BoxError> {
        self.serve(format!("{host}:{port}")).await
    }

    /// Starts serving on a pre-bound listener. Useful for binding to an
    /// ephemeral port first and reading the address back.
    pub async fn serve_with_listener(
        self,
        listener: TcpListener,
    ) -> Result<std::net::SocketAddr, axum::BoxError> {
        let address = listener.local_addr()?;
        let app = Router::new()
            .route(&self.path, post(Self::handle_request))
            .with_state(self.state.clone());
        tracing::info!(%address, path = %self.path, "RPC server listening");
        axum::serve(listener, app).await?;
        Ok(address)
    }

    async fn handle_request(
        State(state): State<Arc<ServerState>>,
        method: Method,
        uri: Uri,
        header_map: HeaderMap,
        body: Bytes,
    ) -> impl IntoResponse {
        let headers = normalize_headers(
            header_map
                .iter()
                .filter_map(|(name, value)| {
                    value
                        .to_str()
                        .ok()
                        .map(|value| (name.as_str().to_string(), value.to_string()))
                })
                .collect::<HashMap<String, String>>(),
        );

        let trace_record = state
            .tracing
            .as_ref()
            .map(|layer| layer.begin(&body, method.as_str(), &uri.to_string(), &headers));

        let (status, payload) = state.process(body.to_vec(), headers).await;

        if let (Some(layer), Some(record)) = (&state.tracing, trace_record) {
            layer.finish(record, status.as_u16());
        }
        (status, payload)
    }
}

impl ServerState {
    async fn process(
        &self,
        body: Vec<u8>,
        headers: HashMap<String, String>,
    ) -> (StatusCode, Vec<u8>) {
        let context = RequestContext {
            headers,
            timeout: None,
        };

        let body = match self
            .pipeline
            .run_data(MiddlewareDirection::Incoming, body)
            .await
        {
            Ok(body) => body,
            Err(err) => {
                tracing::error!(%err, "inbound middleware rejected request");
                return (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    err.to_string().into_bytes(),
                );
            }
        };

        let envelope = match read_envelope(&body, self.transport, self.protocol) {
            Ok(envelope) => envelope,
            Err(err) => {
                tracing::error!(%err, "undecodable request envelope");
                return (StatusCode::BAD_REQUEST, err.to_string().into_bytes());
            }
        };

        let args = envelope.body(&body).to_vec();
        match envelope.message_type {
            MessageType::Call => {}
            MessageType::OneWay => {
                if let Some(Err(err)) = self
                    .endpoint
                    .dispatch(&envelope.method_name, args, context)
                    .await
                {
                    tracing::error!(method = %envelope.method_name, %err, "one-way handler failed");
                }
                return (StatusCode::OK, Vec::new());
            }
            other => {
                return (
                    StatusCode::BAD_REQUEST,
                    format!("expected a call envelope, got {other:?}").into_bytes(),
                );
            }
        }

        let reply_body = match self
            .endpoint
            .dispatch(&envelope.method_name, args, context)
            .await
        {
            None => {
                tracing::warn!(method = %envelope.method_name, "call to unregistered method");
                let fault = RemoteFault::new(
                    RemoteFaultKind::UnknownMethod,
                    format!("Unknown method name: {}", envelope.method_name),
                );
                return (StatusCode::OK, self.fault_reply(&envelope, &fault));
            }
            Some(Err(err)) => {
                let fault = RemoteFault::new(RemoteFaultKind::InternalError, err.to_string());
                return (StatusCode::OK, self.fault_reply(&envelope, &fault));
            }
            Some(Ok(bytes)) => bytes,
        };

        let reply = build_message(
            self.transport,
            self.protocol,
            &envelope.method_name,
            MessageType::Reply,
            envelope.sequence_id,
            &reply_body,
        );
        match self
            .pipeline
            .run_data(MiddlewareDirection::Outgoing, reply)
            .await
        {
            Ok(reply) => (StatusCode::OK, reply),
            Err(err) => {
                tracing::error!(%err, "outbound middleware rejected reply");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    err.to_string().into_bytes(),
                )
            }
        }
    }

    fn fault_reply(
        &self,
        envelope: &wireline::envelope::WireMessageEnvelope,
        fault: &RemoteFault,
    ) -> Vec<u8> {
        build_message(
            self.transport,
            self.protocol,
            &envelope.method_name,
            MessageType::Exception,
            envelope.sequence_id,
            &fault.encode(self.protocol),
        )
    }
}
