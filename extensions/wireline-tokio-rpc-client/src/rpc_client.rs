use crate::{ClientError, HttpTransport, Transport};
use std::sync::Arc;
use std::time::Duration;
use wireline::envelope::{
    MessageType, ProtocolKind, RemoteFault, TransportKind, build_message, read_envelope,
};
use wireline::utils::next_sequence_id;
use wireline_middleware::{MiddlewareDirection, MiddlewarePipeline, MiddlewareRegistration};
use wireline_rpc_service::{DEFAULT_RPC_PATH, RequestContext, ServiceCaller, ServiceMethod};

/// Connection and composition settings for [`create_client`].
pub struct ClientConfig {
    pub host_name: String,
    pub port: u16,

    /// URL path the server mounts its RPC handler on.
    pub path: String,

    pub transport: TransportKind,
    pub protocol: ProtocolKind,

    /// Middleware applied to every call, in registration order. This is the
    /// only configuration surface for cross-cutting behavior; nothing can
    /// be re-registered once the client exists.
    pub register: Vec<MiddlewareRegistration>,

    /// Deadline applied when the per-call context does not carry one.
    pub request_timeout: Option<Duration>,
}

impl ClientConfig {
    pub fn new(host_name: impl Into<String>, port: u16) -> Self {
        ClientConfig {
            host_name: host_name.into(),
            port,
            path: DEFAULT_RPC_PATH.to_string(),
            transport: TransportKind::Buffered,
            protocol: ProtocolKind::Binary,
            register: Vec::new(),
            request_timeout: None,
        }
    }
}

/// Builds a ready-to-call client from `config`.
pub fn create_client(config: ClientConfig) -> RpcClient {
    let transport = Arc::new(HttpTransport::new(
        &config.host_name,
        config.port,
        &config.path,
    ));
    RpcClient::with_transport(transport, config)
}

/// A decorated RPC client.
///
/// Every call wraps the encoded arguments in a call envelope, then runs the
/// configured middleware around the transport send: outgoing context
/// handlers first (after any caller-supplied context, so middleware has
/// final say), then outgoing data handlers, then, on a successful transport
/// response, incoming data handlers before the reply envelope is decoded.
/// A reply carrying a remote fault surfaces as [`ClientError::Remote`] with
/// the peer's message intact.
pub struct RpcClient {
    transport: Arc<dyn Transport>,
    pipeline: MiddlewarePipeline,
    transport_kind: TransportKind,
    protocol: ProtocolKind,
    request_timeout: Option<Duration>,
}

impl RpcClient {
    /// Builds a client over an externally supplied [`Transport`], which is
    /// how tests inject doubles. [`create_client`] is the HTTP shorthand.
    pub fn with_transport(transport: Arc<dyn Transport>, config: ClientConfig) -> Self {
        let pipeline = MiddlewarePipeline::with_registrations(
            config.transport,
            config.protocol,
            config.register,
        );
        RpcClient {
            transport,
            pipeline,
            transport_kind: config.transport,
            protocol: config.protocol,
            request_timeout: config.request_timeout,
        }
    }

    /// Calls `M` with an empty request context.
    pub async fn call<M>(&self, args: M::Args) -> Result<M::Ret, ClientError>
    where
        M: ServiceMethod,
    {
        self.call_with_context::<M>(args, RequestContext::new()).await
    }

    /// Calls `M` with caller-supplied transport options.
    pub async fn call_with_context<M>(
        &self,
        args: M::Args,
        context: RequestContext,
    ) -> Result<M::Ret, ClientError>
    where
        M: ServiceMethod,
    {
        let args_body = M::encode_args(args)?;
        let ret_body = self
            .invoke(M::NAME, args_body, context, MessageType::Call)
            .await?;
        Ok(M::decode_ret(&ret_body)?)
    }

    /// Fire-and-forget form: sends a one-way envelope and ignores whatever
    /// body the transport hands back.
    pub async fn call_one_way<M>(&self, args: M::Args) -> Result<(), ClientError>
    where
        M: ServiceMethod,
    {
        let args_body = M::encode_args(args)?;
        self.invoke(M::NAME, args_body, RequestContext::new(), MessageType::OneWay)
            .await?;
        Ok(())
    }

    async fn invoke(
        &self,
        method: &str,
        args_body: Vec<u8>,
        mut context: RequestContext,
        message_type: MessageType,
    ) -> Result<Vec<u8>, ClientError> {
        let sequence_id = next_sequence_id();
        let request = build_message(
            self.transport_kind,
            self.protocol,
            method,
            message_type,
            sequence_id,
            &args_body,
        );

        if context.timeout.is_none() {
            context.timeout = self.request_timeout;
        }
        let context = self
            .pipeline
            .run_context(MiddlewareDirection::Outgoing, method, context)
            .await?;
        let request = self
            .pipeline
            .run_data(MiddlewareDirection::Outgoing, request)
            .await?;

        tracing::trace!(%method, sequence_id, bytes = request.len(), "sending call");
        // The deadline is enforced here as well as inside the transport, so
        // injected transports that ignore the context still honor it.
        let response = match context.timeout {
            Some(deadline) => {
                tokio::time::timeout(deadline, self.transport.send(request, &context))
                    .await
                    .map_err(|_| ClientError::Timeout)??
            }
            None => self.transport.send(request, &context).await?,
        };

        if message_type == MessageType::OneWay {
            return Ok(Vec::new());
        }

        let body = self
            .pipeline
            .run_data(MiddlewareDirection::Incoming, response.body)
            .await?;

        let envelope = read_envelope(&body, self.transport_kind, self.protocol)?;
        match envelope.message_type {
            MessageType::Reply => Ok(envelope.body(&body).to_vec()),
            MessageType::Exception => {
                let fault = RemoteFault::decode(envelope.body(&body), self.protocol)?;
                tracing::debug!(%method, fault_kind = ?fault.kind, "call failed with remote fault");
                Err(ClientError::Remote(fault))
            }
            other => Err(ClientError::Envelope(
                wireline::envelope::EnvelopeError::UnexpectedMessageType(u8::from(other)),
            )),
        }
    }
}

#[async_trait::async_trait]
impl ServiceCaller for RpcClient {
    type Error = ClientError;

    async fn call_method(
        &self,
        method: &str,
        args_body: Vec<u8>,
        context: RequestContext,
    ) -> Result<Vec<u8>, ClientError> {
        self.invoke(method, args_body, context, MessageType::Call)
            .await
    }
}
