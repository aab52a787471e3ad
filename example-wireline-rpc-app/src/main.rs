use example_wireline_rpc_service_definition::methods::{Add, AddWithContext, EchoString};
use std::sync::Arc;
use tokio::join;
use wireline_middleware::{MiddlewareDirection, MiddlewareRegistration};
use wireline_rpc_service::{MethodCall, RequestContext};
use wireline_tokio_rpc_client::{ClientConfig, create_client};
use wireline_tokio_rpc_server::{RpcServer, ServerConfig, utils::bind_random_port};
use wireline_tracing::{
    TracerConfig, TracerRegistry, TracingLayer, trace_propagation_middleware,
};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    // One registry for the whole process; both sides pull their tracer
    // from it by service name.
    let registry = Arc::new(TracerRegistry::new());

    let (listener, address) = bind_random_port().await.unwrap();

    {
        let tracer = registry.get_tracer_for_service(
            "calculator-server",
            &TracerConfig {
                debug: true,
                ..TracerConfig::default()
            },
        );
        let config = ServerConfig::default();
        let server = RpcServer::new(ServerConfig {
            tracing: Some(TracingLayer::new(tracer, config.transport, config.protocol)),
            ..config
        });
        let endpoint = server.endpoint();

        // Note: if not using `join!`, each registration must be awaited.
        let _ = join!(
            endpoint.register_method::<Add, _, _>(|(left, right), _context| async move {
                Ok(left + right)
            }),
            endpoint.register_method::<EchoString, _, _>(|text, _context| async move { Ok(text) }),
            endpoint.register_method::<AddWithContext, _, _>(|(left, right), context| async move {
                if context.header("X-Fake-Token") == Some("fake-token") {
                    Ok(left + right)
                } else {
                    Err("Unauthorized".into())
                }
            }),
        );

        tokio::spawn(async move {
            let _ = server.serve_with_listener(listener).await;
        });
    }

    {
        // Wait briefly for the server to start.
        tokio::time::sleep(std::time::Duration::from_millis(200)).await;

        let tracer = registry.get_tracer_for_service(
            "calculator-client",
            &TracerConfig {
                debug: true,
                ..TracerConfig::default()
            },
        );
        let client = create_client(ClientConfig {
            register: vec![
                trace_propagation_middleware(tracer),
                MiddlewareRegistration::context(
                    MiddlewareDirection::Outgoing,
                    |context: RequestContext| async move {
                        Ok(context.with_header("X-Fake-Token", "fake-token"))
                    },
                )
                .for_methods(["addWithContext"]),
            ],
            ..ClientConfig::new(address.ip().to_string(), address.port())
        });

        let (res1, res2, res3) = join!(
            Add::call(&client, (5, 7)),
            EchoString::call(&client, "hello over the wire".to_string()),
            AddWithContext::call(&client, (30, 12)),
        );

        println!("Result from add(): {res1:?}");
        println!("Result from echoString(): {res2:?}");
        println!("Result from addWithContext(): {res3:?}");
    }
}
