use axum::{Router, http::StatusCode, routing::post};
use example_wireline_rpc_service_definition::methods::{
    Add, AddWide, AddWithContext, EchoBinary, EchoString, Ping,
};
use std::net::SocketAddr;
use std::time::Duration;
use wireline::envelope::{ProtocolKind, TransportKind, read_method_name};
use wireline::wide_int::WideInt;
use wireline_middleware::{MiddlewareDirection, MiddlewareRegistration};
use wireline_rpc_service::{MethodCall, RequestContext};
use wireline_tokio_rpc_client::{ClientConfig, ClientError, RpcClient, create_client};
use wireline_tokio_rpc_server::{RpcServer, ServerConfig, utils::bind_random_port};

/// Spins up a server with the full calculator method set and returns its
/// bound address.
async fn start_test_server(transport: TransportKind, protocol: ProtocolKind) -> SocketAddr {
    let (listener, address) = bind_random_port().await.unwrap();

    let server = RpcServer::new(ServerConfig {
        transport,
        protocol,
        ..ServerConfig::default()
    });
    let endpoint = server.endpoint();

    endpoint
        .register_method::<Add, _, _>(|(left, right), _context| async move { Ok(left + right) })
        .await
        .unwrap();
    endpoint
        .register_method::<AddWithContext, _, _>(|(left, right), context| async move {
            if context.header("X-Fake-Token") == Some("fake-token") {
                Ok(left + right)
            } else {
                Err("Unauthorized".into())
            }
        })
        .await
        .unwrap();
    endpoint
        .register_method::<EchoBinary, _, _>(|data, _context| async move {
            String::from_utf8(data).map_err(|e| e.into())
        })
        .await
        .unwrap();
    endpoint
        .register_method::<EchoString, _, _>(|text, _context| async move { Ok(text) })
        .await
        .unwrap();
    endpoint
        .register_method::<Ping, _, _>(|_args, _context| async move { Ok(()) })
        .await
        .unwrap();
    endpoint
        .register_method::<AddWide, _, _>(|(left, right), _context| async move {
            let left = WideInt::from_decimal_string(&left)?;
            let right = WideInt::from_decimal_string(&right)?;
            let sum = left
                .to_native()
                .checked_add(right.to_native())
                .ok_or("sum does not fit in 64 bits")?;
            Ok(WideInt::from_native(sum).to_decimal_string())
        })
        .await
        .unwrap();

    tokio::spawn(async move {
        let _ = server.serve_with_listener(listener).await;
    });
    tokio::time::sleep(Duration::from_millis(100)).await;
    address
}

fn client_for(address: SocketAddr, register: Vec<MiddlewareRegistration>) -> RpcClient {
    create_client(ClientConfig {
        register,
        ..ClientConfig::new(address.ip().to_string(), address.port())
    })
}

#[tokio::test]
async fn test_add_resolves_without_middleware() {
    let address = start_test_server(TransportKind::Buffered, ProtocolKind::Binary).await;
    let client = client_for(address, Vec::new());

    let result = client.call::<Add>((5, 7)).await.unwrap();
    assert_eq!(result, 12);
}

#[tokio::test]
async fn test_method_call_sugar() {
    let address = start_test_server(TransportKind::Buffered, ProtocolKind::Binary).await;
    let client = client_for(address, Vec::new());

    assert_eq!(Add::call(&client, (5, 7)).await.unwrap(), 12);
}

#[tokio::test]
async fn test_void_call() {
    let address = start_test_server(TransportKind::Buffered, ProtocolKind::Binary).await;
    let client = client_for(address, Vec::new());

    client.call::<Ping>(()).await.unwrap();
}

#[tokio::test]
async fn test_one_way_call_resolves_without_reading_a_reply() {
    let address = start_test_server(TransportKind::Buffered, ProtocolKind::Binary).await;
    let client = client_for(address, Vec::new());

    client.call_one_way::<Add>((5, 7)).await.unwrap();
}

#[tokio::test]
async fn test_echo_binary() {
    let address = start_test_server(TransportKind::Buffered, ProtocolKind::Binary).await;
    let client = client_for(address, Vec::new());

    let result = client
        .call::<EchoBinary>(b"test_binary".to_vec())
        .await
        .unwrap();
    assert_eq!(result, "test_binary");
}

#[tokio::test]
async fn test_echo_string() {
    let address = start_test_server(TransportKind::Buffered, ProtocolKind::Binary).await;
    let client = client_for(address, Vec::new());

    let result = client
        .call::<EchoString>("test_string".to_string())
        .await
        .unwrap();
    assert_eq!(result, "test_string");
}

#[tokio::test]
async fn test_add_wide_decimal_strings() {
    let address = start_test_server(TransportKind::Buffered, ProtocolKind::Binary).await;
    let client = client_for(address, Vec::new());

    let result = client
        .call::<AddWide>(("9837756439".to_string(), "1".to_string()))
        .await
        .unwrap();
    assert_eq!(result, "9837756440");

    let result = client
        .call::<AddWide>(("-5".to_string(), "-7".to_string()))
        .await
        .unwrap();
    assert_eq!(result, "-12");
}

#[tokio::test]
async fn test_framed_compact_round_trip() {
    let address = start_test_server(TransportKind::Framed, ProtocolKind::Compact).await;
    let client = create_client(ClientConfig {
        transport: TransportKind::Framed,
        protocol: ProtocolKind::Compact,
        ..ClientConfig::new(address.ip().to_string(), address.port())
    });

    assert_eq!(client.call::<Add>((5, 7)).await.unwrap(), 12);
    assert_eq!(
        client
            .call::<EchoString>("framed compact".to_string())
            .await
            .unwrap(),
        "framed compact"
    );
}

#[tokio::test]
async fn test_unknown_method_surfaces_remote_fault() {
    let (listener, address) = bind_random_port().await.unwrap();
    let server = RpcServer::new(ServerConfig::default());
    server
        .endpoint()
        .register_method::<Add, _, _>(|(left, right), _context| async move { Ok(left + right) })
        .await
        .unwrap();
    tokio::spawn(async move {
        let _ = server.serve_with_listener(listener).await;
    });
    tokio::time::sleep(Duration::from_millis(100)).await;

    let client = client_for(address, Vec::new());
    let err = client
        .call::<EchoString>("hello".to_string())
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::Remote(_)));
    assert_eq!(err.to_string(), "Unknown method name: echoString");
}

#[tokio::test]
async fn test_500_response_preserves_status_code() {
    let app = Router::new().route("/rpc", post(|| async { StatusCode::INTERNAL_SERVER_ERROR }));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    tokio::time::sleep(Duration::from_millis(100)).await;

    let client = client_for(address, Vec::new());
    let err = client.call::<Add>((5, 7)).await.unwrap_err();

    assert!(matches!(err, ClientError::Transport { status_code: 500 }));
    assert_eq!(err.status_code(), Some(500));
}

#[tokio::test]
async fn test_400_response_preserves_status_code() {
    let app = Router::new().route("/rpc", post(|| async { StatusCode::BAD_REQUEST }));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    tokio::time::sleep(Duration::from_millis(100)).await;

    let client = client_for(address, Vec::new());
    let err = client.call::<Add>((5, 7)).await.unwrap_err();

    assert_eq!(err.status_code(), Some(400));
}

#[tokio::test]
async fn test_unresolvable_host_names_the_host() {
    let client = create_client(ClientConfig::new("fakehost.invalid", 8080));
    let err = client.call::<Add>((5, 7)).await.unwrap_err();

    match err {
        ClientError::Network { ref message } => {
            assert!(
                message.contains("fakehost.invalid"),
                "message should name the host: {message}"
            );
        }
        other => panic!("expected a network failure, got {other:?}"),
    }
}

#[tokio::test]
async fn test_incoming_middleware_allows_matching_method() {
    let address = start_test_server(TransportKind::Buffered, ProtocolKind::Binary).await;
    let client = client_for(
        address,
        vec![MiddlewareRegistration::data(
            MiddlewareDirection::Incoming,
            |data: Vec<u8>| async move {
                let method =
                    read_method_name(&data, TransportKind::Buffered, ProtocolKind::Binary)?;
                if method == "add" {
                    Ok(data)
                } else {
                    Err(format!("Unrecognized method name: {method}").into())
                }
            },
        )],
    );

    assert_eq!(client.call::<Add>((5, 7)).await.unwrap(), 12);
}

#[tokio::test]
async fn test_incoming_middleware_with_method_filter() {
    let address = start_test_server(TransportKind::Buffered, ProtocolKind::Binary).await;
    let client = client_for(
        address,
        vec![
            MiddlewareRegistration::data(MiddlewareDirection::Incoming, |data: Vec<u8>| async move {
                let method =
                    read_method_name(&data, TransportKind::Buffered, ProtocolKind::Binary)?;
                if method == "add" {
                    Ok(data)
                } else {
                    Err(format!("Unrecognized method name: {method}").into())
                }
            })
            .for_methods(["add"]),
        ],
    );

    assert_eq!(client.call::<Add>((5, 7)).await.unwrap(), 12);
}

#[tokio::test]
async fn test_incoming_middleware_rejection_message_is_verbatim() {
    let address = start_test_server(TransportKind::Buffered, ProtocolKind::Binary).await;
    let client = client_for(
        address,
        vec![MiddlewareRegistration::data(
            MiddlewareDirection::Incoming,
            |data: Vec<u8>| async move {
                let method =
                    read_method_name(&data, TransportKind::Buffered, ProtocolKind::Binary)?;
                if method == "nope" {
                    Ok(data)
                } else {
                    Err(format!("Unrecognized method name: {method}").into())
                }
            },
        )],
    );

    let err = client.call::<Add>((5, 7)).await.unwrap_err();
    assert!(matches!(err, ClientError::Middleware { .. }));
    assert_eq!(err.to_string(), "Unrecognized method name: add");
}

#[tokio::test]
async fn test_incoming_middleware_skipped_by_method_filter() {
    let address = start_test_server(TransportKind::Buffered, ProtocolKind::Binary).await;
    let client = client_for(
        address,
        vec![
            MiddlewareRegistration::data(MiddlewareDirection::Incoming, |_data: Vec<u8>| async {
                Err("this handler must never run".into())
            })
            .for_methods(["nope"]),
        ],
    );

    assert_eq!(client.call::<Add>((5, 7)).await.unwrap(), 12);
}

#[tokio::test]
async fn test_outgoing_middleware_injects_auth_token() {
    let address = start_test_server(TransportKind::Buffered, ProtocolKind::Binary).await;
    let client = client_for(
        address,
        vec![MiddlewareRegistration::context(
            MiddlewareDirection::Outgoing,
            |context: RequestContext| async move {
                Ok(context.with_header("X-Fake-Token", "fake-token"))
            },
        )],
    );

    assert_eq!(client.call::<AddWithContext>((5, 7)).await.unwrap(), 12);
}

#[tokio::test]
async fn test_outgoing_middleware_with_matching_filter() {
    let address = start_test_server(TransportKind::Buffered, ProtocolKind::Binary).await;
    let client = client_for(
        address,
        vec![
            MiddlewareRegistration::context(
                MiddlewareDirection::Outgoing,
                |context: RequestContext| async move {
                    Ok(context.with_header("X-Fake-Token", "fake-token"))
                },
            )
            .for_methods(["addWithContext"]),
        ],
    );

    assert_eq!(client.call::<AddWithContext>((5, 7)).await.unwrap(), 12);
}

#[tokio::test]
async fn test_missing_auth_middleware_yields_unauthorized() {
    let address = start_test_server(TransportKind::Buffered, ProtocolKind::Binary).await;
    let client = client_for(address, Vec::new());

    let err = client.call::<AddWithContext>((5, 7)).await.unwrap_err();
    assert!(matches!(err, ClientError::Remote(_)));
    assert_eq!(err.to_string(), "Unauthorized");
}

#[tokio::test]
async fn test_auth_middleware_filtered_to_other_method_yields_unauthorized() {
    let address = start_test_server(TransportKind::Buffered, ProtocolKind::Binary).await;
    let client = client_for(
        address,
        vec![
            MiddlewareRegistration::context(
                MiddlewareDirection::Outgoing,
                |context: RequestContext| async move {
                    Ok(context.with_header("X-Fake-Token", "fake-token"))
                },
            )
            .for_methods(["add"]),
        ],
    );

    let err = client.call::<AddWithContext>((5, 7)).await.unwrap_err();
    assert_eq!(err.to_string(), "Unauthorized");
}

#[tokio::test]
async fn test_caller_supplied_context_passes_auth() {
    let address = start_test_server(TransportKind::Buffered, ProtocolKind::Binary).await;
    let client = client_for(address, Vec::new());

    let context = RequestContext::new().with_header("X-Fake-Token", "fake-token");
    let result = client
        .call_with_context::<AddWithContext>((5, 7), context)
        .await
        .unwrap();
    assert_eq!(result, 12);
}

#[tokio::test]
async fn test_middleware_overrides_caller_supplied_context() {
    let address = start_test_server(TransportKind::Buffered, ProtocolKind::Binary).await;
    let client = client_for(
        address,
        vec![MiddlewareRegistration::context(
            MiddlewareDirection::Outgoing,
            |context: RequestContext| async move {
                // Middleware runs after the caller's context and has final say.
                Ok(context.with_header("X-Fake-Token", "fake-token"))
            },
        )],
    );

    let context = RequestContext::new().with_header("X-Fake-Token", "wrong-token");
    let result = client
        .call_with_context::<AddWithContext>((5, 7), context)
        .await
        .unwrap();
    assert_eq!(result, 12);
}

#[tokio::test]
async fn test_per_call_timeout() {
    let (listener, address) = bind_random_port().await.unwrap();
    let server = RpcServer::new(ServerConfig::default());
    server
        .endpoint()
        .register_method::<Add, _, _>(|(left, right), _context| async move {
            tokio::time::sleep(Duration::from_millis(500)).await;
            Ok(left + right)
        })
        .await
        .unwrap();
    tokio::spawn(async move {
        let _ = server.serve_with_listener(listener).await;
    });
    tokio::time::sleep(Duration::from_millis(100)).await;

    let client = client_for(address, Vec::new());
    let context = RequestContext::new().with_timeout(Duration::from_millis(50));
    let err = client
        .call_with_context::<Add>((5, 7), context)
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Timeout));
}

#[tokio::test]
async fn test_trace_headers_reach_the_server() {
    use wireline_tracing::{
        TRACE_ID_HEADER, TracerConfig, TracerRegistry, trace_propagation_middleware,
    };

    let (listener, address) = bind_random_port().await.unwrap();
    let server = RpcServer::new(ServerConfig::default());
    server
        .endpoint()
        .register_method::<EchoString, _, _>(|_text, context| async move {
            Ok(context.header(TRACE_ID_HEADER).unwrap_or_default().to_string())
        })
        .await
        .unwrap();
    tokio::spawn(async move {
        let _ = server.serve_with_listener(listener).await;
    });
    tokio::time::sleep(Duration::from_millis(100)).await;

    let registry = TracerRegistry::new();
    let tracer = registry.get_tracer_for_service(
        "calculator-client",
        &TracerConfig {
            debug: true,
            ..TracerConfig::default()
        },
    );
    let client = client_for(address, vec![trace_propagation_middleware(tracer)]);

    let trace_id = client
        .call::<EchoString>("ignored".to_string())
        .await
        .unwrap();
    assert_eq!(trace_id.len(), 16);
    assert!(trace_id.bytes().all(|b| b.is_ascii_hexdigit()));
}
