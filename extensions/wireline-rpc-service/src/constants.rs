/// Default URL path servers mount their RPC handler on and clients post to.
pub const DEFAULT_RPC_PATH: &str = "/rpc";

/// Content type of a serialized RPC message over HTTP.
pub const RPC_CONTENT_TYPE: &str = "application/octet-stream";
