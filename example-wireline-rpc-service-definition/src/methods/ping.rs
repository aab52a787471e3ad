use std::io;
use wireline_rpc_service::ServiceMethod;

/// A void call: no arguments, no result, just a liveness round trip.
pub struct Ping;

impl ServiceMethod for Ping {
    const NAME: &'static str = "ping";

    type Args = ();
    type Ret = ();

    fn encode_args(_args: Self::Args) -> Result<Vec<u8>, io::Error> {
        Ok(Vec::new())
    }

    fn decode_args(_bytes: &[u8]) -> Result<Self::Args, io::Error> {
        Ok(())
    }

    fn encode_ret(_ret: Self::Ret) -> Result<Vec<u8>, io::Error> {
        Ok(Vec::new())
    }

    fn decode_ret(_bytes: &[u8]) -> Result<Self::Ret, io::Error> {
        Ok(())
    }
}
