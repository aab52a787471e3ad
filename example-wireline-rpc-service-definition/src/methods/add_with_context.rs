use bitcode::{Decode, Encode};
use std::io;
use wireline_rpc_service::ServiceMethod;

#[derive(Encode, Decode, PartialEq, Debug)]
struct AddWithContextArgs {
    pub left: i32,
    pub right: i32,
}

#[derive(Encode, Decode, PartialEq, Debug)]
struct AddWithContextResult {
    pub value: i32,
}

/// Same arithmetic as `add`, but servers guard it behind a request-context
/// check (an auth header), which makes it the canonical target for
/// context-middleware exercises.
pub struct AddWithContext;

impl ServiceMethod for AddWithContext {
    const NAME: &'static str = "addWithContext";

    type Args = (i32, i32);
    type Ret = i32;

    fn encode_args((left, right): Self::Args) -> Result<Vec<u8>, io::Error> {
        Ok(bitcode::encode(&AddWithContextArgs { left, right }))
    }

    fn decode_args(bytes: &[u8]) -> Result<Self::Args, io::Error> {
        let raw = bitcode::decode::<AddWithContextArgs>(bytes)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

        Ok((raw.left, raw.right))
    }

    fn encode_ret(value: Self::Ret) -> Result<Vec<u8>, io::Error> {
        Ok(bitcode::encode(&AddWithContextResult { value }))
    }

    fn decode_ret(bytes: &[u8]) -> Result<Self::Ret, io::Error> {
        let raw = bitcode::decode::<AddWithContextResult>(bytes)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

        Ok(raw.value)
    }
}
