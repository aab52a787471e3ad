use bitcode::{Decode, Encode};
use std::io;
use wireline_rpc_service::ServiceMethod;

#[derive(Encode, Decode, PartialEq, Debug)]
struct AddArgs {
    pub left: i32,
    pub right: i32,
}

#[derive(Encode, Decode, PartialEq, Debug)]
struct AddResult {
    pub value: i32,
}

/// Adds two 32-bit integers.
pub struct Add;

impl ServiceMethod for Add {
    const NAME: &'static str = "add";

    type Args = (i32, i32);
    type Ret = i32;

    fn encode_args((left, right): Self::Args) -> Result<Vec<u8>, io::Error> {
        Ok(bitcode::encode(&AddArgs { left, right }))
    }

    fn decode_args(bytes: &[u8]) -> Result<Self::Args, io::Error> {
        let raw = bitcode::decode::<AddArgs>(bytes)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

        Ok((raw.left, raw.right))
    }

    fn encode_ret(value: Self::Ret) -> Result<Vec<u8>, io::Error> {
        Ok(bitcode::encode(&AddResult { value }))
    }

    fn decode_ret(bytes: &[u8]) -> Result<Self::Ret, io::Error> {
        let raw = bitcode::decode::<AddResult>(bytes)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

        Ok(raw.value)
    }
}
