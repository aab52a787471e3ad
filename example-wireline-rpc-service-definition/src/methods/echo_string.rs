use bitcode::{Decode, Encode};
use std::io;
use wireline_rpc_service::ServiceMethod;

#[derive(Encode, Decode, PartialEq, Debug)]
struct EchoStringArgs {
    pub text: String,
}

#[derive(Encode, Decode, PartialEq, Debug)]
struct EchoStringResult {
    pub text: String,
}

/// Echoes a string back unchanged.
pub struct EchoString;

impl ServiceMethod for EchoString {
    const NAME: &'static str = "echoString";

    type Args = String;
    type Ret = String;

    fn encode_args(text: Self::Args) -> Result<Vec<u8>, io::Error> {
        Ok(bitcode::encode(&EchoStringArgs { text }))
    }

    fn decode_args(bytes: &[u8]) -> Result<Self::Args, io::Error> {
        let raw = bitcode::decode::<EchoStringArgs>(bytes)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

        Ok(raw.text)
    }

    fn encode_ret(text: Self::Ret) -> Result<Vec<u8>, io::Error> {
        Ok(bitcode::encode(&EchoStringResult { text }))
    }

    fn decode_ret(bytes: &[u8]) -> Result<Self::Ret, io::Error> {
        let raw = bitcode::decode::<EchoStringResult>(bytes)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

        Ok(raw.text)
    }
}
