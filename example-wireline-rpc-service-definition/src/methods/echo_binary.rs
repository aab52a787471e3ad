use bitcode::{Decode, Encode};
use std::io;
use wireline_rpc_service::ServiceMethod;

#[derive(Encode, Decode, PartialEq, Debug)]
struct EchoBinaryArgs {
    pub data: Vec<u8>,
}

#[derive(Encode, Decode, PartialEq, Debug)]
struct EchoBinaryResult {
    pub text: String,
}

/// Echoes a binary blob back as its UTF-8 string reading.
pub struct EchoBinary;

impl ServiceMethod for EchoBinary {
    const NAME: &'static str = "echoBinary";

    type Args = Vec<u8>;
    type Ret = String;

    fn encode_args(data: Self::Args) -> Result<Vec<u8>, io::Error> {
        Ok(bitcode::encode(&EchoBinaryArgs { data }))
    }

    fn decode_args(bytes: &[u8]) -> Result<Self::Args, io::Error> {
        let raw = bitcode::decode::<EchoBinaryArgs>(bytes)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

        Ok(raw.data)
    }

    fn encode_ret(text: Self::Ret) -> Result<Vec<u8>, io::Error> {
        Ok(bitcode::encode(&EchoBinaryResult { text }))
    }

    fn decode_ret(bytes: &[u8]) -> Result<Self::Ret, io::Error> {
        let raw = bitcode::decode::<EchoBinaryResult>(bytes)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

        Ok(raw.text)
    }
}
