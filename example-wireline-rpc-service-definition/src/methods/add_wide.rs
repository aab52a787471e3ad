use bitcode::{Decode, Encode};
use std::io;
use wireline_rpc_service::ServiceMethod;

#[derive(Encode, Decode, PartialEq, Debug)]
struct AddWideArgs {
    pub left: String,
    pub right: String,
}

#[derive(Encode, Decode, PartialEq, Debug)]
struct AddWideResult {
    pub value: String,
}

/// Adds two 64-bit integers exchanged as decimal strings.
///
/// Callers that cannot represent the full signed 64-bit range natively pass
/// values this way; handlers parse them with `wireline::wide_int::WideInt`
/// and answer in the same canonical decimal form.
pub struct AddWide;

impl ServiceMethod for AddWide {
    const NAME: &'static str = "addWide";

    type Args = (String, String);
    type Ret = String;

    fn encode_args((left, right): Self::Args) -> Result<Vec<u8>, io::Error> {
        Ok(bitcode::encode(&AddWideArgs { left, right }))
    }

    fn decode_args(bytes: &[u8]) -> Result<Self::Args, io::Error> {
        let raw = bitcode::decode::<AddWideArgs>(bytes)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

        Ok((raw.left, raw.right))
    }

    fn encode_ret(value: Self::Ret) -> Result<Vec<u8>, io::Error> {
        Ok(bitcode::encode(&AddWideResult { value }))
    }

    fn decode_ret(bytes: &[u8]) -> Result<Self::Ret, io::Error> {
        let raw = bitcode::decode::<AddWideResult>(bytes)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

        Ok(raw.value)
    }
}
