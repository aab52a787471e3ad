mod envelope_error;
mod envelope_inspector;
mod envelope_struct;
mod envelope_writer;
mod message_type;
mod protocol_kind;
mod remote_fault;
mod transport_kind;
mod varint;

pub use envelope_error::EnvelopeError;
pub use envelope_inspector::{read_envelope, read_method_name};
pub use envelope_struct::WireMessageEnvelope;
pub use envelope_writer::{build_message, write_message_begin};
pub use message_type::MessageType;
pub use protocol_kind::ProtocolKind;
pub use remote_fault::{RemoteFault, RemoteFaultKind};
pub use transport_kind::TransportKind;
